//! SNS operations.
//!
//! One method per Query API action. Each checks its required arguments
//! before anything is signed or sent, shapes the parameters, runs
//! [`SnsClient::request`] and extracts the field(s) the caller cares about.
//!
//! Reference: <https://docs.aws.amazon.com/sns/latest/api/>

use crate::client::SnsClient;
use crate::error::{SnsError, SnsResult};
use crate::response::{self, MemberPage};
use std::collections::BTreeMap;

/// Account id → SNS action names granted to it.
pub type Permissions = BTreeMap<String, Vec<String>>;

fn require(values: &[&str], message: &str) -> SnsResult<()> {
    if values.iter().any(|v| v.is_empty()) {
        return Err(SnsError::validation(message));
    }
    Ok(())
}

fn params<const N: usize>(pairs: [(&str, &str); N]) -> BTreeMap<String, String> {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Flatten `permissions` into `ActionName.member.N` / `AWSAccountID.member.N`
/// pairs, numbered densely from 1 in map order.
pub fn flatten_permissions(permissions: &Permissions) -> SnsResult<BTreeMap<String, String>> {
    let mut accounts: Vec<&str> = Vec::new();
    let mut actions: Vec<&str> = Vec::new();

    for (account, granted) in permissions {
        if account.is_empty() {
            return Err(SnsError::validation("Permission account id must not be empty"));
        }
        if granted.is_empty() {
            return Err(SnsError::validation(format!(
                "No actions given for account '{}'",
                account
            )));
        }
        for action in granted {
            if action.is_empty() {
                return Err(SnsError::validation(format!(
                    "Empty action name for account '{}'",
                    account
                )));
            }
            accounts.push(account);
            actions.push(action);
        }
    }

    if accounts.is_empty() {
        return Err(SnsError::validation(
            "Must supply at least one account and action",
        ));
    }
    flatten_members(&actions, &accounts)
}

/// Number parallel action/account lists densely from 1. Both lists must
/// have the same length.
pub fn flatten_members(
    actions: &[&str],
    accounts: &[&str],
) -> SnsResult<BTreeMap<String, String>> {
    if actions.len() != accounts.len() {
        return Err(SnsError::validation("Mismatch of permissions to users"));
    }

    let mut flat = BTreeMap::new();
    for (i, (action, account)) in actions.iter().zip(accounts).enumerate() {
        let n = i + 1;
        flat.insert(format!("ActionName.member.{}", n), action.to_string());
        flat.insert(format!("AWSAccountID.member.{}", n), account.to_string());
    }
    Ok(flat)
}

impl SnsClient {
    // ── Topics ──────────────────────────────────────────────────────

    /// Create a topic (idempotent on name) and return its ARN.
    pub async fn create_topic(&self, name: &str) -> SnsResult<String> {
        require(&[name], "Must supply a Name to create topic")?;
        let doc = self.request("CreateTopic", params([("Name", name)])).await?;
        response::required_text(&doc, &["CreateTopicResult", "TopicArn"])
    }

    pub async fn delete_topic(&self, topic_arn: &str) -> SnsResult<()> {
        require(&[topic_arn], "Must supply a TopicARN to delete a topic")?;
        self.request("DeleteTopic", params([("TopicArn", topic_arn)]))
            .await?;
        Ok(())
    }

    /// Topic attributes (Owner, Policy, DisplayName, ...) as a flat map.
    pub async fn get_topic_attributes(
        &self,
        topic_arn: &str,
    ) -> SnsResult<BTreeMap<String, String>> {
        require(&[topic_arn], "Must supply a TopicARN to get topic attributes")?;
        let doc = self
            .request("GetTopicAttributes", params([("TopicArn", topic_arn)]))
            .await?;
        let attributes =
            response::required_element(&doc, &["GetTopicAttributesResult", "Attributes"])?;
        Ok(response::entries(attributes))
    }

    /// Set a single topic attribute.
    pub async fn set_topic_attributes(
        &self,
        topic_arn: &str,
        attribute_name: &str,
        attribute_value: &str,
    ) -> SnsResult<()> {
        require(
            &[topic_arn, attribute_name, attribute_value],
            "Must supply a TopicARN, AttributeName and AttributeValue to set a topic attribute",
        )?;
        self.request(
            "SetTopicAttributes",
            params([
                ("TopicArn", topic_arn),
                ("AttributeName", attribute_name),
                ("AttributeValue", attribute_value),
            ]),
        )
        .await?;
        Ok(())
    }

    pub async fn list_topics(&self, next_token: Option<&str>) -> SnsResult<MemberPage> {
        let mut p = BTreeMap::new();
        if let Some(token) = next_token {
            p.insert("NextToken".to_string(), token.to_string());
        }
        let doc = self.request("ListTopics", p).await?;
        response::member_page(&doc, "ListTopicsResult", "Topics")
    }

    // ── Publishing ──────────────────────────────────────────────────

    /// Publish `message` and return the message id. An empty `subject` is
    /// not sent.
    pub async fn publish(
        &self,
        topic_arn: &str,
        message: &str,
        subject: Option<&str>,
    ) -> SnsResult<String> {
        require(
            &[topic_arn, message],
            "Must supply a TopicARN and Message to publish to a topic",
        )?;
        let mut p = params([("TopicArn", topic_arn), ("Message", message)]);
        if let Some(subject) = subject.filter(|s| !s.is_empty()) {
            p.insert("Subject".to_string(), subject.to_string());
        }
        let doc = self.request("Publish", p).await?;
        response::required_text(&doc, &["PublishResult", "MessageId"])
    }

    // ── Subscriptions ───────────────────────────────────────────────

    /// Subscribe `endpoint` over `protocol` (http, https, email,
    /// email-json, sms, sqs, ...). The endpoint still has to confirm.
    pub async fn subscribe(&self, topic_arn: &str, protocol: &str, endpoint: &str) -> SnsResult<()> {
        require(
            &[topic_arn, protocol, endpoint],
            "Must supply a TopicARN, Protocol and Endpoint to subscribe to a topic",
        )?;
        self.request(
            "Subscribe",
            params([
                ("TopicArn", topic_arn),
                ("Protocol", protocol),
                ("Endpoint", endpoint),
            ]),
        )
        .await?;
        Ok(())
    }

    pub async fn unsubscribe(&self, subscription_arn: &str) -> SnsResult<()> {
        require(
            &[subscription_arn],
            "Must supply a SubscriptionARN to unsubscribe from a topic",
        )?;
        self.request(
            "Unsubscribe",
            params([("SubscriptionArn", subscription_arn)]),
        )
        .await?;
        Ok(())
    }

    /// Confirm a pending subscription with the token SNS sent to the
    /// endpoint. Returns the subscription ARN.
    pub async fn confirm_subscription(
        &self,
        topic_arn: &str,
        token: &str,
        authenticate_on_unsubscribe: Option<bool>,
    ) -> SnsResult<String> {
        require(
            &[topic_arn, token],
            "Must supply a TopicARN and a Token to confirm subscription",
        )?;
        let mut p = params([("TopicArn", topic_arn), ("Token", token)]);
        if let Some(auth) = authenticate_on_unsubscribe {
            p.insert("AuthenticateOnUnsubscribe".to_string(), auth.to_string());
        }
        let doc = self.request("ConfirmSubscription", p).await?;
        response::required_text(&doc, &["ConfirmSubscriptionResult", "SubscriptionArn"])
    }

    pub async fn list_subscriptions(&self, next_token: Option<&str>) -> SnsResult<MemberPage> {
        let mut p = BTreeMap::new();
        if let Some(token) = next_token {
            p.insert("NextToken".to_string(), token.to_string());
        }
        let doc = self.request("ListSubscriptions", p).await?;
        response::member_page(&doc, "ListSubscriptionsResult", "Subscriptions")
    }

    pub async fn list_subscriptions_by_topic(
        &self,
        topic_arn: &str,
        next_token: Option<&str>,
    ) -> SnsResult<MemberPage> {
        require(
            &[topic_arn],
            "Must supply a TopicARN to show subscriptions to a topic",
        )?;
        let mut p = params([("TopicArn", topic_arn)]);
        if let Some(token) = next_token {
            p.insert("NextToken".to_string(), token.to_string());
        }
        let doc = self.request("ListSubscriptionsByTopic", p).await?;
        response::member_page(&doc, "ListSubscriptionsByTopicResult", "Subscriptions")
    }

    // ── Permissions ─────────────────────────────────────────────────

    /// Grant `permissions` on a topic under policy statement `label`.
    pub async fn add_permission(
        &self,
        topic_arn: &str,
        label: &str,
        permissions: &Permissions,
    ) -> SnsResult<()> {
        require(
            &[topic_arn, label],
            "Must supply TopicARN and a Label for this permission",
        )?;
        let mut p = params([("TopicArn", topic_arn), ("Label", label)]);
        p.extend(flatten_permissions(permissions)?);
        self.request("AddPermission", p).await?;
        Ok(())
    }

    /// Remove the policy statement `label` added by [`SnsClient::add_permission`].
    pub async fn remove_permission(&self, topic_arn: &str, label: &str) -> SnsResult<()> {
        require(
            &[topic_arn, label],
            "Must supply a TopicARN and Label to remove a permission",
        )?;
        self.request(
            "RemovePermission",
            params([("TopicArn", topic_arn), ("Label", label)]),
        )
        .await?;
        Ok(())
    }
}
