//! Response classification and the per-shape extractors.
//!
//! SNS uses three response shapes:
//!
//! - scalar fields (`CreateTopicResult/TopicArn`, `PublishResult/MessageId`)
//! - member lists (`ListTopicsResult/Topics/member`, ...)
//! - key/value entries (`GetTopicAttributesResult/Attributes/entry`)
//!
//! Error bodies look like:
//!
//! ```xml
//! <ErrorResponse>
//!   <Error>
//!     <Type>Sender</Type>
//!     <Code>AuthorizationError</Code>
//!     <Message>Denied</Message>
//!   </Error>
//!   <RequestId>9b516e4d-...</RequestId>
//! </ErrorResponse>
//! ```

use crate::error::{SnsError, SnsResult};
use crate::transport::HttpResponse;
use crate::xml::XmlElement;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Message used when a failed response carries no structured error.
pub const GENERIC_FAILURE: &str = "There was a problem executing this request";

/// One list entry: child tag → child text.
pub type Member = BTreeMap<String, String>;

/// One page of a list operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberPage {
    pub members: Vec<Member>,
    /// Pass back to fetch the next page; `None` on the last page.
    pub next_token: Option<String>,
}

/// `true` for any 2xx status.
pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Turn a raw response into a parsed document or a typed error.
pub fn interpret(response: &HttpResponse) -> SnsResult<XmlElement> {
    if is_success(response.status) {
        return XmlElement::parse(&response.body);
    }

    let remote = XmlElement::parse(&response.body).ok().and_then(|doc| {
        let error = doc.descendant("Error")?;
        let code = error.text_at(&["Code"])?.to_string();
        let message = error.text_at(&["Message"])?.to_string();
        let request_id = doc
            .descendant("RequestId")
            .map(|e| e.text.clone())
            .or_else(|| response.request_id.clone());
        Some(SnsError::Remote {
            code,
            message,
            status: response.status,
            request_id,
        })
    });

    Err(remote.unwrap_or_else(|| SnsError::Http {
        status: response.status,
        message: GENERIC_FAILURE.to_string(),
    }))
}

/// Required element under the response root.
pub fn required_element<'a>(doc: &'a XmlElement, path: &[&str]) -> SnsResult<&'a XmlElement> {
    doc.find(path).ok_or_else(|| {
        SnsError::MalformedResponse(format!(
            "{} is missing {}",
            doc.name,
            path.join("/")
        ))
    })
}

/// Required scalar under the response root.
pub fn required_text(doc: &XmlElement, path: &[&str]) -> SnsResult<String> {
    required_element(doc, path).map(|e| e.text.clone())
}

/// Each `member` child of `list` becomes one map, in document order.
pub fn members(list: &XmlElement) -> Vec<Member> {
    list.children_named("member")
        .map(|member| {
            member
                .children
                .iter()
                .map(|field| (field.name.clone(), field.text.clone()))
                .collect()
        })
        .collect()
}

/// Flatten `entry` children (`<key>`/`<value>`) into one map.
pub fn entries(attributes: &XmlElement) -> BTreeMap<String, String> {
    attributes
        .children_named("entry")
        .filter_map(|entry| {
            let key = entry.text_at(&["key"])?;
            let value = entry.text_at(&["value"]).unwrap_or_default();
            Some((key.to_string(), value.to_string()))
        })
        .collect()
}

/// Member page at `<result>/<list>/member` plus `<result>/NextToken`.
///
/// The list element must be present; an empty page arrives as `<list/>`.
pub fn member_page(doc: &XmlElement, result: &str, list: &str) -> SnsResult<MemberPage> {
    let members = members(required_element(doc, &[result, list])?);
    let next_token = doc
        .text_at(&[result, "NextToken"])
        .filter(|t| !t.is_empty())
        .map(str::to_string);
    Ok(MemberPage {
        members,
        next_token,
    })
}
