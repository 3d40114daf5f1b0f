//! End-to-end tests: real `ReqwestTransport` against a one-shot local HTTP
//! server returning canned SNS replies.

use sorng_sns::{Credentials, Endpoint, ReqwestTransport, SnsClient, SnsError};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_test::{assert_err, assert_ok};

/// Serve exactly one request, answer with `status`/`body`, and hand back the
/// request head that was received.
async fn serve_once(
    status: &'static str,
    content_type: &'static str,
    body: &'static str,
) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut head = Vec::new();
        let mut buf = [0u8; 1024];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            head.extend_from_slice(&buf[..n]);
        }
        let reply = format!(
            "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nx-amzn-RequestId: hdr-42\r\nConnection: close\r\n\r\n{}",
            status,
            content_type,
            body.len(),
            body
        );
        socket.write_all(reply.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        String::from_utf8_lossy(&head).into_owned()
    });

    (format!("http://{}", addr), handle)
}

fn client(base: &str) -> SnsClient {
    SnsClient::with_transport(
        Credentials::new("AKIDEXAMPLE", "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY").unwrap(),
        Endpoint::from_url(base).unwrap(),
        Arc::new(ReqwestTransport::default()),
    )
}

#[tokio::test]
async fn publish_round_trip() {
    let (base, server) = serve_once(
        "200 OK",
        "text/xml",
        r#"<PublishResponse xmlns="http://sns.amazonaws.com/doc/2010-03-31/">
  <PublishResult><MessageId>94f20ce6-13c5-43a0-9a9e-ca52d816e90b</MessageId></PublishResult>
  <ResponseMetadata><RequestId>f187a3c1-376f-11df-8963-01868b7c937a</RequestId></ResponseMetadata>
</PublishResponse>"#,
    )
    .await;

    let id = assert_ok!(
        client(&base)
            .publish("arn:aws:sns:us-east-1:123456789012:My-Topic", "Hello world!", None)
            .await
    );
    assert_eq!(id, "94f20ce6-13c5-43a0-9a9e-ca52d816e90b");

    let head = server.await.unwrap();
    let request_line = head.lines().next().unwrap();
    assert!(request_line.starts_with("GET /?"), "{}", request_line);
    assert!(request_line.contains("Action=Publish"));
    assert!(request_line.contains("Message=Hello%20world%21"));
    assert!(request_line.contains("SignatureMethod=HmacSHA256"));
    assert!(request_line.contains("&Signature="));
}

#[tokio::test]
async fn authorization_error_is_remote() {
    let (base, server) = serve_once(
        "403 Forbidden",
        "text/xml",
        "<ErrorResponse><Error><Type>Sender</Type><Code>AuthorizationError</Code>\
         <Message>Denied</Message></Error></ErrorResponse>",
    )
    .await;

    let err = assert_err!(client(&base).list_topics(None).await);
    match err {
        SnsError::Remote {
            code,
            message,
            status,
            request_id,
        } => {
            assert_eq!(code, "AuthorizationError");
            assert_eq!(message, "Denied");
            assert_eq!(status, 403);
            assert_eq!(request_id.as_deref(), Some("hdr-42"));
        }
        other => panic!("unexpected {:?}", other),
    }
    server.await.unwrap();
}

#[tokio::test]
async fn plain_text_failure_is_http_error() {
    let (base, server) =
        serve_once("500 Internal Server Error", "text/plain", "Internal Server Error").await;

    let err = assert_err!(client(&base).delete_topic("arn:aws:sns:us-east-1:1:T").await);
    assert!(matches!(err, SnsError::Http { status: 500, .. }), "{:?}", err);
    assert_eq!(err.code(), None);
    server.await.unwrap();
}
