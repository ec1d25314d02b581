//! `HttpResourceClient` against a loopback HTTP responder.

use candidate_admin::client::{HttpResourceClient, ResourceClient, TransportError};
use candidate_admin::domain::AddressLevel;
use candidate_admin::{ApplicationStatus, Operations, StatusChange};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// What the responder saw: request line, headers (lowercased names), body.
struct Captured {
    request_line: String,
    headers: Vec<(String, String)>,
    body: String,
}

impl Captured {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Serves exactly one request with `status` and a JSON `body`.
async fn serve_once(status: &str, body: &str) -> (String, JoinHandle<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
        body.len()
    );

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0_u8; 4096];

        let header_end = loop {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "connection closed before headers were complete");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
        let mut lines = head.split("\r\n");
        let request_line = lines.next().unwrap().to_string();
        let headers: Vec<(String, String)> = lines
            .filter_map(|line| line.split_once(':'))
            .map(|(k, v)| (k.trim().to_lowercase(), v.trim().to_string()))
            .collect();

        let content_length = headers
            .iter()
            .find(|(k, _)| k == "content-length")
            .and_then(|(_, v)| v.parse::<usize>().ok())
            .unwrap_or(0);
        while buf.len() < header_end + content_length {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }
        let body = String::from_utf8_lossy(&buf[header_end..]).to_string();

        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();

        Captured {
            request_line,
            headers,
            body,
        }
    });

    (format!("http://{addr}/api"), handle)
}

fn client(base_url: &str, token: Option<&str>) -> HttpResourceClient {
    HttpResourceClient::new(base_url, Duration::from_secs(5), token.map(str::to_string)).unwrap()
}

#[tokio::test]
async fn list_unwraps_envelope() {
    let (base, server) = serve_once(
        "200 OK",
        r#"{"data":[{"_id":"a1","name":"Asha","status":"approved","teamMembers":[]},{"_id":"b2","name":"Bina"}]}"#,
    )
    .await;

    let envelope = client(&base, None).list_applications().await.unwrap();
    let captured = server.await.unwrap();

    assert_eq!(captured.request_line, "GET /api/candidate-applications HTTP/1.1");
    let records = envelope.into_data();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].status, ApplicationStatus::Approved);
    assert_eq!(records[1].status, ApplicationStatus::Pending);
}

#[tokio::test]
async fn status_change_is_a_patch_with_bearer_token() {
    let (base, server) = serve_once(
        "200 OK",
        r#"{"data":{"_id":"a1","name":"Asha","status":"rejected","notes":"incomplete"}}"#,
    )
    .await;

    let change = StatusChange::new(ApplicationStatus::Rejected, Some("incomplete".into()));
    let envelope = client(&base, Some("s3cret"))
        .update_application_status("a1", &change)
        .await
        .unwrap();
    let captured = server.await.unwrap();

    assert_eq!(captured.request_line, "PATCH /api/candidate-applications/a1/status HTTP/1.1");
    assert_eq!(captured.header("authorization"), Some("Bearer s3cret"));
    let sent: serde_json::Value = serde_json::from_str(&captured.body).unwrap();
    assert_eq!(sent, serde_json::json!({"status": "rejected", "notes": "incomplete"}));
    assert_eq!(envelope.into_data().notes.as_deref(), Some("incomplete"));
}

#[tokio::test]
async fn delete_ignores_response_body() {
    let (base, server) = serve_once("200 OK", r#"{"success":true}"#).await;

    client(&base, None).delete_application("a1").await.unwrap();

    assert_eq!(server.await.unwrap().request_line, "DELETE /api/candidate-applications/a1 HTTP/1.1");
}

#[tokio::test]
async fn lookups_send_parent_id() {
    let (base, server) = serve_once("200 OK", r#"{"data":[{"_id":"tvm","name":"Thiruvananthapuram"}]}"#).await;

    let places = client(&base, None)
        .list_places(AddressLevel::District, Some("kl"))
        .await
        .unwrap()
        .into_data();

    assert_eq!(server.await.unwrap().request_line, "GET /api/districts?parentId=kl HTTP/1.1");
    assert_eq!(places[0].label(), "Thiruvananthapuram");
}

#[tokio::test]
async fn error_body_message_reaches_operation_error() {
    let (base, server) = serve_once("409 Conflict", r#"{"success":false,"message":"Mobile number already registered"}"#).await;
    let operations = Operations::new(Arc::new(client(&base, None)));

    let err = operations.get_by_id("a1").await.unwrap_err();
    server.await.unwrap();

    assert_eq!(err.message, "Mobile number already registered");
}

#[tokio::test]
async fn non_json_error_body_falls_back() {
    let (base, server) = serve_once("500 Internal Server Error", "<html>oops</html>").await;

    let err = client(&base, None).list_applications().await.unwrap_err();
    server.await.unwrap();

    assert!(matches!(err, TransportError::Status { status: 500, body: None }));
    assert_eq!(err.user_message(), "Something went wrong");
}

#[tokio::test]
async fn success_without_envelope_is_a_decode_error() {
    let (base, server) = serve_once("200 OK", r#"[{"_id":"a1"}]"#).await;

    let err = client(&base, None).list_applications().await.unwrap_err();
    server.await.unwrap();

    assert!(matches!(err, TransportError::Decode(_)));
    assert_eq!(err.user_message(), "Something went wrong");
}

#[tokio::test]
async fn refused_connection_is_a_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let operations = Operations::new(Arc::new(client(&format!("http://{addr}/api"), None)));
    let err = operations.list().await.unwrap_err();

    assert_eq!(err.message, "Network Error");
}
