//! HTTP client abstraction.
//!
//! The generative client only needs to POST a JSON body and read back the
//! status and body. [`UreqClient`] does this over `ureq`; tests script
//! responses with [`ScriptedHttpClient`].

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::fmt;
use std::future::Future;
use std::time::Duration;

/// A raw HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code.
    pub status: u16,
    /// Response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a response.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns true for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP client abstraction.
///
/// Implement this trait to provide the actual HTTP transport.
pub trait HttpClient: Send + Sync {
    /// Sends a POST request with a JSON body.
    ///
    /// Returns an error only if no response was received.
    fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: Vec<u8>,
    ) -> impl Future<Output = Result<HttpResponse, String>> + Send;
}

/// Blocking `ureq` agent driven from the tokio blocking pool.
///
/// Headers, including the API key, travel inside the request; nothing is
/// passed through process arguments.
#[derive(Clone)]
pub struct UreqClient {
    agent: ureq::Agent,
}

impl UreqClient {
    /// Creates a client whose requests give up after `timeout`.
    ///
    /// Non-2xx statuses are returned as responses so the caller can read
    /// the error body.
    pub fn new(timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build();
        Self {
            agent: ureq::Agent::new_with_config(config),
        }
    }
}

impl fmt::Debug for UreqClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqClient").finish_non_exhaustive()
    }
}

fn send_blocking(
    agent: &ureq::Agent,
    url: &str,
    headers: &[(String, String)],
    body: &[u8],
) -> Result<HttpResponse, String> {
    let mut request = agent.post(url).header("Content-Type", "application/json");
    for (name, value) in headers {
        request = request.header(name.as_str(), value.as_str());
    }
    let mut response = request.send(body).map_err(|e| e.to_string())?;
    let status = response.status().as_u16();
    let body = response
        .body_mut()
        .read_to_vec()
        .map_err(|e| format!("failed to read response: {e}"))?;
    Ok(HttpResponse::new(status, body))
}

impl HttpClient for UreqClient {
    fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: Vec<u8>,
    ) -> impl Future<Output = Result<HttpResponse, String>> + Send {
        let agent = self.agent.clone();
        let url = url.to_string();
        let headers: Vec<(String, String)> = headers
            .iter()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect();
        async move {
            tokio::task::spawn_blocking(move || send_blocking(&agent, &url, &headers, &body))
                .await
                .map_err(|e| format!("request task failed: {e}"))?
        }
    }
}

/// A request captured by [`ScriptedHttpClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    /// Target URL.
    pub url: String,
    /// Extra headers.
    pub headers: Vec<(String, String)>,
    /// Decoded JSON body.
    pub body: serde_json::Value,
}

/// A scripted HTTP client for testing.
///
/// Responses are consumed in order; once the script runs out every
/// request fails. Every request is recorded.
#[derive(Debug, Default)]
pub struct ScriptedHttpClient {
    responses: Mutex<VecDeque<Result<HttpResponse, String>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedHttpClient {
    /// Creates a client with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a response with a JSON body.
    pub fn push_json(&self, status: u16, body: &serde_json::Value) {
        self.responses
            .lock()
            .push_back(Ok(HttpResponse::new(status, body.to_string())));
    }

    /// Appends a transport failure.
    pub fn push_failure(&self, message: impl Into<String>) {
        self.responses.lock().push_back(Err(message.into()));
    }

    /// Returns the requests made so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }
}

impl HttpClient for ScriptedHttpClient {
    fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: Vec<u8>,
    ) -> impl Future<Output = Result<HttpResponse, String>> + Send {
        self.requests.lock().push(RecordedRequest {
            url: url.to_string(),
            headers: headers
                .iter()
                .map(|(n, v)| (n.to_string(), v.to_string()))
                .collect(),
            body: serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null),
        });
        let next = self
            .responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err("no scripted response".to_string()));
        std::future::ready(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answers one request with `status_line` and `body`; the handle
    /// yields the raw request text.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/v1beta/generate", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&raw).to_ascii_lowercase();
                if let Some(end) = text.find("\r\n\r\n") {
                    let length = text[..end]
                        .lines()
                        .find_map(|l| l.strip_prefix("content-length:"))
                        .and_then(|v| v.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    if raw.len() >= end + 4 + length {
                        break;
                    }
                }
            }
            let response = format!(
                "HTTP/1.1 {status_line}\r\n\
                 content-type: application/json\r\n\
                 content-length: {}\r\n\
                 connection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            String::from_utf8_lossy(&raw).into_owned()
        });
        (url, handle)
    }

    #[tokio::test]
    async fn ureq_client_sends_key_as_header() {
        let (url, server) = serve_once("200 OK", "{\"ok\":true}").await;
        let client = UreqClient::new(Duration::from_secs(5));
        let response = client
            .post_json(&url, &[("x-goog-api-key", "SECRET-KEY-123")], b"{\"q\":1}".to_vec())
            .await
            .unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body, b"{\"ok\":true}");

        let request = server.await.unwrap();
        let lower = request.to_ascii_lowercase();
        assert!(lower.starts_with("post /v1beta/generate"));
        assert!(lower.contains("x-goog-api-key: secret-key-123"));
        assert!(lower.contains("content-type: application/json"));
        assert!(request.ends_with("{\"q\":1}"));
    }

    #[tokio::test]
    async fn ureq_client_returns_error_statuses_as_responses() {
        let (url, server) = serve_once("503 Service Unavailable", "{\"error\":\"busy\"}").await;
        let client = UreqClient::new(Duration::from_secs(5));
        let response = client.post_json(&url, &[], b"{}".to_vec()).await.unwrap();
        assert_eq!(response.status, 503);
        assert!(!response.is_success());
        assert_eq!(response.body, b"{\"error\":\"busy\"}");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn ureq_client_reports_connection_failures() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/", listener.local_addr().unwrap());
        drop(listener);
        let client = UreqClient::new(Duration::from_secs(5));
        assert!(client.post_json(&url, &[], Vec::new()).await.is_err());
    }

    #[tokio::test]
    async fn scripted_client_records_requests() {
        let client = ScriptedHttpClient::new();
        client.push_json(200, &serde_json::json!({ "ok": true }));

        let response = client
            .post_json("http://x/generate", &[("x-goog-api-key", "k")], b"{\"q\":1}".to_vec())
            .await
            .unwrap();
        assert_eq!(response.status, 200);
        assert!(client
            .post_json("http://x/generate", &[], Vec::new())
            .await
            .is_err());

        let requests = client.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].headers[0].0, "x-goog-api-key");
        assert_eq!(requests[0].body["q"], 1);
    }
}
