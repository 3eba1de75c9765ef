//! HTTP submission client
//!
//! One POST per call, URL-encoded body, no retry and no timeout. The
//! response is read fully as text and then interpreted by a pure
//! function so the status/body rules can be tested without a socket.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use crate::api::{CandidateApi, GENERIC_REMOTE_ERROR, SubmitError};
use crate::config::ClientConfig;
use crate::domain::{CandidateResponse, SubmissionRequest};

/// Posts candidates to the configured endpoint
#[derive(Debug, Clone)]
pub struct CandidateClient {
    http: Client,
    config: ClientConfig,
}

impl CandidateClient {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_http_client(Client::new(), config)
    }

    pub fn with_http_client(http: Client, config: ClientConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

#[async_trait]
impl CandidateApi for CandidateClient {
    async fn create_candidate(
        &self,
        request: &SubmissionRequest,
    ) -> Result<CandidateResponse, SubmitError> {
        let endpoint = self.config.endpoint().clone();
        debug!(%endpoint, leader = %request.leader_name, party = %request.party_name, "Posting candidate");

        let response = self
            .http
            .post(endpoint)
            .form(&request.form_pairs()[..])
            .send()
            .await
            .inspect_err(|e| warn!("Candidate request failed: {e}"))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .inspect_err(|e| warn!(status = status.as_u16(), "Candidate response unreadable: {e}"))?;

        interpret_response(status, &body, request)
    }
}

/// Maps a finished HTTP exchange onto the submission result
///
/// A 2xx body that is not a JSON object is accepted as an echo of the
/// request rather than rejected. Inside an object, mistyped fields are
/// dropped one by one.
pub(crate) fn interpret_response(
    status: StatusCode,
    body: &str,
    request: &SubmissionRequest,
) -> Result<CandidateResponse, SubmitError> {
    if !status.is_success() {
        let message = if body.trim().is_empty() {
            GENERIC_REMOTE_ERROR.to_string()
        } else {
            body.to_string()
        };
        warn!(status = status.as_u16(), "Candidate rejected: {message}");

        return Err(SubmitError::Remote {
            status: status.as_u16(),
            message,
        });
    }

    let parsed = match serde_json::from_str::<Value>(body) {
        Ok(value @ Value::Object(_)) => serde_json::from_value::<CandidateResponse>(value).ok(),
        _ => None,
    };

    Ok(parsed.unwrap_or_else(|| {
        debug!(status = status.as_u16(), "Unstructured success body, echoing request");
        CandidateResponse::echo(request)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    fn amina() -> SubmissionRequest {
        SubmissionRequest {
            leader_name: "Amina Patel".to_string(),
            party_name: "Sunrise Alliance".to_string(),
        }
    }

    /// Accepts a single connection, answers it, and yields the raw request
    async fn serve_once(status_line: &'static str, body: &'static str) -> (SocketAddr, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut chunk = [0u8; 1024];

            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&chunk[..n]);

                let text = String::from_utf8_lossy(&raw).to_string();
                if let Some(split) = text.find("\r\n\r\n") {
                    let content_length = text[..split]
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if raw.len() >= split + 4 + content_length {
                        break;
                    }
                }
            }

            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();

            String::from_utf8(raw).unwrap()
        });

        (addr, handle)
    }

    fn client_for(addr: SocketAddr) -> CandidateClient {
        let http = Client::builder().no_proxy().build().unwrap();
        let config = ClientConfig::new(format!("http://{addr}/api"), "/candidate").unwrap();
        CandidateClient::with_http_client(http, config)
    }

    #[tokio::test]
    async fn posts_url_encoded_form() {
        let (addr, server) =
            serve_once("201 Created", r#"{"id":42,"name":"Amina Patel","party":"Sunrise Alliance"}"#).await;

        let response = client_for(addr).create_candidate(&amina()).await.unwrap();
        let raw = server.await.unwrap();

        assert!(raw.starts_with("POST /api/candidate HTTP/1.1"));
        assert!(
            raw.to_ascii_lowercase()
                .contains("content-type: application/x-www-form-urlencoded")
        );
        assert!(raw.ends_with("name=Amina+Patel&party=Sunrise+Alliance"));
        assert_eq!(response.id.as_deref(), Some("42"));
    }

    #[tokio::test]
    async fn error_status_carries_body_text() {
        let (addr, server) = serve_once("400 Bad Request", r#"{"name":["This field is required."]}"#).await;

        let err = client_for(addr).create_candidate(&amina()).await.unwrap_err();
        server.await.unwrap();

        match err {
            SubmitError::Remote { status, message } => {
                assert_eq!(status, 400);
                assert!(message.contains("This field is required."));
            }
            other => panic!("Expected remote error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn refused_connection_is_network_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client_for(addr).create_candidate(&amina()).await.unwrap_err();
        assert!(matches!(err, SubmitError::Network(_)));
    }

    #[test]
    fn empty_error_body_uses_generic_message() {
        let err = interpret_response(StatusCode::INTERNAL_SERVER_ERROR, "  ", &amina()).unwrap_err();
        assert_eq!(err.to_string(), GENERIC_REMOTE_ERROR);
    }

    #[test]
    fn malformed_success_echoes_request() {
        for body in ["", "<html>ok</html>", "[1,2]", "\"created\""] {
            let response = interpret_response(StatusCode::OK, body, &amina()).unwrap();
            assert_eq!(response, CandidateResponse::echo(&amina()), "body: {body}");
        }
    }

    #[test]
    fn partly_valid_object_keeps_server_id() {
        let response = interpret_response(
            StatusCode::CREATED,
            r#"{"id":"42","name":5,"party":"Sunrise Alliance"}"#,
            &amina(),
        )
        .unwrap();

        assert_eq!(response.id.as_deref(), Some("42"));
        assert_eq!(response.name, None);
        assert_eq!(response.party.as_deref(), Some("Sunrise Alliance"));
    }

    #[test]
    fn empty_object_is_accepted_as_is() {
        let response = interpret_response(StatusCode::CREATED, "{}", &amina()).unwrap();
        assert_eq!(response, CandidateResponse::default());
    }
}
