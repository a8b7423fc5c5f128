//! reqwest implementation of [`RelayApi`], used by the terminal client.

use reqwest::{Response, Url};
use serde::de::DeserializeOwned;

use chatrelay_core::client::api::RelayApi;
use chatrelay_types::chat::{ChatReply, ChatRequest};
use chatrelay_types::error::{ClientError, ConfigError};
use chatrelay_types::session::{SessionRequest, SessionToken};

/// HTTP client for a deployed relay.
pub struct RelayClient {
    http: reqwest::Client,
    base_url: Url,
}

impl RelayClient {
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let base_url = Url::parse(base_url).map_err(|e| ConfigError::Invalid {
            key: "relay_url".to_string(),
            message: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ConfigError::Invalid {
                key: "relay_url".to_string(),
                message: format!("'{base_url}' cannot be used as a base URL"),
            });
        }
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
        })
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}

/// The relay's `{"error": ...}` message, or the raw body when it is not
/// in that shape.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

fn network(err: reqwest::Error) -> ClientError {
    ClientError::Network(err.to_string())
}

impl RelayApi for RelayClient {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, ClientError> {
        let response = self
            .http
            .post(self.url(&["chat"]))
            .json(request)
            .send()
            .await
            .map_err(network)?;
        Self::decode(response).await
    }

    async fn issue_session(&self, request: &SessionRequest) -> Result<SessionToken, ClientError> {
        let response = self
            .http
            .post(self.url(&["chatkit", "session"]))
            .json(request)
            .send()
            .await
            .map_err(network)?;
        Self::decode(response).await
    }

    async fn health(&self) -> Result<(), ClientError> {
        let response = self
            .http
            .get(self.url(&["health"]))
            .send()
            .await
            .map_err(network)?;
        Self::decode::<serde_json::Value>(response).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatrelay_types::chat::ConversationHandle;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_chat_round_trip() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .and(body_partial_json(json!({"message": "hi", "threadId": "resp_0"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"response": "hello", "threadId": "resp_1"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = RelayClient::new(&server.uri()).unwrap();
        let reply = client
            .chat(&ChatRequest {
                message: Some("hi".to_string()),
                thread_id: Some(ConversationHandle::new("resp_0")),
                ..ChatRequest::default()
            })
            .await
            .unwrap();

        assert_eq!(reply.response, "hello");
        assert_eq!(reply.thread_id, Some(ConversationHandle::new("resp_1")));
    }

    #[tokio::test]
    async fn test_error_body_message_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chatkit/session"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({"error": "API key not configured"})),
            )
            .mount(&server)
            .await;

        let client = RelayClient::new(&server.uri()).unwrap();
        let err = client
            .issue_session(&SessionRequest {
                workflow_id: Some("wf_1".to_string()),
                user_id: None,
            })
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ClientError::Status {
                status: 500,
                message: "API key not configured".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_health_ok() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
            .mount(&server)
            .await;

        let client = RelayClient::new(&format!("{}/", server.uri())).unwrap();
        client.health().await.unwrap();
    }

    #[tokio::test]
    async fn test_unreachable_relay_is_network_error() {
        let client = RelayClient::new("http://127.0.0.1:9").unwrap();
        let err = client.health().await.unwrap_err();
        assert!(matches!(err, ClientError::Network(_)));
    }

    #[test]
    fn test_error_message_falls_back_to_body() {
        assert_eq!(error_message("plain failure"), "plain failure");
        assert_eq!(error_message(r#"{"error":"Not found"}"#), "Not found");
    }
}
