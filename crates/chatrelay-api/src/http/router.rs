//! Axum router configuration with middleware.
//!
//! Layering, outermost first: request tracing, CORS, panic capture. CORS
//! sits outside the panic layer so a panicking handler still gets its CORS
//! headers.

use std::any::Any;

use axum::http::StatusCode;
use axum::middleware;
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use chatrelay_types::error::RelayError;

use crate::http::error::{error_response, AppError};
use crate::http::{cors, handlers};
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    with_middleware(routes(), state)
}

fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/chatkit/session",
            post(handlers::session::issue_session).fallback(not_found),
        )
        .route("/chat", post(handlers::chat::chat).fallback(not_found))
        .route("/health", get(handlers::health::health).fallback(not_found))
        .fallback(not_found)
}

fn with_middleware(routes: Router<AppState>, state: AppState) -> Router {
    routes
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn_with_state(
            state.origins.clone(),
            cors::cors,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::Relay(RelayError::NotFound)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = detail, "Handler panicked");

    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        &RelayError::internal().to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use secrecy::SecretString;
    use serde_json::{json, Value};
    use tower::ServiceExt; // for `oneshot`
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use chatrelay_core::cors::OriginPolicy;
    use chatrelay_core::relay::service::RelayService;
    use chatrelay_types::config::RelayConfig;

    fn unconfigured_state(origins: &str) -> AppState {
        AppState::new(RelayService::new(None), OriginPolicy::from_list(origins))
    }

    fn upstream_state(base_url: &str) -> AppState {
        let config = RelayConfig {
            api_key: Some(SecretString::from("sk-test".to_string())),
            upstream_base_url: base_url.to_string(),
            allowed_origins: "https://docs.example.com".to_string(),
            ..RelayConfig::default()
        };
        AppState::from_config(&config).unwrap()
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ORIGIN, "https://docs.example.com")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Value) {
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let headers = resp.headers().clone();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, headers, body)
    }

    #[tokio::test]
    async fn test_health_ok() {
        let app = build_router(unconfigured_state("*"));
        let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let (status, headers, body) = send(app, req).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok"}));
        assert_eq!(headers.get("access-control-allow-origin").unwrap(), "*");
        assert_eq!(headers.get("access-control-max-age").unwrap(), "86400");
    }

    #[tokio::test]
    async fn test_preflight_on_any_path_is_204() {
        let app = build_router(unconfigured_state("https://docs.example.com"));
        let req = Request::builder()
            .method(Method::OPTIONS)
            .uri("/anything/at/all")
            .header(header::ORIGIN, "https://docs.example.com")
            .body(Body::empty())
            .unwrap();
        let (status, headers, body) = send(app, req).await;

        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);
        assert_eq!(
            headers.get("access-control-allow-origin").unwrap(),
            "https://docs.example.com"
        );
        assert_eq!(
            headers.get("access-control-allow-methods").unwrap(),
            "POST, GET, OPTIONS"
        );
        assert_eq!(
            headers.get("access-control-allow-headers").unwrap(),
            "Content-Type"
        );
        assert_eq!(headers.get("access-control-max-age").unwrap(), "86400");
    }

    #[tokio::test]
    async fn test_unknown_path_and_wrong_method_are_404() {
        for (verb, uri) in [
            (Method::GET, "/nope"),
            (Method::POST, "/health"),
            (Method::GET, "/chat"),
            (Method::GET, "/chatkit/session"),
        ] {
            let app = build_router(unconfigured_state("*"));
            let req = Request::builder()
                .method(verb.clone())
                .uri(uri)
                .body(Body::empty())
                .unwrap();
            let (status, headers, body) = send(app, req).await;

            assert_eq!(status, StatusCode::NOT_FOUND, "{verb} {uri}");
            assert_eq!(body, json!({"error": "Not found"}));
            assert!(headers.contains_key("access-control-allow-origin"));
        }
    }

    #[tokio::test]
    async fn test_disallowed_origin_gets_empty_header() {
        let app = build_router(unconfigured_state("https://docs.example.com"));
        let req = Request::builder()
            .uri("/health")
            .header(header::ORIGIN, "https://evil.example")
            .body(Body::empty())
            .unwrap();
        let (status, headers, _) = send(app, req).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers.get("access-control-allow-origin").unwrap(), "");
    }

    #[tokio::test]
    async fn test_chat_missing_message_is_checked_before_credential() {
        let app = build_router(unconfigured_state("*"));
        let (status, _, body) = send(app, post_json("/chat", r#"{"threadId":"resp_1"}"#)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Message is required"}));
    }

    #[tokio::test]
    async fn test_chat_non_string_message_is_validation_error() {
        let app = build_router(unconfigured_state("*"));
        let (status, _, body) = send(app, post_json("/chat", r#"{"message": 7}"#)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Message is required"}));
    }

    #[tokio::test]
    async fn test_chat_malformed_body() {
        let app = build_router(unconfigured_state("*"));
        let (status, _, body) = send(app, post_json("/chat", "{message:")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Invalid JSON body"}));
    }

    #[tokio::test]
    async fn test_oversized_body_is_413_json() {
        let app = build_router(unconfigured_state("*"));
        let message = "a".repeat(3 * 1024 * 1024);
        let payload = format!(r#"{{"message":"{message}"}}"#);
        let (status, headers, body) = send(app, post_json("/chat", &payload)).await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            headers.get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert!(body["error"].is_string());
        assert_eq!(headers.get("access-control-allow-origin").unwrap(), "*");
    }

    #[tokio::test]
    async fn test_chat_without_credential() {
        let app = build_router(unconfigured_state("*"));
        let (status, _, body) = send(app, post_json("/chat", r#"{"message":"hi"}"#)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "API key not configured"}));
    }

    #[tokio::test]
    async fn test_session_credential_checked_before_body() {
        let app = build_router(unconfigured_state("*"));
        let (status, _, body) = send(app, post_json("/chatkit/session", "not json")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "API key not configured"}));
    }

    #[tokio::test]
    async fn test_session_missing_workflow_makes_no_upstream_call() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let app = build_router(upstream_state(&server.uri()));
        let (status, _, body) =
            send(app, post_json("/chatkit/session", r#"{"workflowId":"  "}"#)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Workflow ID is required"}));
    }

    #[tokio::test]
    async fn test_session_issued() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chatkit/sessions"))
            .and(body_partial_json(json!({"workflow": {"id": "wf_1"}, "user": "user_abc"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"client_secret": "ek_1"})))
            .expect(1)
            .mount(&server)
            .await;

        let app = build_router(upstream_state(&server.uri()));
        let (status, headers, body) = send(
            app,
            post_json(
                "/chatkit/session",
                r#"{"workflowId":"wf_1","userId":"user_abc"}"#,
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"client_secret": "ek_1"}));
        assert_eq!(
            headers.get("access-control-allow-origin").unwrap(),
            "https://docs.example.com"
        );
    }

    #[tokio::test]
    async fn test_session_upstream_status_is_forwarded() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chatkit/sessions"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
            .mount(&server)
            .await;

        let app = build_router(upstream_state(&server.uri()));
        let (status, _, body) =
            send(app, post_json("/chatkit/session", r#"{"workflowId":"wf_1"}"#)).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({"error": "Failed to create ChatKit session"}));
    }

    #[tokio::test]
    async fn test_plain_chat_end_to_end() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/responses"))
            .and(body_partial_json(json!({"input": "What is the vacation policy?"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "resp_1",
                "output": [{
                    "type": "message",
                    "content": [{"type": "output_text", "text": "You get 20 days."}]
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let app = build_router(upstream_state(&server.uri()));
        let (status, _, body) = send(
            app,
            post_json("/chat", r#"{"message":"What is the vacation policy?"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"response": "You get 20 days.", "threadId": "resp_1"})
        );
    }

    #[tokio::test]
    async fn test_workflow_failures_degrade_to_plain_completion() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chatkit/workflows/wf_1/messages"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/responses"))
            .and(body_partial_json(json!({"workflow": {"id": "wf_1"}})))
            .respond_with(ResponseTemplate::new(400).set_body_string("unknown parameter"))
            .with_priority(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/responses"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"id": "resp_2", "output_text": "Fallback answer"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let app = build_router(upstream_state(&server.uri()));
        let (status, _, body) = send(
            app,
            post_json("/chat", r#"{"message":"hi","workflowId":"wf_1"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"response": "Fallback answer", "threadId": "resp_2"}));
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_bad_gateway() {
        let app = build_router(upstream_state("http://127.0.0.1:9/v1"));
        let (status, _, body) = send(app, post_json("/chat", r#"{"message":"hi"}"#)).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body, json!({"error": "Failed to get AI response"}));
    }

    #[tokio::test]
    async fn test_panic_becomes_500_with_cors_headers() {
        async fn boom() -> &'static str {
            panic!("boom")
        }

        let app = with_middleware(
            routes().route("/boom", get(boom)),
            unconfigured_state("*"),
        );
        let req = Request::builder().uri("/boom").body(Body::empty()).unwrap();
        let (status, headers, body) = send(app, req).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Internal server error"}));
        assert_eq!(headers.get("access-control-allow-origin").unwrap(), "*");
    }
}
