//! CORS middleware.
//!
//! Answers every `OPTIONS` request with 204 and attaches the same header
//! set to every other response, whatever its status.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use chatrelay_core::cors::{CorsHeaders, OriginPolicy};

pub async fn cors(
    State(policy): State<Arc<OriginPolicy>>,
    request: Request,
    next: Next,
) -> Response {
    let cors = match request.headers().get(header::ORIGIN) {
        None => policy.headers(None),
        Some(origin) => match origin.to_str() {
            Ok(origin) => policy.headers(Some(origin)),
            // Not representable as an origin string; never allowed.
            Err(_) => CorsHeaders {
                allow_origin: String::new(),
            },
        },
    };

    let mut response = if request.method() == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(request).await
    };

    apply_headers(&cors, response.headers_mut());
    response
}

fn apply_headers(cors: &CorsHeaders, headers: &mut HeaderMap) {
    for (name, value) in cors.pairs() {
        let value = HeaderValue::from_str(value).unwrap_or_else(|_| HeaderValue::from_static(""));
        headers.insert(HeaderName::from_static(name), value);
    }
}
