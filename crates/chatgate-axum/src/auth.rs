//! API-key authentication middleware.
//!
//! Gates `/v1/*` routes behind an `x-api-key` header when auth is enabled
//! in settings. The root and health endpoints stay open so load balancers
//! can probe without credentials.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::Request;
use axum::http::{HeaderValue, StatusCode, header};
use axum::middleware::Next;
use axum::response::Response;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Validate the `x-api-key` header against the configured key.
///
/// The expected key is captured once at router construction, so each
/// request does a direct string comparison without allocating.
pub async fn validate_api_key(
    expected: Arc<str>,
    req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let provided = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok());

    match provided {
        Some(key) if key == expected.as_ref() => Ok(next.run(req).await),
        _ => {
            tracing::warn!(
                path = %req.uri().path(),
                "unauthorized request - missing or invalid API key"
            );
            let mut res = Response::new(Body::from(
                serde_json::json!({
                    "error": "Invalid or missing API key",
                    "status": 401,
                })
                .to_string(),
            ));
            *res.status_mut() = StatusCode::UNAUTHORIZED;
            res.headers_mut().insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            );
            Ok(res)
        }
    }
}
