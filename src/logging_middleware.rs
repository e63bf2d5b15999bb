// src/logging_middleware.rs
//! Request/response body logging at debug level

use axum::body::to_bytes;
use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use tracing::{debug, Level};

/// Paths whose bodies are never buffered or logged (signed payloads)
const UNLOGGED_PATHS: &[&str] = &["/api/payments/webhook"];

fn render_body(bytes: &Bytes) -> Option<String> {
    if bytes.is_empty() {
        return None;
    }
    let body_str = std::str::from_utf8(bytes).ok()?;

    match serde_json::from_str::<serde_json::Value>(body_str) {
        Ok(json) => {
            Some(serde_json::to_string_pretty(&json).unwrap_or_else(|_| body_str.to_string()))
        }
        Err(_) => Some(body_str.to_string()),
    }
}

/// Logs JSON bodies when `RUST_LOG` enables debug; otherwise passes through
pub async fn log_request_response(request: Request, next: Next) -> Result<Response, StatusCode> {
    if !tracing::enabled!(Level::DEBUG) || UNLOGGED_PATHS.contains(&request.uri().path()) {
        return Ok(next.run(request).await);
    }

    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, usize::MAX)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    if let Some(request_body) = render_body(&bytes) {
        debug!(
            method = %parts.method,
            uri = %parts.uri,
            request_body = %request_body,
            "📥 Request"
        );
    }

    let response = next.run(Request::from_parts(parts, Body::from(bytes))).await;

    let (parts, body) = response.into_parts();
    let bytes = to_bytes(body, usize::MAX)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    if let Some(response_body) = render_body(&bytes) {
        debug!(status = %parts.status, response_body = %response_body, "📤 Response");
    }

    Ok(Response::from_parts(parts, Body::from(bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_body() {
        assert_eq!(render_body(&Bytes::new()), None);
        assert_eq!(
            render_body(&Bytes::from_static(b"plain")),
            Some("plain".to_string())
        );
        let pretty = render_body(&Bytes::from_static(br#"{"ok":true}"#)).unwrap();
        assert!(pretty.contains("\"ok\": true"));
        assert_eq!(render_body(&Bytes::from_static(&[0xff, 0xfe])), None);
    }
}
