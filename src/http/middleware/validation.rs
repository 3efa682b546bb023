//! Payload validation for write routes.
//!
//! The body is read and checked here; the handler receives the typed result
//! through request extensions and never sees raw JSON.

use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http_body_util::LengthLimitError;
use serde_json::Value;

use crate::catalog::validation::{validate_draft, validate_patch};
use crate::http::error::ApiError;
use crate::http::server::AppState;

fn exceeded_limit(err: &axum::Error) -> bool {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(e) = source {
        if e.is::<LengthLimitError>() {
            return true;
        }
        source = e.source();
    }
    false
}

async fn read_json(body: Body, limit: usize) -> Result<Value, ApiError> {
    let bytes = axum::body::to_bytes(body, limit).await.map_err(|e| {
        if exceeded_limit(&e) {
            ApiError::payload_too_large()
        } else {
            ApiError::Validation(format!("Failed to read request body: {e}"))
        }
    })?;

    // An empty body is an empty object, so the first field rule reports it.
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Default::default()));
    }

    serde_json::from_slice(&bytes)
        .map_err(|e| ApiError::Validation(format!("Malformed JSON body: {e}")))
}

/// Create path: every field required.
pub async fn validate_new_product(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let (mut parts, body) = request.into_parts();
    let payload = read_json(body, state.config.security.max_body_size).await?;

    parts.extensions.insert(validate_draft(&payload)?);
    Ok(next.run(Request::from_parts(parts, Body::empty())).await)
}

/// Update path: present fields must be valid; the merged record is re-checked in the handler.
pub async fn validate_product_patch(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let (mut parts, body) = request.into_parts();
    let payload = read_json(body, state.config.security.max_body_size).await?;

    parts.extensions.insert(validate_patch(&payload)?);
    Ok(next.run(Request::from_parts(parts, Body::empty())).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_oversized_body_is_payload_too_large() {
        let body = Body::from(r#"{"name":"Laptop","description":"x"}"#);
        assert_eq!(read_json(body, 16).await, Err(ApiError::payload_too_large()));
    }

    #[tokio::test]
    async fn test_blank_body_reads_as_empty_object() {
        let value = read_json(Body::from("  \n"), 16).await.unwrap();
        assert_eq!(value, serde_json::json!({}));
    }
}
