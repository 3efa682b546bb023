//! Envelope for responses produced by tower-http layers.
//!
//! `TimeoutLayer` and `RequestBodyLimitLayer` answer on their own (an empty
//! `408`, a plain-text `413`) without reaching the router. This middleware
//! sits just outside them and rewrites those answers into `ApiError`s.

use axum::{
    extract::Request,
    http::{header::CONTENT_TYPE, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::http::error::ApiError;

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}

pub async fn envelope_layer_rejections(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    if is_json(&response) {
        return response;
    }

    match response.status() {
        StatusCode::PAYLOAD_TOO_LARGE => ApiError::payload_too_large().into_response(),
        StatusCode::REQUEST_TIMEOUT => ApiError::request_timeout().into_response(),
        _ => response,
    }
}
