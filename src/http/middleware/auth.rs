use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::http::error::ApiError;
use crate::http::server::AppState;

/// Gate a write route on the configured shared secret.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth = &state.config.auth;

    // Compared as raw bytes: a value that is not visible ASCII is present but wrong.
    match request.headers().get(auth.header.as_str()) {
        Some(key) if key.as_bytes() == auth.api_key.as_bytes() => Ok(next.run(request).await),
        Some(_) => Err(ApiError::Auth("Invalid API key".to_string())),
        None => Err(ApiError::Auth("API key is required".to_string())),
    }
}
