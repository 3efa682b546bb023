//! Request pipeline middleware.
//!
//! # Ordering
//! ```text
//! every request:        logging → rejection envelope → body limit → timeout → router
//! POST /api/products:   logging → auth → validation (create) → handler
//! PUT  /api/products/x: logging → auth → validation (patch)  → handler
//! DELETE ...:           logging → auth → handler
//! ```
//!
//! Each step returns `Result<Response, ApiError>`; the first `Err` ends the
//! chain and is rendered by `ApiError::into_response`.

pub mod auth;
pub mod logging;
pub mod rejections;
pub mod validation;

pub use auth::require_api_key;
pub use logging::{expose_matched_path, log_request};
pub use rejections::envelope_layer_rejections;
pub use validation::{validate_new_product, validate_product_patch};
