//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, global layers)
//!     → request.rs (request ID)
//!     → middleware/logging.rs (every request)
//!     → route match, then route-specific middleware (auth, validation)
//!     → handlers.rs (store + query engine)
//!     → error.rs (any Err becomes the JSON error envelope)
//! ```

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod request;
pub mod server;

pub use error::{ApiError, ApiResult, ErrorEnvelope};
pub use request::{RequestIdExt, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
