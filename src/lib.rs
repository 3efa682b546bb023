//! In-memory product catalog HTTP service.

pub mod catalog;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use catalog::{Product, ProductStore};
pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
