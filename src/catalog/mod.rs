//! Product catalog: the entity, its field rules, the store, and read-side queries.
//!
//! # Data Flow
//! ```text
//! write:  JSON payload → validation.rs → ProductDraft / ProductPatch → store.rs
//! read:   store.rs (locked snapshot) → query.rs (filter, page, search, stats)
//! ```

pub mod product;
pub mod query;
pub mod seed;
pub mod store;
pub mod validation;

pub use product::{Product, ProductDraft, ProductPatch};
pub use query::{CatalogStats, Page, ProductFilter};
pub use store::{ProductStore, StoreError};
pub use validation::ValidationError;
