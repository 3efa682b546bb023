//! Typed client for the product catalog HTTP API.

pub mod client;

pub use client::{
    CatalogStats, ClientError, ListQuery, NewProduct, Product, ProductClient, ProductPage,
    ProductUpdate, DEFAULT_API_KEY_HEADER,
};
