//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with every catalog route
//! - Wire up global layers (request ID, tracing, logging, body limit, timeout)
//! - Attach per-route middleware chains to write routes
//! - Bind server to listener and shut down gracefully

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::catalog::seed::demo_products;
use crate::catalog::ProductStore;
use crate::config::ServiceConfig;
use crate::http::handlers::*;
use crate::http::middleware::{
    envelope_layer_rejections, expose_matched_path, log_request, require_api_key,
    validate_new_product, validate_product_patch,
};
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};

/// Application state injected into handlers and middleware.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ProductStore>,
    pub config: Arc<ServiceConfig>,
}

/// HTTP server for the catalog.
pub struct HttpServer {
    router: Router,
    store: Arc<ProductStore>,
}

impl HttpServer {
    /// Create a server with a fresh store, seeded when the config asks for it.
    pub fn new(config: ServiceConfig) -> Self {
        let store = if config.catalog.seed_demo_data {
            ProductStore::with_products(demo_products())
        } else {
            ProductStore::new()
        };
        Self::with_store(config, Arc::new(store))
    }

    /// Create a server over an existing store.
    pub fn with_store(config: ServiceConfig, store: Arc<ProductStore>) -> Self {
        let config = Arc::new(config);
        let state = AppState {
            store: store.clone(),
            config: config.clone(),
        };

        let router = Self::build_router(&config, state);
        Self { router, store }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// `/search` and `/stats` are registered ahead of `/{id}` so they are
    /// never captured as identifiers.
    ///
    /// Outermost first: request id, trace, propagate id, logging, rejection
    /// envelope, body limit, timeout, router.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        let auth = middleware::from_fn_with_state(state.clone(), require_api_key);
        let validate_create = middleware::from_fn_with_state(state.clone(), validate_new_product);
        let validate_update = middleware::from_fn_with_state(state.clone(), validate_product_patch);

        Router::new()
            .route("/", get(welcome))
            .route("/api/products", get(list_products))
            .route(
                "/api/products",
                post(create_product)
                    .route_layer(validate_create)
                    .route_layer(auth.clone()),
            )
            .route("/api/products/search", get(search_products))
            .route("/api/products/stats", get(product_stats))
            .route("/api/products/{id}", get(get_product))
            .route(
                "/api/products/{id}",
                put(update_product)
                    .route_layer(validate_update)
                    .route_layer(auth.clone()),
            )
            .route("/api/products/{id}", delete(delete_product).route_layer(auth))
            .fallback(endpoint_not_found)
            .method_not_allowed_fallback(endpoint_not_found)
            .layer(middleware::from_fn(expose_matched_path))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(middleware::from_fn(envelope_layer_rejections))
            .layer(middleware::from_fn(log_request))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            products = self.store.len(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
