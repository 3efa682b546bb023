//! Route handlers. Failures are returned, never rendered here.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;

use crate::catalog::query::{self, coerce_positive, CatalogStats, Page, ProductFilter};
use crate::catalog::validation::validate_product;
use crate::catalog::{Product, ProductDraft, ProductPatch};
use crate::http::error::{ApiError, ApiResult};
use crate::http::server::AppState;

pub const WELCOME: &str = "Welcome to the Product Catalog API";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub category: Option<String>,
    pub in_stock: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

pub async fn welcome() -> &'static str {
    WELCOME
}

pub async fn list_products(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> ApiResult<Json<Page>> {
    let Query(params) = params?;
    let defaults = &state.config.catalog;

    let filter = ProductFilter::from_params(params.category.as_deref(), params.in_stock.as_deref());
    let page = coerce_positive(params.page.as_deref(), defaults.default_page);
    let limit = coerce_positive(params.limit.as_deref(), defaults.default_limit);

    let matches = state.store.read(|products| filter.apply(products));
    Ok(Json(query::paginate(matches, page, limit)))
}

pub async fn search_products(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> ApiResult<Json<Vec<Product>>> {
    let Query(params) = params?;
    let term = params
        .q
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ApiError::Validation("Search query 'q' is required".to_string()))?;

    Ok(Json(state.store.read(|products| query::search_by_name(products, &term))))
}

pub async fn product_stats(State(state): State<AppState>) -> Json<CatalogStats> {
    Json(state.store.read(query::stats))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Product>> {
    state
        .store
        .find_by_id(&id)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Product with id '{id}' not found")))
}

pub async fn create_product(
    State(state): State<AppState>,
    Extension(draft): Extension<ProductDraft>,
) -> (StatusCode, Json<Product>) {
    let product = state.store.create(draft);
    tracing::info!(id = %product.id, name = %product.name, "Product created");
    (StatusCode::CREATED, Json(product))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(patch): Extension<ProductPatch>,
) -> ApiResult<Json<Product>> {
    let updated = state.store.update(&id, |existing| -> ApiResult<Product> {
        let merged = existing.merged(&patch);
        validate_product(&merged)?;
        Ok(merged)
    })?;

    tracing::info!(id = %updated.id, "Product updated");
    Ok(Json(updated))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.store.remove(&id)?;
    tracing::info!(id = %id, "Product deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn endpoint_not_found() -> ApiError {
    ApiError::endpoint_not_found()
}
