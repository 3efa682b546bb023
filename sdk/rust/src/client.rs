use std::collections::BTreeMap;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

pub const DEFAULT_API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub in_stock: bool,
}

/// Body for `POST /api/products`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub in_stock: bool,
}

/// Body for `PUT /api/products/{id}`. Unset fields are left unchanged by the server.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub total_products: usize,
    pub in_stock: usize,
    pub out_of_stock: usize,
    pub categories: BTreeMap<String, usize>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDetail {
    name: String,
    message: String,
}

#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport or decoding failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with its error envelope.
    #[error("{name} ({status}): {message}")]
    Api {
        status: StatusCode,
        name: String,
        message: String,
    },

    /// A non-2xx answer that is not an error envelope.
    #[error("Unexpected response {status}: {body}")]
    Unexpected { status: StatusCode, body: String },

    #[error("Invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The base URL parsed but cannot take path segments (`mailto:`, `data:`).
    #[error("Base URL cannot carry a path: {0}")]
    NotABase(String),
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Http(e) => e.status(),
            ClientError::Api { status, .. } | ClientError::Unexpected { status, .. } => {
                Some(*status)
            }
            ClientError::InvalidUrl(_) | ClientError::NotABase(_) => None,
        }
    }
}

pub struct ProductClient {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
    api_key_header: String,
}

impl ProductClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::NotABase(base_url.into()));
        }

        Ok(Self {
            client: Client::new(),
            base_url,
            api_key: None,
            api_key_header: DEFAULT_API_KEY_HEADER.to_string(),
        })
    }

    /// Credential sent on create, update and delete.
    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(api_key.to_string());
        self
    }

    /// Override the credential header name (defaults to `x-api-key`).
    pub fn with_api_key_header(mut self, header: &str) -> Self {
        self.api_key_header = header.to_string();
        self
    }

    /// Append percent-encoded `segments` to the base URL's path.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // cannot fail: `new` rejects cannot-be-a-base URLs
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.header(self.api_key_header.as_str(), key),
            None => request,
        }
    }

    async fn check(resp: Response) -> Result<Response, ClientError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await?;
        match serde_json::from_str::<ErrorEnvelope>(&body) {
            Ok(envelope) => Err(ClientError::Api {
                status,
                name: envelope.error.name,
                message: envelope.error.message,
            }),
            Err(_) => Err(ClientError::Unexpected { status, body }),
        }
    }

    async fn decode<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ClientError> {
        let resp = Self::check(request.send().await?).await?;
        Ok(resp.json::<T>().await?)
    }

    /// Service welcome text.
    pub async fn welcome(&self) -> Result<String, ClientError> {
        let resp = Self::check(self.client.get(self.url(&[])).send().await?).await?;
        Ok(resp.text().await?)
    }

    pub async fn list_products(&self, query: &ListQuery) -> Result<ProductPage, ClientError> {
        Self::decode(self.client.get(self.url(&["api", "products"])).query(query)).await
    }

    pub async fn search_products(&self, q: &str) -> Result<Vec<Product>, ClientError> {
        Self::decode(
            self.client
                .get(self.url(&["api", "products", "search"]))
                .query(&[("q", q)]),
        )
        .await
    }

    pub async fn stats(&self) -> Result<CatalogStats, ClientError> {
        Self::decode(self.client.get(self.url(&["api", "products", "stats"]))).await
    }

    pub async fn get_product(&self, id: &str) -> Result<Product, ClientError> {
        Self::decode(self.client.get(self.url(&["api", "products", id]))).await
    }

    pub async fn create_product(&self, product: &NewProduct) -> Result<Product, ClientError> {
        let request = self.client.post(self.url(&["api", "products"])).json(product);
        Self::decode(self.authorized(request)).await
    }

    pub async fn update_product(
        &self,
        id: &str,
        update: &ProductUpdate,
    ) -> Result<Product, ClientError> {
        let request = self
            .client
            .put(self.url(&["api", "products", id]))
            .json(update);
        Self::decode(self.authorized(request)).await
    }

    pub async fn delete_product(&self, id: &str) -> Result<(), ClientError> {
        let request = self.client.delete(self.url(&["api", "products", id]));
        Self::check(self.authorized(request).send().await?).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_percent_encoded_as_one_segment() {
        let client = ProductClient::new("http://localhost:3000").unwrap();
        let url = client.url(&["api", "products", "a/b?c#d"]);

        assert_eq!(url.path(), "/api/products/a%2Fb%3Fc%23d");
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn test_base_path_is_kept() {
        let client = ProductClient::new("http://localhost:3000/catalog/").unwrap();
        assert_eq!(
            client.url(&["api", "products"]).as_str(),
            "http://localhost:3000/catalog/api/products"
        );
        assert_eq!(client.url(&[]).as_str(), "http://localhost:3000/catalog");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            ProductClient::new("not a url"),
            Err(ClientError::InvalidUrl(_))
        ));
        assert!(matches!(
            ProductClient::new("mailto:ops@example.com"),
            Err(ClientError::NotABase(_))
        ));
    }

    #[test]
    fn test_error_display() {
        let err = ClientError::Api {
            status: StatusCode::NOT_FOUND,
            name: "NotFoundError".into(),
            message: "Endpoint not found".into(),
        };
        assert_eq!(err.to_string(), "NotFoundError (404 Not Found): Endpoint not found");
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert!(std::error::Error::source(&err).is_none());
    }
}
