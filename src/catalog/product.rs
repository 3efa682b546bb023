//! Product entity and its write-side payloads.

use serde::{Deserialize, Serialize};

/// A product record as stored and served.
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

/// A fully validated create payload. Carries no id; the store assigns one.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub in_stock: bool,
}

impl ProductDraft {
    /// Attach an identifier, producing a storable record.
    pub fn into_product(self, id: impl Into<String>) -> Product {
        Product {
            id: id.into(),
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            in_stock: self.in_stock,
        }
    }
}

/// Partial update payload. `id` is not a member: it can never be merged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub in_stock: Option<bool>,
}

impl Product {
    /// Field-by-field merge. Present patch fields win; `id` is kept.
    pub fn merged(&self, patch: &ProductPatch) -> Product {
        Product {
            id: self.id.clone(),
            name: patch.name.clone().unwrap_or_else(|| self.name.clone()),
            description: patch
                .description
                .clone()
                .unwrap_or_else(|| self.description.clone()),
            price: patch.price.unwrap_or(self.price),
            category: patch.category.clone().unwrap_or_else(|| self.category.clone()),
            in_stock: patch.in_stock.unwrap_or(self.in_stock),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn laptop() -> Product {
        Product {
            id: "1".into(),
            name: "Laptop".into(),
            description: "High-performance laptop".into(),
            price: 999.99,
            category: "electronics".into(),
            in_stock: true,
        }
    }

    #[test]
    fn test_merge_keeps_unpatched_fields() {
        let patch = ProductPatch {
            price: Some(899.0),
            in_stock: Some(false),
            ..Default::default()
        };

        let merged = laptop().merged(&patch);
        assert_eq!(merged.id, "1");
        assert_eq!(merged.name, "Laptop");
        assert_eq!(merged.price, 899.0);
        assert!(!merged.in_stock);
    }

    #[test]
    fn test_empty_patch_is_identity() {
        assert_eq!(laptop().merged(&ProductPatch::default()), laptop());
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let json = serde_json::to_value(laptop()).unwrap();
        assert_eq!(json["inStock"], serde_json::json!(true));
        assert!(json.get("in_stock").is_none());
    }
}
