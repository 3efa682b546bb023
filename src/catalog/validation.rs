//! Field rules for product payloads.
//!
//! Rules run in a fixed order (name, description, price, category, inStock)
//! and stop at the first failure, so a request reports exactly one problem.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::catalog::product::{Product, ProductDraft, ProductPatch};

/// A payload failed a field rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

const NAME_RULE: &str = "Name is required and must be a non-empty string";
const DESCRIPTION_RULE: &str = "Description is required and must be a non-empty string";
const PRICE_RULE: &str = "Price is required and must be a positive number";
const CATEGORY_RULE: &str = "Category is required and must be a non-empty string";
const IN_STOCK_RULE: &str = "inStock is required and must be a boolean";

fn as_object(payload: &Value) -> Result<&Map<String, Value>, ValidationError> {
    payload
        .as_object()
        .ok_or_else(|| ValidationError::new("Request body must be a JSON object"))
}

fn text(value: &Value) -> Option<String> {
    value.as_str().filter(|s| !s.is_empty()).map(str::to_owned)
}

fn positive(value: &Value) -> Option<f64> {
    value.as_f64().filter(|p| *p > 0.0)
}

/// Apply `check` to an optional member. `Ok(None)` means absent.
fn optional<T>(
    fields: &Map<String, Value>,
    key: &str,
    check: impl Fn(&Value) -> Option<T>,
    rule: &str,
) -> Result<Option<T>, ValidationError> {
    match fields.get(key) {
        None => Ok(None),
        Some(value) => check(value).map(Some).ok_or_else(|| ValidationError::new(rule)),
    }
}

fn required<T>(
    fields: &Map<String, Value>,
    key: &str,
    check: impl Fn(&Value) -> Option<T>,
    rule: &str,
) -> Result<T, ValidationError> {
    optional(fields, key, check, rule)?.ok_or_else(|| ValidationError::new(rule))
}

/// Validate a create payload. Every field is required; any `id` is ignored.
pub fn validate_draft(payload: &Value) -> Result<ProductDraft, ValidationError> {
    let fields = as_object(payload)?;

    Ok(ProductDraft {
        name: required(fields, "name", text, NAME_RULE)?,
        description: required(fields, "description", text, DESCRIPTION_RULE)?,
        price: required(fields, "price", positive, PRICE_RULE)?,
        category: required(fields, "category", text, CATEGORY_RULE)?,
        in_stock: required(fields, "inStock", Value::as_bool, IN_STOCK_RULE)?,
    })
}

/// Validate an update payload. Absent fields are fine; present ones obey the same rules.
pub fn validate_patch(payload: &Value) -> Result<ProductPatch, ValidationError> {
    let fields = as_object(payload)?;

    Ok(ProductPatch {
        name: optional(fields, "name", text, NAME_RULE)?,
        description: optional(fields, "description", text, DESCRIPTION_RULE)?,
        price: optional(fields, "price", positive, PRICE_RULE)?,
        category: optional(fields, "category", text, CATEGORY_RULE)?,
        in_stock: optional(fields, "inStock", Value::as_bool, IN_STOCK_RULE)?,
    })
}

/// Re-check a typed record, used on the result of a merge before it is stored.
pub fn validate_product(product: &Product) -> Result<(), ValidationError> {
    if product.name.is_empty() {
        return Err(ValidationError::new(NAME_RULE));
    }
    if product.description.is_empty() {
        return Err(ValidationError::new(DESCRIPTION_RULE));
    }
    if !(product.price > 0.0) {
        return Err(ValidationError::new(PRICE_RULE));
    }
    if product.category.is_empty() {
        return Err(ValidationError::new(CATEGORY_RULE));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid() -> Value {
        json!({
            "name": "Desk Lamp",
            "description": "LED lamp",
            "price": 29.5,
            "category": "home",
            "inStock": true
        })
    }

    #[test]
    fn test_valid_draft() {
        let draft = validate_draft(&valid()).unwrap();
        assert_eq!(draft.name, "Desk Lamp");
        assert_eq!(draft.price, 29.5);
        assert!(draft.in_stock);
    }

    #[test]
    fn test_integer_price_accepted() {
        let mut payload = valid();
        payload["price"] = json!(50);
        assert_eq!(validate_draft(&payload).unwrap().price, 50.0);
    }

    #[test]
    fn test_non_positive_price_rejected() {
        for price in [json!(-5), json!(0), json!("10"), json!(null)] {
            let mut payload = valid();
            payload["price"] = price;
            assert_eq!(
                validate_draft(&payload).unwrap_err(),
                ValidationError::new(PRICE_RULE)
            );
        }
    }

    #[test]
    fn test_first_failure_wins() {
        let payload = json!({ "price": -1, "inStock": "yes" });
        assert_eq!(
            validate_draft(&payload).unwrap_err(),
            ValidationError::new(NAME_RULE)
        );

        let payload = json!({ "name": "x", "description": "y", "price": -1, "inStock": "yes" });
        assert_eq!(
            validate_draft(&payload).unwrap_err(),
            ValidationError::new(PRICE_RULE)
        );
    }

    #[test]
    fn test_type_checks() {
        let mut payload = valid();
        payload["name"] = json!(42);
        assert_eq!(validate_draft(&payload).unwrap_err().0, NAME_RULE);

        let mut payload = valid();
        payload["category"] = json!("");
        assert_eq!(validate_draft(&payload).unwrap_err().0, CATEGORY_RULE);

        let mut payload = valid();
        payload["inStock"] = json!("true");
        assert_eq!(validate_draft(&payload).unwrap_err().0, IN_STOCK_RULE);
    }

    #[test]
    fn test_non_object_rejected() {
        assert!(validate_draft(&json!([1, 2])).is_err());
        assert!(validate_patch(&json!("name")).is_err());
    }

    #[test]
    fn test_patch_allows_absent_fields() {
        let patch = validate_patch(&json!({ "price": 10, "id": "999" })).unwrap();
        assert_eq!(patch.price, Some(10.0));
        assert_eq!(patch.name, None);
    }

    #[test]
    fn test_patch_rejects_bad_present_field() {
        let err = validate_patch(&json!({ "inStock": 1 })).unwrap_err();
        assert_eq!(err.0, IN_STOCK_RULE);
    }

    #[test]
    fn test_validate_product() {
        let mut product = validate_draft(&valid()).unwrap().into_product("p");
        assert!(validate_product(&product).is_ok());
        product.price = 0.0;
        assert!(validate_product(&product).is_err());
    }
}
