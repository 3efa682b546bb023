//! In-memory product store.
//!
//! # Design Decisions
//! - One `Mutex` guards the whole collection; every read and write goes through it
//! - Insertion order is the only order; updates replace in place
//! - Nothing outside this module ever holds a reference into the collection

use std::sync::{Mutex, MutexGuard, PoisonError};

use thiserror::Error;

use crate::catalog::product::{Product, ProductDraft};
use crate::observability::metrics;

/// Errors raised by store mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Product with id '{0}' not found")]
    NotFound(String),
}

/// The authoritative product collection.
#[derive(Debug, Default)]
pub struct ProductStore {
    products: Mutex<Vec<Product>>,
}

impl ProductStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `products` in the given order.
    pub fn with_products(products: Vec<Product>) -> Self {
        metrics::record_catalog_size(products.len());
        Self {
            products: Mutex::new(products),
        }
    }

    // A panic mid-request cannot leave the Vec half-written, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, Vec<Product>> {
        self.products.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of every product in insertion order.
    pub fn list(&self) -> Vec<Product> {
        self.lock().clone()
    }

    /// Run a read-only computation against the current contents under the lock.
    pub fn read<R>(&self, f: impl FnOnce(&[Product]) -> R) -> R {
        f(&self.lock())
    }

    /// Look up a product by exact id.
    pub fn find_by_id(&self, id: &str) -> Option<Product> {
        self.lock().iter().find(|p| p.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a product. The caller guarantees its id is fresh.
    pub fn insert(&self, product: Product) {
        let mut products = self.lock();
        products.push(product);
        metrics::record_catalog_size(products.len());
    }

    /// Assign a fresh UUID to `draft` and append it.
    pub fn create(&self, draft: ProductDraft) -> Product {
        let product = draft.into_product(uuid::Uuid::new_v4().to_string());
        self.insert(product.clone());
        product
    }

    /// Overwrite the product with `id` in place. The stored id is kept.
    pub fn replace(&self, id: &str, product: Product) -> Result<Product, StoreError> {
        let mut products = self.lock();
        let slot = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        *slot = Product {
            id: slot.id.clone(),
            ..product
        };
        Ok(slot.clone())
    }

    /// Read-modify-write of one product under a single lock acquisition.
    ///
    /// `f` sees the current record and returns its replacement or an error;
    /// on error the store is left untouched.
    pub fn update<E>(
        &self,
        id: &str,
        f: impl FnOnce(&Product) -> Result<Product, E>,
    ) -> Result<Product, E>
    where
        E: From<StoreError>,
    {
        let mut products = self.lock();
        let slot = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let updated = Product {
            id: slot.id.clone(),
            ..f(&*slot)?
        };
        *slot = updated.clone();
        Ok(updated)
    }

    /// Remove the product with `id`, keeping the relative order of the rest.
    pub fn remove(&self, id: &str) -> Result<Product, StoreError> {
        let mut products = self.lock();
        let index = products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let removed = products.remove(index);
        metrics::record_catalog_size(products.len());
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::seed::demo_products;

    fn draft(name: &str) -> ProductDraft {
        ProductDraft {
            name: name.into(),
            description: "desc".into(),
            price: 1.0,
            category: "misc".into(),
            in_stock: true,
        }
    }

    fn ids(store: &ProductStore) -> Vec<String> {
        store.list().into_iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_create_appends_with_fresh_id() {
        let store = ProductStore::with_products(demo_products());
        let a = store.create(draft("a"));
        let b = store.create(draft("b"));

        assert_ne!(a.id, b.id);
        assert_eq!(store.len(), 5);
        assert_eq!(ids(&store)[3..], [a.id.clone(), b.id.clone()]);
        assert_eq!(store.find_by_id(&a.id), Some(a));
    }

    #[test]
    fn test_replace_preserves_position_and_id() {
        let store = ProductStore::with_products(demo_products());
        let mut replacement = store.find_by_id("3").unwrap();
        replacement.id = "something-else".into();
        replacement.name = "French Press".into();

        let stored = store.replace("2", replacement).unwrap();
        assert_eq!(stored.id, "2");
        assert_eq!(stored.name, "French Press");
        assert_eq!(ids(&store), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_replace_missing() {
        let store = ProductStore::new();
        let product = draft("a").into_product("x");
        assert_eq!(
            store.replace("x", product),
            Err(StoreError::NotFound("x".into()))
        );
    }

    #[test]
    fn test_update_error_leaves_store_untouched() {
        let store = ProductStore::with_products(demo_products());
        let before = store.list();

        let result: Result<Product, StoreError> =
            store.update("1", |_| Err(StoreError::NotFound("nope".into())));
        assert!(result.is_err());
        assert_eq!(store.list(), before);
    }

    #[test]
    fn test_update_forces_id() {
        let store = ProductStore::with_products(demo_products());
        let updated: Result<Product, StoreError> = store.update("1", |p| {
            Ok(Product {
                id: "42".into(),
                price: 10.0,
                ..p.clone()
            })
        });

        assert_eq!(updated.unwrap().id, "1");
        assert_eq!(store.find_by_id("1").unwrap().price, 10.0);
        assert!(store.find_by_id("42").is_none());
    }

    #[test]
    fn test_remove_keeps_order() {
        let store = ProductStore::with_products(demo_products());
        let removed = store.remove("2").unwrap();

        assert_eq!(removed.id, "2");
        assert_eq!(ids(&store), vec!["1", "3"]);
        assert_eq!(store.remove("2"), Err(StoreError::NotFound("2".into())));
    }
}
