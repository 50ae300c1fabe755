use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductInput};

/// Repository trait for Product persistence
///
/// Ids are assigned by the implementation on `create` and never change afterwards.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Persist a new product and return it with its assigned id
    async fn create(&self, input: ProductInput) -> ProductResult<Product>;

    /// Get a product by ID
    async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>>;

    /// List all products in ascending id order
    async fn list(&self) -> ProductResult<Vec<Product>>;

    /// Save an already persisted product, failing with NotFound if its row is gone
    async fn update(&self, product: Product) -> ProductResult<Product>;

    /// Delete a product by ID, returning whether a row was removed
    async fn delete(&self, id: i64) -> ProductResult<bool>;

    /// Delete every product, returning the number of rows removed
    async fn delete_all(&self) -> ProductResult<u64>;
}

#[derive(Debug)]
struct Store {
    products: BTreeMap<i64, Product>,
    next_id: i64,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            products: BTreeMap::new(),
            next_id: 1,
        }
    }
}

/// In-memory implementation of ProductRepository (for development/testing)
///
/// Ids start at 1 and are never reused, matching a database sequence.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: ProductInput) -> ProductResult<Product> {
        let mut store = self.store.write().await;

        let id = store.next_id;
        store.next_id += 1;

        let product = Product::from_input(id, input);
        store.products.insert(id, product.clone());

        tracing::info!(product_id = id, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let store = self.store.read().await;
        Ok(store.products.get(&id).cloned())
    }

    async fn list(&self) -> ProductResult<Vec<Product>> {
        let store = self.store.read().await;
        Ok(store.products.values().cloned().collect())
    }

    async fn update(&self, product: Product) -> ProductResult<Product> {
        let mut store = self.store.write().await;

        let existing = store
            .products
            .get_mut(&product.id)
            .ok_or(ProductError::NotFound(product.id))?;
        *existing = product.clone();

        tracing::info!(product_id = product.id, "Updated product");
        Ok(product)
    }

    async fn delete(&self, id: i64) -> ProductResult<bool> {
        let mut store = self.store.write().await;

        if store.products.remove(&id).is_some() {
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn delete_all(&self) -> ProductResult<u64> {
        let mut store = self.store.write().await;

        let removed = store.products.len() as u64;
        store.products.clear();

        tracing::info!(removed, "Deleted all products");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = InMemoryProductRepository::new();

        let phone = repo.create(ProductInput::new("Phone", 500.0)).await.unwrap();
        let laptop = repo.create(ProductInput::new("Laptop", 1200.0)).await.unwrap();

        assert_eq!(phone.id, 1);
        assert_eq!(laptop.id, 2);
    }

    #[tokio::test]
    async fn test_get_by_id_returns_created_record() {
        let repo = InMemoryProductRepository::new();
        let created = repo.create(ProductInput::new("Phone", 500.0)).await.unwrap();

        let found = repo.get_by_id(created.id).await.unwrap();
        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn test_get_by_id_missing_is_none() {
        let repo = InMemoryProductRepository::new();
        assert_eq!(repo.get_by_id(404).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_in_insertion_order() {
        let repo = InMemoryProductRepository::new();
        repo.create(ProductInput::new("Phone", 500.0)).await.unwrap();
        repo.create(ProductInput::new("Laptop", 1200.0)).await.unwrap();

        let names: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Phone", "Laptop"]);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = InMemoryProductRepository::new();
        let ghost = Product::from_input(9, ProductInput::new("Ghost", 1.0));

        let result = repo.update(ghost).await;
        assert!(matches!(result, Err(ProductError::NotFound(9))));
    }

    #[tokio::test]
    async fn test_delete_reports_removal() {
        let repo = InMemoryProductRepository::new();
        let created = repo.create(ProductInput::new("Phone", 500.0)).await.unwrap();

        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
        assert_eq!(repo.get_by_id(created.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete_all() {
        let repo = InMemoryProductRepository::new();
        repo.create(ProductInput::new("Phone", 500.0)).await.unwrap();
        repo.create(ProductInput::new("Laptop", 1200.0)).await.unwrap();

        assert_eq!(repo.delete_all().await.unwrap(), 2);
        assert!(repo.list().await.unwrap().is_empty());

        let next = repo.create(ProductInput::new("Tablet", 300.0)).await.unwrap();
        assert_eq!(next.id, 3);
    }
}
