use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductInput};
use crate::repository::ProductRepository;

/// Service layer for Product business logic
#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Validate and persist a new product; the store assigns its id
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: ProductInput) -> ProductResult<Product> {
        input.validate()?;
        self.repository.create(input).await
    }

    /// All products in store order
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.list().await
    }

    /// Look up a product; absence is reported as `None`, not as an error
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i64) -> ProductResult<Option<Product>> {
        self.repository.get_by_id(id).await
    }

    /// Replace name and price of an existing product
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: i64, input: ProductInput) -> ProductResult<Product> {
        input.validate()?;

        let mut product = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        product.apply_update(input);
        self.repository.update(product).await
    }

    /// Delete a product; deleting a missing id is a no-op
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i64) -> ProductResult<()> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            tracing::debug!(product_id = id, "Delete requested for missing product");
        }

        Ok(())
    }
}
