//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, NewProduct, Product, ProductChanges, UpdateProduct};
use crate::repository::ProductRepository;

/// Validates input and delegates to a [`ProductRepository`].
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.list().await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i32) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input.validate()?;
        self.repository.create(NewProduct::try_from(input)?).await
    }

    /// Full update (PUT): every column is overwritten.
    #[instrument(skip(self, input))]
    pub async fn replace_product(&self, id: i32, input: CreateProduct) -> ProductResult<Product> {
        input.validate()?;
        self.repository
            .update(id, ProductChanges::try_from(input)?)
            .await
    }

    /// Partial update (PATCH): only the fields present in `input` change.
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: i32, input: UpdateProduct) -> ProductResult<Product> {
        input.validate()?;
        self.repository
            .update(id, ProductChanges::try_from(input)?)
            .await
    }

    /// Delete a product and return what was removed
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i32) -> ProductResult<Product> {
        self.repository.delete(id).await
    }
}
