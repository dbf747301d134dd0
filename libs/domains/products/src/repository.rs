use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{NewProduct, Product, ProductChanges};

/// Repository trait for Product persistence
///
/// Implementations categorize failures: a missing row on `update`/`delete`
/// is [`ProductError::NotFound`], constraint violations are
/// [`ProductError::Conflict`] and anything else from the store is
/// [`ProductError::Database`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products ordered by id
    async fn list(&self) -> ProductResult<Vec<Product>>;

    /// Get a product by ID
    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>>;

    /// Insert a product; the store assigns the id
    async fn create(&self, input: NewProduct) -> ProductResult<Product>;

    /// Apply `changes` to an existing product
    async fn update(&self, id: i32, changes: ProductChanges) -> ProductResult<Product>;

    /// Delete a product, returning the removed record
    async fn delete(&self, id: i32) -> ProductResult<Product>;
}

#[derive(Debug, Default)]
struct Store {
    products: BTreeMap<i32, Product>,
    last_id: i32,
}

/// In-memory implementation of ProductRepository (for development/testing)
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
    async fn list(&self) -> ProductResult<Vec<Product>> {
        let store = self.store.read().await;
        Ok(store.products.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let store = self.store.read().await;
        Ok(store.products.get(&id).cloned())
    }

    async fn create(&self, input: NewProduct) -> ProductResult<Product> {
        let mut store = self.store.write().await;

        let id = store
            .last_id
            .checked_add(1)
            .ok_or_else(|| ProductError::Database("product id sequence exhausted".to_string()))?;
        store.last_id = id;

        let product = Product {
            id,
            name: input.name,
            price: input.price,
            description: input.description,
            image: input.image,
        };
        store.products.insert(id, product.clone());

        tracing::info!(product_id = id, "Created product");
        Ok(product)
    }

    async fn update(&self, id: i32, changes: ProductChanges) -> ProductResult<Product> {
        let mut store = self.store.write().await;

        let product = store
            .products
            .get_mut(&id)
            .ok_or(ProductError::NotFound(id))?;
        changes.apply_to(product);

        tracing::info!(product_id = id, "Updated product");
        Ok(product.clone())
    }

    async fn delete(&self, id: i32) -> ProductResult<Product> {
        let mut store = self.store.write().await;

        let product = store
            .products
            .remove(&id)
            .ok_or(ProductError::NotFound(id))?;

        tracing::info!(product_id = id, "Deleted product");
        Ok(product)
    }
}
