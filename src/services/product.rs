// src/services/product.rs
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::error::AppError;
use crate::models::product::{NewProduct, Product};
use crate::repository::ProductRepository;

/// Product use cases. Pass-through to the repository except for updates,
/// which only write when the id already exists.
#[derive(Clone)]
pub struct ProductService {
    repo: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self { repo }
    }

    pub async fn get_all_products(&self) -> Result<Vec<Product>, AppError> {
        self.repo.find_all().await
    }

    pub async fn get_product_by_id(&self, id: i64) -> Result<Option<Product>, AppError> {
        self.repo.find_by_id(id).await
    }

    pub async fn create_product(&self, product: NewProduct) -> Result<Product, AppError> {
        self.repo.insert(product).await
    }

    /// `None` when no product has this id; nothing is written in that case.
    #[instrument(skip(self, product))]
    pub async fn update_product(
        &self,
        id: i64,
        product: NewProduct,
    ) -> Result<Option<Product>, AppError> {
        if !self.repo.exists_by_id(id).await? {
            debug!("Product does not exist, skipping update");
            return Ok(None);
        }

        // The row can vanish between the check and the write; replace reports
        // that as None instead of recreating it.
        self.repo.replace(id, product).await
    }

    /// Succeeds whether or not the product existed.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i64) -> Result<(), AppError> {
        let removed = self.repo.delete_by_id(id).await?;
        debug!(removed, "Product delete processed");
        Ok(())
    }
}
