//! Data access for products.
//!
//! `ProductRepository` is the only seam between the service and the store.
//! Implementations hold no business logic: absence is reported as `None` or
//! `false`, never as an error.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::product::{NewProduct, Product};

pub use memory::InMemoryProductRepository;
pub use postgres::PgProductRepository;

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Every stored product, possibly none.
    async fn find_all(&self) -> Result<Vec<Product>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, AppError>;

    /// Creates a row; the store assigns a fresh id.
    async fn insert(&self, product: NewProduct) -> Result<Product, AppError>;

    /// Overwrites the mutable fields of an existing row. Returns `None` and
    /// writes nothing when no row has this id.
    async fn replace(&self, id: i64, product: NewProduct) -> Result<Option<Product>, AppError>;

    /// Writes the row with this id, inserting it if it does not exist.
    async fn upsert(&self, id: i64, product: NewProduct) -> Result<Product, AppError>;

    async fn exists_by_id(&self, id: i64) -> Result<bool, AppError>;

    /// Removes the row if present. Returns whether a row was removed.
    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError>;

    /// Create-or-overwrite by id presence: no id inserts, an id upserts.
    async fn save(&self, id: Option<i64>, product: NewProduct) -> Result<Product, AppError> {
        match id {
            Some(id) => self.upsert(id, product).await,
            None => self.insert(product).await,
        }
    }
}
