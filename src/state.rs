// src/state.rs
use std::sync::Arc;

use sqlx::PgPool;

use crate::repository::{PgProductRepository, ProductRepository};
use crate::services::product::ProductService;

#[derive(Clone)]
pub struct AppState {
    pub products: ProductService,
}

impl AppState {
    pub fn new(db_pool: PgPool) -> Self {
        Self::with_repository(Arc::new(PgProductRepository::new(db_pool)))
    }

    pub fn with_repository(repo: Arc<dyn ProductRepository>) -> Self {
        Self {
            products: ProductService::new(repo),
        }
    }
}
