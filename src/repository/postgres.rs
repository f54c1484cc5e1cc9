use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use super::ProductRepository;
use crate::error::AppError;
use crate::models::product::{NewProduct, Product};

pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    #[instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT id, name, description, price FROM products ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, description, price FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    #[instrument(skip(self, product))]
    async fn insert(&self, product: NewProduct) -> Result<Product, AppError> {
        let product = sqlx::query_as::<_, Product>(
            "INSERT INTO products (name, description, price)
             VALUES ($1, $2, $3)
             RETURNING id, name, description, price",
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .fetch_one(&self.pool)
        .await?;

        Ok(product)
    }

    #[instrument(skip(self, product))]
    async fn replace(&self, id: i64, product: NewProduct) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(
            "UPDATE products SET
                name = $1,
                description = $2,
                price = $3
             WHERE id = $4
             RETURNING id, name, description, price",
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    #[instrument(skip(self, product))]
    async fn upsert(&self, id: i64, product: NewProduct) -> Result<Product, AppError> {
        // An explicit id does not advance the BIGSERIAL sequence, so later
        // inserts may collide with it until the sequence passes this value.
        let product = sqlx::query_as::<_, Product>(
            "INSERT INTO products (id, name, description, price)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                description = EXCLUDED.description,
                price = EXCLUDED.price
             RETURNING id, name, description, price",
        )
        .bind(id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .fetch_one(&self.pool)
        .await?;

        Ok(product)
    }

    #[instrument(skip(self))]
    async fn exists_by_id(&self, id: i64) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
