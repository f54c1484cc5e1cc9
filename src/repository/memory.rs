//! Process-local product store used by tests and local experiments.
//!
//! Ids come from a counter that never rewinds; an explicit id passed to
//! `upsert` moves it forward. Prices follow the `NUMERIC(12, 2)` column: two
//! decimal places with ties rounded away from zero, and values of 10^10 or
//! more rejected. Listings are ordered by id.

use std::collections::BTreeMap;

use async_trait::async_trait;
use rust_decimal::{Decimal, RoundingStrategy};
use tokio::sync::RwLock;

use super::ProductRepository;
use crate::error::AppError;
use crate::models::product::{NewProduct, Product};

const PRICE_SCALE: u32 = 2;

#[derive(Default)]
struct Table {
    rows: BTreeMap<i64, Product>,
    last_id: i64,
}

impl Table {
    fn next_id(&mut self) -> Result<i64, AppError> {
        let id = self
            .last_id
            .checked_add(1)
            .ok_or_else(|| AppError::internal("product id space exhausted"))?;
        self.last_id = id;
        Ok(id)
    }
}

#[derive(Default)]
pub struct InMemoryProductRepository {
    table: RwLock<Table>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn to_row(id: i64, mut product: NewProduct) -> Result<Product, AppError> {
    product.price = product
        .price
        .round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero);
    // NUMERIC(12, 2) leaves ten digits before the point.
    if product.price.abs() >= Decimal::new(10_000_000_000, 0) {
        return Err(AppError::internal("numeric field overflow"));
    }
    Ok(product.with_id(id))
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_all(&self) -> Result<Vec<Product>, AppError> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, AppError> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn insert(&self, product: NewProduct) -> Result<Product, AppError> {
        let mut table = self.table.write().await;
        let row = to_row(0, product)?;
        let id = table.next_id()?;
        let row = Product { id, ..row };
        table.rows.insert(id, row.clone());
        Ok(row)
    }

    async fn replace(&self, id: i64, product: NewProduct) -> Result<Option<Product>, AppError> {
        let mut table = self.table.write().await;
        match table.rows.get_mut(&id) {
            Some(existing) => {
                *existing = to_row(id, product)?;
                Ok(Some(existing.clone()))
            }
            None => Ok(None),
        }
    }

    async fn upsert(&self, id: i64, product: NewProduct) -> Result<Product, AppError> {
        let mut table = self.table.write().await;
        let row = to_row(id, product)?;
        table.last_id = table.last_id.max(id);
        table.rows.insert(id, row.clone());
        Ok(row)
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, AppError> {
        let table = self.table.read().await;
        Ok(table.rows.contains_key(&id))
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError> {
        let mut table = self.table.write().await;
        Ok(table.rows.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, price: Decimal) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: format!("{name} description"),
            price,
        }
    }

    #[tokio::test]
    async fn ids_are_never_reused_after_delete() {
        let repo = InMemoryProductRepository::new();
        let first = repo.insert(product("a", Decimal::ONE)).await.unwrap();
        assert!(repo.delete_by_id(first.id).await.unwrap());

        let second = repo.insert(product("b", Decimal::ONE)).await.unwrap();
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn prices_are_stored_with_two_decimal_places() {
        let repo = InMemoryProductRepository::new();
        let stored = repo
            .insert(product("a", Decimal::new(19_996, 3)))
            .await
            .unwrap();
        assert_eq!(stored.price, Decimal::new(2000, 2));
    }

    #[tokio::test]
    async fn price_ties_round_away_from_zero() {
        let repo = InMemoryProductRepository::new();
        let up = repo
            .insert(product("a", Decimal::new(10_125, 3)))
            .await
            .unwrap();
        assert_eq!(up.price, Decimal::new(1013, 2));

        let down = repo
            .insert(product("b", Decimal::new(-2_345, 3)))
            .await
            .unwrap();
        assert_eq!(down.price, Decimal::new(-235, 2));
    }

    #[tokio::test]
    async fn prices_beyond_column_precision_are_rejected() {
        let repo = InMemoryProductRepository::new();
        let largest = Decimal::new(999_999_999_999, 2);
        assert_eq!(repo.insert(product("max", largest)).await.unwrap().price, largest);

        let too_large = Decimal::new(10_000_000_000, 0);
        assert!(repo.insert(product("big", too_large)).await.is_err());

        // Rounding can push a value over the limit.
        let rounds_over = Decimal::new(9_999_999_999_995, 3);
        assert!(repo.insert(product("edge", rounds_over)).await.is_err());

        assert!(repo.replace(1, product("big", -too_large)).await.is_err());
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn rejected_insert_does_not_consume_an_id() {
        let repo = InMemoryProductRepository::new();
        let too_large = Decimal::new(10_000_000_000, 0);
        assert!(repo.insert(product("big", too_large)).await.is_err());

        let created = repo.insert(product("a", Decimal::ONE)).await.unwrap();
        assert_eq!(created.id, 1);
    }

    #[tokio::test]
    async fn replace_of_missing_row_writes_nothing() {
        let repo = InMemoryProductRepository::new();
        assert_eq!(repo.replace(42, product("a", Decimal::ONE)).await.unwrap(), None);
        assert!(!repo.exists_by_id(42).await.unwrap());
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn save_inserts_without_id_and_overwrites_with_id() {
        let repo = InMemoryProductRepository::new();
        let created = repo.save(None, product("a", Decimal::ONE)).await.unwrap();

        let overwritten = repo
            .save(Some(created.id), product("b", Decimal::TWO))
            .await
            .unwrap();
        assert_eq!(overwritten.id, created.id);
        assert_eq!(overwritten.name, "b");

        let upserted = repo.save(Some(99), product("c", Decimal::TEN)).await.unwrap();
        assert_eq!(upserted.id, 99);
        assert_eq!(repo.find_all().await.unwrap().len(), 2);

        let next = repo.insert(product("d", Decimal::ONE)).await.unwrap();
        assert_eq!(next.id, 100);
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_was_removed() {
        let repo = InMemoryProductRepository::new();
        let created = repo.insert(product("a", Decimal::ONE)).await.unwrap();
        assert!(repo.delete_by_id(created.id).await.unwrap());
        assert!(!repo.delete_by_id(created.id).await.unwrap());
    }
}
