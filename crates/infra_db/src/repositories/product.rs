//! PostgreSQL-backed product catalog storage.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use core_kernel::{Page, ProductId, StoreError};
use domain_catalog::{Product, ProductStore};

use crate::error::store_err;

pub struct ProductRepository {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    price: Decimal,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: ProductId::from_uuid(row.id),
            name: row.name,
            price: row.price,
        }
    }
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductStore for ProductRepository {
    async fn insert(&self, product: &Product) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO products (id, name, price) VALUES ($1, $2, $3)")
            .bind(product.id.as_uuid())
            .bind(&product.name)
            .bind(product.price)
            .execute(&self.pool)
            .await
            .map_err(store_err)?;

        Ok(())
    }

    async fn update(&self, product: &Product) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE products SET name = $2, price = $3 WHERE id = $1")
            .bind(product.id.as_uuid())
            .bind(&product.name)
            .bind(product.price)
            .execute(&self.pool)
            .await
            .map_err(store_err)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(format!("product {}", product.id)));
        }

        Ok(())
    }

    async fn delete_many(&self, ids: &[ProductId]) -> Result<u64, StoreError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let raw: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();

        let result = sqlx::query("DELETE FROM products WHERE id = ANY($1)")
            .bind(&raw)
            .execute(&self.pool)
            .await
            .map_err(store_err)?;

        Ok(result.rows_affected())
    }

    async fn list(
        &self,
        search: Option<&str>,
        page: Page,
    ) -> Result<(Vec<Product>, u64), StoreError> {
        // Matched as a literal substring, so LIKE metacharacters are escaped
        let search = search.map(super::escape_like);

        let total: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM products WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%' ESCAPE '\')"#,
        )
        .bind(search.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(store_err)?;

        let limit: Option<i64> = if page.is_unbounded() {
            None
        } else {
            Some(page.size as i64)
        };

        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, price
            FROM products
            WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%' ESCAPE '\')
            ORDER BY name, id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(search)
        .bind(limit)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(store_err)?;

        Ok((rows.into_iter().map(Product::from).collect(), total as u64))
    }
}
