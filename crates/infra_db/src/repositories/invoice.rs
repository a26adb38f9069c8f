//! PostgreSQL-backed invoice storage.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use core_kernel::{InvoiceId, Page, ProductId, StoreError};
use domain_invoicing::{Invoice, InvoiceFilter, InvoiceStore, LineItem};

use crate::error::store_err;

const FILTER_WHERE: &str = r#"
    ($1::timestamptz IS NULL OR created_at >= $1)
    AND ($2::timestamptz IS NULL OR created_at <= $2)
    AND ($3::text IS NULL OR code ILIKE '%' || $3 || '%' ESCAPE '\')
"#;

pub struct InvoiceRepository {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct InvoiceRow {
    id: Uuid,
    code: String,
    created_at: DateTime<Utc>,
    note: Option<String>,
}

#[derive(sqlx::FromRow)]
struct ItemRow {
    invoice_id: Uuid,
    product_id: Uuid,
    name: String,
    quantity: i32,
    unit_price: Decimal,
}

impl InvoiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Loads the line items for a batch of invoices, keyed by invoice id.
    async fn load_items(
        &self,
        invoice_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<LineItem>>, StoreError> {
        if invoice_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT invoice_id, product_id, name, quantity, unit_price
            FROM invoice_items
            WHERE invoice_id = ANY($1)
            ORDER BY invoice_id, position
            "#,
        )
        .bind(invoice_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(store_err)?;

        let mut grouped: HashMap<Uuid, Vec<LineItem>> = HashMap::new();
        for row in rows {
            grouped.entry(row.invoice_id).or_default().push(LineItem {
                product_id: ProductId::from_uuid(row.product_id),
                name: row.name,
                quantity: row.quantity,
                unit_price: row.unit_price,
            });
        }
        Ok(grouped)
    }

    fn assemble(rows: Vec<InvoiceRow>, mut items: HashMap<Uuid, Vec<LineItem>>) -> Vec<Invoice> {
        rows.into_iter()
            .map(|row| Invoice {
                id: InvoiceId::from_uuid(row.id),
                code: row.code,
                created_at: row.created_at,
                items: items.remove(&row.id).unwrap_or_default(),
                note: row.note,
            })
            .collect()
    }
}

async fn insert_items(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    invoice_id: Uuid,
    items: &[LineItem],
) -> Result<(), sqlx::Error> {
    for (position, item) in items.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO invoice_items (invoice_id, position, product_id, name, quantity, unit_price)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(invoice_id)
        .bind(position as i32)
        .bind(item.product_id.as_uuid())
        .bind(&item.name)
        .bind(item.quantity)
        .bind(item.unit_price)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

#[async_trait]
impl InvoiceStore for InvoiceRepository {
    async fn insert(&self, invoice: &Invoice) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await.map_err(store_err)?;

        sqlx::query(
            r#"
            INSERT INTO invoices (id, code, created_at, note)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(invoice.id.as_uuid())
        .bind(&invoice.code)
        .bind(invoice.created_at)
        .bind(invoice.note.as_deref())
        .execute(&mut *tx)
        .await
        .map_err(store_err)?;

        insert_items(&mut tx, *invoice.id.as_uuid(), &invoice.items)
            .await
            .map_err(store_err)?;

        tx.commit().await.map_err(store_err)?;

        tracing::debug!(invoice_id = %invoice.id, code = %invoice.code, "invoice stored");

        Ok(())
    }

    async fn get(&self, id: InvoiceId) -> Result<Option<Invoice>, StoreError> {
        let row = sqlx::query_as::<_, InvoiceRow>(
            "SELECT id, code, created_at, note FROM invoices WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(store_err)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let items = self.load_items(&[row.id]).await?;
        Ok(Self::assemble(vec![row], items).pop())
    }

    async fn replace_contents(
        &self,
        id: InvoiceId,
        items: &[LineItem],
        note: Option<&str>,
    ) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await.map_err(store_err)?;

        let updated = sqlx::query("UPDATE invoices SET note = $2 WHERE id = $1")
            .bind(id.as_uuid())
            .bind(note)
            .execute(&mut *tx)
            .await
            .map_err(store_err)?;

        if updated.rows_affected() == 0 {
            return Err(StoreError::not_found(format!("invoice {id}")));
        }

        sqlx::query("DELETE FROM invoice_items WHERE invoice_id = $1")
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(store_err)?;

        insert_items(&mut tx, *id.as_uuid(), items)
            .await
            .map_err(store_err)?;

        tx.commit().await.map_err(store_err)?;

        Ok(())
    }

    async fn delete_many(&self, ids: &[InvoiceId]) -> Result<u64, StoreError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let raw: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();

        // Items go with the header through ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM invoices WHERE id = ANY($1)")
            .bind(&raw)
            .execute(&self.pool)
            .await
            .map_err(store_err)?;

        Ok(result.rows_affected())
    }

    async fn list(
        &self,
        filter: &InvoiceFilter,
        page: Page,
    ) -> Result<(Vec<Invoice>, u64), StoreError> {
        let (from, to) = match filter.date_range {
            Some((from, to)) => (Some(from), Some(to)),
            None => (None, None),
        };
        // Matched as a literal substring, so LIKE metacharacters are escaped
        let code = filter.code_substring.as_deref().map(super::escape_like);

        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM invoices WHERE {FILTER_WHERE}"
        ))
        .bind(from)
        .bind(to)
        .bind(code.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(store_err)?;

        // A NULL limit means no limit in PostgreSQL, which carries the
        // size-zero "everything" page straight through.
        let limit: Option<i64> = if page.is_unbounded() {
            None
        } else {
            Some(page.size as i64)
        };

        let rows = sqlx::query_as::<_, InvoiceRow>(&format!(
            r#"
            SELECT id, code, created_at, note
            FROM invoices
            WHERE {FILTER_WHERE}
            ORDER BY created_at DESC, id DESC
            LIMIT $4 OFFSET $5
            "#
        ))
        .bind(from)
        .bind(to)
        .bind(code)
        .bind(limit)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(store_err)?;

        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let items = self.load_items(&ids).await?;

        Ok((Self::assemble(rows, items), total as u64))
    }
}
