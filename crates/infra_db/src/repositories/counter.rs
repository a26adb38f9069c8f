//! PostgreSQL-backed daily sequence counters.

use async_trait::async_trait;
use core_kernel::StoreError;
use domain_invoicing::SequenceStore;
use sqlx::PgPool;

use crate::error::store_err;

/// Allocates strictly increasing per-day sequence numbers.
///
/// The increment happens in a single upsert statement so concurrent callers
/// can never observe the same value for one day key. Row-level locking on
/// the conflicting row serializes the updates inside PostgreSQL.
pub struct CounterRepository {
    pool: PgPool,
}

impl CounterRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SequenceStore for CounterRepository {
    async fn increment_and_get(&self, day_key: &str) -> Result<i64, StoreError> {
        let seq: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO daily_counters (day_key, seq)
            VALUES ($1, 1)
            ON CONFLICT (day_key)
            DO UPDATE SET seq = daily_counters.seq + 1
            RETURNING seq
            "#,
        )
        .bind(day_key)
        .fetch_one(&self.pool)
        .await
        .map_err(store_err)?;

        tracing::debug!(day_key, seq, "allocated invoice sequence");

        Ok(seq)
    }
}
