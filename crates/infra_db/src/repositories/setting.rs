//! PostgreSQL-backed store-settings singleton.

use async_trait::async_trait;
use sqlx::PgPool;

use core_kernel::{SettingsStore, StoreError, StoreSettings};

use crate::error::store_err;

pub struct SettingsRepository {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct SettingsRow {
    store_name: String,
    phone: String,
    logo_url: String,
}

impl SettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsStore for SettingsRepository {
    async fn get(&self) -> Result<Option<StoreSettings>, StoreError> {
        let row = sqlx::query_as::<_, SettingsRow>(
            "SELECT store_name, phone, logo_url FROM store_settings WHERE singleton",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(store_err)?;

        Ok(row.map(|row| StoreSettings {
            store_name: row.store_name,
            phone: row.phone,
            logo_url: row.logo_url,
        }))
    }

    async fn upsert(&self, settings: &StoreSettings) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO store_settings (singleton, store_name, phone, logo_url)
            VALUES (TRUE, $1, $2, $3)
            ON CONFLICT (singleton)
            DO UPDATE SET store_name = $1, phone = $2, logo_url = $3
            "#,
        )
        .bind(&settings.store_name)
        .bind(&settings.phone)
        .bind(&settings.logo_url)
        .execute(&self.pool)
        .await
        .map_err(store_err)?;

        Ok(())
    }
}
