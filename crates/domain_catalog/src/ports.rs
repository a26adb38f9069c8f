//! Catalog storage port
//!
//! Defined here so the API layer can be wired to either the PostgreSQL
//! adapter in `infra_db` or the in-memory adapter in `test_utils`.

use async_trait::async_trait;

use core_kernel::{Page, ProductId, StoreError};

use crate::product::Product;

/// Storage operations the catalog needs from its backend
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn insert(&self, product: &Product) -> Result<(), StoreError>;

    /// Full-record update; `NotFound` when the id does not exist
    async fn update(&self, product: &Product) -> Result<(), StoreError>;

    /// Deletes every listed id that exists; missing ids are ignored.
    /// Returns the number of records actually removed.
    async fn delete_many(&self, ids: &[ProductId]) -> Result<u64, StoreError>;

    /// Lists products ordered by name, optionally narrowed by a
    /// case-insensitive name substring, with the total matching count.
    async fn list(
        &self,
        search: Option<&str>,
        page: Page,
    ) -> Result<(Vec<Product>, u64), StoreError>;
}
