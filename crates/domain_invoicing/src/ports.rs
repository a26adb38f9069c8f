//! Invoicing storage ports
//!
//! The domain defines what it needs from storage; adapters provide it.
//! `infra_db` implements these against PostgreSQL, `test_utils` in memory.
//! Handlers and services hold `Arc<dyn ...>` so the wiring is an explicit
//! construction-time decision, never a global handle.

use async_trait::async_trait;

use core_kernel::{InvoiceId, Page, StoreError};

use crate::filter::InvoiceFilter;
use crate::invoice::{Invoice, LineItem};

/// Per-day monotonic sequence counter
#[async_trait]
pub trait SequenceStore: Send + Sync {
    /// Atomically bumps the counter for `day_key` and returns the new value.
    ///
    /// The first call for a day creates the row with value 1; creation and
    /// increment are one indivisible storage operation, never a check-then-
    /// create. Under N concurrent callers for the same key the returned
    /// values are exactly `{prev+1 .. prev+N}`: no repeats, no store-caused
    /// gaps. On failure the caller must not assume a value was consumed.
    async fn increment_and_get(&self, day_key: &str) -> Result<i64, StoreError>;
}

/// Durable invoice storage
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    async fn insert(&self, invoice: &Invoice) -> Result<(), StoreError>;

    async fn get(&self, id: InvoiceId) -> Result<Option<Invoice>, StoreError>;

    /// Replaces `items` and `note`, leaving `code` and `created_at`
    /// untouched; `NotFound` when the id does not exist
    async fn replace_contents(
        &self,
        id: InvoiceId,
        items: &[LineItem],
        note: Option<&str>,
    ) -> Result<(), StoreError>;

    /// Deletes every listed id that exists. Missing ids are ignored and the
    /// call still succeeds - deletion is idempotent. Returns the number of
    /// invoices actually removed.
    async fn delete_many(&self, ids: &[InvoiceId]) -> Result<u64, StoreError>;

    /// Runs the filter and returns one page plus the total matching count.
    ///
    /// Ordering is `created_at` descending with id descending as tie-break.
    /// `page.size == 0` returns the entire matching set; the total is the
    /// same number either way, independent of the window.
    async fn list(
        &self,
        filter: &InvoiceFilter,
        page: Page,
    ) -> Result<(Vec<Invoice>, u64), StoreError>;
}
