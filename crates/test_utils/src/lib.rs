//! Shared test utilities
//!
//! In-memory implementations of every storage port, plus builders for
//! constructing test data with sensible defaults. The memory adapters honor
//! the same contracts as the PostgreSQL repositories so handler and wire
//! tests can run without a database.

pub mod builders;
pub mod memory;

pub use builders::{InvoiceBuilder, LineItemBuilder, ProductBuilder};
pub use memory::{
    InMemoryInvoiceStore, InMemoryProductStore, InMemorySequenceStore, InMemorySettingsStore,
    InMemoryUserStore,
};
