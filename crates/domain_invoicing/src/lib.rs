//! Invoicing Domain - Numbered sales records and reporting
//!
//! This crate holds the hard core of the system:
//!
//! - **Invoice codes**: human-readable `HD<YYYYMMDD><seq>` identifiers whose
//!   per-day sequence comes from an atomic storage counter, so concurrent
//!   writers can never collide.
//! - **Filter predicates**: inclusive date windows and case-insensitive code
//!   substring matching, composed conjunctively, with deterministic
//!   newest-first ordering for pagination.
//! - **Aggregation**: per-product quantity/revenue rollups computed over the
//!   same filtered set a report paginates, never over the raw table.
//!
//! All logic here is pure; storage goes through the ports in [`ports`].

pub mod invoice;
pub mod code;
pub mod filter;
pub mod stats;
pub mod ports;
pub mod error;

pub use invoice::{validate_items, Invoice, LineItem};
pub use code::{CodeGenerator, format_code, parse_sequence, CODE_PREFIX, SEQ_WIDTH};
pub use filter::{InvoiceFilter, sort_newest_first};
pub use stats::{ProductStat, SalesReport, aggregate};
pub use ports::{InvoiceStore, SequenceStore};
pub use error::InvoicingError;
