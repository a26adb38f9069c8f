//! Core Kernel - Foundational types and utilities for the storefront system
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Strongly-typed identifiers
//! - Store-timezone temporal handling (day keys, inclusive date windows)
//! - Pagination value objects
//! - Identity/role context consumed at operation boundaries
//! - Common error types shared by the storage ports

pub mod identifiers;
pub mod temporal;
pub mod paging;
pub mod identity;
pub mod error;

pub use identifiers::{InvoiceId, ProductId, UserId};
pub use temporal::{StoreTimezone, TemporalError, DATE_INPUT_FORMAT, DAY_KEY_FORMAT};
pub use paging::{Page, DEFAULT_PAGE_SIZE};
pub use identity::{Role, UserRecord, StoreSettings, UserStore, SettingsStore};
pub use error::{CoreError, StoreError};
