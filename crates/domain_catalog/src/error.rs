//! Catalog domain errors

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur in the catalog domain
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Product name is empty or whitespace
    #[error("Product name must not be empty")]
    EmptyName,

    /// Product price is negative
    #[error("Product price must not be negative: {0}")]
    NegativePrice(Decimal),
}
