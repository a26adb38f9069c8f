//! Invoicing domain errors

use rust_decimal::Decimal;
use thiserror::Error;

/// Validation errors for invoice input
///
/// These are raised before any storage access; a rejected request has no
/// side effects, in particular no consumed sequence number.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvoicingError {
    /// An invoice needs at least one line item
    #[error("Invoice must contain at least one line item")]
    NoItems,

    /// Line quantity below 1
    #[error("Invalid quantity {quantity} for item '{name}'")]
    InvalidQuantity { name: String, quantity: i32 },

    /// Negative unit price
    #[error("Negative unit price {price} for item '{name}'")]
    NegativePrice { name: String, price: Decimal },

    /// Line item with an empty product name
    #[error("Line item name must not be empty")]
    EmptyItemName,
}
