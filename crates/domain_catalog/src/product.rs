//! Product entity

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::ProductId;

use crate::error::CatalogError;

/// A catalog product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Unit price in the store currency; no rounding is applied here
    pub price: Decimal,
}

impl Product {
    /// Creates a validated product with a fresh identifier
    pub fn new(name: impl Into<String>, price: Decimal) -> Result<Self, CatalogError> {
        let product = Self {
            id: ProductId::new(),
            name: name.into(),
            price,
        };
        product.validate()?;
        Ok(product)
    }

    /// Checks the catalog invariants: non-empty name, non-negative price
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::EmptyName);
        }
        if self.price.is_sign_negative() {
            return Err(CatalogError::NegativePrice(self.price));
        }
        Ok(())
    }
}
