//! Invoice entity and line items

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{InvoiceId, ProductId};

use crate::error::InvoicingError;

/// One invoice line, snapshotting the catalog product at sale time
///
/// `name` and `unit_price` are copies, not references: later catalog edits
/// must never change what a historical invoice says was sold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
}

impl LineItem {
    pub fn new(
        product_id: ProductId,
        name: impl Into<String>,
        quantity: i32,
        unit_price: Decimal,
    ) -> Self {
        Self {
            product_id,
            name: name.into(),
            quantity,
            unit_price,
        }
    }

    /// `quantity x unit_price`, carried as Decimal so repeated accumulation
    /// cannot drift
    pub fn line_total(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_price
    }
}

/// A stored sales invoice
///
/// `code` and `created_at` are assigned by the server at creation and are
/// immutable afterwards; updates only replace `items` and `note`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,
    pub code: String,
    pub created_at: DateTime<Utc>,
    pub items: Vec<LineItem>,
    pub note: Option<String>,
}

impl Invoice {
    /// Assembles a validated invoice with a fresh time-ordered identifier
    pub fn create(
        code: String,
        created_at: DateTime<Utc>,
        items: Vec<LineItem>,
        note: Option<String>,
    ) -> Result<Self, InvoicingError> {
        validate_items(&items)?;
        Ok(Self {
            id: InvoiceId::new_v7(),
            code,
            created_at,
            items,
            note,
        })
    }

    /// Sum of all line totals
    pub fn total(&self) -> Decimal {
        self.items.iter().map(LineItem::line_total).sum()
    }
}

/// Checks the line-item invariants shared by create and update
pub fn validate_items(items: &[LineItem]) -> Result<(), InvoicingError> {
    if items.is_empty() {
        return Err(InvoicingError::NoItems);
    }
    for item in items {
        if item.name.trim().is_empty() {
            return Err(InvoicingError::EmptyItemName);
        }
        if item.quantity < 1 {
            return Err(InvoicingError::InvalidQuantity {
                name: item.name.clone(),
                quantity: item.quantity,
            });
        }
        if item.unit_price.is_sign_negative() {
            return Err(InvoicingError::NegativePrice {
                name: item.name.clone(),
                price: item.unit_price,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn item(name: &str, quantity: i32, price: Decimal) -> LineItem {
        LineItem::new(ProductId::new(), name, quantity, price)
    }

    #[test]
    fn test_line_total() {
        assert_eq!(item("Shirt", 2, dec!(150000)).line_total(), dec!(300000));
    }

    #[test]
    fn test_invoice_total_sums_lines() {
        let invoice = Invoice::create(
            "HD202506100001".to_string(),
            Utc::now(),
            vec![item("Shirt", 2, dec!(150000)), item("Jeans", 1, dec!(300000))],
            None,
        )
        .unwrap();
        assert_eq!(invoice.total(), dec!(600000));
    }

    #[test]
    fn test_empty_item_list_is_rejected() {
        assert!(matches!(
            Invoice::create("HD202506100001".to_string(), Utc::now(), vec![], None),
            Err(InvoicingError::NoItems)
        ));
    }

    #[test]
    fn test_zero_quantity_is_rejected() {
        let err = validate_items(&[item("Shirt", 0, dec!(1000))]).unwrap_err();
        assert!(matches!(err, InvoicingError::InvalidQuantity { .. }));
    }

    #[test]
    fn test_negative_price_is_rejected() {
        let err = validate_items(&[item("Shirt", 1, dec!(-1))]).unwrap_err();
        assert!(matches!(err, InvoicingError::NegativePrice { .. }));
    }

    #[test]
    fn test_blank_item_name_is_rejected() {
        let err = validate_items(&[item(" ", 1, dec!(1000))]).unwrap_err();
        assert!(matches!(err, InvoicingError::EmptyItemName));
    }
}
