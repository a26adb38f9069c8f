//! Test data builders
//!
//! Builder patterns for constructing test data with sensible defaults, so
//! tests only spell out the fields they actually care about.

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{InvoiceId, ProductId};
use domain_catalog::Product;
use domain_invoicing::{Invoice, LineItem};

/// Builder for catalog products
pub struct ProductBuilder {
    id: ProductId,
    name: String,
    price: Decimal,
}

impl Default for ProductBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductBuilder {
    pub fn new() -> Self {
        Self {
            id: ProductId::new(),
            name: "Shirt".to_string(),
            price: dec!(150000),
        }
    }

    pub fn with_id(mut self, id: ProductId) -> Self {
        self.id = id;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = price;
        self
    }

    pub fn build(self) -> Product {
        Product {
            id: self.id,
            name: self.name,
            price: self.price,
        }
    }
}

/// Builder for invoice line items
pub struct LineItemBuilder {
    product_id: ProductId,
    name: String,
    quantity: i32,
    unit_price: Decimal,
}

impl Default for LineItemBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LineItemBuilder {
    pub fn new() -> Self {
        Self {
            product_id: ProductId::new(),
            name: "Shirt".to_string(),
            quantity: 1,
            unit_price: dec!(150000),
        }
    }

    pub fn with_product_id(mut self, id: ProductId) -> Self {
        self.product_id = id;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_quantity(mut self, quantity: i32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_unit_price(mut self, unit_price: Decimal) -> Self {
        self.unit_price = unit_price;
        self
    }

    pub fn build(self) -> LineItem {
        LineItem {
            product_id: self.product_id,
            name: self.name,
            quantity: self.quantity,
            unit_price: self.unit_price,
        }
    }
}

/// Builder for stored invoices
///
/// The id is a fresh v7 UUID and the code defaults to a well-formed value
/// for the default `created_at`; tests asserting on code generation should
/// go through `CodeGenerator` instead.
pub struct InvoiceBuilder {
    id: InvoiceId,
    code: String,
    created_at: DateTime<Utc>,
    items: Vec<LineItem>,
    note: Option<String>,
}

impl Default for InvoiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceBuilder {
    pub fn new() -> Self {
        Self {
            id: InvoiceId::new_v7(),
            code: "HD202506100001".to_string(),
            created_at: Utc.with_ymd_and_hms(2025, 6, 10, 9, 0, 0).unwrap(),
            items: vec![LineItemBuilder::new().build()],
            note: None,
        }
    }

    pub fn with_id(mut self, id: InvoiceId) -> Self {
        self.id = id;
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn with_items(mut self, items: Vec<LineItem>) -> Self {
        self.items = items;
        self
    }

    pub fn with_item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn build(self) -> Invoice {
        Invoice {
            id: self.id,
            code: self.code,
            created_at: self.created_at,
            items: self.items,
            note: self.note,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoice_builder_defaults_are_valid() {
        let invoice = InvoiceBuilder::new().build();
        assert!(!invoice.items.is_empty());
        assert!(invoice.code.starts_with("HD"));
        assert_eq!(invoice.total(), dec!(150000));
    }

    #[test]
    fn test_invoice_builder_accumulates_items() {
        let invoice = InvoiceBuilder::new()
            .with_item(
                LineItemBuilder::new()
                    .with_name("Jeans")
                    .with_quantity(2)
                    .with_unit_price(dec!(300000))
                    .build(),
            )
            .build();
        assert_eq!(invoice.items.len(), 2);
        assert_eq!(invoice.total(), dec!(750000));
    }
}
