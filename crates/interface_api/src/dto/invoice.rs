//! Invoice DTOs

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{InvoiceId, ProductId};
use domain_invoicing::{Invoice, LineItem, ProductStat};

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct LineItemRequest {
    pub product_id: ProductId,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(range(min = 1))]
    pub quantity: i32,
    pub price: Decimal,
}

impl From<LineItemRequest> for LineItem {
    fn from(req: LineItemRequest) -> Self {
        LineItem {
            product_id: req.product_id,
            name: req.name,
            quantity: req.quantity,
            unit_price: req.price,
        }
    }
}

/// Create body; `code` and `created_at` are server-assigned, any
/// caller-supplied values are not even deserialized
#[derive(Debug, Deserialize, Validate)]
pub struct CreateInvoiceRequest {
    #[validate(length(min = 1), nested)]
    pub items: Vec<LineItemRequest>,
    pub note: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateInvoiceRequest {
    pub id: InvoiceId,
    #[validate(length(min = 1), nested)]
    pub items: Vec<LineItemRequest>,
    pub note: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemResponse {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: i32,
    pub price: Decimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceResponse {
    pub id: InvoiceId,
    pub code: String,
    pub created_at: DateTime<Utc>,
    pub items: Vec<LineItemResponse>,
    pub note: Option<String>,
    pub total: Decimal,
}

impl From<Invoice> for InvoiceResponse {
    fn from(invoice: Invoice) -> Self {
        let total = invoice.total();
        Self {
            id: invoice.id,
            code: invoice.code,
            created_at: invoice.created_at,
            items: invoice
                .items
                .into_iter()
                .map(|item| LineItemResponse {
                    product_id: item.product_id,
                    name: item.name,
                    quantity: item.quantity,
                    price: item.unit_price,
                })
                .collect(),
            note: invoice.note,
            total,
        }
    }
}

/// Query for the filtered listing: `from`/`to` are `dd/mm/yyyy` and must be
/// supplied as a pair; `limit` 0 means everything
#[derive(Debug, Deserialize)]
pub struct FilterQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub code: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterInvoicesResponse {
    pub invoices: Vec<InvoiceResponse>,
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_amount: Decimal,
    pub product_stats: HashMap<String, ProductStat>,
}
