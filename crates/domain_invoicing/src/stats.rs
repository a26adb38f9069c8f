//! Sales aggregation
//!
//! Walks a set of invoices and rolls up quantity and revenue per product,
//! plus a grand total. The engine aggregates whatever set it is handed; the
//! report handler feeds it the full filtered set (an unpaginated run of the
//! same predicates the page listing used), so the statistics always describe
//! exactly what the caller is paging through.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::invoice::Invoice;

/// Rollup for one product name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductStat {
    pub name: String,
    pub quantity: i64,
    pub revenue: Decimal,
}

/// Aggregated view over a set of invoices
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesReport {
    /// Stats keyed by product display name. Two catalog entries sharing a
    /// name merge into one row - longstanding report behavior, kept
    /// deliberately (see DESIGN.md) rather than keying by product id.
    pub per_product: HashMap<String, ProductStat>,
    /// Sum of every line total; always equals the sum of `revenue` over
    /// `per_product`
    pub total_revenue: Decimal,
}

/// Accumulates per-product stats and the grand total over `invoices`
pub fn aggregate<'a, I>(invoices: I) -> SalesReport
where
    I: IntoIterator<Item = &'a Invoice>,
{
    let mut report = SalesReport::default();
    for invoice in invoices {
        for item in &invoice.items {
            let line_total = item.line_total();
            let stat = report
                .per_product
                .entry(item.name.clone())
                .or_insert_with(|| ProductStat {
                    name: item.name.clone(),
                    quantity: 0,
                    revenue: Decimal::ZERO,
                });
            stat.quantity += i64::from(item.quantity);
            stat.revenue += line_total;
            report.total_revenue += line_total;
        }
    }
    report
}
