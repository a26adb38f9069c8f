//! Property tests for aggregation and pagination consistency

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;

use core_kernel::{InvoiceId, Page, ProductId};
use domain_invoicing::{aggregate, sort_newest_first, Invoice, LineItem};

const NAMES: [&str; 4] = ["Shirt", "Jeans", "Hat", "Belt"];

fn arb_item() -> impl Strategy<Value = LineItem> {
    (0usize..NAMES.len(), 1i32..10, 0i64..1_000_000).prop_map(|(name_idx, quantity, price)| {
        LineItem::new(
            ProductId::new(),
            NAMES[name_idx],
            quantity,
            Decimal::from(price),
        )
    })
}

fn arb_invoice() -> impl Strategy<Value = Invoice> {
    (prop::collection::vec(arb_item(), 1..5), 0i64..864_000).prop_map(|(items, offset_secs)| {
        Invoice {
            id: InvoiceId::new_v7(),
            code: "HD202506100001".to_string(),
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
                + chrono::Duration::seconds(offset_secs),
            items,
            note: None,
        }
    })
}

proptest! {
    /// The grand total always equals the sum of the per-product revenues.
    #[test]
    fn total_revenue_equals_sum_of_product_stats(
        invoices in prop::collection::vec(arb_invoice(), 0..40)
    ) {
        let report = aggregate(&invoices);
        let sum: Decimal = report.per_product.values().map(|s| s.revenue).sum();
        prop_assert_eq!(report.total_revenue, sum);
    }

    /// Summing page-by-page aggregates over any page size reproduces the
    /// unpaginated aggregate for the same (here: empty) predicate set.
    #[test]
    fn per_page_totals_sum_to_the_unpaginated_total(
        invoices in prop::collection::vec(arb_invoice(), 0..40),
        size in 1u32..9,
    ) {
        let mut invoices = invoices;
        sort_newest_first(&mut invoices);

        let full = aggregate(Page::all().slice(&invoices));

        let mut paged_total = Decimal::ZERO;
        let mut seen = 0usize;
        let mut number = 1u32;
        loop {
            let window = Page::new(number, size).slice(&invoices);
            if window.is_empty() {
                break;
            }
            paged_total += aggregate(window).total_revenue;
            seen += window.len();
            number += 1;
        }

        prop_assert_eq!(seen, invoices.len());
        prop_assert_eq!(paged_total, full.total_revenue);
    }

    /// Pagination windows partition the ordered set: no row is lost or
    /// duplicated across pages.
    #[test]
    fn pages_partition_the_ordered_set(
        invoices in prop::collection::vec(arb_invoice(), 0..40),
        size in 1u32..9,
    ) {
        let mut invoices = invoices;
        sort_newest_first(&mut invoices);

        let mut stitched = Vec::new();
        let mut number = 1u32;
        loop {
            let window = Page::new(number, size).slice(&invoices);
            if window.is_empty() {
                break;
            }
            stitched.extend(window.iter().map(|i| i.id));
            number += 1;
        }

        let expected: Vec<InvoiceId> = invoices.iter().map(|i| i.id).collect();
        prop_assert_eq!(stitched, expected);
    }
}
