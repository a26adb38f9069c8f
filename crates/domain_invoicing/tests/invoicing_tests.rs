//! Behavioral tests for invoice numbering and listing semantics

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal_macros::dec;

use core_kernel::{Page, ProductId, StoreError};
use domain_invoicing::{
    aggregate, parse_sequence, sort_newest_first, CodeGenerator, Invoice, InvoiceFilter, LineItem,
    SequenceStore,
};

/// Counter backed by a single mutex: the increment is indivisible, matching
/// the contract the production adapter provides with one SQL statement.
#[derive(Default)]
struct MemorySequences {
    counters: Mutex<HashMap<String, i64>>,
}

#[async_trait]
impl SequenceStore for MemorySequences {
    async fn increment_and_get(&self, day_key: &str) -> Result<i64, StoreError> {
        let mut counters = self.counters.lock().unwrap();
        let seq = counters.entry(day_key.to_string()).or_insert(0);
        *seq += 1;
        Ok(*seq)
    }
}

fn bangkok(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
    chrono_tz::Asia::Bangkok
        .with_ymd_and_hms(y, mo, d, h, mi, s)
        .unwrap()
        .with_timezone(&Utc)
}

mod code_generation {
    use super::*;

    #[tokio::test]
    async fn first_invoice_of_a_day_gets_sequence_one() {
        let generator = CodeGenerator::new(Arc::new(MemorySequences::default()));
        let code = generator
            .next_code(bangkok(2025, 6, 10, 9, 0, 0))
            .await
            .unwrap();
        assert_eq!(code, "HD202506100001");
    }

    #[tokio::test]
    async fn sequence_increments_within_a_day() {
        let generator = CodeGenerator::new(Arc::new(MemorySequences::default()));
        let now = bangkok(2025, 6, 10, 9, 0, 0);
        for expected in 1..=5 {
            let code = generator.next_code(now).await.unwrap();
            assert_eq!(parse_sequence(&code), Some(expected));
        }
    }

    #[tokio::test]
    async fn day_rollover_restarts_the_sequence() {
        let generator = CodeGenerator::new(Arc::new(MemorySequences::default()));

        let before_midnight = generator
            .next_code(bangkok(2025, 6, 10, 23, 59, 59))
            .await
            .unwrap();
        let after_midnight = generator
            .next_code(bangkok(2025, 6, 11, 0, 0, 1))
            .await
            .unwrap();

        assert_eq!(before_midnight, "HD202506100001");
        assert_eq!(after_midnight, "HD202506110001");
    }

    #[tokio::test]
    async fn day_key_follows_the_store_timezone_not_utc() {
        let generator = CodeGenerator::new(Arc::new(MemorySequences::default()));
        // 18:00 UTC on the 10th is already the 11th in UTC+7
        let utc_evening = Utc.with_ymd_and_hms(2025, 6, 10, 18, 0, 0).unwrap();
        let code = generator.next_code(utc_evening).await.unwrap();
        assert_eq!(code, "HD202506110001");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_draw_distinct_consecutive_sequences() {
        let sequences = Arc::new(MemorySequences::default());
        let generator = CodeGenerator::new(sequences.clone());
        let now = bangkok(2025, 6, 10, 12, 0, 0);

        // Seed some prior traffic so the property starts from prev_max > 0
        for _ in 0..3 {
            generator.next_code(now).await.unwrap();
        }

        let mut handles = Vec::new();
        for _ in 0..50 {
            let generator = generator.clone();
            handles.push(tokio::spawn(async move {
                generator.next_code(now).await.unwrap()
            }));
        }

        let mut seqs = Vec::new();
        for handle in handles {
            let code = handle.await.unwrap();
            assert!(code.starts_with("HD20250610"));
            seqs.push(parse_sequence(&code).unwrap());
        }

        seqs.sort_unstable();
        let expected: Vec<i64> = (4..=53).collect();
        assert_eq!(seqs, expected, "codes must be distinct and consecutive");
    }

    #[tokio::test]
    async fn failed_invoice_write_leaves_a_gap_not_a_duplicate() {
        let generator = CodeGenerator::new(Arc::new(MemorySequences::default()));
        let now = bangkok(2025, 6, 10, 9, 0, 0);

        let first = generator.next_code(now).await.unwrap();
        // A code is drawn but the invoice write fails downstream; nothing is
        // rolled back and the next writer simply draws the next value.
        let _abandoned = generator.next_code(now).await.unwrap();
        let third = generator.next_code(now).await.unwrap();

        assert_eq!(parse_sequence(&first), Some(1));
        assert_eq!(parse_sequence(&third), Some(3));
    }
}

mod listing {
    use super::*;

    fn invoice(code: &str, created_at: DateTime<Utc>, total: rust_decimal::Decimal) -> Invoice {
        Invoice::create(
            code.to_string(),
            created_at,
            vec![LineItem::new(ProductId::new(), "Shirt", 1, total)],
            None,
        )
        .unwrap()
    }

    #[test]
    fn filtered_aggregate_covers_the_whole_set_not_one_page() {
        let day = |d: u32, h: u32| bangkok(2025, 6, d, h, 0, 0);
        let mut invoices: Vec<Invoice> = (0..25)
            .map(|i| {
                invoice(
                    &format!("HD20250610{:04}", i + 1),
                    day(10, 1 + (i % 20)),
                    dec!(1000),
                )
            })
            .collect();
        sort_newest_first(&mut invoices);

        let filter = InvoiceFilter::all().with_code_substring("HD20250610");
        let matching: Vec<Invoice> = invoices
            .iter()
            .filter(|i| filter.matches(i))
            .cloned()
            .collect();

        let page = Page::new(2, 10);
        let page_rows = page.slice(&matching);
        assert_eq!(page_rows.len(), 10);

        // The report is computed over all 25 matches, not the 10 shown
        let report = aggregate(&matching);
        assert_eq!(report.total_revenue, dec!(25000));
    }

    #[test]
    fn total_is_independent_of_the_requested_window() {
        let mut invoices: Vec<Invoice> = (0..12)
            .map(|i| invoice("HD202506100001", bangkok(2025, 6, 10, 1 + i, 0, 0), dec!(5)))
            .collect();
        sort_newest_first(&mut invoices);

        let unbounded = Page::all().slice(&invoices).len();
        assert_eq!(unbounded, 12);
        // A bounded window sees fewer rows but the denominator stays 12
        assert_eq!(Page::new(1, 5).slice(&invoices).len(), 5);
        assert_eq!(Page::new(3, 5).slice(&invoices).len(), 2);
    }
}
