//! Filter predicates and listing order
//!
//! A filter composes an inclusive UTC date window and a case-insensitive
//! code substring, conjunctively; an empty filter matches everything. The
//! same semantics exist in two renditions that must agree: `matches` here
//! for in-memory stores, and the SQL translation in `infra_db`.
//!
//! Listing order is always newest-first by `created_at`, with the invoice id
//! (time-ordered UUID) breaking ties so repeated paginated calls see a
//! stable order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::invoice::Invoice;

/// Conjunctive invoice query predicates
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceFilter {
    /// Inclusive `[from, to]` window over `created_at`; the caller is
    /// responsible for having extended `to` to the end of its calendar day
    pub date_range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    /// Case-insensitive substring matched anywhere in the code
    pub code_substring: Option<String>,
}

impl InvoiceFilter {
    /// The empty filter: matches every invoice
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_date_range(mut self, from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        self.date_range = Some((from, to));
        self
    }

    pub fn with_code_substring(mut self, needle: impl Into<String>) -> Self {
        self.code_substring = Some(needle.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.date_range.is_none() && self.code_substring.is_none()
    }

    /// Applies the predicates to one invoice
    pub fn matches(&self, invoice: &Invoice) -> bool {
        if let Some((from, to)) = self.date_range {
            if invoice.created_at < from || invoice.created_at > to {
                return false;
            }
        }
        if let Some(needle) = &self.code_substring {
            if !invoice
                .code
                .to_lowercase()
                .contains(&needle.to_lowercase())
            {
                return false;
            }
        }
        true
    }
}

/// Sorts invoices into the canonical listing order
///
/// `created_at` descending, then id descending. Both keys together are
/// unique, so pagination windows are deterministic across repeated calls.
pub fn sort_newest_first(invoices: &mut [Invoice]) {
    invoices.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::LineItem;
    use chrono::TimeZone;
    use core_kernel::{InvoiceId, ProductId};
    use rust_decimal_macros::dec;

    fn invoice(code: &str, created_at: DateTime<Utc>) -> Invoice {
        Invoice {
            id: InvoiceId::new_v7(),
            code: code.to_string(),
            created_at,
            items: vec![LineItem::new(ProductId::new(), "Shirt", 1, dec!(1000))],
            note: None,
        }
    }

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 10, h, m, 0).unwrap()
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert!(InvoiceFilter::all().matches(&invoice("HD202506100001", at(9, 0))));
    }

    #[test]
    fn test_date_range_is_inclusive_on_both_ends() {
        let filter = InvoiceFilter::all().with_date_range(at(9, 0), at(17, 0));
        assert!(filter.matches(&invoice("a", at(9, 0))));
        assert!(filter.matches(&invoice("b", at(17, 0))));
        assert!(!filter.matches(&invoice("c", at(8, 59))));
        assert!(!filter.matches(&invoice("d", at(17, 1))));
    }

    #[test]
    fn test_code_substring_is_case_insensitive_and_not_anchored() {
        let filter = InvoiceFilter::all().with_code_substring("0610");
        assert!(filter.matches(&invoice("HD202506100001", at(9, 0))));

        let filter = InvoiceFilter::all().with_code_substring("hd2025");
        assert!(filter.matches(&invoice("HD202506100001", at(9, 0))));

        let filter = InvoiceFilter::all().with_code_substring("9999");
        assert!(!filter.matches(&invoice("HD202506100001", at(9, 0))));
    }

    #[test]
    fn test_code_substring_treats_pattern_characters_literally() {
        // `_` and `%` are ordinary characters here, not wildcards; the SQL
        // rendition escapes them so both stores agree
        let filter = InvoiceFilter::all().with_code_substring("0_01");
        assert!(!filter.matches(&invoice("HD202506100001", at(9, 0))));

        let filter = InvoiceFilter::all().with_code_substring("061%1");
        assert!(!filter.matches(&invoice("HD202506100001", at(9, 0))));
    }

    #[test]
    fn test_predicates_compose_conjunctively() {
        let filter = InvoiceFilter::all()
            .with_date_range(at(9, 0), at(17, 0))
            .with_code_substring("0001");
        assert!(filter.matches(&invoice("HD202506100001", at(10, 0))));
        assert!(!filter.matches(&invoice("HD202506100002", at(10, 0))));
        assert!(!filter.matches(&invoice("HD202506100001", at(18, 0))));
    }

    #[test]
    fn test_sort_is_newest_first_with_stable_tie_break() {
        let early = invoice("HD202506100001", at(9, 0));
        let mut tie_a = invoice("HD202506100002", at(12, 0));
        let mut tie_b = invoice("HD202506100003", at(12, 0));
        let late = invoice("HD202506100004", at(15, 0));
        // Make tie_b the larger id so the expected order is explicit
        if tie_a.id > tie_b.id {
            std::mem::swap(&mut tie_a.id, &mut tie_b.id);
        }

        let mut listing = vec![early.clone(), tie_a.clone(), tie_b.clone(), late.clone()];
        sort_newest_first(&mut listing);

        assert_eq!(listing[0].id, late.id);
        assert_eq!(listing[3].id, early.id);
        // equal timestamps fall back to id descending
        assert_eq!(listing[1].id, tie_b.id);
        assert_eq!(listing[2].id, tie_a.id);

        // Sorting again changes nothing
        let snapshot: Vec<_> = listing.iter().map(|i| i.id).collect();
        sort_newest_first(&mut listing);
        assert_eq!(snapshot, listing.iter().map(|i| i.id).collect::<Vec<_>>());
    }
}
