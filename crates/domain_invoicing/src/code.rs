//! Invoice code generation
//!
//! Codes look like `HD202506100001`: a fixed prefix, the calendar day in the
//! store timezone, and the per-day sequence zero-padded to [`SEQ_WIDTH`]
//! digits. The sequence comes from the [`SequenceStore`] port, whose
//! increment is a single atomic storage operation - the generator itself
//! holds no state and needs no lock.
//!
//! Past 9999 invoices in one day the numeric field simply widens; there is
//! no overflow or wraparound. Lexical comparison of whole codes is only
//! valid while widths match, so anything ordering codes across days or past
//! the pad width must compare via [`parse_sequence`].

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use core_kernel::{StoreError, StoreTimezone};

use crate::ports::SequenceStore;

/// Prefix of every invoice code
pub const CODE_PREFIX: &str = "HD";

/// Fixed zero-pad width of the sequence field
pub const SEQ_WIDTH: usize = 4;

/// Length of the `YYYYMMDD` day-key segment
const DAY_KEY_LEN: usize = 8;

/// Formats a code from a day key and sequence value
pub fn format_code(day_key: &str, seq: i64) -> String {
    format!("{}{}{:0width$}", CODE_PREFIX, day_key, seq, width = SEQ_WIDTH)
}

/// Extracts the numeric sequence from a code
///
/// Returns `None` for strings that are not well-formed invoice codes.
pub fn parse_sequence(code: &str) -> Option<i64> {
    let rest = code.strip_prefix(CODE_PREFIX)?;
    if rest.len() <= DAY_KEY_LEN {
        return None;
    }
    let (day, seq) = rest.split_at(DAY_KEY_LEN);
    if !day.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    seq.parse().ok()
}

/// Extracts the `YYYYMMDD` day-key segment from a code
pub fn parse_day_key(code: &str) -> Option<&str> {
    let rest = code.strip_prefix(CODE_PREFIX)?;
    if rest.len() <= DAY_KEY_LEN {
        return None;
    }
    Some(&rest[..DAY_KEY_LEN])
}

/// Generates invoice codes against a sequence store
#[derive(Clone)]
pub struct CodeGenerator {
    sequences: Arc<dyn SequenceStore>,
    tz: StoreTimezone,
}

impl CodeGenerator {
    /// Creates a generator in the store's operating timezone
    pub fn new(sequences: Arc<dyn SequenceStore>) -> Self {
        Self {
            sequences,
            tz: StoreTimezone::default(),
        }
    }

    /// Overrides the timezone; used by tests exercising day rollover
    pub fn with_timezone(mut self, tz: StoreTimezone) -> Self {
        self.tz = tz;
        self
    }

    /// Derives the day key for `now` and draws the next code
    ///
    /// If the store call fails no counter value was observably consumed and
    /// the error is returned as-is. If the caller's subsequent invoice write
    /// fails instead, the drawn value remains consumed and the day's
    /// numbering shows a gap - gaps are accepted, duplicates are not.
    pub async fn next_code(&self, now: DateTime<Utc>) -> Result<String, StoreError> {
        let day_key = self.tz.day_key(now);
        let seq = self.sequences.increment_and_get(&day_key).await?;
        let code = format_code(&day_key, seq);
        debug!(%day_key, seq, %code, "Generated invoice code");
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_pads_to_four_digits() {
        assert_eq!(format_code("20250610", 1), "HD202506100001");
        assert_eq!(format_code("20250610", 123), "HD202506100123");
    }

    #[test]
    fn test_width_grows_past_capacity() {
        // No wraparound after 9999; the field just widens
        assert_eq!(format_code("20250610", 10000), "HD2025061010000");
    }

    #[test]
    fn test_parse_sequence_round_trip() {
        assert_eq!(parse_sequence("HD202506100001"), Some(1));
        assert_eq!(parse_sequence("HD202506100123"), Some(123));
        assert_eq!(parse_sequence("HD2025061012345"), Some(12345));
    }

    #[test]
    fn test_parse_sequence_rejects_garbage() {
        assert_eq!(parse_sequence("XX202506100001"), None);
        assert_eq!(parse_sequence("HD20250610"), None);
        assert_eq!(parse_sequence("HDabcdefgh0001"), None);
        assert_eq!(parse_sequence(""), None);
    }

    #[test]
    fn test_parse_day_key() {
        assert_eq!(parse_day_key("HD202506100001"), Some("20250610"));
        assert_eq!(parse_day_key("HD2025"), None);
    }

    #[test]
    fn test_numeric_order_survives_width_change() {
        // Lexical order breaks across the width boundary, numeric does not
        let narrow = format_code("20250610", 9999);
        let wide = format_code("20250610", 10000);
        assert!(parse_sequence(&narrow).unwrap() < parse_sequence(&wide).unwrap());
    }
}
