//! Pagination value objects
//!
//! A `Page` describes the window a listing call should return. A size of
//! zero is the "return everything, unpaginated" sentinel used by reporting
//! callers that need the full filtered set; the page number is then ignored.

use serde::{Deserialize, Serialize};

/// Default page size for listing endpoints
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// A pagination window: 1-based page number plus page size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// 1-based page number; values below 1 are normalized to 1
    pub number: u32,
    /// Records per page; 0 means unbounded
    pub size: u32,
}

impl Page {
    /// Creates a pagination window, normalizing a zero page number to 1
    pub fn new(number: u32, size: u32) -> Self {
        Self {
            number: number.max(1),
            size,
        }
    }

    /// The unpaginated window covering every matching record
    pub fn all() -> Self {
        Self { number: 1, size: 0 }
    }

    /// Returns true when this window carries no size limit
    pub fn is_unbounded(&self) -> bool {
        self.size == 0
    }

    /// Number of records skipped before this window starts
    pub fn offset(&self) -> u64 {
        if self.is_unbounded() {
            0
        } else {
            u64::from(self.number - 1) * u64::from(self.size)
        }
    }

    /// Slices an already-ordered full result set down to this window
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        if self.is_unbounded() {
            return items;
        }
        let start = usize::min(self.offset() as usize, items.len());
        let end = usize::min(start + self.size as usize, items.len());
        &items[start..end]
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_number_is_normalized() {
        assert_eq!(Page::new(0, 10).number, 1);
        assert_eq!(Page::new(3, 10).number, 3);
    }

    #[test]
    fn test_offset() {
        assert_eq!(Page::new(1, 10).offset(), 0);
        assert_eq!(Page::new(3, 10).offset(), 20);
        assert_eq!(Page::all().offset(), 0);
    }

    #[test]
    fn test_slice_windows() {
        let items: Vec<u32> = (0..25).collect();
        assert_eq!(Page::new(1, 10).slice(&items), &items[0..10]);
        assert_eq!(Page::new(3, 10).slice(&items), &items[20..25]);
        assert_eq!(Page::new(4, 10).slice(&items), &[] as &[u32]);
        assert_eq!(Page::all().slice(&items).len(), 25);
    }

    #[test]
    fn test_slice_past_the_end_is_empty() {
        let items = vec![1, 2, 3];
        assert!(Page::new(99, 10).slice(&items).is_empty());
    }
}
