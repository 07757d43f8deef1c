//! Pagination types for the paginated query views.

use serde::{Deserialize, Serialize};

/// Fixed number of items per page across all query views.
pub const PAGE_SIZE: u64 = 50;

/// A 1-based page request.
///
/// Page size is fixed at [`PAGE_SIZE`]; only the page number varies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-based).
    #[serde(default = "default_page")]
    pub number: u64,
}

impl Page {
    /// Create a page request, clamping the number to at least 1.
    pub fn new(number: u64) -> Self {
        Self {
            number: number.max(1),
        }
    }

    /// Calculate the SQL `OFFSET` value.
    ///
    /// Saturates rather than wrapping: the page number comes straight from
    /// the query string, so arbitrarily large values must stay valid. The
    /// result is capped at `i64::MAX` so it binds cleanly as a Postgres
    /// `OFFSET`.
    pub fn offset(&self) -> u64 {
        self.number
            .saturating_sub(1)
            .saturating_mul(PAGE_SIZE)
            .min(i64::MAX as u64)
    }

    /// Return the SQL `LIMIT` value.
    pub fn limit(&self) -> u64 {
        PAGE_SIZE
    }
}

impl Default for Page {
    fn default() -> Self {
        Self { number: 1 }
    }
}

fn default_page() -> u64 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets() {
        assert_eq!(Page::new(1).offset(), 0);
        assert_eq!(Page::new(2).offset(), 50);
        assert_eq!(Page::new(3).offset(), 100);
    }

    #[test]
    fn test_zero_clamps_to_first_page() {
        assert_eq!(Page::new(0).number, 1);
        assert_eq!(Page::new(0).offset(), 0);
    }

    #[test]
    fn test_huge_page_number_saturates() {
        // Query-string input, so any u64 must produce a usable offset.
        assert_eq!(Page::new(u64::MAX).offset(), i64::MAX as u64);
        assert_eq!(Page::new(u64::MAX).limit(), PAGE_SIZE);
    }
}
