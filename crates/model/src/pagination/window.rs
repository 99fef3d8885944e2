use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WindowError {
    #[error("page limit must be at least 1")]
    ZeroLimit,
}

/// Row range requested from the engine for a single page.
///
/// `limit` is the exact maximum number of rows the engine may return for
/// the call, so it is never zero.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    offset: u64,
    limit: u64,
}

impl PageWindow {
    pub fn new(offset: u64, limit: u64) -> Result<Self, WindowError> {
        if limit == 0 {
            return Err(WindowError::ZeroLimit);
        }
        Ok(PageWindow { offset, limit })
    }

    /// The first page of a statement.
    pub fn first(limit: u64) -> Result<Self, WindowError> {
        Self::new(0, limit)
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Window for the page that follows a full page of this window.
    ///
    /// The offset advances past the rows just returned and the limit grows by
    /// `factor`, saturating instead of overflowing.
    pub fn advance(&self, factor: u64) -> Self {
        PageWindow {
            offset: self.offset.saturating_add(self.limit),
            limit: self.limit.saturating_mul(factor.max(1)),
        }
    }

    /// A page is full when the engine returned exactly `limit` rows; more
    /// rows may exist past it.
    pub fn is_filled_by(&self, row_count: usize) -> bool {
        row_count as u64 == self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_limit_rejected() {
        assert_eq!(PageWindow::new(5, 0), Err(WindowError::ZeroLimit));
    }

    #[test]
    fn test_advance_doubles_limit_and_moves_offset() {
        let window = PageWindow::first(10).unwrap();
        let next = window.advance(2);
        assert_eq!(next.offset(), 10);
        assert_eq!(next.limit(), 20);

        let after = next.advance(2);
        assert_eq!(after.offset(), 30);
        assert_eq!(after.limit(), 40);
    }

    #[test]
    fn test_advance_saturates() {
        let window = PageWindow::new(u64::MAX - 1, u64::MAX / 2 + 1).unwrap();
        let next = window.advance(2);
        assert_eq!(next.offset(), u64::MAX);
        assert_eq!(next.limit(), u64::MAX);
    }

    #[test]
    fn test_full_page_detection() {
        let window = PageWindow::new(0, 3).unwrap();
        assert!(window.is_filled_by(3));
        assert!(!window.is_filled_by(2));
        assert!(!window.is_filled_by(0));
    }
}
