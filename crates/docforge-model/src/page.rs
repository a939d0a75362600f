use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A capacity-bounded, order-preserving view into a document body.
///
/// A page is a half-open index range `[start, end)` over the owning
/// document's entry sequence, never a copy of the entries. Concatenating
/// pages in order therefore reproduces the body by construction. The
/// carried balances preserve running-balance continuity: the first page
/// opens at the document's opening balance and every subsequent page opens
/// at its predecessor's closing balance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSpan {
    /// Index of the first entry on this page.
    pub start: usize,
    /// One past the index of the last entry on this page.
    pub end: usize,
    /// Balance carried onto this page.
    pub opening_balance: Decimal,
    /// Balance after the last entry on this page; equals
    /// `opening_balance` for an empty page.
    pub closing_balance: Decimal,
}

impl PageSpan {
    /// Number of entries on this page.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the page holds no entries (the degenerate empty-body page).
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether the entry at `index` falls on this page.
    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index < self.end
    }

    /// The page's entries, borrowed from the owning body.
    pub fn slice<'a, T>(&self, body: &'a [T]) -> &'a [T] {
        &body[self.start..self.end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_is_a_view_into_the_body() {
        let body = vec![10, 20, 30, 40, 50];
        let span = PageSpan {
            start: 2,
            end: 5,
            opening_balance: Decimal::ZERO,
            closing_balance: Decimal::ZERO,
        };
        assert_eq!(span.len(), 3);
        assert_eq!(span.slice(&body), &[30, 40, 50]);
        assert!(span.contains(2));
        assert!(!span.contains(5));
    }
}
