use docforge_model::PageSpan;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors from pagination planning.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaginationError {
    /// Capacity of zero cannot tile any body. Configuration validation
    /// rejects this before generation starts; the guard here covers
    /// direct callers.
    #[error("page capacity must be positive")]
    ZeroCapacity,
}

/// Partitions a body of entries into ordered page spans of at most
/// `capacity` entries each.
///
/// `running_balances[i]` is the balance after entry `i`; the body itself
/// is not needed because pages are index views. The spans tile the body
/// contiguously in original order, the last page holds the remainder, and
/// each page's opening balance is its predecessor's closing balance
/// (`opening_balance` for the first). An empty body yields exactly one
/// empty page so downstream page numbering stays uniform.
pub fn plan_pages(
    running_balances: &[Decimal],
    capacity: usize,
    opening_balance: Decimal,
) -> Result<Vec<PageSpan>, PaginationError> {
    if capacity == 0 {
        return Err(PaginationError::ZeroCapacity);
    }

    let len = running_balances.len();
    if len == 0 {
        return Ok(vec![PageSpan {
            start: 0,
            end: 0,
            opening_balance,
            closing_balance: opening_balance,
        }]);
    }

    let mut pages = Vec::with_capacity(len.div_ceil(capacity));
    let mut start = 0;
    let mut carried = opening_balance;
    while start < len {
        let end = usize::min(start + capacity, len);
        let closing = running_balances[end - 1];
        pages.push(PageSpan {
            start,
            end,
            opening_balance: carried,
            closing_balance: closing,
        });
        carried = closing;
        start = end;
    }
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balances(count: usize) -> Vec<Decimal> {
        // Balance after entry i is i+1, an easy continuity oracle.
        (1..=count).map(|i| Decimal::from(i as i64)).collect()
    }

    #[test]
    fn partitions_120_entries_at_capacity_50_into_50_50_20() {
        let balances = balances(120);
        let pages = plan_pages(&balances, 50, Decimal::ZERO).unwrap();
        assert_eq!(
            pages.iter().map(PageSpan::len).collect::<Vec<_>>(),
            vec![50, 50, 20]
        );
        // Contiguous tiling in order.
        assert_eq!(pages[0].start, 0);
        for window in pages.windows(2) {
            assert_eq!(window[0].end, window[1].start);
            assert_eq!(window[0].closing_balance, window[1].opening_balance);
        }
        assert_eq!(pages.last().unwrap().end, 120);
        assert_eq!(pages.last().unwrap().closing_balance, Decimal::from(120));
    }

    #[test]
    fn exact_multiple_leaves_no_stub_page() {
        let balances = balances(100);
        let pages = plan_pages(&balances, 50, Decimal::ZERO).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].len(), 50);
    }

    #[test]
    fn empty_body_yields_one_empty_page_carrying_the_opening_balance() {
        let opening = Decimal::new(123_45, 2);
        let pages = plan_pages(&[], 50, opening).unwrap();
        assert_eq!(pages.len(), 1);
        assert!(pages[0].is_empty());
        assert_eq!(pages[0].opening_balance, opening);
        assert_eq!(pages[0].closing_balance, opening);
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert_eq!(
            plan_pages(&balances(3), 0, Decimal::ZERO),
            Err(PaginationError::ZeroCapacity)
        );
    }

    #[test]
    fn single_short_page_is_the_degenerate_case() {
        let pages = plan_pages(&balances(7), 50, Decimal::ZERO).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].len(), 7);
    }
}
