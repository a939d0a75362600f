use docforge_model::{
    round_minor, Document, EntryAmount, LineItem, PageSpan,
};
use rust_decimal::Decimal;
use thiserror::Error;

/// A violated invariant found during final re-verification.
///
/// Any of these at assembly time means an upstream stage is defective;
/// the document is discarded, never repaired.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Defect {
    /// An entry's stored amount disagrees with its quantity and unit amount.
    #[error("entry {index}: amount disagrees with quantity x unit amount")]
    InconsistentEntry {
        /// Zero-based entry index.
        index: usize,
    },
    /// Subtotal is not the exact sum of line amounts.
    #[error("subtotal {found} != sum of line amounts {expected}")]
    SubtotalMismatch {
        /// Sum recomputed from the line amounts.
        expected: Decimal,
        /// Subtotal stored on the document.
        found: Decimal,
    },
    /// Tax amount is not the rounded subtotal-times-rate.
    #[error("tax amount {found} != round(subtotal x rate) = {expected}")]
    TaxMismatch {
        /// Recomputed tax amount.
        expected: Decimal,
        /// Tax amount stored on the document.
        found: Decimal,
    },
    /// Total is not subtotal plus tax amount.
    #[error("total {found} != subtotal + tax = {expected}")]
    TotalMismatch {
        /// Recomputed total.
        expected: Decimal,
        /// Total stored on the document.
        found: Decimal,
    },
    /// A running balance disagrees with the left-to-right fold.
    #[error("transaction {index}: running balance {found} != fold value {expected}")]
    RunningBalanceMismatch {
        /// Zero-based transaction index.
        index: usize,
        /// Balance the fold produces at this position.
        expected: Decimal,
        /// Balance stored on the transaction.
        found: Decimal,
    },
    /// Closing balance is not the fold's final value.
    #[error("closing balance {found} != final fold value {expected}")]
    ClosingBalanceMismatch {
        /// Final fold value.
        expected: Decimal,
        /// Closing balance stored on the ledger.
        found: Decimal,
    },
    /// The page list does not tile the body contiguously in order.
    #[error("page {page}: spans do not tile the body contiguously")]
    PagesDoNotTile {
        /// Zero-based page index.
        page: usize,
    },
    /// A page holds more entries than the configured capacity.
    #[error("page {page}: {len} entries exceed capacity {capacity}")]
    PageOverCapacity {
        /// Zero-based page index.
        page: usize,
        /// Entries on the page.
        len: usize,
        /// Configured capacity.
        capacity: usize,
    },
    /// A page's opening balance is not its predecessor's closing balance.
    #[error("page {page}: starting balance {found} != carried balance {expected}")]
    PageContinuityBroken {
        /// Zero-based page index.
        page: usize,
        /// Balance carried from the predecessor (or document opening).
        expected: Decimal,
        /// Opening balance stored on the page.
        found: Decimal,
    },
    /// A page's closing balance is not its last entry's running balance.
    #[error("page {page}: ending balance {found} != last entry balance {expected}")]
    PageClosingMismatch {
        /// Zero-based page index.
        page: usize,
        /// Last entry's running balance on that page.
        expected: Decimal,
        /// Closing balance stored on the page.
        found: Decimal,
    },
}

/// Re-verifies every consistency invariant of an assembled document.
///
/// This is the assembler's final gate and the `docforge verify`
/// subcommand's workhorse; it recomputes everything from the raw entries
/// and accepts nothing on trust.
pub fn verify_document(document: &Document) -> Result<(), Defect> {
    match document {
        Document::Invoice(doc) => {
            verify_items(&doc.items)?;
            verify_totals(&doc.items, doc.totals.tax_rate, &doc.totals)?;
            let balances = cumulative_amounts(&doc.items);
            verify_pages(&doc.pages, &balances, Decimal::ZERO)
        }
        Document::Receipt(doc) => {
            verify_items(&doc.items)?;
            verify_totals(&doc.items, doc.totals.tax_rate, &doc.totals)?;
            let balances = cumulative_amounts(&doc.items);
            verify_pages(&doc.pages, &balances, Decimal::ZERO)
        }
        Document::BankStatement(doc) => {
            let ledger = &doc.ledger;
            let mut balance = ledger.opening_balance;
            for (index, posted) in ledger.transactions.iter().enumerate() {
                if !posted.transaction.amount_is_consistent() {
                    return Err(Defect::InconsistentEntry { index });
                }
                balance += posted.transaction.signed_amount();
                if posted.running_balance != balance {
                    return Err(Defect::RunningBalanceMismatch {
                        index,
                        expected: balance,
                        found: posted.running_balance,
                    });
                }
            }
            if ledger.closing_balance != balance {
                return Err(Defect::ClosingBalanceMismatch {
                    expected: balance,
                    found: ledger.closing_balance,
                });
            }
            verify_pages(&doc.pages, &ledger.running_balances(), ledger.opening_balance)
        }
    }
}

/// Checks that no page exceeds the configured capacity.
///
/// Split from [`verify_document`] because the capacity is configuration,
/// not part of the document itself.
pub fn verify_page_capacity(document: &Document, capacity: usize) -> Result<(), Defect> {
    for (page, span) in document.pages().iter().enumerate() {
        if span.len() > capacity {
            return Err(Defect::PageOverCapacity {
                page,
                len: span.len(),
                capacity,
            });
        }
    }
    Ok(())
}

fn verify_items(items: &[LineItem]) -> Result<(), Defect> {
    for (index, item) in items.iter().enumerate() {
        if !item.amount_is_consistent() {
            return Err(Defect::InconsistentEntry { index });
        }
    }
    Ok(())
}

fn verify_totals(
    items: &[LineItem],
    tax_rate: Decimal,
    totals: &docforge_model::FinancialTotals,
) -> Result<(), Defect> {
    let subtotal: Decimal = items.iter().map(|item| item.amount).sum();
    if totals.subtotal != subtotal {
        return Err(Defect::SubtotalMismatch {
            expected: subtotal,
            found: totals.subtotal,
        });
    }
    let tax_amount = round_minor(subtotal * tax_rate);
    if totals.tax_amount != tax_amount {
        return Err(Defect::TaxMismatch {
            expected: tax_amount,
            found: totals.tax_amount,
        });
    }
    let total = subtotal + tax_amount;
    if totals.total != total {
        return Err(Defect::TotalMismatch {
            expected: total,
            found: totals.total,
        });
    }
    Ok(())
}

fn cumulative_amounts(items: &[LineItem]) -> Vec<Decimal> {
    let mut acc = Decimal::ZERO;
    items
        .iter()
        .map(|item| {
            acc += item.amount;
            acc
        })
        .collect()
}

fn verify_pages(
    pages: &[PageSpan],
    running_balances: &[Decimal],
    opening_balance: Decimal,
) -> Result<(), Defect> {
    let len = running_balances.len();

    // An empty body must still be exactly one empty page.
    if pages.is_empty() {
        return Err(Defect::PagesDoNotTile { page: 0 });
    }

    let mut cursor = 0;
    let mut carried = opening_balance;
    for (page, span) in pages.iter().enumerate() {
        if span.start != cursor || span.end < span.start || span.end > len {
            return Err(Defect::PagesDoNotTile { page });
        }
        if span.is_empty() && len != 0 {
            return Err(Defect::PagesDoNotTile { page });
        }
        if span.opening_balance != carried {
            return Err(Defect::PageContinuityBroken {
                page,
                expected: carried,
                found: span.opening_balance,
            });
        }
        let closing = if span.is_empty() {
            carried
        } else {
            running_balances[span.end - 1]
        };
        if span.closing_balance != closing {
            return Err(Defect::PageClosingMismatch {
                page,
                expected: closing,
                found: span.closing_balance,
            });
        }
        carried = closing;
        cursor = span.end;
    }
    if cursor != len {
        return Err(Defect::PagesDoNotTile { page: pages.len() - 1 });
    }
    Ok(())
}
