use docforge_model::{
    round_minor, AccountLedger, FinancialTotals, LineItem, PostedTransaction, Transaction,
};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors from consistency computation; fatal to the document in question.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    /// Tax rate supplied outside the closed interval `[0, 1]`.
    #[error("tax rate outside [0, 1]: {0}")]
    TaxRateOutOfRange(Decimal),
}

/// Computes invoice/receipt totals under the uniform rounding policy.
///
/// The subtotal is the exact sum of already-rounded line amounts, so no
/// drift accumulates at the aggregate level; the tax amount is the only
/// rounding applied at this step. An empty body yields all-zero totals
/// and is not an error.
pub fn compute_totals(items: &[LineItem], tax_rate: Decimal) -> Result<FinancialTotals, CalcError> {
    if tax_rate < Decimal::ZERO || tax_rate > Decimal::ONE {
        return Err(CalcError::TaxRateOutOfRange(tax_rate));
    }
    let subtotal: Decimal = items.iter().map(|item| item.amount).sum();
    let tax_amount = round_minor(subtotal * tax_rate);
    Ok(FinancialTotals {
        subtotal,
        tax_rate,
        tax_amount,
        total: subtotal + tax_amount,
    })
}

/// Derives running balances by a single left-to-right fold over the
/// transactions in the order given.
///
/// The order must be posting order; computing the fold in any other order
/// is a defect the final verification stage will reject. The closing
/// balance is defined as the fold's final value, which for an empty
/// ledger is the opening balance.
pub fn compute_running_balances(
    opening_balance: Decimal,
    transactions: Vec<Transaction>,
) -> AccountLedger {
    let mut balance = opening_balance;
    let transactions: Vec<PostedTransaction> = transactions
        .into_iter()
        .map(|transaction| {
            balance += transaction.signed_amount();
            PostedTransaction {
                transaction,
                running_balance: balance,
            }
        })
        .collect();
    AccountLedger {
        opening_balance,
        closing_balance: balance,
        transactions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use docforge_model::Direction;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn txn(direction: Direction, amount: &str) -> Transaction {
        Transaction {
            posted_on: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            description: "Faster Payment".to_string(),
            direction,
            amount: dec(amount),
        }
    }

    #[test]
    fn invoice_totals_scenario() {
        let items = vec![
            LineItem::new("Consulting Services - May", dec("2"), dec("10.00")),
            LineItem::new("Software License", dec("1"), dec("5.00")),
            LineItem::new("Cloud Hosting - May", dec("3"), dec("7.00")),
        ];
        let totals = compute_totals(&items, dec("0.20")).unwrap();
        assert_eq!(totals.subtotal, dec("46.00"));
        assert_eq!(totals.tax_amount, dec("9.20"));
        assert_eq!(totals.total, dec("55.20"));
        assert!(totals.is_consistent_with(&items));
    }

    #[test]
    fn empty_body_yields_zero_totals() {
        let totals = compute_totals(&[], dec("0.20")).unwrap();
        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.tax_amount, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::ZERO);
    }

    #[test]
    fn tax_rate_outside_unit_interval_is_fatal() {
        assert_eq!(
            compute_totals(&[], dec("1.01")),
            Err(CalcError::TaxRateOutOfRange(dec("1.01")))
        );
        assert!(compute_totals(&[], dec("-0.01")).is_err());
    }

    #[test]
    fn tax_rounding_is_half_even() {
        // 12.50 * 0.05 = 0.625, which banker's rounding takes down to 0.62.
        let items = vec![LineItem::new("Tea Bags 80pk", dec("5"), dec("2.50"))];
        let totals = compute_totals(&items, dec("0.05")).unwrap();
        assert_eq!(totals.tax_amount, dec("0.62"));
        assert_eq!(totals.total, dec("13.12"));
    }

    #[test]
    fn running_balance_scenario() {
        let ledger = compute_running_balances(
            dec("100.00"),
            vec![
                txn(Direction::Debit, "20.00"),
                txn(Direction::Credit, "50.00"),
                txn(Direction::Debit, "10.00"),
            ],
        );
        assert_eq!(
            ledger.running_balances(),
            vec![dec("80.00"), dec("130.00"), dec("120.00")]
        );
        assert_eq!(ledger.closing_balance, dec("120.00"));
    }

    #[test]
    fn empty_ledger_closes_at_opening() {
        let ledger = compute_running_balances(dec("42.42"), Vec::new());
        assert_eq!(ledger.closing_balance, dec("42.42"));
        assert!(ledger.transactions.is_empty());
    }
}
