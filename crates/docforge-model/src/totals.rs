use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entry::{LineItem, PostedTransaction};
use crate::money::round_minor;

/// Derived monetary totals for invoices and receipts.
///
/// All equalities hold exactly at minor-unit scale: the subtotal is the
/// exact sum of already-rounded line amounts, the tax amount is the
/// subtotal times the rate rounded once, and the total is their exact sum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialTotals {
    /// Sum of all line amounts.
    pub subtotal: Decimal,
    /// Applied tax rate, within `[0, 1]`.
    pub tax_rate: Decimal,
    /// `round_minor(subtotal * tax_rate)`.
    pub tax_amount: Decimal,
    /// `subtotal + tax_amount`.
    pub total: Decimal,
}

impl FinancialTotals {
    /// Totals of an empty body at the given rate; everything is zero.
    pub fn zero(tax_rate: Decimal) -> Self {
        Self {
            subtotal: Decimal::ZERO,
            tax_rate,
            tax_amount: Decimal::ZERO,
            total: Decimal::ZERO,
        }
    }

    /// Whether these totals agree with the given line items under the
    /// uniform rounding policy.
    pub fn is_consistent_with(&self, items: &[LineItem]) -> bool {
        let subtotal: Decimal = items.iter().map(|item| item.amount).sum();
        self.subtotal == subtotal
            && self.tax_amount == round_minor(self.subtotal * self.tax_rate)
            && self.total == self.subtotal + self.tax_amount
    }
}

/// An account's ordered transactions with derived balances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountLedger {
    /// Balance before the first transaction.
    pub opening_balance: Decimal,
    /// Balance after the last transaction; equals `opening_balance` when
    /// the ledger is empty.
    pub closing_balance: Decimal,
    /// Transactions in posting order, each with its running balance.
    pub transactions: Vec<PostedTransaction>,
}

impl AccountLedger {
    /// Running balances in transaction order.
    pub fn running_balances(&self) -> Vec<Decimal> {
        self.transactions
            .iter()
            .map(|posted| posted.running_balance)
            .collect()
    }
}
