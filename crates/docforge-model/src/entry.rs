use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::line_amount;

/// Shared quantity/amount shape implemented by every ledger entry variant.
///
/// Invoice line items and bank transactions overlap in exactly one
/// guarantee: the stored amount must equal the quantity times the unit
/// amount, rounded once at minor-unit scale. This trait carries that
/// check so the consistency rule exists in one place.
pub trait EntryAmount {
    /// Quantity of units; strictly positive.
    fn quantity(&self) -> Decimal;
    /// Amount per unit; strictly positive.
    fn unit_amount(&self) -> Decimal;
    /// Stored (unsigned) entry amount.
    fn amount(&self) -> Decimal;

    /// Whether the stored amount agrees with `quantity x unit_amount`
    /// under the uniform rounding policy.
    fn amount_is_consistent(&self) -> bool {
        self.quantity() > Decimal::ZERO
            && self.unit_amount() > Decimal::ZERO
            && self.amount() == line_amount(self.quantity(), self.unit_amount())
    }
}

/// One line item on an invoice or receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Human-readable description of the goods or service.
    pub description: String,
    /// Quantity of units; whole for services, up to one decimal for goods.
    pub quantity: Decimal,
    /// Price per unit.
    pub unit_price: Decimal,
    /// Derived line amount: `round_minor(quantity * unit_price)`.
    pub amount: Decimal,
}

impl LineItem {
    /// Builds a line item with its amount derived under the rounding policy.
    pub fn new(description: impl Into<String>, quantity: Decimal, unit_price: Decimal) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit_price,
            amount: line_amount(quantity, unit_price),
        }
    }
}

impl EntryAmount for LineItem {
    fn quantity(&self) -> Decimal {
        self.quantity
    }

    fn unit_amount(&self) -> Decimal {
        self.unit_price
    }

    fn amount(&self) -> Decimal {
        self.amount
    }
}

/// Direction of a bank transaction relative to the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Money into the account.
    Credit,
    /// Money out of the account.
    Debit,
}

/// One bank transaction before balance derivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Date the transaction posted.
    pub posted_on: NaiveDate,
    /// Narrative shown on the statement line.
    pub description: String,
    /// Whether the amount credits or debits the account.
    pub direction: Direction,
    /// Transaction magnitude; strictly positive.
    pub amount: Decimal,
}

impl Transaction {
    /// Signed effect on the account balance: positive for credits,
    /// negative for debits.
    pub fn signed_amount(&self) -> Decimal {
        match self.direction {
            Direction::Credit => self.amount,
            Direction::Debit => -self.amount,
        }
    }
}

impl EntryAmount for Transaction {
    fn quantity(&self) -> Decimal {
        Decimal::ONE
    }

    fn unit_amount(&self) -> Decimal {
        self.amount
    }

    fn amount(&self) -> Decimal {
        self.amount
    }
}

/// A transaction carrying its derived running balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostedTransaction {
    /// The underlying transaction.
    #[serde(flatten)]
    pub transaction: Transaction,
    /// Account balance immediately after this transaction applied.
    pub running_balance: Decimal,
}
