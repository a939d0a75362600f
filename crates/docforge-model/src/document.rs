use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::entry::LineItem;
use crate::identifiers::{AccountNumber, DocumentId, InvoiceNumber, ReceiptNumber, SortCode};
use crate::money::Currency;
use crate::page::PageSpan;
use crate::totals::{AccountLedger, FinancialTotals};

/// A named party with a single-line postal address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Party {
    /// Company or person name.
    pub name: String,
    /// Address flattened to one line.
    pub address: String,
}

/// Store metadata printed on a receipt header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreInfo {
    /// Trading name.
    pub name: String,
    /// Address flattened to one line.
    pub address: String,
    /// VAT registration number.
    pub vat_number: String,
}

/// How a receipt was paid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Cash payment.
    Cash,
    /// Card payment showing only the last four digits.
    Card {
        /// Last four digits of the card number.
        last4: String,
    },
}

/// Bank and account descriptors on a statement header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankInfo {
    /// Issuing bank name.
    pub bank_name: String,
    /// Account holder name.
    pub account_holder: String,
    /// Eight-digit account number.
    pub account_number: AccountNumber,
    /// Six-digit sort code.
    pub sort_code: SortCode,
}

/// An assembled invoice. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// Stable document id.
    pub id: DocumentId,
    /// Printed invoice number.
    pub number: InvoiceNumber,
    /// Issue date.
    pub issued_on: NaiveDate,
    /// Payment due date.
    pub due_on: NaiveDate,
    /// Issuing party.
    pub sender: Party,
    /// Billed party.
    pub recipient: Party,
    /// Currency all amounts are denominated in.
    pub currency: Currency,
    /// Ordered line items.
    pub items: Vec<LineItem>,
    /// Derived totals.
    pub totals: FinancialTotals,
    /// Ordered page views over `items`.
    pub pages: Vec<PageSpan>,
}

/// An assembled till receipt. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    /// Stable document id.
    pub id: DocumentId,
    /// Printed receipt number.
    pub number: ReceiptNumber,
    /// Timestamp printed at the top of the receipt.
    pub issued_at: NaiveDateTime,
    /// Issuing store.
    pub store: StoreInfo,
    /// Payment method.
    pub payment: PaymentMethod,
    /// Currency all amounts are denominated in.
    pub currency: Currency,
    /// Ordered line items.
    pub items: Vec<LineItem>,
    /// Derived totals.
    pub totals: FinancialTotals,
    /// Ordered page views over `items`.
    pub pages: Vec<PageSpan>,
}

/// An assembled bank statement. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankStatement {
    /// Stable document id.
    pub id: DocumentId,
    /// Bank and account descriptors.
    pub bank: BankInfo,
    /// First day of the statement period.
    pub period_start: NaiveDate,
    /// Last day of the statement period.
    pub period_end: NaiveDate,
    /// Currency all amounts are denominated in.
    pub currency: Currency,
    /// Ordered transactions with derived balances.
    pub ledger: AccountLedger,
    /// Ordered page views over `ledger.transactions`.
    pub pages: Vec<PageSpan>,
}

/// Document type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Multi-line service/product invoice.
    Invoice,
    /// Point-of-sale till receipt.
    Receipt,
    /// Periodic account statement.
    BankStatement,
}

impl DocumentType {
    /// Stable snake_case tag, also used for seed-stream domain separation.
    pub fn tag(&self) -> &'static str {
        match self {
            DocumentType::Invoice => "invoice",
            DocumentType::Receipt => "receipt",
            DocumentType::BankStatement => "bank_statement",
        }
    }

    /// Plural form used for output directory and file naming.
    pub fn plural(&self) -> &'static str {
        match self {
            DocumentType::Invoice => "invoices",
            DocumentType::Receipt => "receipts",
            DocumentType::BankStatement => "bank_statements",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One fully assembled, internally consistent document.
///
/// Owned exclusively by the assembler until handed out read-only; never
/// mutated after assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "doc_type", rename_all = "snake_case")]
pub enum Document {
    /// Invoice variant.
    Invoice(Invoice),
    /// Receipt variant.
    Receipt(Receipt),
    /// Bank statement variant.
    BankStatement(BankStatement),
}

impl Document {
    /// Stable document id.
    pub fn id(&self) -> DocumentId {
        match self {
            Document::Invoice(doc) => doc.id,
            Document::Receipt(doc) => doc.id,
            Document::BankStatement(doc) => doc.id,
        }
    }

    /// Type tag of this document.
    pub fn doc_type(&self) -> DocumentType {
        match self {
            Document::Invoice(_) => DocumentType::Invoice,
            Document::Receipt(_) => DocumentType::Receipt,
            Document::BankStatement(_) => DocumentType::BankStatement,
        }
    }

    /// Currency the document is denominated in.
    pub fn currency(&self) -> Currency {
        match self {
            Document::Invoice(doc) => doc.currency,
            Document::Receipt(doc) => doc.currency,
            Document::BankStatement(doc) => doc.currency,
        }
    }

    /// Ordered page views over the document body.
    pub fn pages(&self) -> &[PageSpan] {
        match self {
            Document::Invoice(doc) => &doc.pages,
            Document::Receipt(doc) => &doc.pages,
            Document::BankStatement(doc) => &doc.pages,
        }
    }

    /// Number of pages; at least one, even for an empty body.
    pub fn page_count(&self) -> usize {
        self.pages().len()
    }

    /// Number of body entries (line items or transactions).
    pub fn entry_count(&self) -> usize {
        match self {
            Document::Invoice(doc) => doc.items.len(),
            Document::Receipt(doc) => doc.items.len(),
            Document::BankStatement(doc) => doc.ledger.transactions.len(),
        }
    }
}
