//! Data model primitives for docforge synthetic financial documents.
//!
//! Every value that participates in a consistency guarantee lives in this
//! crate: the minor-unit rounding policy, ledger entry shapes, derived
//! aggregates (totals, account ledgers), page spans, and validated
//! identifiers. Types here are plain data; the fabrication and verification
//! logic that produces them lives in `docforge-engine`.
//!
#![deny(missing_docs)]

/// Document variants, headers, and party descriptors.
pub mod document;
/// Ledger entry shapes and the shared amount-consistency capability.
pub mod entry;
/// Validated identifier newtypes and the stable document id.
pub mod identifiers;
/// Minor-unit money policy and currency tags.
pub mod money;
/// Capacity-bounded page views into a document body.
pub mod page;
/// Derived aggregates: financial totals and account ledgers.
pub mod totals;
/// Validation helpers used by model types.
pub mod validation;

pub use document::{
    BankInfo, BankStatement, Document, DocumentType, Invoice, Party, PaymentMethod, Receipt,
    StoreInfo,
};
pub use entry::{Direction, EntryAmount, LineItem, PostedTransaction, Transaction};
pub use identifiers::{AccountNumber, DocumentId, InvoiceNumber, ReceiptNumber, SortCode};
pub use money::{line_amount, round_minor, Currency, MINOR_SCALE};
pub use page::PageSpan;
pub use totals::{AccountLedger, FinancialTotals};
pub use validation::ValidationError;
