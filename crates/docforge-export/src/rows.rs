use chrono::{NaiveDate, NaiveDateTime};
use docforge_model::{DocumentId, DocumentType};
use rust_decimal::Decimal;
use serde::Serialize;

/// One row of row-level ground truth: a single line item or transaction,
/// denormalized with its owning document's header and totals fields.
///
/// One schema covers all three document types; columns that do not apply
/// to a type stay empty. Type-specific consumers filter on `doc_type`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroundTruthRow {
    /// Owning document id.
    pub document_id: DocumentId,
    /// Image file this row's entry appears in, per the rasterizer
    /// naming convention.
    pub image_filename: String,
    /// Owning document type.
    pub doc_type: DocumentType,
    /// 1-based index of the page containing this entry.
    pub page: usize,
    /// Total pages in the owning document.
    pub page_count: usize,
    /// Printed document number (invoices and receipts).
    pub document_number: Option<String>,
    /// Invoice/receipt issue date.
    pub issued_on: Option<NaiveDate>,
    /// Receipt till timestamp.
    pub issued_at: Option<NaiveDateTime>,
    /// Invoice due date.
    pub due_on: Option<NaiveDate>,
    /// Statement period start.
    pub period_start: Option<NaiveDate>,
    /// Statement period end.
    pub period_end: Option<NaiveDate>,
    /// Sender (invoice), store (receipt), or bank (statement) name.
    pub issuer_name: Option<String>,
    /// Issuer address where the document carries one.
    pub issuer_address: Option<String>,
    /// Issuer VAT registration number (receipts).
    pub issuer_vat_number: Option<String>,
    /// Recipient (invoice) or account holder (statement) name.
    pub counterparty_name: Option<String>,
    /// Recipient address (invoices).
    pub counterparty_address: Option<String>,
    /// Account number (statements).
    pub account_number: Option<String>,
    /// Sort code (statements).
    pub sort_code: Option<String>,
    /// Payment method tag (receipts): `cash` or `card:NNNN`.
    pub payment_method: Option<String>,
    /// ISO currency code.
    pub currency: &'static str,
    /// 0-based entry index within the document body.
    pub entry_index: usize,
    /// Entry description text.
    pub entry_description: String,
    /// Transaction posting date (statements).
    pub entry_date: Option<NaiveDate>,
    /// Line item quantity (invoices and receipts).
    pub quantity: Option<Decimal>,
    /// Line item unit price (invoices and receipts).
    pub unit_price: Option<Decimal>,
    /// Unsigned entry amount.
    pub amount: Decimal,
    /// Debit magnitude (statements, debit rows).
    pub debit: Option<Decimal>,
    /// Credit magnitude (statements, credit rows).
    pub credit: Option<Decimal>,
    /// Running balance after this entry (statements).
    pub running_balance: Option<Decimal>,
    /// Document subtotal (invoices and receipts).
    pub subtotal: Option<Decimal>,
    /// Document tax rate (invoices and receipts).
    pub tax_rate: Option<Decimal>,
    /// Document tax amount (invoices and receipts).
    pub tax_amount: Option<Decimal>,
    /// Document grand total (invoices and receipts).
    pub total: Option<Decimal>,
    /// Opening balance (statements).
    pub opening_balance: Option<Decimal>,
    /// Closing balance (statements).
    pub closing_balance: Option<Decimal>,
}

/// One document-level summary row: records the document's existence and
/// aggregates even when the body is empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentSummaryRow {
    /// Document id.
    pub document_id: DocumentId,
    /// Document type.
    pub doc_type: DocumentType,
    /// Printed document number (invoices and receipts).
    pub document_number: Option<String>,
    /// Issue date or period start.
    pub starts_on: Option<NaiveDate>,
    /// Due date or period end.
    pub ends_on: Option<NaiveDate>,
    /// Issuer: sender, store, or bank name.
    pub issuer_name: String,
    /// Counterparty: recipient or account holder name.
    pub counterparty_name: Option<String>,
    /// ISO currency code.
    pub currency: &'static str,
    /// Number of body entries.
    pub entry_count: usize,
    /// Number of pages.
    pub page_count: usize,
    /// Document subtotal (invoices and receipts).
    pub subtotal: Option<Decimal>,
    /// Document tax rate (invoices and receipts).
    pub tax_rate: Option<Decimal>,
    /// Document tax amount (invoices and receipts).
    pub tax_amount: Option<Decimal>,
    /// Document grand total (invoices and receipts).
    pub total: Option<Decimal>,
    /// Opening balance (statements).
    pub opening_balance: Option<Decimal>,
    /// Closing balance (statements).
    pub closing_balance: Option<Decimal>,
}
