use docforge_model::{
    BankStatement, Direction, Document, DocumentId, DocumentType, Invoice, PageSpan,
    PaymentMethod, Receipt,
};

use crate::rows::{DocumentSummaryRow, GroundTruthRow};

/// Filename the rasterization collaborator will use for one page of a
/// document: `{id}.{ext}` when the document is single-page,
/// `{id}_page{N}.{ext}` for page `N` (1-based) of a multi-page document.
pub fn page_filename(id: DocumentId, page_count: usize, page: usize, ext: &str) -> String {
    if page_count <= 1 {
        format!("{id}.{ext}")
    } else {
        format!("{id}_page{page}.{ext}")
    }
}

/// 1-based index of the page whose span contains the entry at `index`.
fn page_of(pages: &[PageSpan], index: usize) -> usize {
    pages
        .iter()
        .position(|span| span.contains(index))
        .map(|position| position + 1)
        .unwrap_or(1)
}

/// Flattens assembled documents into self-contained ground-truth rows.
///
/// The projector only reads; a document reaches it fully assembled and
/// verified. The image extension is configuration shared with the
/// rasterization collaborator.
#[derive(Debug, Clone)]
pub struct Projector {
    image_ext: String,
}

impl Default for Projector {
    fn default() -> Self {
        Self::new("png")
    }
}

impl Projector {
    /// Builds a projector emitting filenames with the given extension.
    pub fn new(image_ext: impl Into<String>) -> Self {
        Self {
            image_ext: image_ext.into(),
        }
    }

    /// One row per body entry, in body order.
    ///
    /// An empty document yields no rows; its existence is recorded by
    /// [`summarize`](Self::summarize) instead.
    pub fn project(&self, document: &Document) -> Vec<GroundTruthRow> {
        match document {
            Document::Invoice(doc) => self.project_invoice(doc),
            Document::Receipt(doc) => self.project_receipt(doc),
            Document::BankStatement(doc) => self.project_statement(doc),
        }
    }

    /// One summary row per document, emitted even for empty bodies.
    pub fn summarize(&self, document: &Document) -> DocumentSummaryRow {
        match document {
            Document::Invoice(doc) => DocumentSummaryRow {
                document_id: doc.id,
                doc_type: DocumentType::Invoice,
                document_number: Some(doc.number.to_string()),
                starts_on: Some(doc.issued_on),
                ends_on: Some(doc.due_on),
                issuer_name: doc.sender.name.clone(),
                counterparty_name: Some(doc.recipient.name.clone()),
                currency: doc.currency.code(),
                entry_count: doc.items.len(),
                page_count: doc.pages.len(),
                subtotal: Some(doc.totals.subtotal),
                tax_rate: Some(doc.totals.tax_rate),
                tax_amount: Some(doc.totals.tax_amount),
                total: Some(doc.totals.total),
                opening_balance: None,
                closing_balance: None,
            },
            Document::Receipt(doc) => DocumentSummaryRow {
                document_id: doc.id,
                doc_type: DocumentType::Receipt,
                document_number: Some(doc.number.to_string()),
                starts_on: Some(doc.issued_at.date()),
                ends_on: None,
                issuer_name: doc.store.name.clone(),
                counterparty_name: None,
                currency: doc.currency.code(),
                entry_count: doc.items.len(),
                page_count: doc.pages.len(),
                subtotal: Some(doc.totals.subtotal),
                tax_rate: Some(doc.totals.tax_rate),
                tax_amount: Some(doc.totals.tax_amount),
                total: Some(doc.totals.total),
                opening_balance: None,
                closing_balance: None,
            },
            Document::BankStatement(doc) => DocumentSummaryRow {
                document_id: doc.id,
                doc_type: DocumentType::BankStatement,
                document_number: None,
                starts_on: Some(doc.period_start),
                ends_on: Some(doc.period_end),
                issuer_name: doc.bank.bank_name.clone(),
                counterparty_name: Some(doc.bank.account_holder.clone()),
                currency: doc.currency.code(),
                entry_count: doc.ledger.transactions.len(),
                page_count: doc.pages.len(),
                subtotal: None,
                tax_rate: None,
                tax_amount: None,
                total: None,
                opening_balance: Some(doc.ledger.opening_balance),
                closing_balance: Some(doc.ledger.closing_balance),
            },
        }
    }

    fn filename(&self, id: DocumentId, page_count: usize, page: usize) -> String {
        page_filename(id, page_count, page, &self.image_ext)
    }

    fn project_invoice(&self, doc: &Invoice) -> Vec<GroundTruthRow> {
        let page_count = doc.pages.len();
        doc.items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let page = page_of(&doc.pages, index);
                GroundTruthRow {
                    document_id: doc.id,
                    image_filename: self.filename(doc.id, page_count, page),
                    doc_type: DocumentType::Invoice,
                    page,
                    page_count,
                    document_number: Some(doc.number.to_string()),
                    issued_on: Some(doc.issued_on),
                    issued_at: None,
                    due_on: Some(doc.due_on),
                    period_start: None,
                    period_end: None,
                    issuer_name: Some(doc.sender.name.clone()),
                    issuer_address: Some(doc.sender.address.clone()),
                    issuer_vat_number: None,
                    counterparty_name: Some(doc.recipient.name.clone()),
                    counterparty_address: Some(doc.recipient.address.clone()),
                    account_number: None,
                    sort_code: None,
                    payment_method: None,
                    currency: doc.currency.code(),
                    entry_index: index,
                    entry_description: item.description.clone(),
                    entry_date: None,
                    quantity: Some(item.quantity),
                    unit_price: Some(item.unit_price),
                    amount: item.amount,
                    debit: None,
                    credit: None,
                    running_balance: None,
                    subtotal: Some(doc.totals.subtotal),
                    tax_rate: Some(doc.totals.tax_rate),
                    tax_amount: Some(doc.totals.tax_amount),
                    total: Some(doc.totals.total),
                    opening_balance: None,
                    closing_balance: None,
                }
            })
            .collect()
    }

    fn project_receipt(&self, doc: &Receipt) -> Vec<GroundTruthRow> {
        let page_count = doc.pages.len();
        let payment = match &doc.payment {
            PaymentMethod::Cash => "cash".to_string(),
            PaymentMethod::Card { last4 } => format!("card:{last4}"),
        };
        doc.items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let page = page_of(&doc.pages, index);
                GroundTruthRow {
                    document_id: doc.id,
                    image_filename: self.filename(doc.id, page_count, page),
                    doc_type: DocumentType::Receipt,
                    page,
                    page_count,
                    document_number: Some(doc.number.to_string()),
                    issued_on: Some(doc.issued_at.date()),
                    issued_at: Some(doc.issued_at),
                    due_on: None,
                    period_start: None,
                    period_end: None,
                    issuer_name: Some(doc.store.name.clone()),
                    issuer_address: Some(doc.store.address.clone()),
                    issuer_vat_number: Some(doc.store.vat_number.clone()),
                    counterparty_name: None,
                    counterparty_address: None,
                    account_number: None,
                    sort_code: None,
                    payment_method: Some(payment.clone()),
                    currency: doc.currency.code(),
                    entry_index: index,
                    entry_description: item.description.clone(),
                    entry_date: None,
                    quantity: Some(item.quantity),
                    unit_price: Some(item.unit_price),
                    amount: item.amount,
                    debit: None,
                    credit: None,
                    running_balance: None,
                    subtotal: Some(doc.totals.subtotal),
                    tax_rate: Some(doc.totals.tax_rate),
                    tax_amount: Some(doc.totals.tax_amount),
                    total: Some(doc.totals.total),
                    opening_balance: None,
                    closing_balance: None,
                }
            })
            .collect()
    }

    fn project_statement(&self, doc: &BankStatement) -> Vec<GroundTruthRow> {
        let page_count = doc.pages.len();
        doc.ledger
            .transactions
            .iter()
            .enumerate()
            .map(|(index, posted)| {
                let page = page_of(&doc.pages, index);
                let txn = &posted.transaction;
                let (debit, credit) = match txn.direction {
                    Direction::Debit => (Some(txn.amount), None),
                    Direction::Credit => (None, Some(txn.amount)),
                };
                GroundTruthRow {
                    document_id: doc.id,
                    image_filename: self.filename(doc.id, page_count, page),
                    doc_type: DocumentType::BankStatement,
                    page,
                    page_count,
                    document_number: None,
                    issued_on: None,
                    issued_at: None,
                    due_on: None,
                    period_start: Some(doc.period_start),
                    period_end: Some(doc.period_end),
                    issuer_name: Some(doc.bank.bank_name.clone()),
                    issuer_address: None,
                    issuer_vat_number: None,
                    counterparty_name: Some(doc.bank.account_holder.clone()),
                    counterparty_address: None,
                    account_number: Some(doc.bank.account_number.to_string()),
                    sort_code: Some(doc.bank.sort_code.to_string()),
                    payment_method: None,
                    currency: doc.currency.code(),
                    entry_index: index,
                    entry_description: txn.description.clone(),
                    entry_date: Some(txn.posted_on),
                    quantity: None,
                    unit_price: None,
                    amount: txn.amount,
                    debit,
                    credit,
                    running_balance: Some(posted.running_balance),
                    subtotal: None,
                    tax_rate: None,
                    tax_amount: None,
                    total: None,
                    opening_balance: Some(doc.ledger.opening_balance),
                    closing_balance: Some(doc.ledger.closing_balance),
                }
            })
            .collect()
    }
}
