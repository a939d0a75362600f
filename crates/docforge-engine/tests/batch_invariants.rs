//! Consistency invariants over whole generated batches.

use docforge_engine::{verify_document, BatchConfig, BatchRunner, EntryBounds, GenerationError};
use docforge_model::{Document, DocumentType, EntryAmount, PageSpan};
use rust_decimal::Decimal;

#[test]
fn test_every_generated_document_passes_arithmetic_recomputation() {
    let config = BatchConfig {
        invoices: 10,
        receipts: 10,
        statements: 5,
        seed: Some(1234),
        ..BatchConfig::default()
    };
    let report = BatchRunner::new(config).unwrap().run();
    assert_eq!(report.generated(), 25);
    assert_eq!(report.failed(), 0);

    for document in &report.documents {
        verify_document(document).unwrap();
        match document {
            Document::Invoice(doc) => {
                let subtotal: Decimal = doc.items.iter().map(|item| item.amount).sum();
                assert_eq!(doc.totals.subtotal, subtotal);
                assert_eq!(doc.totals.total, doc.totals.subtotal + doc.totals.tax_amount);
                assert!(doc.items.iter().all(EntryAmount::amount_is_consistent));
            }
            Document::Receipt(doc) => {
                assert!(doc.totals.is_consistent_with(&doc.items));
            }
            Document::BankStatement(doc) => {
                let mut balance = doc.ledger.opening_balance;
                for posted in &doc.ledger.transactions {
                    balance += posted.transaction.signed_amount();
                    assert_eq!(posted.running_balance, balance);
                }
                assert_eq!(doc.ledger.closing_balance, balance);
            }
        }
    }
}

#[test]
fn test_statement_of_120_transactions_paginates_into_50_50_20() {
    let config = BatchConfig {
        statements: 1,
        statement_transactions: EntryBounds::new(120, 120),
        page_capacity: 50,
        seed: Some(5),
        ..BatchConfig::default()
    };
    let report = BatchRunner::new(config).unwrap().run();
    let Document::BankStatement(doc) = &report.documents[0] else {
        panic!("expected a bank statement");
    };

    assert_eq!(
        doc.pages.iter().map(PageSpan::len).collect::<Vec<_>>(),
        vec![50, 50, 20]
    );

    // Concatenating the page views reproduces the body exactly.
    let concatenated: Vec<_> = doc
        .pages
        .iter()
        .flat_map(|span| span.slice(&doc.ledger.transactions))
        .cloned()
        .collect();
    assert_eq!(concatenated, doc.ledger.transactions);

    // Carried balance continuity across page boundaries.
    assert_eq!(doc.pages[0].opening_balance, doc.ledger.opening_balance);
    for window in doc.pages.windows(2) {
        assert_eq!(window[1].opening_balance, window[0].closing_balance);
    }
    assert_eq!(
        doc.pages.last().unwrap().closing_balance,
        doc.ledger.closing_balance
    );
}

#[test]
fn test_empty_invoice_body_is_not_an_error() {
    let config = BatchConfig {
        invoices: 1,
        invoice_items: EntryBounds::new(0, 0),
        seed: Some(9),
        ..BatchConfig::default()
    };
    let report = BatchRunner::new(config).unwrap().run();
    assert_eq!(report.failed(), 0);

    let Document::Invoice(doc) = &report.documents[0] else {
        panic!("expected an invoice");
    };
    assert!(doc.items.is_empty());
    assert_eq!(doc.totals.subtotal, Decimal::ZERO);
    assert_eq!(doc.totals.tax_amount, Decimal::ZERO);
    assert_eq!(doc.totals.total, Decimal::ZERO);
    assert_eq!(doc.pages.len(), 1);
    assert!(doc.pages[0].is_empty());
}

#[test]
fn test_failing_documents_do_not_abort_their_siblings() {
    // 30 unique receipt descriptions cannot be drawn from a smaller
    // vocabulary, so every receipt exhausts its retries while the
    // invoices in the same batch are untouched.
    let config = BatchConfig {
        invoices: 3,
        receipts: 2,
        receipt_items: EntryBounds::new(30, 30),
        seed: Some(21),
        ..BatchConfig::default()
    };
    let report = BatchRunner::new(config).unwrap().run();

    assert_eq!(report.generated(), 3);
    assert_eq!(report.failed(), 2);
    for document in &report.documents {
        assert_eq!(document.doc_type(), DocumentType::Invoice);
    }
    for failure in &report.failures {
        assert_eq!(failure.doc_type, DocumentType::Receipt);
        assert!(failure.reason.contains("retries exhausted"));
    }
}

#[test]
fn test_invalid_configuration_is_rejected_before_generation() {
    let config = BatchConfig {
        statements: 1,
        page_capacity: 0,
        ..BatchConfig::default()
    };
    assert!(BatchRunner::new(config).is_err());
}

#[test]
fn test_generation_error_carries_ordinal_and_type() {
    let error = GenerationError::ExhaustedRetries {
        ordinal: 4,
        doc_type: DocumentType::Receipt,
        constraint: "unique line item description",
    };
    assert_eq!(error.ordinal(), 4);
    assert_eq!(error.doc_type(), DocumentType::Receipt);
}
