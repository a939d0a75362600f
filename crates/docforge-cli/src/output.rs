//! Output formatting utilities.

use docforge_engine::BatchReport;
use docforge_model::Document;

/// Prints the document table header.
pub fn print_document_table_header() {
    println!(
        "{:<38} {:<15} {:>7} {:>6} {:>12}",
        "DOCUMENT_ID", "TYPE", "ENTRIES", "PAGES", "AMOUNT"
    );
    println!("{}", "-".repeat(82));
}

/// Formats one document as a table row.
pub fn format_document_row(document: &Document) -> String {
    let amount = match document {
        Document::Invoice(doc) => doc.totals.total.to_string(),
        Document::Receipt(doc) => doc.totals.total.to_string(),
        Document::BankStatement(doc) => doc.ledger.closing_balance.to_string(),
    };
    format!(
        "{:<38} {:<15} {:>7} {:>6} {:>12}",
        document.id().to_string(),
        document.doc_type().tag(),
        document.entry_count(),
        document.page_count(),
        amount
    )
}

/// Prints the closing summary of a batch run.
pub fn print_batch_summary(report: &BatchReport, elapsed_secs: f64) {
    println!();
    println!(
        "Generated {} document(s), {} failure(s) in {:.2}s (seed {})",
        report.generated(),
        report.failed(),
        elapsed_secs,
        report.batch_seed
    );
    for failure in &report.failures {
        eprintln!(
            "  failed: {} #{}: {}",
            failure.doc_type, failure.ordinal, failure.reason
        );
    }
}
