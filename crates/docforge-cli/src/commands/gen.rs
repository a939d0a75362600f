//! Generate command implementation.

use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;
use std::time::Instant;

use chrono::NaiveDate;
use clap::Args;
use docforge_engine::{BatchConfig, BatchReport, BatchRunner};
use docforge_export::{CsvExporter, Projector};
use docforge_model::{Currency, Document, DocumentType};
use serde_json::json;

use crate::output;

/// Arguments for `docforge gen`.
#[derive(Args)]
pub struct GenArgs {
    /// Number of invoices to generate
    #[arg(long, default_value_t = 0)]
    pub invoices: usize,
    /// Number of receipts to generate
    #[arg(long, default_value_t = 0)]
    pub receipts: usize,
    /// Number of bank statements to generate
    #[arg(long, default_value_t = 0)]
    pub statements: usize,
    /// Entries per page (transactions per statement page)
    #[arg(long, default_value_t = docforge_engine::DEFAULT_PAGE_CAPACITY)]
    pub per_page: usize,
    /// Batch seed for reproducible output (default: drawn from entropy)
    #[arg(long)]
    pub seed: Option<u64>,
    /// Currency code for all documents
    #[arg(long, default_value = "GBP")]
    pub currency: String,
    /// Anchor date for drawn dates, YYYY-MM-DD (default: today)
    #[arg(long)]
    pub as_of: Option<String>,
    /// Output directory
    #[arg(long, default_value = "output")]
    pub out: String,
    /// Image extension used in ground-truth filenames
    #[arg(long, default_value = "png")]
    pub ext: String,
    /// Number of worker threads (default: 1)
    #[arg(long)]
    pub workers: Option<usize>,
    /// Output the batch report as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: GenArgs) -> Result<(), Box<dyn std::error::Error>> {
    let currency: Currency = args
        .currency
        .parse()
        .map_err(|e| format!("invalid --currency: {}", e))?;
    let reference_date = match &args.as_of {
        Some(text) => NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .map_err(|e| format!("invalid --as-of date: {}", e))?,
        None => chrono::Local::now().date_naive(),
    };

    let config = BatchConfig {
        invoices: args.invoices,
        receipts: args.receipts,
        statements: args.statements,
        page_capacity: args.per_page,
        seed: args.seed,
        currency,
        reference_date,
        ..BatchConfig::default()
    };

    let runner = BatchRunner::new(config)?;
    let started = Instant::now();
    let report = match args
        .workers
        .and_then(NonZeroUsize::new)
        .filter(|workers| workers.get() > 1)
    {
        Some(workers) => runner.run_parallel(workers),
        None => runner.run(),
    };
    let elapsed = started.elapsed().as_secs_f64();

    write_outputs(Path::new(&args.out), &report, &args.ext)?;

    if args.json {
        let value = json!({
            "seed": report.batch_seed,
            "generated": report.generated(),
            "failed": report.failed(),
            "elapsed_secs": elapsed,
            "failures": &report.failures,
            "output_dir": args.out,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        output::print_document_table_header();
        for document in &report.documents {
            println!("{}", output::format_document_row(document));
        }
        output::print_batch_summary(&report, elapsed);
    }
    Ok(())
}

/// Writes one JSON file per document (the rendering collaborator's input)
/// plus per-type ground-truth and summary CSVs, mirroring the layout the
/// downstream pipeline expects.
fn write_outputs(
    out_dir: &Path,
    report: &BatchReport,
    ext: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let projector = Projector::new(ext);

    for doc_type in [
        DocumentType::Invoice,
        DocumentType::Receipt,
        DocumentType::BankStatement,
    ] {
        let documents: Vec<&Document> = report
            .documents
            .iter()
            .filter(|document| document.doc_type() == doc_type)
            .collect();
        if documents.is_empty() {
            continue;
        }

        let doc_dir = out_dir.join(doc_type.plural());
        fs::create_dir_all(&doc_dir)?;
        for document in &documents {
            let path = doc_dir.join(format!("{}.json", document.id()));
            fs::write(path, serde_json::to_string_pretty(document)?)?;
        }

        let rows: Vec<_> = documents
            .iter()
            .flat_map(|document| projector.project(document))
            .collect();
        let summaries: Vec<_> = documents
            .iter()
            .map(|document| projector.summarize(document))
            .collect();

        CsvExporter::write_ground_truth(
            out_dir.join(format!("{}_ground_truth.csv", doc_type.plural())),
            &rows,
        )?;
        CsvExporter::write_summaries(
            out_dir.join(format!("{}_summary.csv", doc_type.plural())),
            &summaries,
        )?;
    }
    Ok(())
}
