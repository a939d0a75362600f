use docforge_model::{
    BankStatement, Document, DocumentId, DocumentType, Invoice, InvoiceNumber, LineItem, Receipt,
    ReceiptNumber, ValidationError,
};
use rand::Rng;
use rust_decimal::Decimal;

use crate::calc::{compute_running_balances, compute_totals, CalcError};
use crate::config::BatchConfig;
use crate::entity::{EntityGenerator, RetryExhausted};
use crate::errors::GenerationError;
use crate::paginate::{plan_pages, PaginationError};
use crate::seed::rng_for_seed;
use crate::verify::{verify_document, verify_page_capacity};

/// Orchestrates generation, consistency computation, and pagination into
/// one immutable document.
///
/// Each `assemble` call is a pure, self-contained unit of work: it reads
/// only the shared configuration, draws only from the document's own
/// seeded stream, performs no I/O, and either returns a fully verified
/// document or an error naming the failing ordinal. Concurrent calls
/// share nothing mutable.
pub struct DocumentAssembler<'a> {
    config: &'a BatchConfig,
}

impl<'a> DocumentAssembler<'a> {
    /// Builds an assembler over a validated configuration.
    pub fn new(config: &'a BatchConfig) -> Self {
        Self { config }
    }

    /// Assembles document `ordinal` of the batch from its derived seed.
    ///
    /// Runs the strict pipeline (entities, then derived fields, then
    /// pages), assigns the stable id, and re-verifies every invariant
    /// before returning. A violation at the final gate is an upstream
    /// defect, fatal to this document only.
    pub fn assemble(
        &self,
        doc_type: DocumentType,
        ordinal: usize,
        seed: u64,
    ) -> Result<Document, GenerationError> {
        let mut entities = EntityGenerator::new(self.config, rng_for_seed(seed));
        let built = match doc_type {
            DocumentType::Invoice => self.build_invoice(&mut entities),
            DocumentType::Receipt => self.build_receipt(&mut entities),
            DocumentType::BankStatement => self.build_statement(&mut entities),
        };
        let document = built.map_err(|failure| failure.into_error(ordinal, doc_type))?;

        verify_document(&document).map_err(|defect| GenerationError::Defect {
            ordinal,
            doc_type,
            reason: defect.to_string(),
        })?;
        verify_page_capacity(&document, self.config.page_capacity).map_err(|defect| {
            GenerationError::Defect {
                ordinal,
                doc_type,
                reason: defect.to_string(),
            }
        })?;
        Ok(document)
    }

    fn build_invoice(&self, entities: &mut EntityGenerator) -> Result<Document, BuildFailure> {
        let raw = entities.draw_invoice()?;
        let items: Vec<LineItem> = raw
            .items
            .into_iter()
            .map(|item| LineItem::new(item.description, item.quantity, item.unit_price))
            .collect();
        let totals = compute_totals(&items, raw.tax_rate)?;
        let pages = plan_pages(
            &cumulative_amounts(&items),
            self.config.page_capacity,
            Decimal::ZERO,
        )?;
        Ok(Document::Invoice(Invoice {
            id: DocumentId::from_random_bytes(entities.rng_mut().gen()),
            number: InvoiceNumber::parse(raw.number)?,
            issued_on: raw.issued_on,
            due_on: raw.due_on,
            sender: raw.sender,
            recipient: raw.recipient,
            currency: self.config.currency,
            items,
            totals,
            pages,
        }))
    }

    fn build_receipt(&self, entities: &mut EntityGenerator) -> Result<Document, BuildFailure> {
        let raw = entities.draw_receipt()?;
        let items: Vec<LineItem> = raw
            .items
            .into_iter()
            .map(|item| LineItem::new(item.description, item.quantity, item.unit_price))
            .collect();
        let totals = compute_totals(&items, raw.tax_rate)?;
        let pages = plan_pages(
            &cumulative_amounts(&items),
            self.config.page_capacity,
            Decimal::ZERO,
        )?;
        Ok(Document::Receipt(Receipt {
            id: DocumentId::from_random_bytes(entities.rng_mut().gen()),
            number: ReceiptNumber::parse(raw.number)?,
            issued_at: raw.issued_at,
            store: raw.store,
            payment: raw.payment,
            currency: self.config.currency,
            items,
            totals,
            pages,
        }))
    }

    fn build_statement(&self, entities: &mut EntityGenerator) -> Result<Document, BuildFailure> {
        let raw = entities.draw_statement()?;
        let ledger = compute_running_balances(raw.opening_balance, raw.transactions);
        let pages = plan_pages(
            &ledger.running_balances(),
            self.config.page_capacity,
            ledger.opening_balance,
        )?;
        Ok(Document::BankStatement(BankStatement {
            id: DocumentId::from_random_bytes(entities.rng_mut().gen()),
            bank: raw.bank,
            period_start: raw.period_start,
            period_end: raw.period_end,
            currency: self.config.currency,
            ledger,
            pages,
        }))
    }
}

/// Running totals over line items: the balance stream fed to the planner
/// so invoice/receipt pages carry the same continuity guarantee as
/// statement pages (opening at zero).
fn cumulative_amounts(items: &[LineItem]) -> Vec<Decimal> {
    let mut acc = Decimal::ZERO;
    items
        .iter()
        .map(|item| {
            acc += item.amount;
            acc
        })
        .collect()
}

enum BuildFailure {
    Retry(RetryExhausted),
    Calc(CalcError),
    Paginate(PaginationError),
    Validation(ValidationError),
}

impl BuildFailure {
    fn into_error(self, ordinal: usize, doc_type: DocumentType) -> GenerationError {
        match self {
            BuildFailure::Retry(retry) => GenerationError::ExhaustedRetries {
                ordinal,
                doc_type,
                constraint: retry.constraint,
            },
            BuildFailure::Calc(e) => GenerationError::Defect {
                ordinal,
                doc_type,
                reason: e.to_string(),
            },
            BuildFailure::Paginate(e) => GenerationError::Defect {
                ordinal,
                doc_type,
                reason: e.to_string(),
            },
            BuildFailure::Validation(e) => GenerationError::Defect {
                ordinal,
                doc_type,
                reason: e.to_string(),
            },
        }
    }
}

impl From<RetryExhausted> for BuildFailure {
    fn from(value: RetryExhausted) -> Self {
        BuildFailure::Retry(value)
    }
}

impl From<CalcError> for BuildFailure {
    fn from(value: CalcError) -> Self {
        BuildFailure::Calc(value)
    }
}

impl From<PaginationError> for BuildFailure {
    fn from(value: PaginationError) -> Self {
        BuildFailure::Paginate(value)
    }
}

impl From<ValidationError> for BuildFailure {
    fn from(value: ValidationError) -> Self {
        BuildFailure::Validation(value)
    }
}
