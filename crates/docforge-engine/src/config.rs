use chrono::NaiveDate;
use docforge_model::{Currency, DocumentType};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::EngineError;

/// Default per-page entry capacity ("transactions per page" for statements).
pub const DEFAULT_PAGE_CAPACITY: usize = 50;

/// Inclusive bounds on how many entries a generated document body holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryBounds {
    /// Minimum entry count.
    pub min: usize,
    /// Maximum entry count.
    pub max: usize,
}

impl EntryBounds {
    /// Builds bounds; `min` must not exceed `max` (checked at config
    /// validation, not here).
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }
}

/// Read-only configuration for one generation batch.
///
/// Shared by every worker; validated once, before any document is
/// generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Number of invoices requested.
    pub invoices: usize,
    /// Number of receipts requested.
    pub receipts: usize,
    /// Number of bank statements requested.
    pub statements: usize,
    /// Per-page entry capacity; must be positive.
    pub page_capacity: usize,
    /// Batch seed; `None` draws one from entropy (reported for replay).
    pub seed: Option<u64>,
    /// Currency all documents are denominated in.
    pub currency: Currency,
    /// Discrete set of tax rates to draw from, each within `[0, 1]`.
    pub tax_rates: Vec<Decimal>,
    /// Line item count bounds for invoices.
    pub invoice_items: EntryBounds,
    /// Line item count bounds for receipts.
    pub receipt_items: EntryBounds,
    /// Transaction count bounds for statements.
    pub statement_transactions: EntryBounds,
    /// Anchor for all drawn dates ("today" from the fabricator's view).
    /// Part of the configuration so replays reproduce dates exactly.
    pub reference_date: NaiveDate,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            invoices: 0,
            receipts: 0,
            statements: 0,
            page_capacity: DEFAULT_PAGE_CAPACITY,
            seed: None,
            currency: Currency::Gbp,
            // UK VAT bands: zero-rated, reduced, standard.
            tax_rates: vec![
                Decimal::ZERO,
                Decimal::new(5, 2),
                Decimal::new(20, 2),
            ],
            invoice_items: EntryBounds::new(1, 8),
            receipt_items: EntryBounds::new(1, 12),
            statement_transactions: EntryBounds::new(10, 300),
            reference_date: NaiveDate::from_ymd_opt(2025, 1, 1)
                .expect("valid constant date"),
        }
    }
}

impl BatchConfig {
    /// Total number of documents requested across all types.
    pub fn total_documents(&self) -> usize {
        self.invoices + self.receipts + self.statements
    }

    /// Requested count for one document type.
    pub fn count_for(&self, doc_type: DocumentType) -> usize {
        match doc_type {
            DocumentType::Invoice => self.invoices,
            DocumentType::Receipt => self.receipts,
            DocumentType::BankStatement => self.statements,
        }
    }

    /// Entry-count bounds for one document type.
    pub fn bounds_for(&self, doc_type: DocumentType) -> EntryBounds {
        match doc_type {
            DocumentType::Invoice => self.invoice_items,
            DocumentType::Receipt => self.receipt_items,
            DocumentType::BankStatement => self.statement_transactions,
        }
    }

    /// Rejects configurations that would be fatal to the whole batch.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.total_documents() == 0 {
            return Err(EngineError::InvalidConfiguration(
                "zero documents requested across all types".to_string(),
            ));
        }
        if self.page_capacity == 0 {
            return Err(EngineError::InvalidConfiguration(
                "page capacity must be positive".to_string(),
            ));
        }
        if self.tax_rates.is_empty() {
            return Err(EngineError::InvalidConfiguration(
                "tax rate set is empty".to_string(),
            ));
        }
        if let Some(rate) = self
            .tax_rates
            .iter()
            .find(|rate| **rate < Decimal::ZERO || **rate > Decimal::ONE)
        {
            return Err(EngineError::InvalidConfiguration(format!(
                "tax rate {rate} outside [0, 1]"
            )));
        }
        for (name, bounds) in [
            ("invoice_items", self.invoice_items),
            ("receipt_items", self.receipt_items),
            ("statement_transactions", self.statement_transactions),
        ] {
            if bounds.min > bounds.max {
                return Err(EngineError::InvalidConfiguration(format!(
                    "{name} bounds are inverted: {}..={}",
                    bounds.min, bounds.max
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_needs_a_document_count() {
        assert!(BatchConfig::default().validate().is_err());
        let config = BatchConfig {
            invoices: 1,
            ..BatchConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_capacity_is_rejected_before_generation() {
        let config = BatchConfig {
            invoices: 1,
            page_capacity: 0,
            ..BatchConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(EngineError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn out_of_range_tax_rate_is_rejected() {
        let config = BatchConfig {
            receipts: 1,
            tax_rates: vec![Decimal::new(101, 2)],
            ..BatchConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let config = BatchConfig {
            statements: 1,
            statement_transactions: EntryBounds::new(20, 10),
            ..BatchConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
