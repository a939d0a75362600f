use docforge_model::DocumentType;
use thiserror::Error;

/// Errors fatal to a whole batch, raised before any generation begins.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The batch configuration was rejected up front.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Errors fatal to a single document's fabrication.
///
/// Caught at the batch level: the failing document is logged with its
/// ordinal and type and excluded from the output set; siblings continue.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// A final invariant re-check failed; a defect in an upstream stage.
    #[error("defect in {doc_type} #{ordinal}: {reason}")]
    Defect {
        /// Ordinal position of the document in its batch.
        ordinal: usize,
        /// Type of the failing document.
        doc_type: DocumentType,
        /// What the re-check found.
        reason: String,
    },
    /// A document-local constraint could not be satisfied within the
    /// bounded retry budget.
    #[error("{doc_type} #{ordinal}: retries exhausted satisfying {constraint}")]
    ExhaustedRetries {
        /// Ordinal position of the document in its batch.
        ordinal: usize,
        /// Type of the failing document.
        doc_type: DocumentType,
        /// The constraint that could not be met.
        constraint: &'static str,
    },
}

impl GenerationError {
    /// Ordinal of the document this error belongs to.
    pub fn ordinal(&self) -> usize {
        match self {
            GenerationError::Defect { ordinal, .. } => *ordinal,
            GenerationError::ExhaustedRetries { ordinal, .. } => *ordinal,
        }
    }

    /// Type of the document this error belongs to.
    pub fn doc_type(&self) -> DocumentType {
        match self {
            GenerationError::Defect { doc_type, .. } => *doc_type,
            GenerationError::ExhaustedRetries { doc_type, .. } => *doc_type,
        }
    }
}
