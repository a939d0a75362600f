use thiserror::Error;

/// Errors raised when a model value fails validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Value does not conform to the identifier's pattern.
    #[error("{field} rejects value {value:?}")]
    PatternMismatch {
        /// Name of the offending field or type.
        field: &'static str,
        /// The rejected value.
        value: String,
    },
    /// Numeric value falls outside its permitted range.
    #[error("{field} out of range: {value}")]
    OutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value, rendered as text.
        value: String,
    },
}
