use thiserror::Error;

/// Custom error type for analysis operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// Validation errors (e.g., empty sample, inverted limits, bad threshold)
    #[error("InvalidInput: {0}")]
    InvalidInput(String),
    /// Outlier method name outside `auto`, `iqr`, `z-score`
    #[error("UnsupportedMethod: {0}")]
    UnsupportedMethod(String),
    /// A skew transform is undefined for some value of the sample
    #[error("DomainError: {transform} {reason}")]
    DomainError { transform: String, reason: String },
}
