/// Utility modules for error handling and input validation
pub mod error;
pub mod validation;

// Re-export commonly used types
pub use error::AnalysisError;
pub use validation::{validate_limits, validate_sample, validate_threshold};
