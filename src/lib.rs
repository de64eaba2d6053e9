//! Event Insight - data preparation helpers for event-record analysis
//!
//! Outlier and skew evaluation of numeric columns, CAMEO reference code
//! tables, and publisher/headline heuristics for news URLs.

pub mod config;
pub mod dataset;
pub mod engine;
pub mod insight_core;
pub mod reference;
pub mod stats;
pub mod urls;
pub mod utils;

pub use config::EvaluationConfig;
pub use dataset::{DataPoint, Dataset};
pub use engine::{ColumnEvaluation, InsightEngine};
pub use insight_core::{
    estimate_range, evaluate, reduce_skew, EvaluationOptions, EvaluationReport, Method,
    MethodChoice, Range, RangeOptions, SkewReduction, Transform,
};
pub use reference::{init_reference_tables, reference_tables, CodeTable, ReferenceTables};
pub use urls::{extract_headline, extract_host};
pub use utils::AnalysisError;

/// Result type used throughout the library
pub type Result<T> = anyhow::Result<T>;
