/// Outlier and skew evaluation core
pub mod evaluate;
pub mod range;
pub mod skew;

// Re-export commonly used items
pub use evaluate::{evaluate, EvaluatedSeries, EvaluationOptions, EvaluationReport, MetricValue};
pub use range::{estimate_range, Method, MethodChoice, Range, RangeOptions};
pub use skew::{
    boxcox, boxcox_lambda, reduce_skew, reduce_skew_with, DomainPolicy, SkewOutcome,
    SkewReduction, Transform, TransformSkew,
};
