use std::fmt;

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::range::{range_for_method, Method, Range, RangeOptions};
use super::skew::{reduce_validated, DomainPolicy, Transform, TransformSkew};
use crate::stats::{self, Mode};
use crate::utils::{validate_sample, AnalysisError};

/// Parameters of a full evaluation
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationOptions {
    #[serde(flatten)]
    pub range: RangeOptions,
    /// Fail the evaluation when a skew transform is undefined for the sample
    /// instead of reporting it as out of domain
    pub strict_transforms: bool,
}

impl EvaluationOptions {
    fn domain_policy(&self) -> DomainPolicy {
        if self.strict_transforms {
            DomainPolicy::Strict
        } else {
            DomainPolicy::SkipInapplicable
        }
    }
}

/// The three distributions a plotting layer would draw
#[derive(Clone, Debug, PartialEq)]
pub struct EvaluatedSeries {
    pub raw: Array1<f64>,
    pub non_outliers: Array1<f64>,
    /// The sample after the least-skewed transform
    pub unskewed: Array1<f64>,
}

/// Descriptive summary of a sample
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EvaluationReport {
    pub method: Method,
    /// Mean of the non-outliers, NaN when the range excludes every value
    pub mean: f64,
    /// Median of the full sample
    pub median: f64,
    /// Mode of the full sample
    pub mode: Mode,
    /// Population standard deviation of the non-outliers, NaN when there are none
    pub std: f64,
    pub lower_limit: f64,
    pub upper_limit: f64,
    pub pct_below_lower: f64,
    pub pct_above_upper: f64,
    /// Skew of the full sample
    pub skew: Option<f64>,
    pub best_transform: Transform,
    pub boxcox_lambda: Option<f64>,
    pub transforms: Vec<TransformSkew>,
    #[serde(skip)]
    pub series: EvaluatedSeries,
}

/// One labeled value of [`EvaluationReport::metrics`]
#[derive(Clone, Debug, PartialEq)]
pub enum MetricValue {
    Method(Method),
    Number(f64),
    /// Undefined statistic or out-of-domain transform
    Missing,
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Method(method) => write!(f, "{}", method),
            Self::Number(value) => write!(f, "{:.4}", value),
            Self::Missing => write!(f, "n/a"),
        }
    }
}

impl EvaluationReport {
    pub fn range(&self) -> Range {
        Range {
            lower: self.lower_limit,
            upper: self.upper_limit,
        }
    }

    /// Flat labeled view, descriptive statistics first, then one skew per transform
    pub fn metrics(&self) -> Vec<(String, MetricValue)> {
        let mut metrics = vec![
            ("method".to_string(), MetricValue::Method(self.method)),
            ("mean".to_string(), MetricValue::Number(self.mean)),
            ("median".to_string(), MetricValue::Number(self.median)),
            ("mode".to_string(), MetricValue::Number(self.mode.value)),
            ("std".to_string(), MetricValue::Number(self.std)),
            ("lower limit".to_string(), MetricValue::Number(self.lower_limit)),
            ("upper limit".to_string(), MetricValue::Number(self.upper_limit)),
            (
                "pct below lower bound".to_string(),
                MetricValue::Number(self.pct_below_lower),
            ),
            (
                "pct above upper bound".to_string(),
                MetricValue::Number(self.pct_above_upper),
            ),
        ];

        metrics.extend(self.transforms.iter().map(|entry| {
            let value = entry
                .outcome
                .skew()
                .map_or(MetricValue::Missing, MetricValue::Number);
            (format!("{} skew", entry.transform), value)
        }));
        metrics
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, value) in self.metrics() {
            writeln!(f, "{:<24}{}", label, value)?;
        }
        write!(f, "{:<24}{}", "best transform", self.best_transform)?;
        if self.mode.is_degenerate() {
            write!(f, "\n{:<24}no repeated value", "mode note")?;
        }
        Ok(())
    }
}

/// Summarize a sample: acceptable range, descriptives and skew reduction
///
/// # Arguments
/// * `sample` - Non-empty, finite values
/// * `options` - Range options plus the transform domain policy
///
/// # Returns
/// * `Ok(EvaluationReport)` - Statistics and the series to plot
/// * `Err(AnalysisError)` - Invalid input, or a `DomainError` in strict mode
pub fn evaluate(
    sample: &[f64],
    options: &EvaluationOptions,
) -> Result<EvaluationReport, AnalysisError> {
    validate_sample(sample)?;
    options.range.validate()?;

    let skew = stats::skewness(sample);
    let method = options.range.method.resolve_with(|| skew);
    let range = range_for_method(sample, method, &options.range)?;

    let non_outliers: Vec<f64> = sample
        .iter()
        .copied()
        .filter(|&x| range.contains(x))
        .collect();

    if non_outliers.is_empty() {
        warn!(
            lower = range.lower,
            upper = range.upper,
            "range excludes every value; mean and std are undefined"
        );
    }

    let total = sample.len() as f64;
    let below = sample.iter().filter(|&&x| x < range.lower).count();
    let above = sample.iter().filter(|&&x| x > range.upper).count();

    let mode = stats::mode(sample).ok_or_else(|| {
        AnalysisError::InvalidInput("sample cannot be empty".to_string())
    })?;
    if mode.is_degenerate() {
        warn!(
            distinct = mode.tied,
            "no value repeats; mode is the mean of all distinct values"
        );
    }

    let reduction = reduce_validated(sample, options.domain_policy(), skew)?;
    debug!(
        %method,
        kept = non_outliers.len(),
        below,
        above,
        best = %reduction.best,
        "evaluated sample"
    );

    Ok(EvaluationReport {
        method,
        mean: stats::mean(&non_outliers),
        median: stats::median(sample),
        mode,
        std: stats::population_std(&non_outliers),
        lower_limit: range.lower,
        upper_limit: range.upper,
        pct_below_lower: below as f64 / total,
        pct_above_upper: above as f64 / total,
        skew,
        best_transform: reduction.best,
        boxcox_lambda: reduction.boxcox_lambda,
        transforms: reduction.summary,
        series: EvaluatedSeries {
            raw: Array1::from(sample.to_vec()),
            non_outliers: Array1::from(non_outliers),
            unskewed: reduction.transformed,
        },
    })
}
