use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::stats;
use crate::utils::{validate_limits, validate_sample, validate_threshold, AnalysisError};

/// Skew magnitude above which the quantile rule replaces the normal-theory rule
pub const AUTO_SKEW_CUTOFF: f64 = 1.0;

/// Concrete outlier method
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Method {
    /// Interquartile range fences around Q1 and Q3
    #[serde(rename = "iqr")]
    Iqr,
    /// Standard deviations around the mean
    #[serde(rename = "z-score")]
    ZScore,
}

impl Method {
    /// Multiplier used when the caller leaves the threshold on auto
    pub fn default_threshold(self) -> f64 {
        match self {
            Self::Iqr => 1.5,
            Self::ZScore => 3.0,
        }
    }

    /// Pick a method from the sample skew
    ///
    /// Near-symmetric samples (|skew| <= 1) use the z-score rule; skewed or
    /// too-short samples (undefined skew) use IQR.
    pub fn for_skew(skew: Option<f64>) -> Self {
        match skew {
            Some(s) if s.abs() <= AUTO_SKEW_CUTOFF => Self::ZScore,
            _ => Self::Iqr,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iqr => write!(f, "iqr"),
            Self::ZScore => write!(f, "z-score"),
        }
    }
}

/// Outlier method as requested by a caller
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum MethodChoice {
    /// Choose from the sample skew
    #[default]
    Auto,
    Iqr,
    ZScore,
}

impl MethodChoice {
    /// Resolve to a concrete method, computing skew only when needed
    pub fn resolve_with(self, skew: impl FnOnce() -> Option<f64>) -> Method {
        match self {
            Self::Auto => Method::for_skew(skew()),
            Self::Iqr => Method::Iqr,
            Self::ZScore => Method::ZScore,
        }
    }
}

impl FromStr for MethodChoice {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "iqr" => Ok(Self::Iqr),
            "z-score" | "zscore" | "z_score" => Ok(Self::ZScore),
            other => Err(AnalysisError::UnsupportedMethod(format!(
                "'{}' (expected one of auto, iqr, z-score)",
                other
            ))),
        }
    }
}

impl TryFrom<String> for MethodChoice {
    type Error = AnalysisError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MethodChoice> for String {
    fn from(choice: MethodChoice) -> Self {
        choice.to_string()
    }
}

impl From<Method> for MethodChoice {
    fn from(method: Method) -> Self {
        match method {
            Method::Iqr => Self::Iqr,
            Method::ZScore => Self::ZScore,
        }
    }
}

impl fmt::Display for MethodChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Iqr => write!(f, "iqr"),
            Self::ZScore => write!(f, "z-score"),
        }
    }
}

/// Inclusive bounds of acceptable (non-outlier) values
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Range {
    pub lower: f64,
    pub upper: f64,
}

impl Range {
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}

/// Parameters of the range estimate
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeOptions {
    pub method: MethodChoice,
    /// `None` selects the method's default multiplier
    pub threshold: Option<f64>,
    /// Smallest value the metric can legitimately take (e.g. 0 for ages)
    pub lower_limit: Option<f64>,
    /// Largest value the metric can legitimately take (e.g. 1 for rates)
    pub upper_limit: Option<f64>,
}

impl RangeOptions {
    pub fn with_method(mut self, method: MethodChoice) -> Self {
        self.method = method;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn with_limits(mut self, lower: Option<f64>, upper: Option<f64>) -> Self {
        self.lower_limit = lower;
        self.upper_limit = upper;
        self
    }

    /// Check threshold and limits without touching a sample
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if let Some(threshold) = self.threshold {
            validate_threshold(threshold)?;
        }
        validate_limits(self.lower_limit, self.upper_limit)
    }
}

/// Compute the acceptable non-outlier range of a sample
///
/// # Arguments
/// * `sample` - Non-empty, finite values
/// * `options` - Method, threshold and optional domain limits
///
/// # Returns
/// * `Ok(Range)` - Bounds after clamping to the domain limits
/// * `Err(AnalysisError::InvalidInput)` - Empty sample, bad threshold,
///   inverted limits, or a sample lying entirely outside the limits
pub fn estimate_range(sample: &[f64], options: &RangeOptions) -> Result<Range, AnalysisError> {
    validate_sample(sample)?;
    options.validate()?;

    let method = options
        .method
        .resolve_with(|| stats::skewness(sample));
    range_for_method(sample, method, options)
}

/// Range for an already resolved method; expects validated inputs
pub(crate) fn range_for_method(
    sample: &[f64],
    method: Method,
    options: &RangeOptions,
) -> Result<Range, AnalysisError> {
    let threshold = options
        .threshold
        .unwrap_or_else(|| method.default_threshold());

    let (lower, upper) = match method {
        Method::Iqr => {
            let sorted = stats::sorted(sample);
            let q1 = stats::percentile_sorted(&sorted, 25.0);
            let q3 = stats::percentile_sorted(&sorted, 75.0);
            let span = (q3 - q1) * threshold;
            (q1 - span, q3 + span)
        }
        Method::ZScore => {
            let mean = stats::mean(sample);
            let spread = threshold * stats::population_std(sample);
            (mean - spread, mean + spread)
        }
    };
    debug!(%method, threshold, lower, upper, "estimated acceptable range");

    clamp(Range { lower, upper }, options.lower_limit, options.upper_limit)
}

/// Narrow a range to domain limits; never widens it
fn clamp(range: Range, lower_limit: Option<f64>, upper_limit: Option<f64>) -> Result<Range, AnalysisError> {
    let lower = match lower_limit {
        Some(limit) if range.lower < limit => limit,
        _ => range.lower,
    };
    let upper = match upper_limit {
        Some(limit) if range.upper > limit => limit,
        _ => range.upper,
    };

    if lower > upper {
        return Err(AnalysisError::InvalidInput(format!(
            "range [{}, {}] lies outside limits [{}, {}]",
            range.lower,
            range.upper,
            lower_limit.map_or("-inf".to_string(), |l| l.to_string()),
            upper_limit.map_or("inf".to_string(), |u| u.to_string()),
        )));
    }
    Ok(Range { lower, upper })
}
