use std::fmt;

use ndarray::Array1;
use serde::Serialize;
use tracing::{debug, warn};

use crate::stats;
use crate::utils::{validate_sample, AnalysisError};

/// Interval of the coarse Box-Cox exponent scan
const LAMBDA_BOUND: f64 = 5.0;
/// Grid step of the coarse lambda scan
const LAMBDA_GRID_STEP: f64 = 0.05;
/// Interval width at which the golden-section refinement stops
const LAMBDA_TOLERANCE: f64 = 1e-9;
/// Doublings of the step when the maximum lies past the scanned interval
const LAMBDA_MAX_WIDENINGS: usize = 64;

/// Monotonic transform tried when reducing skew
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Transform {
    /// Identity
    Raw,
    /// ln(1 + x)
    Log1p,
    /// Square root
    Sqrt,
    /// Box-Cox power transform of x + 1 with a fitted exponent
    BoxCox,
}

impl Transform {
    /// Evaluation order; earlier entries win ties
    pub const ALL: [Transform; 4] = [Self::Raw, Self::Log1p, Self::Sqrt, Self::BoxCox];

    pub fn name(self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Log1p => "log1p",
            Self::Sqrt => "sqrt",
            Self::BoxCox => "boxcox",
        }
    }

    /// Check every value lies in the transform's domain
    pub fn check_domain(self, sample: &[f64]) -> Result<(), AnalysisError> {
        let (violation, requirement) = match self {
            Self::Raw => return Ok(()),
            Self::Log1p | Self::BoxCox => (sample.iter().find(|&&x| 1.0 + x <= 0.0), "x + 1 > 0"),
            Self::Sqrt => (sample.iter().find(|&&x| x < 0.0), "x >= 0"),
        };

        match violation {
            Some(x) => Err(AnalysisError::DomainError {
                transform: self.name().to_string(),
                reason: format!("requires {}, got {}", requirement, x),
            }),
            None => Ok(()),
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What to do when a transform is undefined for the sample
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DomainPolicy {
    /// Fail the whole reduction with `DomainError`
    #[default]
    Strict,
    /// Record the transform as out of domain and leave it out of selection
    SkipInapplicable,
}

/// Skew achieved by one transform
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SkewOutcome {
    /// `skew` is `None` when the sample is too short to define it
    Measured { skew: Option<f64> },
    OutOfDomain { reason: String },
}

impl SkewOutcome {
    pub fn skew(&self) -> Option<f64> {
        match self {
            Self::Measured { skew } => *skew,
            Self::OutOfDomain { .. } => None,
        }
    }
}

/// One row of the skew summary
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TransformSkew {
    pub transform: Transform,
    #[serde(flatten)]
    pub outcome: SkewOutcome,
}

/// Result of trying every transform on a sample
#[derive(Clone, Debug, PartialEq)]
pub struct SkewReduction {
    /// Transform with the smallest absolute skew
    pub best: Transform,
    /// The sample after applying `best`
    pub transformed: Array1<f64>,
    /// Fitted Box-Cox exponent, when Box-Cox was applicable
    pub boxcox_lambda: Option<f64>,
    /// One entry per transform in [`Transform::ALL`] order
    pub summary: Vec<TransformSkew>,
}

impl SkewReduction {
    pub fn skew_of(&self, transform: Transform) -> Option<f64> {
        self.summary
            .iter()
            .find(|entry| entry.transform == transform)
            .and_then(|entry| entry.outcome.skew())
    }

    pub fn best_skew(&self) -> Option<f64> {
        self.skew_of(self.best)
    }
}

/// Try every transform and keep the one with the least absolute skew
///
/// Fails with `DomainError` if any transform is undefined for the sample.
pub fn reduce_skew(sample: &[f64]) -> Result<SkewReduction, AnalysisError> {
    reduce_skew_with(sample, DomainPolicy::Strict)
}

/// [`reduce_skew`] with an explicit policy for out-of-domain transforms
pub fn reduce_skew_with(
    sample: &[f64],
    policy: DomainPolicy,
) -> Result<SkewReduction, AnalysisError> {
    validate_sample(sample)?;
    reduce_validated(sample, policy, stats::skewness(sample))
}

/// Reduction over a validated sample whose raw skew is already known
pub(crate) fn reduce_validated(
    sample: &[f64],
    policy: DomainPolicy,
    raw_skew: Option<f64>,
) -> Result<SkewReduction, AnalysisError> {
    let mut summary = Vec::with_capacity(Transform::ALL.len());
    let mut candidates: Vec<(Transform, Array1<f64>, Option<f64>)> = Vec::new();
    let mut boxcox_lambda = None;

    for transform in Transform::ALL {
        if let Err(err) = transform.check_domain(sample) {
            match policy {
                DomainPolicy::Strict => return Err(err),
                DomainPolicy::SkipInapplicable => {
                    warn!(%transform, error = %err, "skipping transform outside its domain");
                    summary.push(TransformSkew {
                        transform,
                        outcome: SkewOutcome::OutOfDomain {
                            reason: err.to_string(),
                        },
                    });
                    continue;
                }
            }
        }

        let values: Array1<f64> = match transform {
            Transform::Raw => Array1::from(sample.to_vec()),
            Transform::Log1p => sample.iter().map(|x| x.ln_1p()).collect(),
            Transform::Sqrt => sample.iter().map(|x| x.sqrt()).collect(),
            Transform::BoxCox => {
                let shifted: Vec<f64> = sample.iter().map(|x| x + 1.0).collect();
                let lambda = boxcox_lambda_of(&shifted);
                boxcox_lambda = Some(lambda);
                boxcox(&shifted, lambda)
            }
        };

        let skew = match transform {
            Transform::Raw => raw_skew,
            _ => values.as_slice().and_then(stats::skewness),
        };

        summary.push(TransformSkew {
            transform,
            outcome: SkewOutcome::Measured { skew },
        });
        candidates.push((transform, values, skew));
    }

    let (best, transformed) = select_least_skewed(candidates);
    debug!(%best, ?boxcox_lambda, "selected least skewed transform");

    Ok(SkewReduction {
        best,
        transformed,
        boxcox_lambda,
        summary,
    })
}

/// First candidate with the smallest |skew|; defined skews beat undefined ones
fn select_least_skewed(
    candidates: Vec<(Transform, Array1<f64>, Option<f64>)>,
) -> (Transform, Array1<f64>) {
    let mut best: Option<(Transform, Array1<f64>, Option<f64>)> = None;

    for candidate in candidates {
        let better = match (&best, candidate.2) {
            (None, _) => true,
            (Some((_, _, None)), Some(_)) => true,
            (Some((_, _, Some(current))), Some(skew)) => skew.abs() < current.abs(),
            _ => false,
        };
        if better {
            best = Some(candidate);
        }
    }

    // Raw is always a candidate
    match best {
        Some((transform, values, _)) => (transform, values),
        None => (Transform::Raw, Array1::zeros(0)),
    }
}

/// Box-Cox transform of strictly positive values with exponent `lambda`
pub fn boxcox(values: &[f64], lambda: f64) -> Array1<f64> {
    if lambda == 0.0 {
        return values.iter().map(|x| x.ln()).collect();
    }
    values
        .iter()
        .map(|x| (lambda * x.ln()).exp_m1() / lambda)
        .collect()
}

/// Maximum likelihood Box-Cox exponent for strictly positive values
///
/// Fails with `DomainError` when a value is not strictly positive.
pub fn boxcox_lambda(values: &[f64]) -> Result<f64, AnalysisError> {
    validate_sample(values)?;
    if let Some(x) = values.iter().find(|&&x| x <= 0.0) {
        return Err(AnalysisError::DomainError {
            transform: Transform::BoxCox.name().to_string(),
            reason: format!("requires x > 0, got {}", x),
        });
    }
    Ok(boxcox_lambda_of(values))
}

fn boxcox_lambda_of(values: &[f64]) -> f64 {
    let first = values[0];
    if values.iter().all(|&x| x == first) {
        // Likelihood is flat for constant data
        return 1.0;
    }

    let log_sum: f64 = values.iter().map(|x| x.ln()).sum();
    let llf = |lambda: f64| boxcox_llf(values, log_sum, lambda);

    let steps = (2.0 * LAMBDA_BOUND / LAMBDA_GRID_STEP).round() as usize;
    let grid = |i: usize| -LAMBDA_BOUND + i as f64 * LAMBDA_GRID_STEP;
    let mut best_index = 0;
    let mut best_llf = f64::NEG_INFINITY;
    for i in 0..=steps {
        let value = llf(grid(i));
        if value > best_llf {
            best_llf = value;
            best_index = i;
        }
    }

    let (lo, hi) = if best_index == 0 {
        widen_bracket(&llf, grid(0), best_llf, grid(1), -1.0)
    } else if best_index == steps {
        widen_bracket(&llf, grid(steps), best_llf, grid(steps - 1), 1.0)
    } else {
        (grid(best_index - 1), grid(best_index + 1))
    };
    let lambda = golden_section_max(llf, lo, hi);
    debug!(lambda, "fitted Box-Cox exponent");
    lambda
}

/// Walk past the edge of the scan with doubling steps until the likelihood drops
///
/// `peak` is the best point seen so far and `inner` its neighbour on the
/// scanned side. Returns an interval holding the maximum.
fn widen_bracket(
    llf: &impl Fn(f64) -> f64,
    mut peak: f64,
    mut peak_llf: f64,
    mut inner: f64,
    direction: f64,
) -> (f64, f64) {
    let mut step = LAMBDA_GRID_STEP;
    for _ in 0..LAMBDA_MAX_WIDENINGS {
        step *= 2.0;
        let outer = peak + direction * step;
        let value = llf(outer);
        // An overflowed transform gives -inf and stops the walk
        if value.is_nan() || value <= peak_llf {
            return (inner.min(outer), inner.max(outer));
        }
        inner = peak;
        peak = outer;
        peak_llf = value;
    }
    warn!(lambda = peak, "Box-Cox likelihood still rising, keeping the last bracket");
    (inner.min(peak), inner.max(peak))
}

/// Box-Cox log-likelihood up to a constant
fn boxcox_llf(values: &[f64], log_sum: f64, lambda: f64) -> f64 {
    let transformed = boxcox(values, lambda);
    let variance = transformed.var(0.0);
    if !variance.is_finite() || variance <= 0.0 {
        return f64::NEG_INFINITY;
    }
    let n = values.len() as f64;
    (lambda - 1.0) * log_sum - n / 2.0 * variance.ln()
}

fn golden_section_max(f: impl Fn(f64) -> f64, mut lo: f64, mut hi: f64) -> f64 {
    let ratio = (5f64.sqrt() - 1.0) / 2.0;
    let mut a = hi - ratio * (hi - lo);
    let mut b = lo + ratio * (hi - lo);
    let mut fa = f(a);
    let mut fb = f(b);

    while hi - lo > LAMBDA_TOLERANCE {
        if fa >= fb {
            hi = b;
            b = a;
            fb = fa;
            a = hi - ratio * (hi - lo);
            fa = f(a);
        } else {
            lo = a;
            a = b;
            fa = fb;
            b = lo + ratio * (hi - lo);
            fb = f(b);
        }
    }
    (lo + hi) / 2.0
}
