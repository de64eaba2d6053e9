//! Descriptive statistics over a single numeric sample
//!
//! Callers are expected to validate samples first (see
//! [`crate::utils::validate_sample`]); the functions here assume a non-empty,
//! finite slice unless stated otherwise.

use ndarray::ArrayView1;
use serde::Serialize;

/// Arithmetic mean
pub fn mean(values: &[f64]) -> f64 {
    ArrayView1::from(values).mean().unwrap_or(f64::NAN)
}

/// Population standard deviation (divides by N)
pub fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    ArrayView1::from(values).std(0.0)
}

/// Copy and sort values ascending
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

/// Percentile `p` in [0, 100] of already sorted values
///
/// Linear interpolation between the two closest ranks, position
/// `p / 100 * (n - 1)`.
pub fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }

    let pos = (p / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let idx = pos.floor() as usize;
    let frac = pos - idx as f64;
    let a = sorted[idx];
    let b = sorted[(idx + 1).min(sorted.len() - 1)];
    a + (b - a) * frac
}

/// Percentile `p` in [0, 100] with linear interpolation
pub fn percentile(values: &[f64], p: f64) -> f64 {
    percentile_sorted(&sorted(values), p)
}

/// 50th percentile
pub fn median(values: &[f64]) -> f64 {
    percentile(values, 50.0)
}

/// Most frequent value of a sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Mode {
    /// Mean of every value sharing the highest frequency
    pub value: f64,
    /// How often each of those values occurs
    pub frequency: usize,
    /// Number of distinct values sharing that frequency
    pub tied: usize,
}

impl Mode {
    /// No value repeats, so `value` is just the mean of the distinct values
    pub fn is_degenerate(&self) -> bool {
        self.frequency <= 1
    }
}

/// Mode of a sample; multiple modes are averaged
pub fn mode(values: &[f64]) -> Option<Mode> {
    if values.is_empty() {
        return None;
    }

    let sorted = sorted(values);
    let mut frequency = 0;
    let mut modes: Vec<f64> = Vec::new();

    let mut start = 0;
    while start < sorted.len() {
        let value = sorted[start];
        let run = sorted[start..].iter().take_while(|&&v| v == value).count();
        if run > frequency {
            frequency = run;
            modes.clear();
            modes.push(value);
        } else if run == frequency {
            modes.push(value);
        }
        start += run;
    }

    Some(Mode {
        value: mean(&modes),
        frequency,
        tied: modes.len(),
    })
}

/// Sample skewness (adjusted Fisher-Pearson coefficient G1)
///
/// Returns `None` for fewer than three values, where the bias correction is
/// undefined, and `0.0` for a constant sample.
pub fn skewness(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 3 {
        return None;
    }

    let first = values[0];
    if values.iter().all(|&v| v == first) {
        return Some(0.0);
    }

    let mean = mean(values);
    let (m2, m3) = values.iter().fold((0.0, 0.0), |(m2, m3), &v| {
        let d = v - mean;
        (m2 + d * d, m3 + d * d * d)
    });
    let n_f = n as f64;
    let m2 = m2 / n_f;
    let m3 = m3 / n_f;

    if m2 <= 0.0 {
        return Some(0.0);
    }

    let g1 = m3 / m2.powf(1.5);
    Some((n_f * (n_f - 1.0)).sqrt() / (n_f - 2.0) * g1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_std() {
        let values = [-3.0, -2.0, -1.0, 0.0, 1.0, 2.0, 3.0];
        assert!((mean(&values) - 0.0).abs() < 1e-10);
        assert!((population_std(&values) - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_population_std_single_value() {
        assert_eq!(population_std(&[4.0]), 0.0);
    }

    #[test]
    fn test_percentile_interpolates() {
        let values = [100.0, 1.0, 5.0, 3.0, 2.0, 4.0];
        assert!((percentile(&values, 25.0) - 2.25).abs() < 1e-10);
        assert!((percentile(&values, 75.0) - 4.75).abs() < 1e-10);
        assert_eq!(percentile(&values, 0.0), 1.0);
        assert_eq!(percentile(&values, 100.0), 100.0);
    }

    #[test]
    fn test_median() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&[1.0, 2.0, 3.0, 4.0]), 2.5);
        assert_eq!(median(&[7.0]), 7.0);
    }

    #[test]
    fn test_mode_single() {
        let m = mode(&[1.0, 2.0, 2.0, 3.0]).unwrap();
        assert_eq!(m.value, 2.0);
        assert_eq!(m.frequency, 2);
        assert_eq!(m.tied, 1);
        assert!(!m.is_degenerate());
    }

    #[test]
    fn test_mode_ties_are_averaged() {
        let m = mode(&[1.0, 1.0, 3.0, 3.0, 5.0]).unwrap();
        assert_eq!(m.value, 2.0);
        assert_eq!(m.frequency, 2);
        assert_eq!(m.tied, 2);
    }

    #[test]
    fn test_mode_continuous_is_degenerate() {
        let m = mode(&[0.5, 1.5, 2.5]).unwrap();
        assert!(m.is_degenerate());
        assert_eq!(m.tied, 3);
        assert!((m.value - 1.5).abs() < 1e-10);
    }

    #[test]
    fn test_mode_empty() {
        assert!(mode(&[]).is_none());
    }

    #[test]
    fn test_skewness_symmetric() {
        let skew = skewness(&[-3.0, -2.0, -1.0, 0.0, 1.0, 2.0, 3.0]).unwrap();
        assert!(skew.abs() < 1e-10);
    }

    #[test]
    fn test_skewness_right_tail() {
        // m2 = m3 = 3/4, g1 = (3/4)^-0.5, G1 = sqrt(12)/2 * g1 = 2
        let skew = skewness(&[0.0, 0.0, 0.0, 2.0]).unwrap();
        assert!((skew - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_skewness_sign_flips_with_mirror() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 100.0];
        let mirrored: Vec<f64> = values.iter().map(|v| -v).collect();
        let a = skewness(&values).unwrap();
        let b = skewness(&mirrored).unwrap();
        assert!((a + b).abs() < 1e-10);
    }

    #[test]
    fn test_skewness_constant_and_short() {
        assert_eq!(skewness(&[0.1, 0.1, 0.1]), Some(0.0));
        assert_eq!(skewness(&[1.0, 2.0]), None);
    }
}
