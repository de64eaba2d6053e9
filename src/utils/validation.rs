use super::error::AnalysisError;

/// Validate that a sample is non-empty and holds only finite values
///
/// # Arguments
/// * `sample` - The values to validate
///
/// # Returns
/// * `Ok(())` if valid
/// * `Err(AnalysisError::InvalidInput)` if empty or containing NaN/Inf
pub fn validate_sample(sample: &[f64]) -> Result<(), AnalysisError> {
    if sample.is_empty() {
        return Err(AnalysisError::InvalidInput(
            "sample cannot be empty".to_string(),
        ));
    }

    if let Some(position) = sample.iter().position(|v| !v.is_finite()) {
        return Err(AnalysisError::InvalidInput(format!(
            "sample contains NaN or Inf at index {}",
            position
        )));
    }

    Ok(())
}

/// Validate an explicit outlier threshold is finite and positive
pub fn validate_threshold(threshold: f64) -> Result<(), AnalysisError> {
    if !threshold.is_finite() || threshold <= 0.0 {
        return Err(AnalysisError::InvalidInput(format!(
            "threshold must be a positive number, got {}",
            threshold
        )));
    }
    Ok(())
}

/// Validate optional domain limits are finite and ordered
pub fn validate_limits(lower: Option<f64>, upper: Option<f64>) -> Result<(), AnalysisError> {
    for limit in [lower, upper].into_iter().flatten() {
        if !limit.is_finite() {
            return Err(AnalysisError::InvalidInput(format!(
                "limits must be finite, got {}",
                limit
            )));
        }
    }

    if let (Some(lower), Some(upper)) = (lower, upper) {
        if lower > upper {
            return Err(AnalysisError::InvalidInput(format!(
                "lower limit {} exceeds upper limit {}",
                lower, upper
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_sample_valid() {
        assert!(validate_sample(&[1.0]).is_ok());
        assert!(validate_sample(&[-3.0, 0.0, 2.5]).is_ok());
    }

    #[test]
    fn test_validate_sample_empty() {
        let err = validate_sample(&[]).unwrap_err();
        assert_eq!(err.to_string(), "InvalidInput: sample cannot be empty");
    }

    #[test]
    fn test_validate_sample_non_finite() {
        let err = validate_sample(&[1.0, f64::NAN]).unwrap_err();
        assert!(err.to_string().contains("index 1"));
        assert!(validate_sample(&[f64::INFINITY]).is_err());
        assert!(validate_sample(&[f64::NEG_INFINITY, 0.0]).is_err());
    }

    #[test]
    fn test_validate_threshold() {
        assert!(validate_threshold(0.5).is_ok());
        assert!(validate_threshold(3.0).is_ok());
        assert!(validate_threshold(0.0).is_err());
        assert!(validate_threshold(-1.5).is_err());
        assert!(validate_threshold(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_threshold_error_message() {
        let err = validate_threshold(-2.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "InvalidInput: threshold must be a positive number, got -2"
        );
    }

    #[test]
    fn test_validate_limits() {
        assert!(validate_limits(None, None).is_ok());
        assert!(validate_limits(Some(0.0), None).is_ok());
        assert!(validate_limits(Some(0.0), Some(0.0)).is_ok());
        assert!(validate_limits(Some(0.0), Some(1.0)).is_ok());
        assert!(validate_limits(Some(1.0), Some(0.0)).is_err());
        assert!(validate_limits(Some(f64::NAN), None).is_err());
    }
}
