use event_insight::{
    estimate_range, evaluate, reduce_skew, stats, AnalysisError, Dataset, EvaluationOptions,
    InsightEngine, Method, MethodChoice, RangeOptions, Transform,
};

fn lognormal_like() -> Vec<f64> {
    (0..40).map(|i| (i as f64 / 8.0).exp()).collect()
}

#[test]
fn auto_method_follows_skew() {
    let samples: Vec<Vec<f64>> = vec![
        vec![-3.0, -2.0, -1.0, 0.0, 1.0, 2.0, 3.0],
        vec![1.0, 2.0, 3.0, 4.0, 5.0, 100.0],
        lognormal_like(),
        (0..25).map(|i| i as f64 * 0.5).collect(),
    ];

    for sample in samples {
        let skew = stats::skewness(&sample).unwrap();
        let expected = if skew.abs() <= 1.0 { Method::ZScore } else { Method::Iqr };

        let report = evaluate(&sample, &EvaluationOptions::default()).unwrap();
        assert_eq!(report.method, expected, "skew = {skew}");

        let auto = estimate_range(&sample, &RangeOptions::default()).unwrap();
        let explicit = estimate_range(
            &sample,
            &RangeOptions::default().with_method(MethodChoice::from(expected)),
        )
        .unwrap();
        assert_eq!(auto, explicit);
    }
}

#[test]
fn clamped_bounds_are_exact_limits() {
    let options = RangeOptions::default().with_limits(Some(0.0), Some(1.0));
    let range = estimate_range(&[1.0, 2.0, 3.0], &options).unwrap();
    assert_eq!((range.lower, range.upper), (0.0, 1.0));
}

#[test]
fn skew_reduction_on_right_skewed_data() {
    let sample = lognormal_like();
    let reduction = reduce_skew(&sample).unwrap();

    assert_eq!(reduction.skew_of(Transform::Raw), stats::skewness(&sample));
    assert_ne!(reduction.best, Transform::Raw);
    assert!(reduction.best_skew().unwrap().abs() < stats::skewness(&sample).unwrap().abs());
    // log(1 + e^(i/8)) is close to linear, Box-Cox should land near zero
    assert!(reduction.boxcox_lambda.unwrap().abs() < 1.0);
}

#[test]
fn domain_errors_surface_in_strict_mode() {
    let sample = [-4.0, -1.0, 0.0, 2.0, 9.0];
    assert!(matches!(
        reduce_skew(&sample),
        Err(AnalysisError::DomainError { .. })
    ));

    let strict = EvaluationOptions {
        strict_transforms: true,
        ..Default::default()
    };
    assert!(evaluate(&sample, &strict).is_err());
    assert!(evaluate(&sample, &EvaluationOptions::default()).is_ok());
}

#[test]
fn engine_evaluates_loaded_csv() {
    let csv = "EVENTCODE,NUMMENTIONS\n010,1\n020,2\n042,3\n190,4\n010,5\n043,100\n";
    let dataset = Dataset::from_csv("events".to_string(), csv).unwrap();
    let mut engine = InsightEngine::new();
    engine.add_dataset(dataset);

    let report = engine.evaluate_column("events", "NUMMENTIONS").unwrap();
    assert_eq!(report.method, Method::Iqr);
    assert!((report.mean - 3.0).abs() < 1e-10);
    assert_eq!(report.series.raw.len(), 6);
    assert_eq!(report.series.non_outliers.len(), 5);
    assert_eq!(report.series.unskewed.len(), 6);
}

#[test]
fn reports_are_reproducible() {
    let sample = lognormal_like();
    let options = EvaluationOptions::default();
    let first = evaluate(&sample, &options).unwrap();
    let second = evaluate(&sample, &options).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}
