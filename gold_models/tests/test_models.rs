use approx::assert_relative_eq;
use gold_models::{
    load_model, ArimaModel, FitStatistics, LoadedModel, ModelArtifact, ModelError, SarimaModel,
};
use rstest::rstest;
use tempfile::TempDir;

fn history() -> Vec<f64> {
    (0..36)
        .map(|i| 1800.0 + 7.5 * i as f64 + 20.0 * ((i % 12) as f64 / 12.0 * std::f64::consts::TAU).sin())
        .collect()
}

fn fit() -> FitStatistics {
    FitStatistics {
        nobs: 36,
        log_likelihood: -150.25,
        aic: 308.5,
        bic: 314.1,
        sample_start: chrono::NaiveDate::from_ymd_opt(2022, 1, 1),
        sample_end: chrono::NaiveDate::from_ymd_opt(2024, 12, 1),
    }
}

fn arima() -> ArimaModel {
    ArimaModel {
        order: (1, 1, 1),
        constant: 0.0,
        ar: vec![0.35],
        ma: vec![-0.2],
        sigma2: 900.0,
        observations: history(),
        residuals: vec![1.5; 36],
        fit: Some(fit()),
    }
}

fn sarima() -> SarimaModel {
    SarimaModel {
        order: (1, 1, 0),
        seasonal_order: (1, 0, 1, 12),
        constant: 0.0,
        ar: vec![0.25],
        ma: Vec::new(),
        seasonal_ar: vec![0.4],
        seasonal_ma: vec![-0.3],
        sigma2: 750.0,
        observations: history(),
        residuals: vec![-2.0; 36],
        fit: Some(fit()),
    }
}

fn saved(artifact: ModelArtifact) -> (TempDir, Box<dyn LoadedModel>) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("model.json");
    artifact.save(&path).unwrap();
    let model = load_model(&path).unwrap();
    (dir, model)
}

#[rstest]
#[case(ModelArtifact::Arima(arima()), "ARIMA(1,1,1)")]
#[case(ModelArtifact::Sarima(sarima()), "SARIMA(1,1,0)x(1,0,1,12)")]
fn test_saved_artifacts_load_behind_the_trait(#[case] artifact: ModelArtifact, #[case] name: &str) {
    let (_dir, model) = saved(artifact);
    assert_eq!(model.name(), name);

    let summary = model.summary().unwrap();
    assert!(summary.contains(name));
    assert!(summary.contains("sigma2"));
}

#[rstest]
#[case(ModelArtifact::Arima(arima()))]
#[case(ModelArtifact::Sarima(sarima()))]
fn test_bounds_bracket_forecast_for_every_horizon(#[case] artifact: ModelArtifact) {
    let (_dir, model) = saved(artifact);

    for horizon in 1..=36 {
        let forecast = model.forecast(horizon).unwrap();
        assert_eq!(forecast.horizons(), horizon);
        assert_eq!(forecast.lower().len(), horizon);
        assert_eq!(forecast.upper().len(), horizon);

        for i in 0..horizon {
            assert!(forecast.lower()[i] <= forecast.values()[i]);
            assert!(forecast.values()[i] <= forecast.upper()[i]);
        }
    }
}

#[test]
fn test_forecasts_are_prefix_stable() {
    let model = arima();
    let short = model.forecast(3).unwrap();
    let long = model.forecast(12).unwrap();

    for i in 0..3 {
        assert_relative_eq!(short.values()[i], long.values()[i], epsilon = 1e-9);
        assert_relative_eq!(short.upper()[i], long.upper()[i], epsilon = 1e-9);
    }
}

#[test]
fn test_band_widens_with_horizon() {
    let forecast = arima().forecast(24).unwrap();
    let widths: Vec<f64> = forecast
        .upper()
        .iter()
        .zip(forecast.lower())
        .map(|(u, l)| u - l)
        .collect();

    assert!(widths.windows(2).all(|w| w[1] >= w[0]));
}

#[test]
fn test_summary_unavailable_without_fit_statistics() {
    let mut model = sarima();
    model.fit = None;
    let (_dir, model) = saved(ModelArtifact::Sarima(model));

    assert!(matches!(model.summary(), Err(ModelError::SummaryUnavailable(_))));
    assert!(model.forecast(6).is_ok());
}

#[test]
fn test_zero_horizon_is_rejected() {
    assert!(matches!(arima().forecast(0), Err(ModelError::InvalidParameter(_))));
}
