use gold_models::{load_model, ModelArtifact, ModelError};
use rstest::rstest;
use std::fs;
use tempfile::TempDir;

const VALID_ARIMA: &str = r#"{
    "format_version": 1,
    "model": "arima",
    "order": [0, 1, 0],
    "sigma2": 100,
    "observations": [2000.0, 2050.0]
}"#;

fn write(dir: &TempDir, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn test_missing_file_is_not_found() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("arima_gold_model.json");

    match load_model(&path) {
        Err(ModelError::NotFound { path: reported }) => assert_eq!(reported, path),
        other => panic!("Expected NotFound, got {:?}", other),
    }
}

#[test]
fn test_minimal_artifact_loads() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "arima_gold_model.json", VALID_ARIMA);

    let model = load_model(&path).unwrap();
    assert_eq!(model.name(), "ARIMA(0,1,0)");
    assert_eq!(model.forecast(2).unwrap().values(), &[2050.0, 2050.0]);
}

#[rstest]
#[case::not_json("\u{80}\u{2}pickle-bytes", "expected value")]
#[case::wrong_version(r#"{"format_version": 7, "model": "arima"}"#, "unsupported format_version 7")]
#[case::no_version(r#"{"model": "arima"}"#, "missing format_version")]
#[case::unknown_kind(r#"{"format_version": 1, "model": "prophet"}"#, "unknown variant")]
#[case::missing_field(r#"{"format_version": 1, "model": "arima", "order": [0, 1, 0]}"#, "missing field")]
#[case::bad_orders(
    r#"{"format_version": 1, "model": "arima", "order": [2, 1, 0], "ar": [0.1], "sigma2": 1, "observations": [1, 2, 3]}"#,
    "2 ar coefficients"
)]
#[case::negative_variance(
    r#"{"format_version": 1, "model": "arima", "order": [0, 1, 0], "sigma2": -4, "observations": [1]}"#,
    "sigma2"
)]
#[case::short_history(
    r#"{"format_version": 1, "model": "sarima", "order": [0, 0, 0], "seasonal_order": [0, 1, 0, 12], "sigma2": 1, "observations": [1, 2, 3]}"#,
    "12 stored observations"
)]
fn test_unusable_artifacts_are_load_errors(#[case] body: &str, #[case] cause: &str) {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "model.json", body);

    let err = load_model(&path).unwrap_err();
    assert!(err.is_load_failure());
    match &err {
        ModelError::LoadError { reason, .. } => {
            assert!(reason.contains(cause), "reason {:?} should mention {:?}", reason, cause)
        }
        other => panic!("Expected LoadError, got {:?}", other),
    }
}

#[test]
fn test_not_found_and_load_error_messages_differ() {
    let dir = TempDir::new().unwrap();
    let missing = load_model(dir.path().join("sarima_gold_model.json")).unwrap_err();
    let corrupt = load_model(write(&dir, "arima_gold_model.json", "{")).unwrap_err();

    let missing = missing.to_string();
    let corrupt = corrupt.to_string();
    assert!(missing.contains("not found"));
    assert!(corrupt.starts_with("Error loading model"));
    assert_ne!(missing, corrupt);
}

#[test]
fn test_from_json_round_trips_saved_artifact() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "in.json", VALID_ARIMA);
    let original = ModelArtifact::from_json(&fs::read_to_string(&path).unwrap()).unwrap();

    let out = dir.path().join("out.json");
    original.save(&out).unwrap();
    let reread = ModelArtifact::from_json(&fs::read_to_string(&out).unwrap()).unwrap();

    assert_eq!(original, reread);
}

#[test]
fn test_directory_is_a_load_error() {
    let dir = TempDir::new().unwrap();
    let err = load_model(dir.path()).unwrap_err();
    assert!(matches!(err, ModelError::LoadError { .. }));
}

#[test]
fn test_save_into_missing_directory_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let artifact = ModelArtifact::from_json(VALID_ARIMA).unwrap();

    let err = artifact
        .save(dir.path().join("missing").join("out.json"))
        .unwrap_err();
    assert!(matches!(err, ModelError::IoError(_)), "{:?}", err);
}

#[rstest]
#[case("not json")]
#[case(r#"{"format_version": 2, "model": "arima"}"#)]
fn test_from_json_rejects_bad_documents(#[case] body: &str) {
    let err = ModelArtifact::from_json(body).unwrap_err();
    assert!(matches!(err, ModelError::InvalidArtifact(_)), "{:?}", err);
}

#[test]
fn test_overflowing_variance_is_a_forecasting_error() {
    let dir = TempDir::new().unwrap();
    let body = VALID_ARIMA.replace("\"sigma2\": 100", "\"sigma2\": 1e308");
    let path = write(&dir, "arima_gold_model.json", &body);

    let model = load_model(&path).unwrap();
    assert!(model.forecast(1).is_ok());
    assert!(matches!(model.forecast(3), Err(ModelError::ForecastingError(_))));
}
