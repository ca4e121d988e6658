//! Integration tests for loading artifacts and predicting congestion

use congestion_predictor::global_variables::{
    ENCODERS_FILE, ENCODERS_FILE_ALT, HISTORY_FILE, MODEL_FILE, MODEL_FILE_ALT,
};
use congestion_predictor::{
    CongestionPredictor, HistoryFallback, PredictionError, PredictorConfig, TrafficQuery,
};
use std::path::{Path, PathBuf};

fn shipped_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

fn config_for(dir: &Path, fallback: HistoryFallback) -> PredictorConfig {
    let mut config = PredictorConfig::default();
    config.set_data_dir(dir);
    config.history_fallback = fallback;
    config
}

/// Copies the shipped artifacts into a scratch directory under the given names.
fn scratch_dir(model_name: &str, encoders_name: &str, with_history: bool) -> tempfile::TempDir {
    let tmp = tempfile::tempdir().expect("tmpdir");
    let src = shipped_data_dir();
    std::fs::copy(src.join(MODEL_FILE), tmp.path().join(model_name)).expect("copy model");
    std::fs::copy(src.join(ENCODERS_FILE), tmp.path().join(encoders_name)).expect("copy encoders");
    if with_history {
        std::fs::copy(src.join(HISTORY_FILE), tmp.path().join(HISTORY_FILE)).expect("copy history");
    }
    tmp
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shipped_artifacts_predict_within_bounds() {
        let config = config_for(&shipped_data_dir(), HistoryFallback::Fail);
        let predictor = CongestionPredictor::load(&config).expect("artifacts should load");
        assert!(!predictor.history().is_synthetic());

        let query = TrafficQuery::new("Indiranagar", "100 Feet Road", "Clear", "No");
        let level = predictor.predict_congestion(&query);
        assert!((0.0..=100.0).contains(&level));
        assert!((level - 72.8).abs() < 1e-9, "got {}", level);
        // Same inputs, same answer.
        assert_eq!(level, predictor.predict_congestion(&query));
    }

    #[test]
    fn test_roadwork_raises_congestion() {
        let config = config_for(&shipped_data_dir(), HistoryFallback::Fail);
        let predictor = CongestionPredictor::load(&config).expect("artifacts should load");

        let without = TrafficQuery::new("Indiranagar", "100 Feet Road", "Clear", "No");
        let with = TrafficQuery::new("Indiranagar", "100 Feet Road", "Clear", "Yes");
        assert!(predictor.predict_congestion(&with) > predictor.predict_congestion(&without));
    }

    #[test]
    fn test_unknown_location_uses_defaults() {
        let config = config_for(&shipped_data_dir(), HistoryFallback::Fail);
        let predictor = CongestionPredictor::load(&config).expect("artifacts should load");

        let query = TrafficQuery::new("Atlantis", "Nowhere Road", "Snow", "Maybe");
        let level = predictor.try_predict(&query).expect("prediction");
        assert!((level - 30.4).abs() < 1e-9, "got {}", level);
    }

    #[test]
    fn test_alternative_artifact_names_are_found() {
        let tmp = scratch_dir(MODEL_FILE_ALT, ENCODERS_FILE_ALT, true);
        let config = config_for(tmp.path(), HistoryFallback::Fail);
        assert!(CongestionPredictor::load(&config).is_ok());
    }

    #[test]
    fn test_missing_history_strict_fails() {
        let tmp = scratch_dir(MODEL_FILE, ENCODERS_FILE, false);
        let config = config_for(tmp.path(), HistoryFallback::Fail);
        match CongestionPredictor::load(&config) {
            Err(PredictionError::MissingHistory(path)) => {
                assert_eq!(path, tmp.path().join(HISTORY_FILE))
            }
            other => panic!("expected MissingHistory, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_missing_history_lenient_uses_synthetic_rows() {
        let tmp = scratch_dir(MODEL_FILE, ENCODERS_FILE, false);
        let config = config_for(tmp.path(), HistoryFallback::Synthetic);
        let predictor = CongestionPredictor::load(&config).expect("synthetic fallback");
        assert!(predictor.history().is_synthetic());
        assert_eq!(predictor.history().len(), 300);

        let query = TrafficQuery::new("Whitefield", "ITPL Main Road", "Rainy", "Yes");
        let level = predictor.predict_congestion(&query);
        assert!((0.0..=100.0).contains(&level));
    }

    #[test]
    fn test_missing_model_is_fatal() {
        let tmp = tempfile::tempdir().expect("tmpdir");
        let config = config_for(tmp.path(), HistoryFallback::Synthetic);
        assert!(matches!(
            CongestionPredictor::load(&config),
            Err(PredictionError::ArtifactNotFound(_))
        ));
    }

    #[test]
    fn test_model_with_wrong_feature_order_is_rejected() {
        let tmp = scratch_dir(MODEL_FILE, ENCODERS_FILE, true);
        let path = tmp.path().join(MODEL_FILE);
        let mut model: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).expect("read")).expect("json");
        model["feature_names"]
            .as_array_mut()
            .expect("feature_names")
            .swap(0, 1);
        std::fs::write(&path, model.to_string()).expect("write");

        let config = config_for(tmp.path(), HistoryFallback::Fail);
        assert!(matches!(
            CongestionPredictor::load(&config),
            Err(PredictionError::InvalidModel(_))
        ));
    }

    #[test]
    fn test_corrupt_encoders_report_path() {
        let tmp = scratch_dir(MODEL_FILE, ENCODERS_FILE, true);
        std::fs::write(tmp.path().join(ENCODERS_FILE), "not json").expect("write");
        let config = config_for(tmp.path(), HistoryFallback::Fail);
        match CongestionPredictor::load(&config) {
            Err(PredictionError::Json { path, .. }) => {
                assert_eq!(path, tmp.path().join(ENCODERS_FILE))
            }
            other => panic!("expected Json error, got {:?}", other.map(|_| ())),
        }
    }
}
