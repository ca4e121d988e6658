use std::path::{Path, PathBuf};

use crate::error::{PredictionError, Result};
use crate::global_variables::{
    ENCODERS_FILE, ENCODERS_FILE_ALT, FEATURE_COLUMNS, MODEL_FILE, MODEL_FILE_ALT,
};
use crate::model::gradient_boosting::GradientBoostingRegressor;
use crate::model::label_encoder::LabelEncoders;

/// Returns the first candidate that exists under `dir`.
pub fn resolve_artifact(dir: &Path, candidates: &[&str]) -> Result<PathBuf> {
    let paths: Vec<PathBuf> = candidates.iter().map(|name| dir.join(name)).collect();
    for path in &paths {
        if path.is_file() {
            return Ok(path.clone());
        }
        log::debug!("{} not found", path.display());
    }
    Err(PredictionError::ArtifactNotFound(paths))
}

/// Loads the model and its encoders from `dir`, checking the model was
/// trained on the expected feature order.
pub fn load_models(dir: &Path) -> Result<(GradientBoostingRegressor, LabelEncoders)> {
    let model_path = resolve_artifact(dir, &[MODEL_FILE, MODEL_FILE_ALT])?;
    let encoders_path = resolve_artifact(dir, &[ENCODERS_FILE, ENCODERS_FILE_ALT])?;

    let model = GradientBoostingRegressor::from_file(&model_path)?;
    model.expect_features(&FEATURE_COLUMNS)?;
    let encoders = LabelEncoders::from_file(&encoders_path)?;

    log::info!(
        "Using model {} and encoders {}",
        model_path.display(),
        encoders_path.display()
    );
    Ok((model, encoders))
}
