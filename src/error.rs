//! Error types for congestion prediction

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading artifacts or producing a prediction.
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read historical data: {0}")]
    Csv(#[from] csv::Error),

    /// None of the candidate file names exist in the data directory.
    #[error("artifact not found, tried {}", .0.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", "))]
    ArtifactNotFound(Vec<PathBuf>),

    #[error("invalid model: {0}")]
    InvalidModel(String),

    #[error("historical data unavailable at {0}")]
    MissingHistory(PathBuf),

    #[error("could not generate synthetic history: {0}")]
    SyntheticHistory(String),

    #[error("expected {expected} features, got {actual}")]
    FeatureWidth { expected: usize, actual: usize },

    #[error("encoder for '{0}' has no classes")]
    EmptyEncoder(String),

    #[error("model produced a non-finite prediction ({0})")]
    NonFinite(f64),
}

pub type Result<T> = std::result::Result<T, PredictionError>;
