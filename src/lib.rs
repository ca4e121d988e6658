//! Traffic congestion prediction from a gradient-boosted regression model.
//!
//! A query names an area, a road, the weather and whether roadwork is under
//! way. The numerical features the model also needs are imputed from a
//! historical CSV, two ratios are derived, and the ensemble's output is
//! clamped to a congestion level in `[0, 100]`.

pub mod api;
pub mod config;
pub mod error;
pub mod flow_analyzer;
pub mod global_variables;
pub mod model;
pub mod shared_data;

pub use config::{HistoryFallback, PredictorConfig};
pub use error::PredictionError;
pub use flow_analyzer::CongestionPredictor;
pub use shared_data::TrafficQuery;
