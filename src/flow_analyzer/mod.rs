pub mod features;
pub mod historical_data;
pub mod predictive_model;

// Re-export the items callers need for a prediction
pub use features::FeatureRow;
pub use historical_data::HistoricalData;
pub use predictive_model::{clamp_congestion, CongestionPredictor};
