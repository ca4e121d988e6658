use crate::config::PredictorConfig;
use crate::error::{PredictionError, Result};
use crate::flow_analyzer::features::FeatureRow;
use crate::flow_analyzer::historical_data::HistoricalData;
use crate::global_variables::{
    DEFAULT_CONGESTION, HISTORY_FILE, MAX_CONGESTION, MIN_CONGESTION, SYNTHETIC_HISTORY_ROWS,
};
use crate::model::{load_models, GradientBoostingRegressor, LabelEncoders};
use crate::shared_data::TrafficQuery;

/// Model, encoders and history, loaded once and reused for every query.
#[derive(Debug, Clone)]
pub struct CongestionPredictor {
    model: GradientBoostingRegressor,
    encoders: LabelEncoders,
    history: HistoricalData,
}

impl CongestionPredictor {
    pub fn new(
        model: GradientBoostingRegressor,
        encoders: LabelEncoders,
        history: HistoricalData,
    ) -> Self {
        Self {
            model,
            encoders,
            history,
        }
    }

    /// Loads every artifact from `config.data_dir`. Model and encoder
    /// failures are always fatal; history failures follow
    /// `config.history_fallback`.
    pub fn load(config: &PredictorConfig) -> Result<Self> {
        let (model, encoders) = load_models(&config.data_dir)?;
        let history = HistoricalData::load(
            &config.data_dir.join(HISTORY_FILE),
            config.history_fallback,
            &mut rand::rng(),
            SYNTHETIC_HISTORY_ROWS,
        )?;
        log::info!(
            "Predictor ready: {} trees, {} encoders, {} historical rows{}",
            model.trees().len(),
            encoders.len(),
            history.len(),
            if history.is_synthetic() { " (synthetic)" } else { "" }
        );
        Ok(Self::new(model, encoders, history))
    }

    pub fn history(&self) -> &HistoricalData {
        &self.history
    }

    pub fn features_for(&self, query: &TrafficQuery) -> FeatureRow {
        let imputed = self.history.impute(&query.area_name, &query.road_name);
        FeatureRow::assemble(query, &self.encoders, &imputed)
    }

    /// Clamped congestion level, or the error that prevented it.
    pub fn try_predict(&self, query: &TrafficQuery) -> Result<f64> {
        let row = self.features_for(query);
        log::debug!("Feature row for {:?}: {:?}", query, row);
        let raw = self.model.predict(&row.to_vec())?;
        clamp_congestion(raw)
    }

    /// Congestion level in `[0, 100]`; falls back to the default level when
    /// the prediction fails.
    pub fn predict_congestion(&self, query: &TrafficQuery) -> f64 {
        match self.try_predict(query) {
            Ok(level) => level,
            Err(e) => {
                log::error!("Prediction error: {}", e);
                DEFAULT_CONGESTION
            }
        }
    }
}

pub fn clamp_congestion(raw: f64) -> Result<f64> {
    if !raw.is_finite() {
        return Err(PredictionError::NonFinite(raw));
    }
    Ok(raw.clamp(MIN_CONGESTION, MAX_CONGESTION))
}
