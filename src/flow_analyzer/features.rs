use crate::global_variables::{
    COL_AREA, COL_ROAD, COL_ROADWORK, COL_WEATHER, DEFAULT_DAY, DEFAULT_IS_WEEKEND,
    DEFAULT_MONTH, FEATURE_COLUMNS,
};
use crate::model::LabelEncoders;
use crate::shared_data::{ImputedFeatures, TrafficQuery};

/// One fully assembled model input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRow {
    pub traffic_volume: f64,
    pub average_speed: f64,
    pub capacity_utilization: f64,
    pub incident_reports: f64,
    pub pedestrian_count: f64,
    pub area_code: f64,
    pub road_code: f64,
    pub weather_code: f64,
    pub roadwork_code: f64,
    pub day: f64,
    pub month: f64,
    pub is_weekend: bool,
    pub speed_to_volume: f64,
    pub incidents_per_capacity: f64,
}

impl FeatureRow {
    pub fn assemble(
        query: &TrafficQuery,
        encoders: &LabelEncoders,
        imputed: &ImputedFeatures,
    ) -> Self {
        Self {
            traffic_volume: imputed.traffic_volume,
            average_speed: imputed.average_speed,
            capacity_utilization: imputed.capacity_utilization,
            incident_reports: imputed.incident_reports,
            pedestrian_count: imputed.pedestrian_count,
            area_code: encoders.encode_or_default(COL_AREA, &query.area_name),
            road_code: encoders.encode_or_default(COL_ROAD, &query.road_name),
            weather_code: encoders.encode_or_default(COL_WEATHER, &query.weather_conditions),
            roadwork_code: encoders.encode_or_default(COL_ROADWORK, &query.roadwork_activity),
            day: DEFAULT_DAY,
            month: DEFAULT_MONTH,
            is_weekend: DEFAULT_IS_WEEKEND,
            speed_to_volume: speed_to_volume(imputed.average_speed, imputed.traffic_volume),
            incidents_per_capacity: incidents_per_capacity(
                imputed.incident_reports,
                imputed.capacity_utilization,
            ),
        }
    }

    /// Values in the order of `FEATURE_COLUMNS`.
    pub fn to_vec(&self) -> Vec<f64> {
        let row = vec![
            self.traffic_volume,
            self.average_speed,
            self.capacity_utilization,
            self.incident_reports,
            self.pedestrian_count,
            self.area_code,
            self.road_code,
            self.weather_code,
            self.roadwork_code,
            self.day,
            self.month,
            if self.is_weekend { 1.0 } else { 0.0 },
            self.speed_to_volume,
            self.incidents_per_capacity,
        ];
        debug_assert_eq!(row.len(), FEATURE_COLUMNS.len());
        row
    }
}

pub fn speed_to_volume(average_speed: f64, traffic_volume: f64) -> f64 {
    average_speed / (traffic_volume + 1.0)
}

pub fn incidents_per_capacity(incident_reports: f64, capacity_utilization: f64) -> f64 {
    incident_reports / (capacity_utilization + 1.0)
}
