// src/shared_data.rs

use crate::global_variables::{
    DEFAULT_AVERAGE_SPEED, DEFAULT_CAPACITY_UTILIZATION, DEFAULT_INCIDENT_REPORTS,
    DEFAULT_PEDESTRIAN_COUNT, DEFAULT_TRAFFIC_VOLUME,
};
use serde::{Deserialize, Serialize};

/// The four categorical inputs a prediction is asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficQuery {
    pub area_name: String,
    pub road_name: String,
    pub weather_conditions: String,
    pub roadwork_activity: String,
}

impl TrafficQuery {
    pub fn new(
        area_name: impl Into<String>,
        road_name: impl Into<String>,
        weather_conditions: impl Into<String>,
        roadwork_activity: impl Into<String>,
    ) -> Self {
        Self {
            area_name: area_name.into(),
            road_name: road_name.into(),
            weather_conditions: weather_conditions.into(),
            roadwork_activity: roadwork_activity.into(),
        }
    }
}

/// One row of the historical dataset. Numeric cells may be blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalRecord {
    #[serde(rename = "Area Name")]
    pub area_name: String,
    #[serde(rename = "Road/Intersection Name")]
    pub road_name: String,
    #[serde(rename = "Traffic Volume")]
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub traffic_volume: Option<f64>,
    #[serde(rename = "Average Speed")]
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub average_speed: Option<f64>,
    #[serde(rename = "Road Capacity Utilization")]
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub capacity_utilization: Option<f64>,
    #[serde(rename = "Incident Reports")]
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub incident_reports: Option<f64>,
    #[serde(rename = "Pedestrian and Cyclist Count")]
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub pedestrian_count: Option<f64>,
}

/// The numerical features that are imputed from history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericFeature {
    TrafficVolume,
    AverageSpeed,
    CapacityUtilization,
    IncidentReports,
    PedestrianCount,
}

impl NumericFeature {
    pub const ALL: [NumericFeature; 5] = [
        NumericFeature::TrafficVolume,
        NumericFeature::AverageSpeed,
        NumericFeature::CapacityUtilization,
        NumericFeature::IncidentReports,
        NumericFeature::PedestrianCount,
    ];

    pub fn default_value(self) -> f64 {
        match self {
            NumericFeature::TrafficVolume => DEFAULT_TRAFFIC_VOLUME,
            NumericFeature::AverageSpeed => DEFAULT_AVERAGE_SPEED,
            NumericFeature::CapacityUtilization => DEFAULT_CAPACITY_UTILIZATION,
            NumericFeature::IncidentReports => DEFAULT_INCIDENT_REPORTS,
            NumericFeature::PedestrianCount => DEFAULT_PEDESTRIAN_COUNT,
        }
    }

    pub fn value_in(self, record: &HistoricalRecord) -> Option<f64> {
        let value = match self {
            NumericFeature::TrafficVolume => record.traffic_volume,
            NumericFeature::AverageSpeed => record.average_speed,
            NumericFeature::CapacityUtilization => record.capacity_utilization,
            NumericFeature::IncidentReports => record.incident_reports,
            NumericFeature::PedestrianCount => record.pedestrian_count,
        };
        value.filter(|v| v.is_finite())
    }
}

/// Imputed numerical features for a single query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImputedFeatures {
    pub traffic_volume: f64,
    pub average_speed: f64,
    pub capacity_utilization: f64,
    pub incident_reports: f64,
    pub pedestrian_count: f64,
}

impl ImputedFeatures {
    pub fn defaults() -> Self {
        Self {
            traffic_volume: DEFAULT_TRAFFIC_VOLUME,
            average_speed: DEFAULT_AVERAGE_SPEED,
            capacity_utilization: DEFAULT_CAPACITY_UTILIZATION,
            incident_reports: DEFAULT_INCIDENT_REPORTS,
            pedestrian_count: DEFAULT_PEDESTRIAN_COUNT,
        }
    }

    pub fn set(&mut self, feature: NumericFeature, value: f64) {
        match feature {
            NumericFeature::TrafficVolume => self.traffic_volume = value,
            NumericFeature::AverageSpeed => self.average_speed = value,
            NumericFeature::CapacityUtilization => self.capacity_utilization = value,
            NumericFeature::IncidentReports => self.incident_reports = value,
            NumericFeature::PedestrianCount => self.pedestrian_count = value,
        }
    }
}
