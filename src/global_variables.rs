// Artifact file names, looked up under the configured data directory.
pub const MODEL_FILE: &str = "gb_model.json";
pub const MODEL_FILE_ALT: &str = "congestion_model.json";
pub const ENCODERS_FILE: &str = "label_encoders.json";
pub const ENCODERS_FILE_ALT: &str = "encoders.json";
pub const HISTORY_FILE: &str = "Bangalore_Traffic_Pulse.csv";

// Column names shared by the historical CSV, the encoders and the model.
pub const COL_AREA: &str = "Area Name";
pub const COL_ROAD: &str = "Road/Intersection Name";
pub const COL_WEATHER: &str = "Weather Conditions";
pub const COL_ROADWORK: &str = "Roadwork and Construction Activity";
pub const COL_TRAFFIC_VOLUME: &str = "Traffic Volume";
pub const COL_AVERAGE_SPEED: &str = "Average Speed";
pub const COL_CAPACITY_UTILIZATION: &str = "Road Capacity Utilization";
pub const COL_INCIDENT_REPORTS: &str = "Incident Reports";
pub const COL_PEDESTRIAN_COUNT: &str = "Pedestrian and Cyclist Count";
pub const COL_DAY: &str = "Day";
pub const COL_MONTH: &str = "Month";
pub const COL_IS_WEEKEND: &str = "Is_Weekend";
pub const COL_SPEED_TO_VOLUME: &str = "Speed_to_Volume";
pub const COL_INCIDENTS_PER_CAPACITY: &str = "Incidents_per_Capacity";

/// Categorical inputs, in the order they are encoded.
pub const CATEGORICAL_COLUMNS: [&str; 4] = [COL_AREA, COL_ROAD, COL_WEATHER, COL_ROADWORK];

/// Feature order the model was trained on.
pub const FEATURE_COLUMNS: [&str; 14] = [
    COL_TRAFFIC_VOLUME,
    COL_AVERAGE_SPEED,
    COL_CAPACITY_UTILIZATION,
    COL_INCIDENT_REPORTS,
    COL_PEDESTRIAN_COUNT,
    COL_AREA,
    COL_ROAD,
    COL_WEATHER,
    COL_ROADWORK,
    COL_DAY,
    COL_MONTH,
    COL_IS_WEEKEND,
    COL_SPEED_TO_VOLUME,
    COL_INCIDENTS_PER_CAPACITY,
];

// Imputation defaults when history has nothing to offer.
pub const DEFAULT_TRAFFIC_VOLUME: f64 = 1500.0;
pub const DEFAULT_AVERAGE_SPEED: f64 = 25.0;
pub const DEFAULT_CAPACITY_UTILIZATION: f64 = 75.0;
pub const DEFAULT_INCIDENT_REPORTS: f64 = 2.0;
pub const DEFAULT_PEDESTRIAN_COUNT: f64 = 50.0;

// Temporal features are fixed to mid-month, mid-year, weekday.
pub const DEFAULT_DAY: f64 = 15.0;
pub const DEFAULT_MONTH: f64 = 6.0;
pub const DEFAULT_IS_WEEKEND: bool = false;

pub const MIN_CONGESTION: f64 = 0.0;
pub const MAX_CONGESTION: f64 = 100.0;
/// Returned when a prediction fails after the artifacts have loaded.
pub const DEFAULT_CONGESTION: f64 = 50.0;

pub const SYNTHETIC_HISTORY_ROWS: usize = 300;
