use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, request, HeaderValue, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower_http::cors::{AllowCredentials, AllowOrigin, CorsLayer};

use crate::api::assessment::{rounded_level, Severity};
use crate::flow_analyzer::CongestionPredictor;
use crate::shared_data::TrafficQuery;

const SERVICE_NAME: &str = "Traffic Prediction API";
const SERVICE_VERSION: &str = "1.0.0";
const REQUIRED_FIELDS: [&str; 4] = [
    "areaName",
    "roadName",
    "weatherConditions",
    "roadworkActivity",
];

#[derive(Clone)]
pub struct ApiState {
    pub predictor: Arc<CongestionPredictor>,
}

/// Request body of a single prediction. Every field is required but parsed
/// leniently so a missing one yields a 400 listing the required fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictRequest {
    #[serde(default)]
    pub area_name: Option<String>,
    #[serde(default)]
    pub road_name: Option<String>,
    #[serde(default)]
    pub weather_conditions: Option<String>,
    #[serde(default)]
    pub roadwork_activity: Option<String>,
}

impl PredictRequest {
    pub fn into_query(self) -> Option<TrafficQuery> {
        fn present(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }
        Some(TrafficQuery::new(
            present(self.area_name)?,
            present(self.road_name)?,
            present(self.weather_conditions)?,
            present(self.roadwork_activity)?,
        ))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Location {
    area: String,
    road: String,
    weather: String,
    roadwork: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PredictionBody {
    congestion_level: u8,
    severity: Severity,
    estimated_delay: &'static str,
    recommended_action: &'static str,
    timestamp: String,
    location: Location,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum BulkEntry {
    #[serde(rename_all = "camelCase")]
    Predicted {
        location: Value,
        congestion_level: u8,
        severity: Severity,
        estimated_delay: &'static str,
    },
    Failed {
        location: Value,
        error: &'static str,
        message: String,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AreaRoads {
    area: &'static str,
    roads: [&'static str; 4],
}

const LOCATIONS: [(&str, [&str; 4]); 8] = [
    ("Indiranagar", ["100 Feet Road", "12th Main Road", "CMH Road", "Old Airport Road"]),
    ("Koramangala", ["5th Block", "6th Block", "7th Block", "Intermediate Ring Road"]),
    ("Whitefield", ["ITPL Main Road", "Varthur Road", "Whitefield Main Road", "Hope Farm Junction"]),
    ("Electronic City", ["Hosur Road", "Electronic City Phase 1", "Electronic City Phase 2", "Bommasandra Road"]),
    ("Hebbal", ["Outer Ring Road", "Bellary Road", "Hebbal Flyover", "Nagawara"]),
    ("BTM Layout", ["BTM 1st Stage", "BTM 2nd Stage", "Bannerghatta Road", "Silk Board"]),
    ("Marathahalli", ["Marathahalli Bridge", "Outer Ring Road", "Varthur Road", "Kundalahalli"]),
    ("Jayanagar", ["4th Block", "9th Block", "South End Circle", "Jayanagar Shopping Complex"]),
];
const WEATHER_OPTIONS: [&str; 4] = ["Clear", "Cloudy", "Rainy", "Foggy"];
const ROADWORK_OPTIONS: [&str; 2] = ["Yes", "No"];

pub fn build_router(state: ApiState, allowed_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                log::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();
    // Credentials are only advertised to origins that are also allowed.
    let credential_origins = origins.clone();
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(AllowCredentials::predicate(
            move |origin: &HeaderValue, _parts: &request::Parts| {
                credential_origins.contains(origin)
            },
        ));

    Router::new()
        .route("/api/health", get(health))
        .route("/api/predict", post(predict))
        .route("/api/locations", get(locations))
        .route("/api/predict/bulk", post(predict_bulk))
        .fallback(not_found)
        .layer(cors)
        .with_state(state)
}

fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": now_iso(),
        "service": SERVICE_NAME,
        "version": SERVICE_VERSION,
    }))
}

fn missing_fields() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": "Missing required fields",
            "required": REQUIRED_FIELDS,
        })),
    )
        .into_response()
}

async fn predict(
    State(state): State<ApiState>,
    body: Result<Json<PredictRequest>, JsonRejection>,
) -> Response {
    let query = match body {
        Ok(Json(request)) => request.into_query(),
        Err(rejection) => {
            log::debug!("Rejected prediction body: {}", rejection);
            None
        }
    };
    let Some(query) = query else {
        return missing_fields();
    };

    log::info!("Prediction request: {:?}", query);

    let level = rounded_level(state.predictor.predict_congestion(&query));
    let severity = Severity::from_level(level);
    let body = PredictionBody {
        congestion_level: level,
        severity,
        estimated_delay: severity.estimated_delay(),
        recommended_action: severity.recommended_action(),
        timestamp: now_iso(),
        location: Location {
            area: query.area_name,
            road: query.road_name,
            weather: query.weather_conditions,
            roadwork: query.roadwork_activity,
        },
    };
    Json(json!({ "success": true, "prediction": body })).into_response()
}

async fn locations() -> Json<Value> {
    let locations: Vec<AreaRoads> = LOCATIONS
        .iter()
        .map(|&(area, roads)| AreaRoads { area, roads })
        .collect();
    Json(json!({
        "success": true,
        "locations": locations,
        "weatherOptions": WEATHER_OPTIONS,
        "roadworkOptions": ROADWORK_OPTIONS,
    }))
}

fn predict_entry(predictor: &CongestionPredictor, location: Value) -> BulkEntry {
    let request = serde_json::from_value::<PredictRequest>(location.clone()).unwrap_or_default();
    let Some(query) = request.into_query() else {
        return BulkEntry::Failed {
            location,
            error: "Prediction failed",
            message: format!("Missing required fields: {}", REQUIRED_FIELDS.join(", ")),
        };
    };
    let level = rounded_level(predictor.predict_congestion(&query));
    let severity = Severity::from_level(level);
    BulkEntry::Predicted {
        location,
        congestion_level: level,
        severity,
        estimated_delay: severity.estimated_delay(),
    }
}

async fn predict_bulk(
    State(state): State<ApiState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let locations = match body {
        Ok(Json(mut value)) => match value.get_mut("locations").map(Value::take) {
            Some(Value::Array(locations)) => Some(locations),
            _ => None,
        },
        Err(_) => None,
    };
    let Some(locations) = locations else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Invalid input. Expected array of locations." })),
        )
            .into_response();
    };

    log::info!("Bulk prediction for {} locations", locations.len());
    let predictions: Vec<BulkEntry> = locations
        .into_iter()
        .map(|location| predict_entry(&state.predictor, location))
        .collect();

    Json(json!({
        "success": true,
        "predictions": predictions,
        "timestamp": now_iso(),
    }))
    .into_response()
}

async fn not_found(method: Method, uri: Uri) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Endpoint not found",
            "path": uri.path_and_query().map_or(uri.path(), |pq| pq.as_str()),
            "method": method.as_str(),
        })),
    )
        .into_response()
}
