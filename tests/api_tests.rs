//! HTTP API tests, driven through the router without binding a socket

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use congestion_predictor::api::{build_router, ApiState};
use congestion_predictor::flow_analyzer::HistoricalData;
use congestion_predictor::global_variables::FEATURE_COLUMNS;
use congestion_predictor::model::{
    GradientBoostingRegressor, LabelEncoders, RegressionTree, TreeNode,
};
use congestion_predictor::{CongestionPredictor, HistoryFallback, PredictorConfig};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

fn router_for(predictor: CongestionPredictor) -> Router {
    build_router(
        ApiState {
            predictor: Arc::new(predictor),
        },
        &PredictorConfig::default().allowed_origins,
    )
}

fn app() -> Router {
    let mut config = PredictorConfig::default();
    config.set_data_dir(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data"));
    config.history_fallback = HistoryFallback::Fail;
    let predictor = CongestionPredictor::load(&config).expect("artifacts should load");
    router_for(predictor)
}

/// A predictor whose two leaves overflow to infinity for every query.
fn overflowing_app() -> Router {
    let leaf = RegressionTree {
        nodes: vec![TreeNode::Leaf { value: 1e308 }],
    };
    let model = GradientBoostingRegressor::new(
        0.0,
        1.0,
        FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect(),
        vec![leaf.clone(), leaf],
    )
    .expect("valid model");
    router_for(CongestionPredictor::new(
        model,
        LabelEncoders::default(),
        HistoricalData::default(),
    ))
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    send_to(app(), request).await
}

async fn send_to(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let body = serde_json::from_slice(&bytes).expect("json body");
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

async fn preflight(origin: &str) -> (StatusCode, HeaderMap) {
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/predict")
        .header("origin", origin)
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .body(Body::empty())
        .expect("request");
    let response = app().oneshot(request).await.expect("response");
    (response.status(), response.headers().clone())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(get("/api/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "Traffic Prediction API");
        assert_eq!(body["version"], "1.0.0");
        assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[tokio::test]
    async fn test_predict_returns_assessment() {
        let (status, body) = send(post_json(
            "/api/predict",
            json!({
                "areaName": "Indiranagar",
                "roadName": "100 Feet Road",
                "weatherConditions": "Clear",
                "roadworkActivity": "No"
            }),
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        let prediction = &body["prediction"];
        assert_eq!(prediction["congestionLevel"], 73);
        assert_eq!(prediction["severity"], "Medium");
        assert_eq!(prediction["estimatedDelay"], "8-15 minutes");
        assert_eq!(
            prediction["recommendedAction"],
            "Heavy traffic expected. Allow extra time."
        );
        assert_eq!(prediction["location"]["road"], "100 Feet Road");
    }

    #[tokio::test]
    async fn test_predict_missing_field_is_bad_request() {
        let (status, body) = send(post_json(
            "/api/predict",
            json!({ "areaName": "Hebbal", "roadName": "", "weatherConditions": "Clear" }),
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing required fields");
        assert_eq!(body["required"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_locations_catalogue() {
        let (status, body) = send(get("/api/locations")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["locations"].as_array().unwrap().len(), 8);
        assert_eq!(body["locations"][0]["area"], "Indiranagar");
        assert_eq!(body["weatherOptions"], json!(["Clear", "Cloudy", "Rainy", "Foggy"]));
        assert_eq!(body["roadworkOptions"], json!(["Yes", "No"]));
    }

    #[tokio::test]
    async fn test_bulk_requires_array() {
        let (status, body) =
            send(post_json("/api/predict/bulk", json!({ "locations": "Hebbal" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid input. Expected array of locations.");
    }

    #[tokio::test]
    async fn test_bulk_reports_each_location() {
        let (status, body) = send(post_json(
            "/api/predict/bulk",
            json!({ "locations": [
                {
                    "areaName": "Jayanagar",
                    "roadName": "4th Block",
                    "weatherConditions": "Clear",
                    "roadworkActivity": "No"
                },
                { "areaName": "Hebbal" }
            ] }),
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        let predictions = body["predictions"].as_array().unwrap();
        assert_eq!(predictions.len(), 2);
        assert_eq!(predictions[0]["congestionLevel"], 37);
        assert_eq!(predictions[0]["severity"], "Low");
        assert_eq!(predictions[0]["location"]["roadName"], "4th Block");
        assert_eq!(predictions[1]["error"], "Prediction failed");
        assert_eq!(predictions[1]["location"]["areaName"], "Hebbal");
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let (status, body) = send(get("/api/nothing-here")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Endpoint not found");
        assert_eq!(body["path"], "/api/nothing-here");
        assert_eq!(body["method"], "GET");
    }

    #[tokio::test]
    async fn test_not_found_path_keeps_query_string() {
        let (status, body) = send(get("/api/nothing-here?x=1")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["path"], "/api/nothing-here?x=1");
    }

    #[tokio::test]
    async fn test_failed_prediction_reports_default_level() {
        let (status, body) = send_to(
            overflowing_app(),
            post_json(
                "/api/predict",
                json!({
                    "areaName": "Hebbal",
                    "roadName": "Bellary Road",
                    "weatherConditions": "Rainy",
                    "roadworkActivity": "Yes"
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["prediction"]["congestionLevel"], 50);
        assert_eq!(body["prediction"]["severity"], "Moderate");
    }

    #[tokio::test]
    async fn test_failed_bulk_prediction_reports_default_level() {
        let (status, body) = send_to(
            overflowing_app(),
            post_json(
                "/api/predict/bulk",
                json!({ "locations": [{
                    "areaName": "Hebbal",
                    "roadName": "Bellary Road",
                    "weatherConditions": "Rainy",
                    "roadworkActivity": "Yes"
                }] }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let entry = &body["predictions"][0];
        assert_eq!(entry["congestionLevel"], 50);
        assert_eq!(entry["severity"], "Moderate");
        assert!(entry.get("error").is_none());
    }

    #[tokio::test]
    async fn test_cors_preflight_allows_configured_origin() {
        let (status, headers) = preflight("http://localhost:5173").await;
        assert!(status.is_success());
        assert_eq!(
            headers["access-control-allow-origin"],
            "http://localhost:5173"
        );
        assert_eq!(headers["access-control-allow-credentials"], "true");
    }

    #[tokio::test]
    async fn test_cors_preflight_ignores_other_origins() {
        let (_, headers) = preflight("https://evil.example").await;
        assert!(headers.get("access-control-allow-origin").is_none());
        assert!(headers.get("access-control-allow-credentials").is_none());
    }
}
