// prediction_server.rs
use congestion_predictor::api::{build_router, ApiState};
use congestion_predictor::{CongestionPredictor, PredictorConfig};
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = PredictorConfig::from_env();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.log_filter()))
        .init();

    // Artifacts are read once; a broken model directory stops startup.
    let predictor = CongestionPredictor::load(&config)?;
    let state = ApiState {
        predictor: Arc::new(predictor),
    };
    let app = build_router(state, &config.allowed_origins);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("Traffic Prediction API listening on {}", addr);
    println!("Traffic Prediction API Server running on port {}", config.server_port);
    println!("Health check: http://localhost:{}/api/health", config.server_port);
    println!("Prediction endpoint: http://localhost:{}/api/predict", config.server_port);
    println!("Available locations: http://localhost:{}/api/locations", config.server_port);

    axum::serve(listener, app).await?;
    Ok(())
}
