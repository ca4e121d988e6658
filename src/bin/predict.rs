// predict.rs
use clap::error::ErrorKind;
use clap::Parser;
use congestion_predictor::{CongestionPredictor, PredictionError, PredictorConfig, TrafficQuery};
use std::path::PathBuf;
use std::process;

const USAGE: &str =
    "Usage: predict <area_name> <road_name> <weather_conditions> <roadwork_activity>";

#[derive(Parser, Debug)]
#[command(name = "predict")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Predict the congestion level of a road", long_about = None)]
struct Cli {
    /// Area name, e.g. "Indiranagar"
    area_name: String,
    /// Road or intersection name, e.g. "100 Feet Road"
    road_name: String,
    /// Weather conditions, e.g. "Rainy"
    weather_conditions: String,
    /// Roadwork and construction activity, "Yes" or "No"
    roadwork_activity: String,

    /// Directory holding the model, encoders and historical CSV
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Fail instead of using synthetic history when the CSV is missing
    #[arg(long)]
    strict: bool,

    /// Log debug output to stderr
    #[arg(long)]
    verbose: bool,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("{}", USAGE);
            process::exit(1);
        }
    };

    let mut config = PredictorConfig::from_env();
    if let Some(dir) = &cli.data_dir {
        config.set_data_dir(dir);
    }
    config.set_strict(cli.strict);
    config.verbose |= cli.verbose;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.log_filter()))
        .init();

    let predictor = match CongestionPredictor::load(&config) {
        Ok(predictor) => predictor,
        Err(e @ PredictionError::MissingHistory(_)) | Err(e @ PredictionError::Csv(_)) => {
            eprintln!("Error loading historical data: {}", e);
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error loading models: {}", e);
            process::exit(1);
        }
    };

    let query = TrafficQuery::new(
        cli.area_name,
        cli.road_name,
        cli.weather_conditions,
        cli.roadwork_activity,
    );
    let congestion_level = predictor.predict_congestion(&query);

    println!("{:?}", congestion_level);
}
