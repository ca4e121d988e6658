pub mod assessment;
pub mod routes;

pub use assessment::{rounded_level, Severity};
pub use routes::{build_router, ApiState, PredictRequest};
