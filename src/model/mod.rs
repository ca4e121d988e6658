pub mod artifacts;
pub mod gradient_boosting;
pub mod label_encoder;

pub use artifacts::{load_models, resolve_artifact};
pub use gradient_boosting::{GradientBoostingRegressor, RegressionTree, TreeNode};
pub use label_encoder::{Encoded, LabelEncoder, LabelEncoders};
