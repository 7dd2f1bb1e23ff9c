//! Prediction domain - NFL game predictions

mod entity;
mod query;
mod validation;

pub use entity::Prediction;
pub use query::PredictionQuery;
pub use validation::{
    validate_confidence, validate_prediction, validate_week, PredictionValidationError, MAX_WEEK,
    MIN_WEEK,
};
