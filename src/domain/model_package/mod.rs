//! Model package domain - trained model metadata

mod entity;
mod query;
mod validation;

pub use entity::ModelPackage;
pub use query::ModelPackageQuery;
pub use validation::{
    validate_date_trained, validate_model_package, ModelPackageValidationError,
    DATE_TRAINED_FORMAT,
};
