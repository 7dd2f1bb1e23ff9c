//! Domain layer - Core entities, queries and storage abstractions

pub mod error;
pub mod model_package;
pub mod prediction;
pub mod storage;

pub use error::DomainError;
pub use model_package::{
    validate_date_trained, validate_model_package, ModelPackage, ModelPackageQuery,
    ModelPackageValidationError,
};
pub use prediction::{
    validate_prediction, Prediction, PredictionQuery, PredictionValidationError,
};
pub use storage::{Document, DocumentId, Filter, Storage, StorageEntity};
