//! HTTP request and response types

pub mod error;
pub mod json;
pub mod model_packages;
pub mod predictions;
pub mod query;

pub use error::{ApiError, ApiErrorResponse};
pub use json::Json;
pub use model_packages::{
    DeleteModelPackageResponse, ModelPackageListParams, ModelPackageRequest,
    ModelPackageResponse,
};
pub use predictions::{
    DeleteAllResponse, DeletePredictionResponse, PredictionListParams, PredictionRequest,
    PredictionResponse,
};
pub use query::Query;
