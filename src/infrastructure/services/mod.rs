//! Infrastructure services

mod model_package_service;
mod prediction_service;

pub use model_package_service::ModelPackageService;
pub use prediction_service::PredictionService;

use crate::domain::storage::StorageEntity;
use crate::domain::DomainError;
use crate::infrastructure::observability::record_store_operation;

/// Records the outcome of a store call against the entity's collection
fn track<E: StorageEntity, T>(
    operation: &'static str,
    result: Result<T, DomainError>,
) -> Result<T, DomainError> {
    record_store_operation(E::COLLECTION, operation, result.is_ok());
    result
}
