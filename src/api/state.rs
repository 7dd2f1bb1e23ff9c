//! Application state for shared services

use std::sync::Arc;

#[cfg(test)]
use mockall::automock;

use crate::domain::storage::Storage;
use crate::domain::{
    Document, DomainError, ModelPackage, ModelPackageQuery, Prediction, PredictionQuery,
};
use crate::infrastructure::services::{ModelPackageService, PredictionService};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub prediction_service: Arc<dyn PredictionServiceTrait>,
    pub model_package_service: Arc<dyn ModelPackageServiceTrait>,
}

impl AppState {
    pub fn new(
        prediction_service: Arc<dyn PredictionServiceTrait>,
        model_package_service: Arc<dyn ModelPackageServiceTrait>,
    ) -> Self {
        Self {
            prediction_service,
            model_package_service,
        }
    }
}

/// Trait for prediction service operations
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait PredictionServiceTrait: Send + Sync {
    async fn list(&self, query: &PredictionQuery)
        -> Result<Vec<Document<Prediction>>, DomainError>;
    async fn get(&self, id: &str) -> Result<Document<Prediction>, DomainError>;
    async fn create(&self, prediction: Prediction) -> Result<Document<Prediction>, DomainError>;
    async fn update(
        &self,
        id: &str,
        prediction: Prediction,
    ) -> Result<Document<Prediction>, DomainError>;
    async fn delete(&self, id: &str) -> Result<bool, DomainError>;
    async fn delete_all(&self) -> Result<bool, DomainError>;
    async fn ping(&self) -> Result<(), DomainError>;
}

/// Trait for model package service operations
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ModelPackageServiceTrait: Send + Sync {
    async fn list(
        &self,
        query: &ModelPackageQuery,
    ) -> Result<Vec<Document<ModelPackage>>, DomainError>;
    async fn get(&self, id: &str) -> Result<Document<ModelPackage>, DomainError>;
    async fn create(&self, package: ModelPackage)
        -> Result<Document<ModelPackage>, DomainError>;
    async fn update(
        &self,
        id: &str,
        package: ModelPackage,
    ) -> Result<Document<ModelPackage>, DomainError>;
    async fn delete(&self, id: &str) -> Result<bool, DomainError>;
    async fn ping(&self) -> Result<(), DomainError>;
}

// Implement traits for the actual services

#[async_trait::async_trait]
impl<S: Storage<Prediction> + ?Sized + 'static> PredictionServiceTrait for PredictionService<S> {
    async fn list(
        &self,
        query: &PredictionQuery,
    ) -> Result<Vec<Document<Prediction>>, DomainError> {
        PredictionService::list(self, query).await
    }

    async fn get(&self, id: &str) -> Result<Document<Prediction>, DomainError> {
        PredictionService::get(self, id).await
    }

    async fn create(&self, prediction: Prediction) -> Result<Document<Prediction>, DomainError> {
        PredictionService::create(self, prediction).await
    }

    async fn update(
        &self,
        id: &str,
        prediction: Prediction,
    ) -> Result<Document<Prediction>, DomainError> {
        PredictionService::update(self, id, prediction).await
    }

    async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        PredictionService::delete(self, id).await
    }

    async fn delete_all(&self) -> Result<bool, DomainError> {
        PredictionService::delete_all(self).await
    }

    async fn ping(&self) -> Result<(), DomainError> {
        PredictionService::ping(self).await
    }
}

#[async_trait::async_trait]
impl<S: Storage<ModelPackage> + ?Sized + 'static> ModelPackageServiceTrait
    for ModelPackageService<S>
{
    async fn list(
        &self,
        query: &ModelPackageQuery,
    ) -> Result<Vec<Document<ModelPackage>>, DomainError> {
        ModelPackageService::list(self, query).await
    }

    async fn get(&self, id: &str) -> Result<Document<ModelPackage>, DomainError> {
        ModelPackageService::get(self, id).await
    }

    async fn create(
        &self,
        package: ModelPackage,
    ) -> Result<Document<ModelPackage>, DomainError> {
        ModelPackageService::create(self, package).await
    }

    async fn update(
        &self,
        id: &str,
        package: ModelPackage,
    ) -> Result<Document<ModelPackage>, DomainError> {
        ModelPackageService::update(self, id, package).await
    }

    async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        ModelPackageService::delete(self, id).await
    }

    async fn ping(&self) -> Result<(), DomainError> {
        ModelPackageService::ping(self).await
    }
}
