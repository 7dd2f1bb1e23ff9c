//! Model package service - CRUD operations over the trained model collection

use std::sync::Arc;

use tracing::debug;

use crate::domain::storage::{Document, DocumentId, Filter, Storage};
use crate::domain::{
    validate_date_trained, validate_model_package, DomainError, ModelPackage, ModelPackageQuery,
};

use super::track;

/// Model package service for CRUD operations
#[derive(Debug)]
pub struct ModelPackageService<S: Storage<ModelPackage> + ?Sized> {
    storage: Arc<S>,
}

impl<S: Storage<ModelPackage> + ?Sized> ModelPackageService<S> {
    /// Create a new ModelPackageService with the given storage
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// List model packages matching the query
    ///
    /// A `date_trained` filter must be a real `MM-DD-YYYY` date. Fails with
    /// `NotFound` when nothing matches.
    pub async fn list(
        &self,
        query: &ModelPackageQuery,
    ) -> Result<Vec<Document<ModelPackage>>, DomainError> {
        debug!(?query, "Listing model packages");

        if let Some(date) = query.date_trained.as_deref().filter(|d| !d.is_empty()) {
            validate_date_trained(date).map_err(|e| DomainError::validation(e.to_string()))?;
        }

        let filter = query.to_filter();
        let unfiltered = filter.is_all();
        let packages = track::<ModelPackage, _>("find", self.storage.find(&filter).await)?;

        if packages.is_empty() {
            return Err(if unfiltered {
                DomainError::not_found("No model packages found")
            } else {
                DomainError::not_found("No model package found with the given parameters")
            });
        }

        Ok(packages)
    }

    /// Get a model package by ID
    pub async fn get(&self, id: &str) -> Result<Document<ModelPackage>, DomainError> {
        debug!(id, "Getting model package");

        let document_id = DocumentId::parse(id)?;
        track::<ModelPackage, _>(
            "find_one",
            self.storage.find_one(&Filter::id(document_id)).await,
        )?
        .ok_or_else(|| not_found(id))
    }

    /// Create a new model package
    pub async fn create(
        &self,
        package: ModelPackage,
    ) -> Result<Document<ModelPackage>, DomainError> {
        debug!(label = %package.package_label, "Creating model package");

        validate(&package)?;
        track::<ModelPackage, _>("insert_one", self.storage.insert_one(package).await)
    }

    /// Replace an existing model package
    pub async fn update(
        &self,
        id: &str,
        package: ModelPackage,
    ) -> Result<Document<ModelPackage>, DomainError> {
        debug!(id, "Updating model package");

        let document_id = DocumentId::parse(id)?;
        validate(&package)?;

        track::<ModelPackage, _>(
            "find_one_and_replace",
            self.storage
                .find_one_and_replace(&Filter::id(document_id), package)
                .await,
        )?
        .ok_or_else(|| not_found(id))
    }

    /// Delete a model package by ID
    pub async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        debug!(id, "Deleting model package");

        let document_id = DocumentId::parse(id)?;
        let deleted = track::<ModelPackage, _>(
            "delete_one",
            self.storage.delete_one(&Filter::id(document_id)).await,
        )?;

        if deleted == 0 {
            return Err(not_found(id));
        }

        Ok(true)
    }

    /// Check that the backing collection is reachable
    pub async fn ping(&self) -> Result<(), DomainError> {
        track::<ModelPackage, _>("ping", self.storage.ping().await)
    }
}

fn validate(package: &ModelPackage) -> Result<(), DomainError> {
    validate_model_package(package).map_err(|e| DomainError::validation(e.to_string()))
}

fn not_found(id: &str) -> DomainError {
    DomainError::not_found(format!("Model package with id: {} not found", id))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde_json::json;

    use super::*;
    use crate::domain::storage::mock::MockStorage;

    fn create_service() -> ModelPackageService<MockStorage<ModelPackage>> {
        ModelPackageService::new(Arc::new(MockStorage::new()))
    }

    fn package(label: &str, date: &str) -> ModelPackage {
        ModelPackage {
            package_label: label.to_string(),
            model: json!({"kind": "xgboost", "blob": "AAEC"}),
            model_features: vec!["elo_diff".to_string(), "rest_days".to_string()],
            model_scores: HashMap::from([("accuracy".to_string(), 0.64)]),
            dataset: json!({"seasons": [2021, 2022, 2023]}),
            model_target: "home_win".to_string(),
            date_trained: date.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let service = create_service();
        let created = service.create(package("v1", "01-15-2024")).await.unwrap();

        let fetched = service.get(&created.id.to_string()).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_create_rejects_bad_date() {
        let service = create_service();

        let result = service.create(package("v1", "2024-01-15")).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));

        let result = service.create(package("v1", "02-30-2024")).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_list_all_returns_every_package() {
        let storage = MockStorage::new()
            .with_entity(package("v1", "01-15-2024"))
            .with_entity(package("v2", "02-01-2024"));
        let service = ModelPackageService::new(Arc::new(storage));

        let found = service.list(&ModelPackageQuery::new()).await.unwrap();
        assert_eq!(found.len(), 2);
    }

    #[tokio::test]
    async fn test_list_by_date_and_label() {
        let storage = MockStorage::new()
            .with_entity(package("v1", "01-15-2024"))
            .with_entity(package("v2", "01-15-2024"))
            .with_entity(package("v3", "02-01-2024"));
        let service = ModelPackageService::new(Arc::new(storage));

        let by_date = service
            .list(&ModelPackageQuery::new().with_date_trained("01-15-2024"))
            .await
            .unwrap();
        assert_eq!(by_date.len(), 2);

        let by_both = service
            .list(
                &ModelPackageQuery::new()
                    .with_date_trained("01-15-2024")
                    .with_package_label("v2"),
            )
            .await
            .unwrap();
        assert_eq!(by_both.len(), 1);
        assert_eq!(by_both[0].entity.package_label, "v2");

        let none = service
            .list(&ModelPackageQuery::new().with_package_label("v9"))
            .await;
        assert!(matches!(none, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_list_rejects_malformed_date_filter() {
        let service = create_service();

        let result = service
            .list(&ModelPackageQuery::new().with_date_trained("January 15"))
            .await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let service = create_service();
        let created = service.create(package("v1", "01-15-2024")).await.unwrap();
        let id = created.id.to_string();

        let updated = service
            .update(&id, package("v1-retrained", "03-01-2024"))
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.entity.package_label, "v1-retrained");

        assert!(service.delete(&id).await.unwrap());
        assert!(matches!(
            service.get(&id).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_invalid_id() {
        let service = create_service();

        assert!(matches!(
            service.delete("abc").await,
            Err(DomainError::InvalidId { .. })
        ));
    }

    #[tokio::test]
    async fn test_storage_error_is_propagated() {
        let storage = MockStorage::new().with_error("connection reset");
        let service = ModelPackageService::new(Arc::new(storage));

        let result = service.create(package("v1", "01-15-2024")).await;
        assert!(matches!(result, Err(DomainError::Storage { .. })));
    }
}
