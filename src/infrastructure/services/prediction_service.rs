//! Prediction service - CRUD operations over the predictions collection

use std::sync::Arc;

use tracing::debug;

use crate::domain::storage::{Document, DocumentId, Filter, Storage};
use crate::domain::{validate_prediction, DomainError, Prediction, PredictionQuery};

use super::track;

/// Prediction service for CRUD operations
#[derive(Debug)]
pub struct PredictionService<S: Storage<Prediction> + ?Sized> {
    storage: Arc<S>,
}

impl<S: Storage<Prediction> + ?Sized> PredictionService<S> {
    /// Create a new PredictionService with the given storage
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// List predictions matching the query
    ///
    /// Fails with `NotFound` when nothing matches.
    pub async fn list(
        &self,
        query: &PredictionQuery,
    ) -> Result<Vec<Document<Prediction>>, DomainError> {
        debug!(?query, "Listing predictions");

        let filter = query.to_filter();
        let unfiltered = filter.is_all();
        let predictions = track::<Prediction, _>("find", self.storage.find(&filter).await)?;

        if predictions.is_empty() {
            return Err(if unfiltered {
                DomainError::not_found("No predictions found")
            } else {
                DomainError::not_found("No predictions found with the given parameters")
            });
        }

        Ok(predictions)
    }

    /// Get a prediction by ID
    pub async fn get(&self, id: &str) -> Result<Document<Prediction>, DomainError> {
        debug!(id, "Getting prediction");

        let document_id = DocumentId::parse(id)?;
        track::<Prediction, _>(
            "find_one",
            self.storage.find_one(&Filter::id(document_id)).await,
        )?
        .ok_or_else(|| not_found(id))
    }

    /// Create a new prediction
    pub async fn create(&self, prediction: Prediction) -> Result<Document<Prediction>, DomainError> {
        debug!(
            home_team = %prediction.home_team,
            away_team = %prediction.away_team,
            "Creating prediction"
        );

        let prediction = prediction.trimmed();
        validate(&prediction)?;
        track::<Prediction, _>("insert_one", self.storage.insert_one(prediction).await)
    }

    /// Replace an existing prediction
    pub async fn update(
        &self,
        id: &str,
        prediction: Prediction,
    ) -> Result<Document<Prediction>, DomainError> {
        debug!(id, "Updating prediction");

        let document_id = DocumentId::parse(id)?;
        let prediction = prediction.trimmed();
        validate(&prediction)?;

        track::<Prediction, _>(
            "find_one_and_replace",
            self.storage
                .find_one_and_replace(&Filter::id(document_id), prediction)
                .await,
        )?
        .ok_or_else(|| not_found(id))
    }

    /// Delete a prediction by ID
    pub async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        debug!(id, "Deleting prediction");

        let document_id = DocumentId::parse(id)?;
        let deleted = track::<Prediction, _>(
            "delete_one",
            self.storage.delete_one(&Filter::id(document_id)).await,
        )?;

        if deleted == 0 {
            return Err(not_found(id));
        }

        Ok(true)
    }

    /// Delete every prediction; fails when the collection was already empty
    pub async fn delete_all(&self) -> Result<bool, DomainError> {
        debug!("Deleting all predictions");

        let deleted =
            track::<Prediction, _>("delete_many", self.storage.delete_many(&Filter::all()).await)?;

        if deleted == 0 {
            return Err(DomainError::not_found("No predictions deleted"));
        }

        debug!(deleted, "Deleted all predictions");
        Ok(true)
    }

    /// Check that the backing collection is reachable
    pub async fn ping(&self) -> Result<(), DomainError> {
        track::<Prediction, _>("ping", self.storage.ping().await)
    }
}

fn validate(prediction: &Prediction) -> Result<(), DomainError> {
    validate_prediction(prediction).map_err(|e| DomainError::validation(e.to_string()))
}

fn not_found(id: &str) -> DomainError {
    DomainError::not_found(format!("Prediction with id: {} not found", id))
}
