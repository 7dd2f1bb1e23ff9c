//! Storage trait definition

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

use super::entity::{Document, StorageEntity};
use super::filter::Filter;

/// Document store client for one collection
///
/// Every method is a single store call; implementations provide
/// single-document atomicity and nothing more.
#[async_trait]
pub trait Storage<E>: Send + Sync + Debug
where
    E: StorageEntity + 'static,
{
    /// Returns every document matching the filter, in insertion order
    async fn find(&self, filter: &Filter) -> Result<Vec<Document<E>>, DomainError>;

    /// Returns the first document matching the filter
    async fn find_one(&self, filter: &Filter) -> Result<Option<Document<E>>, DomainError>;

    /// Inserts a new document; the store assigns its identifier
    async fn insert_one(&self, entity: E) -> Result<Document<E>, DomainError>;

    /// Replaces the body of the first matching document, returning it as stored
    async fn find_one_and_replace(
        &self,
        filter: &Filter,
        entity: E,
    ) -> Result<Option<Document<E>>, DomainError>;

    /// Deletes the first matching document, returns the number deleted
    async fn delete_one(&self, filter: &Filter) -> Result<u64, DomainError>;

    /// Deletes every matching document, returns the number deleted
    async fn delete_many(&self, filter: &Filter) -> Result<u64, DomainError>;

    /// Counts the documents matching the filter
    async fn count(&self, filter: &Filter) -> Result<u64, DomainError> {
        Ok(self.find(filter).await?.len() as u64)
    }

    /// Verifies the backing store is reachable
    async fn ping(&self) -> Result<(), DomainError>;
}
