//! In-memory storage implementation

use std::marker::PhantomData;
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::storage::{Document, DocumentId, Filter, Storage, StorageEntity};
use crate::domain::DomainError;

/// Thread-safe in-memory document store for a single collection
///
/// Documents are kept as serialized JSON bodies in insertion order, so filters
/// see exactly what a persistent backend would. Data is lost when the process
/// terminates.
#[derive(Debug)]
pub struct InMemoryStorage<E>
where
    E: StorageEntity,
{
    documents: RwLock<Vec<(DocumentId, Value)>>,
    _phantom: PhantomData<E>,
}

impl<E> Default for InMemoryStorage<E>
where
    E: StorageEntity,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> InMemoryStorage<E>
where
    E: StorageEntity,
{
    /// Creates a new empty in-memory storage
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(Vec::new()),
            _phantom: PhantomData,
        }
    }

    /// Creates storage pre-populated with entities
    pub fn with_entities(entities: Vec<E>) -> Result<Self, DomainError> {
        let storage = Self::new();
        {
            let mut documents = storage.documents.write().map_err(write_lock_error)?;

            for entity in entities {
                documents.push((DocumentId::generate(), to_body(&entity)?));
            }
        }
        Ok(storage)
    }
}

fn read_lock_error<T>(e: T) -> DomainError
where
    T: std::fmt::Display,
{
    DomainError::internal(format!("Failed to acquire read lock: {}", e))
}

fn write_lock_error<T>(e: T) -> DomainError
where
    T: std::fmt::Display,
{
    DomainError::internal(format!("Failed to acquire write lock: {}", e))
}

fn to_body<E: StorageEntity>(entity: &E) -> Result<Value, DomainError> {
    serde_json::to_value(entity)
        .map_err(|e| DomainError::storage(format!("Failed to serialize entity: {}", e)))
}

fn to_document<E: StorageEntity>(id: DocumentId, body: &Value) -> Result<Document<E>, DomainError> {
    let entity = serde_json::from_value(body.clone())
        .map_err(|e| DomainError::storage(format!("Failed to deserialize entity: {}", e)))?;
    Ok(Document::new(id, entity))
}

#[async_trait]
impl<E> Storage<E> for InMemoryStorage<E>
where
    E: StorageEntity + 'static,
{
    async fn find(&self, filter: &Filter) -> Result<Vec<Document<E>>, DomainError> {
        let documents = self.documents.read().map_err(read_lock_error)?;

        documents
            .iter()
            .filter(|(id, body)| filter.matches(id, body))
            .map(|(id, body)| to_document(*id, body))
            .collect()
    }

    async fn find_one(&self, filter: &Filter) -> Result<Option<Document<E>>, DomainError> {
        let documents = self.documents.read().map_err(read_lock_error)?;

        documents
            .iter()
            .find(|(id, body)| filter.matches(id, body))
            .map(|(id, body)| to_document(*id, body))
            .transpose()
    }

    async fn insert_one(&self, entity: E) -> Result<Document<E>, DomainError> {
        let body = to_body(&entity)?;
        let id = DocumentId::generate();
        let mut documents = self.documents.write().map_err(write_lock_error)?;

        documents.push((id, body));
        Ok(Document::new(id, entity))
    }

    async fn find_one_and_replace(
        &self,
        filter: &Filter,
        entity: E,
    ) -> Result<Option<Document<E>>, DomainError> {
        let body = to_body(&entity)?;
        let mut documents = self.documents.write().map_err(write_lock_error)?;

        match documents.iter_mut().find(|(id, doc)| filter.matches(id, doc)) {
            Some((id, doc)) => {
                *doc = body;
                to_document(*id, doc).map(Some)
            }
            None => Ok(None),
        }
    }

    async fn delete_one(&self, filter: &Filter) -> Result<u64, DomainError> {
        let mut documents = self.documents.write().map_err(write_lock_error)?;

        match documents.iter().position(|(id, doc)| filter.matches(id, doc)) {
            Some(index) => {
                documents.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_many(&self, filter: &Filter) -> Result<u64, DomainError> {
        let mut documents = self.documents.write().map_err(write_lock_error)?;

        let before = documents.len();
        documents.retain(|(id, doc)| !filter.matches(id, doc));
        Ok((before - documents.len()) as u64)
    }

    async fn count(&self, filter: &Filter) -> Result<u64, DomainError> {
        let documents = self.documents.read().map_err(read_lock_error)?;

        Ok(documents
            .iter()
            .filter(|(id, doc)| filter.matches(id, doc))
            .count() as u64)
    }

    async fn ping(&self) -> Result<(), DomainError> {
        let _documents = self.documents.read().map_err(read_lock_error)?;
        Ok(())
    }
}
