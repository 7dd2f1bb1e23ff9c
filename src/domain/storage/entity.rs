//! Storage entity traits and types

use std::fmt::Debug;

use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use crate::domain::DomainError;

/// Store-assigned document identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Generates a fresh identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses an identifier received from a client
    pub fn parse(id: &str) -> Result<Self, DomainError> {
        Uuid::parse_str(id.trim())
            .map(Self)
            .map_err(|_| DomainError::invalid_id(format!("'{}' is not a valid document id", id)))
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trait for document bodies that can be stored in a collection
pub trait StorageEntity: Clone + Debug + Send + Sync + Serialize + DeserializeOwned {
    /// Collection (table) the documents live in
    const COLLECTION: &'static str;

    /// Top-level fields worth indexing for equality filters
    const INDEXED_FIELDS: &'static [&'static str] = &[];
}

/// A stored document: the store-assigned identifier plus the entity body
#[derive(Debug, Clone, PartialEq)]
pub struct Document<E> {
    pub id: DocumentId,
    pub entity: E,
}

impl<E> Document<E> {
    pub fn new(id: DocumentId, entity: E) -> Self {
        Self { id, entity }
    }
}
