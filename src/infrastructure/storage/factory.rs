//! Document store selection and lifecycle

use std::sync::Arc;

use sqlx::postgres::PgPool;
use tracing::info;

use crate::domain::storage::{Storage, StorageEntity};
use crate::domain::DomainError;

use super::in_memory::InMemoryStorage;
use super::postgres::{PostgresConfig, PostgresStorage};

/// Supported storage types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageType {
    /// In-memory storage (for testing/development)
    InMemory,
    /// PostgreSQL storage
    Postgres,
}

impl StorageType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Some(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Some(Self::Postgres),
            _ => None,
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone)]
pub enum StorageConfig {
    /// In-memory storage configuration
    InMemory,
    /// PostgreSQL storage configuration
    Postgres(PostgresConfig),
}

impl StorageConfig {
    /// Creates an in-memory storage configuration
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Creates a PostgreSQL storage configuration
    pub fn postgres(config: PostgresConfig) -> Self {
        Self::Postgres(config)
    }

    /// Returns the storage type
    pub fn storage_type(&self) -> StorageType {
        match self {
            Self::InMemory => StorageType::InMemory,
            Self::Postgres(_) => StorageType::Postgres,
        }
    }
}

/// Process-wide handle to the document store
///
/// Built once at startup, it hands out one collection handle per entity type
/// and is closed during shutdown. In-memory collections are created fresh on
/// every call to [`DocumentStore::collection`], so callers keep the handle
/// they are given.
#[derive(Debug, Clone)]
pub enum DocumentStore {
    InMemory,
    Postgres(PgPool),
}

impl DocumentStore {
    /// Connects to the configured backend
    pub async fn connect(config: &StorageConfig) -> Result<Self, DomainError> {
        match config {
            StorageConfig::InMemory => {
                info!("Using in-memory document store");
                Ok(Self::InMemory)
            }
            StorageConfig::Postgres(pg_config) => {
                let pool = pg_config.connect().await?;
                info!(
                    max_connections = pg_config.max_connections,
                    "Connected to PostgreSQL document store"
                );
                Ok(Self::Postgres(pool))
            }
        }
    }

    /// Returns the storage type backing this store
    pub fn storage_type(&self) -> StorageType {
        match self {
            Self::InMemory => StorageType::InMemory,
            Self::Postgres(_) => StorageType::Postgres,
        }
    }

    /// Opens the collection for an entity type, creating it if needed
    pub async fn collection<E>(&self) -> Result<Arc<dyn Storage<E>>, DomainError>
    where
        E: StorageEntity + 'static,
    {
        match self {
            Self::InMemory => Ok(Arc::new(InMemoryStorage::<E>::new())),
            Self::Postgres(pool) => {
                let storage = PostgresStorage::<E>::new(pool.clone());
                storage.ensure_table().await?;
                Ok(Arc::new(storage))
            }
        }
    }

    /// Verifies the backend is reachable
    pub async fn ping(&self) -> Result<(), DomainError> {
        match self {
            Self::InMemory => Ok(()),
            Self::Postgres(pool) => {
                sqlx::query("SELECT 1")
                    .execute(pool)
                    .await
                    .map_err(|e| {
                        DomainError::storage(format!("Failed to reach PostgreSQL: {}", e))
                    })?;
                Ok(())
            }
        }
    }

    /// Releases backend connections
    pub async fn close(&self) {
        if let Self::Postgres(pool) = self {
            pool.close().await;
            info!("Closed PostgreSQL document store");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::storage::Filter;
    use crate::domain::Prediction;

    #[test]
    fn test_storage_type_from_str() {
        assert_eq!(
            StorageType::from_str("memory"),
            Some(StorageType::InMemory)
        );
        assert_eq!(
            StorageType::from_str("in-memory"),
            Some(StorageType::InMemory)
        );
        assert_eq!(
            StorageType::from_str("postgres"),
            Some(StorageType::Postgres)
        );
        assert_eq!(
            StorageType::from_str("PostgreSQL"),
            Some(StorageType::Postgres)
        );
        assert_eq!(StorageType::from_str("pg"), Some(StorageType::Postgres));
        assert_eq!(StorageType::from_str("mongo"), None);
    }

    #[test]
    fn test_storage_config_types() {
        let in_memory = StorageConfig::in_memory();
        assert_eq!(in_memory.storage_type(), StorageType::InMemory);

        let postgres = StorageConfig::postgres(PostgresConfig::new("postgres://localhost/test"));
        assert_eq!(postgres.storage_type(), StorageType::Postgres);
    }

    #[test]
    fn test_storage_config_postgres() {
        let config = PostgresConfig::new("postgres://localhost/test").with_max_connections(20);
        let storage_config = StorageConfig::postgres(config.clone());

        if let StorageConfig::Postgres(pg_config) = storage_config {
            assert_eq!(pg_config.url, config.url);
            assert_eq!(pg_config.max_connections, 20);
        } else {
            panic!("Expected Postgres config");
        }
    }

    #[tokio::test]
    async fn test_in_memory_store_lifecycle() {
        let store = DocumentStore::connect(&StorageConfig::in_memory())
            .await
            .unwrap();
        assert_eq!(store.storage_type(), StorageType::InMemory);
        assert!(store.ping().await.is_ok());

        let predictions = store.collection::<Prediction>().await.unwrap();
        assert_eq!(predictions.count(&Filter::all()).await.unwrap(), 0);
        assert!(predictions.ping().await.is_ok());

        store.close().await;
    }
}
