//! PostgreSQL document storage with connection pooling

use std::fmt::Debug;
use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::{Postgres, QueryBuilder, Row};

use crate::domain::storage::{Document, DocumentId, Filter, Storage, StorageEntity};
use crate::domain::DomainError;

/// PostgreSQL storage configuration
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to maintain
    pub min_connections: u32,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
    /// Idle timeout in seconds
    pub idle_timeout_secs: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/nfl_predictions".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 30,
            idle_timeout_secs: 600,
        }
    }
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn with_min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    pub fn with_connect_timeout(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self
    }

    pub fn with_idle_timeout(mut self, secs: u64) -> Self {
        self.idle_timeout_secs = secs;
        self
    }

    /// Opens a connection pool with these settings
    pub async fn connect(&self) -> Result<PgPool, DomainError> {
        if self.url.trim().is_empty() {
            return Err(DomainError::configuration("PostgreSQL URL is not set"));
        }

        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(Duration::from_secs(self.connect_timeout_secs))
            .idle_timeout(Duration::from_secs(self.idle_timeout_secs))
            .connect(&self.url)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to connect to PostgreSQL: {}", e)))
    }
}

/// PostgreSQL document storage for one collection
///
/// Each collection is a table of `(seq, key, data)` rows where `data` is the
/// JSONB document body. Filters compile to `data -> 'field' = value` predicates
/// that line up with the per-field expression indexes; only values are bound.
pub struct PostgresStorage<E>
where
    E: StorageEntity,
{
    pool: PgPool,
    table_name: String,
    _phantom: PhantomData<E>,
}

impl<E> Debug for PostgresStorage<E>
where
    E: StorageEntity,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresStorage")
            .field("table_name", &self.table_name)
            .finish()
    }
}

impl<E> PostgresStorage<E>
where
    E: StorageEntity,
{
    /// Creates storage for the entity's collection on an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            table_name: E::COLLECTION.to_string(),
            _phantom: PhantomData,
        }
    }

    /// Ensures the collection table and its field indexes exist
    pub async fn ensure_table(&self) -> Result<(), DomainError> {
        let query = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                seq BIGSERIAL,
                key VARCHAR(64) PRIMARY KEY,
                data JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
            self.table_name
        );

        sqlx::query(&query)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to create table: {}", e)))?;

        for field in E::INDEXED_FIELDS {
            let query = format!(
                "CREATE INDEX IF NOT EXISTS {table}_{field}_idx ON {table} (({path}))",
                table = self.table_name,
                field = field,
                path = field_path(field)
            );

            sqlx::query(&query)
                .execute(&self.pool)
                .await
                .map_err(|e| DomainError::storage(format!("Failed to create index: {}", e)))?;
        }

        Ok(())
    }

    /// `SELECT key FROM table WHERE filter ORDER BY seq LIMIT 1` as a subquery
    fn push_first_key(&self, builder: &mut QueryBuilder<'static, Postgres>, filter: &Filter) {
        builder.push(format!("(SELECT key FROM {} WHERE ", self.table_name));
        push_filter(builder, filter);
        builder.push(" ORDER BY seq LIMIT 1)");
    }
}

/// Appends a SQL predicate equivalent to `filter`
fn push_filter(builder: &mut QueryBuilder<'static, Postgres>, filter: &Filter) {
    match filter {
        Filter::All => {
            builder.push("TRUE");
        }
        Filter::Id(id) => {
            builder.push("key = ");
            builder.push_bind(id.to_string());
        }
        Filter::Eq { field, value } if value.is_null() => {
            let path = field_path(field);
            builder.push(format!("({path} IS NULL OR {path} = 'null'::jsonb)"));
        }
        Filter::Eq { field, value } => {
            builder.push(field_path(field));
            builder.push(" = ");
            builder.push_bind(value.clone());
        }
        Filter::And(filters) => push_group(builder, filters, " AND ", "TRUE"),
        Filter::Or(filters) => push_group(builder, filters, " OR ", "FALSE"),
    }
}

/// `data -> 'field'`, matching the expression indexes built by `ensure_table`
fn field_path(field: &str) -> String {
    format!("data -> '{}'", field.replace('\'', "''"))
}

fn push_group(
    builder: &mut QueryBuilder<'static, Postgres>,
    filters: &[Filter],
    separator: &str,
    empty: &str,
) {
    if filters.is_empty() {
        builder.push(empty);
        return;
    }

    builder.push("(");

    for (i, filter) in filters.iter().enumerate() {
        if i > 0 {
            builder.push(separator);
        }
        push_filter(builder, filter);
    }

    builder.push(")");
}

fn row_to_document<E: StorageEntity>(row: &PgRow) -> Result<Document<E>, DomainError> {
    let key: String = row.get("key");
    let data: serde_json::Value = row.get("data");

    let id = DocumentId::parse(&key)
        .map_err(|_| DomainError::storage(format!("Corrupt document key '{}'", key)))?;
    let entity = serde_json::from_value(data)
        .map_err(|e| DomainError::storage(format!("Failed to deserialize entity: {}", e)))?;

    Ok(Document::new(id, entity))
}

fn to_body<E: StorageEntity>(entity: &E) -> Result<serde_json::Value, DomainError> {
    serde_json::to_value(entity)
        .map_err(|e| DomainError::storage(format!("Failed to serialize entity: {}", e)))
}

#[async_trait]
impl<E> Storage<E> for PostgresStorage<E>
where
    E: StorageEntity + 'static,
{
    async fn find(&self, filter: &Filter) -> Result<Vec<Document<E>>, DomainError> {
        let mut builder = QueryBuilder::new(format!(
            "SELECT key, data FROM {} WHERE ",
            self.table_name
        ));
        push_filter(&mut builder, filter);
        builder.push(" ORDER BY seq");

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to find documents: {}", e)))?;

        rows.iter().map(row_to_document).collect()
    }

    async fn find_one(&self, filter: &Filter) -> Result<Option<Document<E>>, DomainError> {
        let mut builder = QueryBuilder::new(format!(
            "SELECT key, data FROM {} WHERE ",
            self.table_name
        ));
        push_filter(&mut builder, filter);
        builder.push(" ORDER BY seq LIMIT 1");

        let row = builder
            .build()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to find document: {}", e)))?;

        row.as_ref().map(row_to_document).transpose()
    }

    async fn insert_one(&self, entity: E) -> Result<Document<E>, DomainError> {
        let id = DocumentId::generate();
        let data = to_body(&entity)?;

        let query = format!("INSERT INTO {} (key, data) VALUES ($1, $2)", self.table_name);

        sqlx::query(&query)
            .bind(id.to_string())
            .bind(&data)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to insert document: {}", e)))?;

        Ok(Document::new(id, entity))
    }

    async fn find_one_and_replace(
        &self,
        filter: &Filter,
        entity: E,
    ) -> Result<Option<Document<E>>, DomainError> {
        let data = to_body(&entity)?;

        let mut builder = QueryBuilder::new(format!("UPDATE {} SET data = ", self.table_name));
        builder.push_bind(data);
        builder.push(", updated_at = NOW() WHERE key = ");
        self.push_first_key(&mut builder, filter);
        builder.push(" RETURNING key, data");

        let row = builder
            .build()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to replace document: {}", e)))?;

        row.as_ref().map(row_to_document).transpose()
    }

    async fn delete_one(&self, filter: &Filter) -> Result<u64, DomainError> {
        let mut builder = QueryBuilder::new(format!("DELETE FROM {} WHERE key = ", self.table_name));
        self.push_first_key(&mut builder, filter);

        let result = builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete document: {}", e)))?;

        Ok(result.rows_affected())
    }

    async fn delete_many(&self, filter: &Filter) -> Result<u64, DomainError> {
        let mut builder = QueryBuilder::new(format!("DELETE FROM {} WHERE ", self.table_name));
        push_filter(&mut builder, filter);

        let result = builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete documents: {}", e)))?;

        Ok(result.rows_affected())
    }

    async fn count(&self, filter: &Filter) -> Result<u64, DomainError> {
        let mut builder = QueryBuilder::new(format!(
            "SELECT COUNT(*) AS count FROM {} WHERE ",
            self.table_name
        ));
        push_filter(&mut builder, filter);

        let row = builder
            .build()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count documents: {}", e)))?;

        let count: i64 = row.get("count");
        Ok(count as u64)
    }

    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to reach PostgreSQL: {}", e)))?;

        Ok(())
    }
}
