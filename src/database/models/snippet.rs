use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::database::StoreError;

/// A titled piece of text that stays visible until `expires`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Snippet {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
    pub expires: DateTime<Utc>,
}

/// Data access for snippets. Only unexpired rows are ever returned.
#[async_trait]
pub trait SnippetStore: Send + Sync {
    /// Insert a snippet expiring `expires_days` from now and return its id
    async fn insert(&self, title: &str, content: &str, expires_days: i32) -> Result<i64, StoreError>;

    /// Fetch one unexpired snippet; `StoreError::NoRecord` when absent
    async fn get(&self, id: i64) -> Result<Snippet, StoreError>;

    /// The ten most recently created unexpired snippets, newest first
    async fn latest(&self) -> Result<Vec<Snippet>, StoreError>;
}

/// Postgres-backed snippet store
#[derive(Clone)]
pub struct PgSnippetStore {
    pool: PgPool,
}

impl PgSnippetStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SnippetStore for PgSnippetStore {
    async fn insert(&self, title: &str, content: &str, expires_days: i32) -> Result<i64, StoreError> {
        let query = r#"
            INSERT INTO snippets (title, content, created, expires)
            VALUES ($1, $2, NOW(), NOW() + make_interval(days => $3))
            RETURNING id
        "#;

        let id: i64 = sqlx::query_scalar(query)
            .bind(title)
            .bind(content)
            .bind(expires_days)
            .fetch_one(&self.pool)
            .await?;

        tracing::debug!("Inserted snippet {} expiring in {} days", id, expires_days);
        Ok(id)
    }

    async fn get(&self, id: i64) -> Result<Snippet, StoreError> {
        let query = r#"
            SELECT id, title, content, created, expires
            FROM snippets
            WHERE expires > NOW() AND id = $1
        "#;

        sqlx::query_as::<_, Snippet>(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NoRecord)
    }

    async fn latest(&self) -> Result<Vec<Snippet>, StoreError> {
        let query = r#"
            SELECT id, title, content, created, expires
            FROM snippets
            WHERE expires > NOW()
            ORDER BY id DESC
            LIMIT 10
        "#;

        let snippets = sqlx::query_as::<_, Snippet>(query)
            .fetch_all(&self.pool)
            .await?;

        Ok(snippets)
    }
}
