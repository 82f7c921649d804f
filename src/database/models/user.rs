use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::StoreError;

/// Data access for user accounts. Only existence checks are needed by the
/// request pipeline; account management lives outside this crate.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn exists(&self, id: i64) -> Result<bool, StoreError>;
}

/// Postgres-backed user store
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn exists(&self, id: i64) -> Result<bool, StoreError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT true FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }
}
