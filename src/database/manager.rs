use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::database::StoreError;

/// Opens and prepares the connection pool shared by the stores and the session store
pub struct DatabaseManager;

impl DatabaseManager {
    /// Connect a pool using the configured DSN and limits
    pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, StoreError> {
        if config.url.is_empty() {
            return Err(StoreError::ConfigMissing("DATABASE_URL"));
        }

        info!("Connecting to database at {}", Self::redact_dsn(&config.url));

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(&config.url)
            .await?;

        // Fail fast on bad credentials instead of on the first request
        sqlx::query("SELECT 1").execute(&pool).await?;

        Ok(pool)
    }

    /// Apply the embedded schema migrations for snippets and users
    pub async fn migrate(pool: &PgPool) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(pool).await?;
        info!("Database migrations applied");
        Ok(())
    }

    /// DSN suitable for logs: the password is replaced, unparsable input is hidden
    fn redact_dsn(dsn: &str) -> String {
        match url::Url::parse(dsn) {
            Ok(mut url) => {
                if url.password().is_some() {
                    let _ = url.set_password(Some("****"));
                }
                url.into()
            }
            Err(_) => "<unparsable DSN>".to_string(),
        }
    }
}
