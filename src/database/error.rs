use thiserror::Error;

/// Errors returned by the snippet and user stores
#[derive(Debug, Error)]
pub enum StoreError {
    /// The query matched no row (missing or expired record)
    #[error("no matching record found")]
    NoRecord,

    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}
