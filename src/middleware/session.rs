use tokio::task::JoinHandle;
use tower_sessions::{
    cookie::{time::Duration, Key},
    ExpiredDeletion, Expiry,
};

use crate::config::SessionConfig;

/// Session key for the one-shot message shown on the next rendered page
pub const FLASH_KEY: &str = "flash";

pub const SESSION_COOKIE_NAME: &str = "session";

/// How often expired session rows are swept from the store
pub const EXPIRED_DELETION_PERIOD: tokio::time::Duration = tokio::time::Duration::from_secs(5 * 60);

/// Sessions live for the configured lifetime after their last use
pub fn expiry(config: &SessionConfig) -> Expiry {
    Expiry::OnInactivity(Duration::hours(config.lifetime_hours))
}

/// Cookie signing key from the configured secret, or a per-process random key
pub fn signing_key(config: &SessionConfig) -> Key {
    match config.secret.as_deref().map(|s| Key::try_from(s.as_bytes())) {
        Some(Ok(key)) => key,
        Some(Err(e)) => {
            tracing::warn!("SESSION_SECRET unusable ({}), falling back to a random signing key", e);
            Key::generate()
        }
        None => {
            tracing::warn!("SESSION_SECRET not set, sessions will not survive a restart");
            Key::generate()
        }
    }
}

/// Periodically delete expired sessions until the returned task is aborted
pub fn spawn_expired_deletion<Store>(store: Store, period: tokio::time::Duration) -> JoinHandle<()>
where
    Store: ExpiredDeletion,
{
    tokio::task::spawn(async move {
        if let Err(e) = store.continuously_delete_expired(period).await {
            tracing::error!("Expired session deletion stopped: {}", e);
        }
    })
}
