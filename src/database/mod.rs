pub mod error;
pub mod manager;
pub mod models;

pub use error::StoreError;
pub use manager::DatabaseManager;
pub use models::{PgSnippetStore, PgUserStore, Snippet, SnippetStore, UserStore};
