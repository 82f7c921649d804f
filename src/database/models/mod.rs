pub mod snippet;
pub mod user;

pub use snippet::{PgSnippetStore, Snippet, SnippetStore};
pub use user::{PgUserStore, UserStore};
