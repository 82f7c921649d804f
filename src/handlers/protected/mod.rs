// handlers/protected/mod.rs - Handlers behind the authentication gate
//
// Routes here use the protected chain: the dynamic chain plus
// `require_authentication`, which redirects anonymous visitors to the login
// page and marks responses `Cache-Control: no-store`.

pub mod auth;
pub mod snippet;

pub use auth::user_logout_post;
pub use snippet::{snippet_create, snippet_create_post};
