pub mod auth;
pub mod chain;
pub mod csrf;
pub mod headers;
pub mod recover;
pub mod session;

pub use auth::{authenticate, require_authentication, RequestContext, AUTHENTICATED_USER_ID_KEY};
pub use chain::{Chain, Pipeline, Stage};
pub use csrf::{no_surf, CsrfToken, CSRF_FIELD, CSRF_TOKEN_KEY};
pub use headers::{log_request, secure_headers};
pub use recover::recover_panic;
pub use session::FLASH_KEY;
