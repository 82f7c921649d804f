use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::error::AppError;
use crate::state::AppState;

/// Session key holding the id of the logged-in user
pub const AUTHENTICATED_USER_ID_KEY: &str = "authenticatedUserID";

/// Where unauthenticated visitors of protected pages are sent
pub const LOGIN_PATH: &str = "/user/login";

/// Request-scoped authentication state, inserted by `authenticate`.
///
/// A request without this extension is treated as unauthenticated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub is_authenticated: bool,
}

impl RequestContext {
    pub fn from_request(request: &Request) -> Self {
        request
            .extensions()
            .get::<RequestContext>()
            .copied()
            .unwrap_or_default()
    }
}

/// Resolve the session's user id against the user store and record the outcome
/// in a `RequestContext`. A user deleted since login is simply unauthenticated.
pub async fn authenticate(
    State(state): State<AppState>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let mut context = RequestContext::default();

    if let Some(id) = session.get::<i64>(AUTHENTICATED_USER_ID_KEY).await? {
        if state.users.exists(id).await? {
            context.is_authenticated = true;
        } else {
            tracing::debug!("Session refers to unknown user {}", id);
        }
    }

    request.extensions_mut().insert(context);
    Ok(next.run(request).await)
}

/// Redirect to the login page unless `authenticate` marked the request as authenticated.
/// Authenticated responses must not be cached.
pub async fn require_authentication(request: Request, next: Next) -> Response {
    if !RequestContext::from_request(&request).is_authenticated {
        return Redirect::to(LOGIN_PATH).into_response();
    }

    let mut response = next.run(request).await;
    response
        .headers_mut()
        .append(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}
