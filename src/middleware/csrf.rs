// middleware/csrf.rs - Session-bound CSRF tokens
//
// Every session carries one token. Safe requests get it as a cookie and as a
// `CsrfToken` request extension (rendered into forms); state-changing requests
// must echo it back in the `csrf_token` form field or the `X-CSRF-Token` header.

use axum::{
    body::{self, Body},
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
};
use tower_sessions::{
    cookie::{time::Duration, Cookie, SameSite},
    Session,
};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

/// Session key holding the token
pub const CSRF_TOKEN_KEY: &str = "csrf_token";
/// Name of the hidden form field and of the cookie
pub const CSRF_FIELD: &str = "csrf_token";
pub const CSRF_HEADER: &str = "x-csrf-token";

const MAX_FORM_BYTES: usize = 10 * 1024 * 1024;
const COOKIE_MAX_AGE_DAYS: i64 = 365;

/// The current session's token, available to handlers and templates
#[derive(Clone, Debug, Default)]
pub struct CsrfToken(pub String);

pub async fn no_surf(
    State(state): State<AppState>,
    session: Session,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = match session.get::<String>(CSRF_TOKEN_KEY).await? {
        Some(token) => token,
        None => {
            let token = generate_token();
            session.insert(CSRF_TOKEN_KEY, &token).await?;
            token
        }
    };

    let safe = is_safe_method(request.method());
    let (mut parts, body) = request.into_parts();

    let body = if safe {
        body
    } else {
        let bytes = body::to_bytes(body, MAX_FORM_BYTES)
            .await
            .map_err(|e| AppError::bad_request(format!("failed to read request body: {}", e)))?;

        let submitted = parts
            .headers
            .get(CSRF_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .or_else(|| form_token(&bytes));

        match submitted {
            Some(ref submitted) if tokens_match(submitted, &token) => {}
            Some(_) => {
                tracing::warn!("CSRF token mismatch on {} {}", parts.method, parts.uri);
                return Err(AppError::bad_request("CSRF token mismatch"));
            }
            None => {
                tracing::warn!("CSRF token missing on {} {}", parts.method, parts.uri);
                return Err(AppError::bad_request("CSRF token missing"));
            }
        }

        Body::from(bytes)
    };

    parts.extensions.insert(CsrfToken(token.clone()));
    let mut response = next.run(Request::from_parts(parts, body)).await;

    let headers = response.headers_mut();
    headers.append(header::VARY, HeaderValue::from_static("Cookie"));
    if safe {
        let cookie = token_cookie(&token, state.config.session.secure_cookie);
        match HeaderValue::from_str(&cookie.to_string()) {
            Ok(value) => {
                headers.append(header::SET_COOKIE, value);
            }
            Err(e) => tracing::warn!("Could not encode CSRF cookie: {}", e),
        }
    }

    Ok(response)
}

fn is_safe_method(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS | Method::TRACE)
}

fn generate_token() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

fn form_token(body: &[u8]) -> Option<String> {
    url::form_urlencoded::parse(body)
        .find(|(key, _)| key == CSRF_FIELD)
        .map(|(_, value)| value.into_owned())
}

fn token_cookie(token: &str, secure: bool) -> Cookie<'static> {
    Cookie::build((CSRF_FIELD, token.to_string()))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(Duration::days(COOKIE_MAX_AGE_DAYS))
        .build()
}

/// Comparison time depends only on the lengths
fn tokens_match(submitted: &str, expected: &str) -> bool {
    let (a, b) = (submitted.as_bytes(), expected.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
