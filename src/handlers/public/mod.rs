// handlers/public/mod.rs - Handlers reachable without logging in

pub mod auth;

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    response::Response,
};

use crate::error::AppError;
use crate::handlers::Page;
use crate::state::AppState;

pub use auth::*;

/// GET /ping - liveness check, outside the session chain
pub async fn ping() -> &'static str {
    "OK"
}

/// GET / - latest unexpired snippets
pub async fn home(State(state): State<AppState>, page: Page) -> Result<Response, AppError> {
    let snippets = state.snippets.latest().await?;

    let mut data = page.template_data().await?;
    data.snippets = snippets;

    state.templates.render(StatusCode::OK, "home.html", &data)
}

/// GET /snippet/view/:id - one snippet.
///
/// Ids that are not positive integers, or not even valid UTF-8, are reported
/// as 404 like unknown ids.
pub async fn snippet_view(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    page: Page,
) -> Result<Response, AppError> {
    let id = match id.map(|Path(id)| id.parse::<i64>()) {
        Ok(Ok(id)) if id >= 1 => id,
        _ => return Err(AppError::NotFound),
    };

    let snippet = state.snippets.get(id).await?;

    let mut data = page.template_data().await?;
    data.snippet = Some(snippet);

    state.templates.render(StatusCode::OK, "view.html", &data)
}
