use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;
use tower_sessions::SessionStore;

use crate::handlers::{self, protected, public};
use crate::middleware::{Chain, Pipeline};
use crate::state::AppState;

/// The complete application: standard chain around the router, with the
/// dynamic and protected chains around their respective route groups.
/// Static files and `/ping` skip the session machinery entirely.
pub fn app<Store>(state: AppState, session_store: Store) -> Router
where
    Store: SessionStore + Clone,
{
    let pipeline = Pipeline::new(state.clone(), session_store);

    let router = Router::new()
        .nest_service("/static", ServeDir::new(state.config.ui.static_dir()))
        .route("/ping", get(public::ping))
        .merge(pipeline.apply(&Chain::dynamic(), dynamic_routes()))
        .merge(pipeline.apply(&Chain::protected(), protected_routes()))
        .fallback(handlers::not_found);

    pipeline.apply(&Chain::standard(), router).with_state(state)
}

fn dynamic_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(public::home))
        .route("/snippet/view/:id", get(public::snippet_view))
        .route("/user/signup", get(public::user_signup).post(public::user_signup_post))
        .route("/user/login", get(public::user_login).post(public::user_login_post))
}

fn protected_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/snippet/create",
            get(protected::snippet_create).post(protected::snippet_create_post),
        )
        .route("/user/logout", post(protected::user_logout_post))
}
