// middleware/chain.rs - Declared middleware chains
//
// A chain is an ordered list of stages, outermost first. `Pipeline::apply`
// wraps a router in those stages so that the first stage sees the request
// first and the response last.

use axum::{middleware, Router};
use tower_http::catch_panic::CatchPanicLayer;
use tower_sessions::{
    cookie::{Key, SameSite},
    SessionManagerLayer, SessionStore,
};

use super::{auth, csrf, headers, recover, session};
use crate::config::SessionConfig;
use crate::state::AppState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    RecoverPanic,
    LogRequest,
    SecureHeaders,
    LoadAndSaveSession,
    NoSurf,
    Authenticate,
    RequireAuthentication,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chain {
    stages: Vec<Stage>,
}

impl Chain {
    pub fn new(stages: &[Stage]) -> Self {
        Self { stages: stages.to_vec() }
    }

    /// Wraps every request, static files and health check included
    pub fn standard() -> Self {
        Self::new(&[Stage::RecoverPanic, Stage::LogRequest, Stage::SecureHeaders])
    }

    /// Session-aware application routes
    pub fn dynamic() -> Self {
        Self::new(&[Stage::LoadAndSaveSession, Stage::NoSurf, Stage::Authenticate])
    }

    /// Application routes that need a logged-in user
    pub fn protected() -> Self {
        Self::dynamic().append(Stage::RequireAuthentication)
    }

    /// A new chain with `stage` innermost
    pub fn append(mut self, stage: Stage) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }
}

/// Everything the stages need to build their layers
pub struct Pipeline<Store> {
    state: AppState,
    session_store: Store,
    session_config: SessionConfig,
    session_key: Key,
}

impl<Store> Pipeline<Store>
where
    Store: SessionStore + Clone,
{
    pub fn new(state: AppState, session_store: Store) -> Self {
        let session_config = state.config.session.clone();
        let session_key = session::signing_key(&session_config);
        Self {
            state,
            session_store,
            session_config,
            session_key,
        }
    }

    /// Wrap `router` in the stages of `chain`
    pub fn apply(&self, chain: &Chain, router: Router<AppState>) -> Router<AppState> {
        chain
            .stages()
            .iter()
            .rev()
            .fold(router, |router, stage| self.layer(*stage, router))
    }

    fn layer(&self, stage: Stage, router: Router<AppState>) -> Router<AppState> {
        match stage {
            Stage::RecoverPanic => router.layer(CatchPanicLayer::custom(recover::recover_panic)),
            Stage::LogRequest => router.layer(middleware::from_fn(headers::log_request)),
            Stage::SecureHeaders => router.layer(middleware::from_fn(headers::secure_headers)),
            // Loads the session before the inner service runs; saves it and
            // renews the cookie once the response has been produced.
            Stage::LoadAndSaveSession => router.layer(
                SessionManagerLayer::new(self.session_store.clone())
                    .with_name(session::SESSION_COOKIE_NAME)
                    .with_http_only(true)
                    .with_same_site(SameSite::Lax)
                    .with_secure(self.session_config.secure_cookie)
                    .with_expiry(session::expiry(&self.session_config))
                    .with_signed(self.session_key.clone()),
            ),
            Stage::NoSurf => router.layer(middleware::from_fn_with_state(self.state.clone(), csrf::no_surf)),
            Stage::Authenticate => {
                router.layer(middleware::from_fn_with_state(self.state.clone(), auth::authenticate))
            }
            Stage::RequireAuthentication => router.layer(middleware::from_fn(auth::require_authentication)),
        }
    }
}
