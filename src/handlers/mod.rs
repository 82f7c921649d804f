// handlers/mod.rs - Route handlers, split by access tier
//
// public:    no login required (home, snippet view, signup/login, ping)
// protected: wrapped in the authentication gate (snippet create, logout)

pub mod protected;
pub mod public;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
};
use tower_sessions::Session;

use crate::error::AppError;
use crate::middleware::{CsrfToken, RequestContext, FLASH_KEY};
use crate::state::AppState;
use crate::templates::TemplateData;

/// Request-scoped state a page needs: the session plus what the dynamic
/// middleware chain attached to the request.
pub struct Page {
    session: Session,
    context: RequestContext,
    csrf_token: String,
}

impl Page {
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Fresh template data for this request. Pops the flash message, so call it
    /// only on paths that actually render a page.
    pub async fn template_data(&self) -> Result<TemplateData, AppError> {
        let flash = self.session.remove::<String>(FLASH_KEY).await?;
        Ok(TemplateData::new(
            flash,
            self.context.is_authenticated,
            self.csrf_token.clone(),
        ))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Page {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| AppError::server(anyhow::anyhow!("session unavailable: {}", msg)))?;

        let context = parts
            .extensions
            .get::<RequestContext>()
            .copied()
            .unwrap_or_default();

        let csrf_token = parts
            .extensions
            .get::<CsrfToken>()
            .map(|t| t.0.clone())
            .unwrap_or_default();

        Ok(Self {
            session,
            context,
            csrf_token,
        })
    }
}

/// Fallback for unmatched routes
pub async fn not_found() -> AppError {
    AppError::NotFound
}
