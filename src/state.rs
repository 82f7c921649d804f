use std::sync::Arc;

use crate::config::AppConfig;
use crate::database::{SnippetStore, UserStore};
use crate::templates::TemplateCache;

/// Dependencies shared by every handler and middleware stage.
///
/// Built once at startup and never mutated; cloning only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub snippets: Arc<dyn SnippetStore>,
    pub users: Arc<dyn UserStore>,
    pub templates: Arc<TemplateCache>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        snippets: Arc<dyn SnippetStore>,
        users: Arc<dyn UserStore>,
        templates: TemplateCache,
    ) -> Self {
        Self {
            config: Arc::new(config),
            snippets,
            users,
            templates: Arc::new(templates),
        }
    }
}
