// templates/mod.rs - Page template cache and rendering
//
// Every page under `html/pages/` is compiled once at startup into its own Tera
// instance together with `html/base.html` and all of `html/partials/`, keyed
// by the page file name (e.g. "home.html").

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tera::{Tera, Value};
use thiserror::Error;

use crate::database::Snippet;
use crate::error::AppError;
use crate::forms::SnippetCreateForm;

const BASE_TEMPLATE: &str = "base.html";
const PARTIALS_PREFIX: &str = "partials";

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to read template {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("the template {0} does not exist")]
    MissingPage(String),

    #[error(transparent)]
    Tera(#[from] tera::Error),
}

/// Per-request data handed to a page template
#[derive(Debug, Default, Serialize)]
pub struct TemplateData {
    pub current_year: i32,
    pub snippet: Option<Snippet>,
    pub snippets: Vec<Snippet>,
    pub form: Option<SnippetCreateForm>,
    pub flash: Option<String>,
    pub is_authenticated: bool,
    pub csrf_token: String,
}

impl TemplateData {
    pub fn new(flash: Option<String>, is_authenticated: bool, csrf_token: String) -> Self {
        Self {
            current_year: Utc::now().year(),
            flash,
            is_authenticated,
            csrf_token,
            ..Default::default()
        }
    }
}

/// Read-only after construction; shared between requests behind an `Arc`
pub struct TemplateCache {
    pages: HashMap<String, Tera>,
}

impl TemplateCache {
    /// Load base layout, partials and pages from an `html` directory
    pub fn new(html_dir: &Path) -> Result<Self, TemplateError> {
        let base = read_template(&html_dir.join(BASE_TEMPLATE))?;
        let partials = read_template_dir(&html_dir.join(PARTIALS_PREFIX))?
            .into_iter()
            .map(|(name, source)| (format!("{}/{}", PARTIALS_PREFIX, name), source))
            .collect::<Vec<_>>();
        let pages = read_template_dir(&html_dir.join("pages"))?;

        Self::from_sources(&base, &partials, &pages)
    }

    /// Build the cache from in-memory sources; partial names are used verbatim
    pub fn from_sources(
        base: &str,
        partials: &[(String, String)],
        pages: &[(String, String)],
    ) -> Result<Self, TemplateError> {
        let mut cache = HashMap::with_capacity(pages.len());

        for (name, source) in pages {
            let mut sources: Vec<(&str, &str)> = Vec::with_capacity(partials.len() + 2);
            sources.push((BASE_TEMPLATE, base));
            sources.extend(partials.iter().map(|(n, s)| (n.as_str(), s.as_str())));
            sources.push((name.as_str(), source.as_str()));

            let mut tera = Tera::default();
            tera.register_filter("human_date", human_date);
            tera.add_raw_templates(sources)?;

            cache.insert(name.clone(), tera);
        }

        tracing::info!("Template cache built with {} pages", cache.len());
        Ok(Self { pages: cache })
    }

    pub fn contains(&self, page: &str) -> bool {
        self.pages.contains_key(page)
    }

    /// Render `page` fully into memory, then turn it into a response with `status`.
    /// Nothing reaches the client unless rendering succeeded.
    pub fn render(&self, status: StatusCode, page: &str, data: &TemplateData) -> Result<Response, AppError> {
        let tera = self
            .pages
            .get(page)
            .ok_or_else(|| TemplateError::MissingPage(page.to_string()))?;

        let context = tera::Context::from_serialize(data).map_err(TemplateError::from)?;
        let body = tera.render(page, &context).map_err(TemplateError::from)?;

        Ok((status, Html(body)).into_response())
    }
}

fn read_template(path: &Path) -> Result<String, TemplateError> {
    fs::read_to_string(path).map_err(|source| TemplateError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// All `*.html` files directly inside `dir`, as (file name, contents), sorted by name
fn read_template_dir(dir: &Path) -> Result<Vec<(String, String)>, TemplateError> {
    let io_err = |source| TemplateError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut templates = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("html") {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        templates.push((name.to_string(), read_template(&path)?));
    }

    templates.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(templates)
}

/// Tera filter: RFC 3339 timestamp -> "02 Jan 2006 at 15:04" in UTC
fn human_date(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    match value {
        Value::Null => Ok(Value::String(String::new())),
        Value::String(s) => {
            let parsed = DateTime::parse_from_rfc3339(s)
                .map_err(|e| tera::Error::msg(format!("human_date: invalid timestamp '{}': {}", s, e)))?;
            Ok(Value::String(
                parsed.with_timezone(&Utc).format("%d %b %Y at %H:%M").to_string(),
            ))
        }
        other => Err(tera::Error::msg(format!("human_date: expected a timestamp, got {}", other))),
    }
}
