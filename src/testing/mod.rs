// testing/mod.rs - In-memory collaborators and a request driver for router tests

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use chrono::{Duration as ChronoDuration, Utc};
use serde_json::json;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use tower_sessions::{
    cookie::{
        time::{Duration, OffsetDateTime},
        Cookie, CookieJar, Key,
    },
    session::{Id, Record},
    MemoryStore, SessionStore,
};

use crate::config::AppConfig;
use crate::database::{Snippet, SnippetStore, StoreError, UserStore};
use crate::middleware::{session::SESSION_COOKIE_NAME, AUTHENTICATED_USER_ID_KEY, CSRF_TOKEN_KEY};
use crate::routes;
use crate::state::AppState;
use crate::templates::TemplateCache;

/// 64+ bytes, as required for a signing key
pub const TEST_SECRET: &str = "test-secret-test-secret-test-secret-test-secret-test-secret-test-secret";
pub const TEST_CSRF_TOKEN: &str = "0123456789abcdef0123456789abcdef";
pub const TEST_USER_ID: i64 = 1;
pub const UNKNOWN_USER_ID: i64 = 99;

/// Snippet store backed by a vector; ids are assigned sequentially from 1
#[derive(Default)]
pub struct MockSnippetStore {
    snippets: Mutex<Vec<Snippet>>,
    fail: bool,
}

impl MockSnippetStore {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.fail {
            return Err(StoreError::Sqlx(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl SnippetStore for MockSnippetStore {
    async fn insert(&self, title: &str, content: &str, expires_days: i32) -> Result<i64, StoreError> {
        self.check()?;
        let mut snippets = self.snippets.lock().unwrap();
        let id = snippets.len() as i64 + 1;
        let now = Utc::now();
        snippets.push(Snippet {
            id,
            title: title.to_string(),
            content: content.to_string(),
            created: now,
            expires: now + ChronoDuration::days(expires_days as i64),
        });
        Ok(id)
    }

    async fn get(&self, id: i64) -> Result<Snippet, StoreError> {
        self.check()?;
        let now = Utc::now();
        self.snippets
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id && s.expires > now)
            .cloned()
            .ok_or(StoreError::NoRecord)
    }

    async fn latest(&self) -> Result<Vec<Snippet>, StoreError> {
        self.check()?;
        let now = Utc::now();
        let mut live: Vec<Snippet> = self
            .snippets
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.expires > now)
            .cloned()
            .collect();
        live.sort_by(|a, b| b.id.cmp(&a.id));
        live.truncate(10);
        Ok(live)
    }
}

/// Knows exactly one user, `TEST_USER_ID`
pub struct MockUserStore;

#[async_trait]
impl UserStore for MockUserStore {
    async fn exists(&self, id: i64) -> Result<bool, StoreError> {
        Ok(id == TEST_USER_ID)
    }
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::development();
    config.session.secure_cookie = false;
    config.session.secret = Some(TEST_SECRET.to_string());
    config.ui.dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("ui");
    config
}

pub fn test_state() -> AppState {
    test_state_with(MockSnippetStore::default())
}

pub fn test_state_with(snippets: MockSnippetStore) -> AppState {
    let config = test_config();
    let templates = TemplateCache::new(&config.ui.html_dir()).expect("templates should load");
    AppState::new(config, Arc::new(snippets), Arc::new(MockUserStore), templates)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn cookies(&self) -> Vec<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::to_string)
            .collect()
    }
}

/// Drives the full application router in-process
pub struct TestClient {
    pub state: AppState,
    sessions: MemoryStore,
    router: Router,
}

impl TestClient {
    pub fn new() -> Self {
        Self::from_state(test_state())
    }

    pub fn with_failing_snippets() -> Self {
        Self::from_state(test_state_with(MockSnippetStore::failing()))
    }

    fn from_state(state: AppState) -> Self {
        let sessions = MemoryStore::default();
        let router = routes::app(state.clone(), sessions.clone());
        Self {
            state,
            sessions,
            router,
        }
    }

    pub async fn get(&self, path: &str, cookie: Option<&str>) -> TestResponse {
        let mut builder = Request::builder().method("GET").uri(path);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(&self, path: &str, fields: &[(&str, &str)], cookie: Option<&str>) -> TestResponse {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish();

        let mut builder = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(body)).unwrap()).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        TestResponse {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }

    /// Seed a session claiming `user_id` with a known CSRF token and return the
    /// matching signed `Cookie` header value
    pub async fn session_for_user(&self, user_id: i64) -> String {
        let mut data = HashMap::new();
        data.insert(AUTHENTICATED_USER_ID_KEY.to_string(), json!(user_id));
        data.insert(CSRF_TOKEN_KEY.to_string(), json!(TEST_CSRF_TOKEN));

        let record = Record {
            id: Id::default(),
            data,
            expiry_date: OffsetDateTime::now_utc() + Duration::hours(1),
        };
        self.sessions.save(&record).await.unwrap();

        let key = Key::from(TEST_SECRET.as_bytes());
        let mut jar = CookieJar::new();
        jar.signed_mut(&key)
            .add(Cookie::new(SESSION_COOKIE_NAME, record.id.to_string()));
        let signed = jar.get(SESSION_COOKIE_NAME).unwrap().value().to_string();

        format!("{}={}", SESSION_COOKIE_NAME, signed)
    }

    pub async fn authenticated_session(&self) -> String {
        self.session_for_user(TEST_USER_ID).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_store_hides_expired_and_orders_newest_first() {
        let store = MockSnippetStore::default();
        for i in 0..12 {
            store.insert(&format!("s{}", i), "c", 1).await.unwrap();
        }
        store.snippets.lock().unwrap()[11].expires = Utc::now() - ChronoDuration::seconds(1);

        let latest = store.latest().await.unwrap();
        assert_eq!(latest.len(), 10);
        assert_eq!(latest[0].id, 11);
        assert!(matches!(store.get(12).await, Err(StoreError::NoRecord)));
        assert_eq!(store.get(3).await.unwrap().title, "s2");
    }
}
