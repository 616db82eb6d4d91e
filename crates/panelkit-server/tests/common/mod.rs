//! Common test utilities for integration testing
//!
//! Builds an in-process application around a fresh [`AppState`] so every
//! test gets its own store, registry and page cache.

use std::path::Path;
use std::sync::Arc;

use config::{Config, File, FileFormat};
use panelkit_persistence::{DocumentStore, FileStore, MemoryStore};
use panelkit_registry::Registry;
use panelkit_server::{AppState, Configuration};

pub const POSTS: &str = "posts";

/// Configuration parsed from an inline YAML document
pub fn configuration(yaml: &str) -> Configuration {
    let config = Config::builder()
        .add_source(File::from_str(yaml, FileFormat::Yaml))
        .build()
        .expect("test configuration should parse");
    Configuration::from_config(config)
}

/// State over the given store with the built-in registry plus any
/// configured extensions
pub fn state_with(configuration: Configuration, store: Arc<dyn DocumentStore>) -> Arc<AppState> {
    let registry = Registry::with_builtins();
    let extensions = configuration
        .registry_extensions()
        .expect("extensions should parse");
    registry
        .apply_extensions(&extensions)
        .expect("extensions should register");
    Arc::new(
        AppState::new(configuration, store, Arc::new(registry)).expect("state should build"),
    )
}

/// In-memory state with default configuration
pub fn test_state() -> Arc<AppState> {
    state_with(Configuration::default(), Arc::new(MemoryStore::new()))
}

pub fn yaml_state(yaml: &str) -> Arc<AppState> {
    state_with(configuration(yaml), Arc::new(MemoryStore::new()))
}

pub async fn file_state(dir: &Path) -> Arc<AppState> {
    let store = FileStore::open(dir).await.expect("file store should open");
    state_with(Configuration::default(), Arc::new(store))
}

/// Initialize the application service for a state
macro_rules! init_app {
    ($state:expr) => {{
        let state = $state.clone();
        actix_web::test::init_service(
            actix_web::App::new()
                .configure(move |cfg| panelkit_server::startup::configure(cfg, state)),
        )
        .await
    }};
}

/// Send a request and return the status with the JSON body (`Null` when empty)
macro_rules! call_json {
    ($app:expr, $req:expr) => {{
        let resp = actix_web::test::call_service(&$app, $req.to_request()).await;
        let status = resp.status();
        let bytes = actix_web::test::read_body(resp).await;
        let body: serde_json::Value = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("response body should be JSON")
        };
        (status, body)
    }};
}

/// Send a request and return the status, content type and body text
macro_rules! call_text {
    ($app:expr, $req:expr) => {{
        let resp = actix_web::test::call_service(&$app, $req.to_request()).await;
        let status = resp.status();
        let content_type = resp
            .headers()
            .get(actix_web::http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let bytes = actix_web::test::read_body(resp).await;
        (status, content_type, String::from_utf8_lossy(&bytes).to_string())
    }};
}

/// Slugs of a page response, in stored order
pub fn slugs(page: &serde_json::Value) -> Vec<String> {
    page["blocks"]
        .as_array()
        .map(|blocks| {
            blocks
                .iter()
                .filter_map(|b| b["slug"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
