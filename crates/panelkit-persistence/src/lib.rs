//! Panelkit Persistence - document storage for configuration
//!
//! Every configuration document is a JSON value addressed by
//! `(collection, key)`. Two backends implement [`DocumentStore`]:
//! - [`MemoryStore`]: process-local, lost on restart
//! - [`FileStore`]: one JSON snapshot file per collection

pub mod file;
pub mod memory;

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use panelkit_common::PanelError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Collection names used by the server
pub mod collections {
    pub const PAGES: &str = "pages";
    pub const SHOW_PAGES: &str = "show_pages";
    pub const LISTS: &str = "lists";
    pub const SHOW_CONFIGS: &str = "show_configs";
    pub const RESOURCES: &str = "resources";
    pub const SIDEBAR: &str = "sidebar";

    pub const ALL: [&str; 6] = [PAGES, SHOW_PAGES, LISTS, SHOW_CONFIGS, RESOURCES, SIDEBAR];
}

/// Document storage abstraction
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a document
    async fn get(&self, collection: &str, key: &str) -> anyhow::Result<Option<Value>>;

    /// Insert or replace a document
    async fn put(&self, collection: &str, key: &str, document: Value) -> anyhow::Result<()>;

    /// Remove a document, returning whether it existed
    async fn delete(&self, collection: &str, key: &str) -> anyhow::Result<bool>;

    /// All documents of a collection ordered by key
    async fn list(&self, collection: &str) -> anyhow::Result<Vec<(String, Value)>>;

    /// Backend name for logs
    fn backend(&self) -> &'static str;
}

/// Storage backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageMode {
    #[default]
    Memory,
    File,
}

impl StorageMode {
    pub fn as_str(self) -> &'static str {
        match self {
            StorageMode::Memory => "memory",
            StorageMode::File => "file",
        }
    }
}

impl std::fmt::Display for StorageMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for StorageMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(StorageMode::Memory),
            "file" => Ok(StorageMode::File),
            _ => Err(format!("Invalid storage mode: {}", s)),
        }
    }
}

/// Collection names double as file names, so keep them to `[a-z0-9_]`
pub(crate) fn check_collection(collection: &str) -> anyhow::Result<()> {
    let valid = !collection.is_empty()
        && collection
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(PanelError::Storage(format!("invalid collection name '{}'", collection)).into())
    }
}

/// Create the configured store
pub async fn create_store(mode: StorageMode, data_dir: impl AsRef<Path>) -> anyhow::Result<Arc<dyn DocumentStore>> {
    let store: Arc<dyn DocumentStore> = match mode {
        StorageMode::Memory => Arc::new(MemoryStore::new()),
        StorageMode::File => Arc::new(FileStore::open(data_dir).await?),
    };
    tracing::info!("Using {} document store", store.backend());
    Ok(store)
}

/// Fetch and deserialize a document
pub async fn get_as<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    collection: &str,
    key: &str,
) -> anyhow::Result<Option<T>> {
    match store.get(collection, key).await? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

/// Serialize and store a document
pub async fn put_as<T: Serialize + Sync>(
    store: &dyn DocumentStore,
    collection: &str,
    key: &str,
    document: &T,
) -> anyhow::Result<()> {
    store.put(collection, key, serde_json::to_value(document)?).await
}

/// Deserialize every document of a collection, skipping ones that fail
pub async fn list_as<T: DeserializeOwned>(store: &dyn DocumentStore, collection: &str) -> anyhow::Result<Vec<T>> {
    let documents = store.list(collection).await?;
    Ok(documents
        .into_iter()
        .filter_map(|(key, value)| match serde_json::from_value(value) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!("Skipping malformed document {}/{}: {}", collection, key, e);
                None
            }
        })
        .collect())
}
