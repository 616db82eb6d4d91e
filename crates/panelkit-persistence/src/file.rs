//! JSON-file document store
//!
//! Each collection is persisted as `{data_dir}/{collection}.json`, a JSON
//! object mapping keys to documents. Writes go to disk first and are only
//! committed to the in-memory copy once the snapshot has been replaced, so a
//! failed write leaves both views untouched.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use panelkit_common::PanelError;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::{DocumentStore, MemoryStore, check_collection};

#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
    memory: MemoryStore,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating it when missing and loading
    /// every existing collection snapshot.
    pub async fn open(dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| PanelError::Storage(format!("cannot create {}: {}", dir.display(), e)))?;

        let memory = MemoryStore::new();
        let mut entries = tokio::fs::read_dir(&dir).await?;
        let mut loaded = 0usize;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(collection) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if check_collection(collection).is_err() {
                continue;
            }

            let content = tokio::fs::read_to_string(&path).await?;
            let documents: BTreeMap<String, Value> = serde_json::from_str(&content).map_err(|e| {
                PanelError::Storage(format!("corrupt snapshot {}: {}", path.display(), e))
            })?;
            for (key, document) in documents {
                memory.insert(collection, &key, document);
                loaded += 1;
            }
        }

        tracing::info!("Loaded {} documents from {}", loaded, dir.display());

        Ok(Self {
            dir,
            memory,
            write_lock: Mutex::new(()),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn snapshot_path(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{}.json", collection))
    }

    async fn write_snapshot(&self, collection: &str, documents: BTreeMap<String, Value>) -> anyhow::Result<()> {
        let path = self.snapshot_path(collection);
        let tmp = self.dir.join(format!("{}.json.tmp", collection));
        let content = serde_json::to_string_pretty(&documents)?;

        tokio::fs::write(&tmp, content)
            .await
            .map_err(|e| PanelError::Storage(format!("cannot write {}: {}", tmp.display(), e)))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| PanelError::Storage(format!("cannot replace {}: {}", path.display(), e)))?;

        tracing::debug!("Wrote snapshot {}", path.display());
        Ok(())
    }

    fn current(&self, collection: &str) -> BTreeMap<String, Value> {
        self.memory.documents(collection).into_iter().collect()
    }
}

#[async_trait]
impl DocumentStore for FileStore {
    async fn get(&self, collection: &str, key: &str) -> anyhow::Result<Option<Value>> {
        self.memory.get(collection, key).await
    }

    async fn put(&self, collection: &str, key: &str, document: Value) -> anyhow::Result<()> {
        check_collection(collection)?;
        let _guard = self.write_lock.lock().await;

        let mut documents = self.current(collection);
        documents.insert(key.to_string(), document.clone());
        self.write_snapshot(collection, documents).await?;

        self.memory.insert(collection, key, document);
        Ok(())
    }

    async fn delete(&self, collection: &str, key: &str) -> anyhow::Result<bool> {
        check_collection(collection)?;
        let _guard = self.write_lock.lock().await;

        let mut documents = self.current(collection);
        if documents.remove(key).is_none() {
            return Ok(false);
        }
        self.write_snapshot(collection, documents).await?;

        Ok(self.memory.remove(collection, key))
    }

    async fn list(&self, collection: &str) -> anyhow::Result<Vec<(String, Value)>> {
        self.memory.list(collection).await
    }

    fn backend(&self) -> &'static str {
        "file"
    }
}
