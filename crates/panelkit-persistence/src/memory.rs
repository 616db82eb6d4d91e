//! In-memory document store

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

use crate::{DocumentStore, check_collection};

#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: DashMap<String, DashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&self, collection: &str, key: &str, document: Value) {
        self.collections
            .entry(collection.to_string())
            .or_default()
            .insert(key.to_string(), document);
    }

    pub(crate) fn remove(&self, collection: &str, key: &str) -> bool {
        self.collections
            .get(collection)
            .is_some_and(|docs| docs.remove(key).is_some())
    }

    pub(crate) fn documents(&self, collection: &str) -> Vec<(String, Value)> {
        let mut documents: Vec<(String, Value)> = self
            .collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|entry| (entry.key().clone(), entry.value().clone()))
                    .collect()
            })
            .unwrap_or_default();
        documents.sort_by(|a, b| a.0.cmp(&b.0));
        documents
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, key: &str) -> anyhow::Result<Option<Value>> {
        check_collection(collection)?;
        Ok(self
            .collections
            .get(collection)
            .and_then(|docs| docs.get(key).map(|d| d.value().clone())))
    }

    async fn put(&self, collection: &str, key: &str, document: Value) -> anyhow::Result<()> {
        check_collection(collection)?;
        self.insert(collection, key, document);
        Ok(())
    }

    async fn delete(&self, collection: &str, key: &str) -> anyhow::Result<bool> {
        check_collection(collection)?;
        Ok(self.remove(collection, key))
    }

    async fn list(&self, collection: &str) -> anyhow::Result<Vec<(String, Value)>> {
        check_collection(collection)?;
        Ok(self.documents(collection))
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
