use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::RwLock;
use uuid::Uuid;

use super::{BackendError, Document, DocumentStore, Fields};

/// How the in-memory backend names new documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdStrategy {
    /// Random v4 UUIDs in simple form.
    #[default]
    Uuid,
    /// First letter of the collection plus a per-collection counter: `c1`, `c2`, `p1`...
    Sequential,
}

#[derive(Debug, Default)]
struct Collections {
    documents: HashMap<String, Vec<Document>>,
    counters: HashMap<String, u64>,
}

/// Document store held entirely in process memory.
///
/// Collections keep insertion order. The store can be switched offline to
/// make every call fail the way an unreachable backend would.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<Collections>,
    ids: IdStrategy,
    offline: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ids(ids: IdStrategy) -> Self {
        Self {
            ids,
            ..Self::default()
        }
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::Relaxed);
    }

    pub fn is_offline(&self) -> bool {
        self.offline.load(Ordering::Relaxed)
    }

    /// Insert a document verbatim under a caller-chosen id, bypassing id assignment.
    pub async fn insert(&self, collection: &str, document: Document) {
        let mut guard = self.collections.write().await;
        guard
            .documents
            .entry(collection.to_string())
            .or_default()
            .push(document);
    }

    fn check_online(&self) -> Result<(), BackendError> {
        if self.is_offline() {
            Err(BackendError::Unavailable)
        } else {
            Ok(())
        }
    }

    fn next_id(&self, state: &mut Collections, collection: &str) -> String {
        match self.ids {
            IdStrategy::Uuid => Uuid::new_v4().simple().to_string(),
            IdStrategy::Sequential => {
                let counter = state.counters.entry(collection.to_string()).or_insert(0);
                *counter += 1;
                let prefix = collection.chars().next().unwrap_or('d');
                format!("{}{}", prefix, counter)
            }
        }
    }
}

impl DocumentStore for MemoryStore {
    async fn create(&self, collection: &str, fields: Fields) -> Result<String, BackendError> {
        self.check_online()?;
        let mut guard = self.collections.write().await;
        let state = &mut *guard;
        let id = self.next_id(state, collection);
        state
            .documents
            .entry(collection.to_string())
            .or_default()
            .push(Document {
                id: id.clone(),
                fields,
            });
        Ok(id)
    }

    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), BackendError> {
        self.check_online()?;
        let mut guard = self.collections.write().await;
        let doc = guard
            .documents
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
            .ok_or_else(|| BackendError::not_found(collection, id))?;
        for (key, value) in fields {
            doc.fields.insert(key, value);
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), BackendError> {
        self.check_online()?;
        let mut guard = self.collections.write().await;
        let docs = guard
            .documents
            .get_mut(collection)
            .ok_or_else(|| BackendError::not_found(collection, id))?;
        let index = docs
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| BackendError::not_found(collection, id))?;
        docs.remove(index);
        Ok(())
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>, BackendError> {
        self.check_online()?;
        let guard = self.collections.read().await;
        Ok(guard.documents.get(collection).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: serde_json::Value) -> Fields {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn sequential_ids_are_per_collection() {
        let store = MemoryStore::with_ids(IdStrategy::Sequential);
        assert_eq!(store.create("clients", fields(json!({"name": "A"}))).await.unwrap(), "c1");
        assert_eq!(store.create("clients", fields(json!({"name": "B"}))).await.unwrap(), "c2");
        assert_eq!(store.create("projects", fields(json!({"name": "W"}))).await.unwrap(), "p1");
    }

    #[tokio::test]
    async fn update_merges_top_level_fields() {
        let store = MemoryStore::new();
        let id = store
            .create("projects", fields(json!({"clientId": "c1", "name": "Website"})))
            .await
            .unwrap();
        store
            .update("projects", &id, fields(json!({"name": "Storefront"})))
            .await
            .unwrap();

        let docs = store.list("projects").await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].fields["name"], "Storefront");
        assert_eq!(docs[0].fields["clientId"], "c1");
    }

    #[tokio::test]
    async fn unknown_ids_fail() {
        let store = MemoryStore::new();
        let err = store.update("clients", "nope", Fields::new()).await.unwrap_err();
        assert!(matches!(err, BackendError::NotFound { .. }));
        let err = store.delete("clients", "nope").await.unwrap_err();
        assert!(matches!(err, BackendError::NotFound { .. }));
    }

    #[tokio::test]
    async fn delete_keeps_order_of_the_rest() {
        let store = MemoryStore::with_ids(IdStrategy::Sequential);
        for name in ["A", "B", "C"] {
            store.create("clients", fields(json!({"name": name}))).await.unwrap();
        }
        store.delete("clients", "c2").await.unwrap();
        let ids: Vec<String> = store
            .list("clients")
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, vec!["c1", "c3"]);
    }

    #[tokio::test]
    async fn offline_store_rejects_everything() {
        let store = MemoryStore::new();
        store.set_offline(true);
        assert_eq!(
            store.create("clients", Fields::new()).await.unwrap_err(),
            BackendError::Unavailable
        );
        assert_eq!(store.list("clients").await.unwrap_err(), BackendError::Unavailable);

        store.set_offline(false);
        assert!(store.list("clients").await.unwrap().is_empty());
    }
}
