use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::DalError;
use crate::query::{Document, Filter};
use crate::store::{assign_insert_fields, StorageStrategy};

/// In-memory strategy for tests and as a non-durable fallback.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    collections: Arc<Mutex<HashMap<String, Vec<Document>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently held in `collection`.
    pub fn count(&self, collection: &str) -> usize {
        self.collections
            .lock()
            .unwrap()
            .get(collection)
            .map_or(0, Vec::len)
    }
}

impl StorageStrategy for MemoryStore {
    async fn find_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<Document>, DalError> {
        let collections = self.collections.lock().unwrap();
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| filter.matches(doc)).cloned()))
    }

    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>, DalError> {
        let collections = self.collections.lock().unwrap();
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| filter.matches(doc))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn insert_one(&self, collection: &str, mut document: Document) -> Result<String, DalError> {
        let id = assign_insert_fields(&mut document);
        self.collections
            .lock()
            .unwrap()
            .entry(collection.to_string())
            .or_default()
            .push(document);
        Ok(id)
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        patch: &Document,
    ) -> Result<u64, DalError> {
        let mut collections = self.collections.lock().unwrap();
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(0);
        };
        let Some(index) = docs.iter().position(|doc| filter.matches(doc)) else {
            return Ok(0);
        };
        for (key, value) in patch {
            docs[index].insert(key.clone(), value.clone());
        }
        Ok(1)
    }

    async fn delete_one(&self, collection: &str, filter: &Filter) -> Result<u64, DalError> {
        let mut collections = self.collections.lock().unwrap();
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(0);
        };
        let Some(index) = docs.iter().position(|doc| filter.matches(doc)) else {
            return Ok(0);
        };
        docs.remove(index);
        Ok(1)
    }

    async fn ping(&self) -> Result<(), DalError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn insert_assigns_id_and_created_at() {
        let store = MemoryStore::new();

        let id = store
            .insert_one("users", doc(json!({"email": "a@x.com"})))
            .await
            .unwrap();

        let found = store
            .find_one("users", &Filter::new().eq("email", "a@x.com"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.get("id").and_then(|v| v.as_str()), Some(id.as_str()));
        assert!(found.get("createdAt").and_then(|v| v.as_i64()).is_some());
    }

    #[tokio::test]
    async fn find_one_returns_first_exact_match() {
        let store = MemoryStore::new();
        store
            .insert_one("users", doc(json!({"email": "a@x.com", "name": "Ada"})))
            .await
            .unwrap();
        store
            .insert_one("users", doc(json!({"email": "b@x.com", "name": "Bea"})))
            .await
            .unwrap();

        let found = store
            .find_one("users", &Filter::new().eq("email", "b@x.com"))
            .await
            .unwrap();
        assert_eq!(
            found.and_then(|d| d.get("name").cloned()),
            Some(json!("Bea"))
        );

        let missing = store
            .find_one("users", &Filter::new().eq("email", "c@x.com"))
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn find_with_empty_filter_returns_all() {
        let store = MemoryStore::new();
        store
            .insert_one("users", doc(json!({"email": "a@x.com"})))
            .await
            .unwrap();
        store
            .insert_one("users", doc(json!({"email": "b@x.com"})))
            .await
            .unwrap();

        assert_eq!(store.find("users", &Filter::new()).await.unwrap().len(), 2);
        assert_eq!(store.count("users"), 2);
    }

    #[tokio::test]
    async fn update_one_merges_patch_into_first_match() {
        let store = MemoryStore::new();
        store
            .insert_one("users", doc(json!({"email": "a@x.com", "phone": "111"})))
            .await
            .unwrap();

        let patch = doc(json!({"phone": "222", "plan": "keto"}));
        let modified = store
            .update_one("users", &Filter::new().eq("email", "a@x.com"), &patch)
            .await
            .unwrap();
        assert_eq!(modified, 1);

        let found = store
            .find_one("users", &Filter::new().eq("email", "a@x.com"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.get("phone"), Some(&json!("222")));
        assert_eq!(found.get("plan"), Some(&json!("keto")));

        let untouched = store
            .update_one("users", &Filter::new().eq("email", "nope"), &patch)
            .await
            .unwrap();
        assert_eq!(untouched, 0);
    }

    #[tokio::test]
    async fn delete_one_removes_a_single_document() {
        let store = MemoryStore::new();
        store
            .insert_one("users", doc(json!({"email": "a@x.com"})))
            .await
            .unwrap();
        store
            .insert_one("users", doc(json!({"email": "b@x.com"})))
            .await
            .unwrap();

        let deleted = store
            .delete_one("users", &Filter::new().eq("email", "a@x.com"))
            .await
            .unwrap();
        assert_eq!(deleted, 1);
        assert_eq!(store.count("users"), 1);

        let missing = store
            .delete_one("users", &Filter::new().eq("email", "a@x.com"))
            .await
            .unwrap();
        assert_eq!(missing, 0);
    }
}
