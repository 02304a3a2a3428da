//! # Storage-agnostic collection access
//!
//! This module is the core of the data access layer. A [`StorageStrategy`]
//! is one concrete backend for the logical document store; [`Database`]
//! wraps whichever strategy was selected at startup and hands out
//! [`Collection`] facades, which are what application code talks to.
//!
//! ## [`StorageStrategy`] trait
//!
//! An async interface with five collection operations plus a reachability
//! probe. Implementations live in sibling modules:
//!
//! | Module | Strategy | Used for |
//! |--------|----------|----------|
//! | `remote` | PostgreSQL pool | authoritative store, server builds |
//! | `proxy` | REST calls | browser/native clients with a backend |
//! | `memory` | in-process map | tests and non-durable fallback |
//! | `file_store` | JSON file | durable mock, native |
//! | `idb` | IndexedDB | durable mock, web |
//!
//! ## Error policy
//!
//! Strategies return `Result` for every operation. [`Collection`] is the
//! operation boundary where transport failures are absorbed into safe
//! defaults: `None` for [`Collection::find_one`], an empty list for
//! [`Collection::find`], a zero count for [`Collection::update_one`] and
//! [`Collection::delete_one`]. The one exception is
//! [`Collection::insert_one`]: silently losing a write is not acceptable,
//! so its error propagates to the caller. Every absorbed failure is logged.

use crate::error::DalError;
use crate::query::{Document, Filter};

/// Async interface implemented by every storage backend.
pub trait StorageStrategy {
    fn find_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> impl std::future::Future<Output = Result<Option<Document>, DalError>>;
    fn find(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> impl std::future::Future<Output = Result<Vec<Document>, DalError>>;
    fn insert_one(
        &self,
        collection: &str,
        document: Document,
    ) -> impl std::future::Future<Output = Result<String, DalError>>;
    fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        patch: &Document,
    ) -> impl std::future::Future<Output = Result<u64, DalError>>;
    fn delete_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> impl std::future::Future<Output = Result<u64, DalError>>;
    fn ping(&self) -> impl std::future::Future<Output = Result<(), DalError>>;
}

/// Which backend the one-shot selection probe chose.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    /// Direct database connection; authoritative.
    Remote,
    /// REST calls to a backend service.
    Proxy,
    /// Durable local storage only.
    Mock,
}

impl Backend {
    /// True when operations reach a server rather than the local mock.
    pub fn is_connected(&self) -> bool {
        !matches!(self, Backend::Mock)
    }
}

/// A handle over the storage strategy selected at startup.
///
/// Constructed once (see [`crate::connect`]) and passed to whatever needs
/// storage; there is no ambient global database.
#[derive(Clone, Debug)]
pub struct Database<S: StorageStrategy> {
    store: S,
    backend: Backend,
}

impl<S: StorageStrategy> Database<S> {
    pub fn new(store: S, backend: Backend) -> Self {
        Self { store, backend }
    }

    /// Backend chosen by the selection probe. Fixed for the session.
    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// The raw strategy, with explicit errors. Server-side request handlers
    /// use this; application code goes through [`Database::collection`].
    pub fn store(&self) -> &S {
        &self.store
    }

    /// A facade over one named collection.
    pub fn collection<'a>(&'a self, name: &'a str) -> Collection<'a, S> {
        Collection {
            store: &self.store,
            name,
        }
    }
}

/// The operation boundary over one named collection.
///
/// Transport failures are absorbed here into safe defaults — to callers a
/// failed lookup reads the same as "not found" — except for
/// [`Collection::insert_one`], whose failure propagates.
pub struct Collection<'a, S: StorageStrategy> {
    store: &'a S,
    name: &'a str,
}

impl<S: StorageStrategy> Collection<'_, S> {
    pub async fn find_one(&self, filter: &Filter) -> Option<Document> {
        match self.store.find_one(self.name, filter).await {
            Ok(found) => found,
            Err(err) => {
                tracing::warn!(collection = self.name, %err, "findOne failed, treating as not found");
                None
            }
        }
    }

    pub async fn find(&self, filter: &Filter) -> Vec<Document> {
        match self.store.find(self.name, filter).await {
            Ok(docs) => docs,
            Err(err) => {
                tracing::warn!(collection = self.name, %err, "find failed, returning no documents");
                Vec::new()
            }
        }
    }

    /// Insert a document and return its backend-assigned id.
    pub async fn insert_one(&self, document: Document) -> Result<String, DalError> {
        self.store.insert_one(self.name, document).await
    }

    /// Patch the first matching document; returns the modified count.
    pub async fn update_one(&self, filter: &Filter, patch: &Document) -> u64 {
        match self.store.update_one(self.name, filter, patch).await {
            Ok(modified) => modified,
            Err(err) => {
                tracing::warn!(collection = self.name, %err, "updateOne failed, reporting zero modified");
                0
            }
        }
    }

    /// Delete the first matching document; returns the deleted count.
    pub async fn delete_one(&self, filter: &Filter) -> u64 {
        match self.store.delete_one(self.name, filter).await {
            Ok(deleted) => deleted,
            Err(err) => {
                tracing::warn!(collection = self.name, %err, "deleteOne failed, reporting zero deleted");
                0
            }
        }
    }
}

/// Assign the backend-owned fields of a new document (`id`, `createdAt`)
/// when the caller did not provide them. Returns the document id.
pub(crate) fn assign_insert_fields(document: &mut Document) -> String {
    let id = match document.get("id").and_then(serde_json::Value::as_str) {
        Some(existing) => existing.to_string(),
        None => {
            let id = uuid::Uuid::new_v4().to_string();
            document.insert("id".to_string(), serde_json::Value::String(id.clone()));
            id
        }
    };
    if !document.contains_key("createdAt") {
        document.insert(
            "createdAt".to_string(),
            serde_json::Value::from(current_timestamp()),
        );
    }
    id
}

/// Seconds since the Unix epoch, on both native and wasm targets.
pub(crate) fn current_timestamp() -> i64 {
    #[cfg(target_arch = "wasm32")]
    {
        (js_sys::Date::now() / 1000.0) as i64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Strategy whose transport is always down.
    struct FailingStore;

    impl StorageStrategy for FailingStore {
        async fn find_one(
            &self,
            _collection: &str,
            _filter: &Filter,
        ) -> Result<Option<Document>, DalError> {
            Err(DalError::Transport("connection refused".to_string()))
        }

        async fn find(&self, _collection: &str, _filter: &Filter) -> Result<Vec<Document>, DalError> {
            Err(DalError::Transport("connection refused".to_string()))
        }

        async fn insert_one(
            &self,
            _collection: &str,
            _document: Document,
        ) -> Result<String, DalError> {
            Err(DalError::Transport("connection refused".to_string()))
        }

        async fn update_one(
            &self,
            _collection: &str,
            _filter: &Filter,
            _patch: &Document,
        ) -> Result<u64, DalError> {
            Err(DalError::Transport("connection refused".to_string()))
        }

        async fn delete_one(&self, _collection: &str, _filter: &Filter) -> Result<u64, DalError> {
            Err(DalError::Transport("connection refused".to_string()))
        }

        async fn ping(&self) -> Result<(), DalError> {
            Err(DalError::Transport("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn transport_failures_absorb_into_safe_defaults() {
        let db = Database::new(FailingStore, Backend::Proxy);
        let users = db.collection("users");

        assert_eq!(users.find_one(&Filter::new().eq("email", "a@x.com")).await, None);
        assert!(users.find(&Filter::new()).await.is_empty());
        assert_eq!(users.update_one(&Filter::new(), &Document::new()).await, 0);
        assert_eq!(users.delete_one(&Filter::new()).await, 0);
    }

    #[tokio::test]
    async fn insert_failures_propagate() {
        let db = Database::new(FailingStore, Backend::Proxy);
        let users = db.collection("users");

        let result = users.insert_one(Document::new()).await;
        assert!(matches!(result, Err(DalError::Transport(_))));
    }

    #[test]
    fn insert_fields_are_assigned_when_absent() {
        let mut doc = json!({"email": "a@x.com"}).as_object().cloned().unwrap();
        let id = assign_insert_fields(&mut doc);

        assert!(!id.is_empty());
        assert_eq!(doc.get("id").and_then(|v| v.as_str()), Some(id.as_str()));
        assert!(doc.get("createdAt").and_then(|v| v.as_i64()).is_some());
    }

    #[test]
    fn caller_supplied_id_is_kept() {
        let mut doc = json!({"id": "user-42", "email": "a@x.com"})
            .as_object()
            .cloned()
            .unwrap();
        let id = assign_insert_fields(&mut doc);

        assert_eq!(id, "user-42");
        assert_eq!(doc.get("id").and_then(|v| v.as_str()), Some("user-42"));
    }
}
