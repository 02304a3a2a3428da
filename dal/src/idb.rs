//! # IndexedDB-backed durable mock — browser-side persistence
//!
//! [`IdbStore`] is the durable local strategy on the **web platform**. It
//! keeps the whole database — the map of collection name to document list —
//! serialized under a single durable key in the browser's IndexedDB via the
//! [`rexie`] crate, and performs a read-modify-write of that key on every
//! mutating operation.
//!
//! ## Database schema
//!
//! A single IndexedDB database named `"greenplate"` (version 1) with one
//! object store:
//!
//! | IndexedDB store | Key | Value |
//! |-----------------|-----|-------|
//! | `"kv"` | `"db"` | JSON text of the whole collection map |
//!
//! ## Connection management
//!
//! `IdbStore` is a zero-size struct that opens a fresh [`Rexie`] connection
//! on every operation. `Rexie` does not implement `Clone`, and reopening is
//! cheap because the browser caches IndexedDB connections internally.
//!
//! ## Error handling
//!
//! Reads swallow IndexedDB failures and degrade to "empty database" — a
//! corrupted or unavailable IndexedDB must not take the page down. Writes
//! report failures so that inserts can propagate them.

use std::collections::HashMap;

use rexie::{ObjectStore as RexieObjectStore, Rexie, TransactionMode};
use wasm_bindgen::JsValue;

use crate::error::DalError;
use crate::query::{Document, Filter};
use crate::store::{assign_insert_fields, StorageStrategy};

const DB_NAME: &str = "greenplate";
const DB_VERSION: u32 = 1;
const KV_STORE: &str = "kv";
const DB_KEY: &str = "db";

/// IndexedDB-backed strategy for web persistence.
#[derive(Clone, Debug, Default)]
pub struct IdbStore;

impl IdbStore {
    pub fn new() -> Self {
        Self
    }

    async fn open_db(&self) -> Result<Rexie, rexie::Error> {
        Rexie::builder(DB_NAME)
            .version(DB_VERSION)
            .add_object_store(RexieObjectStore::new(KV_STORE))
            .build()
            .await
    }

    /// Read the whole database from the single durable key, treating any
    /// IndexedDB failure as an empty database.
    async fn load(&self) -> HashMap<String, Vec<Document>> {
        let Ok(db) = self.open_db().await else {
            return HashMap::new();
        };
        let Ok(tx) = db.transaction(&[KV_STORE], TransactionMode::ReadOnly) else {
            return HashMap::new();
        };
        let Ok(store) = tx.store(KV_STORE) else {
            return HashMap::new();
        };
        let Ok(value) = store.get(JsValue::from_str(DB_KEY)).await else {
            return HashMap::new();
        };
        let Some(js_val) = value else {
            return HashMap::new();
        };
        let Ok(text) = serde_wasm_bindgen::from_value::<String>(js_val) else {
            return HashMap::new();
        };
        serde_json::from_str(&text).unwrap_or_default()
    }

    async fn save(&self, db_map: &HashMap<String, Vec<Document>>) -> Result<(), DalError> {
        let text = serde_json::to_string(db_map)?;
        let db = self
            .open_db()
            .await
            .map_err(|err| DalError::Storage(err.to_string()))?;
        let tx = db
            .transaction(&[KV_STORE], TransactionMode::ReadWrite)
            .map_err(|err| DalError::Storage(err.to_string()))?;
        let store = tx
            .store(KV_STORE)
            .map_err(|err| DalError::Storage(err.to_string()))?;

        let value = serde_wasm_bindgen::to_value(&text).unwrap_or(JsValue::NULL);
        store
            .put(&value, Some(&JsValue::from_str(DB_KEY)))
            .await
            .map_err(|err| DalError::Storage(err.to_string()))?;
        tx.done()
            .await
            .map_err(|err| DalError::Storage(err.to_string()))?;
        Ok(())
    }
}

impl StorageStrategy for IdbStore {
    async fn find_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<Document>, DalError> {
        let db = self.load().await;
        Ok(db
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| filter.matches(doc)).cloned()))
    }

    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>, DalError> {
        let db = self.load().await;
        Ok(db
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
        let mut db = self.load().await;
        db.entry(collection.to_string()).or_default().push(document);
        self.save(&db).await?;
        Ok(id)
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        patch: &Document,
    ) -> Result<u64, DalError> {
        let mut db = self.load().await;
        let Some(docs) = db.get_mut(collection) else {
            return Ok(0);
        };
        let Some(index) = docs.iter().position(|doc| filter.matches(doc)) else {
            return Ok(0);
        };
        for (key, value) in patch {
            docs[index].insert(key.clone(), value.clone());
        }
        self.save(&db).await?;
        Ok(1)
    }

    async fn delete_one(&self, collection: &str, filter: &Filter) -> Result<u64, DalError> {
        let mut db = self.load().await;
        let Some(docs) = db.get_mut(collection) else {
            return Ok(0);
        };
        let Some(index) = docs.iter().position(|doc| filter.matches(doc)) else {
            return Ok(0);
        };
        docs.remove(index);
        self.save(&db).await?;
        Ok(1)
    }

    async fn ping(&self) -> Result<(), DalError> {
        Ok(())
    }
}
