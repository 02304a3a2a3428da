//! # Filesystem-backed durable mock
//!
//! [`FileStore`] is the durable local strategy on native targets, the
//! counterpart of the browser's IndexedDB store. The entire database — a
//! map of collection name to document list — lives in one JSON file, and
//! every mutating operation is a read-modify-write of that file. Nothing
//! here is transactional across processes; the store exists so offline and
//! demo sessions keep their data across restarts.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! └── db.json        # { "users": [ {..}, {..} ], ... }
//! ```
//!
//! Use [`dirs::data_dir()`] to obtain a platform-appropriate base:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS | `~/Library/Application Support/greenplate/` |
//! | Linux | `~/.local/share/greenplate/` |
//! | Windows | `C:\Users\<user>\AppData\Roaming\greenplate\` |

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::DalError;
use crate::query::{Document, Filter};
use crate::store::{assign_insert_fields, StorageStrategy};

/// Filesystem-backed strategy for native persistence.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn db_path(&self) -> PathBuf {
        self.base.join("db.json")
    }

    /// Read the whole database, treating a missing or corrupt file as empty.
    fn load(&self) -> HashMap<String, Vec<Document>> {
        std::fs::read_to_string(self.db_path())
            .ok()
            .and_then(|text| serde_json::from_str(&text).ok())
            .unwrap_or_default()
    }

    fn save(&self, db: &HashMap<String, Vec<Document>>) -> Result<(), DalError> {
        std::fs::create_dir_all(&self.base).map_err(|err| DalError::Storage(err.to_string()))?;
        let text = serde_json::to_string(db)?;
        std::fs::write(self.db_path(), text).map_err(|err| DalError::Storage(err.to_string()))
    }
}

impl StorageStrategy for FileStore {
    async fn find_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<Document>, DalError> {
        let db = self.load();
        Ok(db
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| filter.matches(doc)).cloned()))
    }

    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>, DalError> {
        let db = self.load();
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
        let mut db = self.load();
        db.entry(collection.to_string()).or_default().push(document);
        self.save(&db)?;
        Ok(id)
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        patch: &Document,
    ) -> Result<u64, DalError> {
        let mut db = self.load();
        let Some(docs) = db.get_mut(collection) else {
            return Ok(0);
        };
        let Some(index) = docs.iter().position(|doc| filter.matches(doc)) else {
            return Ok(0);
        };
        for (key, value) in patch {
            docs[index].insert(key.clone(), value.clone());
        }
        self.save(&db)?;
        Ok(1)
    }

    async fn delete_one(&self, collection: &str, filter: &Filter) -> Result<u64, DalError> {
        let mut db = self.load();
        let Some(docs) = db.get_mut(collection) else {
            return Ok(0);
        };
        let Some(index) = docs.iter().position(|doc| filter.matches(doc)) else {
            return Ok(0);
        };
        docs.remove(index);
        self.save(&db)?;
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
    async fn documents_survive_reopening_the_store() {
        let dir = std::env::temp_dir().join(format!("greenplate_test_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);

        let store = FileStore::new(dir.clone());
        store
            .insert_one("users", doc(json!({"email": "a@x.com", "name": "Ada"})))
            .await
            .unwrap();

        // Re-open from the same directory
        let store2 = FileStore::new(dir.clone());
        let found = store2
            .find_one("users", &Filter::new().eq("email", "a@x.com"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.get("name"), Some(&json!("Ada")));

        store2
            .delete_one("users", &Filter::new().eq("email", "a@x.com"))
            .await
            .unwrap();
        assert!(store2
            .find("users", &Filter::new())
            .await
            .unwrap()
            .is_empty());

        // Cleanup
        let _ = std::fs::remove_dir_all(&dir);
    }
}
