//! # Durable session storage
//!
//! One durable key holds the serialized [`Session`]; its presence at page
//! load is what makes the UI treat the user as logged in, and logout is
//! just removing it. Browser builds keep the key in `localStorage`, native
//! builds in a JSON file under the platform data directory, and tests in an
//! in-process slot.
//!
//! Reads and writes swallow storage failures — an unavailable storage area
//! degrades to "not logged in" rather than taking the page down.

use crate::user::Session;

const SESSION_KEY: &str = "greenplate.session";

#[derive(Clone, Debug)]
enum Slot {
    #[cfg(target_arch = "wasm32")]
    LocalStorage,
    #[cfg(not(target_arch = "wasm32"))]
    File(std::path::PathBuf),
    Memory(std::sync::Arc<std::sync::Mutex<Option<String>>>),
}

/// Handle to the single durable session key.
#[derive(Clone, Debug)]
pub struct SessionStore {
    slot: Slot,
}

impl SessionStore {
    /// The platform-appropriate durable store.
    pub fn open() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            Self {
                slot: Slot::LocalStorage,
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let base = dirs::data_dir()
                .unwrap_or_else(|| std::path::PathBuf::from("."))
                .join("greenplate");
            Self {
                slot: Slot::File(base.join("session.json")),
            }
        }
    }

    /// A non-durable store for tests.
    pub fn in_memory() -> Self {
        Self {
            slot: Slot::Memory(Default::default()),
        }
    }

    /// Restore the session, if one was persisted.
    pub fn load(&self) -> Option<Session> {
        serde_json::from_str(&self.read_raw()?).ok()
    }

    /// Persist the session under the durable key.
    pub fn save(&self, session: &Session) {
        if let Ok(text) = serde_json::to_string(session) {
            self.write_raw(&text);
        }
    }

    /// Remove the persisted session.
    pub fn clear(&self) {
        match &self.slot {
            #[cfg(target_arch = "wasm32")]
            Slot::LocalStorage => {
                if let Some(storage) = local_storage() {
                    let _ = storage.remove_item(SESSION_KEY);
                }
            }
            #[cfg(not(target_arch = "wasm32"))]
            Slot::File(path) => {
                let _ = std::fs::remove_file(path);
            }
            Slot::Memory(cell) => {
                *cell.lock().unwrap() = None;
            }
        }
    }

    fn read_raw(&self) -> Option<String> {
        match &self.slot {
            #[cfg(target_arch = "wasm32")]
            Slot::LocalStorage => local_storage()?.get_item(SESSION_KEY).ok()?,
            #[cfg(not(target_arch = "wasm32"))]
            Slot::File(path) => std::fs::read_to_string(path).ok(),
            Slot::Memory(cell) => cell.lock().unwrap().clone(),
        }
    }

    fn write_raw(&self, text: &str) {
        match &self.slot {
            #[cfg(target_arch = "wasm32")]
            Slot::LocalStorage => {
                if let Some(storage) = local_storage() {
                    let _ = storage.set_item(SESSION_KEY, text);
                }
            }
            #[cfg(not(target_arch = "wasm32"))]
            Slot::File(path) => {
                if let Some(parent) = path.parent() {
                    let _ = std::fs::create_dir_all(parent);
                }
                let _ = std::fs::write(path, text);
            }
            Slot::Memory(cell) => {
                *cell.lock().unwrap() = Some(text.to_string());
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session {
            id: "user-1".to_string(),
            name: "Ada".to_string(),
            email: "a@x.com".to_string(),
            phone: "5551234567".to_string(),
            is_logged_in: true,
        }
    }

    #[test]
    fn save_load_clear_round_trip() {
        let store = SessionStore::in_memory();
        assert!(store.load().is_none());

        store.save(&session());
        assert_eq!(store.load(), Some(session()));

        store.clear();
        assert!(store.load().is_none());
    }

    #[test]
    fn clear_is_idempotent() {
        let store = SessionStore::in_memory();
        store.clear();
        store.clear();
        assert!(store.load().is_none());
    }
}
