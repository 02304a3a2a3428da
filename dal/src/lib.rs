pub mod config;
pub mod error;
pub mod query;
pub mod store;

mod memory;
pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
mod file_store;
#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod idb;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use idb::IdbStore;

mod proxy;
pub use proxy::ProxyStore;

#[cfg(feature = "server")]
mod remote;
#[cfg(feature = "server")]
pub use remote::RemoteStore;

mod select;
pub use select::{connect, LocalStore, Store};

pub use config::DalConfig;
pub use error::DalError;
pub use query::{Document, Filter};
pub use store::{Backend, Collection, Database, StorageStrategy};
