//! # One-shot backend selection
//!
//! [`connect`] probes the preferred backend once, under an explicit timeout,
//! and on failure permanently falls back to the durable local mock for the
//! rest of the session. The choice is never re-evaluated: a backend that
//! comes up later is not picked up until the next launch. [`Store`] is the
//! tagged variant holding whichever strategy won, so call sites never
//! branch on the backend themselves.

use std::future::Future;
use std::time::Duration;

use crate::config::DalConfig;
use crate::error::DalError;
use crate::query::{Document, Filter};
use crate::store::{Backend, Database, StorageStrategy};
use crate::ProxyStore;

#[cfg(feature = "server")]
use crate::RemoteStore;

/// Platform alias for the durable local mock.
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type LocalStore = crate::IdbStore;
#[cfg(all(target_arch = "wasm32", not(feature = "web")))]
pub type LocalStore = crate::MemoryStore;
#[cfg(not(target_arch = "wasm32"))]
pub type LocalStore = crate::FileStore;

/// The selected storage strategy, one variant per backend.
#[derive(Clone, Debug)]
pub enum Store {
    #[cfg(feature = "server")]
    Remote(RemoteStore),
    Proxy(ProxyStore),
    Mock(LocalStore),
}

impl StorageStrategy for Store {
    async fn find_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<Document>, DalError> {
        match self {
            #[cfg(feature = "server")]
            Store::Remote(store) => store.find_one(collection, filter).await,
            Store::Proxy(store) => store.find_one(collection, filter).await,
            Store::Mock(store) => store.find_one(collection, filter).await,
        }
    }

    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>, DalError> {
        match self {
            #[cfg(feature = "server")]
            Store::Remote(store) => store.find(collection, filter).await,
            Store::Proxy(store) => store.find(collection, filter).await,
            Store::Mock(store) => store.find(collection, filter).await,
        }
    }

    async fn insert_one(&self, collection: &str, document: Document) -> Result<String, DalError> {
        match self {
            #[cfg(feature = "server")]
            Store::Remote(store) => store.insert_one(collection, document).await,
            Store::Proxy(store) => store.insert_one(collection, document).await,
            Store::Mock(store) => store.insert_one(collection, document).await,
        }
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        patch: &Document,
    ) -> Result<u64, DalError> {
        match self {
            #[cfg(feature = "server")]
            Store::Remote(store) => store.update_one(collection, filter, patch).await,
            Store::Proxy(store) => store.update_one(collection, filter, patch).await,
            Store::Mock(store) => store.update_one(collection, filter, patch).await,
        }
    }

    async fn delete_one(&self, collection: &str, filter: &Filter) -> Result<u64, DalError> {
        match self {
            #[cfg(feature = "server")]
            Store::Remote(store) => store.delete_one(collection, filter).await,
            Store::Proxy(store) => store.delete_one(collection, filter).await,
            Store::Mock(store) => store.delete_one(collection, filter).await,
        }
    }

    async fn ping(&self) -> Result<(), DalError> {
        match self {
            #[cfg(feature = "server")]
            Store::Remote(store) => store.ping().await,
            Store::Proxy(store) => store.ping().await,
            Store::Mock(store) => store.ping().await,
        }
    }
}

/// Probe the preferred backend and return a database handle.
///
/// Preference order: remote database (server builds with a configured URL),
/// then the REST proxy, then the always-available local mock.
pub async fn connect(config: &DalConfig) -> Database<Store> {
    #[cfg(feature = "server")]
    if let Some(url) = &config.database_url {
        match with_timeout(config.probe_timeout, RemoteStore::connect(url)).await {
            Ok(store) => return Database::new(Store::Remote(store), Backend::Remote),
            Err(err) => {
                tracing::warn!(%err, "remote database unreachable, trying next backend");
            }
        }
    }

    if let Some(base_url) = &config.proxy_base_url {
        let proxy = ProxyStore::new(base_url.clone(), config.api_key.clone());
        match with_timeout(config.probe_timeout, proxy.ping()).await {
            Ok(()) => return Database::new(Store::Proxy(proxy), Backend::Proxy),
            Err(err) => {
                tracing::warn!(%err, "proxy unreachable, falling back to local mock");
            }
        }
    }

    Database::new(Store::Mock(local_store(config)), Backend::Mock)
}

fn local_store(config: &DalConfig) -> LocalStore {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        let _ = config;
        crate::IdbStore::new()
    }
    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    {
        let _ = config;
        crate::MemoryStore::new()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let base = config.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| std::path::PathBuf::from("."))
                .join("greenplate")
        });
        crate::FileStore::new(base)
    }
}

/// Bound `operation` by `duration`, reporting [`DalError::Timeout`] when it
/// does not finish in time.
async fn with_timeout<T>(
    duration: Duration,
    operation: impl Future<Output = Result<T, DalError>>,
) -> Result<T, DalError> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        match tokio::time::timeout(duration, operation).await {
            Ok(result) => result,
            Err(_) => Err(DalError::Timeout),
        }
    }
    #[cfg(target_arch = "wasm32")]
    {
        use futures::future::{select, Either};
        let deadline = gloo_timers::future::sleep(duration);
        futures::pin_mut!(operation);
        futures::pin_mut!(deadline);
        match select(operation, deadline).await {
            Either::Left((result, _)) => result,
            Either::Right(((), _)) => Err(DalError::Timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn connect_without_backends_falls_back_to_mock() {
        let config = DalConfig {
            data_dir: Some(std::env::temp_dir().join("greenplate_select_test")),
            ..DalConfig::default()
        };
        let db = connect(&config).await;
        assert_eq!(db.backend(), Backend::Mock);
    }

    #[tokio::test]
    async fn slow_probes_are_cut_off() {
        let never = std::future::pending::<Result<(), DalError>>();
        let result = with_timeout(Duration::from_millis(10), never).await;
        assert!(matches!(result, Err(DalError::Timeout)));
    }
}
