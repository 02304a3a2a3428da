//! Runtime configuration for backend selection.

use std::path::PathBuf;
use std::time::Duration;

/// Where the DAL should look for its backends.
#[derive(Clone, Debug)]
pub struct DalConfig {
    /// PostgreSQL URL for the remote strategy (server builds only).
    pub database_url: Option<String>,
    /// Base URL of the REST proxy, e.g. `http://localhost:8080/api`.
    pub proxy_base_url: Option<String>,
    /// API key sent with every proxy request.
    pub api_key: Option<String>,
    /// Directory for the durable local mock on native targets.
    pub data_dir: Option<PathBuf>,
    /// How long the connectivity probe may take before falling back.
    pub probe_timeout: Duration,
}

impl Default for DalConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            proxy_base_url: None,
            api_key: None,
            data_dir: None,
            probe_timeout: Duration::from_secs(3),
        }
    }
}

impl DalConfig {
    /// Configuration from the environment (`DATABASE_URL`, `PROXY_BASE_URL`,
    /// `API_KEY`, `GREENPLATE_DATA_DIR`).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").ok(),
            proxy_base_url: std::env::var("PROXY_BASE_URL").ok(),
            api_key: std::env::var("API_KEY").ok(),
            data_dir: std::env::var("GREENPLATE_DATA_DIR").ok().map(PathBuf::from),
            ..Self::default()
        }
    }

    /// Configuration for a browser client: probe the origin that served the
    /// app. When the page is statically hosted, the probe fails and the
    /// session runs against the local mock.
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    pub fn from_window() -> Self {
        let proxy_base_url = web_sys::window()
            .and_then(|window| window.location().origin().ok())
            .map(|origin| format!("{origin}/api"));
        Self {
            proxy_base_url,
            ..Self::default()
        }
    }
}
