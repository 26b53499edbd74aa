use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Client configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Backend origin; the REST surface lives under `/api`
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// Client-wide request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// File holding the durable active-profile record; defaults to the
    /// per-user data directory
    #[serde(default = "default_storage_path")]
    pub storage_path: PathBuf,

    /// Fallback tracing filter when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Region used for watch-provider lookups
    #[serde(default = "default_watch_region")]
    pub watch_region: String,
}

fn default_backend_url() -> String {
    "http://localhost:8001".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

const STORAGE_FILE_NAME: &str = "storage.json";

fn default_storage_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "cinevault")
        .map(|dirs| dirs.data_dir().join(STORAGE_FILE_NAME))
        // no home directory
        .unwrap_or_else(|| PathBuf::from(".cinevault").join(STORAGE_FILE_NAME))
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_watch_region() -> String {
    "US".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            request_timeout_secs: default_request_timeout_secs(),
            storage_path: default_storage_path(),
            log_filter: default_log_filter(),
            watch_region: default_watch_region(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Base path of the REST surface
    pub fn api_base(&self) -> String {
        format!("{}/api", self.backend_url.trim_end_matches('/'))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
