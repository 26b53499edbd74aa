pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod storage;
pub mod store;

pub use api::{CineVaultApi, HttpApiClient};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use store::{SessionStore, WatchlistStore};
