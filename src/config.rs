//! Environment configuration
//!
//! Values come from the process environment (after `.env` has been loaded by
//! `main`). `from_lookup` takes the variable source as a closure so tests can
//! avoid touching the real environment.

use std::env;
use std::sync::Arc;

use crate::database::init_db;
use crate::error::ConfigError;
use crate::store::{DocumentStore, MemoryStore, UrlStore};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATABASE_URL: &str = "data.db";

/// Which `UrlStore` implementation to construct
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// Mutex-guarded in-process table; mappings are lost on restart
    Memory,
    /// Persistent redb document table at the given path
    Document { path: String },
}

impl StoreBackend {
    /// Builds the configured store.
    pub fn open(&self) -> Result<Arc<dyn UrlStore>, redb::Error> {
        match self {
            StoreBackend::Memory => Ok(Arc::new(MemoryStore::new())),
            StoreBackend::Document { path } => Ok(Arc::new(DocumentStore::new(init_db(path)?))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub backend: StoreBackend,
    /// Prefix for generated short URLs; the request `Host` is used when unset
    pub base_url: Option<String>,
}

impl Config {
    /// Reads `PORT`, `STORE_BACKEND`, `DATABASE_URL` and `BASE_URL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let backend = match lookup("STORE_BACKEND").as_deref().map(str::trim) {
            None | Some("") | Some("redb") | Some("document") | Some("db") => StoreBackend::Document {
                path: lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            },
            Some("memory") => StoreBackend::Memory,
            Some(other) => return Err(ConfigError::UnknownBackend(other.to_string())),
        };

        let base_url = lookup("BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());

        Ok(Self {
            port,
            backend,
            base_url,
        })
    }
}
