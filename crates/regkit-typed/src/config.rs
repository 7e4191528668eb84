use std::path::{Path, PathBuf};
use std::sync::Arc;

use regkit_store::{FileStore, Hive, InMemoryStore, Store, StoreResult};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How a [`TypedStore`](crate::TypedStore) is set up.
///
/// ```toml
/// hive = "current_user"
/// container = "Software\\MyApplication"
///
/// [backend]
/// kind = "file"
/// path = "settings.json"
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypedStoreConfig {
    /// Root the container path is resolved against.
    pub hive: Hive,
    /// Container to open on construction, if any.
    pub container: Option<String>,
    pub backend: BackendConfig,
}

/// Which [`Store`] implementation to use.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BackendConfig {
    /// Volatile, process-local store.
    #[default]
    Memory,
    /// JSON document at `path`.
    File { path: PathBuf },
}

impl TypedStoreConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

impl BackendConfig {
    /// Construct the configured store.
    pub fn build(&self) -> StoreResult<Arc<dyn Store>> {
        let store: Arc<dyn Store> = match self {
            Self::Memory => Arc::new(InMemoryStore::new()),
            Self::File { path } => Arc::new(FileStore::open(path.clone())?),
        };
        Ok(store)
    }
}
