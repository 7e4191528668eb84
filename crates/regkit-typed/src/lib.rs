//! Typed settings on top of a registry-like container store.
//!
//! [`TypedStore`] opens one container in a [`Store`] and reads and writes
//! strings, numbers, flat records, and process-scoped pointers through the
//! codecs in [`regkit_codec`]. Every typed value is exactly one string value
//! in the store.
//!
//! ```
//! use std::sync::Arc;
//! use regkit_typed::{InMemoryStore, TypedStore};
//!
//! let mut reg = TypedStore::new(Arc::new(InMemoryStore::new()));
//! reg.open("Software\\MyApplication").unwrap();
//!
//! reg.write_number("version", 123i32);
//! reg.write_number("price", 99.99f32);
//!
//! assert_eq!(reg.read_number("version", 0i32), 123);
//! assert_eq!(reg.read_string("price", ""), "99.99");
//! assert_eq!(reg.read_number("missing", 42i32), 42);
//! ```
//!
//! # Modules
//!
//! - [`typed`] -- the [`TypedStore`] façade
//! - [`config`] -- [`TypedStoreConfig`], loadable from TOML
//! - [`error`] -- [`TypedError`] and [`ConfigError`]

pub mod config;
pub mod error;
pub mod typed;

pub use config::{BackendConfig, TypedStoreConfig};
pub use error::{ConfigError, TypedError, TypedResult};
pub use typed::TypedStore;

pub use regkit_codec::{Numeric, OriginToken, Record};
pub use regkit_store::{ContainerPath, FileStore, Hive, InMemoryStore, Store, StoreError};
