//! Hierarchical container storage for regkit.
//!
//! This crate defines the contract regkit needs from a registry-like backing
//! store: a tree of named containers ("keys"), each holding named string
//! values. The typed layer never sees anything but strings.
//!
//! # Storage Backends
//!
//! All backends implement the [`Store`] trait:
//!
//! - [`InMemoryStore`] -- `BTreeMap`-based store for tests and embedding
//! - [`FileStore`] -- non-volatile store persisted as one JSON document
//!
//! # Design Rules
//!
//! 1. Opening a container that does not exist creates it and its parents.
//! 2. Handles are exclusively owned by whoever opened them; closing twice is
//!    harmless, using a closed handle is an error.
//! 3. Each value operation is atomic. Nothing is atomic across operations.
//! 4. The store never interprets value contents.

pub mod error;
pub mod file;
pub mod memory;
pub mod path;
pub mod traits;
mod tree;

pub use error::{StoreError, StoreResult};
pub use file::FileStore;
pub use memory::InMemoryStore;
pub use path::{validate_value_name, ContainerPath, Hive};
pub use traits::{Handle, Store};
