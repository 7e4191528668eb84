//! The [`Store`] trait defining the backing store contract.
//!
//! Any backend (in-memory, file, an OS registry) implements this trait to
//! provide named containers of string values.

use std::fmt;

use crate::error::StoreResult;
use crate::path::{ContainerPath, Hive};

/// An open container, issued by [`Store::open_or_create`].
///
/// The handle is only meaningful to the store that issued it. After
/// [`Store::close`] every operation on it fails with
/// [`StoreError::InvalidHandle`](crate::StoreError::InvalidHandle).
#[derive(Debug, PartialEq, Eq)]
pub struct Handle {
    id: u64,
    hive: Hive,
    path: ContainerPath,
}

impl Handle {
    /// Create a handle. Intended for `Store` implementations.
    pub fn new(id: u64, hive: Hive, path: ContainerPath) -> Self {
        Self { id, hive, path }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The hive the container lives under.
    pub fn hive(&self) -> Hive {
        self.hive
    }

    /// The hive-relative container path.
    pub fn path(&self) -> &ContainerPath {
        &self.path
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.id, self.path.qualified(self.hive))
    }
}

/// Storage backend for containers of named string values.
///
/// Implementations must be thread-safe (`Send + Sync`) and make each
/// individual value operation atomic. No atomicity is promised across
/// several operations.
pub trait Store: Send + Sync {
    /// Open the container at `path`, creating it (and any missing parents)
    /// if it does not exist yet.
    fn open_or_create(&self, hive: Hive, path: &ContainerPath) -> StoreResult<Handle>;

    /// Release a handle. Closing an unknown or already closed handle is a
    /// no-op.
    fn close(&self, handle: &Handle);

    /// Read a value. Returns `Ok(None)` if the value does not exist.
    fn get_raw(&self, handle: &Handle, name: &str) -> StoreResult<Option<String>>;

    /// Create or overwrite a value.
    fn set_raw(&self, handle: &Handle, name: &str, value: &str) -> StoreResult<()>;

    /// Check whether a value exists.
    fn exists(&self, handle: &Handle, name: &str) -> StoreResult<bool> {
        Ok(self.get_raw(handle, name)?.is_some())
    }

    /// Delete a value. Returns `Ok(true)` if it existed, `Ok(false)` if not.
    fn delete(&self, handle: &Handle, name: &str) -> StoreResult<bool>;
}
