//! The typed store: codecs composed over one open container.

use std::fmt;
use std::path::Path;
use std::ptr::NonNull;
use std::sync::Arc;

use regkit_codec::{pointer, Numeric, OriginToken, PointerError, Record, RecordError};
use regkit_store::{ContainerPath, Handle, Hive, Store};
use tracing::{debug, warn};

use crate::config::TypedStoreConfig;
use crate::error::{TypedError, TypedResult};

/// Typed settings over a single open container.
///
/// Scalar reads (`read_string`, `read_number`, `read_pointer`) never fail:
/// a closed store, a missing value, unparsable text, or a store error all
/// yield the caller's default. Writes report success as a `bool`. Record
/// reads are the exception and return [`TypedError`], since there is no
/// safe default record.
///
/// The open container is released on [`close`](Self::close), when another
/// container is opened, and on drop.
pub struct TypedStore {
    store: Arc<dyn Store>,
    hive: Hive,
    origin: OriginToken,
    handle: Option<Handle>,
}

impl TypedStore {
    /// A closed typed store over `store`, rooted at the current-user hive,
    /// owning pointer tokens as the current process.
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            hive: Hive::default(),
            origin: OriginToken::current(),
            handle: None,
        }
    }

    /// Resolve container paths against `hive`. Applies to the next
    /// [`open`](Self::open).
    pub fn with_hive(mut self, hive: Hive) -> Self {
        self.hive = hive;
        self
    }

    /// Write and accept pointer tokens as `origin` instead of the current
    /// process.
    pub fn with_origin(mut self, origin: OriginToken) -> Self {
        self.origin = origin;
        self
    }

    /// Build the configured store, and open the configured container if
    /// there is one.
    pub fn from_config(config: &TypedStoreConfig) -> TypedResult<Self> {
        let store = config.backend.build()?;
        let mut typed = Self::new(store).with_hive(config.hive);
        if let Some(container) = &config.container {
            typed.open(container)?;
        }
        Ok(typed)
    }

    /// [`from_config`](Self::from_config) with the configuration read from
    /// a TOML file.
    pub fn from_config_file(path: &Path) -> TypedResult<Self> {
        Self::from_config(&TypedStoreConfig::load(path)?)
    }

    /// Open `path`, creating it if needed. Any container already open is
    /// closed first, even if opening the new one fails.
    pub fn open(&mut self, path: &str) -> TypedResult<()> {
        self.close();
        let path = ContainerPath::parse(path)?;
        let handle = self.store.open_or_create(self.hive, &path)?;
        debug!(handle = %handle, "typed store opened");
        self.handle = Some(handle);
        Ok(())
    }

    /// Close the open container. Does nothing if none is open.
    pub fn close(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.store.close(&handle);
            debug!(handle = %handle, "typed store closed");
        }
    }

    pub fn is_open(&self) -> bool {
        self.handle.is_some()
    }

    /// Path of the open container.
    pub fn current_path(&self) -> Option<&ContainerPath> {
        self.handle.as_ref().map(Handle::path)
    }

    pub fn hive(&self) -> Hive {
        self.hive
    }

    pub fn origin(&self) -> OriginToken {
        self.origin
    }

    // ---- Strings ----

    /// The stored text of `name`, or `None` if it cannot be read for any
    /// reason.
    fn raw(&self, name: &str) -> Option<String> {
        let handle = self.handle.as_ref()?;
        match self.store.get_raw(handle, name) {
            Ok(value) => value,
            Err(e) => {
                warn!(name, error = %e, "read failed; using default");
                None
            }
        }
    }

    pub fn read_string(&self, name: &str, default: &str) -> String {
        self.raw(name).unwrap_or_else(|| default.to_string())
    }

    /// Create or overwrite `name`. Returns `false` if no container is open
    /// or the store rejects the write.
    pub fn write_string(&self, name: &str, value: &str) -> bool {
        let Some(handle) = &self.handle else {
            return false;
        };
        match self.store.set_raw(handle, name, value) {
            Ok(()) => true,
            Err(e) => {
                warn!(name, error = %e, "write failed");
                false
            }
        }
    }

    // ---- Numbers ----

    /// Read a number. Missing, empty, or unparsable text yields `default`.
    pub fn read_number<T: Numeric>(&self, name: &str, default: T) -> T {
        match self.raw(name) {
            Some(text) if !text.is_empty() => regkit_codec::from_canonical(&text, default),
            _ => default,
        }
    }

    /// Write a number in canonical form. Floating-point values keep five
    /// fractional digits.
    pub fn write_number<T: Numeric>(&self, name: &str, value: T) -> bool {
        self.write_string(name, &regkit_codec::to_canonical(value))
    }

    // ---- Pointers ----

    /// Resolve a pointer written by [`write_pointer`](Self::write_pointer).
    ///
    /// Returns `default` unless the token is well formed, non-null, and was
    /// written under this store's origin. The address is not otherwise
    /// checked; dereferencing it is the caller's responsibility.
    pub fn read_pointer<T>(&self, name: &str, default: Option<NonNull<T>>) -> Option<NonNull<T>> {
        let token = match self.raw(name) {
            Some(token) if !token.is_empty() => token,
            _ => return default,
        };

        match pointer::decode(&token, self.origin) {
            Ok(address) => NonNull::new(address as *mut T).or(default),
            Err(e @ PointerError::CrossProcess { .. }) => {
                warn!(name, error = %e, "pointer written by another process; using default");
                default
            }
            Err(e) => {
                debug!(name, error = %e, "unreadable pointer token; using default");
                default
            }
        }
    }

    /// Store the address of `ptr` tagged with this store's origin. Refuses
    /// null pointers.
    pub fn write_pointer<T>(&self, name: &str, ptr: *const T) -> bool {
        if !self.is_open() || ptr.is_null() {
            return false;
        }
        self.write_string(name, &pointer::encode(ptr as usize, self.origin))
    }

    // ---- Records ----

    /// Read a record written by [`write_object`](Self::write_object).
    ///
    /// # Errors
    ///
    /// - [`TypedError::NotOpen`] if no container is open
    /// - [`TypedError::NotFound`] if the value is missing or empty
    /// - [`TypedError::SizeMismatch`] if the stored bytes are not exactly one `T`
    /// - [`TypedError::Store`] if the store fails
    pub fn read_object<T: Record>(&self, name: &str) -> TypedResult<T> {
        let handle = self.handle.as_ref().ok_or(TypedError::NotOpen)?;
        let encoded = self
            .store
            .get_raw(handle, name)?
            .ok_or_else(|| TypedError::NotFound {
                name: name.to_string(),
            })?;

        regkit_codec::decode_record(&encoded).map_err(|e| match e {
            RecordError::Empty => TypedError::NotFound {
                name: name.to_string(),
            },
            RecordError::SizeMismatch { expected, actual } => TypedError::SizeMismatch {
                name: name.to_string(),
                expected,
                actual,
            },
        })
    }

    pub fn write_object<T: Record>(&self, name: &str, value: &T) -> bool {
        self.write_string(name, &regkit_codec::encode_record(value))
    }

    // ---- Presence ----

    pub fn exists(&self, name: &str) -> bool {
        let Some(handle) = &self.handle else {
            return false;
        };
        self.store.exists(handle, name).unwrap_or_else(|e| {
            warn!(name, error = %e, "existence check failed");
            false
        })
    }

    /// Delete `name`. Returns `false` if it did not exist or no container is
    /// open.
    pub fn delete(&self, name: &str) -> bool {
        let Some(handle) = &self.handle else {
            return false;
        };
        self.store.delete(handle, name).unwrap_or_else(|e| {
            warn!(name, error = %e, "delete failed");
            false
        })
    }
}

impl Drop for TypedStore {
    fn drop(&mut self) {
        self.close();
    }
}

impl fmt::Debug for TypedStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedStore")
            .field("hive", &self.hive)
            .field("origin", &self.origin)
            .field("handle", &self.handle)
            .finish()
    }
}
