//! In-memory store for tests and ephemeral use.
//!
//! [`InMemoryStore`] keeps every container in a `BTreeMap` behind a
//! `RwLock`. Data is lost when the store is dropped.

use std::sync::RwLock;

use tracing::debug;

use crate::error::StoreResult;
use crate::path::{ContainerPath, Hive};
use crate::traits::{Handle, Store};
use crate::tree::{ContainerTree, HandleTable};

#[derive(Debug, Default)]
struct State {
    tree: ContainerTree,
    handles: HandleTable,
}

/// An in-memory implementation of [`Store`].
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<State>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of containers, across all hives.
    pub fn container_count(&self) -> usize {
        self.state.read().expect("lock poisoned").tree.len()
    }

    /// Whether the container exists.
    pub fn contains_container(&self, hive: Hive, path: &ContainerPath) -> bool {
        self.state
            .read()
            .expect("lock poisoned")
            .tree
            .contains(&path.qualified(hive))
    }

    /// Number of handles currently open.
    pub fn open_handles(&self) -> usize {
        self.state.read().expect("lock poisoned").handles.open_count()
    }
}

impl Store for InMemoryStore {
    fn open_or_create(&self, hive: Hive, path: &ContainerPath) -> StoreResult<Handle> {
        let mut state = self.state.write().expect("lock poisoned");
        let created = state.tree.create_all(hive, path);
        let handle = state.handles.issue(hive, path);
        debug!(handle = %handle, created, "container opened");
        Ok(handle)
    }

    fn close(&self, handle: &Handle) {
        let mut state = self.state.write().expect("lock poisoned");
        if state.handles.release(handle) {
            debug!(handle = %handle, "container closed");
        }
    }

    fn get_raw(&self, handle: &Handle, name: &str) -> StoreResult<Option<String>> {
        let state = self.state.read().expect("lock poisoned");
        let key = state.handles.resolve(handle)?;
        Ok(state.tree.get(key, name).cloned())
    }

    fn set_raw(&self, handle: &Handle, name: &str, value: &str) -> StoreResult<()> {
        let mut state = self.state.write().expect("lock poisoned");
        let key = state.handles.resolve(handle)?.to_string();
        state.tree.set(&key, name, value)
    }

    fn delete(&self, handle: &Handle, name: &str) -> StoreResult<bool> {
        let mut state = self.state.write().expect("lock poisoned");
        let key = state.handles.resolve(handle)?.to_string();
        Ok(state.tree.remove(&key, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;

    fn path(p: &str) -> ContainerPath {
        ContainerPath::parse(p).unwrap()
    }

    #[test]
    fn open_creates_container_and_parents() {
        let store = InMemoryStore::new();
        let handle = store
            .open_or_create(Hive::CurrentUser, &path("Software\\MyApplication"))
            .unwrap();
        assert_eq!(store.container_count(), 2);
        assert!(store.contains_container(Hive::CurrentUser, &path("Software")));
        assert!(!store.contains_container(Hive::LocalMachine, &path("Software")));
        assert_eq!(handle.path().to_string(), "Software\\MyApplication");
    }

    #[test]
    fn set_get_overwrite() {
        let store = InMemoryStore::new();
        let h = store.open_or_create(Hive::CurrentUser, &path("App")).unwrap();

        store.set_raw(&h, "name", "first").unwrap();
        assert_eq!(store.get_raw(&h, "name").unwrap().as_deref(), Some("first"));

        store.set_raw(&h, "name", "second").unwrap();
        assert_eq!(store.get_raw(&h, "name").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn read_missing_value_returns_none() {
        let store = InMemoryStore::new();
        let h = store.open_or_create(Hive::CurrentUser, &path("App")).unwrap();
        assert!(store.get_raw(&h, "nope").unwrap().is_none());
        assert!(!store.exists(&h, "nope").unwrap());
    }

    #[test]
    fn delete_reports_existence() {
        let store = InMemoryStore::new();
        let h = store.open_or_create(Hive::CurrentUser, &path("App")).unwrap();
        store.set_raw(&h, "v", "1").unwrap();
        assert!(store.exists(&h, "v").unwrap());
        assert!(store.delete(&h, "v").unwrap());
        assert!(!store.delete(&h, "v").unwrap());
        assert!(!store.exists(&h, "v").unwrap());
    }

    #[test]
    fn handles_share_container_contents() {
        let store = InMemoryStore::new();
        let a = store.open_or_create(Hive::CurrentUser, &path("App")).unwrap();
        let b = store.open_or_create(Hive::CurrentUser, &path("App")).unwrap();
        store.set_raw(&a, "shared", "yes").unwrap();
        assert_eq!(store.get_raw(&b, "shared").unwrap().as_deref(), Some("yes"));
    }

    #[test]
    fn close_is_idempotent_and_invalidates() {
        let store = InMemoryStore::new();
        let h = store.open_or_create(Hive::CurrentUser, &path("App")).unwrap();
        assert_eq!(store.open_handles(), 1);

        store.close(&h);
        store.close(&h);
        assert_eq!(store.open_handles(), 0);

        assert!(matches!(
            store.get_raw(&h, "v"),
            Err(StoreError::InvalidHandle(_))
        ));
        assert!(matches!(
            store.set_raw(&h, "v", "1"),
            Err(StoreError::InvalidHandle(_))
        ));
    }

    #[test]
    fn closing_a_foreign_handle_is_a_noop() {
        let store = InMemoryStore::new();
        let foreign = Handle::new(99, Hive::Users, path("X"));
        store.close(&foreign);
        assert_eq!(store.open_handles(), 0);
    }

    #[test]
    fn empty_value_name_is_the_default_value() {
        let store = InMemoryStore::new();
        let h = store.open_or_create(Hive::CurrentUser, &path("App")).unwrap();
        store.set_raw(&h, "", "default").unwrap();
        assert_eq!(store.get_raw(&h, "").unwrap().as_deref(), Some("default"));
    }

    #[test]
    fn invalid_value_name_is_rejected() {
        let store = InMemoryStore::new();
        let h = store.open_or_create(Hive::CurrentUser, &path("App")).unwrap();
        assert!(matches!(
            store.set_raw(&h, "bad\0name", "x"),
            Err(StoreError::InvalidValueName { .. })
        ));
    }
}
