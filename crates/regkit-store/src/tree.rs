//! Container tree and handle table shared by the bundled stores.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};
use crate::path::{validate_value_name, ContainerPath, Hive};
use crate::traits::Handle;

/// All containers, keyed by fully qualified path.
///
/// This is also the on-disk document of the file store.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct ContainerTree {
    containers: BTreeMap<String, BTreeMap<String, String>>,
}

impl ContainerTree {
    /// Ensure `path` and all its parents exist. Returns the number of
    /// containers created.
    pub(crate) fn create_all(&mut self, hive: Hive, path: &ContainerPath) -> usize {
        let mut created = 0;
        for ancestor in path.ancestors() {
            let key = ancestor.qualified(hive);
            if !self.containers.contains_key(&key) {
                self.containers.insert(key, BTreeMap::new());
                created += 1;
            }
        }
        created
    }

    pub(crate) fn contains(&self, key: &str) -> bool {
        self.containers.contains_key(key)
    }

    pub(crate) fn len(&self) -> usize {
        self.containers.len()
    }

    pub(crate) fn get(&self, key: &str, name: &str) -> Option<&String> {
        self.containers.get(key)?.get(name)
    }

    /// Set a value. The container must exist.
    pub(crate) fn set(&mut self, key: &str, name: &str, value: &str) -> StoreResult<()> {
        validate_value_name(name)?;
        let values = self
            .containers
            .get_mut(key)
            .ok_or_else(|| StoreError::InvalidPath {
                path: key.to_string(),
                reason: "container does not exist".into(),
            })?;
        values.insert(name.to_string(), value.to_string());
        Ok(())
    }

    pub(crate) fn remove(&mut self, key: &str, name: &str) -> bool {
        self.containers
            .get_mut(key)
            .is_some_and(|values| values.remove(name).is_some())
    }
}

/// Open handles and the qualified container each refers to.
#[derive(Debug, Default)]
pub(crate) struct HandleTable {
    open: HashMap<u64, String>,
    next_id: u64,
}

impl HandleTable {
    /// Issue a new handle for a container.
    pub(crate) fn issue(&mut self, hive: Hive, path: &ContainerPath) -> Handle {
        self.next_id += 1;
        self.open.insert(self.next_id, path.qualified(hive));
        Handle::new(self.next_id, hive, path.clone())
    }

    /// Resolve an open handle to its qualified container key.
    pub(crate) fn resolve(&self, handle: &Handle) -> StoreResult<&str> {
        self.open
            .get(&handle.id())
            .map(String::as_str)
            .ok_or(StoreError::InvalidHandle(handle.id()))
    }

    /// Forget a handle. Returns `false` if it was not open.
    pub(crate) fn release(&mut self, handle: &Handle) -> bool {
        self.open.remove(&handle.id()).is_some()
    }

    pub(crate) fn open_count(&self) -> usize {
        self.open.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(p: &str) -> ContainerPath {
        ContainerPath::parse(p).unwrap()
    }

    #[test]
    fn create_all_makes_parents_once() {
        let mut tree = ContainerTree::default();
        assert_eq!(tree.create_all(Hive::CurrentUser, &path("A/B/C")), 3);
        assert_eq!(tree.create_all(Hive::CurrentUser, &path("A/B/D")), 1);
        assert_eq!(tree.create_all(Hive::CurrentUser, &path("A/B")), 0);
        assert_eq!(tree.len(), 4);
        assert!(tree.contains("HKEY_CURRENT_USER\\A\\B\\D"));
    }

    #[test]
    fn hives_are_separate() {
        let mut tree = ContainerTree::default();
        tree.create_all(Hive::CurrentUser, &path("Software"));
        assert_eq!(tree.create_all(Hive::LocalMachine, &path("Software")), 1);
    }

    #[test]
    fn set_requires_existing_container() {
        let mut tree = ContainerTree::default();
        assert!(tree.set("HKEY_USERS\\nope", "v", "1").is_err());
    }

    #[test]
    fn handles_are_unique_and_released_once() {
        let mut table = HandleTable::default();
        let a = table.issue(Hive::CurrentUser, &path("A"));
        let b = table.issue(Hive::CurrentUser, &path("A"));
        assert_ne!(a.id(), b.id());
        assert_eq!(table.resolve(&a).unwrap(), "HKEY_CURRENT_USER\\A");
        assert!(table.release(&a));
        assert!(!table.release(&a));
        assert!(matches!(table.resolve(&a), Err(StoreError::InvalidHandle(_))));
        assert_eq!(table.open_count(), 1);
    }
}
