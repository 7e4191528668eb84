//! File-backed, non-volatile store.
//!
//! All containers live in one JSON document. The document is loaded when
//! the store is opened and rewritten after every mutation: the new contents
//! go to a temporary file in the same directory, which is then renamed over
//! the old one, so a crash leaves either the previous or the new document.
//!
//! Every mutation is applied to a copy of the tree and only swapped in once
//! the write has succeeded. A failed write leaves memory and disk agreeing.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::path::{ContainerPath, Hive};
use crate::traits::{Handle, Store};
use crate::tree::{ContainerTree, HandleTable};

#[derive(Debug)]
struct State {
    tree: ContainerTree,
    handles: HandleTable,
}

/// A [`Store`] persisted to a single JSON file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    state: Mutex<State>,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store; it is
    /// created on the first mutation.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let tree = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| StoreError::Serialization(format!("{}: {e}", path.display())))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => ContainerTree::default(),
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), containers = tree.len(), "file store loaded");

        Ok(Self {
            path,
            state: Mutex::new(State {
                tree,
                handles: HandleTable::default(),
            }),
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of containers, across all hives.
    pub fn container_count(&self) -> usize {
        self.state.lock().expect("lock poisoned").tree.len()
    }

    /// Write `tree` to disk atomically.
    fn persist(&self, tree: &ContainerTree) -> StoreResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut temp = tempfile::NamedTempFile::new_in(dir)?;
        {
            let mut writer = BufWriter::new(temp.as_file_mut());
            serde_json::to_writer_pretty(&mut writer, tree)
                .map_err(|e| StoreError::Serialization(e.to_string()))?;
            writer.flush()?;
        }
        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;

        debug!(path = %self.path.display(), containers = tree.len(), "file store persisted");
        Ok(())
    }

    /// Apply `mutate` to a copy of the tree, persist it, then commit.
    fn mutate<R>(
        &self,
        state: &mut State,
        mutate: impl FnOnce(&mut ContainerTree) -> StoreResult<R>,
    ) -> StoreResult<R> {
        let mut next = state.tree.clone();
        let result = mutate(&mut next)?;
        if next != state.tree {
            self.persist(&next)?;
            state.tree = next;
        }
        Ok(result)
    }
}

impl Store for FileStore {
    fn open_or_create(&self, hive: Hive, path: &ContainerPath) -> StoreResult<Handle> {
        let mut state = self.state.lock().expect("lock poisoned");
        let created = self.mutate(&mut state, |tree| Ok(tree.create_all(hive, path)))?;
        let handle = state.handles.issue(hive, path);
        debug!(handle = %handle, created, "container opened");
        Ok(handle)
    }

    fn close(&self, handle: &Handle) {
        let mut state = self.state.lock().expect("lock poisoned");
        if state.handles.release(handle) {
            debug!(handle = %handle, "container closed");
        }
    }

    fn get_raw(&self, handle: &Handle, name: &str) -> StoreResult<Option<String>> {
        let state = self.state.lock().expect("lock poisoned");
        let key = state.handles.resolve(handle)?;
        Ok(state.tree.get(key, name).cloned())
    }

    fn set_raw(&self, handle: &Handle, name: &str, value: &str) -> StoreResult<()> {
        let mut state = self.state.lock().expect("lock poisoned");
        let key = state.handles.resolve(handle)?.to_string();
        self.mutate(&mut state, |tree| tree.set(&key, name, value))
    }

    fn delete(&self, handle: &Handle, name: &str) -> StoreResult<bool> {
        let mut state = self.state.lock().expect("lock poisoned");
        let key = state.handles.resolve(handle)?.to_string();
        self.mutate(&mut state, |tree| Ok(tree.remove(&key, name)))
    }
}
