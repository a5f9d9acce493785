//! File-based ProgressStore implementation.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use skirmish_core::{ProgressStore, StoreError};

/// On-disk layout of the progress file.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
struct ProgressFile {
    #[serde(default)]
    ints: BTreeMap<String, i64>,
    #[serde(default)]
    strings: BTreeMap<String, String>,
}

/// File-based implementation of [`ProgressStore`].
///
/// Values live in memory between [`load`](ProgressStore::load) and
/// [`save`](ProgressStore::save). Saves write pretty JSON to a temp file next
/// to the target and rename it over the target, so a crash mid-save leaves the
/// previous file intact.
pub struct FileProgressStore {
    path: PathBuf,
    data: ProgressFile,
    dirty: bool,
}

impl FileProgressStore {
    /// Creates a store backed by `path`. Nothing is read until `load`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            data: ProgressFile::default(),
            dirty: false,
        }
    }

    /// Creates a store and loads the existing file, if any.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let mut store = Self::new(path);
        store.load()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True when values changed since the last load or save.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

impl ProgressStore for FileProgressStore {
    fn get_int(&self, key: &str) -> Option<i64> {
        self.data.ints.get(key).copied()
    }

    fn set_int(&mut self, key: &str, value: i64) {
        if self.data.ints.insert(key.to_owned(), value) != Some(value) {
            self.dirty = true;
        }
    }

    fn get_string(&self, key: &str) -> Option<String> {
        self.data.strings.get(key).cloned()
    }

    fn set_string(&mut self, key: &str, value: &str) {
        if self.data.strings.get(key).map(String::as_str) != Some(value) {
            self.data.strings.insert(key.to_owned(), value.to_owned());
            self.dirty = true;
        }
    }

    fn load(&mut self) -> Result<(), StoreError> {
        if !self.path.exists() {
            tracing::debug!("No progress file at {}, starting fresh", self.path.display());
            self.data = ProgressFile::default();
            self.dirty = false;
            return Ok(());
        }

        let bytes = fs::read(&self.path)?;
        self.data = serde_json::from_slice(&bytes)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.dirty = false;

        tracing::debug!(
            ints = self.data.ints.len(),
            strings = self.data.strings.len(),
            "Loaded progress from {}",
            self.path.display()
        );
        Ok(())
    }

    fn save(&mut self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let bytes = serde_json::to_vec_pretty(&self.data)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        // Write to temp file, then atomic rename
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &self.path)?;
        self.dirty = false;

        tracing::debug!("Saved progress to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileProgressStore::open(dir.path().join("progress.json")).unwrap();
        assert_eq!(store.get_int("coins"), None);
        assert!(!store.is_dirty());
    }

    #[test]
    fn values_survive_a_save_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("progress.json");

        let mut store = FileProgressStore::new(&path);
        store.set_int("coins", 42);
        store.set_string("last_stage", "meadow");
        assert!(store.is_dirty());
        store.save().unwrap();
        assert!(!store.is_dirty());
        assert!(!path.with_extension("json.tmp").exists());

        let reopened = FileProgressStore::open(&path).unwrap();
        assert_eq!(reopened.get_int("coins"), Some(42));
        assert_eq!(reopened.get_string("last_stage").as_deref(), Some("meadow"));
    }

    #[test]
    fn corrupt_file_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        fs::write(&path, b"{ not json").unwrap();

        let err = FileProgressStore::open(&path).err().unwrap();
        assert!(matches!(err, StoreError::Serialization(_)));
    }

    #[test]
    fn rewriting_the_same_value_is_not_dirty() {
        let mut store = FileProgressStore::new("unused.json");
        store.set_int("level", 3);
        store.dirty = false;
        store.set_int("level", 3);
        assert!(!store.is_dirty());
    }
}
