//! File-backed slot medium
//!
//! Each slot is one `<key>.dat` file in the slots directory.

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::error::{LedgerError, LedgerResult};

use super::file_io::{read_text, remove_file_if_exists, write_text_atomic};
use super::slots::SlotStore;

const SLOT_EXTENSION: &str = "dat";

/// Extension `write_text_atomic` gives its temp file
const TEMP_EXTENSION: &str = "tmp";

/// Slot medium storing one file per slot
#[derive(Debug, Clone)]
pub struct FileSlotStore {
    dir: PathBuf,
}

impl FileSlotStore {
    /// Create a store rooted at `dir` (created lazily on first write)
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    fn path_for(&self, key: &str) -> LedgerResult<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.{}", key, SLOT_EXTENSION)))
    }

    fn files_with_extension(&self, extensions: &[&str]) -> LedgerResult<Vec<PathBuf>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.dir).map_err(|e| {
            LedgerError::Storage(format!(
                "Failed to read slots directory {}: {}",
                self.dir.display(),
                e
            ))
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry
                .map_err(|e| LedgerError::Storage(format!("Failed to read entry: {}", e)))?;
            let path = entry.path();
            let matches = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| extensions.contains(&e));
            if matches {
                paths.push(path);
            }
        }
        Ok(paths)
    }
}

/// Slot keys become file names, so only a conservative alphabet is allowed
fn validate_key(key: &str) -> LedgerResult<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if valid {
        Ok(())
    } else {
        Err(LedgerError::Validation(format!(
            "Invalid slot key: {:?}",
            key
        )))
    }
}

impl SlotStore for FileSlotStore {
    fn read(&self, key: &str) -> LedgerResult<Option<String>> {
        let path = self.path_for(key)?;
        let value = read_text(&path)?;
        debug!(slot = key, present = value.is_some(), "read slot");
        Ok(value)
    }

    fn write(&self, key: &str, value: &str) -> LedgerResult<()> {
        let path = self.path_for(key)?;
        write_text_atomic(&path, value)?;
        debug!(slot = key, bytes = value.len(), "wrote slot");
        Ok(())
    }

    fn remove(&self, key: &str) -> LedgerResult<bool> {
        let path = self.path_for(key)?;
        remove_file_if_exists(&path)
    }

    fn clear(&self) -> LedgerResult<()> {
        // Leftovers of interrupted writes go too
        for path in self.files_with_extension(&[SLOT_EXTENSION, TEMP_EXTENSION])? {
            remove_file_if_exists(&path)?;
        }
        Ok(())
    }

    fn keys(&self) -> LedgerResult<Vec<String>> {
        let mut keys: Vec<String> = self
            .files_with_extension(&[SLOT_EXTENSION])?
            .iter()
            .filter_map(|path| path.file_stem().and_then(|s| s.to_str()))
            .map(str::to_string)
            .collect();
        keys.sort();
        Ok(keys)
    }
}
