use super::key_value_store::KeyValueStore;
use crate::error::{AppError, AppResult};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Durable store persisted as a single JSON object on disk.
///
/// The whole map is rewritten on every mutation through a temp file and a
/// rename, so a crash never leaves a half-written file behind. The file is
/// readable by its owner only.
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store, starting empty when the file does not exist yet
    pub fn open(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| {
                AppError::Storage(format!("Corrupt store file {}: {}", path.display(), e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(path = %path.display(), keys = entries.len(), "Opened file store");

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the map to a fresh temp file next to the target and rename it
    /// into place. The temp file is created with owner-only permissions.
    fn persist(&self, entries: &BTreeMap<String, String>) -> AppResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&serde_json::to_vec_pretty(entries)?)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    /// Apply `change` to a copy of the map and keep it only once it is on disk
    fn update(&self, change: impl FnOnce(&mut BTreeMap<String, String>) -> bool) -> AppResult<()> {
        let mut entries = self.entries.lock();
        let mut next = entries.clone();
        if !change(&mut next) {
            return Ok(());
        }

        self.persist(&next)?;
        *entries = next;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> AppResult<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
            true
        })
    }

    fn remove_item(&self, key: &str) -> AppResult<()> {
        self.update(|entries| entries.remove(key).is_some())
    }

    fn clear(&self) -> AppResult<()> {
        self.update(|entries| {
            entries.clear();
            true
        })
    }
}
