use crate::error::{Result, SnipzError};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use uuid::Uuid;

/// Key/value string storage, the way a browser's local storage behaves.
///
/// This trait handles the "where" of local persistence (disk vs memory),
/// while [`LocalStore`](super::local::LocalStore) handles the "what".
pub trait StorageArea: Send + Sync {
    /// Returns `Ok(None)` when nothing is stored under `key`.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Replaces whatever is stored under `key`.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
}

/// Directory-backed storage: each key lives in `<root>/<key>.json`.
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn item_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(SnipzError::Io)?;
        }
        Ok(())
    }
}

impl StorageArea for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.item_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&path).map_err(SnipzError::Io)?;
        let content = String::from_utf8(bytes).map_err(|e| {
            SnipzError::CorruptData(format!("{} is not valid UTF-8: {}", path.display(), e))
        })?;
        Ok(Some(content))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.ensure_dir()?;

        let tmp_path = self.root.join(format!(".{}-{}.tmp", key, Uuid::new_v4()));
        fs::write(&tmp_path, value).map_err(SnipzError::Io)?;
        fs::rename(&tmp_path, self.item_path(key)).map_err(SnipzError::Io)?;

        Ok(())
    }
}

/// In-memory storage for testing.
#[derive(Default)]
pub struct MemStorage {
    items: Mutex<HashMap<String, String>>,
    simulate_write_error: Mutex<bool>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self
            .simulate_write_error
            .lock()
            .unwrap_or_else(|e| e.into_inner()) = simulate;
    }

    fn items(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.items.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn write_fails(&self) -> bool {
        *self
            .simulate_write_error
            .lock()
            .unwrap_or_else(|e| e.into_inner())
    }
}

impl StorageArea for MemStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        if self.write_fails() {
            return Err(SnipzError::Io(std::io::Error::other("Simulated write error")));
        }
        self.items().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_storage_roundtrips_items() {
        let dir = TempDir::new().unwrap();
        let area = FileStorage::new(dir.path().join("nested"));

        assert_eq!(area.get_item("k").unwrap(), None);
        area.set_item("k", "[1,2]").unwrap();
        assert_eq!(area.get_item("k").unwrap().as_deref(), Some("[1,2]"));
    }

    #[test]
    fn file_storage_reports_non_utf8_as_corrupt() {
        let dir = TempDir::new().unwrap();
        let area = FileStorage::new(dir.path().to_path_buf());
        fs::write(area.item_path("k"), [0xff, 0xfe, 0x00, 0x9f]).unwrap();

        let err = area.get_item("k").unwrap_err();
        assert!(matches!(err, SnipzError::CorruptData(_)), "got {err:?}");
    }

    #[test]
    fn file_storage_leaves_no_tmp_files() {
        let dir = TempDir::new().unwrap();
        let area = FileStorage::new(dir.path().to_path_buf());
        area.set_item("snips", "[]").unwrap();
        area.set_item("snips", "[ ]").unwrap();

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["snips.json"]);
    }

    #[test]
    fn mem_storage_simulated_write_error() {
        let area = MemStorage::new();
        area.set_simulate_write_error(true);
        assert!(area.set_item("k", "v").is_err());
        area.set_simulate_write_error(false);
        area.set_item("k", "v").unwrap();
        assert_eq!(area.get_item("k").unwrap().as_deref(), Some("v"));
    }
}
