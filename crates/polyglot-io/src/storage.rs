use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use polyglot_core::{KeyValueStore, StoreError};

/// Key-value slots kept in one JSON object file, rewritten on every `set`
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open or create the file; an unreadable payload starts an empty store
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let values = if path.exists() {
            let data = fs::read_to_string(&path)?;
            serde_json::from_str(&data).unwrap_or_else(|e| {
                tracing::warn!("storage file {} is malformed, starting empty: {e}", path.display());
                BTreeMap::new()
            })
        } else {
            BTreeMap::new()
        };

        tracing::debug!("opened storage at {}", path.display());

        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, values: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(values)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self.values.lock().map_err(|_| StoreError::Poisoned)?;
        values.insert(key.to_string(), value.to_string());
        self.flush(&values)
    }
}

#[cfg(test)]
mod tests {
    use polyglot_core::PreferenceStore;
    use polyglot_types::{HistoryEntry, ResultSet};
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let store = FileStore::open(&path).unwrap();
        store.set("source_language", "DE").unwrap();
        store.set("selected_languages", r#"["EN"]"#).unwrap();
        drop(store);

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("source_language").as_deref(), Some("DE"));
        assert_eq!(reopened.get("selected_languages").as_deref(), Some(r#"["EN"]"#));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn malformed_file_opens_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "[1, 2").unwrap();

        let store = FileStore::open(&path).unwrap();
        assert!(store.get("source_language").is_none());

        store.set("source_language", "FR").unwrap();
        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("source_language").as_deref(), Some("FR"));
    }

    #[test]
    fn history_written_through_preference_store_is_restored() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");

        let entry = HistoryEntry {
            query: "Goodbye".to_string(),
            translations: ResultSet::from([
                ("ES".to_string(), "Adiós".to_string()),
                ("DE".to_string(), "Auf Wiedersehen".to_string()),
            ]),
            target_codes: vec!["ES".to_string(), "DE".to_string()],
            source_code: Some("EN".to_string()),
        };

        let prefs = PreferenceStore::new(FileStore::open(&path).unwrap());
        prefs.record_history(entry.clone()).unwrap();
        drop(prefs);

        let restored = PreferenceStore::new(FileStore::open(&path).unwrap()).restore_on_load();
        assert_eq!(restored.history.entries(), &[entry]);
    }
}
