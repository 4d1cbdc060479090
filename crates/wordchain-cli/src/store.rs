//! JSON file backed key/value store for the saved puzzle

use log::debug;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use wordchain_core::{KeyValueStore, PersistError, PersistResult};

/// All entries live in one pretty-printed JSON object
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default store location in the local data directory
    pub fn default_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wordchain_store.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> PersistResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let json = fs::read_to_string(&self.path)
            .map_err(|e| PersistError::Storage(format!("{}: {}", self.path.display(), e)))?;
        if json.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&json)?)
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> PersistResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| PersistError::Storage(format!("{}: {}", parent.display(), e)))?;
        }
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, json)
            .map_err(|e| PersistError::Storage(format!("{}: {}", self.path.display(), e)))?;
        debug!("wrote {} entries to {}", entries.len(), self.path.display());
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> PersistResult<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&mut self, key: &str, value: String) -> PersistResult<()> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value);
        self.save(&entries)
    }

    fn remove(&mut self, key: &str) -> PersistResult<()> {
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordchain_core::{Coordinate, GridModel, SavedPuzzle};

    fn temp_store(name: &str) -> FileStore {
        let path = std::env::temp_dir()
            .join(format!("wordchain-{}-{}", std::process::id(), name))
            .join("store.json");
        let _ = fs::remove_file(&path);
        FileStore::new(path)
    }

    #[test]
    fn test_missing_file_is_empty() {
        let store = temp_store("missing");
        assert_eq!(store.get("wordList").unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_set_get_remove() {
        let mut store = temp_store("set-get");
        store.set("Dimensions", "3,2".to_string()).unwrap();
        store.set("wordList", "ABC".to_string()).unwrap();
        assert_eq!(store.get("Dimensions").unwrap().as_deref(), Some("3,2"));

        // A second handle on the same file sees the entries
        let reopened = FileStore::new(store.path());
        assert_eq!(reopened.get("wordList").unwrap().as_deref(), Some("ABC"));

        store.remove("wordList").unwrap();
        assert_eq!(store.get("wordList").unwrap(), None);
        assert_eq!(store.get("Dimensions").unwrap().as_deref(), Some("3,2"));
    }

    #[test]
    fn test_saved_puzzle_through_file() {
        let mut store = temp_store("puzzle");
        let mut grid = GridModel::from_text("##\n.#\n").unwrap();
        grid.set_letter(Coordinate::new(1, 1), 'ž');
        SavedPuzzle::new(grid.clone(), "labas\nbasas")
            .save(&mut store)
            .unwrap();

        let loaded = SavedPuzzle::load(&store).unwrap().unwrap();
        assert_eq!(loaded.grid, grid);
        assert_eq!(loaded.words, "LABAS\nBASAS");

        SavedPuzzle::clear(&mut store).unwrap();
        assert_eq!(SavedPuzzle::load(&store).unwrap(), None);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let store = temp_store("corrupt");
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{not json").unwrap();
        assert!(matches!(store.get("wordList"), Err(PersistError::Json(_))));
    }
}
