//! Progress stores

use crate::StoreError;
use compendium_domain::traits::ProgressStore;
use compendium_domain::CollectionId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::convert::Infallible;
use std::fs;
use std::path::{Path, PathBuf};

const FORMAT_VERSION: u32 = 1;

/// In-memory progress store
#[derive(Debug, Clone, Default)]
pub struct MemoryProgressStore {
    levels: HashMap<CollectionId, u32>,
}

impl MemoryProgressStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Saved level of a collection
    pub fn get(&self, collection: CollectionId) -> Option<u32> {
        self.levels.get(&collection).copied()
    }

    /// Number of collections with saved progress
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Whether nothing has been saved
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl ProgressStore for MemoryProgressStore {
    type Error = Infallible;

    fn save(&mut self, collection: CollectionId, level: u32) -> Result<(), Self::Error> {
        self.levels.insert(collection, level);
        Ok(())
    }

    fn load(&self, collection: CollectionId) -> Result<Option<u32>, Self::Error> {
        Ok(self.get(collection))
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ProgressFile {
    version: u32,
    #[serde(default)]
    collections: BTreeMap<CollectionId, u32>,
}

/// Progress store backed by a JSON file
///
/// The whole file is rewritten on every save, through a temporary file that
/// is renamed over the existing one.
///
/// # Examples
///
/// ```no_run
/// use compendium_domain::traits::ProgressStore;
/// use compendium_domain::CollectionId;
/// use compendium_store::JsonProgressStore;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut store = JsonProgressStore::open("progress.json")?;
/// store.save(CollectionId::new(3), 2)?;
/// assert_eq!(store.load(CollectionId::new(3))?, Some(2));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct JsonProgressStore {
    path: PathBuf,
    levels: BTreeMap<CollectionId, u32>,
}

impl JsonProgressStore {
    /// Open a progress file, starting empty when it does not exist yet
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        let levels = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            let file: ProgressFile = serde_json::from_str(&contents)?;
            if file.version != FORMAT_VERSION {
                return Err(StoreError::UnsupportedVersion(file.version));
            }
            file.collections
        } else {
            BTreeMap::new()
        };

        tracing::debug!(
            "Opened progress file {} ({} collections)",
            path.display(),
            levels.len()
        );

        Ok(Self { path, levels })
    }

    /// Location of the progress file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the current state to disk
    pub fn flush(&self) -> Result<(), StoreError> {
        let file = ProgressFile {
            version: FORMAT_VERSION,
            collections: self.levels.clone(),
        };
        let contents = serde_json::to_string_pretty(&file)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl ProgressStore for JsonProgressStore {
    type Error = StoreError;

    /// Record `level` and rewrite the file
    ///
    /// When the write fails the previous level is kept in memory too.
    fn save(&mut self, collection: CollectionId, level: u32) -> Result<(), Self::Error> {
        let previous = self.levels.insert(collection, level);

        if let Err(e) = self.flush() {
            match previous {
                Some(old) => self.levels.insert(collection, old),
                None => self.levels.remove(&collection),
            };
            return Err(e);
        }
        Ok(())
    }

    fn load(&self, collection: CollectionId) -> Result<Option<u32>, Self::Error> {
        Ok(self.levels.get(&collection).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryProgressStore::new();
        assert!(store.is_empty());

        store.save(CollectionId::new(1), 2).unwrap();
        store.save(CollectionId::new(1), 3).unwrap();

        assert_eq!(store.load(CollectionId::new(1)).unwrap(), Some(3));
        assert_eq!(store.load(CollectionId::new(2)).unwrap(), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_json_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonProgressStore::open(dir.path().join("progress.json")).unwrap();

        assert_eq!(store.load(CollectionId::new(1)).unwrap(), None);
    }

    #[test]
    fn test_json_store_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saves").join("progress.json");

        let mut store = JsonProgressStore::open(&path).unwrap();
        store.save(CollectionId::new(4), 1).unwrap();
        store.save(CollectionId::new(9), 3).unwrap();

        let reopened = JsonProgressStore::open(&path).unwrap();
        assert_eq!(reopened.load(CollectionId::new(4)).unwrap(), Some(1));
        assert_eq!(reopened.load(CollectionId::new(9)).unwrap(), Some(3));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_json_store_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        fs::write(&path, "not json").unwrap();

        let result = JsonProgressStore::open(&path);
        assert!(matches!(result, Err(StoreError::Json(_))));
    }

    #[test]
    fn test_json_store_rejects_unknown_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        fs::write(&path, r#"{"version": 7, "collections": {}}"#).unwrap();

        let result = JsonProgressStore::open(&path);
        assert!(matches!(result, Err(StoreError::UnsupportedVersion(7))));
    }

    #[test]
    fn test_failed_save_keeps_previous_level() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        let collection = CollectionId::new(5);

        let mut store = JsonProgressStore::open(&path).unwrap();
        store.save(collection, 1).unwrap();

        // a directory in the file's place makes the final rename fail
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();

        assert!(matches!(store.save(collection, 2), Err(StoreError::Io(_))));
        assert_eq!(store.load(collection).unwrap(), Some(1));
    }

    #[test]
    fn test_failed_first_save_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("saves");
        fs::write(&blocker, "").unwrap();

        // parent directory cannot be created over a file
        let mut store = JsonProgressStore::open(blocker.join("progress.json")).unwrap();

        assert!(store.save(CollectionId::new(5), 1).is_err());
        assert_eq!(store.load(CollectionId::new(5)).unwrap(), None);
    }

    #[test]
    fn test_json_file_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");

        let mut store = JsonProgressStore::open(&path).unwrap();
        store.save(CollectionId::new(12), 2).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(value["version"], 1);
        assert_eq!(value["collections"]["12"], 2);
    }
}
