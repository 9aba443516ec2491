//! Storage backends for the submission-count cache.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::cache::CacheState;
use crate::error::SurveyClientError;

/// Holds at most one [`CacheState`], replaced as a whole on every save.
pub trait CacheStore: Send + Sync {
    /// Returns the stored state, or `None` for a cold cache.
    fn load(&self) -> Result<Option<CacheState>, SurveyClientError>;
    fn save(&self, state: &CacheState) -> Result<(), SurveyClientError>;
    fn clear(&self) -> Result<(), SurveyClientError>;
}

impl<S: CacheStore + ?Sized> CacheStore for Arc<S> {
    fn load(&self) -> Result<Option<CacheState>, SurveyClientError> {
        (**self).load()
    }

    fn save(&self, state: &CacheState) -> Result<(), SurveyClientError> {
        (**self).save(state)
    }

    fn clear(&self) -> Result<(), SurveyClientError> {
        (**self).clear()
    }
}

/// Process-scoped store. State is gone when the process exits.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<Option<CacheState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheStore for MemoryStore {
    fn load(&self) -> Result<Option<CacheState>, SurveyClientError> {
        Ok(self.state.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }

    fn save(&self, state: &CacheState) -> Result<(), SurveyClientError> {
        *self.state.lock().unwrap_or_else(|e| e.into_inner()) = Some(state.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SurveyClientError> {
        *self.state.lock().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}

/// Store backed by a JSON file, so cached counts survive between separate
/// CLI invocations in the same session.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CacheStore for FileStore {
    fn load(&self) -> Result<Option<CacheState>, SurveyClientError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str::<CacheState>(&raw) {
            Ok(state) => Ok(Some(state)),
            Err(e) => {
                tracing::warn!(
                    "Ignoring malformed count cache at {}: {}",
                    self.path.display(),
                    e
                );
                Ok(None)
            }
        }
    }

    fn save(&self, state: &CacheState) -> Result<(), SurveyClientError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        // Readers never observe a partially written file.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_vec(state)?)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), SurveyClientError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CachedCount;

    fn sample_state() -> CacheState {
        let mut state = CacheState {
            last_refreshed_at: 1_700_000_000,
            ..Default::default()
        };
        state.entries.insert(
            "S1".to_string(),
            CachedCount {
                count: 5,
                refreshed_at: 1_700_000_000,
            },
        );
        state
    }

    #[test]
    fn memory_store_save_load_clear() {
        let store = MemoryStore::new();
        assert_eq!(store.load().unwrap(), None);
        store.save(&sample_state()).unwrap();
        assert_eq!(store.load().unwrap(), Some(sample_state()));
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn file_store_missing_file_is_cold() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("counts.json"));
        assert_eq!(store.load().unwrap(), None);
        store.clear().unwrap();
    }

    #[test]
    fn file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("counts.json");
        FileStore::new(&path).save(&sample_state()).unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.load().unwrap(), Some(sample_state()));

        reopened.clear().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn file_store_serializes_entries_as_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("counts.json");
        FileStore::new(&path).save(&sample_state()).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["entries"]["S1"]["count"], 5);
    }

    #[test]
    fn file_store_malformed_file_is_cold() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("counts.json");
        std::fs::write(&path, "[[\"S1\", 5]]").unwrap();
        assert_eq!(FileStore::new(&path).load().unwrap(), None);
    }
}
