//! Persistence collaborators.

use crate::error::{Error, Result};
use crate::model::PersistedPayload;
use log::{debug, info};
use serde_json::Value;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Load and save one serialized document.
///
/// `load` returns the raw persisted value so legacy shapes can be
/// normalized; `None` means nothing has been stored yet.
pub trait Persistence {
    /// Load the stored document, if any.
    fn load(&self) -> Result<Option<Value>>;

    /// Replace the stored document.
    fn save(&mut self, payload: &PersistedPayload) -> Result<()>;
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistence {
    value: Option<Value>,
    saves: usize,
}

impl MemoryPersistence {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-loaded with a raw value.
    pub fn with_value(value: Value) -> Self {
        Self {
            value: Some(value),
            saves: 0,
        }
    }

    /// The currently stored value.
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl Persistence for MemoryPersistence {
    fn load(&self) -> Result<Option<Value>> {
        Ok(self.value.clone())
    }

    fn save(&mut self, payload: &PersistedPayload) -> Result<()> {
        self.value = Some(serde_json::to_value(payload)?);
        self.saves += 1;
        Ok(())
    }
}

/// Pretty JSON file store with atomic replacement.
#[derive(Debug, Clone)]
pub struct JsonFilePersistence {
    path: PathBuf,
}

impl JsonFilePersistence {
    /// Create a store backed by `path`. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Persistence for JsonFilePersistence {
    fn load(&self) -> Result<Option<Value>> {
        if !self.path.exists() {
            debug!("No stored document at {}", self.path.display());
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }
        let value = serde_json::from_str(&content)?;
        info!("Loaded document from {}", self.path.display());
        Ok(Some(value))
    }

    fn save(&mut self, payload: &PersistedPayload) -> Result<()> {
        let json = serde_json::to_string_pretty(payload)?;

        // Write to a sibling temp file, then rename over the target
        let parent_dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let mut temp_file = tempfile::NamedTempFile::new_in(&parent_dir)?;
        temp_file.write_all(json.as_bytes())?;
        temp_file.write_all(b"\n")?;
        temp_file.flush()?;
        temp_file
            .persist(&self.path)
            .map_err(|e| Error::Persistence(format!("Failed to save file: {}", e)))?;

        info!("Saved document to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, PersistedDocument, PortfolioSection};

    fn persisted() -> PersistedPayload {
        PersistedPayload::Record(PersistedDocument {
            summary: "Hi".to_string(),
            blocks: vec![Block::paragraph("Hi")],
        })
    }

    #[test]
    fn test_memory_round_trip() {
        let mut store = MemoryPersistence::new();
        assert!(store.load().unwrap().is_none());
        store.save(&persisted()).unwrap();
        assert_eq!(store.save_count(), 1);
        let value = store.load().unwrap().unwrap();
        assert_eq!(value["summary"], "Hi");
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.json");
        let mut store = JsonFilePersistence::new(&path);

        assert!(store.load().unwrap().is_none());
        store.save(&persisted()).unwrap();

        let value = store.load().unwrap().unwrap();
        assert_eq!(value["blocks"][0]["content"], "Hi");
    }

    #[test]
    fn test_memory_stores_sections() {
        let mut store = MemoryPersistence::new();
        store
            .save(&PersistedPayload::Sections {
                sections: vec![PortfolioSection {
                    section_type: "section".to_string(),
                    title: "Work".to_string(),
                    blocks: vec![Block::paragraph("x")],
                }],
            })
            .unwrap();
        let value = store.load().unwrap().unwrap();
        assert_eq!(value["sections"][0]["title"], "Work");
        assert!(value.get("summary").is_none());
    }

    #[test]
    fn test_file_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{not json").unwrap();
        let store = JsonFilePersistence::new(&path);
        assert!(matches!(store.load(), Err(Error::Json(_))));
    }
}
