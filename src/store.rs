//! Persistence for the recipe collection.
//!
//! The whole catalog lives in one JSON file: an array of recipe objects,
//! pretty-printed. Every operation reads or rewrites the document in full;
//! there is no incremental update path.
//!
//! `Store` is the seam the repository is built against, so the file backend
//! can be swapped for a lock-guarded or transactional one without touching
//! repository logic.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::models::Recipe;

/// Errors that can occur reading or writing the recipe document.
#[derive(Debug)]
pub enum StoreError {
    /// I/O failure reading or writing the document.
    Unavailable(PathBuf, io::Error),
    /// The document exists but is not a valid recipe array.
    Corrupt(PathBuf, String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Unavailable(path, e) => {
                write!(f, "Storage unavailable at {}: {}", path.display(), e)
            }
            StoreError::Corrupt(path, e) => {
                write!(f, "Corrupt recipe document at {}: {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Unavailable(_, e) => Some(e),
            StoreError::Corrupt(_, _) => None,
        }
    }
}

/// Load/save capability over the full recipe collection.
pub trait Store {
    /// Creates the containing directory and an empty document if none
    /// exists. Idempotent; called once at startup.
    fn ensure_initialized(&self) -> Result<(), StoreError>;

    /// Reads the entire document.
    fn load(&self) -> Result<Vec<Recipe>, StoreError>;

    /// Serializes and fully overwrites the document.
    fn save(&self, recipes: &[Recipe]) -> Result<(), StoreError>;
}

/// File-backed store holding the collection as one JSON array.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `contents` atomically via a temp file and rename, so readers
    /// never observe a torn document.
    fn write_atomic(&self, contents: &[u8]) -> Result<(), StoreError> {
        let temp_path = self.path.with_extension("json.tmp");

        let mut file = File::create(&temp_path)
            .map_err(|e| StoreError::Unavailable(temp_path.clone(), e))?;

        file.write_all(contents)
            .map_err(|e| StoreError::Unavailable(temp_path.clone(), e))?;

        file.sync_all()
            .map_err(|e| StoreError::Unavailable(temp_path.clone(), e))?;

        fs::rename(&temp_path, &self.path)
            .map_err(|e| StoreError::Unavailable(self.path.clone(), e))?;

        Ok(())
    }
}

impl Store for JsonFileStore {
    fn ensure_initialized(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            // A bare relative filename has an empty parent; nothing to create
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| StoreError::Unavailable(parent.to_path_buf(), e))?;
            }
        }

        if !self.path.exists() {
            self.save(&[])?;
            tracing::info!("Created empty recipe document at {}", self.path.display());
        }

        Ok(())
    }

    fn load(&self) -> Result<Vec<Recipe>, StoreError> {
        let contents = fs::read_to_string(&self.path)
            .map_err(|e| StoreError::Unavailable(self.path.clone(), e))?;

        serde_json::from_str(&contents)
            .map_err(|e| StoreError::Corrupt(self.path.clone(), e.to_string()))
    }

    fn save(&self, recipes: &[Recipe]) -> Result<(), StoreError> {
        let contents = serde_json::to_vec_pretty(recipes)
            .map_err(|e| StoreError::Corrupt(self.path.clone(), e.to_string()))?;

        self.write_atomic(&contents)
    }
}
