//! Persistent JSON documents
//!
//! Two documents are kept on disk: the conversation history and the chat
//! configuration. Every operation reports failure through [`crate::Result`]
//! and never panics; callers decide whether to substitute defaults or keep
//! their in-memory state. There is no locking, so a second process writing
//! the same files can silently lose updates.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::{Error, Result};

/// File locations for the persisted state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    /// History document (`conversaciones` + `actual`)
    pub history: PathBuf,
    /// Chat configuration document
    pub config: PathBuf,
    /// Line-editor input history
    pub input_history: PathBuf,
    /// Directory for rolling log files
    pub log_dir: PathBuf,
}

impl StorePaths {
    /// Layout in the user's home directory, compatible with existing files
    pub fn from_home() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            history: home.join(".gemipy_historial.json"),
            config: home.join(".gemipy_config.json"),
            input_history: home.join(".gemipy_input_history"),
            log_dir: home.join(".gemipy").join("logs"),
        }
    }

    /// Layout rooted at a custom data directory
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            history: dir.join("historial.json"),
            config: dir.join("config.json"),
            input_history: dir.join("input_history"),
            log_dir: dir.join("logs"),
        }
    }
}

/// A single JSON document on disk
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    /// Create a store backed by `path`
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the document. `Ok(None)` means the file does not exist.
    pub fn load<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            Error::Storage(format!("failed to read {}: {}", self.path.display(), e))
        })?;
        let document = serde_json::from_str(&content).map_err(|e| {
            Error::Storage(format!("failed to parse {}: {}", self.path.display(), e))
        })?;
        Ok(Some(document))
    }

    /// Load the document, substituting `T::default()` when it is missing or unreadable
    pub fn load_or_default<T: DeserializeOwned + Default>(&self) -> T {
        match self.load() {
            Ok(Some(document)) => document,
            Ok(None) => {
                debug!("{} not found, starting from defaults", self.path.display());
                T::default()
            }
            Err(e) => {
                warn!("{}; starting from defaults", e);
                T::default()
            }
        }
    }

    /// Serialize the document as pretty JSON and replace the file
    pub fn save<T: Serialize>(&self, document: &T) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(document)?;
        let tmp_path = self.tmp_path();
        std::fs::write(&tmp_path, content).map_err(|e| {
            Error::Storage(format!("failed to write {}: {}", tmp_path.display(), e))
        })?;
        std::fs::rename(&tmp_path, &self.path).map_err(|e| {
            let _ = std::fs::remove_file(&tmp_path);
            Error::Storage(format!("failed to replace {}: {}", self.path.display(), e))
        })?;

        debug!("Saved {}", self.path.display());
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
