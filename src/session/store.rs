//! Profile persistence.
//!
//! A [`ProfileStore`] holds at most one saved profile as JSON. The session
//! layer saves and restores its current profile through it.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{EngineError, EngineResult};
use crate::models::TaxpayerProfile;

/// Storage for a single saved profile.
pub trait ProfileStore {
    /// Replaces the saved profile.
    fn save(&mut self, profile: &TaxpayerProfile) -> EngineResult<()>;

    /// Returns the saved profile, or `None` if nothing has been saved.
    fn load(&self) -> EngineResult<Option<TaxpayerProfile>>;
}

fn to_json(profile: &TaxpayerProfile) -> EngineResult<String> {
    serde_json::to_string(profile).map_err(|e| EngineError::ProfileStore {
        message: format!("failed to serialize profile: {}", e),
    })
}

fn from_json(content: &str) -> EngineResult<TaxpayerProfile> {
    serde_json::from_str(content).map_err(|e| EngineError::ProfileStore {
        message: format!("saved profile is not valid: {}", e),
    })
}

/// Keeps the saved profile as a JSON string in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileStore {
    saved: Option<String>,
}

impl InMemoryProfileStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `json`.
    pub fn with_json(json: impl Into<String>) -> Self {
        Self {
            saved: Some(json.into()),
        }
    }

    /// The stored JSON, if any.
    pub fn json(&self) -> Option<&str> {
        self.saved.as_deref()
    }
}

impl ProfileStore for InMemoryProfileStore {
    fn save(&mut self, profile: &TaxpayerProfile) -> EngineResult<()> {
        self.saved = Some(to_json(profile)?);
        Ok(())
    }

    fn load(&self) -> EngineResult<Option<TaxpayerProfile>> {
        self.saved.as_deref().map(from_json).transpose()
    }
}

/// Keeps the saved profile in a JSON file.
///
/// A missing file means nothing has been saved yet.
#[derive(Debug, Clone)]
pub struct JsonFileProfileStore {
    path: PathBuf,
}

impl JsonFileProfileStore {
    /// Creates a store backed by the file at `path`.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProfileStore for JsonFileProfileStore {
    fn save(&mut self, profile: &TaxpayerProfile) -> EngineResult<()> {
        let json = to_json(profile)?;
        fs::write(&self.path, json).map_err(|e| EngineError::ProfileStore {
            message: format!("failed to write '{}': {}", self.path.display(), e),
        })
    }

    fn load(&self) -> EngineResult<Option<TaxpayerProfile>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path).map_err(|e| EngineError::ProfileStore {
            message: format!("failed to read '{}': {}", self.path.display(), e),
        })?;
        from_json(&content).map(Some)
    }
}
