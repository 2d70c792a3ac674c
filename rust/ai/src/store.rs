//! Persistence for [`LearnedWeights`].

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::errors::AiError;
use crate::weights::LearnedWeights;

pub trait ParameterStore: Send {
    /// Reads the stored weights. A store that holds nothing yet yields the
    /// defaults.
    fn load(&self) -> Result<LearnedWeights, AiError>;

    fn save(&mut self, weights: &LearnedWeights) -> Result<(), AiError>;

    /// Like [`ParameterStore::load`], but any failure is logged and replaced
    /// with the defaults.
    fn load_or_default(&self) -> LearnedWeights {
        match self.load() {
            Ok(w) => w,
            Err(e) => {
                warn!(error = %e, "falling back to default weights");
                LearnedWeights::default()
            }
        }
    }
}

/// Pretty-printed JSON file. Saves go through a temporary file in the same
/// directory that is renamed over the target.
#[derive(Debug, Clone)]
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

    fn corrupted(&self, reason: impl Into<String>) -> AiError {
        AiError::CorruptedParameterStore {
            path: self.path.display().to_string(),
            reason: reason.into(),
        }
    }
}

pub fn to_pretty_json(weights: &LearnedWeights) -> Result<String, AiError> {
    let mut text = serde_json::to_string_pretty(weights)?;
    text.push('\n');
    Ok(text)
}

impl ParameterStore for FileStore {
    fn load(&self) -> Result<LearnedWeights, AiError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(t) => t,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no stored weights, using defaults");
                return Ok(LearnedWeights::default());
            }
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                return Err(self.corrupted(e.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        let weights: LearnedWeights =
            serde_json::from_str(&text).map_err(|e| self.corrupted(e.to_string()))?;
        if let Some((feature, value)) = weights.first_invalid() {
            return Err(self.corrupted(format!("{} has invalid value {}", feature, value)));
        }
        Ok(weights)
    }

    fn save(&mut self, weights: &LearnedWeights) -> Result<(), AiError> {
        let text = to_pretty_json(weights)?;
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;
        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(text.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|e| AiError::Io(e.error))?;
        debug!(path = %self.path.display(), "weights saved");
        Ok(())
    }
}

/// In-process store. Clones share the same slot, so a test can keep one
/// handle and inspect what a policy saved through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemorySlot>>,
}

#[derive(Debug, Default)]
struct MemorySlot {
    weights: Option<LearnedWeights>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(weights: LearnedWeights) -> Self {
        let store = Self::default();
        store.lock().weights = Some(weights);
        store
    }

    pub fn saved(&self) -> Option<LearnedWeights> {
        self.lock().weights
    }

    pub fn save_count(&self) -> usize {
        self.lock().saves
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemorySlot> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ParameterStore for MemoryStore {
    fn load(&self) -> Result<LearnedWeights, AiError> {
        Ok(self.lock().weights.unwrap_or_default())
    }

    fn save(&mut self, weights: &LearnedWeights) -> Result<(), AiError> {
        let mut slot = self.lock();
        slot.weights = Some(*weights);
        slot.saves += 1;
        Ok(())
    }
}
