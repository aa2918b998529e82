//! Option stores.
//!
//! The store is the host's persistence layer. Bundles are read and written
//! whole; nothing here ever touches a single key.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use settingsform_fields::OptionBundle;
use tracing::debug;

use crate::error::{FormError, Result};

/// Get/set whole option bundles by option name.
pub trait OptionStore {
    /// The stored bundle, or `None` if nothing was ever saved.
    fn get(&self, option_name: &str) -> Result<Option<OptionBundle>>;

    /// Replace the stored bundle.
    fn set(&mut self, option_name: &str, bundle: OptionBundle) -> Result<()>;
}

/// In-process store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    options: HashMap<String, OptionBundle>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style seed.
    pub fn with(mut self, option_name: impl Into<String>, bundle: OptionBundle) -> Self {
        self.options.insert(option_name.into(), bundle);
        self
    }
}

impl OptionStore for MemoryStore {
    fn get(&self, option_name: &str) -> Result<Option<OptionBundle>> {
        Ok(self.options.get(option_name).cloned())
    }

    fn set(&mut self, option_name: &str, bundle: OptionBundle) -> Result<()> {
        self.options.insert(option_name.to_string(), bundle);
        Ok(())
    }
}

/// A JSON object file mapping option name → bundle.
///
/// Read fresh on every access; writes go to a sibling temp file and are
/// renamed into place. Option names keep their order in the file.
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

    fn load(&self) -> Result<IndexMap<String, OptionBundle>> {
        if !self.path.exists() {
            return Ok(IndexMap::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(IndexMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }
}

impl OptionStore for JsonFileStore {
    fn get(&self, option_name: &str) -> Result<Option<OptionBundle>> {
        let mut options = self.load().map_err(|e| FormError::Store {
            option_name: option_name.to_string(),
            message: e.to_string(),
        })?;
        Ok(options.shift_remove(option_name))
    }

    fn set(&mut self, option_name: &str, bundle: OptionBundle) -> Result<()> {
        let mut options = self.load()?;
        options.insert(option_name.to_string(), bundle);
        let json = serde_json::to_string_pretty(&options)?;
        atomic_write(&self.path, json.as_bytes())?;
        debug!(path = %self.path.display(), option = option_name, "option saved");
        Ok(())
    }
}

/// Write to a temp file then rename for atomic persistence.
fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    let file_name = path
        .file_name()
        .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::InvalidInput, "no file name"))?;
    let tmp = path.with_file_name(format!(".{}.tmp", file_name.to_string_lossy()));
    std::fs::write(&tmp, data)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}
