use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::{Error, Result};

/// A scalar recorded against a key in the state file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StateValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl From<f64> for StateValue {
    fn from(value: f64) -> Self {
        StateValue::Float(value)
    }
}

impl From<bool> for StateValue {
    fn from(value: bool) -> Self {
        StateValue::Bool(value)
    }
}

impl From<i64> for StateValue {
    fn from(value: i64) -> Self {
        StateValue::Int(value)
    }
}

impl From<&str> for StateValue {
    fn from(value: &str) -> Self {
        StateValue::Str(value.to_string())
    }
}

impl From<String> for StateValue {
    fn from(value: String) -> Self {
        StateValue::Str(value)
    }
}

/// Flat key/value map persisted as a single JSON object.
///
/// Loaded once at startup, mutated in memory, written back once at teardown.
#[derive(Debug, Clone, Default)]
pub struct StateStore {
    entries: BTreeMap<String, StateValue>,
    path: Option<PathBuf>,
}

impl StateStore {
    /// Create an empty store bound to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            entries: BTreeMap::new(),
            path: Some(path.into()),
        }
    }

    /// Load the store from `path`.
    ///
    /// A missing or unreadable file yields an empty store: the state only
    /// caches what is on disk, so losing it costs at most a re-sync.
    pub fn load(path: &Path) -> Self {
        let mut store = Self::new(path);
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "no state file, starting empty");
                return store;
            }
        };

        let raw: serde_json::Map<String, serde_json::Value> = match serde_json::from_str(&content) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring malformed state file");
                return store;
            }
        };

        // Entries are taken one by one so a single odd value costs only itself
        for (key, value) in raw {
            match serde_json::from_value::<StateValue>(value) {
                Ok(value) => {
                    store.entries.insert(key, value);
                }
                Err(e) => warn!(key = %key, error = %e, "dropping non-scalar state entry"),
            }
        }
        store
    }

    /// Write the whole map back to the path it was loaded from.
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::FileWrite {
                path: path.clone(),
                source: e,
            })?;
        }

        let content = serde_json::to_string_pretty(&self.entries).map_err(|e| Error::JsonParse {
            path: path.clone(),
            source: e,
        })?;

        std::fs::write(path, content).map_err(|e| Error::FileWrite {
            path: path.clone(),
            source: e,
        })
    }

    pub fn get(&self, key: &str) -> Option<&StateValue> {
        self.entries.get(key)
    }

    /// Boolean value for `key`; anything else reads as `false`.
    pub fn get_bool(&self, key: &str) -> bool {
        matches!(self.entries.get(key), Some(StateValue::Bool(true)))
    }

    pub fn get_int(&self, key: &str) -> i64 {
        match self.entries.get(key) {
            Some(StateValue::Int(i)) => *i,
            _ => 0,
        }
    }

    pub fn get_str(&self, key: &str) -> &str {
        match self.entries.get(key) {
            Some(StateValue::Str(s)) => s,
            _ => "",
        }
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<StateValue>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<StateValue> {
        self.entries.remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
