//! Split ratio persistence.
//!
//! A split pane remembers one number across sessions: the committed
//! `left / right` width ratio, stored as text under a caller-chosen key.
//! [`RatioStore`] is the durable key-value seam; [`MemoryStore`] keeps values in
//! process (shared between clones) and [`FileStore`] keeps a JSON object of
//! `key -> value` strings on disk.
//!
//! Values that fail to parse, or parse to something that cannot be a width
//! ratio, are treated as "no ratio yet".

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Storage backend failures.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to access ratio file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("ratio file {path} is not a JSON object of strings: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// Ratio codec
// ---------------------------------------------------------------------------

/// Encode a ratio as stored text.
pub fn encode_ratio(ratio: f64) -> String {
    ratio.to_string()
}

/// Decode stored text into a usable ratio.
///
/// Accepts finite, non-negative numbers. Anything else (including surrounding
/// garbage, `NaN` and infinities) yields `None`.
pub fn decode_ratio(text: &str) -> Option<f64> {
    let value: f64 = text.trim().parse().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}

// ---------------------------------------------------------------------------
// RatioStore
// ---------------------------------------------------------------------------

/// Durable key-value storage for split ratios.
///
/// Methods take `&self`: stores are handles, and several components may share
/// one backend. Writes to the same key are last-write-wins.
pub trait RatioStore {
    /// Read the raw value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Read and decode the ratio under `key`.
    ///
    /// Malformed values are logged and reported as absent.
    fn load_ratio(&self, key: &str) -> Result<Option<f64>, StorageError> {
        let Some(raw) = self.get(key)? else {
            return Ok(None);
        };
        let ratio = decode_ratio(&raw);
        if ratio.is_none() {
            tracing::warn!(key, value = %raw, "ignoring malformed split ratio");
        }
        Ok(ratio)
    }

    /// Encode and store `ratio` under `key`.
    fn save_ratio(&self, key: &str, ratio: f64) -> Result<(), StorageError> {
        self.set(key, &encode_ratio(ratio))
    }
}

impl<S: RatioStore + ?Sized> RatioStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// In-process store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }
}

impl RatioStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FileStore
// ---------------------------------------------------------------------------

/// JSON-file store: `{"sidebar": "0.5", ...}`.
///
/// The file is read on every `get` and rewritten on every `set`, so several
/// stores pointed at one path observe each other's writes. A missing or empty
/// file reads as an empty map. A file that is not a JSON object of strings
/// fails `get`, and the next `set` replaces it with a fresh map.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// A store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// A store at the platform default location,
    /// `<config dir>/<app>/split-ratios.json`.
    pub fn in_config_dir(app: &str) -> Self {
        Self::new(Self::default_path(app))
    }

    /// The platform default ratio file path for `app`.
    pub fn default_path(app: &str) -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(app)
            .join("split-ratios.json")
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => return Err(self.io_error(err)),
        };
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&contents).map_err(|source| StorageError::Json {
            path: self.path.clone(),
            source,
        })
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }
        let json = serde_json::to_string_pretty(map).map_err(|source| StorageError::Json {
            path: self.path.clone(),
            source,
        })?;
        std::fs::write(&self.path, json).map_err(|e| self.io_error(e))
    }
}

impl RatioStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_map()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut map = match self.read_map() {
            Ok(map) => map,
            Err(StorageError::Json { source, .. }) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %source,
                    "discarding corrupt ratio file"
                );
                BTreeMap::new()
            }
            Err(err) => return Err(err),
        };
        map.insert(key.to_owned(), value.to_owned());
        self.write_map(&map)?;
        tracing::debug!(key, path = %self.path.display(), "split ratio saved");
        Ok(())
    }
}

// ===========================================================================
// Tests
// ===========================================================================
