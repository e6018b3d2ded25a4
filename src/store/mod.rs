//! JSON flat-file record store
//!
//! Each entity collection lives in one pretty-printed UTF-8 JSON file that is
//! rewritten in full on every mutation. There is no file locking: two editors
//! writing the same store race and the last write wins. Callers serialize
//! access by not opening duplicate editors.
//!
//! Loading is fail-open by policy: a missing or unparseable file behaves as
//! an empty collection so the application stays usable with a damaged store.
//! [`load`] exposes the distinction through [`LoadResult`] for callers that
//! want to surface corruption instead; [`load_or_default`] applies the
//! fail-open policy and logs a warning on the corrupt path.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Outcome of loading a collection file.
#[derive(Debug)]
pub enum LoadResult<T> {
    /// File existed and parsed.
    Loaded(Vec<T>),
    /// File does not exist yet. Normal on first run.
    Missing,
    /// File exists but did not parse. The caller decides whether to treat
    /// this as empty (the default policy) or to stop and surface it.
    Corrupt(serde_json::Error),
}

impl<T> LoadResult<T> {
    /// Apply the fail-open policy: Missing and Corrupt both become empty.
    pub fn into_fail_open(self) -> Vec<T> {
        match self {
            LoadResult::Loaded(records) => records,
            LoadResult::Missing => Vec::new(),
            LoadResult::Corrupt(_) => Vec::new(),
        }
    }
}

/// Load a collection from `path`.
pub fn load<T: DeserializeOwned>(path: &Path) -> StoreResult<LoadResult<T>> {
    if !path.exists() {
        return Ok(LoadResult::Missing);
    }
    let raw = fs::read_to_string(path)?;
    match serde_json::from_str::<Vec<T>>(&raw) {
        Ok(records) => Ok(LoadResult::Loaded(records)),
        Err(e) => Ok(LoadResult::Corrupt(e)),
    }
}

/// Load a collection, treating a missing or corrupt file as empty.
///
/// Corruption is logged so the fail-open recovery is at least observable.
pub fn load_or_default<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    match load(path) {
        Ok(result) => {
            if let LoadResult::Corrupt(e) = &result {
                tracing::warn!(path = %path.display(), error = %e, "Store file is corrupt, starting empty");
            }
            result.into_fail_open()
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Store file is unreadable, starting empty");
            Vec::new()
        }
    }
}

/// Persist a collection to `path`, overwriting the whole file.
///
/// Parent directories are created as needed. Errors are returned, never
/// swallowed: a failed save means unpersisted in-memory state.
pub fn save<T: Serialize>(path: &Path, records: &[T]) -> StoreResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json)?;
    Ok(())
}

/// Load a single-object file (e.g. the price-per-kg scalar), fail-open.
pub fn load_value_or<T: DeserializeOwned>(path: &Path, default: T) -> T {
    if !path.exists() {
        return default;
    }
    match fs::read_to_string(path) {
        Ok(raw) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Value file is corrupt, using default");
                default
            }
        },
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Value file is unreadable, using default");
            default
        }
    }
}

/// Persist a single-object file.
pub fn save_value<T: Serialize>(path: &Path, value: &T) -> StoreResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}
