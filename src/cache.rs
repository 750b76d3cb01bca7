use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::types::RepoEntry;

const SUMMARIES_KEY: &str = "summaries";

/// XDG-compatible cache directory: ~/.cache/active-repos/ (Linux) or ~/Library/Caches/active-repos/ (macOS)
pub fn cache_dir() -> Option<PathBuf> {
    let dir = dirs::cache_dir()?.join("active-repos");
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir)
}

fn cache_path(key: &str) -> Option<PathBuf> {
    Some(cache_dir()?.join(format!("{}.json", key)))
}

/// Read a cached value. Returns None if missing or corrupt.
pub fn read<T: DeserializeOwned>(key: &str) -> Option<T> {
    let path = cache_path(key)?;
    let data = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&data).ok()
}

/// Write a value to cache. Silently ignores errors.
pub fn write<T: Serialize>(key: &str, value: &T) {
    if let Some(path) = cache_path(key) {
        if let Ok(data) = serde_json::to_string(value) {
            if let Err(e) = std::fs::write(&path, data) {
                tracing::debug!(path = %path.display(), error = %e, "cache write failed");
            }
        }
    }
}

/// A completed load together with when it happened and what was asked for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedLoad {
    pub fetched_at: DateTime<Utc>,
    pub repos: Vec<String>,
    pub entries: Vec<RepoEntry>,
}

impl CachedLoad {
    /// Usable only for the same repository list and while younger than `window`.
    pub fn is_fresh(&self, repos: &[String], now: DateTime<Utc>, window: Duration) -> bool {
        if self.repos != repos {
            return false;
        }
        match now.signed_duration_since(self.fetched_at).to_std() {
            Ok(age) => age < window,
            // fetched_at in the future: clock moved backwards, refetch
            Err(_) => false,
        }
    }

    /// Loads with failures are not worth keeping; the next run should retry.
    pub fn is_cacheable(&self) -> bool {
        !self.entries.iter().any(RepoEntry::is_failed)
    }
}

pub fn read_summaries() -> Option<CachedLoad> {
    read(SUMMARIES_KEY)
}

pub fn write_summaries(load: &CachedLoad) {
    if load.is_cacheable() {
        write(SUMMARIES_KEY, load);
    } else {
        tracing::debug!("load contains failures; not caching");
    }
}
