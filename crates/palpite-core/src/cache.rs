//! Disk-backed JSON cache with a day/22:00 staleness policy.
//!
//! Remote listings are cheap to serve from disk and only worth refreshing
//! when a new draw may have happened. Cached data is considered stale when
//! either boundary has been crossed since it was written:
//!
//! 1. the start of the current calendar day, or
//! 2. 22:00 local time on the current day (draws close in the evening).
//!
//! Each cache key maps to one JSON file holding an envelope of
//! `{ updated_at, payload }`. A missing or undecodable file is treated as
//! "no cached data present", never as an error.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDateTime, NaiveTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Hour (local time) after which same-day data must be refreshed.
const REFRESH_HOUR: u32 = 22;

/// Errors from cache writes. Reads never error; see [`DiskCache::load`].
#[derive(Debug, Error)]
pub enum CacheError {
    /// The cache directory or file could not be written.
    #[error("failed to write cache file {path}: {source}")]
    Io {
        /// Path of the offending file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The payload could not be serialized.
    #[error("failed to serialize cache payload for key `{key}`: {source}")]
    Serialize {
        /// Cache key being written.
        key: String,
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },
}

/// Returns `true` when data stamped `last_updated` must be refreshed at
/// `now`. Both timestamps are local naive datetimes.
#[must_use]
pub fn is_stale(last_updated: NaiveDateTime, now: NaiveDateTime) -> bool {
    let start_of_day = now.date().and_time(NaiveTime::MIN);
    if last_updated < start_of_day {
        return true;
    }
    if let Some(cutoff) = now.date().and_hms_opt(REFRESH_HOUR, 0, 0) {
        if now >= cutoff && last_updated < cutoff {
            return true;
        }
    }
    false
}

/// Envelope written to disk for every cache entry.
#[derive(Debug, Serialize, Deserialize)]
struct Envelope<T> {
    updated_at: DateTime<Utc>,
    payload: T,
}

/// A directory of JSON cache entries keyed by name.
#[derive(Debug, Clone)]
pub struct DiskCache {
    root: PathBuf,
}

impl DiskCache {
    /// Creates a cache rooted at `root`. The directory is created lazily
    /// on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Stores `value` under `key`, stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] when the payload cannot be serialized or the
    /// file cannot be written.
    pub fn store<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        self.store_with_timestamp(key, value, Utc::now())
    }

    /// Stores `value` under `key` with an explicit timestamp.
    ///
    /// # Errors
    ///
    /// Same contract as [`DiskCache::store`].
    pub fn store_with_timestamp<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        updated_at: DateTime<Utc>,
    ) -> Result<(), CacheError> {
        let path = self.path_for(key);
        let envelope = Envelope {
            updated_at,
            payload: value,
        };
        write_json_atomic(&path, &envelope).map_err(|source| match source {
            WriteError::Io(source) => CacheError::Io { path, source },
            WriteError::Serialize(source) => CacheError::Serialize {
                key: key.to_string(),
                source,
            },
        })
    }

    /// Loads the entry under `key` along with its timestamp.
    ///
    /// A missing file, unreadable file, or undecodable payload yields
    /// `None`: the cache is simply treated as absent.
    #[must_use]
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<(T, DateTime<Utc>)> {
        let path = self.path_for(key);
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "cache read failed");
                return None;
            },
        };
        match serde_json::from_slice::<Envelope<T>>(&bytes) {
            Ok(envelope) => Some((envelope.payload, envelope.updated_at)),
            Err(err) => {
                debug!(path = %path.display(), error = %err, "cache entry undecodable, treating as absent");
                None
            },
        }
    }

    /// Loads the entry under `key` only when it is still fresh at `now`
    /// (local naive time) per [`is_stale`].
    #[must_use]
    pub fn load_fresh<T: DeserializeOwned>(&self, key: &str, now: NaiveDateTime) -> Option<T> {
        let (payload, updated_at) = self.load(key)?;
        let updated_local = updated_at.with_timezone(&Local).naive_local();
        if is_stale(updated_local, now) {
            debug!(key, "cache entry is stale");
            None
        } else {
            Some(payload)
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

enum WriteError {
    Io(std::io::Error),
    Serialize(serde_json::Error),
}

/// Writes JSON to `path` atomically: serialize into a temp file in the
/// same directory, flush, then persist over the target.
fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), WriteError> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent).map_err(WriteError::Io)?;
    let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(WriteError::Io)?;
    serde_json::to_writer_pretty(tmp.as_file_mut(), value).map_err(WriteError::Serialize)?;
    tmp.as_file_mut().flush().map_err(WriteError::Io)?;
    tmp.persist(path)
        .map_err(|err| WriteError::Io(err.error))?;
    Ok(())
}
