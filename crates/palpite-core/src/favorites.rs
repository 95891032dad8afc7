//! Durable store for favorite number sets.
//!
//! Favorites live in one JSON array on disk, loaded once when the store is
//! opened and held in memory afterwards. Add and remove are idempotent,
//! keyed on the (game type, numbers) pair: adding an existing pair is a
//! silent no-op, removing clears every match. A missing or undecodable
//! file opens as an empty store.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::ticket::SEPARATOR;

/// File name of the favorites store inside the data directory.
pub const FAVORITES_FILE: &str = "favorite_numbers_entries.json";

/// Errors from favorites writes. Reads never error; a broken file opens
/// as an empty store.
#[derive(Debug, Error)]
pub enum FavoritesError {
    /// The store file could not be written.
    #[error("failed to write favorites file {path}: {source}")]
    Io {
        /// Path of the store file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The entries could not be serialized.
    #[error("failed to serialize favorites: {source}")]
    Serialize {
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },
}

/// One saved favorite combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteEntry {
    /// Display name of the game, e.g. `"Mega-Sena"`.
    pub game_type: String,
    /// Display tokens in ticket order.
    pub numbers: Vec<String>,
    /// When the entry was saved.
    pub saved_at: DateTime<Utc>,
}

impl FavoriteEntry {
    /// Canonical display string: tokens joined with the clover separator.
    #[must_use]
    pub fn display_string(&self) -> String {
        self.numbers.join(SEPARATOR)
    }
}

/// In-memory favorites collection backed by one JSON file.
#[derive(Debug)]
pub struct FavoritesStore {
    path: PathBuf,
    entries: Vec<FavoriteEntry>,
}

impl FavoritesStore {
    /// Opens the store inside `data_dir`, loading any existing entries.
    ///
    /// Read or decode failures are treated as "no favorites yet".
    #[must_use]
    pub fn open(data_dir: &Path) -> Self {
        let path = data_dir.join(FAVORITES_FILE);
        let entries = match std::fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice::<Vec<FavoriteEntry>>(&bytes) {
                Ok(entries) => entries,
                Err(err) => {
                    debug!(path = %path.display(), error = %err, "favorites file undecodable, starting empty");
                    Vec::new()
                },
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(err) => {
                debug!(path = %path.display(), error = %err, "favorites file unreadable, starting empty");
                Vec::new()
            },
        };
        Self { path, entries }
    }

    /// The saved entries, in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[FavoriteEntry] {
        &self.entries
    }

    /// `true` when this (game, numbers) pair is already saved.
    #[must_use]
    pub fn is_favorited(&self, game_type: &str, numbers: &[String]) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.game_type == game_type && entry.numbers == numbers)
    }

    /// Saves a new favorite. Returns `false` when the pair was already
    /// present (the store is left untouched).
    ///
    /// # Errors
    ///
    /// Returns [`FavoritesError`] when persisting the updated store fails.
    pub fn add(&mut self, game_type: &str, numbers: Vec<String>) -> Result<bool, FavoritesError> {
        if self.is_favorited(game_type, &numbers) {
            return Ok(false);
        }
        self.entries.push(FavoriteEntry {
            game_type: game_type.to_string(),
            numbers,
            saved_at: Utc::now(),
        });
        self.save()?;
        info!(game_type, total = self.entries.len(), "favorite saved");
        Ok(true)
    }

    /// Removes every entry matching the pair. Returns `false` when nothing
    /// matched (the store is left untouched).
    ///
    /// # Errors
    ///
    /// Returns [`FavoritesError`] when persisting the updated store fails.
    pub fn remove(
        &mut self,
        game_type: &str,
        numbers: &[String],
    ) -> Result<bool, FavoritesError> {
        let before = self.entries.len();
        self.entries
            .retain(|entry| !(entry.game_type == game_type && entry.numbers == numbers));
        if self.entries.len() == before {
            return Ok(false);
        }
        self.save()?;
        info!(game_type, total = self.entries.len(), "favorite removed");
        Ok(true)
    }

    fn save(&self) -> Result<(), FavoritesError> {
        let parent = self.path.parent().unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent).map_err(|source| FavoritesError::Io {
            path: self.path.clone(),
            source,
        })?;
        let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(|source| {
            FavoritesError::Io {
                path: self.path.clone(),
                source,
            }
        })?;
        serde_json::to_writer_pretty(tmp.as_file_mut(), &self.entries)
            .map_err(|source| FavoritesError::Serialize { source })?;
        tmp.as_file_mut().flush().map_err(|source| FavoritesError::Io {
            path: self.path.clone(),
            source,
        })?;
        tmp.persist(&self.path).map_err(|err| FavoritesError::Io {
            path: self.path.clone(),
            source: err.error,
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FavoritesStore::open(dir.path());
        assert!(store.entries().is_empty());
    }

    #[test]
    fn undecodable_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(FAVORITES_FILE), b"][").unwrap();
        let store = FavoritesStore::open(dir.path());
        assert!(store.entries().is_empty());
    }

    #[test]
    fn add_is_idempotent_on_the_pair() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FavoritesStore::open(dir.path());

        assert!(store.add("Mega-Sena", numbers(&["03", "11", "22"])).unwrap());
        assert!(!store.add("Mega-Sena", numbers(&["03", "11", "22"])).unwrap());
        // Same numbers under another game are a different favorite.
        assert!(store.add("Quina", numbers(&["03", "11", "22"])).unwrap());
        assert_eq!(store.entries().len(), 2);
    }

    #[test]
    fn remove_clears_matches_and_reports_misses() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FavoritesStore::open(dir.path());

        store.add("Quina", numbers(&["05", "42"])).unwrap();
        assert!(store.remove("Quina", &numbers(&["05", "42"])).unwrap());
        assert!(!store.remove("Quina", &numbers(&["05", "42"])).unwrap());
        assert!(store.entries().is_empty());
    }

    #[test]
    fn entries_survive_reopening() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut store = FavoritesStore::open(dir.path());
            store
                .add("Lotofácil", numbers(&["01", "02", "03"]))
                .unwrap();
        }
        let reopened = FavoritesStore::open(dir.path());
        assert_eq!(reopened.entries().len(), 1);
        assert!(reopened.is_favorited("Lotofácil", &numbers(&["01", "02", "03"])));
    }

    #[test]
    fn display_string_joins_with_the_clover() {
        let entry = FavoriteEntry {
            game_type: "Mega-Sena".to_string(),
            numbers: numbers(&["03", "11"]),
            saved_at: Utc::now(),
        };
        assert_eq!(entry.display_string(), "03 🍀 11");
    }
}
