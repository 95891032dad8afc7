//! Static per-game configuration for the four supported lotteries.
//!
//! Every game is described by an immutable [`GameConfig`] (display name,
//! default draw count, inclusive number range) plus an optional adjustable
//! draw-count range. The table is fixed at compile time and never mutated.
//!
//! # Invariants
//!
//! - Every config satisfies `1 <= total_numbers <= max_number`.
//! - Lookup by display name is exact; an unrecognized name is an explicit
//!   error, never a silent default.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from game configuration lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// No game in the fixed table carries this display name.
    #[error("unknown game name: {name}")]
    UnknownGame {
        /// The name that failed to resolve.
        name: String,
    },
}

/// One of the four supported lottery games.
///
/// The variant order is the canonical presentation order used by the
/// next-contest overview and the reminder plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameKind {
    /// Mega-Sena: 6 numbers out of 60.
    Megasena,
    /// Quina: 5 numbers out of 80.
    Quina,
    /// Lotomania: 50 numbers out of 100.
    Lotomania,
    /// Lotofácil: 15 numbers out of 25.
    Lotofacil,
}

impl GameKind {
    /// All games in canonical order.
    pub const ALL: [Self; 4] = [Self::Megasena, Self::Quina, Self::Lotomania, Self::Lotofacil];

    /// Lowercase path code used by the remote endpoint.
    #[must_use]
    pub const fn api_code(self) -> &'static str {
        match self {
            Self::Megasena => "megasena",
            Self::Quina => "quina",
            Self::Lotomania => "lotomania",
            Self::Lotofacil => "lotofacil",
        }
    }

    /// Uppercase game-type code carried in result payloads.
    #[must_use]
    pub const fn result_code(self) -> &'static str {
        match self {
            Self::Megasena => "MEGA_SENA",
            Self::Quina => "QUINA",
            Self::Lotomania => "LOTOMANIA",
            Self::Lotofacil => "LOTOFACIL",
        }
    }

    /// Human-readable display name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Megasena => "Mega-Sena",
            Self::Quina => "Quina",
            Self::Lotomania => "Lotomania",
            Self::Lotofacil => "Lotofácil",
        }
    }

    /// Resolves an uppercase result code (`MEGA_SENA`, ...) back to a game.
    ///
    /// Matching is case-insensitive. Unknown codes yield `None` so callers
    /// can render a generic row instead of failing the whole listing.
    #[must_use]
    pub fn from_result_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "MEGA_SENA" => Some(Self::Megasena),
            "QUINA" => Some(Self::Quina),
            "LOTOMANIA" => Some(Self::Lotomania),
            "LOTOFACIL" => Some(Self::Lotofacil),
            _ => None,
        }
    }

    /// The static configuration for this game.
    #[must_use]
    pub const fn config(self) -> &'static GameConfig {
        match self {
            Self::Megasena => &GAMES[0],
            Self::Quina => &GAMES[1],
            Self::Lotomania => &GAMES[2],
            Self::Lotofacil => &GAMES[3],
        }
    }

    /// The adjustable draw-count range, when the game allows one.
    ///
    /// Games without an adjustable range play a fixed count equal to
    /// [`GameConfig::total_numbers`].
    #[must_use]
    pub const fn count_range(self) -> Option<RangeInclusive<u32>> {
        match self {
            Self::Megasena => Some(6..=20),
            Self::Lotofacil => Some(15..=20),
            Self::Quina => Some(5..=15),
            Self::Lotomania => None,
        }
    }

    /// Clamps a requested draw count into the game's playable range.
    ///
    /// Values outside an adjustable range saturate at the nearest bound.
    /// Games with a fixed count always return the default count.
    #[must_use]
    pub fn clamp_count(self, requested: u32) -> u32 {
        match self.count_range() {
            Some(range) => requested.clamp(*range.start(), *range.end()),
            None => self.config().total_numbers,
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Immutable per-game parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Display name, e.g. `"Mega-Sena"`.
    pub name: &'static str,
    /// Default number of values drawn per ticket.
    pub total_numbers: u32,
    /// Inclusive upper bound of the draw range; values are in `[1, max]`.
    pub max_number: u32,
}

/// The fixed configuration table, indexed in [`GameKind::ALL`] order.
static GAMES: [GameConfig; 4] = [
    GameConfig {
        name: "Mega-Sena",
        total_numbers: 6,
        max_number: 60,
    },
    GameConfig {
        name: "Quina",
        total_numbers: 5,
        max_number: 80,
    },
    GameConfig {
        name: "Lotomania",
        total_numbers: 50,
        max_number: 100,
    },
    GameConfig {
        name: "Lotofácil",
        total_numbers: 15,
        max_number: 25,
    },
];

/// Looks up a game configuration by exact display name.
///
/// # Errors
///
/// Returns [`GameError::UnknownGame`] when no table entry matches.
pub fn config_for(name: &str) -> Result<&'static GameConfig, GameError> {
    GAMES
        .iter()
        .find(|config| config.name == name)
        .ok_or_else(|| GameError::UnknownGame {
            name: name.to_string(),
        })
}
