//! Remote lottery endpoint: wire shapes and the fetch seam.
//!
//! The public endpoint serves JSON per game at
//! `https://api.guidi.dev.br/loteria/{game}/{contest}`, where `{contest}`
//! is a contest number or the literal `ultimo` for the latest draw.
//!
//! Transport is kept behind the [`LotteryApi`] trait so orchestration code
//! and tests are independent of how bytes actually move. The default
//! implementation, [`CurlFetcher`], shells out to a non-interactive `curl`.

mod curl;

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::GameKind;

pub use curl::CurlFetcher;

/// A boxed future for async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Base URL of the public lottery endpoint.
pub const BASE_URL: &str = "https://api.guidi.dev.br/loteria";

/// Which contest of a game to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContestRef {
    /// The most recent drawn contest (`ultimo`).
    Latest,
    /// A specific contest number.
    Number(u32),
}

impl ContestRef {
    /// The URL path segment for this contest reference.
    #[must_use]
    pub fn path_segment(self) -> String {
        match self {
            Self::Latest => "ultimo".to_string(),
            Self::Number(number) => number.to_string(),
        }
    }
}

/// Errors from a single fetch. One game's failure never aborts another's;
/// orchestration substitutes placeholder records instead.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The transport process could not be spawned or joined.
    #[error("failed to run fetch command: {reason}")]
    Transport {
        /// Description of the failure.
        reason: String,
    },

    /// The endpoint answered with a failure status.
    #[error("request to {url} failed: {detail}")]
    Http {
        /// The URL that was requested.
        url: String,
        /// Stderr or status detail from the transport.
        detail: String,
    },

    /// The response body was not the expected JSON shape.
    #[error("undecodable response from {url}: {source}")]
    Decode {
        /// The URL that was requested.
        url: String,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },
}

/// One drawn contest as returned by the endpoint.
///
/// Field names on the wire are the endpoint's Portuguese camelCase keys.
/// `drawn_numbers` is absent on error payloads; a record with all
/// informational fields empty stands in for a game whose fetch failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawResult {
    /// Uppercase game-type code, e.g. `MEGA_SENA`.
    #[serde(rename = "tipoJogo")]
    pub game_code: String,

    /// Contest number; 0 in placeholder records.
    #[serde(rename = "numero", default)]
    pub contest: u32,

    /// Drawn numbers as zero-padded two-digit strings.
    #[serde(
        rename = "listaDezenas",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub drawn_numbers: Option<Vec<String>>,

    /// Whether the prize rolled over to the next contest.
    #[serde(rename = "acumulado", default)]
    pub rolled_over: bool,
}

impl DrawResult {
    /// Placeholder record for a game whose fetch failed: the game is still
    /// represented, with every informational field empty or absent.
    #[must_use]
    pub fn placeholder(game: GameKind) -> Self {
        Self {
            game_code: game.result_code().to_string(),
            contest: 0,
            drawn_numbers: None,
            rolled_over: false,
        }
    }

    /// The game this record belongs to, when the code is recognized.
    #[must_use]
    pub fn game(&self) -> Option<GameKind> {
        GameKind::from_result_code(&self.game_code)
    }
}

/// Next-contest estimate fields of the latest-draw payload.
///
/// All fields are optional on the wire; absent fields render as
/// "unavailable" rather than failing the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextContest {
    /// Estimated prize for the upcoming contest, in BRL.
    #[serde(rename = "valorEstimadoProximoConcurso", default)]
    pub estimated_prize: Option<f64>,

    /// Number of the upcoming contest.
    #[serde(rename = "numeroConcursoProximo", default)]
    pub contest_number: Option<u32>,

    /// Date of the upcoming contest in `dd/MM/yyyy`.
    #[serde(rename = "dataProximoConcurso", default)]
    pub contest_date: Option<String>,
}

/// Fetch seam over the remote lottery endpoint.
///
/// Implementations must be cheap to share across concurrent per-game
/// tasks; all methods borrow `self` immutably.
pub trait LotteryApi: Send + Sync {
    /// Fetches one contest result for a game.
    fn fetch_result(
        &self,
        game: GameKind,
        contest: ContestRef,
    ) -> BoxFuture<'_, Result<DrawResult, ApiError>>;

    /// Fetches the next-contest estimate carried by a game's latest draw.
    fn fetch_next(&self, game: GameKind) -> BoxFuture<'_, Result<NextContest, ApiError>>;
}
