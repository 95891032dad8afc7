//! `curl`-backed implementation of the fetch seam.
//!
//! Builds a non-interactive `curl` invocation per request: silent output,
//! hard failure on HTTP error statuses, and a bounded overall time so a
//! wedged endpoint cannot stall the per-game fan-out. The blocking process
//! wait runs on the tokio blocking pool.

use std::process::Command;

use tracing::debug;

use super::{ApiError, BoxFuture, ContestRef, DrawResult, LotteryApi, NextContest, BASE_URL};
use crate::game::GameKind;

/// Default overall request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u32 = 15;

/// Fetches endpoint JSON through a `curl` subprocess.
#[derive(Debug, Clone)]
pub struct CurlFetcher {
    base_url: String,
    timeout_secs: u32,
}

impl CurlFetcher {
    /// Creates a fetcher against the public endpoint.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Overrides the base URL. Intended for endpoint mirrors.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the overall request timeout.
    #[must_use]
    pub const fn with_timeout_secs(mut self, timeout_secs: u32) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    fn url_for(&self, game: GameKind, contest: ContestRef) -> String {
        format!(
            "{}/{}/{}",
            self.base_url,
            game.api_code(),
            contest.path_segment()
        )
    }

    /// Builds the `curl` command for one URL.
    ///
    /// `--fail` turns HTTP error statuses into a non-zero exit so they are
    /// never mistaken for a body; `--max-time` bounds the whole transfer.
    fn command(url: &str, timeout_secs: u32) -> Command {
        let mut cmd = Command::new("curl");
        cmd.arg("--silent")
            .arg("--show-error")
            .arg("--fail")
            .arg("--location")
            .arg("--max-time")
            .arg(timeout_secs.to_string())
            .arg(url);
        cmd
    }

    async fn fetch_bytes(&self, url: String) -> Result<Vec<u8>, ApiError> {
        debug!(%url, "fetching lottery endpoint");
        let timeout_secs = self.timeout_secs;
        let spawn_url = url.clone();
        let output = tokio::task::spawn_blocking(move || {
            Self::command(&spawn_url, timeout_secs).output()
        })
        .await
        .map_err(|err| ApiError::Transport {
            reason: err.to_string(),
        })?
        .map_err(|err| ApiError::Transport {
            reason: err.to_string(),
        })?;

        if !output.status.success() {
            let detail = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(ApiError::Http {
                url,
                detail: if detail.is_empty() {
                    output.status.to_string()
                } else {
                    detail
                },
            });
        }
        Ok(output.stdout)
    }
}

impl Default for CurlFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl LotteryApi for CurlFetcher {
    fn fetch_result(
        &self,
        game: GameKind,
        contest: ContestRef,
    ) -> BoxFuture<'_, Result<DrawResult, ApiError>> {
        let url = self.url_for(game, contest);
        Box::pin(async move {
            let bytes = self.fetch_bytes(url.clone()).await?;
            serde_json::from_slice(&bytes).map_err(|source| ApiError::Decode { url, source })
        })
    }

    fn fetch_next(&self, game: GameKind) -> BoxFuture<'_, Result<NextContest, ApiError>> {
        let url = self.url_for(game, ContestRef::Latest);
        Box::pin(async move {
            let bytes = self.fetch_bytes(url.clone()).await?;
            serde_json::from_slice(&bytes).map_err(|source| ApiError::Decode { url, source })
        })
    }
}
