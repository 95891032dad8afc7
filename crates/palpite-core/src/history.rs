//! Contest-history overview: concurrent per-game fetch, cache, filters.
//!
//! Each game is loaded by its own task: the latest result first, then up
//! to four preceding contests. Failures are isolated per game — a game
//! whose latest result cannot be fetched is represented by a placeholder
//! record, and a failed preceding contest is simply skipped. One slow or
//! broken game never blocks or empties the others.

use std::sync::Arc;

use chrono::Local;
use futures::future::join_all;
use tracing::{debug, warn};

use crate::api::{ContestRef, DrawResult, LotteryApi};
use crate::cache::DiskCache;
use crate::game::GameKind;

/// Cache key for the combined history listing.
pub const HISTORY_CACHE_KEY: &str = "history_results_cache";

/// How many contests before the latest to include per game.
const PRECEDING_CONTESTS: u32 = 4;

/// Filter over a history listing. An empty filter keeps everything.
#[derive(Debug, Clone, Default)]
pub struct HistoryFilter {
    /// Keep only results of this game.
    pub game: Option<GameKind>,
    /// Keep only results whose contest number contains this substring.
    pub contest_query: String,
}

impl HistoryFilter {
    /// `true` when the filter keeps every record.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.game.is_none() && self.contest_query.trim().is_empty()
    }
}

/// Applies a filter to a listing, preserving order.
#[must_use]
pub fn apply_filter(results: &[DrawResult], filter: &HistoryFilter) -> Vec<DrawResult> {
    if filter.is_empty() {
        return results.to_vec();
    }
    let query = filter.contest_query.trim();
    results
        .iter()
        .filter(|result| match filter.game {
            Some(game) => result.game() == Some(game),
            None => true,
        })
        .filter(|result| query.is_empty() || result.contest.to_string().contains(query))
        .cloned()
        .collect()
}

/// Loads the recent history for every given game concurrently.
///
/// The combined listing is sorted by game code ascending, then contest
/// number descending. Every requested game appears in the output.
pub async fn load_all(api: &dyn LotteryApi, games: &[GameKind]) -> Vec<DrawResult> {
    let tasks = games.iter().map(|&game| load_game(api, game));
    let mut combined: Vec<DrawResult> = join_all(tasks).await.into_iter().flatten().collect();
    combined.sort_by(|a, b| {
        a.game_code
            .cmp(&b.game_code)
            .then_with(|| b.contest.cmp(&a.contest))
    });
    combined
}

/// Loads the latest result plus up to four preceding contests for one game.
async fn load_game(api: &dyn LotteryApi, game: GameKind) -> Vec<DrawResult> {
    let latest = match api.fetch_result(game, ContestRef::Latest).await {
        Ok(result) => result,
        Err(err) => {
            warn!(game = game.api_code(), error = %err, "latest result unavailable");
            return vec![DrawResult::placeholder(game)];
        },
    };

    let mut results = Vec::with_capacity(1 + PRECEDING_CONTESTS as usize);
    let mut contest = latest.contest;
    results.push(latest);

    for _ in 0..PRECEDING_CONTESTS {
        if contest <= 1 {
            break;
        }
        contest -= 1;
        match api.fetch_result(game, ContestRef::Number(contest)).await {
            Ok(result) => results.push(result),
            Err(err) => {
                debug!(
                    game = game.api_code(),
                    contest,
                    error = %err,
                    "skipping unavailable contest"
                );
            },
        }
    }
    results
}

/// History backed by the disk cache and the fetch seam.
pub struct HistoryService {
    api: Arc<dyn LotteryApi>,
    cache: DiskCache,
}

impl HistoryService {
    /// Creates a service over the given fetcher and cache.
    pub fn new(api: Arc<dyn LotteryApi>, cache: DiskCache) -> Self {
        Self { api, cache }
    }

    /// Returns the history listing, serving the cache while it is fresh.
    ///
    /// With `force_refresh`, or when the cache is stale or absent, all
    /// games are re-fetched and the cache rewritten.
    pub async fn load(&self, force_refresh: bool) -> Vec<DrawResult> {
        if !force_refresh {
            let now = Local::now().naive_local();
            if let Some(cached) = self.cache.load_fresh::<Vec<DrawResult>>(HISTORY_CACHE_KEY, now)
            {
                debug!(entries = cached.len(), "serving history from cache");
                return cached;
            }
        }

        let results = load_all(self.api.as_ref(), &GameKind::ALL).await;
        if let Err(err) = self.cache.store(HISTORY_CACHE_KEY, &results) {
            warn!(error = %err, "failed to cache history listing");
        }
        results
    }
}
