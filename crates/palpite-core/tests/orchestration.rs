//! End-to-end orchestration tests over a deterministic mock fetcher.
//!
//! The mock simulates the remote endpoint per game: scripted results,
//! scripted failures, and call counting. This exercises the per-game
//! failure isolation and the cache-or-fetch flow without any network.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use palpite_core::api::{ApiError, BoxFuture, ContestRef, DrawResult, LotteryApi, NextContest};
use palpite_core::cache::DiskCache;
use palpite_core::contests::{self, NextContestInfo, NextContestsService};
use palpite_core::game::GameKind;
use palpite_core::history::{self, HistoryService};

// =============================================================================
// MockApi
// =============================================================================

/// Scripted fetcher: per-game latest results, per-contest results, and
/// games that always fail.
#[derive(Default)]
struct MockApi {
    latest: HashMap<&'static str, DrawResult>,
    next: HashMap<&'static str, NextContest>,
    failing: Vec<GameKind>,
    calls: AtomicUsize,
}

impl MockApi {
    fn new() -> Self {
        Self::default()
    }

    fn with_latest(mut self, game: GameKind, contest: u32) -> Self {
        self.latest.insert(
            game.api_code(),
            DrawResult {
                game_code: game.result_code().to_string(),
                contest,
                drawn_numbers: Some(vec!["01".to_string(), "02".to_string()]),
                rolled_over: false,
            },
        );
        self
    }

    fn with_next(mut self, game: GameKind, prize: f64, date: &str) -> Self {
        self.next.insert(
            game.api_code(),
            NextContest {
                estimated_prize: Some(prize),
                contest_number: Some(999),
                contest_date: Some(date.to_string()),
            },
        );
        self
    }

    fn failing_for(mut self, game: GameKind) -> Self {
        self.failing.push(game);
        self
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fails(&self, game: GameKind) -> bool {
        self.failing.contains(&game)
    }
}

fn unavailable(game: GameKind) -> ApiError {
    ApiError::Http {
        url: format!("mock://{}", game.api_code()),
        detail: "scripted failure".to_string(),
    }
}

impl LotteryApi for MockApi {
    fn fetch_result(
        &self,
        game: GameKind,
        contest: ContestRef,
    ) -> BoxFuture<'_, Result<DrawResult, ApiError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move {
            if self.fails(game) {
                return Err(unavailable(game));
            }
            let latest = self
                .latest
                .get(game.api_code())
                .cloned()
                .ok_or_else(|| unavailable(game))?;
            match contest {
                ContestRef::Latest => Ok(latest),
                ContestRef::Number(number) if number >= 1 && number <= latest.contest => {
                    Ok(DrawResult {
                        contest: number,
                        ..latest
                    })
                },
                ContestRef::Number(_) => Err(unavailable(game)),
            }
        })
    }

    fn fetch_next(&self, game: GameKind) -> BoxFuture<'_, Result<NextContest, ApiError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move {
            if self.fails(game) {
                return Err(unavailable(game));
            }
            self.next
                .get(game.api_code())
                .cloned()
                .ok_or_else(|| unavailable(game))
        })
    }
}

fn fully_scripted() -> MockApi {
    MockApi::new()
        .with_latest(GameKind::Megasena, 2790)
        .with_latest(GameKind::Quina, 6500)
        .with_latest(GameKind::Lotomania, 2700)
        .with_latest(GameKind::Lotofacil, 3150)
}

// =============================================================================
// History fan-out
// =============================================================================

#[tokio::test]
async fn history_collects_five_contests_per_game() {
    let api = fully_scripted();
    let results = history::load_all(&api, &GameKind::ALL).await;

    // Latest plus four preceding contests for each of the four games.
    assert_eq!(results.len(), 20);
    for game in GameKind::ALL {
        let contests: Vec<u32> = results
            .iter()
            .filter(|r| r.game() == Some(game))
            .map(|r| r.contest)
            .collect();
        assert_eq!(contests.len(), 5);
        // Within a game, contests are descending from the latest.
        for window in contests.windows(2) {
            assert!(window[0] > window[1]);
        }
    }
}

#[tokio::test]
async fn history_is_sorted_by_game_code_then_contest_descending() {
    let api = fully_scripted();
    let results = history::load_all(&api, &GameKind::ALL).await;

    let codes: Vec<&str> = results.iter().map(|r| r.game_code.as_str()).collect();
    let mut sorted = codes.clone();
    sorted.sort_unstable();
    assert_eq!(codes, sorted);
}

#[tokio::test]
async fn one_failing_game_degrades_to_a_placeholder() {
    let api = fully_scripted().failing_for(GameKind::Quina);
    let results = history::load_all(&api, &GameKind::ALL).await;

    // Quina is represented by exactly its placeholder record.
    let quina: Vec<&DrawResult> = results
        .iter()
        .filter(|r| r.game() == Some(GameKind::Quina))
        .collect();
    assert_eq!(quina.len(), 1);
    assert_eq!(*quina[0], DrawResult::placeholder(GameKind::Quina));

    // The other three games still deliver their full history.
    assert_eq!(results.len(), 16);
}

#[tokio::test]
async fn short_histories_stop_at_contest_one() {
    let api = MockApi::new().with_latest(GameKind::Megasena, 2);
    let results = history::load_all(&api, &[GameKind::Megasena]).await;

    let contests: Vec<u32> = results.iter().map(|r| r.contest).collect();
    assert_eq!(contests, [2, 1]);
}

// =============================================================================
// Next-contest fan-out
// =============================================================================

#[tokio::test]
async fn next_contest_overview_keeps_canonical_order_with_failures() {
    let api = MockApi::new()
        .with_next(GameKind::Megasena, 61_500_000.0, "28/09/2024")
        .with_next(GameKind::Lotomania, 2_500_000.0, "28/09/2024")
        .with_next(GameKind::Lotofacil, 1_700_000.0, "28/09/2024")
        .failing_for(GameKind::Quina);
    let items = contests::load_all(&api).await;

    let order: Vec<GameKind> = items.iter().map(|item| item.game).collect();
    assert_eq!(order, GameKind::ALL);

    // The failing game is a placeholder row, not a missing row.
    assert_eq!(items[1], NextContestInfo::placeholder(GameKind::Quina));
    assert_eq!(items[0].estimated_prize, Some(61_500_000.0));
}

// =============================================================================
// Cache-or-fetch flow
// =============================================================================

#[tokio::test]
async fn history_service_serves_the_cache_while_fresh() {
    let dir = tempfile::tempdir().unwrap();
    let api = Arc::new(fully_scripted());
    let service = HistoryService::new(api.clone(), DiskCache::new(dir.path()));

    let first = service.load(false).await;
    let calls_after_first = api.call_count();
    assert_eq!(first.len(), 20);
    assert!(calls_after_first >= 20);

    // A second load inside the freshness window must not fetch again.
    let second = service.load(false).await;
    assert_eq!(second, first);
    assert_eq!(api.call_count(), calls_after_first);

    // A forced refresh always fetches.
    let third = service.load(true).await;
    assert_eq!(third, first);
    assert!(api.call_count() > calls_after_first);
}

#[tokio::test]
async fn next_contests_service_serves_the_cache_while_fresh() {
    let dir = tempfile::tempdir().unwrap();
    let api = Arc::new(
        MockApi::new()
            .with_next(GameKind::Megasena, 1_000_000.0, "28/09/2024")
            .with_next(GameKind::Quina, 700_000.0, "28/09/2024")
            .with_next(GameKind::Lotomania, 2_500_000.0, "28/09/2024")
            .with_next(GameKind::Lotofacil, 1_700_000.0, "28/09/2024"),
    );
    let service = NextContestsService::new(api.clone(), DiskCache::new(dir.path()));

    let first = service.load(false).await;
    assert_eq!(first.len(), 4);
    let calls_after_first = api.call_count();

    let second = service.load(false).await;
    assert_eq!(second, first);
    assert_eq!(api.call_count(), calls_after_first);
}
