//! Next-contest overview: estimates, dates and contest numbers per game.
//!
//! All four games are fetched concurrently; a failed fetch degrades that
//! game to a placeholder row with every informational field absent, so the
//! overview always lists every game in canonical order. Cached on disk
//! under the same staleness policy as the history listing.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::api::{LotteryApi, NextContest};
use crate::cache::DiskCache;
use crate::game::GameKind;

/// Cache key for the next-contest overview.
pub const NEXT_CONTESTS_CACHE_KEY: &str = "next_contests_items";

/// Wire format of upcoming contest dates.
pub const CONTEST_DATE_FORMAT: &str = "%d/%m/%Y";

/// Text shown for any absent informational field.
pub const UNAVAILABLE: &str = "Indisponível";

/// Upcoming-contest information for one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextContestInfo {
    /// The game this row belongs to.
    pub game: GameKind,
    /// Estimated prize in BRL, when announced.
    pub estimated_prize: Option<f64>,
    /// Upcoming contest number, when announced.
    pub contest_number: Option<u32>,
    /// Upcoming contest date in `dd/MM/yyyy`, when announced.
    pub contest_date: Option<String>,
}

impl NextContestInfo {
    /// Builds a row from a fetched estimate.
    #[must_use]
    pub fn from_remote(game: GameKind, remote: NextContest) -> Self {
        Self {
            game,
            estimated_prize: remote.estimated_prize,
            contest_number: remote.contest_number,
            contest_date: remote.contest_date,
        }
    }

    /// Placeholder row for a game whose fetch failed.
    #[must_use]
    pub fn placeholder(game: GameKind) -> Self {
        Self {
            game,
            estimated_prize: None,
            contest_number: None,
            contest_date: None,
        }
    }

    /// The contest date parsed from its wire format, when present and valid.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        self.contest_date
            .as_deref()
            .and_then(|raw| NaiveDate::parse_from_str(raw, CONTEST_DATE_FORMAT).ok())
    }
}

/// Fetches the overview for all games concurrently, in canonical order.
///
/// Per-game failures degrade to placeholder rows; the returned vector
/// always holds one row per game in [`GameKind::ALL`] order.
pub async fn load_all(api: &dyn LotteryApi) -> Vec<NextContestInfo> {
    let tasks = GameKind::ALL.map(|game| async move {
        match api.fetch_next(game).await {
            Ok(remote) => NextContestInfo::from_remote(game, remote),
            Err(err) => {
                warn!(game = game.api_code(), error = %err, "next-contest estimate unavailable");
                NextContestInfo::placeholder(game)
            },
        }
    });
    join_all(tasks).await
}

/// Next-contest overview backed by the disk cache and the fetch seam.
pub struct NextContestsService {
    api: Arc<dyn LotteryApi>,
    cache: DiskCache,
}

impl NextContestsService {
    /// Creates a service over the given fetcher and cache.
    pub fn new(api: Arc<dyn LotteryApi>, cache: DiskCache) -> Self {
        Self { api, cache }
    }

    /// Returns the overview, serving the cache while it is fresh.
    pub async fn load(&self, force_refresh: bool) -> Vec<NextContestInfo> {
        if !force_refresh {
            let now = Local::now().naive_local();
            if let Some(cached) = self
                .cache
                .load_fresh::<Vec<NextContestInfo>>(NEXT_CONTESTS_CACHE_KEY, now)
            {
                debug!(entries = cached.len(), "serving next contests from cache");
                return cached;
            }
        }

        let items = load_all(self.api.as_ref()).await;
        if let Err(err) = self.cache.store(NEXT_CONTESTS_CACHE_KEY, &items) {
            warn!(error = %err, "failed to cache next-contest overview");
        }
        items
    }
}

// =============================================================================
// Presentation helpers
// =============================================================================

/// Renders a prize estimate as pt-BR currency, e.g. `R$ 61.500.000,00`.
#[must_use]
pub fn format_prize(value: Option<f64>) -> String {
    match value {
        Some(value) if value.is_finite() && value >= 0.0 => {
            let cents = (value * 100.0).round() as u64;
            let whole = cents / 100;
            let fraction = cents % 100;
            format!("R$ {},{fraction:02}", group_thousands(whole))
        },
        _ => UNAVAILABLE.to_string(),
    }
}

/// Renders a contest date, validating the `dd/MM/yyyy` wire format.
#[must_use]
pub fn format_date(raw: Option<&str>) -> String {
    raw.and_then(|raw| NaiveDate::parse_from_str(raw, CONTEST_DATE_FORMAT).ok())
        .map_or_else(
            || UNAVAILABLE.to_string(),
            |date| date.format(CONTEST_DATE_FORMAT).to_string(),
        )
}

/// Renders a contest number.
#[must_use]
pub fn format_contest(number: Option<u32>) -> String {
    number.map_or_else(|| UNAVAILABLE.to_string(), |number| number.to_string())
}

/// Groups a whole number with `.` thousands separators, pt-BR style.
fn group_thousands(mut value: u64) -> String {
    let mut groups = Vec::new();
    loop {
        let group = value % 1000;
        value /= 1000;
        if value == 0 {
            groups.push(group.to_string());
            break;
        }
        groups.push(format!("{group:03}"));
    }
    groups.reverse();
    groups.join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Rows
    // =========================================================================

    #[test]
    fn placeholder_rows_have_no_information() {
        let row = NextContestInfo::placeholder(GameKind::Lotomania);
        assert_eq!(row.game, GameKind::Lotomania);
        assert!(row.estimated_prize.is_none());
        assert!(row.contest_number.is_none());
        assert!(row.contest_date.is_none());
        assert!(row.parsed_date().is_none());
    }

    #[test]
    fn parsed_date_rejects_malformed_strings() {
        let mut row = NextContestInfo::placeholder(GameKind::Megasena);
        row.contest_date = Some("2024-09-28".to_string());
        assert!(row.parsed_date().is_none());
        row.contest_date = Some("28/09/2024".to_string());
        assert_eq!(
            row.parsed_date(),
            NaiveDate::from_ymd_opt(2024, 9, 28)
        );
    }

    // =========================================================================
    // Presentation
    // =========================================================================

    #[test]
    fn prizes_render_as_pt_br_currency() {
        assert_eq!(format_prize(Some(61_500_000.0)), "R$ 61.500.000,00");
        assert_eq!(format_prize(Some(1_234.56)), "R$ 1.234,56");
        assert_eq!(format_prize(Some(0.5)), "R$ 0,50");
        assert_eq!(format_prize(Some(999.0)), "R$ 999,00");
    }

    #[test]
    fn absent_or_degenerate_prizes_are_unavailable() {
        assert_eq!(format_prize(None), UNAVAILABLE);
        assert_eq!(format_prize(Some(f64::NAN)), UNAVAILABLE);
        assert_eq!(format_prize(Some(-1.0)), UNAVAILABLE);
    }

    #[test]
    fn dates_are_validated_before_rendering() {
        assert_eq!(format_date(Some("28/09/2024")), "28/09/2024");
        assert_eq!(format_date(Some("31/02/2024")), UNAVAILABLE);
        assert_eq!(format_date(Some("soon")), UNAVAILABLE);
        assert_eq!(format_date(None), UNAVAILABLE);
    }

    #[test]
    fn contest_numbers_render_plainly() {
        assert_eq!(format_contest(Some(2791)), "2791");
        assert_eq!(format_contest(None), UNAVAILABLE);
    }
}
