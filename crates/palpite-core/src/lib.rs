//! Domain library for Brazilian lottery tickets, results and estimates.
//!
//! The crate is organized around one pure core and a set of services over
//! external collaborators:
//!
//! - [`game`] — the fixed four-game configuration table and draw-count
//!   clamping.
//! - [`ticket`] — rejection-sampled ticket generation and the canonical
//!   display formatting rules.
//! - [`share`] — the fixed-form share message and its deep link.
//! - [`cache`] — the day/22:00 staleness policy and the JSON disk cache.
//! - [`api`] — wire shapes of the public lottery endpoint and the fetch
//!   seam, with a `curl`-backed default implementation.
//! - [`history`] — per-game concurrent history loading with isolated
//!   failures.
//! - [`contests`] — the next-contest overview and its presentation
//!   helpers.
//! - [`favorites`] — the durable favorite-combinations store.
//! - [`reminders`] — the contest-day reminder plan.
//!
//! Ticket generation is purely functional (entropy aside): it holds no
//! state across calls and is safe to invoke concurrently. The services
//! isolate per-game fetch failures so one broken game never empties an
//! overview.

pub mod api;
pub mod cache;
pub mod contests;
pub mod favorites;
pub mod game;
pub mod history;
pub mod reminders;
pub mod share;
pub mod ticket;

pub use api::{ApiError, ContestRef, CurlFetcher, DrawResult, LotteryApi, NextContest};
pub use cache::{is_stale, CacheError, DiskCache};
pub use contests::{NextContestInfo, NextContestsService};
pub use favorites::{FavoriteEntry, FavoritesError, FavoritesStore};
pub use game::{config_for, GameConfig, GameError, GameKind};
pub use history::{HistoryFilter, HistoryService};
pub use reminders::{Reminder, ReminderPlan};
pub use share::{share_link, share_message};
pub use ticket::{generate, generate_with, split_formatted, Ticket, TicketError};
