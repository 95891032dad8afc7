//! Contest-day reminder plan.
//!
//! When at least one game draws today, three fixed reminders are planned
//! for 12:00, 16:00 and 19:00 local time. The afternoon reminder carries
//! the range of today's announced prize estimates when any are available.
//! The library only computes the plan; delivering it (and asking the user
//! for permission to do so) is the caller's concern — a denied
//! authorization simply means the plan goes unapplied.

use chrono::{NaiveDate, NaiveDateTime};

use crate::contests::{format_prize, NextContestInfo};

/// Identifier prefix shared by all planned reminders, so previously
/// applied reminders can be cleared as a group.
pub const REMINDER_ID_PREFIX: &str = "contest-reminder-";

/// One planned reminder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    /// Stable identifier, e.g. `contest-reminder-12`.
    pub id: String,
    /// Local time the reminder should fire.
    pub at: NaiveDateTime,
    /// Reminder title.
    pub title: String,
    /// Reminder body.
    pub body: String,
}

/// The set of reminders to apply for one day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderPlan {
    reminders: Vec<Reminder>,
}

impl ReminderPlan {
    /// Builds the plan for `today` from a next-contest overview.
    ///
    /// Rows whose contest date is absent, malformed, or on another day are
    /// ignored. When no row draws today the plan is empty.
    #[must_use]
    pub fn build(items: &[NextContestInfo], today: NaiveDate) -> Self {
        let todays: Vec<&NextContestInfo> = items
            .iter()
            .filter(|item| item.parsed_date() == Some(today))
            .collect();
        if todays.is_empty() {
            return Self::default();
        }

        let estimates: Vec<f64> = todays
            .iter()
            .filter_map(|item| item.estimated_prize)
            .filter(|value| value.is_finite())
            .collect();
        let min = estimates.iter().copied().reduce(f64::min);
        let max = estimates.iter().copied().reduce(f64::max);

        let afternoon_body = match (min, max) {
            (Some(min), Some(max)) => format!(
                "Os prêmios hoje estão entre {} e {} de reais.",
                format_prize(Some(min)),
                format_prize(Some(max))
            ),
            _ => "Os prêmios de hoje estão disponíveis. Boa sorte!".to_string(),
        };

        let closing_body = "As apostas se encerram às 20h.".to_string();
        let reminders = vec![
            Reminder {
                id: format!("{REMINDER_ID_PREFIX}12"),
                at: at_hour(today, 12),
                title: "Já fez sua fezinha hoje?".to_string(),
                body: closing_body.clone(),
            },
            Reminder {
                id: format!("{REMINDER_ID_PREFIX}16"),
                at: at_hour(today, 16),
                title: "Vai quê, né?".to_string(),
                body: afternoon_body,
            },
            Reminder {
                id: format!("{REMINDER_ID_PREFIX}19"),
                at: at_hour(today, 19),
                title: "Já fez sua fezinha hoje?".to_string(),
                body: closing_body,
            },
        ];
        Self { reminders }
    }

    /// The planned reminders in firing order.
    #[must_use]
    pub fn reminders(&self) -> &[Reminder] {
        &self.reminders
    }

    /// `true` when no contest draws today.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reminders.is_empty()
    }
}

fn at_hour(date: NaiveDate, hour: u32) -> NaiveDateTime {
    // Hours are fixed in-range constants; and_hms_opt cannot fail here.
    date.and_hms_opt(hour, 0, 0).unwrap_or_else(|| {
        unreachable!("fixed reminder hour {hour} is always valid")
    })
}
