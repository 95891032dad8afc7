//! `palpite next` — upcoming contest estimates, dates and numbers.

use std::path::Path;
use std::sync::Arc;

use chrono::Local;
use clap::Args;
use palpite_core::cache::DiskCache;
use palpite_core::contests::{format_contest, format_date, format_prize, NextContestsService};
use palpite_core::reminders::ReminderPlan;
use palpite_core::CurlFetcher;

#[derive(Args)]
pub struct NextArgs {
    /// Bypass the cache and fetch fresh estimates.
    #[arg(long)]
    pub refresh: bool,

    /// Also print today's reminder plan, when a contest draws today.
    #[arg(long)]
    pub reminders: bool,
}

pub async fn run(args: &NextArgs, data_dir: &Path) -> anyhow::Result<()> {
    let service = NextContestsService::new(
        Arc::new(CurlFetcher::new()),
        DiskCache::new(data_dir.to_path_buf()),
    );
    let items = service.load(args.refresh).await;

    for item in &items {
        println!("{}", item.game.display_name());
        println!("  Estimativa: {}", format_prize(item.estimated_prize));
        println!("  Data: {}", format_date(item.contest_date.as_deref()));
        println!("  Concurso: {}", format_contest(item.contest_number));
    }

    if args.reminders {
        let today = Local::now().date_naive();
        let plan = ReminderPlan::build(&items, today);
        if plan.is_empty() {
            println!("\nNenhum concurso hoje; nenhum lembrete planejado.");
        } else {
            println!("\nLembretes de hoje:");
            for reminder in plan.reminders() {
                println!(
                    "  {} — {} — {}",
                    reminder.at.format("%H:%M"),
                    reminder.title,
                    reminder.body
                );
            }
        }
    }

    Ok(())
}
