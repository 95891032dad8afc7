//! `palpite history` — recent contest results per game.

use std::path::Path;
use std::sync::Arc;

use clap::Args;
use palpite_core::cache::DiskCache;
use palpite_core::game::GameKind;
use palpite_core::history::{apply_filter, HistoryFilter, HistoryService};
use palpite_core::ticket::SEPARATOR;
use palpite_core::CurlFetcher;

use super::resolve_game;

#[derive(Args)]
pub struct HistoryArgs {
    /// Show only this game.
    #[arg(long)]
    pub game: Option<String>,

    /// Show only contests whose number contains this text.
    #[arg(long, value_name = "QUERY")]
    pub contest: Option<String>,

    /// Bypass the cache and fetch fresh results.
    #[arg(long)]
    pub refresh: bool,
}

pub async fn run(args: &HistoryArgs, data_dir: &Path) -> anyhow::Result<()> {
    let filter = HistoryFilter {
        game: args.game.as_deref().map(resolve_game).transpose()?,
        contest_query: args.contest.clone().unwrap_or_default(),
    };

    let service = HistoryService::new(
        Arc::new(CurlFetcher::new()),
        DiskCache::new(data_dir.to_path_buf()),
    );
    let results = service.load(args.refresh).await;
    let filtered = apply_filter(&results, &filter);

    if filtered.is_empty() {
        println!("Nenhum resultado encontrado.");
        return Ok(());
    }

    for result in &filtered {
        let name = result
            .game()
            .map_or_else(|| result.game_code.clone(), |g| g.display_name().to_string());
        let rollover = if result.rolled_over { "Sim" } else { "Não" };
        match &result.drawn_numbers {
            Some(numbers) if !numbers.is_empty() => {
                println!(
                    "{name}  Concurso: {}  {}  Acumulou: {rollover}",
                    result.contest,
                    numbers.join(SEPARATOR)
                );
            },
            _ => {
                println!(
                    "{name}  Concurso: {}  Sem dezenas disponíveis",
                    result.contest
                );
            },
        }
    }

    Ok(())
}
