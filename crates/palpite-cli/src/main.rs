//! Command line interface for the palpite lottery toolkit.
//!
//! Subcommands mirror the library services: generate tickets, browse the
//! contest history, show next-contest estimates (with an optional reminder
//! plan), and manage saved favorites. Cached data and favorites live under
//! the data directory (`--data-dir`, default `~/.palpite`).

mod commands;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "palpite",
    version,
    about = "Tickets, results and estimates for the Brazilian lotteries"
)]
struct Cli {
    /// Directory for cached listings and saved favorites.
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a random ticket for a game.
    Generate(commands::generate::GenerateArgs),
    /// Show recent contest results.
    History(commands::history::HistoryArgs),
    /// Show next-contest estimates.
    Next(commands::next::NextArgs),
    /// Manage saved favorite combinations.
    Favorites(commands::favorites::FavoritesArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => default_data_dir().context("cannot determine a data directory; pass --data-dir")?,
    };

    match cli.command {
        Command::Generate(args) => commands::generate::run(&args, &data_dir),
        Command::History(args) => commands::history::run(&args, &data_dir).await,
        Command::Next(args) => commands::next::run(&args, &data_dir).await,
        Command::Favorites(args) => commands::favorites::run(&args, &data_dir),
    }
}

fn default_data_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".palpite"))
}
