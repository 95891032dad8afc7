//! `palpite generate` — draw a ticket for a game.

use std::path::Path;

use anyhow::Context;
use clap::Args;
use palpite_core::favorites::FavoritesStore;
use palpite_core::{share, ticket};

use super::resolve_game;

#[derive(Args)]
pub struct GenerateArgs {
    /// Game to play, e.g. "Mega-Sena".
    pub game: String,

    /// How many numbers to draw; clamped into the game's playable range.
    #[arg(long)]
    pub count: Option<u32>,

    /// Also print the WhatsApp share link.
    #[arg(long)]
    pub share: bool,

    /// Save the generated combination to the favorites store.
    #[arg(long)]
    pub save: bool,
}

pub fn run(args: &GenerateArgs, data_dir: &Path) -> anyhow::Result<()> {
    let game = resolve_game(&args.game)?;
    let config = game.config();
    let count = game.clamp_count(args.count.unwrap_or(config.total_numbers));

    let ticket = ticket::generate(count, config.max_number)
        .with_context(|| format!("generating {count} numbers for {}", config.name))?;

    println!("{}: {}", config.name, ticket.formatted());

    if args.share {
        println!("{}", share::share_link(config.name, &ticket));
    }

    if args.save {
        let mut store = FavoritesStore::open(data_dir);
        let added = store
            .add(config.name, ticket.tokens().to_vec())
            .context("saving favorite")?;
        if added {
            println!("Salvo nos favoritos.");
        } else {
            println!("Já estava nos favoritos.");
        }
    }

    Ok(())
}
