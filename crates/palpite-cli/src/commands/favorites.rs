//! `palpite favorites` — manage saved favorite combinations.

use std::path::Path;

use anyhow::Context;
use clap::{Args, Subcommand};
use palpite_core::favorites::FavoritesStore;
use palpite_core::ticket::split_formatted;

use super::resolve_game;

#[derive(Args)]
pub struct FavoritesArgs {
    #[command(subcommand)]
    pub action: FavoritesAction,
}

#[derive(Subcommand)]
pub enum FavoritesAction {
    /// Save a combination, e.g. `add Mega-Sena "03 🍀 11 🍀 22"`.
    Add {
        /// Game the combination belongs to.
        game: String,
        /// The numbers, separated by spaces or clovers.
        numbers: String,
    },
    /// Remove a previously saved combination.
    Remove {
        /// Game the combination belongs to.
        game: String,
        /// The numbers, separated by spaces or clovers.
        numbers: String,
    },
    /// List saved combinations.
    List,
}

pub fn run(args: &FavoritesArgs, data_dir: &Path) -> anyhow::Result<()> {
    let mut store = FavoritesStore::open(data_dir);

    match &args.action {
        FavoritesAction::Add { game, numbers } => {
            let game = resolve_game(game)?;
            let tokens = parse_numbers(numbers);
            let added = store
                .add(game.display_name(), tokens)
                .context("saving favorite")?;
            if added {
                println!("Salvo nos favoritos.");
            } else {
                println!("Já estava nos favoritos.");
            }
        },
        FavoritesAction::Remove { game, numbers } => {
            let game = resolve_game(game)?;
            let tokens = parse_numbers(numbers);
            let removed = store
                .remove(game.display_name(), &tokens)
                .context("removing favorite")?;
            if removed {
                println!("Removido dos favoritos.");
            } else {
                println!("Não estava nos favoritos.");
            }
        },
        FavoritesAction::List => {
            if store.entries().is_empty() {
                println!("Nenhum favorito salvo.");
            }
            for entry in store.entries() {
                println!(
                    "{}  {}  (salvo em {})",
                    entry.game_type,
                    entry.display_string(),
                    entry.saved_at.format("%d/%m/%Y %H:%M")
                );
            }
        },
    }

    Ok(())
}

/// Accepts either the clover-joined display string or plain
/// whitespace-separated tokens.
fn parse_numbers(raw: &str) -> Vec<String> {
    let via_separator = split_formatted(raw);
    if via_separator.len() > 1 {
        return via_separator;
    }
    raw.split_whitespace().map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_clover_joined_and_plain_tokens() {
        assert_eq!(parse_numbers("03 🍀 11 🍀 22"), ["03", "11", "22"]);
        assert_eq!(parse_numbers("03 11 22"), ["03", "11", "22"]);
        assert_eq!(parse_numbers("07"), ["07"]);
    }
}
