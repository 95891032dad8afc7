//! CLI command implementations.

pub mod favorites;
pub mod generate;
pub mod history;
pub mod next;

use anyhow::bail;
use palpite_core::game::GameKind;

/// Resolves a user-supplied game name.
///
/// Accepts the display name (`Mega-Sena`), the endpoint code (`megasena`)
/// or the result code (`MEGA_SENA`), case-insensitively; the strict
/// exact-match lookup stays in the library.
pub fn resolve_game(name: &str) -> anyhow::Result<GameKind> {
    let normalized: String = name
        .trim()
        .chars()
        .filter(|c| *c != '-' && *c != '_' && !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();
    for game in GameKind::ALL {
        let display: String = game
            .display_name()
            .chars()
            .filter(|c| *c != '-')
            .collect::<String>()
            .to_lowercase();
        if normalized == display || normalized == game.api_code() {
            return Ok(game);
        }
    }
    bail!(
        "unknown game `{name}` (expected one of: {})",
        GameKind::ALL.map(GameKind::display_name).join(", ")
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_accepts_common_spellings() {
        assert_eq!(resolve_game("Mega-Sena").unwrap(), GameKind::Megasena);
        assert_eq!(resolve_game("megasena").unwrap(), GameKind::Megasena);
        assert_eq!(resolve_game("MEGA_SENA").unwrap(), GameKind::Megasena);
        assert_eq!(resolve_game("lotofacil").unwrap(), GameKind::Lotofacil);
        assert_eq!(resolve_game("Lotofácil").unwrap(), GameKind::Lotofacil);
        assert!(resolve_game("timemania").is_err());
    }
}
