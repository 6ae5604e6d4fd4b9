//! Command implementations for the `uttt` binary

pub mod play;
pub mod simulate;

use crate::{
    game::Player,
    player::{Difficulty, GamePlayer, PlayerKind},
};

/// Parse a seat token: `human`, a difficulty label, or `depth:<n>` for an
/// explicit search depth.
pub fn parse_seat(token: &str, symbol: Player) -> Result<GamePlayer, crate::Error> {
    let lowered = token.to_lowercase();
    if lowered == "human" {
        return Ok(GamePlayer::human(format!("Player {symbol}"), symbol));
    }

    if let Some(depth_str) = lowered.strip_prefix("depth:") {
        let depth: u8 = depth_str
            .parse()
            .map_err(|_| crate::Error::ParsePlayerSpec {
                input: token.to_string(),
                reason: format!("'{depth_str}' is not a valid depth"),
            })?;
        let kind = if depth == 0 {
            PlayerKind::Random
        } else {
            PlayerKind::Minimax { depth }
        };
        return Ok(GamePlayer::with_kind(
            format!("Computer (depth {depth})"),
            symbol,
            kind,
        ));
    }

    let difficulty: Difficulty = lowered.parse()?;
    Ok(GamePlayer::ai(
        format!("Computer ({lowered})"),
        symbol,
        difficulty,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seat_tokens() {
        assert!(parse_seat("human", Player::X).unwrap().is_human());
        assert_eq!(
            parse_seat("random", Player::O).unwrap().kind(),
            PlayerKind::Random
        );
        assert!(matches!(
            parse_seat("hard", Player::X).unwrap().kind(),
            PlayerKind::Minimax { .. }
        ));
        assert_eq!(
            parse_seat("depth:3", Player::O).unwrap().kind(),
            PlayerKind::Minimax { depth: 3 }
        );
        assert_eq!(
            parse_seat("depth:0", Player::O).unwrap().kind(),
            PlayerKind::Random
        );
        assert!(parse_seat("grandmaster", Player::X).is_err());
        assert!(parse_seat("depth:lots", Player::X).is_err());
    }
}
