//! Cumulative score awarded when a match finishes.

use crate::game::types::PlayerId;

pub const WIN_POINTS: i64 = 10;
pub const DRAW_POINTS: i64 = 5;

/// New score of `player` once a match ends with `winner` (`None` = draw).
/// Losing costs nothing.
pub fn player_score(player: PlayerId, previous: i64, winner: Option<PlayerId>) -> i64 {
    match winner {
        None => previous + DRAW_POINTS,
        Some(w) if w == player => previous + WIN_POINTS,
        Some(_) => previous,
    }
}
