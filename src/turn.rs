//! Turn phases and transitions.
//!
//! This module handles:
//! - The three-phase match cycle (waiting, rolling, buying)
//! - The buying-exit decision (bonus turn vs. next player)
//! - The start transition guard
//!
//! It is a strict finite-state machine: no concurrent phase per match, no
//! history beyond the single last roll held by the aggregate.

use serde::{Deserialize, Serialize};

/// Minimum players required to start a match.
pub const MIN_PLAYERS: usize = 2;

/// Phase of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Pre-start lobby; players may join.
    Waiting,
    /// Awaiting a roll from the current player.
    Rolling,
    /// Awaiting a purchase-or-pass from the current player.
    Buying,
}

/// How a turn ends when the current player leaves the buying phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnAdvance {
    /// Same player rolls again; index and turn counter unchanged.
    BonusTurn,
    /// Turn order advances; `wrapped` is true when the index returned to
    /// 0, which increments the turn counter.
    NextPlayer { wrapped: bool },
}

/// Returns whether a match with the given player count may start.
pub fn can_start(player_count: usize) -> bool {
    player_count >= MIN_PLAYERS
}

/// Decides the buying-exit transition.
///
/// The bonus turn requires both the bonus-turn landmark and a double on
/// the last roll; otherwise the index advances mod the player count.
pub fn buying_exit(
    owns_bonus_turn_landmark: bool,
    last_roll_was_double: bool,
    current_index: usize,
    player_count: usize,
) -> (TurnAdvance, usize) {
    if owns_bonus_turn_landmark && last_roll_was_double {
        return (TurnAdvance::BonusTurn, current_index);
    }
    let next = (current_index + 1) % player_count;
    (TurnAdvance::NextPlayer { wrapped: next == 0 }, next)
}
