//! Serializable match snapshots.
//!
//! A snapshot is an immutable copy of one match's observable state, safe
//! to hand to the transport for broadcast. It is the sole transmitted
//! representation of match state; the engine owns no other wire format.

use crate::catalog::Establishment;
use crate::dice::DiceRoll;
use crate::ids::{MatchCode, PlayerId};
use crate::player::{LandmarkSet, Player};
use crate::turn::Phase;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Observable state of one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub name: String,
    pub balance: u32,
    pub establishments: BTreeMap<Establishment, u32>,
    pub landmarks: LandmarkSet,
}

impl From<&Player> for PlayerSnapshot {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id.clone(),
            name: player.name.clone(),
            balance: player.balance,
            establishments: player.establishments.clone(),
            landmarks: player.landmarks,
        }
    }
}

/// Observable state of the last roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollSnapshot {
    pub dice1: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dice2: Option<u8>,
    pub total: u8,
    pub is_double: bool,
}

impl From<DiceRoll> for RollSnapshot {
    fn from(roll: DiceRoll) -> Self {
        Self {
            dice1: roll.first,
            dice2: roll.second,
            total: roll.total(),
            is_double: roll.is_double(),
        }
    }
}

/// Observable state of one match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub code: MatchCode,
    /// Players in join order, which is also the turn order.
    pub players: Vec<PlayerSnapshot>,
    pub current_player_index: usize,
    pub turn: u32,
    pub phase: Phase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_roll: Option<RollSnapshot>,
    pub started: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_snapshot_copies_fields() {
        let player = Player::new(PlayerId::from("p1"), "Alice");
        let snap = PlayerSnapshot::from(&player);
        assert_eq!(snap.id, player.id);
        assert_eq!(snap.balance, 3);
        assert_eq!(snap.establishments, player.establishments);
    }

    #[test]
    fn test_roll_snapshot_derives_total_and_double() {
        let snap = RollSnapshot::from(DiceRoll::two(4, 4));
        assert_eq!(snap.total, 8);
        assert!(snap.is_double);
        let snap = RollSnapshot::from(DiceRoll::one(5));
        assert_eq!(snap.total, 5);
        assert!(snap.dice2.is_none());
        assert!(!snap.is_double);
    }

    #[test]
    fn test_snapshot_wire_shape() {
        let player = Player::new(PlayerId::from("p1"), "Alice");
        let json = serde_json::to_value(PlayerSnapshot::from(&player)).unwrap();
        assert_eq!(json["establishments"]["wheat-field"], 1);
        assert_eq!(json["establishments"]["bakery"], 1);
        assert_eq!(json["landmarks"]["train-station"], false);
    }
}
