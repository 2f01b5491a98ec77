//! The action protocol consumed by the engine.
//!
//! The transport delivers one decoded [`Action`] at a time per match,
//! together with the requester's connection identity, and broadcasts the
//! returned [`ActionOutcome`] verbatim. Failures are returned to the
//! requester only; the match is unchanged on any `Err`.

use crate::dice::DiceRoll;
use crate::error::EngineError;
use crate::ids::{MatchCode, PlayerId};
use crate::income::IncomeEvent;
use crate::registry::MatchRegistry;
use crate::snapshot::{MatchSnapshot, RollSnapshot};
use crate::turn::TurnAdvance;
use serde::{Deserialize, Serialize};

/// An inbound request from one connected player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Action {
    CreateMatch {
        name: String,
    },
    JoinMatch {
        code: MatchCode,
        name: String,
    },
    StartMatch {
        code: MatchCode,
    },
    Roll {
        code: MatchCode,
        dice: DiceRoll,
    },
    Purchase {
        code: MatchCode,
        /// Wire id of an establishment or landmark.
        card: String,
    },
    EndTurn {
        code: MatchCode,
    },
    Leave {
        code: MatchCode,
    },
}

/// The broadcastable result of a successful action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum ActionOutcome {
    MatchCreated {
        snapshot: MatchSnapshot,
    },
    PlayerJoined {
        player: PlayerId,
        snapshot: MatchSnapshot,
    },
    MatchStarted {
        snapshot: MatchSnapshot,
    },
    RollResolved {
        roll: RollSnapshot,
        income: Vec<IncomeEvent>,
        snapshot: MatchSnapshot,
    },
    CardPurchased {
        card: String,
        name: String,
        new_balance: u32,
        is_landmark: bool,
        /// True iff the purchase completed all four landmarks.
        won: bool,
        snapshot: MatchSnapshot,
    },
    TurnEnded {
        bonus_turn: bool,
        snapshot: MatchSnapshot,
    },
    PlayerLeft {
        player: PlayerId,
        /// Set when the departing player was the last one and the match
        /// was torn down; no snapshot exists in that case.
        match_closed: bool,
        snapshot: Option<MatchSnapshot>,
    },
}

/// Routes one action to its target match and applies it.
///
/// This is the engine's single entry point: validation runs against the
/// live state, mutation happens as one atomic commit inside the match,
/// and the outcome carries the post-action snapshot for broadcast.
pub fn dispatch(
    registry: &mut MatchRegistry,
    requester: &PlayerId,
    action: Action,
) -> Result<ActionOutcome, EngineError> {
    match action {
        Action::CreateMatch { name } => {
            let snapshot = registry.create(requester.clone(), name).snapshot();
            Ok(ActionOutcome::MatchCreated { snapshot })
        }
        Action::JoinMatch { code, name } => {
            let m = registry.get_mut(&code)?;
            let player = m.add_player(requester.clone(), name)?.id.clone();
            Ok(ActionOutcome::PlayerJoined {
                player,
                snapshot: m.snapshot(),
            })
        }
        Action::StartMatch { code } => {
            let m = registry.get_mut(&code)?;
            m.start(requester)?;
            Ok(ActionOutcome::MatchStarted {
                snapshot: m.snapshot(),
            })
        }
        Action::Roll { code, dice } => {
            let m = registry.get_mut(&code)?;
            let outcome = m.apply_roll(requester, dice)?;
            Ok(ActionOutcome::RollResolved {
                roll: outcome.roll,
                income: outcome.income,
                snapshot: m.snapshot(),
            })
        }
        Action::Purchase { code, card } => {
            let m = registry.get_mut(&code)?;
            let receipt = m.apply_purchase(requester, &card)?;
            Ok(ActionOutcome::CardPurchased {
                card: receipt.card_id.to_string(),
                name: receipt.name.to_string(),
                new_balance: receipt.new_balance,
                is_landmark: receipt.is_landmark,
                won: receipt.won,
                snapshot: m.snapshot(),
            })
        }
        Action::EndTurn { code } => {
            let m = registry.get_mut(&code)?;
            let advance = m.end_turn(requester)?;
            Ok(ActionOutcome::TurnEnded {
                bonus_turn: advance == TurnAdvance::BonusTurn,
                snapshot: m.snapshot(),
            })
        }
        Action::Leave { code } => {
            let m = registry.get_mut(&code)?;
            let empty = m.remove_player(requester)?;
            let snapshot = (!empty).then(|| m.snapshot());
            let match_closed = registry.remove_if_empty(&code);
            Ok(ActionOutcome::PlayerLeft {
                player: requester.clone(),
                match_closed,
                snapshot,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(registry: &mut MatchRegistry, host: &str, name: &str) -> MatchCode {
        match dispatch(
            registry,
            &PlayerId::from(host),
            Action::CreateMatch {
                name: name.to_string(),
            },
        )
        .unwrap()
        {
            ActionOutcome::MatchCreated { snapshot } => snapshot.code,
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_create_join_start() {
        let mut registry = MatchRegistry::new();
        let code = create(&mut registry, "p1", "Alice");

        let joined = dispatch(
            &mut registry,
            &PlayerId::from("p2"),
            Action::JoinMatch {
                code: code.clone(),
                name: "Bob".to_string(),
            },
        )
        .unwrap();
        assert!(matches!(joined, ActionOutcome::PlayerJoined { ref snapshot, .. }
            if snapshot.players.len() == 2));

        let started = dispatch(
            &mut registry,
            &PlayerId::from("p1"),
            Action::StartMatch { code },
        )
        .unwrap();
        assert!(matches!(started, ActionOutcome::MatchStarted { ref snapshot }
            if snapshot.started));
    }

    #[test]
    fn test_join_unknown_code_is_not_found() {
        let mut registry = MatchRegistry::new();
        let result = dispatch(
            &mut registry,
            &PlayerId::from("p2"),
            Action::JoinMatch {
                code: MatchCode::from("NOPE00"),
                name: "Bob".to_string(),
            },
        );
        assert_eq!(result.unwrap_err(), EngineError::NotFound);
    }

    #[test]
    fn test_unknown_card_errors_follow_check_order() {
        let mut registry = MatchRegistry::new();
        let code = create(&mut registry, "p1", "Alice");
        dispatch(
            &mut registry,
            &PlayerId::from("p2"),
            Action::JoinMatch {
                code: code.clone(),
                name: "Bob".to_string(),
            },
        )
        .unwrap();
        dispatch(
            &mut registry,
            &PlayerId::from("p1"),
            Action::StartMatch { code: code.clone() },
        )
        .unwrap();

        // In the roll phase an unknown id still reports the phase
        // failure, not the bad reference.
        let result = dispatch(
            &mut registry,
            &PlayerId::from("p1"),
            Action::Purchase {
                code: code.clone(),
                card: "stadium".to_string(),
            },
        );
        assert!(matches!(result, Err(EngineError::IllegalState { .. })));

        dispatch(
            &mut registry,
            &PlayerId::from("p1"),
            Action::Roll {
                code: code.clone(),
                dice: DiceRoll::one(6),
            },
        )
        .unwrap();
        let result = dispatch(
            &mut registry,
            &PlayerId::from("p1"),
            Action::Purchase {
                code,
                card: "stadium".to_string(),
            },
        );
        assert_eq!(
            result.unwrap_err(),
            EngineError::InvalidReference {
                id: "stadium".to_string()
            }
        );
    }

    #[test]
    fn test_leave_tears_down_empty_match() {
        let mut registry = MatchRegistry::new();
        let code = create(&mut registry, "p1", "Alice");
        let outcome = dispatch(
            &mut registry,
            &PlayerId::from("p1"),
            Action::Leave { code: code.clone() },
        )
        .unwrap();
        assert!(matches!(
            outcome,
            ActionOutcome::PlayerLeft {
                match_closed: true,
                snapshot: None,
                ..
            }
        ));
        assert!(registry.get(&code).is_err());
    }

    #[test]
    fn test_action_wire_format() {
        let action: Action = serde_json::from_str(
            r#"{"type":"purchase","code":"AB12CD","card":"cheese-factory"}"#,
        )
        .unwrap();
        assert_eq!(
            action,
            Action::Purchase {
                code: MatchCode::from("AB12CD"),
                card: "cheese-factory".to_string(),
            }
        );

        let roll: Action =
            serde_json::from_str(r#"{"type":"roll","code":"AB12CD","dice":{"first":3,"second":4}}"#)
                .unwrap();
        assert_eq!(
            roll,
            Action::Roll {
                code: MatchCode::from("AB12CD"),
                dice: DiceRoll::two(3, 4),
            }
        );
    }
}
