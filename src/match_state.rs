//! The mutable per-match aggregate.
//!
//! `MatchState` is the only component that performs mutation, and always
//! by applying a computed outcome in one step after validation has run to
//! completion: a roll or purchase either fully succeeds or leaves the
//! match provably unchanged. Callers (the registry boundary) serialize
//! actions per match; nothing here blocks or suspends.

use crate::catalog::{CardRef, Landmark};
use crate::dice::DiceRoll;
use crate::error::EngineError;
use crate::ids::{MatchCode, PlayerId};
use crate::income::{self, IncomeEvent};
use crate::player::Player;
use crate::purchase;
use crate::snapshot::{MatchSnapshot, PlayerSnapshot, RollSnapshot};
use crate::turn::{self, Phase, TurnAdvance};
use tracing::debug;

/// Result of a resolved roll, for broadcast by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollOutcome {
    pub roll: RollSnapshot,
    /// Effect log in resolution order.
    pub income: Vec<IncomeEvent>,
}

/// Result of a committed purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseReceipt {
    pub card_id: &'static str,
    pub name: &'static str,
    pub cost: u32,
    pub new_balance: u32,
    pub is_landmark: bool,
    /// True iff the purchase completed the buyer's fourth landmark.
    pub won: bool,
}

/// One live match: players, phase, turn counter and the last roll.
#[derive(Debug, Clone)]
pub struct MatchState {
    code: MatchCode,
    /// Join order, which is also the turn order.
    players: Vec<Player>,
    current_player_index: usize,
    turn: u32,
    phase: Phase,
    last_roll: Option<DiceRoll>,
    started: bool,
}

impl MatchState {
    /// Creates a match with the host as sole player, in the waiting phase.
    pub fn new(code: MatchCode, host_id: PlayerId, host_name: impl Into<String>) -> Self {
        Self {
            code,
            players: vec![Player::new(host_id, host_name)],
            current_player_index: 0,
            turn: 1,
            phase: Phase::Waiting,
            last_roll: None,
            started: false,
        }
    }

    pub fn code(&self) -> &MatchCode {
        &self.code
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// The player whose turn it is (None only when the match is empty).
    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_player_index)
    }

    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    /// Adds a player; rejected once the match has started or when the
    /// connection identity is already present.
    pub fn add_player(
        &mut self,
        id: PlayerId,
        name: impl Into<String>,
    ) -> Result<&Player, EngineError> {
        if self.started {
            return Err(EngineError::illegal("Cannot join a started match"));
        }
        if self.player(&id).is_some() {
            return Err(EngineError::illegal("Player already in match"));
        }
        let player = Player::new(id, name);
        debug!(code = %self.code, player = %player.id, "player joined");
        self.players.push(player);
        Ok(&self.players[self.players.len() - 1])
    }

    /// Removes a player. Returns true when the match is now empty and
    /// should be torn down by the registry.
    ///
    /// The current-player index is re-clamped to 0 if it falls out of
    /// range. When the departing player was the current player of a
    /// started match, the phase resets to rolling so the remaining
    /// players are not stuck in the departed player's buy phase.
    pub fn remove_player(&mut self, id: &PlayerId) -> Result<bool, EngineError> {
        let Some(index) = self.players.iter().position(|p| &p.id == id) else {
            return Err(EngineError::illegal("Player not in match"));
        };
        let was_current = index == self.current_player_index;
        self.players.remove(index);
        debug!(code = %self.code, player = %id, "player left");

        if self.players.is_empty() {
            return Ok(true);
        }
        if self.current_player_index >= self.players.len() {
            self.current_player_index = 0;
        }
        if was_current && self.started {
            self.phase = Phase::Rolling;
            self.last_roll = None;
        }
        Ok(false)
    }

    /// Starts the match. Host-only (the first player in join order),
    /// requires at least two players.
    pub fn start(&mut self, requester: &PlayerId) -> Result<(), EngineError> {
        if self.started {
            return Err(EngineError::illegal("Match already started"));
        }
        let host = self.players.first().map(|p| &p.id);
        if host != Some(requester) {
            return Err(EngineError::illegal("Only the host can start the match"));
        }
        if !turn::can_start(self.players.len()) {
            return Err(EngineError::illegal("Need at least 2 players to start"));
        }
        self.started = true;
        self.phase = Phase::Rolling;
        self.current_player_index = 0;
        self.turn = 1;
        debug!(code = %self.code, players = self.players.len(), "match started");
        Ok(())
    }

    /// Resolves a roll and commits the resulting balance changes in one
    /// step. Transitions rolling -> buying.
    pub fn apply_roll(
        &mut self,
        requester: &PlayerId,
        roll: DiceRoll,
    ) -> Result<RollOutcome, EngineError> {
        if self.phase != Phase::Rolling {
            return Err(EngineError::illegal("Not in roll phase"));
        }
        let current_index = self.require_current(requester)?;
        if !roll.faces_valid() {
            return Err(EngineError::illegal("Dice faces must be 1..=6"));
        }
        if roll.uses_two_dice() && !self.players[current_index].owns_landmark(Landmark::TrainStation)
        {
            return Err(EngineError::illegal(
                "Rolling two dice requires the Train Station",
            ));
        }

        let outcome = income::resolve_income(roll.total(), &self.players, current_index);

        // Commit point: all deltas applied together, then the transition.
        for (player, &delta) in self.players.iter_mut().zip(&outcome.deltas) {
            // The restaurant clamp guarantees no delta drives a balance
            // negative, so the cast back to u32 cannot underflow.
            player.balance = (i64::from(player.balance) + delta) as u32;
        }
        self.last_roll = Some(roll);
        self.phase = Phase::Buying;

        Ok(RollOutcome {
            roll: RollSnapshot::from(roll),
            income: outcome.events,
        })
    }

    /// Validates a purchase and commits the debit and grant in one step.
    /// The phase stays buying; ending the turn is a separate action.
    pub fn apply_purchase(
        &mut self,
        requester: &PlayerId,
        card_id: &str,
    ) -> Result<PurchaseReceipt, EngineError> {
        let current_index = self.require_current(requester)?;
        let outcome =
            purchase::validate_purchase(self.phase, &self.players[current_index], card_id)?;

        let player = &mut self.players[current_index];
        player.balance = outcome.new_balance;
        match outcome.card {
            CardRef::Establishment(e) => player.grant_establishment(e),
            CardRef::Landmark(l) => player.landmarks.build(l),
        }

        Ok(PurchaseReceipt {
            card_id: outcome.card.id(),
            name: outcome.name(),
            cost: outcome.cost,
            new_balance: outcome.new_balance,
            is_landmark: outcome.is_landmark(),
            won: player.has_won(),
        })
    }

    /// Ends the current player's turn: either a bonus turn (same player,
    /// bonus-turn landmark plus a double) or the next player in order.
    /// Transitions buying -> rolling either way and clears the last roll.
    pub fn end_turn(&mut self, requester: &PlayerId) -> Result<TurnAdvance, EngineError> {
        if self.phase != Phase::Buying {
            return Err(EngineError::illegal("Not in buy phase"));
        }
        let current_index = self.require_current(requester)?;

        let owns_bonus = self.players[current_index].owns_landmark(Landmark::AmusementPark);
        let was_double = self.last_roll.is_some_and(|r| r.is_double());
        let (advance, next_index) =
            turn::buying_exit(owns_bonus, was_double, current_index, self.players.len());

        if let TurnAdvance::NextPlayer { wrapped } = advance {
            self.current_player_index = next_index;
            if wrapped {
                self.turn += 1;
            }
        }
        self.phase = Phase::Rolling;
        self.last_roll = None;

        Ok(advance)
    }

    /// True iff the named player owns all four landmarks.
    pub fn check_win(&self, id: &PlayerId) -> bool {
        self.player(id).is_some_and(Player::has_won)
    }

    /// An immutable copy of the observable state, safe to serialize.
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            code: self.code.clone(),
            players: self.players.iter().map(PlayerSnapshot::from).collect(),
            current_player_index: self.current_player_index,
            turn: self.turn,
            phase: self.phase,
            last_roll: self.last_roll.map(RollSnapshot::from),
            started: self.started,
        }
    }

    /// Checks that the match is started and the requester is the current
    /// player; returns the current index.
    fn require_current(&self, requester: &PlayerId) -> Result<usize, EngineError> {
        if !self.started {
            return Err(EngineError::illegal("Match not started"));
        }
        match self.current_player() {
            Some(current) if &current.id == requester => Ok(self.current_player_index),
            _ => Err(EngineError::illegal("Not your turn")),
        }
    }
}
