//! Income resolution for a dice roll.
//!
//! Pure computation: given the roll total and the ordered player list, it
//! produces per-player balance deltas plus an ordered effect log. The
//! caller commits the deltas in one atomic step; nothing here mutates.
//!
//! Resolution order is a user-facing contract:
//! 1. primary-resource, every player in turn order, paid by the bank
//! 2. service, current player only, paid by the bank
//! 3. restaurant, every other player in turn order, transferred from the
//!    current player and clamped to the current player's running balance

use crate::catalog::Category;
use crate::ids::PlayerId;
use crate::player::Player;
use serde::{Deserialize, Serialize};

/// One entry of the income effect log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeEvent {
    pub category: Category,
    /// The player receiving the income.
    pub player: PlayerId,
    /// For restaurant transfers, the paying (current) player.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<PlayerId>,
    pub card: String,
    pub amount: u32,
}

/// The computed result of resolving one roll.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncomeOutcome {
    /// Signed balance deltas, indexed like the player list passed in.
    pub deltas: Vec<i64>,
    /// Effect log in resolution order.
    pub events: Vec<IncomeEvent>,
}

/// Resolves a roll total against the ordered player list.
///
/// `current_index` must be a valid index into `players`; the aggregate
/// that owns the list guarantees it.
pub fn resolve_income(
    roll_total: u8,
    players: &[Player],
    current_index: usize,
) -> IncomeOutcome {
    let mut outcome = IncomeOutcome {
        deltas: vec![0; players.len()],
        events: Vec::new(),
    };

    resolve_primary_resource(roll_total, players, &mut outcome);
    resolve_service(roll_total, players, current_index, &mut outcome);
    resolve_restaurant(roll_total, players, current_index, &mut outcome);

    outcome
}

/// Pass 1: primary-resource establishments pay every owner from the bank.
fn resolve_primary_resource(roll_total: u8, players: &[Player], outcome: &mut IncomeOutcome) {
    for (index, player) in players.iter().enumerate() {
        for (&establishment, &count) in &player.establishments {
            let def = establishment.definition();
            if def.category != Category::PrimaryResource
                || !def.activation.contains(&roll_total)
            {
                continue;
            }
            let amount = def.income * count;
            outcome.deltas[index] += i64::from(amount);
            outcome.events.push(IncomeEvent {
                category: Category::PrimaryResource,
                player: player.id.clone(),
                target: None,
                card: def.name.to_string(),
                amount,
            });
        }
    }
}

/// Pass 2: service establishments pay the current player from the bank.
///
/// The two multiplier establishments earn per copy of their referenced
/// card instead of their base income; the override replaces the base
/// calculation entirely.
fn resolve_service(
    roll_total: u8,
    players: &[Player],
    current_index: usize,
    outcome: &mut IncomeOutcome,
) {
    let current = &players[current_index];
    for (&establishment, &count) in &current.establishments {
        let def = establishment.definition();
        if def.category != Category::Service || !def.activation.contains(&roll_total) {
            continue;
        }
        let amount = match def.multiplier {
            Some(m) => m.per_count * current.establishment_count(m.counted),
            None => def.income * count,
        };
        outcome.deltas[current_index] += i64::from(amount);
        outcome.events.push(IncomeEvent {
            category: Category::Service,
            player: current.id.clone(),
            target: None,
            card: def.name.to_string(),
            amount,
        });
    }
}

/// Pass 3: restaurant establishments transfer from the current player to
/// each other owner, clamped so the current player's running balance never
/// goes negative. A transfer clamped to zero produces no log entry.
fn resolve_restaurant(
    roll_total: u8,
    players: &[Player],
    current_index: usize,
    outcome: &mut IncomeOutcome,
) {
    let current_id = players[current_index].id.clone();
    let current_start = i64::from(players[current_index].balance);

    for (index, player) in players.iter().enumerate() {
        if index == current_index {
            continue;
        }
        for (&establishment, &count) in &player.establishments {
            let def = establishment.definition();
            if def.category != Category::Restaurant || !def.activation.contains(&roll_total) {
                continue;
            }
            let requested = i64::from(def.income * count);
            let running = current_start + outcome.deltas[current_index];
            let transferred = requested.min(running).max(0);
            if transferred == 0 {
                continue;
            }
            outcome.deltas[current_index] -= transferred;
            outcome.deltas[index] += transferred;
            outcome.events.push(IncomeEvent {
                category: Category::Restaurant,
                player: player.id.clone(),
                target: Some(current_id.clone()),
                card: def.name.to_string(),
                amount: transferred as u32,
            });
        }
    }
}
