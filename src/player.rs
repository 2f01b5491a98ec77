//! Per-match player state.
//!
//! A player is owned by exactly one match: created on join, removed on
//! disconnect. Balances are bank-backed and never observed negative
//! between actions.

use crate::catalog::{Establishment, Landmark};
use crate::ids::PlayerId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Coins every player starts with.
pub const STARTING_BALANCE: u32 = 3;

/// Establishments granted at count 1 on join.
pub const STARTING_ESTABLISHMENTS: [Establishment; 2] =
    [Establishment::WheatField, Establishment::Bakery];

/// Ownership flags for the four landmarks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandmarkSet {
    #[serde(rename = "train-station")]
    pub train_station: bool,
    #[serde(rename = "shopping-mall")]
    pub shopping_mall: bool,
    #[serde(rename = "amusement-park")]
    pub amusement_park: bool,
    #[serde(rename = "radio-tower")]
    pub radio_tower: bool,
}

impl LandmarkSet {
    /// Returns whether the given landmark is owned.
    pub fn owns(&self, landmark: Landmark) -> bool {
        match landmark {
            Landmark::TrainStation => self.train_station,
            Landmark::ShoppingMall => self.shopping_mall,
            Landmark::AmusementPark => self.amusement_park,
            Landmark::RadioTower => self.radio_tower,
        }
    }

    /// Marks the given landmark as built.
    pub fn build(&mut self, landmark: Landmark) {
        match landmark {
            Landmark::TrainStation => self.train_station = true,
            Landmark::ShoppingMall => self.shopping_mall = true,
            Landmark::AmusementPark => self.amusement_park = true,
            Landmark::RadioTower => self.radio_tower = true,
        }
    }

    /// True iff all four landmarks are built (the win condition).
    pub fn all_built(&self) -> bool {
        Landmark::ALL.iter().all(|&l| self.owns(l))
    }
}

/// A player inside one match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Coin balance, never negative after any resolved transaction.
    pub balance: u32,
    /// Owned establishments by count, ordered for deterministic iteration.
    pub establishments: BTreeMap<Establishment, u32>,
    pub landmarks: LandmarkSet,
}

impl Player {
    /// Creates a player with the starting grants (3 coins, one Wheat
    /// Field, one Bakery, no landmarks).
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        let mut establishments = BTreeMap::new();
        for e in STARTING_ESTABLISHMENTS {
            establishments.insert(e, 1);
        }
        Self {
            id,
            name: name.into(),
            balance: STARTING_BALANCE,
            establishments,
            landmarks: LandmarkSet::default(),
        }
    }

    /// Number of copies of the given establishment this player owns.
    pub fn establishment_count(&self, establishment: Establishment) -> u32 {
        self.establishments.get(&establishment).copied().unwrap_or(0)
    }

    /// Adds one copy of the given establishment.
    pub fn grant_establishment(&mut self, establishment: Establishment) {
        *self.establishments.entry(establishment).or_insert(0) += 1;
    }

    /// Returns whether this player owns the given landmark.
    pub fn owns_landmark(&self, landmark: Landmark) -> bool {
        self.landmarks.owns(landmark)
    }

    /// True iff this player has built all four landmarks.
    pub fn has_won(&self) -> bool {
        self.landmarks.all_built()
    }
}
