//! Dice roll values and validation.
//!
//! The engine takes dice values as input (the transport may let clients
//! roll, or use [`DiceRoll::random`] server-side) and re-validates them:
//! faces must be 1..=6, and a second die requires the Train Station
//! landmark.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A resolved dice roll: one or two dice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll {
    pub first: u8,
    pub second: Option<u8>,
}

impl DiceRoll {
    pub fn one(first: u8) -> Self {
        Self { first, second: None }
    }

    pub fn two(first: u8, second: u8) -> Self {
        Self {
            first,
            second: Some(second),
        }
    }

    /// Rolls one or two dice with the given RNG.
    pub fn random(rng: &mut impl Rng, two_dice: bool) -> Self {
        let first = rng.random_range(1..=6);
        let second = two_dice.then(|| rng.random_range(1..=6));
        Self { first, second }
    }

    /// Sum of the dice, in 1..=12 for a valid roll.
    pub fn total(&self) -> u8 {
        self.first + self.second.unwrap_or(0)
    }

    /// True iff two dice were rolled and both show the same face.
    pub fn is_double(&self) -> bool {
        self.second == Some(self.first)
    }

    /// Returns whether every die shows a face in 1..=6.
    pub fn faces_valid(&self) -> bool {
        let face_ok = |d: u8| (1..=6).contains(&d);
        face_ok(self.first) && self.second.is_none_or(face_ok)
    }

    /// Returns whether a second die was used.
    pub fn uses_two_dice(&self) -> bool {
        self.second.is_some()
    }
}
