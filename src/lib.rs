//! koban - rules engine for a dice-driven city-building board game.
//!
//! The crate is the single source of truth for a match: it owns the card
//! catalog, resolves dice rolls into per-player balance changes under the
//! three activation rules, validates purchases, advances turns and
//! detects wins. Transport, rendering and lobby input live outside; they
//! deliver [`Action`] values and broadcast [`ActionOutcome`] / snapshot
//! values verbatim.

pub mod action;
pub mod catalog;
pub mod dice;
pub mod error;
pub mod ids;
pub mod income;
pub mod match_state;
pub mod player;
pub mod purchase;
pub mod registry;
pub mod snapshot;
pub mod turn;

pub use action::{Action, ActionOutcome, dispatch};
pub use catalog::{
    CardRef, Category, Establishment, EstablishmentDef, Landmark, LandmarkDef, LandmarkEffect,
    Multiplier,
};
pub use dice::DiceRoll;
pub use error::EngineError;
pub use ids::{MatchCode, PlayerId};
pub use income::{IncomeEvent, IncomeOutcome, resolve_income};
pub use match_state::{MatchState, PurchaseReceipt, RollOutcome};
pub use player::{LandmarkSet, Player, STARTING_BALANCE, STARTING_ESTABLISHMENTS};
pub use purchase::{PurchaseOutcome, validate_purchase};
pub use registry::MatchRegistry;
pub use snapshot::{MatchSnapshot, PlayerSnapshot, RollSnapshot};
pub use turn::{MIN_PLAYERS, Phase, TurnAdvance};
