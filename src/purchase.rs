//! Purchase validation.
//!
//! Pure computation: validates a purchase against a read-only view of the
//! acting player and returns the delta to apply. The caller commits the
//! delta atomically; on any failure nothing is mutated.

use crate::catalog::CardRef;
use crate::error::EngineError;
use crate::player::Player;
use crate::turn::Phase;

/// The validated delta and receipt of a successful purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurchaseOutcome {
    pub card: CardRef,
    pub cost: u32,
    /// The acting player's balance after the debit.
    pub new_balance: u32,
}

impl PurchaseOutcome {
    pub fn name(&self) -> &'static str {
        self.card.name()
    }

    pub fn is_landmark(&self) -> bool {
        matches!(self.card, CardRef::Landmark(_))
    }
}

/// Validates a purchase, in order: phase must be buying, the id must
/// resolve against the catalog, the player must afford the cost, and a
/// landmark must not already be owned. The returned error names the
/// first check that failed.
pub fn validate_purchase(
    phase: Phase,
    player: &Player,
    card_id: &str,
) -> Result<PurchaseOutcome, EngineError> {
    if phase != Phase::Buying {
        return Err(EngineError::illegal("Not in buy phase"));
    }

    let card = CardRef::from_id(card_id).ok_or_else(|| EngineError::InvalidReference {
        id: card_id.to_string(),
    })?;

    let cost = card.cost();
    if player.balance < cost {
        return Err(EngineError::InsufficientFunds {
            cost,
            balance: player.balance,
        });
    }

    if let CardRef::Landmark(landmark) = card
        && player.owns_landmark(landmark)
    {
        return Err(EngineError::AlreadyOwned);
    }

    Ok(PurchaseOutcome {
        card,
        cost,
        new_balance: player.balance - cost,
    })
}
