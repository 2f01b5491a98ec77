//! Engine error taxonomy.
//!
//! Every failure is surfaced to the requesting party only and implies that
//! no match state was mutated: validation always runs to completion against
//! a snapshot before any write.

use serde::Serialize;

/// Errors returned by match actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "error", rename_all = "kebab-case")]
pub enum EngineError {
    /// The referenced match code does not exist in the registry.
    NotFound,
    /// The action is not legal in the current phase/turn.
    IllegalState { message: String },
    /// The referenced establishment/landmark id is unknown.
    InvalidReference { id: String },
    /// Purchase cost exceeds the acting player's balance.
    InsufficientFunds { cost: u32, balance: u32 },
    /// The landmark is already owned by the requester.
    AlreadyOwned,
}

impl EngineError {
    /// Shorthand for an `IllegalState` with a formatted message.
    pub fn illegal(message: impl Into<String>) -> Self {
        EngineError::IllegalState {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::NotFound => write!(f, "Match not found"),
            EngineError::IllegalState { message } => write!(f, "Illegal state: {}", message),
            EngineError::InvalidReference { id } => write!(f, "Unknown card id: {}", id),
            EngineError::InsufficientFunds { cost, balance } => {
                write!(f, "Insufficient funds: cost {} exceeds balance {}", cost, balance)
            }
            EngineError::AlreadyOwned => write!(f, "Landmark already owned"),
        }
    }
}

impl std::error::Error for EngineError {}
