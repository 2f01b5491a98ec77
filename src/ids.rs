//! Identity newtypes for players and matches.
//!
//! Both identities are opaque strings: player ids are minted by the
//! transport (connection identity), match codes by the registry.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque player identity assigned by the transport layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

/// Opaque match code, unique among live matches in one registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchCode(String);

impl MatchCode {
    /// Wraps a raw code string (e.g. one typed by a joining player).
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MatchCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MatchCode {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_round_trip() {
        let id = PlayerId::new("socket-1");
        assert_eq!(id.as_str(), "socket-1");
        assert_eq!(id, PlayerId::from("socket-1"));
    }

    #[test]
    fn test_match_code_display() {
        let code = MatchCode::new("AB12CD");
        assert_eq!(code.to_string(), "AB12CD");
    }
}
