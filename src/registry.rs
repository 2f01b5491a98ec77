//! Process-scoped registry of live matches.
//!
//! The registry is the only place match codes are minted and looked up,
//! and it owns every `MatchState` (which in turn owns its players). No
//! component holds a back-reference that outlives its owner. Different
//! matches are independent; the embedding transport serializes the
//! actions of each match before they reach the engine.

use crate::error::EngineError;
use crate::ids::{MatchCode, PlayerId};
use crate::match_state::MatchState;
use rand::Rng;
use std::collections::HashMap;
use tracing::info;

/// Length of a minted match code.
const CODE_LEN: usize = 6;

/// Alphabet for minted codes: uppercase base-36.
const CODE_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// All live matches, keyed by code.
#[derive(Debug, Default)]
pub struct MatchRegistry {
    matches: HashMap<MatchCode, MatchState>,
}

impl MatchRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a match with a freshly minted code and the host as sole
    /// player, and returns a reference to it.
    pub fn create(&mut self, host_id: PlayerId, host_name: impl Into<String>) -> &MatchState {
        let code = self.mint_code(&mut rand::rng());
        self.insert(code, host_id, host_name)
    }

    /// Creates a match under a caller-supplied code; rejected when the
    /// code collides with a live match, so codes stay unique.
    pub fn create_with_code(
        &mut self,
        code: MatchCode,
        host_id: PlayerId,
        host_name: impl Into<String>,
    ) -> Result<&MatchState, EngineError> {
        if self.matches.contains_key(&code) {
            return Err(EngineError::illegal("Match code already in use"));
        }
        Ok(self.insert(code, host_id, host_name))
    }

    fn insert(
        &mut self,
        code: MatchCode,
        host_id: PlayerId,
        host_name: impl Into<String>,
    ) -> &MatchState {
        info!(code = %code, host = %host_id, "match created");
        self.matches
            .entry(code.clone())
            .or_insert_with(|| MatchState::new(code, host_id, host_name))
    }

    /// Looks up a live match.
    pub fn get(&self, code: &MatchCode) -> Result<&MatchState, EngineError> {
        self.matches.get(code).ok_or(EngineError::NotFound)
    }

    /// Looks up a live match for mutation.
    pub fn get_mut(&mut self, code: &MatchCode) -> Result<&mut MatchState, EngineError> {
        self.matches.get_mut(code).ok_or(EngineError::NotFound)
    }

    /// Tears down the match if its player list is empty. Returns whether
    /// it was removed.
    pub fn remove_if_empty(&mut self, code: &MatchCode) -> bool {
        let empty = self.matches.get(code).is_some_and(MatchState::is_empty);
        if empty {
            self.matches.remove(code);
            info!(code = %code, "match torn down");
        }
        empty
    }

    /// Number of live matches.
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Mints a code unique among currently live matches.
    fn mint_code(&self, rng: &mut impl Rng) -> MatchCode {
        loop {
            let code: String = (0..CODE_LEN)
                .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
                .collect();
            let code = MatchCode::new(code);
            if !self.matches.contains_key(&code) {
                return code;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_fetch() {
        let mut registry = MatchRegistry::new();
        let code = registry.create(PlayerId::from("p1"), "Alice").code().clone();
        assert_eq!(registry.len(), 1);
        let m = registry.get(&code).unwrap();
        assert_eq!(m.players()[0].name, "Alice");
    }

    #[test]
    fn test_minted_codes_are_well_formed() {
        let mut registry = MatchRegistry::new();
        let mut rng = rand::rng();
        for _ in 0..50 {
            let code = registry.mint_code(&mut rng);
            assert_eq!(code.as_str().len(), CODE_LEN);
            assert!(code
                .as_str()
                .bytes()
                .all(|b| CODE_ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn test_unknown_code_is_not_found() {
        let registry = MatchRegistry::new();
        assert_eq!(
            registry.get(&MatchCode::from("NOPE00")).unwrap_err(),
            EngineError::NotFound
        );
    }

    #[test]
    fn test_remove_if_empty_only_removes_empty() {
        let mut registry = MatchRegistry::new();
        let code = registry
            .create_with_code(MatchCode::from("ABC123"), PlayerId::from("p1"), "Alice")
            .unwrap()
            .code()
            .clone();
        assert!(!registry.remove_if_empty(&code));
        registry
            .get_mut(&code)
            .unwrap()
            .remove_player(&PlayerId::from("p1"))
            .unwrap();
        assert!(registry.remove_if_empty(&code));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_create_with_live_code_collision_rejected() {
        let mut registry = MatchRegistry::new();
        registry
            .create_with_code(MatchCode::from("ABC123"), PlayerId::from("p1"), "Alice")
            .unwrap();
        let result =
            registry.create_with_code(MatchCode::from("ABC123"), PlayerId::from("p2"), "Bob");
        assert!(matches!(result, Err(EngineError::IllegalState { .. })));
        // The live match is untouched by the rejected creation.
        let m = registry.get(&MatchCode::from("ABC123")).unwrap();
        assert_eq!(m.players()[0].name, "Alice");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_codes_unique_among_live_matches() {
        let mut registry = MatchRegistry::new();
        let mut codes = std::collections::HashSet::new();
        for i in 0..32 {
            let id = PlayerId::new(format!("host-{}", i));
            let code = registry.create(id, "host").code().clone();
            assert!(codes.insert(code));
        }
        assert_eq!(registry.len(), 32);
    }
}
