//! Serialized snapshots of a round, for persistence sinks.

use thiserror::Error;

use super::{
    invariants::{check_invariants, InvariantViolation},
    state::GameState,
};

/// Why a snapshot could not be turned back into a `GameState`.
#[derive(Debug, Error)]
pub enum RestoreError {
    #[error("snapshot is not a valid game state")]
    Malformed(#[from] serde_json::Error),
    #[error("snapshot breaks {} invariant(s), first: {}", .0.len(), .0[0])]
    Inconsistent(Vec<InvariantViolation>),
}

/// Serialize the state as JSON.
pub fn capture(state: &GameState) -> Result<String, serde_json::Error> {
    serde_json::to_string(state)
}

/// Parse and validate a snapshot. The restored state must satisfy the same
/// invariants as one built by the engine.
pub fn restore(snapshot: &str) -> Result<GameState, RestoreError> {
    let state = serde_json::from_str::<GameState>(snapshot)?;
    let violations = check_invariants(&state);
    if !violations.is_empty() {
        return Err(RestoreError::Inconsistent(violations));
    }
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::{capture, restore, RestoreError};
    use crate::game::{
        config::EconomyConfig,
        phrase::Phrase,
        state::{GameState, Mode, Purchase},
    };
    use rand::{rngs::StdRng, SeedableRng};

    fn played_state() -> GameState {
        let config = EconomyConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        let mut state = GameState::new(Phrase::new("MICHAEL JORDAN").unwrap(), "Person", &config);
        state.select_letter('A').unwrap();
        state.confirm_purchase(&config, &mut rng).unwrap();
        state.select_letter('Z').unwrap();
        state.confirm_purchase(&config, &mut rng).unwrap();
        state.enter_guess_mode(&config).unwrap();
        state.input_guess_letter('M').unwrap();
        state
    }

    #[test]
    fn capture_then_restore() {
        let state = played_state();
        let json = capture(&state).unwrap();
        let restored = restore(&json).unwrap();
        assert_eq!(restored, state);
        assert_eq!(restored.mode, Mode::GuessMode);
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(restore("not json"), Err(RestoreError::Malformed(_))));
        assert!(matches!(restore("{}"), Err(RestoreError::Malformed(_))));
    }

    #[test]
    fn rejects_negative_bankroll() {
        let json = capture(&played_state())
            .unwrap()
            .replace("\"bankroll\":830", "\"bankroll\":-5");
        assert!(json.contains("-5"));
        assert!(matches!(restore(&json), Err(RestoreError::Malformed(_))));
    }

    #[test]
    fn rejects_tampered_reveal() {
        let mut state = played_state();
        state.revealed.insert(0, 'Z');
        let json = capture(&state).unwrap();
        match restore(&json) {
            Err(RestoreError::Inconsistent(violations)) => {
                assert!(violations.iter().any(|v| v.message.contains("holds")))
            }
            other => panic!("expected inconsistent snapshot, got {:?}", other),
        }
    }

    fn assert_inconsistent(state: &GameState, needle: &str) {
        match restore(&capture(state).unwrap()) {
            Err(RestoreError::Inconsistent(violations)) => assert!(
                violations.iter().any(|v| v.message.contains(needle)),
                "{:?}",
                violations
            ),
            other => panic!("expected inconsistent snapshot, got {:?}", other),
        }
    }

    #[test]
    fn rejects_pending_locked_letter() {
        let config = EconomyConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut state = GameState::new(Phrase::new("CAT").unwrap(), "Animal", &config);
        state.select_letter('C').unwrap();
        state.confirm_purchase(&config, &mut rng).unwrap();
        state.select_letter('Z').unwrap();
        state.confirm_purchase(&config, &mut rng).unwrap();

        state.mode = Mode::PurchasePending;
        state.pending_purchase = Some(Purchase::Letter('C'));
        assert_inconsistent(&state, "already locked");

        state.pending_purchase = Some(Purchase::Letter('Z'));
        assert_inconsistent(&state, "already locked");
    }

    #[test]
    fn rejects_guessing_without_guesses() {
        let mut state = played_state();
        state.guesses_remaining = 0;
        assert_inconsistent(&state, "no guesses remaining");
    }

    #[test]
    fn rejects_locked_letter_in_guess() {
        let mut state = played_state();
        // A is locked, position 0 is still editable
        state.pending_guess.insert(0, 'A');
        assert_inconsistent(&state, "locked letter A");
    }

    #[test]
    fn rejects_invalid_phrase() {
        let json = capture(&played_state())
            .unwrap()
            .replace("MICHAEL JORDAN", "michael jordan");
        assert!(matches!(restore(&json), Err(RestoreError::Malformed(_))));
    }
}
