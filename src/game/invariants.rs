//! Consistency checks for a `GameState`.
//!
//! A state produced only by engine commands always passes these. They matter for
//! states that come from outside, e.g. a restored snapshot.

use thiserror::Error;

use super::{
    costs::is_playable_letter,
    rules::{editable_positions, is_won},
    state::{GameState, Mode, Purchase},
};

/// A single broken invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invariant violation: {message}")]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl InvariantViolation {
    fn new(message: impl Into<String>) -> Self {
        InvariantViolation {
            message: message.into(),
        }
    }
}

/// Check every invariant, returning all violations found.
pub fn check_invariants(state: &GameState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let phrase = &state.phrase;

    for (pos, ch) in &state.revealed {
        match phrase.get(*pos) {
            None => violations.push(InvariantViolation::new(format!(
                "revealed position {} is outside the phrase",
                pos
            ))),
            Some(' ') => violations.push(InvariantViolation::new(format!(
                "revealed position {} is a space",
                pos
            ))),
            Some(expected) if expected != *ch => violations.push(InvariantViolation::new(format!(
                "revealed position {} holds {:?} but the phrase has {:?}",
                pos, ch, expected
            ))),
            Some(_) => {}
        }
    }

    for letter in phrase.distinct_letters() {
        let all_revealed = phrase
            .positions_of(letter)
            .all(|pos| state.revealed.contains_key(&pos));
        if all_revealed != state.locked_letters.contains(&letter) {
            violations.push(InvariantViolation::new(format!(
                "letter {} lock state disagrees with revealed positions",
                letter
            )));
        }
    }
    for letter in &state.locked_letters {
        if !phrase.contains(*letter) {
            violations.push(InvariantViolation::new(format!(
                "locked letter {} is not in the phrase",
                letter
            )));
        }
    }

    for letter in &state.incorrect_purchases {
        if !is_playable_letter(*letter) || phrase.contains(*letter) {
            violations.push(InvariantViolation::new(format!(
                "{:?} is marked as an incorrect purchase",
                letter
            )));
        }
    }

    if !state.pending_guess.is_empty() && state.mode != Mode::GuessMode {
        violations.push(InvariantViolation::new(format!(
            "pending guess present while {}",
            state.mode
        )));
    }
    let editable = editable_positions(state);
    for (pos, ch) in &state.pending_guess {
        if !editable.contains(pos) || !is_playable_letter(*ch) {
            violations.push(InvariantViolation::new(format!(
                "pending guess {:?} at {} is not an editable letter slot",
                ch, pos
            )));
        } else if state.locked_letters.contains(ch) {
            violations.push(InvariantViolation::new(format!(
                "pending guess at {} uses locked letter {}",
                pos, ch
            )));
        }
    }
    if state.mode == Mode::GuessMode && state.guesses_remaining == 0 {
        violations.push(InvariantViolation::new("guessing with no guesses remaining"));
    }

    if let Some(stray) = state
        .shaken
        .iter()
        .find(|pos| !state.revealed.contains_key(*pos))
    {
        violations.push(InvariantViolation::new(format!(
            "position {} was animated but is not revealed",
            stray
        )));
    }

    if (state.mode == Mode::PurchasePending) != state.pending_purchase.is_some() {
        violations.push(InvariantViolation::new(format!(
            "pending purchase {:?} does not match mode {}",
            state.pending_purchase, state.mode
        )));
    }
    if let Some(Purchase::Letter(letter)) = state.pending_purchase {
        if !is_playable_letter(letter) {
            violations.push(InvariantViolation::new(format!(
                "pending purchase of {:?} is not a playable letter",
                letter
            )));
        } else if state.is_letter_blocked(letter) {
            violations.push(InvariantViolation::new(format!(
                "pending purchase of {} is already locked or ruled out",
                letter
            )));
        }
    }

    let won = is_won(state);
    match state.mode {
        Mode::Won if !won => violations.push(InvariantViolation::new(
            "round is marked won but letters are still hidden",
        )),
        Mode::Lost if !won || state.guesses_remaining != 0 => {
            violations.push(InvariantViolation::new(
                "round is marked lost but the phrase is not fully revealed",
            ))
        }
        Mode::Idle | Mode::PurchasePending | Mode::GuessMode if won => {
            violations.push(InvariantViolation::new(format!(
                "every letter is revealed but the round is still {}",
                state.mode
            )))
        }
        _ => {}
    }

    violations
}
