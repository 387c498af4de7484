use rand::{rngs::StdRng, SeedableRng};

use super::{EconomyConfig, GameState, Phrase};


/// A fresh round on `phrase` with the default economy.
fn new_state(phrase: &str) -> GameState {
    GameState::new(
        Phrase::new(phrase).unwrap(),
        "Test",
        &EconomyConfig::default(),
    )
}

fn rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// Select and confirm a letter purchase.
fn buy(state: &mut GameState, letter: char) -> Vec<usize> {
    let config = EconomyConfig::default();
    state.select_letter(letter).unwrap();
    state.confirm_purchase(&config, &mut rng()).unwrap()
}
