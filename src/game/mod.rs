use rand::{rngs::StdRng, SeedableRng};

pub use command::{Command, ParseCommandError, Rejection};
pub use config::{ConfigError, EconomyConfig, LossThreshold, RoundBankroll};
pub use engine::{reduce, CommandResult};
pub use invariants::{check_invariants, InvariantViolation};
pub use phrase::{Phrase, PhraseError};
pub use snapshot::RestoreError;
pub use state::{GameState, Mode, Purchase};

mod command;
mod config;
pub mod costs;
mod engine;
mod invariants;
mod phrase;
pub mod rules;
pub mod snapshot;
mod state;
#[cfg(test)]
mod tests;

/// A round being played: the state plus the economy it's played under and the
/// randomness used for hints.
#[derive(Debug)]
pub struct Game {
    /// Economy settings for every round of this game.
    pub config: EconomyConfig,
    /// Current round.
    pub state: GameState,
    rng: StdRng,
}

impl Game {
    /// Start a game on the given phrase with entropy-seeded hints.
    pub fn new(phrase: Phrase, category: &str, config: EconomyConfig) -> Self {
        Game::with_rng(phrase, category, config, StdRng::from_entropy())
    }

    /// Start a game whose hint positions are reproducible.
    pub fn with_seed(phrase: Phrase, category: &str, config: EconomyConfig, seed: u64) -> Self {
        Game::with_rng(phrase, category, config, StdRng::seed_from_u64(seed))
    }

    /// Resume a previously saved round.
    pub fn resume(state: GameState, config: EconomyConfig) -> Self {
        Game {
            config,
            state,
            rng: StdRng::from_entropy(),
        }
    }

    /// Resume a saved round with reproducible hints.
    pub fn resume_with_seed(state: GameState, config: EconomyConfig, seed: u64) -> Self {
        Game {
            config,
            state,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn with_rng(phrase: Phrase, category: &str, config: EconomyConfig, rng: StdRng) -> Self {
        let state = GameState::new(phrase, category, &config);
        Game { config, state, rng }
    }

    /// Apply one command to the current round.
    pub fn dispatch(&mut self, command: &Command) -> CommandResult {
        self.state.apply(command, &self.config, &mut self.rng)
    }

    /// Replace the current round with a fresh one.
    pub fn start_new_round(&mut self, phrase: Phrase, category: &str) {
        self.state.start_new_round(phrase, category, &self.config);
    }
}
