use log::{info, warn};
use std::io;
use thiserror::Error;

use crate::{
    game::{EconomyConfig, Game, GameState, Mode, Phrase},
    persistence::{PersistError, PersistenceSink},
    puzzle::{PuzzleError, PuzzleProvider},
};

pub mod console;
pub mod direct;

/// Defines a host that plays a round of the game, either on its own or for a
/// person.
pub trait Driver {
    /// Play the current round until it ends or the driver stops.
    fn play(&mut self) -> Result<RoundSummary, DriverError>;
}

/// How a round finished up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSummary {
    pub phrase: Phrase,
    pub category: String,
    /// Final mode. Only non-terminal if the player quit early.
    pub mode: Mode,
    pub bankroll: u32,
    pub guesses_remaining: u32,
    /// Commands accepted during this call to `play`.
    pub steps: usize,
}

impl RoundSummary {
    fn new(state: &GameState, steps: usize) -> Self {
        RoundSummary {
            phrase: state.phrase.clone(),
            category: state.category.clone(),
            mode: state.mode,
            bankroll: state.bankroll,
            guesses_remaining: state.guesses_remaining,
            steps,
        }
    }
}

/// Failure modes for drivers.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("solver stalled after {0} steps")]
    Stalled(usize),
    #[error("could not get a puzzle")]
    Puzzle(#[from] PuzzleError),
    #[error("could not persist round")]
    Persist(#[from] PersistError),
    #[error("console i/o failed")]
    Io(#[from] io::Error),
}

/// Pick up the saved round if there is an unfinished one, otherwise start a
/// new one from the provider.
fn open_round(
    config: EconomyConfig,
    provider: &mut dyn PuzzleProvider,
    sink: &mut dyn PersistenceSink,
    seed: Option<u64>,
) -> Result<Game, DriverError> {
    match sink.load()? {
        Some(state) if !state.mode.is_terminal() => {
            info!("Resuming saved round ({})", state.category);
            return Ok(match seed {
                Some(seed) => Game::resume_with_seed(state, config, seed),
                None => Game::resume(state, config),
            });
        }
        Some(_) => warn!("Saved round is already over, starting a new one"),
        None => {}
    }

    let puzzle = provider.next_puzzle()?;
    let game = match seed {
        Some(seed) => Game::with_seed(puzzle.phrase, &puzzle.category, config, seed),
        None => Game::new(puzzle.phrase, &puzzle.category, config),
    };
    sink.save(&game.state)?;
    Ok(game)
}

/// Replace the game's round with the provider's next puzzle.
fn next_round(
    game: &mut Game,
    provider: &mut dyn PuzzleProvider,
    sink: &mut dyn PersistenceSink,
) -> Result<(), DriverError> {
    let puzzle = provider.next_puzzle()?;
    game.start_new_round(puzzle.phrase, &puzzle.category);
    sink.save(&game.state)?;
    Ok(())
}
