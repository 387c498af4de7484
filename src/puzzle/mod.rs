use lazy_static::lazy_static;
use log::debug;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use thiserror::Error;

use crate::game::{Phrase, PhraseError};

/// A phrase to solve, with its display category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    pub phrase: Phrase,
    pub category: String,
}

impl Puzzle {
    /// Build a puzzle from raw text, normalizing the phrase.
    pub fn parse(category: &str, phrase: &str) -> Result<Self, PuzzleError> {
        Ok(Puzzle {
            phrase: Phrase::normalize(phrase)?,
            category: category.trim().to_owned(),
        })
    }
}

/// Failure modes for puzzle providers.
#[derive(Debug, Error)]
pub enum PuzzleError {
    #[error("no puzzles available")]
    Exhausted,
    #[error("invalid puzzle phrase")]
    InvalidPhrase(#[from] PhraseError),
}

/// Supplies the phrase for each new round.
pub trait PuzzleProvider {
    fn next_puzzle(&mut self) -> Result<Puzzle, PuzzleError>;
}

lazy_static! {
    /// Bundled `(category, phrase)` pairs.
    pub static ref BUILTIN_PUZZLES: Vec<(&'static str, &'static str)> = {
        let mut v = Vec::new();
        let puzzles_raw = include_str!("data/puzzles.txt");
        for line in puzzles_raw.lines().filter(|l| !l.trim().is_empty()) {
            if let Some((category, phrase)) = line.split_once('|') {
                v.push((category, phrase));
            }
        }
        v
    };
}

/// Picks uniformly at random from the bundled puzzle list.
#[derive(Debug)]
pub struct BuiltinPuzzles {
    rng: StdRng,
}

impl BuiltinPuzzles {
    pub fn new() -> Self {
        BuiltinPuzzles {
            rng: StdRng::from_entropy(),
        }
    }

    /// A provider whose picks are reproducible.
    pub fn with_seed(seed: u64) -> Self {
        BuiltinPuzzles {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for BuiltinPuzzles {
    fn default() -> Self {
        BuiltinPuzzles::new()
    }
}

impl PuzzleProvider for BuiltinPuzzles {
    fn next_puzzle(&mut self) -> Result<Puzzle, PuzzleError> {
        let (category, phrase) = BUILTIN_PUZZLES
            .choose(&mut self.rng)
            .ok_or(PuzzleError::Exhausted)?;
        debug!("Picked puzzle in category {}", category);
        Puzzle::parse(category, phrase)
    }
}

/// Hands out a fixed list of puzzles in order, then starts over.
#[derive(Debug, Clone)]
pub struct FixedPuzzles {
    puzzles: Vec<Puzzle>,
    next: usize,
}

impl FixedPuzzles {
    pub fn new(puzzles: Vec<Puzzle>) -> Self {
        FixedPuzzles { puzzles, next: 0 }
    }
}

impl PuzzleProvider for FixedPuzzles {
    fn next_puzzle(&mut self) -> Result<Puzzle, PuzzleError> {
        if self.puzzles.is_empty() {
            return Err(PuzzleError::Exhausted);
        }
        let puzzle = self.puzzles[self.next % self.puzzles.len()].clone();
        self.next += 1;
        Ok(puzzle)
    }
}
