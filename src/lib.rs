//! A word-guessing game with a currency economy: buy letters, hints and extra
//! guesses from a bankroll, or spend a guess to type out the whole phrase.

pub mod driver;
pub mod game;
pub mod persistence;
pub mod puzzle;
pub mod solver;
