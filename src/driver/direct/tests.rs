use tempfile::tempdir;

use super::DirectDriver;
use crate::{
    driver::{Driver, DriverError},
    game::{snapshot, EconomyConfig, GameState, LossThreshold, Mode, Phrase},
    persistence::{JsonFileSink, MemorySink, PersistenceSink},
    puzzle::{FixedPuzzles, Puzzle},
};

fn puzzles(phrases: &[&str]) -> Box<FixedPuzzles> {
    Box::new(FixedPuzzles::new(
        phrases
            .iter()
            .map(|phrase| Puzzle::parse("Test", phrase).unwrap())
            .collect(),
    ))
}

#[test]
fn plays_round_to_the_end() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("round.json");
    let mut driver = DirectDriver::with_seed(
        EconomyConfig::default(),
        puzzles(&["HELLO WORLD"]),
        Box::new(JsonFileSink::new(&path)),
        5,
    )
    .unwrap();

    let summary = driver.play().unwrap();
    assert!(summary.mode.is_terminal());
    assert_eq!(summary.phrase.to_string(), "HELLO WORLD");
    assert!(summary.steps > 0);

    // Every step is saved, including the last
    let saved = JsonFileSink::new(&path).load().unwrap().unwrap();
    assert_eq!(&saved, &driver.game().state);
}

#[test]
fn next_play_starts_next_puzzle() {
    let mut driver = DirectDriver::with_seed(
        EconomyConfig::default(),
        puzzles(&["CAT", "DOG"]),
        Box::new(MemorySink::new()),
        1,
    )
    .unwrap();
    assert_eq!(driver.play().unwrap().phrase.to_string(), "CAT");
    assert_eq!(driver.play().unwrap().phrase.to_string(), "DOG");
}

#[test]
fn resumes_saved_round() {
    let config = EconomyConfig::default();
    let mut state = GameState::new(Phrase::new("ZEBRA").unwrap(), "Animal", &config);
    state.select_letter('Z').unwrap();
    let sink = MemorySink::with_snapshot(snapshot::capture(&state).unwrap());

    let mut driver = DirectDriver::with_seed(config, puzzles(&["CAT"]), Box::new(sink), 2).unwrap();
    assert_eq!(driver.game().state, state);

    let summary = driver.play().unwrap();
    assert_eq!(summary.phrase.to_string(), "ZEBRA");
    assert!(summary.mode.is_terminal());
}

#[test]
fn ignores_corrupt_save() {
    let driver = DirectDriver::with_seed(
        EconomyConfig::default(),
        puzzles(&["CAT"]),
        Box::new(MemorySink::with_snapshot("{\"bankroll\": -1}")),
        2,
    )
    .unwrap();
    assert_eq!(driver.game().state.phrase.to_string(), "CAT");
    assert_eq!(driver.game().state.mode, Mode::Idle);
}

#[test]
fn stalls_without_legal_moves() {
    // Broke, no guesses and a threshold that never declares the loss
    let config = EconomyConfig {
        starting_bankroll: 20,
        starting_guesses: 0,
        loss_threshold: LossThreshold::Flat(1),
        ..EconomyConfig::default()
    };
    let mut driver =
        DirectDriver::with_seed(config, puzzles(&["JAZZ"]), Box::new(MemorySink::new()), 0)
            .unwrap();
    assert!(matches!(driver.play(), Err(DriverError::Stalled(0))));

    driver.skip_round().unwrap();
    assert_eq!(driver.game().state.phrase.to_string(), "JAZZ");
    assert_eq!(driver.game().state.bankroll, 20);
}

#[test]
fn resumed_hints_follow_seed() {
    let config = EconomyConfig::default();
    let mut state = GameState::new(
        Phrase::new("THE QUICK BROWN FOX").unwrap(),
        "Thing",
        &config,
    );
    state.select_hint().unwrap();
    let snapshot = snapshot::capture(&state).unwrap();

    let hint = || {
        let mut driver = DirectDriver::with_seed(
            EconomyConfig::default(),
            puzzles(&["CAT"]),
            Box::new(MemorySink::with_snapshot(snapshot.clone())),
            9,
        )
        .unwrap();
        driver.play().unwrap();
        driver.game().state.clone()
    };
    assert_eq!(hint(), hint());
}
