use crate::game::{GameState, Mode, Purchase};

/// Draw the board: one cell per phrase character, `_` for hidden letters and
/// lowercase for letters typed into the pending guess, then a status line.
pub fn render_board(state: &GameState) -> String {
    let cells = (0..state.phrase.len())
        .map(|pos| match state.phrase.get(pos) {
            Some(' ') | None => ' ',
            Some(_) => match (state.revealed.get(&pos), state.pending_guess.get(&pos)) {
                (Some(ch), _) => *ch,
                (None, Some(ch)) => ch.to_ascii_lowercase(),
                (None, None) => '_',
            },
        })
        .collect::<Vec<char>>();

    let mut out = cells
        .iter()
        .map(|ch| ch.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    out.push('\n');
    out.push_str(&status_line(state));
    out
}

fn status_line(state: &GameState) -> String {
    let mut status = format!(
        "{} | bankroll {} | guesses {} | {}",
        state.category, state.bankroll, state.guesses_remaining, state.mode
    );
    if let Some(purchase) = state.pending_purchase {
        status.push_str(&format!(" | selected {}", describe(purchase)));
    }
    if !state.incorrect_purchases.is_empty() {
        let wrong = state.incorrect_purchases.iter().collect::<String>();
        status.push_str(&format!(" | not in phrase: {}", wrong));
    }
    match state.mode {
        Mode::Won => status.push_str("\nSolved!"),
        Mode::Lost => status.push_str(&format!("\nOut of luck, it was {}", state.phrase)),
        _ => {}
    }
    status
}

fn describe(purchase: Purchase) -> String {
    match (purchase, purchase.cost()) {
        (Purchase::Letter(letter), Some(cost)) => format!("{} ({})", letter, cost),
        (Purchase::Hint, Some(cost)) => format!("hint ({})", cost),
        (Purchase::ExtraGuess, Some(cost)) => format!("extra guess ({})", cost),
        (_, None) => "nothing".to_owned(),
    }
}
