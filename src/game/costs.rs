/// Price of each letter, laid out in keyboard order. Fixed across rounds.
pub const LETTER_COSTS: [(char, u32); 26] = [
    ('Q', 30),
    ('W', 50),
    ('E', 140),
    ('R', 120),
    ('T', 120),
    ('Y', 60),
    ('U', 80),
    ('I', 110),
    ('O', 90),
    ('P', 80),
    ('A', 130),
    ('S', 120),
    ('D', 80),
    ('F', 60),
    ('G', 70),
    ('H', 70),
    ('J', 30),
    ('K', 50),
    ('L', 80),
    ('Z', 40),
    ('X', 40),
    ('C', 80),
    ('V', 50),
    ('B', 60),
    ('N', 100),
    ('M', 70),
];

/// Price of revealing one random hidden position.
pub const HINT_COST: u32 = 150;

/// Price of one additional full-guess submission.
pub const EXTRA_GUESS_COST: u32 = 150;

/// Cost of the given letter, or `None` if it isn't `A`-`Z`.
pub fn letter_cost(letter: char) -> Option<u32> {
    LETTER_COSTS
        .iter()
        .find(|(l, _)| *l == letter)
        .map(|(_, cost)| *cost)
}

/// Is this a letter that can be bought or typed?
pub fn is_playable_letter(letter: char) -> bool {
    letter.is_ascii_uppercase()
}
