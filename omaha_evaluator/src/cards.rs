//! Card encoding for the hand-ranks table.
//!
//! Cards are indexed 1..=52 where `card = 4 * (rank - 2) + suit`, with rank
//! 2..=14 (deuce to ace) and suit 1..=4 (clubs, diamonds, hearts, spades).
//! Index 0 stands for an undealt board slot in 7- and 8-card queries.

/// Number of card indexes in a standard deck
pub const CARD_COUNT: u8 = 52;

/// Number of ranks in a standard deck
/// (2 -> A)
pub const RANK_COUNT: u8 = 13;

/// rank (2..=14) to char table
pub const RANK_TO_CHAR: &[char; 13] = &[
    '2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A',
];

/// suit (1..=4) to char table
pub static SUIT_TO_CHAR: &[char; 4] = &['c', 'd', 'h', 's'];

/// Builds a card index from rank 2..=14 and suit 1..=4
pub const fn card_index(rank: u8, suit: u8) -> u8 {
    4 * (rank - 2) + suit
}

/// Rank 2..=14 of a card index
pub const fn card_rank(card: u8) -> u8 {
    2 + ((card - 1) >> 2)
}

/// Suit 1..=4 of a card index
pub const fn card_suit(card: u8) -> u8 {
    1 + ((card - 1) & 3)
}

/// Two-char display form of a card index, e.g. `As`
pub fn card_string(card: u8) -> String {
    let mut s = String::with_capacity(2);
    s.push(RANK_TO_CHAR[usize::from(card_rank(card) - 2)]);
    s.push(SUIT_TO_CHAR[usize::from(card_suit(card) - 1)]);
    s
}
