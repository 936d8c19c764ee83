//! # Omaha Evaluator
//!
//! Constant-time evaluation of 7-, 8- and 9-card Omaha hands (four hole
//! cards, three to five community cards) against a generated hand-ranks
//! table.
//!
//! The table is a flat `i32` array housing three interleaved automata. A
//! query chases nine array indexes per automaton, board cards first:
//!
//! ```text
//! flush suit: start at 106
//! no flush:   start at HR[0] + 53
//! flush rank: start at HR[1] + 56, every lookup shifted by (4 - flush_suit)
//! ```
//!
//! Scores are `category * 0x1000 + rank_within_category`; higher wins.
//! Categories run from 1 (high card) to 9 (straight flush).
//!
//! ```no_run
//! use omaha_evaluator::{cards::card_index, OmahaEvaluator};
//!
//! let eval = OmahaEvaluator::from_file("omaha_ranks.dat").unwrap();
//! let board = [card_index(10, 4), card_index(11, 4), card_index(12, 4)];
//! let pocket = [card_index(14, 4), card_index(13, 4), card_index(2, 1), card_index(3, 1)];
//! let score = eval.evaluate(&board, pocket);
//! ```

pub mod cards;

use std::fs::File;
use std::path::Path;

pub use table_io::TableFileError;
use table_io::TableIO;

/// Root of the flush-suit automaton, the empty-prefix block of the first
/// region.
pub const FLUSH_SUIT_ROOT: usize = 106;

/// Distance from `HR[0]` to the no-flush automaton's empty-prefix block.
pub const NO_FLUSH_STEP: usize = 53;

/// Distance from `HR[1]` to the flush-rank automaton's empty-prefix block
/// (one 56-wide block: 53 card columns plus 3 dummy columns).
pub const FLUSH_RANK_STEP: usize = 56;

/// Bits above the in-category rank in a score
pub const HAND_CATEGORY_SHIFT: u32 = 12;

/// Chases one automaton: nine lookups, board first, each biased by `shift`.
fn chase(hand_ranks: &[i32], start: usize, shift: usize, board: &[u8; 5], pocket: &[u8; 4]) -> i32 {
    let mut offset = start;
    for &card in board.iter().chain(pocket.iter()) {
        offset = hand_ranks[offset + usize::from(card) + shift] as usize;
    }
    offset as i32
}

/// Left-pads a 3..=5 card board with zeros so the automata skip the undealt
/// slots. A 7-card hand passes two zeros, an 8-card hand one.
fn pad_board(board: &[u8]) -> [u8; 5] {
    assert!(
        (3..=5).contains(&board.len()),
        "board must hold 3 to 5 cards, got {}",
        board.len()
    );
    let mut padded = [0u8; 5];
    padded[5 - board.len()..].copy_from_slice(board);
    padded
}

/// Returns the flush suit (1..=4) the nine cards can make a legal Omaha
/// flush in, or 0 when none can.
pub fn flush_suit(hand_ranks: &[i32], board: &[u8], pocket: [u8; 4]) -> i32 {
    chase(hand_ranks, FLUSH_SUIT_ROOT, 0, &pad_board(board), &pocket)
}

/// Evaluates a board of 3..=5 cards plus four pocket cards.
///
/// The score is the best 5-card hand over every choice of exactly two
/// pocket and exactly three board cards.
pub fn evaluate(hand_ranks: &[i32], board: &[u8], pocket: [u8; 4]) -> i32 {
    let padded = pad_board(board);
    let suit = chase(hand_ranks, FLUSH_SUIT_ROOT, 0, &padded, &pocket);
    let score = chase(
        hand_ranks,
        hand_ranks[0] as usize + NO_FLUSH_STEP,
        0,
        &padded,
        &pocket,
    );
    if suit != 0 {
        // one automaton serves all four suits: biasing every lookup by
        // (4 - suit) lands wrong-suit card columns on transitions equal to
        // the any-card column, dummy tail included
        let flush_score = chase(
            hand_ranks,
            hand_ranks[1] as usize + FLUSH_RANK_STEP,
            (4 - suit) as usize,
            &padded,
            &pocket,
        );
        score.max(flush_score)
    } else {
        score
    }
}

/// An evaluator owning a loaded hand-ranks table.
pub struct OmahaEvaluator {
    hand_ranks: Vec<i32>,
}

impl OmahaEvaluator {
    /// Loads a table persisted by the generator.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TableFileError> {
        let mut file = File::open(path)?;
        Ok(Self {
            hand_ranks: file.read_table()?,
        })
    }

    /// Wraps an in-memory table.
    pub fn from_table(hand_ranks: Vec<i32>) -> Self {
        Self { hand_ranks }
    }

    pub fn evaluate(&self, board: &[u8], pocket: [u8; 4]) -> i32 {
        evaluate(&self.hand_ranks, board, pocket)
    }

    pub fn flush_suit(&self, board: &[u8], pocket: [u8; 4]) -> i32 {
        flush_suit(&self.hand_ranks, board, pocket)
    }

    pub fn hand_ranks(&self) -> &[i32] {
        &self.hand_ranks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_short_boards_in_front() {
        assert_eq!(pad_board(&[10, 20, 30]), [0, 0, 10, 20, 30]);
        assert_eq!(pad_board(&[10, 20, 30, 40]), [0, 10, 20, 30, 40]);
        assert_eq!(pad_board(&[10, 20, 30, 40, 50]), [10, 20, 30, 40, 50]);
    }

    #[test]
    #[should_panic(expected = "3 to 5 cards")]
    fn rejects_short_board() {
        pad_board(&[1, 2]);
    }
}
