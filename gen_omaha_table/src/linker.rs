//! Table layout and transition linking.
//!
//! The output is one flat `i32` array housing three automata laid out back
//! to back: flush-suit at 53, flush-rank (suit 4, 56-wide blocks) after it,
//! no-flush last. A region starts with a fallback row: slot 0 holds the
//! region's special value, slots 1.. loop back to slot 0. Each generated ID
//! then owns one block, the empty prefix first; a block's column per card
//! holds either the next block's base, an inlined verdict at the ninth
//! card, or the region base for rejected appends.
//!
//! Flush-rank blocks carry three extra columns echoing the any-card
//! transition. The runtime serves suits 1..=3 from the suit-4 automaton by
//! biasing every lookup by `4 - suit`; a biased lookup of a wrong-suit
//! card then lands either on a genuine any-card column or inside the
//! previous block's echo tail, both of which contribute nothing to the
//! flush.

use std::collections::HashMap;

use log::{debug, info};

use crate::eval::{eval_flush_suit, eval_flush_ranks, eval_no_flush};
use crate::ids::{
    add_card_flush_rank_4, add_card_flush_suit, add_card_no_flush, count_cards, generate_ids,
    CARD_COUNT,
};

/// Columns of a block: one per card index plus the undealt column 0
pub const BLOCK_SIZE: usize = 53;

/// Extra echo columns per flush-rank block
pub const FLUSH_RANK_DUMMIES: usize = 3;

/// Base of the flush-suit region; the header occupies slots 0..=52
pub const FLUSH_SUIT_OFFSET: usize = BLOCK_SIZE;

/// Writes one region's fallback row and every ID block.
///
/// `offset_value` is the region's special value at slot 0. Verdicts at the
/// ninth card are remapped through `overrides` (at minimum the -1 sentinel
/// to a region fallback). `dummy_card` names the column echoed into the
/// `n_dummy` tail slots of every block.
fn link_region<F, E>(
    hand_ranks: &mut [i32],
    ids: &[u64],
    offset: usize,
    offset_value: i32,
    add_card: F,
    eval_id: E,
    n_dummy: usize,
    dummy_card: u8,
    overrides: &HashMap<i32, i32>,
) where
    F: Fn(u64, u8) -> u64,
    E: Fn(u64) -> i32,
{
    let block = BLOCK_SIZE + n_dummy;
    let mut index_of: HashMap<u64, usize> = HashMap::with_capacity(ids.len());
    for (i, &id) in ids.iter().enumerate() {
        index_of.insert(id, i);
    }

    hand_ranks[offset] = offset_value;
    for i in 1..block {
        hand_ranks[offset + i] = offset as i32;
    }

    for (i, &id) in ids.iter().enumerate() {
        if i % 4_000_000 == 0 && i > 0 {
            debug!("linked {} / {} blocks", i, ids.len());
        }
        let base = offset + block + i * block;
        let num_cards = count_cards(id);
        hand_ranks[base] = offset as i32;

        let min_card = if num_cards <= 1 { 0 } else { 1 };
        let mut dummy_value = None;
        for card in min_card..=CARD_COUNT {
            let new_id = add_card(id, card);
            let entry = if new_id == 0 {
                offset as i32
            } else if num_cards + 1 == 9 {
                let verdict = eval_id(new_id);
                overrides.get(&verdict).copied().unwrap_or(verdict)
            } else {
                (offset + block + index_of[&new_id] * block) as i32
            };
            hand_ranks[base + usize::from(card)] = entry;
            if card == dummy_card {
                dummy_value = Some(entry);
            }
        }
        if let Some(value) = dummy_value {
            for d in BLOCK_SIZE..block {
                hand_ranks[base + d] = value;
            }
        }
    }
}

/// Generates the three ID sets and links them into the finished hand-ranks
/// array.
///
/// Header: slot 0 is the no-flush region base, slot 1 the flush-rank
/// region base; a query adds 53 respectively 56 to land on the empty
/// prefix block. The flush-suit chase is anchored at the fixed offset 106.
/// The array is allocated once at its exact final length.
pub fn build_table() -> Vec<i32> {
    info!("generating flush suit ids");
    let id_fs = generate_ids(100_000, add_card_flush_suit);
    info!("generating flush rank ids for suit 4");
    let id_fr = generate_ids(10_000_000, add_card_flush_rank_4);
    info!("generating no-flush ids");
    let id_nf = generate_ids(100_000_000, add_card_no_flush);

    let offset_fs = FLUSH_SUIT_OFFSET;
    let offset_fr = offset_fs + BLOCK_SIZE * (id_fs.len() + 1);
    let offset_nf = offset_fr + (BLOCK_SIZE + FLUSH_RANK_DUMMIES) * (id_fr.len() + 1);
    let length = offset_nf + BLOCK_SIZE * (id_nf.len() + 1);
    info!(
        "table length {} ({} flush suit, {} flush rank, {} no-flush ids)",
        length,
        id_fs.len(),
        id_fr.len(),
        id_nf.len()
    );

    let mut hand_ranks = vec![0i32; length];
    hand_ranks[0] = offset_nf as i32;
    hand_ranks[1] = offset_fr as i32;

    info!("linking flush suit region");
    link_region(
        &mut hand_ranks,
        &id_fs,
        offset_fs,
        offset_nf as i32,
        add_card_flush_suit,
        eval_flush_suit,
        0,
        0,
        &HashMap::from([(-1, 0)]),
    );
    drop(id_fs);

    info!("linking flush rank region");
    link_region(
        &mut hand_ranks,
        &id_fr,
        offset_fr,
        0,
        add_card_flush_rank_4,
        eval_flush_ranks,
        FLUSH_RANK_DUMMIES,
        1,
        &HashMap::from([(-1, offset_fr as i32)]),
    );
    drop(id_fr);

    info!("linking no-flush region");
    link_region(
        &mut hand_ranks,
        &id_nf,
        offset_nf,
        0,
        add_card_no_flush,
        eval_no_flush,
        0,
        0,
        &HashMap::from([(-1, offset_nf as i32)]),
    );
    drop(id_nf);

    info!("done");
    hand_ranks
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazy_static::lazy_static;

    lazy_static! {
        /// The flush-suit region linked standalone; it is self-contained,
        /// small, and anchored at the same 106 root as the full table.
        static ref FLUSH_SUIT_REGION: Vec<i32> = {
            let ids = generate_ids(100_000, add_card_flush_suit);
            let offset = FLUSH_SUIT_OFFSET;
            let mut hand_ranks = vec![0i32; offset + BLOCK_SIZE * (ids.len() + 1)];
            link_region(
                &mut hand_ranks,
                &ids,
                offset,
                0,
                add_card_flush_suit,
                eval_flush_suit,
                0,
                0,
                &HashMap::from([(-1, 0)]),
            );
            hand_ranks
        };
    }

    fn chase(hand_ranks: &[i32], board: [u8; 5], pocket: [u8; 4]) -> i32 {
        let mut offset = 106usize;
        for &card in board.iter().chain(pocket.iter()) {
            offset = hand_ranks[offset + usize::from(card)] as usize;
        }
        offset as i32
    }

    /// card = 4 * (rank - 2) + suit
    fn card(rank: u8, suit: u8) -> u8 {
        4 * (rank - 2) + suit
    }

    #[test]
    fn fallback_row_converges() {
        let hr = &*FLUSH_SUIT_REGION;
        assert_eq!(hr[FLUSH_SUIT_OFFSET], 0);
        for k in 1..BLOCK_SIZE {
            assert_eq!(hr[FLUSH_SUIT_OFFSET + k] as usize, FLUSH_SUIT_OFFSET);
        }
    }

    #[test]
    fn block_targets_stay_in_range() {
        let hr = &*FLUSH_SUIT_REGION;
        for &entry in hr[FLUSH_SUIT_OFFSET..].iter() {
            let entry = entry as usize;
            // every slot is a suit verdict, 0, or an in-region offset
            assert!(
                entry <= 4 || (entry >= FLUSH_SUIT_OFFSET && entry + BLOCK_SIZE <= hr.len()),
                "entry {} out of range",
                entry
            );
        }
    }

    #[test]
    fn chases_flush_suits() {
        let hr = &*FLUSH_SUIT_REGION;
        // two pocket spades, three board spades
        let board = [card(10, 4), card(11, 4), card(12, 4), card(13, 1), card(2, 1)];
        let pocket = [card(14, 4), card(9, 4), card(3, 1), card(4, 2)];
        assert_eq!(chase(hr, board, pocket), 4);

        // hearts instead
        let board = [card(10, 3), card(11, 3), card(12, 3), card(13, 1), card(2, 1)];
        let pocket = [card(14, 3), card(9, 3), card(3, 1), card(4, 2)];
        assert_eq!(chase(hr, board, pocket), 3);

        // board flush without pocket support stays suitless
        let board = [card(10, 4), card(11, 4), card(12, 4), card(13, 4), card(14, 4)];
        let pocket = [card(2, 1), card(3, 1), card(4, 1), card(5, 1)];
        assert_eq!(chase(hr, board, pocket), 0);
    }

    #[test]
    fn chases_padded_boards() {
        let hr = &*FLUSH_SUIT_REGION;
        // 7-card query: two leading zeros
        let board = [0, 0, card(10, 2), card(11, 2), card(12, 2)];
        let pocket = [card(14, 2), card(9, 2), card(3, 1), card(4, 1)];
        assert_eq!(chase(hr, board, pocket), 2);

        // 8-card query: one leading zero, diamonds fall one short
        let board = [0, card(10, 2), card(11, 2), card(12, 2), card(5, 1)];
        let pocket = [card(14, 2), card(9, 1), card(3, 1), card(4, 1)];
        assert_eq!(chase(hr, board, pocket), 0);
    }

    #[test]
    fn chase_is_permutation_invariant() {
        let hr = &*FLUSH_SUIT_REGION;
        let board = [card(10, 4), card(11, 4), card(12, 4), card(13, 1), card(2, 1)];
        let pocket = [card(14, 4), card(9, 4), card(3, 1), card(4, 2)];
        let expected = chase(hr, board, pocket);

        let mut rotated_board = board;
        rotated_board.rotate_left(2);
        let mut rotated_pocket = pocket;
        rotated_pocket.rotate_left(1);
        assert_eq!(chase(hr, rotated_board, rotated_pocket), expected);

        let reversed_board = [board[4], board[3], board[2], board[1], board[0]];
        let reversed_pocket = [pocket[3], pocket[2], pocket[1], pocket[0]];
        assert_eq!(chase(hr, reversed_board, reversed_pocket), expected);
    }
}
