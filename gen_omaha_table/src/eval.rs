//! Terminal evaluators.
//!
//! Once nine slots are occupied an automaton must store a verdict instead
//! of a forward pointer. Omaha hands use exactly two pocket and exactly
//! three board cards, so each evaluator ranges over the fixed pocket-pair
//! and board-triple tables below and keeps the best five-card class.

use log::warn;

use crate::five_card::{class_to_rank, FIVE_CARD};
use crate::ids::{Slots, ANY_CARD, SKIP};

/// The six ways to pick two of four pocket cards
pub const POCKET_PERMS: [[usize; 2]; 6] = [[0, 1], [0, 2], [0, 3], [1, 2], [1, 3], [2, 3]];

/// Board triples; the first 1 / 4 / 10 apply to 3- / 4- / 5-card boards
pub const BOARD_PERMS: [[usize; 3]; 10] = [
    [0, 1, 2],
    [0, 1, 3],
    [0, 2, 3],
    [1, 2, 3],
    [0, 1, 4],
    [0, 2, 4],
    [0, 3, 4],
    [1, 2, 4],
    [1, 3, 4],
    [2, 3, 4],
];

/// Board slots with the undealt markers dropped.
fn dealt_board(slots: &Slots) -> ([u8; 5], usize) {
    let mut board = [0u8; 5];
    let mut n = 0;
    for &v in &slots.board {
        if v != 0 && v != SKIP {
            board[n] = v;
            n += 1;
        }
    }
    (board, n)
}

/// Suit of the flush the nine cards can legally make, or -1.
///
/// Pocket cards count toward a suit up to the two that may play, board
/// cards up to three. At most one suit can reach five over nine cards.
pub fn eval_flush_suit(id: u64) -> i32 {
    let slots = Slots::unpack(id);
    let mut pocket_count = [0u8; 5];
    let mut board_count = [0u8; 5];
    for &suit in &slots.pocket {
        if suit != 0 {
            let n = &mut pocket_count[usize::from(suit)];
            *n = (*n + 1).min(2);
        }
    }
    for &suit in &slots.board {
        if suit != 0 && suit != SKIP {
            let n = &mut board_count[usize::from(suit)];
            *n = (*n + 1).min(3);
        }
    }
    for suit in 1..=4usize {
        if pocket_count[suit] + board_count[suit] >= 5 {
            return suit as i32;
        }
    }
    -1
}

/// Score of the best flush in the reference suit, or -1 when no legal
/// flush exists.
///
/// Slot values are rank+1 for reference-suit cards. An [`ANY_CARD`] among
/// the two highest pocket or three highest board slots means fewer than
/// 2+3 suited cards; the -1 becomes a self-loop at the region base, which
/// padded 7- and 8-card queries rely on.
pub fn eval_flush_ranks(id: u64) -> i32 {
    let slots = Slots::unpack(id);
    let (board, n_board) = dealt_board(&slots);
    let pocket = slots.pocket;
    let n_pocket = slots.n_pocket();

    if pocket[0] == 0 || pocket[1] == 0 || board[0] == 0 || board[1] == 0 || board[2] == 0 {
        warn!("flush rank terminal {} is missing cards", id);
        return -1;
    }
    if pocket[0] == ANY_CARD
        || pocket[1] == ANY_CARD
        || board[0] == ANY_CARD
        || board[1] == ANY_CARD
        || board[2] == ANY_CARD
    {
        return -1;
    }

    let n_board_perms = match n_pocket + n_board {
        9 => 10,
        8 => 4,
        7 => 1,
        _ => return -1,
    };

    let mut best = 8191u16;
    for pocket_perm in &POCKET_PERMS {
        for board_perm in &BOARD_PERMS[..n_board_perms] {
            let values = [
                pocket[pocket_perm[0]],
                pocket[pocket_perm[1]],
                board[board_perm[0]],
                board[board_perm[1]],
                board[board_perm[2]],
            ];
            // slot values 2..=14 carry a rank; anything else is an
            // any-card or empty slot and the combination is skipped
            let mut mask = 0u16;
            let mut suited = true;
            for &v in &values {
                if !(2..=14).contains(&v) {
                    suited = false;
                    break;
                }
                mask |= 1 << (v - 2);
            }
            if !suited {
                continue;
            }
            let class = FIVE_CARD.flush_class(mask);
            if class < best {
                best = class;
            }
        }
    }
    class_to_rank(best)
}

/// Score of the best hand with suits ignored.
///
/// Slot values are ranks 1..=13. Each card is assigned a rotating fake
/// suit before hitting the oracle; any two pocket cards then differ in
/// suit, so no five-card pick can read as a flush.
pub fn eval_no_flush(id: u64) -> i32 {
    let slots = Slots::unpack(id);
    let (board, n_board) = dealt_board(&slots);
    let n_pocket = slots.n_pocket();
    if n_pocket < 4 || n_board < 3 {
        panic!(
            "no-flush terminal {} holds {} pocket and {} board cards",
            id, n_pocket, n_board
        );
    }
    let n_board_perms = match n_pocket + n_board {
        9 => 10,
        8 => 4,
        _ => 1,
    };

    let mut suit = 0u8;
    let mut fake_suit = || {
        let s = suit % 4 + 1;
        suit += 1;
        s
    };
    let mut pocket_codes = [0u32; 4];
    for i in 0..4 {
        pocket_codes[i] = FIVE_CARD.card_code(slots.pocket[i], fake_suit());
    }
    let mut board_codes = [0u32; 5];
    for (i, code) in board_codes.iter_mut().take(n_board).enumerate() {
        *code = FIVE_CARD.card_code(board[i], fake_suit());
    }

    let mut best = 8191u16;
    for pocket_perm in &POCKET_PERMS {
        for board_perm in &BOARD_PERMS[..n_board_perms] {
            let class = FIVE_CARD.no_flush_class([
                pocket_codes[pocket_perm[0]],
                pocket_codes[pocket_perm[1]],
                board_codes[board_perm[0]],
                board_codes[board_perm[1]],
                board_codes[board_perm[2]],
            ]);
            if class < best {
                best = class;
            }
        }
    }
    class_to_rank(best)
}
