//! Canonical prefix IDs and their successor functions.
//!
//! A prefix of up to nine dealt cards is packed into a 64-bit ID of nine
//! 7-bit fields: five board slots in the low bits, four pocket slots above
//! them. Both groups are sorted descending before packing, so any
//! permutation within a group canonicalizes to the same ID and plain
//! integer order on IDs is usable for dedup and binary search.
//!
//! Three ID spaces share this layout, differing only in how a card index
//! 1..=52 is translated before insertion:
//!
//! * flush-suit space stores the suit 1..=4,
//! * flush-rank space stores rank+1 (2..=14) for reference-suit cards and
//!   [`ANY_CARD`] for everything else,
//! * no-flush space stores the rank 1..=13.
//!
//! Card index 0 stands for an undealt board slot and is stored as [`SKIP`].

use log::{debug, info};

/// Slot value for an undealt board position in 7- and 8-card prefixes
pub const SKIP: u8 = 53;

/// Flush-rank slot value for a card outside the reference suit
pub const ANY_CARD: u8 = 1;

/// Highest card index
pub const CARD_COUNT: u8 = 52;

/// Board and pocket slots of one prefix, unpacked.
///
/// Slot values depend on the ID space; 0 is an empty slot. Board slots fill
/// before pocket slots.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Slots {
    pub board: [u8; 5],
    pub pocket: [u8; 4],
}

impl Slots {
    pub fn unpack(id: u64) -> Self {
        let mut slots = Slots::default();
        for i in 0..5 {
            slots.board[i] = ((id >> (7 * i)) & 0x7F) as u8;
        }
        for i in 0..4 {
            slots.pocket[i] = ((id >> (7 * (i + 5))) & 0x7F) as u8;
        }
        slots
    }

    /// Sorts each group descending and packs. Empty slots sort to the end
    /// of their group, so unpacking yields contiguous values again.
    pub fn pack(mut self) -> u64 {
        self.board.sort_unstable_by(|a, b| b.cmp(a));
        self.pocket.sort_unstable_by(|a, b| b.cmp(a));
        let mut id = 0u64;
        for i in 0..5 {
            id |= u64::from(self.board[i]) << (7 * i);
        }
        for i in 0..4 {
            id |= u64::from(self.pocket[i]) << (7 * (i + 5));
        }
        id
    }

    /// Occupied board slots, undealt markers included.
    pub fn n_board(&self) -> usize {
        self.board.iter().filter(|&&v| v != 0).count()
    }

    pub fn n_pocket(&self) -> usize {
        self.pocket.iter().filter(|&&v| v != 0).count()
    }

    /// Adds a slot value; the board takes the first five, the pocket the
    /// rest.
    pub fn push(&mut self, value: u8) {
        let n_board = self.n_board();
        if n_board < 5 {
            self.board[n_board] = value;
        } else {
            self.pocket[self.n_pocket()] = value;
        }
    }
}

/// Number of occupied slots, undealt markers included.
pub fn count_cards(id: u64) -> u32 {
    (0..9).filter(|i| (id >> (7 * i)) & 0x7F != 0).count() as u32
}

/// Appends a card in flush-suit space. Never rejects.
pub fn add_card_flush_suit(id: u64, card: u8) -> u64 {
    let value = if card == 0 { SKIP } else { ((card - 1) & 3) + 1 };
    let mut slots = Slots::unpack(id);
    slots.push(value);
    slots.pack()
}

/// Appends a card in flush-rank space for the given reference suit.
///
/// Returns 0 when the card's rank is already present, or when the new
/// prefix can no longer reach a legal Omaha flush: a flush takes exactly
/// three suited board cards and exactly two suited pocket cards, so a
/// 4-card board with at most one suited card, a 5-card board with at most
/// two, or a full board whose pocket cannot supply two suited cards are
/// all dead.
pub fn add_card_flush_rank(id: u64, card: u8, flush_suit: u8) -> u64 {
    let value = if card == 0 {
        SKIP
    } else if ((card - 1) & 3) + 1 == flush_suit {
        2 + ((card - 1) >> 2)
    } else {
        ANY_CARD
    };

    let mut slots = Slots::unpack(id);
    let duplicate = |v: u8| v != ANY_CARD && v != SKIP && v == value;
    if slots.pocket.iter().copied().any(duplicate) || slots.board.iter().copied().any(duplicate) {
        return 0;
    }
    slots.push(value);

    let n_board = slots.n_board();
    let n_pocket = slots.n_pocket();
    let suited_board = slots
        .board
        .iter()
        .filter(|&&v| v != 0 && v != ANY_CARD && v != SKIP)
        .count();
    let suited_pocket = slots
        .pocket
        .iter()
        .filter(|&&v| v != 0 && v != ANY_CARD)
        .count();

    if n_board == 4 && suited_board <= 1 {
        return 0;
    }
    if n_board == 5 && suited_board <= 2 {
        return 0;
    }
    if n_board == 5 && n_pocket == 3 && suited_pocket == 0 {
        return 0;
    }
    if n_board == 5 && n_pocket == 4 && suited_pocket <= 1 {
        return 0;
    }
    slots.pack()
}

/// Flush-rank append for suit 4, the one variant a table build uses; the
/// other suits are served by the query-time base shift.
pub fn add_card_flush_rank_4(id: u64, card: u8) -> u64 {
    add_card_flush_rank(id, card, 4)
}

/// Appends a card in no-flush space. Rejects a fifth occurrence of a rank
/// across board and pocket; no other uniqueness check applies.
pub fn add_card_no_flush(id: u64, card: u8) -> u64 {
    let value = if card == 0 { SKIP } else { 1 + ((card - 1) >> 2) };
    let mut slots = Slots::unpack(id);
    slots.push(value);
    if value != SKIP {
        let occurrences = slots
            .board
            .iter()
            .chain(slots.pocket.iter())
            .filter(|&&v| v == value)
            .count();
        if occurrences > 4 {
            return 0;
        }
    }
    slots.pack()
}

/// Enumerates every reachable ID of 1..=8 cards under `add_card`,
/// breadth-first by card count.
///
/// The returned list is sorted, deduplicated, and starts with the empty
/// ID 0. Undealt board markers may only enter at depths 1 and 2, matching
/// the query protocol's leading zeros. Both working queues are dropped on
/// return.
pub fn generate_ids<F>(capacity: usize, add_card: F) -> Vec<u64>
where
    F: Fn(u64, u8) -> u64,
{
    let mut id_list: Vec<u64> = Vec::with_capacity(capacity);
    let mut frontier: Vec<u64> = Vec::with_capacity(capacity);
    let mut next: Vec<u64> = Vec::with_capacity(capacity);
    id_list.push(0);
    frontier.push(0);

    for n_cards in 1..=8u32 {
        let min_card = if n_cards <= 2 { 0 } else { 1 };
        for &id in &frontier {
            for card in min_card..=CARD_COUNT {
                let new_id = add_card(id, card);
                if new_id != 0 {
                    next.push(new_id);
                }
            }
        }
        let generated = next.len();
        next.sort_unstable();
        next.dedup();
        debug!(
            "depth {}: {} ids ({} duplicates dropped)",
            n_cards,
            next.len(),
            generated - next.len()
        );
        id_list.extend_from_slice(&next);
        std::mem::swap(&mut frontier, &mut next);
        next.clear();
    }

    id_list.sort_unstable();
    info!("generated {} ids", id_list.len());
    id_list
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pack_many<F>(add_card: F, cards: &[u8]) -> u64
    where
        F: Fn(u64, u8) -> u64,
    {
        cards.iter().fold(0, |id, &c| {
            let next = add_card(id, c);
            assert_ne!(next, 0, "append of {} rejected", c);
            next
        })
    }

    #[test]
    fn pack_unpack_identity() {
        for id in [
            0u64,
            Slots {
                board: [53, 4, 3, 1, 0],
                pocket: [4, 2, 2, 1],
            }
            .pack(),
            Slots {
                board: [14, 9, 2, 1, 1],
                pocket: [13, 13, 1, 0],
            }
            .pack(),
        ] {
            assert_eq!(Slots::unpack(id).pack(), id);
        }
    }

    #[test]
    fn append_order_is_irrelevant() {
        // suits 4, 2, 1, 3, 3 on the board in two orders
        let a = pack_many(add_card_flush_suit, &[4, 2, 1, 3, 7]);
        let b = pack_many(add_card_flush_suit, &[7, 3, 1, 2, 4]);
        assert_eq!(a, b);

        let c = pack_many(add_card_no_flush, &[1, 5, 9, 13, 17, 21, 25]);
        let d = pack_many(add_card_no_flush, &[25, 21, 17, 13, 9, 5, 1]);
        assert_eq!(c, d);
    }

    #[test]
    fn board_fills_before_pocket() {
        let id = pack_many(add_card_flush_suit, &[1, 2, 3, 4, 1, 2, 3]);
        let slots = Slots::unpack(id);
        assert_eq!(slots.n_board(), 5);
        assert_eq!(slots.n_pocket(), 2);
    }

    #[test]
    fn skip_lands_on_the_board() {
        let id = add_card_flush_suit(0, 0);
        let slots = Slots::unpack(id);
        assert_eq!(slots.board[0], SKIP);
        assert_eq!(count_cards(id), 1);

        let two = add_card_flush_suit(id, 0);
        assert_eq!(Slots::unpack(two).board, [SKIP, SKIP, 0, 0, 0]);
    }

    #[test]
    fn flush_rank_translates_by_reference_suit() {
        // ace of spades is suited under suit 4, stored as rank+1 = 14
        let id = add_card_flush_rank_4(0, 52);
        assert_eq!(Slots::unpack(id).board[0], 14);
        // ace of hearts is not, stored as ANY_CARD
        let id = add_card_flush_rank_4(0, 51);
        assert_eq!(Slots::unpack(id).board[0], ANY_CARD);
    }

    #[test]
    fn flush_rank_rejects_duplicate_rank() {
        let id = add_card_flush_rank_4(0, 4); // 2s
        assert_eq!(add_card_flush_rank_4(id, 4), 0);
        // duplicate off-suit cards are fine, they are all ANY_CARD
        let id = add_card_flush_rank_4(id, 1);
        assert_ne!(add_card_flush_rank_4(id, 5), 0);
    }

    #[test]
    fn flush_rank_prunes_dead_boards() {
        // a 4-card board with two suited cards survives
        let id = pack_many(add_card_flush_rank_4, &[4, 8, 1, 5]);
        assert_eq!(count_cards(id), 4);

        // with only one suited card it is rejected at the 4th card
        let one_suited = pack_many(add_card_flush_rank_4, &[4, 1, 5]);
        assert_eq!(add_card_flush_rank_4(one_suited, 9), 0);

        // a 5-card board with only two suited cards is dead
        assert_eq!(add_card_flush_rank_4(id, 9), 0);
    }

    #[test]
    fn flush_rank_prunes_unsuited_pockets() {
        // suited board 2s 3s 4s 5s 6s, then pocket cards
        let board = pack_many(add_card_flush_rank_4, &[4, 8, 12, 16, 20]);
        // three off-suit pocket cards leave no room for two suited ones
        let pocket2 = pack_many(add_card_flush_rank_4, &[4, 8, 12, 16, 20, 1, 5]);
        assert_eq!(add_card_flush_rank_4(pocket2, 9), 0);
        // two off-suit plus one suited still survives at three
        let mixed = pack_many(add_card_flush_rank_4, &[4, 8, 12, 16, 20, 1, 24]);
        assert_ne!(add_card_flush_rank_4(mixed, 5), 0);
        // but a fourth off-suit pocket card kills it
        let three_off = add_card_flush_rank_4(add_card_flush_rank_4(board, 24), 1);
        let three_off = add_card_flush_rank_4(three_off, 5);
        assert_ne!(three_off, 0);
        assert_eq!(add_card_flush_rank_4(three_off, 9), 0);
    }

    #[test]
    fn no_flush_caps_rank_multiplicity() {
        // four deuces across board
        let id = pack_many(add_card_no_flush, &[1, 2, 3, 4]);
        // a fifth card of rank 2 is impossible in a real deck; the space
        // still rejects it structurally
        assert_eq!(add_card_no_flush(id, 1), 0);
        assert_ne!(add_card_no_flush(id, 5), 0);
    }

    #[test]
    fn generates_flush_suit_space() {
        let ids = generate_ids(100_000, add_card_flush_suit);

        // sorted, unique, empty prefix first
        assert_eq!(ids[0], 0);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));

        // one-card prefixes: four suits plus the undealt marker
        assert_eq!(ids.iter().filter(|&&id| count_cards(id) == 1).count(), 5);
        // two-card prefixes: multisets of two over {1,2,3,4,SKIP}
        assert_eq!(ids.iter().filter(|&&id| count_cards(id) == 2).count(), 15);

        // successor closure on a sample: every accepted append of a
        // sub-9-card prefix is itself in the list
        for &id in ids.iter().step_by(97) {
            if count_cards(id) >= 8 {
                continue;
            }
            for card in 1..=CARD_COUNT {
                let next = add_card_flush_suit(id, card);
                assert!(ids.binary_search(&next).is_ok(), "successor of {} missing", id);
            }
        }
    }
}
