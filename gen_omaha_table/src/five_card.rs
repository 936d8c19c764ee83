//! Five-card hand oracle.
//!
//! A Cactus-Kev style evaluator used at the terminal states of the table
//! build. Every five-card hand falls into one of 7462 equivalence classes
//! numbered 1 (royal flush) to 7462 (7-5-4-3-2 high card); lower is
//! stronger. The class tables are generated once at first use by walking
//! the classes in strength order and assigning consecutive numbers, then
//! converted to the table's ascending `category * 0x1000 + r` scale.
//!
//! Card codes follow the classic layout: rank prime in the low byte, rank
//! number in the second, a suit bit in bits 12..=15, and a rank bit in
//! bits 16..=28.

use lazy_static::lazy_static;

/// Category stride of the persisted score scale
pub const HAND_CATEGORY_OFFSET: i32 = 0x1000;

const HIGH_CARD: i32 = HAND_CATEGORY_OFFSET;
const PAIR: i32 = 2 * HAND_CATEGORY_OFFSET;
const TWO_PAIR: i32 = 3 * HAND_CATEGORY_OFFSET;
const THREE_OF_A_KIND: i32 = 4 * HAND_CATEGORY_OFFSET;
const STRAIGHT: i32 = 5 * HAND_CATEGORY_OFFSET;
const FLUSH: i32 = 6 * HAND_CATEGORY_OFFSET;
const FULL_HOUSE: i32 = 7 * HAND_CATEGORY_OFFSET;
const FOUR_OF_A_KIND: i32 = 8 * HAND_CATEGORY_OFFSET;
const STRAIGHT_FLUSH: i32 = 9 * HAND_CATEGORY_OFFSET;

/// Unique primes keyed by rank 0..=12 (deuce to ace)
const RANK_PRIMES: [u32; 13] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41];

/// Number of five-card equivalence classes
pub const CLASS_COUNT: u16 = 7462;

/// Highest five-bit rank mask plus one; sizes the mask-indexed tables
const MASK_TABLE_SIZE: usize = 7937;

lazy_static! {
    /// Global oracle instance, built on first use
    pub static ref FIVE_CARD: FiveCardOracle = FiveCardOracle::new();
}

pub struct FiveCardOracle {
    /// rank-mask indexed classes of flush hands, straight flushes included
    flushes: Vec<u16>,
    /// rank-mask indexed classes of no-pair hands, zero elsewhere
    unique5: Vec<u16>,
    /// sorted prime products of paired hands and their classes
    products: Vec<u32>,
    values: Vec<u16>,
    /// card codes by [rank 1..=13][suit 1..=4]; row and column 0 are zero
    card_codes: [[u32; 5]; 14],
}

/// The ten straight rank masks, ace-high first, wheel last.
fn straight_masks() -> [u16; 10] {
    let mut masks = [0u16; 10];
    for (i, hi) in (4..=12).rev().enumerate() {
        masks[i] = 0x1F << (hi - 4);
    }
    masks[9] = 0x100F; // A-5-4-3-2
    masks
}

impl FiveCardOracle {
    fn new() -> Self {
        let mut flushes = vec![0u16; MASK_TABLE_SIZE];
        let mut unique5 = vec![0u16; MASK_TABLE_SIZE];
        let mut paired: Vec<(u32, u16)> = Vec::with_capacity(4888);
        let mut class: u16 = 0;
        let mut next = || {
            class += 1;
            class
        };

        let straights = straight_masks();
        // every five-rank mask that is not a straight, best first; numeric
        // order on masks is strength order for unpaired ranks
        let kickers: Vec<u16> = (0..MASK_TABLE_SIZE as u16)
            .rev()
            .filter(|m| m.count_ones() == 5 && !straights.contains(m))
            .collect();

        for &m in &straights {
            flushes[m as usize] = next();
        }
        for quad in (0..13).rev() {
            for kicker in (0..13).rev() {
                if kicker != quad {
                    paired.push((RANK_PRIMES[quad].pow(4) * RANK_PRIMES[kicker], next()));
                }
            }
        }
        for trips in (0..13).rev() {
            for pair in (0..13).rev() {
                if pair != trips {
                    paired.push((RANK_PRIMES[trips].pow(3) * RANK_PRIMES[pair].pow(2), next()));
                }
            }
        }
        for &m in &kickers {
            flushes[m as usize] = next();
        }
        for &m in &straights {
            unique5[m as usize] = next();
        }
        for trips in (0..13).rev() {
            for k1 in (0..13).rev() {
                if k1 == trips {
                    continue;
                }
                for k2 in (0..k1).rev() {
                    if k2 == trips {
                        continue;
                    }
                    paired.push((
                        RANK_PRIMES[trips].pow(3) * RANK_PRIMES[k1] * RANK_PRIMES[k2],
                        next(),
                    ));
                }
            }
        }
        for p1 in (0..13).rev() {
            for p2 in (0..p1).rev() {
                for kicker in (0..13).rev() {
                    if kicker != p1 && kicker != p2 {
                        paired.push((
                            RANK_PRIMES[p1].pow(2) * RANK_PRIMES[p2].pow(2) * RANK_PRIMES[kicker],
                            next(),
                        ));
                    }
                }
            }
        }
        for pair in (0..13).rev() {
            for k1 in (0..13).rev() {
                if k1 == pair {
                    continue;
                }
                for k2 in (0..k1).rev() {
                    if k2 == pair {
                        continue;
                    }
                    for k3 in (0..k2).rev() {
                        if k3 == pair {
                            continue;
                        }
                        paired.push((
                            RANK_PRIMES[pair].pow(2)
                                * RANK_PRIMES[k1]
                                * RANK_PRIMES[k2]
                                * RANK_PRIMES[k3],
                            next(),
                        ));
                    }
                }
            }
        }
        for &m in &kickers {
            unique5[m as usize] = next();
        }
        assert_eq!(class, CLASS_COUNT, "class enumeration is exhaustive");

        paired.sort_unstable_by_key(|&(product, _)| product);
        let products = paired.iter().map(|&(product, _)| product).collect();
        let values = paired.iter().map(|&(_, value)| value).collect();

        let mut card_codes = [[0u32; 5]; 14];
        for rank in 1..14u32 {
            for suit in 1..5u32 {
                card_codes[rank as usize][suit as usize] = RANK_PRIMES[(rank - 1) as usize]
                    | ((rank - 1) << 8)
                    | (1 << (suit + 11))
                    | (1 << (16 + (rank - 1)));
            }
        }

        Self {
            flushes,
            unique5,
            products,
            values,
            card_codes,
        }
    }

    /// Code of a card given by rank 1..=13 and suit 1..=4.
    pub fn card_code(&self, rank: u8, suit: u8) -> u32 {
        self.card_codes[usize::from(rank)][usize::from(suit)]
    }

    /// Class of a flush over a five-bit rank mask.
    pub fn flush_class(&self, rank_mask: u16) -> u16 {
        self.flushes[usize::from(rank_mask)]
    }

    /// Class of five card codes assuming no flush is present.
    pub fn no_flush_class(&self, c: [u32; 5]) -> u16 {
        let mask = (c[0] | c[1] | c[2] | c[3] | c[4]) >> 16;
        let class = self.unique5[mask as usize];
        if class != 0 {
            return class;
        }
        let product =
            (c[0] & 0xFF) * (c[1] & 0xFF) * (c[2] & 0xFF) * (c[3] & 0xFF) * (c[4] & 0xFF);
        match self.products.binary_search(&product) {
            Ok(i) => self.values[i],
            Err(_) => panic!("no five-card class for prime product {}", product),
        }
    }

    /// Class of five card codes, flushes included.
    pub fn class(&self, c: [u32; 5]) -> u16 {
        if c[0] & c[1] & c[2] & c[3] & c[4] & 0xF000 != 0 {
            let mask = (c[0] | c[1] | c[2] | c[3] | c[4]) >> 16;
            self.flushes[mask as usize]
        } else {
            self.no_flush_class(c)
        }
    }
}

/// Converts a five-card class to the persisted score scale: ascending,
/// category in the high bits, rank within the category in the low twelve.
pub fn class_to_rank(class: u16) -> i32 {
    let r = 7463 - i32::from(class);
    if r < 1278 {
        r + HIGH_CARD
    } else if r < 4138 {
        r - 1277 + PAIR
    } else if r < 4996 {
        r - 4137 + TWO_PAIR
    } else if r < 5854 {
        r - 4995 + THREE_OF_A_KIND
    } else if r < 5864 {
        r - 5853 + STRAIGHT
    } else if r < 7141 {
        r - 5863 + FLUSH
    } else if r < 7297 {
        r - 7140 + FULL_HOUSE
    } else if r < 7453 {
        r - 7296 + FOUR_OF_A_KIND
    } else {
        r - 7452 + STRAIGHT_FLUSH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(rank: u8, suit: u8) -> u32 {
        FIVE_CARD.card_code(rank, suit)
    }

    #[test]
    fn royal_flush_is_class_one() {
        // T J Q K A of one suit: ranks 9..=13
        let mask: u16 = 0x1F00;
        assert_eq!(FIVE_CARD.flush_class(mask), 1);
        assert_eq!(class_to_rank(1), STRAIGHT_FLUSH + 10);
    }

    #[test]
    fn wheel_straight_flush_is_class_ten() {
        assert_eq!(FIVE_CARD.flush_class(0x100F), 10);
        assert_eq!(class_to_rank(10), STRAIGHT_FLUSH + 1);
    }

    #[test]
    fn worst_high_card_is_last_class() {
        // 7 5 4 3 2 unsuited
        let c = [code(6, 1), code(4, 2), code(3, 3), code(2, 4), code(1, 1)];
        assert_eq!(FIVE_CARD.no_flush_class(c), CLASS_COUNT);
        assert_eq!(class_to_rank(CLASS_COUNT), HIGH_CARD + 1);
    }

    #[test]
    fn quad_aces_beat_quad_kings() {
        let aces = [code(13, 1), code(13, 2), code(13, 3), code(13, 4), code(12, 1)];
        let kings = [code(12, 1), code(12, 2), code(12, 3), code(12, 4), code(13, 1)];
        let a = FIVE_CARD.no_flush_class(aces);
        let k = FIVE_CARD.no_flush_class(kings);
        assert!(a < k);
        assert!(class_to_rank(a) > class_to_rank(k));
        assert_eq!(class_to_rank(a) >> 12, 8);
    }

    #[test]
    fn category_scale_is_monotone_in_class() {
        let mut last = i32::MAX;
        for class in 1..=CLASS_COUNT {
            let rank = class_to_rank(class);
            assert!(rank < last, "class {} does not decrease", class);
            last = rank;
        }
        assert_eq!(class_to_rank(CLASS_COUNT), HIGH_CARD + 1);
    }

    #[test]
    fn class_populations_over_the_whole_deck() {
        // deck-wide category counts of all C(52,5) hands
        let mut counts = [0u64; 10];
        let mut seen = vec![false; usize::from(CLASS_COUNT) + 1];
        let deck: Vec<u32> = (0..52)
            .map(|c| code(c / 4 + 1, c % 4 + 1))
            .collect();
        for a in 0..48 {
            for b in (a + 1)..49 {
                for c in (b + 1)..50 {
                    for d in (c + 1)..51 {
                        for e in (d + 1)..52 {
                            let class = FIVE_CARD
                                .class([deck[a], deck[b], deck[c], deck[d], deck[e]]);
                            seen[usize::from(class)] = true;
                            counts[(class_to_rank(class) >> 12) as usize] += 1;
                        }
                    }
                }
            }
        }
        assert_eq!(counts[9], 40); // straight flush
        assert_eq!(counts[8], 624); // four of a kind
        assert_eq!(counts[7], 3_744); // full house
        assert_eq!(counts[6], 5_108); // flush
        assert_eq!(counts[5], 10_200); // straight
        assert_eq!(counts[4], 54_912); // three of a kind
        assert_eq!(counts[3], 123_552); // two pair
        assert_eq!(counts[2], 1_098_240); // one pair
        assert_eq!(counts[1], 1_302_540); // high card
        assert!(seen[1..].iter().all(|&s| s), "every class is reachable");
    }
}
