//! Exhaustive cross-check of a generated table.
//!
//! Walks every sorted 7-, 8- and 9-card combination of the deck, scoring
//! each through the generated array and through a pre-existing 7-card
//! reference table, and stops at the first disagreement. The reference
//! score is the maximum over the six pocket pairs and the legal board
//! triples of a five-card path through the reference array.
//!
//! The chase offsets for the flush-suit and no-flush automata are carried
//! down the loop nest one card at a time, and the reference board paths
//! are hoisted above the pocket loops, so each of the ~4.5 billion
//! combinations costs only a handful of loads.

use log::info;
use thiserror::Error;

use crate::eval::{BOARD_PERMS, POCKET_PERMS};

/// Combination counts per sweep: C(52,7), C(52,8), C(52,9)
const COMBINATIONS: [u64; 3] = [133_784_560, 752_538_150, 3_679_075_400];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerifyError {
    #[error(
        "score mismatch for cards {cards:?}: reference {reference}, table {table}"
    )]
    Mismatch {
        cards: [u8; 9],
        reference: i32,
        table: i32,
    },
}

/// Verifies `hand_ranks` against a 7-card reference table over all 7-, 8-
/// and 9-card combinations.
pub fn verify_against_reference(hand_ranks: &[i32], reference: &[i32]) -> Result<(), VerifyError> {
    let hr = hand_ranks;
    let old = reference;

    for k in 0..3usize {
        info!("checking all {}-card sorted combinations", 7 + k);
        let n_board_perms = [1, 4, 10][k];
        let mut checked: u64 = 0;

        // c0 and c1 are pinned to zero for the shorter sweeps; the zeros
        // drive every automaton through its undealt-board columns
        let (c0_first, c0_last) = if k == 2 { (1, 52) } else { (0, 0) };
        for c0 in c0_first..=c0_last {
            let fs0 = hr[106 + c0] as usize;
            let nf0 = hr[hr[0] as usize + 53 + c0] as usize;
            let (c1_first, c1_last) = if k == 0 { (0, 0) } else { (c0 + 1, 52) };
            for c1 in c1_first..=c1_last {
                let fs1 = hr[fs0 + c1] as usize;
                let nf1 = hr[nf0 + c1] as usize;
                for c2 in (c1 + 1)..=52 {
                    let fs2 = hr[fs1 + c2] as usize;
                    let nf2 = hr[nf1 + c2] as usize;
                    for c3 in (c2 + 1)..=52 {
                        let fs3 = hr[fs2 + c3] as usize;
                        let nf3 = hr[nf2 + c3] as usize;
                        for c4 in (c3 + 1)..=52 {
                            let fs4 = hr[fs3 + c4] as usize;
                            let nf4 = hr[nf3 + c4] as usize;

                            // 5-card reference paths over the board part
                            let head = [c0, c1, c2, c3, c4];
                            let mut board_paths = [0usize; 10];
                            for (path, perm) in board_paths
                                .iter_mut()
                                .zip(BOARD_PERMS.iter())
                                .take(n_board_perms)
                            {
                                *path = old[old[old[53 + head[2 - k + perm[0]]] as usize
                                    + head[2 - k + perm[1]]]
                                    as usize
                                    + head[2 - k + perm[2]]]
                                    as usize;
                            }

                            for c5 in (c4 + 1)..=52 {
                                let fs5 = hr[fs4 + c5] as usize;
                                let nf5 = hr[nf4 + c5] as usize;
                                for c6 in (c5 + 1)..=52 {
                                    let fs6 = hr[fs5 + c6] as usize;
                                    let nf6 = hr[nf5 + c6] as usize;
                                    for c7 in (c6 + 1)..=52 {
                                        let fs7 = hr[fs6 + c7] as usize;
                                        let nf7 = hr[nf6 + c7] as usize;
                                        for c8 in (c7 + 1)..=52 {
                                            let suit = hr[fs7 + c8];
                                            let mut table_score = hr[nf7 + c8];
                                            if suit != 0 {
                                                let shift = (4 - suit) as usize;
                                                let mut path = hr[1] as usize + 56;
                                                for &c in
                                                    &[c0, c1, c2, c3, c4, c5, c6, c7, c8]
                                                {
                                                    path = hr[path + c + shift] as usize;
                                                }
                                                table_score = table_score.max(path as i32);
                                            }

                                            let pocket = [c5, c6, c7, c8];
                                            let mut reference_score = 0i32;
                                            for pocket_perm in &POCKET_PERMS {
                                                for &path in
                                                    board_paths.iter().take(n_board_perms)
                                                {
                                                    let score = old[old[old
                                                        [path + pocket[pocket_perm[0]]]
                                                        as usize
                                                        + pocket[pocket_perm[1]]]
                                                        as usize];
                                                    reference_score =
                                                        reference_score.max(score);
                                                }
                                            }

                                            if table_score != reference_score {
                                                let cards = [
                                                    c0 as u8, c1 as u8, c2 as u8, c3 as u8,
                                                    c4 as u8, c5 as u8, c6 as u8, c7 as u8,
                                                    c8 as u8,
                                                ];
                                                return Err(VerifyError::Mismatch {
                                                    cards,
                                                    reference: reference_score,
                                                    table: table_score,
                                                });
                                            }
                                            checked += 1;
                                            if checked % 100_000_000 == 0 {
                                                info!(
                                                    "{} / {} combinations verified",
                                                    checked, COMBINATIONS[k]
                                                );
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
        info!("{} / {} combinations verified", checked, COMBINATIONS[k]);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatch_reports_all_nine_cards() {
        let err = VerifyError::Mismatch {
            cards: [0, 0, 3, 7, 12, 19, 25, 33, 48],
            reference: 20491,
            table: 16400,
        };
        let message = err.to_string();
        assert!(message.contains("[0, 0, 3, 7, 12, 19, 25, 33, 48]"));
        assert!(message.contains("20491"));
        assert!(message.contains("16400"));
    }
}
