#![allow(clippy::too_many_arguments)]

//! # Omaha hand-ranks table generator
//!
//! Builds a perfect-hash lookup table that scores 7-, 8- and 9-card Omaha
//! hands in constant time. The table encodes three deterministic automata
//! in one flat `i32` array: one detecting the flush suit, one scoring
//! flushes in a reference suit, one scoring hands with suits ignored. A
//! query feeds nine card indexes through each automaton and composes the
//! results; the runtime side lives in the `omaha_evaluator` crate.
//!
//! Building happens in two phases. First, every reachable prefix of up to
//! eight cards is enumerated per automaton under a canonicalization that
//! collapses order-equivalent prefixes ([`ids`]). Second, each prefix gets
//! a block of transition offsets, with verdicts from the five-card oracle
//! inlined at the ninth card ([`linker`], [`eval`], [`five_card`]). A
//! generated table can be cross-checked exhaustively against a 7-card
//! reference table ([`verify`]).

pub mod eval;
pub mod five_card;
pub mod ids;
pub mod linker;
pub mod verify;

pub use linker::build_table;
pub use verify::{verify_against_reference, VerifyError};
