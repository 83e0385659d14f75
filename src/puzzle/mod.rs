//! Puzzle Board Module
//!
//! Models the R×C sliding-tile puzzle: the tile grid with its single empty
//! slot, the four slide directions, legal-move enumeration and in-place move
//! application.
//!
//! ## Invariants
//! - The tile sequence is always a permutation of `0..TILES` with exactly one
//!   empty tile (value 0).
//! - The empty-slot coordinates are cached so move validity is O(1) instead of
//!   a grid scan.
//! - A board is solved iff the sequence, excluding the final (empty) slot, is
//!   ascending.
//!
//! The raw tile bytes double as the hashing key for the transposition table
//! and as the cross-process wire representation of a state.

pub mod board;

#[cfg(test)]
mod tests;

pub use board::{Board, InvalidMove, Move, COLS, EMPTY, ROWS, TILES};
