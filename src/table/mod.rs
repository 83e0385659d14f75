//! Transposition Table Module
//!
//! A bounded mapping from serialized board state to the best remaining-depth
//! budget seen for that state. Two phases reuse the same structure with
//! different update policies:
//!
//! - **Planning**: presence-only de-duplication while growing the frontier
//!   (one instance owned by the planner, discarded after planning).
//! - **Search**: budget comparison while pruning the bounded depth-first
//!   search (one fresh instance per rank, primed with every frontier state).
//!
//! Capacity is a hard ceiling: once reached, new states are silently not
//! inserted. That degrades pruning, never correctness — an omitted entry only
//! costs redundant work. Instances are never shared across ranks and are
//! touched by a single logical thread of control.

pub mod transposition;

#[cfg(test)]
mod tests;

pub use transposition::{TranspositionTable, DEFAULT_CAPACITY};
