//! Distributed Sliding-Puzzle Solver Library
//!
//! This library crate defines the core modules that make up the distributed solver.
//! It serves as the foundation for the binary executable (`main.rs`).
//!
//! ## Architecture Modules
//! The system is composed of five loosely coupled subsystems:
//!
//! - **`puzzle`**: The board model. Tile grid, legal-move enumeration, in-place
//!   move application, solved test, shuffling and grid rendering.
//! - **`table`**: The transposition table. A capacity-capped map from serialized
//!   board state to the best remaining-depth budget seen, used to prune
//!   redundant re-exploration.
//! - **`planner`**: The frontier planner. Expands a single start state
//!   breadth-first into enough independent search roots to occupy every rank.
//! - **`fleet`**: The message-passing layer. Blocking rank-addressed
//!   send/receive, one-to-all broadcast and barrier, over in-process channels
//!   or a TCP mesh.
//! - **`solver`**: The distributed coordinator. Partitions frontier roots
//!   round-robin across ranks, runs bounded depth-first search per round,
//!   reduces per-rank reports to a global verdict and assembles the winning
//!   move sequence.

pub mod fleet;
pub mod planner;
pub mod puzzle;
pub mod solver;
pub mod table;
