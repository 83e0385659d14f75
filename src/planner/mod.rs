//! Frontier Planner Module
//!
//! Turns a single start state into enough independent search roots to occupy
//! every rank in the fleet.
//!
//! ## Algorithm
//! The planner keeps the frontier as parallel vectors of nodes and move
//! paths. It repeatedly expands the first node at the current minimum depth
//! (true breadth-first order), de-duplicating children against a planner-owned
//! transposition table, and swap-removes the expanded node. Expansion stops as
//! soon as the frontier reaches the target size — or immediately, with the
//! winning path, if a solved child surfaces first.
//!
//! ## Ownership
//! The planner (and its table) lives on the coordinator rank only. After
//! planning, the nodes are serialized and broadcast to every rank while the
//! coordinator alone retains the per-node move paths for solution assembly.

pub mod frontier;

#[cfg(test)]
mod tests;

pub use frontier::{EmptyFrontier, FrontierNode, FrontierPlanner, FrontierSet};
