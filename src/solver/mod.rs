//! Distributed Coordinator Module
//!
//! Drives the multi-round distributed search across the fleet.
//!
//! ## Protocol Overview
//! 1. **Planning**: The coordinator rank (the last rank) grows a frontier of
//!    independent search roots and broadcasts it with an initial verdict
//!    (already-solved starts and solutions found while planning short-circuit
//!    here).
//! 2. **Priming**: Every rank seeds a fresh transposition table with each
//!    frontier state at the maximum depth budget, so no rank re-explores
//!    another rank's root subtree.
//! 3. **Rounds**: For each depth ceiling, every rank runs bounded depth-first
//!    search over its round-robin share of the frontier, reports its local
//!    result to the coordinator, and receives the reduced global verdict by
//!    broadcast.
//! 4. **Assembly**: The winning rank ships its continuation path to the
//!    coordinator, which prepends the frontier prefix path it retained from
//!    planning.
//!
//! ## Submodules
//! - **`protocol`**: Wire records and message conventions of the phases above.
//! - **`dfs`**: The bounded depth-first search with transposition pruning.
//! - **`service`**: The per-rank round loop, reduction and assembly.

pub mod dfs;
pub mod protocol;
pub mod service;


pub use protocol::TaskRecord;
pub use service::{Solution, SolverConfig, SolverService};
