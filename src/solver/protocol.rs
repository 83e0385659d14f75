//! Search Protocol Definitions
//!
//! Defines the records exchanged between ranks during the search phases, and
//! the conventions they obey.
//!
//! ## Message conventions
//! - **Frontier transfer** (`Tag::Frontier`): one broadcast carrying the flat
//!   `Vec<TaskRecord>`; each record is fixed-size (tile bytes plus a signed
//!   depth), and the encoded vector carries its own length.
//! - **Verdicts** (`Tag::Verdict`): a single `i64`, either a valid frontier
//!   index or the sentinel. Broadcast once after planning and once per round.
//! - **Round reports** (`Tag::RoundReport`): a single `i64` per worker per
//!   round, index or sentinel, sent point-to-point to the coordinator.
//! - **Solution transfer** (`Tag::SolutionLen` then `Tag::SolutionMoves`):
//!   the continuation length (`u64`) followed by the move values
//!   (`Vec<Move>`), point-to-point from the winning rank to the coordinator.
//!   Both ends use the same two tags and element types; the length message is
//!   a cross-check of the payload.
//!
//! The sentinel equals the total frontier count, so it is derived from the
//! frontier broadcast rather than transmitted separately.

use crate::planner::FrontierNode;
use crate::puzzle::{Board, TILES};

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Fixed-size wire form of one frontier node: the tile bytes and the node's
/// depth from the root. The move path deliberately stays behind on the
/// coordinator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TaskRecord {
    pub tiles: [u8; TILES],
    pub depth: i32,
}

impl TaskRecord {
    pub fn from_node(node: &FrontierNode) -> Self {
        Self {
            tiles: *node.board.tiles(),
            depth: node.depth,
        }
    }

    pub fn board(&self) -> Result<Board> {
        Board::from_tiles(self.tiles)
    }
}

/// "Not found this round": the designated sentinel is the total frontier
/// count, one past the largest valid index.
pub fn sentinel(frontier_len: usize) -> i64 {
    frontier_len as i64
}
