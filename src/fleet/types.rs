use serde::{Deserialize, Serialize};

/// A rank's ordinal identity within the fleet: `0..size`, dense, assigned at
/// bootstrap. The coordinator is conventionally the last rank.
pub type Rank = usize;

/// Message purpose marker. Point-to-point receives match on `(source, tag)`,
/// so distinct phases of the protocol can never consume each other's frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tag {
    /// Mesh handshake: identifies the dialing rank (TCP endpoint only).
    Hello,
    /// Barrier arrive/release token.
    Barrier,
    /// Frontier record array, broadcast from the coordinator.
    Frontier,
    /// Round verdict (and the initial planning verdict), broadcast from the
    /// coordinator.
    Verdict,
    /// Per-round local result, worker to coordinator.
    RoundReport,
    /// Continuation-path length, winning rank to coordinator.
    SolutionLen,
    /// Continuation-path moves, winning rank to coordinator.
    SolutionMoves,
}

/// The wire record for inter-rank communication: source rank, purpose tag and
/// a bincode-encoded payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame {
    pub src: Rank,
    pub tag: Tag,
    pub payload: Vec<u8>,
}
