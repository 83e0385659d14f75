use crate::puzzle::{Board, Move};
use crate::table::TranspositionTable;

use anyhow::Result;
use std::fmt;

/// Error returned when expansion is invoked with zero pending nodes.
///
/// This is a planning invariant violation: the frontier can only drain
/// completely if every reachable state was expanded without meeting the
/// target size, which the solved short-circuit makes unreachable for real
/// starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyFrontier;

impl fmt::Display for EmptyFrontier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frontier expansion invoked with zero pending nodes")
    }
}

impl std::error::Error for EmptyFrontier {}

/// A breadth-first-expanded state paired with its depth from the root, used
/// as an independent search root by the solver.
#[derive(Debug, Clone)]
pub struct FrontierNode {
    pub board: Board,
    pub depth: i32,
}

/// Insertion-ordered frontier buffer: nodes plus the parallel sequence of
/// move paths from the root.
///
/// Removal is swap-with-last-and-pop, so insertion order does not survive
/// removals. Selection therefore always rescans for the minimum depth rather
/// than trusting buffer position.
#[derive(Debug, Default)]
pub struct FrontierSet {
    nodes: Vec<FrontierNode>,
    paths: Vec<Vec<Move>>,
}

impl FrontierSet {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, idx: usize) -> &FrontierNode {
        &self.nodes[idx]
    }

    pub fn path(&self, idx: usize) -> &[Move] {
        &self.paths[idx]
    }

    pub fn nodes(&self) -> &[FrontierNode] {
        &self.nodes
    }

    fn push(&mut self, node: FrontierNode, path: Vec<Move>) {
        self.nodes.push(node);
        self.paths.push(path);
    }

    fn swap_remove(&mut self, idx: usize) {
        self.nodes.swap_remove(idx);
        self.paths.swap_remove(idx);
    }

    /// Index of the first node whose depth equals the buffer-wide minimum.
    fn min_depth_index(&self) -> Option<usize> {
        let mut best: Option<(usize, i32)> = None;
        for (idx, node) in self.nodes.iter().enumerate() {
            match best {
                Some((_, depth)) if depth <= node.depth => {}
                _ => best = Some((idx, node.depth)),
            }
        }
        best.map(|(idx, _)| idx)
    }
}

/// Breadth-first frontier growth from a single start state.
///
/// Never invoked on an already-solved start; the solver special-cases that
/// before planning.
pub struct FrontierPlanner {
    target: usize,
    frontier: FrontierSet,
    table: TranspositionTable,
}

impl FrontierPlanner {
    /// Seeds the frontier with the root node (depth 0, empty path) and
    /// records the root state in the de-duplication table.
    pub fn new(start: &Board, target: usize, table_capacity: usize) -> Self {
        let mut table = TranspositionTable::new(table_capacity);
        table.store(*start.tiles(), 0);

        let mut frontier = FrontierSet::default();
        frontier.push(
            FrontierNode {
                board: start.clone(),
                depth: 0,
            },
            Vec::new(),
        );

        Self {
            target,
            frontier,
            table,
        }
    }

    /// Expands until the frontier holds at least the target number of nodes,
    /// or until a solved child surfaces — whichever comes first. On the
    /// short-circuit the solved child's full move path is returned and the
    /// child is left appended as the last frontier entry.
    ///
    /// At least one expansion always runs, so a start one move from solved
    /// short-circuits even with a target of 1.
    pub fn fill(&mut self) -> Result<Option<Vec<Move>>> {
        loop {
            if let Some(path) = self.expand_once()? {
                tracing::info!("Found solution while expanding the frontier");
                return Ok(Some(path));
            }
            if self.frontier.len() >= self.target {
                return Ok(None);
            }
        }
    }

    /// Expands the first minimum-depth node: appends every unseen child with
    /// its accumulated path, then swap-removes the expanded node.
    fn expand_once(&mut self) -> Result<Option<Vec<Move>>> {
        let idx = self.frontier.min_depth_index().ok_or(EmptyFrontier)?;
        let node = self.frontier.node(idx).clone();
        let path = self.frontier.path(idx).to_vec();

        for mv in node.board.valid_moves() {
            let mut child = node.board.clone();
            child.apply(mv)?;

            // Already reachable by an equal-or-shorter path.
            if self.table.probe(child.tiles()).is_some() {
                continue;
            }
            self.table.store(*child.tiles(), node.depth + 1);

            let mut child_path = path.clone();
            child_path.push(mv);
            let solved = child.is_solved();

            self.frontier.push(
                FrontierNode {
                    board: child,
                    depth: node.depth + 1,
                },
                child_path.clone(),
            );

            if solved {
                return Ok(Some(child_path));
            }
        }

        self.frontier.swap_remove(idx);
        Ok(None)
    }

    pub fn len(&self) -> usize {
        self.frontier.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frontier.is_empty()
    }

    pub fn frontier(&self) -> &FrontierSet {
        &self.frontier
    }

    /// Consumes the planner, dropping the de-duplication table and yielding
    /// the frontier for coordinator-side retention of the move paths.
    pub fn finish(self) -> FrontierSet {
        self.frontier
    }

    #[cfg(test)]
    pub(crate) fn frontier_mut(&mut self) -> &mut FrontierSet {
        &mut self.frontier
    }
}

#[cfg(test)]
impl FrontierSet {
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.paths.clear();
    }
}
