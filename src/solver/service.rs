use super::dfs::bounded_dfs;
use super::protocol::{sentinel, TaskRecord};
use crate::fleet::{Endpoint, Fleet, Rank, Tag};
use crate::planner::{FrontierPlanner, FrontierSet};
use crate::puzzle::{Board, Move};
use crate::table::{TranspositionTable, DEFAULT_CAPACITY};

use anyhow::Result;

/// Tunables of one distributed run. Identical on every rank.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Hard ceiling on the total move count searched for.
    pub max_depth: i32,
    /// Minimum frontier size: roughly the rank count, scaled up for
    /// finer-grained partitioning.
    pub target_tasks: usize,
    /// Entry ceiling for each transposition table instance.
    pub table_capacity: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_depth: 40,
            target_tasks: 1000,
            table_capacity: DEFAULT_CAPACITY,
        }
    }
}

/// The assembled result: the winning frontier index and the full move
/// sequence from the original start state to a solved board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub task_index: usize,
    pub moves: Vec<Move>,
}

/// Coordinator-side planning result, before anything is broadcast.
struct Plan {
    records: Vec<TaskRecord>,
    verdict: i64,
    /// Retained only when the round loop will run; holds the per-node move
    /// paths needed for assembly.
    frontier: Option<FrontierSet>,
    /// Full solution path when planning itself already solved the puzzle.
    moves: Vec<Move>,
}

/// One rank's view of the distributed search.
///
/// Every rank constructs the service over its own fleet endpoint and calls
/// [`SolverService::run`]; only the coordinator rank (the last one) passes a
/// start board and receives the solution. All ranks return together — the
/// verdict broadcasts keep the fleet in lockstep.
pub struct SolverService<E: Endpoint> {
    fleet: Fleet<E>,
    config: SolverConfig,
}

impl<E: Endpoint> SolverService<E> {
    pub fn new(fleet: Fleet<E>, config: SolverConfig) -> Self {
        Self { fleet, config }
    }

    /// The rank that plans, reduces and assembles: conventionally the last.
    pub fn coordinator(&self) -> Rank {
        self.fleet.size() - 1
    }

    pub fn is_coordinator(&self) -> bool {
        self.fleet.rank() == self.coordinator()
    }

    pub fn fleet_mut(&mut self) -> &mut Fleet<E> {
        &mut self.fleet
    }

    /// Runs the full protocol on this rank. Returns `Some` on the
    /// coordinator when a solution was found, `None` on every other rank and
    /// on budget exhaustion.
    pub fn run(&mut self, start: Option<Board>) -> Result<Option<Solution>> {
        let me = self.fleet.rank();
        let coordinator = self.coordinator();

        // Phase 1: plan on the coordinator, then share frontier + verdict.
        let plan = if me == coordinator {
            tracing::info!("Fleet size: {}", self.fleet.size());
            let board = start
                .ok_or_else(|| anyhow::anyhow!("coordinator rank needs a start board"))?;
            Some(self.plan(&board)?)
        } else {
            None
        };

        let (coordinator_records, coordinator_verdict, frontier, planned_moves) = match plan {
            Some(plan) => (
                Some(plan.records),
                Some(plan.verdict),
                plan.frontier,
                plan.moves,
            ),
            None => (None, None, None, Vec::new()),
        };

        let records: Vec<TaskRecord> =
            self.fleet
                .broadcast(coordinator, Tag::Frontier, coordinator_records)?;
        let initial_verdict: i64 =
            self.fleet
                .broadcast(coordinator, Tag::Verdict, coordinator_verdict)?;

        let not_found = sentinel(records.len());
        if initial_verdict != not_found {
            // Solved at or before planning; the coordinator already holds the
            // whole path and no rank ever searched.
            return Ok((me == coordinator).then(|| Solution {
                task_index: initial_verdict as usize,
                moves: planned_moves,
            }));
        }

        // Phase 2: prime a fresh table so no rank re-explores another rank's
        // root subtree. Budgets in play never exceed max_depth, so this can
        // only suppress redundant work, never the winning line: each frontier
        // state is still checked as a search root by its owning rank.
        let mut table = TranspositionTable::new(self.config.table_capacity);
        for record in &records {
            table.store(record.tiles, self.config.max_depth);
        }

        // Phase 3: per-depth rounds.
        let min_depth = records.iter().map(|r| r.depth).min().unwrap_or(0);
        let mut continuation: Vec<Move> = Vec::with_capacity(self.config.max_depth as usize);
        let mut verdict = not_found;

        for depth in (min_depth + 1)..=self.config.max_depth {
            if me == coordinator {
                tracing::info!("Searching with depth ceiling {}", depth);
            }

            let local = self.local_round(&records, depth, &mut table, &mut continuation)?;

            verdict = if me == coordinator {
                let mut reports = Vec::with_capacity(coordinator);
                for rank in 0..coordinator {
                    reports.push(self.fleet.recv(rank, Tag::RoundReport)?);
                }
                let reduced = fold_reports(local, reports, not_found);
                self.fleet
                    .broadcast(coordinator, Tag::Verdict, Some(reduced))?
            } else {
                self.fleet.send(coordinator, Tag::RoundReport, &local)?;
                self.fleet.broadcast(coordinator, Tag::Verdict, None)?
            };

            if verdict != not_found {
                break;
            }
        }

        if verdict == not_found {
            if me == coordinator {
                tracing::info!("No solution within depth budget {}", self.config.max_depth);
            }
            return Ok(None);
        }

        // Phase 4: assembly.
        self.assemble(verdict as usize, &records, frontier, &continuation)
    }

    /// Grows the frontier, short-circuiting on already-solved starts (the
    /// planner is never invoked on one) and on solutions surfacing during
    /// expansion.
    fn plan(&self, start: &Board) -> Result<Plan> {
        if start.is_solved() {
            tracing::info!("Start board is already solved");
            return Ok(Plan {
                records: vec![TaskRecord {
                    tiles: *start.tiles(),
                    depth: 0,
                }],
                verdict: 0,
                frontier: None,
                moves: Vec::new(),
            });
        }

        let mut planner = FrontierPlanner::new(
            start,
            self.config.target_tasks,
            self.config.table_capacity,
        );
        let planned = planner.fill()?;
        let frontier = planner.finish();
        let records: Vec<TaskRecord> = frontier.nodes().iter().map(TaskRecord::from_node).collect();
        tracing::info!("Frontier ready: {} search roots", records.len());

        match planned {
            Some(moves) => Ok(Plan {
                // The solved child is the last appended frontier entry.
                verdict: records.len() as i64 - 1,
                records,
                frontier: None,
                moves,
            }),
            None => Ok(Plan {
                verdict: sentinel(records.len()),
                records,
                frontier: Some(frontier),
                moves: Vec::new(),
            }),
        }
    }

    /// Bounded search over this rank's round-robin share of the frontier.
    /// Returns the winning index, or the sentinel; on a win the continuation
    /// path is left in `continuation` and the rest of the share is skipped
    /// for this round.
    pub(crate) fn local_round(
        &mut self,
        records: &[TaskRecord],
        depth: i32,
        table: &mut TranspositionTable,
        continuation: &mut Vec<Move>,
    ) -> Result<i64> {
        let me = self.fleet.rank();
        let size = self.fleet.size();
        tracing::debug!(
            "Rank {} owns {} of {} frontier roots",
            me,
            assigned_indices(me, size, records.len()).count(),
            records.len()
        );

        for idx in assigned_indices(me, size, records.len()) {
            continuation.clear();
            let board = records[idx].board()?;
            let budget = depth - records[idx].depth;
            if bounded_dfs(&board, budget, table, continuation)? {
                tracing::info!("Rank {} solved frontier node {} at depth {}", me, idx, depth);
                return Ok(idx as i64);
            }
        }
        Ok(sentinel(records.len()))
    }

    /// Concatenates the two path fragments: the frontier prefix retained by
    /// the coordinator and the continuation held by the winning rank.
    fn assemble(
        &mut self,
        winning_index: usize,
        records: &[TaskRecord],
        frontier: Option<FrontierSet>,
        continuation: &[Move],
    ) -> Result<Option<Solution>> {
        let me = self.fleet.rank();
        let size = self.fleet.size();
        let coordinator = self.coordinator();
        let owner = winning_index % size;

        if me == coordinator {
            let frontier = frontier
                .ok_or_else(|| anyhow::anyhow!("coordinator lost the planned frontier"))?;
            anyhow::ensure!(
                winning_index < records.len(),
                "verdict {} outside the frontier",
                winning_index
            );

            let mut moves = frontier.path(winning_index).to_vec();
            if owner == coordinator {
                moves.extend_from_slice(continuation);
            } else {
                let expected: u64 = self.fleet.recv(owner, Tag::SolutionLen)?;
                let shipped: Vec<Move> = self.fleet.recv(owner, Tag::SolutionMoves)?;
                anyhow::ensure!(
                    shipped.len() as u64 == expected,
                    "continuation length mismatch: announced {}, received {}",
                    expected,
                    shipped.len()
                );
                moves.extend(shipped);
            }

            tracing::info!(
                "Solution assembled: {} moves via frontier node {}",
                moves.len(),
                winning_index
            );
            Ok(Some(Solution {
                task_index: winning_index,
                moves,
            }))
        } else if me == owner {
            self.fleet
                .send(coordinator, Tag::SolutionLen, &(continuation.len() as u64))?;
            self.fleet
                .send(coordinator, Tag::SolutionMoves, &continuation.to_vec())?;
            Ok(None)
        } else {
            Ok(None)
        }
    }
}

/// Static round-robin partition: the indices this rank owns.
pub(crate) fn assigned_indices(
    rank: Rank,
    size: usize,
    frontier_len: usize,
) -> impl Iterator<Item = usize> {
    (rank..frontier_len).step_by(size.max(1))
}

/// Reduces round reports to one verdict: starting from the coordinator's own
/// result, scan worker reports in ascending rank order and keep the last
/// non-sentinel seen. Ties therefore go to the highest-ranked worker — a
/// deliberate, correctness-neutral choice, since any reported solution is
/// valid.
pub(crate) fn fold_reports(
    own: i64,
    reports: impl IntoIterator<Item = i64>,
    not_found: i64,
) -> i64 {
    let mut verdict = own;
    for report in reports {
        if report != not_found {
            verdict = report;
        }
    }
    verdict
}
