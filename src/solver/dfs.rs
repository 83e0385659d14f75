use crate::puzzle::{Board, Move};
use crate::table::TranspositionTable;

use anyhow::Result;

/// Bounded depth-first search from `board` with `budget` remaining moves.
///
/// On success the winning continuation is left in `path` (whatever prefix the
/// caller passed in is preserved); on failure `path` is restored to its
/// incoming state. Children whose table entry already records an equal or
/// larger remaining budget are skipped — they cannot improve on a previously
/// explored line — otherwise their entry is recorded or raised before
/// recursing.
///
/// Recursion depth is bounded by the budget, which never exceeds the
/// configured maximum search depth.
pub fn bounded_dfs(
    board: &Board,
    budget: i32,
    table: &mut TranspositionTable,
    path: &mut Vec<Move>,
) -> Result<bool> {
    if board.is_solved() {
        return Ok(true);
    }
    if budget <= 0 {
        return Ok(false);
    }

    for mv in board.valid_moves() {
        let mut child = board.clone();
        child.apply(mv)?;

        let child_budget = budget - 1;
        if let Some(stored) = table.probe(child.tiles()) {
            if stored >= child_budget {
                continue;
            }
        }
        table.store(*child.tiles(), child_budget);

        path.push(mv);
        if bounded_dfs(&child, child_budget, table, path)? {
            return Ok(true);
        }
        path.pop();
    }

    Ok(false)
}
