//! Planner Module Tests
//!
//! Validates frontier growth, de-duplication, breadth-first ordering and the
//! solved short-circuit.

use crate::planner::{EmptyFrontier, FrontierPlanner};
use crate::puzzle::{Board, Move, TILES};
use std::collections::HashSet;

/// A start a known distance from solved, built from a fixed move script so
/// tests stay deterministic.
fn scrambled_board() -> Board {
    let mut board = Board::default();
    let script = [
        Move::Top,
        Move::Left,
        Move::Top,
        Move::Left,
        Move::Down,
        Move::Right,
        Move::Down,
        Move::Left,
        Move::Top,
        Move::Right,
        Move::Top,
        Move::Left,
    ];
    for mv in script {
        board.apply(mv).unwrap();
    }
    assert!(!board.is_solved());
    board
}

#[test]
fn test_fill_reaches_target_size() {
    let mut planner = FrontierPlanner::new(&scrambled_board(), 24, 10_000);
    let solution = planner.fill().unwrap();
    assert!(solution.is_none(), "start is too far out to solve while planning");
    assert!(planner.len() >= 24);
}

#[test]
fn test_frontier_has_no_duplicate_states() {
    let mut planner = FrontierPlanner::new(&scrambled_board(), 64, 10_000);
    planner.fill().unwrap();

    let mut seen: HashSet<[u8; TILES]> = HashSet::new();
    for node in planner.frontier().nodes() {
        assert!(
            seen.insert(*node.board.tiles()),
            "two frontier nodes share a serialized state"
        );
    }
}

#[test]
fn test_frontier_depths_span_at_most_one_level() {
    // Strict breadth-first expansion never holds more than two adjacent
    // depth levels at once.
    let mut planner = FrontierPlanner::new(&scrambled_board(), 40, 10_000);
    planner.fill().unwrap();

    let depths: Vec<i32> = planner
        .frontier()
        .nodes()
        .iter()
        .map(|node| node.depth)
        .collect();
    let min = *depths.iter().min().unwrap();
    let max = *depths.iter().max().unwrap();
    assert!(max - min <= 1, "depth spread {}..{} breaks BFS order", min, max);
}

#[test]
fn test_paths_replay_to_their_nodes() {
    let start = scrambled_board();
    let mut planner = FrontierPlanner::new(&start, 32, 10_000);
    planner.fill().unwrap();

    let frontier = planner.finish();
    for idx in 0..frontier.len() {
        let mut replay = start.clone();
        for &mv in frontier.path(idx) {
            replay.apply(mv).unwrap();
        }
        assert_eq!(&replay, &frontier.node(idx).board);
        assert_eq!(frontier.path(idx).len() as i32, frontier.node(idx).depth);
    }
}

#[test]
fn test_one_move_start_short_circuits_with_target_one() {
    // [1,2,3,4,5,6,7,0,8] is one Right away from solved. Even with a target
    // of 1 the planner must expand once and surface the solution.
    let start = Board::from_tiles([1, 2, 3, 4, 5, 6, 7, 0, 8]).unwrap();
    let mut planner = FrontierPlanner::new(&start, 1, 10_000);

    let solution = planner.fill().unwrap();
    assert_eq!(solution, Some(vec![Move::Right]));

    // The solved child stays appended as the last frontier entry.
    let last = planner.len() - 1;
    assert!(planner.frontier().node(last).board.is_solved());
    assert_eq!(planner.frontier().path(last), &[Move::Right]);
}

#[test]
fn test_short_circuit_path_solves_the_start() {
    let mut board = Board::default();
    board.apply(Move::Top).unwrap();
    board.apply(Move::Left).unwrap();

    let mut planner = FrontierPlanner::new(&board, 1_000_000, 1_000_000);
    let solution = planner
        .fill()
        .unwrap()
        .expect("BFS must hit solved before exhausting the space");

    let mut replay = board;
    for mv in solution {
        replay.apply(mv).unwrap();
    }
    assert!(replay.is_solved());
}

#[test]
fn test_expansion_on_drained_frontier_is_an_error() {
    let mut planner = FrontierPlanner::new(&scrambled_board(), 8, 10_000);
    planner.frontier_mut().clear();

    let err = planner.fill().unwrap_err();
    assert!(
        err.downcast_ref::<EmptyFrontier>().is_some(),
        "expected EmptyFrontier, got: {}",
        err
    );
}
