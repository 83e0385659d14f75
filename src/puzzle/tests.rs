//! Puzzle Module Tests
//!
//! Validates the board invariants and the move model.
//!
//! ## Test Scopes
//! - **Invariants**: The tile sequence stays a permutation with exactly one
//!   empty slot through arbitrary valid moves.
//! - **Moves**: Validity enumeration, inverse round trips, failure on
//!   out-of-bounds slides.
//! - **Serialization**: Bit-exact tile round trip.

use crate::puzzle::{Board, InvalidMove, Move, COLS, EMPTY, ROWS, TILES};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn assert_is_permutation(board: &Board) {
    let mut seen = [false; TILES];
    for &tile in board.tiles() {
        assert!((tile as usize) < TILES, "tile {} out of range", tile);
        assert!(!seen[tile as usize], "tile {} appears twice", tile);
        seen[tile as usize] = true;
    }
}

#[test]
fn test_default_board_is_solved() {
    let board = Board::default();
    assert!(board.is_solved());
    assert_is_permutation(&board);
    assert_eq!(board.tiles()[TILES - 1], EMPTY);
}

#[test]
fn test_permutation_invariant_survives_moves() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut board = Board::default();
    for _ in 0..500 {
        board.shuffle(&mut rng, 1);
        assert_is_permutation(&board);
        let zeros = board.tiles().iter().filter(|&&t| t == EMPTY).count();
        assert_eq!(zeros, 1, "exactly one empty tile expected");
    }
}

#[test]
fn test_move_inverse_round_trip() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut board = Board::default();
    board.shuffle(&mut rng, 100);

    for mv in board.valid_moves() {
        let snapshot = board.clone();
        board.apply(mv).expect("enumerated move must apply");
        board
            .apply(mv.inverse())
            .expect("inverse of a valid move must be valid");
        assert_eq!(board, snapshot, "{} then {} should restore", mv, mv.inverse());
    }
}

#[test]
fn test_valid_moves_always_apply() {
    let mut rng = StdRng::seed_from_u64(13);
    let mut board = Board::default();
    for _ in 0..200 {
        for mv in board.valid_moves() {
            let mut copy = board.clone();
            assert!(copy.apply(mv).is_ok(), "{} was enumerated but rejected", mv);
        }
        board.shuffle(&mut rng, 1);
    }
}

#[test]
fn test_invalid_move_is_rejected_and_harmless() {
    // Solved board: empty slot is bottom-right, so Right and Down fall off.
    let mut board = Board::default();
    assert_eq!(board.apply(Move::Right), Err(InvalidMove(Move::Right)));
    assert_eq!(board.apply(Move::Down), Err(InvalidMove(Move::Down)));
    assert!(board.is_solved(), "failed move must not mutate the board");
}

#[test]
fn test_corner_and_interior_move_counts() {
    let board = Board::default();
    // Bottom-right corner
    assert_eq!(board.valid_moves().len(), 2);

    // Center of a 3x3 grid: all four directions valid.
    let mut tiles = [0u8; TILES];
    let mut next = 1u8;
    for (i, tile) in tiles.iter_mut().enumerate() {
        if i != (ROWS / 2) * COLS + COLS / 2 {
            *tile = next;
            next += 1;
        }
    }
    let center = Board::from_tiles(tiles).unwrap();
    assert_eq!(center.valid_moves().len(), 4);
}

#[test]
fn test_tiles_round_trip_is_bit_exact() {
    let mut rng = StdRng::seed_from_u64(17);
    let mut board = Board::default();
    board.shuffle(&mut rng, 300);

    let restored = Board::from_tiles(*board.tiles()).unwrap();
    assert_eq!(restored, board);
    assert_eq!(restored.valid_moves(), board.valid_moves());
}

#[test]
fn test_from_tiles_rejects_board_without_empty() {
    let tiles = [1u8; TILES];
    assert!(Board::from_tiles(tiles).is_err());
}

#[test]
fn test_one_move_from_solved_scenario() {
    // Start state [1,2,3,4,5,6,7,0,8]: empty at row 2, col 1.
    let board = Board::from_tiles([1, 2, 3, 4, 5, 6, 7, 0, 8]).unwrap();
    assert!(!board.is_solved());
    assert_eq!(
        board.valid_moves(),
        vec![Move::Top, Move::Right, Move::Left]
    );

    let mut solved = board.clone();
    solved.apply(Move::Right).unwrap();
    assert_eq!(solved.tiles(), &[1, 2, 3, 4, 5, 6, 7, 8, 0]);
    assert!(solved.is_solved());
}

#[test]
fn test_shuffle_stays_solvable_by_replay() {
    // A shuffled board is reachable by legal moves, so replaying any solver
    // output must stay within the legal-move model. Spot-check by undoing a
    // recorded shuffle by hand.
    let mut board = Board::default();
    let script = [Move::Top, Move::Left, Move::Down, Move::Left, Move::Top];
    for mv in script {
        board.apply(mv).unwrap();
    }
    for mv in script.iter().rev() {
        board.apply(mv.inverse()).unwrap();
    }
    assert!(board.is_solved());
}

#[test]
fn test_display_renders_grid() {
    let rendered = Board::default().to_string();
    assert!(rendered.contains('|'));
    // One rule line per row plus the top rule.
    assert_eq!(rendered.matches('\n').count(), ROWS * 2 + 1);
    // Empty slot renders blank, not "0".
    assert!(!rendered.contains('0'));
}
