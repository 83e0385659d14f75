use anyhow::Result;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Grid dimensions. The whole crate is generic over these constants; a 4×4
/// build only needs to change them here.
pub const ROWS: usize = 3;
pub const COLS: usize = 3;
pub const TILES: usize = ROWS * COLS;

/// Tile value marking the empty slot.
pub const EMPTY: u8 = 0;

/// One of the four slide directions, named after where the *empty slot*
/// travels (equivalently: which neighboring tile slides into it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Move {
    Top,
    Right,
    Down,
    Left,
}

impl Move {
    /// Enumeration order is stable; `valid_moves` filters this list in place.
    pub const ALL: [Move; 4] = [Move::Top, Move::Right, Move::Down, Move::Left];

    pub fn inverse(self) -> Move {
        match self {
            Move::Top => Move::Down,
            Move::Right => Move::Left,
            Move::Down => Move::Top,
            Move::Left => Move::Right,
        }
    }

    /// Empty-slot displacement as `(dx, dy)`.
    fn delta(self) -> (isize, isize) {
        match self {
            Move::Top => (0, -1),
            Move::Right => (1, 0),
            Move::Down => (0, 1),
            Move::Left => (-1, 0),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Move::Top => "TOP",
            Move::Right => "RIGHT",
            Move::Down => "DOWN",
            Move::Left => "LEFT",
        };
        write!(f, "{}", name)
    }
}

/// Error returned when a move would push the empty slot off the grid.
///
/// Callers are expected to consult `valid_moves` first; hitting this in the
/// search hot path signals a caller logic defect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidMove(pub Move);

impl fmt::Display for InvalidMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "move {} is not valid for the current board", self.0)
    }
}

impl std::error::Error for InvalidMove {}

/// The puzzle state: row-major tile values plus the cached empty-slot
/// coordinates `(col, row)`.
///
/// The cached position is always kept consistent with the tile bytes, so the
/// derived equality and hashing match state-by-tiles comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    tiles: [u8; TILES],
    empty: (usize, usize),
}

impl Default for Board {
    fn default() -> Self {
        let mut board = Board {
            tiles: [0; TILES],
            empty: (0, 0),
        };
        board.reset();
        board
    }
}

impl Board {
    /// Sets the canonical solved ordering: tiles `1..TILES` ascending with the
    /// empty slot last.
    pub fn reset(&mut self) {
        for (i, tile) in self.tiles.iter_mut().enumerate() {
            *tile = (i as u8) + 1;
        }
        self.tiles[TILES - 1] = EMPTY;
        self.empty = (COLS - 1, ROWS - 1);
    }

    /// Reconstructs a board from its wire bytes, rescanning for the empty
    /// slot. Bit-exact inverse of [`Board::tiles`].
    pub fn from_tiles(tiles: [u8; TILES]) -> Result<Self> {
        let index = tiles
            .iter()
            .position(|&tile| tile == EMPTY)
            .ok_or_else(|| anyhow::anyhow!("board has no empty tile"))?;
        Ok(Board {
            tiles,
            empty: (index % COLS, index / COLS),
        })
    }

    /// Raw tile bytes: the hashing key and wire representation of this state.
    pub fn tiles(&self) -> &[u8; TILES] {
        &self.tiles
    }

    pub fn is_solved(&self) -> bool {
        self.tiles[TILES - 1] == EMPTY
            && self.tiles[..TILES - 1].windows(2).all(|w| w[0] < w[1])
    }

    /// Applies `mv` in place: swaps the empty slot with its neighbor and
    /// updates the cached position. Fails without touching the board when the
    /// move is not valid.
    pub fn apply(&mut self, mv: Move) -> Result<(), InvalidMove> {
        let (x, y) = self.shifted_empty(mv).ok_or(InvalidMove(mv))?;
        let from = y * COLS + x;
        let to = self.empty.1 * COLS + self.empty.0;
        self.tiles.swap(from, to);
        self.empty = (x, y);
        Ok(())
    }

    /// The valid subset of the four directions, in the stable [`Move::ALL`]
    /// order. At least 2 entries (corner), at most 4 (interior).
    pub fn valid_moves(&self) -> Vec<Move> {
        Move::ALL
            .iter()
            .copied()
            .filter(|&mv| self.shifted_empty(mv).is_some())
            .collect()
    }

    /// Applies `count` uniformly-random valid moves. The result is always
    /// solvable, reachable from solved in at most `count` moves.
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R, count: usize) {
        for _ in 0..count {
            let moves = self.valid_moves();
            let mv = moves[rng.gen_range(0..moves.len())];
            // valid_moves only returns applicable directions
            let _ = self.apply(mv);
        }
    }

    /// Empty-slot coordinates after `mv`, or `None` when they leave the grid.
    fn shifted_empty(&self, mv: Move) -> Option<(usize, usize)> {
        let (dx, dy) = mv.delta();
        let x = self.empty.0 as isize + dx;
        let y = self.empty.1 as isize + dy;
        if x >= 0 && x < COLS as isize && y >= 0 && y < ROWS as isize {
            Some((x as usize, y as usize))
        } else {
            None
        }
    }
}

impl fmt::Display for Board {
    /// Renders the grid with box separators and a blank cell for the empty
    /// slot.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(COLS * 4 + 1);
        writeln!(f, "{}", rule)?;
        for y in 0..ROWS {
            write!(f, "|")?;
            for x in 0..COLS {
                let tile = self.tiles[y * COLS + x];
                if tile == EMPTY {
                    write!(f, "   |")?;
                } else {
                    write!(f, "{:>2} |", tile)?;
                }
            }
            writeln!(f)?;
            writeln!(f, "{}", rule)?;
        }
        Ok(())
    }
}
