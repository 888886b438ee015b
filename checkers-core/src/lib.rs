//! Checkers rule engine with two interchangeable board representations.
//!
//! # Board Layout
//!
//! ```text
//! An N×N board (N even, 8 <= N <= 16). Row 0 is the top edge.
//! A tile is playable when (row + col) is even; the others are
//! non-playable and always read back as '*'.
//!
//!   8x8 starting position (player one = x, player two = o):
//!
//!   |  | 0| 1| 2| 3| 4| 5| 6| 7|
//!   |0 |x |* |x |* |x |* |x |* |
//!   |1 |* |x |* |x |* |x |* |x |
//!   |2 |x |* |x |* |x |* |x |* |
//!   |3 |* |  |* |  |* |  |* |  |
//!   |4 |  |* |  |* |  |* |  |* |
//!   |5 |* |o |* |o |* |o |* |o |
//!   |6 |o |* |o |* |o |* |o |* |
//!   |7 |* |o |* |o |* |o |* |o |
//! ```
//!
//! # Symbols
//!
//! ```text
//! 'x' / 'o'   ordinary pieces (any lowercase letter may be chosen)
//! 'X' / 'O'   crowned pieces, the uppercase form of the owner's letter
//! ' '         empty playable tile
//! '*'         non-playable tile
//! ```
//!
//! # Representations
//!
//! [`DenseBoard`] keeps one symbol per cell in a flat grid. [`SparseBoard`]
//! keeps, per symbol, the set of positions holding it. Both implement
//! [`CheckerBoard`], whose default methods hold the shared move, jump, crown
//! and win logic, so the two behave identically through the trait.

pub mod board;
pub mod config;
pub mod dense;
pub mod error;
pub mod render;
pub mod sparse;

#[cfg(feature = "wasm")]
pub mod wasm;

use std::fmt;
use std::ops::Add;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use board::{get_direction, new_board, BoardKind, CheckerBoard, DirectionRegistry, PieceCounts};
pub use config::{BoundsPolicy, GameConfig};
pub use dense::DenseBoard;
pub use error::{CheckersError, Result};
pub use sparse::SparseBoard;

/// Symbol of an empty playable tile.
pub const EMPTY: char = ' ';

/// Symbol of a non-playable tile.
pub const NON_PLAYABLE: char = '*';

/// Smallest supported board dimension.
pub const BOARD_MIN_SIZE: usize = 8;

/// Largest supported board dimension.
pub const BOARD_MAX_SIZE: usize = 16;

/// Crowned form of a piece symbol.
#[inline]
pub fn crowned(symbol: char) -> char {
    symbol.to_ascii_uppercase()
}

/// True for a symbol that stands for a piece rather than a tile marker.
#[inline]
pub fn is_piece(symbol: char) -> bool {
    symbol != EMPTY && symbol != NON_PLAYABLE
}

// ============================================================================
// Player
// ============================================================================

/// Player identifier.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Player {
    /// Starts on row 0 and moves south.
    One,
    /// Starts on the last row and moves north.
    Two,
}

impl Player {
    /// Get the opponent player.
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Both players, player one first.
    pub fn all() -> impl Iterator<Item = Player> {
        [Player::One, Player::Two].into_iter()
    }
}

// ============================================================================
// Position
// ============================================================================

/// A (row, column) coordinate.
///
/// Coordinates are signed so that stepping off an edge produces a value that
/// simply fails [`Position::is_within`] instead of wrapping. Arithmetic
/// saturates at the `i32` limits.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    row: i32,
    col: i32,
}

impl Position {
    #[inline]
    pub const fn new(row: i32, col: i32) -> Position {
        Position { row, col }
    }

    #[inline]
    pub const fn row(self) -> i32 {
        self.row
    }

    #[inline]
    pub const fn col(self) -> i32 {
        self.col
    }

    /// Both components multiplied by two.
    #[inline]
    pub const fn doubled(self) -> Position {
        Position::new(self.row.saturating_mul(2), self.col.saturating_mul(2))
    }

    /// Check `0 <= row < rows` and `0 <= col < cols`.
    #[inline]
    pub fn is_within(self, rows: usize, cols: usize) -> bool {
        self.row >= 0 && (self.row as usize) < rows && self.col >= 0 && (self.col as usize) < cols
    }

    /// Grid index for a row-major board of the given width.
    /// Caller must ensure the position is within bounds.
    #[inline]
    pub(crate) fn index(self, width: usize) -> usize {
        debug_assert!(self.row >= 0 && self.col >= 0);
        self.row as usize * width + self.col as usize
    }
}

impl Add for Position {
    type Output = Position;

    #[inline]
    fn add(self, rhs: Position) -> Position {
        Position::new(self.row.saturating_add(rhs.row), self.col.saturating_add(rhs.col))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

// ============================================================================
// Direction
// ============================================================================

/// One of the four diagonal directions. North is towards row 0.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    NE,
    NW,
    SE,
    SW,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::NE, Direction::NW, Direction::SE, Direction::SW];

    /// Unit (row, col) step for this direction.
    #[inline]
    pub const fn offset(self) -> Position {
        match self {
            Direction::NE => Position::new(-1, 1),
            Direction::NW => Position::new(-1, -1),
            Direction::SE => Position::new(1, 1),
            Direction::SW => Position::new(1, -1),
        }
    }

    /// The direction pointing the other way along the same diagonal.
    #[inline]
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::NE => Direction::SW,
            Direction::NW => Direction::SE,
            Direction::SE => Direction::NW,
            Direction::SW => Direction::NE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::NE => "NE",
            Direction::NW => "NW",
            Direction::SE => "SE",
            Direction::SW => "SW",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = CheckersError;

    fn from_str(s: &str) -> Result<Direction> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NE" => Ok(Direction::NE),
            "NW" => Ok(Direction::NW),
            "SE" => Ok(Direction::SE),
            "SW" => Ok(Direction::SW),
            _ => Err(CheckersError::UnknownDirection(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_opponent() {
        assert_eq!(Player::One.opponent(), Player::Two);
        assert_eq!(Player::Two.opponent(), Player::One);
    }

    #[test]
    fn test_position_add() {
        let pos = Position::new(3, 3) + Direction::SW.offset();
        assert_eq!(pos, Position::new(4, 2));
        assert_eq!(pos.row(), 4);
        assert_eq!(pos.col(), 2);
    }

    #[test]
    fn test_position_doubled() {
        assert_eq!(Direction::NE.offset().doubled(), Position::new(-2, 2));
        assert_eq!(Position::new(3, 5).doubled(), Position::new(6, 10));
        assert_eq!(Position::new(i32::MAX, i32::MIN).doubled(), Position::new(i32::MAX, i32::MIN));
    }

    #[test]
    fn test_position_add_saturates() {
        let corner = Position::new(i32::MAX, i32::MIN);
        assert_eq!(corner + Direction::SW.offset(), corner);
        assert_eq!(corner + Direction::NE.offset(), Position::new(i32::MAX - 1, i32::MIN + 1));
        assert!(!(corner + Direction::SE.offset()).is_within(8, 8));
    }

    #[test]
    fn test_position_is_within() {
        assert!(Position::new(0, 0).is_within(8, 8));
        assert!(Position::new(7, 7).is_within(8, 8));
        assert!(!Position::new(8, 0).is_within(8, 8));
        assert!(!Position::new(0, 8).is_within(8, 8));
        assert!(!Position::new(-1, 3).is_within(8, 8));
        assert!(!Position::new(3, -1).is_within(8, 8));
        assert!(!Position::new(0, 0).is_within(0, 0));
    }

    #[test]
    fn test_position_display() {
        assert_eq!(Position::new(2, 0).to_string(), "2,0");
        assert_eq!(Position::new(-1, 12).to_string(), "-1,12");
    }

    #[test]
    fn test_direction_offsets() {
        assert_eq!(Direction::NE.offset(), Position::new(-1, 1));
        assert_eq!(Direction::NW.offset(), Position::new(-1, -1));
        assert_eq!(Direction::SE.offset(), Position::new(1, 1));
        assert_eq!(Direction::SW.offset(), Position::new(1, -1));
    }

    #[test]
    fn test_direction_opposite() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            let back = Position::new(5, 5) + dir.offset() + dir.opposite().offset();
            assert_eq!(back, Position::new(5, 5));
        }
        assert_eq!(Direction::NE.opposite(), Direction::SW);
        assert_eq!(Direction::NW.opposite(), Direction::SE);
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!("ne".parse::<Direction>(), Ok(Direction::NE));
        assert_eq!(" Sw ".parse::<Direction>(), Ok(Direction::SW));
        for dir in Direction::ALL {
            assert_eq!(dir.to_string().parse::<Direction>(), Ok(dir));
        }
        assert_eq!(
            "north".parse::<Direction>(),
            Err(CheckersError::UnknownDirection("north".to_string()))
        );
    }

    #[test]
    fn test_symbol_helpers() {
        assert_eq!(crowned('x'), 'X');
        assert_eq!(crowned('X'), 'X');
        assert!(is_piece('o'));
        assert!(!is_piece(EMPTY));
        assert!(!is_piece(NON_PLAYABLE));
    }
}
