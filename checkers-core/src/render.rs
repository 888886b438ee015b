//! Text dump of a board, built only from [`CheckerBoard`] queries.
//!
//! ```text
//! |  | 0| 1| ... | 9|10|11|
//! |0 |x |* | ...
//! |11|* |o | ...
//! ```
//!
//! Column labels are right-aligned and row labels left-aligned in two
//! characters; each cell prints its symbol followed by a space.

use std::fmt;

use crate::{CheckerBoard, Position};

/// Display adapter that writes the text dump of any board.
pub struct BoardDump<'a, B: ?Sized>(pub &'a B);

impl<B: CheckerBoard + ?Sized> fmt::Display for BoardDump<'_, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.0;
        let rows = board.row_count();
        let cols = board.col_count();

        f.write_str("|  ")?;
        for col in 0..cols {
            write!(f, "|{col:>2}")?;
        }
        f.write_str("|\n")?;

        for row in 0..rows {
            write!(f, "|{row:<2}")?;
            for col in 0..cols {
                let symbol = board.whats_at_pos(Position::new(row as i32, col as i32));
                write!(f, "|{symbol} ")?;
            }
            f.write_str("|\n")?;
        }
        Ok(())
    }
}

/// Render `board` to a string.
pub fn render<B: CheckerBoard + ?Sized>(board: &B) -> String {
    BoardDump(board).to_string()
}
