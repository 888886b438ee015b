//! Error type for board construction and parsing.

/// Errors raised by the checkers core.
///
/// Illegal moves and jumps are not errors: they leave the board untouched and
/// hand back the starting position.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckersError {
    /// Board dimension is odd or outside the supported range.
    #[error("invalid board dimension {0}: must be even and between 8 and 16")]
    InvalidDimension(usize),

    /// Player symbol is not a lowercase ASCII letter.
    #[error("invalid player symbol {0:?}: must be a lowercase letter")]
    InvalidSymbol(char),

    /// Both players picked the same symbol.
    #[error("player symbols must differ, both are {0:?}")]
    DuplicateSymbol(char),

    /// Text that does not name one of the four diagonal directions.
    #[error("unknown direction {0:?}: expected NE, NW, SE or SW")]
    UnknownDirection(String),
}

/// Result type for checkers operations.
pub type Result<T> = std::result::Result<T, CheckersError>;
