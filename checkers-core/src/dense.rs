//! Grid-backed board: one symbol per cell, indexed by coordinates.

use std::fmt;

use log::{debug, warn};

use crate::board::{seed_directions, starting_layout};
use crate::render::BoardDump;
use crate::{
    CheckerBoard, Direction, DirectionRegistry, GameConfig, PieceCounts, Position, Result, EMPTY,
    NON_PLAYABLE,
};

/// Board stored as a flat row-major grid of symbols.
///
/// Non-playable tiles hold [`NON_PLAYABLE`] for the life of the board. Piece
/// counts are kept up to date on every write.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct DenseBoard {
    config: GameConfig,
    cells: Vec<char>,
    counts: PieceCounts,
    directions: DirectionRegistry,
}

impl DenseBoard {
    /// Create a board with both players in their starting rows.
    pub fn new(config: GameConfig) -> Result<DenseBoard> {
        config.validate()?;
        let n = config.dimension;
        let cells = (0..n * n)
            .map(|i| if (i / n + i % n) % 2 == 0 { EMPTY } else { NON_PLAYABLE })
            .collect();
        let counts = PieceCounts::from([(config.player_one, 0), (config.player_two, 0)]);

        let mut board = DenseBoard {
            config,
            cells,
            counts,
            directions: DirectionRegistry::new(),
        };
        for (pos, symbol) in starting_layout(&config) {
            board.place_piece(pos, symbol);
        }
        seed_directions(&mut board);

        debug!("dense {n}x{n} board ready, {} pieces per side", config.starting_count());
        Ok(board)
    }

    /// Side length of the board.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.config.dimension
    }

    #[inline]
    fn contains(&self, pos: Position) -> bool {
        pos.is_within(self.dimension(), self.dimension())
    }

    fn adjust_count(&mut self, symbol: char, added: bool) {
        let Some(owner) = self.config.owner_of(symbol) else {
            return;
        };
        let count = self.counts.entry(self.config.symbol(owner)).or_insert(0);
        *count = if added { *count + 1 } else { count.saturating_sub(1) };
    }
}

impl CheckerBoard for DenseBoard {
    fn config(&self) -> &GameConfig {
        &self.config
    }

    fn place_piece(&mut self, pos: Position, symbol: char) {
        if !self.contains(pos) || !self.is_playable(pos) || symbol == NON_PLAYABLE {
            warn!("ignoring placement of {symbol:?} at {pos}");
            return;
        }
        let idx = pos.index(self.dimension());
        let old = self.cells[idx];
        self.adjust_count(old, false);
        self.adjust_count(symbol, true);
        self.cells[idx] = symbol;
    }

    fn whats_at_pos(&self, pos: Position) -> char {
        if !self.contains(pos) {
            return EMPTY;
        }
        self.cells[pos.index(self.dimension())]
    }

    fn row_count(&self) -> usize {
        self.dimension()
    }

    fn col_count(&self) -> usize {
        self.dimension()
    }

    fn piece_counts(&self) -> PieceCounts {
        self.counts.clone()
    }

    fn viable_directions(&self) -> DirectionRegistry {
        self.directions.clone()
    }

    fn register_direction(&mut self, symbol: char, dir: Direction) {
        self.directions.insert(symbol, dir);
    }
}

impl fmt::Display for DenseBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&BoardDump(self), f)
    }
}
