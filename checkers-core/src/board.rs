//! The board contract and the rule engine built on top of it.
//!
//! Storage types implement the handful of required methods on
//! [`CheckerBoard`]. Movement, capture, promotion and win detection are
//! provided methods written only against those, so every representation
//! gets the same rules.

use std::collections::BTreeMap;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::{
    crowned, is_piece, render, DenseBoard, Direction, GameConfig, Player, Position, Result,
    SparseBoard, EMPTY,
};

/// Remaining pieces per player, keyed by the player's ordinary symbol.
pub type PieceCounts = BTreeMap<char, usize>;

/// Unit offset for a direction.
#[inline]
pub fn get_direction(dir: Direction) -> Position {
    dir.offset()
}

// ============================================================================
// Direction registry
// ============================================================================

/// Directions each symbol may move in.
///
/// Lists keep insertion order and never hold the same direction twice. The
/// empty symbol's entry collects every direction registered for anyone.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DirectionRegistry(BTreeMap<char, Vec<Direction>>);

impl DirectionRegistry {
    pub fn new() -> DirectionRegistry {
        DirectionRegistry(BTreeMap::new())
    }

    /// Register `dir` for `symbol`. Returns false if it was already there.
    pub fn insert(&mut self, symbol: char, dir: Direction) -> bool {
        let dirs = self.0.entry(symbol).or_default();
        if dirs.contains(&dir) {
            return false;
        }
        dirs.push(dir);
        true
    }

    /// Directions registered for `symbol`, empty if none.
    pub fn get(&self, symbol: char) -> &[Direction] {
        self.0.get(&symbol).map(Vec::as_slice).unwrap_or(&[])
    }

    #[inline]
    pub fn allows(&self, symbol: char, dir: Direction) -> bool {
        self.get(symbol).contains(&dir)
    }

    pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.0.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ============================================================================
// Board contract
// ============================================================================

/// Storage strategy chosen when a game starts.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardKind {
    /// Flat grid, one symbol per cell.
    Dense,
    /// Per-symbol position sets.
    Sparse,
}

/// Build a starting board of the requested kind.
pub fn new_board(kind: BoardKind, config: GameConfig) -> Result<Box<dyn CheckerBoard>> {
    Ok(match kind {
        BoardKind::Dense => Box::new(DenseBoard::new(config)?),
        BoardKind::Sparse => Box::new(SparseBoard::new(config)?),
    })
}

/// A checkers board, independent of how it stores its pieces.
pub trait CheckerBoard {
    /// Configuration the board was built with.
    fn config(&self) -> &GameConfig;

    /// Raw write of `symbol` at `pos`, replacing any occupant. Writing
    /// [`EMPTY`] clears the tile. No rules are checked; positions outside the
    /// configured board or on non-playable tiles are ignored.
    fn place_piece(&mut self, pos: Position, symbol: char);

    /// Symbol at `pos`. Never fails: anything outside the current extent
    /// reads as [`EMPTY`].
    fn whats_at_pos(&self, pos: Position) -> char;

    fn row_count(&self) -> usize;

    fn col_count(&self) -> usize;

    /// Copy of the per-player piece counts.
    fn piece_counts(&self) -> PieceCounts;

    /// Copy of the direction registry.
    fn viable_directions(&self) -> DirectionRegistry;

    /// Add one entry to the direction registry.
    fn register_direction(&mut self, symbol: char, dir: Direction);

    // ========== Geometry ==========

    #[inline]
    fn in_bounds(&self, pos: Position) -> bool {
        pos.is_within(self.row_count(), self.col_count())
    }

    /// Playable tiles are those with an even coordinate sum.
    #[inline]
    fn is_playable(&self, pos: Position) -> bool {
        (pos.row() ^ pos.col()) & 1 == 0
    }

    // ========== Directions ==========

    /// Allow `dir` for `player`'s ordinary pieces, `dir` and its opposite for
    /// the crowned pieces, and record `dir` under the empty symbol.
    fn add_viable_directions(&mut self, player: char, dir: Direction) {
        let king = crowned(player);
        self.register_direction(player, dir);
        self.register_direction(king, dir);
        self.register_direction(king, dir.opposite());
        self.register_direction(EMPTY, dir);
    }

    /// Directions the piece at `pos` may take. Empty for vacant tiles.
    fn directions_for(&self, pos: Position) -> Vec<Direction> {
        let symbol = self.whats_at_pos(pos);
        if !is_piece(symbol) {
            return Vec::new();
        }
        self.viable_directions().get(symbol).to_vec()
    }

    /// What lies one step away in each direction; [`EMPTY`] past the edge.
    fn scan_surrounding_positions(&self, pos: Position) -> BTreeMap<Direction, char> {
        Direction::ALL
            .into_iter()
            .map(|dir| {
                let next = pos + dir.offset();
                let symbol = if self.in_bounds(next) { self.whats_at_pos(next) } else { EMPTY };
                (dir, symbol)
            })
            .collect()
    }

    // ========== Moves ==========

    /// Step the piece at `start` one tile in `dir`.
    ///
    /// Returns the new position, or `start` unchanged if there is no piece to
    /// move or the target is off the board or occupied.
    fn move_piece(&mut self, start: Position, dir: Direction) -> Position {
        let piece = self.whats_at_pos(start);
        if !is_piece(piece) {
            trace!("move {start} {dir}: no piece at start");
            return start;
        }
        let target = start + dir.offset();
        if !self.in_bounds(target) {
            trace!("move {start} {dir}: {target} is off the board");
            return start;
        }
        if self.whats_at_pos(target) != EMPTY {
            trace!("move {start} {dir}: {target} is occupied");
            return start;
        }

        self.place_piece(start, EMPTY);
        self.place_piece(target, piece);
        self.crown_piece(target);
        target
    }

    /// Jump the piece at `start` over an adjacent opponent piece in `dir`,
    /// capturing it.
    ///
    /// Returns the landing position, or `start` unchanged if the jump is not
    /// possible.
    fn jump_piece(&mut self, start: Position, dir: Direction) -> Position {
        let config = *self.config();
        let mover = self.whats_at_pos(start);
        let Some(owner) = config.owner_of(mover) else {
            trace!("jump {start} {dir}: no player piece at start");
            return start;
        };

        let over = start + dir.offset();
        let land = over + dir.offset();
        if !self.in_bounds(over) || !self.in_bounds(land) {
            trace!("jump {start} {dir}: {land} is off the board");
            return start;
        }
        match config.owner_of(self.whats_at_pos(over)) {
            Some(victim) if victim != owner => {}
            _ => {
                trace!("jump {start} {dir}: no opponent piece at {over}");
                return start;
            }
        }
        if self.whats_at_pos(land) != EMPTY {
            trace!("jump {start} {dir}: {land} is occupied");
            return start;
        }

        self.place_piece(land, mover);
        self.place_piece(over, EMPTY);
        self.place_piece(start, EMPTY);
        self.crown_piece(land);
        land
    }

    /// Crown the piece at `pos` if it is an ordinary piece standing on its
    /// owner's promotion row. Otherwise does nothing.
    fn crown_piece(&mut self, pos: Position) {
        let piece = self.whats_at_pos(pos);
        if !piece.is_ascii_lowercase() || !self.in_bounds(pos) {
            return;
        }
        let config = *self.config();
        let Some(owner) = config.owner_of(piece) else {
            return;
        };
        if pos.row() as usize == config.promotion_row(owner) {
            debug!("crowning {piece:?} at {pos}");
            self.place_piece(pos, crowned(piece));
        }
    }

    // ========== Outcome ==========

    /// True if `player` (either case of its symbol) has a piece on the board
    /// and the opponent has none.
    fn check_player_win(&self, player: char) -> bool {
        let config = *self.config();
        let Some(me) = config.owner_of(player) else {
            return false;
        };

        let mut mine = 0usize;
        let mut theirs = 0usize;
        for row in 0..self.row_count() {
            for col in 0..self.col_count() {
                match config.owner_of(self.whats_at_pos(Position::new(row as i32, col as i32))) {
                    Some(p) if p == me => mine += 1,
                    Some(_) => theirs += 1,
                    None => {}
                }
            }
        }
        mine > 0 && theirs == 0
    }

    /// The player who has won, if either has.
    fn winner(&self) -> Option<Player> {
        let config = *self.config();
        Player::all().find(|&p| self.check_player_win(config.symbol(p)))
    }

    /// Take `lost` pieces off `player`'s entry in `counts`, stopping at zero.
    /// Works on the caller's map, not on the board.
    fn player_lost_pieces(&self, lost: usize, player: char, counts: &mut PieceCounts) {
        if let Some(count) = counts.get_mut(&player) {
            *count = count.saturating_sub(lost);
        }
    }

    // ========== Diagnostics ==========

    /// Text dump of the board.
    fn render(&self) -> String {
        render::render(self)
    }
}

/// Starting pieces for `config`: player one fills the top rows, player two
/// the bottom rows, playable tiles only.
pub(crate) fn starting_layout(config: &GameConfig) -> Vec<(Position, char)> {
    let n = config.dimension;
    let rows = config.rows_per_side();
    let mut layout = Vec::with_capacity(config.starting_count() * 2);
    for row in 0..n {
        let symbol = if row < rows {
            config.player_one
        } else if row >= n - rows {
            config.player_two
        } else {
            continue;
        };
        for col in (row % 2..n).step_by(2) {
            layout.push((Position::new(row as i32, col as i32), symbol));
        }
    }
    layout
}

/// Register each player's two forward diagonals.
pub(crate) fn seed_directions<B: CheckerBoard + ?Sized>(board: &mut B) {
    let config = *board.config();
    board.add_viable_directions(config.player_one, Direction::SE);
    board.add_viable_directions(config.player_one, Direction::SW);
    board.add_viable_directions(config.player_two, Direction::NE);
    board.add_viable_directions(config.player_two, Direction::NW);
}
