//! Position-set board: for each symbol, the set of tiles holding it.
//!
//! Nothing is stored for empty or non-playable tiles; both are derived on
//! lookup. The board's extent depends on [`BoundsPolicy`]: with `Fixed` it is
//! the configured dimension, with `Occupancy` it is computed from the largest
//! occupied coordinate, so it shrinks as the far rows and columns empty out.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use log::{debug, warn};

use crate::board::{seed_directions, starting_layout};
use crate::render::BoardDump;
use crate::{
    is_piece, BoundsPolicy, CheckerBoard, Direction, DirectionRegistry, GameConfig, PieceCounts,
    Position, Result, EMPTY, NON_PLAYABLE,
};

/// Board stored as a map from piece symbol to occupied positions.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SparseBoard {
    config: GameConfig,
    positions: BTreeMap<char, BTreeSet<Position>>,
    directions: DirectionRegistry,
}

impl SparseBoard {
    /// Create a board with both players in their starting rows.
    pub fn new(config: GameConfig) -> Result<SparseBoard> {
        config.validate()?;
        let mut board = SparseBoard {
            config,
            positions: BTreeMap::new(),
            directions: DirectionRegistry::new(),
        };
        for (pos, symbol) in starting_layout(&config) {
            board.place_piece(pos, symbol);
        }
        seed_directions(&mut board);

        let n = config.dimension;
        debug!(
            "sparse {n}x{n} board ready ({:?} bounds), {} pieces per side",
            config.bounds,
            config.starting_count()
        );
        Ok(board)
    }

    /// Positions currently holding `symbol`, in row-major order.
    pub fn positions_of(&self, symbol: char) -> impl Iterator<Item = Position> + '_ {
        self.positions.get(&symbol).into_iter().flatten().copied()
    }

    fn occupied(&self) -> impl Iterator<Item = Position> + '_ {
        self.positions.values().flatten().copied()
    }

    /// Largest value of `coord` over occupied tiles, plus one.
    fn occupied_extent(&self, coord: fn(Position) -> i32) -> usize {
        self.occupied().map(|pos| coord(pos) as usize + 1).max().unwrap_or(0)
    }
}

impl CheckerBoard for SparseBoard {
    fn config(&self) -> &GameConfig {
        &self.config
    }

    fn place_piece(&mut self, pos: Position, symbol: char) {
        let n = self.config.dimension;
        if !pos.is_within(n, n) || !self.is_playable(pos) || symbol == NON_PLAYABLE {
            warn!("ignoring placement of {symbol:?} at {pos}");
            return;
        }
        for set in self.positions.values_mut() {
            set.remove(&pos);
        }
        self.positions.retain(|_, set| !set.is_empty());
        if is_piece(symbol) {
            self.positions.entry(symbol).or_default().insert(pos);
        }
    }

    fn whats_at_pos(&self, pos: Position) -> char {
        if !self.in_bounds(pos) {
            return EMPTY;
        }
        self.positions
            .iter()
            .find(|(_, set)| set.contains(&pos))
            .map(|(symbol, _)| *symbol)
            .unwrap_or(if self.is_playable(pos) { EMPTY } else { NON_PLAYABLE })
    }

    fn row_count(&self) -> usize {
        match self.config.bounds {
            BoundsPolicy::Fixed => self.config.dimension,
            BoundsPolicy::Occupancy => self.occupied_extent(Position::row),
        }
    }

    fn col_count(&self) -> usize {
        match self.config.bounds {
            BoundsPolicy::Fixed => self.config.dimension,
            BoundsPolicy::Occupancy => self.occupied_extent(Position::col),
        }
    }

    fn piece_counts(&self) -> PieceCounts {
        let mut counts = PieceCounts::from([(self.config.player_one, 0), (self.config.player_two, 0)]);
        for (&symbol, set) in &self.positions {
            if let Some(owner) = self.config.owner_of(symbol) {
                *counts.entry(self.config.symbol(owner)).or_insert(0) += set.len();
            }
        }
        counts
    }

    fn viable_directions(&self) -> DirectionRegistry {
        self.directions.clone()
    }

    fn register_direction(&mut self, symbol: char, dir: Direction) {
        self.directions.insert(symbol, dir);
    }
}

impl fmt::Display for SparseBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&BoardDump(self), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: i32, col: i32) -> Position {
        Position::new(row, col)
    }

    fn occupancy_board() -> SparseBoard {
        SparseBoard::new(GameConfig::new(8).with_bounds(BoundsPolicy::Occupancy)).unwrap()
    }

    #[test]
    fn test_sparse_new() {
        let board = SparseBoard::new(GameConfig::new(8)).unwrap();
        assert_eq!(board.positions.len(), 2);
        assert_eq!(board.positions_of('x').count(), 12);
        assert_eq!(board.positions_of('o').count(), 12);
        assert_eq!(board.positions_of('x').next(), Some(pos(0, 0)));
        assert_eq!(board.positions_of('o').last(), Some(pos(7, 7)));
        assert_eq!(board.positions_of('X').count(), 0);
    }

    #[test]
    fn test_sparse_one_occupant_per_tile() {
        let mut board = SparseBoard::new(GameConfig::new(8)).unwrap();
        board.place_piece(pos(0, 0), 'o');
        board.place_piece(pos(0, 0), 'X');
        let holders: Vec<char> = board
            .positions
            .iter()
            .filter(|(_, set)| set.contains(&pos(0, 0)))
            .map(|(symbol, _)| *symbol)
            .collect();
        assert_eq!(holders, vec!['X']);
        assert_eq!(board.piece_counts(), PieceCounts::from([('o', 12), ('x', 12)]));
    }

    #[test]
    fn test_sparse_drops_empty_sets() {
        let mut board = SparseBoard::new(GameConfig::new(8)).unwrap();
        board.place_piece(pos(3, 3), 'X');
        board.place_piece(pos(3, 3), EMPTY);
        assert!(!board.positions.contains_key(&'X'));
    }

    #[test]
    fn test_sparse_non_playable_is_derived() {
        let board = SparseBoard::new(GameConfig::new(8)).unwrap();
        assert_eq!(board.whats_at_pos(pos(4, 1)), NON_PLAYABLE);
        assert_eq!(board.whats_at_pos(pos(4, 0)), EMPTY);
        assert!(board.occupied().all(|p| board.is_playable(p)));
    }

    #[test]
    fn test_fixed_bounds_survive_empty_edges() {
        let mut board = SparseBoard::new(GameConfig::new(8)).unwrap();
        for row in 5..8 {
            for col in 0..8 {
                board.place_piece(pos(row, col), EMPTY);
            }
        }
        assert_eq!(board.row_count(), 8);
        assert_eq!(board.col_count(), 8);
        assert_eq!(board.whats_at_pos(pos(7, 1)), EMPTY);

        board.place_piece(pos(6, 2), 'x');
        assert_eq!(board.move_piece(pos(6, 2), Direction::SE), pos(7, 3));
        assert_eq!(board.whats_at_pos(pos(7, 3)), 'X');
    }

    #[test]
    fn test_occupancy_bounds_start_full_size() {
        let board = occupancy_board();
        assert_eq!(board.row_count(), 8);
        assert_eq!(board.col_count(), 8);
        assert_eq!(board.render(), SparseBoard::new(GameConfig::new(8)).unwrap().render());
    }

    #[test]
    fn test_occupancy_bounds_shrink_with_edge_rows() {
        let mut board = occupancy_board();
        for row in 5..8 {
            for col in 0..8 {
                board.place_piece(pos(row, col), EMPTY);
            }
        }
        // Player one's rows 0..3 are all that is left.
        assert_eq!(board.row_count(), 3);
        assert_eq!(board.col_count(), 8);
        assert_eq!(board.whats_at_pos(pos(4, 0)), EMPTY);
        assert_eq!(board.whats_at_pos(pos(3, 0)), EMPTY);
        assert_eq!(board.whats_at_pos(pos(2, 1)), NON_PLAYABLE);

        // Moving out of the derived extent is refused.
        assert_eq!(board.move_piece(pos(2, 0), Direction::SE), pos(2, 0));

        // The lowest occupied row is not a promotion row.
        board.crown_piece(pos(2, 4));
        assert_eq!(board.whats_at_pos(pos(2, 4)), 'x');
    }

    #[test]
    fn test_occupancy_bounds_keep_promotion_rows() {
        let mut board = occupancy_board();
        for row in 0..8 {
            for col in 0..8 {
                board.place_piece(pos(row, col), EMPTY);
            }
        }
        // Player one's home row is the last occupied row here, but not its
        // promotion row.
        board.place_piece(pos(0, 0), 'x');
        assert_eq!(board.row_count(), 1);
        board.crown_piece(pos(0, 0));
        assert_eq!(board.whats_at_pos(pos(0, 0)), 'x');

        board.place_piece(pos(7, 3), 'x');
        board.crown_piece(pos(7, 3));
        assert_eq!(board.whats_at_pos(pos(7, 3)), 'X');

        board.place_piece(pos(1, 1), 'o');
        assert_eq!(board.move_piece(pos(1, 1), Direction::NE), pos(0, 2));
        assert_eq!(board.whats_at_pos(pos(0, 2)), 'O');
    }

    #[test]
    fn test_occupancy_bounds_regrow_on_placement() {
        let mut board = occupancy_board();
        for row in 0..8 {
            for col in 0..8 {
                board.place_piece(pos(row, col), EMPTY);
            }
        }
        assert_eq!(board.row_count(), 0);
        assert_eq!(board.col_count(), 0);
        assert_eq!(board.render(), "|  |\n");
        assert!(!board.check_player_win('x'));

        board.place_piece(pos(5, 3), 'o');
        assert_eq!(board.row_count(), 6);
        assert_eq!(board.col_count(), 4);
        assert_eq!(board.whats_at_pos(pos(5, 3)), 'o');
        assert!(board.check_player_win('o'));
    }

    #[test]
    fn test_sparse_display_matches_render() {
        let board = SparseBoard::new(GameConfig::new(12)).unwrap();
        assert_eq!(board.to_string(), board.render());
    }
}
