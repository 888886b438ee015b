//! Game configuration: board size, player symbols and sparse bounds policy.

use serde::{Deserialize, Serialize};

use crate::{CheckersError, Player, Result, BOARD_MAX_SIZE, BOARD_MIN_SIZE};

/// How a [`SparseBoard`](crate::SparseBoard) reports its extent.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundsPolicy {
    /// Report the configured dimension.
    #[default]
    Fixed,
    /// Report the largest occupied row/column plus one. The extent shrinks
    /// when pieces leave the last rows or columns.
    Occupancy,
}

/// Everything a board needs to know at construction time.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct GameConfig {
    pub dimension: usize,
    pub player_one: char,
    pub player_two: char,
    #[serde(default)]
    pub bounds: BoundsPolicy,
}

impl GameConfig {
    /// Default symbols `x` (player one) and `o` (player two).
    pub fn new(dimension: usize) -> GameConfig {
        GameConfig {
            dimension,
            player_one: 'x',
            player_two: 'o',
            bounds: BoundsPolicy::Fixed,
        }
    }

    pub fn with_players(mut self, player_one: char, player_two: char) -> GameConfig {
        self.player_one = player_one;
        self.player_two = player_two;
        self
    }

    pub fn with_bounds(mut self, bounds: BoundsPolicy) -> GameConfig {
        self.bounds = bounds;
        self
    }

    /// Check the dimension and both player symbols.
    pub fn validate(&self) -> Result<()> {
        let d = self.dimension;
        if !(BOARD_MIN_SIZE..=BOARD_MAX_SIZE).contains(&d) || d % 2 != 0 {
            return Err(CheckersError::InvalidDimension(d));
        }
        for symbol in [self.player_one, self.player_two] {
            if !symbol.is_ascii_lowercase() {
                return Err(CheckersError::InvalidSymbol(symbol));
            }
        }
        if self.player_one == self.player_two {
            return Err(CheckersError::DuplicateSymbol(self.player_one));
        }
        Ok(())
    }

    /// Ordinary (lowercase) symbol of a player.
    #[inline]
    pub fn symbol(&self, player: Player) -> char {
        match player {
            Player::One => self.player_one,
            Player::Two => self.player_two,
        }
    }

    /// Owner of a piece symbol, ordinary or crowned.
    pub fn owner_of(&self, symbol: char) -> Option<Player> {
        let lower = symbol.to_ascii_lowercase();
        if lower == self.player_one {
            Some(Player::One)
        } else if lower == self.player_two {
            Some(Player::Two)
        } else {
            None
        }
    }

    /// Row on which a player's ordinary pieces are crowned. Always an edge of
    /// the configured board.
    #[inline]
    pub fn promotion_row(&self, player: Player) -> usize {
        match player {
            Player::One => self.dimension - 1,
            Player::Two => 0,
        }
    }

    /// Starting rows per player; two rows always stay empty between sides.
    #[inline]
    pub fn rows_per_side(&self) -> usize {
        (self.dimension - 2) / 2
    }

    /// Playable tiles per row.
    #[inline]
    pub fn pieces_per_row(&self) -> usize {
        self.dimension / 2
    }

    /// Pieces each player starts with.
    #[inline]
    pub fn starting_count(&self) -> usize {
        self.rows_per_side() * self.pieces_per_row()
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig::new(BOARD_MIN_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EMPTY, NON_PLAYABLE};

    #[test]
    fn test_valid_dimensions() {
        for d in [8, 10, 12, 14, 16] {
            assert_eq!(GameConfig::new(d).validate(), Ok(()));
        }
    }

    #[test]
    fn test_invalid_dimensions() {
        for d in [0, 6, 7, 9, 15, 17, 18] {
            assert_eq!(GameConfig::new(d).validate(), Err(CheckersError::InvalidDimension(d)));
        }
    }

    #[test]
    fn test_invalid_symbols() {
        let config = GameConfig::new(8).with_players('X', 'o');
        assert_eq!(config.validate(), Err(CheckersError::InvalidSymbol('X')));

        let config = GameConfig::new(8).with_players('x', '*');
        assert_eq!(config.validate(), Err(CheckersError::InvalidSymbol('*')));

        let config = GameConfig::new(8).with_players('x', ' ');
        assert_eq!(config.validate(), Err(CheckersError::InvalidSymbol(' ')));

        let config = GameConfig::new(8).with_players('r', 'r');
        assert_eq!(config.validate(), Err(CheckersError::DuplicateSymbol('r')));
    }

    #[test]
    fn test_owner_of() {
        let config = GameConfig::new(8).with_players('r', 'b');
        assert_eq!(config.owner_of('r'), Some(Player::One));
        assert_eq!(config.owner_of('R'), Some(Player::One));
        assert_eq!(config.owner_of('b'), Some(Player::Two));
        assert_eq!(config.owner_of('B'), Some(Player::Two));
        assert_eq!(config.owner_of('x'), None);
        assert_eq!(config.owner_of(EMPTY), None);
        assert_eq!(config.owner_of(NON_PLAYABLE), None);
    }

    #[test]
    fn test_starting_counts() {
        assert_eq!(GameConfig::new(8).starting_count(), 12);
        assert_eq!(GameConfig::new(10).starting_count(), 20);
        assert_eq!(GameConfig::new(16).starting_count(), 56);
    }

    #[test]
    fn test_promotion_rows() {
        let config = GameConfig::new(10);
        assert_eq!(config.promotion_row(Player::One), 9);
        assert_eq!(config.promotion_row(Player::Two), 0);
        let config = config.with_bounds(BoundsPolicy::Occupancy);
        assert_eq!(config.promotion_row(Player::One), 9);
    }

    #[test]
    fn test_config_json_roundtrip() {
        let config = GameConfig::new(12)
            .with_players('a', 'z')
            .with_bounds(BoundsPolicy::Occupancy);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"occupancy\""));
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_config_json_default_bounds() {
        let json = r#"{"dimension":8,"player_one":"x","player_two":"o"}"#;
        let config: GameConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config, GameConfig::new(8));
    }
}
