//! WASM bindings for checkers-core
//!
//! Provides a JavaScript-friendly API over either board representation.

use wasm_bindgen::prelude::*;

use crate::{new_board, BoardKind, CheckerBoard, Direction, GameConfig, Player, Position};

/// WASM-friendly wrapper around a boxed board
#[wasm_bindgen]
pub struct WasmBoard {
    inner: Box<dyn CheckerBoard>,
}

#[wasm_bindgen]
impl WasmBoard {
    /// Create a starting board. `sparse` selects the position-set storage.
    /// Each player symbol must be a single character.
    #[wasm_bindgen(constructor)]
    pub fn new(
        dimension: usize,
        sparse: bool,
        player_one: &str,
        player_two: &str,
    ) -> Result<WasmBoard, JsValue> {
        let one = parse_symbol(player_one)?;
        let two = parse_symbol(player_two)?;
        let config = GameConfig::new(dimension).with_players(one, two);
        let kind = if sparse { BoardKind::Sparse } else { BoardKind::Dense };
        let inner = new_board(kind, config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(WasmBoard { inner })
    }

    /// Board size (rows)
    #[wasm_bindgen(js_name = rowCount)]
    pub fn row_count(&self) -> usize {
        self.inner.row_count()
    }

    /// Board size (columns)
    #[wasm_bindgen(js_name = colCount)]
    pub fn col_count(&self) -> usize {
        self.inner.col_count()
    }

    /// Symbol at a tile as a one-character string
    #[wasm_bindgen(js_name = whatsAtPos)]
    pub fn whats_at_pos(&self, row: i32, col: i32) -> String {
        self.inner.whats_at_pos(Position::new(row, col)).to_string()
    }

    /// Move one step. Returns the resulting [row, col]; equal to the input
    /// when the move was refused.
    #[wasm_bindgen(js_name = movePiece)]
    pub fn move_piece(&mut self, row: i32, col: i32, dir: &str) -> Result<Vec<i32>, JsValue> {
        let dir = parse_direction(dir)?;
        let pos = self.inner.move_piece(Position::new(row, col), dir);
        Ok(vec![pos.row(), pos.col()])
    }

    /// Jump an opponent piece. Same return convention as `movePiece`.
    #[wasm_bindgen(js_name = jumpPiece)]
    pub fn jump_piece(&mut self, row: i32, col: i32, dir: &str) -> Result<Vec<i32>, JsValue> {
        let dir = parse_direction(dir)?;
        let pos = self.inner.jump_piece(Position::new(row, col), dir);
        Ok(vec![pos.row(), pos.col()])
    }

    /// Crown the piece at a tile if it stands on its promotion row
    #[wasm_bindgen(js_name = crownPiece)]
    pub fn crown_piece(&mut self, row: i32, col: i32) {
        self.inner.crown_piece(Position::new(row, col));
    }

    /// Directions the piece at a tile may take, e.g. ["SE", "SW"]
    #[wasm_bindgen(js_name = directionsFor)]
    pub fn directions_for(&self, row: i32, col: i32) -> Vec<String> {
        self.inner
            .directions_for(Position::new(row, col))
            .into_iter()
            .map(|dir| dir.to_string())
            .collect()
    }

    /// Check whether the player owning `symbol` has won
    #[wasm_bindgen(js_name = checkPlayerWin)]
    pub fn check_player_win(&self, symbol: &str) -> bool {
        symbol.chars().next().is_some_and(|c| self.inner.check_player_win(c))
    }

    /// Check for winner. Returns 0 (none), 1 (P1), or 2 (P2)
    pub fn winner(&self) -> u8 {
        match self.inner.winner() {
            None => 0,
            Some(Player::One) => 1,
            Some(Player::Two) => 2,
        }
    }

    /// Piece counts as an object keyed by player symbol
    #[wasm_bindgen(js_name = pieceCounts)]
    pub fn piece_counts(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.piece_counts()).map_err(JsValue::from)
    }

    /// Direction registry as an object keyed by symbol
    #[wasm_bindgen(js_name = viableDirections)]
    pub fn viable_directions(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.viable_directions()).map_err(JsValue::from)
    }

    /// Text dump of the board
    pub fn render(&self) -> String {
        self.inner.render()
    }
}

fn parse_direction(text: &str) -> Result<Direction, JsValue> {
    text.parse::<Direction>().map_err(|e| JsValue::from_str(&e.to_string()))
}

fn parse_symbol(text: &str) -> Result<char, JsValue> {
    single_char(text)
        .ok_or_else(|| JsValue::from_str(&format!("player symbol must be one character, got {text:?}")))
}

fn single_char(text: &str) -> Option<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_char() {
        assert_eq!(single_char("x"), Some('x'));
        assert_eq!(single_char(""), None);
        assert_eq!(single_char("xo"), None);
    }
}
