//! WASM bindings for ttt-core
//!
//! Provides a JavaScript-friendly API for the board and the game loop.

use wasm_bindgen::prelude::*;

use crate::{Board, Game, Outcome, Player};

fn player_from_char(player: char) -> Option<Player> {
    match player {
        'x' | 'X' => Some(Player::X),
        'o' | 'O' => Some(Player::O),
        _ => None,
    }
}

/// WASM-friendly wrapper around Board
#[wasm_bindgen]
pub struct WasmBoard {
    inner: Board,
}

#[wasm_bindgen]
impl WasmBoard {
    /// Create a new empty board, X to move
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmBoard {
        WasmBoard { inner: Board::new() }
    }

    /// Rebuild a board from its occupancy word and the player to move ('x' or 'o')
    #[wasm_bindgen(js_name = fromState)]
    pub fn from_state(occupancy: u32, player: char) -> Result<WasmBoard, JsError> {
        let player = player_from_char(player)
            .ok_or_else(|| JsError::new("player must be 'x' or 'o'"))?;
        Ok(WasmBoard { inner: Board::from_parts(occupancy, player) })
    }

    /// Raw occupancy word
    pub fn occupancy(&self) -> u32 {
        self.inner.occupancy()
    }

    /// Player to move ('x' or 'o')
    #[wasm_bindgen(js_name = activePlayer)]
    pub fn active_player(&self) -> char {
        self.inner.active_player().symbol().to_ascii_lowercase()
    }

    /// Board after the active player marks `cell`.
    /// Throws if the cell is taken, out of range, or the game is over.
    #[wasm_bindgen(js_name = "move")]
    pub fn play(&self, cell: u8) -> Result<WasmBoard, JsError> {
        Ok(WasmBoard { inner: self.inner.try_play(cell)? })
    }

    /// Empty cells as a 9-bit mask
    #[wasm_bindgen(js_name = possibleMoves)]
    pub fn possible_moves(&self) -> u16 {
        self.inner.possible_moves()
    }

    /// Whether `player` ('x' or 'o') has three in a row
    pub fn win(&self, player: char) -> bool {
        player_from_char(player).is_some_and(|p| self.inner.win(p))
    }

    #[wasm_bindgen(js_name = gameEnd)]
    pub fn game_end(&self) -> bool {
        self.inner.game_end()
    }

    /// Best cell for the player to move, or -1 if the game is over
    #[wasm_bindgen(js_name = bestMove)]
    pub fn best_move(&self) -> i8 {
        self.inner.minimax_move().move_index()
    }

    /// Full search result as { score, best_move, alpha, beta }
    #[wasm_bindgen(js_name = minimaxMove)]
    pub fn minimax_move(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.inner.minimax_move())?)
    }

    /// Marks for rendering: 9 entries of 0 (empty), 1 (X) or 2 (O)
    pub fn cells(&self) -> Vec<u8> {
        (0..9)
            .map(|cell| match self.inner.cell(cell) {
                None => 0,
                Some(Player::X) => 1,
                Some(Player::O) => 2,
            })
            .collect()
    }
}

impl Default for WasmBoard {
    fn default() -> Self {
        Self::new()
    }
}

/// Human (X) against the search (O)
#[wasm_bindgen]
pub struct WasmGame {
    inner: Game,
}

#[wasm_bindgen]
impl WasmGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmGame {
        WasmGame { inner: Game::new() }
    }

    /// Current position
    pub fn board(&self) -> WasmBoard {
        WasmBoard { inner: self.inner.board() }
    }

    /// Play the human's cell and the computer's reply.
    /// Returns { human, computer, outcome } or throws on a rejected move.
    pub fn play(&mut self, cell: u8) -> Result<JsValue, JsError> {
        let turn = self.inner.play(cell)?;
        Ok(serde_wasm_bindgen::to_value(&turn)?)
    }

    /// Game result: "ongoing", "x_wins", "o_wins", or "draw"
    pub fn result(&self) -> String {
        match self.inner.outcome() {
            Outcome::InProgress => "ongoing".to_string(),
            Outcome::Won(Player::X) => "x_wins".to_string(),
            Outcome::Won(Player::O) => "o_wins".to_string(),
            Outcome::Draw => "draw".to_string(),
        }
    }

    /// Pop-up text once the game has ended, undefined before
    #[wasm_bindgen(js_name = endMessage)]
    pub fn end_message(&self) -> Option<String> {
        self.inner.end_message().map(str::to_string)
    }
}

impl Default for WasmGame {
    fn default() -> Self {
        Self::new()
    }
}
