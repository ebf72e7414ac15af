use wasm_bindgen::prelude::*;

use crate::game::Game;
use crate::logging::{self, DEFAULT_LOG_FILTER};
use crate::types::CellEvent;

/// Installs console logging. `filter` defaults to `tictactoe=info`.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(filter: Option<String>) -> Result<(), JsError> {
    let filter = filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER);
    logging::init_logging(filter).map_err(|err| JsError::new(&err.to_string()))
}

/// Browser-facing handle to one game against the minimax computer.
#[wasm_bindgen]
pub struct TicTacToe {
    game: Game,
}

#[wasm_bindgen]
impl TicTacToe {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            game: Game::with_minimax(),
        }
    }

    /// Returns the events produced by the click; an empty array for ignored clicks.
    #[wasm_bindgen(js_name = onCellActivated)]
    pub fn on_cell_activated(&mut self, index: usize) -> Result<JsValue, JsError> {
        let events: Vec<CellEvent> = self
            .game
            .on_cell_activated(index)
            .iter()
            .filter_map(CellEvent::from_event)
            .collect();
        to_js(&events)
    }

    #[wasm_bindgen(js_name = newGame)]
    pub fn new_game(&mut self) {
        self.game.new_game();
    }

    pub fn state(&self) -> Result<JsValue, JsError> {
        to_js(&self.game.to_game_state())
    }

    #[wasm_bindgen(js_name = emptyCells)]
    pub fn empty_cells(&self) -> Vec<u8> {
        self.game.empty_cells().iter().map(|&i| i as u8).collect()
    }
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new()
    }
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|err| JsError::new(&err.to_string()))
}
