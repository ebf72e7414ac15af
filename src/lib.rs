use wasm_bindgen::prelude::*;

pub mod ai;
pub mod bindings;
pub mod board;
pub mod error;
pub mod game;
pub mod logging;
pub mod types;

pub use board::{Board, Cell, Mark, Outcome, WIN_LINES, WinLine};
pub use error::GameError;
pub use game::{Game, GameEvent, MoveSelector};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
