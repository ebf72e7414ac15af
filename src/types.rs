use serde::Serialize;

use crate::board::Outcome;
use crate::game::GameEvent;

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// 0=empty, 1=human (O), 2=computer (X).
    pub board: Vec<u8>,
    pub empty_cells: Vec<u8>,
    pub is_game_over: bool,
    /// `None` while the game is in progress.
    pub outcome: Option<GameEndedView>,
    pub last_computer_move: Option<u8>,
}

/// End-of-game data for highlighting and the banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameEndedView {
    /// `human_win`, `computer_win` or `tie`.
    pub result: &'static str,
    pub line: Vec<u8>,
    pub message: &'static str,
    pub color: &'static str,
}

impl GameEndedView {
    pub fn from_outcome(outcome: &Outcome) -> Option<Self> {
        let result = match outcome {
            Outcome::HumanWin(_) => "human_win",
            Outcome::ComputerWin(_) => "computer_win",
            Outcome::Tie => "tie",
            Outcome::InProgress => return None,
        };

        Some(Self {
            result,
            line: outcome.highlight_cells(),
            message: outcome.message()?,
            color: outcome.highlight_color()?,
        })
    }
}

/// One entry of the list returned by `onCellActivated`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CellEvent {
    MarkPlaced { index: u8, symbol: &'static str },
    GameEnded(GameEndedView),
}

impl CellEvent {
    pub fn from_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::MarkPlaced { index, mark } => Some(Self::MarkPlaced {
                index: *index as u8,
                symbol: mark.symbol(),
            }),
            GameEvent::GameEnded { outcome } => {
                GameEndedView::from_outcome(outcome).map(Self::GameEnded)
            }
        }
    }
}
