use tracing::{debug, info, instrument};

use crate::ai::Searcher;
use crate::board::{Board, Mark, NUM_CELLS, Outcome};
use crate::error::GameError;
use crate::types::{GameEndedView, GameState};

/// Picks the cell the given mark should play next.
pub trait MoveSelector: Send + Sync {
    fn select_move(&self, board: &Board, mark: Mark) -> Option<usize>;
}

/// Exhaustive minimax; never loses.
#[derive(Debug, Default, Clone, Copy)]
pub struct MinimaxSelector;

impl MoveSelector for MinimaxSelector {
    fn select_move(&self, board: &Board, mark: Mark) -> Option<usize> {
        Searcher::new().search(board, mark).map(|mv| mv.index)
    }
}

/// Plays the lowest-numbered empty cell.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstEmptySelector;

impl MoveSelector for FirstEmptySelector {
    fn select_move(&self, board: &Board, _mark: Mark) -> Option<usize> {
        board.empty_cells().first().copied()
    }
}

/// Notifications for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    MarkPlaced { index: usize, mark: Mark },
    /// Emitted once per game.
    GameEnded { outcome: Outcome },
}

/// Sequences human and computer turns over one board.
pub struct Game {
    board: Board,
    is_game_over: bool,
    last_computer_move: Option<usize>,
    selector: Box<dyn MoveSelector>,
}

impl Game {
    pub fn new(selector: Box<dyn MoveSelector>) -> Self {
        Self {
            board: Board::new(),
            is_game_over: false,
            last_computer_move: None,
            selector,
        }
    }

    pub fn with_minimax() -> Self {
        Self::new(Box::new(MinimaxSelector))
    }

    /// Starts over with an empty board and input enabled.
    pub fn new_game(&mut self) {
        self.board.reset();
        self.is_game_over = false;
        self.last_computer_move = None;
        info!("new game started");
    }

    /// Handles a click on `index`. Unavailable cells and clicks after the
    /// game ended are ignored and produce no events.
    #[instrument(skip(self))]
    pub fn on_cell_activated(&mut self, index: usize) -> Vec<GameEvent> {
        match self.try_activate(index) {
            Ok(events) => events,
            Err(err) => {
                debug!(%err, "cell activation ignored");
                Vec::new()
            }
        }
    }

    /// Plays the human move at `index` and, unless that ends the game, the
    /// computer's reply.
    pub fn try_activate(&mut self, index: usize) -> Result<Vec<GameEvent>, GameError> {
        if self.is_game_over {
            return Err(GameError::GameOver);
        }

        self.board.place(index, Mark::Human)?;
        let mut events = vec![GameEvent::MarkPlaced {
            index,
            mark: Mark::Human,
        }];
        if self.finish_if_terminal(&mut events) {
            return Ok(events);
        }

        let reply = self.computer_move()?;
        events.push(GameEvent::MarkPlaced {
            index: reply,
            mark: Mark::Computer,
        });
        self.finish_if_terminal(&mut events);

        Ok(events)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn outcome(&self) -> Outcome {
        self.board.outcome()
    }

    pub fn is_over(&self) -> bool {
        self.is_game_over
    }

    pub fn empty_cells(&self) -> Vec<usize> {
        self.board.empty_cells()
    }

    pub fn last_computer_move(&self) -> Option<usize> {
        self.last_computer_move
    }

    pub fn to_game_state(&self) -> GameState {
        let outcome = self.board.outcome();
        GameState {
            board: self.board.to_array().iter().map(|cell| cell.code()).collect(),
            empty_cells: self.board.empty_cells().iter().map(|&i| i as u8).collect(),
            is_game_over: self.is_game_over,
            outcome: GameEndedView::from_outcome(&outcome),
            last_computer_move: self.last_computer_move.map(|i| i as u8),
        }
    }

    fn computer_move(&mut self) -> Result<usize, GameError> {
        let selected = self
            .selector
            .select_move(&self.board, Mark::Computer)
            .ok_or(GameError::SelectorFailed)?;

        if selected >= NUM_CELLS || !self.board.is_empty_cell(selected) {
            return Err(GameError::SelectorFailed);
        }

        self.board.place(selected, Mark::Computer)?;
        self.last_computer_move = Some(selected);
        debug!(index = selected, "computer moved");
        Ok(selected)
    }

    fn finish_if_terminal(&mut self, events: &mut Vec<GameEvent>) -> bool {
        let outcome = self.board.outcome();
        if !outcome.is_terminal() {
            return false;
        }

        self.is_game_over = true;
        info!(?outcome, "game ended");
        events.push(GameEvent::GameEnded { outcome });
        true
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board) {
        self.board = board;
        self.is_game_over = false;
        self.last_computer_move = None;
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::with_minimax()
    }
}
