use thiserror::Error;

/// Errors raised by the board and the game controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    /// Index out of range, or the cell is already occupied.
    #[error("invalid move: cell {index} is not available")]
    InvalidMove { index: usize },

    #[error("game is already over")]
    GameOver,

    /// The move selector returned no cell, or one that is not empty.
    #[error("move selector did not produce an empty cell")]
    SelectorFailed,
}

/// Errors raised while installing the log subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log filter `{directive}`: {message}")]
    InvalidFilter { directive: String, message: String },

    #[error("failed to install log subscriber: {0}")]
    Install(String),
}
