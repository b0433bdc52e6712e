//! Errors reported by the checked entry points.

use thiserror::Error;

/// Rejected move or query.
///
/// The unchecked `Board::play` / `Board::best_move` never produce these;
/// they trust the caller the way the UI layer is trusted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("This position is taken. Try another. (cell {cell})")]
    InvalidMove { cell: u8 },

    #[error("cell index {0} is outside the board (0-8)")]
    CellOutOfRange(u8),

    #[error("no moves available: the game is over")]
    NoMovesAvailable,

    #[error("the game is already over")]
    GameOver,

    #[error("invalid board text: {0}")]
    ParseBoard(String),
}
