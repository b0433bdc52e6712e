//! Human-versus-computer game loop.
//!
//! The human plays X and moves first; the computer answers as O with
//! [`Board::best_move`]. Rendering and input belong to the caller.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Board, GameError, Outcome, Player};

/// What happened during one call to [`Game::play`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Turn {
    /// Cell the human played
    pub human: u8,
    /// Computer's reply, None if the human's move ended the game
    pub computer: Option<u8>,
    pub outcome: Outcome,
}

/// A game in progress, with every position reached so far.
#[derive(Clone, Debug)]
pub struct Game {
    history: Vec<Board>,
}

impl Game {
    /// Player controlled by the human.
    pub const HUMAN: Player = Player::X;
    /// Player controlled by the search.
    pub const COMPUTER: Player = Player::O;

    pub fn new() -> Self {
        Self {
            history: vec![Board::new()],
        }
    }

    /// Current position.
    pub fn board(&self) -> Board {
        // history is never empty
        self.history[self.history.len() - 1]
    }

    /// Positions from the empty board to the current one.
    pub fn history(&self) -> &[Board] {
        &self.history
    }

    pub fn outcome(&self) -> Outcome {
        self.board().outcome()
    }

    /// Play the human's move at `cell`, then the computer's reply.
    pub fn play(&mut self, cell: u8) -> Result<Turn, GameError> {
        let board = match self.board().try_play(cell) {
            Ok(board) => board,
            Err(e) => {
                debug!(cell, error = %e, "rejected move");
                return Err(e);
            }
        };
        self.history.push(board);
        debug!(cell, player = %Self::HUMAN, "human move");

        let computer = if board.game_end() {
            None
        } else {
            let reply = board.try_best_move()?;
            self.history.push(board.play(reply));
            debug!(cell = reply, player = %Self::COMPUTER, "computer move");
            Some(reply)
        };

        let outcome = self.outcome();
        if outcome.is_over() {
            debug!(?outcome, moves = self.board().move_count(), "game over");
        }

        Ok(Turn {
            human: cell,
            computer,
            outcome,
        })
    }

    /// Message to show once the game has ended.
    pub fn end_message(&self) -> Option<&'static str> {
        match self.outcome() {
            Outcome::InProgress => None,
            Outcome::Won(Self::HUMAN) => Some("You will never see this message."),
            Outcome::Won(_) => Some("Why would you let me win. Not sure if I'm smart?"),
            Outcome::Draw => Some("It's a draw. What a surprise!"),
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
