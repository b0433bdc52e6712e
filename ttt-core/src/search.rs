//! Exact minimax search with alpha-beta pruning.
//!
//! X maximizes, O minimizes. Terminal scores are `+100` (X won), `-100`
//! (O won) and `0` (full board). Each non-terminal node moves its score one
//! point toward the side that did not move (`-1` when X moved, `+1` when O
//! moved), so a node one ply before an X win reports 99.
//!
//! Every node starts from the full `[-100, 100]` window; bounds are not
//! inherited from the parent. Moves are scanned in ascending cell order,
//! with an immediately winning cell tried first, and a node stops once
//! `alpha >= beta`.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{Board, GameError, Player};

/// Score of a position X has won.
pub const X_WIN_SCORE: i32 = 100;
/// Score of a position O has won.
pub const O_WIN_SCORE: i32 = -100;
/// Score of a full board with no winner.
pub const DRAW_SCORE: i32 = 0;

/// Result of a search: `(score, move, alpha, beta)`.
///
/// `alpha` and `beta` are the node's pruning bounds at the point of return.
/// They are exposed for tests; callers should only rely on `score` and
/// `best_move`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct SearchResult {
    pub score: i32,
    /// Chosen cell, or None on a terminal board.
    pub best_move: Option<u8>,
    pub alpha: i32,
    pub beta: i32,
}

impl SearchResult {
    #[inline]
    const fn terminal(score: i32) -> SearchResult {
        SearchResult {
            score,
            best_move: None,
            alpha: score,
            beta: score,
        }
    }

    /// Move as a signed index, `-1` when there is none.
    pub fn move_index(&self) -> i8 {
        self.best_move.map_or(-1, |cell| cell as i8)
    }
}

/// Counters collected by [`Searcher`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    /// Positions visited, root included
    pub nodes: u64,

    /// Terminal positions by outcome
    pub x_wins: u64,
    pub o_wins: u64,
    pub draws: u64,

    /// Nodes that stopped early because alpha >= beta
    pub cutoffs: u64,

    /// Deepest ply reached below the root
    pub max_depth: u32,
}

impl SearchStats {
    /// Total terminal positions visited.
    pub fn terminals(&self) -> u64 {
        self.x_wins + self.o_wins + self.draws
    }
}

/// Hooks called while the tree is walked.
trait Observer {
    fn node(&mut self, _depth: u32) {}
    fn terminal(&mut self, _score: i32) {}
    fn cutoff(&mut self) {}
}

impl Observer for () {}

impl Observer for SearchStats {
    fn node(&mut self, depth: u32) {
        self.nodes += 1;
        self.max_depth = self.max_depth.max(depth);
    }

    fn terminal(&mut self, score: i32) {
        match score {
            X_WIN_SCORE => self.x_wins += 1,
            O_WIN_SCORE => self.o_wins += 1,
            _ => self.draws += 1,
        }
    }

    fn cutoff(&mut self) {
        self.cutoffs += 1;
    }
}

/// Search driver that records [`SearchStats`] across calls.
///
/// Produces exactly the same results as [`Board::minimax_move`].
#[derive(Debug, Default)]
pub struct Searcher {
    stats: SearchStats,
}

impl Searcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Search `board` and add its counters to the running totals.
    pub fn search(&mut self, board: Board) -> SearchResult {
        minimax(board, 0, &mut self.stats)
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Clear the counters.
    pub fn reset(&mut self) {
        self.stats = SearchStats::default();
    }
}

fn terminal_result(board: &Board) -> Option<SearchResult> {
    if board.win(Player::X) {
        Some(SearchResult::terminal(X_WIN_SCORE))
    } else if board.win(Player::O) {
        Some(SearchResult::terminal(O_WIN_SCORE))
    } else if board.is_full() {
        Some(SearchResult::terminal(DRAW_SCORE))
    } else {
        None
    }
}

/// Empty cells in ascending order, except that a cell completing a line
/// for the player to move comes first. Its terminal score closes the window,
/// so an immediate win is never passed over for a slower one.
fn move_order(board: Board) -> impl Iterator<Item = u8> {
    let mover = board.active_player();
    let winning = board
        .legal_moves()
        .find(|&cell| board.play(cell).win(mover));
    let rest = board.legal_moves().filter(move |&cell| Some(cell) != winning);
    winning.into_iter().chain(rest)
}

fn minimax<O: Observer>(board: Board, depth: u32, observer: &mut O) -> SearchResult {
    observer.node(depth);

    if let Some(result) = terminal_result(&board) {
        observer.terminal(result.score);
        return result;
    }

    let maximizing = board.active_player() == Player::X;
    let mut best: Option<(i32, u8)> = None;
    let mut alpha = O_WIN_SCORE;
    let mut beta = X_WIN_SCORE;

    for cell in move_order(board) {
        let score = minimax(board.play(cell), depth + 1, observer).score;

        let improves = match best {
            None => true,
            Some((best_score, _)) if maximizing => score > best_score,
            Some((best_score, _)) => score < best_score,
        };
        if improves {
            best = Some((score, cell));
        }

        if maximizing {
            alpha = alpha.max(score);
        } else {
            beta = beta.min(score);
        }

        if alpha >= beta {
            observer.cutoff();
            break;
        }
    }

    // Only reachable when a cell is marked for both players.
    let Some((score, cell)) = best else {
        observer.terminal(DRAW_SCORE);
        return SearchResult::terminal(DRAW_SCORE);
    };

    let adjust = if maximizing { -1 } else { 1 };
    SearchResult {
        score: score + adjust,
        best_move: Some(cell),
        alpha,
        beta,
    }
}

impl Board {
    /// Run the full search from this position.
    pub fn minimax_move(&self) -> SearchResult {
        let result = minimax(*self, 0, &mut ());
        trace!(
            occupancy = self.occupancy(),
            player = %self.active_player(),
            score = result.score,
            best_move = ?result.best_move,
            "minimax search"
        );
        result
    }

    /// Best cell for the player to move, or None if the game is over.
    ///
    /// Check [`Board::game_end`] first; None must not be rendered as a move.
    pub fn best_move(&self) -> Option<u8> {
        self.minimax_move().best_move
    }

    /// Checked version of [`Board::best_move`].
    pub fn try_best_move(&self) -> Result<u8, GameError> {
        if self.game_end() {
            return Err(GameError::NoMovesAvailable);
        }
        self.best_move().ok_or(GameError::NoMovesAvailable)
    }

    /// Cells played when both sides follow [`Board::best_move`] to the end.
    pub fn principal_variation(&self) -> Vec<u8> {
        let mut line = Vec::with_capacity(self.possible_moves().count_ones() as usize);
        let mut board = *self;
        while let Some(cell) = board.best_move() {
            line.push(cell);
            board = board.play(cell);
        }
        line
    }
}
