//! Solve a single position with the instrumented search.

use std::time::{Duration, Instant};

use tracing::{debug, info};
use ttt_core::{Board, Player, SearchResult, SearchStats, Searcher};

use crate::stats::log_search_summary;

/// Game-theoretic value of a position under optimal play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    XWins,
    OWins,
    Draw,
}

impl Verdict {
    /// Classify a search score. Wins sit near ±100, draws near 0.
    pub fn from_score(score: i32) -> Verdict {
        if score >= 50 {
            Verdict::XWins
        } else if score <= -50 {
            Verdict::OWins
        } else {
            Verdict::Draw
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Verdict::XWins => "X wins with optimal play!",
            Verdict::OWins => "O wins with optimal play!",
            Verdict::Draw => "Game is a draw with optimal play.",
        }
    }
}

/// Everything learned about one position.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub board: Board,
    pub result: SearchResult,
    pub verdict: Verdict,
    /// Both sides following the best move to the end of the game
    pub principal_variation: Vec<u8>,
    pub stats: SearchStats,
    pub elapsed: Duration,
}

/// Search `board` and collect the result, line and node counters.
pub fn analyze(board: Board) -> Analysis {
    let start = Instant::now();
    let mut searcher = Searcher::new();
    let result = searcher.search(board);
    let elapsed = start.elapsed();

    debug!(elapsed_us = elapsed.as_micros() as u64, "root search done");

    Analysis {
        board,
        result,
        verdict: Verdict::from_score(result.score),
        principal_variation: board.principal_variation(),
        stats: *searcher.stats(),
        elapsed,
    }
}

impl Analysis {
    /// Log the result and statistics at info level.
    pub fn log(&self) {
        info!(
            player = %self.board.active_player(),
            moves = self.board.move_count(),
            "position\n{}",
            self.board
        );
        info!(
            score = self.result.score,
            best_move = self.result.move_index(),
            alpha = self.result.alpha,
            beta = self.result.beta,
            "search result"
        );
        info!("principal variation: {}", self.line());
        log_search_summary(&self.stats, self.elapsed);
    }

    /// Principal variation as `X4 O0 X2 ...`.
    pub fn line(&self) -> String {
        if self.principal_variation.is_empty() {
            return "(game over)".to_string();
        }

        let mut player = self.board.active_player();
        let mut moves = Vec::with_capacity(self.principal_variation.len());
        for cell in &self.principal_variation {
            moves.push(format!("{}{}", player, cell));
            player = player.opponent();
        }
        moves.join(" ")
    }

    /// Player who wins under optimal play, if anyone does.
    pub fn winner(&self) -> Option<Player> {
        match self.verdict {
            Verdict::XWins => Some(Player::X),
            Verdict::OWins => Some(Player::O),
            Verdict::Draw => None,
        }
    }
}
