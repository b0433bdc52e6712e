//! Full game tree enumeration.
//!
//! Every path from the root is walked; transpositions reached through
//! different move orders count as distinct nodes. Distinct positions are
//! tracked separately, both as-is and up to the 8 board symmetries.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use tracing::{debug, info};
use ttt_core::{Board, Outcome, Player};

use crate::stats::{format_elapsed, format_rate, percent};

/// Stack frame for iterative DFS.
struct Frame {
    board: Board,
    /// Empty cells not yet explored from this node
    remaining: u16,
}

impl Frame {
    fn new(board: Board) -> Self {
        Self {
            board,
            remaining: board.possible_moves(),
        }
    }

    /// Pop the lowest unexplored cell.
    fn next_cell(&mut self) -> Option<u8> {
        if self.remaining == 0 {
            return None;
        }
        let cell = self.remaining.trailing_zeros() as u8;
        self.remaining &= self.remaining - 1;
        Some(cell)
    }
}

/// Counts gathered by [`count_tree`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TreeStats {
    /// Nodes visited, root included
    pub nodes: u64,
    /// Finished games won by X
    pub x_wins: u64,
    /// Finished games won by O
    pub o_wins: u64,
    /// Finished games with a full board and no line
    pub draws: u64,
    /// Deepest ply reached
    pub max_depth: u32,
    /// Distinct reachable positions
    pub positions: usize,
    /// Distinct positions up to rotation and reflection
    pub canonical_positions: usize,
}

impl TreeStats {
    /// Finished games (leaves of the tree).
    pub fn games(&self) -> u64 {
        self.x_wins + self.o_wins + self.draws
    }

    pub fn log_summary(&self, elapsed: Duration) {
        let games = self.games();
        info!(
            "{} nodes={} rate={} max_depth={}",
            format_elapsed(elapsed),
            self.nodes,
            format_rate(self.nodes, elapsed),
            self.max_depth,
        );
        info!(
            "games={} x_wins={} ({:.1}%) o_wins={} ({:.1}%) draws={} ({:.1}%)",
            games,
            self.x_wins,
            percent(self.x_wins, games),
            self.o_wins,
            percent(self.o_wins, games),
            self.draws,
            percent(self.draws, games),
        );
        info!(
            "positions={} canonical={}",
            self.positions, self.canonical_positions
        );
    }
}

/// Enumerate every game playable from `root`.
pub fn count_tree(root: Board) -> TreeStats {
    let start = Instant::now();
    let mut stats = TreeStats::default();
    let mut positions: HashSet<Board> = HashSet::new();
    let mut canonical: HashSet<Board> = HashSet::new();
    let mut stack: Vec<Frame> = Vec::with_capacity(10);

    let mut visit = |board: Board, depth: u32, stats: &mut TreeStats| -> bool {
        stats.nodes += 1;
        stats.max_depth = stats.max_depth.max(depth);
        positions.insert(board);
        canonical.insert(board.canonical());

        match board.outcome() {
            Outcome::InProgress => true,
            Outcome::Won(Player::X) => {
                stats.x_wins += 1;
                false
            }
            Outcome::Won(Player::O) => {
                stats.o_wins += 1;
                false
            }
            Outcome::Draw => {
                stats.draws += 1;
                false
            }
        }
    };

    if visit(root, 0, &mut stats) {
        stack.push(Frame::new(root));
    }

    while let Some(frame) = stack.last_mut() {
        match frame.next_cell() {
            Some(cell) => {
                let child = frame.board.play(cell);
                let depth = stack.len() as u32;
                if visit(child, depth, &mut stats) {
                    stack.push(Frame::new(child));
                }
            }
            None => {
                stack.pop();
            }
        }
    }

    stats.positions = positions.len();
    stats.canonical_positions = canonical.len();
    debug!(
        elapsed_ms = start.elapsed().as_millis() as u64,
        nodes = stats.nodes,
        "tree enumeration finished"
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_tree_counts() {
        let stats = count_tree(Board::new());
        assert_eq!(stats.nodes, 549_946);
        assert_eq!(stats.games(), 255_168);
        assert_eq!(stats.x_wins, 131_184);
        assert_eq!(stats.o_wins, 77_904);
        assert_eq!(stats.draws, 46_080);
        assert_eq!(stats.max_depth, 9);
    }

    #[test]
    fn test_distinct_positions() {
        let stats = count_tree(Board::new());
        assert_eq!(stats.positions, 5_478);
        assert_eq!(stats.canonical_positions, 765);
    }

    #[test]
    fn test_terminal_root() {
        let stats = count_tree(Board::from_parts(7, Player::O));
        assert_eq!(stats.nodes, 1);
        assert_eq!(stats.x_wins, 1);
        assert_eq!(stats.games(), 1);
        assert_eq!(stats.max_depth, 0);
        assert_eq!(stats.positions, 1);
    }

    #[test]
    fn test_one_empty_cell() {
        // X fills 8 and completes the diagonal
        let board: Board = "XOX/OXO/OX.".parse().unwrap();
        let stats = count_tree(board);
        assert_eq!(stats.nodes, 2);
        assert_eq!(stats.x_wins, 1);
        assert_eq!(stats.games(), 1);
        assert_eq!(stats.max_depth, 1);
    }
}
