//! Tic-tac-toe game logic with bit-based board representation.
//!
//! # Board Encoding (18 bits)
//!
//! ```text
//! Bits 0-8:   cells occupied by X (first player)
//! Bits 9-17:  cells occupied by O (second player)
//! Bits 18-31: unused (always zero)
//!
//! Cell indices (row-major order):
//!   (0,0)=0  (0,1)=1  (0,2)=2
//!   (1,0)=3  (1,1)=4  (1,2)=5
//!   (2,0)=6  (2,1)=7  (2,2)=8
//! ```
//!
//! A move for X at cell `i` sets bit `i`; a move for O sets bit `i + 9`.
//! The empty board is `0`, a board filled with X is `511` and a board
//! filled with O is `511 << 9 = 261_632`.
//!
//! The player to move is stored next to the occupancy word. Boards are
//! `Copy` values: every operation returns a new `Board`.

pub mod error;
pub mod game;
pub mod search;

#[cfg(feature = "wasm")]
pub mod wasm;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use error::GameError;
pub use game::{Game, Turn};
pub use search::{SearchResult, SearchStats, Searcher};

/// Number of cells on the board.
pub const CELLS: u8 = 9;

/// Mask with one bit per cell (`0b1_1111_1111`).
pub const ALL_CELLS: u16 = 0b1_1111_1111;

/// Winning lines as 9-bit masks over the cell space.
///
/// ```text
///   273                 84
///      \               /
///        1 |   2 |   4    = 7
///      ----+-----+----
///        8 |  16 |  32    = 56
///      ----+-----+----
///       64 | 128 | 256    = 448
///      ----+-----+----
///      =73  =146  =292
/// ```
pub const WIN_MASKS: [u16; 8] = [
    0b000_000_111, // Row 0: cells 0,1,2
    0b000_111_000, // Row 1: cells 3,4,5
    0b111_000_000, // Row 2: cells 6,7,8
    0b001_001_001, // Col 0: cells 0,3,6
    0b010_010_010, // Col 1: cells 1,4,7
    0b100_100_100, // Col 2: cells 2,5,8
    0b100_010_001, // Main diagonal: cells 0,4,8
    0b001_010_100, // Anti-diagonal: cells 2,4,6
];

/// Player identifier. X moves first and maximizes the search score.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player.
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Bit offset of this player's half of the occupancy word.
    #[inline]
    pub const fn shift(self) -> u32 {
        match self {
            Player::X => 0,
            Player::O => CELLS as u32,
        }
    }

    /// Mark used when rendering the board.
    #[inline]
    pub fn symbol(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// State of a game as seen by whoever renders it.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Outcome {
    InProgress,
    Won(Player),
    Draw,
}

impl Outcome {
    /// Whether the game is over.
    pub fn is_over(self) -> bool {
        self != Outcome::InProgress
    }
}

/// Compact board state.
///
/// See module documentation for encoding details.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Board {
    occupancy: u32,
    active: Player,
}

impl Board {
    /// Mask for one player's half (9 bits).
    const HALF_MASK: u32 = ALL_CELLS as u32;

    /// Create a new empty board with X to move.
    #[inline]
    pub fn new() -> Board {
        Board {
            occupancy: 0,
            active: Player::X,
        }
    }

    /// Rebuild a board from a raw occupancy word and the player to move.
    ///
    /// Does NOT validate - a cell marked for both players is accepted as is.
    #[inline]
    pub fn from_parts(occupancy: u32, active: Player) -> Board {
        Board { occupancy, active }
    }

    /// Get the raw occupancy word.
    #[inline]
    pub fn occupancy(&self) -> u32 {
        self.occupancy
    }

    /// Get the player to move.
    #[inline]
    pub fn active_player(&self) -> Player {
        self.active
    }

    /// Cells owned by a player, shifted down to the low 9 bits.
    #[inline]
    pub fn player_mask(&self, player: Player) -> u16 {
        ((self.occupancy >> player.shift()) & Self::HALF_MASK) as u16
    }

    /// Cells owned by either player.
    #[inline]
    pub fn occupied_mask(&self) -> u16 {
        self.player_mask(Player::X) | self.player_mask(Player::O)
    }

    /// Number of marks on the board.
    #[inline]
    pub fn move_count(&self) -> u32 {
        self.occupancy.count_ones()
    }

    /// Owner of a cell, or None if it is empty.
    ///
    /// X wins ties on corrupted boards where both bits are set.
    pub fn cell(&self, cell: u8) -> Option<Player> {
        if cell >= CELLS {
            return None;
        }
        let bit = 1u16 << cell;
        if self.player_mask(Player::X) & bit != 0 {
            Some(Player::X)
        } else if self.player_mask(Player::O) & bit != 0 {
            Some(Player::O)
        } else {
            None
        }
    }

    /// Check if a cell is empty.
    #[inline]
    pub fn is_empty(&self, cell: u8) -> bool {
        cell < CELLS && self.possible_moves() & (1 << cell) != 0
    }

    // ========== Moves ==========

    /// Place the active player's mark on `cell` and pass the turn.
    ///
    /// Does NOT validate - caller must ensure the cell is empty and in
    /// range. Use [`Board::try_play`] for a checked version.
    ///
    /// # Panics
    ///
    /// Debug builds panic if `cell` is not in `0..9`.
    #[inline]
    pub fn play(self, cell: u8) -> Board {
        debug_assert!(cell < CELLS, "cell index {} is outside the board", cell);
        Board {
            occupancy: self.occupancy | (1 << (cell as u32 + self.active.shift())),
            active: self.active.opponent(),
        }
    }

    /// Checked version of [`Board::play`].
    ///
    /// Errors are reported in this order: `GameOver`, `CellOutOfRange`,
    /// `InvalidMove`.
    pub fn try_play(self, cell: u8) -> Result<Board, GameError> {
        if self.game_end() {
            return Err(GameError::GameOver);
        }
        if cell >= CELLS {
            return Err(GameError::CellOutOfRange(cell));
        }
        if !self.is_empty(cell) {
            return Err(GameError::InvalidMove { cell });
        }
        Ok(self.play(cell))
    }

    /// Empty cells as a 9-bit mask.
    #[inline]
    pub fn possible_moves(&self) -> u16 {
        ALL_CELLS & !self.occupied_mask()
    }

    /// Iterate over empty cells in ascending order.
    pub fn legal_moves(&self) -> impl Iterator<Item = u8> {
        let moves = self.possible_moves();
        (0..CELLS).filter(move |&cell| moves & (1 << cell) != 0)
    }

    // ========== Win Detection ==========

    /// Check if the given player has three in a row.
    #[inline]
    pub fn win(&self, player: Player) -> bool {
        let mask = self.player_mask(player);
        WIN_MASKS.iter().any(|&line| mask & line == line)
    }

    /// Get the first winning line for a player, if any.
    pub fn winning_line(&self, player: Player) -> Option<[u8; 3]> {
        let mask = self.player_mask(player);
        let line = WIN_MASKS.iter().copied().find(|&line| mask & line == line)?;

        let mut cells = [0u8; 3];
        let mut n = 0;
        for cell in 0..CELLS {
            if line & (1 << cell) != 0 {
                cells[n] = cell;
                n += 1;
            }
        }
        Some(cells)
    }

    /// Check if either player has won. X is checked first.
    pub fn winner(&self) -> Option<Player> {
        if self.win(Player::X) {
            Some(Player::X)
        } else if self.win(Player::O) {
            Some(Player::O)
        } else {
            None
        }
    }

    /// All nine cells are taken.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.move_count() == CELLS as u32
    }

    /// The game is over: somebody won or the board is full.
    #[inline]
    pub fn game_end(&self) -> bool {
        self.win(Player::X) || self.win(Player::O) || self.is_full()
    }

    /// Current outcome of the game.
    pub fn outcome(&self) -> Outcome {
        match self.winner() {
            Some(player) => Outcome::Won(player),
            None if self.is_full() => Outcome::Draw,
            None => Outcome::InProgress,
        }
    }

    // ========== Symmetry & Canonicalization ==========

    /// Position mapping for each of 8 D4 transformations.
    /// Each array maps new_cell -> old_cell for that transformation.
    const TRANSFORMS: [[u8; 9]; 8] = [
        [0, 1, 2, 3, 4, 5, 6, 7, 8], // Identity
        [6, 3, 0, 7, 4, 1, 8, 5, 2], // Rotate 90° clockwise
        [8, 7, 6, 5, 4, 3, 2, 1, 0], // Rotate 180°
        [2, 5, 8, 1, 4, 7, 0, 3, 6], // Rotate 270° clockwise
        [2, 1, 0, 5, 4, 3, 8, 7, 6], // Reflect horizontal (flip left-right)
        [6, 7, 8, 3, 4, 5, 0, 1, 2], // Reflect vertical (flip top-bottom)
        [0, 3, 6, 1, 4, 7, 2, 5, 8], // Reflect main diagonal
        [8, 5, 2, 7, 4, 1, 6, 3, 0], // Reflect anti-diagonal
    ];

    /// Apply transformation `t` (0-7) to both halves of the board.
    pub fn transform(&self, t: usize) -> Board {
        let mapping = &Self::TRANSFORMS[t % Self::TRANSFORMS.len()];
        let mut occupancy = 0u32;

        for (new_cell, &old_cell) in mapping.iter().enumerate() {
            for player in [Player::X, Player::O] {
                let bit = (self.occupancy >> (old_cell as u32 + player.shift())) & 1;
                occupancy |= bit << (new_cell as u32 + player.shift());
            }
        }

        Board {
            occupancy,
            active: self.active,
        }
    }

    /// Minimum occupancy across all 8 symmetries, player to move preserved.
    ///
    /// Symmetric positions share the same canonical form.
    pub fn canonical(&self) -> Board {
        (1..Self::TRANSFORMS.len())
            .map(|t| self.transform(t))
            .fold(*self, |min, b| if b.occupancy < min.occupancy { b } else { min })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                let ch = self.cell(row * 3 + col).map_or('.', Player::symbol);
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", ch)?;
            }
            if row < 2 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = GameError;

    /// Parse nine cells written as `X`, `O` or `.` (also `-`, `_`).
    ///
    /// Whitespace, `|` and `/` are separators. The player to move is
    /// inferred from the mark counts.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut occupancy = 0u32;
        let mut cell = 0u32;

        for ch in s.chars() {
            let owner = match ch {
                c if c.is_whitespace() || c == '|' || c == '/' => continue,
                'X' | 'x' => Some(Player::X),
                'O' | 'o' => Some(Player::O),
                '.' | '-' | '_' => None,
                other => {
                    return Err(GameError::ParseBoard(format!("unexpected character {:?}", other)))
                }
            };
            if cell >= CELLS as u32 {
                return Err(GameError::ParseBoard("more than 9 cells".to_string()));
            }
            if let Some(player) = owner {
                occupancy |= 1 << (cell + player.shift());
            }
            cell += 1;
        }

        if cell != CELLS as u32 {
            return Err(GameError::ParseBoard(format!("expected 9 cells, found {}", cell)));
        }

        let xs = (occupancy & Self::HALF_MASK).count_ones();
        let os = (occupancy >> CELLS).count_ones();
        let active = match xs.checked_sub(os) {
            Some(0) => Player::X,
            Some(1) => Player::O,
            _ => {
                return Err(GameError::ParseBoard(format!(
                    "impossible mark counts: {} X, {} O",
                    xs, os
                )))
            }
        };

        Ok(Board { occupancy, active })
    }
}
