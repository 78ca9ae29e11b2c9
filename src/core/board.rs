//! Board model: the nine cells, the eight winning lines and the derived game status.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::Player;
use crate::utils::InvalidMove;

pub const BOARD_SIZE: usize = 9;

/// Rows, then columns, then diagonals. Indices are row-major.
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Marked(Player),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn mark(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Marked(player) => Some(player),
        }
    }
}

/// Outcome of the current game, derived from the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won(Player),
    Draw,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            GameStatus::Won(player) => Some(player),
            _ => None,
        }
    }
}

/// A validated board position in `0..9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellIndex(usize);

impl CellIndex {
    pub fn new(index: usize) -> Result<Self, InvalidMove> {
        if index < BOARD_SIZE {
            Ok(Self(index))
        } else {
            Err(InvalidMove::OutOfRange {
                index: i64::try_from(index).unwrap_or(i64::MAX),
            })
        }
    }

    pub fn get(self) -> usize {
        self.0
    }

    pub fn row(self) -> usize {
        self.0 / 3
    }

    pub fn column(self) -> usize {
        self.0 % 3
    }
}

impl TryFrom<i64> for CellIndex {
    type Error = InvalidMove;

    fn try_from(index: i64) -> Result<Self, Self::Error> {
        usize::try_from(index)
            .ok()
            .filter(|i| *i < BOARD_SIZE)
            .map(Self)
            .ok_or(InvalidMove::OutOfRange { index })
    }
}

impl From<CellIndex> for usize {
    fn from(index: CellIndex) -> Self {
        index.0
    }
}

impl fmt::Display for CellIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; BOARD_SIZE],
        }
    }

    pub fn get(&self, index: CellIndex) -> Cell {
        self.cells[index.get()]
    }

    pub fn cells(&self) -> &[Cell; BOARD_SIZE] {
        &self.cells
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    pub fn marked_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    pub fn empty_cells(&self) -> Vec<CellIndex> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(index, _)| CellIndex(index))
            .collect()
    }

    /// First line fully held by `player`, in `WINNING_LINES` order.
    pub fn winning_line(&self, player: Player) -> Option<[usize; 3]> {
        WINNING_LINES
            .iter()
            .copied()
            .find(|line| line.iter().all(|&i| self.cells[i] == Cell::Marked(player)))
    }

    /// Status after `mover` has just placed a mark. Only the mover can have
    /// completed a line, so the opponent's lines are not checked.
    pub fn status_after_move(&self, mover: Player) -> GameStatus {
        if self.winning_line(mover).is_some() {
            GameStatus::Won(mover)
        } else if self.is_full() {
            GameStatus::Draw
        } else {
            GameStatus::InProgress
        }
    }

    pub(crate) fn place(&mut self, index: CellIndex, player: Player) {
        self.cells[index.get()] = Cell::Marked(player);
    }

    pub(crate) fn clear(&mut self) {
        self.cells = [Cell::Empty; BOARD_SIZE];
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.cells.chunks(3).enumerate() {
            let line: Vec<String> = cells
                .iter()
                .map(|cell| match cell {
                    Cell::Empty => ".".to_string(),
                    Cell::Marked(player) => player.to_string(),
                })
                .collect();
            write!(f, "{}", line.join(" "))?;
            if row < 2 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
