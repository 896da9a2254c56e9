//! 3×3 board, marks, and outcome evaluation.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::str::FromStr;

pub const BOARD_LEN: usize = 9;

/// The 8 winning triples: 3 rows, 3 columns, 2 diagonals.
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

/// A placed mark. The human plays `X`, the opponent `O`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    #[serde(rename = "X")]
    Player,
    #[serde(rename = "O")]
    Opponent,
}

impl Mark {
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Mark::Player => 'X',
            Mark::Opponent => 'O',
        }
    }

    #[must_use]
    pub const fn other(self) -> Mark {
        match self {
            Mark::Player => Mark::Opponent,
            Mark::Opponent => Mark::Player,
        }
    }
}

/// Result of evaluating a board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    InProgress,
    PlayerWins,
    OpponentWins,
    Draw,
}

impl Outcome {
    /// The outcome in which `mark` has won.
    #[must_use]
    pub const fn won_by(mark: Mark) -> Outcome {
        match mark {
            Mark::Player => Outcome::PlayerWins,
            Mark::Opponent => Outcome::OpponentWins,
        }
    }

    #[must_use]
    pub const fn is_decided(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    #[must_use]
    pub const fn winner(self) -> Option<Mark> {
        match self {
            Outcome::PlayerWins => Some(Mark::Player),
            Outcome::OpponentWins => Some(Mark::Opponent),
            Outcome::InProgress | Outcome::Draw => None,
        }
    }
}

/// Nine cells in row-major order. A marked cell is only cleared by a full reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [Option<Mark>; BOARD_LEN],
}

impl Board {
    /// Empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_cells(cells: [Option<Mark>; BOARD_LEN]) -> Self {
        Self { cells }
    }

    #[must_use]
    pub fn cells(&self) -> &[Option<Mark>; BOARD_LEN] {
        &self.cells
    }

    /// Mark at `index`, or `None` if empty or out of range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied().flatten()
    }

    /// Whether `index` is on the board and unmarked.
    #[must_use]
    pub fn is_open(&self, index: usize) -> bool {
        index < BOARD_LEN && self.cells[index].is_none()
    }

    /// Indices of unmarked cells, ascending.
    #[must_use]
    pub fn empty_cells(&self) -> SmallVec<[usize; BOARD_LEN]> {
        (0..BOARD_LEN).filter(|&i| self.cells[i].is_none()).collect()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Place `mark` on an open cell. Returns `false` and leaves the board
    /// untouched if the cell is taken or out of range.
    pub fn place(&mut self, index: usize, mark: Mark) -> bool {
        if !self.is_open(index) {
            return false;
        }
        self.cells[index] = Some(mark);
        true
    }

    /// Copy of this board with `mark` at `index`, for lookahead.
    #[must_use]
    pub fn with(&self, index: usize, mark: Mark) -> Board {
        let mut next = *self;
        next.place(index, mark);
        next
    }

    /// Number of cells holding `mark`.
    #[must_use]
    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|&&c| c == Some(mark)).count()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..3 {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..3 {
                let c = self.cells[row * 3 + col].map_or('.', Mark::symbol);
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}

/// Why a board string failed to parse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseBoardError {
    /// Not exactly nine cells after removing whitespace.
    WrongLength(usize),
    /// A character other than `X`, `O`, `.`, `-` or `_`.
    BadCell(char),
}

impl std::fmt::Display for ParseBoardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseBoardError::WrongLength(n) => write!(f, "expected 9 cells, found {}", n),
            ParseBoardError::BadCell(c) => write!(f, "invalid cell character {:?}", c),
        }
    }
}

impl std::error::Error for ParseBoardError {}

impl FromStr for Board {
    type Err = ParseBoardError;

    /// Parse nine cells, row-major: `X`, `O`, and `.`/`-`/`_` for empty.
    /// Whitespace is ignored, so `"XX.\nOO.\n..."` works.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = [None; BOARD_LEN];
        let mut count = 0;
        for c in s.chars().filter(|c| !c.is_whitespace()) {
            let cell = match c {
                'X' | 'x' => Some(Mark::Player),
                'O' | 'o' => Some(Mark::Opponent),
                '.' | '-' | '_' => None,
                other => return Err(ParseBoardError::BadCell(other)),
            };
            if count < BOARD_LEN {
                cells[count] = cell;
            }
            count += 1;
        }
        if count != BOARD_LEN {
            return Err(ParseBoardError::WrongLength(count));
        }
        Ok(Board { cells })
    }
}

/// First winning triple on the board, if any.
#[must_use]
pub fn winning_line(board: &Board) -> Option<[usize; 3]> {
    WINNING_LINES.iter().copied().find(|&[a, b, c]| {
        board.cells[a].is_some() && board.cells[a] == board.cells[b] && board.cells[a] == board.cells[c]
    })
}

/// Derive the outcome from board contents alone.
///
/// A completed triple decides the game even if empty cells remain.
#[must_use]
pub fn evaluate(board: &Board) -> Outcome {
    if let Some([a, _, _]) = winning_line(board) {
        return match board.cells[a] {
            Some(mark) => Outcome::won_by(mark),
            None => Outcome::InProgress,
        };
    }
    if board.is_full() {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}
