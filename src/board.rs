use crate::error::GameError;

pub const BOARD_SIZE: usize = 3;
pub const NUM_CELLS: usize = BOARD_SIZE * BOARD_SIZE;
const FULL_MASK: u16 = (1 << NUM_CELLS) - 1;

/// The 8 winning combinations: rows, columns, then diagonals.
///
/// Enumeration order matters: when several lines are complete at once, the
/// earliest one here is reported.
pub const WIN_LINES: [WinLine; 8] = [
    WinLine([0, 1, 2]),
    WinLine([3, 4, 5]),
    WinLine([6, 7, 8]),
    WinLine([0, 3, 6]),
    WinLine([0, 4, 8]),
    WinLine([1, 4, 7]),
    WinLine([2, 5, 8]),
    WinLine([2, 4, 6]),
];

/// The symbol a player puts on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    Human,
    Computer,
}

impl Mark {
    pub fn opponent(self) -> Self {
        match self {
            Mark::Human => Mark::Computer,
            Mark::Computer => Mark::Human,
        }
    }

    /// Fixed display symbol: `O` for the human, `X` for the computer.
    pub fn symbol(self) -> &'static str {
        match self {
            Mark::Human => "O",
            Mark::Computer => "X",
        }
    }
}

/// Contents of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Marked(Mark),
}

impl Cell {
    /// Numeric code used by the browser view: 0=empty, 1=human, 2=computer.
    pub fn code(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Marked(Mark::Human) => 1,
            Cell::Marked(Mark::Computer) => 2,
        }
    }
}

/// Three cell indices that win when held by one mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WinLine(pub [u8; 3]);

impl WinLine {
    pub fn cells(&self) -> [u8; 3] {
        self.0
    }

    fn mask(&self) -> u16 {
        self.0.iter().fold(0, |acc, &pos| acc | bit(pos as usize))
    }
}

/// Classification of a board position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    HumanWin(WinLine),
    ComputerWin(WinLine),
    Tie,
    InProgress,
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    /// Banner text shown when the game ends.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Outcome::HumanWin(_) => Some("You win!"),
            Outcome::ComputerWin(_) => Some("You lose!"),
            Outcome::Tie => Some("Tie Game!"),
            Outcome::InProgress => None,
        }
    }

    /// Cells to highlight: the winning line, or every cell on a tie.
    pub fn highlight_cells(&self) -> Vec<u8> {
        match self {
            Outcome::HumanWin(line) | Outcome::ComputerWin(line) => line.cells().to_vec(),
            Outcome::Tie => (0..NUM_CELLS as u8).collect(),
            Outcome::InProgress => Vec::new(),
        }
    }

    pub fn highlight_color(&self) -> Option<&'static str> {
        match self {
            Outcome::HumanWin(_) => Some("blue"),
            Outcome::ComputerWin(_) => Some("red"),
            Outcome::Tie => Some("green"),
            Outcome::InProgress => None,
        }
    }
}

/// Tic-tac-toe board stored as one occupancy mask per mark.
///
/// Bit `i` of a mask is set when cell `i` (row-major, 0..=8) holds that mark.
/// The two masks never overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    human: u16,
    computer: u16,
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from explicit cell contents.
    pub fn from_cells(cells: [Cell; NUM_CELLS]) -> Self {
        let mut board = Self::new();
        for (pos, cell) in cells.into_iter().enumerate() {
            match cell {
                Cell::Empty => {}
                Cell::Marked(Mark::Human) => board.human |= bit(pos),
                Cell::Marked(Mark::Computer) => board.computer |= bit(pos),
            }
        }
        board
    }

    /// Clears every cell.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Puts `mark` on the empty cell at `index`.
    /// The board is left unchanged on error.
    pub fn place(&mut self, index: usize, mark: Mark) -> Result<(), GameError> {
        if index >= NUM_CELLS || (self.occupied() & bit(index)) != 0 {
            return Err(GameError::InvalidMove { index });
        }

        match mark {
            Mark::Human => self.human |= bit(index),
            Mark::Computer => self.computer |= bit(index),
        }
        Ok(())
    }

    pub fn cell(&self, index: usize) -> Option<Cell> {
        if index >= NUM_CELLS {
            return None;
        }
        let square = bit(index);
        Some(if (self.human & square) != 0 {
            Cell::Marked(Mark::Human)
        } else if (self.computer & square) != 0 {
            Cell::Marked(Mark::Computer)
        } else {
            Cell::Empty
        })
    }

    pub fn is_empty_cell(&self, index: usize) -> bool {
        matches!(self.cell(index), Some(Cell::Empty))
    }

    /// Indices of the empty cells in ascending order.
    pub fn empty_cells(&self) -> Vec<usize> {
        let mut free = FULL_MASK & !self.occupied();
        let mut out = Vec::with_capacity(free.count_ones() as usize);
        while free != 0 {
            out.push(free.trailing_zeros() as usize);
            free &= free - 1;
        }
        out
    }

    pub fn empty_count(&self) -> u8 {
        NUM_CELLS as u8 - self.occupied().count_ones() as u8
    }

    /// Number of cells holding `mark`.
    pub fn count(&self, mark: Mark) -> u8 {
        self.mask_of(mark).count_ones() as u8
    }

    pub fn is_full(&self) -> bool {
        self.occupied() == FULL_MASK
    }

    /// First line in [`WIN_LINES`] order completely held by `mark`.
    pub fn winning_line(&self, mark: Mark) -> Option<WinLine> {
        let mine = self.mask_of(mark);
        WIN_LINES
            .iter()
            .copied()
            .find(|line| (mine & line.mask()) == line.mask())
    }

    /// Evaluates the board: human win, then computer win, then tie.
    pub fn outcome(&self) -> Outcome {
        if let Some(line) = self.winning_line(Mark::Human) {
            Outcome::HumanWin(line)
        } else if let Some(line) = self.winning_line(Mark::Computer) {
            Outcome::ComputerWin(line)
        } else if self.is_full() {
            Outcome::Tie
        } else {
            Outcome::InProgress
        }
    }

    pub fn to_array(&self) -> [Cell; NUM_CELLS] {
        let mut cells = [Cell::Empty; NUM_CELLS];
        for (pos, cell) in cells.iter_mut().enumerate() {
            *cell = self.cell(pos).unwrap_or_default();
        }
        cells
    }

    fn occupied(&self) -> u16 {
        self.human | self.computer
    }

    fn mask_of(&self, mark: Mark) -> u16 {
        match mark {
            Mark::Human => self.human,
            Mark::Computer => self.computer,
        }
    }
}

fn bit(pos: usize) -> u16 {
    if pos < NUM_CELLS { 1u16 << pos } else { 0 }
}
