use std::fmt;
use std::str::FromStr;

use super::types::{BOARD_SIZE, Cell, Mark};

pub const NO_EMPTY_CELLS: &str = "No empty cells left on the board";

/// Nine cells in row-major order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cells(&self) -> [Cell; BOARD_SIZE] {
        self.cells
    }

    pub fn get(&self, index: usize) -> Cell {
        self.cells[index]
    }

    pub fn place(&mut self, index: usize, mark: Mark) {
        self.cells[index] = Cell::Marked(mark);
    }

    pub fn clear(&mut self, index: usize) {
        self.cells[index] = Cell::Empty;
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    pub fn count(&self, mark: Mark) -> usize {
        self.cells
            .iter()
            .filter(|&&cell| cell == Cell::Marked(mark))
            .count()
    }
}

pub fn get_available_moves(board: &Board) -> Vec<usize> {
    let mut moves = Vec::new();
    for (index, cell) in board.cells.iter().enumerate() {
        if cell.is_empty() {
            moves.push(index);
        }
    }
    moves
}

pub fn is_valid_move(board: &Board, index: usize) -> bool {
    if index >= BOARD_SIZE {
        return false;
    }
    board.get(index).is_empty()
}

impl FromStr for Board {
    type Err = String;

    /// Accepts nine cell characters, `X`/`O` for marks and `_`, `.` or `-`
    /// for empty cells. Whitespace and `|` separators are skipped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut board = Board::new();
        let mut index = 0;

        for ch in s.chars().filter(|c| !c.is_whitespace() && *c != '|') {
            if index >= BOARD_SIZE {
                return Err(format!("Board has more than {} cells", BOARD_SIZE));
            }
            board.cells[index] = match ch.to_ascii_uppercase() {
                'X' => Cell::Marked(Mark::X),
                'O' => Cell::Marked(Mark::O),
                '_' | '.' | '-' => Cell::Empty,
                other => return Err(format!("Unknown cell character '{}'", other)),
            };
            index += 1;
        }

        if index != BOARD_SIZE {
            return Err(format!("Board needs {} cells, got {}", BOARD_SIZE, index));
        }

        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(3) {
            let line: String = row.iter().map(|cell| cell.as_char()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
