use super::board::Board;
use super::types::{BOARD_SIZE, Mark, Outcome};
use super::win_detector::evaluate;

#[derive(Debug, Clone)]
pub struct TicTacToeGameState {
    board: Board,
    current_mark: Mark,
    status: Outcome,
    last_move: Option<usize>,
}

impl TicTacToeGameState {
    pub fn new(first_mark: Mark) -> Self {
        Self {
            board: Board::new(),
            current_mark: first_mark,
            status: Outcome::InProgress,
            last_move: None,
        }
    }

    /// Places the current mark and either ends the game or passes the turn.
    pub fn place_mark(&mut self, index: usize) -> Result<Outcome, String> {
        if self.status.is_terminal() {
            return Err("Game is already over".to_string());
        }

        if index >= BOARD_SIZE {
            return Err("Position out of bounds".to_string());
        }

        if !self.board.get(index).is_empty() {
            return Err("Cell is already marked".to_string());
        }

        self.board.place(index, self.current_mark);
        self.last_move = Some(index);
        self.status = evaluate(&self.board);

        if !self.status.is_terminal() {
            self.switch_turn();
        }

        Ok(self.status)
    }

    fn switch_turn(&mut self) {
        self.current_mark = self.current_mark.opponent();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_mark(&self) -> Mark {
        self.current_mark
    }

    pub fn outcome(&self) -> Outcome {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn last_move(&self) -> Option<usize> {
        self.last_move
    }
}
