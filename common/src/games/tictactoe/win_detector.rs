use super::board::Board;
use super::types::{Cell, Line, Mark, Outcome, WIN_LINES};

pub fn check_win_with_line(board: &Board) -> Option<(Mark, Line)> {
    for line in WIN_LINES {
        let [a, b, c] = line;
        if let Cell::Marked(mark) = board.get(a)
            && board.get(b) == Cell::Marked(mark)
            && board.get(c) == Cell::Marked(mark)
        {
            return Some((mark, line));
        }
    }
    None
}

pub fn check_win(board: &Board) -> Option<Mark> {
    check_win_with_line(board).map(|(mark, _)| mark)
}

pub fn evaluate(board: &Board) -> Outcome {
    if let Some((winner, line)) = check_win_with_line(board) {
        return Outcome::Win { winner, line };
    }

    if board.is_full() {
        return Outcome::Draw;
    }

    Outcome::InProgress
}
