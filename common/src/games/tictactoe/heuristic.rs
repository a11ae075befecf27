use crate::games::RandomSource;

use super::board::{Board, NO_EMPTY_CELLS, get_available_moves};
use super::types::{CENTER, CORNERS, Cell, Mark, SIDES, WIN_LINES};

/// Probability of ignoring the rules and playing any empty cell.
pub const RANDOM_MOVE_CHANCE: f64 = 0.4;

/// Priority cascade: random move, win, block, center, corner, side.
pub fn calculate_heuristic_move(
    board: &Board,
    mark: Mark,
    rng: &mut impl RandomSource,
) -> Result<usize, String> {
    let available_moves = get_available_moves(board);
    if available_moves.is_empty() {
        return Err(NO_EMPTY_CELLS.to_string());
    }

    if rng.chance(RANDOM_MOVE_CHANCE) {
        return Ok(available_moves[rng.pick(available_moves.len())]);
    }

    if let Some(index) = find_winning_move(board, mark) {
        return Ok(index);
    }

    if let Some(index) = find_winning_move(board, mark.opponent()) {
        return Ok(index);
    }

    if board.get(CENTER).is_empty() {
        return Ok(CENTER);
    }

    if let Some(index) = pick_empty(board, &CORNERS, rng) {
        return Ok(index);
    }

    pick_empty(board, &SIDES, rng).ok_or_else(|| NO_EMPTY_CELLS.to_string())
}

/// First line, in declared order, holding two of `mark` and one empty cell.
pub fn find_winning_move(board: &Board, mark: Mark) -> Option<usize> {
    for line in WIN_LINES {
        let mut mark_count = 0;
        let mut empty = None;
        let mut empty_count = 0;

        for index in line {
            match board.get(index) {
                Cell::Marked(m) if m == mark => mark_count += 1,
                Cell::Empty => {
                    empty = Some(index);
                    empty_count += 1;
                }
                Cell::Marked(_) => {}
            }
        }

        if mark_count == 2 && empty_count == 1 {
            return empty;
        }
    }
    None
}

fn pick_empty(board: &Board, candidates: &[usize], rng: &mut impl RandomSource) -> Option<usize> {
    let empty: Vec<usize> = candidates
        .iter()
        .copied()
        .filter(|&index| board.get(index).is_empty())
        .collect();

    if empty.is_empty() {
        return None;
    }
    Some(empty[rng.pick(empty.len())])
}
