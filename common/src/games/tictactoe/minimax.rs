use super::board::{Board, NO_EMPTY_CELLS, get_available_moves};
use super::types::{Mark, Outcome};
use super::win_detector::evaluate;

const WIN_SCORE: i32 = 10;

/// Exhaustive search for `bot_mark`. Ties keep the lowest index.
pub fn calculate_minimax_move(board: &Board, bot_mark: Mark) -> Result<usize, String> {
    let available_moves = get_available_moves(board);
    if available_moves.is_empty() {
        return Err(NO_EMPTY_CELLS.to_string());
    }

    let mut board = *board;
    let mut best_move = available_moves[0];
    let mut best_score = i32::MIN;

    for index in available_moves {
        board.place(index, bot_mark);
        let score = minimax(&mut board, 0, false, bot_mark);
        board.clear(index);

        if score > best_score {
            best_score = score;
            best_move = index;
        }
    }

    Ok(best_move)
}

/// Score of `board` from `bot_mark`'s point of view. `depth` counts the
/// hypothetical plies placed so far, starting at 0 for the first one.
pub fn minimax(board: &mut Board, depth: i32, is_maximizing: bool, bot_mark: Mark) -> i32 {
    match evaluate(board) {
        Outcome::Win { winner, .. } => {
            return if winner == bot_mark {
                WIN_SCORE - depth
            } else {
                depth - WIN_SCORE
            };
        }
        Outcome::Draw => return 0,
        Outcome::InProgress => {}
    }

    let moves = get_available_moves(board);

    if is_maximizing {
        let mut max_eval = i32::MIN;
        for index in moves {
            board.place(index, bot_mark);
            let eval = minimax(board, depth + 1, false, bot_mark);
            board.clear(index);
            max_eval = max_eval.max(eval);
        }
        max_eval
    } else {
        let opponent_mark = bot_mark.opponent();
        let mut min_eval = i32::MAX;
        for index in moves {
            board.place(index, opponent_mark);
            let eval = minimax(board, depth + 1, true, bot_mark);
            board.clear(index);
            min_eval = min_eval.min(eval);
        }
        min_eval
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::session_rng::FixedRng;
    use crate::games::SessionRng;
    use crate::games::tictactoe::heuristic::calculate_heuristic_move;
    use crate::games::tictactoe::win_detector::check_win;

    fn board(cells: &str) -> Board {
        cells.parse().unwrap()
    }

    #[test]
    fn test_completes_own_line_instead_of_blocking() {
        let b = board("XX_|OO_|___");

        assert_eq!(calculate_minimax_move(&b, Mark::X), Ok(2));
        let mut rng = FixedRng { take_chance: false, pick: 0 };
        assert_eq!(calculate_heuristic_move(&b, Mark::X, &mut rng), Ok(2));
    }

    #[test]
    fn test_blocks_when_no_win_available() {
        let b = board("XX_|O__|___");

        assert_eq!(calculate_minimax_move(&b, Mark::O), Ok(2));
    }

    #[test]
    fn test_answers_corner_opening_with_center() {
        let b = board("X________");

        assert_eq!(calculate_minimax_move(&b, Mark::O), Ok(4));
    }

    #[test]
    fn test_empty_board_opening_is_lowest_index() {
        // Every opening draws under perfect play, so the first cell wins the tie.
        assert_eq!(calculate_minimax_move(&Board::new(), Mark::X), Ok(0));
    }

    #[test]
    fn test_prefers_faster_win() {
        // 2 and 3 both fork for a win two plies later; 8 wins on the spot.
        let b = board("XO_|_X_|_O_");

        assert_eq!(calculate_minimax_move(&b, Mark::X), Ok(8));
    }

    #[test]
    fn test_full_board_is_an_error() {
        let result = calculate_minimax_move(&board("XOX|XOO|OXX"), Mark::O);

        assert_eq!(result, Err(NO_EMPTY_CELLS.to_string()));
    }

    #[test]
    fn test_board_is_not_mutated() {
        let b = board("O___X___O");
        let before = b;

        let _ = calculate_minimax_move(&b, Mark::O);

        assert_eq!(b, before);
    }

    #[test]
    fn test_terminal_scores_depend_on_depth() {
        let mut won = board("XXX|OO_|___");
        let mut lost = board("OOO|XX_|X__");
        let mut drawn = board("XOX|XOO|OXX");

        assert_eq!(minimax(&mut won, 0, false, Mark::X), 10);
        assert_eq!(minimax(&mut won, 3, true, Mark::X), 7);
        assert_eq!(minimax(&mut lost, 2, true, Mark::X), -8);
        assert_eq!(minimax(&mut drawn, 5, false, Mark::X), 0);
    }

    /// Plays every legal sequence for `opponent`, answering each with
    /// minimax for `bot_mark`, and returns whether any line lets the
    /// opponent win.
    fn opponent_can_win(board: &mut Board, to_move: Mark, bot_mark: Mark) -> bool {
        match evaluate(board) {
            Outcome::Win { winner, .. } => return winner != bot_mark,
            Outcome::Draw => return false,
            Outcome::InProgress => {}
        }

        if to_move == bot_mark {
            let index = calculate_minimax_move(board, bot_mark).unwrap();
            board.place(index, bot_mark);
            let result = opponent_can_win(board, to_move.opponent(), bot_mark);
            board.clear(index);
            return result;
        }

        for index in get_available_moves(board) {
            board.place(index, to_move);
            let result = opponent_can_win(board, to_move.opponent(), bot_mark);
            board.clear(index);
            if result {
                return true;
            }
        }
        false
    }

    #[test]
    fn test_second_player_never_loses_exhaustive() {
        assert!(!opponent_can_win(&mut Board::new(), Mark::X, Mark::O));
    }

    #[test]
    fn test_first_player_never_loses_exhaustive() {
        assert!(!opponent_can_win(&mut Board::new(), Mark::X, Mark::X));
    }

    #[test]
    fn test_holds_corner_position_against_any_reply() {
        let mut b = board("O__|_X_|__O");

        let index = calculate_minimax_move(&b, Mark::O).unwrap();
        assert!(b.get(index).is_empty());

        assert!(!opponent_can_win(&mut b, Mark::X, Mark::O));
    }

    #[test]
    fn test_never_loses_to_heuristic_bot() {
        for seed in 0..40 {
            let mut rng = SessionRng::new(seed);
            let mut b = Board::new();
            let mut to_move = if seed % 2 == 0 { Mark::X } else { Mark::O };

            while !evaluate(&b).is_terminal() {
                let index = if to_move == Mark::O {
                    calculate_minimax_move(&b, Mark::O).unwrap()
                } else {
                    calculate_heuristic_move(&b, Mark::X, &mut rng).unwrap()
                };
                b.place(index, to_move);
                to_move = to_move.opponent();
            }

            assert_ne!(check_win(&b), Some(Mark::X), "seed {}", seed);
        }
    }
}
