mod board;
mod bot_controller;
mod game_state;
mod heuristic;
mod minimax;
mod session;
mod settings;
mod types;
mod win_detector;

pub use board::{Board, NO_EMPTY_CELLS, get_available_moves, is_valid_move};
pub use bot_controller::{BotInput, BotType, calculate_move};
pub use game_state::TicTacToeGameState;
pub use heuristic::{RANDOM_MOVE_CHANCE, calculate_heuristic_move, find_winning_move};
pub use minimax::calculate_minimax_move;
pub use session::{
    BoardSnapshot, BotMoveTicket, GameBroadcaster, ScoreUpdate, SessionPhase, StatusKind,
    StatusMessage, TicTacToeSession,
};
pub use settings::{GameConfig, GameMode, Side};
pub use types::{BOARD_SIZE, CENTER, CORNERS, Cell, Line, Mark, Outcome, SIDES, WIN_LINES};
pub use win_detector::{check_win, check_win_with_line, evaluate};
