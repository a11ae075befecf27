use serde::{Deserialize, Serialize};

use crate::games::RandomSource;
use super::board::Board;
use super::game_state::TicTacToeGameState;
use super::heuristic::calculate_heuristic_move;
use super::minimax::calculate_minimax_move;
use super::types::Mark;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BotType {
    #[default]
    Heuristic,
    Minimax,
}

impl BotType {
    pub fn label(&self) -> &'static str {
        match self {
            BotType::Heuristic => "Heuristic",
            BotType::Minimax => "Minimax",
        }
    }
}

pub struct BotInput {
    pub board: Board,
    pub current_mark: Mark,
}

impl BotInput {
    pub fn from_game_state(state: &TicTacToeGameState) -> Self {
        Self {
            board: *state.board(),
            current_mark: state.current_mark(),
        }
    }
}

pub fn calculate_move(
    bot_type: BotType,
    input: BotInput,
    rng: &mut impl RandomSource,
) -> Result<usize, String> {
    match bot_type {
        BotType::Heuristic => calculate_heuristic_move(&input.board, input.current_mark, rng),
        BotType::Minimax => calculate_minimax_move(&input.board, input.current_mark),
    }
}
