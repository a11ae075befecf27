use serde::{Deserialize, Serialize};

use super::bot_controller::BotType;
use super::types::Mark;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    SinglePlayer,
    TwoPlayer,
}

/// Side A is the human in single-player and player 1 in two-player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    #[default]
    PlayerOne,
    PlayerTwo,
}

/// Settings chosen before a game starts; fixed until the next reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub mode: GameMode,
    pub player_one_mark: Mark,
    pub starting_side: Side,
    pub bot_type: BotType,
}

impl GameConfig {
    pub fn mark_of(&self, side: Side) -> Mark {
        match side {
            Side::PlayerOne => self.player_one_mark,
            Side::PlayerTwo => self.player_one_mark.opponent(),
        }
    }

    pub fn side_of(&self, mark: Mark) -> Side {
        if mark == self.player_one_mark {
            Side::PlayerOne
        } else {
            Side::PlayerTwo
        }
    }

    pub fn first_mark(&self) -> Mark {
        self.mark_of(self.starting_side)
    }

    /// The computer's mark, if one plays in this mode.
    pub fn bot_mark(&self) -> Option<Mark> {
        match self.mode {
            GameMode::SinglePlayer => Some(self.mark_of(Side::PlayerTwo)),
            GameMode::TwoPlayer => None,
        }
    }

    pub fn is_bot_turn(&self, mark: Mark) -> bool {
        self.bot_mark() == Some(mark)
    }

    /// Short owner name used in status lines.
    pub fn owner_label(&self, mark: Mark) -> &'static str {
        match (self.mode, self.side_of(mark)) {
            (GameMode::SinglePlayer, Side::PlayerOne) => "Human",
            (GameMode::SinglePlayer, Side::PlayerTwo) => "Computer",
            (GameMode::TwoPlayer, Side::PlayerOne) => "Player 1",
            (GameMode::TwoPlayer, Side::PlayerTwo) => "Player 2",
        }
    }

    /// Score column heading, e.g. `PLAYER (X)`.
    pub fn side_label(&self, side: Side) -> String {
        let name = match (self.mode, side) {
            (GameMode::SinglePlayer, Side::PlayerOne) => "PLAYER",
            (GameMode::SinglePlayer, Side::PlayerTwo) => "COMPUTER",
            (GameMode::TwoPlayer, Side::PlayerOne) => "PLAYER 1",
            (GameMode::TwoPlayer, Side::PlayerTwo) => "PLAYER 2",
        };
        format!("{} ({})", name, self.mark_of(side))
    }
}
