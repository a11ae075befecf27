use std::str::FromStr;

use tictactoe_common::games::tictactoe::{BotType, GameConfig, GameMode, Mark, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCommand {
    PlaceMark { index: usize },
    Reset,
    Configure(SettingChange),
    Help,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingChange {
    Mode(GameMode),
    Symbol(Mark),
    Start(Side),
    Bot(BotType),
}

impl SettingChange {
    pub fn apply(&self, config: GameConfig) -> GameConfig {
        match *self {
            SettingChange::Mode(mode) => GameConfig { mode, ..config },
            SettingChange::Symbol(player_one_mark) => GameConfig { player_one_mark, ..config },
            SettingChange::Start(starting_side) => GameConfig { starting_side, ..config },
            SettingChange::Bot(bot_type) => GameConfig { bot_type, ..config },
        }
    }
}

pub fn parse_mode(value: &str) -> Result<GameMode, String> {
    match value.to_ascii_lowercase().as_str() {
        "single" | "1" | "one" => Ok(GameMode::SinglePlayer),
        "two" | "2" => Ok(GameMode::TwoPlayer),
        other => Err(format!("Unknown mode '{}', expected single or two", other)),
    }
}

pub fn parse_mark(value: &str) -> Result<Mark, String> {
    match value.to_ascii_lowercase().as_str() {
        "x" => Ok(Mark::X),
        "o" => Ok(Mark::O),
        other => Err(format!("Unknown symbol '{}', expected x or o", other)),
    }
}

pub fn parse_side(value: &str) -> Result<Side, String> {
    match value.to_ascii_lowercase().as_str() {
        "first" | "human" | "player1" => Ok(Side::PlayerOne),
        "second" | "computer" | "player2" => Ok(Side::PlayerTwo),
        other => Err(format!("Unknown starting side '{}', expected first or second", other)),
    }
}

pub fn parse_bot_type(value: &str) -> Result<BotType, String> {
    match value.to_ascii_lowercase().as_str() {
        "heuristic" | "simple" => Ok(BotType::Heuristic),
        "minimax" | "perfect" => Ok(BotType::Minimax),
        other => Err(format!("Unknown bot '{}', expected heuristic or minimax", other)),
    }
}

impl FromStr for ClientCommand {
    type Err = String;

    /// Cells are numbered 1-9, row by row.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let Some(head) = parts.next() else {
            return Err("Empty command".to_string());
        };
        let argument = parts.next();

        if let Ok(cell) = head.parse::<usize>() {
            if !(1..=9).contains(&cell) {
                return Err(format!("Cell {} is off the board, use 1-9", cell));
            }
            return Ok(ClientCommand::PlaceMark { index: cell - 1 });
        }

        let require = |name: &str| argument.ok_or_else(|| format!("'{}' needs a value", name));

        match head.to_ascii_lowercase().as_str() {
            "reset" | "r" => Ok(ClientCommand::Reset),
            "help" | "h" | "?" => Ok(ClientCommand::Help),
            "quit" | "q" | "exit" => Ok(ClientCommand::Quit),
            "mode" => Ok(ClientCommand::Configure(SettingChange::Mode(parse_mode(require("mode")?)?))),
            "symbol" => Ok(ClientCommand::Configure(SettingChange::Symbol(parse_mark(require("symbol")?)?))),
            "start" => Ok(ClientCommand::Configure(SettingChange::Start(parse_side(require("start")?)?))),
            "bot" => Ok(ClientCommand::Configure(SettingChange::Bot(parse_bot_type(require("bot")?)?))),
            other => Err(format!("Unknown command '{}', type help", other)),
        }
    }
}

pub const HELP_TEXT: &str = "\
Commands:
  1-9                     place a mark (cells numbered row by row)
  reset                   start a new game, keeping the score
  mode single|two         play against the computer or another person
  symbol x|o              player 1 symbol
  start first|second      which side opens
  bot heuristic|minimax   computer strategy
  help                    show this text
  quit                    leave";
