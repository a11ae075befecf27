mod bot_timer;
mod broadcaster;
mod tictactoe_runner;

pub use bot_timer::BotMoveTimer;
pub use broadcaster::ConsoleBroadcaster;
pub use tictactoe_runner::run_tictactoe_game;
