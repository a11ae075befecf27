mod config;
mod offline;
mod state;

use clap::Parser;
use tictactoe_common::games::tictactoe::{BotType, GameMode, Mark, Side};
use tictactoe_common::config::Validate;
use tictactoe_common::{log, logger};

use config::{Config, get_config_manager};
use offline::run_tictactoe_game;
use state::{HELP_TEXT, parse_bot_type, parse_mark, parse_mode, parse_side};

#[derive(Parser)]
#[command(name = "tictactoe_client", about = "Tic-tac-toe against the computer or a friend")]
struct Args {
    /// Path to the YAML config file
    #[arg(long)]
    config: Option<String>,

    /// single or two
    #[arg(long, value_parser = parse_mode)]
    mode: Option<GameMode>,

    /// Player 1 symbol: x or o
    #[arg(long, value_parser = parse_mark)]
    symbol: Option<Mark>,

    /// Opening side: first or second
    #[arg(long, value_parser = parse_side)]
    start: Option<Side>,

    /// Computer strategy: heuristic or minimax
    #[arg(long, value_parser = parse_bot_type)]
    bot: Option<BotType>,

    /// Pause before the computer moves, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Seed for the computer's random choices
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    use_log_prefix: bool,

    /// Write the resulting settings back to the config file
    #[arg(long)]
    save_config: bool,
}

impl Args {
    fn apply_to(&self, config: Config) -> Config {
        let mut config = config;
        if let Some(mode) = self.mode {
            config.game.mode = mode;
        }
        if let Some(symbol) = self.symbol {
            config.game.player_one_mark = symbol;
        }
        if let Some(start) = self.start {
            config.game.starting_side = start;
        }
        if let Some(bot) = self.bot {
            config.game.bot_type = bot;
        }
        if let Some(delay_ms) = self.delay_ms {
            config.bot_move_delay_ms = delay_ms;
        }
        config.use_log_prefix |= self.use_log_prefix;
        config
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config_manager = get_config_manager(args.config.as_deref());
    let config = args.apply_to(config_manager.get_config()?);
    config.validate()?;

    let prefix = if config.use_log_prefix {
        Some("Client".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    if args.save_config {
        config_manager.set_config(&config)?;
        log!("Config saved");
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    println!("{}", HELP_TEXT);
    run_tictactoe_game(&config, seed).await?;

    Ok(())
}
