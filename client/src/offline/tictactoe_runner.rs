use std::time::Duration;

use tictactoe_common::games::SessionRng;
use tictactoe_common::games::tictactoe::{GameConfig, TicTacToeSession};
use tictactoe_common::log;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::config::Config;
use crate::state::{ClientCommand, HELP_TEXT};
use super::{BotMoveTimer, ConsoleBroadcaster};

type ConsoleSession = TicTacToeSession<ConsoleBroadcaster, SessionRng>;

pub async fn run_tictactoe_game(config: &Config, seed: u64) -> Result<(), String> {
    log!("Starting session with seed {}", seed);

    let mut session: ConsoleSession = TicTacToeSession::new(
        config.game,
        ConsoleBroadcaster::default(),
        SessionRng::new(seed),
    );
    let mut bot_timer = BotMoveTimer::new(Duration::from_millis(config.bot_move_delay_ms));
    print_header(&mut session);
    bot_timer.arm(session.pending_bot_move());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            ticket = bot_timer.fired() => {
                if let Err(e) = session.play_bot_move(ticket) {
                    log!("Bot move failed: {}", e);
                }
            }
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => return Err(format!("Failed to read input: {}", e)),
                };
                if line.trim().is_empty() {
                    continue;
                }

                match line.parse::<ClientCommand>() {
                    Ok(ClientCommand::PlaceMark { index }) => {
                        bot_timer.arm(session.handle_human_move(index));
                    }
                    Ok(ClientCommand::Reset) => {
                        bot_timer.cancel();
                        print_header(&mut session);
                        bot_timer.arm(session.request_reset());
                    }
                    Ok(ClientCommand::Configure(change)) => {
                        let new_config = change.apply(*session.config());
                        bot_timer.cancel();
                        apply_config(&mut session, new_config, &mut bot_timer);
                    }
                    Ok(ClientCommand::Help) => println!("{}", HELP_TEXT),
                    Ok(ClientCommand::Quit) => break,
                    Err(e) => println!("{}", e),
                }
            }
        }
    }

    if bot_timer.is_armed() {
        log!("Discarding scheduled bot move");
    }
    let scores = session.scores();
    log!(
        "Session finished: {} - {} - {} ties",
        scores.side_a_wins, scores.side_b_wins, scores.ties
    );
    Ok(())
}

fn apply_config(session: &mut ConsoleSession, config: GameConfig, bot_timer: &mut BotMoveTimer) {
    let ticket = session.configure(config);
    print_header(session);
    bot_timer.arm(ticket);
}

fn print_header(session: &mut ConsoleSession) {
    let labels = session.side_labels();
    println!("\n{} vs {}  |  {}", labels.0, labels.1, session.bot_indicator());
    session.broadcaster_mut().set_labels(labels);
}
