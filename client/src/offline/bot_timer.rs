use std::pin::Pin;
use std::time::Duration;

use tictactoe_common::games::tictactoe::BotMoveTicket;
use tokio::time::{Sleep, sleep};

/// Delays the computer's reply so it does not appear instantly. Cancelling
/// drops the ticket; the session would ignore it after a reset anyway.
pub struct BotMoveTimer {
    delay: Duration,
    armed: Option<(BotMoveTicket, Pin<Box<Sleep>>)>,
}

impl BotMoveTimer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, armed: None }
    }

    /// Starts the countdown for `ticket`. `None` leaves any running countdown alone.
    pub fn arm(&mut self, ticket: Option<BotMoveTicket>) {
        if let Some(ticket) = ticket {
            self.armed = Some((ticket, Box::pin(sleep(self.delay))));
        }
    }

    pub fn cancel(&mut self) {
        self.armed = None;
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Resolves when the countdown ends; never resolves while disarmed.
    /// Safe to drop inside `tokio::select!`.
    pub async fn fired(&mut self) -> BotMoveTicket {
        let Some((ticket, timer)) = self.armed.as_mut() else {
            return std::future::pending().await;
        };
        timer.as_mut().await;
        let ticket = *ticket;
        self.armed = None;
        ticket
    }
}
