use std::fmt;

use crate::games::{RandomSource, SessionRng};
use crate::log;
use super::board::Board;
use super::bot_controller::{BotInput, calculate_move};
use super::game_state::TicTacToeGameState;
use super::settings::{GameConfig, Side};
use super::types::{BOARD_SIZE, Cell, Line, Mark, Outcome};

/// Everything needed to draw the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoardSnapshot {
    pub cells: [Cell; BOARD_SIZE],
    pub terminal_line: Option<Line>,
    pub game_over: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
    Turn,
    Win,
    Draw,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub mark: Option<Mark>,
    pub owner_label: Option<&'static str>,
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, self.mark, self.owner_label) {
            (StatusKind::Turn, Some(mark), Some(owner)) => write!(f, "Turn: {} ({})", mark, owner),
            (StatusKind::Win, Some(mark), Some(owner)) => write!(f, "Winner: {} ({})", mark, owner),
            (StatusKind::Draw, _, _) => write!(f, "It's a draw"),
            _ => write!(f, "Waiting"),
        }
    }
}

/// Running totals across games of one session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScoreUpdate {
    pub side_a_wins: u32,
    pub side_b_wins: u32,
    pub ties: u32,
}

pub trait GameBroadcaster {
    fn broadcast_state(&mut self, snapshot: &BoardSnapshot, status: &StatusMessage);

    fn broadcast_scores(&mut self, scores: &ScoreUpdate);
}

/// Handle for a scheduled computer move. Only the ticket issued for the
/// current game is honoured.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BotMoveTicket {
    generation: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    AwaitingMove(Mark),
    Finished(Outcome),
}

pub struct TicTacToeSession<B, R = SessionRng> {
    config: GameConfig,
    game_state: TicTacToeGameState,
    scores: ScoreUpdate,
    generation: u64,
    pending_bot_move: Option<BotMoveTicket>,
    broadcaster: B,
    rng: R,
}

impl<B, R> TicTacToeSession<B, R>
where
    B: GameBroadcaster,
    R: RandomSource,
{
    /// Starts the first game. If the computer opens, its move is left
    /// pending; see [`Self::pending_bot_move`].
    pub fn new(config: GameConfig, broadcaster: B, rng: R) -> Self {
        let mut session = Self {
            config,
            game_state: TicTacToeGameState::new(config.first_mark()),
            scores: ScoreUpdate::default(),
            generation: 0,
            pending_bot_move: None,
            broadcaster,
            rng,
        };
        session.reset(config);
        session
    }

    /// Applies new settings and starts a fresh game.
    pub fn configure(&mut self, config: GameConfig) -> Option<BotMoveTicket> {
        self.reset(config)
    }

    /// Starts a fresh game with the last applied settings.
    pub fn request_reset(&mut self) -> Option<BotMoveTicket> {
        self.reset(self.config)
    }

    fn reset(&mut self, config: GameConfig) -> Option<BotMoveTicket> {
        self.config = config;
        self.game_state = TicTacToeGameState::new(config.first_mark());
        self.generation += 1;
        self.pending_bot_move = None;

        self.emit_state();
        self.schedule_bot_move_if_due()
    }

    /// Input from the player(s). Invalid moves are ignored. Returns the
    /// ticket of the computer reply when one became due.
    pub fn handle_human_move(&mut self, index: usize) -> Option<BotMoveTicket> {
        if self.game_state.is_over() {
            log!("Ignoring move at {}: game is already over", index);
            return None;
        }

        let current = self.game_state.current_mark();
        if self.config.is_bot_turn(current) || self.pending_bot_move.is_some() {
            log!("Ignoring move at {}: not the human's turn", index);
            return None;
        }

        if let Err(e) = self.apply_move(index) {
            log!("Ignoring move at {}: {}", index, e);
            return None;
        }

        self.schedule_bot_move_if_due()
    }

    /// Runs a scheduled computer move. Stale tickets (from before a reset, or
    /// already used) are a no-op and return `Ok(false)`.
    pub fn play_bot_move(&mut self, ticket: BotMoveTicket) -> Result<bool, String> {
        if self.pending_bot_move != Some(ticket) {
            log!("Dropping stale bot move for game {}", ticket.generation);
            return Ok(false);
        }
        self.pending_bot_move = None;

        if self.game_state.is_over() || !self.config.is_bot_turn(self.game_state.current_mark()) {
            return Ok(false);
        }

        let input = BotInput::from_game_state(&self.game_state);
        let index = calculate_move(self.config.bot_type, input, &mut self.rng)?;
        self.apply_move(index)?;
        Ok(true)
    }

    pub fn pending_bot_move(&self) -> Option<BotMoveTicket> {
        self.pending_bot_move
    }

    fn schedule_bot_move_if_due(&mut self) -> Option<BotMoveTicket> {
        if self.game_state.is_over() || !self.config.is_bot_turn(self.game_state.current_mark()) {
            return None;
        }
        let ticket = BotMoveTicket {
            generation: self.generation,
        };
        self.pending_bot_move = Some(ticket);
        Some(ticket)
    }

    fn apply_move(&mut self, index: usize) -> Result<(), String> {
        let mark = self.game_state.current_mark();
        let outcome = self.game_state.place_mark(index)?;

        match outcome {
            Outcome::Win { winner, .. } => {
                match self.config.side_of(winner) {
                    Side::PlayerOne => self.scores.side_a_wins += 1,
                    Side::PlayerTwo => self.scores.side_b_wins += 1,
                }
                log!("{} ({}) won game {}", winner, self.config.owner_label(winner), self.generation);
            }
            Outcome::Draw => {
                self.scores.ties += 1;
                log!("Game {} ended in a draw", self.generation);
            }
            Outcome::InProgress => {
                log!("{} played {}", mark, index);
            }
        }

        self.emit_state();
        if outcome.is_terminal() {
            self.broadcaster.broadcast_scores(&self.scores);
        }
        Ok(())
    }

    fn emit_state(&mut self) {
        let snapshot = self.snapshot();
        let status = self.status();
        self.broadcaster.broadcast_state(&snapshot, &status);
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let outcome = self.game_state.outcome();
        BoardSnapshot {
            cells: self.game_state.board().cells(),
            terminal_line: outcome.winning_line(),
            game_over: outcome.is_terminal(),
        }
    }

    pub fn status(&self) -> StatusMessage {
        match self.game_state.outcome() {
            Outcome::InProgress => {
                let mark = self.game_state.current_mark();
                StatusMessage {
                    kind: StatusKind::Turn,
                    mark: Some(mark),
                    owner_label: Some(self.config.owner_label(mark)),
                }
            }
            Outcome::Win { winner, .. } => StatusMessage {
                kind: StatusKind::Win,
                mark: Some(winner),
                owner_label: Some(self.config.owner_label(winner)),
            },
            Outcome::Draw => StatusMessage {
                kind: StatusKind::Draw,
                mark: None,
                owner_label: None,
            },
        }
    }

    pub fn phase(&self) -> SessionPhase {
        match self.game_state.outcome() {
            Outcome::InProgress => SessionPhase::AwaitingMove(self.game_state.current_mark()),
            outcome => SessionPhase::Finished(outcome),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn scores(&self) -> ScoreUpdate {
        self.scores
    }

    pub fn board(&self) -> &Board {
        self.game_state.board()
    }

    pub fn is_over(&self) -> bool {
        self.game_state.is_over()
    }

    /// `(side A, side B)` score headings.
    pub fn side_labels(&self) -> (String, String) {
        (
            self.config.side_label(Side::PlayerOne),
            self.config.side_label(Side::PlayerTwo),
        )
    }

    pub fn bot_indicator(&self) -> String {
        format!("Model: {}", self.config.bot_type.label())
    }

    pub fn broadcaster(&self) -> &B {
        &self.broadcaster
    }

    pub fn broadcaster_mut(&mut self) -> &mut B {
        &mut self.broadcaster
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::session_rng::FixedRng;
    use crate::games::tictactoe::bot_controller::BotType;
    use crate::games::tictactoe::settings::GameMode;

    #[derive(Default)]
    struct RecordingBroadcaster {
        states: Vec<(BoardSnapshot, StatusMessage)>,
        scores: Vec<ScoreUpdate>,
    }

    impl GameBroadcaster for RecordingBroadcaster {
        fn broadcast_state(&mut self, snapshot: &BoardSnapshot, status: &StatusMessage) {
            self.states.push((*snapshot, *status));
        }

        fn broadcast_scores(&mut self, scores: &ScoreUpdate) {
            self.scores.push(*scores);
        }
    }

    /// Bot that always takes the lowest empty cell.
    fn lowest_cell_rng() -> FixedRng {
        FixedRng { take_chance: true, pick: 0 }
    }

    fn create_session(config: GameConfig) -> TicTacToeSession<RecordingBroadcaster, FixedRng> {
        TicTacToeSession::new(config, RecordingBroadcaster::default(), lowest_cell_rng())
    }

    fn computer_first() -> GameConfig {
        GameConfig {
            starting_side: Side::PlayerTwo,
            ..GameConfig::default()
        }
    }

    /// Human move followed by the computer reply, if one is due.
    fn exchange(session: &mut TicTacToeSession<RecordingBroadcaster, FixedRng>, index: usize) {
        if let Some(ticket) = session.handle_human_move(index) {
            assert_eq!(session.play_bot_move(ticket), Ok(true));
        }
    }

    #[test]
    fn test_new_session_emits_turn_snapshot() {
        let session = create_session(GameConfig::default());

        let (snapshot, status) = session.broadcaster().states[0];
        assert_eq!(session.broadcaster().states.len(), 1);
        assert_eq!(snapshot.cells, [Cell::Empty; BOARD_SIZE]);
        assert!(!snapshot.game_over);
        assert_eq!(status.to_string(), "Turn: X (Human)");
        assert_eq!(session.pending_bot_move(), None);
        assert_eq!(session.phase(), SessionPhase::AwaitingMove(Mark::X));
    }

    #[test]
    fn test_computer_opening_move_is_pending() {
        let mut session = create_session(computer_first());

        let ticket = session.pending_bot_move().unwrap();
        assert_eq!(session.board().count(Mark::O), 0);

        assert_eq!(session.play_bot_move(ticket), Ok(true));
        assert_eq!(session.board().get(0), Cell::Marked(Mark::O));
        assert_eq!(session.status().to_string(), "Turn: X (Human)");
        assert_eq!(session.pending_bot_move(), None);
    }

    #[test]
    fn test_human_move_schedules_computer_reply() {
        let mut session = create_session(GameConfig::default());

        let ticket = session.handle_human_move(4);

        assert!(ticket.is_some());
        assert_eq!(session.pending_bot_move(), ticket);
        assert_eq!(session.status().to_string(), "Turn: O (Computer)");
    }

    #[test]
    fn test_occupied_cell_is_ignored() {
        let mut session = create_session(GameConfig::default());
        exchange(&mut session, 4);
        let emitted = session.broadcaster().states.len();
        let board = *session.board();

        assert_eq!(session.handle_human_move(0), None);

        assert_eq!(session.broadcaster().states.len(), emitted);
        assert_eq!(*session.board(), board);
    }

    #[test]
    fn test_move_during_computer_turn_is_ignored() {
        let mut session = create_session(GameConfig::default());
        session.handle_human_move(4);
        let emitted = session.broadcaster().states.len();

        assert_eq!(session.handle_human_move(8), None);

        assert_eq!(session.broadcaster().states.len(), emitted);
        assert_eq!(session.board().count(Mark::X), 1);
        assert!(session.board().get(8).is_empty());
    }

    #[test]
    fn test_out_of_bounds_move_is_ignored() {
        let mut session = create_session(GameConfig::default());

        assert_eq!(session.handle_human_move(9), None);
        assert_eq!(session.broadcaster().states.len(), 1);
    }

    #[test]
    fn test_moves_after_game_over_are_ignored() {
        let mut session = create_session(GameConfig::default());
        for index in [4, 1, 7] {
            exchange(&mut session, index);
        }
        assert!(session.is_over());
        let emitted = session.broadcaster().states.len();
        let board = *session.board();

        assert_eq!(session.handle_human_move(8), None);

        assert_eq!(session.broadcaster().states.len(), emitted);
        assert_eq!(*session.board(), board);
    }

    #[test]
    fn test_terminal_snapshot_highlights_line() {
        let mut session = create_session(GameConfig::default());
        for index in [4, 1, 7] {
            exchange(&mut session, index);
        }

        let (snapshot, status) = *session.broadcaster().states.last().unwrap();
        assert!(snapshot.game_over);
        assert_eq!(snapshot.terminal_line, Some([1, 4, 7]));
        assert_eq!(status.kind, StatusKind::Win);
        assert_eq!(status.to_string(), "Winner: X (Human)");
        assert_eq!(
            session.phase(),
            SessionPhase::Finished(Outcome::Win { winner: Mark::X, line: [1, 4, 7] })
        );
        assert_eq!(
            session.broadcaster().scores,
            vec![ScoreUpdate { side_a_wins: 1, side_b_wins: 0, ties: 0 }]
        );
    }

    #[test]
    fn test_scores_count_human_win_computer_win_and_draw() {
        let mut session = create_session(GameConfig::default());

        for index in [4, 1, 7] {
            exchange(&mut session, index);
        }
        session.request_reset();
        for index in [8, 7, 3] {
            exchange(&mut session, index);
        }
        assert_eq!(session.status().to_string(), "Winner: O (Computer)");
        session.request_reset();
        for index in [4, 1, 3, 6, 8] {
            exchange(&mut session, index);
        }
        assert_eq!(session.status().to_string(), "It's a draw");

        assert_eq!(
            session.scores(),
            ScoreUpdate { side_a_wins: 1, side_b_wins: 1, ties: 1 }
        );
        assert_eq!(session.broadcaster().scores.len(), 3);
    }

    #[test]
    fn test_stale_ticket_after_reset_is_dropped() {
        let mut session = create_session(computer_first());
        let stale = session.pending_bot_move().unwrap();

        let fresh = session.request_reset().unwrap();

        assert_ne!(stale, fresh);
        assert_eq!(session.play_bot_move(stale), Ok(false));
        assert_eq!(session.board().count(Mark::O), 0);
        assert_eq!(session.play_bot_move(fresh), Ok(true));
        assert_eq!(session.board().count(Mark::O), 1);
    }

    #[test]
    fn test_ticket_cannot_be_used_twice() {
        let mut session = create_session(GameConfig::default());
        let ticket = session.handle_human_move(4).unwrap();

        assert_eq!(session.play_bot_move(ticket), Ok(true));
        assert_eq!(session.play_bot_move(ticket), Ok(false));
        assert_eq!(session.board().count(Mark::O), 1);
    }

    #[test]
    fn test_reset_to_human_start_cancels_pending_move() {
        let mut session = create_session(computer_first());
        let ticket = session.pending_bot_move().unwrap();

        assert_eq!(session.configure(GameConfig::default()), None);

        assert_eq!(session.pending_bot_move(), None);
        assert_eq!(session.play_bot_move(ticket), Ok(false));
        assert_eq!(*session.board(), Board::new());
    }

    #[test]
    fn test_configure_keeps_scores() {
        let mut session = create_session(GameConfig::default());
        for index in [4, 1, 7] {
            exchange(&mut session, index);
        }

        session.configure(GameConfig {
            bot_type: BotType::Minimax,
            player_one_mark: Mark::O,
            ..GameConfig::default()
        });

        assert_eq!(session.scores().side_a_wins, 1);
        assert_eq!(session.bot_indicator(), "Model: Minimax");
        assert_eq!(
            session.side_labels(),
            ("PLAYER (O)".to_string(), "COMPUTER (X)".to_string())
        );
        assert_eq!(session.status().to_string(), "Turn: O (Human)");
    }

    #[test]
    fn test_two_player_mode_accepts_both_sides() {
        let config = GameConfig {
            mode: GameMode::TwoPlayer,
            ..GameConfig::default()
        };
        let mut session = create_session(config);

        for index in [0, 3, 1, 4, 8, 5] {
            assert_eq!(session.handle_human_move(index), None);
        }

        assert_eq!(session.status().to_string(), "Winner: O (Player 2)");
        assert_eq!(
            session.scores(),
            ScoreUpdate { side_a_wins: 0, side_b_wins: 1, ties: 0 }
        );
    }

    #[test]
    fn test_minimax_session_never_loses_to_lowest_cell_human() {
        let config = GameConfig {
            bot_type: BotType::Minimax,
            ..GameConfig::default()
        };
        let mut session = create_session(config);

        while !session.is_over() {
            let index = (0..BOARD_SIZE)
                .find(|&i| session.board().get(i).is_empty())
                .unwrap();
            exchange(&mut session, index);
        }

        assert_eq!(session.scores().side_a_wins, 0);
    }

    #[test]
    fn test_status_display() {
        let draw = StatusMessage {
            kind: StatusKind::Draw,
            mark: None,
            owner_label: None,
        };
        let turn = StatusMessage {
            kind: StatusKind::Turn,
            mark: Some(Mark::O),
            owner_label: Some("Player 2"),
        };

        assert_eq!(draw.to_string(), "It's a draw");
        assert_eq!(turn.to_string(), "Turn: O (Player 2)");
    }
}
