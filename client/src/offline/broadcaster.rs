use tictactoe_common::games::tictactoe::{
    BoardSnapshot, Cell, GameBroadcaster, ScoreUpdate, StatusMessage,
};

/// Prints every snapshot to stdout.
#[derive(Default)]
pub struct ConsoleBroadcaster {
    labels: (String, String),
}

impl ConsoleBroadcaster {
    pub fn set_labels(&mut self, labels: (String, String)) {
        self.labels = labels;
    }
}

/// Empty cells show their 1-9 number; the winning line is bracketed.
pub fn render_board(snapshot: &BoardSnapshot) -> String {
    let mut rows = Vec::with_capacity(3);
    for row in 0..3 {
        let cells: Vec<String> = (0..3)
            .map(|col| {
                let index = row * 3 + col;
                let symbol = match snapshot.cells[index] {
                    Cell::Marked(mark) => mark.to_string(),
                    Cell::Empty => (index + 1).to_string(),
                };
                let highlighted = snapshot
                    .terminal_line
                    .is_some_and(|line| line.contains(&index));
                if highlighted {
                    format!("[{}]", symbol)
                } else {
                    format!(" {} ", symbol)
                }
            })
            .collect();
        rows.push(cells.join("|"));
    }
    rows.join("\n---+---+---\n")
}

pub fn render_scores(scores: &ScoreUpdate, labels: (&str, &str)) -> String {
    format!(
        "{}: {}  {}: {}  TIES: {}",
        labels.0, scores.side_a_wins, labels.1, scores.side_b_wins, scores.ties
    )
}

impl GameBroadcaster for ConsoleBroadcaster {
    fn broadcast_state(&mut self, snapshot: &BoardSnapshot, status: &StatusMessage) {
        println!("\n{}\n{}", render_board(snapshot), status);
    }

    fn broadcast_scores(&mut self, scores: &ScoreUpdate) {
        println!("{}", render_scores(scores, (&self.labels.0, &self.labels.1)));
    }
}
