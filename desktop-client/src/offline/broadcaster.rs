use tictactoe_common::games::GameBroadcaster;
use tictactoe_common::games::tictactoe::{BOARD_SIZE, Mark, Position};
use tictactoe_common::log;

/// What the window draws. Filled only from session notifications, so the
/// rendering code never inspects the rules engine's board directly.
#[derive(Debug, Clone)]
pub struct LocalBroadcaster {
    status: String,
    marks: [[Mark; BOARD_SIZE]; BOARD_SIZE],
    moves: Vec<(Position, Mark)>,
}

impl LocalBroadcaster {
    pub fn new() -> Self {
        Self {
            status: String::new(),
            marks: [[Mark::Empty; BOARD_SIZE]; BOARD_SIZE],
            moves: Vec::new(),
        }
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn mark_at(&self, position: Position) -> Mark {
        self.marks
            .get(position.row)
            .and_then(|row| row.get(position.col))
            .copied()
            .unwrap_or(Mark::Empty)
    }

    pub fn moves(&self) -> &[(Position, Mark)] {
        &self.moves
    }
}

impl Default for LocalBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

impl GameBroadcaster for LocalBroadcaster {
    fn on_status_changed(&mut self, text: &str) {
        log!("{}", text);
        self.status = text.to_string();
    }

    fn on_cell_marked(&mut self, position: Position, mark: Mark) {
        self.marks[position.row][position.col] = mark;
        self.moves.push((position, mark));
    }
}
