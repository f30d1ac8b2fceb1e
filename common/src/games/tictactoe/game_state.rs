use crate::games::{GameBroadcaster, NullBroadcaster};
use crate::{log, log_debug};

use super::board::{Board, CELL_COUNT};
use super::bot_controller::{BotInput, PruningMode, SEARCH_DEPTH, run_search};
use super::types::{Mark, MoveApplied, MoveRejection, Outcome, Position, SessionState, WinningLine};
use super::win_detector::{find_line, has_full_line};

pub struct GameSession<B: GameBroadcaster = NullBroadcaster> {
    board: Board,
    turns: usize,
    user_mark: Mark,
    computer_mark: Mark,
    current_mark: Mark,
    is_user_turn: bool,
    game_over: bool,
    outcome: Outcome,
    last_move: Option<Position>,
    pruning: PruningMode,
    broadcaster: B,
}

impl GameSession<NullBroadcaster> {
    pub fn new(user_mark: Mark) -> Option<Self> {
        Self::with_broadcaster(user_mark, NullBroadcaster)
    }
}

impl<B: GameBroadcaster> GameSession<B> {
    /// The user always moves first. Returns `None` for `Mark::Empty`.
    pub fn with_broadcaster(user_mark: Mark, broadcaster: B) -> Option<Self> {
        let computer_mark = user_mark.opponent()?;
        let mut session = Self {
            board: Board::new(),
            turns: 0,
            user_mark,
            computer_mark,
            current_mark: user_mark,
            is_user_turn: true,
            game_over: false,
            outcome: Outcome::Ongoing,
            last_move: None,
            pruning: PruningMode::default(),
            broadcaster,
        };
        log!("New game: user plays {}, computer plays {}", user_mark, computer_mark);
        session.notify_status();
        Some(session)
    }

    pub fn with_pruning(mut self, pruning: PruningMode) -> Self {
        self.pruning = pruning;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turns(&self) -> usize {
        self.turns
    }

    pub fn user_mark(&self) -> Mark {
        self.user_mark
    }

    pub fn computer_mark(&self) -> Mark {
        self.computer_mark
    }

    pub fn current_mark(&self) -> Mark {
        self.current_mark
    }

    pub fn is_user_turn(&self) -> bool {
        self.is_user_turn
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn last_move(&self) -> Option<Position> {
        self.last_move
    }

    pub fn pruning(&self) -> PruningMode {
        self.pruning
    }

    pub fn broadcaster(&self) -> &B {
        &self.broadcaster
    }

    pub fn broadcaster_mut(&mut self) -> &mut B {
        &mut self.broadcaster
    }

    pub fn state(&self) -> SessionState {
        match self.outcome {
            Outcome::Win(mark) => SessionState::Won(mark),
            Outcome::Draw => SessionState::Draw,
            Outcome::Ongoing if self.is_user_turn => SessionState::AwaitingUserMove,
            Outcome::Ongoing => SessionState::AwaitingComputerMove,
        }
    }

    pub fn winning_line(&self) -> Option<WinningLine> {
        match self.outcome {
            Outcome::Win(mark) => find_line(&self.board, mark),
            _ => None,
        }
    }

    pub fn status_text(&self) -> String {
        match self.outcome {
            Outcome::Win(mark) if mark == self.user_mark => "You win!".to_string(),
            Outcome::Win(_) => "Computer wins!".to_string(),
            Outcome::Draw => "It's a tie!".to_string(),
            Outcome::Ongoing if self.is_user_turn => format!("Your turn ({})", self.current_mark),
            Outcome::Ongoing => format!("Computer's turn ({})", self.current_mark),
        }
    }

    pub fn apply_move(&mut self, position: Position, mark: Mark) -> Result<MoveApplied, MoveRejection> {
        if self.game_over {
            return Err(MoveRejection::GameOver);
        }

        if mark != self.current_mark {
            return Err(MoveRejection::NotYourTurn { mark });
        }

        if !Board::in_bounds(position) {
            return Err(MoveRejection::OutOfBounds(position));
        }

        if !self.board.is_empty_at(position) {
            return Err(MoveRejection::CellOccupied(position));
        }

        self.board.set(position, mark);
        self.turns += 1;
        self.last_move = Some(position);
        self.broadcaster.on_cell_marked(position, mark);

        let outcome = self.evaluate_terminal();
        if outcome == Outcome::Ongoing {
            self.switch_turn();
        }

        Ok(MoveApplied {
            position,
            mark,
            outcome,
        })
    }

    /// Checks the mark that just moved for a full line, then for a full board.
    pub fn evaluate_terminal(&mut self) -> Outcome {
        if self.game_over {
            return self.outcome;
        }

        let mover = self.current_mark;
        let outcome = if has_full_line(&self.board, mover) {
            Outcome::Win(mover)
        } else if self.turns == CELL_COUNT {
            Outcome::Draw
        } else {
            Outcome::Ongoing
        };

        if outcome.is_terminal() {
            self.game_over = true;
            self.outcome = outcome;
            log!("Game over after {} turns: {:?}", self.turns, outcome);
            self.notify_status();
        }

        outcome
    }

    pub fn switch_turn(&mut self) {
        self.current_mark = if self.current_mark == self.user_mark {
            self.computer_mark
        } else {
            self.user_mark
        };
        self.is_user_turn = !self.is_user_turn;
        self.notify_status();
    }

    /// Entry point for user clicks. Anything that is not a legal move for the
    /// user is ignored. An accepted move that keeps the game going is answered
    /// by the computer before this returns.
    pub fn user_move(&mut self, position: Position) -> Option<MoveApplied> {
        if self.game_over || !self.is_user_turn || !self.board.is_empty_at(position) {
            log_debug!("Ignoring click at {}", position);
            return None;
        }

        let applied = match self.apply_move(position, self.user_mark) {
            Ok(applied) => applied,
            Err(rejection) => {
                log_debug!("User move rejected: {}", rejection);
                return None;
            }
        };

        if applied.outcome == Outcome::Ongoing {
            self.computer_move();
        }

        Some(applied)
    }

    pub fn computer_move(&mut self) -> Option<MoveApplied> {
        if self.game_over || self.is_user_turn {
            return None;
        }

        let input = BotInput {
            board: self.board,
            computer_mark: self.computer_mark,
            depth: SEARCH_DEPTH,
            pruning: self.pruning,
        };
        let (result, stats) = run_search(&input)?;
        log_debug!(
            "Search finished: score {}, {} nodes, {} cutoffs",
            result.score,
            stats.nodes_visited,
            stats.cutoffs
        );

        let position = result.position?;
        match self.apply_move(position, self.computer_mark) {
            Ok(applied) => Some(applied),
            Err(rejection) => {
                log!("Computer move {} rejected: {}", position, rejection);
                None
            }
        }
    }

    fn notify_status(&mut self) {
        let text = self.status_text();
        self.broadcaster.on_status_changed(&text);
    }
}
