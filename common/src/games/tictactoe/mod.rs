mod board;
mod bot_controller;
mod game_state;
mod types;
mod win_detector;

pub use board::{BOARD_SIZE, Board, CELL_COUNT};
pub use bot_controller::{
    BotInput, PruningMode, SEARCH_DEPTH, SearchResult, SearchStats, Searcher, calculate_minimax_move,
    run_search,
};
pub use game_state::GameSession;
pub use types::{Mark, MoveApplied, MoveRejection, Outcome, Position, SessionState, WinningLine};
pub use win_detector::{all_lines, check_win, check_win_with_line, find_line, has_full_line};
