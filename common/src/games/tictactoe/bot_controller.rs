use serde::{Deserialize, Serialize};

use super::board::{BOARD_SIZE, Board, CELL_COUNT};
use super::types::{Mark, Position};
use super::win_detector::has_full_line;

/// Plies the computer looks ahead on every move.
pub const SEARCH_DEPTH: usize = 4;

/// How the search reacts once `beta <= alpha` at a node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PruningMode {
    /// Stop scanning the node entirely.
    #[default]
    FullNode,
    /// Stop scanning the current row only and resume at the next one. Leaves
    /// are still decided per node, so a completed line ends its branch.
    RowScoped,
    /// Plain minimax; bounds are tracked but never cut.
    Disabled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchResult {
    pub score: i32,
    pub position: Option<Position>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes_visited: u64,
    pub cutoffs: u64,
}

pub struct BotInput {
    pub board: Board,
    pub computer_mark: Mark,
    pub depth: usize,
    pub pruning: PruningMode,
}

/// Minimax over an exclusively borrowed scratch board. Every placement made
/// while searching is undone before the call that made it returns.
pub struct Searcher<'a> {
    board: &'a mut Board,
    turns: usize,
    computer_mark: Mark,
    user_mark: Mark,
    pruning: PruningMode,
    stats: SearchStats,
}

impl<'a> Searcher<'a> {
    pub fn new(board: &'a mut Board, computer_mark: Mark, pruning: PruningMode) -> Option<Self> {
        let user_mark = computer_mark.opponent()?;
        let turns = board.marked_count();
        Some(Self {
            board,
            turns,
            computer_mark,
            user_mark,
            pruning,
            stats: SearchStats::default(),
        })
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn search(&mut self, depth: usize, mut alpha: i32, mut beta: i32, maximizing: bool) -> SearchResult {
        self.stats.nodes_visited += 1;

        if depth == 0 || self.is_game_over() {
            return SearchResult {
                score: self.evaluate(),
                position: None,
            };
        }

        let mover = if maximizing {
            self.computer_mark
        } else {
            self.user_mark
        };
        let mut best = SearchResult {
            score: if maximizing { i32::MIN } else { i32::MAX },
            position: None,
        };

        'rows: for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let position = Position::new(row, col);
                if !self.board.is_empty_at(position) {
                    continue;
                }

                self.board.set(position, mover);
                self.turns += 1;
                let score = self.search(depth - 1, alpha, beta, !maximizing).score;
                self.board.clear(position);
                self.turns -= 1;

                if maximizing {
                    if score > best.score {
                        best = SearchResult { score, position: Some(position) };
                    }
                    alpha = alpha.max(best.score);
                } else {
                    if score < best.score {
                        best = SearchResult { score, position: Some(position) };
                    }
                    beta = beta.min(best.score);
                }

                if beta <= alpha {
                    match self.pruning {
                        PruningMode::FullNode => {
                            self.stats.cutoffs += 1;
                            break 'rows;
                        }
                        PruningMode::RowScoped => {
                            self.stats.cutoffs += 1;
                            break;
                        }
                        PruningMode::Disabled => {}
                    }
                }
            }
        }

        best
    }

    /// +1 when the computer owns a full line, -1 when the user does.
    pub fn evaluate(&self) -> i32 {
        if has_full_line(self.board, self.computer_mark) {
            return 1;
        }
        if has_full_line(self.board, self.user_mark) {
            return -1;
        }
        0
    }

    fn is_game_over(&self) -> bool {
        self.turns >= CELL_COUNT
            || has_full_line(self.board, self.computer_mark)
            || has_full_line(self.board, self.user_mark)
    }
}

pub fn run_search(input: &BotInput) -> Option<(SearchResult, SearchStats)> {
    let mut board = input.board;
    let mut searcher = Searcher::new(&mut board, input.computer_mark, input.pruning)?;
    let result = searcher.search(input.depth, i32::MIN, i32::MAX, true);
    Some((result, searcher.stats()))
}

pub fn calculate_minimax_move(input: &BotInput) -> Option<Position> {
    run_search(input).and_then(|(result, _)| result.position)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(board: Board, computer_mark: Mark, depth: usize, pruning: PruningMode) -> BotInput {
        BotInput {
            board,
            computer_mark,
            depth,
            pruning,
        }
    }

    fn search_with(board: &mut Board, computer_mark: Mark, depth: usize, pruning: PruningMode) -> (SearchResult, SearchStats) {
        let mut searcher = Searcher::new(board, computer_mark, pruning).unwrap();
        let result = searcher.search(depth, i32::MIN, i32::MAX, true);
        (result, searcher.stats())
    }

    fn random_position(marks: usize) -> Board {
        loop {
            let mut board = Board::new();
            let mut mark = Mark::X;
            for _ in 0..marks {
                let empty = board.empty_cells();
                let pos = empty[rand::random_range(0..empty.len())];
                board.set(pos, mark);
                mark = mark.opponent().unwrap();
            }
            if !has_full_line(&board, Mark::X) && !has_full_line(&board, Mark::O) {
                return board;
            }
        }
    }

    #[test]
    fn test_takes_immediate_win_at_any_depth() {
        let board = Board::from_rows(["OOO.", "....", "....", "...."]);
        for depth in 1..=SEARCH_DEPTH {
            for pruning in [PruningMode::FullNode, PruningMode::RowScoped, PruningMode::Disabled] {
                let chosen = calculate_minimax_move(&input(board, Mark::O, depth, pruning));
                assert_eq!(chosen, Some(Position::new(0, 3)), "depth {} {:?}", depth, pruning);
            }
        }
    }

    #[test]
    fn test_blocks_opponent_line() {
        let board = Board::from_rows(["O...", "XXX.", "....", "...O"]);
        for depth in [2, SEARCH_DEPTH] {
            let chosen = calculate_minimax_move(&input(board, Mark::O, depth, PruningMode::FullNode));
            assert_eq!(chosen, Some(Position::new(1, 3)));
        }
    }

    #[test]
    fn test_full_board_without_line_has_no_move() {
        let mut board = Board::from_rows(["XOXO", "XOXO", "OXOX", "OXOX"]);
        let snapshot = board;
        assert!(!has_full_line(&board, Mark::X));
        assert!(!has_full_line(&board, Mark::O));

        let (result, stats) = search_with(&mut board, Mark::O, SEARCH_DEPTH, PruningMode::FullNode);

        assert_eq!(result.position, None);
        assert_eq!(result.score, 0);
        assert_eq!(stats.nodes_visited, 1);
        assert_eq!(board, snapshot);
    }

    #[test]
    fn test_zero_depth_is_pure_evaluation() {
        let mut board = Board::from_rows(["XXXX", "OOO.", "....", "...."]);
        let (result, _) = search_with(&mut board, Mark::O, 0, PruningMode::FullNode);
        assert_eq!(result, SearchResult { score: -1, position: None });
    }

    #[test]
    fn test_ties_keep_first_row_major_move() {
        let board = Board::new();
        let (result, _) = run_search(&input(board, Mark::X, 1, PruningMode::FullNode)).unwrap();
        assert_eq!(result.score, 0);
        assert_eq!(result.position, Some(Position::new(0, 0)));
    }

    #[test]
    fn test_search_restores_board() {
        for pruning in [PruningMode::FullNode, PruningMode::RowScoped, PruningMode::Disabled] {
            for marks in [0, 3, 6, 9, 12] {
                let mut board = random_position(marks);
                let snapshot = board;
                search_with(&mut board, Mark::O, SEARCH_DEPTH, pruning);
                assert_eq!(board, snapshot);
            }
        }
    }

    #[test]
    fn test_pruned_score_matches_plain_minimax() {
        for _ in 0..15 {
            let marks = rand::random_range(2..12);
            let board = random_position(marks);
            for computer_mark in [Mark::X, Mark::O] {
                let (pruned, pruned_stats) =
                    run_search(&input(board, computer_mark, SEARCH_DEPTH, PruningMode::FullNode)).unwrap();
                let (plain, plain_stats) =
                    run_search(&input(board, computer_mark, SEARCH_DEPTH, PruningMode::Disabled)).unwrap();

                assert_eq!(pruned.score, plain.score, "board {:?}", board);
                assert!(pruned_stats.nodes_visited <= plain_stats.nodes_visited);
                assert_eq!(plain_stats.cutoffs, 0);
            }
        }
    }

    #[test]
    fn test_row_scoped_pruning_counts_cutoffs() {
        let board = random_position(2);
        let (_, stats) = run_search(&input(board, Mark::O, SEARCH_DEPTH, PruningMode::RowScoped)).unwrap();
        let (_, plain) = run_search(&input(board, Mark::O, SEARCH_DEPTH, PruningMode::Disabled)).unwrap();
        assert!(stats.cutoffs > 0);
        assert!(stats.nodes_visited < plain.nodes_visited);
    }

    #[test]
    fn test_empty_computer_mark_is_rejected() {
        let board = Board::new();
        assert!(run_search(&input(board, Mark::Empty, 1, PruningMode::FullNode)).is_none());
    }
}
