use super::board::{BOARD_SIZE, Board};
use super::types::{Mark, Position, WinningLine};

pub const LINE_COUNT: usize = 2 * BOARD_SIZE + 2;

/// Every line that wins the game: the rows, the columns, then the main and
/// anti diagonals.
pub fn all_lines() -> [[Position; BOARD_SIZE]; LINE_COUNT] {
    let mut lines = [[Position::new(0, 0); BOARD_SIZE]; LINE_COUNT];
    for i in 0..BOARD_SIZE {
        for j in 0..BOARD_SIZE {
            lines[i][j] = Position::new(i, j);
            lines[BOARD_SIZE + i][j] = Position::new(j, i);
        }
        lines[2 * BOARD_SIZE][i] = Position::new(i, i);
        lines[2 * BOARD_SIZE + 1][i] = Position::new(i, BOARD_SIZE - 1 - i);
    }
    lines
}

pub fn has_full_line(board: &Board, mark: Mark) -> bool {
    find_line(board, mark).is_some()
}

/// Returns the winning mark, checking X before O. On a legal board at most one
/// of them can own a line.
pub fn check_win(board: &Board) -> Option<Mark> {
    check_win_with_line(board).map(|line| line.mark)
}

pub fn check_win_with_line(board: &Board) -> Option<WinningLine> {
    [Mark::X, Mark::O]
        .into_iter()
        .find_map(|mark| find_line(board, mark))
}

pub fn find_line(board: &Board, mark: Mark) -> Option<WinningLine> {
    if mark == Mark::Empty {
        return None;
    }

    all_lines()
        .into_iter()
        .find(|line| line.iter().all(|&pos| board.get(pos) == Some(mark)))
        .map(|cells| WinningLine { mark, cells })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_line_is_detected() {
        for line in all_lines() {
            let mut board = Board::new();
            for pos in line {
                board.set(pos, Mark::O);
            }
            assert!(has_full_line(&board, Mark::O), "line {:?} not detected", line);
            assert!(!has_full_line(&board, Mark::X));
            assert_eq!(check_win(&board), Some(Mark::O));
        }
    }

    #[test]
    fn test_three_in_a_row_does_not_win() {
        let rows = Board::from_rows(["XXX.", "....", "....", "...."]);
        let cols = Board::from_rows(["O...", "O...", "O...", "...."]);
        let diag = Board::from_rows(["X...", ".X..", "..X.", "...."]);
        let anti = Board::from_rows(["...O", "..O.", ".O..", "...."]);

        for board in [rows, cols, diag, anti] {
            assert_eq!(check_win(&board), None);
        }
    }

    #[test]
    fn test_mixed_line_does_not_win() {
        let board = Board::from_rows(["XXXO", "O..X", "..O.", "X..O"]);
        assert_eq!(check_win(&board), None);
    }

    #[test]
    fn test_winning_line_positions() {
        let board = Board::from_rows(["...X", "..X.", ".X..", "X..."]);
        let line = check_win_with_line(&board).unwrap();

        assert_eq!(line.mark, Mark::X);
        assert_eq!(line.start(), Position::new(0, 3));
        assert_eq!(line.end(), Position::new(3, 0));
        assert!(line.contains(Position::new(1, 2)));
        assert!(!line.contains(Position::new(0, 0)));
    }

    #[test]
    fn test_empty_mark_never_wins() {
        let board = Board::new();
        assert!(!has_full_line(&board, Mark::Empty));
        assert_eq!(check_win(&board), None);
    }

    #[test]
    fn test_win_iff_some_line_is_uniform_random_boards() {
        for _ in 0..500 {
            let mut board = Board::new();
            for row in 0..BOARD_SIZE {
                for col in 0..BOARD_SIZE {
                    let mark = match rand::random_range(0..3) {
                        0 => Mark::Empty,
                        1 => Mark::X,
                        _ => Mark::O,
                    };
                    board.set(Position::new(row, col), mark);
                }
            }

            for mark in [Mark::X, Mark::O] {
                let expected = all_lines()
                    .iter()
                    .any(|line| line.iter().all(|&p| board.get(p) == Some(mark)));
                assert_eq!(has_full_line(&board, mark), expected);
            }
        }
    }
}
