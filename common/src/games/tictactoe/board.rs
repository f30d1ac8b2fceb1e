use super::types::{Mark, Position};

pub const BOARD_SIZE: usize = 4;
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Mark; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from rows of `X`, `O` and `.` characters. Any other
    /// character is treated as empty.
    pub fn from_rows(rows: [&str; BOARD_SIZE]) -> Self {
        let mut board = Self::new();
        for (row, line) in rows.iter().enumerate() {
            for (col, ch) in line.chars().take(BOARD_SIZE).enumerate() {
                board.cells[row][col] = match ch {
                    'X' | 'x' => Mark::X,
                    'O' | 'o' => Mark::O,
                    _ => Mark::Empty,
                };
            }
        }
        board
    }

    pub fn in_bounds(position: Position) -> bool {
        position.row < BOARD_SIZE && position.col < BOARD_SIZE
    }

    pub fn get(&self, position: Position) -> Option<Mark> {
        if !Self::in_bounds(position) {
            return None;
        }
        Some(self.cells[position.row][position.col])
    }

    /// Off-board positions are ignored.
    pub fn set(&mut self, position: Position, mark: Mark) {
        if let Some(cell) = self.cell_mut(position) {
            *cell = mark;
        }
    }

    pub fn clear(&mut self, position: Position) {
        self.set(position, Mark::Empty);
    }

    fn cell_mut(&mut self, position: Position) -> Option<&mut Mark> {
        self.cells.get_mut(position.row)?.get_mut(position.col)
    }

    pub fn is_empty_at(&self, position: Position) -> bool {
        self.get(position) == Some(Mark::Empty)
    }

    /// Empty cells in row-major order.
    pub fn empty_cells(&self) -> Vec<Position> {
        let mut moves = Vec::with_capacity(CELL_COUNT);
        for (row, line) in self.cells.iter().enumerate() {
            for (col, &cell) in line.iter().enumerate() {
                if cell == Mark::Empty {
                    moves.push(Position::new(row, col));
                }
            }
        }
        moves
    }

    pub fn marked_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| !cell.is_empty())
            .count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|cell| !cell.is_empty())
    }
}
