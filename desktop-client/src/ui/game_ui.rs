use eframe::egui;
use tictactoe_common::games::tictactoe::{BOARD_SIZE, GameSession, Mark, Position, WinningLine};

use crate::offline::LocalBroadcaster;

pub struct TicTacToeApp {
    session: GameSession<LocalBroadcaster>,
    last_hover: Option<Position>,
}

impl TicTacToeApp {
    const BOARD_PADDING: f32 = 20.0;
    const STATUS_HEIGHT: f32 = 70.0;
    const MIN_CELL_SIZE: f32 = 40.0;
    const LINE_WIDTH: f32 = 2.0;

    pub fn new(session: GameSession<LocalBroadcaster>) -> Self {
        Self {
            session,
            last_hover: None,
        }
    }

    fn calculate_cell_size(available_width: f32, available_height: f32) -> f32 {
        let board_width = available_width - Self::BOARD_PADDING * 2.0;
        let board_height = available_height - Self::BOARD_PADDING * 2.0;
        (board_width.min(board_height) / BOARD_SIZE as f32).max(Self::MIN_CELL_SIZE)
    }

    fn render_status(&self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.label(
                egui::RichText::new(self.session.broadcaster().status())
                    .size(36.0)
                    .strong(),
            );
        });
    }

    fn render_board(&mut self, ui: &mut egui::Ui) {
        let cell_size = Self::calculate_cell_size(ui.available_width(), ui.available_height());
        let board_size = cell_size * BOARD_SIZE as f32;

        ui.vertical_centered(|ui| {
            ui.add_space(Self::BOARD_PADDING);
            let (rect, response) =
                ui.allocate_exact_size(egui::vec2(board_size, board_size), egui::Sense::click());
            let painter = ui.painter();

            painter.rect_filled(rect, 0.0, egui::Color32::from_rgb(240, 240, 240));
            for i in 0..=BOARD_SIZE {
                let offset = i as f32 * cell_size;
                let stroke = egui::Stroke::new(Self::LINE_WIDTH, egui::Color32::BLACK);
                painter.line_segment(
                    [egui::pos2(rect.left() + offset, rect.top()), egui::pos2(rect.left() + offset, rect.bottom())],
                    stroke,
                );
                painter.line_segment(
                    [egui::pos2(rect.left(), rect.top() + offset), egui::pos2(rect.right(), rect.top() + offset)],
                    stroke,
                );
            }

            if let Some(line) = self.session.winning_line() {
                Self::highlight_line(painter, rect, cell_size, &line);
            } else if let Some(position) = self.session.last_move() {
                painter.rect_filled(
                    Self::cell_rect(rect, cell_size, position),
                    0.0,
                    egui::Color32::from_rgb(255, 240, 200),
                );
            }

            let view = self.session.broadcaster();
            for row in 0..BOARD_SIZE {
                for col in 0..BOARD_SIZE {
                    let cell_rect = Self::cell_rect(rect, cell_size, Position::new(row, col));
                    match view.mark_at(Position::new(row, col)) {
                        Mark::X => Self::draw_x(painter, cell_rect),
                        Mark::O => Self::draw_o(painter, cell_rect),
                        Mark::Empty => {}
                    }
                }
            }

            self.last_hover = None;
            let accepting = self.session.is_user_turn() && !self.session.is_game_over();
            if accepting
                && let Some(hover_pos) = response.hover_pos()
                && let Some(position) = cell_at(rect.min, cell_size, hover_pos)
                && view.mark_at(position) == Mark::Empty
            {
                painter.rect_filled(
                    Self::cell_rect(rect, cell_size, position),
                    0.0,
                    egui::Color32::from_rgba_unmultiplied(100, 150, 255, 50),
                );
                self.last_hover = Some(position);
            }

            if response.clicked()
                && let Some(position) = self.last_hover
            {
                // The computer answers inside this call; the frame waits for it.
                self.session.user_move(position);
            }
        });
    }

    fn cell_rect(board: egui::Rect, cell_size: f32, position: Position) -> egui::Rect {
        egui::Rect::from_min_size(
            egui::pos2(
                board.left() + position.col as f32 * cell_size,
                board.top() + position.row as f32 * cell_size,
            ),
            egui::vec2(cell_size, cell_size),
        )
    }

    fn highlight_line(painter: &egui::Painter, board: egui::Rect, cell_size: f32, line: &WinningLine) {
        for &position in &line.cells {
            painter.rect_filled(
                Self::cell_rect(board, cell_size, position),
                0.0,
                egui::Color32::from_rgb(190, 235, 190),
            );
        }
    }

    fn draw_x(painter: &egui::Painter, rect: egui::Rect) {
        let padding = rect.width() * 0.2;
        let stroke = egui::Stroke::new(6.0, egui::Color32::from_rgb(220, 50, 50));

        painter.line_segment(
            [
                egui::pos2(rect.left() + padding, rect.top() + padding),
                egui::pos2(rect.right() - padding, rect.bottom() - padding),
            ],
            stroke,
        );
        painter.line_segment(
            [
                egui::pos2(rect.right() - padding, rect.top() + padding),
                egui::pos2(rect.left() + padding, rect.bottom() - padding),
            ],
            stroke,
        );
    }

    fn draw_o(painter: &egui::Painter, rect: egui::Rect) {
        let radius = rect.width() / 2.0 - rect.width() * 0.2;
        let stroke = egui::Stroke::new(6.0, egui::Color32::from_rgb(50, 50, 220));
        painter.circle_stroke(rect.center(), radius, stroke);
    }
}

impl eframe::App for TicTacToeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("status")
            .exact_height(Self::STATUS_HEIGHT)
            .show(ctx, |ui| self.render_status(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.render_board(ui));
    }
}

/// Maps a pointer position to the board cell under it.
pub fn cell_at(board_min: egui::Pos2, cell_size: f32, pointer: egui::Pos2) -> Option<Position> {
    if cell_size <= 0.0 {
        return None;
    }
    let dx = pointer.x - board_min.x;
    let dy = pointer.y - board_min.y;
    if dx < 0.0 || dy < 0.0 {
        return None;
    }

    let position = Position::new((dy / cell_size) as usize, (dx / cell_size) as usize);
    if position.row < BOARD_SIZE && position.col < BOARD_SIZE {
        Some(position)
    } else {
        None
    }
}
