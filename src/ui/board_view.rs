//! Board rendering for the Jump61 GUI

use egui::{CornerRadius, Painter, Pos2, Rect, Sense, Stroke, Vec2};

use crate::{Board, MutableBoard, Pos, Side};

use super::theme::*;

/// Board view handles rendering and input for the game board
pub struct BoardView {
    /// Cached cell size for coordinate calculations
    cell_size: f32,
    /// Board drawing area
    board_rect: Rect,
    /// Side length of the board last drawn
    size: usize,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            cell_size: 60.0,
            board_rect: Rect::NOTHING,
            size: 0,
        }
    }
}

impl BoardView {
    /// Render the board and return the clicked cell, if any
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        board: &MutableBoard,
        current_turn: Side,
        last_move: Option<Pos>,
        suggested_move: Option<Pos>,
        accepts_input: bool,
    ) -> Option<Pos> {
        let available_size = ui.available_size();
        let board_size = available_size.x.min(available_size.y) - 20.0;
        self.size = board.size();
        self.cell_size = (board_size - 2.0 * BOARD_MARGIN) / self.size as f32;

        let (response, painter) = ui.allocate_painter(Vec2::new(board_size, board_size), Sense::click());
        self.board_rect = response.rect;

        painter.rect_filled(self.board_rect, CornerRadius::same(6), BOARD_BG);
        self.draw_coordinates(&painter);
        self.draw_cells(&painter, board);

        if let Some(pos) = last_move {
            self.draw_last_move_marker(&painter, pos);
        }
        if let Some(pos) = suggested_move {
            self.draw_suggestion(&painter, pos);
        }
        if let Some(winner) = board.winner() {
            self.draw_win_frame(&painter, winner);
        }

        let mut clicked_pos = None;
        if accepts_input {
            if let Some(pointer_pos) = response.hover_pos() {
                if let Some(pos) = self.screen_to_board(pointer_pos) {
                    let is_valid = board.is_legal(current_turn, pos);
                    self.draw_hover_preview(&painter, pos, is_valid);
                    if response.clicked() && is_valid {
                        clicked_pos = Some(pos);
                    }
                }
            }
        }

        clicked_pos
    }

    /// Row numbers on the left, column numbers on top (1-based, as in `r:c`)
    fn draw_coordinates(&self, painter: &Painter) {
        let font = egui::FontId::proportional(13.0);
        for i in 1..=self.size {
            let center = self.cell_rect(Pos::new(i, i)).center();
            let top = Pos2::new(center.x, self.board_rect.min.y + BOARD_MARGIN * 0.5);
            painter.text(top, egui::Align2::CENTER_CENTER, i, font.clone(), COORD_TEXT);
            let left = Pos2::new(self.board_rect.min.x + BOARD_MARGIN * 0.5, center.y);
            painter.text(left, egui::Align2::CENTER_CENTER, i, font.clone(), COORD_TEXT);
        }
    }

    fn draw_cells(&self, painter: &Painter, board: &MutableBoard) {
        for n in 1..=board.num_cells() {
            let Some(pos) = board.pos_of(n) else { continue };
            let cell = board.get(pos);
            let rect = self.cell_rect(pos).shrink(CELL_GAP);
            painter.rect_filled(rect, CornerRadius::same(4), cell_fill(cell.side()));

            // A cell one spot from firing gets a ring
            if cell.spots() as usize == board.neighbors(pos) {
                painter.circle_stroke(
                    rect.center(),
                    rect.width() * 0.42,
                    Stroke::new(2.0, FULL_CELL_RING),
                );
            }
            self.draw_spots(painter, rect, cell.spots(), spot_color(cell.side()));
        }
    }

    /// Spots as dots for small counts, as a number beyond four
    fn draw_spots(&self, painter: &Painter, rect: Rect, spots: u32, color: egui::Color32) {
        let radius = rect.width() * SPOT_RADIUS_RATIO;
        let c = rect.center();
        let d = rect.width() * 0.2;
        let offsets: &[Vec2] = match spots {
            0 => &[],
            1 => &[Vec2::ZERO],
            2 => &[Vec2::new(-d, 0.0), Vec2::new(d, 0.0)],
            3 => &[Vec2::new(-d, d), Vec2::new(d, d), Vec2::new(0.0, -d)],
            4 => &[
                Vec2::new(-d, -d),
                Vec2::new(d, -d),
                Vec2::new(-d, d),
                Vec2::new(d, d),
            ],
            _ => {
                painter.text(
                    c,
                    egui::Align2::CENTER_CENTER,
                    spots,
                    egui::FontId::proportional(rect.width() * 0.4),
                    color,
                );
                return;
            }
        };
        for offset in offsets {
            painter.circle_filled(c + *offset, radius, color);
        }
    }

    fn draw_last_move_marker(&self, painter: &Painter, pos: Pos) {
        let rect = self.cell_rect(pos).shrink(CELL_GAP);
        let stroke = Stroke::new(LAST_MOVE_MARKER_WIDTH, LAST_MOVE_MARKER);
        let corners = [rect.left_top(), rect.right_top(), rect.right_bottom(), rect.left_bottom()];
        for i in 0..4 {
            painter.line_segment([corners[i], corners[(i + 1) % 4]], stroke);
        }
    }

    fn draw_suggestion(&self, painter: &Painter, pos: Pos) {
        let rect = self.cell_rect(pos);
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            "?",
            egui::FontId::proportional(rect.width() * 0.5),
            LAST_MOVE_MARKER,
        );
    }

    /// Frame the whole board in the winner's color
    fn draw_win_frame(&self, painter: &Painter, winner: Side) {
        let inner = self.board_rect.shrink(BOARD_MARGIN * 0.5 - 4.0);
        let stroke = Stroke::new(4.0, WIN_HIGHLIGHT);
        let corners = [inner.left_top(), inner.right_top(), inner.right_bottom(), inner.left_bottom()];
        for i in 0..4 {
            painter.line_segment([corners[i], corners[(i + 1) % 4]], stroke);
        }
        painter.text(
            Pos2::new(self.board_rect.center().x, self.board_rect.max.y - BOARD_MARGIN * 0.5),
            egui::Align2::CENTER_CENTER,
            format!("{winner} wins"),
            egui::FontId::proportional(14.0),
            cell_fill(winner),
        );
    }

    fn draw_hover_preview(&self, painter: &Painter, pos: Pos, is_valid: bool) {
        let rect = self.cell_rect(pos).shrink(CELL_GAP);
        let color = if is_valid { hover_valid() } else { hover_invalid() };
        painter.rect_filled(rect, CornerRadius::same(4), color);
    }

    /// Screen rectangle of the cell at `pos`
    fn cell_rect(&self, pos: Pos) -> Rect {
        let min = self.board_rect.min
            + Vec2::new(
                BOARD_MARGIN + (pos.col - 1) as f32 * self.cell_size,
                BOARD_MARGIN + (pos.row - 1) as f32 * self.cell_size,
            );
        Rect::from_min_size(min, Vec2::splat(self.cell_size))
    }

    /// Convert screen coordinates to a board position
    pub fn screen_to_board(&self, screen_pos: Pos2) -> Option<Pos> {
        let relative = screen_pos - self.board_rect.min;
        let col = ((relative.x - BOARD_MARGIN) / self.cell_size).floor();
        let row = ((relative.y - BOARD_MARGIN) / self.cell_size).floor();

        let size = self.size as f32;
        if col >= 0.0 && col < size && row >= 0.0 && row < size {
            Some(Pos::new(row as usize + 1, col as usize + 1))
        } else {
            None
        }
    }
}
