//! Theme constants for the Jump61 GUI

use egui::Color32;

use crate::Side;

// Board colors
pub const BOARD_BG: Color32 = Color32::from_rgb(46, 49, 56);
pub const EMPTY_CELL: Color32 = Color32::from_rgb(70, 74, 82);
pub const COORD_TEXT: Color32 = Color32::from_rgb(150, 155, 165);

// Side colors
pub const RED_CELL: Color32 = Color32::from_rgb(200, 70, 70);
pub const RED_SPOT: Color32 = Color32::from_rgb(255, 225, 225);
pub const BLUE_CELL: Color32 = Color32::from_rgb(60, 110, 210);
pub const BLUE_SPOT: Color32 = Color32::from_rgb(225, 235, 255);

// Markers
pub const LAST_MOVE_MARKER: Color32 = Color32::from_rgb(250, 210, 60);
pub const WIN_HIGHLIGHT: Color32 = Color32::from_rgb(50, 220, 50);
pub const FULL_CELL_RING: Color32 = Color32::from_rgb(255, 150, 40);

pub fn hover_valid() -> Color32 {
    Color32::from_rgba_unmultiplied(255, 255, 255, 50)
}

pub fn hover_invalid() -> Color32 {
    Color32::from_rgba_unmultiplied(255, 50, 50, 100)
}

/// Fill color for a cell owned by `side`
pub fn cell_fill(side: Side) -> Color32 {
    match side {
        Side::Red => RED_CELL,
        Side::Blue => BLUE_CELL,
        Side::Neutral => EMPTY_CELL,
    }
}

/// Color used for the spots drawn inside a cell of `side`
pub fn spot_color(side: Side) -> Color32 {
    match side {
        Side::Red => RED_SPOT,
        Side::Blue => BLUE_SPOT,
        Side::Neutral => COORD_TEXT,
    }
}

// Panel colors - dark modern theme
pub const PANEL_BG: Color32 = Color32::from_rgb(25, 27, 31);
pub const CARD_BG: Color32 = Color32::from_rgb(35, 38, 43);
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(240, 240, 245);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 165, 175);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 125, 135);

// Timer colors
pub const TIMER_NORMAL: Color32 = Color32::from_rgb(80, 200, 120);
pub const TIMER_WARNING: Color32 = Color32::from_rgb(255, 180, 50);
pub const TIMER_CRITICAL: Color32 = Color32::from_rgb(255, 70, 70);

// Sizes
pub const BOARD_MARGIN: f32 = 32.0;
pub const CELL_GAP: f32 = 3.0;
pub const SPOT_RADIUS_RATIO: f32 = 0.09;
pub const LAST_MOVE_MARKER_WIDTH: f32 = 3.0;
