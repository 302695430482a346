use macroquad::prelude::*;

use tetris::brick::{filled_cells, BrickKind, Shape};

pub const TILE_SIZE: f32 = 30.0;
pub const PREVIEW_TILE_SIZE: f32 = 22.0;
pub const STATS_TILE_SIZE: f32 = 12.0;

pub const GAME_AREA_COLOR: Color = Color::new(0.2, 0.2, 0.2, 1.0);
pub const PANEL_COLOR: Color = Color::new(0.12, 0.12, 0.14, 1.0);
pub const BORDER_COLOR: Color = Color::new(0.45, 0.45, 0.5, 1.0);
pub const DIM_COLOR: Color = Color::new(0.0, 0.0, 0.0, 0.6);
pub const HIGHLIGHT_COLOR: Color = YELLOW;
pub const TEXT_COLOR: Color = WHITE;

const NES_COLORS: [Color; 7] = [
    Color { r: 0.0,    g: 1.0,    b: 1.0,    a: 1.0 }, // I
    Color { r: 1.0,    g: 1.0,    b: 0.0,    a: 1.0 }, // O
    Color { r: 0.6667, g: 0.0,    b: 1.0,    a: 1.0 }, // T
    Color { r: 0.0,    g: 1.0,    b: 0.0,    a: 1.0 }, // S
    Color { r: 1.0,    g: 0.0,    b: 0.0,    a: 1.0 }, // Z
    Color { r: 0.0,    g: 0.0,    b: 1.0,    a: 1.0 }, // J
    Color { r: 1.0,    g: 0.3334, b: 0.0,    a: 1.0 }, // L
];

pub fn color_of(kind: BrickKind) -> Color {
    NES_COLORS[kind.index()]
}

pub fn with_alpha(color: Color, a: f32) -> Color {
    Color::new(color.r, color.g, color.b, a)
}

pub fn draw_snes_block(x: f32, y: f32, size: f32, color: Color) {
    draw_rectangle(x, y, size, size, color);
    let highlight = Color::new(
        (color.r + 0.4).min(1.0),
        (color.g + 0.4).min(1.0),
        (color.b + 0.4).min(1.0),
        color.a,
    );
    let shadow = Color::new(
        (color.r * 0.5).max(0.0),
        (color.g * 0.5).max(0.0),
        (color.b * 0.5).max(0.0),
        color.a,
    );
    let border = size * 0.15;
    draw_rectangle(x, y, size, border, highlight);
    draw_rectangle(x, y, border, size, highlight);
    draw_rectangle(x, y + size - border, size, border, shadow);
    draw_rectangle(x + size - border, y, border, size, shadow);
}

/// Draws `shape` centred in a `box_size` square at `(pos_x, pos_y)`.
pub fn draw_preview(shape: &Shape, color: Color, pos_x: f32, pos_y: f32, tile_size: f32, box_size: f32) {
    let mut min_x = i32::MAX;
    let mut min_y = i32::MAX;
    let mut max_x = i32::MIN;
    let mut max_y = i32::MIN;
    for (bx, by) in filled_cells(shape) {
        min_x = min_x.min(bx);
        min_y = min_y.min(by);
        max_x = max_x.max(bx);
        max_y = max_y.max(by);
    }
    let shape_w = (max_x - min_x + 1) as f32 * tile_size;
    let shape_h = (max_y - min_y + 1) as f32 * tile_size;
    let offset_x = pos_x + (box_size - shape_w) / 2.0;
    let offset_y = pos_y + (box_size - shape_h) / 2.0;
    for (bx, by) in filled_cells(shape) {
        let draw_x = offset_x + (bx - min_x) as f32 * tile_size;
        let draw_y = offset_y + (by - min_y) as f32 * tile_size;
        draw_snes_block(draw_x, draw_y, tile_size, color);
    }
}

/// Titled panel background. Returns the y where content starts.
pub fn draw_panel(title: &str, x: f32, y: f32, w: f32, h: f32) -> f32 {
    draw_rectangle(x, y, w, h, PANEL_COLOR);
    draw_rectangle_lines(x, y, w, h, 2.0, BORDER_COLOR);
    draw_text(title, x + 12.0, y + 28.0, 28.0, TEXT_COLOR);
    y + 40.0
}

pub fn draw_centered_text(text: &str, center_x: f32, y: f32, font_size: u16, color: Color) {
    let measure = measure_text(text, None, font_size, 1.0);
    draw_text(text, center_x - measure.width / 2.0, y, font_size as f32, color);
}

/// Horizontal bar for a 0..=1 value.
pub fn draw_meter(x: f32, y: f32, w: f32, h: f32, value: f32, color: Color) {
    draw_rectangle(x, y, w, h, GAME_AREA_COLOR);
    draw_rectangle(x, y, w * value.clamp(0.0, 1.0), h, color);
    draw_rectangle_lines(x, y, w, h, 1.0, BORDER_COLOR);
}

pub fn wrap_text(text: &str, max_width: f32, font_size: u16) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current_line = String::new();
        for word in paragraph.split_whitespace() {
            let test_line = if current_line.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current_line, word)
            };
            let metrics = measure_text(&test_line, None, font_size, 1.0);
            if metrics.width > max_width && !current_line.is_empty() {
                lines.push(std::mem::replace(&mut current_line, word.to_string()));
            } else {
                current_line = test_line;
            }
        }
        lines.push(current_line);
    }
    lines
}
