use macroquad::prelude::*;

use tetris::board::ViewData;
use tetris::brick::{filled_cells, BrickKind};
use tetris::game::{Game, Phase};
use tetris::grid::{GRID_WIDTH, HIDDEN_ROWS, VISIBLE_HEIGHT};

use super::draw::{
    color_of, draw_panel, draw_preview, draw_snes_block, with_alpha, wrap_text, GAME_AREA_COLOR,
    PREVIEW_TILE_SIZE, STATS_TILE_SIZE, TEXT_COLOR, TILE_SIZE,
};

const SIDE_PANEL_W: f32 = 200.0;
const PANEL_GAP: f32 = 30.0;

const CONTROLS_TEXT: &str = "\
Left/Right: Move
Down: Soft Drop
Space: Hard Drop
Up/X: Rotate CW
Z: Rotate CCW
C: Hold
Enter/P: Pause
M: Mute  N: Next Song";

/// Screen positions of the board and side columns for this frame.
pub struct Layout {
    pub board_x: f32,
    pub board_y: f32,
    pub board_w: f32,
    pub board_h: f32,
    pub left_x: f32,
    pub right_x: f32,
}

impl Layout {
    pub fn current() -> Self {
        let board_w = GRID_WIDTH as f32 * TILE_SIZE;
        let board_h = VISIBLE_HEIGHT as f32 * TILE_SIZE;
        let board_x = (screen_width() - board_w) / 2.0;
        let board_y = ((screen_height() - board_h) / 2.0).max(10.0);
        Self {
            board_x,
            board_y,
            board_w,
            board_h,
            left_x: board_x - PANEL_GAP - SIDE_PANEL_W,
            right_x: board_x + board_w + PANEL_GAP,
        }
    }

    pub fn center_x(&self) -> f32 {
        self.board_x + self.board_w / 2.0
    }

    /// Pixel position of grid cell `(x, y)`; `None` for hidden rows.
    fn cell_pos(&self, x: i32, y: i32) -> Option<(f32, f32)> {
        let visible_y = y - HIDDEN_ROWS as i32;
        if visible_y < 0 {
            return None;
        }
        Some((
            self.board_x + x as f32 * TILE_SIZE,
            self.board_y + visible_y as f32 * TILE_SIZE,
        ))
    }
}

pub fn draw_board(game: &Game, view: &ViewData, show_ghost: bool, layout: &Layout) {
    draw_rectangle(layout.board_x, layout.board_y, layout.board_w, layout.board_h, GAME_AREA_COLOR);
    for col in 1..GRID_WIDTH {
        let x = layout.board_x + col as f32 * TILE_SIZE;
        draw_line(x, layout.board_y, x, layout.board_y + layout.board_h, 1.0, Color::new(0.25, 0.25, 0.25, 1.0));
    }

    // Locked cells.
    for (y, row) in game.board().grid().rows().iter().enumerate() {
        for (x, cell) in row.iter().enumerate() {
            if let Some(kind) = cell {
                if let Some((px, py)) = layout.cell_pos(x as i32, y as i32) {
                    draw_snes_block(px, py, TILE_SIZE, color_of(*kind));
                }
            }
        }
    }

    if let Some(brick) = view.brick {
        let shape = brick.shape();
        let color = color_of(brick.kind());
        if show_ghost {
            if let Some(ghost_y) = view.ghost_y {
                let ghost_color = with_alpha(color, 0.3);
                for (dx, dy) in filled_cells(&shape) {
                    if let Some((px, py)) = layout.cell_pos(brick.x() + dx, ghost_y + dy) {
                        draw_rectangle(px, py, TILE_SIZE, TILE_SIZE, ghost_color);
                    }
                }
            }
        }
        for (dx, dy) in filled_cells(&shape) {
            if let Some((px, py)) = layout.cell_pos(brick.x() + dx, brick.y() + dy) {
                draw_snes_block(px, py, TILE_SIZE, color);
            }
        }
    }

    // Flash rows that are about to be removed.
    if let Phase::Clearing { rows, timer } = game.phase() {
        let frames = (timer * 60.0) as i32;
        let flash_color = if frames % 2 == 0 { WHITE } else { BLACK };
        for &row in rows {
            if let Some((px, py)) = layout.cell_pos(0, row as i32) {
                draw_rectangle(px, py, layout.board_w, TILE_SIZE, flash_color);
            }
        }
    }

    draw_rectangle_lines(layout.board_x, layout.board_y, layout.board_w, layout.board_h, 2.0, GRAY);
}

pub fn draw_hold(view: &ViewData, layout: &Layout) {
    let y = draw_panel("Hold", layout.left_x, layout.board_y, SIDE_PANEL_W, 130.0);
    if let Some(kind) = view.held {
        let color = if view.hold_available { color_of(kind) } else { with_alpha(GRAY, 0.6) };
        draw_preview(&kind.spawn_shape(), color, layout.left_x + 50.0, y, PREVIEW_TILE_SIZE, 100.0);
    }
}

pub fn draw_statistics(statistics: &[u32; 7], layout: &Layout) {
    let top = layout.board_y + 150.0;
    let mut y = draw_panel("Statistics", layout.left_x, top, SIDE_PANEL_W, 300.0);
    for kind in BrickKind::ALL {
        draw_preview(&kind.spawn_shape(), color_of(kind), layout.left_x + 16.0, y, STATS_TILE_SIZE, 36.0);
        draw_text(&statistics[kind.index()].to_string(), layout.left_x + 80.0, y + 26.0, 24.0, TEXT_COLOR);
        y += 36.0;
    }
}

pub fn draw_next(view: &ViewData, layout: &Layout) {
    let mut y = draw_panel("Next", layout.right_x, layout.board_y, SIDE_PANEL_W, 250.0);
    for (i, kind) in view.next.iter().enumerate() {
        // First preview full size, the rest smaller.
        let (tile, size) = if i == 0 { (PREVIEW_TILE_SIZE, 90.0) } else { (STATS_TILE_SIZE + 4.0, 56.0) };
        draw_preview(&kind.spawn_shape(), color_of(*kind), layout.right_x + (SIDE_PANEL_W - size) / 2.0, y, tile, size);
        y += size;
    }
}

pub struct ScoreLines<'a> {
    pub player: &'a str,
    pub points: u32,
    pub lines: u32,
    pub level: u32,
    pub best: u32,
}

pub fn draw_score(score: &ScoreLines<'_>, layout: &Layout) {
    let top = layout.board_y + 270.0;
    let mut y = draw_panel(score.player, layout.right_x, top, SIDE_PANEL_W, 170.0);
    for (label, value) in [
        ("Score", score.points),
        ("Level", score.level),
        ("Lines", score.lines),
        ("Best", score.best.max(score.points)),
    ] {
        y += 26.0;
        draw_text(label, layout.right_x + 12.0, y, 24.0, GRAY);
        draw_text(&value.to_string(), layout.right_x + 90.0, y, 24.0, TEXT_COLOR);
    }
}

pub fn draw_controls(layout: &Layout) {
    let x = layout.right_x;
    let mut y = layout.board_y + 460.0;
    for line in wrap_text(CONTROLS_TEXT, SIDE_PANEL_W + 60.0, 18) {
        draw_text(&line, x, y, 18.0, GRAY);
        y += 18.0;
    }
}
