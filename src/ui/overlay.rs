use macroquad::prelude::*;

use tetris::settings::HighScores;

use super::draw::{draw_centered_text, draw_panel, DIM_COLOR, HIGHLIGHT_COLOR, TEXT_COLOR};

/// Final numbers of a finished game.
#[derive(Clone, Debug)]
pub struct GameResult {
    pub player: String,
    pub points: u32,
    pub lines: u32,
    pub level: u32,
    /// 0-based position in the high score table, if it made it.
    pub rank: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayAction {
    NewGame,
    MainMenu,
}

pub fn draw_pause() {
    draw_rectangle(0.0, 0.0, screen_width(), screen_height(), DIM_COLOR);
    let center_x = screen_width() / 2.0;
    draw_centered_text("Paused", center_x, screen_height() / 2.0, 50, HIGHLIGHT_COLOR);
    draw_centered_text("Enter/P to resume", center_x, screen_height() / 2.0 + 40.0, 24, GRAY);
}

pub fn update_game_over() -> Option<OverlayAction> {
    if is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::KpEnter) {
        return Some(OverlayAction::NewGame);
    }
    if is_key_pressed(KeyCode::Escape) {
        return Some(OverlayAction::MainMenu);
    }
    None
}

pub fn draw_game_over(result: &GameResult, high_scores: &HighScores) {
    draw_rectangle(0.0, 0.0, screen_width(), screen_height(), DIM_COLOR);
    let center_x = screen_width() / 2.0;
    let panel_w = 420.0;
    let panel_x = center_x - panel_w / 2.0;
    let top = 90.0;
    draw_panel("", panel_x, top, panel_w, 540.0);
    draw_centered_text("GAME OVER", center_x, top + 60.0, 56, RED);

    let mut y = top + 110.0;
    for line in [
        format!("Score: {}", result.points),
        format!("Lines: {}   Level: {}", result.lines, result.level),
    ] {
        draw_centered_text(&line, center_x, y, 30, TEXT_COLOR);
        y += 36.0;
    }
    match result.rank {
        Some(0) => draw_centered_text("New high score!", center_x, y, 30, HIGHLIGHT_COLOR),
        Some(rank) => draw_centered_text(&format!("Ranked #{}", rank + 1), center_x, y, 30, HIGHLIGHT_COLOR),
        None => {}
    }
    y += 40.0;

    for (i, entry) in high_scores.entries().iter().enumerate() {
        let color = if result.rank == Some(i) { HIGHLIGHT_COLOR } else { TEXT_COLOR };
        draw_text(&format!("{:>2}. {}", i + 1, entry.name), panel_x + 40.0, y, 22.0, color);
        draw_text(&entry.score.to_string(), panel_x + 250.0, y, 22.0, color);
        draw_text(&format!("L{}", entry.level), panel_x + 340.0, y, 22.0, color);
        y += 24.0;
    }

    draw_centered_text("Enter: New Game   Esc: Main Menu", center_x, top + 520.0, 24, GRAY);
}
