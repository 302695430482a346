use macroquad::prelude::*;

use tetris::score::MAX_STARTING_LEVEL;
use tetris::settings::{sanitize_name, HighScores, Settings, MAX_NAME_LEN};

use super::draw::{draw_centered_text, draw_panel, HIGHLIGHT_COLOR, TEXT_COLOR};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Start,
    AudioSettings,
    Quit,
}

const ITEM_COUNT: usize = 7;
const NAME: usize = 0;
const DIFFICULTY: usize = 1;
const LEVEL: usize = 2;
const GHOST: usize = 3;
const AUDIO: usize = 4;
const START: usize = 5;
const QUIT: usize = 6;

// -------------------------------------------------------------------
// Main menu: edits the settings in place.
pub struct MainMenu {
    selected_index: usize,
}

impl MainMenu {
    pub fn new() -> Self {
        Self { selected_index: START }
    }

    pub fn update(&mut self, settings: &mut Settings) -> Option<MenuAction> {
        if is_key_pressed(KeyCode::Up) {
            self.selected_index = (self.selected_index + ITEM_COUNT - 1) % ITEM_COUNT;
        }
        if is_key_pressed(KeyCode::Down) {
            self.selected_index = (self.selected_index + 1) % ITEM_COUNT;
        }

        let left = is_key_pressed(KeyCode::Left);
        let right = is_key_pressed(KeyCode::Right);
        match self.selected_index {
            NAME => {
                if is_key_pressed(KeyCode::Backspace) {
                    settings.player_name.pop();
                }
                while let Some(c) = get_char_pressed() {
                    if (c.is_alphanumeric() || c == ' ')
                        && settings.player_name.chars().count() < MAX_NAME_LEN
                    {
                        settings.player_name.push(c);
                    }
                }
            }
            DIFFICULTY => {
                if left {
                    settings.difficulty = settings.difficulty.prev();
                }
                if right {
                    settings.difficulty = settings.difficulty.next();
                }
            }
            LEVEL => {
                if left {
                    settings.starting_level = settings.starting_level.saturating_sub(1);
                }
                if right {
                    settings.starting_level = (settings.starting_level + 1).min(MAX_STARTING_LEVEL);
                }
            }
            GHOST => {
                if left || right {
                    settings.show_ghost = !settings.show_ghost;
                }
            }
            _ => {}
        }
        // Drain typed characters so they don't leak into the name field later.
        if self.selected_index != NAME {
            while get_char_pressed().is_some() {}
        }

        if is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::KpEnter) {
            return match self.selected_index {
                NAME | START => {
                    settings.player_name = sanitize_name(&settings.player_name);
                    Some(MenuAction::Start)
                }
                AUDIO => Some(MenuAction::AudioSettings),
                QUIT => Some(MenuAction::Quit),
                _ => None,
            };
        }
        None
    }

    pub fn draw(&self, settings: &Settings, high_scores: &HighScores) {
        let center_x = screen_width() / 2.0;
        draw_centered_text("TETRIS", center_x, 110.0, 80, HIGHLIGHT_COLOR);

        let start_x = center_x - 320.0;
        let mut y = 220.0;
        let spacing = 50.0;
        let items = [
            format!("Player Name: {}", settings.player_name),
            format!("Difficulty: < {} >", settings.difficulty.as_str()),
            format!("Starting Level: < {} >", settings.starting_level),
            format!("Ghost Piece: < {} >", if settings.show_ghost { "On" } else { "Off" }),
            "Audio Settings".to_string(),
            "Start Game".to_string(),
            "Quit".to_string(),
        ];
        for (i, item) in items.iter().enumerate() {
            let color = if i == self.selected_index { HIGHLIGHT_COLOR } else { TEXT_COLOR };
            draw_text(item, start_x, y, 30.0, color);
            y += spacing;
        }
        if self.selected_index == NAME {
            draw_text("Type to change name. Backspace to delete.", start_x, y, 20.0, GRAY);
        }

        let panel_x = center_x + 120.0;
        let mut row_y = draw_panel("High Scores", panel_x, 190.0, 260.0, 380.0) + 10.0;
        if high_scores.entries().is_empty() {
            draw_text("No scores yet", panel_x + 12.0, row_y, 22.0, GRAY);
        }
        for (rank, entry) in high_scores.entries().iter().enumerate() {
            draw_text(&format!("{:>2}. {}", rank + 1, entry.name), panel_x + 12.0, row_y, 22.0, TEXT_COLOR);
            draw_text(&entry.score.to_string(), panel_x + 180.0, row_y, 22.0, TEXT_COLOR);
            row_y += 32.0;
        }
    }
}
