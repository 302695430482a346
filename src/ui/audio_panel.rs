use macroquad::prelude::*;

use tetris::audio::TRACKS;
use tetris::settings::AudioSettings;

use super::draw::{draw_centered_text, draw_meter, draw_panel, HIGHLIGHT_COLOR, TEXT_COLOR};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelAction {
    /// Music settings changed.
    Changed,
    /// Effects volume changed; play a sample so the level can be judged.
    EffectsChanged,
    Back,
}

const ITEM_COUNT: usize = 5;
const MUSIC: usize = 0;
const EFFECTS: usize = 1;
const MUTE: usize = 2;
const TRACK: usize = 3;
const BACK: usize = 4;

pub struct AudioPanel {
    selected_index: usize,
}

impl AudioPanel {
    pub fn new() -> Self {
        Self { selected_index: MUSIC }
    }

    pub fn update(&mut self, audio: &mut AudioSettings) -> Option<PanelAction> {
        if is_key_pressed(KeyCode::Escape) {
            return Some(PanelAction::Back);
        }
        if is_key_pressed(KeyCode::Up) {
            self.selected_index = (self.selected_index + ITEM_COUNT - 1) % ITEM_COUNT;
        }
        if is_key_pressed(KeyCode::Down) {
            self.selected_index = (self.selected_index + 1) % ITEM_COUNT;
        }

        let step = match (is_key_pressed(KeyCode::Left), is_key_pressed(KeyCode::Right)) {
            (true, false) => -1,
            (false, true) => 1,
            _ => 0,
        };
        let enter = is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::KpEnter);

        match self.selected_index {
            MUSIC if step != 0 => {
                audio.step_music(step);
                Some(PanelAction::Changed)
            }
            EFFECTS if step != 0 => {
                audio.step_effects(step);
                Some(PanelAction::EffectsChanged)
            }
            MUTE if step != 0 || enter => {
                audio.toggle_mute();
                Some(PanelAction::Changed)
            }
            TRACK if step != 0 || enter => {
                // Enter steps forward.
                let delta = if step != 0 { step } else { 1 };
                audio.track = (audio.track as i32 + delta).rem_euclid(TRACKS.len() as i32) as usize;
                Some(PanelAction::Changed)
            }
            BACK if enter => Some(PanelAction::Back),
            _ => None,
        }
    }

    pub fn draw(&self, audio: &AudioSettings) {
        let center_x = screen_width() / 2.0;
        let panel_w = 560.0;
        let panel_x = center_x - panel_w / 2.0;
        let mut y = draw_panel("Audio Settings", panel_x, 140.0, panel_w, 400.0) + 40.0;
        let label_x = panel_x + 30.0;
        let value_x = panel_x + 280.0;
        let spacing = 60.0;

        let color = |i: usize| if i == self.selected_index { HIGHLIGHT_COLOR } else { TEXT_COLOR };

        draw_text("Music Volume", label_x, y, 30.0, color(MUSIC));
        draw_meter(value_x, y - 20.0, 200.0, 20.0, audio.music_volume, color(MUSIC));
        y += spacing;

        draw_text("Effects Volume", label_x, y, 30.0, color(EFFECTS));
        draw_meter(value_x, y - 20.0, 200.0, 20.0, audio.effects_volume, color(EFFECTS));
        y += spacing;

        draw_text("Mute", label_x, y, 30.0, color(MUTE));
        draw_text(if audio.muted { "On" } else { "Off" }, value_x, y, 30.0, color(MUTE));
        y += spacing;

        draw_text("Music Track", label_x, y, 30.0, color(TRACK));
        let track = TRACKS.get(audio.track).map_or("-", |t| t.name);
        draw_text(track, value_x, y, 30.0, color(TRACK));
        y += spacing;

        draw_text("Back", label_x, y, 30.0, color(BACK));

        draw_centered_text(
            "Up/Down: select   Left/Right: adjust   Esc: back",
            center_x,
            580.0,
            22,
            GRAY,
        );
    }
}
