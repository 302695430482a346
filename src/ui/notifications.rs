use macroquad::prelude::*;

use super::draw::{draw_centered_text, with_alpha};

const LIFETIME: f32 = 1.2;
const RISE: f32 = 60.0;

struct Notification {
    text: String,
    color: Color,
    age: f32,
}

/// Floating "+points" style messages that rise and fade over the board.
#[derive(Default)]
pub struct Notifications {
    items: Vec<Notification>,
}

impl Notifications {
    pub fn push(&mut self, text: impl Into<String>, color: Color) {
        self.items.push(Notification { text: text.into(), color, age: 0.0 });
    }

    pub fn update(&mut self, dt: f32) {
        self.items.retain_mut(|n| {
            n.age += dt;
            n.age < LIFETIME
        });
    }

    pub fn draw(&self, center_x: f32, base_y: f32) {
        for (i, n) in self.items.iter().enumerate() {
            let t = n.age / LIFETIME;
            let y = base_y - t * RISE - i as f32 * 36.0;
            draw_centered_text(&n.text, center_x, y, 36, with_alpha(n.color, 1.0 - t));
        }
    }
}
