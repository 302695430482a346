/// Delay before a held key starts repeating.
pub const INITIAL_REPEAT_DELAY: f32 = 0.2;
/// Interval between repeats once repeating.
pub const REPEAT_INTERVAL: f32 = 0.1;

/// Auto-repeat for a held direction key.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeyRepeat {
    timer: f32,
    held: bool,
}

impl KeyRepeat {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one frame of key state. Returns true when the action should fire.
    pub fn update(&mut self, pressed: bool, down: bool, dt: f32) -> bool {
        if pressed {
            self.held = true;
            self.timer = INITIAL_REPEAT_DELAY;
            return true;
        }
        if !down || !self.held {
            self.reset();
            return false;
        }
        self.timer -= dt;
        if self.timer <= 0.0 {
            self.timer += REPEAT_INTERVAL;
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        self.held = false;
        self.timer = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_press_fires_immediately() {
        let mut repeat = KeyRepeat::new();
        assert!(repeat.update(true, true, 0.016));
    }

    #[test]
    fn held_key_waits_then_repeats() {
        let mut repeat = KeyRepeat::new();
        repeat.update(true, true, 0.0);
        assert!(!repeat.update(false, true, 0.15));
        assert!(repeat.update(false, true, 0.06));
        assert!(!repeat.update(false, true, 0.05));
        assert!(repeat.update(false, true, 0.05));
    }

    #[test]
    fn release_resets() {
        let mut repeat = KeyRepeat::new();
        repeat.update(true, true, 0.0);
        assert!(!repeat.update(false, false, 0.5));
        // Down without a fresh press does nothing.
        assert!(!repeat.update(false, true, 0.5));
    }
}
