//! Note tables and square-wave synthesis for music and sound effects.

pub const SAMPLE_RATE: u32 = 44_100;
const AMPLITUDE: f32 = 0.25;
const DUTY: f32 = 0.5;
const MAX_EDGE_SECS: f32 = 0.01;

/// MIDI note number and length in beats. Note 0 is a rest.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Note {
    pub midi: u8,
    pub beats: f32,
}

const fn n(midi: u8, beats: f32) -> Note {
    Note { midi, beats }
}

const REST: u8 = 0;

pub struct Track {
    pub name: &'static str,
    pub tempo: f32,
    pub notes: &'static [Note],
}

// Korobeiniki, A section.
const KOROBEINIKI: [Note; 39] = [
    n(76, 1.0), n(71, 0.5), n(72, 0.5), n(74, 1.0), n(72, 0.5), n(71, 0.5),
    n(69, 1.0), n(69, 0.5), n(72, 0.5), n(76, 1.0), n(74, 0.5), n(72, 0.5),
    n(71, 1.5), n(72, 0.5), n(74, 1.0), n(76, 1.0),
    n(72, 1.0), n(69, 1.0), n(69, 2.0),
    n(REST, 0.5), n(74, 1.0), n(77, 0.5), n(81, 1.0), n(79, 0.5), n(77, 0.5),
    n(76, 1.5), n(72, 0.5), n(76, 1.0), n(74, 0.5), n(72, 0.5),
    n(71, 1.0), n(71, 0.5), n(72, 0.5), n(74, 1.0), n(76, 1.0),
    n(72, 1.0), n(69, 1.0), n(69, 1.0), n(REST, 1.0),
];

// Broken chords over Cm, Ab, Eb, Bb.
const CASCADE: [Note; 32] = [
    n(72, 0.5), n(75, 0.5), n(79, 0.5), n(84, 0.5), n(79, 0.5), n(75, 0.5), n(79, 0.5), n(75, 0.5),
    n(68, 0.5), n(72, 0.5), n(75, 0.5), n(80, 0.5), n(75, 0.5), n(72, 0.5), n(75, 0.5), n(72, 0.5),
    n(63, 0.5), n(67, 0.5), n(70, 0.5), n(75, 0.5), n(70, 0.5), n(67, 0.5), n(70, 0.5), n(67, 0.5),
    n(70, 0.5), n(74, 0.5), n(77, 0.5), n(82, 0.5), n(77, 0.5), n(74, 0.5), n(77, 0.5), n(74, 0.5),
];

pub const TRACKS: [Track; 2] = [
    Track { name: "Korobeiniki", tempo: 144.0, notes: &KOROBEINIKI },
    Track { name: "Cascade", tempo: 132.0, notes: &CASCADE },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    Move,
    Rotate,
    Hold,
    Lock,
    LineClear,
    Tetris,
    LevelUp,
    GameOver,
}

const EFFECT_TEMPO: f32 = 480.0;

const MOVE_NOTES: [Note; 1] = [n(84, 0.25)];
const ROTATE_NOTES: [Note; 1] = [n(88, 0.3)];
const HOLD_NOTES: [Note; 2] = [n(76, 0.3), n(83, 0.3)];
const LOCK_NOTES: [Note; 1] = [n(48, 0.5)];
const LINE_CLEAR_NOTES: [Note; 3] = [n(72, 0.5), n(76, 0.5), n(79, 0.5)];
const TETRIS_NOTES: [Note; 4] = [n(72, 0.5), n(76, 0.5), n(79, 0.5), n(84, 1.5)];
const LEVEL_UP_NOTES: [Note; 4] = [n(79, 0.5), n(84, 0.5), n(88, 0.5), n(91, 1.0)];
const GAME_OVER_NOTES: [Note; 4] = [n(67, 1.0), n(63, 1.0), n(60, 1.0), n(55, 3.0)];

impl Effect {
    fn notes(self) -> &'static [Note] {
        match self {
            Effect::Move => &MOVE_NOTES,
            Effect::Rotate => &ROTATE_NOTES,
            Effect::Hold => &HOLD_NOTES,
            Effect::Lock => &LOCK_NOTES,
            Effect::LineClear => &LINE_CLEAR_NOTES,
            Effect::Tetris => &TETRIS_NOTES,
            Effect::LevelUp => &LEVEL_UP_NOTES,
            Effect::GameOver => &GAME_OVER_NOTES,
        }
    }

    pub fn render(self) -> Vec<f32> {
        render(self.notes(), EFFECT_TEMPO)
    }
}

pub fn frequency(midi: u8) -> f32 {
    440.0 * 2f32.powf((midi as f32 - 69.0) / 12.0)
}

fn note_len(note: &Note, tempo: f32) -> usize {
    (note.beats * 60.0 / tempo * SAMPLE_RATE as f32).round() as usize
}

/// Renders `notes` as mono square-wave samples at `SAMPLE_RATE`.
pub fn render(notes: &[Note], tempo: f32) -> Vec<f32> {
    let total: usize = notes.iter().map(|note| note_len(note, tempo)).sum();
    let mut samples = Vec::with_capacity(total);
    for note in notes {
        let len = note_len(note, tempo);
        if note.midi == REST {
            samples.extend(std::iter::repeat(0.0).take(len));
            continue;
        }
        let step = frequency(note.midi) / SAMPLE_RATE as f32;
        // Short linear ramps at both ends keep notes from clicking.
        let edge = ((SAMPLE_RATE as f32 * MAX_EDGE_SECS) as usize).min(len / 4).max(1);
        for i in 0..len {
            let phase = (i as f32 * step).fract();
            let wave = if phase < DUTY { AMPLITUDE } else { -AMPLITUDE };
            let attack = (i as f32 / edge as f32).min(1.0);
            let release = ((len - i) as f32 / edge as f32).min(1.0);
            samples.push(wave * attack * release);
        }
    }
    samples
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concert_pitch() {
        assert!((frequency(69) - 440.0).abs() < 1e-3);
        assert!((frequency(81) - 880.0).abs() < 1e-2);
    }

    #[test]
    fn korobeiniki_fills_whole_bars() {
        let beats: f32 = KOROBEINIKI.iter().map(|note| note.beats).sum();
        assert_eq!(beats % 4.0, 0.0);
    }

    #[test]
    fn render_length_matches_tempo() {
        // One beat at 60 bpm is one second.
        let samples = render(&[n(69, 1.0), n(REST, 0.5)], 60.0);
        assert_eq!(samples.len(), SAMPLE_RATE as usize * 3 / 2);
        let rest = &samples[SAMPLE_RATE as usize..];
        assert!(rest.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn samples_stay_in_range_and_fade() {
        let samples = Effect::Tetris.render();
        assert!(!samples.is_empty());
        assert!(samples.iter().all(|s| s.abs() <= AMPLITUDE));
        assert_eq!(samples[0], 0.0);
    }
}
