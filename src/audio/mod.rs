//! Background music and sound effects.

pub mod melody;

use log::{debug, info, warn};
use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamHandle, Sink, Source};

use crate::error::Result;
use crate::settings::AudioSettings;

pub use melody::{Effect, TRACKS};

// -------------------------------------------------------------------
// Open output device plus the music sink.
struct Output {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    music: Sink,
}

impl Output {
    fn open() -> Result<Self> {
        let (stream, handle) = OutputStream::try_default()?;
        let music = Sink::try_new(&handle)?;
        Ok(Self { _stream: stream, handle, music })
    }
}

/// Plays looping music and one-shot effects according to `AudioSettings`.
/// Without an output device every call is a no-op.
pub struct Jukebox {
    output: Option<Output>,
    settings: AudioSettings,
    playing: bool,
    paused: bool,
}

impl Jukebox {
    pub fn open(settings: AudioSettings) -> Self {
        let output = match Output::open() {
            Ok(output) => {
                info!("audio output opened");
                Some(output)
            }
            Err(err) => {
                warn!("{err}; running without sound");
                None
            }
        };
        Self::with_output(output, settings)
    }

    pub fn silent(settings: AudioSettings) -> Self {
        Self::with_output(None, settings)
    }

    fn with_output(output: Option<Output>, mut settings: AudioSettings) -> Self {
        settings.track %= TRACKS.len();
        Self { output, settings, playing: false, paused: false }
    }

    pub fn settings(&self) -> &AudioSettings {
        &self.settings
    }

    pub fn is_playing(&self) -> bool {
        self.playing && !self.paused
    }

    pub fn track_name(&self) -> &'static str {
        TRACKS[self.settings.track].name
    }

    /// Replaces the settings; restarts music if the track changed.
    pub fn apply_settings(&mut self, mut settings: AudioSettings) {
        settings.track %= TRACKS.len();
        let track_changed = settings.track != self.settings.track;
        self.settings = settings;
        self.refresh_volume();
        if track_changed && self.playing {
            self.play_music();
        }
    }

    /// Runs `edit` on a copy of the live settings and applies the result if
    /// it changed.
    pub fn edit_settings<R>(&mut self, edit: impl FnOnce(&mut AudioSettings) -> R) -> R {
        let mut settings = self.settings.clone();
        let result = edit(&mut settings);
        if settings != self.settings {
            self.apply_settings(settings);
        }
        result
    }

    /// Starts the current track from the beginning.
    pub fn play_music(&mut self) {
        self.playing = true;
        self.paused = false;
        let track = &TRACKS[self.settings.track];
        let volume = self.settings.effective_music_volume();
        let Some(output) = self.output.as_ref() else {
            return;
        };
        debug!("playing {}", track.name);
        let samples = melody::render(track.notes, track.tempo);
        output.music.clear();
        output.music.append(SamplesBuffer::new(1, melody::SAMPLE_RATE, samples).repeat_infinite());
        output.music.set_volume(volume);
        output.music.play();
    }

    pub fn next_track(&mut self) {
        self.settings.track = (self.settings.track + 1) % TRACKS.len();
        info!("switching music to {}", self.track_name());
        if self.playing {
            self.play_music();
        }
    }

    pub fn stop_music(&mut self) {
        self.playing = false;
        self.paused = false;
        if let Some(output) = self.output.as_ref() {
            output.music.clear();
        }
    }

    pub fn pause(&mut self) {
        if !self.playing || self.paused {
            return;
        }
        self.paused = true;
        if let Some(output) = self.output.as_ref() {
            output.music.pause();
        }
    }

    pub fn resume(&mut self) {
        if !self.paused {
            return;
        }
        self.paused = false;
        if let Some(output) = self.output.as_ref() {
            output.music.play();
        }
    }

    pub fn toggle_mute(&mut self) {
        self.settings.toggle_mute();
        info!("audio {}", if self.settings.muted { "muted" } else { "unmuted" });
        self.refresh_volume();
    }

    pub fn play_effect(&self, effect: Effect) {
        let volume = self.settings.effective_effects_volume();
        if volume <= 0.0 {
            return;
        }
        let Some(output) = self.output.as_ref() else {
            return;
        };
        let source = SamplesBuffer::new(1, melody::SAMPLE_RATE, effect.render()).amplify(volume);
        if let Err(err) = output.handle.play_raw(source) {
            debug!("dropped {effect:?} effect: {err}");
        }
    }

    fn refresh_volume(&self) {
        if let Some(output) = self.output.as_ref() {
            output.music.set_volume(self.settings.effective_music_volume());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_track_wraps() {
        let mut jukebox = Jukebox::silent(AudioSettings::default());
        assert_eq!(jukebox.track_name(), TRACKS[0].name);
        for _ in 0..TRACKS.len() {
            jukebox.next_track();
        }
        assert_eq!(jukebox.settings().track, 0);
    }

    #[test]
    fn out_of_range_track_is_wrapped() {
        let settings = AudioSettings { track: TRACKS.len() + 1, ..AudioSettings::default() };
        let jukebox = Jukebox::silent(settings);
        assert_eq!(jukebox.settings().track, 1);
    }

    #[test]
    fn pause_only_applies_while_playing() {
        let mut jukebox = Jukebox::silent(AudioSettings::default());
        jukebox.pause();
        assert!(!jukebox.is_playing());
        jukebox.play_music();
        assert!(jukebox.is_playing());
        jukebox.pause();
        assert!(!jukebox.is_playing());
        jukebox.resume();
        assert!(jukebox.is_playing());
        jukebox.stop_music();
        assert!(!jukebox.is_playing());
    }

    #[test]
    fn edits_start_from_live_settings() {
        let mut jukebox = Jukebox::silent(AudioSettings::default());
        jukebox.toggle_mute();
        jukebox.next_track();
        jukebox.edit_settings(|audio| audio.step_music(1));
        let settings = jukebox.settings();
        assert!(settings.muted);
        assert_eq!(settings.track, 1);
        assert!((settings.music_volume - 0.6).abs() < 1e-6);
    }

    #[test]
    fn unchanged_edit_keeps_music_state() {
        let mut jukebox = Jukebox::silent(AudioSettings::default());
        jukebox.play_music();
        jukebox.pause();
        let stepped = jukebox.edit_settings(|_| false);
        assert!(!stepped);
        assert!(!jukebox.is_playing());
        assert_eq!(jukebox.settings(), &AudioSettings::default());
    }

    #[test]
    fn mute_toggles_settings() {
        let mut jukebox = Jukebox::silent(AudioSettings::default());
        jukebox.toggle_mute();
        assert!(jukebox.settings().muted);
        jukebox.play_effect(Effect::Lock);
        jukebox.toggle_mute();
        assert!(!jukebox.settings().muted);
    }
}
