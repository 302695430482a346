use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::game::Difficulty;
use crate::score::MAX_STARTING_LEVEL;

pub const SETTINGS_FILE: &str = "settings.json";
pub const HIGH_SCORES_FILE: &str = "highscores.json";
pub const MAX_HIGH_SCORES: usize = 10;
pub const MAX_NAME_LEN: usize = 16;
pub const DEFAULT_PLAYER_NAME: &str = "Player";
pub const VOLUME_STEP: f32 = 0.1;

// -------------------------------------------------------------------
// Audio settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    pub music_volume: f32,
    pub effects_volume: f32,
    pub muted: bool,
    pub track: usize,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            music_volume: 0.5,
            effects_volume: 0.7,
            muted: false,
            track: 0,
        }
    }
}

fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        return 0.0;
    }
    // Snap to the step grid so repeated nudges don't drift.
    ((volume.clamp(0.0, 1.0) / VOLUME_STEP).round() * VOLUME_STEP).clamp(0.0, 1.0)
}

impl AudioSettings {
    pub fn effective_music_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.music_volume }
    }

    pub fn effective_effects_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.effects_volume }
    }

    pub fn set_music_volume(&mut self, volume: f32) {
        self.music_volume = clamp_volume(volume);
    }

    pub fn set_effects_volume(&mut self, volume: f32) {
        self.effects_volume = clamp_volume(volume);
    }

    /// Nudges music volume by `steps` increments of `VOLUME_STEP`.
    pub fn step_music(&mut self, steps: i32) {
        self.set_music_volume(self.music_volume + steps as f32 * VOLUME_STEP);
    }

    pub fn step_effects(&mut self, steps: i32) {
        self.set_effects_volume(self.effects_volume + steps as f32 * VOLUME_STEP);
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    fn normalize(&mut self) {
        self.music_volume = clamp_volume(self.music_volume);
        self.effects_volume = clamp_volume(self.effects_volume);
    }
}

// -------------------------------------------------------------------
// Player settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub player_name: String,
    pub difficulty: Difficulty,
    pub starting_level: u32,
    pub show_ghost: bool,
    pub audio: AudioSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player_name: DEFAULT_PLAYER_NAME.to_string(),
            difficulty: Difficulty::Normal,
            starting_level: 0,
            show_ghost: true,
            audio: AudioSettings::default(),
        }
    }
}

/// Trims and truncates a player name, falling back to the default.
pub fn sanitize_name(name: &str) -> String {
    let trimmed: String = name.trim().chars().take(MAX_NAME_LEN).collect();
    let trimmed = trimmed.trim_end();
    if trimmed.is_empty() {
        DEFAULT_PLAYER_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

impl Settings {
    pub fn normalize(&mut self) {
        self.player_name = sanitize_name(&self.player_name);
        self.starting_level = self.starting_level.min(MAX_STARTING_LEVEL);
        self.audio.normalize();
    }
}

// -------------------------------------------------------------------
// High score table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighScores {
    entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    pub fn best(&self) -> u32 {
        self.entries.first().map_or(0, |e| e.score)
    }

    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        self.entries.len() < MAX_HIGH_SCORES
            || self.entries.last().is_some_and(|last| score > last.score)
    }

    /// Inserts `entry` if it makes the table. Returns its 0-based rank.
    pub fn insert(&mut self, entry: HighScoreEntry) -> Option<usize> {
        if !self.qualifies(entry.score) {
            return None;
        }
        let rank = self
            .entries
            .iter()
            .position(|e| e.score < entry.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(rank, entry);
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    fn normalize(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_HIGH_SCORES);
    }
}

// -------------------------------------------------------------------
// JSON files in one directory.
#[derive(Clone, Debug)]
pub struct ConfigStore {
    dir: PathBuf,
}

impl ConfigStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `<platform config dir>/tetris`.
    pub fn default_location() -> Result<Self> {
        let base = dirs::config_dir().ok_or(Error::NoConfigDir)?;
        Ok(Self::new(base.join("tetris")))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn load_settings(&self) -> Settings {
        let mut settings: Settings = self.load_or_default(SETTINGS_FILE);
        settings.normalize();
        settings
    }

    pub fn save_settings(&self, settings: &Settings) -> Result<()> {
        self.write_json(SETTINGS_FILE, settings)
    }

    pub fn load_high_scores(&self) -> HighScores {
        let mut scores: HighScores = self.load_or_default(HIGH_SCORES_FILE);
        scores.normalize();
        scores
    }

    pub fn save_high_scores(&self, scores: &HighScores) -> Result<()> {
        self.write_json(HIGH_SCORES_FILE, scores)
    }

    fn load_or_default<T: DeserializeOwned + Default>(&self, name: &str) -> T {
        match self.read_json(name) {
            Ok(Some(value)) => value,
            Ok(None) => {
                info!("{} not found in {}, using defaults", name, self.dir.display());
                T::default()
            }
            Err(err) => {
                warn!("{err}; using defaults");
                T::default()
            }
        }
    }

    fn read_json<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        let path = self.dir.join(name);
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(Error::io(path, err)),
        };
        serde_json::from_str(&data).map(Some).map_err(|err| Error::json(path, err))
    }

    fn write_json<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|err| Error::io(&self.dir, err))?;
        let path = self.dir.join(name);
        let json = serde_json::to_string_pretty(value).map_err(|err| Error::json(&path, err))?;
        // Write then rename so a crash never leaves a truncated file.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|err| Error::io(&tmp, err))?;
        fs::rename(&tmp, &path).map_err(|err| Error::io(&path, err))?;
        debug!("wrote {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, score: u32) -> HighScoreEntry {
        HighScoreEntry { name: name.to_string(), score, lines: score / 100, level: 0 }
    }

    #[test]
    fn volumes_clamp_and_snap() {
        let mut audio = AudioSettings::default();
        audio.step_music(20);
        assert_eq!(audio.music_volume, 1.0);
        audio.step_music(-3);
        assert!((audio.music_volume - 0.7).abs() < 1e-6);
        audio.set_effects_volume(-4.0);
        assert_eq!(audio.effects_volume, 0.0);
        audio.set_effects_volume(f32::NAN);
        assert_eq!(audio.effects_volume, 0.0);
    }

    #[test]
    fn mute_silences_both_channels() {
        let mut audio = AudioSettings::default();
        audio.toggle_mute();
        assert_eq!(audio.effective_music_volume(), 0.0);
        assert_eq!(audio.effective_effects_volume(), 0.0);
        audio.toggle_mute();
        assert_eq!(audio.effective_music_volume(), audio.music_volume);
    }

    #[test]
    fn names_are_sanitized() {
        assert_eq!(sanitize_name("  Ada  "), "Ada");
        assert_eq!(sanitize_name("   "), DEFAULT_PLAYER_NAME);
        assert_eq!(sanitize_name("abcdefghijklmnopqrstuvwxyz").len(), MAX_NAME_LEN);
    }

    #[test]
    fn high_scores_stay_sorted_and_bounded() {
        let mut scores = HighScores::default();
        for i in 1..=12 {
            scores.insert(entry(&format!("p{i}"), i * 100));
        }
        assert_eq!(scores.entries().len(), MAX_HIGH_SCORES);
        assert_eq!(scores.best(), 1200);
        assert_eq!(scores.entries().last().unwrap().score, 300);
        assert!(!scores.qualifies(300));
        assert!(scores.qualifies(301));
        assert!(!scores.qualifies(0));
    }

    #[test]
    fn ties_keep_earlier_entry_first() {
        let mut scores = HighScores::default();
        scores.insert(entry("first", 500));
        assert_eq!(scores.insert(entry("second", 500)), Some(1));
        assert_eq!(scores.insert(entry("top", 900)), Some(0));
        let names: Vec<_> = scores.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["top", "first", "second"]);
    }

    #[test]
    fn settings_round_trip_through_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("nested"));
        let mut settings = Settings::default();
        settings.player_name = "Grace".to_string();
        settings.difficulty = Difficulty::Hard;
        settings.audio.muted = true;
        store.save_settings(&settings).unwrap();
        assert_eq!(store.load_settings(), settings);
    }

    #[test]
    fn missing_and_malformed_files_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path());
        assert_eq!(store.load_settings(), Settings::default());

        fs::write(dir.path().join(SETTINGS_FILE), "{ not json").unwrap();
        assert_eq!(store.load_settings(), Settings::default());
        assert!(matches!(store.read_json::<Settings>(SETTINGS_FILE), Err(Error::Json { .. })));
    }

    #[test]
    fn partial_files_fill_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path());
        fs::write(
            dir.path().join(SETTINGS_FILE),
            r#"{ "player_name": "  Linus ", "starting_level": 99, "audio": { "music_volume": 3.0 } }"#,
        )
        .unwrap();
        let settings = store.load_settings();
        assert_eq!(settings.player_name, "Linus");
        assert_eq!(settings.starting_level, MAX_STARTING_LEVEL);
        assert_eq!(settings.audio.music_volume, 1.0);
        assert_eq!(settings.audio.effects_volume, AudioSettings::default().effects_volume);
        assert!(settings.show_ghost);
    }

    #[test]
    fn high_scores_load_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path());
        fs::write(
            dir.path().join(HIGH_SCORES_FILE),
            r#"{ "entries": [
                { "name": "a", "score": 10, "lines": 0, "level": 0 },
                { "name": "b", "score": 30, "lines": 1, "level": 0 }
            ] }"#,
        )
        .unwrap();
        let scores = store.load_high_scores();
        assert_eq!(scores.best(), 30);

        let mut scores = scores;
        scores.insert(entry("c", 20));
        store.save_high_scores(&scores).unwrap();
        let names: Vec<_> = store
            .load_high_scores()
            .entries()
            .iter()
            .map(|e| e.name.clone())
            .collect();
        assert_eq!(names, vec!["b", "c", "a"]);
    }
}
