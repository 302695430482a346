use log::{info, warn};
use macroquad::prelude::*;

use tetris::audio::{Effect, Jukebox};
use tetris::game::{Command, Game, GameEvent};
use tetris::generator::{BrickGenerator, RandomBrickGenerator};
use tetris::input::KeyRepeat;
use tetris::settings::{ConfigStore, HighScoreEntry, HighScores, Settings};

use super::audio_panel::{AudioPanel, PanelAction};
use super::draw::HIGHLIGHT_COLOR;
use super::menu::{MainMenu, MenuAction};
use super::notifications::Notifications;
use super::overlay::{self, GameResult, OverlayAction};
use super::panels::{self, Layout, ScoreLines};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Screen {
    MainMenu,
    AudioSettings,
    Playing,
    GameOver,
}

/// One running game plus its per-game input state.
struct Session {
    game: Game,
    left: KeyRepeat,
    right: KeyRepeat,
    notifications: Notifications,
}

pub struct App {
    screen: Screen,
    store: Option<ConfigStore>,
    settings: Settings,
    high_scores: HighScores,
    jukebox: Jukebox,
    seed: Option<u64>,
    games_started: u64,
    menu: MainMenu,
    audio_panel: AudioPanel,
    session: Option<Session>,
    result: Option<GameResult>,
    quit: bool,
}

impl App {
    pub fn new(store: Option<ConfigStore>, mut settings: Settings, jukebox: Jukebox, seed: Option<u64>) -> Self {
        let high_scores = store.as_ref().map(ConfigStore::load_high_scores).unwrap_or_default();
        settings.audio = jukebox.settings().clone();
        Self {
            screen: Screen::MainMenu,
            store,
            settings,
            high_scores,
            jukebox,
            seed,
            games_started: 0,
            menu: MainMenu::new(),
            audio_panel: AudioPanel::new(),
            session: None,
            result: None,
            quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn update(&mut self) {
        let dt = get_frame_time();
        match self.screen {
            Screen::MainMenu => self.update_menu(),
            Screen::AudioSettings => self.update_audio_panel(),
            Screen::Playing => self.update_playing(dt),
            Screen::GameOver => self.update_game_over(dt),
        }
    }

    pub fn draw(&self) {
        clear_background(BLACK);
        match self.screen {
            Screen::MainMenu => self.menu.draw(&self.settings, &self.high_scores),
            Screen::AudioSettings => self.audio_panel.draw(self.jukebox.settings()),
            Screen::Playing => {
                self.draw_playfield();
                if self.session.as_ref().is_some_and(|s| s.game.is_paused()) {
                    overlay::draw_pause();
                }
            }
            Screen::GameOver => {
                self.draw_playfield();
                if let Some(result) = &self.result {
                    overlay::draw_game_over(result, &self.high_scores);
                }
            }
        }
    }

    /// Persists settings; called on quit and when leaving menus. The jukebox
    /// owns the live audio settings, `settings.audio` is only its saved copy.
    pub fn save(&mut self) {
        self.settings.audio = self.jukebox.settings().clone();
        let Some(store) = &self.store else {
            return;
        };
        if let Err(err) = store.save_settings(&self.settings) {
            warn!("could not save settings: {err}");
        }
    }

    // -------------------------------------------------------------------
    // Screens.

    fn update_menu(&mut self) {
        match self.menu.update(&mut self.settings) {
            Some(MenuAction::Start) => {
                self.save();
                self.start_game();
            }
            Some(MenuAction::AudioSettings) => {
                self.audio_panel = AudioPanel::new();
                self.screen = Screen::AudioSettings;
            }
            Some(MenuAction::Quit) => {
                self.save();
                self.quit = true;
            }
            None => {}
        }
    }

    fn update_audio_panel(&mut self) {
        let panel = &mut self.audio_panel;
        match self.jukebox.edit_settings(|audio| panel.update(audio)) {
            Some(PanelAction::EffectsChanged) => self.jukebox.play_effect(Effect::LineClear),
            Some(PanelAction::Back) => {
                self.save();
                self.screen = Screen::MainMenu;
            }
            Some(PanelAction::Changed) | None => {}
        }
    }

    fn start_game(&mut self) {
        let generator: Box<dyn BrickGenerator> = match self.seed {
            // Each game in a seeded run gets its own reproducible sequence.
            Some(seed) => Box::new(RandomBrickGenerator::seeded(seed.wrapping_add(self.games_started))),
            None => Box::new(RandomBrickGenerator::new()),
        };
        self.games_started += 1;
        let mut game = Game::new(generator, self.settings.difficulty, self.settings.starting_level);
        let events = game.start();
        self.session = Some(Session {
            game,
            left: KeyRepeat::new(),
            right: KeyRepeat::new(),
            notifications: Notifications::default(),
        });
        self.result = None;
        self.screen = Screen::Playing;
        self.jukebox.play_music();
        self.handle_events(events);
    }

    fn update_playing(&mut self, dt: f32) {
        if is_key_pressed(KeyCode::M) {
            self.jukebox.toggle_mute();
        }
        if is_key_pressed(KeyCode::N) {
            self.jukebox.next_track();
        }

        let Some(session) = self.session.as_mut() else {
            self.screen = Screen::MainMenu;
            return;
        };
        let commands = read_commands(session, dt);
        let mut events = Vec::new();
        for command in commands {
            events.extend(session.game.handle(command));
        }
        events.extend(session.game.tick(dt, is_key_down(KeyCode::Down)));
        if !session.game.is_paused() {
            session.notifications.update(dt);
        }
        self.handle_events(events);
    }

    fn update_game_over(&mut self, dt: f32) {
        if let Some(session) = self.session.as_mut() {
            session.notifications.update(dt);
        }
        match overlay::update_game_over() {
            Some(OverlayAction::NewGame) => self.start_game(),
            Some(OverlayAction::MainMenu) => {
                self.session = None;
                self.menu = MainMenu::new();
                self.screen = Screen::MainMenu;
            }
            None => {}
        }
    }

    fn handle_events(&mut self, events: Vec<GameEvent>) {
        for event in events {
            match event {
                GameEvent::Moved => self.jukebox.play_effect(Effect::Move),
                GameEvent::Rotated => self.jukebox.play_effect(Effect::Rotate),
                GameEvent::Held => self.jukebox.play_effect(Effect::Hold),
                GameEvent::Locked => self.jukebox.play_effect(Effect::Lock),
                GameEvent::HardDropped { .. } => {}
                GameEvent::LinesCleared { count, bonus } => {
                    let effect = if count >= 4 { Effect::Tetris } else { Effect::LineClear };
                    self.jukebox.play_effect(effect);
                    self.notify(format!("+{bonus}"), HIGHLIGHT_COLOR);
                    if count >= 4 {
                        self.notify("TETRIS!", SKYBLUE);
                    }
                }
                GameEvent::LevelUp { level } => {
                    self.jukebox.play_effect(Effect::LevelUp);
                    self.notify(format!("Level {level}"), GREEN);
                }
                GameEvent::Paused => self.jukebox.pause(),
                GameEvent::Resumed => self.jukebox.resume(),
                GameEvent::GameOver => self.finish_game(),
            }
        }
    }

    fn notify(&mut self, text: impl Into<String>, color: Color) {
        if let Some(session) = self.session.as_mut() {
            session.notifications.push(text, color);
        }
    }

    fn finish_game(&mut self) {
        let Some(session) = &self.session else {
            return;
        };
        let score = session.game.board().score();
        let entry = HighScoreEntry {
            name: self.settings.player_name.clone(),
            score: score.points(),
            lines: score.lines(),
            level: score.level(),
        };
        let result = GameResult {
            player: entry.name.clone(),
            points: entry.score,
            lines: entry.lines,
            level: entry.level,
            rank: self.high_scores.insert(entry),
        };
        if let Some(rank) = result.rank {
            info!("{} placed #{} with {} points", result.player, rank + 1, result.points);
            if let Some(store) = &self.store {
                if let Err(err) = store.save_high_scores(&self.high_scores) {
                    warn!("could not save high scores: {err}");
                }
            }
        }
        self.result = Some(result);
        self.jukebox.stop_music();
        self.jukebox.play_effect(Effect::GameOver);
        self.screen = Screen::GameOver;
    }

    fn draw_playfield(&self) {
        let Some(session) = &self.session else {
            return;
        };
        let layout = Layout::current();
        let game = &session.game;
        let view = game.view();
        let score = game.board().score();

        panels::draw_board(game, &view, self.settings.show_ghost, &layout);
        panels::draw_hold(&view, &layout);
        panels::draw_statistics(game.board().statistics(), &layout);
        panels::draw_next(&view, &layout);
        panels::draw_score(
            &ScoreLines {
                player: &self.settings.player_name,
                points: score.points(),
                lines: score.lines(),
                level: score.level(),
                best: self.high_scores.best(),
            },
            &layout,
        );
        panels::draw_controls(&layout);
        session.notifications.draw(layout.center_x(), layout.board_y + layout.board_h / 2.0);
    }
}

/// Maps this frame's key state to game commands.
fn read_commands(session: &mut Session, dt: f32) -> Vec<Command> {
    let mut commands = Vec::new();
    if is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::P) {
        commands.push(Command::TogglePause);
    }
    if session.left.update(is_key_pressed(KeyCode::Left), is_key_down(KeyCode::Left), dt) {
        commands.push(Command::MoveLeft);
    }
    if session.right.update(is_key_pressed(KeyCode::Right), is_key_down(KeyCode::Right), dt) {
        commands.push(Command::MoveRight);
    }
    if is_key_pressed(KeyCode::Up) || is_key_pressed(KeyCode::X) {
        commands.push(Command::RotateClockwise);
    }
    if is_key_pressed(KeyCode::Z) {
        commands.push(Command::RotateCounterClockwise);
    }
    if is_key_pressed(KeyCode::Down) {
        commands.push(Command::SoftDrop);
    }
    if is_key_pressed(KeyCode::C) {
        commands.push(Command::Hold);
    }
    if is_key_pressed(KeyCode::Space) {
        commands.push(Command::HardDrop);
    }
    commands
}
