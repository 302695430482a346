use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::board::{Board, ViewData};
use crate::brick::Rotation;
use crate::generator::BrickGenerator;

/// Seconds the full rows flash before they are removed.
pub const CLEAR_DELAY: f32 = 0.27;
pub const SOFT_DROP_SPEED: f32 = 15.0;
const MAX_FALL_SPEED: f32 = 20.0;
const SPEED_PER_LEVEL: f32 = 0.6;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn next(self) -> Difficulty {
        match self {
            Difficulty::Easy => Difficulty::Normal,
            Difficulty::Normal => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    pub fn prev(self) -> Difficulty {
        match self {
            Difficulty::Easy => Difficulty::Hard,
            Difficulty::Normal => Difficulty::Easy,
            Difficulty::Hard => Difficulty::Normal,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    /// Gravity in rows per second at level 0.
    pub fn base_speed(self) -> f32 {
        match self {
            Difficulty::Easy => 2.0,
            Difficulty::Normal => 3.0,
            Difficulty::Hard => 4.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    RotateClockwise,
    RotateCounterClockwise,
    Hold,
    TogglePause,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Moved,
    Rotated,
    Held,
    Locked,
    HardDropped { rows: u32 },
    LinesCleared { count: u32, bonus: u32 },
    LevelUp { level: u32 },
    GameOver,
    Paused,
    Resumed,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Phase {
    Falling,
    /// Full rows are flashing; input is ignored until `timer` runs out.
    Clearing { rows: Vec<usize>, timer: f32 },
    Over,
}

// -------------------------------------------------------------------
// Drives a board from player commands and the frame clock.
pub struct Game {
    board: Board,
    difficulty: Difficulty,
    phase: Phase,
    paused: bool,
    fall_timer: f32,
}

impl Game {
    pub fn new(generator: Box<dyn BrickGenerator>, difficulty: Difficulty, starting_level: u32) -> Self {
        Self {
            board: Board::new(generator, starting_level),
            difficulty,
            phase: Phase::Over,
            paused: false,
            fall_timer: 0.0,
        }
    }

    pub fn start(&mut self) -> Vec<GameEvent> {
        self.paused = false;
        self.fall_timer = 0.0;
        info!(
            "starting game: difficulty {}, level {}",
            self.difficulty.as_str(),
            self.board.score().level()
        );
        if self.board.new_game() {
            self.phase = Phase::Falling;
            Vec::new()
        } else {
            self.phase = Phase::Over;
            vec![GameEvent::GameOver]
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn view(&self) -> ViewData {
        self.board.view()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::Over
    }

    pub fn clearing_rows(&self) -> &[usize] {
        match &self.phase {
            Phase::Clearing { rows, .. } => rows,
            _ => &[],
        }
    }

    /// Seconds between gravity steps at the current level.
    pub fn fall_interval(&self, soft_drop: bool) -> f32 {
        let level = self.board.score().level() as f32;
        let mut speed = (self.difficulty.base_speed() + SPEED_PER_LEVEL * level).min(MAX_FALL_SPEED);
        if soft_drop {
            speed = speed.max(SOFT_DROP_SPEED);
        }
        1.0 / speed
    }

    pub fn handle(&mut self, command: Command) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.is_over() {
            return events;
        }
        if command == Command::TogglePause {
            self.paused = !self.paused;
            events.push(if self.paused { GameEvent::Paused } else { GameEvent::Resumed });
            return events;
        }
        if self.paused || self.phase != Phase::Falling {
            return events;
        }

        match command {
            Command::MoveLeft => {
                if self.board.move_left() {
                    events.push(GameEvent::Moved);
                }
            }
            Command::MoveRight => {
                if self.board.move_right() {
                    events.push(GameEvent::Moved);
                }
            }
            Command::SoftDrop => {
                if self.board.move_down() {
                    self.board.score_mut().add_soft_drop(1);
                    self.fall_timer = 0.0;
                    events.push(GameEvent::Moved);
                } else {
                    self.lock_and_resolve(&mut events);
                }
            }
            Command::HardDrop => {
                let rows = self.board.hard_drop();
                self.board.score_mut().add_hard_drop(rows);
                events.push(GameEvent::HardDropped { rows });
                self.lock_and_resolve(&mut events);
            }
            Command::RotateClockwise => {
                if self.board.rotate(Rotation::Clockwise) {
                    events.push(GameEvent::Rotated);
                }
            }
            Command::RotateCounterClockwise => {
                if self.board.rotate(Rotation::CounterClockwise) {
                    events.push(GameEvent::Rotated);
                }
            }
            Command::Hold => {
                if self.board.hold() {
                    self.fall_timer = 0.0;
                    events.push(GameEvent::Held);
                }
            }
            Command::TogglePause => {}
        }
        events
    }

    /// Advances gravity and the row-clear flash by `dt` seconds.
    pub fn tick(&mut self, dt: f32, soft_drop: bool) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.paused {
            return events;
        }
        let flash_done = match &mut self.phase {
            Phase::Clearing { timer, .. } => {
                *timer -= dt;
                *timer <= 0.0
            }
            _ => false,
        };
        if flash_done {
            self.finish_clear(&mut events);
            return events;
        }
        match self.phase {
            Phase::Over | Phase::Clearing { .. } => {}
            Phase::Falling => {
                let interval = self.fall_interval(soft_drop);
                self.fall_timer += dt;
                if self.fall_timer >= interval {
                    self.fall_timer -= interval;
                    if self.board.move_down() {
                        if soft_drop {
                            self.board.score_mut().add_soft_drop(1);
                        }
                    } else {
                        self.lock_and_resolve(&mut events);
                    }
                }
            }
        }
        events
    }

    fn lock_and_resolve(&mut self, events: &mut Vec<GameEvent>) {
        if !self.board.lock() {
            return;
        }
        events.push(GameEvent::Locked);
        let rows = self.board.full_rows();
        if rows.is_empty() {
            self.spawn_next(events);
        } else {
            debug!("clearing rows {rows:?}");
            self.phase = Phase::Clearing { rows, timer: CLEAR_DELAY };
        }
    }

    fn finish_clear(&mut self, events: &mut Vec<GameEvent>) {
        let Phase::Clearing { rows, .. } = std::mem::replace(&mut self.phase, Phase::Falling) else {
            return;
        };
        let level_before = self.board.score().level();
        let clear = self.board.remove_rows(&rows);
        events.push(GameEvent::LinesCleared { count: clear.count, bonus: clear.bonus });
        let level = self.board.score().level();
        if level > level_before {
            info!("level up: {level}");
            events.push(GameEvent::LevelUp { level });
        }
        self.spawn_next(events);
    }

    fn spawn_next(&mut self, events: &mut Vec<GameEvent>) {
        self.fall_timer = 0.0;
        if self.board.spawn() {
            self.phase = Phase::Falling;
        } else {
            let score = self.board.score();
            info!("game over: {} points, {} lines", score.points(), score.lines());
            self.phase = Phase::Over;
            events.push(GameEvent::GameOver);
        }
    }
}
