use log::trace;

use crate::brick::{BrickKind, BrickRotator, Rotation, Shape};
use crate::generator::{BrickGenerator, BrickQueue};
use crate::grid::{Grid, GRID_WIDTH};
use crate::score::Score;

pub const SPAWN_X: i32 = (GRID_WIDTH as i32 - 4) / 2;
pub const SPAWN_Y: i32 = 0;

// Horizontal offsets tried in order when a rotation collides.
const KICK_OFFSETS: [i32; 5] = [0, -1, 1, -2, 2];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActiveBrick {
    rotator: BrickRotator,
    x: i32,
    y: i32,
}

impl ActiveBrick {
    pub fn spawn(kind: BrickKind) -> Self {
        Self { rotator: BrickRotator::new(kind), x: SPAWN_X, y: SPAWN_Y }
    }

    pub fn kind(&self) -> BrickKind {
        self.rotator.kind()
    }

    pub fn shape(&self) -> Shape {
        self.rotator.shape()
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }
}

/// Rows removed by one clear.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClearRow {
    pub rows: Vec<usize>,
    pub count: u32,
    pub bonus: u32,
}

/// Everything the renderer needs for one frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewData {
    pub brick: Option<ActiveBrick>,
    pub ghost_y: Option<i32>,
    pub next: Vec<BrickKind>,
    pub held: Option<BrickKind>,
    pub hold_available: bool,
}

// -------------------------------------------------------------------
// Playfield: locked grid plus the falling brick.
pub struct Board {
    grid: Grid,
    queue: BrickQueue,
    active: Option<ActiveBrick>,
    held: Option<BrickKind>,
    hold_used: bool,
    score: Score,
    statistics: [u32; 7],
}

impl Board {
    pub fn new(generator: Box<dyn BrickGenerator>, starting_level: u32) -> Self {
        Self {
            grid: Grid::new(),
            queue: BrickQueue::new(generator),
            active: None,
            held: None,
            hold_used: false,
            score: Score::new(starting_level),
            statistics: [0; 7],
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn active(&self) -> Option<&ActiveBrick> {
        self.active.as_ref()
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn score_mut(&mut self) -> &mut Score {
        &mut self.score
    }

    pub fn statistics(&self) -> &[u32; 7] {
        &self.statistics
    }

    pub fn held(&self) -> Option<BrickKind> {
        self.held
    }

    /// Clears grid, score, hold and statistics, then spawns. The queue keeps
    /// drawing from the same generator.
    pub fn new_game(&mut self) -> bool {
        self.grid.clear();
        self.score.reset();
        self.active = None;
        self.held = None;
        self.hold_used = false;
        self.statistics = [0; 7];
        self.spawn()
    }

    /// Places the next queued brick at the spawn point. Returns false when
    /// the spawn point is blocked.
    pub fn spawn(&mut self) -> bool {
        let kind = self.queue.pop();
        let brick = ActiveBrick::spawn(kind);
        if self.grid.intersects(&brick.shape(), brick.x, brick.y) {
            self.active = None;
            return false;
        }
        trace!("spawned {}", kind.as_str());
        self.active = Some(brick);
        self.statistics[kind.index()] += 1;
        self.hold_used = false;
        true
    }

    fn try_offset(&mut self, dx: i32, dy: i32) -> bool {
        let Some(brick) = self.active.as_mut() else {
            return false;
        };
        if self.grid.intersects(&brick.shape(), brick.x + dx, brick.y + dy) {
            return false;
        }
        brick.x += dx;
        brick.y += dy;
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.try_offset(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_offset(1, 0)
    }

    pub fn move_down(&mut self) -> bool {
        self.try_offset(0, 1)
    }

    pub fn rotate(&mut self, rotation: Rotation) -> bool {
        let Some(brick) = self.active.as_mut() else {
            return false;
        };
        if brick.kind().rotations().len() == 1 {
            return false;
        }
        let (index, shape) = brick.rotator.peek(rotation);
        for dx in KICK_OFFSETS {
            if !self.grid.intersects(&shape, brick.x + dx, brick.y) {
                brick.rotator.set_index(index);
                brick.x += dx;
                return true;
            }
        }
        false
    }

    /// Drops the brick to its landing row. Returns the rows travelled.
    pub fn hard_drop(&mut self) -> u32 {
        let mut rows = 0;
        while self.move_down() {
            rows += 1;
        }
        rows
    }

    pub fn ghost_y(&self) -> Option<i32> {
        let brick = self.active.as_ref()?;
        let shape = brick.shape();
        let mut y = brick.y;
        while !self.grid.intersects(&shape, brick.x, y + 1) {
            y += 1;
        }
        Some(y)
    }

    /// Writes the falling brick into the grid.
    pub fn lock(&mut self) -> bool {
        match self.active.take() {
            Some(brick) => {
                self.grid.merge(&brick.shape(), brick.kind(), brick.x, brick.y);
                true
            }
            None => false,
        }
    }

    /// Swaps the falling brick with the held one, once per spawn.
    pub fn hold(&mut self) -> bool {
        if self.hold_used {
            return false;
        }
        let Some(current) = self.active else {
            return false;
        };
        match self.held {
            Some(kind) => {
                let swapped = ActiveBrick::spawn(kind);
                if self.grid.intersects(&swapped.shape(), swapped.x, swapped.y) {
                    return false;
                }
                self.active = Some(swapped);
            }
            None => {
                let Some(next) = self.queue.peek().next() else {
                    return false;
                };
                let candidate = ActiveBrick::spawn(next);
                if self.grid.intersects(&candidate.shape(), candidate.x, candidate.y) {
                    return false;
                }
                self.spawn();
            }
        }
        self.held = Some(current.kind());
        self.hold_used = true;
        true
    }

    pub fn full_rows(&self) -> Vec<usize> {
        self.grid.full_rows()
    }

    pub fn remove_rows(&mut self, rows: &[usize]) -> ClearRow {
        let count = self.grid.remove_rows(rows) as u32;
        let bonus = self.score.add_lines(count);
        ClearRow { rows: rows.to_vec(), count, bonus }
    }

    pub fn view(&self) -> ViewData {
        ViewData {
            brick: self.active,
            ghost_y: self.ghost_y(),
            next: self.queue.upcoming(),
            held: self.held,
            hold_available: !self.hold_used,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::SequenceGenerator;
    use crate::grid::GRID_HEIGHT;

    fn board(kinds: &[BrickKind]) -> Board {
        Board::new(Box::new(SequenceGenerator::new(kinds.to_vec())), 0)
    }

    #[test]
    fn spawns_at_top_center() {
        let mut board = board(&[BrickKind::T]);
        assert!(board.new_game());
        let brick = board.active().copied().unwrap();
        assert_eq!((brick.x(), brick.y()), (SPAWN_X, SPAWN_Y));
        assert_eq!(board.statistics()[BrickKind::T.index()], 1);
    }

    #[test]
    fn moves_stop_at_walls() {
        let mut board = board(&[BrickKind::O]);
        board.new_game();
        let mut lefts = 0;
        while board.move_left() {
            lefts += 1;
        }
        // O matrix starts at column 1.
        assert_eq!(lefts, SPAWN_X + 1);
        let mut rights = 0;
        while board.move_right() {
            rights += 1;
        }
        assert_eq!(rights, GRID_WIDTH as i32 - 2);
    }

    #[test]
    fn hard_drop_lands_on_floor() {
        let mut board = board(&[BrickKind::I]);
        board.new_game();
        let rows = board.hard_drop();
        assert_eq!(rows, GRID_HEIGHT as u32 - 2);
        assert!(board.lock());
        let bottom = GRID_HEIGHT - 1;
        for x in 3..7 {
            assert_eq!(board.grid().cell(x, bottom), Some(BrickKind::I));
        }
        assert!(board.active().is_none());
    }

    #[test]
    fn ghost_matches_hard_drop() {
        let mut board = board(&[BrickKind::S, BrickKind::Z]);
        board.new_game();
        board.move_left();
        let ghost = board.ghost_y().unwrap();
        board.hard_drop();
        assert_eq!(board.active().unwrap().y(), ghost);
    }

    #[test]
    fn rotation_kicks_off_the_wall() {
        let mut board = board(&[BrickKind::I]);
        board.new_game();
        assert!(board.rotate(Rotation::Clockwise));
        while board.move_right() {}
        // Vertical I sits in matrix column 2, so x is 7 at the right wall.
        assert_eq!(board.active().unwrap().x(), 7);
        assert!(board.rotate(Rotation::CounterClockwise));
        let brick = board.active().unwrap();
        assert_eq!(brick.x(), 6);
        assert!(!board.grid().intersects(&brick.shape(), brick.x(), brick.y()));
    }

    #[test]
    fn o_does_not_rotate() {
        let mut board = board(&[BrickKind::O]);
        board.new_game();
        assert!(!board.rotate(Rotation::Clockwise));
    }

    #[test]
    fn blocked_spawn_fails() {
        let mut board = board(&[BrickKind::T]);
        board.new_game();
        board.grid_mut().fill_row(1, BrickKind::L, &[0]);
        assert!(board.lock());
        assert!(!board.spawn());
        assert!(board.active().is_none());
    }

    #[test]
    fn hold_once_per_brick() {
        let mut board = board(&[BrickKind::T, BrickKind::I, BrickKind::O]);
        board.new_game();
        assert!(board.hold());
        assert_eq!(board.held(), Some(BrickKind::T));
        assert_eq!(board.active().unwrap().kind(), BrickKind::I);
        assert!(!board.hold());

        board.hard_drop();
        board.lock();
        assert!(board.spawn());
        assert_eq!(board.active().unwrap().kind(), BrickKind::O);
        assert!(board.hold());
        assert_eq!(board.active().unwrap().kind(), BrickKind::T);
        assert_eq!(board.held(), Some(BrickKind::O));
    }

    #[test]
    fn hold_refused_when_held_brick_cannot_spawn() {
        let mut board = board(&[BrickKind::T, BrickKind::I, BrickKind::O]);
        board.new_game();
        assert!(board.hold());
        board.hard_drop();
        board.lock();
        assert!(board.spawn());
        for _ in 0..3 {
            board.move_right();
        }
        // T's top cell at the spawn point.
        board.grid_mut().set(4, 0, Some(BrickKind::Z));
        let before = board.view();
        assert!(!board.hold());
        assert_eq!(board.view(), before);
        assert!(board.view().hold_available);
        assert_eq!(board.held(), Some(BrickKind::T));
    }

    #[test]
    fn new_game_resets_statistics_and_continues_queue() {
        let mut board = board(&[BrickKind::O, BrickKind::T, BrickKind::I, BrickKind::L]);
        board.new_game();
        assert!(board.hold());
        board.hard_drop();
        board.lock();
        board.spawn();

        assert!(board.new_game());
        assert_eq!(board.grid().stack_height(), 0);
        assert_eq!(board.held(), None);
        assert_eq!(board.score().points(), 0);
        assert_eq!(board.statistics().iter().sum::<u32>(), 1);
        // O, T and I were drawn before the restart.
        assert_eq!(board.active().unwrap().kind(), BrickKind::L);
    }

    #[test]
    fn clearing_rows_scores() {
        let mut board = board(&[BrickKind::I]);
        board.new_game();
        let bottom = GRID_HEIGHT - 1;
        board.grid_mut().fill_row(bottom, BrickKind::J, &[3, 4, 5, 6]);
        board.hard_drop();
        board.lock();
        let rows = board.full_rows();
        assert_eq!(rows, vec![bottom]);
        let clear = board.remove_rows(&rows);
        assert_eq!(clear.count, 1);
        assert_eq!(clear.bonus, 50);
        assert_eq!(board.score().lines(), 1);
        assert_eq!(board.grid().stack_height(), 0);
    }

    #[test]
    fn view_reports_queue_and_hold() {
        let mut board = board(&[BrickKind::L, BrickKind::J, BrickKind::S, BrickKind::Z]);
        board.new_game();
        let view = board.view();
        assert_eq!(view.brick.map(|b| b.kind()), Some(BrickKind::L));
        assert_eq!(view.next, vec![BrickKind::J, BrickKind::S, BrickKind::Z]);
        assert!(view.hold_available);
        assert_eq!(view.held, None);
    }
}
