pub const LINES_PER_LEVEL: u32 = 10;
pub const MAX_STARTING_LEVEL: u32 = 9;
const LINE_BONUS: u32 = 50;
const SOFT_DROP_POINTS: u32 = 1;
const HARD_DROP_POINTS: u32 = 2;

/// Points, cleared lines and level of the running game.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Score {
    points: u32,
    lines: u32,
    starting_level: u32,
}

impl Score {
    pub fn new(starting_level: u32) -> Self {
        Self {
            points: 0,
            lines: 0,
            starting_level: starting_level.min(MAX_STARTING_LEVEL),
        }
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.starting_level + self.lines / LINES_PER_LEVEL
    }

    pub fn reset(&mut self) {
        self.points = 0;
        self.lines = 0;
    }

    /// Bonus for clearing `rows` at once at the current level.
    pub fn line_bonus(&self, rows: u32) -> u32 {
        LINE_BONUS * rows * rows * (self.level() + 1)
    }

    /// Adds cleared rows; returns the points awarded.
    pub fn add_lines(&mut self, rows: u32) -> u32 {
        if rows == 0 {
            return 0;
        }
        // Bonus uses the level the rows were cleared at.
        let bonus = self.line_bonus(rows);
        self.points = self.points.saturating_add(bonus);
        self.lines += rows;
        bonus
    }

    pub fn add_soft_drop(&mut self, rows: u32) {
        self.points = self.points.saturating_add(rows * SOFT_DROP_POINTS);
    }

    pub fn add_hard_drop(&mut self, rows: u32) {
        self.points = self.points.saturating_add(rows * HARD_DROP_POINTS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bonus_grows_with_square_of_rows() {
        let score = Score::new(0);
        assert_eq!(score.line_bonus(1), 50);
        assert_eq!(score.line_bonus(2), 200);
        assert_eq!(score.line_bonus(4), 800);
    }

    #[test]
    fn level_advances_every_ten_lines() {
        let mut score = Score::new(2);
        assert_eq!(score.level(), 2);
        for _ in 0..9 {
            score.add_lines(1);
        }
        assert_eq!(score.level(), 2);
        score.add_lines(1);
        assert_eq!(score.level(), 3);
        assert_eq!(score.lines(), 10);
    }

    #[test]
    fn bonus_uses_level_before_clear() {
        let mut score = Score::new(0);
        for _ in 0..9 {
            score.add_lines(1);
        }
        let before = score.points();
        // Level 0 when cleared, level 1 afterwards.
        assert_eq!(score.add_lines(4), 800);
        assert_eq!(score.points(), before + 800);
        assert_eq!(score.level(), 1);
    }

    #[test]
    fn drops_award_points() {
        let mut score = Score::new(0);
        score.add_soft_drop(3);
        score.add_hard_drop(10);
        assert_eq!(score.points(), 23);
        assert_eq!(score.add_lines(0), 0);
    }

    #[test]
    fn starting_level_is_capped() {
        assert_eq!(Score::new(40).level(), MAX_STARTING_LEVEL);
    }
}
