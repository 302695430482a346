use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::brick::BrickKind;

/// Number of upcoming bricks kept visible in the preview panel.
pub const PREVIEW_COUNT: usize = 3;

pub trait BrickGenerator {
    fn next_brick(&mut self) -> BrickKind;
}

// -------------------------------------------------------------------
// 7-bag randomizer: every bag holds each kind exactly once.
pub struct RandomBrickGenerator {
    rng: StdRng,
    bag: Vec<BrickKind>,
}

impl RandomBrickGenerator {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self { rng, bag: Vec::with_capacity(BrickKind::ALL.len()) }
    }
}

impl Default for RandomBrickGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl BrickGenerator for RandomBrickGenerator {
    fn next_brick(&mut self) -> BrickKind {
        loop {
            if let Some(kind) = self.bag.pop() {
                return kind;
            }
            self.bag.extend_from_slice(&BrickKind::ALL);
            self.bag.shuffle(&mut self.rng);
        }
    }
}

/// Cycles through a fixed list of bricks.
pub struct SequenceGenerator {
    kinds: Vec<BrickKind>,
    cursor: usize,
}

impl SequenceGenerator {
    pub fn new(kinds: Vec<BrickKind>) -> Self {
        assert!(!kinds.is_empty(), "sequence generator needs at least one brick");
        Self { kinds, cursor: 0 }
    }
}

impl BrickGenerator for SequenceGenerator {
    fn next_brick(&mut self) -> BrickKind {
        let kind = self.kinds[self.cursor];
        self.cursor = (self.cursor + 1) % self.kinds.len();
        kind
    }
}

// -------------------------------------------------------------------
// Preview queue in front of a generator.
pub struct BrickQueue {
    generator: Box<dyn BrickGenerator>,
    upcoming: VecDeque<BrickKind>,
}

impl BrickQueue {
    pub fn new(mut generator: Box<dyn BrickGenerator>) -> Self {
        let upcoming = (0..PREVIEW_COUNT).map(|_| generator.next_brick()).collect();
        Self { generator, upcoming }
    }

    /// Takes the front brick and refills the preview.
    pub fn pop(&mut self) -> BrickKind {
        let next = self.generator.next_brick();
        self.upcoming.push_back(next);
        self.upcoming.pop_front().unwrap_or(next)
    }

    pub fn peek(&self) -> impl Iterator<Item = BrickKind> + '_ {
        self.upcoming.iter().copied()
    }

    pub fn upcoming(&self) -> Vec<BrickKind> {
        self.upcoming.iter().copied().collect()
    }
}
