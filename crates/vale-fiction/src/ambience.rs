//! Ambient flavor text.
//!
//! Polled once per exploring turn after the command has been applied. An
//! ambience only sees an owned [`RoomSnapshot`] and cannot touch the engine.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::narrator::RoomSnapshot;

/// Source of optional flavor lines appended to a turn's narration.
pub trait Ambience {
    /// A line for this turn, or `None` for silence.
    fn flavor(&mut self, room: &RoomSnapshot) -> Option<String>;
}

/// Never says anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct Calm;

impl Ambience for Calm {
    fn flavor(&mut self, _room: &RoomSnapshot) -> Option<String> {
        None
    }
}

/// Draws lines from a fixed list with a seeded random source.
///
/// `{room}` in a line is replaced with the current room's name.
#[derive(Debug, Clone)]
pub struct SeededAmbience {
    rng: StdRng,
    lines: Vec<String>,
    chance: f64,
}

impl SeededAmbience {
    /// Create an ambience. `chance` is clamped to `0.0..=1.0`; NaN means never.
    pub fn new(seed: u64, lines: Vec<String>, chance: f64) -> Self {
        let chance = if chance.is_finite() {
            chance.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            rng: StdRng::seed_from_u64(seed),
            lines,
            chance,
        }
    }
}

impl Ambience for SeededAmbience {
    fn flavor(&mut self, room: &RoomSnapshot) -> Option<String> {
        if self.lines.is_empty() || !self.rng.random_bool(self.chance) {
            return None;
        }
        let line = &self.lines[self.rng.random_range(0..self.lines.len())];
        Some(line.replace("{room}", &room.name))
    }
}
