//! This module contains the randomness capability the board engine draws from when spawning tiles.
//!
//! The engine never reaches for a global generator. Whoever owns the board hands it something
//! implementing [`Randomness`]; the game itself uses a `fastrand` generator, optionally seeded, and
//! tests use a scripted source so spawn placement can be asserted exactly.

use fastrand::Rng;

/// This trait holds the two random decisions a tile spawn needs: which empty cell to fill, and
/// whether the new tile is a two or a four.
pub trait Randomness {
    /// This function returns an index picked uniformly from `0..len`. Callers never pass zero.
    fn choose(&mut self, len: usize) -> usize;

    /// This function returns `true` with the given probability, which lies in `0.0..=1.0`.
    fn chance(&mut self, probability: f64) -> bool;
}

impl Randomness for Rng {
    fn choose(&mut self, len: usize) -> usize {
        self.usize(..len)
    }

    fn chance(&mut self, probability: f64) -> bool {
        self.f64() < probability
    }
}

/// This function creates the generator for a game session; a seed makes the whole session
/// reproducible, while no seed gives a fresh one every run.
#[must_use]
pub(crate) fn session_rng(seed: Option<u64>) -> Rng {
    seed.map_or_else(Rng::new, Rng::with_seed)
}

/// A random source that replays pre-recorded decisions.
///
/// Once a queue runs dry it falls back to index 0 and to `true` for every chance, which keeps the
/// spawned value at the common case of a two.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct Scripted {
    /// Indices handed out by `choose`, front first.
    picks: std::collections::VecDeque<usize>,
    /// Outcomes handed out by `chance`, front first.
    coins: std::collections::VecDeque<bool>,
}

#[cfg(test)]
impl Scripted {
    /// Builds a source that answers `choose` from `picks` and `chance` from `coins`.
    pub(crate) fn new(picks: &[usize], coins: &[bool]) -> Self {
        Self {
            picks: picks.iter().copied().collect(),
            coins: coins.iter().copied().collect(),
        }
    }
}

#[cfg(test)]
impl Randomness for Scripted {
    fn choose(&mut self, len: usize) -> usize {
        self.picks.pop_front().unwrap_or(0) % len
    }

    fn chance(&mut self, _probability: f64) -> bool {
        self.coins.pop_front().unwrap_or(true)
    }
}
