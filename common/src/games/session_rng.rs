use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the random choices made by bots.
pub trait RandomSource {
    /// Returns `true` with probability `probability`.
    fn chance(&mut self, probability: f64) -> bool;

    /// Picks an index uniformly from `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

pub struct SessionRng {
    rng: StdRng,
    seed: u64,
}

impl SessionRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn from_random() -> Self {
        let seed: u64 = rand::rng().random();
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn random_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distr::uniform::SampleUniform,
        R: rand::distr::uniform::SampleRange<T>,
    {
        self.rng.random_range(range)
    }

    pub fn random_bool(&mut self, probability: f64) -> bool {
        self.rng.random_bool(probability)
    }
}

impl RandomSource for SessionRng {
    fn chance(&mut self, probability: f64) -> bool {
        self.random_bool(probability)
    }

    fn pick(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}

/// Deterministic stand-in for tests: a fixed answer for every `chance`
/// call and a fixed index, wrapped into range, for every `pick`.
#[cfg(test)]
pub(crate) struct FixedRng {
    pub take_chance: bool,
    pub pick: usize,
}

#[cfg(test)]
impl RandomSource for FixedRng {
    fn chance(&mut self, _probability: f64) -> bool {
        self.take_chance
    }

    fn pick(&mut self, len: usize) -> usize {
        self.pick % len
    }
}
