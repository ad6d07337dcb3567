use crate::domain::ports::{JitterSource, MAX_JITTER};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Uniform jitter in `[-MAX_JITTER, MAX_JITTER]` from the thread RNG.
#[derive(Debug, Clone, Default)]
pub struct UniformJitter;

impl JitterSource for UniformJitter {
    fn next_jitter(&self) -> f64 {
        let mut rng = rand::rng();
        rng.random_range(-MAX_JITTER..=MAX_JITTER)
    }
}

/// Uniform jitter from a seeded generator, for reproducible runs.
pub struct SeededJitter {
    rng: Mutex<StdRng>,
}

impl SeededJitter {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl JitterSource for SeededJitter {
    fn next_jitter(&self) -> f64 {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.random_range(-MAX_JITTER..=MAX_JITTER)
    }
}

/// Always returns the same adjustment.
#[derive(Debug, Clone, Copy)]
pub struct FixedJitter {
    value: f64,
}

impl FixedJitter {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl JitterSource for FixedJitter {
    fn next_jitter(&self) -> f64 {
        self.value
    }
}

/// Zero jitter, for tests or pure logic verification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoJitter;

impl JitterSource for NoJitter {
    fn next_jitter(&self) -> f64 {
        0.0
    }
}
