//! Injectable pseudo-random source for the simulated signals

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, PoisonError};

/// Uniform draws in `[0, 1)`.
///
/// Simulated fetchers never call `rand` directly; they pull from a shared
/// source so a run can be replayed from a seed.
pub trait RandomSource: Send + Sync {
    fn next_unit(&self) -> f64;
}

/// `StdRng` behind a mutex so one source can serve every fetcher
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
    seed: Option<u64>,
}

impl SeededRandom {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            seed: Some(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
            seed: None,
        }
    }

    /// Seeded when a seed is given, otherwise from OS entropy
    pub fn new(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::from_seed)
    }

    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&self) -> f64 {
        self.rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .gen_range(0.0..1.0)
    }
}

/// Replays a fixed list of draws, cycling when exhausted
#[cfg(test)]
pub(crate) struct ScriptedRandom {
    draws: Vec<f64>,
    next: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl ScriptedRandom {
    pub(crate) fn new(draws: &[f64]) -> Self {
        Self {
            draws: draws.to_vec(),
            next: std::sync::atomic::AtomicUsize::new(0),
        }
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRandom {
    fn next_unit(&self) -> f64 {
        let i = self.next.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.draws[i % self.draws.len()]
    }
}
