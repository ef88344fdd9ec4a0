//! Random sources for the fallback estimator

use rand::{rngs::StdRng, Rng, SeedableRng};
use shared::FallbackDraw;
use std::sync::Mutex;

/// Supplies the random perturbation of each fallback estimate
pub trait DrawSource: Send + Sync {
    fn draw(&self) -> FallbackDraw;
}

/// Unseeded draws from the thread-local generator
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngDraws;

impl DrawSource for ThreadRngDraws {
    fn draw(&self) -> FallbackDraw {
        let mut rng = rand::thread_rng();
        FallbackDraw::from_unit(rng.gen::<f64>(), rng.gen::<f64>())
    }
}

/// Reproducible draws from a seeded generator
#[derive(Debug)]
pub struct SeededDraws {
    rng: Mutex<StdRng>,
}

impl SeededDraws {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl DrawSource for SeededDraws {
    fn draw(&self) -> FallbackDraw {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        FallbackDraw::from_unit(rng.gen::<f64>(), rng.gen::<f64>())
    }
}

/// Always the same draw
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedDraws(pub FallbackDraw);

impl DrawSource for FixedDraws {
    fn draw(&self) -> FallbackDraw {
        self.0
    }
}
