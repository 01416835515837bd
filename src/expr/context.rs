use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Mutable state threaded through expression evaluation.
///
/// Holds the pseudo-random source behind `random()`, the only side-effecting
/// construct in the expression language. Pass a seeded context to make
/// `random()` reproducible.
#[derive(Debug, Clone)]
pub struct EvalContext {
    rng: StdRng,
}

impl EvalContext {
    /// Creates a context with a randomly chosen seed.
    pub fn new() -> Self {
        Self::seeded(rand::random())
    }

    /// Creates a context with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draws a uniform value in `[0, 1)`.
    pub fn next_random(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

impl Default for EvalContext {
    fn default() -> Self {
        Self::new()
    }
}
