//! Solver configuration.
//!
//! [`SolverConfig`] holds the size guards and parallelism settings of a
//! brute-force run.

use crate::enumerate::DEFAULT_SPLIT_THRESHOLD;

/// Configuration for a brute-force solve.
///
/// # Defaults
///
/// ```
/// use u_bruteforce::solver::SolverConfig;
///
/// let config = SolverConfig::default();
/// assert_eq!(config.binary_threshold, 65_536);
/// assert_eq!(config.max_binary_variables, 20);
/// assert_eq!(config.max_mixed_variables, 8);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_bruteforce::solver::SolverConfig;
///
/// let config = SolverConfig::default()
///     .with_num_threads(4)
///     .with_parallel_evaluation(true)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig {
    /// Binary ranges shorter than this are materialized without splitting.
    pub binary_threshold: u64,

    /// All-binary problems must have fewer variables than this.
    ///
    /// `2^n` candidates are held in memory at once, so each extra variable
    /// doubles the footprint.
    pub max_binary_variables: usize,

    /// Mixed problems must have fewer variables than this.
    pub max_mixed_variables: usize,

    /// Whether binary enumeration forks range halves onto worker threads.
    pub parallel: bool,

    /// Whether candidates are evaluated in parallel.
    ///
    /// Each candidate then gets its own `random()` stream seeded from
    /// [`seed`](Self::seed) and its enumeration index. Insertion into the
    /// archive stays sequential in enumeration order.
    pub parallel_evaluation: bool,

    /// Worker thread count. `None` uses rayon's global pool.
    pub num_threads: Option<usize>,

    /// Seed for `random()` in expressions.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            binary_threshold: DEFAULT_SPLIT_THRESHOLD,
            max_binary_variables: 20,
            max_mixed_variables: 8,
            parallel: true,
            parallel_evaluation: false,
            num_threads: None,
            seed: None,
        }
    }
}

impl SolverConfig {
    /// Sets the binary split threshold.
    pub fn with_binary_threshold(mut self, threshold: u64) -> Self {
        self.binary_threshold = threshold;
        self
    }

    pub fn with_max_binary_variables(mut self, n: usize) -> Self {
        self.max_binary_variables = n;
        self
    }

    pub fn with_max_mixed_variables(mut self, n: usize) -> Self {
        self.max_mixed_variables = n;
        self
    }

    /// Enables or disables fork/join binary enumeration.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Enables or disables parallel candidate evaluation.
    pub fn with_parallel_evaluation(mut self, enabled: bool) -> Self {
        self.parallel_evaluation = enabled;
        self
    }

    /// Runs on a dedicated pool of `n` threads.
    pub fn with_num_threads(mut self, n: usize) -> Self {
        self.num_threads = Some(n);
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Preset with every form of parallelism turned off.
    ///
    /// Useful when stepping through a run or comparing logs.
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            parallel_evaluation: false,
            ..Self::default()
        }
    }

    /// Preset whose results, including `random()` draws, repeat exactly.
    pub fn deterministic(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.binary_threshold < 2 {
            return Err("binary_threshold must be at least 2".into());
        }
        if self.max_binary_variables == 0 {
            return Err("max_binary_variables must be at least 1".into());
        }
        if self.max_mixed_variables == 0 {
            return Err("max_mixed_variables must be at least 1".into());
        }
        if self.num_threads == Some(0) {
            return Err("num_threads must be positive or None".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SolverConfig::default();
        assert_eq!(config.binary_threshold, 65_536);
        assert_eq!(config.max_binary_variables, 20);
        assert_eq!(config.max_mixed_variables, 8);
        assert!(config.parallel);
        assert!(!config.parallel_evaluation);
        assert!(config.num_threads.is_none());
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = SolverConfig::default()
            .with_binary_threshold(1024)
            .with_max_binary_variables(16)
            .with_max_mixed_variables(5)
            .with_parallel(false)
            .with_parallel_evaluation(true)
            .with_num_threads(3)
            .with_seed(42);

        assert_eq!(config.binary_threshold, 1024);
        assert_eq!(config.max_binary_variables, 16);
        assert_eq!(config.max_mixed_variables, 5);
        assert!(!config.parallel);
        assert!(config.parallel_evaluation);
        assert_eq!(config.num_threads, Some(3));
        assert_eq!(config.seed, Some(42));
    }

    // ---- Presets ----

    #[test]
    fn test_sequential_preset() {
        let config = SolverConfig::sequential();
        assert!(!config.parallel);
        assert!(!config.parallel_evaluation);
        assert_eq!(config.max_binary_variables, 20);
    }

    #[test]
    fn test_deterministic_preset() {
        let config = SolverConfig::deterministic(9);
        assert_eq!(config.seed, Some(9));
        assert!(config.parallel);
    }

    // ---- Validation ----

    #[test]
    fn test_validate_ok() {
        assert!(SolverConfig::default().validate().is_ok());
        assert!(SolverConfig::sequential().validate().is_ok());
    }

    #[test]
    fn test_validate_threshold_too_small() {
        let config = SolverConfig::default().with_binary_threshold(1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_limits() {
        assert!(SolverConfig::default()
            .with_max_binary_variables(0)
            .validate()
            .is_err());
        assert!(SolverConfig::default()
            .with_max_mixed_variables(0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_zero_threads() {
        let config = SolverConfig::default().with_num_threads(0);
        assert!(config.validate().is_err());
    }
}
