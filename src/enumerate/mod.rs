//! Exhaustive candidate enumeration.
//!
//! Two strategies cover the supported problems:
//!
//! - [`BinaryEnumerator`]: all-binary problems, enumerated as the integers
//!   `[0, 2^n)` with recursive fork/join range splitting
//! - [`MixedEnumerator`]: any mix of binary, integer, and real variables,
//!   enumerated as a sequential depth-first cartesian product
//!
//! Both produce the complete candidate list eagerly and in a deterministic
//! order. [`enumerate`] picks the strategy for a problem and applies the
//! size guards from [`SolverConfig`].

mod binary;
mod mixed;
mod pool;

pub use binary::{BinaryEnumerator, DEFAULT_SPLIT_THRESHOLD};
pub use mixed::MixedEnumerator;
pub(crate) use pool::WorkerPool;

use crate::error::SolveError;
use crate::problem::{Assignment, ProblemDefinition, Variable};
use crate::solver::SolverConfig;
use std::fmt;

/// Which enumerator handles a problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    Binary,
    Mixed,
}

impl Strategy {
    /// `Binary` when every variable is binary, otherwise `Mixed`.
    pub fn select(problem: &ProblemDefinition) -> Self {
        if problem.is_all_binary() {
            Strategy::Binary
        } else {
            Strategy::Mixed
        }
    }

    /// Exclusive upper bound on the variable count this strategy accepts.
    pub fn variable_limit(self, config: &SolverConfig) -> usize {
        match self {
            Strategy::Binary => config.max_binary_variables,
            Strategy::Mixed => config.max_mixed_variables,
        }
    }

    /// Fails with `DomainTooLarge` when `num_variables` reaches the limit.
    pub fn check_size(self, num_variables: usize, config: &SolverConfig) -> Result<(), SolveError> {
        let limit = self.variable_limit(config);
        if num_variables >= limit {
            return Err(SolveError::DomainTooLarge {
                strategy: self,
                variables: num_variables,
                limit,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Binary => write!(f, "binary"),
            Strategy::Mixed => write!(f, "mixed"),
        }
    }
}

/// Number of candidates in the cartesian product of `variables`' domains.
///
/// A domain or product too large for `usize` is reported as
/// `ResourceExhausted`.
pub fn candidate_count(variables: &[Variable]) -> Result<usize, SolveError> {
    variables.iter().try_fold(1usize, |acc, v| {
        v.domain_size()
            .and_then(|size| acc.checked_mul(size))
            .ok_or(SolveError::ResourceExhausted {
                candidates: usize::MAX,
            })
    })
}

/// Enumerates every candidate of `problem` with the strategy it selects.
///
/// The size guard runs before any work: binary problems need fewer than
/// `config.max_binary_variables` variables, mixed problems fewer than
/// `config.max_mixed_variables`.
///
/// # Examples
///
/// ```
/// use u_bruteforce::enumerate::enumerate;
/// use u_bruteforce::problem::{Objective, ProblemDefinition, Variable};
/// use u_bruteforce::solver::SolverConfig;
///
/// let problem = ProblemDefinition::new("demo")
///     .with_variable(Variable::integer(0, 2))
///     .with_variable(Variable::binary())
///     .with_objective(Objective::minimize("x1"));
///
/// let all = enumerate(&problem, &SolverConfig::default()).unwrap();
/// assert_eq!(all.len(), 6);
/// ```
pub fn enumerate(
    problem: &ProblemDefinition,
    config: &SolverConfig,
) -> Result<Vec<Assignment>, SolveError> {
    let pool = WorkerPool::new(config.num_threads)?;
    enumerate_in(problem, config, &pool)
}

pub(crate) fn enumerate_in(
    problem: &ProblemDefinition,
    config: &SolverConfig,
    pool: &WorkerPool,
) -> Result<Vec<Assignment>, SolveError> {
    let strategy = Strategy::select(problem);
    strategy.check_size(problem.num_variables(), config)?;

    match strategy {
        Strategy::Binary => BinaryEnumerator::new(problem.num_variables())
            .with_threshold(config.binary_threshold)
            .with_parallel(config.parallel)
            .enumerate_in(pool),
        Strategy::Mixed => MixedEnumerator::new(&problem.variables).enumerate(),
    }
}
