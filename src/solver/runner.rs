//! Brute-force solve execution.
//!
//! [`BruteForceRunner`] orchestrates one run:
//! validate → guard → enumerate → evaluate → archive.

use super::config::SolverConfig;
use crate::archive::NonDominatedArchive;
use crate::enumerate::{candidate_count, enumerate_in, Strategy, WorkerPool};
use crate::error::SolveError;
use crate::expr::EvalContext;
use crate::problem::{Assignment, EvaluatedSolution, ProblemDefinition, ProblemEvaluator};
use rayon::prelude::*;
use std::fmt;
use std::time::Instant;

/// Result of a brute-force run.
#[derive(Debug, Clone)]
pub struct BruteForceResult {
    /// Every non-dominated candidate, in the order it was accepted.
    pub archive: NonDominatedArchive,

    /// Wall-clock time from the start of enumeration to the last insertion.
    pub elapsed_ms: u64,

    /// Enumeration strategy the problem selected.
    pub strategy: Strategy,

    /// Number of candidates enumerated and evaluated.
    pub candidates_evaluated: usize,
}

impl fmt::Display for BruteForceResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Pareto Optimal solution(s) found in {}ms.",
            self.archive.len(),
            self.elapsed_ms
        )
    }
}

/// Executes a brute-force run.
///
/// # Usage
///
/// ```
/// use u_bruteforce::problem::{Objective, ProblemDefinition, Variable};
/// use u_bruteforce::solver::{BruteForceRunner, SolverConfig};
///
/// let problem = ProblemDefinition::new("knapsack-ish")
///     .with_variables(vec![Variable::binary(); 3])
///     .with_objective(Objective::maximize("4*x1 + 3*x2 + 2*x3"))
///     .with_objective(Objective::minimize("x1 + x2 + x3"));
///
/// let result = BruteForceRunner::run(&problem, &SolverConfig::deterministic(1)).unwrap();
/// assert_eq!(result.candidates_evaluated, 8);
/// assert!(result.archive.len() >= 2);
/// ```
pub struct BruteForceRunner;

impl BruteForceRunner {
    /// Runs the solve.
    ///
    /// Fails before any enumeration when the configuration or the problem is
    /// invalid, or when the problem has too many variables for its strategy.
    pub fn run(
        problem: &ProblemDefinition,
        config: &SolverConfig,
    ) -> Result<BruteForceResult, SolveError> {
        config.validate().map_err(SolveError::InvalidConfig)?;
        problem.validate()?;

        let strategy = Strategy::select(problem);
        strategy.check_size(problem.num_variables(), config)?;

        let evaluator = ProblemEvaluator::new(problem);
        for (location, error) in evaluator.parse_errors() {
            log::warn!("{location} does not parse and evaluates to NaN: {error}");
        }

        let expected = candidate_count(&problem.variables)?;
        let pool = WorkerPool::new(config.num_threads)?;
        log::info!(
            "solving '{}': {} variables, {} strategy, {} candidates, {} worker threads",
            problem.name,
            problem.num_variables(),
            strategy,
            expected,
            pool.num_threads()
        );

        let start = Instant::now();
        let candidates = enumerate_in(problem, config, &pool)?;
        let candidates_evaluated = candidates.len();
        let seed = config.seed.unwrap_or_else(rand::random);

        let archive = if config.parallel_evaluation {
            let evaluated = evaluate_parallel(&evaluator, candidates, seed, &pool);
            evaluated.into_iter().collect::<NonDominatedArchive>()
        } else {
            let mut ctx = EvalContext::seeded(seed);
            candidates
                .into_iter()
                .map(|assignment| evaluator.evaluate(&mut ctx, assignment))
                .collect::<NonDominatedArchive>()
        };
        let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        log::info!(
            "solved '{}': {} Pareto optimal of {} candidates in {}ms",
            problem.name,
            archive.len(),
            candidates_evaluated,
            elapsed_ms
        );

        Ok(BruteForceResult {
            archive,
            elapsed_ms,
            strategy,
            candidates_evaluated,
        })
    }
}

/// Evaluates every candidate on the pool, one `random()` stream each.
///
/// Results come back in enumeration order.
fn evaluate_parallel(
    evaluator: &ProblemEvaluator<'_>,
    candidates: Vec<Assignment>,
    seed: u64,
    pool: &WorkerPool,
) -> Vec<EvaluatedSolution> {
    pool.install(|| {
        candidates
            .into_par_iter()
            .enumerate()
            .map(|(index, assignment)| {
                let mut ctx = EvalContext::seeded(seed.wrapping_add(index as u64));
                evaluator.evaluate(&mut ctx, assignment)
            })
            .collect()
    })
}

/// Solves `problem` with the default configuration.
///
/// ```
/// use u_bruteforce::problem::{Objective, ProblemDefinition, Variable};
///
/// let problem = ProblemDefinition::new("min-sum")
///     .with_variables(vec![Variable::binary(); 2])
///     .with_objective(Objective::minimize("x1 + x2"));
///
/// let result = u_bruteforce::solve(&problem).unwrap();
/// assert_eq!(result.archive.len(), 1);
/// assert_eq!(result.archive.solutions()[0].objectives, vec![0.0]);
/// ```
pub fn solve(problem: &ProblemDefinition) -> Result<BruteForceResult, SolveError> {
    BruteForceRunner::run(problem, &SolverConfig::default())
}
