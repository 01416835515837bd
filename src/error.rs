//! Error types shared across the solve pipeline.

use crate::enumerate::Strategy;
use thiserror::Error;

/// A structural problem with a [`ProblemDefinition`](crate::problem::ProblemDefinition).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("problem has no decision variables")]
    NoVariables,

    #[error("problem has no objectives")]
    NoObjectives,

    #[error("variable x{} has lower bound {lower} above upper bound {upper}", .index + 1)]
    InvertedBounds { index: usize, lower: f64, upper: f64 },

    #[error("variable x{} has non-positive increment {increment}", .index + 1)]
    NonPositiveIncrement { index: usize, increment: f64 },

    #[error("variable x{} has non-finite bounds [{lower}, {upper}]", .index + 1)]
    NonFiniteBounds { index: usize, lower: f64, upper: f64 },

    #[error("variable x{} has increment {increment}, too small to step across its bounds", .index + 1)]
    IncrementBelowPrecision { index: usize, increment: f64 },
}

/// Errors that abort a brute-force solve.
///
/// Per-candidate numeric failures never show up here: they are absorbed
/// into the feasibility model by the problem evaluator.
#[derive(Debug, Error)]
pub enum SolveError {
    #[error("too many decision variables for {strategy} enumeration: {variables} (limit is fewer than {limit})")]
    DomainTooLarge {
        strategy: Strategy,
        variables: usize,
        limit: usize,
    },

    #[error("not enough memory to hold {candidates} candidates")]
    ResourceExhausted { candidates: usize },

    #[error("invalid problem")]
    InvalidProblem(#[from] ModelError),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("failed to build worker pool")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_use_one_based_variable_names() {
        let err = ModelError::InvertedBounds {
            index: 2,
            lower: 5.0,
            upper: 1.0,
        };
        assert_eq!(
            err.to_string(),
            "variable x3 has lower bound 5 above upper bound 1"
        );
    }

    #[test]
    fn test_domain_too_large_message() {
        let err = SolveError::DomainTooLarge {
            strategy: Strategy::Binary,
            variables: 20,
            limit: 20,
        };
        assert_eq!(
            err.to_string(),
            "too many decision variables for binary enumeration: 20 (limit is fewer than 20)"
        );
    }

    #[test]
    fn test_model_error_converts() {
        let err: SolveError = ModelError::NoObjectives.into();
        assert!(matches!(err, SolveError::InvalidProblem(ModelError::NoObjectives)));
    }
}
