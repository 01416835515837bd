//! Pareto and constrained dominance between evaluated solutions.

use crate::problem::EvaluatedSolution;

/// Dominance comparison result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dominance {
    /// Left dominates right.
    Left,
    /// Right dominates left.
    Right,
    /// Neither dominates the other.
    Neither,
}

/// Compares two objective vectors for Pareto dominance (minimization).
///
/// One vector dominates the other when it is no worse in every objective
/// and strictly better in at least one.
///
/// ```
/// use u_bruteforce::archive::{pareto_dominance, Dominance};
///
/// assert_eq!(pareto_dominance(&[1.0, 2.0], &[2.0, 3.0]), Dominance::Left);
/// assert_eq!(pareto_dominance(&[1.0, 3.0], &[2.0, 2.0]), Dominance::Neither);
/// ```
pub fn pareto_dominance(a: &[f64], b: &[f64]) -> Dominance {
    let mut a_better_in_some = false;
    let mut b_better_in_some = false;

    for (&va, &vb) in a.iter().zip(b.iter()) {
        if va < vb {
            a_better_in_some = true;
        } else if vb < va {
            b_better_in_some = true;
        }
    }

    match (a_better_in_some, b_better_in_some) {
        (true, false) => Dominance::Left,
        (false, true) => Dominance::Right,
        _ => Dominance::Neither,
    }
}

/// Constrained dominance: the smaller violation measure wins outright;
/// equal measures fall back to Pareto dominance on the objectives.
pub fn constrained_dominance(a: &EvaluatedSolution, b: &EvaluatedSolution) -> Dominance {
    let (va, vb) = (a.violation(), b.violation());
    if va < vb {
        Dominance::Left
    } else if vb < va {
        Dominance::Right
    } else {
        pareto_dominance(&a.objectives, &b.objectives)
    }
}
