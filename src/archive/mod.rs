//! Archive of mutually non-dominated solutions.
//!
//! Solutions are compared with [`constrained_dominance`]: a smaller total
//! constraint violation always wins, and equally violating solutions are
//! compared by Pareto dominance on their (minimization-oriented) objectives.
//!
//! # References
//!
//! - Deb (2000), "An efficient constraint handling method for genetic
//!   algorithms", Computer Methods in Applied Mechanics and Engineering

mod dominance;

pub use dominance::{constrained_dominance, pareto_dominance, Dominance};

use crate::problem::EvaluatedSolution;

/// Set of evaluated solutions, none of which dominates another.
///
/// Insertion order is preserved among surviving members. When two
/// candidates tie exactly (same violation measure and identical objective
/// vectors), the one inserted first is kept.
///
/// # Examples
///
/// ```
/// use u_bruteforce::archive::NonDominatedArchive;
/// use u_bruteforce::problem::{Assignment, EvaluatedSolution, Value};
///
/// let point = |objectives: Vec<f64>| {
///     EvaluatedSolution::new(Assignment::new(vec![Value::Integer(0)]), objectives, vec![])
/// };
///
/// let mut archive = NonDominatedArchive::new();
/// assert!(archive.insert(point(vec![2.0, 3.0])));
/// assert!(archive.insert(point(vec![1.0, 2.0])));
/// assert!(!archive.insert(point(vec![3.0, 3.0])));
///
/// assert_eq!(archive.len(), 1);
/// assert_eq!(archive.solutions()[0].objectives, vec![1.0, 2.0]);
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NonDominatedArchive {
    members: Vec<EvaluatedSolution>,
}

impl NonDominatedArchive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offers a candidate to the archive.
    ///
    /// Returns `false` (archive unchanged) when a member dominates the
    /// candidate or ties it exactly. Otherwise every member the candidate
    /// dominates is evicted, the candidate is appended, and `true` is
    /// returned.
    pub fn insert(&mut self, candidate: EvaluatedSolution) -> bool {
        let rejected = self.members.iter().any(|member| {
            match constrained_dominance(member, &candidate) {
                Dominance::Left => true,
                Dominance::Right => false,
                Dominance::Neither => is_exact_tie(member, &candidate),
            }
        });
        if rejected {
            return false;
        }

        self.members
            .retain(|member| constrained_dominance(&candidate, member) != Dominance::Left);
        self.members.push(candidate);
        true
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EvaluatedSolution> {
        self.members.iter()
    }

    pub fn solutions(&self) -> &[EvaluatedSolution] {
        &self.members
    }

    pub fn into_solutions(self) -> Vec<EvaluatedSolution> {
        self.members
    }

    /// Members that satisfy every constraint.
    pub fn feasible(&self) -> impl Iterator<Item = &EvaluatedSolution> {
        self.members.iter().filter(|s| s.feasible)
    }
}

fn is_exact_tie(a: &EvaluatedSolution, b: &EvaluatedSolution) -> bool {
    a.violation() == b.violation() && a.objectives == b.objectives
}

impl Extend<EvaluatedSolution> for NonDominatedArchive {
    fn extend<I: IntoIterator<Item = EvaluatedSolution>>(&mut self, iter: I) {
        for solution in iter {
            self.insert(solution);
        }
    }
}

impl FromIterator<EvaluatedSolution> for NonDominatedArchive {
    fn from_iter<I: IntoIterator<Item = EvaluatedSolution>>(iter: I) -> Self {
        let mut archive = Self::new();
        archive.extend(iter);
        archive
    }
}

impl<'a> IntoIterator for &'a NonDominatedArchive {
    type Item = &'a EvaluatedSolution;
    type IntoIter = std::slice::Iter<'a, EvaluatedSolution>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for NonDominatedArchive {
    type Item = EvaluatedSolution;
    type IntoIter = std::vec::IntoIter<EvaluatedSolution>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.into_iter()
    }
}
