//! Exhaustive multi-objective optimization over small discrete domains.
//!
//! Problems are declared with binary, integer, and discretized real
//! variables, objectives, and constraints written as arithmetic
//! expressions over `x1..xn`. The solver enumerates every candidate,
//! evaluates it, and returns the set of constrained-Pareto-optimal
//! solutions.
//!
//! - **Problem modeling** ([`problem`]): variables, objectives, constraints,
//!   and candidate evaluation.
//! - **Expressions** ([`expr`]): a small arithmetic language with
//!   functions, constants, and a seedable `random()`.
//! - **Enumeration** ([`enumerate`]): fork/join enumeration for all-binary
//!   problems, a depth-first cartesian product for everything else.
//! - **Archive** ([`archive`]): constrained dominance and the non-dominated
//!   set.
//! - **Solver** ([`solver`]): configuration and the end-to-end run.
//!
//! # Example
//!
//! ```
//! use u_bruteforce::problem::{Constraint, Objective, ProblemDefinition, Variable};
//!
//! let problem = ProblemDefinition::new("pick")
//!     .with_variables(vec![Variable::binary(); 4])
//!     .with_objective(Objective::maximize("3*x1 + 2*x2 + 4*x3 + x4"))
//!     .with_constraint(Constraint::less_or_equal("x1 + x2 + x3 + x4", "2"));
//!
//! let result = u_bruteforce::solve(&problem).unwrap();
//! let best = &result.archive.solutions()[0];
//! assert_eq!(best.assignment.to_bit_string(), "1010");
//! ```
//!
//! Brute force is only practical for small problems: all-binary problems
//! are limited to fewer than 20 variables and mixed problems to fewer than
//! 8 by default (see [`solver::SolverConfig`]).

pub mod archive;
pub mod enumerate;
pub mod error;
pub mod expr;
pub mod problem;
pub mod solver;

pub use error::{ModelError, SolveError};
pub use solver::solve;
