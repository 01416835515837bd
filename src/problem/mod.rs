//! Problem modeling layer.
//!
//! A [`ProblemDefinition`] lists decision [`Variable`]s, [`Objective`]s, and
//! [`Constraint`]s. Objectives and constraints are expressions over the
//! variables, bound positionally as `x1, x2, ...` (see [`crate::expr`]).
//!
//! # Key Types
//!
//! - [`Variable`]: binary, integer, or discretized real decision variable
//! - [`Assignment`]: one concrete value per variable
//! - [`ProblemEvaluator`]: turns an assignment into an [`EvaluatedSolution`]

mod evaluator;
mod model;
mod variables;

pub use evaluator::{constraint_violation, EvaluatedSolution, ProblemEvaluator};
pub use model::{Constraint, ConstraintOperator, Objective, ProblemDefinition};
pub use variables::{Assignment, Value, Variable, VariableKind, DEFAULT_REAL_INCREMENT};
