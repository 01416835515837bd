//! Maps candidate assignments to objective and constraint vectors.

use super::model::{ConstraintOperator, ProblemDefinition};
use super::variables::Assignment;
use crate::expr::{variable_name, EvalContext, Expression, ExpressionError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

/// A candidate together with its evaluated objectives and constraints.
///
/// Objectives are always minimization-oriented: maximized objectives are
/// stored negated.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvaluatedSolution {
    pub assignment: Assignment,
    /// One value per objective, lower is better.
    pub objectives: Vec<f64>,
    /// One value per constraint, 0 when satisfied.
    pub constraint_violations: Vec<f64>,
    /// Whether every constraint is satisfied and every objective evaluated.
    pub feasible: bool,
    violation: f64,
}

impl EvaluatedSolution {
    /// Builds a solution from already-evaluated vectors.
    pub fn new(assignment: Assignment, objectives: Vec<f64>, constraint_violations: Vec<f64>) -> Self {
        let violation = total_violation(&constraint_violations);
        Self {
            assignment,
            objectives,
            constraint_violations,
            feasible: violation == 0.0,
            violation,
        }
    }

    /// A candidate whose objectives could not be evaluated.
    ///
    /// Objectives are replaced by `+inf` and every constraint is violated by
    /// `+inf`, so the candidate loses to anything that did evaluate.
    pub fn invalid(assignment: Assignment, num_objectives: usize, num_constraints: usize) -> Self {
        Self {
            assignment,
            objectives: vec![f64::INFINITY; num_objectives],
            constraint_violations: vec![f64::INFINITY; num_constraints],
            feasible: false,
            violation: f64::INFINITY,
        }
    }

    /// Scalar violation measure used by constrained dominance.
    ///
    /// Sum of absolute constraint violations; `+inf` for invalid candidates.
    pub fn violation(&self) -> f64 {
        self.violation
    }
}

fn total_violation(violations: &[f64]) -> f64 {
    violations.iter().map(|v| v.abs()).sum()
}

/// Violation of one constraint given its evaluated sides.
///
/// - relation holds: `0`
/// - the opposite ordering holds (`<=` / `>=` only): `lhs - rhs`
/// - otherwise, including `!=` with equal sides and NaN sides: `1`
///
/// # Examples
///
/// ```
/// use u_bruteforce::problem::{constraint_violation, ConstraintOperator};
///
/// assert_eq!(constraint_violation(ConstraintOperator::LessOrEqual, 5.0, 3.0), 2.0);
/// assert_eq!(constraint_violation(ConstraintOperator::LessOrEqual, 2.0, 3.0), 0.0);
/// assert_eq!(constraint_violation(ConstraintOperator::NotEqual, 4.0, 4.0), 1.0);
/// ```
pub fn constraint_violation(operator: ConstraintOperator, lhs: f64, rhs: f64) -> f64 {
    if operator.holds(lhs, rhs) {
        0.0
    } else if operator.opposite_holds(lhs, rhs) {
        lhs - rhs
    } else {
        1.0
    }
}

struct CompiledConstraint {
    lhs: Result<Expression, ExpressionError>,
    operator: ConstraintOperator,
    rhs: Result<Expression, ExpressionError>,
}

/// Evaluates candidates of one problem.
///
/// Every expression is parsed once at construction. Expressions that fail to
/// parse are kept as errors and evaluate to `NaN` for every candidate, the
/// same as re-parsing them each time would.
///
/// The evaluator is `Sync`; candidates may be evaluated from several threads
/// as long as each thread brings its own [`EvalContext`].
pub struct ProblemEvaluator<'a> {
    problem: &'a ProblemDefinition,
    objectives: Vec<Result<Expression, ExpressionError>>,
    constraints: Vec<CompiledConstraint>,
    names: Vec<String>,
    nan_reported: AtomicBool,
}

impl<'a> ProblemEvaluator<'a> {
    pub fn new(problem: &'a ProblemDefinition) -> Self {
        let objectives = problem
            .objectives
            .iter()
            .map(|o| Expression::parse(&o.expression))
            .collect();
        let constraints = problem
            .constraints
            .iter()
            .map(|c| CompiledConstraint {
                lhs: Expression::parse(&c.lhs),
                operator: c.operator,
                rhs: Expression::parse(&c.rhs),
            })
            .collect();
        let names = (0..problem.num_variables()).map(variable_name).collect();

        Self {
            problem,
            objectives,
            constraints,
            names,
            nan_reported: AtomicBool::new(false),
        }
    }

    pub fn problem(&self) -> &ProblemDefinition {
        self.problem
    }

    /// Parse errors of the problem's expressions, labelled by where they occur.
    pub fn parse_errors(&self) -> Vec<(String, ExpressionError)> {
        let mut errors = Vec::new();
        for (i, objective) in self.objectives.iter().enumerate() {
            if let Err(e) = objective {
                errors.push((format!("f({})", i + 1), e.clone()));
            }
        }
        for (i, constraint) in self.constraints.iter().enumerate() {
            for (side, expr) in [("lhs", &constraint.lhs), ("rhs", &constraint.rhs)] {
                if let Err(e) = expr {
                    errors.push((format!("constraint {} {side}", i + 1), e.clone()));
                }
            }
        }
        errors
    }

    /// Binds `x1..xn` to the decoded values of `assignment`.
    pub fn bindings(&self, assignment: &Assignment) -> HashMap<String, f64> {
        self.names
            .iter()
            .cloned()
            .zip(assignment.values().iter().map(|v| v.decode()))
            .collect()
    }

    /// Evaluates one candidate.
    pub fn evaluate(&self, ctx: &mut EvalContext, assignment: Assignment) -> EvaluatedSolution {
        let bindings = self.bindings(&assignment);

        let mut objectives = Vec::with_capacity(self.objectives.len());
        for (expr, objective) in self.objectives.iter().zip(&self.problem.objectives) {
            let value = eval_or_nan(expr, ctx, &bindings);
            if value.is_nan() {
                if !self.nan_reported.swap(true, Ordering::Relaxed) {
                    log::warn!(
                        "objective '{}' is not a number at {:?}; such candidates are kept as infeasible",
                        objective.expression,
                        assignment.decoded()
                    );
                }
                return EvaluatedSolution::invalid(
                    assignment,
                    self.objectives.len(),
                    self.constraints.len(),
                );
            }
            objectives.push(if objective.maximize { -value } else { value });
        }

        let violations = self
            .constraints
            .iter()
            .map(|c| {
                let lhs = eval_or_nan(&c.lhs, ctx, &bindings);
                let rhs = eval_or_nan(&c.rhs, ctx, &bindings);
                constraint_violation(c.operator, lhs, rhs)
            })
            .collect();

        EvaluatedSolution::new(assignment, objectives, violations)
    }
}

fn eval_or_nan(
    expr: &Result<Expression, ExpressionError>,
    ctx: &mut EvalContext,
    bindings: &HashMap<String, f64>,
) -> f64 {
    match expr {
        Ok(e) => e.eval(ctx, bindings).unwrap_or(f64::NAN),
        Err(_) => f64::NAN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::{Constraint, Objective, Value, Variable};

    fn assignment(values: &[f64]) -> Assignment {
        Assignment::new(values.iter().map(|&v| Value::Real(v)).collect())
    }

    fn two_var_problem() -> ProblemDefinition {
        ProblemDefinition::new("p")
            .with_variable(Variable::real(0.0, 10.0))
            .with_variable(Variable::real(0.0, 10.0))
    }

    // ---- Constraint rule ----

    #[test]
    fn test_less_or_equal() {
        use ConstraintOperator::LessOrEqual;
        assert_eq!(constraint_violation(LessOrEqual, 5.0, 3.0), 2.0);
        assert_eq!(constraint_violation(LessOrEqual, 2.0, 3.0), 0.0);
        assert_eq!(constraint_violation(LessOrEqual, 3.0, 3.0), 0.0);
    }

    #[test]
    fn test_greater_or_equal_is_signed() {
        use ConstraintOperator::GreaterOrEqual;
        assert_eq!(constraint_violation(GreaterOrEqual, 1.0, 3.0), -2.0);
        assert_eq!(constraint_violation(GreaterOrEqual, 4.0, 3.0), 0.0);
    }

    #[test]
    fn test_not_equal_fixed_penalty() {
        use ConstraintOperator::NotEqual;
        assert_eq!(constraint_violation(NotEqual, 2.0, 2.0), 1.0);
        assert_eq!(constraint_violation(NotEqual, 2.0, 7.0), 0.0);
    }

    #[test]
    fn test_nan_side_gets_fixed_penalty() {
        assert_eq!(
            constraint_violation(ConstraintOperator::LessOrEqual, f64::NAN, 1.0),
            1.0
        );
    }

    // ---- Evaluation ----

    #[test]
    fn test_objectives_and_maximization() {
        let problem = two_var_problem()
            .with_objective(Objective::minimize("x1 + x2"))
            .with_objective(Objective::maximize("x1 * x2"));
        let evaluator = ProblemEvaluator::new(&problem);
        let sol = evaluator.evaluate(&mut EvalContext::seeded(0), assignment(&[2.0, 3.0]));

        assert_eq!(sol.objectives, vec![5.0, -6.0]);
        assert!(sol.constraint_violations.is_empty());
        assert!(sol.feasible);
        assert_eq!(sol.violation(), 0.0);
    }

    #[test]
    fn test_constraint_violations() {
        let problem = two_var_problem()
            .with_objective(Objective::minimize("x1"))
            .with_constraint(Constraint::less_or_equal("x1 + x2", "3"))
            .with_constraint(Constraint::greater_or_equal("x1", "x2"))
            .with_constraint(Constraint::not_equal("x1", "1"));
        let evaluator = ProblemEvaluator::new(&problem);
        let sol = evaluator.evaluate(&mut EvalContext::seeded(0), assignment(&[1.0, 4.0]));

        assert_eq!(sol.constraint_violations, vec![2.0, -3.0, 1.0]);
        assert!(!sol.feasible);
        assert_eq!(sol.violation(), 6.0);
    }

    #[test]
    fn test_binary_values_bind_as_numbers() {
        let problem = ProblemDefinition::new("b")
            .with_variable(Variable::binary())
            .with_variable(Variable::binary())
            .with_objective(Objective::minimize("x1 + 2*x2"));
        let evaluator = ProblemEvaluator::new(&problem);
        let a = Assignment::new(vec![Value::Binary(true), Value::Binary(true)]);
        let sol = evaluator.evaluate(&mut EvalContext::seeded(0), a);
        assert_eq!(sol.objectives, vec![3.0]);
    }

    #[test]
    fn test_nan_objective_invalidates() {
        let problem = two_var_problem()
            .with_objective(Objective::minimize("x1"))
            .with_objective(Objective::minimize("sqrt(-x2)"))
            .with_constraint(Constraint::less_or_equal("x1", "100"));
        let evaluator = ProblemEvaluator::new(&problem);
        let sol = evaluator.evaluate(&mut EvalContext::seeded(0), assignment(&[1.0, 4.0]));

        assert!(!sol.feasible);
        assert_eq!(sol.objectives.len(), 2);
        assert!(sol.objectives.iter().all(|v| *v == f64::INFINITY));
        assert_eq!(sol.constraint_violations, vec![f64::INFINITY]);
        assert_eq!(sol.violation(), f64::INFINITY);
    }

    #[test]
    fn test_unparseable_objective_invalidates_without_panicking() {
        let problem = two_var_problem().with_objective(Objective::minimize("bogus("));
        let evaluator = ProblemEvaluator::new(&problem);
        let sol = evaluator.evaluate(&mut EvalContext::seeded(0), assignment(&[0.0, 0.0]));
        assert!(!sol.feasible);
        assert_eq!(evaluator.parse_errors().len(), 1);
        assert_eq!(evaluator.parse_errors()[0].0, "f(1)");
    }

    #[test]
    fn test_infinite_objective_is_not_invalid() {
        let problem = two_var_problem().with_objective(Objective::minimize("x1 / x2"));
        let evaluator = ProblemEvaluator::new(&problem);
        let sol = evaluator.evaluate(&mut EvalContext::seeded(0), assignment(&[1.0, 0.0]));
        assert!(sol.feasible);
        assert_eq!(sol.objectives, vec![f64::INFINITY]);
    }

    #[test]
    fn test_bindings() {
        let problem = two_var_problem().with_objective(Objective::minimize("x1"));
        let evaluator = ProblemEvaluator::new(&problem);
        let b = evaluator.bindings(&assignment(&[0.5, 2.0]));
        assert_eq!(b["x1"], 0.5);
        assert_eq!(b["x2"], 2.0);
    }
}
