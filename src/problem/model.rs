//! Problem definition: variables, objectives, and constraints.

use super::variables::{Variable, VariableKind};
use crate::error::ModelError;
use std::fmt;

/// An objective function given as an expression over `x1..xn`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Objective {
    /// Expression text, e.g. `"x1 + 2*x2"`.
    pub expression: String,
    /// Whether larger values are better.
    pub maximize: bool,
}

impl Objective {
    pub fn minimize(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            maximize: false,
        }
    }

    pub fn maximize(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            maximize: true,
        }
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sense = if self.maximize { "maximize" } else { "minimize" };
        write!(f, "{sense}({})", self.expression)
    }
}

/// Relational operator of a [`Constraint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConstraintOperator {
    LessOrEqual,
    GreaterOrEqual,
    NotEqual,
}

impl ConstraintOperator {
    /// Whether the relation holds between two evaluated sides.
    pub fn holds(self, lhs: f64, rhs: f64) -> bool {
        match self {
            ConstraintOperator::LessOrEqual => lhs <= rhs,
            ConstraintOperator::GreaterOrEqual => lhs >= rhs,
            ConstraintOperator::NotEqual => lhs != rhs,
        }
    }

    /// Whether the opposite ordering holds. Never true for `!=`.
    pub fn opposite_holds(self, lhs: f64, rhs: f64) -> bool {
        match self {
            ConstraintOperator::LessOrEqual => lhs >= rhs,
            ConstraintOperator::GreaterOrEqual => lhs <= rhs,
            ConstraintOperator::NotEqual => false,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            ConstraintOperator::LessOrEqual => "<=",
            ConstraintOperator::GreaterOrEqual => ">=",
            ConstraintOperator::NotEqual => "!=",
        }
    }
}

impl fmt::Display for ConstraintOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A relational constraint `lhs <op> rhs` between two expressions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Constraint {
    pub lhs: String,
    pub operator: ConstraintOperator,
    pub rhs: String,
}

impl Constraint {
    pub fn new(
        lhs: impl Into<String>,
        operator: ConstraintOperator,
        rhs: impl Into<String>,
    ) -> Self {
        Self {
            lhs: lhs.into(),
            operator,
            rhs: rhs.into(),
        }
    }

    /// Convenience: `lhs <= rhs`.
    pub fn less_or_equal(lhs: impl Into<String>, rhs: impl Into<String>) -> Self {
        Self::new(lhs, ConstraintOperator::LessOrEqual, rhs)
    }

    /// Convenience: `lhs >= rhs`.
    pub fn greater_or_equal(lhs: impl Into<String>, rhs: impl Into<String>) -> Self {
        Self::new(lhs, ConstraintOperator::GreaterOrEqual, rhs)
    }

    /// Convenience: `lhs != rhs`.
    pub fn not_equal(lhs: impl Into<String>, rhs: impl Into<String>) -> Self {
        Self::new(lhs, ConstraintOperator::NotEqual, rhs)
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.lhs, self.operator, self.rhs)
    }
}

/// A multi-objective optimization problem over a finite decision space.
///
/// Variables are referenced in expressions by position as `x1, x2, ...`.
///
/// # Examples
///
/// ```
/// use u_bruteforce::problem::{Constraint, Objective, ProblemDefinition, Variable};
///
/// let problem = ProblemDefinition::new("knapsack")
///     .with_variable(Variable::binary())
///     .with_variable(Variable::binary())
///     .with_objective(Objective::maximize("3*x1 + 4*x2"))
///     .with_constraint(Constraint::less_or_equal("2*x1 + 3*x2", "4"));
///
/// assert_eq!(problem.num_variables(), 2);
/// assert!(problem.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProblemDefinition {
    pub name: String,
    pub variables: Vec<Variable>,
    pub objectives: Vec<Objective>,
    pub constraints: Vec<Constraint>,
}

impl ProblemDefinition {
    /// Creates an empty problem.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variables: Vec::new(),
            objectives: Vec::new(),
            constraints: Vec::new(),
        }
    }

    pub fn with_variable(mut self, variable: Variable) -> Self {
        self.variables.push(variable);
        self
    }

    pub fn with_variables(mut self, variables: impl IntoIterator<Item = Variable>) -> Self {
        self.variables.extend(variables);
        self
    }

    pub fn with_objective(mut self, objective: Objective) -> Self {
        self.objectives.push(objective);
        self
    }

    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_objectives(&self) -> usize {
        self.objectives.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Kind of every variable, in index order.
    pub fn variable_kinds(&self) -> Vec<VariableKind> {
        self.variables.iter().map(Variable::kind).collect()
    }

    /// Whether every variable is binary.
    pub fn is_all_binary(&self) -> bool {
        self.variables
            .iter()
            .all(|v| v.kind() == VariableKind::Binary)
    }

    /// Validates the problem for consistency.
    ///
    /// Checks that there is at least one variable and one objective, and
    /// that every domain is non-empty with a positive step.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.variables.is_empty() {
            return Err(ModelError::NoVariables);
        }
        if self.objectives.is_empty() {
            return Err(ModelError::NoObjectives);
        }
        for (index, var) in self.variables.iter().enumerate() {
            let (lower, upper) = (var.lower_bound(), var.upper_bound());
            // Negated comparison also rejects NaN bounds.
            if !(lower <= upper) {
                return Err(ModelError::InvertedBounds {
                    index,
                    lower,
                    upper,
                });
            }
            if !lower.is_finite() || !upper.is_finite() {
                return Err(ModelError::NonFiniteBounds {
                    index,
                    lower,
                    upper,
                });
            }
            let increment = var.increment();
            if !(increment > 0.0) {
                return Err(ModelError::NonPositiveIncrement { index, increment });
            }
            if !var.steps_across_bounds() {
                return Err(ModelError::IncrementBelowPrecision { index, increment });
            }
        }
        Ok(())
    }
}

impl fmt::Display for ProblemDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, objective) in self.objectives.iter().enumerate() {
            writeln!(f, "f({}): {objective}", i + 1)?;
        }
        if !self.constraints.is_empty() {
            writeln!(f, "\nSubject To:")?;
        }
        for constraint in &self.constraints {
            writeln!(f, "{constraint}")?;
        }
        writeln!(f, "\nProblem Domain:")?;
        for (i, variable) in self.variables.iter().enumerate() {
            writeln!(f, "x({}): {variable}", i + 1)?;
        }
        Ok(())
    }
}
