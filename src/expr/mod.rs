//! Expression language for objectives and constraints.
//!
//! Expressions are arithmetic over the bound decision variables `x1..xn`:
//!
//! - Operators: `+ - * / ^ %` and unary minus. `^` binds tightest, then
//!   unary minus, then `* / %`, then `+ -`. Every binary operator is
//!   left-associative, so `-2^2 == -4` and `2^3^2 == 64`.
//! - Functions: `abs ceil floor round sin cos tan asin acos atan sinh cosh
//!   tanh ln log log10 sqrt cbrt`, variadic `max min sum avg`, and `random()`.
//! - Constants: `e`, `pi`.
//! - Brackets: `( )` and `[ ]`.
//!
//! Arithmetic is plain IEEE-754: `1/0` is `+inf`, not an error.
//!
//! # Entry points
//!
//! - [`ExpressionEvaluator::evaluate`]: hot-path evaluation, never fails,
//!   returns `NaN` for anything it cannot evaluate
//! - [`check_expression`] / [`diagnose`]: authoring-time validation with a
//!   human-readable message
//! - [`Expression`]: parse once, evaluate many times

mod context;
mod error;
mod functions;
mod lexer;
mod parser;

pub use context::EvalContext;
pub use error::ExpressionError;
pub use functions::Function;
pub use parser::{Expression, MAX_DEPTH};

use std::collections::HashMap;

/// Message returned by [`diagnose`] for a well-formed expression.
pub const VALID_EXPRESSION: &str = "Valid Expression";

/// Evaluates expression text with an owned [`EvalContext`].
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use u_bruteforce::expr::ExpressionEvaluator;
///
/// let mut evaluator = ExpressionEvaluator::seeded(42);
/// let bindings = HashMap::from([("x1".to_string(), 1.0)]);
///
/// assert_eq!(evaluator.evaluate("2+2", &HashMap::new()), 4.0);
/// assert_eq!(evaluator.evaluate("x1/0", &bindings), f64::INFINITY);
/// assert!(evaluator.evaluate("bogus(", &HashMap::new()).is_nan());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExpressionEvaluator {
    context: EvalContext,
}

impl ExpressionEvaluator {
    /// Creates an evaluator whose `random()` is seeded from the OS.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an evaluator with a reproducible `random()` sequence.
    pub fn seeded(seed: u64) -> Self {
        Self::with_context(EvalContext::seeded(seed))
    }

    pub fn with_context(context: EvalContext) -> Self {
        Self { context }
    }

    /// Evaluates `expression`, returning `NaN` on any failure.
    pub fn evaluate(&mut self, expression: &str, bindings: &HashMap<String, f64>) -> f64 {
        self.try_evaluate(expression, bindings)
            .unwrap_or(f64::NAN)
    }

    /// Evaluates `expression`, reporting why it failed.
    pub fn try_evaluate(
        &mut self,
        expression: &str,
        bindings: &HashMap<String, f64>,
    ) -> Result<f64, ExpressionError> {
        Expression::parse(expression)?.eval(&mut self.context, bindings)
    }

    pub fn context_mut(&mut self) -> &mut EvalContext {
        &mut self.context
    }
}

/// Validates an expression against a set of variable names.
///
/// Each bound name is given a dummy value of 1.0, so unknown identifiers are
/// reported as errors along with syntax problems.
pub fn check_expression<S: AsRef<str>>(
    expression: &str,
    variables: &[S],
) -> Result<(), ExpressionError> {
    let bindings: HashMap<String, f64> = variables
        .iter()
        .map(|name| (name.as_ref().to_string(), 1.0))
        .collect();
    Expression::parse(expression)?.eval(&mut EvalContext::seeded(0), &bindings)?;
    Ok(())
}

/// Like [`check_expression`], rendered as a message for authoring tools:
/// [`VALID_EXPRESSION`] or `"Error: <reason>"`.
pub fn diagnose<S: AsRef<str>>(expression: &str, variables: &[S]) -> String {
    match check_expression(expression, variables) {
        Ok(()) => VALID_EXPRESSION.to_string(),
        Err(e) => format!("Error: {e}"),
    }
}

/// Binding name of the variable at `index` (zero-based): `x1`, `x2`, ...
pub fn variable_name(index: usize) -> String {
    format!("x{}", index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_examples() {
        let mut ev = ExpressionEvaluator::seeded(1);
        assert_eq!(ev.evaluate("2+2", &HashMap::new()), 4.0);

        let bindings = HashMap::from([("x1".to_string(), 1.0)]);
        assert_eq!(ev.evaluate("x1/0", &bindings), f64::INFINITY);
    }

    #[test]
    fn test_evaluate_failures_are_nan() {
        let mut ev = ExpressionEvaluator::seeded(1);
        let empty = HashMap::new();
        assert!(ev.evaluate("bogus(", &empty).is_nan());
        assert!(ev.evaluate("x1 + 1", &empty).is_nan());
        assert!(ev.evaluate("nosuch(1)", &empty).is_nan());
        assert!(ev.evaluate("", &empty).is_nan());
        assert!(ev.evaluate("(1", &empty).is_nan());

        let deep = format!("{}1{}", "(".repeat(100_000), ")".repeat(100_000));
        assert!(ev.evaluate(&deep, &empty).is_nan());
    }

    #[test]
    fn test_try_evaluate_reports_reason() {
        let mut ev = ExpressionEvaluator::seeded(1);
        assert_eq!(
            ev.try_evaluate("y + 1", &HashMap::new()),
            Err(ExpressionError::UnknownIdentifier("y".into()))
        );
    }

    #[test]
    fn test_seeded_random_is_reproducible() {
        let empty = HashMap::new();
        let a = ExpressionEvaluator::seeded(5).evaluate("random() * 10", &empty);
        let b = ExpressionEvaluator::seeded(5).evaluate("random() * 10", &empty);
        assert_eq!(a, b);
    }

    #[test]
    fn test_check_expression() {
        let vars = ["x1", "x2"];
        assert!(check_expression("x1 + x2", &vars).is_ok());
        assert_eq!(
            check_expression("x3", &vars),
            Err(ExpressionError::UnknownIdentifier("x3".into()))
        );
        assert!(check_expression("x1 +", &vars).is_err());
    }

    #[test]
    fn test_diagnose_messages() {
        let vars = ["x1"];
        assert_eq!(diagnose("x1 * 2", &vars), VALID_EXPRESSION);
        assert_eq!(
            diagnose("foo(x1)", &vars),
            "Error: unknown function 'foo'"
        );
        assert_eq!(
            diagnose("x2", &vars),
            "Error: unknown variable or constant 'x2'"
        );
    }

    #[test]
    fn test_variable_name() {
        assert_eq!(variable_name(0), "x1");
        assert_eq!(variable_name(9), "x10");
    }
}
