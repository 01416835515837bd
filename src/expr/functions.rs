//! Built-in functions and constants of the expression language.

use super::context::EvalContext;
use super::error::ExpressionError;

/// Named constants, resolved before variable bindings.
pub(crate) fn constant(name: &str) -> Option<f64> {
    match name {
        "e" => Some(std::f64::consts::E),
        "pi" => Some(std::f64::consts::PI),
        _ => None,
    }
}

/// How many arguments a function accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Arity {
    Exactly(usize),
    AtLeastOne,
}

/// A built-in function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Abs,
    Ceil,
    Floor,
    Round,
    Max,
    Min,
    Sum,
    Avg,
    Random,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Ln,
    Log10,
    Sqrt,
    Cbrt,
}

impl Function {
    /// Looks a function up by name. `log` is an alias of `log10`.
    pub fn from_name(name: &str) -> Option<Self> {
        let function = match name {
            "abs" => Function::Abs,
            "ceil" => Function::Ceil,
            "floor" => Function::Floor,
            "round" => Function::Round,
            "max" => Function::Max,
            "min" => Function::Min,
            "sum" => Function::Sum,
            "avg" => Function::Avg,
            "random" => Function::Random,
            "sin" => Function::Sin,
            "cos" => Function::Cos,
            "tan" => Function::Tan,
            "asin" => Function::Asin,
            "acos" => Function::Acos,
            "atan" => Function::Atan,
            "sinh" => Function::Sinh,
            "cosh" => Function::Cosh,
            "tanh" => Function::Tanh,
            "ln" => Function::Ln,
            "log" | "log10" => Function::Log10,
            "sqrt" => Function::Sqrt,
            "cbrt" => Function::Cbrt,
            _ => return None,
        };
        Some(function)
    }

    pub fn name(self) -> &'static str {
        match self {
            Function::Abs => "abs",
            Function::Ceil => "ceil",
            Function::Floor => "floor",
            Function::Round => "round",
            Function::Max => "max",
            Function::Min => "min",
            Function::Sum => "sum",
            Function::Avg => "avg",
            Function::Random => "random",
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Asin => "asin",
            Function::Acos => "acos",
            Function::Atan => "atan",
            Function::Sinh => "sinh",
            Function::Cosh => "cosh",
            Function::Tanh => "tanh",
            Function::Ln => "ln",
            Function::Log10 => "log10",
            Function::Sqrt => "sqrt",
            Function::Cbrt => "cbrt",
        }
    }

    fn arity(self) -> Arity {
        match self {
            Function::Random => Arity::Exactly(0),
            Function::Max | Function::Min | Function::Sum | Function::Avg => Arity::AtLeastOne,
            _ => Arity::Exactly(1),
        }
    }

    /// Checks an argument count against this function's arity.
    pub(crate) fn check_arity(self, found: usize) -> Result<(), ExpressionError> {
        let ok = match self.arity() {
            Arity::Exactly(n) => found == n,
            Arity::AtLeastOne => found >= 1,
        };
        if ok {
            return Ok(());
        }
        let expected = match self.arity() {
            Arity::Exactly(0) => "no",
            Arity::Exactly(_) => "exactly one",
            Arity::AtLeastOne => "at least one",
        };
        Err(ExpressionError::Arity {
            function: self.name(),
            expected,
            found,
        })
    }

    /// Applies the function. Arity has already been checked at parse time.
    pub(crate) fn apply(self, args: &[f64], ctx: &mut EvalContext) -> f64 {
        let first = args.first().copied().unwrap_or(f64::NAN);
        match self {
            Function::Abs => first.abs(),
            Function::Ceil => first.ceil(),
            Function::Floor => first.floor(),
            // Half-up rounding: round(-2.5) == -2.
            Function::Round => (first + 0.5).floor(),
            Function::Max => fold_propagating_nan(args, f64::NEG_INFINITY, f64::max),
            Function::Min => fold_propagating_nan(args, f64::INFINITY, f64::min),
            Function::Sum => args.iter().sum(),
            Function::Avg => args.iter().sum::<f64>() / args.len() as f64,
            Function::Random => ctx.next_random(),
            Function::Sin => first.sin(),
            Function::Cos => first.cos(),
            Function::Tan => first.tan(),
            Function::Asin => first.asin(),
            Function::Acos => first.acos(),
            Function::Atan => first.atan(),
            Function::Sinh => first.sinh(),
            Function::Cosh => first.cosh(),
            Function::Tanh => first.tanh(),
            Function::Ln => first.ln(),
            Function::Log10 => first.log10(),
            Function::Sqrt => first.sqrt(),
            Function::Cbrt => first.cbrt(),
        }
    }
}

/// Folds `args` with `op`, returning NaN if any argument is NaN.
///
/// `f64::max` / `f64::min` alone would skip a NaN operand.
fn fold_propagating_nan(args: &[f64], init: f64, op: fn(f64, f64) -> f64) -> f64 {
    if args.iter().any(|v| v.is_nan()) {
        return f64::NAN;
    }
    args.iter().copied().fold(init, op)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_lookup_and_alias() {
        assert_eq!(Function::from_name("sqrt"), Some(Function::Sqrt));
        assert_eq!(Function::from_name("log"), Some(Function::Log10));
        assert_eq!(Function::from_name("log10"), Some(Function::Log10));
        assert_eq!(Function::from_name("bogus"), None);
    }

    #[test]
    fn test_names_round_trip() {
        for f in [Function::Abs, Function::Avg, Function::Random, Function::Cbrt] {
            assert_eq!(Function::from_name(f.name()), Some(f));
        }
    }

    #[test]
    fn test_arity() {
        assert!(Function::Random.check_arity(0).is_ok());
        assert!(Function::Random.check_arity(1).is_err());
        assert!(Function::Sqrt.check_arity(1).is_ok());
        assert!(Function::Sqrt.check_arity(2).is_err());
        assert!(Function::Max.check_arity(3).is_ok());
        assert!(Function::Max.check_arity(0).is_err());
    }

    #[test]
    fn test_variadic_functions() {
        let mut ctx = EvalContext::seeded(1);
        let args = [3.0, -1.0, 4.0];
        assert_eq!(Function::Max.apply(&args, &mut ctx), 4.0);
        assert_eq!(Function::Min.apply(&args, &mut ctx), -1.0);
        assert_eq!(Function::Sum.apply(&args, &mut ctx), 6.0);
        assert_eq!(Function::Avg.apply(&args, &mut ctx), 2.0);
    }

    #[test]
    fn test_max_min_propagate_nan() {
        let mut ctx = EvalContext::seeded(1);
        assert!(Function::Max.apply(&[f64::NAN, 1.0], &mut ctx).is_nan());
        assert!(Function::Max.apply(&[1.0, f64::NAN], &mut ctx).is_nan());
        assert!(Function::Min.apply(&[2.0, f64::NAN, -3.0], &mut ctx).is_nan());
        assert_eq!(Function::Max.apply(&[f64::INFINITY, 1.0], &mut ctx), f64::INFINITY);
    }

    #[test]
    fn test_round_half_up() {
        let mut ctx = EvalContext::seeded(1);
        assert_eq!(Function::Round.apply(&[2.5], &mut ctx), 3.0);
        assert_eq!(Function::Round.apply(&[-2.5], &mut ctx), -2.0);
        assert_eq!(Function::Round.apply(&[1.2], &mut ctx), 1.0);
    }

    #[test]
    fn test_roots_and_logs() {
        let mut ctx = EvalContext::seeded(1);
        assert_relative_eq!(Function::Sqrt.apply(&[16.0], &mut ctx), 4.0);
        assert_relative_eq!(Function::Cbrt.apply(&[27.0], &mut ctx), 3.0);
        assert_relative_eq!(Function::Log10.apply(&[1000.0], &mut ctx), 3.0);
        assert_relative_eq!(Function::Ln.apply(&[std::f64::consts::E], &mut ctx), 1.0);
        assert!(Function::Sqrt.apply(&[-1.0], &mut ctx).is_nan());
    }

    #[test]
    fn test_random_in_unit_interval() {
        let mut ctx = EvalContext::seeded(7);
        for _ in 0..100 {
            let r = Function::Random.apply(&[], &mut ctx);
            assert!((0.0..1.0).contains(&r));
        }
    }

    #[test]
    fn test_constants() {
        assert_eq!(constant("pi"), Some(std::f64::consts::PI));
        assert_eq!(constant("e"), Some(std::f64::consts::E));
        assert_eq!(constant("x1"), None);
    }
}
