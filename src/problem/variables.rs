//! Decision variables, their domains, and concrete assignments.

use std::fmt;
use std::ops::Index;

/// Default step used to discretize real-valued variables (1/64).
pub const DEFAULT_REAL_INCREMENT: f64 = 0.015625;

/// The kind of a decision variable, without its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VariableKind {
    Binary,
    Integer,
    Real,
}

impl fmt::Display for VariableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableKind::Binary => write!(f, "BINARY"),
            VariableKind::Integer => write!(f, "INTEGER"),
            VariableKind::Real => write!(f, "REAL"),
        }
    }
}

/// A decision variable with a finite, stepped domain.
///
/// Binary variables take `{0, 1}`. Integer and real variables take
/// `lower, lower + increment, ...` up to `upper`; integers always step by 1.
///
/// # Examples
///
/// ```
/// use u_bruteforce::problem::{Value, Variable};
///
/// let x = Variable::integer(0, 10);
/// assert_eq!(x.domain_size(), Some(11));
/// assert_eq!(x.value_at(3), Value::Integer(3));
///
/// let y = Variable::real(0.0, 1.0);
/// assert_eq!(y.domain_size(), Some(65));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Variable {
    /// A yes/no decision.
    Binary,
    /// An integer in `[lower, upper]`.
    Integer { lower: i64, upper: i64 },
    /// A real number in `[lower, upper]`, discretized by `increment`.
    Real { lower: f64, upper: f64, increment: f64 },
}

impl Variable {
    /// Creates a binary variable.
    pub fn binary() -> Self {
        Variable::Binary
    }

    /// Creates an integer variable over `[lower, upper]`.
    pub fn integer(lower: i64, upper: i64) -> Self {
        Variable::Integer { lower, upper }
    }

    /// Creates a real variable over `[lower, upper]` with the default step.
    pub fn real(lower: f64, upper: f64) -> Self {
        Variable::Real {
            lower,
            upper,
            increment: DEFAULT_REAL_INCREMENT,
        }
    }

    /// Replaces the step of a real variable. Other kinds are returned as-is.
    pub fn with_increment(self, step: f64) -> Self {
        match self {
            Variable::Real { lower, upper, .. } => Variable::Real {
                lower,
                upper,
                increment: step,
            },
            other => other,
        }
    }

    pub fn kind(&self) -> VariableKind {
        match self {
            Variable::Binary => VariableKind::Binary,
            Variable::Integer { .. } => VariableKind::Integer,
            Variable::Real { .. } => VariableKind::Real,
        }
    }

    pub fn lower_bound(&self) -> f64 {
        match *self {
            Variable::Binary => 0.0,
            Variable::Integer { lower, .. } => lower as f64,
            Variable::Real { lower, .. } => lower,
        }
    }

    pub fn upper_bound(&self) -> f64 {
        match *self {
            Variable::Binary => 1.0,
            Variable::Integer { upper, .. } => upper as f64,
            Variable::Real { upper, .. } => upper,
        }
    }

    pub fn increment(&self) -> f64 {
        match *self {
            Variable::Binary | Variable::Integer { .. } => 1.0,
            Variable::Real { increment, .. } => increment,
        }
    }

    /// Number of points in the domain.
    ///
    /// `floor((upper - lower) / increment) + 1`, or 2 for binary variables.
    /// An inverted domain has size 0. `None` when the count does not fit in
    /// `usize`.
    pub fn domain_size(&self) -> Option<usize> {
        match *self {
            Variable::Binary => Some(2),
            Variable::Integer { lower, upper } => {
                let width = i128::from(upper) - i128::from(lower);
                if width < 0 {
                    Some(0)
                } else {
                    usize::try_from(width + 1).ok()
                }
            }
            Variable::Real {
                lower,
                upper,
                increment,
            } => {
                if !(lower <= upper) || !(increment > 0.0) {
                    return Some(0);
                }
                let steps = ((upper - lower) / increment).floor();
                if !steps.is_finite() || steps >= usize::MAX as f64 {
                    return None;
                }
                (steps as usize).checked_add(1)
            }
        }
    }

    /// Whether adding the increment moves a value anywhere between the bounds.
    ///
    /// Far from zero a small real step is lost to rounding and an
    /// accumulating walk would never advance. Binary and integer variables
    /// always step.
    pub fn steps_across_bounds(&self) -> bool {
        match *self {
            Variable::Binary | Variable::Integer { .. } => true,
            Variable::Real {
                lower,
                upper,
                increment,
            } => {
                let widest = lower.abs().max(upper.abs());
                widest + increment != widest
            }
        }
    }

    /// Maps a zero-based domain index to its concrete value.
    pub fn value_at(&self, index: usize) -> Value {
        match *self {
            Variable::Binary => Value::Binary(index != 0),
            Variable::Integer { lower, .. } => Value::Integer(lower + index as i64),
            Variable::Real {
                lower, increment, ..
            } => Value::Real(lower + index as f64 * increment),
        }
    }

    /// Converts a raw walked double into this variable's value type.
    pub fn value_from_raw(&self, raw: f64) -> Value {
        match self {
            Variable::Binary => Value::Binary(raw != 0.0),
            Variable::Integer { .. } => Value::Integer(raw as i64),
            Variable::Real { .. } => Value::Real(raw),
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variable::Binary => write!(f, "Binary Variable"),
            Variable::Integer { lower, upper } => {
                write!(f, "Integer ({lower} <= x <= {upper})")
            }
            Variable::Real { lower, upper, .. } => {
                write!(f, "Real ({lower:.2} <= x <= {upper:.2})")
            }
        }
    }
}

/// One concrete decision value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    Binary(bool),
    Integer(i64),
    Real(f64),
}

impl Value {
    /// The double bound to this value in expressions (booleans become 1.0/0.0).
    pub fn decode(self) -> f64 {
        match self {
            Value::Binary(b) => {
                if b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::Integer(i) => i as f64,
            Value::Real(r) => r,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Binary(b) => write!(f, "{}", u8::from(*b)),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Real(r) => write!(f, "{r}"),
        }
    }
}

/// A full candidate: one value per variable, index-aligned with the problem.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    values: Vec<Value>,
}

impl Assignment {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// All values converted to doubles, as bound in expressions.
    pub fn decoded(&self) -> Vec<f64> {
        self.values.iter().map(|v| v.decode()).collect()
    }

    /// Bit string for binary assignments, e.g. `"011"`.
    ///
    /// Non-binary values render through their `Display` form.
    pub fn to_bit_string(&self) -> String {
        self.values.iter().map(|v| v.to_string()).collect()
    }
}

impl Index<usize> for Assignment {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        &self.values[index]
    }
}

impl From<Vec<Value>> for Assignment {
    fn from(values: Vec<Value>) -> Self {
        Self::new(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_domain() {
        let v = Variable::binary();
        assert_eq!(v.kind(), VariableKind::Binary);
        assert_eq!(v.domain_size(), Some(2));
        assert_eq!(v.value_at(0), Value::Binary(false));
        assert_eq!(v.value_at(1), Value::Binary(true));
    }

    #[test]
    fn test_integer_domain() {
        let v = Variable::integer(0, 1);
        assert_eq!(v.domain_size(), Some(2));

        let v = Variable::integer(-3, 4);
        assert_eq!(v.domain_size(), Some(8));
        assert_eq!(v.value_at(0), Value::Integer(-3));
        assert_eq!(v.value_at(7), Value::Integer(4));
        assert!((v.increment() - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_real_domain_default_step() {
        let v = Variable::real(0.0, 1.0);
        assert_eq!(v.domain_size(), Some(65));
        assert_eq!(v.value_at(64), Value::Real(1.0));
        assert!((v.increment() - 1.0 / 64.0).abs() < 1e-15);
    }

    #[test]
    fn test_real_custom_increment() {
        let v = Variable::real(0.0, 1.0).with_increment(0.25);
        assert_eq!(v.domain_size(), Some(5));
        assert_eq!(v.value_at(2), Value::Real(0.5));

        // Non-real kinds ignore the step.
        assert_eq!(Variable::integer(0, 3).with_increment(0.5), Variable::integer(0, 3));
    }

    #[test]
    fn test_inverted_domain_is_empty() {
        assert_eq!(Variable::integer(5, 1).domain_size(), Some(0));
        assert_eq!(Variable::real(1.0, 0.0).domain_size(), Some(0));
    }

    #[test]
    fn test_oversized_domains_have_no_size() {
        assert_eq!(Variable::integer(i64::MIN, i64::MAX).domain_size(), None);
        assert_eq!(Variable::real(0.0, 1e18).domain_size(), None);
        assert_eq!(Variable::real(0.0, f64::INFINITY).domain_size(), None);
        assert_eq!(
            Variable::integer(i64::MIN, 0).domain_size(),
            usize::try_from(1u128 << 63).ok().map(|n| n + 1)
        );
    }

    #[test]
    fn test_decode() {
        assert_eq!(Value::Binary(true).decode(), 1.0);
        assert_eq!(Value::Binary(false).decode(), 0.0);
        assert_eq!(Value::Integer(-7).decode(), -7.0);
        assert_eq!(Value::Real(0.125).decode(), 0.125);
    }

    #[test]
    fn test_value_from_raw() {
        assert_eq!(Variable::binary().value_from_raw(1.0), Value::Binary(true));
        assert_eq!(Variable::integer(0, 9).value_from_raw(4.0), Value::Integer(4));
        assert_eq!(Variable::real(0.0, 1.0).value_from_raw(0.5), Value::Real(0.5));
    }

    #[test]
    fn test_display() {
        assert_eq!(Variable::binary().to_string(), "Binary Variable");
        assert_eq!(Variable::integer(0, 10).to_string(), "Integer (0 <= x <= 10)");
        assert_eq!(Variable::real(0.0, 1.5).to_string(), "Real (0.00 <= x <= 1.50)");
    }

    #[test]
    fn test_assignment_bit_string() {
        let a = Assignment::new(vec![
            Value::Binary(false),
            Value::Binary(true),
            Value::Binary(true),
        ]);
        assert_eq!(a.len(), 3);
        assert_eq!(a.to_bit_string(), "011");
        assert_eq!(a[1], Value::Binary(true));
        assert_eq!(a.decoded(), vec![0.0, 1.0, 1.0]);
    }
}
