//! Depth-first cartesian product over mixed variable domains.

use crate::error::{ModelError, SolveError};
use crate::problem::{Assignment, Value, Variable};

/// Enumerates the cartesian product of every variable's discretized domain.
///
/// Variable 0 is the outermost loop. Binary and integer levels step through
/// their values exactly. Real levels walk with an accumulating step
/// (`v = lower; v <= upper; v += increment`), so increments that are not
/// exact binary fractions may gain or lose an endpoint to rounding; a step
/// too small to change `v` is reported as an invalid problem.
#[derive(Debug, Clone)]
pub struct MixedEnumerator<'a> {
    variables: &'a [Variable],
}

impl<'a> MixedEnumerator<'a> {
    pub fn new(variables: &'a [Variable]) -> Self {
        Self { variables }
    }

    /// Product of the domain sizes, or `ResourceExhausted` on overflow.
    pub fn candidate_count(&self) -> Result<usize, SolveError> {
        super::candidate_count(self.variables)
    }

    pub fn enumerate(&self) -> Result<Vec<Assignment>, SolveError> {
        let expected = self.candidate_count()?;
        log::debug!(
            "mixed enumeration of {} variables: {} candidates",
            self.variables.len(),
            expected
        );

        let mut out = Vec::new();
        out.try_reserve_exact(expected)
            .map_err(|_| SolveError::ResourceExhausted {
                candidates: expected,
            })?;
        let mut current = Vec::with_capacity(self.variables.len());
        self.walk(0, &mut current, &mut out)?;
        Ok(out)
    }

    fn walk(
        &self,
        depth: usize,
        current: &mut Vec<Value>,
        out: &mut Vec<Assignment>,
    ) -> Result<(), SolveError> {
        let Some(variable) = self.variables.get(depth) else {
            out.push(Assignment::new(current.clone()));
            return Ok(());
        };

        match *variable {
            Variable::Binary => {
                for bit in [false, true] {
                    self.visit(depth, Value::Binary(bit), current, out)?;
                }
            }
            Variable::Integer { lower, upper } => {
                for v in lower..=upper {
                    self.visit(depth, Value::Integer(v), current, out)?;
                }
            }
            Variable::Real {
                lower,
                upper,
                increment,
            } => {
                if !(increment > 0.0) {
                    return Ok(());
                }
                let mut raw = lower;
                while raw <= upper {
                    self.visit(depth, variable.value_from_raw(raw), current, out)?;
                    let next = raw + increment;
                    if next == raw {
                        return Err(ModelError::IncrementBelowPrecision {
                            index: depth,
                            increment,
                        }
                        .into());
                    }
                    raw = next;
                }
            }
        }
        Ok(())
    }

    fn visit(
        &self,
        depth: usize,
        value: Value,
        current: &mut Vec<Value>,
        out: &mut Vec<Assignment>,
    ) -> Result<(), SolveError> {
        current.push(value);
        let result = self.walk(depth + 1, current, out);
        current.pop();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // ---- Counts ----

    #[test]
    fn test_integer_zero_one() {
        let vars = [Variable::integer(0, 1)];
        let all = MixedEnumerator::new(&vars).enumerate().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0][0], Value::Integer(0));
        assert_eq!(all[1][0], Value::Integer(1));
    }

    #[test]
    fn test_real_unit_interval_default_step() {
        let vars = [Variable::real(0.0, 1.0)];
        let all = MixedEnumerator::new(&vars).enumerate().unwrap();
        assert_eq!(all.len(), 65);
        assert_eq!(all[0][0], Value::Real(0.0));
        assert_eq!(all[64][0], Value::Real(1.0));
    }

    #[test]
    fn test_product_of_domain_sizes() {
        let vars = [
            Variable::binary(),
            Variable::integer(-2, 2),
            Variable::real(0.0, 1.0).with_increment(0.25),
        ];
        let e = MixedEnumerator::new(&vars);
        assert_eq!(e.candidate_count().unwrap(), 2 * 5 * 5);
        assert_eq!(e.enumerate().unwrap().len(), 50);
    }

    #[test]
    fn test_inverted_domain_is_empty() {
        let vars = [Variable::binary(), Variable::integer(3, 1)];
        let e = MixedEnumerator::new(&vars);
        assert_eq!(e.candidate_count().unwrap(), 0);
        assert!(e.enumerate().unwrap().is_empty());
    }

    #[test]
    fn test_oversized_domain_is_resource_exhaustion() {
        for vars in [
            [Variable::real(0.0, 1e18)],
            [Variable::integer(i64::MIN, i64::MAX)],
        ] {
            assert!(matches!(
                MixedEnumerator::new(&vars).enumerate(),
                Err(SolveError::ResourceExhausted { .. })
            ));
        }
    }

    #[test]
    fn test_stalled_real_walk_fails() {
        let vars = [
            Variable::binary(),
            Variable::real(1e20, 1e20).with_increment(1.0),
        ];
        assert!(matches!(
            MixedEnumerator::new(&vars).enumerate(),
            Err(SolveError::InvalidProblem(ModelError::IncrementBelowPrecision {
                index: 1,
                ..
            }))
        ));
    }

    #[test]
    fn test_integer_walk_is_exact_far_from_zero() {
        let lower = (1i64 << 60) + 1;
        let vars = [Variable::integer(lower, lower + 2)];
        let all = MixedEnumerator::new(&vars).enumerate().unwrap();
        let values: Vec<Value> = all.iter().map(|a| a[0]).collect();
        assert_eq!(
            values,
            vec![
                Value::Integer(lower),
                Value::Integer(lower + 1),
                Value::Integer(lower + 2)
            ]
        );
    }

    // ---- Order ----

    #[test]
    fn test_first_variable_is_outermost() {
        let vars = [Variable::integer(1, 2), Variable::binary()];
        let all = MixedEnumerator::new(&vars).enumerate().unwrap();
        let decoded: Vec<Vec<f64>> = all.iter().map(Assignment::decoded).collect();
        assert_eq!(
            decoded,
            vec![
                vec![1.0, 0.0],
                vec![1.0, 1.0],
                vec![2.0, 0.0],
                vec![2.0, 1.0]
            ]
        );
    }

    #[test]
    fn test_value_types_follow_variable_kind() {
        let vars = [
            Variable::binary(),
            Variable::integer(5, 5),
            Variable::real(0.5, 0.5),
        ];
        let all = MixedEnumerator::new(&vars).enumerate().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1][0], Value::Binary(true));
        assert_eq!(all[1][1], Value::Integer(5));
        assert_eq!(all[1][2], Value::Real(0.5));
    }

    #[test]
    fn test_accumulating_real_walk() {
        let vars = [Variable::real(0.0, 1.0).with_increment(0.1)];
        let all = MixedEnumerator::new(&vars).enumerate().unwrap();
        // The last point is 0.9999999999999999, not 1.0.
        assert_eq!(all.len(), 11);
        assert_relative_eq!(all[3][0].decode(), 0.3, epsilon = 1e-12);
    }
}
