//! Fork/join enumeration of all-binary decision spaces.

use super::pool::WorkerPool;
use crate::error::SolveError;
use crate::problem::{Assignment, Value};

/// Ranges shorter than this are materialized directly instead of split.
pub const DEFAULT_SPLIT_THRESHOLD: u64 = 65_536;

/// Enumerates every assignment of `n` binary variables.
///
/// The candidate space is the integer range `[0, 2^n)`. Integer `i` sets
/// variable `j` to bit `n-1-j` of `i`, so variable 0 is the most significant
/// bit and the output is in ascending-integer order:
///
/// ```
/// use u_bruteforce::enumerate::BinaryEnumerator;
///
/// let all = BinaryEnumerator::new(3).enumerate().unwrap();
/// let bits: Vec<String> = all.iter().map(|a| a.to_bit_string()).collect();
/// assert_eq!(bits, ["000", "001", "010", "011", "100", "101", "110", "111"]);
/// ```
///
/// Ranges of at least `threshold` integers are split in half; with
/// parallelism enabled the halves run concurrently via `rayon::join`. The
/// left half is always concatenated before the right, so the order does not
/// depend on the number of workers or on which worker ran which half.
#[derive(Debug, Clone)]
pub struct BinaryEnumerator {
    num_variables: usize,
    threshold: u64,
    parallel: bool,
}

impl BinaryEnumerator {
    pub fn new(num_variables: usize) -> Self {
        Self {
            num_variables,
            threshold: DEFAULT_SPLIT_THRESHOLD,
            parallel: true,
        }
    }

    /// Sets the split threshold. Values below 2 are raised to 2.
    pub fn with_threshold(mut self, threshold: u64) -> Self {
        self.threshold = threshold.max(2);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Total number of candidates, `2^n`.
    pub fn candidate_count(&self) -> u64 {
        1u64 << self.num_variables
    }

    /// Enumerates on rayon's global pool.
    pub fn enumerate(&self) -> Result<Vec<Assignment>, SolveError> {
        self.enumerate_in(&WorkerPool::Global)
    }

    pub(crate) fn enumerate_in(&self, pool: &WorkerPool) -> Result<Vec<Assignment>, SolveError> {
        if self.num_variables >= u64::BITS as usize - 1 {
            return Err(SolveError::ResourceExhausted {
                candidates: usize::MAX,
            });
        }
        let total = self.candidate_count();
        log::debug!(
            "binary enumeration of {} variables: {} candidates, split threshold {}",
            self.num_variables,
            total,
            self.threshold
        );
        pool.install(|| self.range(0, total))
    }

    /// Produces `[start, start + length)` in ascending order.
    fn range(&self, start: u64, length: u64) -> Result<Vec<Assignment>, SolveError> {
        if length < self.threshold {
            return self.materialize(start, length);
        }

        let half = length / 2;
        let (left, right) = if self.parallel {
            rayon::join(
                || self.range(start, half),
                || self.range(start + half, length - half),
            )
        } else {
            (
                self.range(start, half),
                self.range(start + half, length - half),
            )
        };

        let mut left = left?;
        let right = right?;
        left.try_reserve_exact(right.len())
            .map_err(|_| self.exhausted())?;
        left.extend(right);
        Ok(left)
    }

    fn materialize(&self, start: u64, length: u64) -> Result<Vec<Assignment>, SolveError> {
        let mut out = Vec::new();
        out.try_reserve_exact(length as usize)
            .map_err(|_| self.exhausted())?;
        out.extend((start..start + length).map(|i| self.decode(i)));
        Ok(out)
    }

    /// Bit vector of `i`, most significant bit first.
    fn decode(&self, i: u64) -> Assignment {
        let n = self.num_variables;
        let values = (0..n)
            .map(|j| Value::Binary((i >> (n - 1 - j)) & 1 == 1))
            .collect();
        Assignment::new(values)
    }

    fn exhausted(&self) -> SolveError {
        SolveError::ResourceExhausted {
            candidates: usize::try_from(self.candidate_count()).unwrap_or(usize::MAX),
        }
    }
}
