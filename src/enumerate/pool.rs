//! Worker pool used for fork/join enumeration and parallel evaluation.

use crate::error::SolveError;
use rayon::{ThreadPool, ThreadPoolBuilder};

/// Either rayon's global pool or a dedicated one with a fixed thread count.
pub(crate) enum WorkerPool {
    Global,
    Dedicated(ThreadPool),
}

impl WorkerPool {
    /// `None` uses the global pool, sized to the available hardware parallelism.
    pub fn new(num_threads: Option<usize>) -> Result<Self, SolveError> {
        match num_threads {
            None => Ok(WorkerPool::Global),
            Some(n) => {
                log::debug!("building dedicated worker pool with {n} threads");
                let inner = ThreadPoolBuilder::new().num_threads(n).build()?;
                Ok(WorkerPool::Dedicated(inner))
            }
        }
    }

    /// Runs `op` inside the pool; `rayon::join` calls within it use its workers.
    pub fn install<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        match self {
            WorkerPool::Global => op(),
            WorkerPool::Dedicated(pool) => pool.install(op),
        }
    }

    pub fn num_threads(&self) -> usize {
        match self {
            WorkerPool::Global => rayon::current_num_threads(),
            WorkerPool::Dedicated(pool) => pool.current_num_threads(),
        }
    }
}
