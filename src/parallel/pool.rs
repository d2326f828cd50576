//! Rayon thread pool configuration for batch simulation workloads.
//!
//! Grid sweeps evaluate hundreds of parameter combinations; [WorkerPool::install]
//! runs them on a fixed number of threads, or on Rayon's default pool (all
//! CPU cores) when unconfigured.

use rayon::ThreadPoolBuilder;

#[derive(Debug, Clone, Copy, Default)]
pub struct WorkerPool {
    /// Number of worker threads. 0 means the Rayon default (num_cpus).
    pub workers: usize,
}

impl WorkerPool {
    pub fn with_workers(n: usize) -> Self {
        Self { workers: n }
    }

    /// Run `f` on a pool with this worker count. With `workers == 0` the
    /// closure runs on the global Rayon pool; otherwise a temporary pool of
    /// exactly that many threads is built for the call.
    pub fn install<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        if self.workers == 0 {
            f()
        } else {
            let pool = ThreadPoolBuilder::new()
                .num_threads(self.workers)
                .build()
                .expect("Rayon thread pool");
            pool.install(f)
        }
    }
}
