//! Rayon thread pool configuration for parallel squad hydration.
//!
//! Hydration is read-only against the built indexes, so pilots can be
//! hydrated concurrently; [WorkerPool::install] pins the thread count when
//! the default (all cores) is not wanted.

use rayon::ThreadPoolBuilder;

/// How many worker threads parallel hydration uses.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkerPool {
    /// Number of worker threads. 0 means the rayon default (all cores).
    pub workers: usize,
}

impl WorkerPool {
    /// Use exactly `n` worker threads.
    pub fn with_workers(n: usize) -> Self {
        WorkerPool { workers: n }
    }

    /// Run a closure on a pool with this worker count. With `workers == 0`
    /// the global rayon pool is used; otherwise a temporary pool is built.
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
                .expect("rayon thread pool");
            pool.install(f)
        }
    }
}
