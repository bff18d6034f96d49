///----------------------------------------------------------------------------------------------------
/// The author disclaims copyright to this source code. In place of a legal notice, here is a blessing:
///     May you do good and not evil.
///     May you find forgiveness for yourself and forgive others.
///     May you share freely, never taking more than you give.
///----------------------------------------------------------------------------------------------------
use derivative::Derivative;

/// Per-stream buffer used when nothing else is configured.
pub const DEFAULT_CAPACITY: usize = 1 << 10;

/// Both emitters must be able to run at the same time, so the pool never has fewer workers.
pub const MIN_WORKERS: usize = 2;

/// Tuning for a `Comparator`.
#[derive(Derivative, Clone, Copy, PartialEq, Eq)]
#[derivative(Debug, Default)]
pub struct CompareConfig {
    /// Bound on in-flight values per emission stream.
    #[derivative(Default(value = "DEFAULT_CAPACITY"))]
    pub capacity: usize,
    /// Threads in the emitter pool.
    #[derivative(Default(value = "MIN_WORKERS"))]
    pub workers: usize,
}

impl CompareConfig {
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub(crate) fn effective_capacity(&self) -> usize {
        self.capacity.max(1)
    }

    pub(crate) fn effective_workers(&self) -> usize {
        self.workers.max(MIN_WORKERS)
    }
}
