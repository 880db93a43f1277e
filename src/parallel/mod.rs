//! Parallel traversal over a fixed-size worker pool.
//!
//! [`WorkerPool`] fans a side-effecting action out across rayon worker
//! threads. The only contract exposed is:
//!
//! - every element is delivered to the action exactly once
//! - there is no ordering between invocations
//! - the call blocks until every worker has finished
//!
//! The action may run on several threads at once and the pool does not
//! serialize calls to it. If the action mutates shared state, synchronizing
//! that state is the caller's responsibility.
//!
//! # Global Pool
//!
//! [`WorkerPool::global`] is built on first use from
//! [`ParallelConfig::from_env`] and lives for the rest of the process.
//!
//! # Examples
//!
//! ```rust
//! use lazyseq::sequence::LazySequence;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! let visited = AtomicUsize::new(0);
//! LazySequence::from_vec(vec!["A", "B", "C", "D"]).parallel_for_each(|_| {
//!     visited.fetch_add(1, Ordering::Relaxed);
//! });
//! assert_eq!(visited.load(Ordering::Relaxed), 4);
//! ```

mod config;

pub use config::{ConfigError, ParallelConfig, THREAD_PREFIX_KEY, WORKERS_KEY};

use std::error::Error;
use std::fmt;
use std::sync::{Arc, OnceLock};

use rayon::prelude::*;

use crate::collector::ToOrderedCollection;
use crate::sequence::LazySequence;

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when building a [`WorkerPool`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// The worker count was set to zero.
    ///
    /// A pool must have at least one worker.
    InvalidCapacity,

    /// The underlying thread pool could not be started.
    BuildFailed(String),
}

impl fmt::Display for PoolError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCapacity => {
                write!(formatter, "worker count must be greater than 0")
            }
            Self::BuildFailed(reason) => {
                write!(formatter, "failed to start worker pool: {reason}")
            }
        }
    }
}

impl Error for PoolError {}

// =============================================================================
// WorkerPool
// =============================================================================

static GLOBAL_POOL: OnceLock<WorkerPool> = OnceLock::new();

#[derive(Clone)]
enum PoolHandle {
    /// A pool owned by this crate.
    Dedicated(Arc<rayon::ThreadPool>),
    /// rayon's implicit global pool.
    Implicit,
}

/// A fixed-size pool of worker threads for parallel traversal.
///
/// Cloning a `WorkerPool` shares the same threads.
///
/// # Examples
///
/// ```rust
/// use lazyseq::parallel::{ParallelConfig, WorkerPool};
/// use std::sync::Mutex;
///
/// let pool = WorkerPool::with_config(&ParallelConfig::default().with_workers(2)).unwrap();
/// assert_eq!(pool.workers(), 2);
///
/// let seen = Mutex::new(Vec::new());
/// pool.for_each(vec![3, 1, 2], |value| seen.lock().unwrap().push(value));
///
/// let mut seen = seen.into_inner().unwrap();
/// seen.sort_unstable();
/// assert_eq!(seen, vec![1, 2, 3]);
/// ```
#[derive(Clone)]
pub struct WorkerPool {
    handle: PoolHandle,
}

impl WorkerPool {
    /// Returns the process-wide pool, building it on first use.
    ///
    /// The pool is configured from the environment. An invalid environment
    /// is logged and replaced by [`ParallelConfig::default`]; if no pool can
    /// be started, traversals run on rayon's implicit global pool.
    pub fn global() -> &'static Self {
        GLOBAL_POOL.get_or_init(Self::initialize_global)
    }

    fn initialize_global() -> Self {
        let config = ParallelConfig::from_env().unwrap_or_else(|error| {
            tracing::warn!("Ignoring parallel configuration from environment: {error}");
            ParallelConfig::default()
        });

        match Self::with_config(&config) {
            Ok(pool) => {
                tracing::debug!(
                    workers = pool.workers(),
                    prefix = %config.thread_name_prefix,
                    "Global worker pool initialized"
                );
                pool
            }
            Err(error) => {
                tracing::warn!("Falling back to rayon's global pool: {error}");
                Self {
                    handle: PoolHandle::Implicit,
                }
            }
        }
    }

    /// Builds a dedicated pool from `config`.
    ///
    /// # Errors
    ///
    /// - [`PoolError::InvalidCapacity`] if `config.workers` is zero
    /// - [`PoolError::BuildFailed`] if the threads cannot be started
    pub fn with_config(config: &ParallelConfig) -> Result<Self, PoolError> {
        if config.workers == 0 {
            return Err(PoolError::InvalidCapacity);
        }

        let prefix = config.thread_name_prefix.clone();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.workers)
            .thread_name(move |index| format!("{prefix}-{index}"))
            .build()
            .map_err(|error| PoolError::BuildFailed(error.to_string()))?;

        tracing::debug!(workers = config.workers, "Worker pool built");

        Ok(Self {
            handle: PoolHandle::Dedicated(Arc::new(pool)),
        })
    }

    /// Builds a dedicated pool with `workers` threads and default naming.
    ///
    /// # Errors
    ///
    /// See [`with_config`](Self::with_config).
    pub fn with_workers(workers: usize) -> Result<Self, PoolError> {
        Self::with_config(&ParallelConfig::default().with_workers(workers))
    }

    /// Returns the number of worker threads.
    pub fn workers(&self) -> usize {
        match &self.handle {
            PoolHandle::Dedicated(pool) => pool.current_num_threads(),
            PoolHandle::Implicit => rayon::current_num_threads(),
        }
    }

    /// Invokes `action` once per item across the workers and waits for all
    /// of them to finish.
    ///
    /// Items are delivered in no particular order.
    pub fn for_each<T, A>(&self, items: Vec<T>, action: A)
    where
        T: Send,
        A: Fn(T) + Send + Sync,
    {
        tracing::trace!(
            items = items.len(),
            workers = self.workers(),
            "Starting parallel traversal"
        );

        let traverse = move || items.into_par_iter().for_each(action);
        match &self.handle {
            PoolHandle::Dedicated(pool) => pool.install(traverse),
            PoolHandle::Implicit => traverse(),
        }
    }
}

impl fmt::Debug for WorkerPool {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &self.handle {
            PoolHandle::Dedicated(_) => "dedicated",
            PoolHandle::Implicit => "implicit",
        };
        formatter
            .debug_struct("WorkerPool")
            .field("kind", &kind)
            .field("workers", &self.workers())
            .finish()
    }
}

// =============================================================================
// Parallel Traversal of Sequences
// =============================================================================

impl<'a, T: Send + 'a> LazySequence<'a, T> {
    /// Invokes `action` once per surviving element on the global pool.
    ///
    /// The pipeline is evaluated on the calling thread; the surviving
    /// elements are then delivered to `action` concurrently, in no particular
    /// order. The call returns once every invocation has finished.
    ///
    /// `action` may run on several threads at once. Shared state it mutates
    /// must be synchronized by the caller.
    pub fn parallel_for_each<A>(&self, action: A)
    where
        A: Fn(T) + Send + Sync,
    {
        self.parallel_for_each_in(WorkerPool::global(), action);
    }

    /// Like [`parallel_for_each`](Self::parallel_for_each), on `pool`.
    pub fn parallel_for_each_in<A>(&self, pool: &WorkerPool, action: A)
    where
        A: Fn(T) + Send + Sync,
    {
        pool.for_each(self.collect(ToOrderedCollection), action);
    }
}

static_assertions::assert_impl_all!(WorkerPool: Send, Sync);
