//! # lazyseq
//!
//! Optional values and lazily evaluated, replayable sequence pipelines.
//!
//! ## Overview
//!
//! - **Optional Value**: [`OptionalValue<T>`](optional::OptionalValue), a
//!   container holding exactly one value or nothing, with fallbacks and
//!   conditional actions
//! - **Lazy Sequence**: [`LazySequence<'a, T>`](sequence::LazySequence), an
//!   immutable pipeline of `filter`, `map`, `distinct`, `limit` and `skip`
//!   stages evaluated only by a terminal operation
//! - **Collectors**: ordered and unique materialization of a pipeline
//! - **Parallel Traversal**: fan a side-effecting action out over a worker
//!   pool (feature `parallel`)
//!
//! ## Feature Flags
//!
//! - `parallel` (default): [`parallel`] module, backed by rayon
//! - `serde`: `Serialize`/`Deserialize` for `OptionalValue` and
//!   `UniqueCollection`
//! - `fxhash`: use `FxHash` for `distinct` and unique collection bookkeeping
//! - `ahash`: use `AHash` for the same, when `fxhash` is off
//! - `full`: `parallel` and `serde`
//!
//! ## Example
//!
//! ```rust
//! use lazyseq::prelude::*;
//!
//! let words = LazySequence::from_vec(vec!["apple", "kiwi", "fig", "apple", "plum"]);
//!
//! let short: Vec<usize> = words
//!     .distinct()
//!     .filter(|word| word.len() <= 4)
//!     .map(str::len)
//!     .collect(ToOrderedCollection);
//! assert_eq!(short, vec![4, 3, 4]);
//!
//! let longest = words.filter(|word| word.len() > 4).find_first();
//! assert_eq!(longest.or_else("none"), "apple");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use lazyseq::prelude::*;
/// ```
pub mod prelude {
    pub use crate::collector::{Collector, ToOrderedCollection, ToUniqueCollection, UniqueCollection};
    pub use crate::error::LazySeqError;
    pub use crate::optional::OptionalValue;
    pub use crate::sequence::{LazySequence, StageKind};

    #[cfg(feature = "parallel")]
    pub use crate::parallel::{ParallelConfig, WorkerPool};
}

pub mod collector;
pub mod error;
pub mod optional;
pub mod sequence;

#[cfg(feature = "parallel")]
pub mod parallel;
