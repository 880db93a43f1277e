//! Lazily evaluated, replayable sequence pipelines.
//!
//! A [`LazySequence`] is built from a source, extended by chaining
//! intermediate operations, and evaluated by exactly one terminal operation
//! per traversal:
//!
//! - **Intermediate** (lazy): [`filter`](LazySequence::filter),
//!   [`map`](LazySequence::map), [`distinct`](LazySequence::distinct),
//!   [`limit`](LazySequence::limit), [`skip`](LazySequence::skip)
//! - **Terminal** (evaluating): [`for_each`](LazySequence::for_each),
//!   [`find_first`](LazySequence::find_first),
//!   [`find_any`](LazySequence::find_any),
//!   [`any_match`](LazySequence::any_match), [`count`](LazySequence::count),
//!   [`collect`](LazySequence::collect), and the parallel traversal
//!   `parallel_for_each`
//!
//! Chaining never touches the source. Each chaining call returns a new
//! sequence that shares every upstream stage with the receiver, so the
//! receiver remains usable:
//!
//! ```text
//! base     = Source
//! filtered = Source -> Filter        // shares Source with base
//! paged    = Source -> Filter -> Skip(3) -> Limit(2)
//! ```
//!
//! Terminal operations borrow the sequence. Running one twice replays the
//! pipeline from the source and yields the same result.
//!
//! # Examples
//!
//! ```rust
//! use lazyseq::collector::ToOrderedCollection;
//! use lazyseq::sequence::LazySequence;
//!
//! let letters = LazySequence::from_vec(vec!["A", "B", "C", "D", "1", "1", "A", "B"]);
//!
//! let paged = letters.skip(3).limit(2).collect(ToOrderedCollection);
//! assert_eq!(paged, vec!["D", "1"]);
//!
//! let first_digit = letters.filter(|value| *value == "1").find_first();
//! assert_eq!(first_digit.get(), Ok(&"1"));
//!
//! assert!(letters.any_match(|value| *value == "B"));
//! assert_eq!(letters.filter(|value| *value == "B").count(), 2);
//! ```

mod stage;

pub use stage::StageKind;

use std::fmt;
use std::hash::Hash;
use std::ops::ControlFlow;
use std::rc::Rc;

use crate::collector::Collector;
use crate::error::LazySeqError;
use crate::optional::OptionalValue;

use stage::{Mapped, Node, Source, Stage, Staged};

/// An immutable, lazily evaluated pipeline over a replayable source.
///
/// The lifetime `'a` bounds the source and every callable attached to the
/// pipeline, so predicates and transforms may borrow local state.
///
/// `LazySequence` shares its stages through `Rc` and is therefore neither
/// `Send` nor `Sync`. Parallel traversal materializes the surviving elements
/// on the calling thread before fanning them out.
///
/// # Examples
///
/// ```rust
/// use lazyseq::collector::ToOrderedCollection;
/// use lazyseq::sequence::LazySequence;
///
/// let source = vec![1, 2, 3, 4, 5, 6];
/// let evens = LazySequence::from_slice(&source)
///     .filter(|value| *value % 2 == 0)
///     .map(|value| value * 100);
///
/// assert_eq!(evens.collect(ToOrderedCollection), vec![200, 400, 600]);
/// assert_eq!(source.len(), 6);
/// ```
pub struct LazySequence<'a, T> {
    node: Rc<dyn Node<T> + 'a>,
}

impl<T> Clone for LazySequence<'_, T> {
    fn clone(&self) -> Self {
        Self {
            node: Rc::clone(&self.node),
        }
    }
}

// =============================================================================
// Construction
// =============================================================================

impl<'a, T: 'a> LazySequence<'a, T> {
    /// Creates a sequence whose source is a replayable iterator factory.
    ///
    /// `factory` is invoked once at the start of every traversal. It may
    /// produce an unbounded iterator as long as the pipeline short-circuits.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::sequence::LazySequence;
    ///
    /// let naturals = LazySequence::from_fn(|| 0_u64..);
    /// assert!(naturals.any_match(|value| *value == 10));
    /// ```
    pub fn from_fn<F, I>(factory: F) -> Self
    where
        F: Fn() -> I + 'a,
        I: IntoIterator<Item = T>,
    {
        Self {
            node: Rc::new(Source::new(factory)),
        }
    }

    /// Creates a sequence owning `elements`; each traversal yields clones.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::sequence::LazySequence;
    ///
    /// let sequence = LazySequence::from_vec(vec!["A".to_string(), "B".to_string()]);
    /// assert_eq!(sequence.count(), 2);
    /// ```
    pub fn from_vec(elements: Vec<T>) -> Self
    where
        T: Clone,
    {
        let elements: Rc<[T]> = elements.into();
        Self::from_fn(move || {
            let elements = Rc::clone(&elements);
            (0..elements.len()).map(move |index| elements[index].clone())
        })
    }

    /// Creates a sequence holding a single element.
    pub fn of(element: T) -> Self
    where
        T: Clone,
    {
        Self::from_fn(move || std::iter::once(element.clone()))
    }

    /// Creates a sequence with no elements.
    pub fn empty() -> Self {
        Self::from_fn(std::iter::empty)
    }
}

impl<'a, T: 'a> LazySequence<'a, &'a T> {
    /// Creates a sequence borrowing `source`; the slice is only read.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::sequence::LazySequence;
    ///
    /// let names = ["Ana", "Bo"];
    /// let first = LazySequence::from_slice(&names).find_first();
    /// assert_eq!(first.into_value(), Ok(&"Ana"));
    /// ```
    pub fn from_slice(source: &'a [T]) -> Self {
        Self::from_fn(move || source.iter())
    }
}

impl<'a, T: Clone + 'a> From<Vec<T>> for LazySequence<'a, T> {
    fn from(elements: Vec<T>) -> Self {
        Self::from_vec(elements)
    }
}

impl<'a, T: Clone + 'a> FromIterator<T> for LazySequence<'a, T> {
    fn from_iter<I: IntoIterator<Item = T>>(iterator: I) -> Self {
        Self::from_vec(iterator.into_iter().collect())
    }
}

// =============================================================================
// Intermediate Operations
// =============================================================================

impl<'a, T: 'a> LazySequence<'a, T> {
    fn attach(&self, stage: Stage<'a, T>) -> Self {
        Self {
            node: Rc::new(Staged::new(Rc::clone(&self.node), stage)),
        }
    }

    /// Keeps the elements for which `predicate` returns `true`.
    ///
    /// Under sequential evaluation the predicate sees elements in encounter
    /// order.
    #[must_use]
    pub fn filter<P>(&self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + 'a,
    {
        self.attach(Stage::Filter(Rc::new(predicate)))
    }

    /// Transforms every element, preserving count and order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::collector::ToOrderedCollection;
    /// use lazyseq::sequence::LazySequence;
    ///
    /// let lengths = LazySequence::from_vec(vec!["a", "bcd"]).map(str::len);
    /// assert_eq!(lengths.collect(ToOrderedCollection), vec![1, 3]);
    /// ```
    pub fn map<U, F>(&self, transform: F) -> LazySequence<'a, U>
    where
        U: 'a,
        F: Fn(T) -> U + 'a,
    {
        LazySequence {
            node: Rc::new(Mapped::new(Rc::clone(&self.node), transform)),
        }
    }

    /// Drops later structural duplicates, keeping the first occurrence of
    /// each element in its original relative order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::collector::ToOrderedCollection;
    /// use lazyseq::sequence::LazySequence;
    ///
    /// let unique = LazySequence::from_vec(vec![1, 1, 2, 3, 2]).distinct();
    /// assert_eq!(unique.collect(ToOrderedCollection), vec![1, 2, 3]);
    /// ```
    #[must_use]
    pub fn distinct(&self) -> Self
    where
        T: Eq + Hash + Clone,
    {
        self.attach(Stage::distinct())
    }

    /// Yields at most the first `maximum` surviving elements.
    ///
    /// Upstream evaluation stops as soon as `maximum` elements have passed;
    /// `limit(0)` never pulls from upstream.
    #[must_use]
    pub fn limit(&self, maximum: usize) -> Self {
        self.attach(Stage::Limit(maximum))
    }

    /// Discards the first `count` surviving elements and yields the rest.
    ///
    /// Skipping past the end yields nothing.
    #[must_use]
    pub fn skip(&self, count: usize) -> Self {
        self.attach(Stage::Skip(count))
    }

    /// Checked form of [`limit`](Self::limit) for signed counts.
    ///
    /// # Errors
    ///
    /// Returns [`LazySeqError::InvalidArgument`] when `maximum` is negative.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::sequence::LazySequence;
    ///
    /// let sequence = LazySequence::from_vec(vec![1, 2, 3]);
    /// assert_eq!(sequence.try_limit(2).map(|limited| limited.count()), Ok(2));
    /// assert!(sequence.try_limit(-1).is_err());
    /// ```
    pub fn try_limit(&self, maximum: i64) -> Result<Self, LazySeqError> {
        usize::try_from(maximum)
            .map(|maximum| self.limit(maximum))
            .map_err(|_| {
                LazySeqError::invalid_argument("LazySequence::try_limit", "maximum", maximum)
            })
    }

    /// Checked form of [`skip`](Self::skip) for signed counts.
    ///
    /// # Errors
    ///
    /// Returns [`LazySeqError::InvalidArgument`] when `count` is negative.
    pub fn try_skip(&self, count: i64) -> Result<Self, LazySeqError> {
        usize::try_from(count)
            .map(|count| self.skip(count))
            .map_err(|_| LazySeqError::invalid_argument("LazySequence::try_skip", "count", count))
    }

    /// Lists the attached stages in source-to-sink order.
    pub fn stages(&self) -> Vec<StageKind> {
        let mut stages = Vec::new();
        self.node.describe(&mut stages);
        stages
    }
}

// =============================================================================
// Terminal Operations
// =============================================================================

impl<'a, T: 'a> LazySequence<'a, T> {
    /// Runs one traversal, pushing each surviving element into `sink`.
    fn drive<S>(&self, mut sink: S)
    where
        S: FnMut(T) -> ControlFlow<()>,
    {
        // Break only reports an early stop; terminal state lives in the sink.
        let _ = self.node.drive(&mut sink);
    }

    /// Invokes `action` once per surviving element, in encounter order.
    pub fn for_each<A>(&self, mut action: A)
    where
        A: FnMut(T),
    {
        self.drive(|element| {
            action(element);
            ControlFlow::Continue(())
        });
    }

    /// Invokes `action` per surviving element until it fails.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `action`; no further element is
    /// pulled from the source after it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::sequence::LazySequence;
    ///
    /// let mut visited = Vec::new();
    /// let result = LazySequence::from_vec(vec![1, 2, 3]).try_for_each(|value| {
    ///     if value == 2 {
    ///         return Err(format!("rejected {value}"));
    ///     }
    ///     visited.push(value);
    ///     Ok(())
    /// });
    /// assert_eq!(result, Err("rejected 2".to_string()));
    /// assert_eq!(visited, vec![1]);
    /// ```
    pub fn try_for_each<E, A>(&self, mut action: A) -> Result<(), E>
    where
        A: FnMut(T) -> Result<(), E>,
    {
        let mut failure = None;
        self.drive(|element| match action(element) {
            Ok(()) => ControlFlow::Continue(()),
            Err(error) => {
                failure = Some(error);
                ControlFlow::Break(())
            }
        });
        failure.map_or(Ok(()), Err)
    }

    /// Returns the first surviving element in encounter order.
    ///
    /// Stops pulling from the source as soon as one element survives.
    pub fn find_first(&self) -> OptionalValue<T> {
        let mut found = None;
        self.drive(|element| {
            found = Some(element);
            ControlFlow::Break(())
        });
        OptionalValue::of_nullable(found)
    }

    /// Returns some surviving element, with no ordering guarantee.
    ///
    /// Sequential evaluation returns the first surviving element.
    pub fn find_any(&self) -> OptionalValue<T> {
        self.find_first()
    }

    /// Returns `true` if any surviving element satisfies `predicate`.
    ///
    /// Stops pulling from the source at the first match.
    pub fn any_match<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&T) -> bool,
    {
        let mut matched = false;
        self.drive(|element| {
            if predicate(&element) {
                matched = true;
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        matched
    }

    /// Counts the surviving elements, evaluating the whole pipeline.
    pub fn count(&self) -> usize {
        let mut count = 0;
        self.for_each(|_| count += 1);
        count
    }

    /// Materializes the surviving elements with `collector`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::collector::{ToOrderedCollection, ToUniqueCollection};
    /// use lazyseq::sequence::LazySequence;
    ///
    /// let letters = LazySequence::from_vec(vec!["B", "A", "B"]);
    /// assert_eq!(letters.collect(ToOrderedCollection), vec!["B", "A", "B"]);
    /// assert_eq!(letters.collect(ToUniqueCollection).into_vec(), vec!["B", "A"]);
    /// ```
    pub fn collect<C>(&self, collector: C) -> C::Output
    where
        C: Collector<T>,
    {
        let mut accumulator = collector.supply();
        self.for_each(|element| collector.accumulate(&mut accumulator, element));
        collector.finish(accumulator)
    }
}

impl<'a, U: 'a, E: 'a> LazySequence<'a, Result<U, E>> {
    /// Collects the `Ok` values, stopping at the first `Err`.
    ///
    /// # Errors
    ///
    /// Returns the first `Err` encountered; the partially filled collection is
    /// discarded and no further element is pulled from the source.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::collector::ToOrderedCollection;
    /// use lazyseq::sequence::LazySequence;
    ///
    /// let parsed = LazySequence::from_vec(vec!["1", "x", "3"])
    ///     .map(|text| text.parse::<i32>())
    ///     .try_collect(ToOrderedCollection);
    /// assert!(parsed.is_err());
    /// ```
    pub fn try_collect<C>(&self, collector: C) -> Result<C::Output, E>
    where
        C: Collector<U>,
    {
        let mut accumulator = collector.supply();
        self.try_for_each::<E, _>(|element| {
            collector.accumulate(&mut accumulator, element?);
            Ok(())
        })?;
        Ok(collector.finish(accumulator))
    }
}

impl<T> fmt::Debug for LazySequence<'_, T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stages = Vec::new();
        self.node.describe(&mut stages);
        formatter
            .debug_struct("LazySequence")
            .field("stages", &stages)
            .finish()
    }
}

static_assertions::assert_not_impl_any!(LazySequence<'static, i32>: Send, Sync);
