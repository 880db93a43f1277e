//! Terminal collection strategies.
//!
//! A [`Collector`] folds the surviving elements of a sequence into a concrete
//! container. Two strategies are provided:
//!
//! - [`ToOrderedCollection`]: a `Vec<T>` in encounter order, duplicates kept
//! - [`ToUniqueCollection`]: a [`UniqueCollection<T>`] deduplicated by
//!   structural equality, in first-insertion order
//!
//! # Examples
//!
//! ```rust
//! use lazyseq::collector::{ToOrderedCollection, ToUniqueCollection};
//! use lazyseq::sequence::LazySequence;
//!
//! let letters = LazySequence::from_vec(vec!["A", "B", "A", "C"]);
//!
//! assert_eq!(letters.collect(ToOrderedCollection), vec!["A", "B", "A", "C"]);
//!
//! let unique = letters.collect(ToUniqueCollection);
//! assert_eq!(unique.len(), 3);
//! assert!(unique.contains(&"C"));
//! ```

use std::fmt;
use std::hash::Hash;

/// Hasher used for structural-equality bookkeeping.
#[cfg(feature = "fxhash")]
pub(crate) type SeenHasher = rustc_hash::FxBuildHasher;

/// Hasher used for structural-equality bookkeeping.
#[cfg(all(feature = "ahash", not(feature = "fxhash")))]
pub(crate) type SeenHasher = ahash::RandomState;

/// Hasher used for structural-equality bookkeeping.
#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
pub(crate) type SeenHasher = std::collections::hash_map::RandomState;

/// Set of elements already encountered during one traversal.
pub(crate) type SeenSet<T> = std::collections::HashSet<T, SeenHasher>;

/// A strategy that folds elements into a container.
///
/// A traversal calls [`supply`](Collector::supply) once, then
/// [`accumulate`](Collector::accumulate) per surviving element in encounter
/// order, then [`finish`](Collector::finish).
pub trait Collector<T> {
    /// Mutable state threaded through the traversal.
    type Accumulator;
    /// The container handed back to the caller.
    type Output;

    /// Creates a fresh accumulator.
    fn supply(&self) -> Self::Accumulator;

    /// Adds one element to the accumulator.
    fn accumulate(&self, accumulator: &mut Self::Accumulator, element: T);

    /// Converts the accumulator into the final container.
    fn finish(&self, accumulator: Self::Accumulator) -> Self::Output;
}

/// Collects into a `Vec<T>`, preserving encounter order and duplicates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToOrderedCollection;

impl<T> Collector<T> for ToOrderedCollection {
    type Accumulator = Vec<T>;
    type Output = Vec<T>;

    #[inline]
    fn supply(&self) -> Vec<T> {
        Vec::new()
    }

    #[inline]
    fn accumulate(&self, accumulator: &mut Vec<T>, element: T) {
        accumulator.push(element);
    }

    #[inline]
    fn finish(&self, accumulator: Vec<T>) -> Vec<T> {
        accumulator
    }
}

/// Collects into a [`UniqueCollection<T>`], skipping structural duplicates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToUniqueCollection;

impl<T: Eq + Hash + Clone> Collector<T> for ToUniqueCollection {
    type Accumulator = UniqueCollection<T>;
    type Output = UniqueCollection<T>;

    #[inline]
    fn supply(&self) -> UniqueCollection<T> {
        UniqueCollection::new()
    }

    #[inline]
    fn accumulate(&self, accumulator: &mut UniqueCollection<T>, element: T) {
        accumulator.insert(element);
    }

    #[inline]
    fn finish(&self, accumulator: UniqueCollection<T>) -> UniqueCollection<T> {
        accumulator
    }
}

// =============================================================================
// UniqueCollection
// =============================================================================

/// A deduplicated collection that remembers first-insertion order.
///
/// Equality between two collections ignores order: they are equal when they
/// hold the same elements.
///
/// # Examples
///
/// ```rust
/// use lazyseq::collector::UniqueCollection;
///
/// let collection: UniqueCollection<i32> = [3, 1, 3, 2, 1].into_iter().collect();
/// assert_eq!(collection.as_slice(), &[3, 1, 2]);
/// ```
#[derive(Clone)]
pub struct UniqueCollection<T> {
    elements: Vec<T>,
    seen: SeenSet<T>,
}

impl<T: Eq + Hash + Clone> UniqueCollection<T> {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            seen: SeenSet::default(),
        }
    }

    /// Inserts `element` unless a structurally equal one is already held.
    ///
    /// Returns `true` if the element was inserted.
    pub fn insert(&mut self, element: T) -> bool {
        if self.seen.insert(element.clone()) {
            self.elements.push(element);
            true
        } else {
            false
        }
    }

    /// Returns `true` if a structurally equal element is held.
    pub fn contains(&self, element: &T) -> bool {
        self.seen.contains(element)
    }
}

impl<T> UniqueCollection<T> {
    /// Returns the number of distinct elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the collection holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterates the elements in first-insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }

    /// Views the elements in first-insertion order.
    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }

    /// Converts into a `Vec<T>` in first-insertion order.
    pub fn into_vec(self) -> Vec<T> {
        self.elements
    }
}

impl<T: Eq + Hash + Clone> Default for UniqueCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Eq + Hash + Clone> FromIterator<T> for UniqueCollection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iterator: I) -> Self {
        let mut collection = Self::new();
        for element in iterator {
            collection.insert(element);
        }
        collection
    }
}

impl<T> IntoIterator for UniqueCollection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a UniqueCollection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl<T: Eq + Hash> PartialEq for UniqueCollection<T> {
    fn eq(&self, other: &Self) -> bool {
        self.seen == other.seen
    }
}

impl<T: Eq + Hash> Eq for UniqueCollection<T> {}

impl<T: fmt::Debug> fmt::Debug for UniqueCollection<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.elements.iter()).finish()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for UniqueCollection<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut sequence = serializer.serialize_seq(Some(self.len()))?;
        for element in &self.elements {
            sequence.serialize_element(element)?;
        }
        sequence.end()
    }
}

#[cfg(feature = "serde")]
struct UniqueCollectionVisitor<T> {
    marker: std::marker::PhantomData<T>,
}

#[cfg(feature = "serde")]
impl<'de, T> serde::de::Visitor<'de> for UniqueCollectionVisitor<T>
where
    T: serde::Deserialize<'de> + Eq + Hash + Clone,
{
    type Value = UniqueCollection<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut collection = UniqueCollection::new();
        while let Some(element) = access.next_element()? {
            collection.insert(element);
        }
        Ok(collection)
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for UniqueCollection<T>
where
    T: serde::Deserialize<'de> + Eq + Hash + Clone,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(UniqueCollectionVisitor {
            marker: std::marker::PhantomData,
        })
    }
}
