//! `OptionalValue` - a container holding zero or one value.
//!
//! This module provides the [`OptionalValue<T>`] type, a two-variant tagged
//! union used instead of ambiguous "missing" sentinels:
//!
//! - `Present(T)` holds exactly one value
//! - `Absent` holds nothing
//!
//! A possibly missing input is modelled as `Option<T>` and routed through
//! [`OptionalValue::of_nullable`], which decides presence.
//!
//! # Examples
//!
//! ```rust
//! use lazyseq::optional::OptionalValue;
//!
//! let name: Option<&str> = None;
//! let resolved = OptionalValue::of_nullable(name).or_else("default");
//! assert_eq!(resolved, "default");
//!
//! let found = OptionalValue::of("value");
//! assert!(found.is_present());
//! assert_eq!(found.get(), Ok(&"value"));
//! ```

use std::fmt;

use crate::error::LazySeqError;
use crate::sequence::LazySequence;

/// A value that is either present or absent.
///
/// `OptionalValue<T>` is immutable: every combinator consumes the receiver
/// and returns a new optional or a plain value.
///
/// # Type Parameters
///
/// * `T` - The type of the held value
///
/// # Examples
///
/// ```rust
/// use lazyseq::optional::OptionalValue;
///
/// let present = OptionalValue::of(42);
/// let absent: OptionalValue<i32> = OptionalValue::empty();
///
/// assert_eq!(present.or_else(0), 42);
/// assert_eq!(absent.or_else(0), 0);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OptionalValue<T> {
    /// Exactly one value is held.
    Present(T),
    /// No value is held.
    Absent,
}

impl<T> OptionalValue<T> {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Returns an absent optional.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::optional::OptionalValue;
    ///
    /// let absent: OptionalValue<String> = OptionalValue::empty();
    /// assert!(!absent.is_present());
    /// ```
    #[inline]
    #[must_use]
    pub const fn empty() -> Self {
        Self::Absent
    }

    /// Wraps a value that is known to exist.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::optional::OptionalValue;
    ///
    /// let present = OptionalValue::of("value");
    /// assert!(present.is_present());
    /// ```
    #[inline]
    pub const fn of(value: T) -> Self {
        Self::Present(value)
    }

    /// Wraps a possibly missing value that the caller asserts is present.
    ///
    /// # Errors
    ///
    /// Returns [`LazySeqError::InvariantViolation`] when `maybe_value` is `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::optional::OptionalValue;
    ///
    /// assert!(OptionalValue::try_of(Some(1)).is_ok());
    /// assert!(OptionalValue::<i32>::try_of(None).is_err());
    /// ```
    pub fn try_of(maybe_value: Option<T>) -> Result<Self, LazySeqError> {
        maybe_value
            .map(Self::Present)
            .ok_or(LazySeqError::invariant_violation("OptionalValue::try_of"))
    }

    /// Wraps a possibly missing value; presence follows the input.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::optional::OptionalValue;
    ///
    /// assert!(OptionalValue::of_nullable(Some(1)).is_present());
    /// assert!(!OptionalValue::<i32>::of_nullable(None).is_present());
    /// ```
    #[inline]
    pub fn of_nullable(maybe_value: Option<T>) -> Self {
        match maybe_value {
            Some(value) => Self::Present(value),
            None => Self::Absent,
        }
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Returns `true` if a value is held.
    #[inline]
    pub const fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Returns `true` if no value is held.
    #[inline]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Returns a reference to the held value.
    ///
    /// # Errors
    ///
    /// Returns [`LazySeqError::EmptyValueAccess`] when absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::optional::OptionalValue;
    ///
    /// assert_eq!(OptionalValue::of(7).get(), Ok(&7));
    /// assert!(OptionalValue::<i32>::empty().get().is_err());
    /// ```
    pub const fn get(&self) -> Result<&T, LazySeqError> {
        match self {
            Self::Present(value) => Ok(value),
            Self::Absent => Err(LazySeqError::empty_value_access("OptionalValue::get")),
        }
    }

    /// Consumes the optional and returns the held value.
    ///
    /// # Errors
    ///
    /// Returns [`LazySeqError::EmptyValueAccess`] when absent.
    pub fn into_value(self) -> Result<T, LazySeqError> {
        match self {
            Self::Present(value) => Ok(value),
            Self::Absent => Err(LazySeqError::empty_value_access(
                "OptionalValue::into_value",
            )),
        }
    }

    /// Borrows the held value, producing an `OptionalValue<&T>`.
    #[inline]
    pub const fn as_ref(&self) -> OptionalValue<&T> {
        match self {
            Self::Present(value) => OptionalValue::Present(value),
            Self::Absent => OptionalValue::Absent,
        }
    }

    /// Converts into the standard library `Option`.
    #[inline]
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Absent => None,
        }
    }

    // =========================================================================
    // Fallbacks
    // =========================================================================

    /// Returns the held value, or `default_value` when absent.
    ///
    /// The default is evaluated by the caller before the call. Use
    /// [`or_else_compute`](Self::or_else_compute) to defer it.
    #[inline]
    pub fn or_else(self, default_value: T) -> T {
        match self {
            Self::Present(value) => value,
            Self::Absent => default_value,
        }
    }

    /// Returns the held value, or the result of `supplier` when absent.
    ///
    /// `supplier` is never invoked when a value is present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::optional::OptionalValue;
    ///
    /// let value = OptionalValue::of(1).or_else_compute(|| unreachable!());
    /// assert_eq!(value, 1);
    ///
    /// let value = OptionalValue::empty().or_else_compute(|| 2);
    /// assert_eq!(value, 2);
    /// ```
    #[inline]
    pub fn or_else_compute<F>(self, supplier: F) -> T
    where
        F: FnOnce() -> T,
    {
        match self {
            Self::Present(value) => value,
            Self::Absent => supplier(),
        }
    }

    /// Returns the held value, or fails with the error built by `error_factory`.
    ///
    /// This is the only path by which absence becomes a propagated failure.
    /// The error is the caller's own type and is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns `Err(error_factory())` when absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::optional::OptionalValue;
    ///
    /// let result: Result<i32, String> =
    ///     OptionalValue::empty().or_else_fail(|| "value not found".to_string());
    /// assert_eq!(result, Err("value not found".to_string()));
    /// ```
    #[inline]
    pub fn or_else_fail<E, F>(self, error_factory: F) -> Result<T, E>
    where
        F: FnOnce() -> E,
    {
        match self {
            Self::Present(value) => Ok(value),
            Self::Absent => Err(error_factory()),
        }
    }

    /// Returns `self` when present, otherwise the optional built by
    /// `alternative_supplier`.
    ///
    /// `alternative_supplier` is never invoked when a value is present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::optional::OptionalValue;
    ///
    /// let fallback = OptionalValue::empty().or(|| OptionalValue::of("function"));
    /// assert_eq!(fallback, OptionalValue::of("function"));
    /// ```
    #[inline]
    #[must_use]
    pub fn or<F>(self, alternative_supplier: F) -> Self
    where
        F: FnOnce() -> Self,
    {
        match self {
            Self::Present(_) => self,
            Self::Absent => alternative_supplier(),
        }
    }

    // =========================================================================
    // Callbacks
    // =========================================================================

    /// Invokes exactly one of the two callbacks.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::optional::OptionalValue;
    ///
    /// let mut seen = Vec::new();
    /// OptionalValue::of(3).if_present_or_else(|value| seen.push(value), || {});
    /// assert_eq!(seen, vec![3]);
    /// ```
    pub fn if_present_or_else<P, A>(self, on_present: P, on_absent: A)
    where
        P: FnOnce(T),
        A: FnOnce(),
    {
        match self {
            Self::Present(value) => on_present(value),
            Self::Absent => on_absent(),
        }
    }

    /// Invokes `on_present` with the held value, if any.
    pub fn if_present<P>(self, on_present: P)
    where
        P: FnOnce(T),
    {
        if let Self::Present(value) = self {
            on_present(value);
        }
    }

    // =========================================================================
    // Bridge into pipelines
    // =========================================================================

    /// Turns the optional into a sequence of zero or one element.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::collector::ToOrderedCollection;
    /// use lazyseq::optional::OptionalValue;
    ///
    /// let letters = OptionalValue::of(vec!["AB", "CD"])
    ///     .to_sequence()
    ///     .collect(ToOrderedCollection);
    /// assert_eq!(letters, vec![vec!["AB", "CD"]]);
    ///
    /// assert_eq!(OptionalValue::<i32>::empty().to_sequence().count(), 0);
    /// ```
    pub fn to_sequence<'a>(self) -> LazySequence<'a, T>
    where
        T: Clone + 'a,
    {
        match self {
            Self::Present(value) => LazySequence::of(value),
            Self::Absent => LazySequence::empty(),
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl<T> Default for OptionalValue<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T> From<Option<T>> for OptionalValue<T> {
    #[inline]
    fn from(maybe_value: Option<T>) -> Self {
        Self::of_nullable(maybe_value)
    }
}

impl<T> From<OptionalValue<T>> for Option<T> {
    #[inline]
    fn from(optional: OptionalValue<T>) -> Self {
        optional.into_option()
    }
}

impl<T: fmt::Debug> fmt::Debug for OptionalValue<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Present(value) => formatter.debug_tuple("Present").field(value).finish(),
            Self::Absent => formatter.write_str("Absent"),
        }
    }
}

impl<T: fmt::Display> fmt::Display for OptionalValue<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Present(value) => write!(formatter, "Present({value})"),
            Self::Absent => formatter.write_str("Absent"),
        }
    }
}

static_assertions::assert_impl_all!(OptionalValue<String>: Send, Sync);
