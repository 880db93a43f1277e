//! Error types for optional values and sequence pipelines.
//!
//! Every failure the library itself can raise is a variant of
//! [`LazySeqError`]. Errors produced by caller-supplied factories or actions
//! (`or_else_fail`, `try_for_each`, `try_collect`) are never wrapped: they
//! reach the caller as the caller's own error type.

use std::fmt;

/// Raised when a "must hold a value" constructor receives a missing value.
///
/// # Examples
///
/// ```rust
/// use lazyseq::error::InvariantViolationError;
///
/// let error = InvariantViolationError { operation: "OptionalValue::try_of" };
/// assert_eq!(
///     format!("{error}"),
///     "OptionalValue::try_of: a present value cannot wrap a missing value"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvariantViolationError {
    /// The operation that refused the missing value.
    pub operation: &'static str,
}

impl fmt::Display for InvariantViolationError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{}: a present value cannot wrap a missing value",
            self.operation
        )
    }
}

impl std::error::Error for InvariantViolationError {}

/// Raised when the value of an absent optional is accessed directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyValueAccessError {
    /// The accessor that was called.
    pub operation: &'static str,
}

impl fmt::Display for EmptyValueAccessError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}: no value present", self.operation)
    }
}

impl std::error::Error for EmptyValueAccessError {}

/// Raised when a count argument is outside its accepted range.
///
/// # Examples
///
/// ```rust
/// use lazyseq::error::InvalidArgumentError;
///
/// let error = InvalidArgumentError {
///     operation: "LazySequence::try_limit",
///     argument: "maximum",
///     value: -1,
/// };
/// assert_eq!(
///     format!("{error}"),
///     "LazySequence::try_limit: argument `maximum` must not be negative, got -1"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidArgumentError {
    /// The operation that rejected the argument.
    pub operation: &'static str,
    /// The name of the rejected argument.
    pub argument: &'static str,
    /// The rejected value.
    pub value: i64,
}

impl fmt::Display for InvalidArgumentError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{}: argument `{}` must not be negative, got {}",
            self.operation, self.argument, self.value
        )
    }
}

impl std::error::Error for InvalidArgumentError {}

/// Unified error type for the library.
///
/// # Examples
///
/// ```rust
/// use lazyseq::error::LazySeqError;
/// use lazyseq::optional::OptionalValue;
///
/// let absent: OptionalValue<i32> = OptionalValue::empty();
/// let error = absent.get().unwrap_err();
/// assert!(matches!(error, LazySeqError::EmptyValueAccess(_)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LazySeqError {
    /// A present optional was requested for a missing value.
    InvariantViolation(InvariantViolationError),
    /// An absent optional's value was accessed.
    EmptyValueAccess(EmptyValueAccessError),
    /// A negative count was passed to `try_limit` or `try_skip`.
    InvalidArgument(InvalidArgumentError),
}

impl LazySeqError {
    pub(crate) const fn invariant_violation(operation: &'static str) -> Self {
        Self::InvariantViolation(InvariantViolationError { operation })
    }

    pub(crate) const fn empty_value_access(operation: &'static str) -> Self {
        Self::EmptyValueAccess(EmptyValueAccessError { operation })
    }

    pub(crate) const fn invalid_argument(
        operation: &'static str,
        argument: &'static str,
        value: i64,
    ) -> Self {
        Self::InvalidArgument(InvalidArgumentError {
            operation,
            argument,
            value,
        })
    }
}

impl fmt::Display for LazySeqError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvariantViolation(error) => write!(formatter, "{error}"),
            Self::EmptyValueAccess(error) => write!(formatter, "{error}"),
            Self::InvalidArgument(error) => write!(formatter, "{error}"),
        }
    }
}

impl std::error::Error for LazySeqError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvariantViolation(error) => Some(error),
            Self::EmptyValueAccess(error) => Some(error),
            Self::InvalidArgument(error) => Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::error::Error;

    #[rstest]
    fn test_empty_value_access_display() {
        let error = LazySeqError::empty_value_access("OptionalValue::get");
        assert_eq!(format!("{error}"), "OptionalValue::get: no value present");
    }

    #[rstest]
    fn test_invariant_violation_display() {
        let error = LazySeqError::invariant_violation("OptionalValue::try_of");
        assert_eq!(
            format!("{error}"),
            "OptionalValue::try_of: a present value cannot wrap a missing value"
        );
    }

    #[rstest]
    fn test_invalid_argument_display() {
        let error = LazySeqError::invalid_argument("LazySequence::try_skip", "count", -3);
        assert_eq!(
            format!("{error}"),
            "LazySequence::try_skip: argument `count` must not be negative, got -3"
        );
    }

    #[rstest]
    fn test_source_is_the_inner_error() {
        let error = LazySeqError::empty_value_access("OptionalValue::into_value");
        let source = error.source().map(ToString::to_string);
        assert_eq!(
            source.as_deref(),
            Some("OptionalValue::into_value: no value present")
        );
    }

    #[rstest]
    fn test_error_equality() {
        let first = LazySeqError::invalid_argument("LazySequence::try_limit", "maximum", -1);
        let second = LazySeqError::invalid_argument("LazySequence::try_limit", "maximum", -1);
        let third = LazySeqError::invalid_argument("LazySequence::try_limit", "maximum", -2);
        assert_eq!(first, second);
        assert_ne!(first, third);
    }
}
