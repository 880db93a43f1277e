//! Integration tests for `OptionalValue`.

use lazyseq::collector::ToOrderedCollection;
use lazyseq::error::LazySeqError;
use lazyseq::optional::OptionalValue;
use rstest::rstest;
use std::cell::Cell;

// =============================================================================
// Test data types
// =============================================================================

/// A value whose equality depends only on its explicit fields.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct Mock {
    family: &'static str,
    label: &'static str,
}

impl Mock {
    const fn new(family: &'static str, label: &'static str) -> Self {
        Self { family, label }
    }
}

#[derive(Debug, PartialEq, Eq)]
struct NotFound(&'static str);

// =============================================================================
// Construction and Access
// =============================================================================

#[rstest]
#[case(0)]
#[case(-17)]
#[case(i32::MAX)]
fn test_of_then_get_returns_value(#[case] value: i32) {
    assert_eq!(OptionalValue::of(value).get(), Ok(&value));
    assert_eq!(OptionalValue::of(value).into_value(), Ok(value));
}

#[rstest]
fn test_empty_is_absent_and_get_fails() {
    let absent: OptionalValue<Mock> = OptionalValue::empty();
    assert!(!absent.is_present());
    assert!(matches!(
        absent.get(),
        Err(LazySeqError::EmptyValueAccess(_))
    ));
    assert!(matches!(
        absent.into_value(),
        Err(LazySeqError::EmptyValueAccess(_))
    ));
}

#[rstest]
fn test_try_of_missing_value_is_invariant_violation() {
    let result = OptionalValue::<Mock>::try_of(None);
    assert!(matches!(result, Err(LazySeqError::InvariantViolation(_))));
    assert_eq!(
        result.unwrap_err().to_string(),
        "OptionalValue::try_of: a present value cannot wrap a missing value"
    );
}

#[rstest]
fn test_try_of_present_value() {
    let mock = Mock::new("mock", "A");
    assert_eq!(
        OptionalValue::try_of(Some(mock.clone())),
        Ok(OptionalValue::of(mock))
    );
}

#[rstest]
fn test_equality_follows_explicit_fields() {
    let first = Mock::new("first", "A");
    let second = Mock::new("second", "A");
    assert_eq!(first.label, second.label);
    assert_ne!(first.family, second.family);
    assert_ne!(OptionalValue::of(first), OptionalValue::of(second));
}

#[rstest]
#[case(None, "default")]
#[case(Some("held"), "held")]
fn test_of_nullable_or_else(#[case] maybe_value: Option<&'static str>, #[case] expected: &str) {
    assert_eq!(OptionalValue::of_nullable(maybe_value).or_else("default"), expected);
}

// =============================================================================
// Laziness of suppliers
// =============================================================================

#[rstest]
fn test_or_does_not_invoke_supplier_when_present() {
    let invoked = Cell::new(false);
    let result = OptionalValue::of(Mock::new("mock", "A")).or(|| {
        invoked.set(true);
        OptionalValue::of(Mock::new("mock", "B"))
    });
    assert!(!invoked.get());
    assert_eq!(result, OptionalValue::of(Mock::new("mock", "A")));
}

#[rstest]
fn test_or_invokes_supplier_when_absent() {
    let invoked = Cell::new(0);
    let result = OptionalValue::empty().or(|| {
        invoked.set(invoked.get() + 1);
        OptionalValue::of("function")
    });
    assert_eq!(invoked.get(), 1);
    assert_eq!(result, OptionalValue::of("function"));
}

#[rstest]
fn test_or_else_compute_does_not_invoke_supplier_when_present() {
    let invoked = Cell::new(false);
    let value = OptionalValue::of(5).or_else_compute(|| {
        invoked.set(true);
        0
    });
    assert_eq!(value, 5);
    assert!(!invoked.get());
}

#[rstest]
fn test_or_else_fail_returns_caller_error_unchanged() {
    let absent: OptionalValue<Mock> = OptionalValue::empty();
    assert_eq!(absent.or_else_fail(|| NotFound("mock")), Err(NotFound("mock")));

    let present = OptionalValue::of(Mock::new("mock", "A"));
    assert_eq!(
        present.or_else_fail(|| NotFound("unused")),
        Ok(Mock::new("mock", "A"))
    );
}

// =============================================================================
// Callbacks
// =============================================================================

#[rstest]
#[case(OptionalValue::of(1), (1, 0))]
#[case(OptionalValue::empty(), (0, 1))]
fn test_if_present_or_else_invokes_exactly_one(
    #[case] optional: OptionalValue<i32>,
    #[case] expected: (i32, i32),
) {
    let present_calls = Cell::new(0);
    let absent_calls = Cell::new(0);
    optional.if_present_or_else(
        |_| present_calls.set(present_calls.get() + 1),
        || absent_calls.set(absent_calls.get() + 1),
    );
    assert_eq!((present_calls.get(), absent_calls.get()), expected);
}

#[rstest]
fn test_if_present_skips_absent() {
    let mut seen = Vec::new();
    OptionalValue::<i32>::empty().if_present(|value| seen.push(value));
    OptionalValue::of(9).if_present(|value| seen.push(value));
    assert_eq!(seen, vec![9]);
}

// =============================================================================
// Conversions and Formatting
// =============================================================================

#[rstest]
fn test_to_sequence_has_zero_or_one_element() {
    let present = OptionalValue::of(Mock::new("mock", "A")).to_sequence();
    assert_eq!(
        present.collect(ToOrderedCollection),
        vec![Mock::new("mock", "A")]
    );
    assert_eq!(OptionalValue::<Mock>::empty().to_sequence().count(), 0);
}

#[rstest]
fn test_option_conversions() {
    let optional: OptionalValue<i32> = Some(3).into();
    assert_eq!(optional, OptionalValue::of(3));
    let option: Option<i32> = OptionalValue::empty().into();
    assert_eq!(option, None);
    assert_eq!(OptionalValue::of(4).into_option(), Some(4));
    assert_eq!(OptionalValue::<i32>::default(), OptionalValue::empty());
}

#[rstest]
fn test_as_ref_keeps_receiver() {
    let optional = OptionalValue::of("text".to_string());
    assert_eq!(optional.as_ref().into_option().map(String::len), Some(4));
    assert!(optional.is_present());
}

#[rstest]
fn test_display_and_debug() {
    assert_eq!(OptionalValue::of(42).to_string(), "Present(42)");
    assert_eq!(OptionalValue::<i32>::empty().to_string(), "Absent");
    assert_eq!(format!("{:?}", OptionalValue::of("x")), "Present(\"x\")");
}
