//! Property-based tests for `LazySequence` laws.
//!
//! This module verifies that pipelines satisfy:
//!
//! - **Filter equivalence**: `filter(p)` keeps exactly the matching elements, in order
//! - **Map preservation**: `map(f)` keeps count and order
//! - **Distinct**: first occurrences only, in first-occurrence order
//! - **Limit/Skip**: `limit(n)` yields `min(n, m)`, `skip(n).limit(k)` pages
//! - **Laziness**: `limit(n)` never evaluates past the nth surviving element
//! - **Replay**: a terminal operation run twice yields the same result
//! - **Round trip**: materializing and rebuilding a sequence does not change
//!   the result of later stages

use lazyseq::collector::{ToOrderedCollection, ToUniqueCollection};
use lazyseq::sequence::LazySequence;
use proptest::prelude::*;
use std::cell::Cell;
use std::collections::HashSet;

fn is_even(value: &i32) -> bool {
    value % 2 == 0
}

fn square_shifted(value: i32) -> i64 {
    i64::from(value) * i64::from(value) + 1
}

// =============================================================================
// Filter and Map
// =============================================================================

proptest! {
    #[test]
    fn prop_filter_matches_iterator(source in prop::collection::vec(any::<i32>(), 0..64)) {
        let expected: Vec<i32> = source.iter().copied().filter(is_even).collect();
        let actual = LazySequence::from_vec(source).filter(is_even).collect(ToOrderedCollection);
        prop_assert_eq!(actual, expected);
    }
}

proptest! {
    #[test]
    fn prop_map_preserves_count_and_order(source in prop::collection::vec(-1_000..1_000_i32, 0..64)) {
        let expected: Vec<i64> = source.iter().copied().map(square_shifted).collect();
        let actual = LazySequence::from_vec(source).map(square_shifted).collect(ToOrderedCollection);
        prop_assert_eq!(actual, expected);
    }
}

// =============================================================================
// Distinct
// =============================================================================

proptest! {
    #[test]
    fn prop_distinct_keeps_first_occurrences(source in prop::collection::vec(0..10_u8, 0..64)) {
        let mut seen = HashSet::new();
        let expected: Vec<u8> = source.iter().copied().filter(|value| seen.insert(*value)).collect();

        let sequence = LazySequence::from_vec(source);
        prop_assert_eq!(sequence.distinct().collect(ToOrderedCollection), expected.clone());
        prop_assert_eq!(sequence.collect(ToUniqueCollection).into_vec(), expected);
    }
}

// =============================================================================
// Limit and Skip
// =============================================================================

proptest! {
    #[test]
    fn prop_limit_yields_min(source in prop::collection::vec(any::<i16>(), 0..32), maximum in 0..48_usize) {
        let size = source.len();
        prop_assert_eq!(LazySequence::from_vec(source).limit(maximum).count(), maximum.min(size));
    }
}

proptest! {
    #[test]
    fn prop_limit_evaluates_at_most_n(source in prop::collection::vec(any::<i32>(), 0..32), maximum in 0..48_usize) {
        let evaluated = Cell::new(0_usize);
        let limited = LazySequence::from_vec(source.clone())
            .filter(|_| {
                evaluated.set(evaluated.get() + 1);
                true
            })
            .limit(maximum);
        let _ = limited.count();
        prop_assert_eq!(evaluated.get(), maximum.min(source.len()));
    }
}

proptest! {
    #[test]
    fn prop_skip_limit_pages(
        source in prop::collection::vec(any::<i32>(), 0..32),
        offset in 0..40_usize,
        page_size in 0..10_usize,
    ) {
        let expected: Vec<i32> = source.iter().copied().skip(offset).take(page_size).collect();
        let page = LazySequence::from_vec(source)
            .skip(offset)
            .limit(page_size)
            .collect(ToOrderedCollection);
        prop_assert_eq!(page, expected);
    }
}

// =============================================================================
// Replay and Round Trip
// =============================================================================

proptest! {
    #[test]
    fn prop_terminal_operations_replay(source in prop::collection::vec(0..20_i32, 0..32)) {
        let sequence = LazySequence::from_vec(source).filter(is_even).distinct().skip(1);
        let first = sequence.collect(ToOrderedCollection);
        let second = sequence.collect(ToOrderedCollection);
        prop_assert_eq!(sequence.count(), first.len());
        prop_assert_eq!(first, second);
    }
}

proptest! {
    #[test]
    fn prop_round_trip_is_associative(source in prop::collection::vec(-100..100_i32, 0..48)) {
        let one_pass = LazySequence::from_vec(source.clone())
            .filter(is_even)
            .map(square_shifted)
            .collect(ToOrderedCollection);

        let materialized = LazySequence::from_vec(source).filter(is_even).collect(ToOrderedCollection);
        let two_pass = LazySequence::from_vec(materialized)
            .map(square_shifted)
            .collect(ToOrderedCollection);

        prop_assert_eq!(one_pass, two_pass);
    }
}

proptest! {
    #[test]
    fn prop_find_first_is_first_match(source in prop::collection::vec(any::<i32>(), 0..32)) {
        let expected = source.iter().copied().find(is_even);
        let found = LazySequence::from_vec(source).filter(is_even).find_first();
        prop_assert_eq!(found.into_option(), expected);
    }
}
