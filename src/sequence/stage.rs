//! Stage descriptors and the nodes that evaluate them.
//!
//! A pipeline is a singly-linked chain of nodes, each holding a reference to
//! the node upstream of it:
//!
//! ```text
//! Source -> Staged(Filter) -> Mapped -> Staged(Limit(3))
//! ```
//!
//! A terminal operation calls [`Node::drive`] on the last node with a sink.
//! Each node wraps the sink with its own stage and forwards the call
//! upstream, until the source pulls elements one at a time and pushes them
//! back down. Every sink returns a [`ControlFlow`]; `Break` stops the source
//! immediately.

use std::hash::Hash;
use std::ops::ControlFlow;
use std::rc::Rc;

use crate::collector::SeenSet;

/// The sink a node pushes its surviving elements into.
pub(crate) type Sink<'s, T> = dyn FnMut(T) -> ControlFlow<()> + 's;

/// Predicate stored by a `filter` stage.
pub(crate) type Predicate<'a, T> = Rc<dyn Fn(&T) -> bool + 'a>;

/// Per-traversal first-occurrence test used by a `distinct` stage.
pub(crate) type FirstOccurrence<'a, T> = Box<dyn FnMut(&T) -> bool + 'a>;

/// Builds a fresh [`FirstOccurrence`] test at the start of each traversal.
pub(crate) type FirstOccurrenceFactory<'a, T> = Rc<dyn Fn() -> FirstOccurrence<'a, T> + 'a>;

/// Describes one step of a pipeline, in source-to-sink order.
///
/// # Examples
///
/// ```rust
/// use lazyseq::sequence::{LazySequence, StageKind};
///
/// let sequence = LazySequence::from_vec(vec![1, 2, 3])
///     .filter(|value| value % 2 == 1)
///     .map(|value| value * 10)
///     .limit(1);
///
/// assert_eq!(
///     sequence.stages(),
///     vec![StageKind::Filter, StageKind::Map, StageKind::Limit(1)]
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    /// Keeps elements matching a predicate.
    Filter,
    /// Transforms each element.
    Map,
    /// Drops later structural duplicates.
    Distinct,
    /// Yields at most the given number of elements.
    Limit(usize),
    /// Discards the given number of leading elements.
    Skip(usize),
}

/// A stage that keeps the element type unchanged.
pub(crate) enum Stage<'a, T> {
    Filter(Predicate<'a, T>),
    Distinct(FirstOccurrenceFactory<'a, T>),
    Limit(usize),
    Skip(usize),
}

impl<'a, T: 'a> Stage<'a, T> {
    pub(crate) fn distinct() -> Self
    where
        T: Eq + Hash + Clone,
    {
        let factory: FirstOccurrenceFactory<'a, T> = Rc::new(|| {
            let mut seen: SeenSet<T> = SeenSet::default();
            Box::new(move |element: &T| seen.insert(element.clone())) as FirstOccurrence<'a, T>
        });
        Self::Distinct(factory)
    }

    const fn kind(&self) -> StageKind {
        match self {
            Self::Filter(_) => StageKind::Filter,
            Self::Distinct(_) => StageKind::Distinct,
            Self::Limit(maximum) => StageKind::Limit(*maximum),
            Self::Skip(count) => StageKind::Skip(*count),
        }
    }
}

// =============================================================================
// Nodes
// =============================================================================

/// One link of a pipeline.
pub(crate) trait Node<T> {
    /// Pushes every element surviving this node into `sink`, in encounter
    /// order, stopping as soon as `sink` or this node breaks.
    fn drive(&self, sink: &mut Sink<'_, T>) -> ControlFlow<()>;

    /// Appends this node's stages to `stages`, upstream first.
    fn describe(&self, stages: &mut Vec<StageKind>);
}

/// The head of a pipeline: a replayable factory of iterators.
pub(crate) struct Source<F> {
    factory: F,
}

impl<F> Source<F> {
    pub(crate) const fn new(factory: F) -> Self {
        Self { factory }
    }
}

impl<T, I, F> Node<T> for Source<F>
where
    F: Fn() -> I,
    I: IntoIterator<Item = T>,
{
    fn drive(&self, sink: &mut Sink<'_, T>) -> ControlFlow<()> {
        (self.factory)().into_iter().try_for_each(sink)
    }

    fn describe(&self, _stages: &mut Vec<StageKind>) {}
}

/// A node applying one type-preserving [`Stage`].
pub(crate) struct Staged<'a, T> {
    upstream: Rc<dyn Node<T> + 'a>,
    stage: Stage<'a, T>,
}

impl<'a, T> Staged<'a, T> {
    pub(crate) fn new(upstream: Rc<dyn Node<T> + 'a>, stage: Stage<'a, T>) -> Self {
        Self { upstream, stage }
    }
}

impl<'a, T: 'a> Node<T> for Staged<'a, T> {
    fn drive(&self, sink: &mut Sink<'_, T>) -> ControlFlow<()> {
        match &self.stage {
            Stage::Filter(predicate) => self.upstream.drive(&mut |element: T| {
                if predicate(&element) {
                    sink(element)
                } else {
                    ControlFlow::Continue(())
                }
            }),
            Stage::Distinct(factory) => {
                let mut first_occurrence = factory();
                self.upstream.drive(&mut |element: T| {
                    if first_occurrence(&element) {
                        sink(element)
                    } else {
                        ControlFlow::Continue(())
                    }
                })
            }
            Stage::Limit(maximum) => {
                if *maximum == 0 {
                    return ControlFlow::Continue(());
                }
                let mut remaining = *maximum;
                self.upstream.drive(&mut |element: T| {
                    remaining -= 1;
                    sink(element)?;
                    if remaining == 0 {
                        ControlFlow::Break(())
                    } else {
                        ControlFlow::Continue(())
                    }
                })
            }
            Stage::Skip(count) => {
                let mut pending = *count;
                self.upstream.drive(&mut |element: T| {
                    if pending > 0 {
                        pending -= 1;
                        ControlFlow::Continue(())
                    } else {
                        sink(element)
                    }
                })
            }
        }
    }

    fn describe(&self, stages: &mut Vec<StageKind>) {
        self.upstream.describe(stages);
        stages.push(self.stage.kind());
    }
}

/// A node transforming `S` elements into `U` elements.
pub(crate) struct Mapped<'a, S, F> {
    upstream: Rc<dyn Node<S> + 'a>,
    transform: F,
}

impl<'a, S, F> Mapped<'a, S, F> {
    pub(crate) fn new(upstream: Rc<dyn Node<S> + 'a>, transform: F) -> Self {
        Self {
            upstream,
            transform,
        }
    }
}

impl<S, U, F> Node<U> for Mapped<'_, S, F>
where
    F: Fn(S) -> U,
{
    fn drive(&self, sink: &mut Sink<'_, U>) -> ControlFlow<()> {
        self.upstream
            .drive(&mut |element: S| sink((self.transform)(element)))
    }

    fn describe(&self, stages: &mut Vec<StageKind>) {
        self.upstream.describe(stages);
        stages.push(StageKind::Map);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn numbers() -> Rc<dyn Node<i32>> {
        Rc::new(Source::new(|| vec![1, 2, 2, 3, 4, 4, 5]))
    }

    fn drain<T>(node: &dyn Node<T>) -> Vec<T> {
        let mut collected = Vec::new();
        let _ = node.drive(&mut |element: T| {
            collected.push(element);
            ControlFlow::Continue(())
        });
        collected
    }

    #[rstest]
    fn test_source_pushes_in_order() {
        assert_eq!(drain(numbers().as_ref()), vec![1, 2, 2, 3, 4, 4, 5]);
    }

    #[rstest]
    fn test_source_stops_on_break() {
        let mut pulled = 0;
        let flow = numbers().drive(&mut |_: i32| {
            pulled += 1;
            if pulled == 2 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(flow, ControlFlow::Break(()));
        assert_eq!(pulled, 2);
    }

    #[rstest]
    fn test_distinct_stage_state_is_per_traversal() {
        let node = Staged::new(numbers(), Stage::distinct());
        assert_eq!(drain(&node), vec![1, 2, 3, 4, 5]);
        assert_eq!(drain(&node), vec![1, 2, 3, 4, 5]);
    }

    #[rstest]
    #[case(0, vec![])]
    #[case(2, vec![1, 2])]
    #[case(100, vec![1, 2, 2, 3, 4, 4, 5])]
    fn test_limit_stage(#[case] maximum: usize, #[case] expected: Vec<i32>) {
        let node = Staged::new(numbers(), Stage::Limit(maximum));
        assert_eq!(drain(&node), expected);
    }

    #[rstest]
    #[case(0, vec![1, 2, 2, 3, 4, 4, 5])]
    #[case(5, vec![4, 5])]
    #[case(10, vec![])]
    fn test_skip_stage(#[case] count: usize, #[case] expected: Vec<i32>) {
        let node = Staged::new(numbers(), Stage::Skip(count));
        assert_eq!(drain(&node), expected);
    }

    #[rstest]
    fn test_mapped_node_describes_upstream_first() {
        let filtered: Rc<dyn Node<i32>> =
            Rc::new(Staged::new(numbers(), Stage::Filter(Rc::new(|value: &i32| *value > 2))));
        let mapped = Mapped::new(filtered, |value: i32| value.to_string());
        let mut stages = Vec::new();
        mapped.describe(&mut stages);
        assert_eq!(stages, vec![StageKind::Filter, StageKind::Map]);
        assert_eq!(drain(&mapped), vec!["3", "4", "4", "5"]);
    }
}
