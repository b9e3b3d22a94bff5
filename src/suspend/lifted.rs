//! Non-suspending accessors widened to the suspending rows.
//!
//! A lifted accessor reads and writes immediately; only the caller's
//! transform suspends. It never fails on its own, so its `Error` is whatever
//! the accessors it composes or combines with require.

use std::future::Future;
use std::marker::PhantomData;

use futures::future;

use super::{AsyncLens, AsyncOptional, AsyncTraversal, Part, Suspended};
use crate::kind::EffectKind;
use crate::optics::{Lens, Optional, Traversal};

/// A [`Lens`] widened to an [`AsyncLens`] whose effects fail with `E`.
pub struct LiftedLens<L, E> {
    lens: L,
    _marker: PhantomData<fn() -> E>,
}

impl<L, E> LiftedLens<L, E> {
    /// Wraps `lens`.
    #[must_use]
    pub const fn new(lens: L) -> Self {
        Self {
            lens,
            _marker: PhantomData,
        }
    }
}

impl<S, A, T, B, L, E> AsyncLens<S, A, T, B> for LiftedLens<L, E>
where
    S: Part,
    A: Part + Clone,
    T: Part,
    B: Part,
    L: Lens<S, A, T, B> + Send + Sync,
    E: Send + 'static,
{
    type Error = E;

    fn get<'a>(&'a self, source: &'a S) -> Suspended<'a, A, E> {
        let part = self.lens.get(source).clone();
        Box::pin(future::ready(Ok(part)))
    }

    fn set(&self, source: S, value: B) -> Suspended<'_, T, E> {
        let target = self.lens.set(source, value);
        Box::pin(future::ready(Ok(target)))
    }

    fn update<'a, F, Fut>(&'a self, source: S, function: F) -> Suspended<'a, T, E>
    where
        F: FnOnce(A) -> Fut + Send + 'a,
        Fut: Future<Output = Result<B, E>> + Send + 'a,
    {
        Box::pin(async move {
            let current = self.lens.get(&source).clone();
            let value = function(current).await?;
            Ok::<T, E>(self.lens.set(source, value))
        })
    }
}

impl<L: Clone, E> Clone for LiftedLens<L, E> {
    fn clone(&self) -> Self {
        Self::new(self.lens.clone())
    }
}

impl<L: std::fmt::Debug, E> std::fmt::Debug for LiftedLens<L, E> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("LiftedLens")
            .field("lens", &self.lens)
            .finish()
    }
}

/// An [`Optional`] widened to an [`AsyncOptional`] whose effects fail with `E`.
pub struct LiftedOptional<O, E> {
    optional: O,
    _marker: PhantomData<fn() -> E>,
}

impl<O, E> LiftedOptional<O, E> {
    /// Wraps `optional`.
    #[must_use]
    pub const fn new(optional: O) -> Self {
        Self {
            optional,
            _marker: PhantomData,
        }
    }
}

impl<S, A, O, E> AsyncOptional<S, A> for LiftedOptional<O, E>
where
    S: Part,
    A: Part + Clone,
    O: Optional<S, A> + Send + Sync,
    E: Send + 'static,
{
    type Error = E;

    fn get_option<'a>(&'a self, source: &'a S) -> Suspended<'a, Option<A>, E> {
        let part = self.optional.get_option(source).cloned();
        Box::pin(future::ready(Ok(part)))
    }

    fn update<'a, F, Fut>(&'a self, source: S, mut function: F) -> Suspended<'a, S, E>
    where
        F: FnMut(A) -> Fut + Send + 'a,
        Fut: Future<Output = Result<A, E>> + Send + 'a,
    {
        Box::pin(async move {
            let current = self.optional.get_option(&source).cloned();
            let Some(part) = current else {
                return Ok(source);
            };
            let value = function(part).await?;
            Ok::<S, E>(self.optional.set(source, value))
        })
    }
}

impl<O: Clone, E> Clone for LiftedOptional<O, E> {
    fn clone(&self) -> Self {
        Self::new(self.optional.clone())
    }
}

impl<O: std::fmt::Debug, E> std::fmt::Debug for LiftedOptional<O, E> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("LiftedOptional")
            .field("optional", &self.optional)
            .finish()
    }
}

/// A [`Traversal`] widened to an [`AsyncTraversal`] whose effects fail with `E`.
///
/// The parts are read up front; the transform is awaited on each of them in
/// order and the results are written back in one pass.
pub struct LiftedTraversal<U, E> {
    traversal: U,
    _marker: PhantomData<fn() -> E>,
}

impl<U, E> LiftedTraversal<U, E> {
    /// Wraps `traversal`.
    #[must_use]
    pub const fn new(traversal: U) -> Self {
        Self {
            traversal,
            _marker: PhantomData,
        }
    }
}

impl<S, A, U, E> AsyncTraversal<S, A> for LiftedTraversal<U, E>
where
    S: Part,
    A: Part + Clone,
    U: Traversal<S, A> + Send + Sync,
    E: Send + 'static,
{
    type Error = E;

    fn get_all<'a>(&'a self, source: &'a S) -> Suspended<'a, Vec<A>, E> {
        let parts: Vec<A> = self.traversal.get_all(source).cloned().collect();
        Box::pin(future::ready(Ok(parts)))
    }

    fn update<'a, F, Fut>(&'a self, source: S, mut function: F) -> Suspended<'a, S, E>
    where
        F: FnMut(A) -> Fut + Send + 'a,
        Fut: Future<Output = Result<A, E>> + Send + 'a,
    {
        Box::pin(async move {
            let parts: Vec<A> = self.traversal.get_all(&source).cloned().collect();
            let mut values = Vec::with_capacity(parts.len());
            for part in parts {
                values.push(function(part).await?);
            }
            tracing::trace!(
                kind = %EffectKind::SuspendingMulti,
                parts = values.len(),
                "writing lifted parts"
            );
            let mut values = values.into_iter();
            let mut unmatched = 0_usize;
            let target = self.traversal.update(source, |original| {
                values.next().unwrap_or_else(|| {
                    unmatched += 1;
                    original
                })
            });
            let unwritten = values.len();
            if unmatched > 0 || unwritten > 0 {
                tracing::warn!(
                    kind = %EffectKind::SuspendingMulti,
                    unmatched,
                    unwritten,
                    "getter and modifier disagree on the number of parts"
                );
            }
            Ok::<S, E>(target)
        })
    }

    fn length<'a>(&'a self, source: &'a S) -> Suspended<'a, usize, E> {
        let count = self.traversal.length(source);
        Box::pin(future::ready(Ok(count)))
    }
}

impl<U: Clone, E> Clone for LiftedTraversal<U, E> {
    fn clone(&self) -> Self {
        Self::new(self.traversal.clone())
    }
}

impl<U: std::fmt::Debug, E> std::fmt::Debug for LiftedTraversal<U, E> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("LiftedTraversal")
            .field("traversal", &self.traversal)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optics::{FunctionOptional, FunctionTraversal, identity};
    use futures::executor::block_on;

    #[test]
    fn test_lifted_lens_keeps_deterministic_semantics() {
        let whole = identity::<i32>().suspend::<String>();
        assert_eq!(block_on(whole.get(&3)), Ok(3));
        assert_eq!(block_on(whole.set(3, 4)), Ok(4));
        assert_eq!(
            block_on(whole.update(3, |x| async move { Ok(x * 2) })),
            Ok(6)
        );
    }

    #[test]
    fn test_lifted_optional_absent_part() {
        let positive = FunctionOptional::new(
            |number: &i32| (*number > 0).then_some(number),
            |number: i32, function: &mut dyn FnMut(i32) -> i32| {
                if number > 0 { function(number) } else { number }
            },
        )
        .suspend::<String>();

        assert_eq!(block_on(positive.get_option(&-1)), Ok(None));
        assert_eq!(block_on(positive.modify(-1, |x| x * 2)), Ok(-1));
        assert_eq!(block_on(positive.modify(2, |x| x * 2)), Ok(4));
    }

    #[test]
    fn test_lifted_traversal_writes_back_in_order() {
        let each = FunctionTraversal::new(
            |numbers: &Vec<i32>| numbers.iter().collect(),
            |numbers: Vec<i32>, function: &mut dyn FnMut(i32) -> i32| {
                numbers.into_iter().map(function).collect::<Vec<_>>()
            },
        )
        .suspend::<String>();

        assert_eq!(block_on(each.length(&vec![1, 2, 3])), Ok(3));
        assert_eq!(
            block_on(each.update(vec![1, 2, 3], |x| async move { Ok(x + 10) })),
            Ok(vec![11, 12, 13])
        );
    }

    #[test]
    fn test_lifted_traversal_keeps_parts_the_getter_missed() {
        // The getter only reports the head; the modifier visits every element.
        let inconsistent = FunctionTraversal::new(
            |numbers: &Vec<i32>| numbers.iter().take(1).collect(),
            |numbers: Vec<i32>, function: &mut dyn FnMut(i32) -> i32| {
                numbers.into_iter().map(function).collect::<Vec<_>>()
            },
        )
        .suspend::<String>();

        assert_eq!(
            block_on(inconsistent.modify(vec![1, 2, 3], |x| x * 100)),
            Ok(vec![100, 2, 3])
        );
    }

    #[test]
    fn test_lifted_traversal_drops_parts_the_modifier_missed() {
        let inconsistent = FunctionTraversal::new(
            |numbers: &Vec<i32>| numbers.iter().collect(),
            |numbers: Vec<i32>, function: &mut dyn FnMut(i32) -> i32| {
                let mut numbers = numbers;
                if let Some(head) = numbers.first_mut() {
                    *head = function(*head);
                }
                numbers
            },
        )
        .suspend::<String>();

        assert_eq!(
            block_on(inconsistent.modify(vec![1, 2, 3], |x| x + 1)),
            Ok(vec![2, 2, 3])
        );
    }

    #[test]
    fn test_lifted_kinds_are_suspended_rows() {
        fn kind_of<U: AsyncTraversal<Vec<i32>, i32>>(_: &U) -> EffectKind {
            U::KIND
        }
        let each = FunctionTraversal::new(
            |numbers: &Vec<i32>| numbers.iter().collect(),
            |numbers: Vec<i32>, function: &mut dyn FnMut(i32) -> i32| {
                numbers.into_iter().map(function).collect::<Vec<_>>()
            },
        )
        .suspend::<String>();
        assert_eq!(kind_of(&each), EffectKind::Multi.suspended());
    }
}
