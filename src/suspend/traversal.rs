//! Suspending traversals: accessors that view zero or more parts through a
//! suspending read and write.
//!
//! An [`AsyncTraversal`] is the [`EffectKind::SuspendingMulti`] row of the
//! catalogue. Updates await the transform once per part, in traversal order,
//! and never start the transform for a part before the previous one resolved.

use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use futures::future::{self, FutureExt, TryFutureExt};
use static_assertions::const_assert;

use super::{Part, Suspended, choose, forward, share};
use crate::kind::EffectKind;

const_assert!(EffectKind::SuspendingMulti.supports_choice());
const_assert!(EffectKind::SuspendingPartial.widens_to(EffectKind::SuspendingMulti));

/// A Traversal whose read and write suspend and may fail.
///
/// # Type Parameters
///
/// - `S`: The source type
/// - `A`: The viewed type
/// - `T`: The target type produced by a write
/// - `B`: The type written into each focused part
pub trait AsyncTraversal<S, A, T = S, B = A>: Send + Sync
where
    S: Part,
    A: Part,
    T: Part,
    B: Part,
{
    /// The failure type of this accessor's effects.
    type Error: Send + 'static;

    /// The catalogue row of this accessor.
    const KIND: EffectKind = EffectKind::SuspendingMulti;

    /// Reads every focused part, in traversal order.
    fn get_all<'a>(&'a self, source: &'a S) -> Suspended<'a, Vec<A>, Self::Error>;

    /// Awaits `function` on every focused part, in traversal order, and
    /// writes the results back.
    ///
    /// The first failure aborts the call; the transform is not run on the
    /// remaining parts.
    fn update<'a, F, Fut>(&'a self, source: S, function: F) -> Suspended<'a, T, Self::Error>
    where
        F: FnMut(A) -> Fut + Send + 'a,
        Fut: Future<Output = Result<B, Self::Error>> + Send + 'a;

    /// Replaces every focused part with the same value.
    fn set(&self, source: S, value: B) -> Suspended<'_, T, Self::Error>
    where
        B: Clone,
    {
        self.update(source, move |_| future::ready(Ok(value.clone())))
    }

    /// Modifies every focused part with a function that neither suspends nor fails.
    fn modify<'a, F>(&'a self, source: S, mut function: F) -> Suspended<'a, T, Self::Error>
    where
        F: FnMut(A) -> B + Send + 'a,
    {
        self.update(source, move |value| future::ready(Ok(function(value))))
    }

    /// Awaits `action` on every focused part, in traversal order, and writes
    /// the parts back unchanged.
    fn perform<'a, F, Fut>(&'a self, source: S, mut action: F) -> Suspended<'a, T, Self::Error>
    where
        F: FnMut(&A) -> Fut + Send + 'a,
        Fut: Future<Output = Result<(), Self::Error>> + Send + 'a,
        B: From<A>,
    {
        self.update(source, move |value| {
            let acting = action(&value);
            async move {
                acting.await?;
                Ok::<B, Self::Error>(B::from(value))
            }
        })
    }

    /// Resolves to the number of focused parts.
    fn length<'a>(&'a self, source: &'a S) -> Suspended<'a, usize, Self::Error> {
        self.get_all(source).map_ok(|parts| parts.len()).boxed()
    }

    /// Composes this traversal with another suspending traversal that fails
    /// the same way.
    fn compose<C, D, U>(self, other: U) -> ComposedAsyncTraversal<Self, U, A, B>
    where
        Self: Sized,
        C: Part,
        D: Part,
        U: AsyncTraversal<A, C, B, D, Error = Self::Error>,
    {
        ComposedAsyncTraversal::new(self, other)
    }

    /// Combines this traversal with another one over the same source.
    ///
    /// Reading resolves to this traversal's parts followed by `other`'s.
    /// Updating applies this traversal first and `other` to the result; a part
    /// both traversals visit is transformed twice.
    fn combine<U>(self, other: U) -> CombinedAsyncTraversal<Self, U>
    where
        Self: Sized,
        U: AsyncTraversal<S, A, T, B, Error = Self::Error>,
    {
        CombinedAsyncTraversal::new(self, other)
    }
}

/// A suspending traversal built from a getter and a setter that return
/// futures.
///
/// The setter receives the transformed parts in traversal order.
///
/// # Example
///
/// ```
/// use futures::executor::block_on;
/// use lenskit::suspend::{AsyncFunctionTraversal, AsyncTraversal, Suspended};
///
/// let each = AsyncFunctionTraversal::new(
///     |numbers: &Vec<i32>| -> Suspended<'static, Vec<i32>, String> {
///         let numbers = numbers.clone();
///         Box::pin(async move { Ok(numbers) })
///     },
///     |_: Vec<i32>, numbers: Vec<String>| -> Suspended<'static, Vec<String>, String> {
///         Box::pin(async move { Ok(numbers) })
///     },
/// );
///
/// let labels = block_on(each.update(vec![1, 2], |number| async move { Ok(format!("#{number}")) }));
/// assert_eq!(labels, Ok(vec!["#1".to_string(), "#2".to_string()]));
/// ```
pub struct AsyncFunctionTraversal<S, A, T, B, E, G, St> {
    getter: G,
    setter: St,
    _marker: PhantomData<fn() -> (S, A, T, B, E)>,
}

impl<S, A, T, B, E, G, St> AsyncFunctionTraversal<S, A, T, B, E, G, St>
where
    G: Fn(&S) -> Suspended<'static, Vec<A>, E>,
    St: Fn(S, Vec<B>) -> Suspended<'static, T, E>,
{
    /// Creates a new `AsyncFunctionTraversal`.
    ///
    /// # Arguments
    ///
    /// * `getter` - Starts a read of every focused part, in traversal order
    /// * `setter` - Builds the target from the source and the transformed parts
    #[must_use]
    pub const fn new(getter: G, setter: St) -> Self {
        Self {
            getter,
            setter,
            _marker: PhantomData,
        }
    }
}

impl<S, A, T, B, E, G, St> AsyncTraversal<S, A, T, B>
    for AsyncFunctionTraversal<S, A, T, B, E, G, St>
where
    S: Part,
    A: Part,
    T: Part,
    B: Part,
    E: Send + 'static,
    G: Fn(&S) -> Suspended<'static, Vec<A>, E> + Send + Sync,
    St: Fn(S, Vec<B>) -> Suspended<'static, T, E> + Send + Sync,
{
    type Error = E;

    fn get_all<'a>(&'a self, source: &'a S) -> Suspended<'a, Vec<A>, E> {
        (self.getter)(source)
    }

    fn update<'a, F, Fut>(&'a self, source: S, mut function: F) -> Suspended<'a, T, E>
    where
        F: FnMut(A) -> Fut + Send + 'a,
        Fut: Future<Output = Result<B, E>> + Send + 'a,
    {
        Box::pin(async move {
            let parts = (self.getter)(&source).await?;
            let mut values = Vec::with_capacity(parts.len());
            for part in parts {
                values.push(function(part).await?);
            }
            tracing::trace!(
                kind = %EffectKind::SuspendingMulti,
                parts = values.len(),
                "writing transformed parts"
            );
            (self.setter)(source, values).await
        })
    }
}

impl<S, A, T, B, E, G: Clone, St: Clone> Clone for AsyncFunctionTraversal<S, A, T, B, E, G, St> {
    fn clone(&self) -> Self {
        Self {
            getter: self.getter.clone(),
            setter: self.setter.clone(),
            _marker: PhantomData,
        }
    }
}

impl<S, A, T, B, E, G, St> std::fmt::Debug for AsyncFunctionTraversal<S, A, T, B, E, G, St> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("AsyncFunctionTraversal")
            .finish_non_exhaustive()
    }
}

/// A suspending traversal composed of two suspending traversals.
///
/// For each part of the outer traversal, in order, the inner traversal visits
/// its own parts in order.
pub struct ComposedAsyncTraversal<T1, T2, A, B = A> {
    first: T1,
    second: T2,
    _marker: PhantomData<fn(A) -> B>,
}

impl<T1, T2, A, B> ComposedAsyncTraversal<T1, T2, A, B> {
    /// Creates a new composed traversal from an outer and an inner traversal.
    #[must_use]
    pub const fn new(first: T1, second: T2) -> Self {
        Self {
            first,
            second,
            _marker: PhantomData,
        }
    }
}

impl<S, T, A, B, C, D, T1, T2> AsyncTraversal<S, C, T, D> for ComposedAsyncTraversal<T1, T2, A, B>
where
    S: Part,
    T: Part,
    A: Part,
    B: Part,
    C: Part,
    D: Part,
    T1: AsyncTraversal<S, A, T, B>,
    T2: AsyncTraversal<A, C, B, D, Error = T1::Error>,
{
    type Error = T1::Error;

    fn get_all<'a>(&'a self, source: &'a S) -> Suspended<'a, Vec<C>, T1::Error> {
        Box::pin(async move {
            let middles = self.first.get_all(source).await?;
            let mut parts = Vec::new();
            for middle in &middles {
                parts.extend(self.second.get_all(middle).await?);
            }
            Ok::<Vec<C>, T1::Error>(parts)
        })
    }

    fn update<'a, F, Fut>(&'a self, source: S, function: F) -> Suspended<'a, T, T1::Error>
    where
        F: FnMut(C) -> Fut + Send + 'a,
        Fut: Future<Output = Result<D, T1::Error>> + Send + 'a,
    {
        let shared = share(function);
        self.first.update(source, move |middle| {
            self.second.update(middle, forward(Arc::clone(&shared)))
        })
    }
}

impl<T1: Clone, T2: Clone, A, B> Clone for ComposedAsyncTraversal<T1, T2, A, B> {
    fn clone(&self) -> Self {
        Self::new(self.first.clone(), self.second.clone())
    }
}

impl<T1: std::fmt::Debug, T2: std::fmt::Debug, A, B> std::fmt::Debug
    for ComposedAsyncTraversal<T1, T2, A, B>
{
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("ComposedAsyncTraversal")
            .field("first", &self.first)
            .field("second", &self.second)
            .finish()
    }
}

/// The union of two suspending traversals over the same source.
pub struct CombinedAsyncTraversal<T1, T2> {
    first: T1,
    second: T2,
}

impl<T1, T2> CombinedAsyncTraversal<T1, T2> {
    /// Creates a new `CombinedAsyncTraversal`.
    #[must_use]
    pub const fn new(first: T1, second: T2) -> Self {
        Self { first, second }
    }
}

impl<S, A, T1, T2> AsyncTraversal<S, A> for CombinedAsyncTraversal<T1, T2>
where
    S: Part,
    A: Part,
    T1: AsyncTraversal<S, A>,
    T2: AsyncTraversal<S, A, Error = T1::Error>,
{
    type Error = T1::Error;

    fn get_all<'a>(&'a self, source: &'a S) -> Suspended<'a, Vec<A>, T1::Error> {
        choose(self.first.get_all(source), move || {
            self.second.get_all(source)
        })
    }

    fn update<'a, F, Fut>(&'a self, source: S, mut function: F) -> Suspended<'a, S, T1::Error>
    where
        F: FnMut(A) -> Fut + Send + 'a,
        Fut: Future<Output = Result<A, T1::Error>> + Send + 'a,
    {
        Box::pin(async move {
            tracing::trace!(kind = %EffectKind::SuspendingMulti, operand = "left", "updating");
            let intermediate = self.first.update(source, &mut function).await?;
            tracing::trace!(kind = %EffectKind::SuspendingMulti, operand = "right", "updating");
            self.second.update(intermediate, &mut function).await
        })
    }
}

impl<T1: Clone, T2: Clone> Clone for CombinedAsyncTraversal<T1, T2> {
    fn clone(&self) -> Self {
        Self::new(self.first.clone(), self.second.clone())
    }
}

impl<T1: std::fmt::Debug, T2: std::fmt::Debug> std::fmt::Debug for CombinedAsyncTraversal<T1, T2> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("CombinedAsyncTraversal")
            .field("first", &self.first)
            .field("second", &self.second)
            .finish()
    }
}
