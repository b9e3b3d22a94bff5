//! Suspending optionals: accessors that view zero or one part through a
//! suspending read and write.
//!
//! An [`AsyncOptional`] is the [`EffectKind::SuspendingPartial`] row of the
//! catalogue. A source without the part is not a failure: the read resolves
//! to `None` and an update resolves to the source unchanged without running
//! the transform.

use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use futures::future::{self, FutureExt, TryFutureExt};
use static_assertions::const_assert;

use super::traversal::AsyncTraversal;
use super::{Part, Suspended, choose, forward, share};
use crate::kind::EffectKind;

const_assert!(EffectKind::SuspendingPartial.supports_choice());
const_assert!(EffectKind::Partial.widens_to(EffectKind::SuspendingPartial));

/// An Optional whose read and write suspend and may fail.
///
/// # Type Parameters
///
/// - `S`: The source type
/// - `A`: The viewed type
/// - `T`: The target type produced by a write
/// - `B`: The type written into the focused part
pub trait AsyncOptional<S, A, T = S, B = A>: Send + Sync
where
    S: Part,
    A: Part,
    T: Part,
    B: Part,
{
    /// The failure type of this accessor's effects.
    type Error: Send + 'static;

    /// The catalogue row of this accessor.
    const KIND: EffectKind = EffectKind::SuspendingPartial;

    /// Reads the focused part, resolving to `None` when it is absent.
    fn get_option<'a>(&'a self, source: &'a S) -> Suspended<'a, Option<A>, Self::Error>;

    /// Awaits `function` on the focused part, if present, and writes the
    /// result back.
    fn update<'a, F, Fut>(&'a self, source: S, function: F) -> Suspended<'a, T, Self::Error>
    where
        F: FnMut(A) -> Fut + Send + 'a,
        Fut: Future<Output = Result<B, Self::Error>> + Send + 'a;

    /// Replaces the focused part, if present.
    fn set(&self, source: S, value: B) -> Suspended<'_, T, Self::Error>
    where
        B: Clone,
    {
        self.update(source, move |_| future::ready(Ok(value.clone())))
    }

    /// Modifies the focused part with a function that neither suspends nor fails.
    fn modify<'a, F>(&'a self, source: S, mut function: F) -> Suspended<'a, T, Self::Error>
    where
        F: FnMut(A) -> B + Send + 'a,
    {
        self.update(source, move |value| future::ready(Ok(function(value))))
    }

    /// Awaits `action` on the focused part, if present, and writes the part
    /// back unchanged.
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

    /// Resolves to whether the focused part is present.
    fn is_present<'a>(&'a self, source: &'a S) -> Suspended<'a, bool, Self::Error> {
        self.get_option(source)
            .map_ok(|part| part.is_some())
            .boxed()
    }

    /// Composes this optional with another suspending optional that fails the
    /// same way.
    fn compose<C, D, O>(self, other: O) -> ComposedAsyncOptional<Self, O, A, B>
    where
        Self: Sized,
        C: Part,
        D: Part,
        O: AsyncOptional<A, C, B, D, Error = Self::Error>,
    {
        ComposedAsyncOptional::new(self, other)
    }

    /// Combines this optional with another one over the same source.
    ///
    /// Reading resolves to this optional's part when present and otherwise
    /// reads `other`. Updating applies this optional first and `other` to the
    /// result.
    fn combine<O>(self, other: O) -> CombinedAsyncOptional<Self, O>
    where
        Self: Sized,
        O: AsyncOptional<S, A, T, B, Error = Self::Error>,
    {
        CombinedAsyncOptional::new(self, other)
    }

    /// Widens this optional to a suspending traversal over at most one part.
    fn to_traversal(self) -> AsyncOptionalAsTraversal<Self, A, B>
    where
        Self: Sized,
    {
        AsyncOptionalAsTraversal::new(self)
    }
}

/// A suspending optional built from a getter and a setter that return
/// futures.
///
/// The setter is only called when the getter found the part.
pub struct AsyncFunctionOptional<S, A, E, G, St> {
    getter: G,
    setter: St,
    _marker: PhantomData<fn() -> (S, A, E)>,
}

impl<S, A, E, G, St> AsyncFunctionOptional<S, A, E, G, St>
where
    G: Fn(&S) -> Suspended<'static, Option<A>, E>,
    St: Fn(S, A) -> Suspended<'static, S, E>,
{
    /// Creates a new `AsyncFunctionOptional`.
    #[must_use]
    pub const fn new(getter: G, setter: St) -> Self {
        Self {
            getter,
            setter,
            _marker: PhantomData,
        }
    }
}

impl<S, A, E, G, St> AsyncOptional<S, A> for AsyncFunctionOptional<S, A, E, G, St>
where
    S: Part,
    A: Part,
    E: Send + 'static,
    G: Fn(&S) -> Suspended<'static, Option<A>, E> + Send + Sync,
    St: Fn(S, A) -> Suspended<'static, S, E> + Send + Sync,
{
    type Error = E;

    fn get_option<'a>(&'a self, source: &'a S) -> Suspended<'a, Option<A>, E> {
        (self.getter)(source)
    }

    fn update<'a, F, Fut>(&'a self, source: S, mut function: F) -> Suspended<'a, S, E>
    where
        F: FnMut(A) -> Fut + Send + 'a,
        Fut: Future<Output = Result<A, E>> + Send + 'a,
    {
        Box::pin(async move {
            let current = (self.getter)(&source).await?;
            match current {
                Some(part) => {
                    let value = function(part).await?;
                    (self.setter)(source, value).await
                }
                None => {
                    tracing::trace!(kind = %EffectKind::SuspendingPartial, "part absent");
                    Ok(source)
                }
            }
        })
    }
}

impl<S, A, E, G: Clone, St: Clone> Clone for AsyncFunctionOptional<S, A, E, G, St> {
    fn clone(&self) -> Self {
        Self {
            getter: self.getter.clone(),
            setter: self.setter.clone(),
            _marker: PhantomData,
        }
    }
}

impl<S, A, E, G, St> std::fmt::Debug for AsyncFunctionOptional<S, A, E, G, St> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("AsyncFunctionOptional")
            .finish_non_exhaustive()
    }
}

/// A suspending optional composed of two suspending optionals.
///
/// The inner optional is only read or updated when the outer part is present.
pub struct ComposedAsyncOptional<O1, O2, A, B = A> {
    first: O1,
    second: O2,
    _marker: PhantomData<fn(A) -> B>,
}

impl<O1, O2, A, B> ComposedAsyncOptional<O1, O2, A, B> {
    /// Creates a new composed optional from an outer and an inner optional.
    #[must_use]
    pub const fn new(first: O1, second: O2) -> Self {
        Self {
            first,
            second,
            _marker: PhantomData,
        }
    }
}

impl<S, T, A, B, C, D, O1, O2> AsyncOptional<S, C, T, D> for ComposedAsyncOptional<O1, O2, A, B>
where
    S: Part,
    T: Part,
    A: Part,
    B: Part,
    C: Part,
    D: Part,
    O1: AsyncOptional<S, A, T, B>,
    O2: AsyncOptional<A, C, B, D, Error = O1::Error>,
{
    type Error = O1::Error;

    fn get_option<'a>(&'a self, source: &'a S) -> Suspended<'a, Option<C>, O1::Error> {
        Box::pin(async move {
            let middle = self.first.get_option(source).await?;
            let part = match middle {
                Some(middle) => self.second.get_option(&middle).await?,
                None => None,
            };
            Ok::<Option<C>, O1::Error>(part)
        })
    }

    fn update<'a, F, Fut>(&'a self, source: S, function: F) -> Suspended<'a, T, O1::Error>
    where
        F: FnMut(C) -> Fut + Send + 'a,
        Fut: Future<Output = Result<D, O1::Error>> + Send + 'a,
    {
        let shared = share(function);
        self.first.update(source, move |middle| {
            self.second.update(middle, forward(Arc::clone(&shared)))
        })
    }
}

impl<O1: Clone, O2: Clone, A, B> Clone for ComposedAsyncOptional<O1, O2, A, B> {
    fn clone(&self) -> Self {
        Self::new(self.first.clone(), self.second.clone())
    }
}

impl<O1: std::fmt::Debug, O2: std::fmt::Debug, A, B> std::fmt::Debug
    for ComposedAsyncOptional<O1, O2, A, B>
{
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("ComposedAsyncOptional")
            .field("first", &self.first)
            .field("second", &self.second)
            .finish()
    }
}

/// The union of two suspending optionals over the same source.
pub struct CombinedAsyncOptional<O1, O2> {
    first: O1,
    second: O2,
}

impl<O1, O2> CombinedAsyncOptional<O1, O2> {
    /// Creates a new `CombinedAsyncOptional`.
    #[must_use]
    pub const fn new(first: O1, second: O2) -> Self {
        Self { first, second }
    }
}

impl<S, A, O1, O2> AsyncOptional<S, A> for CombinedAsyncOptional<O1, O2>
where
    S: Part,
    A: Part,
    O1: AsyncOptional<S, A>,
    O2: AsyncOptional<S, A, Error = O1::Error>,
{
    type Error = O1::Error;

    fn get_option<'a>(&'a self, source: &'a S) -> Suspended<'a, Option<A>, O1::Error> {
        choose(self.first.get_option(source), move || {
            self.second.get_option(source)
        })
    }

    fn update<'a, F, Fut>(&'a self, source: S, mut function: F) -> Suspended<'a, S, O1::Error>
    where
        F: FnMut(A) -> Fut + Send + 'a,
        Fut: Future<Output = Result<A, O1::Error>> + Send + 'a,
    {
        Box::pin(async move {
            tracing::trace!(kind = %EffectKind::SuspendingPartial, operand = "left", "updating");
            let intermediate = self.first.update(source, &mut function).await?;
            tracing::trace!(kind = %EffectKind::SuspendingPartial, operand = "right", "updating");
            self.second.update(intermediate, &mut function).await
        })
    }
}

impl<O1: Clone, O2: Clone> Clone for CombinedAsyncOptional<O1, O2> {
    fn clone(&self) -> Self {
        Self::new(self.first.clone(), self.second.clone())
    }
}

impl<O1: std::fmt::Debug, O2: std::fmt::Debug> std::fmt::Debug for CombinedAsyncOptional<O1, O2> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("CombinedAsyncOptional")
            .field("first", &self.first)
            .field("second", &self.second)
            .finish()
    }
}

/// A suspending optional viewed as a suspending traversal over at most one
/// part.
pub struct AsyncOptionalAsTraversal<O, A, B = A> {
    optional: O,
    _marker: PhantomData<fn(A) -> B>,
}

impl<O, A, B> AsyncOptionalAsTraversal<O, A, B> {
    /// Wraps `optional`.
    #[must_use]
    pub const fn new(optional: O) -> Self {
        Self {
            optional,
            _marker: PhantomData,
        }
    }
}

impl<S, A, T, B, O> AsyncTraversal<S, A, T, B> for AsyncOptionalAsTraversal<O, A, B>
where
    S: Part,
    A: Part,
    T: Part,
    B: Part,
    O: AsyncOptional<S, A, T, B>,
{
    type Error = O::Error;

    fn get_all<'a>(&'a self, source: &'a S) -> Suspended<'a, Vec<A>, O::Error> {
        self.optional
            .get_option(source)
            .map_ok(|part| part.into_iter().collect())
            .boxed()
    }

    fn update<'a, F, Fut>(&'a self, source: S, function: F) -> Suspended<'a, T, O::Error>
    where
        F: FnMut(A) -> Fut + Send + 'a,
        Fut: Future<Output = Result<B, O::Error>> + Send + 'a,
    {
        self.optional.update(source, function)
    }
}

impl<O: Clone, A, B> Clone for AsyncOptionalAsTraversal<O, A, B> {
    fn clone(&self) -> Self {
        Self::new(self.optional.clone())
    }
}

impl<O: std::fmt::Debug, A, B> std::fmt::Debug for AsyncOptionalAsTraversal<O, A, B> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("AsyncOptionalAsTraversal")
            .field("optional", &self.optional)
            .finish()
    }
}
