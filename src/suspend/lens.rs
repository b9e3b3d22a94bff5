//! Suspending lenses: accessors that view exactly one part through a
//! suspending read and write.
//!
//! An [`AsyncLens`] is the [`EffectKind::SuspendingPure`] row of the
//! catalogue. Its read resolves to the single viewed part and its write
//! resolves to the new target, either of which may fail with the accessor's
//! `Error`.
//!
//! # Examples
//!
//! ```
//! use futures::executor::block_on;
//! use lenskit::suspend::{AsyncFunctionLens, AsyncLens, Suspended};
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct Account { balance: i64 }
//!
//! let balance = AsyncFunctionLens::new(
//!     |account: &Account| -> Suspended<'static, i64, String> {
//!         let balance = account.balance;
//!         Box::pin(async move { Ok(balance) })
//!     },
//!     |_: Account, balance: i64| -> Suspended<'static, Account, String> {
//!         Box::pin(async move { Ok(Account { balance }) })
//!     },
//! );
//!
//! let account = Account { balance: 10 };
//! assert_eq!(block_on(balance.get(&account)), Ok(10));
//!
//! let deposited = block_on(balance.update(account, |balance| async move { Ok(balance + 5) }));
//! assert_eq!(deposited, Ok(Account { balance: 15 }));
//! ```

use std::future::Future;
use std::marker::PhantomData;

use futures::future::{self, FutureExt, TryFutureExt};

use super::{Part, Suspended};
use crate::kind::EffectKind;

/// A Lens whose read and write suspend and may fail.
///
/// # Type Parameters
///
/// - `S`: The source type
/// - `A`: The viewed type
/// - `T`: The target type produced by a write
/// - `B`: The type written into the focused part
///
/// # Laws
///
/// The Lens laws hold for every call that does not fail:
///
/// 1. **GetPut Law**: `set(source, get(&source)?)` resolves to `source`
/// 2. **PutGet Law**: `get(&set(source, value)?)` resolves to `value`
pub trait AsyncLens<S, A, T = S, B = A>: Send + Sync
where
    S: Part,
    A: Part,
    T: Part,
    B: Part,
{
    /// The failure type of this accessor's effects.
    type Error: Send + 'static;

    /// The catalogue row of this accessor.
    const KIND: EffectKind = EffectKind::SuspendingPure;

    /// Reads the focused part.
    fn get<'a>(&'a self, source: &'a S) -> Suspended<'a, A, Self::Error>;

    /// Replaces the focused part, resolving to the new target.
    fn set(&self, source: S, value: B) -> Suspended<'_, T, Self::Error>;

    /// Reads the focused part, awaits `function` on it and writes the result
    /// back.
    ///
    /// A failure of the read, the transform or the write aborts the call.
    fn update<'a, F, Fut>(&'a self, source: S, function: F) -> Suspended<'a, T, Self::Error>
    where
        F: FnOnce(A) -> Fut + Send + 'a,
        Fut: Future<Output = Result<B, Self::Error>> + Send + 'a,
    {
        Box::pin(async move {
            let current = self.get(&source).await?;
            let value = function(current).await?;
            self.set(source, value).await
        })
    }

    /// Modifies the focused part with a function that neither suspends nor fails.
    fn modify<'a, F>(&'a self, source: S, function: F) -> Suspended<'a, T, Self::Error>
    where
        F: FnOnce(A) -> B + Send + 'a,
    {
        self.update(source, move |value| future::ready(Ok(function(value))))
    }

    /// Awaits `action` on the focused part and writes the part back unchanged.
    fn perform<'a, F, Fut>(&'a self, source: S, action: F) -> Suspended<'a, T, Self::Error>
    where
        F: FnOnce(&A) -> Fut + Send + 'a,
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

    /// Composes this lens with another suspending lens that fails the same way.
    fn compose<C, D, L>(self, other: L) -> ComposedAsyncLens<Self, L, A, B>
    where
        Self: Sized,
        C: Part,
        D: Part,
        L: AsyncLens<A, C, B, D, Error = Self::Error>,
    {
        ComposedAsyncLens::new(self, other)
    }

    /// Widens this lens to a suspending optional that is always present.
    fn to_optional(self) -> AsyncLensAsOptional<Self, A, B>
    where
        Self: Sized,
    {
        AsyncLensAsOptional::new(self)
    }

    /// Widens this lens to a suspending traversal that visits exactly one part.
    fn to_traversal(self) -> AsyncLensAsTraversal<Self, A, B>
    where
        Self: Sized,
    {
        AsyncLensAsTraversal::new(self)
    }
}

/// A suspending lens built from a getter and a setter that return futures.
///
/// The getter copies what it needs out of the borrowed source before it
/// suspends, so the futures it returns own their data.
pub struct AsyncFunctionLens<S, A, T, B, E, G, St> {
    getter: G,
    setter: St,
    _marker: PhantomData<fn() -> (S, A, T, B, E)>,
}

impl<S, A, T, B, E, G, St> AsyncFunctionLens<S, A, T, B, E, G, St>
where
    G: Fn(&S) -> Suspended<'static, A, E>,
    St: Fn(S, B) -> Suspended<'static, T, E>,
{
    /// Creates a new `AsyncFunctionLens`.
    ///
    /// # Arguments
    ///
    /// * `getter` - Starts a read of the focused part from a borrowed source
    /// * `setter` - Builds the target with the focused part replaced
    #[must_use]
    pub const fn new(getter: G, setter: St) -> Self {
        Self {
            getter,
            setter,
            _marker: PhantomData,
        }
    }
}

impl<S, A, T, B, E, G, St> AsyncLens<S, A, T, B> for AsyncFunctionLens<S, A, T, B, E, G, St>
where
    S: Part,
    A: Part,
    T: Part,
    B: Part,
    E: Send + 'static,
    G: Fn(&S) -> Suspended<'static, A, E> + Send + Sync,
    St: Fn(S, B) -> Suspended<'static, T, E> + Send + Sync,
{
    type Error = E;

    fn get<'a>(&'a self, source: &'a S) -> Suspended<'a, A, E> {
        (self.getter)(source)
    }

    fn set(&self, source: S, value: B) -> Suspended<'_, T, E> {
        (self.setter)(source, value)
    }
}

impl<S, A, T, B, E, G: Clone, St: Clone> Clone for AsyncFunctionLens<S, A, T, B, E, G, St> {
    fn clone(&self) -> Self {
        Self {
            getter: self.getter.clone(),
            setter: self.setter.clone(),
            _marker: PhantomData,
        }
    }
}

impl<S, A, T, B, E, G, St> std::fmt::Debug for AsyncFunctionLens<S, A, T, B, E, G, St> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("AsyncFunctionLens")
            .finish_non_exhaustive()
    }
}

/// A suspending lens composed of two suspending lenses.
///
/// Reads await the outer read and then the inner one. Writes run the inner
/// write inside an update of the outer lens.
pub struct ComposedAsyncLens<L1, L2, A, B = A> {
    first: L1,
    second: L2,
    _marker: PhantomData<fn(A) -> B>,
}

impl<L1, L2, A, B> ComposedAsyncLens<L1, L2, A, B> {
    /// Creates a new composed lens from an outer and an inner lens.
    #[must_use]
    pub const fn new(first: L1, second: L2) -> Self {
        Self {
            first,
            second,
            _marker: PhantomData,
        }
    }
}

impl<S, T, A, B, C, D, L1, L2> AsyncLens<S, C, T, D> for ComposedAsyncLens<L1, L2, A, B>
where
    S: Part,
    T: Part,
    A: Part,
    B: Part,
    C: Part,
    D: Part,
    L1: AsyncLens<S, A, T, B>,
    L2: AsyncLens<A, C, B, D, Error = L1::Error>,
{
    type Error = L1::Error;

    fn get<'a>(&'a self, source: &'a S) -> Suspended<'a, C, L1::Error> {
        Box::pin(async move {
            let middle = self.first.get(source).await?;
            let part = self.second.get(&middle).await?;
            Ok::<C, L1::Error>(part)
        })
    }

    fn set(&self, source: S, value: D) -> Suspended<'_, T, L1::Error> {
        self.first
            .update(source, move |middle| self.second.set(middle, value))
    }

    fn update<'a, F, Fut>(&'a self, source: S, function: F) -> Suspended<'a, T, L1::Error>
    where
        F: FnOnce(C) -> Fut + Send + 'a,
        Fut: Future<Output = Result<D, L1::Error>> + Send + 'a,
    {
        self.first
            .update(source, move |middle| self.second.update(middle, function))
    }
}

impl<L1: Clone, L2: Clone, A, B> Clone for ComposedAsyncLens<L1, L2, A, B> {
    fn clone(&self) -> Self {
        Self::new(self.first.clone(), self.second.clone())
    }
}

impl<L1: std::fmt::Debug, L2: std::fmt::Debug, A, B> std::fmt::Debug
    for ComposedAsyncLens<L1, L2, A, B>
{
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("ComposedAsyncLens")
            .field("first", &self.first)
            .field("second", &self.second)
            .finish()
    }
}

/// A suspending lens viewed as a suspending optional that is always present.
pub struct AsyncLensAsOptional<L, A, B = A> {
    lens: L,
    _marker: PhantomData<fn(A) -> B>,
}

impl<L, A, B> AsyncLensAsOptional<L, A, B> {
    /// Wraps `lens`.
    #[must_use]
    pub const fn new(lens: L) -> Self {
        Self {
            lens,
            _marker: PhantomData,
        }
    }
}

impl<S, A, T, B, L> super::AsyncOptional<S, A, T, B> for AsyncLensAsOptional<L, A, B>
where
    S: Part,
    A: Part,
    T: Part,
    B: Part,
    L: AsyncLens<S, A, T, B>,
{
    type Error = L::Error;

    fn get_option<'a>(&'a self, source: &'a S) -> Suspended<'a, Option<A>, L::Error> {
        self.lens.get(source).map_ok(Some).boxed()
    }

    fn update<'a, F, Fut>(&'a self, source: S, function: F) -> Suspended<'a, T, L::Error>
    where
        F: FnMut(A) -> Fut + Send + 'a,
        Fut: Future<Output = Result<B, L::Error>> + Send + 'a,
    {
        self.lens.update(source, function)
    }
}

impl<L: Clone, A, B> Clone for AsyncLensAsOptional<L, A, B> {
    fn clone(&self) -> Self {
        Self::new(self.lens.clone())
    }
}

impl<L: std::fmt::Debug, A, B> std::fmt::Debug for AsyncLensAsOptional<L, A, B> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("AsyncLensAsOptional")
            .field("lens", &self.lens)
            .finish()
    }
}

/// A suspending lens viewed as a suspending traversal over exactly one part.
pub struct AsyncLensAsTraversal<L, A, B = A> {
    lens: L,
    _marker: PhantomData<fn(A) -> B>,
}

impl<L, A, B> AsyncLensAsTraversal<L, A, B> {
    /// Wraps `lens`.
    #[must_use]
    pub const fn new(lens: L) -> Self {
        Self {
            lens,
            _marker: PhantomData,
        }
    }
}

impl<S, A, T, B, L> super::AsyncTraversal<S, A, T, B> for AsyncLensAsTraversal<L, A, B>
where
    S: Part,
    A: Part,
    T: Part,
    B: Part,
    L: AsyncLens<S, A, T, B>,
{
    type Error = L::Error;

    fn get_all<'a>(&'a self, source: &'a S) -> Suspended<'a, Vec<A>, L::Error> {
        self.lens.get(source).map_ok(|part| vec![part]).boxed()
    }

    fn update<'a, F, Fut>(&'a self, source: S, function: F) -> Suspended<'a, T, L::Error>
    where
        F: FnMut(A) -> Fut + Send + 'a,
        Fut: Future<Output = Result<B, L::Error>> + Send + 'a,
    {
        self.lens.update(source, function)
    }
}

impl<L: Clone, A, B> Clone for AsyncLensAsTraversal<L, A, B> {
    fn clone(&self) -> Self {
        Self::new(self.lens.clone())
    }
}

impl<L: std::fmt::Debug, A, B> std::fmt::Debug for AsyncLensAsTraversal<L, A, B> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("AsyncLensAsTraversal")
            .field("lens", &self.lens)
            .finish()
    }
}
