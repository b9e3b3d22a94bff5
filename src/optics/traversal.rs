//! Traversal optics: accessors that view zero or more parts of a source.
//!
//! A Traversal is the [`EffectKind::Multi`] row of the catalogue. It visits
//! its parts in a fixed order: `get_all` yields them in that order, and
//! `update` applies the transform to them in that same order.
//!
//! # Laws
//!
//! Every Traversal must satisfy two laws:
//!
//! 1. **Modify Identity Law**: Applying the identity function yields the original.
//!    ```text
//!    traversal.modify(source, |x| x) == source
//!    ```
//!
//! 2. **Modify Composition Law**: Consecutive `modify` calls equal a single composed call.
//!    ```text
//!    traversal.modify(traversal.modify(source, f), g) == traversal.modify(source, |x| g(f(x)))
//!    ```
//!
//! # Examples
//!
//! ```
//! use lenskit::optics::{FunctionTraversal, Traversal};
//!
//! let each = FunctionTraversal::new(
//!     |numbers: &Vec<i32>| numbers.iter().collect(),
//!     |numbers: Vec<i32>, function: &mut dyn FnMut(i32) -> i32| {
//!         numbers.into_iter().map(function).collect::<Vec<_>>()
//!     },
//! );
//! let numbers = vec![1, 2, 3, 4, 5];
//!
//! let sum: i32 = each.get_all(&numbers).sum();
//! assert_eq!(sum, 15);
//!
//! let doubled = each.modify(numbers.clone(), |x| x * 2);
//! assert_eq!(doubled, vec![2, 4, 6, 8, 10]);
//!
//! let all_zeros = each.set(numbers, 0);
//! assert_eq!(all_zeros, vec![0, 0, 0, 0, 0]);
//! ```

use std::marker::PhantomData;

use static_assertions::const_assert;

use super::lens::{Lens, LensAsTraversal};
use super::optional::{Optional, OptionalAsTraversal};
use crate::choice::Choice;
use crate::kind::EffectKind;

const_assert!(EffectKind::Multi.supports_choice());
const_assert!(EffectKind::Partial.widens_to(EffectKind::Multi));

/// A Traversal focuses on zero or more parts within a structure.
///
/// # Type Parameters
///
/// - `S`: The source type (the whole structure)
/// - `A`: The viewed type (the focused parts)
/// - `T`: The target type produced by a write
/// - `B`: The type written into each focused part
///
/// # Laws
///
/// 1. **Modify Identity Law**: `traversal.modify(source, |x| x) == source`
/// 2. **Modify Composition Law**: `traversal.modify(traversal.modify(source, f), g) == traversal.modify(source, |x| g(f(x)))`
pub trait Traversal<S, A, T = S, B = A> {
    /// The catalogue row of this accessor.
    const KIND: EffectKind = EffectKind::Multi;

    /// Returns an iterator over references to all focused parts, in
    /// traversal order.
    ///
    /// The iterator is finite; calling `get_all` again restarts it.
    ///
    /// # Arguments
    ///
    /// * `source` - The source structure
    fn get_all<'a>(&'a self, source: &'a S) -> Box<dyn Iterator<Item = &'a A> + 'a>;

    /// Applies `function` to every focused part, in traversal order, and
    /// writes the results back.
    ///
    /// # Arguments
    ///
    /// * `source` - The source structure (consumed)
    /// * `function` - The function to apply to each focused part
    fn update<F>(&self, source: S, function: F) -> T
    where
        F: FnMut(A) -> B;

    /// Collects references to all focused parts.
    ///
    /// # Example
    ///
    /// ```
    /// use lenskit::optics::{Lens, Traversal, identity};
    ///
    /// let whole = identity::<i32>().to_traversal();
    /// assert_eq!(whole.collect(&7), vec![&7]);
    /// ```
    fn collect<'a>(&'a self, source: &'a S) -> Vec<&'a A> {
        self.get_all(source).collect()
    }

    /// Sets every focused part to the same value.
    ///
    /// Equivalent to `update(source, |_| value.clone())`.
    fn set(&self, source: S, value: B) -> T
    where
        B: Clone,
    {
        self.update(source, |_| value.clone())
    }

    /// Modifies every focused part with a pure function.
    ///
    /// The write effect of a Traversal is deterministic, so this is the same
    /// as [`Traversal::update`].
    fn modify<F>(&self, source: S, function: F) -> T
    where
        F: FnMut(A) -> B,
    {
        self.update(source, function)
    }

    /// Runs `action` on every focused part, in traversal order, and writes
    /// the parts back unchanged.
    fn perform<F>(&self, source: S, mut action: F) -> T
    where
        F: FnMut(&A),
        B: From<A>,
    {
        self.update(source, |value| {
            action(&value);
            B::from(value)
        })
    }

    /// Folds over all focused parts.
    ///
    /// # Example
    ///
    /// ```
    /// use lenskit::optics::{FunctionTraversal, Traversal};
    ///
    /// let each = FunctionTraversal::new(
    ///     |numbers: &Vec<i32>| numbers.iter().collect(),
    ///     |numbers: Vec<i32>, function: &mut dyn FnMut(i32) -> i32| {
    ///         numbers.into_iter().map(function).collect::<Vec<_>>()
    ///     },
    /// );
    /// let sum = each.fold(&vec![1, 2, 3], 0, |accumulator, element| accumulator + element);
    /// assert_eq!(sum, 6);
    /// ```
    fn fold<C, F>(&self, source: &S, initial: C, mut function: F) -> C
    where
        F: FnMut(C, &A) -> C,
    {
        self.get_all(source)
            .fold(initial, |accumulator, element| function(accumulator, element))
    }

    /// Returns the number of focused parts.
    fn length(&self, source: &S) -> usize {
        self.get_all(source).count()
    }

    /// Tests if all focused parts satisfy a predicate.
    ///
    /// Returns `true` if there are no focused parts (vacuously true).
    fn for_all<P>(&self, source: &S, predicate: P) -> bool
    where
        P: FnMut(&A) -> bool,
    {
        self.get_all(source).all(predicate)
    }

    /// Tests if any focused part satisfies a predicate.
    fn exists<P>(&self, source: &S, predicate: P) -> bool
    where
        P: FnMut(&A) -> bool,
    {
        self.get_all(source).any(predicate)
    }

    /// Returns a reference to the first focused part, if any.
    fn head_option<'a>(&'a self, source: &'a S) -> Option<&'a A> {
        self.get_all(source).next()
    }

    /// Composes this traversal with another traversal.
    ///
    /// The composed traversal visits, for each part of this traversal in
    /// order, every part of `other` in order.
    fn compose<C, D, U>(self, other: U) -> ComposedTraversal<Self, U, A, B>
    where
        Self: Sized,
        U: Traversal<A, C, B, D>,
    {
        ComposedTraversal::new(self, other)
    }

    /// Combines this traversal with another one over the same source.
    ///
    /// Reading yields this traversal's parts followed by `other`'s parts,
    /// duplicates included. Writing and updating apply this traversal first
    /// and `other` to the result; a part both traversals visit is
    /// transformed twice.
    ///
    /// # Example
    ///
    /// ```
    /// use lenskit::optics::{Lens, Traversal, identity};
    ///
    /// let twice = identity::<i32>()
    ///     .to_traversal()
    ///     .combine(identity::<i32>().to_traversal());
    ///
    /// assert_eq!(twice.collect(&3), vec![&3, &3]);
    /// assert_eq!(twice.set(3, 9), 9);
    /// assert_eq!(twice.modify(3, |x| x * 2), 12);
    /// ```
    fn combine<U>(self, other: U) -> CombinedTraversal<Self, U>
    where
        Self: Sized + Traversal<S, A>,
        U: Traversal<S, A>,
    {
        CombinedTraversal::new(self, other)
    }

    /// Widens this traversal to a suspending traversal whose effects fail with `E`.
    #[cfg(feature = "async")]
    fn suspend<E>(self) -> crate::suspend::LiftedTraversal<Self, E>
    where
        Self: Sized,
    {
        crate::suspend::LiftedTraversal::new(self)
    }
}

// =============================================================================
// FunctionTraversal - Traversal built from a getter and a modifier
// =============================================================================

/// A traversal implemented using a getter and a modifier.
///
/// The getter returns the focused parts in traversal order. The modifier
/// receives the source and the transform; it must call the transform once per
/// part, in the same order.
pub struct FunctionTraversal<S, A, T, B, G, M> {
    getter: G,
    modifier: M,
    _marker: PhantomData<fn(S, B) -> (A, T)>,
}

impl<S, A, T, B, G, M> FunctionTraversal<S, A, T, B, G, M>
where
    G: Fn(&S) -> Vec<&A>,
    M: Fn(S, &mut dyn FnMut(A) -> B) -> T,
{
    /// Creates a new `FunctionTraversal`.
    ///
    /// # Arguments
    ///
    /// * `getter` - Borrows every focused part, in traversal order
    /// * `modifier` - Rebuilds the target with the transform applied to every part
    #[must_use]
    pub const fn new(getter: G, modifier: M) -> Self {
        Self {
            getter,
            modifier,
            _marker: PhantomData,
        }
    }
}

impl<S, A, T, B, G, M> Traversal<S, A, T, B> for FunctionTraversal<S, A, T, B, G, M>
where
    G: Fn(&S) -> Vec<&A>,
    M: Fn(S, &mut dyn FnMut(A) -> B) -> T,
{
    fn get_all<'a>(&'a self, source: &'a S) -> Box<dyn Iterator<Item = &'a A> + 'a> {
        Box::new((self.getter)(source).into_iter())
    }

    fn collect<'a>(&'a self, source: &'a S) -> Vec<&'a A> {
        (self.getter)(source)
    }

    fn update<F>(&self, source: S, mut function: F) -> T
    where
        F: FnMut(A) -> B,
    {
        (self.modifier)(source, &mut function)
    }
}

impl<S, A, T, B, G: Clone, M: Clone> Clone for FunctionTraversal<S, A, T, B, G, M> {
    fn clone(&self) -> Self {
        Self {
            getter: self.getter.clone(),
            modifier: self.modifier.clone(),
            _marker: PhantomData,
        }
    }
}

impl<S, A, T, B, G, M> std::fmt::Debug for FunctionTraversal<S, A, T, B, G, M> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("FunctionTraversal")
            .finish_non_exhaustive()
    }
}

// =============================================================================
// ComposedTraversal - Sequential composition
// =============================================================================

/// A traversal composed of two traversals.
///
/// # Type Parameters
///
/// - `T1`: The outer traversal
/// - `T2`: The inner traversal
/// - `A`: The intermediate viewed type
/// - `B`: The intermediate written type
pub struct ComposedTraversal<T1, T2, A, B = A> {
    first: T1,
    second: T2,
    _marker: PhantomData<fn(A) -> B>,
}

impl<T1, T2, A, B> ComposedTraversal<T1, T2, A, B> {
    /// Creates a new composed traversal.
    ///
    /// # Arguments
    ///
    /// * `first` - The outer traversal
    /// * `second` - The inner traversal
    #[must_use]
    pub const fn new(first: T1, second: T2) -> Self {
        Self {
            first,
            second,
            _marker: PhantomData,
        }
    }
}

impl<T1: Clone, T2: Clone, A, B> Clone for ComposedTraversal<T1, T2, A, B> {
    fn clone(&self) -> Self {
        Self::new(self.first.clone(), self.second.clone())
    }
}

impl<T1: std::fmt::Debug, T2: std::fmt::Debug, A, B> std::fmt::Debug
    for ComposedTraversal<T1, T2, A, B>
{
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("ComposedTraversal")
            .field("first", &self.first)
            .field("second", &self.second)
            .finish()
    }
}

impl<S, T, A, B, C, D, T1, T2> Traversal<S, C, T, D> for ComposedTraversal<T1, T2, A, B>
where
    T1: Traversal<S, A, T, B>,
    T2: Traversal<A, C, B, D>,
{
    fn get_all<'a>(&'a self, source: &'a S) -> Box<dyn Iterator<Item = &'a C> + 'a> {
        Box::new(
            self.first
                .get_all(source)
                .flat_map(move |intermediate| self.second.get_all(intermediate)),
        )
    }

    fn update<F>(&self, source: S, mut function: F) -> T
    where
        F: FnMut(C) -> D,
    {
        self.first.update(source, |intermediate| {
            self.second.update(intermediate, &mut function)
        })
    }
}

// =============================================================================
// CombinedTraversal - Parallel union
// =============================================================================

/// The union of two traversals over the same source.
pub struct CombinedTraversal<T1, T2> {
    first: T1,
    second: T2,
}

impl<T1, T2> CombinedTraversal<T1, T2> {
    /// Creates a new `CombinedTraversal`.
    #[must_use]
    pub const fn new(first: T1, second: T2) -> Self {
        Self { first, second }
    }
}

impl<T1: Clone, T2: Clone> Clone for CombinedTraversal<T1, T2> {
    fn clone(&self) -> Self {
        Self::new(self.first.clone(), self.second.clone())
    }
}

impl<T1: std::fmt::Debug, T2: std::fmt::Debug> std::fmt::Debug for CombinedTraversal<T1, T2> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("CombinedTraversal")
            .field("first", &self.first)
            .field("second", &self.second)
            .finish()
    }
}

impl<S, A, T1, T2> Traversal<S, A> for CombinedTraversal<T1, T2>
where
    T1: Traversal<S, A>,
    T2: Traversal<S, A>,
{
    fn get_all<'a>(&'a self, source: &'a S) -> Box<dyn Iterator<Item = &'a A> + 'a> {
        self.first
            .get_all(source)
            .choice(|| self.second.get_all(source))
    }

    fn update<F>(&self, source: S, mut function: F) -> S
    where
        F: FnMut(A) -> A,
    {
        let intermediate = self.first.update(source, &mut function);
        self.second.update(intermediate, function)
    }
}

// =============================================================================
// Widened accessors
// =============================================================================

impl<S, A, T, B, L> Traversal<S, A, T, B> for LensAsTraversal<L, A, B>
where
    L: Lens<S, A, T, B>,
    A: Clone,
{
    fn get_all<'a>(&'a self, source: &'a S) -> Box<dyn Iterator<Item = &'a A> + 'a> {
        Box::new(std::iter::once(self.lens.get(source)))
    }

    fn update<F>(&self, source: S, function: F) -> T
    where
        F: FnMut(A) -> B,
    {
        self.lens.update(source, function)
    }

    fn length(&self, _source: &S) -> usize {
        1
    }
}

impl<S, A, T, B, O> Traversal<S, A, T, B> for OptionalAsTraversal<O, A, B>
where
    O: Optional<S, A, T, B>,
{
    fn get_all<'a>(&'a self, source: &'a S) -> Box<dyn Iterator<Item = &'a A> + 'a> {
        Box::new(self.optional.get_option(source).into_iter())
    }

    fn update<F>(&self, source: S, function: F) -> T
    where
        F: FnMut(A) -> B,
    {
        self.optional.update(source, function)
    }
}
