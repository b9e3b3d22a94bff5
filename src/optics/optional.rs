//! Optional optics: accessors that view zero or one part of a source.
//!
//! An Optional is the [`EffectKind::Partial`] row of the catalogue. A source
//! that does not contain the part is not an error: reading yields `None`, and
//! writing or updating returns the source unchanged.
//!
//! # Laws
//!
//! Every Optional must satisfy two laws (when the part is present):
//!
//! 1. **`GetOptionSet` Law**: Getting and setting back yields the original.
//!    ```text
//!    if optional.get_option(&source).is_some() then
//!        optional.set(source.clone(), optional.get_option(&source).unwrap().clone()) == source
//!    ```
//!
//! 2. **`SetGetOption` Law**: Setting then getting yields the set value.
//!    ```text
//!    if optional.get_option(&source).is_some() then
//!        optional.get_option(&optional.set(source, value)) == Some(&value)
//!    ```
//!
//! # Examples
//!
//! ```
//! use lenskit::optics::{FunctionOptional, Optional};
//!
//! #[derive(Clone, PartialEq, Debug)]
//! enum Shape { Circle(f64), Square(f64) }
//!
//! let radius = FunctionOptional::new(
//!     |shape: &Shape| match shape {
//!         Shape::Circle(radius) => Some(radius),
//!         Shape::Square(_) => None,
//!     },
//!     |shape: Shape, function: &mut dyn FnMut(f64) -> f64| match shape {
//!         Shape::Circle(radius) => Shape::Circle(function(radius)),
//!         other => other,
//!     },
//! );
//!
//! assert_eq!(radius.get_option(&Shape::Circle(2.0)), Some(&2.0));
//! assert_eq!(radius.get_option(&Shape::Square(2.0)), None);
//! assert_eq!(radius.set(Shape::Square(2.0), 5.0), Shape::Square(2.0));
//! ```

use std::marker::PhantomData;

use static_assertions::const_assert;

use super::lens::{Lens, LensAsOptional};
use crate::choice::Choice;
use crate::kind::EffectKind;

const_assert!(EffectKind::Partial.supports_choice());
const_assert!(EffectKind::Pure.widens_to(EffectKind::Partial));

/// An Optional focuses on a part that may or may not exist.
///
/// # Type Parameters
///
/// - `S`: The source type (the whole structure)
/// - `A`: The viewed type (the focused part, if present)
/// - `T`: The target type produced by a write
/// - `B`: The type written into the focused part
///
/// # Laws
///
/// 1. **`GetOptionSet` Law**: If present, getting and setting back yields the original.
/// 2. **`SetGetOption` Law**: If present, setting then getting yields the set value.
pub trait Optional<S, A, T = S, B = A> {
    /// The catalogue row of this accessor.
    const KIND: EffectKind = EffectKind::Partial;

    /// Attempts to get a reference to the focused part.
    ///
    /// # Arguments
    ///
    /// * `source` - The source structure
    ///
    /// # Returns
    ///
    /// A reference to the focused part if present, `None` otherwise
    fn get_option<'a>(&self, source: &'a S) -> Option<&'a A>;

    /// Applies `function` to the focused part, if present, and writes the
    /// result back.
    ///
    /// `function` is called at most once. When the part is absent the source
    /// is carried over to the target untouched.
    ///
    /// # Arguments
    ///
    /// * `source` - The source structure (consumed)
    /// * `function` - The function to apply to the focused part
    fn update<F>(&self, source: S, function: F) -> T
    where
        F: FnMut(A) -> B;

    /// Replaces the focused part, if present.
    ///
    /// Equivalent to `update(source, |_| value.clone())`.
    fn set(&self, source: S, value: B) -> T
    where
        B: Clone,
    {
        self.update(source, |_| value.clone())
    }

    /// Modifies the focused part with a pure function, if present.
    ///
    /// The write effect of an Optional is deterministic, so this is the same
    /// as [`Optional::update`].
    fn modify<F>(&self, source: S, function: F) -> T
    where
        F: FnMut(A) -> B,
    {
        self.update(source, function)
    }

    /// Runs `action` on the focused part, if present, and writes the part
    /// back unchanged.
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

    /// Checks if the focused part is present.
    fn is_present(&self, source: &S) -> bool {
        self.get_option(source).is_some()
    }

    /// Composes this optional with another optional to focus on a nested part.
    ///
    /// The composed optional is present only when both levels are present.
    fn compose<C, D, O>(self, other: O) -> ComposedOptional<Self, O, A, B>
    where
        Self: Sized,
        O: Optional<A, C, B, D>,
    {
        ComposedOptional::new(self, other)
    }

    /// Combines this optional with another one over the same source.
    ///
    /// Reading yields this optional's part if present, otherwise `other`'s.
    /// Writing and updating apply this optional first and `other` to the
    /// result, so both parts are written when both are present.
    ///
    /// # Example
    ///
    /// ```
    /// use lenskit::optics::{FunctionOptional, Optional};
    ///
    /// let first = FunctionOptional::new(
    ///     |pair: &(Option<i32>, Option<i32>)| pair.0.as_ref(),
    ///     |pair: (Option<i32>, Option<i32>), function: &mut dyn FnMut(i32) -> i32| {
    ///         (pair.0.map(function), pair.1)
    ///     },
    /// );
    /// let second = FunctionOptional::new(
    ///     |pair: &(Option<i32>, Option<i32>)| pair.1.as_ref(),
    ///     |pair: (Option<i32>, Option<i32>), function: &mut dyn FnMut(i32) -> i32| {
    ///         (pair.0, pair.1.map(function))
    ///     },
    /// );
    /// let either = first.combine(second);
    ///
    /// assert_eq!(either.get_option(&(None, Some(2))), Some(&2));
    /// assert_eq!(either.get_option(&(Some(1), Some(2))), Some(&1));
    /// assert_eq!(either.set((Some(1), Some(2)), 0), (Some(0), Some(0)));
    /// ```
    fn combine<O>(self, other: O) -> CombinedOptional<Self, O>
    where
        Self: Sized + Optional<S, A>,
        O: Optional<S, A>,
    {
        CombinedOptional::new(self, other)
    }

    /// Widens this optional to a traversal that visits zero or one part.
    fn to_traversal(self) -> OptionalAsTraversal<Self, A, B>
    where
        Self: Sized,
    {
        OptionalAsTraversal::new(self)
    }

    /// Widens this optional to a suspending optional whose effects fail with `E`.
    #[cfg(feature = "async")]
    fn suspend<E>(self) -> crate::suspend::LiftedOptional<Self, E>
    where
        Self: Sized,
    {
        crate::suspend::LiftedOptional::new(self)
    }
}

/// An optional implemented using a getter and a modifier.
///
/// The modifier receives the source and the transform; it must call the
/// transform at most once, on the part the getter returns.
pub struct FunctionOptional<S, A, T, B, G, M> {
    getter: G,
    modifier: M,
    _marker: PhantomData<fn(S, B) -> (A, T)>,
}

impl<S, A, T, B, G, M> FunctionOptional<S, A, T, B, G, M>
where
    G: Fn(&S) -> Option<&A>,
    M: Fn(S, &mut dyn FnMut(A) -> B) -> T,
{
    /// Creates a new `FunctionOptional`.
    ///
    /// # Arguments
    ///
    /// * `getter` - Borrows the focused part, if present
    /// * `modifier` - Rebuilds the target with the transform applied to the part
    #[must_use]
    pub const fn new(getter: G, modifier: M) -> Self {
        Self {
            getter,
            modifier,
            _marker: PhantomData,
        }
    }
}

impl<S, A, T, B, G, M> Optional<S, A, T, B> for FunctionOptional<S, A, T, B, G, M>
where
    G: Fn(&S) -> Option<&A>,
    M: Fn(S, &mut dyn FnMut(A) -> B) -> T,
{
    fn get_option<'a>(&self, source: &'a S) -> Option<&'a A> {
        (self.getter)(source)
    }

    fn update<F>(&self, source: S, mut function: F) -> T
    where
        F: FnMut(A) -> B,
    {
        (self.modifier)(source, &mut function)
    }
}

impl<S, A, T, B, G: Clone, M: Clone> Clone for FunctionOptional<S, A, T, B, G, M> {
    fn clone(&self) -> Self {
        Self {
            getter: self.getter.clone(),
            modifier: self.modifier.clone(),
            _marker: PhantomData,
        }
    }
}

impl<S, A, T, B, G, M> std::fmt::Debug for FunctionOptional<S, A, T, B, G, M> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("FunctionOptional")
            .finish_non_exhaustive()
    }
}

/// The result of composing two Optionals.
///
/// # Type Parameters
///
/// - `O1`: The outer optional
/// - `O2`: The inner optional
/// - `A`: The intermediate viewed type
/// - `B`: The intermediate written type
pub struct ComposedOptional<O1, O2, A, B = A> {
    first: O1,
    second: O2,
    _marker: PhantomData<fn(A) -> B>,
}

impl<O1, O2, A, B> ComposedOptional<O1, O2, A, B> {
    /// Creates a new `ComposedOptional`.
    ///
    /// # Arguments
    ///
    /// * `first` - The outer optional
    /// * `second` - The inner optional
    #[must_use]
    pub const fn new(first: O1, second: O2) -> Self {
        Self {
            first,
            second,
            _marker: PhantomData,
        }
    }
}

impl<S, T, A, B, C, D, O1, O2> Optional<S, C, T, D> for ComposedOptional<O1, O2, A, B>
where
    O1: Optional<S, A, T, B>,
    O2: Optional<A, C, B, D>,
    A: 'static,
{
    fn get_option<'a>(&self, source: &'a S) -> Option<&'a C> {
        self.first
            .get_option(source)
            .and_then(|intermediate| self.second.get_option(intermediate))
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

impl<O1: Clone, O2: Clone, A, B> Clone for ComposedOptional<O1, O2, A, B> {
    fn clone(&self) -> Self {
        Self::new(self.first.clone(), self.second.clone())
    }
}

impl<O1: std::fmt::Debug, O2: std::fmt::Debug, A, B> std::fmt::Debug
    for ComposedOptional<O1, O2, A, B>
{
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("ComposedOptional")
            .field("first", &self.first)
            .field("second", &self.second)
            .finish()
    }
}

/// The union of two optionals over the same source.
///
/// Reads take the first present part; writes and updates run `first` and
/// then `second` on the intermediate result.
pub struct CombinedOptional<O1, O2> {
    first: O1,
    second: O2,
}

impl<O1, O2> CombinedOptional<O1, O2> {
    /// Creates a new `CombinedOptional`.
    #[must_use]
    pub const fn new(first: O1, second: O2) -> Self {
        Self { first, second }
    }
}

impl<S, A, O1, O2> Optional<S, A> for CombinedOptional<O1, O2>
where
    O1: Optional<S, A>,
    O2: Optional<S, A>,
{
    fn get_option<'a>(&self, source: &'a S) -> Option<&'a A> {
        self.first
            .get_option(source)
            .choice(|| self.second.get_option(source))
    }

    fn update<F>(&self, source: S, mut function: F) -> S
    where
        F: FnMut(A) -> A,
    {
        let intermediate = self.first.update(source, &mut function);
        self.second.update(intermediate, function)
    }
}

impl<O1: Clone, O2: Clone> Clone for CombinedOptional<O1, O2> {
    fn clone(&self) -> Self {
        Self::new(self.first.clone(), self.second.clone())
    }
}

impl<O1: std::fmt::Debug, O2: std::fmt::Debug> std::fmt::Debug for CombinedOptional<O1, O2> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("CombinedOptional")
            .field("first", &self.first)
            .field("second", &self.second)
            .finish()
    }
}

// =============================================================================
// LensAsOptional - Optional trait implementation for Lens
// =============================================================================

impl<S, A, T, B, L> Optional<S, A, T, B> for LensAsOptional<L, A, B>
where
    L: Lens<S, A, T, B>,
    A: Clone,
{
    fn get_option<'a>(&self, source: &'a S) -> Option<&'a A> {
        Some(self.lens.get(source))
    }

    fn update<F>(&self, source: S, function: F) -> T
    where
        F: FnMut(A) -> B,
    {
        self.lens.update(source, function)
    }

    fn set(&self, source: S, value: B) -> T
    where
        B: Clone,
    {
        self.lens.set(source, value)
    }

    fn is_present(&self, _source: &S) -> bool {
        true
    }
}

/// An optional viewed as a traversal that visits zero or one part.
pub struct OptionalAsTraversal<O, A, B = A> {
    pub(crate) optional: O,
    _marker: PhantomData<fn(A) -> B>,
}

impl<O, A, B> OptionalAsTraversal<O, A, B> {
    /// Wraps `optional`.
    #[must_use]
    pub const fn new(optional: O) -> Self {
        Self {
            optional,
            _marker: PhantomData,
        }
    }
}

impl<O: Clone, A, B> Clone for OptionalAsTraversal<O, A, B> {
    fn clone(&self) -> Self {
        Self::new(self.optional.clone())
    }
}

impl<O: std::fmt::Debug, A, B> std::fmt::Debug for OptionalAsTraversal<O, A, B> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("OptionalAsTraversal")
            .field("optional", &self.optional)
            .finish()
    }
}
