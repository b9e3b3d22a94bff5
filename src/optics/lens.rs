//! Lens optics: accessors that view exactly one part of a source.
//!
//! A Lens is the [`EffectKind::Pure`] row of the catalogue: its read returns
//! the single viewed part directly and its write returns the new target
//! directly.
//!
//! # Laws
//!
//! Every Lens must satisfy three laws:
//!
//! 1. **GetPut Law**: Getting and setting back yields the original.
//!    ```text
//!    lens.set(source, lens.get(&source).clone()) == source
//!    ```
//!
//! 2. **PutGet Law**: Setting then getting yields the set value.
//!    ```text
//!    lens.get(&lens.set(source, value)) == &value
//!    ```
//!
//! 3. **PutPut Law**: Two consecutive sets is equivalent to the last set.
//!    ```text
//!    lens.set(lens.set(source, v1), v2) == lens.set(source, v2)
//!    ```
//!
//! # Examples
//!
//! ```
//! use lenskit::optics::{FunctionLens, Lens};
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct Point { x: i32, y: i32 }
//!
//! let x_lens = FunctionLens::new(
//!     |point: &Point| &point.x,
//!     |point: Point, x: i32| Point { x, ..point },
//! );
//!
//! let point = Point { x: 10, y: 20 };
//! assert_eq!(*x_lens.get(&point), 10);
//!
//! let updated = x_lens.set(point, 100);
//! assert_eq!(updated, Point { x: 100, y: 20 });
//! ```

use std::marker::PhantomData;

use crate::kind::EffectKind;

/// A Lens focuses on exactly one part of a larger structure.
///
/// # Type Parameters
///
/// - `S`: The source type (the whole structure)
/// - `A`: The viewed type (the focused part)
/// - `T`: The target type produced by a write, `S` unless the write changes the
///   shape of the source
/// - `B`: The type written into the focused part, `A` unless the write changes
///   the shape of the part
///
/// # Laws
///
/// 1. **GetPut Law**: `lens.set(source, lens.get(&source).clone()) == source`
/// 2. **PutGet Law**: `lens.get(&lens.set(source, value)) == &value`
/// 3. **PutPut Law**: `lens.set(lens.set(source, v1), v2) == lens.set(source, v2)`
pub trait Lens<S, A, T = S, B = A> {
    /// The catalogue row of this accessor.
    const KIND: EffectKind = EffectKind::Pure;

    /// Gets a reference to the focused part.
    ///
    /// # Arguments
    ///
    /// * `source` - The source structure
    ///
    /// # Returns
    ///
    /// A reference to the focused part
    fn get<'a>(&self, source: &'a S) -> &'a A;

    /// Replaces the focused part, returning the new target.
    ///
    /// # Arguments
    ///
    /// * `source` - The source structure (consumed)
    /// * `value` - The new value for the focused part
    ///
    /// # Returns
    ///
    /// A new target with the focused part replaced
    fn set(&self, source: S, value: B) -> T;

    /// Applies `function` to the focused part and writes the result back.
    ///
    /// `set(source, value)` is equivalent to `update(source, |_| value)`.
    ///
    /// # Arguments
    ///
    /// * `source` - The source structure (consumed)
    /// * `function` - The function to apply to the focused part
    ///
    /// # Returns
    ///
    /// A new target with the focused part transformed
    fn update<F>(&self, source: S, function: F) -> T
    where
        F: FnOnce(A) -> B,
        A: Clone,
    {
        let current = self.get(&source).clone();
        self.set(source, function(current))
    }

    /// Modifies the focused part with a pure function.
    ///
    /// The write effect of a Lens is deterministic, so this is the same as
    /// [`Lens::update`].
    ///
    /// # Example
    ///
    /// ```
    /// use lenskit::optics::{FunctionLens, Lens};
    ///
    /// #[derive(Clone, PartialEq, Debug)]
    /// struct Point { x: i32, y: i32 }
    ///
    /// let x_lens = FunctionLens::new(
    ///     |point: &Point| &point.x,
    ///     |point: Point, x: i32| Point { x, ..point },
    /// );
    /// let doubled = x_lens.modify(Point { x: 10, y: 20 }, |x| x * 2);
    /// assert_eq!(doubled.x, 20);
    /// ```
    fn modify<F>(&self, source: S, function: F) -> T
    where
        F: FnOnce(A) -> B,
        A: Clone,
    {
        self.update(source, function)
    }

    /// Modifies the focused part by applying a function to a reference.
    ///
    /// Avoids cloning the focused part when the new value can be computed
    /// from a borrow.
    fn modify_ref<F>(&self, source: S, function: F) -> T
    where
        F: FnOnce(&A) -> B,
    {
        let new_value = function(self.get(&source));
        self.set(source, new_value)
    }

    /// Runs `action` on the focused part and writes the part back unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use lenskit::optics::{FunctionLens, Lens};
    ///
    /// let first = FunctionLens::new(
    ///     |pair: &(i32, i32)| &pair.0,
    ///     |pair: (i32, i32), first: i32| (first, pair.1),
    /// );
    ///
    /// let mut seen = Vec::new();
    /// let result = first.perform((1, 2), |value| seen.push(*value));
    /// assert_eq!(result, (1, 2));
    /// assert_eq!(seen, vec![1]);
    /// ```
    fn perform<F>(&self, source: S, action: F) -> T
    where
        F: FnOnce(&A),
        A: Clone,
        B: From<A>,
    {
        self.update(source, |value| {
            action(&value);
            B::from(value)
        })
    }

    /// Composes this lens with another lens to focus on a nested part.
    ///
    /// # Type Parameters
    ///
    /// - `C`: The viewed type of the inner lens
    /// - `D`: The written type of the inner lens
    /// - `L`: The type of the inner lens
    ///
    /// # Arguments
    ///
    /// * `other` - The inner lens, whose source is this lens's viewed part
    ///
    /// # Returns
    ///
    /// A composed lens that focuses on the nested part
    fn compose<C, D, L>(self, other: L) -> ComposedLens<Self, L, A, B>
    where
        Self: Sized,
        L: Lens<A, C, B, D>,
    {
        ComposedLens::new(self, other)
    }

    /// Widens this lens to an optional that is always present.
    fn to_optional(self) -> LensAsOptional<Self, A, B>
    where
        Self: Sized,
    {
        LensAsOptional::new(self)
    }

    /// Widens this lens to a traversal that visits exactly one part.
    fn to_traversal(self) -> LensAsTraversal<Self, A, B>
    where
        Self: Sized,
    {
        LensAsTraversal::new(self)
    }

    /// Widens this lens to a suspending lens whose effects fail with `E`.
    #[cfg(feature = "async")]
    fn suspend<E>(self) -> crate::suspend::LiftedLens<Self, E>
    where
        Self: Sized,
    {
        crate::suspend::LiftedLens::new(self)
    }
}

/// A lens implemented using getter and setter functions.
///
/// # Example
///
/// ```
/// use lenskit::optics::{FunctionLens, Lens};
///
/// // A write may change the type of the focused part.
/// let first = FunctionLens::new(
///     |pair: &(i32, char)| &pair.0,
///     |pair: (i32, char), first: String| (first, pair.1),
/// );
///
/// let updated = first.set((1, 'a'), "uno".to_string());
/// assert_eq!(updated, ("uno".to_string(), 'a'));
/// ```
pub struct FunctionLens<S, A, T, B, G, St> {
    getter: G,
    setter: St,
    _marker: PhantomData<fn(S, B) -> (A, T)>,
}

impl<S, A, T, B, G, St> FunctionLens<S, A, T, B, G, St>
where
    G: Fn(&S) -> &A,
    St: Fn(S, B) -> T,
{
    /// Creates a new `FunctionLens` from a getter and setter.
    ///
    /// # Arguments
    ///
    /// * `getter` - A function that borrows the focused part from the source
    /// * `setter` - A function that builds the target with the part replaced
    #[must_use]
    pub const fn new(getter: G, setter: St) -> Self {
        Self {
            getter,
            setter,
            _marker: PhantomData,
        }
    }
}

impl<S, A, T, B, G, St> Lens<S, A, T, B> for FunctionLens<S, A, T, B, G, St>
where
    G: Fn(&S) -> &A,
    St: Fn(S, B) -> T,
{
    fn get<'a>(&self, source: &'a S) -> &'a A {
        (self.getter)(source)
    }

    fn set(&self, source: S, value: B) -> T {
        (self.setter)(source, value)
    }
}

impl<S, A, T, B, G: Clone, St: Clone> Clone for FunctionLens<S, A, T, B, G, St> {
    fn clone(&self) -> Self {
        Self {
            getter: self.getter.clone(),
            setter: self.setter.clone(),
            _marker: PhantomData,
        }
    }
}

impl<S, A, T, B, G, St> std::fmt::Debug for FunctionLens<S, A, T, B, G, St> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("FunctionLens")
            .finish_non_exhaustive()
    }
}

/// A lens composed of two lenses.
///
/// Reads go through the outer lens and then the inner one. Writes and updates
/// run the inner operation inside an update of the outer lens, so
/// `(a.compose(b)).compose(c)` and `a.compose(b.compose(c))` behave identically.
///
/// # Type Parameters
///
/// - `L1`: The outer lens
/// - `L2`: The inner lens
/// - `A`: The intermediate viewed type (viewed by L1, source of L2)
/// - `B`: The intermediate written type (written by L1, target of L2)
///
/// # Example
///
/// ```
/// use lenskit::optics::{FunctionLens, Lens};
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Inner { value: i32 }
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Outer { inner: Inner }
///
/// let inner_lens = FunctionLens::new(
///     |outer: &Outer| &outer.inner,
///     |_: Outer, inner: Inner| Outer { inner },
/// );
/// let value_lens = FunctionLens::new(
///     |inner: &Inner| &inner.value,
///     |_: Inner, value: i32| Inner { value },
/// );
/// let outer_value = inner_lens.compose(value_lens);
///
/// let data = Outer { inner: Inner { value: 42 } };
/// assert_eq!(*outer_value.get(&data), 42);
/// assert_eq!(outer_value.set(data, 7).inner.value, 7);
/// ```
pub struct ComposedLens<L1, L2, A, B = A> {
    first: L1,
    second: L2,
    _marker: PhantomData<fn(A) -> B>,
}

impl<L1, L2, A, B> ComposedLens<L1, L2, A, B> {
    /// Creates a new composed lens.
    ///
    /// # Arguments
    ///
    /// * `first` - The outer lens (focuses on the intermediate structure)
    /// * `second` - The inner lens (focuses on the final part)
    #[must_use]
    pub const fn new(first: L1, second: L2) -> Self {
        Self {
            first,
            second,
            _marker: PhantomData,
        }
    }
}

impl<S, T, A, B, C, D, L1, L2> Lens<S, C, T, D> for ComposedLens<L1, L2, A, B>
where
    L1: Lens<S, A, T, B>,
    L2: Lens<A, C, B, D>,
    A: Clone + 'static,
{
    fn get<'a>(&self, source: &'a S) -> &'a C {
        self.second.get(self.first.get(source))
    }

    fn set(&self, source: S, value: D) -> T {
        self.first
            .update(source, |middle| self.second.set(middle, value))
    }

    fn update<F>(&self, source: S, function: F) -> T
    where
        F: FnOnce(C) -> D,
        C: Clone,
    {
        self.first
            .update(source, |middle| self.second.update(middle, function))
    }
}

impl<L1: Clone, L2: Clone, A, B> Clone for ComposedLens<L1, L2, A, B> {
    fn clone(&self) -> Self {
        Self::new(self.first.clone(), self.second.clone())
    }
}

impl<L1: std::fmt::Debug, L2: std::fmt::Debug, A, B> std::fmt::Debug
    for ComposedLens<L1, L2, A, B>
{
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("ComposedLens")
            .field("first", &self.first)
            .field("second", &self.second)
            .finish()
    }
}

/// The lens that focuses on the whole source.
///
/// Reading returns the source itself and writing replaces it. Widened to an
/// optional or traversal it is the identity of those flavors as well.
pub struct Identity<S> {
    _marker: PhantomData<fn(S) -> S>,
}

/// Creates the lens that focuses on the whole source.
///
/// # Example
///
/// ```
/// use lenskit::optics::{Lens, identity};
///
/// let whole = identity::<i32>();
/// assert_eq!(*whole.get(&5), 5);
/// assert_eq!(whole.set(5, 9), 9);
/// assert_eq!(whole.modify(5, |x| x + 1), 6);
/// ```
#[must_use]
pub const fn identity<S>() -> Identity<S> {
    Identity {
        _marker: PhantomData,
    }
}

impl<S> Lens<S, S> for Identity<S> {
    fn get<'a>(&self, source: &'a S) -> &'a S {
        source
    }

    fn set(&self, _source: S, value: S) -> S {
        value
    }

    fn update<F>(&self, source: S, function: F) -> S
    where
        F: FnOnce(S) -> S,
        S: Clone,
    {
        function(source)
    }
}

impl<S> Clone for Identity<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for Identity<S> {}

impl<S> Default for Identity<S> {
    fn default() -> Self {
        identity()
    }
}

impl<S> std::fmt::Debug for Identity<S> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("Identity")
    }
}

/// A lens viewed as an optional that is always present.
pub struct LensAsOptional<L, A, B = A> {
    pub(crate) lens: L,
    _marker: PhantomData<fn(A) -> B>,
}

impl<L, A, B> LensAsOptional<L, A, B> {
    /// Wraps `lens`.
    #[must_use]
    pub const fn new(lens: L) -> Self {
        Self {
            lens,
            _marker: PhantomData,
        }
    }
}

impl<L: Clone, A, B> Clone for LensAsOptional<L, A, B> {
    fn clone(&self) -> Self {
        Self::new(self.lens.clone())
    }
}

impl<L: std::fmt::Debug, A, B> std::fmt::Debug for LensAsOptional<L, A, B> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("LensAsOptional")
            .field("lens", &self.lens)
            .finish()
    }
}

/// A lens viewed as a traversal that always visits exactly one part.
pub struct LensAsTraversal<L, A, B = A> {
    pub(crate) lens: L,
    _marker: PhantomData<fn(A) -> B>,
}

impl<L, A, B> LensAsTraversal<L, A, B> {
    /// Wraps `lens`.
    #[must_use]
    pub const fn new(lens: L) -> Self {
        Self {
            lens,
            _marker: PhantomData,
        }
    }
}

impl<L: Clone, A, B> Clone for LensAsTraversal<L, A, B> {
    fn clone(&self) -> Self {
        Self::new(self.lens.clone())
    }
}

impl<L: std::fmt::Debug, A, B> std::fmt::Debug for LensAsTraversal<L, A, B> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("LensAsTraversal")
            .field("lens", &self.lens)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug)]
    struct Point {
        x: i32,
        y: i32,
    }

    fn x_lens() -> impl Lens<Point, i32> + Clone {
        FunctionLens::new(
            |point: &Point| &point.x,
            |point: Point, x: i32| Point { x, ..point },
        )
    }

    #[test]
    fn test_function_lens_get() {
        let point = Point { x: 10, y: 20 };
        assert_eq!(*x_lens().get(&point), 10);
    }

    #[test]
    fn test_function_lens_set() {
        let updated = x_lens().set(Point { x: 10, y: 20 }, 100);
        assert_eq!(updated, Point { x: 100, y: 20 });
    }

    #[test]
    fn test_set_matches_constant_update() {
        let point = Point { x: 1, y: 2 };
        assert_eq!(
            x_lens().set(point.clone(), 7),
            x_lens().update(point, |_| 7)
        );
    }

    #[test]
    fn test_modify_ref() {
        let name = FunctionLens::new(
            |pair: &(String, u32)| &pair.0,
            |pair: (String, u32), name: String| (name, pair.1),
        );
        let upper = name.modify_ref(("alice".to_string(), 30), |name| name.to_uppercase());
        assert_eq!(upper, ("ALICE".to_string(), 30));
    }

    #[test]
    fn test_lens_compose() {
        let outer = FunctionLens::new(
            |pair: &(Point, u8)| &pair.0,
            |pair: (Point, u8), point: Point| (point, pair.1),
        );
        let composed = outer.compose(x_lens());

        let data = (Point { x: 42, y: 0 }, 1);
        assert_eq!(*composed.get(&data), 42);

        let updated = composed.update(data, |x| x + 1);
        assert_eq!(updated, (Point { x: 43, y: 0 }, 1));
    }

    #[test]
    fn test_composed_get_borrows_through_owned_intermediate() {
        let profile = FunctionLens::new(
            |pair: &(u32, (String, u8))| &pair.1,
            |pair: (u32, (String, u8)), profile: (String, u8)| (pair.0, profile),
        );
        let name = FunctionLens::new(
            |profile: &(String, u8)| &profile.0,
            |profile: (String, u8), name: String| (name, profile.1),
        );
        let composed = profile.compose(name);

        let data = (7, ("ada".to_string(), 36));
        let borrowed: &String = composed.get(&data);
        assert_eq!(borrowed, "ada");
        assert_eq!(
            composed.modify_ref(data, |name| name.to_uppercase()),
            (7, ("ADA".to_string(), 36))
        );
    }

    #[test]
    fn test_polymorphic_compose_changes_shape() {
        let outer = FunctionLens::new(
            |pair: &((i32, i32), bool)| &pair.0,
            |pair: ((i32, i32), bool), inner: (String, i32)| (inner, pair.1),
        );
        let inner = FunctionLens::new(
            |pair: &(i32, i32)| &pair.0,
            |pair: (i32, i32), first: String| (first, pair.1),
        );
        let composed = outer.compose(inner);

        let updated = composed.update(((1, 2), true), |first| format!("#{first}"));
        assert_eq!(updated, (("#1".to_string(), 2), true));
    }

    #[test]
    fn test_identity_update_runs_function_on_whole_source() {
        assert_eq!(identity::<i32>().update(3, |x| x * 10), 30);
    }

    #[test]
    fn test_kind_is_pure() {
        assert_eq!(<Identity<i32> as Lens<i32, i32>>::KIND, EffectKind::Pure);
    }
}
