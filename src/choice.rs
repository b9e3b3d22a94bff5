//! Merging the reads of two accessors.
//!
//! Combining two accessors needs a way to merge what each of them read. The
//! rule depends on the read shape:
//!
//! - `Option<A>` (partial reads): the left value if present, otherwise the right.
//! - `Vec<A>` and boxed iterators (multi reads): the left values followed by the
//!   right values, duplicates included.
//!
//! Deterministic reads have no merge rule, which is why `Lens` and `AsyncLens`
//! cannot be combined.

/// A read shape that can merge its result with a second one.
pub trait Choice: Sized {
    /// Returns `true` if merging would ignore any fallback.
    ///
    /// A settled partial read short-circuits: the fallback is never produced.
    fn is_settled(&self) -> bool;

    /// Merges this result with the one produced by `fallback`.
    ///
    /// `fallback` is not called when `self` is settled.
    #[must_use]
    fn choice<F>(self, fallback: F) -> Self
    where
        F: FnOnce() -> Self;
}

impl<A> Choice for Option<A> {
    fn is_settled(&self) -> bool {
        self.is_some()
    }

    fn choice<F>(self, fallback: F) -> Self
    where
        F: FnOnce() -> Self,
    {
        self.or_else(fallback)
    }
}

impl<A> Choice for Vec<A> {
    fn is_settled(&self) -> bool {
        false
    }

    fn choice<F>(mut self, fallback: F) -> Self
    where
        F: FnOnce() -> Self,
    {
        self.extend(fallback());
        self
    }
}

impl<'a, A: 'a> Choice for Box<dyn Iterator<Item = A> + 'a> {
    fn is_settled(&self) -> bool {
        false
    }

    fn choice<F>(self, fallback: F) -> Self
    where
        F: FnOnce() -> Self,
    {
        Box::new(self.chain(fallback()))
    }
}
