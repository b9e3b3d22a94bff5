//! Suspending accessors.
//!
//! This module provides the three suspending rows of the effect catalogue:
//! [`AsyncLens`], [`AsyncOptional`] and [`AsyncTraversal`]. Their reads,
//! writes and updates return a [`Suspended`] future that may wait on an
//! external action (a remote store, a file, a user prompt) before it resolves.
//!
//! # Failures
//!
//! Each suspending accessor names the failure type of its effects through an
//! associated `Error` type. Only accessors with the same `Error` compose or
//! combine. A failure aborts the whole call: later parts are not visited and
//! no partially written target is returned.
//!
//! # Ordering
//!
//! Parts are visited strictly in traversal order. The transform for a part is
//! awaited to completion before the transform for the next part is created,
//! so externally observable effects never interleave within one call.
//!
//! # Example
//!
//! ```
//! use futures::executor::block_on;
//! use lenskit::optics::{FunctionTraversal, Traversal};
//! use lenskit::suspend::AsyncTraversal;
//!
//! let each = FunctionTraversal::new(
//!     |numbers: &Vec<i32>| numbers.iter().collect(),
//!     |numbers: Vec<i32>, function: &mut dyn FnMut(i32) -> i32| {
//!         numbers.into_iter().map(function).collect::<Vec<_>>()
//!     },
//! )
//! .suspend::<std::convert::Infallible>();
//!
//! let doubled = block_on(each.update(vec![1, 2, 3], |number| async move { Ok(number * 2) }));
//! assert_eq!(doubled, Ok(vec![2, 4, 6]));
//! ```

mod lens;
mod lifted;
mod optional;
mod traversal;

use std::sync::Arc;

use futures::future::BoxFuture;
use parking_lot::Mutex;

use crate::choice::Choice;

pub use lens::AsyncFunctionLens;
pub use lens::AsyncLens;
pub use lens::AsyncLensAsOptional;
pub use lens::AsyncLensAsTraversal;
pub use lens::ComposedAsyncLens;

pub use optional::AsyncFunctionOptional;
pub use optional::AsyncOptional;
pub use optional::AsyncOptionalAsTraversal;
pub use optional::CombinedAsyncOptional;
pub use optional::ComposedAsyncOptional;

pub use traversal::AsyncFunctionTraversal;
pub use traversal::AsyncTraversal;
pub use traversal::CombinedAsyncTraversal;
pub use traversal::ComposedAsyncTraversal;

pub use lifted::LiftedLens;
pub use lifted::LiftedOptional;
pub use lifted::LiftedTraversal;

/// The suspending effect: a boxed, sendable future resolving to `T` or failing with `E`.
pub type Suspended<'a, T, E> = BoxFuture<'a, Result<T, E>>;

/// Values that can be carried across suspension points.
///
/// Every source, target and part type of a suspending accessor must be
/// `Send + Sync + 'static`. This trait is implemented for all such types.
pub trait Part: Send + Sync + 'static {}

impl<T: Send + Sync + 'static> Part for T {}

/// A caller transform shared by several nested or combined calls.
///
/// The lock is only held while the transform creates the future for a part,
/// never while that future runs.
pub(crate) fn share<F>(function: F) -> Arc<Mutex<F>> {
    Arc::new(Mutex::new(function))
}

/// A transform that forwards to a shared one.
pub(crate) fn forward<A, Fut, F>(shared: Arc<Mutex<F>>) -> impl FnMut(A) -> Fut + Send
where
    F: FnMut(A) -> Fut + Send,
{
    move |value| {
        let mut function = shared.lock();
        (*function)(value)
    }
}

/// Merges two suspending reads with the read shape's choice rule.
///
/// The right read is not started when the left result is settled.
pub(crate) fn choose<'a, R, E, Right>(
    left: Suspended<'a, R, E>,
    right: Right,
) -> Suspended<'a, R, E>
where
    R: Choice + Send + 'a,
    E: Send + 'a,
    Right: FnOnce() -> Suspended<'a, R, E> + Send + 'a,
{
    Box::pin(async move {
        let left = left.await?;
        if left.is_settled() {
            tracing::trace!("left read settled, skipping right read");
            return Ok::<R, E>(left);
        }
        let right = right().await?;
        Ok(left.choice(|| right))
    })
}
