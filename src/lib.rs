//! # lenskit
//!
//! Composable accessors for immutable data, parameterised by the effect of
//! their reads and writes.
//!
//! ## Overview
//!
//! An accessor bundles a read, a write and an update that focus on some part
//! of a larger value. Accessors come in six kinds, one per row of the effect
//! catalogue in [`kind`]:
//!
//! - **Lens**: exactly one part, deterministic ([`optics::Lens`])
//! - **Optional**: zero or one part, deterministic ([`optics::Optional`])
//! - **Traversal**: zero or more parts, deterministic ([`optics::Traversal`])
//! - **Suspending Lens**: exactly one part, suspending ([`suspend::AsyncLens`])
//! - **Suspending Optional**: zero or one part, suspending ([`suspend::AsyncOptional`])
//! - **Suspending Traversal**: zero or more parts, suspending ([`suspend::AsyncTraversal`])
//!
//! Accessors of the same kind compose to focus deeper and, where the read
//! effect has a [`choice::Choice`] rule, combine to focus on the union of
//! their parts.
//!
//! ## Feature Flags
//!
//! - `optics`: The deterministic accessors
//! - `async`: The suspending accessors (implies `optics`)
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use lenskit::prelude::*;
//!
//! let each = FunctionTraversal::new(
//!     |numbers: &Vec<i32>| numbers.iter().collect(),
//!     |numbers: Vec<i32>, function: &mut dyn FnMut(i32) -> i32| {
//!         numbers.into_iter().map(function).collect::<Vec<_>>()
//!     },
//! );
//! assert_eq!(each.modify(vec![1, 2, 3], |x| x + 1), vec![2, 3, 4]);
//! assert_eq!(EffectKind::Multi.cardinality(), Cardinality::Many);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]
// Accessor types carry their focus types as phantom parameters.
#![allow(clippy::type_complexity)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use lenskit::prelude::*;
/// ```
pub mod prelude {
    pub use crate::choice::Choice;
    pub use crate::kind::{Cardinality, EffectKind, ReadEffect, WriteEffect};

    #[cfg(feature = "optics")]
    pub use crate::optics::*;

    #[cfg(feature = "async")]
    pub use crate::suspend::*;
}

pub mod choice;
pub mod kind;

#[cfg(feature = "optics")]
pub mod optics;

#[cfg(feature = "async")]
pub mod suspend;
