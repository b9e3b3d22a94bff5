//! Non-suspending accessors.
//!
//! This module provides the three deterministic-write rows of the effect
//! catalogue. Each is an accessor: a read, a write and an update bundled
//! together, composable with accessors of the same kind.
//!
//! # Accessor Hierarchy
//!
//! ```text
//! Lens      (exactly one part)   --to_optional-->  Optional
//! Optional  (zero or one part)   --to_traversal--> Traversal
//! Traversal (zero or many parts)
//! ```
//!
//! Accessors of different kinds never compose or combine directly; widen
//! the narrower one first.
//!
//! # Available Accessors
//!
//! - [`Lens`]: Focus on exactly one part (`get`/`set`/`update`)
//! - [`Optional`]: Focus on a part that may be absent (`get_option`/`set`/`update`)
//! - [`Traversal`]: Focus on an ordered sequence of parts (`get_all`/`set`/`update`)
//!
//! # Composition and Combination
//!
//! `compose` nests two accessors of the same kind: the inner one focuses
//! inside the part the outer one views. `combine` unions two optionals or two
//! traversals over the same source: reads merge by the read effect's choice
//! rule and writes apply the left accessor and then the right one.
//!
//! # Example
//!
//! ```
//! use lenskit::optics::{FunctionLens, Lens};
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct Record { a: i32, b: i32 }
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct Nested { inner: Record }
//!
//! let field_a = FunctionLens::new(
//!     |record: &Record| &record.a,
//!     |record: Record, a: i32| Record { a, ..record },
//! );
//! let inner = FunctionLens::new(
//!     |nested: &Nested| &nested.inner,
//!     |_: Nested, inner: Record| Nested { inner },
//! );
//!
//! let source = Record { a: 1, b: 2 };
//! assert_eq!(*field_a.get(&source), 1);
//! assert_eq!(field_a.set(source, 5), Record { a: 5, b: 2 });
//!
//! let nested_a = inner.compose(field_a);
//! let nested = Nested { inner: Record { a: 1, b: 2 } };
//! assert_eq!(*nested_a.get(&nested), 1);
//! assert_eq!(nested_a.set(nested, 9), Nested { inner: Record { a: 9, b: 2 } });
//! ```

mod lens;
mod optional;
mod traversal;

// Re-export all lens-related types and traits
pub use lens::ComposedLens;
pub use lens::FunctionLens;
pub use lens::Identity;
pub use lens::Lens;
pub use lens::LensAsOptional;
pub use lens::LensAsTraversal;
pub use lens::identity;

// Re-export all optional-related types and traits
pub use optional::CombinedOptional;
pub use optional::ComposedOptional;
pub use optional::FunctionOptional;
pub use optional::Optional;
pub use optional::OptionalAsTraversal;

// Re-export all traversal-related types and traits
pub use traversal::CombinedTraversal;
pub use traversal::ComposedTraversal;
pub use traversal::FunctionTraversal;
pub use traversal::Traversal;
