//! The catalogue of effect kinds an accessor can be instantiated with.
//!
//! Every accessor pairs a *write effect* (how a write or update produces its
//! result) with a *read effect* (how zero, one or many viewed parts are
//! produced). Six pairings exist:
//!
//! | Kind | Write effect | Read effect | Read cardinality |
//! |---|---|---|---|
//! | [`EffectKind::Pure`] | deterministic | deterministic | exactly one |
//! | [`EffectKind::Partial`] | deterministic | partial | zero or one |
//! | [`EffectKind::Multi`] | deterministic | multi | zero or many, ordered |
//! | [`EffectKind::SuspendingPure`] | suspending | suspending deterministic | exactly one |
//! | [`EffectKind::SuspendingPartial`] | suspending | suspending partial | zero or one |
//! | [`EffectKind::SuspendingMulti`] | suspending | suspending multi | zero or many, ordered |
//!
//! The catalogue is purely descriptive: the type checker is what keeps
//! accessors of different kinds apart. Each accessor trait names its row via
//! an associated `KIND` constant.
//!
//! # Examples
//!
//! ```
//! use lenskit::kind::{Cardinality, EffectKind};
//!
//! assert_eq!(EffectKind::Partial.cardinality(), Cardinality::AtMostOne);
//! assert!(EffectKind::Pure.widens_to(EffectKind::Multi));
//! assert_eq!(
//!     EffectKind::Partial.join(EffectKind::SuspendingPure),
//!     EffectKind::SuspendingPartial
//! );
//! ```

use std::fmt;

/// How many parts an accessor visits for a single source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Cardinality {
    /// Exactly one part.
    ExactlyOne,
    /// Zero or one part.
    AtMostOne,
    /// Zero or more parts, always in the same order for a given source.
    Many,
}

impl Cardinality {
    /// Returns `true` if visiting `count` parts is allowed by this cardinality.
    ///
    /// # Example
    ///
    /// ```
    /// use lenskit::kind::Cardinality;
    ///
    /// assert!(Cardinality::ExactlyOne.admits(1));
    /// assert!(!Cardinality::ExactlyOne.admits(0));
    /// assert!(Cardinality::AtMostOne.admits(0));
    /// assert!(Cardinality::Many.admits(42));
    /// ```
    #[must_use]
    pub const fn admits(self, count: usize) -> bool {
        match self {
            Self::ExactlyOne => count == 1,
            Self::AtMostOne => count <= 1,
            Self::Many => true,
        }
    }

    /// The largest number of parts this cardinality allows, if bounded.
    #[must_use]
    pub const fn upper_bound(self) -> Option<usize> {
        match self {
            Self::ExactlyOne | Self::AtMostOne => Some(1),
            Self::Many => None,
        }
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::ExactlyOne => "exactly one",
            Self::AtMostOne => "zero or one",
            Self::Many => "zero or many",
        };
        formatter.write_str(text)
    }
}

/// The effect a write or update produces its target in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WriteEffect {
    /// The target is returned directly.
    Deterministic,
    /// The target is produced by a future that may wait on an external action.
    Suspending,
}

impl WriteEffect {
    /// Returns `true` for [`WriteEffect::Suspending`].
    #[must_use]
    pub const fn is_suspending(self) -> bool {
        matches!(self, Self::Suspending)
    }
}

/// The effect a read produces its viewed parts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadEffect {
    /// A single value.
    Deterministic,
    /// An optional value. Supports an empty state and "stop at first success".
    Partial,
    /// An ordered sequence of values. Supports concatenation.
    Multi,
    /// A single value produced by a future.
    SuspendingDeterministic,
    /// An optional value produced by a future.
    SuspendingPartial,
    /// An ordered sequence of values produced by a future.
    SuspendingMulti,
}

impl ReadEffect {
    /// Number of parts a read in this effect yields.
    #[must_use]
    pub const fn cardinality(self) -> Cardinality {
        match self {
            Self::Deterministic | Self::SuspendingDeterministic => Cardinality::ExactlyOne,
            Self::Partial | Self::SuspendingPartial => Cardinality::AtMostOne,
            Self::Multi | Self::SuspendingMulti => Cardinality::Many,
        }
    }

    /// Returns `true` if producing the read may suspend the caller.
    #[must_use]
    pub const fn is_suspending(self) -> bool {
        matches!(
            self,
            Self::SuspendingDeterministic | Self::SuspendingPartial | Self::SuspendingMulti
        )
    }

    /// Returns `true` if two reads in this effect can be merged into one.
    ///
    /// Partial reads merge by taking the first present value, multi reads by
    /// concatenation. A deterministic read has no way to merge two values.
    #[must_use]
    pub const fn supports_choice(self) -> bool {
        !matches!(self, Self::Deterministic | Self::SuspendingDeterministic)
    }
}

/// One row of the catalogue: a (write effect, read effect) pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    /// Deterministic write, deterministic read.
    Pure,
    /// Deterministic write, partial read.
    Partial,
    /// Deterministic write, multi read.
    Multi,
    /// Suspending write, suspending deterministic read.
    SuspendingPure,
    /// Suspending write, suspending partial read.
    SuspendingPartial,
    /// Suspending write, suspending multi read.
    SuspendingMulti,
}

impl EffectKind {
    /// Every kind, non-suspending rows first.
    pub const ALL: [Self; 6] = [
        Self::Pure,
        Self::Partial,
        Self::Multi,
        Self::SuspendingPure,
        Self::SuspendingPartial,
        Self::SuspendingMulti,
    ];

    /// The write effect of this kind.
    #[must_use]
    pub const fn write_effect(self) -> WriteEffect {
        match self {
            Self::Pure | Self::Partial | Self::Multi => WriteEffect::Deterministic,
            Self::SuspendingPure | Self::SuspendingPartial | Self::SuspendingMulti => {
                WriteEffect::Suspending
            }
        }
    }

    /// The read effect of this kind.
    #[must_use]
    pub const fn read_effect(self) -> ReadEffect {
        match self {
            Self::Pure => ReadEffect::Deterministic,
            Self::Partial => ReadEffect::Partial,
            Self::Multi => ReadEffect::Multi,
            Self::SuspendingPure => ReadEffect::SuspendingDeterministic,
            Self::SuspendingPartial => ReadEffect::SuspendingPartial,
            Self::SuspendingMulti => ReadEffect::SuspendingMulti,
        }
    }

    /// Number of parts an accessor of this kind visits.
    #[must_use]
    pub const fn cardinality(self) -> Cardinality {
        self.read_effect().cardinality()
    }

    /// Returns `true` for the three suspending rows.
    #[must_use]
    pub const fn is_suspending(self) -> bool {
        self.write_effect().is_suspending()
    }

    /// Returns `true` if accessors of this kind can be combined.
    #[must_use]
    pub const fn supports_choice(self) -> bool {
        self.read_effect().supports_choice()
    }

    /// The suspending counterpart of this kind. Suspending kinds map to themselves.
    #[must_use]
    pub const fn suspended(self) -> Self {
        match self {
            Self::Pure | Self::SuspendingPure => Self::SuspendingPure,
            Self::Partial | Self::SuspendingPartial => Self::SuspendingPartial,
            Self::Multi | Self::SuspendingMulti => Self::SuspendingMulti,
        }
    }

    const fn rank(self) -> u8 {
        match self.cardinality() {
            Cardinality::ExactlyOne => 0,
            Cardinality::AtMostOne => 1,
            Cardinality::Many => 2,
        }
    }

    const fn from_parts(rank: u8, suspending: bool) -> Self {
        match (rank, suspending) {
            (0, false) => Self::Pure,
            (1, false) => Self::Partial,
            (0, true) => Self::SuspendingPure,
            (1, true) => Self::SuspendingPartial,
            (_, false) => Self::Multi,
            (_, true) => Self::SuspendingMulti,
        }
    }

    /// Returns `true` if an accessor of this kind can be viewed as one of `other`.
    ///
    /// Widening only ever loosens the read cardinality
    /// (`Pure` to `Partial` to `Multi`) or adds suspension.
    #[must_use]
    pub const fn widens_to(self, other: Self) -> bool {
        self.rank() <= other.rank() && (!self.is_suspending() || other.is_suspending())
    }

    /// The least kind both `self` and `other` widen to.
    ///
    /// Two accessors must both be widened to their join before they can be
    /// composed or combined.
    #[must_use]
    pub const fn join(self, other: Self) -> Self {
        let rank = if self.rank() >= other.rank() {
            self.rank()
        } else {
            other.rank()
        };
        Self::from_parts(rank, self.is_suspending() || other.is_suspending())
    }

    /// Human readable name of the kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pure => "pure",
            Self::Partial => "partial",
            Self::Multi => "multi",
            Self::SuspendingPure => "suspending-pure",
            Self::SuspendingPartial => "suspending-partial",
            Self::SuspendingMulti => "suspending-multi",
        }
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

static_assertions::assert_impl_all!(EffectKind: Copy, Send, Sync, fmt::Display);
static_assertions::const_assert!(!EffectKind::Pure.supports_choice());
static_assertions::const_assert!(EffectKind::SuspendingMulti.supports_choice());
