//  COST.rs
//    by Lut99
//
//  Created:
//    02 Oct 2026, 14:12:50
//  Last edited:
//    09 Oct 2026, 16:30:04
//  Auto updated?
//    Yes
//
//  Description:
//!   Defines [`Cost`], the (possibly infinite) natural number that
//!   heuristics and searches report.
//

use std::fmt::{Display, Formatter, Result as FResult};
use std::ops::Add;


/***** LIBRARY *****/
/// A cost that is either some natural number or _infinite_.
///
/// Infinity is used as the "unreachable" sentinel: a heuristic returning [`Cost::Infinite`] has
/// proven that no (relaxed) plan exists from the evaluated state.
///
/// The derived ordering puts every [`Cost::Finite`] before [`Cost::Infinite`], which is exactly
/// what the fixpoints need.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Cost {
    /// Some known, finite cost.
    Finite(u64),
    /// Unreachable.
    Infinite,
}

// Constructors
impl Default for Cost {
    #[inline]
    fn default() -> Self { Self::ZERO }
}
impl Cost {
    /// The cost of doing nothing.
    pub const ZERO: Self = Self::Finite(0);
}

// Ops
impl Cost {
    /// Returns whether this cost is finite.
    #[inline]
    pub const fn is_finite(&self) -> bool { matches!(self, Self::Finite(_)) }

    /// Returns whether this cost is infinite (i.e., unreachable).
    #[inline]
    pub const fn is_infinite(&self) -> bool { matches!(self, Self::Infinite) }

    /// Returns the finite value of this cost, if any.
    ///
    /// # Returns
    /// The cost as a [`u64`], or [`None`] if it is [`Cost::Infinite`].
    #[inline]
    pub const fn finite(&self) -> Option<u64> {
        match self {
            Self::Finite(c) => Some(*c),
            Self::Infinite => None,
        }
    }
}
impl Add<u64> for Cost {
    type Output = Self;

    #[inline]
    fn add(self, rhs: u64) -> Self::Output {
        match self {
            Self::Finite(c) => Self::Finite(c.saturating_add(rhs)),
            Self::Infinite => Self::Infinite,
        }
    }
}
impl Add<Cost> for Cost {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Cost) -> Self::Output {
        match rhs {
            Self::Finite(c) => self + c,
            Self::Infinite => Self::Infinite,
        }
    }
}

// Formatting
impl Display for Cost {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        match self {
            Self::Finite(c) => write!(f, "{c}"),
            Self::Infinite => write!(f, "∞"),
        }
    }
}

// Conversion
impl From<u64> for Cost {
    #[inline]
    fn from(value: u64) -> Self { Self::Finite(value) }
}





/***** TESTS *****/
