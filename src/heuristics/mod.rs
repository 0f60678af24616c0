//  MOD.rs
//    by Lut99
//
//  Created:
//    03 Oct 2026, 09:14:27
//  Last edited:
//    14 Oct 2026, 11:18:50
//  Auto updated?
//    Yes
//
//  Description:
//!   Implements the admissible heuristics that guide the
//!   [search](crate::search).
//!
//!   Both heuristics work on the _delete relaxation_ of a task, where operators never make facts
//!   false again:
//!   - [`hmax`] computes the cost of the most expensive goal fact; and
//!   - [`lmcut`] repeatedly extracts disjunctive action landmarks from the same fixpoint and sums
//!     their costs, which is never less than [`hmax`].
//!
//!   # References
//!   [1] M. Helmert and C. Domshlak. 2009. _Landmarks, Critical Paths and Abstractions: What's the
//!       Difference Anyway?_ In Proceedings of the Nineteenth International Conference on
//!       Automated Planning and Scheduling (ICAPS '09). AAAI Press, 162–169.
//

// Nested modules
mod hmax;
mod lmcut;

// Imports
use std::error;
use std::fmt::{Display, Formatter, Result as FResult};
use std::str::FromStr;

use enum_debug::EnumDebug;
pub use hmax::{HMax, hmax, hmax_for};
pub use lmcut::{LmCut, lmcut, lmcut_for};

use crate::task::{Cost, FactId, State, Task};


/***** ERRORS *****/
/// Represents that a heuristic name could not be resolved.
#[derive(Debug)]
pub struct UnknownHeuristicError {
    /// The name that was given.
    pub raw: String,
}
impl Display for UnknownHeuristicError {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult { write!(f, "Unknown heuristic \"{}\" (expected \"hmax\" or \"lmcut\")", self.raw) }
}
impl error::Error for UnknownHeuristicError {}





/***** INTERFACES *****/
/// Something that can estimate the remaining cost from a state to the goal of a task.
///
/// The [search](crate::search::search()) is only optimal if the heuristic is _admissible_ (i.e.,
/// never overestimates). Implemented by [`HMax`], [`LmCut`], [`HeuristicKind`] and any closure
/// `FnMut(&Task, &State) -> Cost`.
pub trait Heuristic {
    /// Estimates the cost of reaching the goal.
    ///
    /// # Arguments
    /// - `task`: The [`Task`] that defines the goal and operators.
    /// - `state`: The [`State`] to estimate for.
    ///
    /// # Returns
    /// A lower bound on the remaining cost, or [`Cost::Infinite`] if the goal is provably
    /// unreachable from `state`.
    fn evaluate(&mut self, task: &Task, state: &State) -> Cost;
}

// Default impls
impl<F> Heuristic for F
where
    F: FnMut(&Task, &State) -> Cost,
{
    #[inline]
    fn evaluate(&mut self, task: &Task, state: &State) -> Cost { self(task, state) }
}





/***** AUXILLARY *****/
/// A view on an operator that only keeps what the delete relaxation needs.
///
/// Both heuristics run their fixpoint over these, which is what allows [`lmcut`] to insert its
/// synthetic goal operator and to use costs that differ from the task's.
#[derive(Clone, Copy, Debug)]
pub(crate) struct RelaxedOperator<'t> {
    /// The facts that must be reached before the operator fires.
    pub pre:  &'t [FactId],
    /// The facts reached once it does.
    pub add:  &'t [FactId],
    /// The price of firing it.
    pub cost: u64,
}



/// Selects one of the heuristics in this module by name.
///
/// This is the static counterpart of looking up an implementation at runtime: it parses from
/// `"hmax"` or `"lmcut"` and implements [`Heuristic`] itself.
#[derive(Clone, Copy, Debug, EnumDebug, Eq, Hash, PartialEq)]
pub enum HeuristicKind {
    /// The [`hmax`] heuristic.
    HMax,
    /// The [`lmcut`] heuristic.
    LmCut,
}
impl Display for HeuristicKind {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        match self {
            Self::HMax => write!(f, "hmax"),
            Self::LmCut => write!(f, "lmcut"),
        }
    }
}
impl FromStr for HeuristicKind {
    type Err = UnknownHeuristicError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hmax" => Ok(Self::HMax),
            "lmcut" => Ok(Self::LmCut),
            raw => Err(UnknownHeuristicError { raw: raw.into() }),
        }
    }
}
impl Heuristic for HeuristicKind {
    #[inline]
    fn evaluate(&mut self, task: &Task, state: &State) -> Cost {
        match self {
            Self::HMax => hmax(task, state),
            Self::LmCut => lmcut(task, state),
        }
    }
}





/***** TESTS *****/
#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::tests::{arb_task, brute_force, relaxed_reachable};

    #[test]
    fn test_heuristic_kind_parse() {
        assert_eq!("hmax".parse::<HeuristicKind>().unwrap(), HeuristicKind::HMax);
        assert_eq!("lmcut".parse::<HeuristicKind>().unwrap(), HeuristicKind::LmCut);
        assert_eq!(HeuristicKind::LmCut.to_string(), "lmcut");
        let err = "ff".parse::<HeuristicKind>().unwrap_err();
        assert_eq!(err.raw, "ff");
    }

    #[test]
    fn test_heuristic_closure() {
        let task = crate::tests::scenario_a();
        let mut calls: usize = 0;
        let mut blind = |task: &Task, state: &State| -> Cost {
            calls += 1;
            if task.is_goal(state) { Cost::ZERO } else { Cost::Finite(1) }
        };
        assert_eq!(blind.evaluate(&task, task.init()), Cost::Finite(1));
        assert_eq!(calls, 1);
    }

    proptest! {
        #[test]
        fn prop_heuristics_admissible(task in arb_task()) {
            let h_max: Cost = hmax(&task, task.init());
            let h_lmcut: Cost = lmcut(&task, task.init());
            match brute_force(&task, task.init()) {
                Some(optimal) => {
                    prop_assert!(h_max <= Cost::Finite(optimal));
                    prop_assert!(h_lmcut <= Cost::Finite(optimal));
                },
                // Without a plan, every value is admissible
                None => {},
            }
            prop_assert!(h_lmcut >= h_max);
        }

        #[test]
        fn prop_heuristics_infinite_iff_relaxed_unreachable(task in arb_task()) {
            let reachable: bool = relaxed_reachable(&task, task.init());
            prop_assert_eq!(hmax(&task, task.init()).is_finite(), reachable);
            prop_assert_eq!(lmcut(&task, task.init()).is_finite(), reachable);
        }

        #[test]
        fn prop_heuristics_zero_in_goal(task in arb_task()) {
            let mut state: State = task.init().clone();
            for g in task.goal() {
                state.insert(*g);
            }
            prop_assert_eq!(hmax(&task, &state), Cost::ZERO);
            prop_assert_eq!(lmcut(&task, &state), Cost::ZERO);
        }
    }
}
