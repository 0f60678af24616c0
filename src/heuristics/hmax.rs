//  HMAX.rs
//    by Lut99
//
//  Created:
//    03 Oct 2026, 09:30:02
//  Last edited:
//    13 Oct 2026, 17:04:46
//  Auto updated?
//    Yes
//
//  Description:
//!   Implements the $h^{max}$ heuristic.
//!
//!   Under the delete relaxation, every fact gets the cost of its cheapest achiever, where an
//!   operator's own cost is that of its most expensive precondition plus the operator's cost.
//!   The heuristic value is then that of the most expensive goal fact.
//

use super::{Heuristic, RelaxedOperator};
use crate::log::trace;
use crate::task::{Cost, FactId, Operator, State, Task};


/***** LIBRARY FUNCTIONS *****/
/// Computes the $h^{max}$ value of every fact.
///
/// Facts in `state` start at 0 and all others at infinity. Then, all operators are swept over
/// until nothing changes anymore, lowering the cost of every add-effect to the cost of the
/// operator's most expensive precondition plus its own cost.
///
/// NOTE: Terminates because values only ever decrease, are bounded by 0 and only ever take on
/// sums of operator costs.
///
/// # Arguments
/// - `state`: The state whose facts are free.
/// - `ops`: The [`RelaxedOperator`]s to relax over.
/// - `n_facts`: The number of facts to compute values for. May be larger than the facts in
///   `state` (e.g., to include synthetic facts), but every fact in `ops` must be less than it.
///
/// # Returns
/// A table mapping every [`FactId`] to its cost.
pub(crate) fn fixpoint(state: &State, ops: &[RelaxedOperator], n_facts: usize) -> Vec<Cost> {
    let mut h: Vec<Cost> = (0..n_facts).map(|f| if state.contains(f) { Cost::ZERO } else { Cost::Infinite }).collect();

    // Sweep until stable
    let mut changed: bool = true;
    #[cfg(feature = "log")]
    let mut i: usize = 0;
    while changed {
        changed = false;
        #[cfg(feature = "log")]
        {
            i += 1;
        }

        for op in ops {
            // The operator only fires if all its preconditions are reached
            let mut base: Cost = Cost::ZERO;
            for p in op.pre {
                base = base.max(h[*p]);
            }
            if base.is_infinite() {
                continue;
            }

            let candidate: Cost = base + op.cost;
            for e in op.add {
                if candidate < h[*e] {
                    h[*e] = candidate;
                    changed = true;
                }
            }
        }
    }
    trace!("Computed h^max fixpoint over {} operator(s) in {i} sweep(s)", ops.len());
    h
}



/// Computes the $h^{max}$ heuristic for a state.
///
/// # Arguments
/// - `state`: The [`State`] to estimate for.
/// - `goal`: The facts that must be reached.
/// - `operators`: The [`Operator`]s that can be used to reach them.
/// - `n_facts`: The number of facts in the task the state and operators belong to.
///
/// # Returns
/// The cost of the most expensive goal fact (0 if there are none), or [`Cost::Infinite`] if some
/// goal fact cannot be reached even when ignoring delete-effects.
///
/// # Panics
/// This function panics if `goal` or any of the `operators` references a fact that is not less
/// than `n_facts`.
pub fn hmax_for(state: &State, goal: &[FactId], operators: &[Operator], n_facts: usize) -> Cost {
    let ops: Vec<RelaxedOperator> = operators.iter().map(|op| RelaxedOperator { pre: op.pre(), add: op.add(), cost: op.cost() }).collect();
    let h: Vec<Cost> = fixpoint(state, &ops, n_facts);
    goal.iter().map(|g| h[*g]).max().unwrap_or(Cost::ZERO)
}

/// Computes the $h^{max}$ heuristic for a state of a task.
///
/// See [`hmax_for()`] for details.
///
/// # Arguments
/// - `task`: The [`Task`] that defines the goal and operators.
/// - `state`: The [`State`] to estimate for.
///
/// # Returns
/// The heuristic value.
#[inline]
pub fn hmax(task: &Task, state: &State) -> Cost { hmax_for(state, task.goal(), task.operators(), task.n_facts()) }





/***** LIBRARY *****/
/// The $h^{max}$ heuristic as a [`Heuristic`].
#[derive(Clone, Copy, Debug, Default)]
pub struct HMax;
impl Heuristic for HMax {
    #[inline]
    fn evaluate(&mut self, task: &Task, state: &State) -> Cost { hmax(task, state) }
}





/***** TESTS *****/
