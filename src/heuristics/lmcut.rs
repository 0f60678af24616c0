//  LMCUT.rs
//    by Lut99
//
//  Created:
//    04 Oct 2026, 13:22:18
//  Last edited:
//    14 Oct 2026, 11:15:29
//  Auto updated?
//    Yes
//
//  Description:
//!   Implements the LM-cut heuristic.
//!
//!   Every round, the $h^{max}$ [fixpoint](super::hmax::fixpoint()) is computed over a private
//!   copy of the operators, and a _cut_ is found in the justification graph that separates the
//!   state from the goal. Any relaxed plan must use one of the operators in that cut, so its
//!   cheapest cost can be counted and then subtracted from all of them before the next round.
//!   This stops once the goal is free.
//

use super::hmax::fixpoint;
use super::{Heuristic, RelaxedOperator};
use crate::log::{trace, warn};
use crate::task::{Cost, FactId, Operator, State, Task};


/***** HELPERS *****/
/// Describes how an operator is attributed in the justification graph.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Justification {
    /// Some precondition isn't reached, so the operator is not part of the graph.
    Unreachable,
    /// The operator has no preconditions, so it hangs off the state directly.
    Free,
    /// The operator's critical precondition.
    Critical(FactId),
}



/// Finds the critical precondition of every operator.
///
/// This is the reached precondition with the highest $h^{max}$-value. Ties are broken in favour
/// of the _greatest_ [`FactId`], which, because tasks number their facts in lexicographic order,
/// is the lexicographically greatest fact.
///
/// # Arguments
/// - `ops`: The [`RelaxedOperator`]s to justify.
/// - `h`: The $h^{max}$-values of all facts.
///
/// # Returns
/// A [`Justification`] per operator.
fn justify(ops: &[RelaxedOperator], h: &[Cost]) -> Vec<Justification> {
    ops.iter()
        .map(|op| {
            let mut crit: Justification = Justification::Free;
            let mut best: Cost = Cost::ZERO;
            for p in op.pre {
                if h[*p].is_infinite() {
                    return Justification::Unreachable;
                }
                // NOTE: `>=` so that later (i.e., greater) facts win ties
                if crit == Justification::Free || h[*p] >= best {
                    crit = Justification::Critical(*p);
                    best = h[*p];
                }
            }
            crit
        })
        .collect()
}

/// Computes the goal zone.
///
/// These are the facts from which the artificial goal can be reached through zero-cost
/// operators in the justification graph. Facts with a value of 0 never join.
///
/// # Arguments
/// - `ops`: The [`RelaxedOperator`]s (with their current costs).
/// - `just`: The [`Justification`] of every operator.
/// - `h`: The $h^{max}$-values of all facts.
/// - `artificial`: The artificial goal fact.
///
/// # Returns
/// A membership table of the goal zone.
fn goal_zone(ops: &[RelaxedOperator], just: &[Justification], h: &[Cost], artificial: FactId) -> Vec<bool> {
    let mut zone: Vec<bool> = vec![false; h.len()];
    zone[artificial] = true;

    let mut changed: bool = true;
    while changed {
        changed = false;
        for (op, j) in ops.iter().zip(just) {
            let Justification::Critical(p) = *j else { continue };
            if op.cost > 0 || zone[p] || h[p] == Cost::ZERO {
                continue;
            }
            if op.add.iter().any(|e| zone[*e]) {
                zone[p] = true;
                changed = true;
            }
        }
    }
    zone
}

/// Finds the cut between the state and the goal zone.
///
/// Starting at the state (and at precondition-free operators), facts are reached through
/// operators whose critical precondition has been reached, never entering the goal zone. Every
/// operator that is fired this way and adds a fact of the goal zone is in the cut.
///
/// # Arguments
/// - `state`: The [`State`] that we're estimating.
/// - `ops`: The [`RelaxedOperator`]s.
/// - `just`: The [`Justification`] of every operator.
/// - `zone`: The goal zone as computed by [`goal_zone()`].
///
/// # Returns
/// The indices of the operators in the cut, in ascending order.
fn find_cut(state: &State, ops: &[RelaxedOperator], just: &[Justification], zone: &[bool]) -> Vec<usize> {
    // Index the operators by what justifies them
    let mut free: Vec<usize> = Vec::new();
    let mut by_critical: Vec<Vec<usize>> = vec![Vec::new(); zone.len()];
    for (i, j) in just.iter().enumerate() {
        match j {
            Justification::Unreachable => {},
            Justification::Free => free.push(i),
            Justification::Critical(p) => by_critical[*p].push(i),
        }
    }

    // Explore from the state
    let mut in_cut: Vec<bool> = vec![false; ops.len()];
    let mut reached: Vec<bool> = vec![false; zone.len()];
    let mut queue: Vec<FactId> = state.iter().filter(|f| *f < zone.len()).collect();
    for f in &queue {
        reached[*f] = true;
    }
    let mut fire = |o: usize, reached: &mut Vec<bool>, queue: &mut Vec<FactId>| {
        for e in ops[o].add {
            if zone[*e] {
                in_cut[o] = true;
            } else if !reached[*e] {
                reached[*e] = true;
                queue.push(*e);
            }
        }
    };
    for o in free {
        fire(o, &mut reached, &mut queue);
    }
    while let Some(f) = queue.pop() {
        for o in &by_critical[f] {
            fire(*o, &mut reached, &mut queue);
        }
    }

    in_cut.into_iter().enumerate().filter_map(|(i, c)| if c { Some(i) } else { None }).collect()
}





/***** LIBRARY FUNCTIONS *****/
/// Computes the LM-cut heuristic for a state.
///
/// Never returns less than [`hmax_for()`](super::hmax_for()) on the same input, and never more
/// than the cost of an optimal plan.
///
/// # Arguments
/// - `state`: The [`State`] to estimate for.
/// - `goal`: The facts that must be reached.
/// - `operators`: The [`Operator`]s that can be used to reach them. These are never modified;
///   the costs are reduced in a private copy.
/// - `n_facts`: The number of facts in the task the state and operators belong to.
///
/// # Returns
/// The summed cost of all extracted landmarks (saturating at [`u64::MAX`]), or
/// [`Cost::Infinite`] if some goal fact cannot be reached even when ignoring delete-effects.
///
/// # Panics
/// This function panics if `goal` or any of the `operators` references a fact that is not less
/// than `n_facts`.
pub fn lmcut_for(state: &State, goal: &[FactId], operators: &[Operator], n_facts: usize) -> Cost {
    // Build the private copy of the operators, plus the goal operator that reaches a fresh fact
    let artificial: FactId = n_facts;
    let artificial_add: [FactId; 1] = [artificial];
    let mut ops: Vec<RelaxedOperator> = Vec::with_capacity(operators.len() + 1);
    ops.extend(operators.iter().map(|op| RelaxedOperator { pre: op.pre(), add: op.add(), cost: op.cost() }));
    ops.push(RelaxedOperator { pre: goal, add: &artificial_add, cost: 0 });

    let mut total: u64 = 0;
    #[cfg(feature = "log")]
    let mut round: usize = 0;
    loop {
        #[cfg(feature = "log")]
        {
            round += 1;
        }

        // Recompute the costs from scratch every time
        let h: Vec<Cost> = fixpoint(state, &ops, n_facts + 1);
        match h[artificial] {
            Cost::Infinite => {
                trace!("LM-cut round {round}: goal unreachable");
                return Cost::Infinite;
            },
            Cost::Finite(0) => break,
            Cost::Finite(_) => {},
        }

        // Extract the next landmark
        let just: Vec<Justification> = justify(&ops, &h);
        let zone: Vec<bool> = goal_zone(&ops, &just, &h, artificial);
        let cut: Vec<usize> = find_cut(state, &ops, &just, &zone);
        let Some(m) = cut.iter().map(|o| ops[*o].cost).min() else {
            warn!("LM-cut round {round}: goal has cost {} but the cut is empty", h[artificial]);
            break;
        };
        if m == 0 {
            warn!("LM-cut round {round}: found a zero-cost cut");
            break;
        }
        trace!("LM-cut round {round}: h^max(goal) = {}, landmark of {} operator(s) with cost {m}", h[artificial], cut.len());

        // Count it and discount it
        total = total.saturating_add(m);
        for o in cut {
            ops[o].cost -= m;
        }
    }

    trace!("LM-cut value {total} after {round} round(s)");
    Cost::Finite(total)
}

/// Computes the LM-cut heuristic for a state of a task.
///
/// See [`lmcut_for()`] for details.
///
/// # Arguments
/// - `task`: The [`Task`] that defines the goal and operators.
/// - `state`: The [`State`] to estimate for.
///
/// # Returns
/// The heuristic value.
#[inline]
pub fn lmcut(task: &Task, state: &State) -> Cost { lmcut_for(state, task.goal(), task.operators(), task.n_facts()) }





/***** LIBRARY *****/
/// The LM-cut heuristic as a [`Heuristic`].
#[derive(Clone, Copy, Debug, Default)]
pub struct LmCut;
impl Heuristic for LmCut {
    #[inline]
    fn evaluate(&mut self, task: &Task, state: &State) -> Cost { lmcut(task, state) }
}





/***** TESTS *****/
