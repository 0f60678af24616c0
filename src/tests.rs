//  TESTS.rs
//    by Lut99
//
//  Created:
//    03 Dec 2024, 14:32:43
//  Last edited:
//    15 Oct 2026, 09:47:12
//  Auto updated?
//    Yes
//
//  Description:
//!   Contains some common test functions.
//

#![allow(unused)]

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use proptest::prelude::*;

use crate::task::{State, Task, TaskBuilder};


/***** LIBRARY *****/
/// Sets up a logger if wanted.
#[cfg(feature = "log")]
pub fn setup_logger() {
    use humanlog::{DebugMode, HumanLogger};

    // Check if the envs tell us to
    if let Ok(logger) = std::env::var("LOGGER") {
        if logger == "1" || logger == "true" {
            // Create the logger
            if let Err(err) = HumanLogger::terminal(DebugMode::Full).init() {
                eprintln!("WARNING: Failed to setup logger: {err} (no logging for this session)");
            }
        }
    }
}



/// A two-step chain: `op1` reaches `a`, `op2` needs it to reach `b`.
///
/// Both heuristics are 3, the only plan is `[op1, op2]`.
pub fn scenario_a() -> Task {
    TaskBuilder::new()
        .declare(["a", "b"])
        .goal(["b"])
        .operator("op1", [] as [&str; 0], ["a"], [] as [&str; 0], 1)
        .operator("op2", ["a"], ["b"], [] as [&str; 0], 2)
        .build()
        .unwrap()
}

/// Two independent goals of cost 5 each.
///
/// $h^{max}$ only sees one of them (5), LM-cut finds both (10).
pub fn scenario_b() -> Task {
    TaskBuilder::new()
        .declare(["a", "b"])
        .goal(["a", "b"])
        .operator("op1", [] as [&str; 0], ["a"], [] as [&str; 0], 5)
        .operator("op2", [] as [&str; 0], ["b"], [] as [&str; 0], 5)
        .build()
        .unwrap()
}

/// A goal fact that nothing achieves.
pub fn scenario_c() -> Task {
    TaskBuilder::new()
        .declare(["a", "x", "y"])
        .init(["a"])
        .goal(["x"])
        .operator("op", ["a"], ["y"], ["a"], 1)
        .build()
        .unwrap()
}



/// Computes the optimal cost of reaching the goal from a state by uniform-cost search.
///
/// Slow, but obviously correct; only meant for small tasks.
///
/// # Arguments
/// - `task`: The [`Task`] to solve.
/// - `start`: The [`State`] to start in.
///
/// # Returns
/// The cost of an optimal plan, or [`None`] if there is none.
pub fn brute_force(task: &Task, start: &State) -> Option<u64> {
    let mut states: Vec<State> = vec![start.clone()];
    let mut best: HashMap<State, u64> = HashMap::from([(start.clone(), 0)]);
    let mut queue: BinaryHeap<Reverse<(u64, usize)>> = BinaryHeap::from([Reverse((0, 0))]);
    while let Some(Reverse((g, i))) = queue.pop() {
        let state: State = states[i].clone();
        if best.get(&state).is_some_and(|b| *b < g) {
            continue;
        }
        if task.is_goal(&state) {
            return Some(g);
        }
        for (_, op) in task.applicable(&state) {
            let next: State = state.apply(op);
            let next_g: u64 = g + op.cost();
            if best.get(&next).map(|b| next_g < *b).unwrap_or(true) {
                best.insert(next.clone(), next_g);
                states.push(next);
                queue.push(Reverse((next_g, states.len() - 1)));
            }
        }
    }
    None
}

/// Checks whether the goal is reachable from a state when ignoring delete-effects.
///
/// # Arguments
/// - `task`: The [`Task`] to check.
/// - `start`: The [`State`] to start in.
///
/// # Returns
/// True if it is, false otherwise.
pub fn relaxed_reachable(task: &Task, start: &State) -> bool {
    let mut reached: State = start.clone();
    let mut changed: bool = true;
    while changed {
        changed = false;
        for op in task.operators() {
            if op.is_applicable(&reached) && !reached.contains_all(op.add()) {
                for e in op.add() {
                    reached.insert(*e);
                }
                changed = true;
            }
        }
    }
    task.is_goal(&reached)
}



/// Generates small, arbitrary tasks.
///
/// Tasks have up to five facts (`f0`, `f1`, ...) and up to six operators (`op0`, `op1`, ...)
/// with costs between 0 and 5, so that [`brute_force()`] stays cheap.
pub fn arb_task() -> impl Strategy<Value = Task> {
    (1usize..=5)
        .prop_flat_map(|n| {
            let mask = 0u32..(1 << n);
            (Just(n), mask.clone(), mask.clone(), prop::collection::vec((mask.clone(), mask.clone(), mask, 0i64..=5), 0..=6))
        })
        .prop_map(|(n, init, goal, ops)| {
            let names = |mask: u32| -> Vec<String> { (0..n).filter(|i| mask & (1 << i) != 0).map(|i| format!("f{i}")).collect() };
            let mut builder = TaskBuilder::new().declare((0..n).map(|i| format!("f{i}"))).init(names(init)).goal(names(goal));
            for (i, (pre, add, del, cost)) in ops.into_iter().enumerate() {
                builder.push_operator(format!("op{i}"), names(pre), names(add), names(del), cost);
            }
            builder.build().unwrap()
        })
}
