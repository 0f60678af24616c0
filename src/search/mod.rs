//  MOD.rs
//    by Lut99
//
//  Created:
//    07 Oct 2026, 13:40:11
//  Last edited:
//    15 Oct 2026, 10:02:48
//  Auto updated?
//    Yes
//
//  Description:
//!   Implements the A* search that finds optimal plans for a [`Task`].
//!
//!   The search is guided by any [`Heuristic`]. As long as it is admissible (such as
//!   [`HMax`](crate::heuristics::HMax) or [`LmCut`](crate::heuristics::LmCut)), the returned
//!   plan is optimal.
//!
//!   # Example
//!   ```rust
//!   use strips::heuristics::LmCut;
//!   use strips::search::{search, Outcome};
//!   use strips::task::TaskBuilder;
//!
//!   let task = TaskBuilder::new()
//!       .goal(["b"])
//!       .operator("op1", [] as [&str; 0], ["a"], [] as [&str; 0], 1)
//!       .operator("op2", ["a"], ["b"], [] as [&str; 0], 2)
//!       .build()
//!       .unwrap();
//!   match search(&task, LmCut).unwrap() {
//!       Outcome::Solved(plan) => assert_eq!(plan.to_string(), "op1\nop2\nPlan cost: 3"),
//!       Outcome::Unreachable => unreachable!(),
//!   }
//!   ```
//

// Nested modules
mod frontier;

// Imports
use std::collections::HashMap;
use std::error;
use std::fmt::{Display, Formatter, Result as FResult};

use enum_debug::EnumDebug;
use frontier::{Entry, Frontier};

use crate::heuristics::Heuristic;
use crate::log::{debug, trace};
use crate::task::{Cost, OperatorId, Plan, State, Task};


/***** ERRORS *****/
/// Defines the ways in which a search may be aborted.
///
/// Note that failing to find a plan is _not_ an error, but [`Outcome::Unreachable`].
#[derive(Debug)]
pub enum Error {
    /// More distinct states were discovered than the [`SearchConfig`] allows.
    ResourceExhausted { limit: usize, expanded: usize },
}
impl Display for Error {
    #[inline]
    fn fmt(&self, f: &mut Formatter) -> FResult {
        match self {
            Self::ResourceExhausted { limit, expanded } => {
                write!(f, "Search exceeded its limit of {limit} state(s) after expanding {expanded} node(s)")
            },
        }
    }
}
impl error::Error for Error {}





/***** HELPERS *****/
/// A discovered state, linked to how it was reached.
#[derive(Clone, Debug)]
struct Node {
    /// The state itself.
    state:  State,
    /// The node it was reached from, and with what operator. [`None`] for the initial state.
    parent: Option<(usize, OperatorId)>,
}



/// Walks the parent links back to the initial state.
///
/// # Arguments
/// - `task`: The [`Task`] the nodes belong to.
/// - `arena`: All the discovered [`Node`]s.
/// - `node`: The node that satisfies the goal.
/// - `cost`: The cost of reaching it.
///
/// # Returns
/// A [`Plan`] reaching `node` from the initial state.
fn extract_plan(task: &Task, arena: &[Node], mut node: usize, cost: u64) -> Plan {
    let mut steps: Vec<&str> = Vec::new();
    while let Some((parent, op)) = arena[node].parent {
        steps.push(task.operator(op).name());
        node = parent;
    }
    steps.reverse();
    Plan::new(steps, cost)
}





/***** AUXILLARY *****/
/// Configures limits of the search.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct SearchConfig {
    /// The maximum number of distinct states the search may hold on to. [`None`] for no limit.
    pub max_states: Option<usize>,
}
impl SearchConfig {
    /// Constructor for a SearchConfig without any limits.
    #[inline]
    pub fn new() -> Self { Self::default() }

    /// Limits the number of distinct states the search may hold on to.
    ///
    /// # Arguments
    /// - `limit`: The new maximum.
    ///
    /// # Returns
    /// Self for chaining.
    #[inline]
    pub fn max_states(mut self, limit: usize) -> Self {
        self.max_states = Some(limit);
        self
    }
}



/// Keeps track of how much work the search did.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct SearchStatistics {
    /// The number of nodes whose successors were generated.
    pub expanded:  usize,
    /// The number of successors generated.
    pub generated: usize,
    /// The number of times the heuristic was called.
    pub evaluated: usize,
    /// The number of states the heuristic proved to be dead ends.
    pub dead_ends: usize,
    /// The number of frontier entries discarded because their state was reached more cheaply since.
    pub stale:     usize,
}
impl Display for SearchStatistics {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        write!(
            f,
            "{} expanded, {} generated, {} evaluated, {} dead end(s), {} stale",
            self.expanded, self.generated, self.evaluated, self.dead_ends, self.stale
        )
    }
}



/// The result of a search that ran to completion.
#[derive(Clone, Debug, EnumDebug, Eq, PartialEq)]
pub enum Outcome {
    /// An optimal plan was found.
    Solved(Plan),
    /// No plan exists.
    Unreachable,
}
impl Outcome {
    /// Returns the plan, if any.
    #[inline]
    pub fn plan(&self) -> Option<&Plan> {
        match self {
            Self::Solved(plan) => Some(plan),
            Self::Unreachable => None,
        }
    }

    /// Returns whether a plan was found.
    #[inline]
    pub fn is_solved(&self) -> bool { matches!(self, Self::Solved(_)) }
}





/***** LIBRARY *****/
/// Searches for an optimal plan.
///
/// Same as [`search_with()`], but without limits and without returning the statistics.
///
/// # Arguments
/// - `task`: The [`Task`] to solve.
/// - `heuristic`: Some [`Heuristic`] to guide the search with. Must be admissible for the plan
///   to be optimal.
///
/// # Returns
/// An [`Outcome`] with an optimal [`Plan`] if there is one.
///
/// # Errors
/// This function does not error in practice, as there is no limit configured.
#[inline]
pub fn search<H: Heuristic>(task: &Task, heuristic: H) -> Result<Outcome, Error> {
    search_with(task, heuristic, &SearchConfig::default()).map(|(outcome, _)| outcome)
}

/// Searches for an optimal plan using A*.
///
/// # Arguments
/// - `task`: The [`Task`] to solve.
/// - `heuristic`: Some [`Heuristic`] to guide the search with. Must be admissible for the plan
///   to be optimal. Successors for which it returns [`Cost::Infinite`] are pruned.
/// - `config`: A [`SearchConfig`] with the limits of the search.
///
/// # Returns
/// An [`Outcome`] with an optimal [`Plan`] if there is one, together with [`SearchStatistics`]
/// about how it was found.
///
/// # Errors
/// This function errors if the search discovered more states than `config` allows.
pub fn search_with<H: Heuristic>(task: &Task, mut heuristic: H, config: &SearchConfig) -> Result<(Outcome, SearchStatistics), Error> {
    let mut stats = SearchStatistics::default();

    // Look at the initial state first
    let init: &State = task.init();
    stats.evaluated += 1;
    let h: u64 = match heuristic.evaluate(task, init) {
        Cost::Finite(h) => h,
        Cost::Infinite => {
            stats.dead_ends += 1;
            debug!("Initial state is a dead end; goal is unreachable");
            return Ok((Outcome::Unreachable, stats));
        },
    };
    debug!("Starting search with h(init) = {h}");

    let mut arena: Vec<Node> = vec![Node { state: init.clone(), parent: None }];
    let mut best: HashMap<State, u64> = HashMap::from([(init.clone(), 0)]);
    let mut frontier = Frontier::new();
    frontier.push(h, 0, 0);
    check_limit(config, &best, &stats)?;

    // Expand until we find the goal
    while let Some(entry) = frontier.pop() {
        let Entry { g, node, .. } = entry;
        let state: State = arena[node].state.clone();
        if best.get(&state).is_some_and(|b| *b < g) {
            stats.stale += 1;
            continue;
        }
        if task.is_goal(&state) {
            let plan: Plan = extract_plan(task, &arena, node, g);
            debug!("Found plan of {} step(s) with cost {g} ({stats})", plan.len());
            return Ok((Outcome::Solved(plan), stats));
        }
        trace!("Expanding node {node} (f = {}, g = {g}, {} in frontier)", entry.f, frontier.len());
        stats.expanded += 1;

        for (id, op) in task.applicable(&state) {
            stats.generated += 1;
            let next: State = state.apply(op);
            let next_g: u64 = g.saturating_add(op.cost());
            if best.get(&next).is_some_and(|b| *b <= next_g) {
                continue;
            }
            best.insert(next.clone(), next_g);
            check_limit(config, &best, &stats)?;

            // Only bother the frontier with states that can still reach the goal
            stats.evaluated += 1;
            let Cost::Finite(h) = heuristic.evaluate(task, &next) else {
                stats.dead_ends += 1;
                continue;
            };
            arena.push(Node { state: next, parent: Some((node, id)) });
            frontier.push(next_g.saturating_add(h), next_g, arena.len() - 1);
        }
    }

    debug!("Frontier exhausted; goal is unreachable ({stats})");
    Ok((Outcome::Unreachable, stats))
}

/// Checks whether the search still respects its configured limits.
///
/// # Errors
/// This function errors if `best` contains more states than `config` allows.
#[inline]
fn check_limit(config: &SearchConfig, best: &HashMap<State, u64>, stats: &SearchStatistics) -> Result<(), Error> {
    match config.max_states {
        Some(limit) if best.len() > limit => {
            debug!("Search ran out of states ({stats})");
            Err(Error::ResourceExhausted { limit, expanded: stats.expanded })
        },
        _ => Ok(()),
    }
}





/***** TESTS *****/
#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::heuristics::{HMax, HeuristicKind, LmCut};
    use crate::task::TaskBuilder;
    use crate::tests::{arb_task, brute_force, scenario_a, scenario_b, scenario_c};

    #[test]
    fn test_search_scenarios() {
        #[cfg(feature = "log")]
        crate::tests::setup_logger();

        for kind in [HeuristicKind::HMax, HeuristicKind::LmCut] {
            let a = scenario_a();
            let plan: Plan = search(&a, kind).unwrap().plan().cloned().unwrap();
            assert_eq!(plan.steps(), &["op1", "op2"]);
            assert_eq!(plan.cost(), 3);
            plan.validate(&a).unwrap();

            let b = scenario_b();
            let plan: Plan = search(&b, kind).unwrap().plan().cloned().unwrap();
            assert_eq!(plan.cost(), 10);
            assert_eq!(plan.len(), 2);
            plan.validate(&b).unwrap();

            let c = scenario_c();
            let (outcome, stats) = search_with(&c, kind, &SearchConfig::new()).unwrap();
            assert_eq!(outcome, Outcome::Unreachable);
            assert_eq!(stats.expanded, 0);
        }
    }

    #[test]
    fn test_search_goal_in_init() {
        #[cfg(feature = "log")]
        crate::tests::setup_logger();

        let task = TaskBuilder::new().init(["a"]).goal(["a"]).operator("op", ["a"], ["b"], [] as [&str; 0], 1).build().unwrap();
        let (outcome, stats) = search_with(&task, HMax, &SearchConfig::new()).unwrap();
        assert_eq!(outcome, Outcome::Solved(Plan::new([] as [&str; 0], 0)));
        assert_eq!(stats.expanded, 0);
    }

    #[test]
    fn test_search_respects_deletes() {
        #[cfg(feature = "log")]
        crate::tests::setup_logger();

        // Relaxed, `go` then `fetch` would do; but `go` deletes `home`, so we have to come back
        let task = TaskBuilder::new()
            .init(["home"])
            .goal(["home", "milk"])
            .operator("go", ["home"], ["shop"], ["home"], 1)
            .operator("fetch", ["shop"], ["milk"], [] as [&str; 0], 1)
            .operator("back", ["shop"], ["home"], ["shop"], 1)
            .build()
            .unwrap();
        let plan: Plan = search(&task, LmCut).unwrap().plan().cloned().unwrap();
        assert_eq!(plan.steps(), &["go", "fetch", "back"]);
        assert_eq!(plan.cost(), 3);
    }

    #[test]
    fn test_search_exhausts_frontier() {
        #[cfg(feature = "log")]
        crate::tests::setup_logger();

        // `a` and `b` can never be true at the same time, but relaxed they can
        let task = TaskBuilder::new()
            .init(["a"])
            .goal(["a", "b"])
            .operator("ab", ["a"], ["b"], ["a"], 1)
            .operator("ba", ["b"], ["a"], ["b"], 1)
            .build()
            .unwrap();
        let (outcome, stats) = search_with(&task, LmCut, &SearchConfig::new()).unwrap();
        assert_eq!(outcome, Outcome::Unreachable);
        assert!(stats.expanded > 0);
    }

    #[test]
    fn test_search_resource_exhausted() {
        #[cfg(feature = "log")]
        crate::tests::setup_logger();

        let mut builder = TaskBuilder::new().init(["s0"]).goal(["s10"]);
        for i in 0..10 {
            builder.push_operator(format!("step{i}"), [format!("s{i}")], [format!("s{}", i + 1)], [format!("s{i}")], 1);
        }
        let task: Task = builder.build().unwrap();

        let err = search_with(&task, HMax, &SearchConfig::new().max_states(5)).unwrap_err();
        assert!(matches!(err, Error::ResourceExhausted { limit: 5, .. }));

        // Plenty of room is fine
        let (outcome, _) = search_with(&task, HMax, &SearchConfig::new().max_states(11)).unwrap();
        assert_eq!(outcome.plan().map(Plan::cost), Some(10));
    }

    #[test]
    fn test_search_closure_heuristic() {
        #[cfg(feature = "log")]
        crate::tests::setup_logger();

        let b = scenario_b();
        let blind = |task: &Task, state: &State| if task.is_goal(state) { Cost::ZERO } else { Cost::Finite(1) };
        let (outcome, blind_stats) = search_with(&b, blind, &SearchConfig::new()).unwrap();
        assert_eq!(outcome.plan().map(Plan::cost), Some(10));

        // LM-cut is perfect here, so it never needs more work than blind search
        let (_, lmcut_stats) = search_with(&b, LmCut, &SearchConfig::new()).unwrap();
        assert!(lmcut_stats.expanded <= blind_stats.expanded);
    }

    proptest! {
        #[test]
        fn prop_search_is_optimal(task in arb_task()) {
            let optimal: Option<u64> = brute_force(&task, task.init());
            for kind in [HeuristicKind::HMax, HeuristicKind::LmCut] {
                let outcome: Outcome = search(&task, kind).unwrap();
                match (outcome, optimal) {
                    (Outcome::Solved(plan), Some(cost)) => {
                        prop_assert_eq!(plan.cost(), cost);
                        prop_assert!(plan.validate(&task).is_ok());
                    },
                    (Outcome::Unreachable, None) => {},
                    (outcome, optimal) => prop_assert!(false, "{kind}: got {outcome:?}, expected optimal cost {optimal:?}"),
                }
            }
        }
    }
}
