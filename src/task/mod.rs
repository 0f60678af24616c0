//  MOD.rs
//    by Lut99
//
//  Created:
//    02 Oct 2026, 13:40:11
//  Last edited:
//    14 Oct 2026, 10:12:55
//  Auto updated?
//    Yes
//
//  Description:
//!   Defines the STRIPS task model: [`Fact`]s, [`Operator`]s, [`State`]s,
//!   [`Plan`]s and the [`Task`] that ties them together.
//!
//!   A task is immutable once [built](TaskBuilder::build()). Internally, every fact is assigned a
//!   dense [`FactId`] in _lexicographic_ order of the fact names. This means that comparing two
//!   ids is the same as comparing their names, which is what the deterministic tie-breaking of
//!   the [heuristics](crate::heuristics) relies on.
//

// Nested modules
mod builder;
mod cost;
mod plan;
mod state;

// Imports
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt::{Display, Formatter, Result as FResult};
use std::sync::Arc;

pub use builder::{Error, FactContext, TaskBuilder};
pub use cost::Cost;
use indexmap::IndexSet;
use itertools::Itertools as _;
pub use plan::{Plan, PlanError};
pub use state::{State, StateDisplay};


/***** TYPES *****/
/// Identifies a [`Fact`] within a [`Task`].
pub type FactId = usize;

/// Identifies an [`Operator`] within a [`Task`].
pub type OperatorId = usize;





/***** LIBRARY *****/
/// An opaque, interned boolean proposition.
///
/// Cheap to clone and compared (and ordered) by name.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Fact(Arc<str>);
impl Fact {
    /// Constructor for the Fact.
    ///
    /// # Arguments
    /// - `name`: The name of the proposition.
    ///
    /// # Returns
    /// A new Fact.
    #[inline]
    pub fn new(name: impl AsRef<str>) -> Self { Self(Arc::from(name.as_ref())) }

    /// Returns the name of the proposition.
    #[inline]
    pub fn name(&self) -> &str { &self.0 }
}
impl Borrow<str> for Fact {
    #[inline]
    fn borrow(&self) -> &str { &self.0 }
}
impl Display for Fact {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult { write!(f, "{}", self.0) }
}
impl From<&str> for Fact {
    #[inline]
    fn from(value: &str) -> Self { Self::new(value) }
}
impl From<String> for Fact {
    #[inline]
    fn from(value: String) -> Self { Self(Arc::from(value)) }
}



/// A STRIPS operator, compiled against the facts of its [`Task`].
///
/// The precondition, add- and delete-sets are deduplicated and sorted by [`FactId`]. The cost is
/// guaranteed to be non-negative because the [`TaskBuilder`] rejects anything else.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Operator {
    /// The name of the operator.
    name: String,
    /// The facts that must hold before the operator can be applied.
    pre:  Box<[FactId]>,
    /// The facts that the operator makes true.
    add:  Box<[FactId]>,
    /// The facts that the operator makes false.
    del:  Box<[FactId]>,
    /// The price of applying the operator.
    cost: u64,
}
impl Operator {
    /// Returns the name of this operator.
    #[inline]
    pub fn name(&self) -> &str { &self.name }

    /// Returns the preconditions of this operator.
    #[inline]
    pub fn pre(&self) -> &[FactId] { &self.pre }

    /// Returns the add-effects of this operator.
    #[inline]
    pub fn add(&self) -> &[FactId] { &self.add }

    /// Returns the delete-effects of this operator.
    #[inline]
    pub fn del(&self) -> &[FactId] { &self.del }

    /// Returns the cost of this operator.
    #[inline]
    pub fn cost(&self) -> u64 { self.cost }

    /// Checks whether this operator can be applied in the given state.
    ///
    /// # Arguments
    /// - `state`: The [`State`] to check the preconditions in.
    ///
    /// # Returns
    /// True if all preconditions hold in `state`, false otherwise.
    #[inline]
    pub fn is_applicable(&self, state: &State) -> bool { state.contains_all(&self.pre) }

    /// Returns a formatter that writes this operator with the names of its facts.
    ///
    /// # Arguments
    /// - `task`: The [`Task`] that this operator belongs to.
    ///
    /// # Returns
    /// An [`OperatorDisplay`] implementing [`Display`].
    #[inline]
    pub fn display<'o>(&'o self, task: &'o Task) -> OperatorDisplay<'o> { OperatorDisplay { op: self, task } }
}

/// Formats an [`Operator`] with the names of its facts.
///
/// Obtained through [`Operator::display()`].
#[derive(Clone, Copy, Debug)]
pub struct OperatorDisplay<'o> {
    /// The operator to format.
    op:   &'o Operator,
    /// The task that defines the names of the facts.
    task: &'o Task,
}
impl<'o> Display for OperatorDisplay<'o> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        let names = |ids: &[FactId]| -> String { ids.iter().map(|id| self.task.fact(*id)).join(", ") };
        write!(
            f,
            "{}({}) pre {{{}}} add {{{}}} del {{{}}}",
            self.op.name,
            self.op.cost,
            names(&self.op.pre),
            names(&self.op.add),
            names(&self.op.del)
        )
    }
}



/// A STRIPS planning task.
///
/// Constructed once through a [`TaskBuilder`] and treated as read-only afterwards. It is `Send`
/// and `Sync`, so the same task can be searched from multiple threads at once.
#[derive(Clone, Debug)]
pub struct Task {
    /// All facts in the task, in lexicographic order. Their index is their [`FactId`].
    facts: IndexSet<Fact>,
    /// The state to start planning from.
    init: State,
    /// The facts that must hold at the end, sorted and deduplicated.
    goal: Box<[FactId]>,
    /// The operators, in the order they were given.
    operators: Vec<Operator>,
    /// Maps operator names to their index in `operators`.
    names: HashMap<String, OperatorId>,
}

// Facts
impl Task {
    /// Returns the number of facts in this task.
    #[inline]
    pub fn n_facts(&self) -> usize { self.facts.len() }

    /// Returns the fact with the given identifier.
    ///
    /// # Panics
    /// This function panics if the `id` is not of this task.
    #[inline]
    pub fn fact(&self, id: FactId) -> &Fact {
        self.facts.get_index(id).unwrap_or_else(|| panic!("Fact {id} is out-of-range for a task with {} facts", self.facts.len()))
    }

    /// Returns the identifier of the fact with the given name, if it exists.
    #[inline]
    pub fn fact_id(&self, name: &str) -> Option<FactId> { self.facts.get_index_of(name) }

    /// Returns an iterator over all facts in this task, in [`FactId`] order.
    #[inline]
    pub fn facts(&self) -> impl '_ + ExactSizeIterator<Item = &'_ Fact> { self.facts.iter() }
}

// States
impl Task {
    /// Returns the initial state of this task.
    #[inline]
    pub fn init(&self) -> &State { &self.init }

    /// Returns the goal facts of this task.
    #[inline]
    pub fn goal(&self) -> &[FactId] { &self.goal }

    /// Checks whether the given state satisfies the goal.
    #[inline]
    pub fn is_goal(&self, state: &State) -> bool { state.contains_all(&self.goal) }

    /// Builds a state of this task out of fact names.
    ///
    /// This is useful to evaluate heuristics for states other than the initial one.
    ///
    /// # Arguments
    /// - `facts`: The names of the facts that are true.
    ///
    /// # Returns
    /// A new [`State`].
    ///
    /// # Errors
    /// This function errors if any of the facts is not part of this task.
    pub fn state<I>(&self, facts: I) -> Result<State, Error>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut state = State::empty(self.facts.len());
        for fact in facts {
            let fact: &str = fact.as_ref();
            match self.fact_id(fact) {
                Some(id) => state.insert(id),
                None => return Err(Error::UndeclaredFact { fact: fact.into(), context: FactContext::State }),
            }
        }
        Ok(state)
    }
}

// Operators
impl Task {
    /// Returns the operators of this task, in their original order.
    #[inline]
    pub fn operators(&self) -> &[Operator] { &self.operators }

    /// Returns the operator with the given identifier.
    ///
    /// # Panics
    /// This function panics if the `id` is not of this task.
    #[inline]
    pub fn operator(&self, id: OperatorId) -> &Operator { &self.operators[id] }

    /// Finds an operator by name.
    ///
    /// # Returns
    /// The [`OperatorId`] and [`Operator`] with that name, or [`None`] if there is none.
    #[inline]
    pub fn operator_by_name(&self, name: &str) -> Option<(OperatorId, &Operator)> {
        self.names.get(name).map(|id| (*id, &self.operators[*id]))
    }

    /// Returns the operators that are applicable in the given state.
    ///
    /// # Returns
    /// An [`Iterator`] yielding the [`OperatorId`] and [`Operator`] of every applicable one, in
    /// task order.
    #[inline]
    pub fn applicable<'t>(&'t self, state: &'t State) -> impl 't + Iterator<Item = (OperatorId, &'t Operator)> {
        self.operators.iter().enumerate().filter(move |(_, op)| op.is_applicable(state))
    }
}

// Formatting
impl Display for Task {
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        writeln!(f, "Task {{")?;
        writeln!(f, "    facts: {}", self.facts.iter().join(", "))?;
        writeln!(f, "    init: {}", self.init.display(self))?;
        writeln!(f, "    goal: {{{}}}", self.goal.iter().map(|id| self.fact(*id)).join(", "))?;
        write!(f, "    operators:")?;
        if !self.operators.is_empty() {
            writeln!(f)?;
            for op in &self.operators {
                writeln!(f, "      - {}", op.display(self))?;
            }
        } else {
            writeln!(f, " <none>")?;
        }
        writeln!(f, "}}")
    }
}





/***** TESTS *****/
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_applicable_and_apply() {
        let task = TaskBuilder::new()
            .init(["a"])
            .goal(["c"])
            .operator("ab", ["a"], ["b"], ["a"], 1)
            .operator("bc", ["b"], ["c"], [] as [&str; 0], 2)
            .operator("readd", ["a"], ["a"], ["a"], 0)
            .build()
            .unwrap();
        assert_eq!(task.applicable(task.init()).map(|(id, _)| id).collect::<Vec<_>>(), vec![0, 2]);

        let (_, ab) = task.operator_by_name("ab").unwrap();
        let next: State = task.init().apply(ab);
        assert_eq!(next, task.state(["b"]).unwrap());
        assert_eq!(task.applicable(&next).map(|(_, op)| op.name()).collect::<Vec<_>>(), vec!["bc"]);

        // Deletes are applied before adds
        let (_, readd) = task.operator_by_name("readd").unwrap();
        assert_eq!(task.init().apply(readd), *task.init());
    }

    #[test]
    fn test_task_display() {
        let task = TaskBuilder::new().init(["b"]).goal(["a"]).operator("ba", ["b"], ["a"], ["b"], 3).build().unwrap();
        let (_, op) = task.operator_by_name("ba").unwrap();
        assert_eq!(op.display(&task).to_string(), "ba(3) pre {b} add {a} del {b}");
        assert_eq!(task.init().display(&task).to_string(), "{b}");
        assert_eq!(
            task.to_string(),
            "Task {\n    facts: a, b\n    init: {b}\n    goal: {a}\n    operators:\n      - ba(3) pre {b} add {a} del {b}\n}\n"
        );
    }

    #[cfg(feature = "macros")]
    #[test]
    fn test_task_macro() {
        use strips_macros::task;

        let task: Task = task! {
            #![crate]
            facts { home, work, "coffee-drunk" }
            init { home }
            goal { work, "coffee-drunk" }
            drive: pre { home } add { work } del { home } cost 3;
            "drink-coffee": pre { home } add { "coffee-drunk" };
        }
        .unwrap();
        assert_eq!(task.n_facts(), 3);
        assert_eq!(task.fact(0).name(), "coffee-drunk");
        assert_eq!(task.operator_by_name("drive").map(|(_, op)| op.cost()), Some(3));
        assert_eq!(task.operator_by_name("drink-coffee").map(|(_, op)| op.cost()), Some(1));

        // Errors are the builder's
        let err = task! {
            #![crate]
            goal { a }
            bad: add { a } cost -2;
        }
        .unwrap_err();
        assert!(matches!(err, Error::NegativeCost { cost: -2, .. }));
    }
}
