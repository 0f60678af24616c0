//  BUILDER.rs
//    by Lut99
//
//  Created:
//    02 Oct 2026, 15:02:19
//  Last edited:
//    14 Oct 2026, 10:20:43
//  Auto updated?
//    Yes
//
//  Description:
//!   Implements the [`TaskBuilder`], through which task loaders construct
//!   (and validate) a [`Task`].
//

use std::collections::{BTreeSet, HashMap};
use std::error;
use std::fmt::{Display, Formatter, Result as FResult};

use indexmap::IndexSet;
use itertools::Itertools as _;

use super::{Fact, FactId, Operator, OperatorId, State, Task};
use crate::log::{debug, trace};


/***** ERRORS *****/
/// Defines the reasons a [`Task`] may be rejected as malformed.
#[derive(Debug)]
pub enum Error {
    /// An operator was given a negative cost.
    NegativeCost { operator: String, cost: i64 },
    /// Two operators share the same name.
    DuplicateOperator { name: String },
    /// A fact with an empty name was given.
    EmptyFactName { context: FactContext },
    /// A fact was referenced that is not part of the (declared) universe.
    UndeclaredFact { fact: String, context: FactContext },
}
impl Display for Error {
    #[inline]
    fn fmt(&self, f: &mut Formatter) -> FResult {
        match self {
            Self::NegativeCost { operator, cost } => write!(f, "Operator \"{operator}\" has negative cost {cost}"),
            Self::DuplicateOperator { name } => write!(f, "Operator \"{name}\" is defined more than once"),
            Self::EmptyFactName { context } => write!(f, "Fact with an empty name in {context}"),
            Self::UndeclaredFact { fact, context } => write!(f, "Fact \"{fact}\" in {context} is not a declared fact"),
        }
    }
}
impl error::Error for Error {}



/// Describes where in a task a fact was referenced.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum FactContext {
    /// In the explicitly declared universe.
    Declaration,
    /// In the initial state.
    Init,
    /// In the goal.
    Goal,
    /// In the preconditions of the named operator.
    Precondition { operator: String },
    /// In the add-effects of the named operator.
    AddEffect { operator: String },
    /// In the delete-effects of the named operator.
    DeleteEffect { operator: String },
    /// In a state built after construction (see [`Task::state()`]).
    State,
}
impl Display for FactContext {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        match self {
            Self::Declaration => write!(f, "the declared facts"),
            Self::Init => write!(f, "the initial state"),
            Self::Goal => write!(f, "the goal"),
            Self::Precondition { operator } => write!(f, "the preconditions of operator \"{operator}\""),
            Self::AddEffect { operator } => write!(f, "the add-effects of operator \"{operator}\""),
            Self::DeleteEffect { operator } => write!(f, "the delete-effects of operator \"{operator}\""),
            Self::State => write!(f, "a state"),
        }
    }
}





/***** HELPERS *****/
/// An operator as given to the builder, not yet checked nor compiled.
#[derive(Clone, Debug)]
struct OperatorDef {
    name: String,
    pre:  Vec<String>,
    add:  Vec<String>,
    del:  Vec<String>,
    cost: i64,
}
impl OperatorDef {
    /// Returns every fact referenced by this operator together with where it is referenced.
    fn references(&self) -> impl '_ + Iterator<Item = (&'_ str, FactContext)> {
        self.pre
            .iter()
            .map(|f| (f.as_str(), FactContext::Precondition { operator: self.name.clone() }))
            .chain(self.add.iter().map(|f| (f.as_str(), FactContext::AddEffect { operator: self.name.clone() })))
            .chain(self.del.iter().map(|f| (f.as_str(), FactContext::DeleteEffect { operator: self.name.clone() })))
    }
}



/// Maps fact names to a sorted, deduplicated list of [`FactId`]s.
///
/// # Arguments
/// - `facts`: The (sorted) universe of facts to resolve in.
/// - `names`: The names to resolve.
///
/// # Returns
/// The resolved identifiers.
///
/// # Panics
/// This function panics if a name is not in `facts`, which the builder has already checked.
fn resolve(facts: &IndexSet<Fact>, names: &[String]) -> Box<[FactId]> {
    names
        .iter()
        .map(|n| facts.get_index_of(n.as_str()).unwrap_or_else(|| panic!("Fact \"{n}\" was not collected in the universe")))
        .sorted_unstable()
        .dedup()
        .collect()
}





/***** LIBRARY *****/
/// Builds a [`Task`] from its facts, initial state, goal and operators.
///
/// This is the interface offered to task loaders. Nothing is checked until [`TaskBuilder::build()`]
/// is called, which rejects malformed tasks before any heuristic or search ever sees them.
///
/// # Example
/// ```rust
/// use strips::task::TaskBuilder;
///
/// let task = TaskBuilder::new()
///     .init(["at-home"])
///     .goal(["at-work"])
///     .operator("drive", ["at-home"], ["at-work"], ["at-home"], 3)
///     .build()
///     .unwrap();
/// assert_eq!(task.n_facts(), 2);
/// assert_eq!(task.operators().len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct TaskBuilder {
    /// If given, the only facts that may be referenced.
    declared:  Option<Vec<String>>,
    /// The initially true facts.
    init:      Vec<String>,
    /// The facts to reach.
    goal:      Vec<String>,
    /// The operators, in order.
    operators: Vec<OperatorDef>,
}

// Constructors
impl TaskBuilder {
    /// Constructor for the TaskBuilder that initializes it to an empty task.
    ///
    /// # Returns
    /// A new TaskBuilder without facts, goal or operators.
    #[inline]
    pub fn new() -> Self { Self::default() }
}

// Building
impl TaskBuilder {
    /// Fixes the universe of facts.
    ///
    /// Without calling this, the universe is simply every fact referenced somewhere. With it, any
    /// reference to a fact outside of the declared ones is rejected by [`TaskBuilder::build()`].
    /// Can be called multiple times to declare more facts.
    ///
    /// # Arguments
    /// - `facts`: The names of the facts to declare.
    #[inline]
    pub fn declare<I>(mut self, facts: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.declared.get_or_insert_with(Vec::new).extend(facts.into_iter().map(Into::into));
        self
    }

    /// Adds facts to the initial state.
    ///
    /// # Arguments
    /// - `facts`: The names of the facts that are initially true.
    #[inline]
    pub fn init<I>(mut self, facts: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.init.extend(facts.into_iter().map(Into::into));
        self
    }

    /// Adds facts to the goal.
    ///
    /// # Arguments
    /// - `facts`: The names of the facts that must be true at the end.
    #[inline]
    pub fn goal<I>(mut self, facts: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.goal.extend(facts.into_iter().map(Into::into));
        self
    }

    /// Adds an operator.
    ///
    /// # Arguments
    /// - `name`: The (unique) name of the operator.
    /// - `pre`: The names of its preconditions.
    /// - `add`: The names of its add-effects.
    /// - `del`: The names of its delete-effects.
    /// - `cost`: Its cost. Must be non-negative, but that is only checked when building.
    #[inline]
    pub fn operator<P, A, D>(mut self, name: impl Into<String>, pre: P, add: A, del: D, cost: i64) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
        D: IntoIterator,
        D::Item: Into<String>,
    {
        self.push_operator(name, pre, add, del, cost);
        self
    }

    /// Adds an operator without consuming the builder.
    ///
    /// Same as [`TaskBuilder::operator()`], but convenient in loops.
    pub fn push_operator<P, A, D>(&mut self, name: impl Into<String>, pre: P, add: A, del: D, cost: i64) -> &mut Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
        D: IntoIterator,
        D::Item: Into<String>,
    {
        self.operators.push(OperatorDef {
            name: name.into(),
            pre: pre.into_iter().map(Into::into).collect(),
            add: add.into_iter().map(Into::into).collect(),
            del: del.into_iter().map(Into::into).collect(),
            cost,
        });
        self
    }

    /// Validates and compiles the task.
    ///
    /// # Returns
    /// A new, immutable [`Task`].
    ///
    /// # Errors
    /// This function errors if:
    /// - any operator has a negative cost;
    /// - two operators share a name;
    /// - any fact has an empty name; or
    /// - facts were [declared](TaskBuilder::declare()) and some fact is referenced that isn't.
    pub fn build(self) -> Result<Task, Error> {
        debug!("Building task with {} operator(s)", self.operators.len());

        // Check the operators themselves first
        let mut names: HashMap<String, OperatorId> = HashMap::with_capacity(self.operators.len());
        for (i, op) in self.operators.iter().enumerate() {
            if op.cost < 0 {
                return Err(Error::NegativeCost { operator: op.name.clone(), cost: op.cost });
            }
            if names.insert(op.name.clone(), i).is_some() {
                return Err(Error::DuplicateOperator { name: op.name.clone() });
            }
        }

        // Then collect all references, checking them against the declared universe (if any)
        let declared: Option<BTreeSet<&str>> = self.declared.as_ref().map(|d| d.iter().map(String::as_str).collect());
        if declared.as_ref().is_some_and(|d| d.contains("")) {
            return Err(Error::EmptyFactName { context: FactContext::Declaration });
        }
        let mut universe: BTreeSet<&str> = declared.clone().unwrap_or_default();
        let refs = self
            .init
            .iter()
            .map(|f| (f.as_str(), FactContext::Init))
            .chain(self.goal.iter().map(|f| (f.as_str(), FactContext::Goal)))
            .chain(self.operators.iter().flat_map(OperatorDef::references));
        for (fact, context) in refs {
            if fact.is_empty() {
                return Err(Error::EmptyFactName { context });
            }
            if let Some(declared) = &declared {
                if !declared.contains(fact) {
                    return Err(Error::UndeclaredFact { fact: fact.into(), context });
                }
            }
            universe.insert(fact);
        }

        // The BTreeSet iterates in lexicographic order, so the IDs will be ordered like the names
        let facts: IndexSet<Fact> = universe.into_iter().map(Fact::new).collect();
        trace!("Task universe: {}", facts.iter().join(", "));

        // Now compile everything against the universe
        let init: State = State::from_ids(facts.len(), resolve(&facts, &self.init).iter().copied());
        let goal: Box<[FactId]> = resolve(&facts, &self.goal);
        let operators: Vec<Operator> = self
            .operators
            .iter()
            .map(|op| Operator {
                name: op.name.clone(),
                pre:  resolve(&facts, &op.pre),
                add:  resolve(&facts, &op.add),
                del:  resolve(&facts, &op.del),
                // Checked to be non-negative above
                cost: op.cost as u64,
            })
            .collect();

        debug!("Built task with {} fact(s), {} goal fact(s) and {} operator(s)", facts.len(), goal.len(), operators.len());
        Ok(Task { facts, init, goal, operators, names })
    }
}





/***** TESTS *****/
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_orders_facts_lexicographically() {
        let task = TaskBuilder::new()
            .init(["zulu"])
            .goal(["alpha"])
            .operator("op", ["zulu", "zulu"], ["mike", "alpha"], ["zulu"], 2)
            .build()
            .unwrap();
        assert_eq!(task.facts().map(Fact::name).collect::<Vec<_>>(), vec!["alpha", "mike", "zulu"]);
        assert_eq!(task.fact_id("alpha"), Some(0));
        assert_eq!(task.fact_id("zulu"), Some(2));
        assert_eq!(task.fact_id("yankee"), None);

        // Deduplicated and sorted by ID
        let (id, op) = task.operator_by_name("op").unwrap();
        assert_eq!(id, 0);
        assert_eq!(op.pre(), &[2]);
        assert_eq!(op.add(), &[0, 1]);
        assert_eq!(op.del(), &[2]);
        assert_eq!(op.cost(), 2);
        assert_eq!(task.goal(), &[0]);
        assert!(task.init().contains(2));
        assert_eq!(task.init().len(), 1);
    }

    #[test]
    fn test_build_rejects_negative_cost() {
        let err = TaskBuilder::new().operator("bad", [] as [&str; 0], ["a"], [] as [&str; 0], -1).build().unwrap_err();
        assert!(matches!(err, Error::NegativeCost { ref operator, cost: -1 } if operator == "bad"));
        assert_eq!(err.to_string(), "Operator \"bad\" has negative cost -1");
    }

    #[test]
    fn test_build_rejects_duplicate_operators() {
        let err = TaskBuilder::new()
            .operator("op", [] as [&str; 0], ["a"], [] as [&str; 0], 1)
            .operator("op", [] as [&str; 0], ["b"], [] as [&str; 0], 1)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateOperator { ref name } if name == "op"));
    }

    #[test]
    fn test_build_rejects_undeclared_facts() {
        let err = TaskBuilder::new()
            .declare(["a", "b"])
            .init(["a"])
            .goal(["b"])
            .operator("op", ["a"], ["c"], [] as [&str; 0], 1)
            .build()
            .unwrap_err();
        assert!(
            matches!(err, Error::UndeclaredFact { ref fact, context: FactContext::AddEffect { ref operator } } if fact == "c" && operator == "op")
        );

        // Declared-but-unused facts are still part of the universe
        let task = TaskBuilder::new().declare(["a", "b", "unused"]).init(["a"]).goal(["b"]).build().unwrap();
        assert_eq!(task.n_facts(), 3);
    }

    #[test]
    fn test_build_rejects_empty_names() {
        let err = TaskBuilder::new().init([""]).build().unwrap_err();
        assert!(matches!(err, Error::EmptyFactName { context: FactContext::Init }));
    }

    #[test]
    fn test_task_state() {
        let task = TaskBuilder::new().init(["a"]).goal(["b"]).operator("op", ["a"], ["b"], ["a"], 1).build().unwrap();
        let state = task.state(["b"]).unwrap();
        assert!(task.is_goal(&state));
        assert!(!task.is_goal(task.init()));
        assert!(matches!(task.state(["nope"]), Err(Error::UndeclaredFact { context: FactContext::State, .. })));
    }
}
