//  STATE.rs
//    by Lut99
//
//  Created:
//    03 Feb 2025, 17:11:26
//  Last edited:
//    13 Oct 2026, 09:58:41
//  Auto updated?
//    Yes
//
//  Description:
//!   Implements the [`State`], a set of facts that are true at some point
//!   during planning.
//

use std::fmt::{Display, Formatter, Result as FResult};

use itertools::Itertools as _;

use super::{FactId, Operator, Task};


/***** CONSTANTS *****/
/// The number of facts stored per word of the bitset.
const WORD_BITS: usize = u64::BITS as usize;





/***** FORMATTERS *****/
/// Formats a [`State`] with the names of its facts.
///
/// Obtained through [`State::display()`].
#[derive(Clone, Copy, Debug)]
pub struct StateDisplay<'s> {
    /// The state to format.
    state: &'s State,
    /// The task that defines the names of the facts.
    task:  &'s Task,
}
impl<'s> Display for StateDisplay<'s> {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult { write!(f, "{{{}}}", self.state.iter().map(|id| self.task.fact(id)).join(", ")) }
}





/***** LIBRARY *****/
/// A set of facts that are true.
///
/// Used both as node in the search graph and as input to the heuristics. Two states are equal
/// (and hash the same) iff they contain the same facts, regardless of how they were reached.
///
/// Internally, this is a bitset over the [`FactId`]s of one [`Task`]; states of different tasks
/// should not be mixed.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct State {
    /// The bits, one per fact in the task.
    bits: Box<[u64]>,
}

// Constructors
impl State {
    /// Creates a new State in which no fact is true.
    ///
    /// # Arguments
    /// - `n_facts`: The number of facts in the task this state belongs to.
    ///
    /// # Returns
    /// An empty State.
    #[inline]
    pub fn empty(n_facts: usize) -> Self { Self { bits: vec![0; n_facts.div_ceil(WORD_BITS)].into_boxed_slice() } }

    /// Creates a new State in which exactly the given facts are true.
    ///
    /// # Arguments
    /// - `n_facts`: The number of facts in the task this state belongs to.
    /// - `facts`: The [`FactId`]s of the facts that are true.
    ///
    /// # Returns
    /// A new State.
    ///
    /// # Panics
    /// This function panics if any of the given facts is out-of-range for `n_facts`.
    #[inline]
    pub fn from_ids(n_facts: usize, facts: impl IntoIterator<Item = FactId>) -> Self {
        let mut state = Self::empty(n_facts);
        for fact in facts {
            if fact >= n_facts {
                panic!("Fact {fact} is out-of-range for a task with {n_facts} facts");
            }
            state.insert(fact);
        }
        state
    }
}

// Collection
impl State {
    /// Checks whether a fact is true in this state.
    ///
    /// Facts beyond the end of the set are simply false.
    ///
    /// # Arguments
    /// - `fact`: The [`FactId`] of the fact to check.
    ///
    /// # Returns
    /// True if it holds, false otherwise.
    #[inline]
    pub fn contains(&self, fact: FactId) -> bool { self.bits.get(fact / WORD_BITS).map(|w| (w >> (fact % WORD_BITS)) & 1 == 1).unwrap_or(false) }

    /// Checks whether all the given facts are true in this state.
    ///
    /// # Arguments
    /// - `facts`: The [`FactId`]s to check.
    ///
    /// # Returns
    /// True if every one of them holds (or if there are none).
    #[inline]
    pub fn contains_all(&self, facts: &[FactId]) -> bool { facts.iter().all(|f| self.contains(*f)) }

    /// Makes a fact true.
    #[inline]
    pub(crate) fn insert(&mut self, fact: FactId) { self.bits[fact / WORD_BITS] |= 1u64 << (fact % WORD_BITS); }

    /// Makes a fact false.
    #[inline]
    pub(crate) fn remove(&mut self, fact: FactId) { self.bits[fact / WORD_BITS] &= !(1u64 << (fact % WORD_BITS)); }

    /// Returns the number of true facts.
    #[inline]
    pub fn len(&self) -> usize { self.bits.iter().map(|w| w.count_ones() as usize).sum() }

    /// Returns whether no fact is true.
    #[inline]
    pub fn is_empty(&self) -> bool { self.bits.iter().all(|w| *w == 0) }

    /// Returns an iterator over the true facts, in ascending [`FactId`] order.
    ///
    /// # Returns
    /// An [`Iterator`] yielding [`FactId`]s.
    #[inline]
    pub fn iter(&self) -> impl '_ + Iterator<Item = FactId> {
        self.bits.iter().enumerate().flat_map(|(i, w)| {
            let w: u64 = *w;
            (0..WORD_BITS).filter(move |b| (w >> b) & 1 == 1).map(move |b| i * WORD_BITS + b)
        })
    }
}

// Planning
impl State {
    /// Computes the state that results from applying an operator in this one.
    ///
    /// The delete-effects are removed first, and the add-effects added afterwards. As such, a fact
    /// that is both deleted and added by the same operator is true in the successor.
    ///
    /// Note that this does _not_ check the operator's preconditions. Use
    /// [`Operator::is_applicable()`] for that.
    ///
    /// # Arguments
    /// - `op`: The [`Operator`] to apply.
    ///
    /// # Returns
    /// A new State, leaving this one untouched.
    pub fn apply(&self, op: &Operator) -> Self {
        let mut succ: Self = self.clone();
        for fact in op.del() {
            succ.remove(*fact);
        }
        for fact in op.add() {
            succ.insert(*fact);
        }
        succ
    }

    /// Returns a formatter that writes this state with the names of its facts.
    ///
    /// # Arguments
    /// - `task`: The [`Task`] that this state belongs to.
    ///
    /// # Returns
    /// A [`StateDisplay`] implementing [`Display`].
    #[inline]
    pub fn display<'s>(&'s self, task: &'s Task) -> StateDisplay<'s> { StateDisplay { state: self, task } }
}





/***** TESTS *****/
