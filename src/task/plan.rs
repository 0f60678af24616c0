//  PLAN.rs
//    by Lut99
//
//  Created:
//    06 Oct 2026, 10:51:37
//  Last edited:
//    14 Oct 2026, 10:33:09
//  Auto updated?
//    Yes
//
//  Description:
//!   Defines the [`Plan`], the result of a successful search, and a way of
//!   checking it against its task.
//

use std::error;
use std::fmt::{Display, Formatter, Result as FResult};

use super::{State, Task};


/***** ERRORS *****/
/// Defines the ways in which a [`Plan`] may fail to [validate](Plan::validate()).
#[derive(Debug)]
pub enum PlanError {
    /// The plan mentions an operator that is not in the task.
    UnknownOperator { step: usize, name: String },
    /// An operator's preconditions did not hold when it was applied.
    Inapplicable { step: usize, name: String },
    /// After executing the plan, the goal does not hold.
    GoalNotReached,
    /// The cost of the plan is not the sum of its operators' costs.
    CostMismatch { reported: u64, actual: u64 },
}
impl Display for PlanError {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        match self {
            Self::UnknownOperator { step, name } => write!(f, "Step {step} uses unknown operator \"{name}\""),
            Self::Inapplicable { step, name } => write!(f, "Step {step} applies operator \"{name}\" whose preconditions do not hold"),
            Self::GoalNotReached => write!(f, "Plan does not reach the goal"),
            Self::CostMismatch { reported, actual } => write!(f, "Plan reports cost {reported}, but its operators cost {actual}"),
        }
    }
}
impl error::Error for PlanError {}





/***** LIBRARY *****/
/// A sequence of operators that transforms the initial state of a task into one satisfying its
/// goal.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Plan {
    /// The names of the operators to apply, in order.
    steps: Vec<String>,
    /// The sum of the costs of those operators.
    cost:  u64,
}

// Constructors
impl Plan {
    /// Constructor for the Plan.
    ///
    /// # Arguments
    /// - `steps`: The names of the operators to apply, in order.
    /// - `cost`: The total cost of the plan.
    ///
    /// # Returns
    /// A new Plan. Note that it is not checked in any way; use [`Plan::validate()`] for that.
    #[inline]
    pub fn new(steps: impl IntoIterator<Item = impl Into<String>>, cost: u64) -> Self {
        Self { steps: steps.into_iter().map(Into::into).collect(), cost }
    }
}

// Accessors
impl Plan {
    /// Returns the operator names in this plan, in order.
    #[inline]
    pub fn steps(&self) -> &[String] { &self.steps }

    /// Returns the total cost of this plan.
    #[inline]
    pub fn cost(&self) -> u64 { self.cost }

    /// Returns the number of steps in this plan.
    #[inline]
    pub fn len(&self) -> usize { self.steps.len() }

    /// Returns whether this plan is empty (i.e., the initial state already satisfies the goal).
    #[inline]
    pub fn is_empty(&self) -> bool { self.steps.is_empty() }
}

// Checking
impl Plan {
    /// Simulates this plan on the given task.
    ///
    /// Starting in the task's initial state, every operator's preconditions are checked before
    /// applying it. At the end, the goal must hold and the reported cost must match the summed
    /// costs of the operators.
    ///
    /// # Arguments
    /// - `task`: The [`Task`] to validate against.
    ///
    /// # Returns
    /// The [`State`] the plan ends in.
    ///
    /// # Errors
    /// This function errors if the plan is not a valid plan for `task`.
    pub fn validate(&self, task: &Task) -> Result<State, PlanError> {
        let mut state: State = task.init().clone();
        let mut cost: u64 = 0;
        for (step, name) in self.steps.iter().enumerate() {
            let (_, op) = task.operator_by_name(name).ok_or_else(|| PlanError::UnknownOperator { step, name: name.clone() })?;
            if !op.is_applicable(&state) {
                return Err(PlanError::Inapplicable { step, name: name.clone() });
            }
            state = state.apply(op);
            cost = cost.saturating_add(op.cost());
        }
        if !task.is_goal(&state) {
            return Err(PlanError::GoalNotReached);
        }
        if cost != self.cost {
            return Err(PlanError::CostMismatch { reported: self.cost, actual: cost });
        }
        Ok(state)
    }
}

// Formatting
impl Display for Plan {
    /// Writes the operators one per line, followed by the cost.
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        for step in &self.steps {
            writeln!(f, "{step}")?;
        }
        write!(f, "Plan cost: {}", self.cost)
    }
}





/***** TESTS *****/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskBuilder;

    fn make_task() -> Task {
        TaskBuilder::new()
            .init(["a"])
            .goal(["c"])
            .operator("ab", ["a"], ["b"], ["a"], 1)
            .operator("bc", ["b"], ["c"], [] as [&str; 0], 2)
            .build()
            .unwrap()
    }

    #[test]
    fn test_plan_validate() {
        let task = make_task();
        let end: State = Plan::new(["ab", "bc"], 3).validate(&task).unwrap();
        assert_eq!(end, task.state(["b", "c"]).unwrap());
    }

    #[test]
    fn test_plan_validate_failures() {
        let task = make_task();
        assert!(matches!(Plan::new(["bc"], 2).validate(&task), Err(PlanError::Inapplicable { step: 0, .. })));
        assert!(matches!(Plan::new(["ab"], 1).validate(&task), Err(PlanError::GoalNotReached)));
        assert!(matches!(Plan::new(["ab", "bc"], 4).validate(&task), Err(PlanError::CostMismatch { reported: 4, actual: 3 })));
        assert!(matches!(Plan::new(["ab", "cd"], 3).validate(&task), Err(PlanError::UnknownOperator { step: 1, .. })));
    }

    #[test]
    fn test_plan_display() {
        assert_eq!(Plan::new(["op1", "op2"], 3).to_string(), "op1\nop2\nPlan cost: 3");
        assert_eq!(Plan::new([] as [&str; 0], 0).to_string(), "Plan cost: 0");
    }
}
