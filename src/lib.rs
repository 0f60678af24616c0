//  LIB.rs
//    by Lut99
//
//  Created:
//    13 Mar 2024, 16:43:01
//  Last edited:
//    14 Oct 2026, 11:02:37
//  Auto updated?
//    Yes
//
//  Description:
//!   An optimal planner for STRIPS tasks.
//!
//!   Tasks are built once through a [`TaskBuilder`](task::TaskBuilder) (or the [`task!`]-macro
//!   if the `macros`-feature is enabled), and then solved with [`search()`](search::search) using
//!   one of the admissible [`heuristics`].
//

// Declare modules
pub mod heuristics;
mod log;
pub mod search;
pub mod task;
#[cfg(test)]
mod tests;

// Re-export the macro
#[cfg(feature = "macros")]
pub use strips_macros::task;
