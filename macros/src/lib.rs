//  LIB.rs
//    by Lut99
//
//  Created:
//    18 Mar 2024, 13:25:32
//  Last edited:
//    15 Oct 2026, 11:02:17
//  Auto updated?
//    Yes
//
//  Description:
//!   Implements the `task!{}`-macro for the `strips`-crate.
//

// Modules
mod task;

// Imports
use proc_macro::TokenStream;
use syn::parse::Parser as _;


/***** LIBRARY *****/
/// Defines a STRIPS task in a compact syntax, building it with a `TaskBuilder`.
///
/// The macro starts with optional `facts { .. }` (fixing the universe), `init { .. }` and
/// `goal { .. }` sections, followed by operators of the form
/// `name: pre { .. } add { .. } del { .. } cost N;`. Every clause of an operator is optional; the
/// cost defaults to 1. Names may be identifiers or string literals.
///
/// The result is the `Result<Task, Error>` that `TaskBuilder::build()` returns. Use `#![crate]`
/// as the first line to refer to the crate from within `strips` itself.
///
/// # Example
/// ```ignore
/// let task = task! {
///     init { home }
///     goal { work }
///     drive: pre { home } add { work } del { home } cost 3;
///     "take-bus": pre { home } add { work } del { home } cost 5;
/// }
/// .unwrap();
/// ```
#[proc_macro]
pub fn task(input: TokenStream) -> TokenStream {
    match task::task.parse2(input.into()) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}
