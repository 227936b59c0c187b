//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod run_turn;
pub(crate) mod shared;
pub(crate) mod tool_helpers;
