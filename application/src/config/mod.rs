//! Application-level configuration.
//!
//! - [`ExecutionParams`]: turn loop control (tool round budget, request timeout)

pub mod execution_params;

pub use execution_params::ExecutionParams;
