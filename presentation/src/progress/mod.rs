//! Progress reporting for running turns

pub mod reporter;
