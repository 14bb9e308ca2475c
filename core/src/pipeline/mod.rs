// querypipe/src/pipeline/mod.rs

//! Defines the `Query<'a, T, D>` struct, its validation and execution logic.

pub mod definition;
pub mod execution;
pub mod validation;

// Re-export the main Query struct
pub use definition::{run, run_projected, Query};
