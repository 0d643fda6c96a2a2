//! CLI command implementations.

pub mod emit;
pub mod run;
pub mod sanitize;
