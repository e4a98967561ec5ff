//! Testing infrastructure for apitree integration tests.
//!
//! - `TestWorld`: isolated working directory and environment for CLI runs
//! - `assertions`: checks over generated collections and printed layouts
//! - `fixtures`: tree datasets and config files

pub mod assertions;
pub mod fixtures;
pub mod world;

pub use world::{CliResult, TestWorld};
