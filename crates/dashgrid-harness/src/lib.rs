#![forbid(unsafe_code)]

//! `dashgrid-replay`: replays a recorded gesture trace against a canvas
//! snapshot, checks layout invariants and prints the resulting layout.

pub mod cli;
pub mod error;
pub mod logging;

pub use cli::{Cli, run, run_from_env};
pub use error::{HarnessError, Result};
