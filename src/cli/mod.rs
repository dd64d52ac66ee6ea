//! CLI module
//!
//! Command-line interface for the splitter job.
//!
//! # Commands
//!
//! - `run` - Repartition every outstanding unit (default)
//! - `plan` - List and diff only, write nothing

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
