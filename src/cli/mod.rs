//! CLI module
//!
//! Command-line interface for paging through service listings.
//!
//! # Commands
//!
//! - `collections` - List the collections a service exposes
//! - `validate` - Check a service definition
//! - `list` - Print the resources or pages of a collection as JSON lines

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
