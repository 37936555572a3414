//! Command-line interface for Hoard.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{CheckArgs, Cli, Commands, ConfigArgs, InfoArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
