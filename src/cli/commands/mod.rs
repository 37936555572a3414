//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Commands that need a resolved
//! environment share the sequence in [`startup`].

pub mod check;
pub mod config;
pub mod dispatcher;
pub mod info;
pub mod startup;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
