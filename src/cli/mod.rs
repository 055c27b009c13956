//! CLI module for stokemeet
//!
//! Contains argument parsing and command implementations.

pub mod args;
pub mod commands;
pub mod completions;

pub use args::{AuthCommand, CacheCommand, Cli, Commands, ConfigCommand, ProfilesCommand};
