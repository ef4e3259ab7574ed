//! CLI module for the Planwright authoring tool.
//!
//! This module provides the command-line interface for editing,
//! validating, and rendering deployment plans.

mod commands;
mod output;

pub use commands::{
    Cli, Commands, EnvCommands, EnvFieldArg, OrderCommands, OutputFormat, ResourceCommands,
    RollbackCommands, SqlCommands, SqlFieldArg,
};
pub use output::OutputFormatter;
