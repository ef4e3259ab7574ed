//! CLI command definitions.
//!
//! This module defines all CLI commands and their arguments using clap.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::plan::{EnvField, Environment, ResourceKind, SqlField};
use crate::store::DEFAULT_PLAN_FILE;

/// Planwright - Deployment plan authoring tool.
#[derive(Parser, Debug)]
#[command(name = "planwright")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the plan file.
    #[arg(
        short,
        long,
        global = true,
        env = "PLANWRIGHT_PLAN",
        default_value = DEFAULT_PLAN_FILE
    )]
    pub plan: PathBuf,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a fresh plan file.
    Init {
        /// Force overwrite an existing plan file.
        #[arg(short, long)]
        force: bool,
    },

    /// Show the current plan.
    Show,

    /// Update plan metadata.
    Set {
        /// Project name.
        #[arg(long)]
        project_name: Option<String>,

        /// Target environment (dev, staging, production).
        #[arg(long)]
        environment: Option<Environment>,

        /// Estimated deployment duration in minutes.
        #[arg(long)]
        estimated_time: Option<u32>,

        /// Scheduled deployment date (YYYY-MM-DD).
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Deployment manager.
        #[arg(long)]
        manager: Option<String>,

        /// Number of resources to provision (1-10).
        #[arg(long)]
        resource_count: Option<u32>,
    },

    /// Manage plan resources.
    Resource {
        /// Resource subcommand.
        #[command(subcommand)]
        command: ResourceCommands,
    },

    /// Manage the deployment order.
    Order {
        /// Order subcommand.
        #[command(subcommand)]
        command: OrderCommands,
    },

    /// Manage environment variables on a resource.
    Env {
        /// Environment variable subcommand.
        #[command(subcommand)]
        command: EnvCommands,
    },

    /// Manage SQL scripts on a resource.
    Sql {
        /// SQL script subcommand.
        #[command(subcommand)]
        command: SqlCommands,
    },

    /// Manage the rollback plan of a resource.
    Rollback {
        /// Rollback subcommand.
        #[command(subcommand)]
        command: RollbackCommands,
    },

    /// Validate the plan for submission.
    Validate {
        /// Show warnings, not just errors.
        #[arg(short, long)]
        warnings: bool,
    },

    /// Render the plan as a deployment document.
    Render {
        /// Write the document to a file instead of the terminal.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Export the plan to a portable JSON document.
    Export {
        /// Destination file.
        path: PathBuf,
    },

    /// Import a plan from a portable JSON document.
    Import {
        /// Source file.
        path: PathBuf,
    },
}

/// Resource management subcommands.
#[derive(Subcommand, Debug)]
pub enum ResourceCommands {
    /// List the plan's resources.
    List,

    /// Rename or retype one resource.
    Set {
        /// Resource id.
        id: u32,

        /// New resource name.
        #[arg(long)]
        name: Option<String>,

        /// New resource type (api, db, message-queue, function, other).
        #[arg(long = "type")]
        kind: Option<ResourceKind>,
    },
}

/// Deployment order subcommands.
#[derive(Subcommand, Debug)]
pub enum OrderCommands {
    /// Show the deployment order.
    Show,

    /// Move an order entry to a new position (zero-based).
    Move {
        /// Current position of the entry.
        from: usize,

        /// Position the entry should end up at.
        to: usize,
    },
}

/// Environment variable subcommands.
#[derive(Subcommand, Debug)]
pub enum EnvCommands {
    /// Add an environment variable.
    Add {
        /// Resource id.
        id: u32,

        /// Variable name.
        key: String,

        /// Variable value.
        value: String,
    },

    /// Remove the environment variable at an index (zero-based).
    Remove {
        /// Resource id.
        id: u32,

        /// Entry index.
        index: usize,
    },

    /// Overwrite one field of an environment variable.
    Set {
        /// Resource id.
        id: u32,

        /// Entry index (zero-based).
        index: usize,

        /// Field to overwrite.
        #[arg(long, value_enum)]
        field: EnvFieldArg,

        /// New field value.
        value: String,
    },
}

/// SQL script subcommands.
#[derive(Subcommand, Debug)]
pub enum SqlCommands {
    /// Add a SQL script.
    Add {
        /// Resource id.
        id: u32,

        /// SQL text to run.
        query: String,

        /// What the script is for.
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// Remove the SQL script at an index (zero-based).
    Remove {
        /// Resource id.
        id: u32,

        /// Entry index.
        index: usize,
    },

    /// Overwrite one field of a SQL script.
    Set {
        /// Resource id.
        id: u32,

        /// Entry index (zero-based).
        index: usize,

        /// Field to overwrite.
        #[arg(long, value_enum)]
        field: SqlFieldArg,

        /// New field value.
        value: String,
    },
}

/// Rollback plan subcommands.
#[derive(Subcommand, Debug)]
pub enum RollbackCommands {
    /// Set the rollback point and procedure of a resource.
    Set {
        /// Resource id.
        id: u32,

        /// Version or snapshot to roll back to.
        #[arg(long)]
        point: Option<String>,

        /// Steps to execute when rolling back.
        #[arg(long)]
        procedure: Option<String>,
    },
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// Environment variable field selector for the CLI.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum EnvFieldArg {
    /// The variable name.
    Key,
    /// The variable value.
    Value,
}

/// SQL script field selector for the CLI.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SqlFieldArg {
    /// The SQL text.
    Query,
    /// What the script is for.
    Description,
}

impl From<EnvFieldArg> for EnvField {
    fn from(arg: EnvFieldArg) -> Self {
        match arg {
            EnvFieldArg::Key => Self::Key,
            EnvFieldArg::Value => Self::Value,
        }
    }
}

impl From<SqlFieldArg> for SqlField {
    fn from(arg: SqlFieldArg) -> Self {
        match arg {
            SqlFieldArg::Query => Self::Query,
            SqlFieldArg::Description => Self::Description,
        }
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
