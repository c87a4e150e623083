use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{
    ActivityCommands, ExecutionCommands, PlanCommands, ServiceCommands, TemplateCommands,
};

/// Main command-line interface for the Lathe maintenance planning tool
///
/// Lathe is a preventive maintenance planning system that organizes recurring
/// maintenance work into structured plans. Each plan holds an ordered list of
/// activities, each activity an ordered list of services, and executions
/// capture a frozen checklist of that structure for a single maintenance
/// round. It provides a command-line interface for building and running plans
/// with support for both local CLI operations and MCP (Model Context
/// Protocol) server mode for integration with AI assistants.
#[derive(Parser)]
#[command(version, about, name = "lt")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/lathe/lathe.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Lathe CLI
///
/// The CLI is organized into six main command categories:
/// - `plan`: Operations for managing maintenance plans (create, list,
///   deactivate, etc.)
/// - `activity`: Operations for the ordered activities within a plan
/// - `service`: Operations for the ordered services within an activity
/// - `execution`: Operations for running a plan's checklist
/// - `template`: Operations for capturing and applying plan structures
/// - `serve`: Start the MCP server for AI assistant integration
#[derive(Subcommand)]
pub enum Commands {
    /// Manage maintenance plans
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Manage activities within plans
    #[command(alias = "a")]
    Activity {
        #[command(subcommand)]
        command: ActivityCommands,
    },
    /// Manage services within activities
    #[command(alias = "s")]
    Service {
        #[command(subcommand)]
        command: ServiceCommands,
    },
    /// Manage plan executions and their checklists
    #[command(alias = "e")]
    Execution {
        #[command(subcommand)]
        command: ExecutionCommands,
    },
    /// Manage reusable plan templates
    #[command(alias = "t")]
    Template {
        #[command(subcommand)]
        command: TemplateCommands,
    },
    /// Start the MCP server
    Serve,
}
