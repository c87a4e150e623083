//! Lathe CLI Application
//!
//! Command-line interface for the lathe preventive maintenance planning
//! tool. Parses arguments, builds the planner, and dispatches to the
//! command runner or the MCP server.

mod args;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use lathe_core::{params::ListPlans, PlannerBuilder};
use log::info;
use mcp::{run_stdio_server, LatheMcpServer};
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args { database_file, no_color, command } = Args::parse();

    let planner = PlannerBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize planner")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Lathe started");

    match command {
        Some(Plan { command }) => {
            Cli::new(planner, renderer)
                .handle_plan_command(command)
                .await
        }
        Some(Activity { command }) => {
            Cli::new(planner, renderer)
                .handle_activity_command(command)
                .await
        }
        Some(Service { command }) => {
            Cli::new(planner, renderer)
                .handle_service_command(command)
                .await
        }
        Some(Execution { command }) => {
            Cli::new(planner, renderer)
                .handle_execution_command(command)
                .await
        }
        Some(Template { command }) => {
            Cli::new(planner, renderer)
                .handle_template_command(command)
                .await
        }
        Some(Serve) => {
            info!("Starting Lathe MCP server");
            run_stdio_server(LatheMcpServer::new(planner))
                .await
                .context("MCP server failed")
        }
        None => {
            Cli::new(planner, renderer)
                .list_plans(&ListPlans::default())
                .await
        }
    }
}
