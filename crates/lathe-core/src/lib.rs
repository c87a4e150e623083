//! Core library for the Lathe preventive maintenance planner.
//!
//! This crate provides the core business logic for managing preventive
//! maintenance plans, their activity/service tree, execution records with
//! frozen checklists, and reusable structure templates, including database
//! operations, data models, and error handling.
//!
//! # Display Architecture
//!
//! The crate implements a Display-based architecture for formatting output:
//!
//! - **Domain Models** ([`models`]): Implement [`std::fmt::Display`] for direct
//!   formatting
//! - **Display Wrappers** ([`display`]): Provide contextual and specialized
//!   formatting
//! - **Terminal Rendering**: Rich markdown output via the CLI's terminal
//!   renderer
//!
//! This separation allows the same data to be formatted differently depending
//! on context (lists vs. individual items, creation results vs. updates, etc.)
//! while maintaining consistency across all output.
//!
//! # Quick Start
//!
//! ```rust
//! use lathe_core::{PlannerBuilder, params::CreatePlan};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create a planner instance
//! let planner = PlannerBuilder::new()
//!     .with_database_path(Some("test.db"))
//!     .build()
//!     .await?;
//!
//! // Create a new plan using planner methods
//! let create_params = CreatePlan {
//!     code: "PM-001".to_string(),
//!     name: "Monthly lathe inspection".to_string(),
//!     equipment: Some("LATHE-7".to_string()),
//!     frequency_days: 30,
//!     ..Default::default()
//! };
//!
//! let plan = planner.create_plan(&create_params).await?;
//! println!("Created plan: {}", plan);
//!
//! // List plans as summaries
//! use lathe_core::params::ListPlans;
//! let plans = planner.list_plans_summary(&ListPlans::default()).await?;
//! for plan in &plans {
//!     println!("Plan: {}", plan.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod checklist;
pub mod db;
pub mod display;
pub mod error;
pub mod models;
pub mod params;
pub mod planner;

// Re-export commonly used types
pub use db::Database;
pub use display::{
    Activities, CreateResult, DeleteResult, Executions, LocalDateTime, OperationStatus,
    PlanSummaries, Templates, UpdateResult,
};
pub use error::{PlannerError, Result};
pub use models::{
    Activity, ChecklistItem, Execution, ExecutionFilter, ExecutionStatus, Plan, PlanFilter,
    PlanStatus, PlanSummary, Service, Template,
};
pub use params::{
    ActivityCreate, ApplyTemplate, CancelExecution, CaptureTemplate, CreatePlan, DeletePlan,
    FinishExecution, Id, ListExecutions, ListPlans, MoveActivity, MoveDirection, MoveService,
    ServiceCreate, SetChecklistItem, StartExecution, UpdateActivity, UpdatePlan, UpdateService,
};
pub use planner::{Planner, PlannerBuilder};
