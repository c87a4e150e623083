//! High-level planner API for managing maintenance plans.
//!
//! This module provides the main [`Planner`] interface for interacting with
//! the Lathe preventive maintenance system. The planner acts as the central
//! coordinator between the application layers and the database, implementing
//! all business logic for plans, activities, services, executions, and
//! templates.
//!
//! # Architecture Overview
//!
//! The planner module is organized into several submodules that handle
//! different aspects of the maintenance planning system:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Handlers     │    │   Operations    │    │    Database     │
//! │ (plan_handlers, │───▶│ (plan_ops,      │───▶│   (via db/)     │
//! │  ...)           │    │  ...)           │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!     User Interface      Business Logic         Data Persistence
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for creating [`Planner`] instances with configuration
//! - [`plan_handlers`] and friends: High-level validated operations returning
//!   display-ready types
//! - [`plan_ops`] and friends: Lower-level database operations, one file per
//!   aggregate (plans, activities, services, executions, templates)
//!
//! ## Design Principles
//!
//! 1. **Async First**: All operations are async-compatible for better performance
//! 2. **Error Propagation**: Comprehensive error handling with context
//! 3. **Transaction Safety**: Database operations use proper transaction boundaries
//! 4. **Type Safety**: Strong typing for IDs, statuses, and parameters
//! 5. **Display Integration**: Results formatted via the display system
//!
//! # Usage Examples
//!
//! ## Creating a Planner
//!
//! ```rust
//! use lathe_core::{PlannerBuilder, params::CreatePlan};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create with default database path
//! let planner = PlannerBuilder::new()
//!     .build()
//!     .await?;
//!
//! // Or specify custom database path
//! let planner = PlannerBuilder::new()
//!     .with_database_path(Some("/custom/path/lathe.db"))
//!     .build()
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Plan Operations
//!
//! ```rust
//! use lathe_core::{PlannerBuilder, params::{CreatePlan, ListPlans}};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new().build().await?;
//!
//! // Create a new plan
//! let create_params = CreatePlan {
//!     code: "PREV-01".to_string(),
//!     name: "Monthly lubrication".to_string(),
//!     equipment: Some("Pump P-101".to_string()),
//!     frequency_days: 30,
//!     ..Default::default()
//! };
//! let plan = planner.create_plan_result(&create_params).await?;
//!
//! // List active plans
//! let active_plans = planner.list_plans_summary(&ListPlans::default()).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Building a Plan Tree
//!
//! ```rust
//! use lathe_core::{PlannerBuilder, params::{ActivityCreate, CreatePlan, ServiceCreate}};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new().build().await?;
//!
//! // Create plan first
//! let plan = planner.create_plan_result(&CreatePlan {
//!     code: "PREV-02".to_string(),
//!     name: "Weekly inspection".to_string(),
//!     frequency_days: 7,
//!     ..Default::default()
//! }).await?;
//!
//! // Add an activity, then a service under it
//! let activity = planner.add_activity_to_plan(&ActivityCreate {
//!     plan_id: plan.id,
//!     name: "Visual inspection".to_string(),
//!     responsible: Some("Operator".to_string()),
//! }).await?;
//!
//! let service = planner.add_service_to_activity(&ServiceCreate {
//!     activity_id: activity.id,
//!     description: "Check for leaks".to_string(),
//!     estimated_time_min: Some(5),
//! }).await?;
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

// Module declarations
pub mod builder;
pub mod plan_ops;
pub mod activity_ops;
pub mod service_ops;
pub mod execution_ops;
pub mod template_ops;
pub mod plan_handlers;
pub mod activity_handlers;
pub mod service_handlers;
pub mod execution_handlers;
pub mod template_handlers;

#[cfg(test)]
mod tests;

// Re-export the main types
pub use builder::PlannerBuilder;

/// Main planner interface for managing plans, executions, and templates.
pub struct Planner {
    pub(crate) db_path: PathBuf,
}

impl Planner {
    /// Creates a new planner with the specified database path.
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }
}
