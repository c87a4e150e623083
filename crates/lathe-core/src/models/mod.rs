//! Data models for the preventive maintenance domain.
//!
//! This module contains the core domain models of the Lathe maintenance
//! planner: plans, their ordered activity/service tree, execution records
//! with frozen checklists, and disconnected template snapshots. Display
//! implementations for these models are located in
//! [`crate::display::models`] to maintain clean separation of concerns
//! between data structures and presentation logic.
//!
//! # Derived values
//!
//! `total_time_min` is never stored and never writable. [`Activity`] and
//! [`Plan`] expose it as a method that recomputes the sum from the current
//! tree on every call, treating a missing service estimate as zero.
//!
//! # Snapshots
//!
//! Two model families are value snapshots rather than live entities:
//!
//! - [`ChecklistItem`] rows inside an [`Execution`], frozen when the
//!   execution starts;
//! - [`TemplateActivity`]/[`TemplateService`] inside a [`Template`], frozen
//!   when the template is captured.
//!
//! Neither carries ids or foreign keys into the live tree, and neither is
//! affected by later plan edits.

pub mod activity;
pub mod execution;
pub mod filters;
pub mod plan;
pub mod service;
pub mod status;
pub mod summary;
pub mod template;


// Re-export all public types at the models level
pub use activity::Activity;
pub use execution::{ChecklistItem, Execution};
pub use filters::{ExecutionFilter, PlanFilter};
pub use plan::Plan;
pub use service::Service;
pub use status::{ExecutionStatus, PlanStatus};
pub use summary::PlanSummary;
pub use template::{Template, TemplateActivity, TemplateService};
