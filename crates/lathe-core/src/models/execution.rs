//! Execution model definition and the checklist snapshot it carries.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::ExecutionStatus;

/// One entry of an execution's checklist.
///
/// Carries a structural copy of a service at the moment the execution was
/// started. Only `completed` ever changes afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChecklistItem {
    /// Name of the activity the service belonged to
    pub activity_name: String,

    /// Description copied from the service
    pub service_description: String,

    /// Estimated duration copied from the service
    pub estimated_time_min: Option<u32>,

    /// Whether the item has been checked off
    pub completed: bool,
}

/// Represents one concrete run of a plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Execution {
    /// Unique identifier for the execution
    pub id: u64,

    /// ID of the plan that was executed
    pub plan_id: u64,

    /// Who carried the execution out
    pub executor: String,

    /// When the execution took place
    pub execution_date: Timestamp,

    /// Current lifecycle status
    pub status: ExecutionStatus,

    /// Structural snapshot of the plan tree at start time.
    ///
    /// Never regenerated; later edits to the plan do not reach it.
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,

    /// Free-form notes recorded by the executor
    pub observations: Option<String>,

    /// Actual duration in minutes, recorded at finish time
    pub real_time_min: Option<u32>,

    /// Timestamp when the execution record was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the execution record was last updated (UTC)
    pub updated_at: Timestamp,
}

impl Execution {
    /// Number of checked-off checklist items.
    pub fn completed_items(&self) -> u32 {
        self.checklist.iter().filter(|item| item.completed).count() as u32
    }

    /// Sum of the estimated minutes frozen into the checklist.
    pub fn estimated_time_min(&self) -> u32 {
        self.checklist
            .iter()
            .map(|item| item.estimated_time_min.unwrap_or(0))
            .sum()
    }
}
