//! Plan model definition and related functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Activity, PlanStatus};

/// Represents a preventive maintenance plan with metadata and its ordered
/// activity tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    /// Unique identifier for the plan
    pub id: u64,

    /// Business key of the plan (immutable after creation)
    pub code: String,

    /// Name of the plan
    pub name: String,

    /// Tag of the equipment this plan maintains
    pub equipment: Option<String>,

    /// Interval in days between executions (always positive)
    pub frequency_days: u32,

    /// What triggers the plan (e.g. calendar time, usage counter)
    pub trigger_type: Option<String>,

    /// Maintenance specialty responsible for the plan
    pub specialty: Option<String>,

    /// Free-form execution instructions
    pub instructions: Option<String>,

    /// Status of the plan (active or inactive)
    #[serde(default)]
    pub status: PlanStatus,

    /// Next scheduled execution, maintained by the surrounding system
    pub next_execution: Option<Timestamp>,

    /// Timestamp when the plan was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the plan was last modified (UTC)
    pub updated_at: Timestamp,

    /// Associated activities in order
    #[serde(default)]
    pub activities: Vec<Activity>,
}

impl Plan {
    /// Total estimated time of the plan in minutes.
    ///
    /// Always recomputed from the activity tree; there is no stored copy of
    /// this value anywhere.
    pub fn total_time_min(&self) -> u32 {
        self.activities.iter().map(Activity::total_time_min).sum()
    }
}
