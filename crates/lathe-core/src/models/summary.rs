//! Plan summary types and functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Plan, PlanStatus};

/// Summary information about a plan with tree statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSummary {
    /// Plan ID
    pub id: u64,
    /// Business key of the plan
    pub code: String,
    /// Name of the plan
    pub name: String,
    /// Tag of the equipment this plan maintains
    pub equipment: Option<String>,
    /// Interval in days between executions
    pub frequency_days: u32,
    /// Plan status
    pub status: PlanStatus,
    /// Next scheduled execution
    pub next_execution: Option<Timestamp>,
    /// Creation timestamp
    pub created_at: Timestamp,
    /// Last update timestamp
    pub updated_at: Timestamp,
    /// Number of activities in the plan
    pub activity_count: u32,
    /// Number of services across all activities
    pub service_count: u32,
    /// Total estimated time in minutes, recomputed at read time
    pub total_time_min: u32,
}

impl From<&Plan> for PlanSummary {
    fn from(plan: &Plan) -> Self {
        let activity_count = plan.activities.len() as u32;
        let service_count = plan
            .activities
            .iter()
            .map(|activity| activity.services.len() as u32)
            .sum();

        Self {
            id: plan.id,
            code: plan.code.clone(),
            name: plan.name.clone(),
            equipment: plan.equipment.clone(),
            frequency_days: plan.frequency_days,
            status: plan.status,
            next_execution: plan.next_execution,
            created_at: plan.created_at,
            updated_at: plan.updated_at,
            activity_count,
            service_count,
            total_time_min: plan.total_time_min(),
        }
    }
}
