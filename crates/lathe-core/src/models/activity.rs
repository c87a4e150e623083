//! Activity model definition and related functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::Service;

/// Represents a named group of services within a plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Activity {
    /// Unique identifier for the activity
    pub id: u64,

    /// ID of the parent plan
    pub plan_id: u64,

    /// Name of the activity
    pub name: String,

    /// Party responsible for carrying the activity out
    pub responsible: Option<String>,

    /// Order of the activity within the plan (1-indexed)
    pub order: u32,

    /// Timestamp when the activity was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the activity was last updated (UTC)
    pub updated_at: Timestamp,

    /// Associated services in order
    #[serde(default)]
    pub services: Vec<Service>,
}

impl Activity {
    /// Total estimated time of the activity in minutes.
    ///
    /// Recomputed from the current service list on every call; a missing
    /// estimate counts as zero.
    pub fn total_time_min(&self) -> u32 {
        self.services
            .iter()
            .map(|service| service.estimated_time_min.unwrap_or(0))
            .sum()
    }
}
