//! Service model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Represents the smallest unit of preventive work within an activity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Service {
    /// Unique identifier for the service
    pub id: u64,

    /// ID of the parent activity
    pub activity_id: u64,

    /// What the service consists of
    pub description: String,

    /// Estimated duration in minutes; missing counts as zero in totals
    pub estimated_time_min: Option<u32>,

    /// Order of the service within the activity (1-indexed)
    pub order: u32,

    /// Timestamp when the service was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the service was last updated (UTC)
    pub updated_at: Timestamp,
}
