//! Template model definition and capture conversions.
//!
//! A template is a disconnected value snapshot of a plan's activity/service
//! tree: no ids, no foreign keys, never mutated after capture. Applying a
//! template recreates live rows from it; the two never share identity.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Activity, Service};

/// One service entry inside a template's structure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TemplateService {
    /// Description copied from the source service
    pub description: String,

    /// Estimated duration copied from the source service
    pub estimated_time_min: Option<u32>,

    /// Order copied verbatim from the source service
    pub order: u32,
}

/// One activity entry inside a template's structure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TemplateActivity {
    /// Name copied from the source activity
    pub name: String,

    /// Responsible party copied from the source activity
    pub responsible: Option<String>,

    /// Order copied verbatim from the source activity
    pub order: u32,

    /// Nested service entries in order
    #[serde(default)]
    pub services: Vec<TemplateService>,
}

/// Represents a reusable snapshot of a plan's structure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Template {
    /// Unique identifier for the template
    pub id: u64,

    /// Name of the template
    pub name: String,

    /// Optional description of what the template is for
    pub description: Option<String>,

    /// Captured activity/service structure, immutable once saved
    pub structure: Vec<TemplateActivity>,

    /// Timestamp when the template was captured (UTC)
    pub created_at: Timestamp,
}

impl From<&Service> for TemplateService {
    fn from(service: &Service) -> Self {
        Self {
            description: service.description.clone(),
            estimated_time_min: service.estimated_time_min,
            order: service.order,
        }
    }
}

impl From<&Activity> for TemplateActivity {
    fn from(activity: &Activity) -> Self {
        Self {
            name: activity.name.clone(),
            responsible: activity.responsible.clone(),
            order: activity.order,
            services: activity.services.iter().map(TemplateService::from).collect(),
        }
    }
}

impl TemplateActivity {
    /// Total estimated time of the entry in minutes.
    pub fn total_time_min(&self) -> u32 {
        self.services
            .iter()
            .map(|service| service.estimated_time_min.unwrap_or(0))
            .sum()
    }
}

impl Template {
    /// Total estimated time frozen into the template, in minutes.
    pub fn total_time_min(&self) -> u32 {
        self.structure
            .iter()
            .map(TemplateActivity::total_time_min)
            .sum()
    }

    /// Number of service entries across the whole structure.
    pub fn service_count(&self) -> u32 {
        self.structure
            .iter()
            .map(|activity| activity.services.len() as u32)
            .sum()
    }
}
