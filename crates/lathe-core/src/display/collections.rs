//! Collection wrapper types for displaying groups of domain objects.
//!
//! This module provides wrapper types that format collections of domain objects
//! with consistent structure and empty collection handling.

use std::{fmt, ops::Index};

use crate::models::{Activity, Execution, PlanSummary, Template};

/// Newtype wrapper for displaying collections of plan summaries.
///
/// This provides clean Display formatting for plan collections without title
/// handling, allowing consumers to handle titles separately. Handles empty
/// collections gracefully.
///
/// # Examples
///
/// ```rust
/// use lathe_core::{
///     display::PlanSummaries,
///     models::{PlanStatus, PlanSummary},
/// };
/// use jiff::Timestamp;
///
/// let plan = PlanSummary {
///     id: 1,
///     code: "PREV-01".to_string(),
///     name: "Monthly lubrication".to_string(),
///     equipment: Some("Pump P-101".to_string()),
///     frequency_days: 30,
///     status: PlanStatus::Active,
///     next_execution: None,
///     created_at: Timestamp::now(),
///     updated_at: Timestamp::now(),
///     activity_count: 2,
///     service_count: 3,
///     total_time_min: 20,
/// };
/// let plans = vec![plan];
///
/// // Format a collection of plans
/// let summaries = PlanSummaries(plans);
/// let output = format!("{}", summaries);
/// assert!(output.contains("Monthly lubrication"));
/// ```
pub struct PlanSummaries(pub Vec<PlanSummary>);

impl PlanSummaries {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of plan summaries in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get a reference to the plan summary at the given index.
    pub fn get(&self, index: usize) -> Option<&PlanSummary> {
        self.0.get(index)
    }

    /// Get an iterator over the plan summaries.
    pub fn iter(&self) -> std::slice::Iter<'_, PlanSummary> {
        self.0.iter()
    }
}

impl Index<usize> for PlanSummaries {
    type Output = PlanSummary;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for PlanSummaries {
    type Item = PlanSummary;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PlanSummaries {
    type Item = &'a PlanSummary;
    type IntoIter = std::slice::Iter<'a, PlanSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for PlanSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No plans found.")
        } else {
            for plan in &self.0 {
                write!(f, "{}", plan)?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying collections of activities.
///
/// Formats each activity using the existing Activity Display trait and
/// handles empty collections gracefully.
///
/// # Examples
///
/// ```rust
/// use lathe_core::{display::Activities, models::Activity};
/// use jiff::Timestamp;
///
/// let activity = Activity {
///     id: 1,
///     plan_id: 42,
///     name: "Lubrication".to_string(),
///     responsible: None,
///     order: 1,
///     created_at: Timestamp::now(),
///     updated_at: Timestamp::now(),
///     services: vec![],
/// };
/// let activities = Activities(vec![activity]);
/// println!("{}", activities);
/// ```
pub struct Activities(pub Vec<Activity>);

impl Activities {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of activities in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get a reference to the activity at the given index.
    pub fn get(&self, index: usize) -> Option<&Activity> {
        self.0.get(index)
    }

    /// Get an iterator over the activities.
    pub fn iter(&self) -> std::slice::Iter<'_, Activity> {
        self.0.iter()
    }
}

impl Index<usize> for Activities {
    type Output = Activity;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for Activities {
    type Item = Activity;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Activities {
    type Item = &'a Activity;
    type IntoIter = std::slice::Iter<'a, Activity>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Activities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No activities found.")
        } else {
            for activity in &self.0 {
                write!(f, "{}", activity)?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying collections of executions.
///
/// Lists render a compact block per execution; the full checklist only
/// appears when a single execution is shown on its own.
pub struct Executions(pub Vec<Execution>);

impl Executions {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of executions in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get a reference to the execution at the given index.
    pub fn get(&self, index: usize) -> Option<&Execution> {
        self.0.get(index)
    }

    /// Get an iterator over the executions.
    pub fn iter(&self) -> std::slice::Iter<'_, Execution> {
        self.0.iter()
    }
}

impl Index<usize> for Executions {
    type Output = Execution;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for Executions {
    type Item = Execution;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Executions {
    type Item = &'a Execution;
    type IntoIter = std::slice::Iter<'a, Execution>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Executions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No executions found.")
        } else {
            for execution in &self.0 {
                execution.fmt_summary(f)?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying collections of templates.
///
/// Lists render a compact block per template; the full structure only
/// appears when a single template is shown on its own.
pub struct Templates(pub Vec<Template>);

impl Templates {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of templates in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get a reference to the template at the given index.
    pub fn get(&self, index: usize) -> Option<&Template> {
        self.0.get(index)
    }

    /// Get an iterator over the templates.
    pub fn iter(&self) -> std::slice::Iter<'_, Template> {
        self.0.iter()
    }
}

impl Index<usize> for Templates {
    type Output = Template;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for Templates {
    type Item = Template;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Templates {
    type Item = &'a Template;
    type IntoIter = std::slice::Iter<'a, Template>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Templates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No templates found.")
        } else {
            for template in &self.0 {
                template.fmt_summary(f)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::models::{ChecklistItem, ExecutionStatus, PlanStatus, Service};

    fn create_test_plan_summary() -> PlanSummary {
        PlanSummary {
            id: 1,
            code: "PREV-01".to_string(),
            name: "Monthly lubrication".to_string(),
            equipment: Some("Pump P-101".to_string()),
            frequency_days: 30,
            status: PlanStatus::Active,
            next_execution: None,
            created_at: Timestamp::from_second(1640995200).unwrap(), // 2022-01-01 00:00:00 UTC
            updated_at: Timestamp::from_second(1640995200).unwrap(),
            activity_count: 2,
            service_count: 3,
            total_time_min: 20,
        }
    }

    fn create_test_activity() -> Activity {
        Activity {
            id: 1,
            plan_id: 1,
            name: "Lubrication".to_string(),
            responsible: Some("Mechanic".to_string()),
            order: 1,
            created_at: Timestamp::from_second(1640995200).unwrap(),
            updated_at: Timestamp::from_second(1640995200).unwrap(),
            services: vec![Service {
                id: 1,
                activity_id: 1,
                description: "Check oil level".to_string(),
                estimated_time_min: Some(5),
                order: 1,
                created_at: Timestamp::from_second(1640995200).unwrap(),
                updated_at: Timestamp::from_second(1640995200).unwrap(),
            }],
        }
    }

    fn create_test_execution() -> Execution {
        Execution {
            id: 1,
            plan_id: 1,
            executor: "Alice".to_string(),
            execution_date: Timestamp::from_second(1640995200).unwrap(),
            status: ExecutionStatus::EmAndamento,
            checklist: vec![ChecklistItem {
                activity_name: "Lubrication".to_string(),
                service_description: "Check oil level".to_string(),
                estimated_time_min: Some(5),
                completed: false,
            }],
            observations: None,
            real_time_min: None,
            created_at: Timestamp::from_second(1640995200).unwrap(),
            updated_at: Timestamp::from_second(1640995200).unwrap(),
        }
    }

    #[test]
    fn test_plan_summaries_display() {
        // Test with plans
        let plans = vec![create_test_plan_summary()];
        let summaries = PlanSummaries(plans);
        let output = format!("{}", summaries);
        assert!(output.contains("Monthly lubrication"));
        assert!(output.contains("ID: 1"));
        assert!(output.contains("PREV-01"));

        // Test empty collection
        let empty_summaries = PlanSummaries(vec![]);
        let empty_output = format!("{}", empty_summaries);
        assert_eq!(empty_output, "No plans found.\n");

        // Test multiple plans
        let plan1 = create_test_plan_summary();
        let mut plan2 = create_test_plan_summary();
        plan2.id = 2;
        plan2.name = "Quarterly inspection".to_string();
        let plans = vec![plan1, plan2];
        let summaries = PlanSummaries(plans);
        let output = format!("{}", summaries);
        assert!(output.contains("Monthly lubrication"));
        assert!(output.contains("Quarterly inspection"));
        assert!(output.contains("ID: 1"));
        assert!(output.contains("ID: 2"));

        // Verify the output uses PlanSummary's own Display format (which
        // includes ##) but doesn't add additional title formatting
        assert!(output.contains("## Monthly lubrication"));
        assert!(output.contains("## Quarterly inspection"));
        // Verify it doesn't start with a title header
        assert!(!output.starts_with("# "));
    }

    #[test]
    fn test_plan_summaries_shows_inactive_status() {
        let mut plan = create_test_plan_summary();
        plan.status = PlanStatus::Inactive;
        let output = format!("{}", PlanSummaries(vec![plan]));
        assert!(output.contains("**Status**: inactive"));

        let active_output = format!("{}", PlanSummaries(vec![create_test_plan_summary()]));
        assert!(!active_output.contains("**Status**"));
    }

    #[test]
    fn test_activities_display_empty() {
        let activities = Activities(vec![]);
        let output = format!("{}", activities);
        assert_eq!(output, "No activities found.\n");
    }

    #[test]
    fn test_activities_display_single() {
        let activities = Activities(vec![create_test_activity()]);
        let output = format!("{}", activities);

        assert!(output.contains("### 1. Lubrication (order 1)"));
        assert!(output.contains("Responsible: Mechanic"));
        assert!(output.contains("Check oil level (5 min)"));
    }

    #[test]
    fn test_executions_display_compact() {
        let executions = Executions(vec![create_test_execution()]);
        let output = format!("{}", executions);

        assert!(output.contains("## Execution 1"));
        assert!(output.contains("➤ Em andamento"));
        assert!(output.contains("**Progress**: 0/1 items"));
        // The compact list form leaves the checklist out
        assert!(!output.contains("Check oil level"));
    }

    #[test]
    fn test_executions_display_empty() {
        let output = format!("{}", Executions(vec![]));
        assert_eq!(output, "No executions found.\n");
    }

    #[test]
    fn test_templates_display_empty() {
        let output = format!("{}", Templates(vec![]));
        assert_eq!(output, "No templates found.\n");
    }
}
