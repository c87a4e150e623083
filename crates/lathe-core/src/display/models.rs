//! Display implementations for domain models.
//!
//! This module contains all Display trait implementations for the core domain
//! models, separated from the model definitions to maintain clean separation of
//! concerns.
//!
//! The Display implementations provide:
//! - Markdown-formatted output for rich terminal display
//! - Consistent formatting with status icons and structured sections
//! - Context-aware display behavior for different use cases

use std::fmt;

use super::datetime::LocalDateTime;
use crate::models::{
    Activity, Execution, ExecutionStatus, Plan, PlanStatus, PlanSummary, Service, Template,
    TemplateActivity,
};

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.name)?;
        writeln!(f)?;

        // Metadata section
        writeln!(f, "- Code: {}", self.code)?;
        writeln!(f, "- Status: {}", self.status.as_str())?;
        if let Some(equipment) = &self.equipment {
            writeln!(f, "- Equipment: {equipment}")?;
        }
        writeln!(f, "- Frequency: every {} days", self.frequency_days)?;
        if let Some(trigger) = &self.trigger_type {
            writeln!(f, "- Trigger: {trigger}")?;
        }
        if let Some(specialty) = &self.specialty {
            writeln!(f, "- Specialty: {specialty}")?;
        }
        writeln!(f, "- Estimated time: {} min", self.total_time_min())?;
        if let Some(next) = &self.next_execution {
            writeln!(f, "- Next execution: {}", LocalDateTime(next))?;
        }
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        // Instructions as a paragraph
        if let Some(instructions) = &self.instructions {
            writeln!(f)?;
            writeln!(f, "{instructions}")?;
        }

        if !self.activities.is_empty() {
            writeln!(f, "\n## Activities")?;
            writeln!(f)?;
            for activity in &self.activities {
                write!(f, "{}", activity)?;
            }
        } else {
            writeln!(f, "\nNo activities in this plan.")?;
        }

        Ok(())
    }
}

impl Activity {
    /// Format the activity using the compact nested display format.
    ///
    /// This uses the same format whether the activity is displayed standalone
    /// or within a plan context.
    fn fmt_activity(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {}. {} (order {})", self.id, self.name, self.order)?;
        writeln!(f)?;

        if let Some(responsible) = &self.responsible {
            writeln!(f, "- Responsible: {responsible}")?;
        }
        writeln!(f, "- Estimated time: {} min", self.total_time_min())?;
        writeln!(f)?;

        if !self.services.is_empty() {
            for service in &self.services {
                match service.estimated_time_min {
                    Some(min) => {
                        writeln!(f, "- {}. {} ({} min)", service.id, service.description, min)?
                    }
                    None => writeln!(f, "- {}. {}", service.id, service.description)?,
                }
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_activity(f)
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {}. {}", self.id, self.description)?;
        writeln!(f)?;

        writeln!(f, "- Activity ID: {}", self.activity_id)?;
        writeln!(f, "- Order: {}", self.order)?;
        match self.estimated_time_min {
            Some(min) => writeln!(f, "- Estimated time: {min} min")?,
            None => writeln!(f, "- Estimated time: not set")?,
        }
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        Ok(())
    }
}

impl Execution {
    /// Compact single-block format used when listing executions.
    pub(crate) fn fmt_summary(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Execution {} ({})", self.id, self.status.with_icon())?;
        writeln!(f)?;

        writeln!(f, "- **Plan ID**: {}", self.plan_id)?;
        writeln!(f, "- **Executor**: {}", self.executor)?;
        writeln!(f, "- **Date**: {}", LocalDateTime(&self.execution_date))?;
        writeln!(
            f,
            "- **Progress**: {}/{} items",
            self.completed_items(),
            self.checklist.len()
        )?;
        writeln!(f)?;

        Ok(())
    }
}

impl fmt::Display for Execution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Execution {}", self.id)?;
        writeln!(f)?;

        writeln!(f, "- Plan ID: {}", self.plan_id)?;
        writeln!(f, "- Executor: {}", self.executor)?;
        writeln!(f, "- Status: {}", self.status.with_icon())?;
        writeln!(f, "- Date: {}", LocalDateTime(&self.execution_date))?;
        writeln!(
            f,
            "- Progress: {}/{} items",
            self.completed_items(),
            self.checklist.len()
        )?;
        writeln!(f, "- Estimated time: {} min", self.estimated_time_min())?;
        if let Some(real) = self.real_time_min {
            writeln!(f, "- Real time: {real} min")?;
        }
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if let Some(observations) = &self.observations {
            writeln!(f)?;
            writeln!(f, "{observations}")?;
        }

        if !self.checklist.is_empty() {
            writeln!(f, "\n## Checklist")?;
            writeln!(f)?;
            for (position, item) in self.checklist.iter().enumerate() {
                let mark = if item.completed { "x" } else { " " };
                write!(
                    f,
                    "- [{mark}] {}. {}: {}",
                    position + 1,
                    item.activity_name,
                    item.service_description
                )?;
                match item.estimated_time_min {
                    Some(min) => writeln!(f, " ({min} min)")?,
                    None => writeln!(f)?,
                }
            }
        } else {
            writeln!(f, "\nThe checklist is empty.")?;
        }

        Ok(())
    }
}

impl Template {
    /// Compact single-block format used when listing templates.
    pub(crate) fn fmt_summary(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (ID: {})", self.name, self.id)?;
        writeln!(f)?;

        if let Some(description) = &self.description {
            writeln!(f, "- **Description**: {description}")?;
        }
        writeln!(
            f,
            "- **Structure**: {} activities, {} services, {} min",
            self.structure.len(),
            self.service_count(),
            self.total_time_min()
        )?;
        writeln!(f, "- **Created**: {}", LocalDateTime(&self.created_at))?;
        writeln!(f)?;

        Ok(())
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.name)?;
        writeln!(f)?;

        writeln!(f, "- Activities: {}", self.structure.len())?;
        writeln!(f, "- Services: {}", self.service_count())?;
        writeln!(f, "- Estimated time: {} min", self.total_time_min())?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;

        if let Some(description) = &self.description {
            writeln!(f)?;
            writeln!(f, "{description}")?;
        }

        if !self.structure.is_empty() {
            writeln!(f, "\n## Structure")?;
            writeln!(f)?;
            for activity in &self.structure {
                write!(f, "{}", activity)?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for TemplateActivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {}. {}", self.order, self.name)?;
        writeln!(f)?;

        if let Some(responsible) = &self.responsible {
            writeln!(f, "- Responsible: {responsible}")?;
            writeln!(f)?;
        }

        if !self.services.is_empty() {
            for service in &self.services {
                match service.estimated_time_min {
                    Some(min) => {
                        writeln!(f, "- {}. {} ({} min)", service.order, service.description, min)?
                    }
                    None => writeln!(f, "- {}. {}", service.order, service.description)?,
                }
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (ID: {})", self.name, self.id)?;
        writeln!(f)?;

        writeln!(f, "- **Code**: {}", self.code)?;
        if let Some(equipment) = &self.equipment {
            writeln!(f, "- **Equipment**: {equipment}")?;
        }
        writeln!(f, "- **Frequency**: every {} days", self.frequency_days)?;
        writeln!(
            f,
            "- **Structure**: {} activities, {} services, {} min",
            self.activity_count, self.service_count, self.total_time_min
        )?;
        if let Some(next) = &self.next_execution {
            writeln!(f, "- **Next execution**: {}", LocalDateTime(next))?;
        }
        if self.status == PlanStatus::Inactive {
            writeln!(f, "- **Status**: {}", self.status.as_str())?;
        }
        writeln!(f, "- **Created**: {}", LocalDateTime(&self.created_at))?;
        writeln!(f)?; // Add blank line after each plan

        Ok(())
    }
}
