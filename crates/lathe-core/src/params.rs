//! Parameter structures for Lathe operations
//!
//! This module contains shared parameter structures that can be used across
//! different interfaces (CLI, MCP, etc.) without framework-specific derives or
//! dependencies. These structures provide a clean interface for passing data
//! between different layers of the application.
//!
//! ## Architecture: Parameter Wrapper Pattern
//!
//! This module implements a parameter wrapper pattern that enables clean
//! separation of concerns between the core domain logic and interface-specific
//! frameworks:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │   MCP Params    │    │  Core Params    │
//! │  (clap derives) │───▶│ (serde derives) │───▶│ (minimal deps)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ### Benefits
//!
//! 1. **Separation of Concerns**: Core parameter structures remain independent
//!    of UI framework dependencies (clap, schemars).
//!
//! 2. **Interface Flexibility**: Each interface (CLI, MCP, future REST API) can
//!    add its own framework-specific derives without polluting core logic.
//!
//! 3. **Conditional Compilation**: Features like JSON schema generation can be
//!    enabled only where needed, keeping core lightweight.
//!
//! 4. **Type Safety**: Wrapper pattern ensures compile-time verification of
//!    parameter conversion between layers.
//!
//! ### Usage Pattern
//!
//! Interface layers create wrapper structs that:
//! - Add framework-specific derives (clap::Args, schemars::JsonSchema, etc.)
//! - Use transparent serialization (`#[serde(transparent)]`)
//! - Convert to core parameters via `.into()` or accessor methods
//!
//! ```ignore
//! // In CLI module
//! #[derive(Args)]
//! pub struct CreatePlanArgs {
//!     pub code: String,
//!     pub name: String,
//!     // ... clap-specific attributes
//! }
//!
//! impl From<CreatePlanArgs> for CreatePlan {
//!     fn from(args: CreatePlanArgs) -> Self {
//!         CreatePlan {
//!             code: args.code,
//!             name: args.name,
//!             ..Default::default()
//!         }
//!     }
//! }
//!
//! // In MCP module
//! #[derive(Deserialize, JsonSchema)]
//! #[serde(transparent)]
//! struct CreatePlanRequest(lathe_core::params::CreatePlan);
//! ```
//!
//! Validation that must happen before any persistence call (empty names,
//! non-positive frequencies, malformed statuses) lives on the core parameter
//! types as `validate()` methods so every interface shares it.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::ExecutionFilter;
use crate::{PlannerError, Result};

/// Generic parameters for operations requiring just an ID.
///
/// Used for operations like show_plan, deactivate_plan, reactivate_plan,
/// show_execution, delete_template.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Direction of a sibling reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    /// Swap with the sibling whose order is immediately lower
    Up,
    /// Swap with the sibling whose order is immediately higher
    Down,
}

/// Parameters for creating a new plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreatePlan {
    /// Business key of the plan (required, immutable after creation)
    pub code: String,
    /// Name of the plan (required)
    pub name: String,
    /// Optional tag of the maintained equipment
    pub equipment: Option<String>,
    /// Interval in days between executions (must be positive)
    pub frequency_days: u32,
    /// Optional trigger of the plan (e.g. calendar time, usage counter)
    pub trigger_type: Option<String>,
    /// Optional maintenance specialty
    pub specialty: Option<String>,
    /// Optional free-form execution instructions
    pub instructions: Option<String>,
}

impl CreatePlan {
    /// Validate the parameters before any persistence call.
    ///
    /// # Errors
    ///
    /// * `PlannerError::InvalidInput` - When code or name is empty, or when
    ///   `frequency_days` is zero
    pub fn validate(&self) -> Result<()> {
        if self.code.trim().is_empty() {
            return Err(PlannerError::invalid_input("code").with_reason("Code must not be empty"));
        }
        if self.name.trim().is_empty() {
            return Err(PlannerError::invalid_input("name").with_reason("Name must not be empty"));
        }
        if self.frequency_days == 0 {
            return Err(PlannerError::invalid_input("frequency_days")
                .with_reason("Frequency must be a positive number of days"));
        }
        Ok(())
    }
}

/// Parameters for updating an existing plan.
///
/// Allows partial updates to plan properties. The business code is immutable
/// and deliberately absent here; status changes go through the dedicated
/// deactivate/reactivate operations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdatePlan {
    /// Plan ID to update (required)
    pub id: u64,
    /// Updated name of the plan
    pub name: Option<String>,
    /// Updated equipment tag
    pub equipment: Option<String>,
    /// Updated execution interval in days (must be positive)
    pub frequency_days: Option<u32>,
    /// Updated trigger of the plan
    pub trigger_type: Option<String>,
    /// Updated maintenance specialty
    pub specialty: Option<String>,
    /// Updated execution instructions
    pub instructions: Option<String>,
    /// Updated next scheduled execution (RFC 3339 timestamp)
    #[cfg_attr(feature = "schema", schemars(with = "Option<String>"))]
    pub next_execution: Option<jiff::Timestamp>,
}

impl UpdatePlan {
    /// Validate the parameters before any persistence call.
    ///
    /// # Errors
    ///
    /// * `PlannerError::InvalidInput` - When the new name is empty or the new
    ///   `frequency_days` is zero
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(
                    PlannerError::invalid_input("name").with_reason("Name must not be empty")
                );
            }
        }
        if self.frequency_days == Some(0) {
            return Err(PlannerError::invalid_input("frequency_days")
                .with_reason("Frequency must be a positive number of days"));
        }
        Ok(())
    }
}

/// Parameters for listing plans.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListPlans {
    /// Whether to show inactive plans instead of active ones
    #[serde(default)]
    pub inactive: bool,
    /// Only plans whose name contains this text (case-insensitive)
    pub name_contains: Option<String>,
    /// Only plans for this equipment tag
    pub equipment: Option<String>,
}

/// Parameters for permanently deleting a plan.
///
/// Deletion cascades to activities, services, and executions, so the caller
/// has to confirm explicitly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct DeletePlan {
    /// Plan ID to delete (required)
    pub id: u64,
    /// Confirmation flag to prevent accidental deletion (must be true)
    pub confirmed: bool,
}

/// Base parameters for activity creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ActivityCreate {
    /// ID of the plan to add the activity to
    pub plan_id: u64,
    /// Name of the activity (required)
    pub name: String,
    /// Optional responsible party
    pub responsible: Option<String>,
}

impl ActivityCreate {
    /// Validate the parameters before any persistence call.
    ///
    /// # Errors
    ///
    /// * `PlannerError::InvalidInput` - When the name is empty
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(PlannerError::invalid_input("name").with_reason("Name must not be empty"));
        }
        Ok(())
    }
}

/// Parameters for updating an existing activity.
///
/// The order field is deliberately absent; ordering changes go through the
/// move operation only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateActivity {
    /// Activity ID to update (required)
    pub id: u64,
    /// Updated name of the activity
    pub name: Option<String>,
    /// Updated responsible party
    pub responsible: Option<String>,
}

impl UpdateActivity {
    /// Validate the parameters before any persistence call.
    ///
    /// # Errors
    ///
    /// * `PlannerError::InvalidInput` - When the new name is empty
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(
                    PlannerError::invalid_input("name").with_reason("Name must not be empty")
                );
            }
        }
        Ok(())
    }
}

/// Parameters for moving an activity up or down among its siblings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct MoveActivity {
    /// ID of the activity to move
    pub id: u64,
    /// Direction to move in
    pub direction: MoveDirection,
}

/// Base parameters for service creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ServiceCreate {
    /// ID of the activity to add the service to
    pub activity_id: u64,
    /// Description of the service (required)
    pub description: String,
    /// Optional estimated duration in minutes
    pub estimated_time_min: Option<u32>,
}

impl ServiceCreate {
    /// Validate the parameters before any persistence call.
    ///
    /// # Errors
    ///
    /// * `PlannerError::InvalidInput` - When the description is empty
    pub fn validate(&self) -> Result<()> {
        if self.description.trim().is_empty() {
            return Err(PlannerError::invalid_input("description")
                .with_reason("Description must not be empty"));
        }
        Ok(())
    }
}

/// Parameters for updating an existing service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateService {
    /// Service ID to update (required)
    pub id: u64,
    /// Updated description of the service
    pub description: Option<String>,
    /// Updated estimated duration in minutes
    pub estimated_time_min: Option<u32>,
}

impl UpdateService {
    /// Validate the parameters before any persistence call.
    ///
    /// # Errors
    ///
    /// * `PlannerError::InvalidInput` - When the new description is empty
    pub fn validate(&self) -> Result<()> {
        if let Some(description) = &self.description {
            if description.trim().is_empty() {
                return Err(PlannerError::invalid_input("description")
                    .with_reason("Description must not be empty"));
            }
        }
        Ok(())
    }
}

/// Parameters for moving a service up or down among its siblings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct MoveService {
    /// ID of the service to move
    pub id: u64,
    /// Direction to move in
    pub direction: MoveDirection,
}

/// Parameters for starting an execution of a plan.
///
/// The checklist is generated from the plan's current tree at this moment
/// and frozen into the new execution record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct StartExecution {
    /// ID of the plan to execute
    pub plan_id: u64,
    /// Who is carrying the execution out (required)
    pub executor: String,
    /// When the execution takes place; defaults to now (RFC 3339 timestamp)
    #[cfg_attr(feature = "schema", schemars(with = "Option<String>"))]
    pub execution_date: Option<jiff::Timestamp>,
    /// Optional free-form notes
    pub observations: Option<String>,
}

impl StartExecution {
    /// Validate the parameters before any persistence call.
    ///
    /// # Errors
    ///
    /// * `PlannerError::InvalidInput` - When the executor name is empty
    pub fn validate(&self) -> Result<()> {
        if self.executor.trim().is_empty() {
            return Err(PlannerError::invalid_input("executor")
                .with_reason("Executor name must not be empty"));
        }
        Ok(())
    }
}

/// Parameters for listing executions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListExecutions {
    /// Restrict to executions of one plan
    pub plan_id: Option<u64>,
    /// Restrict to one status ('em_andamento', 'concluida', or 'cancelada')
    pub status: Option<String>,
}

impl ListExecutions {
    /// Validate the parameters and build the corresponding filter.
    ///
    /// # Errors
    ///
    /// * `PlannerError::InvalidInput` - When the status string is not a known
    ///   execution status
    pub fn validate(&self) -> Result<ExecutionFilter> {
        use crate::models::ExecutionStatus;
        use std::str::FromStr;

        let status = match &self.status {
            Some(status_str) => {
                Some(
                    ExecutionStatus::from_str(status_str).map_err(|_| {
                        PlannerError::invalid_input("status").with_reason(format!(
                            "Invalid status: {status_str}. Must be 'em_andamento', 'concluida', or 'cancelada'"
                        ))
                    })?,
                )
            }
            None => None,
        };

        Ok(ExecutionFilter {
            plan_id: self.plan_id,
            status,
        })
    }
}

/// Parameters for checking or unchecking one checklist item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SetChecklistItem {
    /// ID of the execution owning the checklist
    pub execution_id: u64,
    /// Position of the item within the checklist (1-indexed)
    pub position: u32,
    /// New completed state for the item
    pub completed: bool,
}

impl SetChecklistItem {
    /// Validate the parameters before any persistence call.
    ///
    /// # Errors
    ///
    /// * `PlannerError::InvalidInput` - When the position is zero
    pub fn validate(&self) -> Result<()> {
        if self.position == 0 {
            return Err(PlannerError::invalid_input("position")
                .with_reason("Checklist positions start at 1"));
        }
        Ok(())
    }
}

/// Parameters for finishing an execution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct FinishExecution {
    /// ID of the execution to finish
    pub id: u64,
    /// Final notes recorded by the executor
    pub observations: Option<String>,
    /// Actual duration of the execution in minutes
    pub real_time_min: Option<u32>,
}

/// Parameters for cancelling an execution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CancelExecution {
    /// ID of the execution to cancel
    pub id: u64,
    /// Optional notes on why the execution was aborted
    pub observations: Option<String>,
}

/// Parameters for capturing a template from a plan's current tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CaptureTemplate {
    /// ID of the plan to capture
    pub plan_id: u64,
    /// Name of the new template (required)
    pub name: String,
    /// Optional description of what the template is for
    pub description: Option<String>,
}

impl CaptureTemplate {
    /// Validate the parameters before any persistence call.
    ///
    /// # Errors
    ///
    /// * `PlannerError::InvalidInput` - When the template name is empty
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(PlannerError::invalid_input("name").with_reason("Name must not be empty"));
        }
        Ok(())
    }
}

/// Parameters for applying a template to a target plan.
///
/// Recreates the template's structure under the plan with fresh ids; orders
/// are copied verbatim and the template itself is never touched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ApplyTemplate {
    /// ID of the template to apply
    pub template_id: u64,
    /// ID of the plan to recreate the structure under
    pub plan_id: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExecutionStatus;

    #[test]
    fn test_create_plan_validate_ok() {
        let params = CreatePlan {
            code: "PREV-01".to_string(),
            name: "Monthly lubrication".to_string(),
            frequency_days: 30,
            ..Default::default()
        };

        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_create_plan_validate_empty_code() {
        let params = CreatePlan {
            code: "   ".to_string(),
            name: "Monthly lubrication".to_string(),
            frequency_days: 30,
            ..Default::default()
        };

        match params.validate().unwrap_err() {
            PlannerError::InvalidInput { field, .. } => assert_eq!(field, "code"),
            other => panic!("Expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn test_create_plan_validate_empty_name() {
        let params = CreatePlan {
            code: "PREV-01".to_string(),
            name: String::new(),
            frequency_days: 30,
            ..Default::default()
        };

        match params.validate().unwrap_err() {
            PlannerError::InvalidInput { field, .. } => assert_eq!(field, "name"),
            other => panic!("Expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn test_create_plan_validate_zero_frequency() {
        let params = CreatePlan {
            code: "PREV-01".to_string(),
            name: "Monthly lubrication".to_string(),
            frequency_days: 0,
            ..Default::default()
        };

        match params.validate().unwrap_err() {
            PlannerError::InvalidInput { field, reason } => {
                assert_eq!(field, "frequency_days");
                assert!(reason.contains("positive"));
            }
            other => panic!("Expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn test_update_plan_validate_zero_frequency() {
        let params = UpdatePlan {
            id: 1,
            frequency_days: Some(0),
            ..Default::default()
        };

        assert!(params.validate().is_err());
    }

    #[test]
    fn test_update_plan_validate_no_changes() {
        let params = UpdatePlan {
            id: 1,
            ..Default::default()
        };

        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_activity_create_validate_empty_name() {
        let params = ActivityCreate {
            plan_id: 1,
            name: "  ".to_string(),
            responsible: None,
        };

        assert!(params.validate().is_err());
    }

    #[test]
    fn test_service_create_validate_empty_description() {
        let params = ServiceCreate {
            activity_id: 1,
            description: String::new(),
            estimated_time_min: Some(5),
        };

        match params.validate().unwrap_err() {
            PlannerError::InvalidInput { field, .. } => assert_eq!(field, "description"),
            other => panic!("Expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn test_start_execution_validate_empty_executor() {
        let params = StartExecution {
            plan_id: 1,
            executor: " ".to_string(),
            ..Default::default()
        };

        match params.validate().unwrap_err() {
            PlannerError::InvalidInput { field, .. } => assert_eq!(field, "executor"),
            other => panic!("Expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn test_list_executions_validate_status() {
        let params = ListExecutions {
            plan_id: Some(3),
            status: Some("concluida".to_string()),
        };

        let filter = params.validate().expect("status should parse");
        assert_eq!(filter.plan_id, Some(3));
        assert_eq!(filter.status, Some(ExecutionStatus::Concluida));
    }

    #[test]
    fn test_list_executions_validate_invalid_status() {
        let params = ListExecutions {
            plan_id: None,
            status: Some("paused".to_string()),
        };

        match params.validate().unwrap_err() {
            PlannerError::InvalidInput { field, reason } => {
                assert_eq!(field, "status");
                assert!(reason.contains("Invalid status: paused"));
            }
            other => panic!("Expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn test_set_checklist_item_validate_zero_position() {
        let params = SetChecklistItem {
            execution_id: 1,
            position: 0,
            completed: true,
        };

        match params.validate().unwrap_err() {
            PlannerError::InvalidInput { field, .. } => assert_eq!(field, "position"),
            other => panic!("Expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn test_capture_template_validate_empty_name() {
        let params = CaptureTemplate {
            plan_id: 1,
            name: String::new(),
            description: None,
        };

        assert!(params.validate().is_err());
    }
}
