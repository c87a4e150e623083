//! MCP tool handlers implementation

use std::sync::Arc;

use lathe_core::{
    display::{CreateResult, OperationStatus, UpdateResult},
    params as core, Planner,
};
use log::debug;
use rmcp::{
    handler::server::wrapper::Parameters,
    model::{
        CallToolResult, Content, GetPromptRequestParam, GetPromptResult, ListPromptsResult,
        PaginatedRequestParam, Prompt, PromptArgument, PromptMessage, PromptMessageContent,
        PromptMessageRole,
    },
    service::RequestContext,
    tool, ErrorData, RoleServer,
};
use schemars::JsonSchema;
use serde::Deserialize;
use tokio::sync::Mutex;

use super::{errors::to_mcp_error, prompts::get_prompt_templates};

// ============================================================================
// Generic Parameter Wrapper Implementation
// ============================================================================
//
// This generic wrapper struct implements the parameter wrapper pattern by:
// 1. Wrapping any core parameter type in a transparent serde container
// 2. Adding MCP-specific derives (Deserialize, JsonSchema) for JSON handling
// 3. Keeping the core types clean of framework dependencies
//
// The #[serde(transparent)] attribute ensures that
// serialization/deserialization passes through directly to the wrapped core
// type, maintaining API compatibility while adding the necessary trait
// implementations for MCP protocol handling.

/// Generic MCP wrapper for core parameter types with serde integration
///
/// Provides JSON deserialization and schema generation for any parameter type,
/// eliminating the need for individual wrapper structs while maintaining
/// the same functionality and type safety.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

// Type aliases for cleaner usage in function signatures
pub type Id = McpParams<core::Id>;
pub type CreatePlan = McpParams<core::CreatePlan>;
pub type UpdatePlan = McpParams<core::UpdatePlan>;
pub type ListPlans = McpParams<core::ListPlans>;
pub type DeletePlan = McpParams<core::DeletePlan>;
pub type ActivityCreate = McpParams<core::ActivityCreate>;
pub type UpdateActivity = McpParams<core::UpdateActivity>;
pub type MoveActivity = McpParams<core::MoveActivity>;
pub type ServiceCreate = McpParams<core::ServiceCreate>;
pub type UpdateService = McpParams<core::UpdateService>;
pub type MoveService = McpParams<core::MoveService>;
pub type StartExecution = McpParams<core::StartExecution>;
pub type ListExecutions = McpParams<core::ListExecutions>;
pub type SetChecklistItem = McpParams<core::SetChecklistItem>;
pub type FinishExecution = McpParams<core::FinishExecution>;
pub type CancelExecution = McpParams<core::CancelExecution>;
pub type CaptureTemplate = McpParams<core::CaptureTemplate>;
pub type ApplyTemplate = McpParams<core::ApplyTemplate>;

pub type McpResult = Result<CallToolResult, ErrorData>;

fn direction_word(direction: core::MoveDirection) -> &'static str {
    match direction {
        core::MoveDirection::Up => "up",
        core::MoveDirection::Down => "down",
    }
}

/// Handler implementations for the MCP server
pub struct McpHandlers {
    planner: Arc<Mutex<Planner>>,
}

impl McpHandlers {
    pub fn new(planner: Arc<Mutex<Planner>>) -> Self {
        Self { planner }
    }

    #[tool(
        name = "create_plan",
        description = "Create a new preventive maintenance plan. Provide a unique business code and a name (both required), the frequency in days, and optionally the equipment tag, trigger type, specialty, and execution instructions. Returns the new plan ID for adding activities."
    )]
    pub async fn create_plan(&self, Parameters(params): Parameters<CreatePlan>) -> McpResult {
        debug!("create_plan: {:?}", params);

        let plan = self
            .planner
            .lock()
            .await
            .create_plan_result(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to create plan", &e))?;

        let result = CreateResult::new(plan);
        Ok(CallToolResult::success(vec![Content::text(
            result.to_string(),
        )]))
    }

    #[tool(
        name = "list_plans",
        description = "List maintenance plans with their activity counts and total estimated times. Use inactive=false (default) for plans currently on the schedule, or inactive=true for paused plans. Optional name_contains and equipment filters narrow the list down."
    )]
    pub async fn list_plans(&self, Parameters(params): Parameters<ListPlans>) -> McpResult {
        debug!("list_plans: {:?}", params);

        let planner = self.planner.lock().await;
        let inner_params = params.as_ref();
        let plan_summaries = planner
            .list_plans_summary(inner_params)
            .await
            .map_err(|e| to_mcp_error("Failed to list plans", &e))?;

        let title = if plan_summaries.is_empty() {
            if inner_params.inactive {
                "No inactive plans found"
            } else {
                "No active plans found"
            }
        } else if inner_params.inactive {
            "Inactive Plans"
        } else {
            "Active Plans"
        };

        let result = format!("# {}\n\n{}", title, plan_summaries);
        Ok(CallToolResult::success(vec![Content::text(result)]))
    }

    #[tool(
        name = "show_plan",
        description = "Display complete details of a specific plan including its schedule and the full tree of activities and services with estimated times. Use the plan ID to retrieve. Essential for understanding a plan's structure before editing or executing it."
    )]
    pub async fn show_plan(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_plan: {:?}", params);

        let plan = self
            .planner
            .lock()
            .await
            .show_plan_with_activities(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get plan", &e))?
            .ok_or_else(|| {
                ErrorData::internal_error(
                    format!("Plan with ID {} not found", params.as_ref().id),
                    None,
                )
            })?;

        Ok(CallToolResult::success(vec![Content::text(
            plan.to_string(),
        )]))
    }

    #[tool(
        name = "update_plan",
        description = "Modify a plan's properties. Use the plan ID to identify it. Can update: name, equipment, frequency_days, trigger_type, specialty, instructions, and next_execution (RFC 3339 timestamp). Only provided fields are changed; the business code is permanent and cannot be updated."
    )]
    pub async fn update_plan(&self, Parameters(params): Parameters<UpdatePlan>) -> McpResult {
        debug!("update_plan: {:?}", params);

        let planner = self.planner.lock().await;
        let inner_params = params.as_ref();
        let plan = planner
            .update_plan_validated(inner_params)
            .await
            .map_err(|e| to_mcp_error("Failed to update plan", &e))?;

        let mut changes = Vec::new();
        if inner_params.name.is_some() {
            changes.push("Updated name".to_string());
        }
        if inner_params.equipment.is_some() {
            changes.push("Updated equipment".to_string());
        }
        if let Some(days) = inner_params.frequency_days {
            changes.push(format!("Updated frequency to every {} days", days));
        }
        if inner_params.trigger_type.is_some() {
            changes.push("Updated trigger type".to_string());
        }
        if inner_params.specialty.is_some() {
            changes.push("Updated specialty".to_string());
        }
        if inner_params.instructions.is_some() {
            changes.push("Updated instructions".to_string());
        }
        if let Some(next) = inner_params.next_execution {
            changes.push(format!("Rescheduled next execution to {}", next));
        }

        let result = UpdateResult::with_changes(plan, changes);
        Ok(CallToolResult::success(vec![Content::text(
            result.to_string(),
        )]))
    }

    #[tool(
        name = "deactivate_plan",
        description = "Take a plan off the maintenance schedule without deleting it. The plan disappears from the default list but keeps its activities, services, and execution history. Restore it later with reactivate_plan."
    )]
    pub async fn deactivate_plan(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("deactivate_plan: {:?}", params);

        let planner = self.planner.lock().await;
        let inner_params = params.as_ref();
        let _deactivated_plan = planner
            .deactivate_plan(inner_params)
            .await
            .map_err(|e| to_mcp_error("Failed to deactivate plan", &e))?
            .ok_or_else(|| {
                ErrorData::internal_error(
                    format!("Plan with ID {} not found", inner_params.id),
                    None,
                )
            })?;

        let result = OperationStatus::success(format!(
            "Deactivated plan with ID {}. Use 'reactivate_plan' to restore it.",
            inner_params.id
        ));
        Ok(CallToolResult::success(vec![Content::text(
            result.to_string(),
        )]))
    }

    #[tool(
        name = "reactivate_plan",
        description = "Put a previously deactivated plan back on the maintenance schedule. The plan and its whole structure are preserved exactly as they were when it was deactivated."
    )]
    pub async fn reactivate_plan(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("reactivate_plan: {:?}", params);

        let planner = self.planner.lock().await;
        let inner_params = params.as_ref();
        let _reactivated_plan = planner
            .reactivate_plan(inner_params)
            .await
            .map_err(|e| to_mcp_error("Failed to reactivate plan", &e))?
            .ok_or_else(|| {
                ErrorData::internal_error(
                    format!("Plan with ID {} not found", inner_params.id),
                    None,
                )
            })?;

        let result = OperationStatus::success(format!(
            "Reactivated plan with ID {}. Plan is back on the schedule.",
            inner_params.id
        ));
        Ok(CallToolResult::success(vec![Content::text(
            result.to_string(),
        )]))
    }

    #[tool(
        name = "delete_plan",
        description = "Permanently delete a plan together with its activities, services, and execution history. This operation cannot be undone and requires confirmed=true. Consider deactivate_plan instead if you might need the plan later."
    )]
    pub async fn delete_plan(&self, Parameters(params): Parameters<DeletePlan>) -> McpResult {
        debug!("delete_plan: {:?}", params);
        let planner = self.planner.lock().await;
        let inner_params = params.as_ref();

        let deleted_plan = planner
            .delete_plan(inner_params)
            .await
            .map_err(|e| to_mcp_error("Failed to delete plan", &e))?
            .ok_or_else(|| {
                ErrorData::internal_error(
                    format!("Plan with ID {} not found", inner_params.id),
                    None,
                )
            })?;

        let result = OperationStatus::success(format!(
            "Permanently deleted plan '{}' (ID: {}). This action cannot be undone.",
            deleted_plan.name, inner_params.id
        ));
        Ok(CallToolResult::success(vec![Content::text(
            result.to_string(),
        )]))
    }

    #[tool(
        name = "add_activity",
        description = "Add a new activity to an existing plan. Requires plan_id and a name; optionally set the responsible team or person. The activity is appended at the end of the plan's activity order. Returns the new activity ID for adding services."
    )]
    pub async fn add_activity(&self, Parameters(params): Parameters<ActivityCreate>) -> McpResult {
        debug!("add_activity: {:?}", params);

        let planner = self.planner.lock().await;
        let inner_params = params.as_ref();
        let activity = planner
            .add_activity_to_plan(inner_params)
            .await
            .map_err(|e| to_mcp_error("Failed to add activity", &e))?;

        let result = CreateResult::new(activity);
        Ok(CallToolResult::success(vec![Content::text(
            result.to_string(),
        )]))
    }

    #[tool(
        name = "show_activity",
        description = "View detailed information about a specific activity including its position within the plan, responsible party, and the ordered list of services it contains."
    )]
    pub async fn show_activity(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_activity: {:?}", params);

        let planner = self.planner.lock().await;
        let inner_params = params.as_ref();
        let activity = planner
            .show_activity_details(inner_params)
            .await
            .map_err(|e| to_mcp_error("Failed to get activity", &e))?
            .ok_or_else(|| {
                ErrorData::internal_error(
                    format!("Activity with ID {} not found", inner_params.id),
                    None,
                )
            })?;

        Ok(CallToolResult::success(vec![Content::text(
            activity.to_string(),
        )]))
    }

    #[tool(
        name = "update_activity",
        description = "Modify an existing activity's properties. Use the activity ID to identify it. Can update: name and responsible. The position within the plan is managed by move_activity and cannot be set here."
    )]
    pub async fn update_activity(
        &self,
        Parameters(params): Parameters<UpdateActivity>,
    ) -> McpResult {
        debug!("update_activity: {:?}", params);

        let planner = self.planner.lock().await;
        let inner_params = params.as_ref();
        let activity = planner
            .update_activity_validated(inner_params)
            .await
            .map_err(|e| to_mcp_error("Failed to update activity", &e))?;

        let mut changes = Vec::new();
        if inner_params.name.is_some() {
            changes.push("Updated name".to_string());
        }
        if inner_params.responsible.is_some() {
            changes.push("Updated responsible".to_string());
        }

        let result = UpdateResult::with_changes(activity, changes);
        Ok(CallToolResult::success(vec![Content::text(
            result.to_string(),
        )]))
    }

    #[tool(
        name = "move_activity",
        description = "Move an activity one position up or down within its plan by swapping it with its neighbor. Direction is 'up' or 'down'. Moving the first activity up or the last one down is a harmless no-op."
    )]
    pub async fn move_activity(&self, Parameters(params): Parameters<MoveActivity>) -> McpResult {
        debug!("move_activity: {:?}", params);

        let planner = self.planner.lock().await;
        let inner_params = params.as_ref();
        let activity = planner
            .move_activity_position(inner_params)
            .await
            .map_err(|e| to_mcp_error("Failed to move activity", &e))?;

        let result = OperationStatus::success(format!(
            "Moved activity {} {}. It is now at position {}.",
            inner_params.id,
            direction_word(inner_params.direction),
            activity.order
        ));
        Ok(CallToolResult::success(vec![Content::text(
            result.to_string(),
        )]))
    }

    #[tool(
        name = "remove_activity",
        description = "Remove an activity from its plan, deleting all its services with it. Activities after the removed one keep their relative order. This operation cannot be undone."
    )]
    pub async fn remove_activity(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("remove_activity: {:?}", params);

        let planner = self.planner.lock().await;
        let inner_params = params.as_ref();
        let activity = planner
            .remove_activity_from_plan(inner_params)
            .await
            .map_err(|e| to_mcp_error("Failed to remove activity", &e))?
            .ok_or_else(|| {
                ErrorData::internal_error(
                    format!("Activity with ID {} not found", inner_params.id),
                    None,
                )
            })?;

        let result = OperationStatus::success(format!(
            "Removed activity '{}' (ID: {}) and its services.",
            activity.name, inner_params.id
        ));
        Ok(CallToolResult::success(vec![Content::text(
            result.to_string(),
        )]))
    }

    #[tool(
        name = "add_service",
        description = "Add a new service to an existing activity. Requires activity_id and a description; optionally set estimated_time_min, which feeds the plan and execution time totals. The service is appended at the end of the activity's service order."
    )]
    pub async fn add_service(&self, Parameters(params): Parameters<ServiceCreate>) -> McpResult {
        debug!("add_service: {:?}", params);

        let planner = self.planner.lock().await;
        let inner_params = params.as_ref();
        let service = planner
            .add_service_to_activity(inner_params)
            .await
            .map_err(|e| to_mcp_error("Failed to add service", &e))?;

        let result = CreateResult::new(service);
        Ok(CallToolResult::success(vec![Content::text(
            result.to_string(),
        )]))
    }

    #[tool(
        name = "show_service",
        description = "View detailed information about a specific service including its description, estimated time, and position within its activity."
    )]
    pub async fn show_service(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_service: {:?}", params);

        let planner = self.planner.lock().await;
        let inner_params = params.as_ref();
        let service = planner
            .show_service_details(inner_params)
            .await
            .map_err(|e| to_mcp_error("Failed to get service", &e))?
            .ok_or_else(|| {
                ErrorData::internal_error(
                    format!("Service with ID {} not found", inner_params.id),
                    None,
                )
            })?;

        Ok(CallToolResult::success(vec![Content::text(
            service.to_string(),
        )]))
    }

    #[tool(
        name = "update_service",
        description = "Modify an existing service's properties. Use the service ID to identify it. Can update: description and estimated_time_min. The position within the activity is managed by move_service and cannot be set here."
    )]
    pub async fn update_service(&self, Parameters(params): Parameters<UpdateService>) -> McpResult {
        debug!("update_service: {:?}", params);

        let planner = self.planner.lock().await;
        let inner_params = params.as_ref();
        let service = planner
            .update_service_validated(inner_params)
            .await
            .map_err(|e| to_mcp_error("Failed to update service", &e))?;

        let mut changes = Vec::new();
        if inner_params.description.is_some() {
            changes.push("Updated description".to_string());
        }
        if let Some(minutes) = inner_params.estimated_time_min {
            changes.push(format!("Updated estimated time to {} min", minutes));
        }

        let result = UpdateResult::with_changes(service, changes);
        Ok(CallToolResult::success(vec![Content::text(
            result.to_string(),
        )]))
    }

    #[tool(
        name = "move_service",
        description = "Move a service one position up or down within its activity by swapping it with its neighbor. Direction is 'up' or 'down'. Moving the first service up or the last one down is a harmless no-op."
    )]
    pub async fn move_service(&self, Parameters(params): Parameters<MoveService>) -> McpResult {
        debug!("move_service: {:?}", params);

        let planner = self.planner.lock().await;
        let inner_params = params.as_ref();
        let service = planner
            .move_service_position(inner_params)
            .await
            .map_err(|e| to_mcp_error("Failed to move service", &e))?;

        let result = OperationStatus::success(format!(
            "Moved service {} {}. It is now at position {}.",
            inner_params.id,
            direction_word(inner_params.direction),
            service.order
        ));
        Ok(CallToolResult::success(vec![Content::text(
            result.to_string(),
        )]))
    }

    #[tool(
        name = "remove_service",
        description = "Remove a service from its activity. Services after the removed one keep their relative order. This operation cannot be undone."
    )]
    pub async fn remove_service(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("remove_service: {:?}", params);

        let planner = self.planner.lock().await;
        let inner_params = params.as_ref();
        let service = planner
            .remove_service_from_activity(inner_params)
            .await
            .map_err(|e| to_mcp_error("Failed to remove service", &e))?
            .ok_or_else(|| {
                ErrorData::internal_error(
                    format!("Service with ID {} not found", inner_params.id),
                    None,
                )
            })?;

        let result = OperationStatus::success(format!(
            "Removed service '{}' (ID: {}).",
            service.description, inner_params.id
        ));
        Ok(CallToolResult::success(vec![Content::text(
            result.to_string(),
        )]))
    }

    #[tool(
        name = "start_execution",
        description = "Start a new execution of a plan. Requires plan_id and the executor's name; optionally set execution_date (RFC 3339 timestamp, defaults to now) and observations. Takes a frozen checklist snapshot of the plan's current structure, so later plan edits do not affect this round."
    )]
    pub async fn start_execution(
        &self,
        Parameters(params): Parameters<StartExecution>,
    ) -> McpResult {
        debug!("start_execution: {:?}", params);

        let planner = self.planner.lock().await;
        let inner_params = params.as_ref();
        let execution = planner
            .start_execution_result(inner_params)
            .await
            .map_err(|e| to_mcp_error("Failed to start execution", &e))?;

        let result = CreateResult::new(execution);
        Ok(CallToolResult::success(vec![Content::text(
            result.to_string(),
        )]))
    }

    #[tool(
        name = "list_executions",
        description = "List executions, most recent first. Optional plan_id narrows the list to one plan; optional status narrows it to 'em_andamento' (in progress), 'concluida' (finished), or 'cancelada' (cancelled)."
    )]
    pub async fn list_executions(
        &self,
        Parameters(params): Parameters<ListExecutions>,
    ) -> McpResult {
        debug!("list_executions: {:?}", params);

        let planner = self.planner.lock().await;
        let inner_params = params.as_ref();
        let executions = planner
            .list_executions_filtered(inner_params)
            .await
            .map_err(|e| to_mcp_error("Failed to list executions", &e))?;

        let title = if executions.is_empty() {
            "No executions found"
        } else {
            "Executions"
        };

        let result = format!("# {}\n\n{}", title, executions);
        Ok(CallToolResult::success(vec![Content::text(result)]))
    }

    #[tool(
        name = "show_execution",
        description = "Display complete details of a specific execution including its status, executor, dates, notes, and the full checklist with each item's completion state. Use this to see how far a maintenance round has progressed."
    )]
    pub async fn show_execution(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_execution: {:?}", params);

        let planner = self.planner.lock().await;
        let inner_params = params.as_ref();
        let execution = planner
            .show_execution_details(inner_params)
            .await
            .map_err(|e| to_mcp_error("Failed to get execution", &e))?
            .ok_or_else(|| {
                ErrorData::internal_error(
                    format!("Execution with ID {} not found", inner_params.id),
                    None,
                )
            })?;

        Ok(CallToolResult::success(vec![Content::text(
            execution.to_string(),
        )]))
    }

    #[tool(
        name = "set_checklist_item",
        description = "Mark one checklist item of an in-progress execution as completed or not completed. Requires execution_id, the 1-based position of the item, and the new completed state. Fails once the execution is finished or cancelled."
    )]
    pub async fn set_checklist_item(
        &self,
        Parameters(params): Parameters<SetChecklistItem>,
    ) -> McpResult {
        debug!("set_checklist_item: {:?}", params);

        let planner = self.planner.lock().await;
        let inner_params = params.as_ref();
        let execution = planner
            .set_checklist_item_validated(inner_params)
            .await
            .map_err(|e| to_mcp_error("Failed to set checklist item", &e))?;

        let action = if inner_params.completed {
            "Checked"
        } else {
            "Unchecked"
        };
        let result = OperationStatus::success(format!(
            "{} item {} of execution {} ({} of {} done).",
            action,
            inner_params.position,
            inner_params.execution_id,
            execution.completed_items(),
            execution.checklist.len()
        ));
        Ok(CallToolResult::success(vec![Content::text(
            result.to_string(),
        )]))
    }

    #[tool(
        name = "finish_execution",
        description = "Close an in-progress execution as completed. Optionally record final observations and real_time_min (the actual duration in minutes). Once finished, the checklist can no longer be modified."
    )]
    pub async fn finish_execution(
        &self,
        Parameters(params): Parameters<FinishExecution>,
    ) -> McpResult {
        debug!("finish_execution: {:?}", params);

        let planner = self.planner.lock().await;
        let inner_params = params.as_ref();
        let execution = planner
            .finish_execution_result(inner_params)
            .await
            .map_err(|e| to_mcp_error("Failed to finish execution", &e))?;

        let result = OperationStatus::success(format!(
            "Finished execution {} ({} of {} items completed).",
            inner_params.id,
            execution.completed_items(),
            execution.checklist.len()
        ));
        Ok(CallToolResult::success(vec![Content::text(
            result.to_string(),
        )]))
    }

    #[tool(
        name = "cancel_execution",
        description = "Close an in-progress execution as cancelled, keeping whatever checklist progress was made. Optionally record observations explaining why the round was aborted. Once cancelled, the checklist can no longer be modified."
    )]
    pub async fn cancel_execution(
        &self,
        Parameters(params): Parameters<CancelExecution>,
    ) -> McpResult {
        debug!("cancel_execution: {:?}", params);

        let planner = self.planner.lock().await;
        let inner_params = params.as_ref();
        let execution = planner
            .cancel_execution_result(inner_params)
            .await
            .map_err(|e| to_mcp_error("Failed to cancel execution", &e))?;

        let result = OperationStatus::success(format!(
            "Cancelled execution {} ({} of {} items were completed).",
            inner_params.id,
            execution.completed_items(),
            execution.checklist.len()
        ));
        Ok(CallToolResult::success(vec![Content::text(
            result.to_string(),
        )]))
    }

    #[tool(
        name = "capture_template",
        description = "Capture a plan's current activities and services as a reusable, immutable template. Requires plan_id and a template name; optionally set a description. The plan must have at least one activity. The template keeps no link to the source plan."
    )]
    pub async fn capture_template(
        &self,
        Parameters(params): Parameters<CaptureTemplate>,
    ) -> McpResult {
        debug!("capture_template: {:?}", params);

        let planner = self.planner.lock().await;
        let inner_params = params.as_ref();
        let template = planner
            .capture_template_result(inner_params)
            .await
            .map_err(|e| to_mcp_error("Failed to capture template", &e))?;

        let result = CreateResult::new(template);
        Ok(CallToolResult::success(vec![Content::text(
            result.to_string(),
        )]))
    }

    #[tool(
        name = "list_templates",
        description = "List all captured templates with their activity and service counts and total estimated times."
    )]
    pub async fn list_templates(&self) -> McpResult {
        debug!("list_templates");

        let planner = self.planner.lock().await;
        let templates = planner
            .list_templates_summary()
            .await
            .map_err(|e| to_mcp_error("Failed to list templates", &e))?;

        let title = if templates.is_empty() {
            "No templates found"
        } else {
            "Templates"
        };

        let result = format!("# {}\n\n{}", title, templates);
        Ok(CallToolResult::success(vec![Content::text(result)]))
    }

    #[tool(
        name = "show_template",
        description = "Display complete details of a specific template including its full structure of activities and services with estimated times. Use this to review a template before applying it to a plan."
    )]
    pub async fn show_template(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_template: {:?}", params);

        let planner = self.planner.lock().await;
        let inner_params = params.as_ref();
        let template = planner
            .show_template_details(inner_params)
            .await
            .map_err(|e| to_mcp_error("Failed to get template", &e))?
            .ok_or_else(|| {
                ErrorData::internal_error(
                    format!("Template with ID {} not found", inner_params.id),
                    None,
                )
            })?;

        Ok(CallToolResult::success(vec![Content::text(
            template.to_string(),
        )]))
    }

    #[tool(
        name = "apply_template",
        description = "Recreate a template's activities and services under a target plan with fresh IDs. Requires template_id and plan_id. Anything already in the plan is kept; the template's structure is appended with its original ordering."
    )]
    pub async fn apply_template(&self, Parameters(params): Parameters<ApplyTemplate>) -> McpResult {
        debug!("apply_template: {:?}", params);

        let planner = self.planner.lock().await;
        let inner_params = params.as_ref();
        let plan = planner
            .apply_template_to_plan(inner_params)
            .await
            .map_err(|e| to_mcp_error("Failed to apply template", &e))?;

        let result = OperationStatus::success(format!(
            "Applied template {} to plan {}. The plan now has {} activities.",
            inner_params.template_id,
            inner_params.plan_id,
            plan.activities.len()
        ));
        Ok(CallToolResult::success(vec![Content::text(
            result.to_string(),
        )]))
    }

    #[tool(
        name = "delete_template",
        description = "Permanently delete a template. Plans that were created from it are not affected. This operation cannot be undone."
    )]
    pub async fn delete_template(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("delete_template: {:?}", params);

        let planner = self.planner.lock().await;
        let inner_params = params.as_ref();
        let template = planner
            .delete_template(inner_params)
            .await
            .map_err(|e| to_mcp_error("Failed to delete template", &e))?
            .ok_or_else(|| {
                ErrorData::internal_error(
                    format!("Template with ID {} not found", inner_params.id),
                    None,
                )
            })?;

        let result = OperationStatus::success(format!(
            "Permanently deleted template '{}' (ID: {}). Plans created from it are not affected.",
            template.name, inner_params.id
        ));
        Ok(CallToolResult::success(vec![Content::text(
            result.to_string(),
        )]))
    }

    /// List all available prompts
    pub async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, ErrorData> {
        debug!("list_prompts");

        let templates = get_prompt_templates();
        let prompts = templates
            .iter()
            .map(|template| {
                Prompt::new(
                    &template.name,
                    Some(&template.description),
                    Some(
                        template
                            .arguments
                            .iter()
                            .map(|arg| PromptArgument {
                                name: arg.name.clone(),
                                title: None,
                                description: Some(arg.description.clone()),
                                required: Some(arg.required),
                            })
                            .collect(),
                    ),
                )
            })
            .collect();

        Ok(ListPromptsResult {
            next_cursor: None,
            prompts,
        })
    }

    /// Get a specific prompt by name and apply arguments
    pub async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, ErrorData> {
        debug!("get_prompt: {}", request.name);

        let templates = get_prompt_templates();
        let template = templates
            .iter()
            .find(|t| t.name == request.name)
            .ok_or_else(|| ErrorData::invalid_params("Prompt not found", None))?;

        let mut prompt_text = template.template.clone();

        // Apply argument substitution if arguments are provided
        if let Some(args) = &request.arguments {
            for arg_def in &template.arguments {
                if let Some(arg_value) = args.get(&arg_def.name) {
                    if let Some(arg_str) = arg_value.as_str() {
                        let placeholder = format!("{{{}}}", arg_def.name);
                        prompt_text = prompt_text.replace(&placeholder, arg_str);
                    } else if arg_def.required {
                        return Err(ErrorData::invalid_params(
                            format!("Argument '{}' must be a string", arg_def.name),
                            None,
                        ));
                    }
                } else if arg_def.required {
                    return Err(ErrorData::invalid_params(
                        format!("Required argument '{}' is missing", arg_def.name),
                        None,
                    ));
                }
            }
        } else {
            // Check if any required arguments are missing
            let required_args: Vec<_> = template
                .arguments
                .iter()
                .filter(|arg| arg.required)
                .map(|arg| arg.name.as_str())
                .collect();
            if !required_args.is_empty() {
                return Err(ErrorData::invalid_params(
                    format!("Required arguments missing: {}", required_args.join(", ")),
                    None,
                ));
            }
        }

        Ok(GetPromptResult {
            description: Some(template.description.clone()),
            messages: vec![PromptMessage {
                role: PromptMessageRole::User,
                content: PromptMessageContent::text(prompt_text),
            }],
        })
    }
}
