//! MCP server implementation for Lathe
//!
//! This module implements the Model Context Protocol server for Lathe,
//! providing a standardized interface for AI models to interact with
//! the maintenance planning system.

use std::sync::Arc;

use anyhow::Result;
use lathe_core::Planner;
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        GetPromptRequestParam, GetPromptResult, Implementation, ListPromptsResult,
        PaginatedRequestParam, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    tool, tool_handler, tool_router, ErrorData as McpError, RoleServer, ServerHandler,
};
use tokio::{
    signal::unix::{signal, SignalKind},
    sync::Mutex,
};

pub mod errors;
pub mod handlers;
pub mod prompts;

// Re-export parameter types and result type from handlers for external use
pub use handlers::{
    ActivityCreate, ApplyTemplate, CancelExecution, CaptureTemplate, CreatePlan, DeletePlan,
    FinishExecution, Id, ListExecutions, ListPlans, McpResult, MoveActivity, MoveService,
    ServiceCreate, SetChecklistItem, StartExecution, UpdateActivity, UpdatePlan, UpdateService,
};

/// MCP server for Lathe
#[derive(Clone)]
pub struct LatheMcpServer {
    planner: Arc<Mutex<Planner>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl LatheMcpServer {
    /// Create a new Lathe MCP server
    pub fn new(planner: Planner) -> Self {
        Self {
            planner: Arc::new(Mutex::new(planner)),
            tool_router: Self::tool_router(),
        }
    }

    // Tool methods that delegate to handlers::McpHandlers methods
    #[tool(
        name = "create_plan",
        description = "Create a new preventive maintenance plan. Provide a unique business code and a name (both required), the frequency in days, and optionally the equipment tag, trigger type, specialty, and execution instructions. Returns the new plan ID for adding activities."
    )]
    async fn create_plan(&self, params: Parameters<CreatePlan>) -> McpResult {
        let handlers = handlers::McpHandlers::new(self.planner.clone());
        handlers.create_plan(params).await
    }

    #[tool(
        name = "list_plans",
        description = "List maintenance plans with their activity counts and total estimated times. Use inactive=false (default) for plans currently on the schedule, or inactive=true for paused plans. Optional name_contains and equipment filters narrow the list down."
    )]
    async fn list_plans(&self, params: Parameters<ListPlans>) -> McpResult {
        let handlers = handlers::McpHandlers::new(self.planner.clone());
        handlers.list_plans(params).await
    }

    #[tool(
        name = "show_plan",
        description = "Display complete details of a specific plan including its schedule and the full tree of activities and services with estimated times. Use the plan ID to retrieve. Essential for understanding a plan's structure before editing or executing it."
    )]
    async fn show_plan(&self, params: Parameters<Id>) -> McpResult {
        let handlers = handlers::McpHandlers::new(self.planner.clone());
        handlers.show_plan(params).await
    }

    #[tool(
        name = "update_plan",
        description = "Modify a plan's properties. Use the plan ID to identify it. Can update: name, equipment, frequency_days, trigger_type, specialty, instructions, and next_execution (RFC 3339 timestamp). Only provided fields are changed; the business code is permanent and cannot be updated."
    )]
    async fn update_plan(&self, params: Parameters<UpdatePlan>) -> McpResult {
        let handlers = handlers::McpHandlers::new(self.planner.clone());
        handlers.update_plan(params).await
    }

    #[tool(
        name = "deactivate_plan",
        description = "Take a plan off the maintenance schedule without deleting it. The plan disappears from the default list but keeps its activities, services, and execution history. Restore it later with reactivate_plan."
    )]
    async fn deactivate_plan(&self, params: Parameters<Id>) -> McpResult {
        let handlers = handlers::McpHandlers::new(self.planner.clone());
        handlers.deactivate_plan(params).await
    }

    #[tool(
        name = "reactivate_plan",
        description = "Put a previously deactivated plan back on the maintenance schedule. The plan and its whole structure are preserved exactly as they were when it was deactivated."
    )]
    async fn reactivate_plan(&self, params: Parameters<Id>) -> McpResult {
        let handlers = handlers::McpHandlers::new(self.planner.clone());
        handlers.reactivate_plan(params).await
    }

    #[tool(
        name = "delete_plan",
        description = "Permanently delete a plan together with its activities, services, and execution history. This operation cannot be undone and requires confirmed=true. Consider deactivate_plan instead if you might need the plan later."
    )]
    async fn delete_plan(&self, params: Parameters<DeletePlan>) -> McpResult {
        let handlers = handlers::McpHandlers::new(self.planner.clone());
        handlers.delete_plan(params).await
    }

    #[tool(
        name = "add_activity",
        description = "Add a new activity to an existing plan. Requires plan_id and a name; optionally set the responsible team or person. The activity is appended at the end of the plan's activity order. Returns the new activity ID for adding services."
    )]
    async fn add_activity(&self, params: Parameters<ActivityCreate>) -> McpResult {
        let handlers = handlers::McpHandlers::new(self.planner.clone());
        handlers.add_activity(params).await
    }

    #[tool(
        name = "show_activity",
        description = "View detailed information about a specific activity including its position within the plan, responsible party, and the ordered list of services it contains."
    )]
    async fn show_activity(&self, params: Parameters<Id>) -> McpResult {
        let handlers = handlers::McpHandlers::new(self.planner.clone());
        handlers.show_activity(params).await
    }

    #[tool(
        name = "update_activity",
        description = "Modify an existing activity's properties. Use the activity ID to identify it. Can update: name and responsible. The position within the plan is managed by move_activity and cannot be set here."
    )]
    async fn update_activity(&self, params: Parameters<UpdateActivity>) -> McpResult {
        let handlers = handlers::McpHandlers::new(self.planner.clone());
        handlers.update_activity(params).await
    }

    #[tool(
        name = "move_activity",
        description = "Move an activity one position up or down within its plan by swapping it with its neighbor. Direction is 'up' or 'down'. Moving the first activity up or the last one down is a harmless no-op."
    )]
    async fn move_activity(&self, params: Parameters<MoveActivity>) -> McpResult {
        let handlers = handlers::McpHandlers::new(self.planner.clone());
        handlers.move_activity(params).await
    }

    #[tool(
        name = "remove_activity",
        description = "Remove an activity from its plan, deleting all its services with it. Activities after the removed one keep their relative order. This operation cannot be undone."
    )]
    async fn remove_activity(&self, params: Parameters<Id>) -> McpResult {
        let handlers = handlers::McpHandlers::new(self.planner.clone());
        handlers.remove_activity(params).await
    }

    #[tool(
        name = "add_service",
        description = "Add a new service to an existing activity. Requires activity_id and a description; optionally set estimated_time_min, which feeds the plan and execution time totals. The service is appended at the end of the activity's service order."
    )]
    async fn add_service(&self, params: Parameters<ServiceCreate>) -> McpResult {
        let handlers = handlers::McpHandlers::new(self.planner.clone());
        handlers.add_service(params).await
    }

    #[tool(
        name = "show_service",
        description = "View detailed information about a specific service including its description, estimated time, and position within its activity."
    )]
    async fn show_service(&self, params: Parameters<Id>) -> McpResult {
        let handlers = handlers::McpHandlers::new(self.planner.clone());
        handlers.show_service(params).await
    }

    #[tool(
        name = "update_service",
        description = "Modify an existing service's properties. Use the service ID to identify it. Can update: description and estimated_time_min. The position within the activity is managed by move_service and cannot be set here."
    )]
    async fn update_service(&self, params: Parameters<UpdateService>) -> McpResult {
        let handlers = handlers::McpHandlers::new(self.planner.clone());
        handlers.update_service(params).await
    }

    #[tool(
        name = "move_service",
        description = "Move a service one position up or down within its activity by swapping it with its neighbor. Direction is 'up' or 'down'. Moving the first service up or the last one down is a harmless no-op."
    )]
    async fn move_service(&self, params: Parameters<MoveService>) -> McpResult {
        let handlers = handlers::McpHandlers::new(self.planner.clone());
        handlers.move_service(params).await
    }

    #[tool(
        name = "remove_service",
        description = "Remove a service from its activity. Services after the removed one keep their relative order. This operation cannot be undone."
    )]
    async fn remove_service(&self, params: Parameters<Id>) -> McpResult {
        let handlers = handlers::McpHandlers::new(self.planner.clone());
        handlers.remove_service(params).await
    }

    #[tool(
        name = "start_execution",
        description = "Start a new execution of a plan. Requires plan_id and the executor's name; optionally set execution_date (RFC 3339 timestamp, defaults to now) and observations. Takes a frozen checklist snapshot of the plan's current structure, so later plan edits do not affect this round."
    )]
    async fn start_execution(&self, params: Parameters<StartExecution>) -> McpResult {
        let handlers = handlers::McpHandlers::new(self.planner.clone());
        handlers.start_execution(params).await
    }

    #[tool(
        name = "list_executions",
        description = "List executions, most recent first. Optional plan_id narrows the list to one plan; optional status narrows it to 'em_andamento' (in progress), 'concluida' (finished), or 'cancelada' (cancelled)."
    )]
    async fn list_executions(&self, params: Parameters<ListExecutions>) -> McpResult {
        let handlers = handlers::McpHandlers::new(self.planner.clone());
        handlers.list_executions(params).await
    }

    #[tool(
        name = "show_execution",
        description = "Display complete details of a specific execution including its status, executor, dates, notes, and the full checklist with each item's completion state. Use this to see how far a maintenance round has progressed."
    )]
    async fn show_execution(&self, params: Parameters<Id>) -> McpResult {
        let handlers = handlers::McpHandlers::new(self.planner.clone());
        handlers.show_execution(params).await
    }

    #[tool(
        name = "set_checklist_item",
        description = "Mark one checklist item of an in-progress execution as completed or not completed. Requires execution_id, the 1-based position of the item, and the new completed state. Fails once the execution is finished or cancelled."
    )]
    async fn set_checklist_item(&self, params: Parameters<SetChecklistItem>) -> McpResult {
        let handlers = handlers::McpHandlers::new(self.planner.clone());
        handlers.set_checklist_item(params).await
    }

    #[tool(
        name = "finish_execution",
        description = "Close an in-progress execution as completed. Optionally record final observations and real_time_min (the actual duration in minutes). Once finished, the checklist can no longer be modified."
    )]
    async fn finish_execution(&self, params: Parameters<FinishExecution>) -> McpResult {
        let handlers = handlers::McpHandlers::new(self.planner.clone());
        handlers.finish_execution(params).await
    }

    #[tool(
        name = "cancel_execution",
        description = "Close an in-progress execution as cancelled, keeping whatever checklist progress was made. Optionally record observations explaining why the round was aborted. Once cancelled, the checklist can no longer be modified."
    )]
    async fn cancel_execution(&self, params: Parameters<CancelExecution>) -> McpResult {
        let handlers = handlers::McpHandlers::new(self.planner.clone());
        handlers.cancel_execution(params).await
    }

    #[tool(
        name = "capture_template",
        description = "Capture a plan's current activities and services as a reusable, immutable template. Requires plan_id and a template name; optionally set a description. The plan must have at least one activity. The template keeps no link to the source plan."
    )]
    async fn capture_template(&self, params: Parameters<CaptureTemplate>) -> McpResult {
        let handlers = handlers::McpHandlers::new(self.planner.clone());
        handlers.capture_template(params).await
    }

    #[tool(
        name = "list_templates",
        description = "List all captured templates with their activity and service counts and total estimated times."
    )]
    async fn list_templates(&self) -> McpResult {
        let handlers = handlers::McpHandlers::new(self.planner.clone());
        handlers.list_templates().await
    }

    #[tool(
        name = "show_template",
        description = "Display complete details of a specific template including its full structure of activities and services with estimated times. Use this to review a template before applying it to a plan."
    )]
    async fn show_template(&self, params: Parameters<Id>) -> McpResult {
        let handlers = handlers::McpHandlers::new(self.planner.clone());
        handlers.show_template(params).await
    }

    #[tool(
        name = "apply_template",
        description = "Recreate a template's activities and services under a target plan with fresh IDs. Requires template_id and plan_id. Anything already in the plan is kept; the template's structure is appended with its original ordering."
    )]
    async fn apply_template(&self, params: Parameters<ApplyTemplate>) -> McpResult {
        let handlers = handlers::McpHandlers::new(self.planner.clone());
        handlers.apply_template(params).await
    }

    #[tool(
        name = "delete_template",
        description = "Permanently delete a template. Plans that were created from it are not affected. This operation cannot be undone."
    )]
    async fn delete_template(&self, params: Parameters<Id>) -> McpResult {
        let handlers = handlers::McpHandlers::new(self.planner.clone());
        handlers.delete_template(params).await
    }

    /// List all available prompts
    async fn list_prompts(
        &self,
        request: Option<PaginatedRequestParam>,
        context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        let handlers = handlers::McpHandlers::new(self.planner.clone());
        handlers.list_prompts(request, context).await
    }

    /// Get a specific prompt by name and apply arguments
    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        let handlers = handlers::McpHandlers::new(self.planner.clone());
        handlers.get_prompt(request, context).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for LatheMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .build(),
            server_info: Implementation {
                name: "lathe".to_string(),
                title: None,
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(r#"Lathe is a preventive maintenance planning system that organizes recurring maintenance work into structured plans and runs them as checklists.

## Core Concepts
- **Plans**: Recurring maintenance routines with a unique business code, a frequency in days, and optionally the equipment they maintain
- **Activities**: Ordered phases of work within a plan (preparation, inspection, intervention, ...)
- **Services**: Ordered hands-on tasks within an activity, each with an optional time estimate in minutes
- **Executions**: One maintenance round of a plan, working through a frozen checklist snapshot of its structure
- **Templates**: Immutable copies of a plan's structure that can be applied to other plans

## Workflow Examples

### Building a New Plan
1. Create a plan with `create_plan` - provide a unique code, a name, and the frequency in days
2. Add activities with `add_activity` - one per phase of the maintenance round, in execution order
3. Add services with `add_service` - one per hands-on task, with time estimates where known
4. Use `show_plan` to review the complete structure and total estimated time

### Running a Maintenance Round
1. Start with `start_execution` - this freezes the plan's current structure as a checklist
2. Tick items with `set_checklist_item` as the work is physically done
3. Track progress with `show_execution`
4. Close with `finish_execution` (recording observations and the real duration) or `cancel_execution` if the round was aborted

### Reusing Structures
- Capture a proven plan's structure with `capture_template`
- Apply it to new plans with `apply_template`
- Templates are frozen at capture time; later plan edits never change them

## Best Practices
- Keep services atomic: one physical task an executor can tick off
- Put activities in the order the work physically happens; reorder with move_activity and move_service
- Record anomalies in execution observations even when every item was completed
- Deactivate plans for equipment that is out of service instead of deleting them

## Tool Categories
- **Plan Management**: create_plan, list_plans, show_plan, update_plan, deactivate_plan, reactivate_plan, delete_plan
- **Activity Management**: add_activity, show_activity, update_activity, move_activity, remove_activity
- **Service Management**: add_service, show_service, update_service, move_service, remove_service
- **Execution Management**: start_execution, list_executions, show_execution, set_checklist_item, finish_execution, cancel_execution
- **Template Management**: capture_template, list_templates, show_template, apply_template, delete_template

## Checklist Integrity
Executions snapshot the plan's structure at start time. Editing a plan never rewrites history: running and closed executions keep the exact checklist they started with, and closed executions reject all checklist changes."#.to_string()),
        }
    }

    async fn list_prompts(
        &self,
        request: Option<PaginatedRequestParam>,
        context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        self.list_prompts(request, context).await
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        self.get_prompt(request, context).await
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: LatheMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting Lathe MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    // Set up signal handlers for graceful shutdown
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
