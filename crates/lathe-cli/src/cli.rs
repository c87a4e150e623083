//! Command-line interface definitions using clap
//!
//! This module defines the complete CLI structure using clap's derive API,
//! implementing the parameter wrapper pattern for clean separation between
//! CLI framework concerns and core domain logic.
//!
//! ## Parameter Wrapper Pattern Implementation
//!
//! This module demonstrates the CLI side of the parameter wrapper pattern:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Business Logic
//! ```
//!
//! ### Design Benefits
//!
//! 1. **Framework Isolation**: Core parameter types remain free of
//!    clap-specific attributes and derives, enabling reuse across different
//!    interfaces.
//!
//! 2. **Validation Separation**: CLI-specific validation (argument parsing,
//!    help generation) is handled by clap derives, while business logic
//!    validation remains in the core domain.
//!
//! 3. **Interface Evolution**: CLI can evolve its argument structure (aliases,
//!    help text, validation) without affecting core parameter definitions.
//!
//! Each command defines an `Args` struct with clap derives plus a `From`
//! conversion into the matching core parameter type, keeping the boundary
//! between the two layers explicit and verifiable at compile time.

use anyhow::{bail, Result};
use clap::{Args, Subcommand, ValueEnum};
use lathe_core::{
    display::{CreateResult, DeleteResult, OperationStatus, UpdateResult},
    params::*,
    Planner,
};

use crate::renderer::TerminalRenderer;

// ============================================================================
// CLI Argument Wrapper Implementations
// ============================================================================
//
// These structures implement the CLI side of the parameter wrapper pattern.
// Each wrapper:
// 1. Defines CLI-specific argument parsing with clap derives
// 2. Provides conversion methods to core parameter types
// 3. Isolates clap framework concerns from core domain logic
//
// The From conversions perform explicit type mapping, ensuring compile-time
// verification of parameter flow between CLI and core layers.

/// Create a new maintenance plan
///
/// CLI wrapper for CreatePlan that adds clap-specific argument handling
/// including short/long flags, help text generation, and input validation.
#[derive(Args)]
pub struct CreatePlanArgs {
    /// Unique business code identifying the plan (e.g. PREV-001)
    pub code: String,
    /// Name of the plan
    pub name: String,
    /// Execution interval in days
    #[arg(short, long, help = "How often the plan should run, in days")]
    pub frequency_days: u32,
    /// Equipment tag this plan maintains
    #[arg(short, long, help = "Equipment tag this plan maintains")]
    pub equipment: Option<String>,
    /// What triggers the plan (e.g. tempo, horimetro)
    #[arg(long)]
    pub trigger_type: Option<String>,
    /// Maintenance specialty (e.g. mecanica, eletrica)
    #[arg(long)]
    pub specialty: Option<String>,
    /// Execution instructions shown to the executor
    #[arg(short, long)]
    pub instructions: Option<String>,
}

impl From<CreatePlanArgs> for CreatePlan {
    /// Convert CLI arguments to core parameter structure
    ///
    /// This explicit conversion ensures type safety and makes the boundary
    /// between CLI concerns and core logic clear and verifiable.
    fn from(val: CreatePlanArgs) -> Self {
        CreatePlan {
            code: val.code,
            name: val.name,
            equipment: val.equipment,
            frequency_days: val.frequency_days,
            trigger_type: val.trigger_type,
            specialty: val.specialty,
            instructions: val.instructions,
        }
    }
}

/// List maintenance plans
///
/// Display either active plans (default) or inactive plans based on the
/// --inactive flag. Inactive plans are paused plans that have been removed
/// from the schedule without losing their structure or history.
#[derive(Args)]
pub struct ListPlansArgs {
    /// Show inactive plans instead of active ones
    #[arg(long, help = "Show inactive (paused) plans instead of active ones")]
    pub inactive: bool,
    /// Only plans whose name contains this text
    #[arg(long, help = "Only plans whose name contains this text")]
    pub name_contains: Option<String>,
    /// Only plans for this equipment tag
    #[arg(long, help = "Only plans for this equipment tag")]
    pub equipment: Option<String>,
}

impl From<ListPlansArgs> for ListPlans {
    fn from(val: ListPlansArgs) -> Self {
        ListPlans {
            inactive: val.inactive,
            name_contains: val.name_contains,
            equipment: val.equipment,
        }
    }
}

/// Show details of a specific plan
///
/// Display complete information about a plan including its code, schedule,
/// timestamps, and the full tree of activities with their services.
#[derive(Args)]
pub struct ShowPlanArgs {
    /// ID of the plan to display
    #[arg(help = "Unique identifier of the plan to show details for")]
    pub id: u64,
}

impl From<ShowPlanArgs> for Id {
    fn from(val: ShowPlanArgs) -> Self {
        Id { id: val.id }
    }
}

/// Update a plan's properties
///
/// Modify any descriptive field of an existing plan. Only the provided flags
/// are changed; everything else keeps its current value. The plan code is a
/// permanent business key and cannot be updated.
#[derive(Args)]
pub struct UpdatePlanArgs {
    /// ID of the plan to update
    #[arg(help = "Unique identifier of the plan to update")]
    pub id: u64,
    /// Updated name of the plan
    #[arg(short, long)]
    pub name: Option<String>,
    /// Updated equipment tag
    #[arg(short, long)]
    pub equipment: Option<String>,
    /// Updated execution interval in days
    #[arg(short, long)]
    pub frequency_days: Option<u32>,
    /// Updated trigger of the plan
    #[arg(long)]
    pub trigger_type: Option<String>,
    /// Updated maintenance specialty
    #[arg(long)]
    pub specialty: Option<String>,
    /// Updated execution instructions
    #[arg(short, long)]
    pub instructions: Option<String>,
    /// Next scheduled execution as an RFC 3339 timestamp
    #[arg(long, help = "Next scheduled execution, e.g. 2026-09-15T08:00:00Z")]
    pub next_execution: Option<jiff::Timestamp>,
}

impl From<UpdatePlanArgs> for UpdatePlan {
    fn from(val: UpdatePlanArgs) -> Self {
        UpdatePlan {
            id: val.id,
            name: val.name,
            equipment: val.equipment,
            frequency_days: val.frequency_days,
            trigger_type: val.trigger_type,
            specialty: val.specialty,
            instructions: val.instructions,
            next_execution: val.next_execution,
        }
    }
}

/// Deactivate a plan
///
/// Take a plan off the maintenance schedule without deleting it. The plan
/// disappears from the default list but keeps its activities, services, and
/// execution history, and can be restored with the reactivate command.
#[derive(Args)]
pub struct DeactivatePlanArgs {
    /// ID of the plan to deactivate
    #[arg(help = "Unique identifier of the plan to take off the schedule")]
    pub id: u64,
}

impl From<DeactivatePlanArgs> for Id {
    fn from(val: DeactivatePlanArgs) -> Self {
        Id { id: val.id }
    }
}

/// Reactivate a plan
///
/// Put a previously deactivated plan back on the maintenance schedule. The
/// plan and its whole structure are preserved exactly as they were when it
/// was deactivated.
#[derive(Args)]
pub struct ReactivatePlanArgs {
    /// ID of the plan to restore to the schedule
    #[arg(help = "Unique identifier of the inactive plan to restore")]
    pub id: u64,
}

impl From<ReactivatePlanArgs> for Id {
    fn from(val: ReactivatePlanArgs) -> Self {
        Id { id: val.id }
    }
}

/// Delete a plan permanently
#[derive(Args)]
pub struct DeletePlanArgs {
    /// ID of the plan to delete
    #[arg(help = "Unique identifier of the plan to permanently delete")]
    pub id: u64,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

impl From<DeletePlanArgs> for DeletePlan {
    fn from(val: DeletePlanArgs) -> Self {
        DeletePlan {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Create a new maintenance plan
    #[command(alias = "c")]
    Create(CreatePlanArgs),
    /// List maintenance plans
    #[command(aliases = ["l", "ls"])]
    List(ListPlansArgs),
    /// Show details of a specific plan
    #[command(alias = "s")]
    Show(ShowPlanArgs),
    /// Update a plan's properties
    #[command(alias = "u")]
    Update(UpdatePlanArgs),
    /// Deactivate a plan
    #[command(alias = "d")]
    Deactivate(DeactivatePlanArgs),
    /// Reactivate a plan
    #[command(alias = "r")]
    Reactivate(ReactivatePlanArgs),
    /// Delete a plan permanently
    #[command(alias = "rm")]
    Delete(DeletePlanArgs),
}

/// Add a new activity to a plan
///
/// The activity is appended at the end of the plan's activity order. Use the
/// move command to reposition it afterwards.
#[derive(Args)]
pub struct AddActivityArgs {
    /// ID of the plan to add the activity to
    #[arg(help = "Unique identifier of the plan to add this activity to")]
    pub plan_id: u64,
    /// Name of the activity
    pub name: String,
    /// Team or person responsible for the activity
    #[arg(short, long, help = "Team or person responsible for the activity")]
    pub responsible: Option<String>,
}

impl From<AddActivityArgs> for ActivityCreate {
    fn from(val: AddActivityArgs) -> Self {
        ActivityCreate {
            plan_id: val.plan_id,
            name: val.name,
            responsible: val.responsible,
        }
    }
}

/// Show details of a specific activity
///
/// Displays the activity with its position, responsible party, timestamps,
/// and the ordered list of services it contains.
#[derive(Args)]
pub struct ShowActivityArgs {
    #[arg(help = "Unique identifier of the activity to show details for")]
    pub id: u64,
}

impl From<ShowActivityArgs> for Id {
    fn from(val: ShowActivityArgs) -> Self {
        Id { id: val.id }
    }
}

/// List the activities of a plan
#[derive(Args)]
pub struct ListActivitiesArgs {
    /// ID of the plan whose activities to list
    #[arg(help = "Unique identifier of the plan whose activities to list")]
    pub plan_id: u64,
}

impl From<ListActivitiesArgs> for Id {
    fn from(val: ListActivitiesArgs) -> Self {
        Id { id: val.plan_id }
    }
}

/// Update an activity's properties
///
/// Only the provided flags are changed. The position within the plan is
/// managed by the move command and cannot be set here.
#[derive(Args)]
pub struct UpdateActivityArgs {
    #[arg(help = "Unique identifier of the activity to update")]
    pub id: u64,
    /// Updated name of the activity
    #[arg(short, long)]
    pub name: Option<String>,
    /// Updated responsible team or person
    #[arg(short, long)]
    pub responsible: Option<String>,
}

impl From<UpdateActivityArgs> for UpdateActivity {
    fn from(val: UpdateActivityArgs) -> Self {
        UpdateActivity {
            id: val.id,
            name: val.name,
            responsible: val.responsible,
        }
    }
}

/// Move an activity up or down within its plan
///
/// Swaps the activity with its neighbor in the given direction. Moving the
/// first activity up or the last one down leaves the order unchanged.
#[derive(Args)]
pub struct MoveActivityArgs {
    #[arg(help = "Unique identifier of the activity to move")]
    pub id: u64,
    /// Direction to move the activity in
    pub direction: MoveDirectionArg,
}

impl From<MoveActivityArgs> for MoveActivity {
    fn from(val: MoveActivityArgs) -> Self {
        MoveActivity {
            id: val.id,
            direction: val.direction.into(),
        }
    }
}

/// Remove an activity from its plan
///
/// Deletes the activity together with all its services. Activities after the
/// removed one keep their relative order.
#[derive(Args)]
pub struct RemoveActivityArgs {
    #[arg(help = "Unique identifier of the activity to remove")]
    pub id: u64,
}

impl From<RemoveActivityArgs> for Id {
    fn from(val: RemoveActivityArgs) -> Self {
        Id { id: val.id }
    }
}

#[derive(Subcommand)]
pub enum ActivityCommands {
    /// Add a new activity to a plan
    #[command(alias = "a")]
    Add(AddActivityArgs),
    /// List the activities of a plan
    #[command(aliases = ["l", "ls"])]
    List(ListActivitiesArgs),
    /// Show details of a specific activity
    #[command(alias = "s")]
    Show(ShowActivityArgs),
    /// Update an activity's properties
    #[command(alias = "u")]
    Update(UpdateActivityArgs),
    /// Move an activity up or down within its plan
    #[command(alias = "mv")]
    Move(MoveActivityArgs),
    /// Remove an activity and its services
    #[command(alias = "rm")]
    Remove(RemoveActivityArgs),
}

/// Add a new service to an activity
///
/// The service is appended at the end of the activity's service order. The
/// estimated time feeds the plan and execution time totals.
#[derive(Args)]
pub struct AddServiceArgs {
    /// ID of the activity to add the service to
    #[arg(help = "Unique identifier of the activity to add this service to")]
    pub activity_id: u64,
    /// Description of the service
    pub description: String,
    /// Estimated duration in minutes
    #[arg(short = 't', long, help = "Estimated duration in minutes")]
    pub estimated_time_min: Option<u32>,
}

impl From<AddServiceArgs> for ServiceCreate {
    fn from(val: AddServiceArgs) -> Self {
        ServiceCreate {
            activity_id: val.activity_id,
            description: val.description,
            estimated_time_min: val.estimated_time_min,
        }
    }
}

/// Show details of a specific service
#[derive(Args)]
pub struct ShowServiceArgs {
    #[arg(help = "Unique identifier of the service to show details for")]
    pub id: u64,
}

impl From<ShowServiceArgs> for Id {
    fn from(val: ShowServiceArgs) -> Self {
        Id { id: val.id }
    }
}

/// Update a service's properties
///
/// Only the provided flags are changed. The position within the activity is
/// managed by the move command and cannot be set here.
#[derive(Args)]
pub struct UpdateServiceArgs {
    #[arg(help = "Unique identifier of the service to update")]
    pub id: u64,
    /// Updated description of the service
    #[arg(short, long)]
    pub description: Option<String>,
    /// Updated estimated duration in minutes
    #[arg(short = 't', long)]
    pub estimated_time_min: Option<u32>,
}

impl From<UpdateServiceArgs> for UpdateService {
    fn from(val: UpdateServiceArgs) -> Self {
        UpdateService {
            id: val.id,
            description: val.description,
            estimated_time_min: val.estimated_time_min,
        }
    }
}

/// Move a service up or down within its activity
///
/// Swaps the service with its neighbor in the given direction. Moving the
/// first service up or the last one down leaves the order unchanged.
#[derive(Args)]
pub struct MoveServiceArgs {
    #[arg(help = "Unique identifier of the service to move")]
    pub id: u64,
    /// Direction to move the service in
    pub direction: MoveDirectionArg,
}

impl From<MoveServiceArgs> for MoveService {
    fn from(val: MoveServiceArgs) -> Self {
        MoveService {
            id: val.id,
            direction: val.direction.into(),
        }
    }
}

/// Remove a service from its activity
#[derive(Args)]
pub struct RemoveServiceArgs {
    #[arg(help = "Unique identifier of the service to remove")]
    pub id: u64,
}

impl From<RemoveServiceArgs> for Id {
    fn from(val: RemoveServiceArgs) -> Self {
        Id { id: val.id }
    }
}

#[derive(Subcommand)]
pub enum ServiceCommands {
    /// Add a new service to an activity
    #[command(alias = "a")]
    Add(AddServiceArgs),
    /// Show details of a specific service
    #[command(alias = "s")]
    Show(ShowServiceArgs),
    /// Update a service's properties
    #[command(alias = "u")]
    Update(UpdateServiceArgs),
    /// Move a service up or down within its activity
    #[command(alias = "mv")]
    Move(MoveServiceArgs),
    /// Remove a service from its activity
    #[command(alias = "rm")]
    Remove(RemoveServiceArgs),
}

/// Start a new execution of a plan
///
/// Takes a snapshot of the plan's current activities and services as a
/// frozen checklist. Later edits to the plan do not affect executions that
/// are already running.
#[derive(Args)]
pub struct StartExecutionArgs {
    /// ID of the plan to execute
    #[arg(help = "Unique identifier of the plan to execute")]
    pub plan_id: u64,
    /// Who is carrying the execution out
    pub executor: String,
    /// Execution date as an RFC 3339 timestamp
    #[arg(
        short,
        long,
        help = "Execution date as an RFC 3339 timestamp; defaults to now"
    )]
    pub date: Option<jiff::Timestamp>,
    /// Free-form notes recorded with the execution
    #[arg(short, long)]
    pub observations: Option<String>,
}

impl From<StartExecutionArgs> for StartExecution {
    fn from(val: StartExecutionArgs) -> Self {
        StartExecution {
            plan_id: val.plan_id,
            executor: val.executor,
            execution_date: val.date,
            observations: val.observations,
        }
    }
}

/// Show details of a specific execution
///
/// Displays the execution's status, executor, dates, notes, and the full
/// checklist with each item's completion state.
#[derive(Args)]
pub struct ShowExecutionArgs {
    #[arg(help = "Unique identifier of the execution to show details for")]
    pub id: u64,
}

impl From<ShowExecutionArgs> for Id {
    fn from(val: ShowExecutionArgs) -> Self {
        Id { id: val.id }
    }
}

/// List executions
///
/// Shows all executions by default, most recent first. Use the flags to
/// narrow the list down to one plan or one status.
#[derive(Args)]
pub struct ListExecutionsArgs {
    /// Only executions of this plan
    #[arg(short, long, help = "Only executions of this plan")]
    pub plan_id: Option<u64>,
    /// Only executions with this status
    #[arg(
        short,
        long,
        help = "Only executions with this status (em_andamento, concluida, cancelada)"
    )]
    pub status: Option<String>,
}

impl From<ListExecutionsArgs> for ListExecutions {
    fn from(val: ListExecutionsArgs) -> Self {
        ListExecutions {
            plan_id: val.plan_id,
            status: val.status,
        }
    }
}

/// Mark a checklist item as completed
#[derive(Args)]
pub struct CheckItemArgs {
    /// ID of the execution owning the checklist
    #[arg(help = "Unique identifier of the execution owning the checklist")]
    pub execution_id: u64,
    /// Position of the item within the checklist (1-indexed)
    #[arg(help = "1-based position of the checklist item")]
    pub position: u32,
}

impl From<CheckItemArgs> for SetChecklistItem {
    fn from(val: CheckItemArgs) -> Self {
        SetChecklistItem {
            execution_id: val.execution_id,
            position: val.position,
            completed: true,
        }
    }
}

/// Mark a checklist item as not completed
#[derive(Args)]
pub struct UncheckItemArgs {
    /// ID of the execution owning the checklist
    #[arg(help = "Unique identifier of the execution owning the checklist")]
    pub execution_id: u64,
    /// Position of the item within the checklist (1-indexed)
    #[arg(help = "1-based position of the checklist item")]
    pub position: u32,
}

impl From<UncheckItemArgs> for SetChecklistItem {
    fn from(val: UncheckItemArgs) -> Self {
        SetChecklistItem {
            execution_id: val.execution_id,
            position: val.position,
            completed: false,
        }
    }
}

/// Finish an execution
///
/// Closes the execution as completed. Once finished, the checklist can no
/// longer be modified.
#[derive(Args)]
pub struct FinishExecutionArgs {
    #[arg(help = "Unique identifier of the execution to finish")]
    pub id: u64,
    /// Final notes recorded by the executor
    #[arg(short, long)]
    pub observations: Option<String>,
    /// Actual duration of the execution in minutes
    #[arg(short = 't', long, help = "Actual duration of the execution in minutes")]
    pub real_time_min: Option<u32>,
}

impl From<FinishExecutionArgs> for FinishExecution {
    fn from(val: FinishExecutionArgs) -> Self {
        FinishExecution {
            id: val.id,
            observations: val.observations,
            real_time_min: val.real_time_min,
        }
    }
}

/// Cancel an execution
///
/// Closes the execution as cancelled, keeping whatever checklist progress was
/// made. Once cancelled, the checklist can no longer be modified.
#[derive(Args)]
pub struct CancelExecutionArgs {
    #[arg(help = "Unique identifier of the execution to cancel")]
    pub id: u64,
    /// Notes on why the execution was aborted
    #[arg(short, long)]
    pub observations: Option<String>,
}

impl From<CancelExecutionArgs> for CancelExecution {
    fn from(val: CancelExecutionArgs) -> Self {
        CancelExecution {
            id: val.id,
            observations: val.observations,
        }
    }
}

#[derive(Subcommand)]
pub enum ExecutionCommands {
    /// Start a new execution of a plan
    #[command(alias = "st")]
    Start(StartExecutionArgs),
    /// List executions
    #[command(aliases = ["l", "ls"])]
    List(ListExecutionsArgs),
    /// Show details of a specific execution
    #[command(alias = "s")]
    Show(ShowExecutionArgs),
    /// Mark a checklist item as completed
    #[command(alias = "c")]
    Check(CheckItemArgs),
    /// Mark a checklist item as not completed
    #[command(alias = "u")]
    Uncheck(UncheckItemArgs),
    /// Finish an execution
    #[command(alias = "f")]
    Finish(FinishExecutionArgs),
    /// Cancel an execution
    #[command(alias = "x")]
    Cancel(CancelExecutionArgs),
}

/// Capture a plan's structure as a reusable template
///
/// Copies the plan's current activities and services into an immutable
/// template. The template keeps no link to the source plan.
#[derive(Args)]
pub struct CaptureTemplateArgs {
    /// ID of the plan to capture
    #[arg(help = "Unique identifier of the plan whose structure to capture")]
    pub plan_id: u64,
    /// Name of the new template
    pub name: String,
    /// Description of what the template is for
    #[arg(short, long)]
    pub description: Option<String>,
}

impl From<CaptureTemplateArgs> for CaptureTemplate {
    fn from(val: CaptureTemplateArgs) -> Self {
        CaptureTemplate {
            plan_id: val.plan_id,
            name: val.name,
            description: val.description,
        }
    }
}

/// Show details of a specific template
#[derive(Args)]
pub struct ShowTemplateArgs {
    #[arg(help = "Unique identifier of the template to show details for")]
    pub id: u64,
}

impl From<ShowTemplateArgs> for Id {
    fn from(val: ShowTemplateArgs) -> Self {
        Id { id: val.id }
    }
}

/// Apply a template to a plan
///
/// Recreates the template's activities and services under the target plan
/// with fresh IDs. Anything already in the plan is kept.
#[derive(Args)]
pub struct ApplyTemplateArgs {
    /// ID of the template to apply
    #[arg(help = "Unique identifier of the template to apply")]
    pub template_id: u64,
    /// ID of the plan to recreate the structure under
    #[arg(help = "Unique identifier of the plan to recreate the structure under")]
    pub plan_id: u64,
}

impl From<ApplyTemplateArgs> for ApplyTemplate {
    fn from(val: ApplyTemplateArgs) -> Self {
        ApplyTemplate {
            template_id: val.template_id,
            plan_id: val.plan_id,
        }
    }
}

/// Delete a template permanently
///
/// Plans that were created from the template are not affected.
#[derive(Args)]
pub struct DeleteTemplateArgs {
    #[arg(help = "Unique identifier of the template to permanently delete")]
    pub id: u64,
}

impl From<DeleteTemplateArgs> for Id {
    fn from(val: DeleteTemplateArgs) -> Self {
        Id { id: val.id }
    }
}

#[derive(Subcommand)]
pub enum TemplateCommands {
    /// Capture a plan's structure as a reusable template
    #[command(alias = "c")]
    Capture(CaptureTemplateArgs),
    /// List all templates
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show details of a specific template
    #[command(alias = "s")]
    Show(ShowTemplateArgs),
    /// Apply a template to a plan
    #[command(alias = "a")]
    Apply(ApplyTemplateArgs),
    /// Delete a template permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteTemplateArgs),
}

/// Command-line argument representation of a reorder direction
///
/// Converts between the user-facing `up`/`down` argument values and the core
/// MoveDirection enum used by the move operations.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum MoveDirectionArg {
    /// Swap with the previous sibling
    Up,
    /// Swap with the next sibling
    Down,
}

impl From<MoveDirectionArg> for MoveDirection {
    fn from(val: MoveDirectionArg) -> Self {
        match val {
            MoveDirectionArg::Up => MoveDirection::Up,
            MoveDirectionArg::Down => MoveDirection::Down,
        }
    }
}

fn direction_word(direction: MoveDirection) -> &'static str {
    match direction {
        MoveDirection::Up => "up",
        MoveDirection::Down => "down",
    }
}

/// Command runner tying the planner to the terminal renderer
///
/// Each handle method converts the clap arguments into core parameters,
/// invokes the matching planner handler, and renders the resulting display
/// type. Lookups of missing resources fail with a non-zero exit code.
pub struct Cli {
    planner: Planner,
    renderer: TerminalRenderer,
}

impl Cli {
    /// Create a new command runner
    pub fn new(planner: Planner, renderer: TerminalRenderer) -> Self {
        Self { planner, renderer }
    }

    /// List plans with the given filters and render the result
    ///
    /// Also serves as the default action when the CLI is invoked without a
    /// command.
    pub async fn list_plans(&self, params: &ListPlans) -> Result<()> {
        let summaries = self.planner.list_plans_summary(params).await?;

        if summaries.is_empty() {
            self.renderer.render(&summaries.to_string())
        } else {
            let title = if params.inactive {
                "Inactive Plans"
            } else {
                "Active Plans"
            };
            self.renderer
                .render(&format!("# {}\n\n{}", title, summaries))
        }
    }

    /// Dispatch a plan subcommand
    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::Create(args) => {
                let params: CreatePlan = args.into();
                let plan = self.planner.create_plan_result(&params).await?;
                self.renderer.render(&CreateResult::new(plan).to_string())
            }
            PlanCommands::List(args) => {
                let params: ListPlans = args.into();
                self.list_plans(&params).await
            }
            PlanCommands::Show(args) => {
                let params: Id = args.into();
                match self.planner.show_plan_with_activities(&params).await? {
                    Some(plan) => self.renderer.render(&plan.to_string()),
                    None => bail!("Plan with ID {} not found", params.id),
                }
            }
            PlanCommands::Update(args) => {
                let params: UpdatePlan = args.into();
                let plan = self.planner.update_plan_validated(&params).await?;
                self.renderer.render(&UpdateResult::new(plan).to_string())
            }
            PlanCommands::Deactivate(args) => {
                let params: Id = args.into();
                match self.planner.deactivate_plan(&params).await? {
                    Some(_) => {
                        let status = OperationStatus::success(format!(
                            "Deactivated plan with ID {}. Use 'plan reactivate' to restore it.",
                            params.id
                        ));
                        self.renderer.render(&status.to_string())
                    }
                    None => bail!("Plan with ID {} not found", params.id),
                }
            }
            PlanCommands::Reactivate(args) => {
                let params: Id = args.into();
                match self.planner.reactivate_plan(&params).await? {
                    Some(_) => {
                        let status = OperationStatus::success(format!(
                            "Reactivated plan with ID {}. Plan is back on the schedule.",
                            params.id
                        ));
                        self.renderer.render(&status.to_string())
                    }
                    None => bail!("Plan with ID {} not found", params.id),
                }
            }
            PlanCommands::Delete(args) => {
                let params: DeletePlan = args.into();
                match self.planner.delete_plan(&params).await? {
                    Some(plan) => self.renderer.render(&DeleteResult::new(plan).to_string()),
                    None => bail!("Plan with ID {} not found", params.id),
                }
            }
        }
    }

    /// Dispatch an activity subcommand
    pub async fn handle_activity_command(&self, command: ActivityCommands) -> Result<()> {
        match command {
            ActivityCommands::Add(args) => {
                let params: ActivityCreate = args.into();
                let activity = self.planner.add_activity_to_plan(&params).await?;
                self.renderer
                    .render(&CreateResult::new(activity).to_string())
            }
            ActivityCommands::List(args) => {
                let params: Id = args.into();
                let activities = self.planner.list_plan_activities(&params).await?;

                if activities.is_empty() {
                    self.renderer.render(&activities.to_string())
                } else {
                    self.renderer.render(&format!(
                        "# Activities for Plan {}\n\n{}",
                        params.id, activities
                    ))
                }
            }
            ActivityCommands::Show(args) => {
                let params: Id = args.into();
                match self.planner.show_activity_details(&params).await? {
                    Some(activity) => self.renderer.render(&activity.to_string()),
                    None => bail!("Activity with ID {} not found", params.id),
                }
            }
            ActivityCommands::Update(args) => {
                let params: UpdateActivity = args.into();
                let activity = self.planner.update_activity_validated(&params).await?;
                self.renderer
                    .render(&UpdateResult::new(activity).to_string())
            }
            ActivityCommands::Move(args) => {
                let params: MoveActivity = args.into();
                let activity = self.planner.move_activity_position(&params).await?;
                let status = OperationStatus::success(format!(
                    "Moved activity {} {}. It is now at position {}.",
                    params.id,
                    direction_word(params.direction),
                    activity.order
                ));
                self.renderer.render(&status.to_string())
            }
            ActivityCommands::Remove(args) => {
                let params: Id = args.into();
                match self.planner.remove_activity_from_plan(&params).await? {
                    Some(activity) => self
                        .renderer
                        .render(&DeleteResult::new(activity).to_string()),
                    None => bail!("Activity with ID {} not found", params.id),
                }
            }
        }
    }

    /// Dispatch a service subcommand
    pub async fn handle_service_command(&self, command: ServiceCommands) -> Result<()> {
        match command {
            ServiceCommands::Add(args) => {
                let params: ServiceCreate = args.into();
                let service = self.planner.add_service_to_activity(&params).await?;
                self.renderer.render(&CreateResult::new(service).to_string())
            }
            ServiceCommands::Show(args) => {
                let params: Id = args.into();
                match self.planner.show_service_details(&params).await? {
                    Some(service) => self.renderer.render(&service.to_string()),
                    None => bail!("Service with ID {} not found", params.id),
                }
            }
            ServiceCommands::Update(args) => {
                let params: UpdateService = args.into();
                let service = self.planner.update_service_validated(&params).await?;
                self.renderer.render(&UpdateResult::new(service).to_string())
            }
            ServiceCommands::Move(args) => {
                let params: MoveService = args.into();
                let service = self.planner.move_service_position(&params).await?;
                let status = OperationStatus::success(format!(
                    "Moved service {} {}. It is now at position {}.",
                    params.id,
                    direction_word(params.direction),
                    service.order
                ));
                self.renderer.render(&status.to_string())
            }
            ServiceCommands::Remove(args) => {
                let params: Id = args.into();
                match self.planner.remove_service_from_activity(&params).await? {
                    Some(service) => self.renderer.render(&DeleteResult::new(service).to_string()),
                    None => bail!("Service with ID {} not found", params.id),
                }
            }
        }
    }

    /// Dispatch an execution subcommand
    pub async fn handle_execution_command(&self, command: ExecutionCommands) -> Result<()> {
        match command {
            ExecutionCommands::Start(args) => {
                let params: StartExecution = args.into();
                let execution = self.planner.start_execution_result(&params).await?;
                self.renderer
                    .render(&CreateResult::new(execution).to_string())
            }
            ExecutionCommands::List(args) => {
                let params: ListExecutions = args.into();
                let executions = self.planner.list_executions_filtered(&params).await?;

                if executions.is_empty() {
                    self.renderer.render(&executions.to_string())
                } else {
                    self.renderer
                        .render(&format!("# Executions\n\n{}", executions))
                }
            }
            ExecutionCommands::Show(args) => {
                let params: Id = args.into();
                match self.planner.show_execution_details(&params).await? {
                    Some(execution) => self.renderer.render(&execution.to_string()),
                    None => bail!("Execution with ID {} not found", params.id),
                }
            }
            ExecutionCommands::Check(args) => {
                let params: SetChecklistItem = args.into();
                let execution = self.planner.set_checklist_item_validated(&params).await?;
                let status = OperationStatus::success(format!(
                    "Checked item {} of execution {} ({} of {} done).",
                    params.position,
                    params.execution_id,
                    execution.completed_items(),
                    execution.checklist.len()
                ));
                self.renderer.render(&status.to_string())
            }
            ExecutionCommands::Uncheck(args) => {
                let params: SetChecklistItem = args.into();
                let execution = self.planner.set_checklist_item_validated(&params).await?;
                let status = OperationStatus::success(format!(
                    "Unchecked item {} of execution {} ({} of {} done).",
                    params.position,
                    params.execution_id,
                    execution.completed_items(),
                    execution.checklist.len()
                ));
                self.renderer.render(&status.to_string())
            }
            ExecutionCommands::Finish(args) => {
                let params: FinishExecution = args.into();
                let execution = self.planner.finish_execution_result(&params).await?;
                let status = OperationStatus::success(format!(
                    "Finished execution {} ({} of {} items completed).",
                    params.id,
                    execution.completed_items(),
                    execution.checklist.len()
                ));
                self.renderer.render(&status.to_string())
            }
            ExecutionCommands::Cancel(args) => {
                let params: CancelExecution = args.into();
                let execution = self.planner.cancel_execution_result(&params).await?;
                let status = OperationStatus::success(format!(
                    "Cancelled execution {} ({} of {} items were completed).",
                    params.id,
                    execution.completed_items(),
                    execution.checklist.len()
                ));
                self.renderer.render(&status.to_string())
            }
        }
    }

    /// Dispatch a template subcommand
    pub async fn handle_template_command(&self, command: TemplateCommands) -> Result<()> {
        match command {
            TemplateCommands::Capture(args) => {
                let params: CaptureTemplate = args.into();
                let template = self.planner.capture_template_result(&params).await?;
                self.renderer
                    .render(&CreateResult::new(template).to_string())
            }
            TemplateCommands::List => {
                let templates = self.planner.list_templates_summary().await?;

                if templates.is_empty() {
                    self.renderer.render(&templates.to_string())
                } else {
                    self.renderer
                        .render(&format!("# Templates\n\n{}", templates))
                }
            }
            TemplateCommands::Show(args) => {
                let params: Id = args.into();
                match self.planner.show_template_details(&params).await? {
                    Some(template) => self.renderer.render(&template.to_string()),
                    None => bail!("Template with ID {} not found", params.id),
                }
            }
            TemplateCommands::Apply(args) => {
                let params: ApplyTemplate = args.into();
                let plan = self.planner.apply_template_to_plan(&params).await?;
                let status = OperationStatus::success(format!(
                    "Applied template {} to plan {}.",
                    params.template_id, params.plan_id
                ));
                self.renderer.render(&format!("{}\n{}", status, plan))
            }
            TemplateCommands::Delete(args) => {
                let params: Id = args.into();
                match self.planner.delete_template(&params).await? {
                    Some(template) => self
                        .renderer
                        .render(&DeleteResult::new(template).to_string()),
                    None => bail!("Template with ID {} not found", params.id),
                }
            }
        }
    }
}
