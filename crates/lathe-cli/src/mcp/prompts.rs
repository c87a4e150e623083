//! Prompt templates for MCP server

/// Argument definition for a prompt template
#[derive(Debug, Clone)]
pub struct PromptTemplateArg {
    pub name: String,
    pub description: String,
    pub required: bool,
}

/// Definition of a prompt template
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    pub name: String,
    pub description: String,
    pub template: String,
    pub arguments: Vec<PromptTemplateArg>,
}

/// Get predefined prompt templates for maintenance planning
pub fn get_prompt_templates() -> Vec<PromptTemplate> {
    vec![
        PromptTemplate {
            name: "plan".to_string(),
            description: "Draft a structured preventive maintenance plan using Lathe's MCP tools"
                .to_string(),
            template: r#"You are **Lathe Planner**, expert at structuring preventive maintenance plans.

# Equipment
{equipment}

# Your Task
Build a complete preventive maintenance plan for this equipment using Lathe's MCP tools.

# Step 1: Check Existing Plans
Use `list_plans` to check whether a plan already covers this equipment. If one does, consider extending it instead of creating a duplicate.

# Step 2: Create the Plan
Use `create_plan` with:
- **code**: Short unique business code (e.g. PREV-021)
- **name**: What the plan maintains and how often (e.g. "Monthly lubrication - Pump P-101")
- **frequency_days**: Interval between executions in days
- **equipment**: The equipment tag
- **specialty**: Maintenance specialty if known (mecanica, eletrica, ...)
- **instructions**: Safety notes and anything the executor must know up front

# Step 3: Structure the Work
For each phase of the maintenance round, use `add_activity` with the plan_id, then `add_service` for each hands-on task inside it.

## Structure Guidelines

Activities group related work, in execution order:
- Preparation (isolation, lockout, draining)
- Inspection (visual checks, measurements)
- Intervention (lubrication, replacement, adjustment)
- Closing (reassembly, test run, housekeeping)

Each service should be:
- **Atomic**: One physical task an executor can tick off
- **Concrete**: Names the component and the action
- **Estimated**: Include estimated_time_min whenever a reasonable figure exists

# Step 4: Review
Use `show_plan` to review the full tree. Check that:
- Activities are in the order they would physically happen
- No service mixes two unrelated tasks
- The total estimated time is realistic for one maintenance round

If this structure will repeat on similar equipment, capture it with `capture_template` so it can be applied to future plans."#
                .to_string(),
            arguments: vec![PromptTemplateArg {
                name: "equipment".to_string(),
                description: "The equipment to build a maintenance plan for".to_string(),
                required: true,
            }],
        },
        PromptTemplate {
            name: "execute".to_string(),
            description: "Run one maintenance round of a plan with checklist discipline"
                .to_string(),
            template: r#"You are carrying out one maintenance round of a Lathe plan.

# Plan to Execute
Plan ID: {plan_id}

# Execution Strategy

## 1. Review the Plan
Use `show_plan` to read the full structure, the instructions, and the estimated times before touching anything.

## 2. Start the Execution
Use `start_execution` with the plan_id and the executor's name. This freezes the plan's current structure as a checklist; later plan edits will not affect this round.

## 3. Work the Checklist
For each item, in order:
- Perform the task described
- Mark it with `set_checklist_item` (completed=true) immediately after finishing it
- If an item turns out to be wrong or impossible, leave it unticked and note why in the observations

Use `show_execution` at any point to see progress.

## 4. Close the Round
- If the round was carried out: use `finish_execution` with observations summarizing findings (wear, leaks, anomalies) and real_time_min with the actual duration
- If the round had to be aborted: use `cancel_execution` with observations explaining why; ticked items are preserved

## Rules
- Never tick an item before the task is physically done
- Record anomalies in observations even when every item was completed
- Compare real_time_min against the estimate and mention significant deviations"#
                .to_string(),
            arguments: vec![PromptTemplateArg {
                name: "plan_id".to_string(),
                description: "The ID of the plan to execute".to_string(),
                required: true,
            }],
        },
    ]
}
