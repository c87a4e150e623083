//! Integration tests comparing CLI and direct Display implementations
//!
//! This test suite verifies that CLI output uses the same Display traits
//! that the MCP server returns, so both surfaces stay in sync.

use std::process::Command;

use lathe_core::{display::CreateResult, params, Planner, PlannerBuilder};
use tempfile::TempDir;

/// Helper function to create a test planner with temporary database
async fn create_test_planner() -> (Planner, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let db_path = temp_dir.path().join("test.db");

    let planner = PlannerBuilder::new()
        .with_database_path(Some(db_path))
        .build()
        .await
        .expect("Failed to create planner");

    (planner, temp_dir)
}

/// Run a CLI command and capture its output
fn run_cli_command(db_path: &str, args: &[&str]) -> String {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_lt"));
    cmd.arg("--no-color").arg("--database-file").arg(db_path);

    for arg in args {
        cmd.arg(arg);
    }

    let output = cmd.output().expect("Failed to run CLI command");
    String::from_utf8(output.stdout).expect("Invalid UTF-8 in CLI output")
}

/// Test that plan creation has consistent output between CLI and direct Display
/// impl
#[tokio::test]
async fn test_plan_display_consistency() {
    let (planner, temp_dir) = create_test_planner().await;
    let db_path = temp_dir.path().join("test.db");
    let db_str = db_path.to_str().unwrap();

    // Create plan via CLI
    let cli_output = run_cli_command(
        db_str,
        &[
            "plan",
            "create",
            "PREV-A1",
            "Integration Test Plan",
            "--frequency-days",
            "30",
            "--equipment",
            "Press P-300",
        ],
    );

    // Create plan via direct planner call
    let plan_params = params::CreatePlan {
        code: "PREV-A2".to_string(),
        name: "Integration Test Plan Direct".to_string(),
        equipment: Some("Press P-300".to_string()),
        frequency_days: 30,
        ..Default::default()
    };

    let plan = planner
        .create_plan_result(&plan_params)
        .await
        .expect("Failed to create plan");
    let result = CreateResult::new(plan);
    let direct_output = result.to_string();

    // Both outputs should contain the same structure (ignoring specific IDs and
    // timestamps)
    assert!(cli_output.contains("Created plan with ID:"));
    assert!(direct_output.contains("Created plan with ID:"));
    assert!(cli_output.contains("Integration Test Plan"));
    assert!(direct_output.contains("Integration Test Plan Direct"));
    assert!(cli_output.contains("Press P-300"));
    assert!(direct_output.contains("Press P-300"));
    assert!(cli_output.contains("every 30 days"));
    assert!(direct_output.contains("every 30 days"));
}

/// Test that activity creation has consistent output format
#[tokio::test]
async fn test_activity_display_consistency() {
    let (planner, temp_dir) = create_test_planner().await;
    let db_path = temp_dir.path().join("test.db");
    let db_str = db_path.to_str().unwrap();

    // Create a plan first via CLI
    let _plan_output = run_cli_command(
        db_str,
        &[
            "plan",
            "create",
            "PREV-B1",
            "Activity Test Plan",
            "--frequency-days",
            "15",
        ],
    );

    // Add activity via CLI
    let cli_output = run_cli_command(
        db_str,
        &[
            "activity",
            "add",
            "1",
            "Visual inspection",
            "--responsible",
            "Mechanical team",
        ],
    );

    // Create plan and activity via direct planner call
    let plan_params = params::CreatePlan {
        code: "PREV-B2".to_string(),
        name: "Direct Activity Test Plan".to_string(),
        frequency_days: 15,
        ..Default::default()
    };

    let plan = planner
        .create_plan_result(&plan_params)
        .await
        .expect("Failed to create plan");

    let activity_params = params::ActivityCreate {
        plan_id: plan.id,
        name: "Visual inspection".to_string(),
        responsible: Some("Mechanical team".to_string()),
    };

    let activity = planner
        .add_activity_to_plan(&activity_params)
        .await
        .expect("Failed to add activity");
    let result = CreateResult::new(activity);
    let direct_output = result.to_string();

    // Both outputs should have the same structure
    assert!(cli_output.contains("Created activity with ID:"));
    assert!(direct_output.contains("Created activity with ID:"));
    assert!(cli_output.contains("Visual inspection"));
    assert!(direct_output.contains("Visual inspection"));
    assert!(cli_output.contains("Mechanical team"));
    assert!(direct_output.contains("Mechanical team"));
}

/// Test list plan output consistency
#[tokio::test]
async fn test_list_plans_consistency() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let db_path = temp_dir.path().join("test.db");
    let db_str = db_path.to_str().unwrap();

    // Create some plans via CLI
    let _output1 = run_cli_command(
        db_str,
        &[
            "plan",
            "create",
            "PREV-C1",
            "List Test Plan 1",
            "--frequency-days",
            "30",
        ],
    );
    let _output2 = run_cli_command(
        db_str,
        &[
            "plan",
            "create",
            "PREV-C2",
            "List Test Plan 2",
            "--frequency-days",
            "60",
            "--equipment",
            "Boiler B-2",
        ],
    );

    // List plans via CLI
    let cli_output = run_cli_command(db_str, &["plan", "list"]);

    // List plans directly from the same database, formatted the way the MCP
    // server formats them
    let planner = PlannerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create planner");

    let summaries = planner
        .list_plans_summary(&params::ListPlans::default())
        .await
        .expect("Failed to list plans");
    let direct_output = format!("# Active Plans\n\n{}", summaries);

    // Both should have similar structure
    assert!(cli_output.contains("# Active Plans"));
    assert!(direct_output.contains("# Active Plans"));
    assert!(cli_output.contains("List Test Plan 1"));
    assert!(direct_output.contains("List Test Plan 1"));
    assert!(cli_output.contains("List Test Plan 2"));
    assert!(direct_output.contains("List Test Plan 2"));
    assert!(cli_output.contains("ID:"));
    assert!(direct_output.contains("ID:"));

    // The core formatting should be identical
    assert_eq!(cli_output.trim(), direct_output.trim());
}

/// Test empty list output consistency
#[tokio::test]
async fn test_empty_list_consistency() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let db_path = temp_dir.path().join("test.db");
    let db_str = db_path.to_str().unwrap();

    // List empty plans via CLI
    let cli_output = run_cli_command(db_str, &["plan", "list"]);

    // Format the empty collection directly
    let direct_output = lathe_core::display::PlanSummaries(vec![]).to_string();

    // Both should have the same empty structure
    assert!(cli_output.contains("No plans found."));
    assert!(direct_output.contains("No plans found."));
    assert_eq!(cli_output.trim(), direct_output.trim());
}

/// Test CLI vs MCP-style show plan output
#[tokio::test]
async fn test_cli_vs_mcp_show_plan_output() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let db_path = temp_dir.path().join("test.db");
    let db_str = db_path.to_str().unwrap();

    // Create plan with an activity and service via CLI
    let _plan_output = run_cli_command(
        db_str,
        &[
            "plan",
            "create",
            "PREV-D1",
            "MCP Show Plan",
            "--frequency-days",
            "30",
            "--instructions",
            "Plan for MCP comparison testing",
        ],
    );

    let _activity_output = run_cli_command(db_str, &["activity", "add", "1", "Preparation"]);

    let _service_output = run_cli_command(
        db_str,
        &[
            "service",
            "add",
            "1",
            "Isolate the equipment",
            "--estimated-time-min",
            "5",
        ],
    );

    // Get CLI show output
    let cli_show = run_cli_command(db_str, &["plan", "show", "1"]);

    // Simulate MCP server show_plan behavior
    let planner = PlannerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create planner");

    let params = params::Id { id: 1 };
    let plan = planner
        .show_plan_with_activities(&params)
        .await
        .expect("Failed to get plan")
        .expect("Plan not found");

    let mcp_show = plan.to_string();

    // Both outputs should be identical since they use the same Display impl
    assert_eq!(cli_show.trim(), mcp_show.trim());
    assert!(cli_show.contains("# 1. MCP Show Plan"));
    assert!(cli_show.contains("## Activities"));
    assert!(cli_show.contains("Isolate the equipment"));
}

/// Test CLI vs MCP-style show execution output
#[tokio::test]
async fn test_cli_vs_mcp_show_execution_output() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let db_path = temp_dir.path().join("test.db");
    let db_str = db_path.to_str().unwrap();

    // Build a small plan tree and start an execution via CLI
    let _plan_output = run_cli_command(
        db_str,
        &[
            "plan",
            "create",
            "PREV-E1",
            "Execution Comparison Plan",
            "--frequency-days",
            "30",
        ],
    );
    let _activity_output = run_cli_command(db_str, &["activity", "add", "1", "Inspection"]);
    let _service_output = run_cli_command(
        db_str,
        &[
            "service",
            "add",
            "1",
            "Check belt tension",
            "--estimated-time-min",
            "10",
        ],
    );
    let _start_output = run_cli_command(db_str, &["execution", "start", "1", "Alice"]);

    // Tick the first item so the shown state is not trivial
    let _check_output = run_cli_command(db_str, &["execution", "check", "1", "1"]);

    // Get CLI show execution output
    let cli_execution = run_cli_command(db_str, &["execution", "show", "1"]);

    // Simulate MCP server show_execution behavior
    let planner = PlannerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create planner");

    let params = params::Id { id: 1 };
    let execution = planner
        .show_execution_details(&params)
        .await
        .expect("Failed to get execution")
        .expect("Execution not found");

    let mcp_execution = execution.to_string();

    // Both outputs should be identical since they use the same Display impl
    assert_eq!(cli_execution.trim(), mcp_execution.trim());
    assert!(cli_execution.contains("# Execution 1"));
    assert!(cli_execution.contains("Progress: 1/1 items"));
    assert!(cli_execution.contains("[x] 1. Inspection: Check belt tension"));
}

/// Test CLI vs MCP-style show template output
#[tokio::test]
async fn test_cli_vs_mcp_show_template_output() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let db_path = temp_dir.path().join("test.db");
    let db_str = db_path.to_str().unwrap();

    // Build a plan tree and capture it as a template via CLI
    let _plan_output = run_cli_command(
        db_str,
        &[
            "plan",
            "create",
            "PREV-F1",
            "Template Comparison Plan",
            "--frequency-days",
            "30",
        ],
    );
    let _activity_output = run_cli_command(db_str, &["activity", "add", "1", "Closing"]);
    let _service_output = run_cli_command(
        db_str,
        &["service", "add", "1", "Remove the lockout tags"],
    );
    let _capture_output = run_cli_command(
        db_str,
        &[
            "template",
            "capture",
            "1",
            "Standard Closing",
            "--description",
            "Closing phase shared by all rounds",
        ],
    );

    // Get CLI show template output
    let cli_template = run_cli_command(db_str, &["template", "show", "1"]);

    // Simulate MCP server show_template behavior
    let planner = PlannerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create planner");

    let params = params::Id { id: 1 };
    let template = planner
        .show_template_details(&params)
        .await
        .expect("Failed to get template")
        .expect("Template not found");

    let mcp_template = template.to_string();

    // Both outputs should be identical since they use the same Display impl
    assert_eq!(cli_template.trim(), mcp_template.trim());
    assert!(cli_template.contains("# 1. Standard Closing"));
    assert!(cli_template.contains("## Structure"));
    assert!(cli_template.contains("Remove the lockout tags"));
}
