use lathe_core::{ExecutionFilter, ExecutionStatus, PlanFilter, PlanStatus, PlannerBuilder};
use tempfile::TempDir;

mod common;

#[tokio::test]
#[allow(clippy::too_many_lines)]
async fn test_complete_maintenance_workflow() {
    let (_temp_dir, planner) = common::create_test_planner().await;

    // Create a plan
    let plan = planner
        .create_plan(&lathe_core::params::CreatePlan {
            code: "PREV-01".to_string(),
            name: "Monthly lathe maintenance".to_string(),
            equipment: Some("LATHE-7".to_string()),
            frequency_days: 30,
            ..Default::default()
        })
        .await
        .expect("Failed to create plan");

    // Build the activity tree
    let lubrication = planner
        .add_activity(&lathe_core::params::ActivityCreate {
            plan_id: plan.id,
            name: "Lubrication".to_string(),
            responsible: Some("Carlos Lima".to_string()),
        })
        .await
        .expect("Failed to add activity");
    let inspection = planner
        .add_activity(&lathe_core::params::ActivityCreate {
            plan_id: plan.id,
            name: "Inspection".to_string(),
            responsible: None,
        })
        .await
        .expect("Failed to add activity");

    planner
        .add_service(&lathe_core::params::ServiceCreate {
            activity_id: lubrication.id,
            description: "Check oil level".to_string(),
            estimated_time_min: Some(10),
        })
        .await
        .expect("Failed to add service");
    planner
        .add_service(&lathe_core::params::ServiceCreate {
            activity_id: lubrication.id,
            description: "Grease bearings".to_string(),
            estimated_time_min: Some(5),
        })
        .await
        .expect("Failed to add service");
    planner
        .add_service(&lathe_core::params::ServiceCreate {
            activity_id: inspection.id,
            description: "Check belt tension".to_string(),
            estimated_time_min: None,
        })
        .await
        .expect("Failed to add service");

    // Verify activity ordering
    let activities = planner
        .get_activities(&lathe_core::params::Id { id: plan.id })
        .await
        .expect("Failed to get activities");
    assert_eq!(activities.len(), 2);
    assert_eq!(activities.0[0].order, 1);
    assert_eq!(activities.0[1].order, 2);
    assert_eq!(activities.0[0].services.len(), 2);

    // Start an execution; the checklist snapshots the tree
    let execution = planner
        .start_execution(&lathe_core::params::StartExecution {
            plan_id: plan.id,
            executor: "Ana Souza".to_string(),
            ..Default::default()
        })
        .await
        .expect("Failed to start execution");
    assert_eq!(execution.status, ExecutionStatus::EmAndamento);
    assert_eq!(execution.checklist.len(), 3);
    assert_eq!(execution.estimated_time_min(), 15);

    // Work through the checklist
    for position in 1..=3 {
        planner
            .set_checklist_item(&lathe_core::params::SetChecklistItem {
                execution_id: execution.id,
                position,
                completed: true,
            })
            .await
            .expect("Failed to set checklist item");
    }

    let in_progress = planner
        .get_execution(&lathe_core::params::Id { id: execution.id })
        .await
        .expect("Failed to get execution")
        .expect("Execution should exist");
    assert_eq!(in_progress.completed_items(), 3);

    // Close the execution with the real figures
    let finished = planner
        .finish_execution(&lathe_core::params::FinishExecution {
            id: execution.id,
            observations: Some("All items checked.".to_string()),
            real_time_min: Some(50),
        })
        .await
        .expect("Failed to finish execution");
    assert_eq!(finished.status, ExecutionStatus::Concluida);
    assert_eq!(finished.real_time_min, Some(50));

    // The execution shows up under the finished filter
    let finished_list = planner
        .list_executions(Some(ExecutionFilter {
            plan_id: Some(plan.id),
            status: Some(ExecutionStatus::Concluida),
        }))
        .await
        .expect("Failed to list executions");
    assert_eq!(finished_list.len(), 1);
    assert_eq!(finished_list[0].id, execution.id);
}

#[tokio::test]
async fn test_database_persistence_across_connections() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let db_path = temp_dir.path().join("test_plans.db");

    let plan_id = {
        // Create planner and plan in first connection
        let planner = PlannerBuilder::new()
            .with_database_path(Some(db_path.clone()))
            .build()
            .await
            .expect("Failed to create first planner");

        let plan = planner
            .create_plan(&lathe_core::params::CreatePlan {
                code: "PREV-01".to_string(),
                name: "Monthly lathe maintenance".to_string(),
                frequency_days: 30,
                ..Default::default()
            })
            .await
            .expect("Failed to create plan");

        planner
            .add_activity(&lathe_core::params::ActivityCreate {
                plan_id: plan.id,
                name: "Lubrication".to_string(),
                responsible: None,
            })
            .await
            .expect("Failed to add activity");

        plan.id
    };

    // Create new planner instance (simulating app restart)
    let planner = PlannerBuilder::new()
        .with_database_path(Some(db_path))
        .build()
        .await
        .expect("Failed to create second planner");

    // Verify data persisted
    let retrieved = planner
        .get_plan(&lathe_core::params::Id { id: plan_id })
        .await
        .expect("Failed to retrieve plan")
        .expect("Plan should exist");

    assert_eq!(retrieved.code, "PREV-01");
    assert_eq!(retrieved.activities.len(), 1);
    assert_eq!(retrieved.activities[0].name, "Lubrication");
}

#[tokio::test]
async fn test_error_handling_invalid_operations() {
    let (_temp_dir, planner) = common::create_test_planner().await;

    // Operations on a non-existent plan
    let result = planner
        .get_plan(&lathe_core::params::Id { id: 999 })
        .await
        .expect("Failed to query non-existent plan");
    assert!(result.is_none());

    let result = planner
        .add_activity(&lathe_core::params::ActivityCreate {
            plan_id: 999,
            name: "Invalid activity".to_string(),
            responsible: None,
        })
        .await;
    assert!(result.is_err());

    let result = planner
        .deactivate_plan(&lathe_core::params::Id { id: 999 })
        .await
        .expect("deactivate_plan should not error even for non-existent plans");
    assert!(result.is_none(), "Should return None for non-existent plan");

    // Operations on non-existent tree nodes
    let result = planner
        .update_service(&lathe_core::params::UpdateService {
            id: 999,
            description: Some("Ghost".to_string()),
            estimated_time_min: None,
        })
        .await;
    assert!(result.is_err());

    let result = planner
        .remove_activity(&lathe_core::params::Id { id: 999 })
        .await;
    assert!(result.is_err());

    // Operations on a non-existent execution
    let result = planner
        .finish_execution(&lathe_core::params::FinishExecution {
            id: 999,
            observations: None,
            real_time_min: None,
        })
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_template_roundtrip_workflow() {
    let (_temp_dir, planner) = common::create_test_planner().await;

    // Build a plan worth reusing
    let source = planner
        .create_plan(&lathe_core::params::CreatePlan {
            code: "PREV-01".to_string(),
            name: "Monthly lathe maintenance".to_string(),
            frequency_days: 30,
            ..Default::default()
        })
        .await
        .expect("Failed to create plan");
    let lubrication = planner
        .add_activity(&lathe_core::params::ActivityCreate {
            plan_id: source.id,
            name: "Lubrication".to_string(),
            responsible: None,
        })
        .await
        .expect("Failed to add activity");
    planner
        .add_service(&lathe_core::params::ServiceCreate {
            activity_id: lubrication.id,
            description: "Check oil level".to_string(),
            estimated_time_min: Some(10),
        })
        .await
        .expect("Failed to add service");
    planner
        .add_service(&lathe_core::params::ServiceCreate {
            activity_id: lubrication.id,
            description: "Grease bearings".to_string(),
            estimated_time_min: Some(5),
        })
        .await
        .expect("Failed to add service");

    // Capture the structure
    let template = planner
        .capture_template(&lathe_core::params::CaptureTemplate {
            plan_id: source.id,
            name: "Standard lathe routine".to_string(),
            description: None,
        })
        .await
        .expect("Failed to capture template");
    assert_eq!(template.structure.len(), 1);
    assert_eq!(template.service_count(), 2);

    // Replay it onto a fresh plan
    let target = planner
        .create_plan(&lathe_core::params::CreatePlan {
            code: "PREV-02".to_string(),
            name: "Second lathe maintenance".to_string(),
            frequency_days: 30,
            ..Default::default()
        })
        .await
        .expect("Failed to create plan");
    let populated = planner
        .apply_template(&lathe_core::params::ApplyTemplate {
            template_id: template.id,
            plan_id: target.id,
        })
        .await
        .expect("Failed to apply template");

    assert_eq!(populated.activities.len(), 1);
    assert_eq!(populated.activities[0].name, "Lubrication");
    assert_eq!(populated.activities[0].services.len(), 2);
    assert_eq!(populated.total_time_min(), 15);

    // An execution of the populated plan sees the replayed tree
    let execution = planner
        .start_execution(&lathe_core::params::StartExecution {
            plan_id: target.id,
            executor: "Ana Souza".to_string(),
            ..Default::default()
        })
        .await
        .expect("Failed to start execution");
    assert_eq!(execution.checklist.len(), 2);
    assert_eq!(execution.checklist[0].service_description, "Check oil level");
}

#[tokio::test]
async fn test_plan_deactivation_workflow() {
    let (_temp_dir, planner) = common::create_test_planner().await;

    let plan = planner
        .create_plan(&lathe_core::params::CreatePlan {
            code: "PREV-01".to_string(),
            name: "Monthly lathe maintenance".to_string(),
            frequency_days: 30,
            ..Default::default()
        })
        .await
        .expect("Failed to create plan");
    planner
        .add_activity(&lathe_core::params::ActivityCreate {
            plan_id: plan.id,
            name: "Lubrication".to_string(),
            responsible: None,
        })
        .await
        .expect("Failed to add activity");

    // Deactivate the plan
    let deactivated = planner
        .deactivate_plan(&lathe_core::params::Id { id: plan.id })
        .await
        .expect("Failed to deactivate plan")
        .expect("Plan should exist");
    assert_eq!(deactivated.status, PlanStatus::Inactive);

    // Verify plan is not visible in the default list
    let active_plans = planner
        .list_plans(None)
        .await
        .expect("Failed to list plans");
    assert!(!active_plans.iter().any(|p| p.id == plan.id));

    // Verify plan is visible when including inactive ones
    let filter = PlanFilter {
        include_inactive: true,
        ..Default::default()
    };
    let all_plans = planner
        .list_plans(Some(filter))
        .await
        .expect("Failed to list all plans");
    assert!(all_plans.iter().any(|p| p.id == plan.id));

    // The activity tree is retired with the plan, not deleted
    let activities = planner
        .get_activities(&lathe_core::params::Id { id: plan.id })
        .await
        .expect("Query should succeed");
    assert_eq!(activities.len(), 1);

    // Reactivating brings the plan back into the default list
    let reactivated = planner
        .reactivate_plan(&lathe_core::params::Id { id: plan.id })
        .await
        .expect("Failed to reactivate plan")
        .expect("Plan should exist");
    assert_eq!(reactivated.status, PlanStatus::Active);

    let active_plans = planner
        .list_plans(None)
        .await
        .expect("Failed to list plans");
    assert!(active_plans.iter().any(|p| p.id == plan.id));
}

#[tokio::test]
async fn test_activity_removal() {
    let (_temp_dir, planner) = common::create_test_planner().await;

    let plan = planner
        .create_plan(&lathe_core::params::CreatePlan {
            code: "PREV-01".to_string(),
            name: "Monthly lathe maintenance".to_string(),
            frequency_days: 30,
            ..Default::default()
        })
        .await
        .expect("Failed to create plan");

    let first = planner
        .add_activity(&lathe_core::params::ActivityCreate {
            plan_id: plan.id,
            name: "Activity to keep".to_string(),
            responsible: None,
        })
        .await
        .expect("Failed to add activity");
    let second = planner
        .add_activity(&lathe_core::params::ActivityCreate {
            plan_id: plan.id,
            name: "Activity to remove".to_string(),
            responsible: None,
        })
        .await
        .expect("Failed to add activity");
    let third = planner
        .add_activity(&lathe_core::params::ActivityCreate {
            plan_id: plan.id,
            name: "Another activity to keep".to_string(),
            responsible: None,
        })
        .await
        .expect("Failed to add activity");

    // Remove the middle activity
    planner
        .remove_activity(&lathe_core::params::Id { id: second.id })
        .await
        .expect("Failed to remove activity");

    // Verify remaining activities
    let activities = planner
        .get_activities(&lathe_core::params::Id { id: plan.id })
        .await
        .expect("Failed to get activities");
    assert_eq!(activities.len(), 2);
    assert_eq!(activities.0[0].id, first.id);
    assert_eq!(activities.0[1].id, third.id);
}
