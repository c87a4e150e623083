//! Tests for the planner module.

use super::*;
use crate::models::{ExecutionStatus, PlanStatus};
use crate::params::{
    ActivityCreate, ApplyTemplate, CancelExecution, CaptureTemplate, CreatePlan, DeletePlan,
    FinishExecution, Id, ListExecutions, ListPlans, MoveActivity, MoveDirection, MoveService,
    ServiceCreate, SetChecklistItem, StartExecution, UpdateActivity, UpdatePlan, UpdateService,
};
use crate::PlannerError;
use tempfile::TempDir;

/// Helper function to create a test planner
async fn create_test_planner() -> (TempDir, Planner) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let planner = PlannerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create planner");
    (temp_dir, planner)
}

/// Helper to create a plan with two activities and three services.
///
/// Layout: "Lubrication" (order 1) with "Check oil level" (10 min) and
/// "Grease bearings" (5 min), then "Inspection" (order 2) with
/// "Check belt tension" (no estimate).
async fn create_populated_plan(planner: &Planner, code: &str) -> crate::models::Plan {
    let plan = planner
        .create_plan(&CreatePlan {
            code: code.to_string(),
            name: "Monthly lathe maintenance".to_string(),
            equipment: Some("LATHE-7".to_string()),
            frequency_days: 30,
            ..Default::default()
        })
        .await
        .expect("Failed to create plan");

    let lubrication = planner
        .add_activity(&ActivityCreate {
            plan_id: plan.id,
            name: "Lubrication".to_string(),
            responsible: Some("Mechanical team".to_string()),
        })
        .await
        .expect("Failed to add activity");

    let inspection = planner
        .add_activity(&ActivityCreate {
            plan_id: plan.id,
            name: "Inspection".to_string(),
            responsible: None,
        })
        .await
        .expect("Failed to add activity");

    planner
        .add_service(&ServiceCreate {
            activity_id: lubrication.id,
            description: "Check oil level".to_string(),
            estimated_time_min: Some(10),
        })
        .await
        .expect("Failed to add service");

    planner
        .add_service(&ServiceCreate {
            activity_id: lubrication.id,
            description: "Grease bearings".to_string(),
            estimated_time_min: Some(5),
        })
        .await
        .expect("Failed to add service");

    planner
        .add_service(&ServiceCreate {
            activity_id: inspection.id,
            description: "Check belt tension".to_string(),
            estimated_time_min: None,
        })
        .await
        .expect("Failed to add service");

    planner
        .get_plan(&Id { id: plan.id })
        .await
        .expect("Failed to reload plan")
        .expect("Plan should exist")
}

#[tokio::test]
async fn test_list_plans_summary_active() {
    let (_temp_dir, planner) = create_test_planner().await;

    let plan = create_populated_plan(&planner, "PM-001").await;

    let summaries = planner
        .list_plans_summary(&ListPlans::default())
        .await
        .expect("Failed to list plan summaries");

    assert_eq!(summaries.0.len(), 1);
    assert_eq!(summaries.0[0].id, plan.id);
    assert_eq!(summaries.0[0].code, "PM-001");
    assert_eq!(summaries.0[0].activity_count, 2);
    assert_eq!(summaries.0[0].service_count, 3);
    // Missing estimate counts as zero
    assert_eq!(summaries.0[0].total_time_min, 15);
}

#[tokio::test]
async fn test_list_plans_summary_inactive() {
    let (_temp_dir, planner) = create_test_planner().await;

    let plan = planner
        .create_plan(&CreatePlan {
            code: "PM-002".to_string(),
            name: "Quarterly overhaul".to_string(),
            frequency_days: 90,
            ..Default::default()
        })
        .await
        .expect("Failed to create plan");

    planner
        .deactivate_plan(&Id { id: plan.id })
        .await
        .expect("Failed to deactivate plan");

    let inactive = planner
        .list_plans_summary(&ListPlans {
            inactive: true,
            ..Default::default()
        })
        .await
        .expect("Failed to list inactive plan summaries");

    assert_eq!(inactive.0.len(), 1);
    assert_eq!(inactive.0[0].name, "Quarterly overhaul");
    assert_eq!(inactive.0[0].status, PlanStatus::Inactive);

    // The default listing only shows active plans
    let active = planner
        .list_plans_summary(&ListPlans::default())
        .await
        .expect("Failed to list active plans");
    assert_eq!(active.0.len(), 0);
}

#[tokio::test]
async fn test_list_plans_summary_name_filter() {
    let (_temp_dir, planner) = create_test_planner().await;

    planner
        .create_plan(&CreatePlan {
            code: "PM-003".to_string(),
            name: "Weekly cleaning".to_string(),
            frequency_days: 7,
            ..Default::default()
        })
        .await
        .expect("Failed to create plan");

    planner
        .create_plan(&CreatePlan {
            code: "PM-004".to_string(),
            name: "Monthly calibration".to_string(),
            frequency_days: 30,
            ..Default::default()
        })
        .await
        .expect("Failed to create plan");

    let summaries = planner
        .list_plans_summary(&ListPlans {
            name_contains: Some("cleaning".to_string()),
            ..Default::default()
        })
        .await
        .expect("Failed to list filtered summaries");

    assert_eq!(summaries.0.len(), 1);
    assert_eq!(summaries.0[0].code, "PM-003");
}

#[tokio::test]
async fn test_show_plan_with_activities() {
    let (_temp_dir, planner) = create_test_planner().await;

    let plan = create_populated_plan(&planner, "PM-005").await;

    let retrieved = planner
        .show_plan_with_activities(&Id { id: plan.id })
        .await
        .expect("Failed to show plan")
        .expect("Plan should exist");

    assert_eq!(retrieved.name, "Monthly lathe maintenance");
    assert_eq!(retrieved.activities.len(), 2);
    assert_eq!(retrieved.activities[0].name, "Lubrication");
    assert_eq!(retrieved.activities[0].order, 1);
    assert_eq!(retrieved.activities[0].services.len(), 2);
    assert_eq!(retrieved.activities[1].name, "Inspection");
    assert_eq!(retrieved.activities[1].order, 2);
    assert_eq!(retrieved.total_time_min(), 15);
}

#[tokio::test]
async fn test_show_plan_with_activities_not_found() {
    let (_temp_dir, planner) = create_test_planner().await;

    let result = planner
        .show_plan_with_activities(&Id { id: 999 })
        .await
        .expect("Should not fail on non-existent plan");

    assert!(result.is_none());
}

#[tokio::test]
async fn test_create_plan_result_rejects_empty_code() {
    let (_temp_dir, planner) = create_test_planner().await;

    let result = planner
        .create_plan_result(&CreatePlan {
            code: "   ".to_string(),
            name: "Plan without code".to_string(),
            frequency_days: 30,
            ..Default::default()
        })
        .await;

    assert!(matches!(
        result,
        Err(PlannerError::InvalidInput { ref field, .. }) if field == "code"
    ));
}

#[tokio::test]
async fn test_create_plan_result_rejects_duplicate_code() {
    let (_temp_dir, planner) = create_test_planner().await;

    let params = CreatePlan {
        code: "PM-006".to_string(),
        name: "First plan".to_string(),
        frequency_days: 30,
        ..Default::default()
    };

    planner
        .create_plan_result(&params)
        .await
        .expect("Failed to create first plan");

    let result = planner
        .create_plan_result(&CreatePlan {
            name: "Second plan".to_string(),
            ..params
        })
        .await;

    assert!(matches!(
        result,
        Err(PlannerError::InvalidInput { ref field, .. }) if field == "code"
    ));
}

#[tokio::test]
async fn test_update_plan_validated() {
    let (_temp_dir, planner) = create_test_planner().await;

    let plan = create_populated_plan(&planner, "PM-007").await;

    let updated = planner
        .update_plan_validated(&UpdatePlan {
            id: plan.id,
            name: Some("Biweekly lathe maintenance".to_string()),
            frequency_days: Some(14),
            ..Default::default()
        })
        .await
        .expect("Failed to update plan");

    assert_eq!(updated.name, "Biweekly lathe maintenance");
    assert_eq!(updated.frequency_days, 14);
    // Untouched fields and the tree survive the update
    assert_eq!(updated.code, "PM-007");
    assert_eq!(updated.equipment, Some("LATHE-7".to_string()));
    assert_eq!(updated.activities.len(), 2);
}

#[tokio::test]
async fn test_update_plan_validated_rejects_zero_frequency() {
    let (_temp_dir, planner) = create_test_planner().await;

    let plan = create_populated_plan(&planner, "PM-008").await;

    let result = planner
        .update_plan_validated(&UpdatePlan {
            id: plan.id,
            frequency_days: Some(0),
            ..Default::default()
        })
        .await;

    assert!(matches!(
        result,
        Err(PlannerError::InvalidInput { ref field, .. }) if field == "frequency_days"
    ));
}

#[tokio::test]
async fn test_delete_plan_requires_confirmation() {
    let (_temp_dir, planner) = create_test_planner().await;

    let plan = create_populated_plan(&planner, "PM-009").await;

    let result = planner
        .delete_plan(&DeletePlan {
            id: plan.id,
            confirmed: false,
        })
        .await;

    assert!(matches!(
        result,
        Err(PlannerError::InvalidInput { ref field, .. }) if field == "confirmed"
    ));

    // The plan is untouched
    let still_there = planner
        .get_plan(&Id { id: plan.id })
        .await
        .expect("Failed to get plan");
    assert!(still_there.is_some());
}

#[tokio::test]
async fn test_delete_plan_with_confirmation() {
    let (_temp_dir, planner) = create_test_planner().await;

    let plan = create_populated_plan(&planner, "PM-010").await;

    planner
        .start_execution(&StartExecution {
            plan_id: plan.id,
            executor: "J. Silva".to_string(),
            ..Default::default()
        })
        .await
        .expect("Failed to start execution");

    let deleted = planner
        .delete_plan(&DeletePlan {
            id: plan.id,
            confirmed: true,
        })
        .await
        .expect("Failed to delete plan")
        .expect("Plan should exist");

    assert_eq!(deleted.id, plan.id);
    assert_eq!(deleted.code, "PM-010");

    // Plan, tree, and execution history are all gone
    let result = planner
        .get_plan(&Id { id: plan.id })
        .await
        .expect("Should not fail on deleted plan");
    assert!(result.is_none());

    let activities = planner
        .get_activities(&Id { id: plan.id })
        .await
        .expect("Failed to get activities");
    assert_eq!(activities.len(), 0);

    let executions = planner
        .list_executions(None)
        .await
        .expect("Failed to list executions");
    assert!(executions.is_empty());
}

#[tokio::test]
async fn test_delete_plan_not_found() {
    let (_temp_dir, planner) = create_test_planner().await;

    let result = planner
        .delete_plan(&DeletePlan {
            id: 999,
            confirmed: true,
        })
        .await
        .expect("Should not fail on non-existent plan");

    assert!(result.is_none());
}

#[tokio::test]
async fn test_deactivate_and_reactivate_plan() {
    let (_temp_dir, planner) = create_test_planner().await;

    let plan = create_populated_plan(&planner, "PM-011").await;

    let deactivated = planner
        .deactivate_plan(&Id { id: plan.id })
        .await
        .expect("Failed to deactivate plan")
        .expect("Plan should exist");
    assert_eq!(deactivated.status, PlanStatus::Inactive);

    // Deactivating again is a no-op, not an error
    let again = planner
        .deactivate_plan(&Id { id: plan.id })
        .await
        .expect("Failed to deactivate plan twice")
        .expect("Plan should exist");
    assert_eq!(again.status, PlanStatus::Inactive);

    let reactivated = planner
        .reactivate_plan(&Id { id: plan.id })
        .await
        .expect("Failed to reactivate plan")
        .expect("Plan should exist");
    assert_eq!(reactivated.status, PlanStatus::Active);

    let summaries = planner
        .list_plans_summary(&ListPlans::default())
        .await
        .expect("Failed to list plans");
    assert_eq!(summaries.0.len(), 1);
}

#[tokio::test]
async fn test_add_activity_to_plan_appends_in_order() {
    let (_temp_dir, planner) = create_test_planner().await;

    let plan = planner
        .create_plan(&CreatePlan {
            code: "PM-012".to_string(),
            name: "Order test".to_string(),
            frequency_days: 30,
            ..Default::default()
        })
        .await
        .expect("Failed to create plan");

    let first = planner
        .add_activity_to_plan(&ActivityCreate {
            plan_id: plan.id,
            name: "First".to_string(),
            responsible: None,
        })
        .await
        .expect("Failed to add activity");

    let second = planner
        .add_activity_to_plan(&ActivityCreate {
            plan_id: plan.id,
            name: "Second".to_string(),
            responsible: None,
        })
        .await
        .expect("Failed to add activity");

    assert_eq!(first.order, 1);
    assert_eq!(second.order, 2);
}

#[tokio::test]
async fn test_add_activity_to_missing_plan() {
    let (_temp_dir, planner) = create_test_planner().await;

    let result = planner
        .add_activity_to_plan(&ActivityCreate {
            plan_id: 999,
            name: "Orphan".to_string(),
            responsible: None,
        })
        .await;

    assert!(matches!(
        result,
        Err(PlannerError::PlanNotFound { id: 999 })
    ));
}

#[tokio::test]
async fn test_update_activity_validated() {
    let (_temp_dir, planner) = create_test_planner().await;

    let plan = create_populated_plan(&planner, "PM-036").await;
    let inspection_id = plan.activities[1].id;

    let updated = planner
        .update_activity_validated(&UpdateActivity {
            id: inspection_id,
            name: None,
            responsible: Some("Electrical team".to_string()),
        })
        .await
        .expect("Failed to update activity");

    assert_eq!(updated.name, "Inspection");
    assert_eq!(updated.responsible, Some("Electrical team".to_string()));
    // The order is not touched by updates
    assert_eq!(updated.order, 2);
}

#[tokio::test]
async fn test_move_activity_position() {
    let (_temp_dir, planner) = create_test_planner().await;

    let plan = create_populated_plan(&planner, "PM-013").await;
    let inspection_id = plan.activities[1].id;

    let moved = planner
        .move_activity_position(&MoveActivity {
            id: inspection_id,
            direction: MoveDirection::Up,
        })
        .await
        .expect("Failed to move activity");
    assert_eq!(moved.order, 1);

    let activities = planner
        .list_plan_activities(&Id { id: plan.id })
        .await
        .expect("Failed to list activities");
    assert_eq!(activities[0].name, "Inspection");
    assert_eq!(activities[1].name, "Lubrication");
}

#[tokio::test]
async fn test_move_activity_at_boundary_is_noop() {
    let (_temp_dir, planner) = create_test_planner().await;

    let plan = create_populated_plan(&planner, "PM-014").await;
    let lubrication_id = plan.activities[0].id;

    // Already first; moving up changes nothing
    let moved = planner
        .move_activity_position(&MoveActivity {
            id: lubrication_id,
            direction: MoveDirection::Up,
        })
        .await
        .expect("Failed to move activity");
    assert_eq!(moved.order, 1);

    let activities = planner
        .list_plan_activities(&Id { id: plan.id })
        .await
        .expect("Failed to list activities");
    assert_eq!(activities[0].name, "Lubrication");
    assert_eq!(activities[1].name, "Inspection");
}

#[tokio::test]
async fn test_remove_activity_from_plan() {
    let (_temp_dir, planner) = create_test_planner().await;

    let plan = create_populated_plan(&planner, "PM-015").await;
    let lubrication_id = plan.activities[0].id;
    let service_id = plan.activities[0].services[0].id;

    let removed = planner
        .remove_activity_from_plan(&Id { id: lubrication_id })
        .await
        .expect("Failed to remove activity")
        .expect("Activity should exist");
    assert_eq!(removed.name, "Lubrication");

    // The activity's services are gone with it
    let service = planner
        .get_service(&Id { id: service_id })
        .await
        .expect("Failed to get service");
    assert!(service.is_none());

    // The survivor keeps its order value
    let activities = planner
        .list_plan_activities(&Id { id: plan.id })
        .await
        .expect("Failed to list activities");
    assert_eq!(activities.len(), 1);
    assert_eq!(activities[0].name, "Inspection");
    assert_eq!(activities[0].order, 2);
}

#[tokio::test]
async fn test_add_service_to_activity_appends_in_order() {
    let (_temp_dir, planner) = create_test_planner().await;

    let plan = create_populated_plan(&planner, "PM-016").await;
    let inspection_id = plan.activities[1].id;

    let service = planner
        .add_service_to_activity(&ServiceCreate {
            activity_id: inspection_id,
            description: "Check spindle play".to_string(),
            estimated_time_min: Some(20),
        })
        .await
        .expect("Failed to add service");

    assert_eq!(service.order, 2);
    assert_eq!(service.estimated_time_min, Some(20));
}

#[tokio::test]
async fn test_update_service_keeps_time_when_not_provided() {
    let (_temp_dir, planner) = create_test_planner().await;

    let plan = create_populated_plan(&planner, "PM-017").await;
    let service_id = plan.activities[0].services[0].id;

    let updated = planner
        .update_service_validated(&UpdateService {
            id: service_id,
            description: Some("Check and top up oil level".to_string()),
            estimated_time_min: None,
        })
        .await
        .expect("Failed to update service");

    assert_eq!(updated.description, "Check and top up oil level");
    assert_eq!(updated.estimated_time_min, Some(10));
}

#[tokio::test]
async fn test_move_service_position() {
    let (_temp_dir, planner) = create_test_planner().await;

    let plan = create_populated_plan(&planner, "PM-018").await;
    let grease_id = plan.activities[0].services[1].id;

    let moved = planner
        .move_service_position(&MoveService {
            id: grease_id,
            direction: MoveDirection::Up,
        })
        .await
        .expect("Failed to move service");
    assert_eq!(moved.order, 1);

    let activity = planner
        .show_activity_details(&Id {
            id: plan.activities[0].id,
        })
        .await
        .expect("Failed to show activity")
        .expect("Activity should exist");
    assert_eq!(activity.services[0].description, "Grease bearings");
    assert_eq!(activity.services[1].description, "Check oil level");
}

#[tokio::test]
async fn test_remove_service_from_activity() {
    let (_temp_dir, planner) = create_test_planner().await;

    let plan = create_populated_plan(&planner, "PM-019").await;
    let oil_id = plan.activities[0].services[0].id;

    let removed = planner
        .remove_service_from_activity(&Id { id: oil_id })
        .await
        .expect("Failed to remove service")
        .expect("Service should exist");
    assert_eq!(removed.description, "Check oil level");

    let activity = planner
        .show_activity_details(&Id {
            id: plan.activities[0].id,
        })
        .await
        .expect("Failed to show activity")
        .expect("Activity should exist");
    assert_eq!(activity.services.len(), 1);
    assert_eq!(activity.total_time_min(), 5);
}

#[tokio::test]
async fn test_start_execution_result_snapshots_checklist() {
    let (_temp_dir, planner) = create_test_planner().await;

    let plan = create_populated_plan(&planner, "PM-020").await;

    let execution = planner
        .start_execution_result(&StartExecution {
            plan_id: plan.id,
            executor: "J. Silva".to_string(),
            ..Default::default()
        })
        .await
        .expect("Failed to start execution");

    assert_eq!(execution.status, ExecutionStatus::EmAndamento);
    assert_eq!(execution.checklist.len(), 3);
    // Tree order: activities by order, services by order within each
    assert_eq!(execution.checklist[0].activity_name, "Lubrication");
    assert_eq!(execution.checklist[0].service_description, "Check oil level");
    assert_eq!(execution.checklist[1].service_description, "Grease bearings");
    assert_eq!(execution.checklist[2].activity_name, "Inspection");
    assert_eq!(execution.checklist[2].estimated_time_min, None);
    assert!(execution.checklist.iter().all(|item| !item.completed));
    assert_eq!(execution.estimated_time_min(), 15);
}

#[tokio::test]
async fn test_checklist_frozen_after_plan_edit() {
    let (_temp_dir, planner) = create_test_planner().await;

    let plan = create_populated_plan(&planner, "PM-021").await;

    let execution = planner
        .start_execution_result(&StartExecution {
            plan_id: plan.id,
            executor: "J. Silva".to_string(),
            ..Default::default()
        })
        .await
        .expect("Failed to start execution");

    // Grow the plan after the snapshot was taken
    planner
        .add_service(&ServiceCreate {
            activity_id: plan.activities[1].id,
            description: "Late addition".to_string(),
            estimated_time_min: Some(99),
        })
        .await
        .expect("Failed to add service");

    let reloaded = planner
        .show_execution_details(&Id { id: execution.id })
        .await
        .expect("Failed to show execution")
        .expect("Execution should exist");

    assert_eq!(reloaded.checklist.len(), 3);
    assert!(reloaded
        .checklist
        .iter()
        .all(|item| item.service_description != "Late addition"));
}

#[tokio::test]
async fn test_set_checklist_item_validated() {
    let (_temp_dir, planner) = create_test_planner().await;

    let plan = create_populated_plan(&planner, "PM-022").await;

    let execution = planner
        .start_execution_result(&StartExecution {
            plan_id: plan.id,
            executor: "J. Silva".to_string(),
            ..Default::default()
        })
        .await
        .expect("Failed to start execution");

    let updated = planner
        .set_checklist_item_validated(&SetChecklistItem {
            execution_id: execution.id,
            position: 2,
            completed: true,
        })
        .await
        .expect("Failed to set checklist item");

    assert!(updated.checklist[1].completed);
    assert!(!updated.checklist[0].completed);
    assert_eq!(updated.completed_items(), 1);
}

#[tokio::test]
async fn test_set_checklist_item_position_out_of_range() {
    let (_temp_dir, planner) = create_test_planner().await;

    let plan = create_populated_plan(&planner, "PM-023").await;

    let execution = planner
        .start_execution_result(&StartExecution {
            plan_id: plan.id,
            executor: "J. Silva".to_string(),
            ..Default::default()
        })
        .await
        .expect("Failed to start execution");

    let result = planner
        .set_checklist_item_validated(&SetChecklistItem {
            execution_id: execution.id,
            position: 4,
            completed: true,
        })
        .await;

    assert!(matches!(
        result,
        Err(PlannerError::InvalidInput { ref field, .. }) if field == "position"
    ));

    // Position zero is rejected before touching the database
    let result = planner
        .set_checklist_item_validated(&SetChecklistItem {
            execution_id: execution.id,
            position: 0,
            completed: true,
        })
        .await;

    assert!(matches!(
        result,
        Err(PlannerError::InvalidInput { ref field, .. }) if field == "position"
    ));
}

#[tokio::test]
async fn test_finish_execution_result() {
    let (_temp_dir, planner) = create_test_planner().await;

    let plan = create_populated_plan(&planner, "PM-024").await;

    let execution = planner
        .start_execution_result(&StartExecution {
            plan_id: plan.id,
            executor: "J. Silva".to_string(),
            ..Default::default()
        })
        .await
        .expect("Failed to start execution");

    let finished = planner
        .finish_execution_result(&FinishExecution {
            id: execution.id,
            observations: Some("All items checked".to_string()),
            real_time_min: Some(42),
        })
        .await
        .expect("Failed to finish execution");

    assert_eq!(finished.status, ExecutionStatus::Concluida);
    assert_eq!(finished.observations, Some("All items checked".to_string()));
    assert_eq!(finished.real_time_min, Some(42));
}

#[tokio::test]
async fn test_terminal_execution_rejects_changes() {
    let (_temp_dir, planner) = create_test_planner().await;

    let plan = create_populated_plan(&planner, "PM-025").await;

    let execution = planner
        .start_execution_result(&StartExecution {
            plan_id: plan.id,
            executor: "J. Silva".to_string(),
            ..Default::default()
        })
        .await
        .expect("Failed to start execution");

    planner
        .finish_execution_result(&FinishExecution {
            id: execution.id,
            ..Default::default()
        })
        .await
        .expect("Failed to finish execution");

    // Finishing again fails
    let again = planner
        .finish_execution_result(&FinishExecution {
            id: execution.id,
            ..Default::default()
        })
        .await;
    assert!(matches!(again, Err(PlannerError::ExecutionClosed { .. })));

    // So does cancelling or ticking items
    let cancel = planner
        .cancel_execution_result(&CancelExecution {
            id: execution.id,
            observations: None,
        })
        .await;
    assert!(matches!(cancel, Err(PlannerError::ExecutionClosed { .. })));

    let tick = planner
        .set_checklist_item_validated(&SetChecklistItem {
            execution_id: execution.id,
            position: 1,
            completed: true,
        })
        .await;
    assert!(matches!(tick, Err(PlannerError::ExecutionClosed { .. })));
}

#[tokio::test]
async fn test_cancel_execution_result_keeps_progress() {
    let (_temp_dir, planner) = create_test_planner().await;

    let plan = create_populated_plan(&planner, "PM-026").await;

    let execution = planner
        .start_execution_result(&StartExecution {
            plan_id: plan.id,
            executor: "J. Silva".to_string(),
            ..Default::default()
        })
        .await
        .expect("Failed to start execution");

    planner
        .set_checklist_item_validated(&SetChecklistItem {
            execution_id: execution.id,
            position: 1,
            completed: true,
        })
        .await
        .expect("Failed to set checklist item");

    let cancelled = planner
        .cancel_execution_result(&CancelExecution {
            id: execution.id,
            observations: Some("Machine unavailable".to_string()),
        })
        .await
        .expect("Failed to cancel execution");

    assert_eq!(cancelled.status, ExecutionStatus::Cancelada);
    assert_eq!(cancelled.completed_items(), 1);
    assert_eq!(
        cancelled.observations,
        Some("Machine unavailable".to_string())
    );
}

#[tokio::test]
async fn test_list_executions_filtered() {
    let (_temp_dir, planner) = create_test_planner().await;

    let plan = create_populated_plan(&planner, "PM-027").await;
    let other = create_populated_plan(&planner, "PM-028").await;

    let first = planner
        .start_execution_result(&StartExecution {
            plan_id: plan.id,
            executor: "J. Silva".to_string(),
            ..Default::default()
        })
        .await
        .expect("Failed to start execution");

    planner
        .start_execution_result(&StartExecution {
            plan_id: other.id,
            executor: "M. Costa".to_string(),
            ..Default::default()
        })
        .await
        .expect("Failed to start execution");

    planner
        .finish_execution_result(&FinishExecution {
            id: first.id,
            ..Default::default()
        })
        .await
        .expect("Failed to finish execution");

    let by_plan = planner
        .list_executions_filtered(&ListExecutions {
            plan_id: Some(plan.id),
            status: None,
        })
        .await
        .expect("Failed to list executions");
    assert_eq!(by_plan.0.len(), 1);
    assert_eq!(by_plan.0[0].id, first.id);

    let by_status = planner
        .list_executions_filtered(&ListExecutions {
            plan_id: None,
            status: Some("em_andamento".to_string()),
        })
        .await
        .expect("Failed to list executions");
    assert_eq!(by_status.0.len(), 1);
    assert_eq!(by_status.0[0].executor, "M. Costa");

    let bad_status = planner
        .list_executions_filtered(&ListExecutions {
            plan_id: None,
            status: Some("paused".to_string()),
        })
        .await;
    assert!(matches!(
        bad_status,
        Err(PlannerError::InvalidInput { ref field, .. }) if field == "status"
    ));
}

#[tokio::test]
async fn test_capture_template_result() {
    let (_temp_dir, planner) = create_test_planner().await;

    let plan = create_populated_plan(&planner, "PM-029").await;

    let template = planner
        .capture_template_result(&CaptureTemplate {
            plan_id: plan.id,
            name: "Standard lathe routine".to_string(),
            description: Some("Default structure for lathes".to_string()),
        })
        .await
        .expect("Failed to capture template");

    assert_eq!(template.name, "Standard lathe routine");
    assert_eq!(template.structure.len(), 2);
    assert_eq!(template.structure[0].name, "Lubrication");
    assert_eq!(template.structure[0].services.len(), 2);
    assert_eq!(template.service_count(), 3);
    assert_eq!(template.total_time_min(), 15);
}

#[tokio::test]
async fn test_capture_template_rejects_empty_plan() {
    let (_temp_dir, planner) = create_test_planner().await;

    let plan = planner
        .create_plan(&CreatePlan {
            code: "PM-030".to_string(),
            name: "Empty plan".to_string(),
            frequency_days: 30,
            ..Default::default()
        })
        .await
        .expect("Failed to create plan");

    let result = planner
        .capture_template_result(&CaptureTemplate {
            plan_id: plan.id,
            name: "Empty template".to_string(),
            description: None,
        })
        .await;

    assert!(matches!(
        result,
        Err(PlannerError::InvalidInput { ref field, .. }) if field == "plan_id"
    ));
}

#[tokio::test]
async fn test_template_is_frozen_after_capture() {
    let (_temp_dir, planner) = create_test_planner().await;

    let plan = create_populated_plan(&planner, "PM-031").await;

    let template = planner
        .capture_template_result(&CaptureTemplate {
            plan_id: plan.id,
            name: "Frozen template".to_string(),
            description: None,
        })
        .await
        .expect("Failed to capture template");

    // Mutate the source plan after the capture
    planner
        .remove_activity(&Id {
            id: plan.activities[0].id,
        })
        .await
        .expect("Failed to remove activity");

    let reloaded = planner
        .show_template_details(&Id { id: template.id })
        .await
        .expect("Failed to show template")
        .expect("Template should exist");

    assert_eq!(reloaded.structure.len(), 2);
    assert_eq!(reloaded.structure[0].name, "Lubrication");
}

#[tokio::test]
async fn test_apply_template_to_plan() {
    let (_temp_dir, planner) = create_test_planner().await;

    let source = create_populated_plan(&planner, "PM-032").await;

    let template = planner
        .capture_template_result(&CaptureTemplate {
            plan_id: source.id,
            name: "Reusable routine".to_string(),
            description: None,
        })
        .await
        .expect("Failed to capture template");

    let target = planner
        .create_plan(&CreatePlan {
            code: "PM-033".to_string(),
            name: "Second machine".to_string(),
            frequency_days: 30,
            ..Default::default()
        })
        .await
        .expect("Failed to create target plan");

    let rebuilt = planner
        .apply_template_to_plan(&ApplyTemplate {
            template_id: template.id,
            plan_id: target.id,
        })
        .await
        .expect("Failed to apply template");

    assert_eq!(rebuilt.id, target.id);
    assert_eq!(rebuilt.activities.len(), 2);
    assert_eq!(rebuilt.activities[0].name, "Lubrication");
    assert_eq!(rebuilt.activities[0].order, 1);
    assert_eq!(rebuilt.activities[0].services.len(), 2);
    assert_eq!(rebuilt.total_time_min(), 15);

    // Fresh rows, not shared ones
    assert!(rebuilt.activities[0].id != source.activities[0].id);
}

#[tokio::test]
async fn test_apply_template_missing_target() {
    let (_temp_dir, planner) = create_test_planner().await;

    let source = create_populated_plan(&planner, "PM-034").await;

    let template = planner
        .capture_template_result(&CaptureTemplate {
            plan_id: source.id,
            name: "Orphan routine".to_string(),
            description: None,
        })
        .await
        .expect("Failed to capture template");

    let result = planner
        .apply_template_to_plan(&ApplyTemplate {
            template_id: template.id,
            plan_id: 999,
        })
        .await;

    assert!(matches!(
        result,
        Err(PlannerError::PlanNotFound { id: 999 })
    ));
}

#[tokio::test]
async fn test_delete_template() {
    let (_temp_dir, planner) = create_test_planner().await;

    let source = create_populated_plan(&planner, "PM-035").await;

    let template = planner
        .capture_template_result(&CaptureTemplate {
            plan_id: source.id,
            name: "Short-lived template".to_string(),
            description: None,
        })
        .await
        .expect("Failed to capture template");

    let deleted = planner
        .delete_template(&Id { id: template.id })
        .await
        .expect("Failed to delete template")
        .expect("Template should exist");
    assert_eq!(deleted.name, "Short-lived template");

    let gone = planner
        .show_template_details(&Id { id: template.id })
        .await
        .expect("Should not fail on deleted template");
    assert!(gone.is_none());

    // The source plan is unaffected
    let plan = planner
        .get_plan(&Id { id: source.id })
        .await
        .expect("Failed to get plan")
        .expect("Plan should exist");
    assert_eq!(plan.activities.len(), 2);

    let templates = planner
        .list_templates_summary()
        .await
        .expect("Failed to list templates");
    assert_eq!(templates.0.len(), 0);
}
