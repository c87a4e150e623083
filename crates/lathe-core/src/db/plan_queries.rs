//! Plan CRUD operations and queries.

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension};

use crate::{
    error::{DatabaseResultExt, PlannerError, Result},
    models::{Plan, PlanFilter, PlanStatus, PlanSummary},
    params::{CreatePlan, UpdatePlan},
};

// Optimized SQL queries as const strings for compile-time optimization
const INSERT_PLAN_SQL: &str = "INSERT INTO plans (code, name, equipment, frequency_days, trigger_type, specialty, instructions, status, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)";
const SELECT_PLAN_SQL: &str = "SELECT id, code, name, equipment, frequency_days, trigger_type, specialty, instructions, status, next_execution, created_at, updated_at FROM plans WHERE id = ?1";
const CHECK_PLAN_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM plans WHERE id = ?1)";
const CHECK_CODE_TAKEN_SQL: &str = "SELECT EXISTS(SELECT 1 FROM plans WHERE code = ?1)";
const UPDATE_PLAN_SQL: &str = "UPDATE plans SET name = ?1, equipment = ?2, frequency_days = ?3, trigger_type = ?4, specialty = ?5, instructions = ?6, next_execution = ?7, updated_at = ?8 WHERE id = ?9";
const UPDATE_PLAN_STATUS_SQL: &str =
    "UPDATE plans SET status = ?1, updated_at = ?2 WHERE id = ?3 AND status = ?4";
const DELETE_PLAN_SERVICES_SQL: &str =
    "DELETE FROM services WHERE activity_id IN (SELECT id FROM activities WHERE plan_id = ?1)";
const DELETE_PLAN_ACTIVITIES_SQL: &str = "DELETE FROM activities WHERE plan_id = ?1";
const DELETE_PLAN_EXECUTIONS_SQL: &str = "DELETE FROM executions WHERE plan_id = ?1";
const DELETE_PLAN_SQL: &str = "DELETE FROM plans WHERE id = ?1";

// Base queries for plan listing
const PLAN_SUMMARY_COLUMNS: &str = "id, code, name, equipment, frequency_days, status, next_execution, created_at, updated_at, activity_count, service_count, total_time_min";
const PLAN_SUMMARIES_VIEW: &str = "plan_summaries";
const ALL_PLAN_SUMMARIES_VIEW: &str = "all_plan_summaries";

impl super::Database {
    /// Helper function to construct a Plan from a database row.
    ///
    /// The activity tree is not part of the row and starts empty; callers
    /// load it eagerly after the row query.
    fn build_plan_from_row(row: &rusqlite::Row) -> rusqlite::Result<Plan> {
        let status_str: String = row.get(8)?;
        let status = status_str.parse::<PlanStatus>().map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                8,
                Type::Text,
                format!("Invalid plan status: {status_str}").into(),
            )
        })?;

        let next_execution = match row.get::<_, Option<String>>(9)? {
            Some(raw) => Some(raw.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(9, Type::Text, Box::new(e))
            })?),
            None => None,
        };

        Ok(Plan {
            id: row.get::<_, i64>(0)? as u64,
            code: row.get(1)?,
            name: row.get(2)?,
            equipment: row.get(3)?,
            frequency_days: row.get::<_, i64>(4)? as u32,
            trigger_type: row.get(5)?,
            specialty: row.get(6)?,
            instructions: row.get(7)?,
            status,
            next_execution,
            created_at: row.get::<_, String>(10)?.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(10, Type::Text, Box::new(e))
            })?,
            updated_at: row.get::<_, String>(11)?.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(11, Type::Text, Box::new(e))
            })?,
            activities: Vec::new(),
        })
    }

    /// Helper function to construct a PlanSummary from a summary view row.
    fn build_summary_from_row(row: &rusqlite::Row) -> rusqlite::Result<PlanSummary> {
        let status_str: String = row.get(5)?;
        let status = status_str.parse::<PlanStatus>().map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                5,
                Type::Text,
                format!("Invalid plan status: {status_str}").into(),
            )
        })?;

        let next_execution = match row.get::<_, Option<String>>(6)? {
            Some(raw) => Some(raw.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e))
            })?),
            None => None,
        };

        Ok(PlanSummary {
            id: row.get::<_, i64>(0)? as u64,
            code: row.get(1)?,
            name: row.get(2)?,
            equipment: row.get(3)?,
            frequency_days: row.get::<_, i64>(4)? as u32,
            status,
            next_execution,
            created_at: row.get::<_, String>(7)?.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(7, Type::Text, Box::new(e))
            })?,
            updated_at: row.get::<_, String>(8)?.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(8, Type::Text, Box::new(e))
            })?,
            activity_count: row.get::<_, i64>(9)? as u32,
            service_count: row.get::<_, i64>(10)? as u32,
            total_time_min: row.get::<_, i64>(11)? as u32,
        })
    }

    /// Creates a new plan. The business code must be unused; it is immutable
    /// afterwards.
    pub fn create_plan(&mut self, request: &CreatePlan) -> Result<Plan> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let code_taken: bool = tx
            .query_row(CHECK_CODE_TAKEN_SQL, params![&request.code], |row| {
                row.get(0)
            })
            .map_err(|e| PlannerError::database("Failed to check plan code").with_source(e))?;

        if code_taken {
            return Err(PlannerError::invalid_input("code")
                .with_reason(format!("Code '{}' is already in use", request.code)));
        }

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(
            INSERT_PLAN_SQL,
            params![
                &request.code,
                &request.name,
                request.equipment.as_deref(),
                request.frequency_days as i64,
                request.trigger_type.as_deref(),
                request.specialty.as_deref(),
                request.instructions.as_deref(),
                PlanStatus::Active.as_str(),
                &now_str,
                &now_str
            ],
        )
        .map_err(|e| PlannerError::database("Failed to insert plan").with_source(e))?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Plan {
            id,
            code: request.code.clone(),
            name: request.name.clone(),
            equipment: request.equipment.clone(),
            frequency_days: request.frequency_days,
            trigger_type: request.trigger_type.clone(),
            specialty: request.specialty.clone(),
            instructions: request.instructions.clone(),
            status: PlanStatus::Active,
            next_execution: None,
            created_at: now,
            updated_at: now,
            activities: Vec::new(),
        })
    }

    /// Retrieves a plan by its ID with its full activity tree.
    pub fn get_plan(&self, id: u64) -> Result<Option<Plan>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_PLAN_SQL)
            .map_err(|e| PlannerError::database("Failed to prepare query").with_source(e))?;

        let mut plan = stmt
            .query_row(params![id as i64], Self::build_plan_from_row)
            .optional()
            .map_err(|e| PlannerError::database("Failed to query plan").with_source(e))?;

        // Eagerly load the activity tree if the plan exists
        if let Some(ref mut plan) = plan {
            plan.activities = self.get_activities(plan.id)?;
        }

        Ok(plan)
    }

    /// Lists plan summaries with optional filtering.
    ///
    /// Counts and total times come from the summary views and are therefore
    /// recomputed on every call.
    pub fn list_plans(&self, filter: Option<&PlanFilter>) -> Result<Vec<PlanSummary>> {
        // Choose the appropriate view based on whether we want to include
        // inactive plans
        let view_name = if filter.as_ref().is_some_and(|f| f.include_inactive) {
            ALL_PLAN_SUMMARIES_VIEW
        } else {
            PLAN_SUMMARIES_VIEW
        };

        let mut query = format!("SELECT {PLAN_SUMMARY_COLUMNS} FROM {view_name}");

        let mut conditions = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(f) = filter {
            if let Some(ref name) = f.name_contains {
                conditions.push("name LIKE ?");
                params_vec.push(Box::new(format!("%{name}%")));
            }

            if let Some(ref equipment) = f.equipment {
                conditions.push("equipment = ?");
                params_vec.push(Box::new(equipment.clone()));
            }

            // Filter by specific status if provided
            if let Some(ref status) = f.status {
                conditions.push("status = ?");
                params_vec.push(Box::new(status.as_str().to_string()));
            }
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }

        query.push_str(" ORDER BY created_at DESC");

        let mut stmt = self
            .connection
            .prepare(&query)
            .map_err(|e| PlannerError::database("Failed to prepare query").with_source(e))?;

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| &**b).collect();

        let summaries = stmt
            .query_map(&params_refs[..], Self::build_summary_from_row)
            .map_err(|e| PlannerError::database("Failed to query plans").with_source(e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| PlannerError::database("Failed to fetch plans").with_source(e))?;

        Ok(summaries)
    }

    /// Updates plan details, preserving any field not present in the request.
    /// The business code and the status are never touched here.
    pub fn update_plan(&mut self, request: &UpdatePlan) -> Result<Plan> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let current = tx
            .query_row(SELECT_PLAN_SQL, params![request.id as i64], |row| {
                Self::build_plan_from_row(row)
            })
            .optional()
            .map_err(|e| PlannerError::database("Failed to query plan").with_source(e))?
            .ok_or(PlannerError::PlanNotFound { id: request.id })?;

        // Use provided values or keep current ones
        let new_name = request.name.clone().unwrap_or(current.name);
        let new_equipment = request.equipment.clone().or(current.equipment);
        let new_frequency = request.frequency_days.unwrap_or(current.frequency_days);
        let new_trigger = request.trigger_type.clone().or(current.trigger_type);
        let new_specialty = request.specialty.clone().or(current.specialty);
        let new_instructions = request.instructions.clone().or(current.instructions);
        let new_next_execution = request.next_execution.or(current.next_execution);

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(
            UPDATE_PLAN_SQL,
            params![
                &new_name,
                new_equipment.as_deref(),
                new_frequency as i64,
                new_trigger.as_deref(),
                new_specialty.as_deref(),
                new_instructions.as_deref(),
                new_next_execution.map(|ts| ts.to_string()),
                &now_str,
                request.id as i64
            ],
        )
        .map_err(|e| PlannerError::database("Failed to update plan").with_source(e))?;

        tx.commit().db_context("Failed to commit transaction")?;

        let mut plan = Plan {
            id: request.id,
            code: current.code,
            name: new_name,
            equipment: new_equipment,
            frequency_days: new_frequency,
            trigger_type: new_trigger,
            specialty: new_specialty,
            instructions: new_instructions,
            status: current.status,
            next_execution: new_next_execution,
            created_at: current.created_at,
            updated_at: now,
            activities: Vec::new(),
        };
        plan.activities = self.get_activities(plan.id)?;

        Ok(plan)
    }

    /// Deactivates a plan, retiring it without deleting anything.
    /// Returns the plan details if it exists, None otherwise.
    pub fn deactivate_plan(&mut self, id: u64) -> Result<Option<Plan>> {
        self.update_plan_status(id, PlanStatus::Active, PlanStatus::Inactive)
    }

    /// Reactivates a previously deactivated plan.
    /// Returns the plan details if it exists, None otherwise.
    pub fn reactivate_plan(&mut self, id: u64) -> Result<Option<Plan>> {
        self.update_plan_status(id, PlanStatus::Inactive, PlanStatus::Active)
    }

    /// Guarded status flip shared by deactivate and reactivate.
    ///
    /// The UPDATE only fires when the plan is currently in `from`; a plan
    /// already in the target status is returned unchanged.
    fn update_plan_status(
        &mut self,
        id: u64,
        from: PlanStatus,
        to: PlanStatus,
    ) -> Result<Option<Plan>> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now().to_string();
        let rows_affected = tx
            .execute(
                UPDATE_PLAN_STATUS_SQL,
                params![to.as_str(), &now, id as i64, from.as_str()],
            )
            .map_err(|e| PlannerError::database("Failed to update plan status").with_source(e))?;

        if rows_affected == 0 {
            // Check if plan exists
            let exists: bool = tx
                .query_row(CHECK_PLAN_EXISTS_SQL, params![id as i64], |row| row.get(0))
                .map_err(|e| {
                    PlannerError::database("Failed to check plan existence").with_source(e)
                })?;

            if !exists {
                return Ok(None);
            }
            // Plan exists but is already in the target status - still return
            // its details
        }

        let plan = tx
            .query_row(SELECT_PLAN_SQL, params![id as i64], Self::build_plan_from_row)
            .optional()
            .map_err(|e| PlannerError::database("Failed to query updated plan").with_source(e))?;

        tx.commit().db_context("Failed to commit transaction")?;

        // Load the activity tree if the plan exists
        let mut plan = plan;
        if let Some(ref mut plan) = plan {
            plan.activities = self.get_activities(plan.id)?;
        }

        Ok(plan)
    }

    /// Permanently deletes a plan, its activities, their services, and its
    /// executions. This operation cannot be undone.
    pub fn delete_plan(&mut self, id: u64) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        // Check if plan exists
        let exists: bool = tx
            .query_row(CHECK_PLAN_EXISTS_SQL, params![id as i64], |row| row.get(0))
            .map_err(|e| PlannerError::database("Failed to check plan existence").with_source(e))?;

        if !exists {
            return Err(PlannerError::PlanNotFound { id });
        }

        // Cascade bottom-up: services, activities, executions, then the plan
        tx.execute(DELETE_PLAN_SERVICES_SQL, params![id as i64])
            .map_err(|e| PlannerError::database("Failed to delete plan services").with_source(e))?;

        tx.execute(DELETE_PLAN_ACTIVITIES_SQL, params![id as i64])
            .map_err(|e| {
                PlannerError::database("Failed to delete plan activities").with_source(e)
            })?;

        tx.execute(DELETE_PLAN_EXECUTIONS_SQL, params![id as i64])
            .map_err(|e| {
                PlannerError::database("Failed to delete plan executions").with_source(e)
            })?;

        tx.execute(DELETE_PLAN_SQL, params![id as i64])
            .map_err(|e| PlannerError::database("Failed to delete plan").with_source(e))?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(())
    }
}
