//! Execution query operations, including the frozen checklist snapshot.

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension};

use crate::{
    checklist,
    error::{DatabaseResultExt, PlannerError, Result},
    models::{ChecklistItem, Execution, ExecutionFilter, ExecutionStatus},
    params::{CancelExecution, FinishExecution, SetChecklistItem, StartExecution},
};

// Optimized SQL queries as const strings for compile-time optimization
const INSERT_EXECUTION_SQL: &str = "INSERT INTO executions (plan_id, executor, execution_date, status, checklist, observations, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";
const SELECT_EXECUTION_SQL: &str = "SELECT id, plan_id, executor, execution_date, status, checklist, observations, real_time_min, created_at, updated_at FROM executions WHERE id = ?1";
const SELECT_EXECUTIONS_SQL: &str = "SELECT id, plan_id, executor, execution_date, status, checklist, observations, real_time_min, created_at, updated_at FROM executions";
const UPDATE_EXECUTION_CHECKLIST_SQL: &str =
    "UPDATE executions SET checklist = ?1, updated_at = ?2 WHERE id = ?3";
const CLOSE_EXECUTION_SQL: &str = "UPDATE executions SET status = ?1, observations = ?2, real_time_min = ?3, updated_at = ?4 WHERE id = ?5";

impl super::Database {
    /// Helper function to construct an Execution from a database row.
    ///
    /// The checklist column holds the JSON snapshot taken when the execution
    /// started; it is decoded here and never re-derived from the plan.
    fn build_execution_from_row(row: &rusqlite::Row) -> rusqlite::Result<Execution> {
        let status_str: String = row.get(4)?;
        let status = status_str.parse::<ExecutionStatus>().map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                4,
                Type::Text,
                format!("Invalid execution status: {status_str}").into(),
            )
        })?;

        let checklist_json: String = row.get(5)?;
        let checklist: Vec<ChecklistItem> = serde_json::from_str(&checklist_json).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e))
        })?;

        Ok(Execution {
            id: row.get::<_, i64>(0)? as u64,
            plan_id: row.get::<_, i64>(1)? as u64,
            executor: row.get(2)?,
            execution_date: row.get::<_, String>(3)?.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e))
            })?,
            status,
            checklist,
            observations: row.get(6)?,
            real_time_min: row.get::<_, Option<i64>>(7)?.map(|v| v as u32),
            created_at: row.get::<_, String>(8)?.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(8, Type::Text, Box::new(e))
            })?,
            updated_at: row.get::<_, String>(9)?.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(9, Type::Text, Box::new(e))
            })?,
        })
    }

    /// Starts a new execution of a plan, freezing the plan's current
    /// checklist into the execution. Later plan edits do not touch it.
    pub fn start_execution(&mut self, request: &StartExecution) -> Result<Execution> {
        // Snapshot the plan structure before opening the write transaction
        let plan = self
            .get_plan(request.plan_id)?
            .ok_or(PlannerError::PlanNotFound {
                id: request.plan_id,
            })?;

        let items = checklist::generate(&plan.activities);
        let checklist_json = serde_json::to_string(&items)?;

        let execution_date = request.execution_date.unwrap_or_else(Timestamp::now);
        let now = Timestamp::now();
        let now_str = now.to_string();

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        tx.execute(
            INSERT_EXECUTION_SQL,
            params![
                request.plan_id as i64,
                &request.executor,
                execution_date.to_string(),
                ExecutionStatus::EmAndamento.as_str(),
                &checklist_json,
                request.observations.as_deref(),
                &now_str,
                &now_str
            ],
        )
        .map_err(|e| PlannerError::database("Failed to insert execution").with_source(e))?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Execution {
            id,
            plan_id: request.plan_id,
            executor: request.executor.clone(),
            execution_date,
            status: ExecutionStatus::EmAndamento,
            checklist: items,
            observations: request.observations.clone(),
            real_time_min: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Retrieves an execution by its ID.
    pub fn get_execution(&self, id: u64) -> Result<Option<Execution>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_EXECUTION_SQL)
            .map_err(|e| PlannerError::database("Failed to prepare query").with_source(e))?;

        stmt.query_row(params![id as i64], Self::build_execution_from_row)
            .optional()
            .map_err(|e| PlannerError::database("Failed to query execution").with_source(e))
    }

    /// Lists executions with optional filtering, most recent first.
    pub fn list_executions(&self, filter: Option<&ExecutionFilter>) -> Result<Vec<Execution>> {
        let mut query = SELECT_EXECUTIONS_SQL.to_string();

        let mut conditions = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(f) = filter {
            if let Some(plan_id) = f.plan_id {
                conditions.push("plan_id = ?");
                params_vec.push(Box::new(plan_id as i64));
            }

            if let Some(ref status) = f.status {
                conditions.push("status = ?");
                params_vec.push(Box::new(status.as_str().to_string()));
            }
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }

        query.push_str(" ORDER BY execution_date DESC, id DESC");

        let mut stmt = self
            .connection
            .prepare(&query)
            .map_err(|e| PlannerError::database("Failed to prepare query").with_source(e))?;

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| &**b).collect();

        let executions = stmt
            .query_map(&params_refs[..], Self::build_execution_from_row)
            .map_err(|e| PlannerError::database("Failed to query executions").with_source(e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| PlannerError::database("Failed to fetch executions").with_source(e))?;

        Ok(executions)
    }

    /// Ticks or unticks one checklist item of an in-progress execution.
    /// Positions are 1-based in checklist order.
    pub fn set_checklist_item(&mut self, request: &SetChecklistItem) -> Result<Execution> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let mut execution = tx
            .query_row(
                SELECT_EXECUTION_SQL,
                params![request.execution_id as i64],
                Self::build_execution_from_row,
            )
            .optional()
            .map_err(|e| PlannerError::database("Failed to query execution").with_source(e))?
            .ok_or(PlannerError::ExecutionNotFound {
                id: request.execution_id,
            })?;

        if execution.status.is_terminal() {
            return Err(PlannerError::execution_closed(
                execution.id,
                execution.status.as_str(),
            ));
        }

        let index = request.position as usize;
        if index == 0 || index > execution.checklist.len() {
            return Err(PlannerError::invalid_input("position").with_reason(format!(
                "Position {} is out of range; the checklist has {} items",
                request.position,
                execution.checklist.len()
            )));
        }

        execution.checklist[index - 1].completed = request.completed;

        let now = Timestamp::now();
        let checklist_json = serde_json::to_string(&execution.checklist)?;

        tx.execute(
            UPDATE_EXECUTION_CHECKLIST_SQL,
            params![&checklist_json, now.to_string(), request.execution_id as i64],
        )
        .map_err(|e| {
            PlannerError::database("Failed to update execution checklist").with_source(e)
        })?;

        tx.commit().db_context("Failed to commit transaction")?;

        execution.updated_at = now;

        Ok(execution)
    }

    /// Completes an in-progress execution, optionally recording observations
    /// and the real time spent.
    pub fn finish_execution(&mut self, request: &FinishExecution) -> Result<Execution> {
        self.close_execution(
            request.id,
            ExecutionStatus::Concluida,
            request.observations.as_deref(),
            request.real_time_min,
        )
    }

    /// Cancels an in-progress execution, optionally recording observations.
    pub fn cancel_execution(&mut self, request: &CancelExecution) -> Result<Execution> {
        self.close_execution(
            request.id,
            ExecutionStatus::Cancelada,
            request.observations.as_deref(),
            None,
        )
    }

    /// Terminal transition shared by finish and cancel.
    ///
    /// Only an in-progress execution can be closed; terminal states are
    /// final.
    fn close_execution(
        &mut self,
        id: u64,
        target: ExecutionStatus,
        observations: Option<&str>,
        real_time_min: Option<u32>,
    ) -> Result<Execution> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let mut execution = tx
            .query_row(
                SELECT_EXECUTION_SQL,
                params![id as i64],
                Self::build_execution_from_row,
            )
            .optional()
            .map_err(|e| PlannerError::database("Failed to query execution").with_source(e))?
            .ok_or(PlannerError::ExecutionNotFound { id })?;

        if execution.status.is_terminal() {
            return Err(PlannerError::execution_closed(
                execution.id,
                execution.status.as_str(),
            ));
        }

        let new_observations = observations
            .map(str::to_string)
            .or(execution.observations.take());
        let new_real_time = real_time_min.or(execution.real_time_min);

        let now = Timestamp::now();

        tx.execute(
            CLOSE_EXECUTION_SQL,
            params![
                target.as_str(),
                new_observations.as_deref(),
                new_real_time.map(|v| v as i64),
                now.to_string(),
                id as i64
            ],
        )
        .map_err(|e| PlannerError::database("Failed to close execution").with_source(e))?;

        tx.commit().db_context("Failed to commit transaction")?;

        execution.status = target;
        execution.observations = new_observations;
        execution.real_time_min = new_real_time;
        execution.updated_at = now;

        Ok(execution)
    }
}
