//! Activity query operations for plans.

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension};

use crate::{
    error::{DatabaseResultExt, PlannerError, Result},
    models::Activity,
    params::{ActivityCreate, MoveActivity, MoveDirection, UpdateActivity},
};

// Optimized SQL queries as const strings for compile-time optimization
const INSERT_ACTIVITY_SQL: &str = "INSERT INTO activities (plan_id, name, responsible, activity_order, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const SELECT_ACTIVITY_SQL: &str = "SELECT id, plan_id, name, responsible, activity_order, created_at, updated_at FROM activities WHERE id = ?1";
const SELECT_ACTIVITIES_SQL: &str = "SELECT id, plan_id, name, responsible, activity_order, created_at, updated_at FROM activities WHERE plan_id = ?1 ORDER BY activity_order, id";
const NEXT_ACTIVITY_ORDER_SQL: &str =
    "SELECT COALESCE(MAX(activity_order), 0) + 1 FROM activities WHERE plan_id = ?1";
const CHECK_PLAN_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM plans WHERE id = ?1)";
const SELECT_ACTIVITY_POSITION_SQL: &str =
    "SELECT plan_id, activity_order FROM activities WHERE id = ?1";
const SELECT_PREVIOUS_ACTIVITY_SQL: &str = "SELECT id, activity_order FROM activities WHERE plan_id = ?1 AND (activity_order < ?2 OR (activity_order = ?2 AND id < ?3)) ORDER BY activity_order DESC, id DESC LIMIT 1";
const SELECT_NEXT_ACTIVITY_SQL: &str = "SELECT id, activity_order FROM activities WHERE plan_id = ?1 AND (activity_order > ?2 OR (activity_order = ?2 AND id > ?3)) ORDER BY activity_order ASC, id ASC LIMIT 1";
const UPDATE_ACTIVITY_SQL: &str =
    "UPDATE activities SET name = ?1, responsible = ?2, updated_at = ?3 WHERE id = ?4";
const UPDATE_ACTIVITY_ORDER_SQL: &str =
    "UPDATE activities SET activity_order = ?1, updated_at = ?2 WHERE id = ?3";
const DELETE_ACTIVITY_SERVICES_SQL: &str = "DELETE FROM services WHERE activity_id = ?1";
const DELETE_ACTIVITY_SQL: &str = "DELETE FROM activities WHERE id = ?1";
const UPDATE_PLAN_TIMESTAMP_SQL: &str = "UPDATE plans SET updated_at = ?1 WHERE id = ?2";
const UPDATE_PLAN_TIMESTAMP_BY_ACTIVITY_SQL: &str =
    "UPDATE plans SET updated_at = ?1 WHERE id = (SELECT plan_id FROM activities WHERE id = ?2)";

impl super::Database {
    /// Helper function to construct an Activity from a database row.
    ///
    /// Services start empty and are loaded separately.
    fn build_activity_from_row(row: &rusqlite::Row) -> rusqlite::Result<Activity> {
        Ok(Activity {
            id: row.get::<_, i64>(0)? as u64,
            plan_id: row.get::<_, i64>(1)? as u64,
            name: row.get(2)?,
            responsible: row.get(3)?,
            order: row.get::<_, i64>(4)? as u32,
            created_at: row.get::<_, String>(5)?.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e))
            })?,
            updated_at: row.get::<_, String>(6)?.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e))
            })?,
            services: Vec::new(),
        })
    }

    /// Adds a new activity at the end of the plan's sequence.
    pub fn add_activity(&mut self, request: &ActivityCreate) -> Result<Activity> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let plan_exists: bool = tx
            .query_row(CHECK_PLAN_EXISTS_SQL, params![request.plan_id as i64], |row| {
                row.get(0)
            })
            .map_err(|e| PlannerError::database("Failed to check plan existence").with_source(e))?;

        if !plan_exists {
            return Err(PlannerError::PlanNotFound {
                id: request.plan_id,
            });
        }

        // Orders start at 1; append after the current maximum
        let order: i64 = tx
            .query_row(NEXT_ACTIVITY_ORDER_SQL, params![request.plan_id as i64], |row| {
                row.get(0)
            })
            .map_err(|e| {
                PlannerError::database("Failed to determine activity order").with_source(e)
            })?;

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(
            INSERT_ACTIVITY_SQL,
            params![
                request.plan_id as i64,
                &request.name,
                request.responsible.as_deref(),
                order,
                &now_str,
                &now_str
            ],
        )
        .map_err(|e| PlannerError::database("Failed to insert activity").with_source(e))?;

        let id = tx.last_insert_rowid() as u64;

        tx.execute(
            UPDATE_PLAN_TIMESTAMP_SQL,
            params![&now_str, request.plan_id as i64],
        )
        .map_err(|e| PlannerError::database("Failed to update plan timestamp").with_source(e))?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Activity {
            id,
            plan_id: request.plan_id,
            name: request.name.clone(),
            responsible: request.responsible.clone(),
            order: order as u32,
            created_at: now,
            updated_at: now,
            services: Vec::new(),
        })
    }

    /// Retrieves an activity by its ID with its services.
    pub fn get_activity(&self, id: u64) -> Result<Option<Activity>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_ACTIVITY_SQL)
            .map_err(|e| PlannerError::database("Failed to prepare query").with_source(e))?;

        let mut activity = stmt
            .query_row(params![id as i64], Self::build_activity_from_row)
            .optional()
            .map_err(|e| PlannerError::database("Failed to query activity").with_source(e))?;

        if let Some(ref mut activity) = activity {
            activity.services = self.get_services(activity.id)?;
        }

        Ok(activity)
    }

    /// Retrieves all activities for a plan, ordered by position with the ID
    /// as tie-breaker.
    pub fn get_activities(&self, plan_id: u64) -> Result<Vec<Activity>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_ACTIVITIES_SQL)
            .map_err(|e| PlannerError::database("Failed to prepare query").with_source(e))?;

        let mut activities = stmt
            .query_map(params![plan_id as i64], Self::build_activity_from_row)
            .map_err(|e| PlannerError::database("Failed to query activities").with_source(e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| PlannerError::database("Failed to fetch activities").with_source(e))?;

        for activity in &mut activities {
            activity.services = self.get_services(activity.id)?;
        }

        Ok(activities)
    }

    /// Updates an activity's details, preserving any field not present in the
    /// request. The position is changed through `move_activity` only.
    pub fn update_activity(&mut self, request: &UpdateActivity) -> Result<Activity> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let current = tx
            .query_row(SELECT_ACTIVITY_SQL, params![request.id as i64], |row| {
                Self::build_activity_from_row(row)
            })
            .optional()
            .map_err(|e| PlannerError::database("Failed to query activity").with_source(e))?
            .ok_or(PlannerError::ActivityNotFound { id: request.id })?;

        let new_name = request.name.clone().unwrap_or(current.name);
        let new_responsible = request.responsible.clone().or(current.responsible);

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(
            UPDATE_ACTIVITY_SQL,
            params![
                &new_name,
                new_responsible.as_deref(),
                &now_str,
                request.id as i64
            ],
        )
        .map_err(|e| PlannerError::database("Failed to update activity").with_source(e))?;

        tx.execute(
            UPDATE_PLAN_TIMESTAMP_SQL,
            params![&now_str, current.plan_id as i64],
        )
        .map_err(|e| PlannerError::database("Failed to update plan timestamp").with_source(e))?;

        tx.commit().db_context("Failed to commit transaction")?;

        let mut activity = Activity {
            id: request.id,
            plan_id: current.plan_id,
            name: new_name,
            responsible: new_responsible,
            order: current.order,
            created_at: current.created_at,
            updated_at: now,
            services: Vec::new(),
        };
        activity.services = self.get_services(activity.id)?;

        Ok(activity)
    }

    /// Moves an activity one position up or down by swapping order values
    /// with its neighbor. At the boundary there is no neighbor and the
    /// activity stays where it is.
    pub fn move_activity(&mut self, request: &MoveActivity) -> Result<Activity> {
        {
            let tx = self
                .connection
                .transaction()
                .db_context("Failed to begin transaction")?;

            let (plan_id, order) = tx
                .query_row(
                    SELECT_ACTIVITY_POSITION_SQL,
                    params![request.id as i64],
                    |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)),
                )
                .optional()
                .map_err(|e| PlannerError::database("Failed to query activity").with_source(e))?
                .ok_or(PlannerError::ActivityNotFound { id: request.id })?;

            let neighbor_sql = match request.direction {
                MoveDirection::Up => SELECT_PREVIOUS_ACTIVITY_SQL,
                MoveDirection::Down => SELECT_NEXT_ACTIVITY_SQL,
            };

            let neighbor = tx
                .query_row(neighbor_sql, params![plan_id, order, request.id as i64], |row| {
                    Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?))
                })
                .optional()
                .map_err(|e| {
                    PlannerError::database("Failed to query neighboring activity").with_source(e)
                })?;

            if let Some((neighbor_id, neighbor_order)) = neighbor {
                let now = Timestamp::now().to_string();

                tx.execute(
                    UPDATE_ACTIVITY_ORDER_SQL,
                    params![neighbor_order, &now, request.id as i64],
                )
                .map_err(|e| {
                    PlannerError::database("Failed to update activity order").with_source(e)
                })?;

                tx.execute(
                    UPDATE_ACTIVITY_ORDER_SQL,
                    params![order, &now, neighbor_id],
                )
                .map_err(|e| {
                    PlannerError::database("Failed to update neighboring activity order")
                        .with_source(e)
                })?;

                tx.execute(UPDATE_PLAN_TIMESTAMP_SQL, params![&now, plan_id])
                    .map_err(|e| {
                        PlannerError::database("Failed to update plan timestamp").with_source(e)
                    })?;

                tx.commit().db_context("Failed to commit transaction")?;
            }
            // No neighbor means the activity is already at the boundary;
            // the transaction is dropped without writing anything
        }

        self.get_activity(request.id)?
            .ok_or(PlannerError::ActivityNotFound { id: request.id })
    }

    /// Removes an activity and its services. Remaining activities keep their
    /// order values; gaps are fine.
    pub fn remove_activity(&mut self, id: u64) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now().to_string();

        tx.execute(UPDATE_PLAN_TIMESTAMP_BY_ACTIVITY_SQL, params![&now, id as i64])
            .map_err(|e| {
                PlannerError::database("Failed to update plan timestamp").with_source(e)
            })?;

        tx.execute(DELETE_ACTIVITY_SERVICES_SQL, params![id as i64])
            .map_err(|e| {
                PlannerError::database("Failed to delete activity services").with_source(e)
            })?;

        let rows_affected = tx
            .execute(DELETE_ACTIVITY_SQL, params![id as i64])
            .map_err(|e| PlannerError::database("Failed to delete activity").with_source(e))?;

        if rows_affected == 0 {
            return Err(PlannerError::ActivityNotFound { id });
        }

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(())
    }
}
