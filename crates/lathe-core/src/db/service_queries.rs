//! Service query operations for activities.

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension};

use crate::{
    error::{DatabaseResultExt, PlannerError, Result},
    models::Service,
    params::{MoveDirection, MoveService, ServiceCreate, UpdateService},
};

// Optimized SQL queries as const strings for compile-time optimization
const INSERT_SERVICE_SQL: &str = "INSERT INTO services (activity_id, description, estimated_time_min, service_order, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const SELECT_SERVICE_SQL: &str = "SELECT id, activity_id, description, estimated_time_min, service_order, created_at, updated_at FROM services WHERE id = ?1";
const SELECT_SERVICES_SQL: &str = "SELECT id, activity_id, description, estimated_time_min, service_order, created_at, updated_at FROM services WHERE activity_id = ?1 ORDER BY service_order, id";
const NEXT_SERVICE_ORDER_SQL: &str =
    "SELECT COALESCE(MAX(service_order), 0) + 1 FROM services WHERE activity_id = ?1";
const CHECK_ACTIVITY_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM activities WHERE id = ?1)";
const SELECT_SERVICE_POSITION_SQL: &str =
    "SELECT activity_id, service_order FROM services WHERE id = ?1";
const SELECT_PREVIOUS_SERVICE_SQL: &str = "SELECT id, service_order FROM services WHERE activity_id = ?1 AND (service_order < ?2 OR (service_order = ?2 AND id < ?3)) ORDER BY service_order DESC, id DESC LIMIT 1";
const SELECT_NEXT_SERVICE_SQL: &str = "SELECT id, service_order FROM services WHERE activity_id = ?1 AND (service_order > ?2 OR (service_order = ?2 AND id > ?3)) ORDER BY service_order ASC, id ASC LIMIT 1";
const UPDATE_SERVICE_SQL: &str =
    "UPDATE services SET description = ?1, estimated_time_min = ?2, updated_at = ?3 WHERE id = ?4";
const UPDATE_SERVICE_ORDER_SQL: &str =
    "UPDATE services SET service_order = ?1, updated_at = ?2 WHERE id = ?3";
const DELETE_SERVICE_SQL: &str = "DELETE FROM services WHERE id = ?1";
const UPDATE_PLAN_TIMESTAMP_BY_ACTIVITY_SQL: &str =
    "UPDATE plans SET updated_at = ?1 WHERE id = (SELECT plan_id FROM activities WHERE id = ?2)";
const UPDATE_PLAN_TIMESTAMP_BY_SERVICE_SQL: &str = "UPDATE plans SET updated_at = ?1 WHERE id = (SELECT a.plan_id FROM activities a JOIN services s ON s.activity_id = a.id WHERE s.id = ?2)";

impl super::Database {
    /// Helper function to construct a Service from a database row.
    fn build_service_from_row(row: &rusqlite::Row) -> rusqlite::Result<Service> {
        Ok(Service {
            id: row.get::<_, i64>(0)? as u64,
            activity_id: row.get::<_, i64>(1)? as u64,
            description: row.get(2)?,
            estimated_time_min: row.get::<_, Option<i64>>(3)?.map(|v| v as u32),
            order: row.get::<_, i64>(4)? as u32,
            created_at: row.get::<_, String>(5)?.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e))
            })?,
            updated_at: row.get::<_, String>(6)?.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e))
            })?,
        })
    }

    /// Adds a new service at the end of the activity's sequence.
    pub fn add_service(&mut self, request: &ServiceCreate) -> Result<Service> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let activity_exists: bool = tx
            .query_row(
                CHECK_ACTIVITY_EXISTS_SQL,
                params![request.activity_id as i64],
                |row| row.get(0),
            )
            .map_err(|e| {
                PlannerError::database("Failed to check activity existence").with_source(e)
            })?;

        if !activity_exists {
            return Err(PlannerError::ActivityNotFound {
                id: request.activity_id,
            });
        }

        // Orders start at 1; append after the current maximum
        let order: i64 = tx
            .query_row(
                NEXT_SERVICE_ORDER_SQL,
                params![request.activity_id as i64],
                |row| row.get(0),
            )
            .map_err(|e| {
                PlannerError::database("Failed to determine service order").with_source(e)
            })?;

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(
            INSERT_SERVICE_SQL,
            params![
                request.activity_id as i64,
                &request.description,
                request.estimated_time_min.map(|v| v as i64),
                order,
                &now_str,
                &now_str
            ],
        )
        .map_err(|e| PlannerError::database("Failed to insert service").with_source(e))?;

        let id = tx.last_insert_rowid() as u64;

        tx.execute(
            UPDATE_PLAN_TIMESTAMP_BY_ACTIVITY_SQL,
            params![&now_str, request.activity_id as i64],
        )
        .map_err(|e| PlannerError::database("Failed to update plan timestamp").with_source(e))?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Service {
            id,
            activity_id: request.activity_id,
            description: request.description.clone(),
            estimated_time_min: request.estimated_time_min,
            order: order as u32,
            created_at: now,
            updated_at: now,
        })
    }

    /// Retrieves a service by its ID.
    pub fn get_service(&self, id: u64) -> Result<Option<Service>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_SERVICE_SQL)
            .map_err(|e| PlannerError::database("Failed to prepare query").with_source(e))?;

        stmt.query_row(params![id as i64], Self::build_service_from_row)
            .optional()
            .map_err(|e| PlannerError::database("Failed to query service").with_source(e))
    }

    /// Retrieves all services for an activity, ordered by position with the
    /// ID as tie-breaker.
    pub fn get_services(&self, activity_id: u64) -> Result<Vec<Service>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_SERVICES_SQL)
            .map_err(|e| PlannerError::database("Failed to prepare query").with_source(e))?;

        let services = stmt
            .query_map(params![activity_id as i64], Self::build_service_from_row)
            .map_err(|e| PlannerError::database("Failed to query services").with_source(e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| PlannerError::database("Failed to fetch services").with_source(e))?;

        Ok(services)
    }

    /// Updates a service's details, preserving any field not present in the
    /// request. The position is changed through `move_service` only.
    pub fn update_service(&mut self, request: &UpdateService) -> Result<Service> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let current = tx
            .query_row(SELECT_SERVICE_SQL, params![request.id as i64], |row| {
                Self::build_service_from_row(row)
            })
            .optional()
            .map_err(|e| PlannerError::database("Failed to query service").with_source(e))?
            .ok_or(PlannerError::ServiceNotFound { id: request.id })?;

        let new_description = request.description.clone().unwrap_or(current.description);
        let new_estimated = request.estimated_time_min.or(current.estimated_time_min);

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(
            UPDATE_SERVICE_SQL,
            params![
                &new_description,
                new_estimated.map(|v| v as i64),
                &now_str,
                request.id as i64
            ],
        )
        .map_err(|e| PlannerError::database("Failed to update service").with_source(e))?;

        tx.execute(
            UPDATE_PLAN_TIMESTAMP_BY_ACTIVITY_SQL,
            params![&now_str, current.activity_id as i64],
        )
        .map_err(|e| PlannerError::database("Failed to update plan timestamp").with_source(e))?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Service {
            id: request.id,
            activity_id: current.activity_id,
            description: new_description,
            estimated_time_min: new_estimated,
            order: current.order,
            created_at: current.created_at,
            updated_at: now,
        })
    }

    /// Moves a service one position up or down within its activity by
    /// swapping order values with its neighbor. At the boundary there is no
    /// neighbor and the service stays where it is.
    pub fn move_service(&mut self, request: &MoveService) -> Result<Service> {
        {
            let tx = self
                .connection
                .transaction()
                .db_context("Failed to begin transaction")?;

            let (activity_id, order) = tx
                .query_row(
                    SELECT_SERVICE_POSITION_SQL,
                    params![request.id as i64],
                    |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)),
                )
                .optional()
                .map_err(|e| PlannerError::database("Failed to query service").with_source(e))?
                .ok_or(PlannerError::ServiceNotFound { id: request.id })?;

            let neighbor_sql = match request.direction {
                MoveDirection::Up => SELECT_PREVIOUS_SERVICE_SQL,
                MoveDirection::Down => SELECT_NEXT_SERVICE_SQL,
            };

            let neighbor = tx
                .query_row(
                    neighbor_sql,
                    params![activity_id, order, request.id as i64],
                    |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)),
                )
                .optional()
                .map_err(|e| {
                    PlannerError::database("Failed to query neighboring service").with_source(e)
                })?;

            if let Some((neighbor_id, neighbor_order)) = neighbor {
                let now = Timestamp::now().to_string();

                tx.execute(
                    UPDATE_SERVICE_ORDER_SQL,
                    params![neighbor_order, &now, request.id as i64],
                )
                .map_err(|e| {
                    PlannerError::database("Failed to update service order").with_source(e)
                })?;

                tx.execute(UPDATE_SERVICE_ORDER_SQL, params![order, &now, neighbor_id])
                    .map_err(|e| {
                        PlannerError::database("Failed to update neighboring service order")
                            .with_source(e)
                    })?;

                tx.execute(
                    UPDATE_PLAN_TIMESTAMP_BY_ACTIVITY_SQL,
                    params![&now, activity_id],
                )
                .map_err(|e| {
                    PlannerError::database("Failed to update plan timestamp").with_source(e)
                })?;

                tx.commit().db_context("Failed to commit transaction")?;
            }
            // No neighbor means the service is already at the boundary;
            // the transaction is dropped without writing anything
        }

        self.get_service(request.id)?
            .ok_or(PlannerError::ServiceNotFound { id: request.id })
    }

    /// Removes a service. Remaining services keep their order values; gaps
    /// are fine.
    pub fn remove_service(&mut self, id: u64) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now().to_string();

        tx.execute(UPDATE_PLAN_TIMESTAMP_BY_SERVICE_SQL, params![&now, id as i64])
            .map_err(|e| {
                PlannerError::database("Failed to update plan timestamp").with_source(e)
            })?;

        let rows_affected = tx
            .execute(DELETE_SERVICE_SQL, params![id as i64])
            .map_err(|e| PlannerError::database("Failed to delete service").with_source(e))?;

        if rows_affected == 0 {
            return Err(PlannerError::ServiceNotFound { id });
        }

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(())
    }
}
