//! Template query operations: capturing plan structures and replaying them.

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension};

use crate::{
    error::{DatabaseResultExt, PlannerError, Result},
    models::{Plan, Template, TemplateActivity},
    params::{ApplyTemplate, CaptureTemplate},
};

// Optimized SQL queries as const strings for compile-time optimization
const INSERT_TEMPLATE_SQL: &str =
    "INSERT INTO templates (name, description, structure, created_at) VALUES (?1, ?2, ?3, ?4)";
const SELECT_TEMPLATE_SQL: &str =
    "SELECT id, name, description, structure, created_at FROM templates WHERE id = ?1";
const SELECT_TEMPLATES_SQL: &str = "SELECT id, name, description, structure, created_at FROM templates ORDER BY created_at DESC";
const DELETE_TEMPLATE_SQL: &str = "DELETE FROM templates WHERE id = ?1";
const CHECK_PLAN_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM plans WHERE id = ?1)";
const INSERT_ACTIVITY_SQL: &str = "INSERT INTO activities (plan_id, name, responsible, activity_order, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const INSERT_SERVICE_SQL: &str = "INSERT INTO services (activity_id, description, estimated_time_min, service_order, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const UPDATE_PLAN_TIMESTAMP_SQL: &str = "UPDATE plans SET updated_at = ?1 WHERE id = ?2";

impl super::Database {
    /// Helper function to construct a Template from a database row.
    ///
    /// The structure column holds the ID-free JSON snapshot taken at capture
    /// time.
    fn build_template_from_row(row: &rusqlite::Row) -> rusqlite::Result<Template> {
        let structure_json: String = row.get(3)?;
        let structure: Vec<TemplateActivity> =
            serde_json::from_str(&structure_json).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e))
            })?;

        Ok(Template {
            id: row.get::<_, i64>(0)? as u64,
            name: row.get(1)?,
            description: row.get(2)?,
            structure,
            created_at: row.get::<_, String>(4)?.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e))
            })?,
        })
    }

    /// Captures a plan's current activity tree as a reusable template.
    ///
    /// The snapshot strips all IDs and keeps names, descriptions, estimates,
    /// and order values. A plan with no activities cannot be captured.
    pub fn capture_template(&mut self, request: &CaptureTemplate) -> Result<Template> {
        let plan = self
            .get_plan(request.plan_id)?
            .ok_or(PlannerError::PlanNotFound {
                id: request.plan_id,
            })?;

        if plan.activities.is_empty() {
            return Err(PlannerError::invalid_input("plan_id").with_reason(format!(
                "Plan {} has no activities to capture",
                request.plan_id
            )));
        }

        let structure: Vec<TemplateActivity> =
            plan.activities.iter().map(TemplateActivity::from).collect();
        let structure_json = serde_json::to_string(&structure)?;

        let now = Timestamp::now();

        self.connection
            .execute(
                INSERT_TEMPLATE_SQL,
                params![
                    &request.name,
                    request.description.as_deref(),
                    &structure_json,
                    now.to_string()
                ],
            )
            .map_err(|e| PlannerError::database("Failed to insert template").with_source(e))?;

        let id = self.connection.last_insert_rowid() as u64;

        Ok(Template {
            id,
            name: request.name.clone(),
            description: request.description.clone(),
            structure,
            created_at: now,
        })
    }

    /// Retrieves a template by its ID.
    pub fn get_template(&self, id: u64) -> Result<Option<Template>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_TEMPLATE_SQL)
            .map_err(|e| PlannerError::database("Failed to prepare query").with_source(e))?;

        stmt.query_row(params![id as i64], Self::build_template_from_row)
            .optional()
            .map_err(|e| PlannerError::database("Failed to query template").with_source(e))
    }

    /// Lists all templates, most recent first.
    pub fn list_templates(&self) -> Result<Vec<Template>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_TEMPLATES_SQL)
            .map_err(|e| PlannerError::database("Failed to prepare query").with_source(e))?;

        let templates = stmt
            .query_map([], Self::build_template_from_row)
            .map_err(|e| PlannerError::database("Failed to query templates").with_source(e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| PlannerError::database("Failed to fetch templates").with_source(e))?;

        Ok(templates)
    }

    /// Recreates a template's structure under an existing plan.
    ///
    /// Every template entry becomes a fresh activity with fresh services;
    /// order values are copied verbatim, so replaying onto a plan that
    /// already has activities can produce duplicate order values. Reads stay
    /// deterministic because the ID breaks ties.
    pub fn apply_template(&mut self, request: &ApplyTemplate) -> Result<Plan> {
        let template =
            self.get_template(request.template_id)?
                .ok_or(PlannerError::TemplateNotFound {
                    id: request.template_id,
                })?;

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

        let now = Timestamp::now().to_string();

        for activity in &template.structure {
            tx.execute(
                INSERT_ACTIVITY_SQL,
                params![
                    request.plan_id as i64,
                    &activity.name,
                    activity.responsible.as_deref(),
                    activity.order as i64,
                    &now,
                    &now
                ],
            )
            .map_err(|e| PlannerError::database("Failed to insert activity").with_source(e))?;

            let activity_id = tx.last_insert_rowid();

            for service in &activity.services {
                tx.execute(
                    INSERT_SERVICE_SQL,
                    params![
                        activity_id,
                        &service.description,
                        service.estimated_time_min.map(|v| v as i64),
                        service.order as i64,
                        &now,
                        &now
                    ],
                )
                .map_err(|e| PlannerError::database("Failed to insert service").with_source(e))?;
            }
        }

        tx.execute(
            UPDATE_PLAN_TIMESTAMP_SQL,
            params![&now, request.plan_id as i64],
        )
        .map_err(|e| PlannerError::database("Failed to update plan timestamp").with_source(e))?;

        tx.commit().db_context("Failed to commit transaction")?;

        self.get_plan(request.plan_id)?
            .ok_or(PlannerError::PlanNotFound {
                id: request.plan_id,
            })
    }

    /// Deletes a template. Plans created from it are not affected.
    pub fn delete_template(&mut self, id: u64) -> Result<()> {
        let rows_affected = self
            .connection
            .execute(DELETE_TEMPLATE_SQL, params![id as i64])
            .map_err(|e| PlannerError::database("Failed to delete template").with_source(e))?;

        if rows_affected == 0 {
            return Err(PlannerError::TemplateNotFound { id });
        }

        Ok(())
    }
}
