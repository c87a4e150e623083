//! Template operations for the Planner.

use tokio::task;

use super::Planner;
use crate::{
    db::Database,
    error::{PlannerError, Result},
    models::{Plan, Template},
    params::{ApplyTemplate, CaptureTemplate, Id},
};

impl Planner {
    /// Captures a plan's current activity tree as a reusable template.
    pub async fn capture_template(&self, params: &CaptureTemplate) -> Result<Template> {
        let db_path = self.db_path.clone();
        let params = params.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.capture_template(&params)
        })
        .await
        .map_err(|e| PlannerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Retrieves a single template by its ID.
    pub async fn get_template(&self, params: &Id) -> Result<Option<Template>> {
        let db_path = self.db_path.clone();
        let template_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_template(template_id)
        })
        .await
        .map_err(|e| PlannerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Lists all templates, most recent first.
    pub async fn list_templates(&self) -> Result<Vec<Template>> {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_templates()
        })
        .await
        .map_err(|e| PlannerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Recreates a template's structure under an existing plan and returns
    /// the plan with the new tree loaded.
    pub async fn apply_template(&self, params: &ApplyTemplate) -> Result<Plan> {
        let db_path = self.db_path.clone();
        let params = params.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.apply_template(&params)
        })
        .await
        .map_err(|e| PlannerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Deletes a template. Plans created from it are not affected.
    pub async fn delete_template_by_id(&self, params: &Id) -> Result<()> {
        let db_path = self.db_path.clone();
        let template_id = params.id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.delete_template(template_id)
        })
        .await
        .map_err(|e| PlannerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
