//! Execution operations for the Planner.

use tokio::task;

use super::Planner;
use crate::{
    db::Database,
    error::{PlannerError, Result},
    models::{Execution, ExecutionFilter},
    params::{CancelExecution, FinishExecution, Id, SetChecklistItem, StartExecution},
};

impl Planner {
    /// Starts a new execution of a plan, freezing the current checklist.
    pub async fn start_execution(&self, params: &StartExecution) -> Result<Execution> {
        let db_path = self.db_path.clone();
        let params = params.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.start_execution(&params)
        })
        .await
        .map_err(|e| PlannerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Retrieves a single execution by its ID.
    pub async fn get_execution(&self, params: &Id) -> Result<Option<Execution>> {
        let db_path = self.db_path.clone();
        let execution_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_execution(execution_id)
        })
        .await
        .map_err(|e| PlannerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Lists executions with optional filtering, most recent first.
    pub async fn list_executions(
        &self,
        filter: Option<ExecutionFilter>,
    ) -> Result<Vec<Execution>> {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_executions(filter.as_ref())
        })
        .await
        .map_err(|e| PlannerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Ticks or unticks one checklist item of an in-progress execution.
    pub async fn set_checklist_item(&self, params: &SetChecklistItem) -> Result<Execution> {
        let db_path = self.db_path.clone();
        let params = params.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.set_checklist_item(&params)
        })
        .await
        .map_err(|e| PlannerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Completes an in-progress execution.
    pub async fn finish_execution(&self, params: &FinishExecution) -> Result<Execution> {
        let db_path = self.db_path.clone();
        let params = params.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.finish_execution(&params)
        })
        .await
        .map_err(|e| PlannerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Cancels an in-progress execution.
    pub async fn cancel_execution(&self, params: &CancelExecution) -> Result<Execution> {
        let db_path = self.db_path.clone();
        let params = params.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.cancel_execution(&params)
        })
        .await
        .map_err(|e| PlannerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
