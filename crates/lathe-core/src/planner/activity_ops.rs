//! Activity operations for the Planner.

use tokio::task;

use super::Planner;
use crate::{
    db::Database,
    error::{PlannerError, Result},
    models::Activity,
    params::{ActivityCreate, Id, MoveActivity, UpdateActivity},
};

impl Planner {
    /// Adds a new activity at the end of the plan's sequence.
    pub async fn add_activity(&self, params: &ActivityCreate) -> Result<Activity> {
        let db_path = self.db_path.clone();
        let params = params.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.add_activity(&params)
        })
        .await
        .map_err(|e| PlannerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Retrieves a single activity by its ID, services included.
    pub async fn get_activity(&self, params: &Id) -> Result<Option<Activity>> {
        let db_path = self.db_path.clone();
        let activity_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_activity(activity_id)
        })
        .await
        .map_err(|e| PlannerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Retrieves all activities for a given plan in display order.
    pub async fn get_activities(&self, params: &Id) -> Result<crate::display::Activities> {
        let db_path = self.db_path.clone();
        let plan_id = params.id;

        let activities = task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_activities(plan_id)
        })
        .await
        .map_err(|e| PlannerError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        Ok(crate::display::Activities(activities))
    }

    /// Updates activity details (name and/or responsible).
    pub async fn update_activity(&self, params: &UpdateActivity) -> Result<Activity> {
        let db_path = self.db_path.clone();
        let params = params.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.update_activity(&params)
        })
        .await
        .map_err(|e| PlannerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Moves an activity one position up or down among its siblings.
    /// A move at the boundary leaves the order unchanged.
    pub async fn move_activity(&self, params: &MoveActivity) -> Result<Activity> {
        let db_path = self.db_path.clone();
        let params = params.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.move_activity(&params)
        })
        .await
        .map_err(|e| PlannerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Removes an activity and its services from a plan.
    pub async fn remove_activity(&self, params: &Id) -> Result<()> {
        let db_path = self.db_path.clone();
        let activity_id = params.id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.remove_activity(activity_id)
        })
        .await
        .map_err(|e| PlannerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
