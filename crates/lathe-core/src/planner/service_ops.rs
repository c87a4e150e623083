//! Service operations for the Planner.

use tokio::task;

use super::Planner;
use crate::{
    db::Database,
    error::{PlannerError, Result},
    models::Service,
    params::{Id, MoveService, ServiceCreate, UpdateService},
};

impl Planner {
    /// Adds a new service at the end of the activity's sequence.
    pub async fn add_service(&self, params: &ServiceCreate) -> Result<Service> {
        let db_path = self.db_path.clone();
        let params = params.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.add_service(&params)
        })
        .await
        .map_err(|e| PlannerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Retrieves a single service by its ID.
    pub async fn get_service(&self, params: &Id) -> Result<Option<Service>> {
        let db_path = self.db_path.clone();
        let service_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_service(service_id)
        })
        .await
        .map_err(|e| PlannerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Updates service details (description and/or estimated time).
    pub async fn update_service(&self, params: &UpdateService) -> Result<Service> {
        let db_path = self.db_path.clone();
        let params = params.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.update_service(&params)
        })
        .await
        .map_err(|e| PlannerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Moves a service one position up or down within its activity.
    /// A move at the boundary leaves the order unchanged.
    pub async fn move_service(&self, params: &MoveService) -> Result<Service> {
        let db_path = self.db_path.clone();
        let params = params.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.move_service(&params)
        })
        .await
        .map_err(|e| PlannerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Removes a service from its activity.
    pub async fn remove_service(&self, params: &Id) -> Result<()> {
        let db_path = self.db_path.clone();
        let service_id = params.id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.remove_service(service_id)
        })
        .await
        .map_err(|e| PlannerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
