//! Service handler operations that return formatted wrapper types for the Planner.

use crate::{
    error::Result,
    models::Service,
    params::{Id, MoveService, ServiceCreate, UpdateService},
};

use super::Planner;

impl Planner {
    /// Handle adding a service to an activity.
    ///
    /// Validates the parameters, appends the service at the end of the
    /// activity's ordering, and returns the created service object for
    /// confirmation.
    ///
    /// # Arguments
    ///
    /// * `params` - Service creation parameters
    ///
    /// # Returns
    ///
    /// The newly created Service object
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use lathe_core::{params::ServiceCreate, PlannerBuilder};
    /// # async {
    /// let planner = PlannerBuilder::new().build().await?;
    /// let params = ServiceCreate {
    ///     activity_id: 1,
    ///     description: "Check oil level".to_string(),
    ///     estimated_time_min: Some(10),
    /// };
    /// let service = planner.add_service_to_activity(&params).await?;
    /// # Result::<(), lathe_core::PlannerError>::Ok(())
    /// # };
    /// ```
    pub async fn add_service_to_activity(&self, params: &ServiceCreate) -> Result<Service> {
        params.validate()?;
        self.add_service(params).await
    }

    /// Handle showing a specific service.
    ///
    /// # Arguments
    ///
    /// * `params` - ID parameters specifying which service to retrieve
    ///
    /// # Returns
    ///
    /// An optional Service object if the service exists, or None if not found
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use lathe_core::{params::Id, PlannerBuilder};
    /// # async {
    /// let planner = PlannerBuilder::new().build().await?;
    /// let params = Id { id: 1 };
    /// let service = planner.show_service_details(&params).await?;
    /// # Result::<(), lathe_core::PlannerError>::Ok(())
    /// # };
    /// ```
    pub async fn show_service_details(&self, params: &Id) -> Result<Option<Service>> {
        self.get_service(params).await
    }

    /// Handle updating a service's properties with validation.
    ///
    /// Updates the specified service with new values. Passing no estimated
    /// time keeps the current value; the order cannot be changed here.
    ///
    /// # Arguments
    ///
    /// * `params` - Update parameters containing service ID and new values
    ///
    /// # Returns
    ///
    /// The updated Service object
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::ServiceNotFound` if the service doesn't exist
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use lathe_core::{params::UpdateService, PlannerBuilder};
    /// # async {
    /// let planner = PlannerBuilder::new().build().await?;
    /// let params = UpdateService {
    ///     id: 1,
    ///     description: None,
    ///     estimated_time_min: Some(15),
    /// };
    /// let service = planner.update_service_validated(&params).await?;
    /// # Result::<(), lathe_core::PlannerError>::Ok(())
    /// # };
    /// ```
    pub async fn update_service_validated(&self, params: &UpdateService) -> Result<Service> {
        params.validate()?;
        self.update_service(params).await
    }

    /// Handle moving a service one position up or down within its activity.
    ///
    /// Swaps the service's order value with its display-order neighbor in
    /// the requested direction. Moving past the first or last position is a
    /// no-op that returns the service unchanged.
    ///
    /// # Arguments
    ///
    /// * `params` - Move parameters containing the service ID and direction
    ///
    /// # Returns
    ///
    /// The Service object in its resulting position
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use lathe_core::{params::{MoveDirection, MoveService}, PlannerBuilder};
    /// # async {
    /// let planner = PlannerBuilder::new().build().await?;
    /// let params = MoveService {
    ///     id: 1,
    ///     direction: MoveDirection::Up,
    /// };
    /// let service = planner.move_service_position(&params).await?;
    /// # Result::<(), lathe_core::PlannerError>::Ok(())
    /// # };
    /// ```
    pub async fn move_service_position(&self, params: &MoveService) -> Result<Service> {
        self.move_service(params).await
    }

    /// Handle removing a service from its activity.
    ///
    /// Uses get-before-delete pattern to return the removed service details
    /// for confirmation. Remaining services keep their order values.
    ///
    /// # Arguments
    ///
    /// * `params` - ID parameters specifying which service to remove
    ///
    /// # Returns
    ///
    /// Returns the service details that were removed, or None if the
    /// service doesn't exist
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use lathe_core::{params::Id, PlannerBuilder};
    /// # async {
    /// let planner = PlannerBuilder::new().build().await?;
    /// let params = Id { id: 1 };
    /// let removed = planner.remove_service_from_activity(&params).await?;
    /// # Result::<(), lathe_core::PlannerError>::Ok(())
    /// # };
    /// ```
    pub async fn remove_service_from_activity(&self, params: &Id) -> Result<Option<Service>> {
        let service = self.get_service(params).await?;

        if service.is_some() {
            self.remove_service(params).await?;
        }

        Ok(service)
    }
}
