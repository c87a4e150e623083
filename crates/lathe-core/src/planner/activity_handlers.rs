//! Activity handler operations that return formatted wrapper types for the Planner.

use crate::{
    error::Result,
    models::Activity,
    params::{ActivityCreate, Id, MoveActivity, UpdateActivity},
};

use super::Planner;

impl Planner {
    /// Handle adding an activity to a plan.
    ///
    /// Validates the parameters, appends the activity at the end of the
    /// plan's ordering, and returns the created activity object for
    /// confirmation.
    ///
    /// # Arguments
    ///
    /// * `params` - Activity creation parameters
    ///
    /// # Returns
    ///
    /// The newly created Activity object
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use lathe_core::{params::ActivityCreate, PlannerBuilder};
    /// # async {
    /// let planner = PlannerBuilder::new().build().await?;
    /// let params = ActivityCreate {
    ///     plan_id: 1,
    ///     name: "Lubrication".to_string(),
    ///     responsible: Some("Mechanical team".to_string()),
    /// };
    /// let activity = planner.add_activity_to_plan(&params).await?;
    /// # Result::<(), lathe_core::PlannerError>::Ok(())
    /// # };
    /// ```
    pub async fn add_activity_to_plan(&self, params: &ActivityCreate) -> Result<Activity> {
        params.validate()?;
        self.add_activity(params).await
    }

    /// Handle showing a specific activity.
    ///
    /// Retrieves detailed information about a single activity with its
    /// services eagerly loaded.
    ///
    /// # Arguments
    ///
    /// * `params` - ID parameters specifying which activity to retrieve
    ///
    /// # Returns
    ///
    /// An optional Activity object if the activity exists, or None if not found
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use lathe_core::{params::Id, PlannerBuilder};
    /// # async {
    /// let planner = PlannerBuilder::new().build().await?;
    /// let params = Id { id: 1 };
    /// let activity = planner.show_activity_details(&params).await?;
    /// # Result::<(), lathe_core::PlannerError>::Ok(())
    /// # };
    /// ```
    pub async fn show_activity_details(&self, params: &Id) -> Result<Option<Activity>> {
        self.get_activity(params).await
    }

    /// Handle listing the activities of a plan in display order.
    ///
    /// # Arguments
    ///
    /// * `params` - ID parameters specifying the plan
    ///
    /// # Returns
    ///
    /// An Activities wrapper ordered by activity order with ID tie-break
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use lathe_core::{params::Id, PlannerBuilder};
    /// # async {
    /// let planner = PlannerBuilder::new().build().await?;
    /// let params = Id { id: 1 };
    /// let activities = planner.list_plan_activities(&params).await?;
    /// # Result::<(), lathe_core::PlannerError>::Ok(())
    /// # };
    /// ```
    pub async fn list_plan_activities(&self, params: &Id) -> Result<crate::display::Activities> {
        self.get_activities(params).await
    }

    /// Handle updating an activity's properties with validation.
    ///
    /// Updates the specified activity with new values. The order field
    /// cannot be changed here; reordering goes through the move operation.
    ///
    /// # Arguments
    ///
    /// * `params` - Update parameters containing activity ID and new values
    ///
    /// # Returns
    ///
    /// The updated Activity object with its services loaded
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::ActivityNotFound` if the activity doesn't exist
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use lathe_core::{params::UpdateActivity, PlannerBuilder};
    /// # async {
    /// let planner = PlannerBuilder::new().build().await?;
    /// let params = UpdateActivity {
    ///     id: 1,
    ///     name: None,
    ///     responsible: Some("Electrical team".to_string()),
    /// };
    /// let activity = planner.update_activity_validated(&params).await?;
    /// # Result::<(), lathe_core::PlannerError>::Ok(())
    /// # };
    /// ```
    pub async fn update_activity_validated(&self, params: &UpdateActivity) -> Result<Activity> {
        params.validate()?;
        self.update_activity(params).await
    }

    /// Handle moving an activity one position up or down.
    ///
    /// Swaps the activity's order value with its display-order neighbor in
    /// the requested direction. Moving past the first or last position is a
    /// no-op that returns the activity unchanged.
    ///
    /// # Arguments
    ///
    /// * `params` - Move parameters containing the activity ID and direction
    ///
    /// # Returns
    ///
    /// The Activity object in its resulting position
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use lathe_core::{params::{MoveActivity, MoveDirection}, PlannerBuilder};
    /// # async {
    /// let planner = PlannerBuilder::new().build().await?;
    /// let params = MoveActivity {
    ///     id: 1,
    ///     direction: MoveDirection::Down,
    /// };
    /// let activity = planner.move_activity_position(&params).await?;
    /// # Result::<(), lathe_core::PlannerError>::Ok(())
    /// # };
    /// ```
    pub async fn move_activity_position(&self, params: &MoveActivity) -> Result<Activity> {
        self.move_activity(params).await
    }

    /// Handle removing an activity from its plan.
    ///
    /// Permanently removes the activity and its services. Uses
    /// get-before-delete pattern to return the removed activity details
    /// for confirmation. Remaining activities keep their order values.
    ///
    /// # Arguments
    ///
    /// * `params` - ID parameters specifying which activity to remove
    ///
    /// # Returns
    ///
    /// Returns the activity details that were removed, or None if the
    /// activity doesn't exist
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use lathe_core::{params::Id, PlannerBuilder};
    /// # async {
    /// let planner = PlannerBuilder::new().build().await?;
    /// let params = Id { id: 1 };
    /// let removed = planner.remove_activity_from_plan(&params).await?;
    /// # Result::<(), lathe_core::PlannerError>::Ok(())
    /// # };
    /// ```
    pub async fn remove_activity_from_plan(&self, params: &Id) -> Result<Option<Activity>> {
        let activity = self.get_activity(params).await?;

        if activity.is_some() {
            self.remove_activity(params).await?;
        }

        Ok(activity)
    }
}
