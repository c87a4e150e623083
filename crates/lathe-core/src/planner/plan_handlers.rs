//! Plan handler operations that return formatted wrapper types for the Planner.

use super::Planner;
use crate::{
    error::Result,
    models::{Plan, PlanFilter},
    params::{CreatePlan, DeletePlan, Id, ListPlans, UpdatePlan},
};

impl Planner {
    /// Handle listing plans with optional status and text filtering.
    ///
    /// Returns plan summaries with structure counts and derived totals for
    /// consistent list display across interfaces.
    ///
    /// # Arguments
    ///
    /// * `params` - List parameters containing the inactive flag and optional
    ///   name/equipment filters
    ///
    /// # Returns
    ///
    /// A PlanSummaries wrapper containing plan summary objects
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use lathe_core::{params::ListPlans, PlannerBuilder};
    /// # async {
    /// let planner = PlannerBuilder::new().build().await?;
    /// let params = ListPlans {
    ///     inactive: false,
    ///     ..Default::default()
    /// };
    /// let summaries = planner.list_plans_summary(&params).await?;
    /// # Result::<(), lathe_core::PlannerError>::Ok(())
    /// # };
    /// ```
    pub async fn list_plans_summary(
        &self,
        params: &ListPlans,
    ) -> Result<crate::display::PlanSummaries> {
        let filter = Some(PlanFilter::from(params));
        let summaries = self.list_plans(filter).await?;
        Ok(crate::display::PlanSummaries(summaries))
    }

    /// Handle showing a complete plan with its activity tree.
    ///
    /// Retrieves a plan with its activities and their services eagerly
    /// loaded. The returned Plan object includes the full tree in the
    /// activities field.
    ///
    /// # Arguments
    ///
    /// * `params` - ID parameters specifying which plan to retrieve
    ///
    /// # Returns
    ///
    /// An optional Plan containing the plan with its activities loaded,
    /// or None if the plan doesn't exist
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use lathe_core::{params::Id, PlannerBuilder};
    /// # async {
    /// let planner = PlannerBuilder::new().build().await?;
    /// let params = Id { id: 1 };
    /// let plan = planner.show_plan_with_activities(&params).await?;
    /// # Result::<(), lathe_core::PlannerError>::Ok(())
    /// # };
    /// ```
    pub async fn show_plan_with_activities(&self, params: &Id) -> Result<Option<Plan>> {
        self.get_plan(params).await
    }

    /// Handle creating a new plan.
    ///
    /// Validates the parameters, creates the plan, and returns the created
    /// plan object for confirmation.
    ///
    /// # Arguments
    ///
    /// * `params` - Creation parameters containing code, name, frequency and
    ///   optional descriptive fields
    ///
    /// # Returns
    ///
    /// The newly created Plan object
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::InvalidInput` if the code or name is empty or
    /// the frequency is zero
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use lathe_core::{params::CreatePlan, PlannerBuilder};
    /// # async {
    /// let planner = PlannerBuilder::new().build().await?;
    /// let params = CreatePlan {
    ///     code: "PM-001".to_string(),
    ///     name: "Monthly lathe inspection".to_string(),
    ///     frequency_days: 30,
    ///     ..Default::default()
    /// };
    /// let plan = planner.create_plan_result(&params).await?;
    /// # Result::<(), lathe_core::PlannerError>::Ok(())
    /// # };
    /// ```
    pub async fn create_plan_result(&self, params: &CreatePlan) -> Result<Plan> {
        params.validate()?;
        self.create_plan(params).await
    }

    /// Handle updating a plan with validation.
    ///
    /// Validates the parameters before delegating to the update operation.
    /// Only the provided fields change; the code and status are not
    /// updatable through this path.
    ///
    /// # Arguments
    ///
    /// * `params` - Update parameters containing the plan ID and optional
    ///   new field values
    ///
    /// # Returns
    ///
    /// The updated Plan object with its activities loaded
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::InvalidInput` if a new name is empty or a new
    /// frequency is zero, and `PlannerError::PlanNotFound` if the plan
    /// doesn't exist
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use lathe_core::{params::UpdatePlan, PlannerBuilder};
    /// # async {
    /// let planner = PlannerBuilder::new().build().await?;
    /// let params = UpdatePlan {
    ///     id: 1,
    ///     frequency_days: Some(45),
    ///     ..Default::default()
    /// };
    /// let plan = planner.update_plan_validated(&params).await?;
    /// # Result::<(), lathe_core::PlannerError>::Ok(())
    /// # };
    /// ```
    pub async fn update_plan_validated(&self, params: &UpdatePlan) -> Result<Plan> {
        params.validate()?;
        self.update_plan(params).await
    }

    /// Handle permanently deleting a plan with confirmation.
    ///
    /// Permanently removes a plan together with its activities, services,
    /// and execution history. This operation cannot be undone. Uses
    /// get-before-delete pattern to return the plan details for
    /// confirmation.
    ///
    /// Requires explicit confirmation via the `confirmed` field to prevent
    /// accidental deletion. Returns an error if confirmation is not provided.
    ///
    /// # Arguments
    ///
    /// * `params` - DeletePlan parameters containing plan ID and confirmation flag
    ///
    /// # Returns
    ///
    /// Returns the plan details that were deleted for confirmation,
    /// or None if the plan doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::InvalidInput` if `confirmed` field is false
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use lathe_core::{params::DeletePlan, PlannerBuilder};
    /// # async {
    /// let planner = PlannerBuilder::new().build().await?;
    /// let params = DeletePlan { id: 1, confirmed: true };
    /// let deleted_plan = planner.delete_plan(&params).await?;
    /// # Result::<(), lathe_core::PlannerError>::Ok(())
    /// # };
    /// ```
    pub async fn delete_plan(&self, params: &DeletePlan) -> Result<Option<Plan>> {
        // Check confirmation flag first
        if !params.confirmed {
            return Err(crate::PlannerError::InvalidInput {
                field: "confirmed".to_string(),
                reason: "Plan deletion requires explicit confirmation. Set 'confirmed' to true to proceed with permanent deletion.".to_string(),
            });
        }

        let id_params = Id { id: params.id };
        let plan = self.get_plan(&id_params).await?;

        if plan.is_some() {
            self.delete_plan_by_id(&id_params).await?;
        }

        Ok(plan)
    }
}
