//! Execution handler operations that return formatted wrapper types for the Planner.

use crate::{
    error::Result,
    models::Execution,
    params::{
        CancelExecution, FinishExecution, Id, ListExecutions, SetChecklistItem, StartExecution,
    },
};

use super::Planner;

impl Planner {
    /// Handle starting an execution of a plan.
    ///
    /// Validates the parameters and opens a new in-progress execution whose
    /// checklist is a frozen snapshot of the plan's current activity tree.
    /// Later edits to the plan never change the checklist.
    ///
    /// # Arguments
    ///
    /// * `params` - Start parameters containing plan ID, executor, and
    ///   optional date and notes
    ///
    /// # Returns
    ///
    /// The newly created Execution object with its checklist populated
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::PlanNotFound` if the plan doesn't exist and
    /// `PlannerError::InvalidInput` if the executor name is empty
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use lathe_core::{params::StartExecution, PlannerBuilder};
    /// # async {
    /// let planner = PlannerBuilder::new().build().await?;
    /// let params = StartExecution {
    ///     plan_id: 1,
    ///     executor: "J. Silva".to_string(),
    ///     ..Default::default()
    /// };
    /// let execution = planner.start_execution_result(&params).await?;
    /// # Result::<(), lathe_core::PlannerError>::Ok(())
    /// # };
    /// ```
    pub async fn start_execution_result(&self, params: &StartExecution) -> Result<Execution> {
        params.validate()?;
        self.start_execution(params).await
    }

    /// Handle showing a specific execution with its checklist.
    ///
    /// # Arguments
    ///
    /// * `params` - ID parameters specifying which execution to retrieve
    ///
    /// # Returns
    ///
    /// An optional Execution object if the execution exists, or None if not found
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use lathe_core::{params::Id, PlannerBuilder};
    /// # async {
    /// let planner = PlannerBuilder::new().build().await?;
    /// let params = Id { id: 1 };
    /// let execution = planner.show_execution_details(&params).await?;
    /// # Result::<(), lathe_core::PlannerError>::Ok(())
    /// # };
    /// ```
    pub async fn show_execution_details(&self, params: &Id) -> Result<Option<Execution>> {
        self.get_execution(params).await
    }

    /// Handle listing executions with optional plan and status filtering.
    ///
    /// Validates the status string and returns executions ordered by
    /// execution date, most recent first.
    ///
    /// # Arguments
    ///
    /// * `params` - List parameters containing optional plan ID and status
    ///
    /// # Returns
    ///
    /// An Executions wrapper containing matching execution objects
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::InvalidInput` if the status string is not a
    /// known execution status
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use lathe_core::{params::ListExecutions, PlannerBuilder};
    /// # async {
    /// let planner = PlannerBuilder::new().build().await?;
    /// let params = ListExecutions {
    ///     plan_id: Some(1),
    ///     status: Some("em_andamento".to_string()),
    /// };
    /// let executions = planner.list_executions_filtered(&params).await?;
    /// # Result::<(), lathe_core::PlannerError>::Ok(())
    /// # };
    /// ```
    pub async fn list_executions_filtered(
        &self,
        params: &ListExecutions,
    ) -> Result<crate::display::Executions> {
        let filter = params.validate()?;
        let executions = self.list_executions(Some(filter)).await?;
        Ok(crate::display::Executions(executions))
    }

    /// Handle ticking or unticking one checklist item.
    ///
    /// Validates the 1-indexed position and flips the item's completed
    /// state inside the execution's frozen checklist. Only in-progress
    /// executions accept checklist changes.
    ///
    /// # Arguments
    ///
    /// * `params` - Parameters containing execution ID, item position, and
    ///   the new completed state
    ///
    /// # Returns
    ///
    /// The updated Execution object
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::ExecutionClosed` if the execution is already
    /// finished or cancelled, and `PlannerError::InvalidInput` if the
    /// position is zero or past the end of the checklist
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use lathe_core::{params::SetChecklistItem, PlannerBuilder};
    /// # async {
    /// let planner = PlannerBuilder::new().build().await?;
    /// let params = SetChecklistItem {
    ///     execution_id: 1,
    ///     position: 2,
    ///     completed: true,
    /// };
    /// let execution = planner.set_checklist_item_validated(&params).await?;
    /// # Result::<(), lathe_core::PlannerError>::Ok(())
    /// # };
    /// ```
    pub async fn set_checklist_item_validated(
        &self,
        params: &SetChecklistItem,
    ) -> Result<Execution> {
        params.validate()?;
        self.set_checklist_item(params).await
    }

    /// Handle finishing an in-progress execution.
    ///
    /// Transitions the execution to 'concluida' and records the final
    /// observations and actual duration. Finished executions are terminal.
    ///
    /// # Arguments
    ///
    /// * `params` - Finish parameters containing the execution ID and
    ///   optional closing details
    ///
    /// # Returns
    ///
    /// The finished Execution object
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::ExecutionClosed` if the execution is already
    /// finished or cancelled
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use lathe_core::{params::FinishExecution, PlannerBuilder};
    /// # async {
    /// let planner = PlannerBuilder::new().build().await?;
    /// let params = FinishExecution {
    ///     id: 1,
    ///     observations: Some("All items checked".to_string()),
    ///     real_time_min: Some(42),
    /// };
    /// let execution = planner.finish_execution_result(&params).await?;
    /// # Result::<(), lathe_core::PlannerError>::Ok(())
    /// # };
    /// ```
    pub async fn finish_execution_result(&self, params: &FinishExecution) -> Result<Execution> {
        self.finish_execution(params).await
    }

    /// Handle cancelling an in-progress execution.
    ///
    /// Transitions the execution to 'cancelada'. The checklist keeps
    /// whatever progress was made. Cancelled executions are terminal.
    ///
    /// # Arguments
    ///
    /// * `params` - Cancel parameters containing the execution ID and
    ///   optional notes on why it was aborted
    ///
    /// # Returns
    ///
    /// The cancelled Execution object
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::ExecutionClosed` if the execution is already
    /// finished or cancelled
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use lathe_core::{params::CancelExecution, PlannerBuilder};
    /// # async {
    /// let planner = PlannerBuilder::new().build().await?;
    /// let params = CancelExecution {
    ///     id: 1,
    ///     observations: Some("Machine unavailable".to_string()),
    /// };
    /// let execution = planner.cancel_execution_result(&params).await?;
    /// # Result::<(), lathe_core::PlannerError>::Ok(())
    /// # };
    /// ```
    pub async fn cancel_execution_result(&self, params: &CancelExecution) -> Result<Execution> {
        self.cancel_execution(params).await
    }
}
