//! Template handler operations that return formatted wrapper types for the Planner.

use crate::{
    error::Result,
    models::{Plan, Template},
    params::{ApplyTemplate, CaptureTemplate, Id},
};

use super::Planner;

impl Planner {
    /// Handle capturing a template from a plan's current tree.
    ///
    /// Validates the parameters and stores an ID-free snapshot of the
    /// plan's activities and services under the given name. The template
    /// is immutable once captured; later edits to the plan never change it.
    ///
    /// # Arguments
    ///
    /// * `params` - Capture parameters containing the source plan ID, the
    ///   template name, and an optional description
    ///
    /// # Returns
    ///
    /// The newly created Template object
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::PlanNotFound` if the plan doesn't exist and
    /// `PlannerError::InvalidInput` if the name is empty or the plan has
    /// no activities
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use lathe_core::{params::CaptureTemplate, PlannerBuilder};
    /// # async {
    /// let planner = PlannerBuilder::new().build().await?;
    /// let params = CaptureTemplate {
    ///     plan_id: 1,
    ///     name: "Standard lathe routine".to_string(),
    ///     description: None,
    /// };
    /// let template = planner.capture_template_result(&params).await?;
    /// # Result::<(), lathe_core::PlannerError>::Ok(())
    /// # };
    /// ```
    pub async fn capture_template_result(&self, params: &CaptureTemplate) -> Result<Template> {
        params.validate()?;
        self.capture_template(params).await
    }

    /// Handle showing a specific template with its full structure.
    ///
    /// # Arguments
    ///
    /// * `params` - ID parameters specifying which template to retrieve
    ///
    /// # Returns
    ///
    /// An optional Template object if the template exists, or None if not found
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use lathe_core::{params::Id, PlannerBuilder};
    /// # async {
    /// let planner = PlannerBuilder::new().build().await?;
    /// let params = Id { id: 1 };
    /// let template = planner.show_template_details(&params).await?;
    /// # Result::<(), lathe_core::PlannerError>::Ok(())
    /// # };
    /// ```
    pub async fn show_template_details(&self, params: &Id) -> Result<Option<Template>> {
        self.get_template(params).await
    }

    /// Handle listing all templates, most recently captured first.
    ///
    /// # Returns
    ///
    /// A Templates wrapper containing template objects with structure counts
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use lathe_core::PlannerBuilder;
    /// # async {
    /// let planner = PlannerBuilder::new().build().await?;
    /// let templates = planner.list_templates_summary().await?;
    /// # Result::<(), lathe_core::PlannerError>::Ok(())
    /// # };
    /// ```
    pub async fn list_templates_summary(&self) -> Result<crate::display::Templates> {
        let templates = self.list_templates().await?;
        Ok(crate::display::Templates(templates))
    }

    /// Handle applying a template to an existing plan.
    ///
    /// Recreates the template's activities and services under the target
    /// plan with fresh IDs, copying order values verbatim. The template
    /// itself is never modified.
    ///
    /// # Arguments
    ///
    /// * `params` - Apply parameters containing the template and plan IDs
    ///
    /// # Returns
    ///
    /// The target Plan object with the recreated tree loaded
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::TemplateNotFound` or `PlannerError::PlanNotFound`
    /// if either side of the operation doesn't exist
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use lathe_core::{params::ApplyTemplate, PlannerBuilder};
    /// # async {
    /// let planner = PlannerBuilder::new().build().await?;
    /// let params = ApplyTemplate {
    ///     template_id: 1,
    ///     plan_id: 2,
    /// };
    /// let plan = planner.apply_template_to_plan(&params).await?;
    /// # Result::<(), lathe_core::PlannerError>::Ok(())
    /// # };
    /// ```
    pub async fn apply_template_to_plan(&self, params: &ApplyTemplate) -> Result<Plan> {
        self.apply_template(params).await
    }

    /// Handle deleting a template.
    ///
    /// Uses get-before-delete pattern to return the deleted template
    /// details for confirmation. Plans built from the template are not
    /// affected.
    ///
    /// # Arguments
    ///
    /// * `params` - ID parameters specifying which template to delete
    ///
    /// # Returns
    ///
    /// Returns the template details that were deleted, or None if the
    /// template doesn't exist
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use lathe_core::{params::Id, PlannerBuilder};
    /// # async {
    /// let planner = PlannerBuilder::new().build().await?;
    /// let params = Id { id: 1 };
    /// let deleted = planner.delete_template(&params).await?;
    /// # Result::<(), lathe_core::PlannerError>::Ok(())
    /// # };
    /// ```
    pub async fn delete_template(&self, params: &Id) -> Result<Option<Template>> {
        let template = self.get_template(params).await?;

        if template.is_some() {
            self.delete_template_by_id(params).await?;
        }

        Ok(template)
    }
}
