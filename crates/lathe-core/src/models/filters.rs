//! Filter types for querying plans and executions.

use super::{ExecutionStatus, PlanStatus};

/// Filter options for querying plans.
#[derive(Debug, Clone, Default)]
pub struct PlanFilter {
    /// Filter by plan name (case-insensitive partial match)
    pub name_contains: Option<String>,

    /// Filter by equipment tag (exact match)
    pub equipment: Option<String>,

    /// Filter by plan status (active/inactive)
    /// If None, defaults to showing only active plans
    pub status: Option<PlanStatus>,

    /// Show all plans regardless of status
    pub include_inactive: bool,
}

impl From<&crate::params::ListPlans> for PlanFilter {
    /// Convert ListPlans parameters to a PlanFilter for plan queries.
    ///
    /// `inactive: false` filters for active plans only; `inactive: true`
    /// filters for inactive plans only. Name and equipment filters are
    /// carried over as-is.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lathe_core::{models::PlanFilter, params::ListPlans};
    ///
    /// let params = ListPlans {
    ///     inactive: true,
    ///     ..Default::default()
    /// };
    /// let filter: PlanFilter = (&params).into();
    /// assert_eq!(filter.status, Some(lathe_core::models::PlanStatus::Inactive));
    /// assert!(filter.include_inactive);
    /// ```
    fn from(params: &crate::params::ListPlans) -> Self {
        let status = if params.inactive {
            Some(PlanStatus::Inactive)
        } else {
            Some(PlanStatus::Active)
        };

        Self {
            name_contains: params.name_contains.clone(),
            equipment: params.equipment.clone(),
            status,
            include_inactive: params.inactive,
        }
    }
}

/// Filter options for querying executions.
#[derive(Debug, Clone, Default)]
pub struct ExecutionFilter {
    /// Restrict to executions of one plan
    pub plan_id: Option<u64>,

    /// Restrict to executions in one status
    pub status: Option<ExecutionStatus>,
}
