//! Status enumerations for plans and executions.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of plan statuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    /// Plan is active and due for scheduling
    #[default]
    Active,

    /// Plan is retired and hidden from normal views
    Inactive,
}

impl FromStr for PlanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(PlanStatus::Active),
            "inactive" => Ok(PlanStatus::Inactive),
            _ => Err(format!("Invalid plan status: {s}")),
        }
    }
}

impl PlanStatus {
    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanStatus::Active => "active",
            PlanStatus::Inactive => "inactive",
        }
    }
}

/// Type-safe enumeration of execution statuses.
///
/// An execution starts in `EmAndamento` and moves exactly once to either
/// `Concluida` or `Cancelada`. Both of those are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    /// Execution has been started and is being carried out
    #[default]
    EmAndamento,

    /// Execution finished normally
    Concluida,

    /// Execution was aborted
    Cancelada,
}

impl FromStr for ExecutionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "em_andamento" | "em-andamento" => Ok(ExecutionStatus::EmAndamento),
            "concluida" => Ok(ExecutionStatus::Concluida),
            "cancelada" => Ok(ExecutionStatus::Cancelada),
            _ => Err(format!("Invalid execution status: {s}")),
        }
    }
}

impl ExecutionStatus {
    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionStatus::EmAndamento => "em_andamento",
            ExecutionStatus::Concluida => "concluida",
            ExecutionStatus::Cancelada => "cancelada",
        }
    }

    /// Whether the status admits no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ExecutionStatus::Concluida | ExecutionStatus::Cancelada
        )
    }

    /// Get status with consistent icon formatting for display.
    ///
    /// # Icons Used
    /// - `➤ Em andamento` - Arrow for running executions
    /// - `✓ Concluida` - Checkmark for finished executions
    /// - `✗ Cancelada` - Cross for aborted executions
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lathe_core::models::ExecutionStatus;
    ///
    /// assert_eq!(ExecutionStatus::EmAndamento.with_icon(), "➤ Em andamento");
    /// assert_eq!(ExecutionStatus::Concluida.with_icon(), "✓ Concluida");
    /// assert_eq!(ExecutionStatus::Cancelada.with_icon(), "✗ Cancelada");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            ExecutionStatus::EmAndamento => "➤ Em andamento",
            ExecutionStatus::Concluida => "✓ Concluida",
            ExecutionStatus::Cancelada => "✗ Cancelada",
        }
    }
}
