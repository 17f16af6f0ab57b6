//! Remediation action data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A remediation action dispatched to an action handler
///
/// Tagged by `action_type` on the wire so requests round-trip through the
/// platform's JSON transport. Each variant carries its own typed parameter
/// payload; handlers match exhaustively and reject the kinds they do not
/// execute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action_type", content = "parameters", rename_all = "snake_case")]
pub enum RemediationAction {
    /// Apply infrastructure changes through terraform
    TerraformApply(TerraformApplyRequest),
    /// Restart a managed service (executed by the service subsystem)
    ServiceRestart(ServiceRestartRequest),
}

impl RemediationAction {
    /// Wire name of the action kind
    pub fn kind(&self) -> &'static str {
        match self {
            RemediationAction::TerraformApply(_) => "terraform_apply",
            RemediationAction::ServiceRestart(_) => "service_restart",
        }
    }
}

/// Parameters for a terraform apply action
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TerraformApplyRequest {
    /// Requested changes, echoed back in the execution result
    #[serde(default)]
    pub changes: serde_json::Value,
    /// Apply the validated plan without interactive confirmation
    #[serde(default)]
    pub auto_approve: bool,
}

/// Parameters for a service restart action
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceRestartRequest {
    /// Name of the service unit to restart
    pub service: String,
}

/// Execution status for remediation actions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    /// Action completed successfully
    Success,
    /// Action failed; recorded by callers that persist outcomes. The
    /// terraform handler surfaces failures as errors, never as a result.
    Failed,
}

/// Result of a completed remediation action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Unique execution identifier
    pub execution_id: Uuid,
    /// Overall outcome
    pub status: ExecutionStatus,
    /// Echo of the requested changes
    pub changes: serde_json::Value,
    /// When the action finished
    pub completed_at: DateTime<Utc>,
}
