//! Errors surfaced by the terraform workflow

use crate::terraform::policy::PolicyBreach;
use thiserror::Error;

/// Errors that can occur while executing a remediation action
///
/// Every variant surfaces to the immediate caller of
/// [`execute_action`](crate::terraform::TerraformHandler::execute_action);
/// nothing is retried or swallowed inside the workflow.
#[derive(Error, Debug)]
pub enum RemediationError {
    /// The handler received an action kind it does not execute. Raised
    /// before any external process is started.
    #[error("unsupported action kind: {0}")]
    UnsupportedAction(String),

    /// A tool invocation failed; carries the captured stderr text verbatim
    #[error("terraform failed: {stderr}")]
    Tool { stderr: String },

    /// The rendered plan could not be parsed as a plan document
    #[error("plan output is not valid JSON: {0}")]
    MalformedPlan(#[source] serde_json::Error),

    /// The plan policy vetoed the change; apply was never attempted
    #[error("plan rejected by policy: {0}")]
    PolicyViolation(PolicyBreach),
}
