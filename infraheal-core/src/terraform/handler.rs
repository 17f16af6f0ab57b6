//! Terraform change-application workflow handler

use crate::models::action::{
    ExecutionResult, ExecutionStatus, RemediationAction, TerraformApplyRequest,
};
use crate::models::configuration::Configuration;
use crate::models::plan::PlanDocument;
use crate::terraform::error::RemediationError;
use crate::terraform::policy::PlanPolicy;
use crate::terraform::runner::{CommandRunner, TerraformRunner};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Fixed name of the plan artifact written inside the workspace directory
///
/// Not unique per invocation: one workspace directory must be driven by a
/// single handler, and the artifact is scratch state. Every call re-plans;
/// the artifact is never reused across calls.
pub const PLAN_ARTIFACT: &str = "remediation.tfplan";

/// Workspace session executing terraform remediation actions
///
/// Owns the per-workspace lock: at most one change-application workflow runs
/// at a time, and a second [`execute_action`](Self::execute_action) call
/// suspends until the first releases the lock. Construct one handler per
/// workspace directory and share it by `Arc` handle.
pub struct TerraformHandler {
    workspace_name: String,
    runner: Arc<dyn CommandRunner>,
    policy: PlanPolicy,
    lock: Mutex<()>,
}

impl TerraformHandler {
    /// Create a session with an explicit runner and policy
    pub fn new(
        workspace_name: impl Into<String>,
        runner: Arc<dyn CommandRunner>,
        policy: PlanPolicy,
    ) -> Self {
        Self {
            workspace_name: workspace_name.into(),
            runner,
            policy,
            lock: Mutex::new(()),
        }
    }

    /// Create a session from configuration
    pub fn from_configuration(config: &Configuration) -> Self {
        let mut runner = TerraformRunner::new(&config.terraform_bin, &config.workspace_dir);
        if let Some(secs) = config.command_timeout_seconds {
            runner = runner.with_timeout(Duration::from_secs(secs));
        }

        Self::new(
            config.workspace_name.clone(),
            Arc::new(runner),
            PlanPolicy::new(config.protected_resource_types.iter().cloned()),
        )
    }

    /// Execute a remediation action
    ///
    /// Holds the workspace lock for the entire workflow; the lock is
    /// released on every exit path, including errors and policy denials.
    pub async fn execute_action(
        &self,
        action: RemediationAction,
    ) -> Result<ExecutionResult, RemediationError> {
        let _guard = self.lock.lock().await;

        match action {
            RemediationAction::TerraformApply(request) => self.apply_changes(request).await,
            other => Err(RemediationError::UnsupportedAction(other.kind().to_string())),
        }
    }

    /// Run the init → workspace select → plan → validate → apply sequence
    ///
    /// A denied or failed workflow leaves partial state (initialized
    /// backend, selected workspace, written plan artifact) in place for
    /// operator inspection; no rollback is attempted.
    async fn apply_changes(
        &self,
        request: TerraformApplyRequest,
    ) -> Result<ExecutionResult, RemediationError> {
        let execution_id = Uuid::new_v4();
        tracing::info!("Applying terraform changes (execution {})", execution_id);

        self.runner.run(&["init"]).await?;
        self.runner
            .run(&["workspace", "select", &self.workspace_name])
            .await?;

        let plan_out = format!("-out={}", PLAN_ARTIFACT);
        self.runner.run(&["plan", &plan_out]).await?;

        let plan_json = self.runner.run(&["show", "-json", PLAN_ARTIFACT]).await?;
        let plan: PlanDocument =
            serde_json::from_str(&plan_json).map_err(RemediationError::MalformedPlan)?;

        if let Err(breach) = self.policy.check(&plan) {
            tracing::warn!("Plan denied by policy: {}", breach);
            return Err(RemediationError::PolicyViolation(breach));
        }

        if request.auto_approve {
            self.runner
                .run(&["apply", "-auto-approve", PLAN_ARTIFACT])
                .await?;
            tracing::info!("Terraform apply completed (execution {})", execution_id);
        } else {
            tracing::info!(
                "Plan validated; auto_approve not set, stopping before apply (execution {})",
                execution_id
            );
        }

        Ok(ExecutionResult {
            execution_id,
            status: ExecutionStatus::Success,
            changes: request.changes,
            completed_at: Utc::now(),
        })
    }
}
