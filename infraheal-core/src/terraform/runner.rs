//! Provisioning tool process invocation

use crate::terraform::error::RemediationError;
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tokio::time::timeout;

/// Seam for invoking the provisioning tool
///
/// Implementations capture stdout and stderr independently and wait for the
/// process to complete. If the calling future is dropped while a run is in
/// flight, the spawned process is not terminated.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run the tool with the given arguments, returning captured stdout
    ///
    /// A non-zero exit status fails with [`RemediationError::Tool`] carrying
    /// the captured stderr text verbatim.
    async fn run(&self, args: &[&str]) -> Result<String, RemediationError>;
}

/// Runs the terraform binary inside a workspace directory
pub struct TerraformRunner {
    program: String,
    workspace_dir: PathBuf,
    timeout: Option<Duration>,
}

impl TerraformRunner {
    /// Create a runner for the given binary and workspace directory
    pub fn new(program: impl Into<String>, workspace_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            workspace_dir: workspace_dir.into(),
            timeout: None,
        }
    }

    /// Fail invocations that outlive `limit`, killing the child process
    pub fn with_timeout(mut self, limit: Duration) -> Self {
        self.timeout = Some(limit);
        self
    }
}

#[async_trait]
impl CommandRunner for TerraformRunner {
    async fn run(&self, args: &[&str]) -> Result<String, RemediationError> {
        tracing::debug!("Running {} {}", self.program, args.join(" "));

        let mut child = Command::new(&self.program)
            .args(args)
            .current_dir(&self.workspace_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| RemediationError::Tool {
                stderr: format!("failed to spawn {}: {}", self.program, e),
            })?;

        let mut stdout = child.stdout.take().ok_or_else(|| RemediationError::Tool {
            stderr: "failed to capture stdout".to_string(),
        })?;
        let mut stderr = child.stderr.take().ok_or_else(|| RemediationError::Tool {
            stderr: "failed to capture stderr".to_string(),
        })?;

        // Drain both pipes while waiting so the child never blocks on a full pipe
        let stdout_task = tokio::spawn(async move {
            let mut buf = String::new();
            let _ = stdout.read_to_string(&mut buf).await;
            buf
        });
        let stderr_task = tokio::spawn(async move {
            let mut buf = String::new();
            let _ = stderr.read_to_string(&mut buf).await;
            buf
        });

        let wait_result = match self.timeout {
            Some(limit) => match timeout(limit, child.wait()).await {
                Ok(result) => result,
                Err(_) => {
                    let _ = child.kill().await;
                    return Err(RemediationError::Tool {
                        stderr: format!(
                            "{} {} timed out after {}s",
                            self.program,
                            args.join(" "),
                            limit.as_secs()
                        ),
                    });
                }
            },
            None => child.wait().await,
        };

        let status = wait_result.map_err(|e| RemediationError::Tool {
            stderr: format!("failed to wait for {}: {}", self.program, e),
        })?;

        let stdout_text = stdout_task.await.unwrap_or_default();
        let stderr_text = stderr_task.await.unwrap_or_default();

        if !status.success() {
            tracing::debug!(
                "{} {} exited with {:?}",
                self.program,
                args.join(" "),
                status.code()
            );
            return Err(RemediationError::Tool { stderr: stderr_text });
        }

        Ok(stdout_text)
    }
}
