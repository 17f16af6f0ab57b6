//! Integration tests for TerraformRunner process invocation

use infraheal_core::terraform::{CommandRunner, RemediationError, TerraformRunner};
use std::time::Duration;

#[tokio::test]
async fn test_run_captures_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let runner = TerraformRunner::new("sh", dir.path());

    let output = runner.run(&["-c", "echo hello"]).await.unwrap();
    assert_eq!(output, "hello\n");
}

#[tokio::test]
async fn test_nonzero_exit_preserves_stderr_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let runner = TerraformRunner::new("sh", dir.path());

    let err = runner
        .run(&["-c", "echo backend unreachable >&2; exit 1"])
        .await
        .unwrap_err();

    match err {
        RemediationError::Tool { stderr } => assert_eq!(stderr, "backend unreachable\n"),
        other => panic!("expected tool error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_stdout_and_stderr_are_captured_independently() {
    let dir = tempfile::tempdir().unwrap();
    let runner = TerraformRunner::new("sh", dir.path());

    // stderr noise on a successful run must not leak into stdout
    let output = runner
        .run(&["-c", "echo warning >&2; echo result"])
        .await
        .unwrap();
    assert_eq!(output, "result\n");
}

#[tokio::test]
async fn test_run_executes_in_workspace_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("marker.txt"), "workspace state\n").unwrap();
    let runner = TerraformRunner::new("sh", dir.path());

    let output = runner.run(&["-c", "cat marker.txt"]).await.unwrap();
    assert_eq!(output, "workspace state\n");
}

#[tokio::test]
async fn test_timeout_kills_hung_process() {
    let dir = tempfile::tempdir().unwrap();
    let runner =
        TerraformRunner::new("sh", dir.path()).with_timeout(Duration::from_millis(200));

    let err = runner.run(&["-c", "sleep 30"]).await.unwrap_err();

    match err {
        RemediationError::Tool { stderr } => assert!(stderr.contains("timed out")),
        other => panic!("expected tool error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_binary_fails_with_spawn_error() {
    let dir = tempfile::tempdir().unwrap();
    let runner = TerraformRunner::new("definitely-not-a-provisioning-tool", dir.path());

    let err = runner.run(&["init"]).await.unwrap_err();

    match err {
        RemediationError::Tool { stderr } => assert!(stderr.contains("failed to spawn")),
        other => panic!("expected tool error, got {:?}", other),
    }
}
