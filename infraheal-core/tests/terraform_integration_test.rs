//! End-to-end workflow test against a scripted fake provisioning tool
//!
//! Exercises the real TerraformRunner and handler together: the fake binary
//! logs its invocations inside the workspace directory and serves a canned
//! plan rendering for `show -json`.

use infraheal_core::models::{
    Configuration, ExecutionStatus, RemediationAction, TerraformApplyRequest,
};
use infraheal_core::terraform::{RemediationError, TerraformHandler};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

const FAKE_TERRAFORM: &str = r#"#!/bin/sh
echo "$@" >> invocations.log
case "$1" in
    show)
        cat plan.json
        ;;
esac
"#;

fn write_fake_terraform(dir: &Path) -> PathBuf {
    let bin = dir.join("terraform-fake");
    fs::write(&bin, FAKE_TERRAFORM).unwrap();
    let mut perms = fs::metadata(&bin).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&bin, perms).unwrap();
    bin
}

fn workspace_config(dir: &Path, bin: &Path) -> Configuration {
    let mut config = Configuration::default();
    config.workspace_dir = dir.to_path_buf();
    config.terraform_bin = bin.to_string_lossy().into_owned();
    config
}

fn apply_action(auto_approve: bool) -> RemediationAction {
    RemediationAction::TerraformApply(TerraformApplyRequest {
        changes: serde_json::json!({"desired_capacity": 3}),
        auto_approve,
    })
}

fn logged_invocations(dir: &Path) -> Vec<String> {
    fs::read_to_string(dir.join("invocations.log"))
        .unwrap()
        .lines()
        .map(|line| line.to_string())
        .collect()
}

#[tokio::test]
async fn test_full_workflow_against_fake_binary() {
    let dir = tempfile::tempdir().unwrap();
    let bin = write_fake_terraform(dir.path());
    fs::write(
        dir.path().join("plan.json"),
        r#"{"format_version": "1.2", "resource_changes": []}"#,
    )
    .unwrap();

    let handler = TerraformHandler::from_configuration(&workspace_config(dir.path(), &bin));
    let result = handler.execute_action(apply_action(true)).await.unwrap();

    assert_eq!(result.status, ExecutionStatus::Success);
    assert_eq!(result.changes, serde_json::json!({"desired_capacity": 3}));
    assert_eq!(
        logged_invocations(dir.path()),
        vec![
            "init",
            "workspace select default",
            "plan -out=remediation.tfplan",
            "show -json remediation.tfplan",
            "apply -auto-approve remediation.tfplan",
        ]
    );
}

#[tokio::test]
async fn test_protected_deletion_is_stopped_before_apply() {
    let dir = tempfile::tempdir().unwrap();
    let bin = write_fake_terraform(dir.path());
    fs::write(
        dir.path().join("plan.json"),
        r#"{
            "resource_changes": [
                {"address": "aws_s3_bucket.audit_logs", "type": "aws_s3_bucket", "change": {"actions": ["delete"]}}
            ]
        }"#,
    )
    .unwrap();

    let handler = TerraformHandler::from_configuration(&workspace_config(dir.path(), &bin));
    let err = handler.execute_action(apply_action(true)).await.unwrap_err();

    match err {
        RemediationError::PolicyViolation(breach) => {
            assert_eq!(breach.resource_type, "aws_s3_bucket");
        }
        other => panic!("expected policy violation, got {:?}", other),
    }

    // The plan artifact steps ran, apply did not
    assert_eq!(
        logged_invocations(dir.path()),
        vec![
            "init",
            "workspace select default",
            "plan -out=remediation.tfplan",
            "show -json remediation.tfplan",
        ]
    );
}
