//! CLI command handlers

use anyhow::{anyhow, Context, Result};
use infraheal_core::models::{
    Configuration, PlanDocument, RemediationAction, TerraformApplyRequest,
};
use infraheal_core::terraform::{PlanPolicy, RemediationError, TerraformHandler};
use std::path::PathBuf;

/// Handle the 'apply' command
pub async fn handle_apply(
    config: Configuration,
    changes: Option<String>,
    auto_approve: bool,
    json: bool,
) -> Result<()> {
    if let Err(errors) = config.validate() {
        return Err(anyhow!("Invalid configuration: {}", errors.join("; ")));
    }

    let changes_value = match changes {
        Some(raw) => serde_json::from_str(&raw).context("--changes is not valid JSON")?,
        None => serde_json::Value::Null,
    };

    let handler = TerraformHandler::from_configuration(&config);
    let action = RemediationAction::TerraformApply(TerraformApplyRequest {
        changes: changes_value,
        auto_approve,
    });

    match handler.execute_action(action).await {
        Ok(result) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else if auto_approve {
                println!("✅ Changes applied (execution {})", result.execution_id);
            } else {
                println!("✅ Plan validated (execution {})", result.execution_id);
                println!("   Re-run with --auto-approve to apply; every call re-plans.");
            }
            Ok(())
        }
        Err(RemediationError::PolicyViolation(breach)) => Err(anyhow!(
            "Policy denied the plan: {}. Override manually outside infraheal if the deletion is intended.",
            breach
        )),
        Err(e) => Err(e.into()),
    }
}

/// Handle the 'check' command
pub fn handle_check(
    config: &Configuration,
    plan_file: PathBuf,
    protect: Vec<String>,
    json: bool,
) -> Result<()> {
    let raw = std::fs::read_to_string(&plan_file)
        .with_context(|| format!("Failed to read {}", plan_file.display()))?;

    let plan: PlanDocument = match serde_json::from_str(&raw) {
        Ok(plan) => plan,
        Err(e) => {
            eprintln!(
                "❌ {} is not a valid plan document: {}",
                plan_file.display(),
                e
            );
            std::process::exit(2);
        }
    };

    let mut protected = config.protected_resource_types.clone();
    protected.extend(protect);
    let policy = PlanPolicy::new(protected);

    match policy.check(&plan) {
        Ok(()) => {
            if json {
                println!(
                    "{}",
                    serde_json::json!({
                        "allowed": true,
                        "resource_changes": plan.resource_changes.len(),
                    })
                );
            } else {
                println!(
                    "✅ Plan allowed ({} resource changes)",
                    plan.resource_changes.len()
                );
            }
            Ok(())
        }
        Err(breach) => {
            if json {
                println!(
                    "{}",
                    serde_json::json!({
                        "allowed": false,
                        "resource_type": breach.resource_type,
                        "address": breach.address,
                    })
                );
            } else {
                eprintln!("❌ Plan denied: {}", breach);
            }
            std::process::exit(1);
        }
    }
}

/// Handle the 'config init' command
pub fn handle_config_init(path: &PathBuf) -> Result<()> {
    if path.exists() {
        return Err(anyhow!(
            "Configuration already exists at {}",
            path.display()
        ));
    }

    let config = Configuration::default();
    config
        .save_to_file(path)
        .map_err(|e| anyhow!("Failed to write configuration: {}", e))?;

    println!("✅ Wrote default configuration to {}", path.display());
    Ok(())
}

/// Handle the 'config show' command
pub fn handle_config_show(config: &Configuration) -> Result<()> {
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
