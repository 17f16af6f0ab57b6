mod cli;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use cli::handlers;
use infraheal_core::models::{Configuration, LogLevel};
use infraheal_core::services::logging::init_logging;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "infraheal")]
#[command(version = "0.1.0")]
#[command(about = "Policy-gated terraform remediation for self-healing infrastructure")]
#[command(
    help_template = "{name} - {version}\n{about}\n\n{usage-heading}\n  {usage}\n\n{all-args}{options}\n"
)]
struct Cli {
    /// Path to the configuration file (defaults to the XDG config location)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the configured log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan, validate, and optionally apply terraform changes
    ///
    /// Runs the full change-application workflow: init, workspace select,
    /// plan, policy validation, and (with --auto-approve) apply. Without
    /// --auto-approve the workflow stops after validation; a later call
    /// re-plans from scratch, the plan artifact is never reused.
    ///
    /// Examples:
    ///   infraheal apply --workspace-dir ./prod --workspace prod
    ///   infraheal apply --workspace-dir ./prod --auto-approve --changes '{"desired_capacity": 3}'
    Apply {
        /// Terraform workspace directory (overrides configuration)
        #[arg(long)]
        workspace_dir: Option<PathBuf>,

        /// Terraform workspace name (overrides configuration)
        #[arg(long)]
        workspace: Option<String>,

        /// Requested changes as an inline JSON value, echoed in the result
        #[arg(long)]
        changes: Option<String>,

        /// Apply the validated plan without interactive confirmation
        #[arg(long)]
        auto_approve: bool,

        /// Output the execution result in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Evaluate a rendered plan document against the policy gate
    ///
    /// Reads `terraform show -json` output from a file and prints the
    /// verdict without invoking the tool. Exits 1 when the plan is denied
    /// and 2 when the file is not a valid plan document.
    Check {
        /// Path to the rendered plan JSON
        plan_file: PathBuf,

        /// Additional protected resource types for this invocation
        #[arg(long = "protect", value_name = "TYPE")]
        protect: Vec<String>,

        /// Output the verdict in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Manage infraheal configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Write a default configuration file
    Init,
    /// Print the resolved configuration
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Configuration::default_config_path()
            .map_err(|e| anyhow!("Failed to resolve config path: {}", e))?,
    };

    let mut config = Configuration::load_from_file(&config_path)
        .map_err(|e| anyhow!("Failed to load configuration: {}", e))?;

    if let Some(level) = &cli.log_level {
        config.log_level = parse_log_level(level)?;
    }

    init_logging(config.log_level.clone())
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    match cli.command {
        Commands::Apply {
            workspace_dir,
            workspace,
            changes,
            auto_approve,
            json,
        } => {
            if let Some(dir) = workspace_dir {
                config.workspace_dir = dir;
            }
            if let Some(name) = workspace {
                config.workspace_name = name;
            }
            handlers::handle_apply(config, changes, auto_approve, json).await
        }
        Commands::Check {
            plan_file,
            protect,
            json,
        } => handlers::handle_check(&config, plan_file, protect, json),
        Commands::Config { command } => match command {
            ConfigCommands::Init => handlers::handle_config_init(&config_path),
            ConfigCommands::Show => handlers::handle_config_show(&config),
        },
    }
}

fn parse_log_level(level: &str) -> Result<LogLevel> {
    match level {
        "error" => Ok(LogLevel::Error),
        "warn" => Ok(LogLevel::Warn),
        "info" => Ok(LogLevel::Info),
        "debug" => Ok(LogLevel::Debug),
        "trace" => Ok(LogLevel::Trace),
        other => Err(anyhow!("Unknown log level: {}", other)),
    }
}
