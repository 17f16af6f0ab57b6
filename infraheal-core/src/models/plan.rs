//! Structured representation of a rendered terraform plan
//!
//! Mirrors the subset of `terraform show -json` output that the policy gate
//! inspects. Fields the gate never reads are not modeled.

use serde::{Deserialize, Serialize};

/// A machine-readable plan as rendered by `show -json`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PlanDocument {
    /// Plan format version reported by the tool
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_version: Option<String>,
    /// Tool version that produced the plan
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terraform_version: Option<String>,
    /// Ordered per-resource proposed changes; a missing key parses as empty
    #[serde(default)]
    pub resource_changes: Vec<ResourceChange>,
}

/// Proposed change for a single resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceChange {
    /// Full resource address, e.g. `aws_db_instance.primary`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Resource type, e.g. `aws_db_instance`
    #[serde(rename = "type")]
    pub resource_type: String,
    /// Resource name within its type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The change the tool proposes for this resource
    pub change: ChangeSet,
}

/// Actions proposed for one resource
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ChangeSet {
    /// Proposed actions in tool order
    #[serde(default)]
    pub actions: Vec<ChangeAction>,
}

/// Action vocabulary of the provisioning tool
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeAction {
    NoOp,
    Create,
    Read,
    Update,
    Delete,
    /// Action emitted by a tool version newer than this vocabulary
    #[serde(other)]
    Unknown,
}
