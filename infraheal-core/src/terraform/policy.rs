//! Plan policy gate
//!
//! Inspects a rendered plan before apply and vetoes deletions of protected
//! resource types. Pure and deterministic: no tool invocation, no side
//! effects.

use crate::models::configuration::DEFAULT_PROTECTED_TYPES;
use crate::models::plan::{ChangeAction, PlanDocument};
use std::collections::HashSet;
use std::fmt;

/// A protected deletion found in a plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyBreach {
    /// Full resource address when the plan provides one
    pub address: Option<String>,
    /// Resource type that matched the protected set
    pub resource_type: String,
}

impl fmt::Display for PolicyBreach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.address {
            Some(address) => write!(
                f,
                "plan deletes protected resource type {} ({})",
                self.resource_type, address
            ),
            None => write!(f, "plan deletes protected resource type {}", self.resource_type),
        }
    }
}

/// Policy gate evaluating rendered plans against a protected-type set
#[derive(Debug, Clone)]
pub struct PlanPolicy {
    protected_types: HashSet<String>,
}

impl Default for PlanPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_PROTECTED_TYPES.iter().map(|s| s.to_string()))
    }
}

impl PlanPolicy {
    /// Create a policy with an explicit protected-type set
    pub fn new(protected_types: impl IntoIterator<Item = String>) -> Self {
        Self {
            protected_types: protected_types.into_iter().collect(),
        }
    }

    /// Check a plan, returning the first protected deletion found
    ///
    /// A plan with no resource changes is always allowed. A single protected
    /// deletion vetoes the whole plan regardless of how many benign entries
    /// surround it.
    pub fn check(&self, plan: &PlanDocument) -> Result<(), PolicyBreach> {
        for change in &plan.resource_changes {
            if change.change.actions.contains(&ChangeAction::Delete)
                && self.protected_types.contains(&change.resource_type)
            {
                return Err(PolicyBreach {
                    address: change.address.clone(),
                    resource_type: change.resource_type.clone(),
                });
            }
        }

        Ok(())
    }

    /// Allow/deny verdict for a plan (true = allow)
    pub fn validate(&self, plan: &PlanDocument) -> bool {
        self.check(plan).is_ok()
    }
}
