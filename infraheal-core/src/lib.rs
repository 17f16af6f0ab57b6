//! # Infraheal Core Library
//!
//! Shared core functionality for infraheal: remediation action models,
//! configuration, the plan policy gate, and the terraform workflow handler.

pub mod models;
pub mod services;
pub mod terraform;
