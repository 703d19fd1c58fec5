//! Helpers for deploying, resolving, and funding contracts across local
//! development chains and live networks.

#![deny(missing_docs)]

pub mod accounts;
pub mod artifacts;
pub mod breeds;
pub mod chain;
pub mod cli;
mod commands;
pub mod config;
pub mod constants;
pub mod errors;
pub mod provisioner;
pub mod registry;
#[allow(missing_docs)]
pub mod solidity;
