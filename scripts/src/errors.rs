//! Definitions of errors that can occur while resolving, deploying, and funding contracts

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use crate::registry::MockContract;

/// Errors that can occur during the execution of the helper scripts
#[derive(Debug)]
pub enum ScriptError {
    /// A contract name, network, or account was not found in the configuration
    Configuration(String),
    /// A submitted transaction reverted, or the client failed to submit it
    Transaction(String),
    /// The mock suite was left partially deployed
    PartialProvisioning {
        /// The mocks that were deployed before the failure, in deployment order
        deployed: Vec<MockContract>,
        /// The mock whose deployment failed
        failed: MockContract,
        /// The underlying failure
        reason: String,
    },
    /// Error reading a file from disk
    ReadFile(String),
    /// Error parsing a compiled contract artifact
    ArtifactParsing(String),
    /// Error initializing the RPC client
    ClientInitialization(String),
    /// Error deploying a contract
    ContractDeployment(String),
    /// Error calling a contract method
    ContractInteraction(String),
    /// Error decrypting a stored keystore
    Keystore(String),
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::Configuration(s) => write!(f, "configuration error: {}", s),
            ScriptError::Transaction(s) => write!(f, "transaction error: {}", s),
            ScriptError::PartialProvisioning {
                deployed,
                failed,
                reason,
            } => write!(
                f,
                "mock suite partially deployed ({} deployed), {} failed: {}",
                deployed.len(),
                failed,
                reason
            ),
            ScriptError::ReadFile(s) => write!(f, "error reading file: {}", s),
            ScriptError::ArtifactParsing(s) => write!(f, "error parsing artifact: {}", s),
            ScriptError::ClientInitialization(s) => write!(f, "error initializing client: {}", s),
            ScriptError::ContractDeployment(s) => write!(f, "error deploying contract: {}", s),
            ScriptError::ContractInteraction(s) => {
                write!(f, "error interacting with contract: {}", s)
            }
            ScriptError::Keystore(s) => write!(f, "error loading keystore: {}", s),
        }
    }
}

impl Error for ScriptError {}
