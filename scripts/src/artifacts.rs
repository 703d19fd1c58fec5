//! Loading of compiled contract artifacts

use std::{fs, path::PathBuf};

use alloy::{json_abi::JsonAbi, primitives::Bytes};
use serde::Deserialize;

use crate::{constants::JSON_EXTENSION, errors::ScriptError, registry::MockContract};

/// The creation bytecode, in either the flat (Brownie) or nested (Foundry) layout
#[derive(Deserialize)]
#[serde(untagged)]
enum RawBytecode {
    /// `"bytecode": "0x..."`
    Flat(Bytes),
    /// `"bytecode": { "object": "0x..." }`
    Nested {
        /// The bytecode itself
        object: Bytes,
    },
}

impl From<RawBytecode> for Bytes {
    fn from(raw: RawBytecode) -> Self {
        match raw {
            RawBytecode::Flat(bytes) | RawBytecode::Nested { object: bytes } => bytes,
        }
    }
}

/// The on-disk layout of an artifact
#[derive(Deserialize)]
struct RawArtifact {
    /// The contract ABI
    abi: JsonAbi,
    /// The contract creation bytecode
    bytecode: RawBytecode,
}

/// A compiled contract
#[derive(Debug, Clone)]
pub struct Artifact {
    /// The contract ABI
    pub abi: JsonAbi,
    /// The contract creation bytecode
    pub bytecode: Bytes,
}

impl Artifact {
    /// Parse an artifact from its JSON representation
    pub fn from_json(contents: &str) -> Result<Self, ScriptError> {
        let RawArtifact { abi, bytecode } = serde_json::from_str(contents)
            .map_err(|e| ScriptError::ArtifactParsing(e.to_string()))?;
        let bytecode: Bytes = bytecode.into();

        if bytecode.is_empty() {
            return Err(ScriptError::ArtifactParsing(
                "artifact has no creation bytecode".to_string(),
            ));
        }

        Ok(Self { abi, bytecode })
    }

    /// The number of arguments the constructor takes
    pub fn constructor_arity(&self) -> usize {
        self.abi
            .constructor()
            .map_or(0, |constructor| constructor.inputs.len())
    }

    /// Concatenate the creation bytecode with ABI-encoded constructor arguments
    pub fn deploy_code(&self, constructor_args: &[u8]) -> Result<Bytes, ScriptError> {
        if self.constructor_arity() > 0 && constructor_args.is_empty() {
            return Err(ScriptError::ContractDeployment(format!(
                "constructor expects {} arguments, none given",
                self.constructor_arity()
            )));
        }

        let mut code = self.bytecode.to_vec();
        code.extend_from_slice(constructor_args);
        Ok(code.into())
    }
}

/// A directory of compiled artifacts, one `<ContractName>.json` per contract
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    /// The artifacts directory
    dir: PathBuf,
}

impl ArtifactStore {
    /// Create a store reading from the given directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The path of the artifact for the given contract
    pub fn path(&self, contract: MockContract) -> PathBuf {
        self.dir
            .join(format!("{}.{}", contract.artifact_name(), JSON_EXTENSION))
    }

    /// Load the artifact for the given contract
    pub fn load(&self, contract: MockContract) -> Result<Artifact, ScriptError> {
        let path = self.path(contract);
        let contents = fs::read_to_string(&path)
            .map_err(|e| ScriptError::ReadFile(format!("{}: {}", path.display(), e)))?;
        Artifact::from_json(&contents)
    }
}
