//! Network classification and the network configuration file

use std::{
    collections::HashMap,
    env, fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use alloy::primitives::Address;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    constants::{
        DEFAULT_KEYSTORE_DIR, DEFAULT_RPC_URL, FORKED_LOCAL_ENVIRONMENTS,
        LOCAL_BLOCKCHAIN_ENVIRONMENTS, RPC_URL_KEY,
    },
    errors::ScriptError,
    registry::ContractName,
};

/// How a network is treated when resolving contracts and accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkKind {
    /// An ephemeral development chain, where mocks are deployed on demand
    Local,
    /// A local fork of mainnet, which uses live addresses
    ForkedMainnet,
    /// A testnet or mainnet
    Live,
}

impl NetworkKind {
    /// Classify a network by its identifier
    pub fn classify(network: &str) -> Self {
        if LOCAL_BLOCKCHAIN_ENVIRONMENTS.contains(&network) {
            NetworkKind::Local
        } else if FORKED_LOCAL_ENVIRONMENTS.contains(&network) {
            NetworkKind::ForkedMainnet
        } else {
            NetworkKind::Live
        }
    }
}

/// Wallet key material from the network configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WalletConfig {
    /// The private key used on configured networks
    #[serde(default)]
    pub from_key: Option<String>,
}

/// The network configuration file, keyed by network identifier
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NetworkConfig {
    /// Wallet key material
    #[serde(default)]
    pub wallets: WalletConfig,
    /// Per-network settings and contract addresses
    #[serde(default)]
    pub networks: HashMap<String, HashMap<String, Value>>,
}

impl NetworkConfig {
    /// Read the network configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, ScriptError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ScriptError::ReadFile(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&contents)
    }

    /// Parse the network configuration from a JSON string
    pub fn from_json(contents: &str) -> Result<Self, ScriptError> {
        serde_json::from_str(contents).map_err(|e| ScriptError::Configuration(e.to_string()))
    }

    /// Look up a string value under the given network, expanding `${VAR}` references
    fn network_value(&self, network: &str, key: &str) -> Result<String, ScriptError> {
        let entries = self.networks.get(network).ok_or_else(|| {
            ScriptError::Configuration(format!("network `{}` is not configured", network))
        })?;

        let value = entries.get(key).ok_or_else(|| {
            ScriptError::Configuration(format!("`{}` is not configured for `{}`", key, network))
        })?;

        let raw = value.as_str().ok_or_else(|| {
            ScriptError::Configuration(format!("`{}.{}` is not a string", network, key))
        })?;

        expand_env(raw)
    }
}

/// Expand a value of the form `${VAR}` from the environment, leaving other values untouched
pub fn expand_env(value: &str) -> Result<String, ScriptError> {
    match value
        .strip_prefix("${")
        .and_then(|rest| rest.strip_suffix('}'))
    {
        Some(var) => env::var(var).map_err(|_| {
            ScriptError::Configuration(format!("environment variable `{}` is not set", var))
        }),
        None => Ok(value.to_string()),
    }
}

/// Everything the helper operations read about the active network.
///
/// Constructed once at startup and passed by reference into each operation.
#[derive(Debug, Clone)]
pub struct Settings {
    /// The active network identifier
    pub network: String,
    /// The classification of the active network
    pub kind: NetworkKind,
    /// The RPC url of the active network
    pub rpc_url: String,
    /// The network configuration
    pub config: NetworkConfig,
    /// A private key taking precedence over `wallets.from_key`
    pub wallet_key: Option<String>,
    /// The directory holding stored accounts
    pub keystore_dir: PathBuf,
    /// The password used to decrypt stored accounts
    pub keystore_password: Option<String>,
}

impl Settings {
    /// Create settings for the given network.
    ///
    /// The RPC url is taken from the network's `rpc_url` entry if there is one,
    /// and otherwise defaults to a local node. An `rpc_url` entry that is not a
    /// string, or that names an unset environment variable, is an error.
    pub fn new(network: impl Into<String>, config: NetworkConfig) -> Result<Self, ScriptError> {
        let network = network.into();
        let has_rpc_url = config
            .networks
            .get(&network)
            .is_some_and(|entries| entries.contains_key(RPC_URL_KEY));
        let rpc_url = if has_rpc_url {
            config.network_value(&network, RPC_URL_KEY)?
        } else {
            DEFAULT_RPC_URL.to_string()
        };

        Ok(Self {
            kind: NetworkKind::classify(&network),
            network,
            rpc_url,
            config,
            wallet_key: None,
            keystore_dir: PathBuf::from(DEFAULT_KEYSTORE_DIR),
            keystore_password: None,
        })
    }

    /// Override the RPC url
    pub fn with_rpc_url(mut self, rpc_url: impl Into<String>) -> Self {
        self.rpc_url = rpc_url.into();
        self
    }

    /// Override the configured wallet key
    pub fn with_wallet_key(mut self, key: impl Into<String>) -> Self {
        self.wallet_key = Some(key.into());
        self
    }

    /// Set where stored accounts are read from
    pub fn with_keystore(mut self, dir: impl Into<PathBuf>, password: Option<String>) -> Self {
        self.keystore_dir = dir.into();
        self.keystore_password = password;
        self
    }

    /// Whether mocks are used on the active network
    pub fn is_local(&self) -> bool {
        self.kind == NetworkKind::Local
    }

    /// Whether the active network has an entry in the network configuration
    pub fn is_configured(&self) -> bool {
        self.config.networks.contains_key(&self.network)
    }

    /// The configured address of a contract on the active network
    pub fn contract_address(&self, name: ContractName) -> Result<Address, ScriptError> {
        let raw = self.config.network_value(&self.network, name.as_str())?;
        Address::from_str(&raw).map_err(|e| {
            ScriptError::Configuration(format!("invalid address for `{}`: {}", name, e))
        })
    }

    /// The wallet key for configured networks, if any
    pub fn wallet_key(&self) -> Result<Option<String>, ScriptError> {
        if let Some(key) = &self.wallet_key {
            return Ok(Some(key.clone()));
        }

        self.config
            .wallets
            .from_key
            .as_deref()
            .map(expand_env)
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use alloy::primitives::address;

    use super::{expand_env, NetworkConfig, NetworkKind, Settings};
    use crate::{constants::DEFAULT_RPC_URL, errors::ScriptError, registry::ContractName};

    const CONFIG: &str = r#"{
        "wallets": { "from_key": "${HELPER_SCRIPTS_CONFIG_TEST_KEY}" },
        "networks": {
            "sepolia": {
                "rpc_url": "https://sepolia.example",
                "verify": true,
                "eth_usd_price_feed": "0x694AA1769357215DE4FAC081bf1f309aDC325306"
            },
            "mainnet-fork": {}
        }
    }"#;

    #[test]
    fn test_classify() {
        assert_eq!(NetworkKind::classify("development"), NetworkKind::Local);
        assert_eq!(NetworkKind::classify("ganache-local"), NetworkKind::Local);
        assert_eq!(
            NetworkKind::classify("mainnet-fork-dev"),
            NetworkKind::ForkedMainnet
        );
        assert_eq!(NetworkKind::classify("sepolia"), NetworkKind::Live);
    }

    #[test]
    fn test_contract_address() {
        let config = NetworkConfig::from_json(CONFIG).unwrap();
        let settings = Settings::new("sepolia", config).unwrap();

        assert_eq!(settings.rpc_url, "https://sepolia.example");
        assert_eq!(
            settings
                .contract_address(ContractName::EthUsdPriceFeed)
                .unwrap(),
            address!("0x694AA1769357215DE4FAC081bf1f309aDC325306")
        );
        assert!(matches!(
            settings.contract_address(ContractName::LinkToken),
            Err(ScriptError::Configuration(_))
        ));
    }

    #[test]
    fn test_unconfigured_network() {
        let config = NetworkConfig::from_json(CONFIG).unwrap();
        let settings = Settings::new("holesky", config).unwrap();

        assert!(!settings.is_configured());
        assert_eq!(settings.rpc_url, DEFAULT_RPC_URL);
        assert!(matches!(
            settings.contract_address(ContractName::EthUsdPriceFeed),
            Err(ScriptError::Configuration(_))
        ));
    }

    #[test]
    fn test_invalid_rpc_url() {
        let config = NetworkConfig::from_json(
            r#"{ "networks": { "sepolia": { "rpc_url": "${HELPER_SCRIPTS_UNSET_RPC}" } } }"#,
        )
        .unwrap();
        assert!(matches!(
            Settings::new("sepolia", config),
            Err(ScriptError::Configuration(_))
        ));

        let config =
            NetworkConfig::from_json(r#"{ "networks": { "sepolia": { "rpc_url": 8545 } } }"#)
                .unwrap();
        assert!(matches!(
            Settings::new("sepolia", config),
            Err(ScriptError::Configuration(_))
        ));
    }

    #[test]
    fn test_rpc_url_defaults_when_absent() {
        let config = NetworkConfig::from_json(CONFIG).unwrap();
        let settings = Settings::new("mainnet-fork", config).unwrap();

        assert!(settings.is_configured());
        assert_eq!(settings.rpc_url, DEFAULT_RPC_URL);
    }

    #[test]
    fn test_wallet_key_expansion() {
        let config = NetworkConfig::from_json(CONFIG).unwrap();
        let settings = Settings::new("sepolia", config).unwrap();

        env::set_var("HELPER_SCRIPTS_CONFIG_TEST_KEY", "0xabc");
        assert_eq!(settings.wallet_key().unwrap().as_deref(), Some("0xabc"));

        let settings = settings.with_wallet_key("0xdef");
        assert_eq!(settings.wallet_key().unwrap().as_deref(), Some("0xdef"));
    }

    #[test]
    fn test_expand_env() {
        assert_eq!(expand_env("plain").unwrap(), "plain");
        assert!(matches!(
            expand_env("${HELPER_SCRIPTS_SURELY_UNSET}"),
            Err(ScriptError::Configuration(_))
        ));
    }
}
