//! Constants used in the helper scripts

use alloy::primitives::U256;

/// Networks on which mocks are deployed in place of live dependencies
pub const LOCAL_BLOCKCHAIN_ENVIRONMENTS: [&str; 3] = ["development", "ganache-local", "anvil"];

/// Networks that fork mainnet state. These resolve live addresses, but are
/// still driven by local nodes.
pub const FORKED_LOCAL_ENVIRONMENTS: [&str; 2] = ["mainnet-fork", "mainnet-fork-dev"];

/// The network used when none is given
pub const DEFAULT_NETWORK: &str = "development";

/// The RPC url of a local development node
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";

/// The directory holding compiled contract artifacts
pub const DEFAULT_ARTIFACTS_DIR: &str = "build/contracts";

/// The directory holding stored (encrypted) accounts
pub const DEFAULT_KEYSTORE_DIR: &str = "keystores";

/// The extension of compiled artifacts and keystore files
pub const JSON_EXTENSION: &str = "json";

/// The number of decimals the mock price feed reports with
pub const DECIMALS: u8 = 18;

/// The initial answer of the mock price feed, 2000 whole units at 18 decimals
pub const INITIAL_VALUE: U256 = U256::from_limbs([7751640039368425472, 108, 0, 0]);

/// The default LINK amount sent by `fund_with_link`, 0.3 LINK
pub const DEFAULT_FUND_AMOUNT: U256 = U256::from_limbs([300_000_000_000_000_000, 0, 0, 0]);

/// The number of confirmations to wait for on a funding transfer
pub const NUM_FUND_CONFIRMATIONS: u64 = 1;

/// The index of the default node-managed account on local networks
pub const DEFAULT_ACCOUNT_INDEX: usize = 0;

/// The key under which a network's RPC url may be given in the network config
pub const RPC_URL_KEY: &str = "rpc_url";

/// The base url of the testnet NFT marketplace
pub const OPENSEA_URL: &str = "https://testnets.opensea.io/assets";
