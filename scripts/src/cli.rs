//! Definitions of CLI arguments and commands for the helper scripts

use std::path::PathBuf;

use alloy::primitives::{Address, U256};
use clap::{Args, Parser, Subcommand};

use crate::{
    chain::AlloyClient,
    commands::{account, breed, deploy_mocks, fund, get_contract},
    config::{NetworkConfig, Settings},
    constants::{DECIMALS, DEFAULT_ARTIFACTS_DIR, DEFAULT_KEYSTORE_DIR, DEFAULT_NETWORK},
    errors::ScriptError,
    provisioner::Provisioner,
};

/// Deploy mocks, resolve contracts, and fund contracts on an EVM network
#[derive(Parser)]
pub struct Cli {
    /// The active network
    #[arg(short, long, env = "NETWORK", default_value = DEFAULT_NETWORK)]
    pub network: String,

    /// Network RPC URL, overriding the network config
    #[arg(short, long, env = "RPC_URL")]
    pub rpc_url: Option<String>,

    /// Path to the network config JSON file
    #[arg(short, long, env = "NETWORK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory containing the compiled mock artifacts
    #[arg(short, long, env = "ARTIFACTS_DIR", default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts_dir: PathBuf,

    /// Private key of the deployer, overriding `wallets.from_key`
    #[arg(short, long, env = "PRIVATE_KEY", hide_env_values = true)]
    pub priv_key: Option<String>,

    /// Directory containing stored accounts
    #[arg(long, env = "KEYSTORE_DIR", default_value = DEFAULT_KEYSTORE_DIR)]
    pub keystore_dir: PathBuf,

    /// Password of stored accounts
    #[arg(long, env = "KEYSTORE_PASSWORD", hide_env_values = true)]
    pub keystore_password: Option<String>,

    /// The command to run
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Build the settings of the active network from the CLI arguments
    pub fn settings(&self) -> Result<Settings, ScriptError> {
        let config = match &self.config {
            Some(path) => NetworkConfig::from_file(path)?,
            None => NetworkConfig::default(),
        };

        let mut settings = Settings::new(self.network.clone(), config)?
            .with_keystore(self.keystore_dir.clone(), self.keystore_password.clone());
        if let Some(rpc_url) = &self.rpc_url {
            settings = settings.with_rpc_url(rpc_url.clone());
        }
        if let Some(priv_key) = &self.priv_key {
            settings = settings.with_wallet_key(priv_key.clone());
        }

        Ok(settings)
    }
}

/// The helper commands
#[derive(Subcommand)]
pub enum Command {
    /// Deploy a mock suite to the active network
    DeployMocks(DeployMocksArgs),
    /// Resolve a contract on the active network
    GetContract(GetContractArgs),
    /// Fund a contract with LINK
    Fund(FundArgs),
    /// Show the account selected on the active network
    Account(AccountArgs),
    /// Look up a breed by its code
    Breed(BreedArgs),
}

impl Command {
    /// Run the command against the active network
    pub async fn run(
        self,
        provisioner: &Provisioner<AlloyClient>,
        settings: &Settings,
    ) -> Result<(), ScriptError> {
        match self {
            Command::DeployMocks(args) => deploy_mocks(args, provisioner, settings).await,
            Command::GetContract(args) => get_contract(args, provisioner, settings).await,
            Command::Fund(args) => fund(args, provisioner, settings).await,
            Command::Account(args) => account(args, provisioner, settings).await,
            Command::Breed(args) => breed(args),
        }
    }
}

/// Deploy a mock suite
#[derive(Args)]
pub struct DeployMocksArgs {
    /// Decimals of the mock price feed
    #[arg(short, long, default_value_t = DECIMALS)]
    pub decimals: u8,

    /// Initial answer of the mock price feed, in whole units
    #[arg(short, long, default_value = "2000")]
    pub initial_value: String,
}

/// Resolve a contract by its registered name
#[derive(Args)]
pub struct GetContractArgs {
    /// The registered name, e.g. `eth_usd_price_feed`
    #[arg(short, long)]
    pub name: String,
}

/// Fund a contract with LINK
#[derive(Args)]
pub struct FundArgs {
    /// Address of the contract to fund
    #[arg(short, long)]
    pub target: Address,

    /// Amount of LINK to send, in whole units
    #[arg(short, long, default_value = "0.3")]
    pub amount: String,

    /// Index of the node account to fund from
    #[arg(short, long)]
    pub index: Option<usize>,

    /// Identifier of the stored account to fund from
    #[arg(long)]
    pub id: Option<String>,
}

/// Select an account
#[derive(Args)]
pub struct AccountArgs {
    /// Index of the node account
    #[arg(short, long)]
    pub index: Option<usize>,

    /// Identifier of a stored account
    #[arg(long)]
    pub id: Option<String>,
}

/// Look up a breed
#[derive(Args)]
pub struct BreedArgs {
    /// The on-chain breed code
    #[arg(short, long)]
    pub code: u8,

    /// Address of the collectible contract, to print the token's marketplace url
    #[arg(short, long, requires = "token_id")]
    pub address: Option<Address>,

    /// Token ID of the collectible
    #[arg(short, long)]
    pub token_id: Option<U256>,
}
