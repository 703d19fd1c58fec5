//! Resolution of logical contract names to handles, deploying mocks on local
//! networks, and funding contracts with LINK

use std::collections::HashMap;

use alloy::{
    primitives::{Address, Bytes, I256, U256},
    sol_types::SolValue,
};
use tokio::sync::Mutex;
use tracing::info;

use crate::{
    accounts::{get_account, Account},
    chain::{ChainClient, TxReceipt},
    config::Settings,
    constants::{DECIMALS, DEFAULT_FUND_AMOUNT, INITIAL_VALUE, NUM_FUND_CONFIRMATIONS},
    errors::ScriptError,
    registry::{resolve_source, ContractHandle, ContractName, ContractSource, MockContract},
};

/// The latest deployed instance of each mock.
///
/// Only written by mock suite deployments.
#[derive(Debug, Default, Clone)]
pub struct MockRegistry {
    /// The latest address per mock type
    latest: HashMap<MockContract, Address>,
}

impl MockRegistry {
    /// The latest deployed instance of the given mock
    pub fn latest(&self, contract: MockContract) -> Option<Address> {
        self.latest.get(&contract).copied()
    }

    /// Whether no mock has been deployed yet
    pub fn is_empty(&self) -> bool {
        self.latest.is_empty()
    }

    /// Record a newly deployed mock, superseding earlier instances
    fn record(&mut self, contract: MockContract, address: Address) {
        self.latest.insert(contract, address);
    }
}

/// The addresses of one deployed mock suite, in deployment order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockSuite {
    /// The deployed mocks
    pub deployments: Vec<(MockContract, Address)>,
}

impl MockSuite {
    /// The address the given mock was deployed to in this suite
    pub fn address(&self, contract: MockContract) -> Option<Address> {
        self.deployments
            .iter()
            .find(|(deployed, _)| *deployed == contract)
            .map(|(_, address)| *address)
    }
}

/// Overrides for [`Provisioner::fund_with_link`]
#[derive(Debug, Clone)]
pub struct FundOptions {
    /// The funding account, selected with [`get_account`] if unset
    pub account: Option<Account>,
    /// The LINK token, resolved by name if unset
    pub link_token: Option<ContractHandle>,
    /// The amount to transfer, in base units
    pub amount: U256,
}

impl Default for FundOptions {
    fn default() -> Self {
        Self {
            account: None,
            link_token: None,
            amount: DEFAULT_FUND_AMOUNT,
        }
    }
}

/// Resolves contracts on the active network, provisioning mocks where needed
pub struct Provisioner<C> {
    /// The chain client
    client: C,
    /// Mocks deployed by this provisioner. Held across the whole
    /// check-then-deploy so the suite is deployed at most once per miss.
    mocks: Mutex<MockRegistry>,
}

impl<C: ChainClient> Provisioner<C> {
    /// Create a provisioner with no mocks deployed
    pub fn new(client: C) -> Self {
        Self {
            client,
            mocks: Mutex::new(MockRegistry::default()),
        }
    }

    /// The underlying chain client
    pub fn client(&self) -> &C {
        &self.client
    }

    /// A snapshot of the deployed mocks
    pub async fn mocks(&self) -> MockRegistry {
        self.mocks.lock().await.clone()
    }

    /// Select the account to use on the active network, see [`get_account`]
    pub async fn get_account(
        &self,
        settings: &Settings,
        index: Option<usize>,
        id: Option<&str>,
    ) -> Result<Option<Account>, ScriptError> {
        get_account(settings, &self.client, index, id).await
    }

    /// Resolve a contract by its registered name.
    ///
    /// On local networks this deploys the mock suite if no mock of the required
    /// type exists yet, and returns the latest deployed instance.
    pub async fn get_contract(
        &self,
        settings: &Settings,
        name: &str,
    ) -> Result<ContractHandle, ScriptError> {
        let name: ContractName = name.parse()?;
        self.resolve(settings, name).await
    }

    /// Resolve a registered contract, see [`Provisioner::get_contract`]
    pub async fn resolve(
        &self,
        settings: &Settings,
        name: ContractName,
    ) -> Result<ContractHandle, ScriptError> {
        match resolve_source(settings, name)? {
            ContractSource::Mock(contract) => {
                let mut mocks = self.mocks.lock().await;
                if mocks.latest(contract).is_none() {
                    self.deploy_suite(settings, &mut mocks, DECIMALS, INITIAL_VALUE)
                        .await?;
                }

                let address = mocks.latest(contract).ok_or_else(|| {
                    ScriptError::ContractDeployment(format!("{} was not deployed", contract))
                })?;
                Ok(ContractHandle { contract, address })
            }
            ContractSource::Live { contract, address } => Ok(ContractHandle { contract, address }),
        }
    }

    /// Deploy a full mock suite: LINK, a price feed reporting `initial_value` at
    /// `decimals`, DAI, and WETH.
    ///
    /// Every call deploys a new suite, which supersedes earlier ones. A failure
    /// part way leaves the earlier mocks deployed.
    pub async fn deploy_mocks(
        &self,
        settings: &Settings,
        decimals: u8,
        initial_value: U256,
    ) -> Result<MockSuite, ScriptError> {
        let mut mocks = self.mocks.lock().await;
        self.deploy_suite(settings, &mut mocks, decimals, initial_value)
            .await
    }

    /// Deploy the mock suite, recording each mock as soon as it is deployed
    async fn deploy_suite(
        &self,
        settings: &Settings,
        mocks: &mut MockRegistry,
        decimals: u8,
        initial_value: U256,
    ) -> Result<MockSuite, ScriptError> {
        info!("The active network is {}", settings.network);
        info!("Deploying mocks...");

        let account = self
            .get_account(settings, None, None)
            .await?
            .ok_or_else(|| {
                ScriptError::Configuration("no account available to deploy mocks".to_string())
            })?;

        let feed_args = price_feed_args(decimals, initial_value)?;

        let mut suite = MockSuite {
            deployments: Vec::with_capacity(MockContract::SUITE.len()),
        };
        for contract in MockContract::SUITE {
            let constructor_args = match contract {
                MockContract::MockV3Aggregator => feed_args.clone(),
                MockContract::LinkToken | MockContract::MockDai | MockContract::MockWeth => {
                    Bytes::new()
                }
            };

            info!("Deploying {}...", contract);
            let address = match self
                .client
                .deploy(contract, constructor_args, &account)
                .await
            {
                Ok(address) => address,
                Err(e) if suite.deployments.is_empty() => return Err(e),
                Err(e) => {
                    return Err(ScriptError::PartialProvisioning {
                        deployed: suite.deployments.iter().map(|(c, _)| *c).collect(),
                        failed: contract,
                        reason: e.to_string(),
                    })
                }
            };

            mocks.record(contract, address);
            suite.deployments.push((contract, address));
            info!("{} deployed to {:#x}", contract, address);
        }

        info!("Mocks deployed!");
        Ok(suite)
    }

    /// Transfer LINK to `target`, waiting for one confirmation
    pub async fn fund_with_link(
        &self,
        settings: &Settings,
        target: Address,
        options: FundOptions,
    ) -> Result<TxReceipt, ScriptError> {
        let FundOptions {
            account,
            link_token,
            amount,
        } = options;

        let account = match account {
            Some(account) => account,
            None => self.get_account(settings, None, None).await?.ok_or_else(|| {
                ScriptError::Configuration("no account available to fund from".to_string())
            })?,
        };

        let link_token = match link_token {
            Some(link_token) => link_token,
            None => self.resolve(settings, ContractName::LinkToken).await?,
        };

        let receipt = self
            .client
            .transfer(
                &link_token,
                target,
                amount,
                &account,
                NUM_FUND_CONFIRMATIONS,
            )
            .await?;

        info!("Funded {:#x}", target);
        Ok(receipt)
    }
}

/// ABI-encode the `(uint8 decimals, int256 initialAnswer)` price feed
/// constructor arguments
fn price_feed_args(decimals: u8, initial_value: U256) -> Result<Bytes, ScriptError> {
    let initial_answer = I256::try_from(initial_value).map_err(|e| {
        ScriptError::Configuration(format!("invalid price feed initial value: {}", e))
    })?;

    // A `uint8` occupies a full word in the encoding
    Ok(Bytes::from((U256::from(decimals), initial_answer).abi_encode_params()))
}
