//! An in-memory chain used to drive the helper operations in tests
#![allow(dead_code)]

use std::{collections::HashMap, sync::Mutex};

use alloy::primitives::{Address, Bytes, TxHash, U256};
use helper_scripts::{
    accounts::Account,
    chain::{ChainClient, TxReceipt},
    config::{NetworkConfig, Settings},
    errors::ScriptError,
    registry::{ContractHandle, MockContract},
};

/// The first default private key of a local development node
pub const DEV_PKEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// The LINK configured on the live test network
pub const LIVE_LINK: &str = "0x779877A7B0D9E8603169DdbD7836e478b4624789";

/// The ETH / USD feed configured on the live test network
pub const LIVE_ETH_USD: &str = "0x694AA1769357215DE4FAC081bf1f309aDC325306";

/// The supply minted to the deployer of the LINK mock
pub fn link_supply() -> U256 {
    U256::from(10).pow(U256::from(27))
}

/// A network config with one live network and one forked network
pub fn network_config() -> NetworkConfig {
    NetworkConfig::from_json(&format!(
        r#"{{
            "networks": {{
                "sepolia": {{
                    "eth_usd_price_feed": "{LIVE_ETH_USD}",
                    "link_token": "{LIVE_LINK}"
                }},
                "mainnet-fork": {{
                    "eth_usd_price_feed": "0x5f4eC3Df9cbd43714FE2740f5E3616155c5b8419"
                }}
            }}
        }}"#
    ))
    .unwrap()
}

/// Settings for the given network over [`network_config`]
pub fn settings(network: &str) -> Settings {
    Settings::new(network, network_config()).unwrap()
}

/// A deployment seen by the chain
#[derive(Debug, Clone)]
pub struct Deployment {
    /// The deployed contract
    pub contract: MockContract,
    /// The ABI-encoded constructor arguments
    pub constructor_args: Bytes,
    /// The deployer
    pub from: Address,
    /// The resulting address
    pub address: Address,
}

#[derive(Default)]
struct State {
    deployments: Vec<Deployment>,
    balances: HashMap<(Address, Address), U256>,
    nonce: u64,
}

impl State {
    fn next_nonce(&mut self) -> u64 {
        self.nonce += 1;
        self.nonce
    }
}

/// An in-memory chain with ten node-managed accounts
pub struct MockChain {
    accounts: Vec<Address>,
    fail_on: Option<MockContract>,
    state: Mutex<State>,
}

impl MockChain {
    pub fn new() -> Self {
        Self {
            accounts: (1..=10).map(Address::with_last_byte).collect(),
            fail_on: None,
            state: Mutex::new(State::default()),
        }
    }

    /// A chain on which deployments of `contract` fail
    pub fn failing_on(contract: MockContract) -> Self {
        Self {
            fail_on: Some(contract),
            ..Self::new()
        }
    }

    pub fn accounts(&self) -> &[Address] {
        &self.accounts
    }

    pub fn deployments(&self) -> Vec<Deployment> {
        self.state.lock().unwrap().deployments.clone()
    }

    pub fn deployments_of(&self, contract: MockContract) -> Vec<Deployment> {
        self.deployments()
            .into_iter()
            .filter(|deployment| deployment.contract == contract)
            .collect()
    }

    pub fn mint(&self, token: Address, holder: Address, amount: U256) {
        let mut state = self.state.lock().unwrap();
        *state.balances.entry((token, holder)).or_default() += amount;
    }
}

impl ChainClient for MockChain {
    async fn local_accounts(&self) -> Result<Vec<Address>, ScriptError> {
        Ok(self.accounts.clone())
    }

    async fn deploy(
        &self,
        contract: MockContract,
        constructor_args: Bytes,
        from: &Account,
    ) -> Result<Address, ScriptError> {
        if self.fail_on == Some(contract) {
            return Err(ScriptError::ContractDeployment(format!(
                "{} ran out of gas",
                contract
            )));
        }

        let mut state = self.state.lock().unwrap();
        let nonce = state.next_nonce();
        let mut bytes = [0_u8; 20];
        bytes[0] = 0xc0;
        bytes[12..].copy_from_slice(&nonce.to_be_bytes());
        let address = Address::from(bytes);

        if contract == MockContract::LinkToken {
            state
                .balances
                .insert((address, from.address()), link_supply());
        }

        state.deployments.push(Deployment {
            contract,
            constructor_args,
            from: from.address(),
            address,
        });
        Ok(address)
    }

    async fn transfer(
        &self,
        token: &ContractHandle,
        to: Address,
        amount: U256,
        from: &Account,
        _confirmations: u64,
    ) -> Result<TxReceipt, ScriptError> {
        let mut state = self.state.lock().unwrap();
        let sender = from.address();

        let sender_balance = state
            .balances
            .get(&(token.address, sender))
            .copied()
            .unwrap_or_default();
        if sender_balance < amount {
            return Err(ScriptError::Transaction(
                "ERC20: transfer amount exceeds balance".to_string(),
            ));
        }

        state
            .balances
            .insert((token.address, sender), sender_balance - amount);
        *state.balances.entry((token.address, to)).or_default() += amount;

        let nonce = state.next_nonce();
        Ok(TxReceipt {
            tx_hash: TxHash::with_last_byte(nonce as u8),
            from: sender,
            to: Some(token.address),
            block_number: Some(nonce),
            status: true,
        })
    }

    async fn balance_of(
        &self,
        token: &ContractHandle,
        holder: Address,
    ) -> Result<U256, ScriptError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .balances
            .get(&(token.address, holder))
            .copied()
            .unwrap_or_default())
    }
}
