//! The chain client the helper operations are driven through, and its
//! JSON-RPC implementation

use std::path::PathBuf;

use alloy::{
    network::{Ethereum, TransactionBuilder},
    primitives::{Address, Bytes, TxHash, U256},
    providers::{DynProvider, Provider, ProviderBuilder},
    rpc::types::{TransactionReceipt, TransactionRequest},
    transports::http::reqwest::Url,
};
use tracing::debug;

use crate::{
    accounts::Account,
    artifacts::ArtifactStore,
    errors::ScriptError,
    registry::{ContractHandle, MockContract},
};

/// The subset of a transaction receipt the helper operations report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
    /// The transaction hash
    pub tx_hash: TxHash,
    /// The sender
    pub from: Address,
    /// The called contract, `None` for deployments
    pub to: Option<Address>,
    /// The block the transaction was included in
    pub block_number: Option<u64>,
    /// Whether the transaction succeeded
    pub status: bool,
}

impl From<TransactionReceipt> for TxReceipt {
    fn from(receipt: TransactionReceipt) -> Self {
        Self {
            tx_hash: receipt.transaction_hash,
            from: receipt.from,
            to: receipt.to,
            block_number: receipt.block_number,
            status: receipt.status(),
        }
    }
}

/// The chain operations the resolver and provisioner rely on
#[allow(async_fn_in_trait)]
pub trait ChainClient {
    /// The accounts managed by the node, in `eth_accounts` order
    async fn local_accounts(&self) -> Result<Vec<Address>, ScriptError>;

    /// Deploy a contract from `from`, waiting for the deployment to be mined
    async fn deploy(
        &self,
        contract: MockContract,
        constructor_args: Bytes,
        from: &Account,
    ) -> Result<Address, ScriptError>;

    /// Transfer `amount` of `token` from `from` to `to`, waiting for the given
    /// number of confirmations
    async fn transfer(
        &self,
        token: &ContractHandle,
        to: Address,
        amount: U256,
        from: &Account,
        confirmations: u64,
    ) -> Result<TxReceipt, ScriptError>;

    /// The `token` balance of `holder`
    async fn balance_of(&self, token: &ContractHandle, holder: Address)
        -> Result<U256, ScriptError>;
}

/// A [`ChainClient`] speaking JSON-RPC over HTTP
#[derive(Debug, Clone)]
pub struct AlloyClient {
    /// The node's RPC url
    rpc_url: Url,
    /// Where compiled mocks are read from
    artifacts: ArtifactStore,
}

impl AlloyClient {
    /// Create a client for the given RPC url, deploying from the given artifacts directory
    pub fn new(rpc_url: &str, artifacts_dir: impl Into<PathBuf>) -> Result<Self, ScriptError> {
        let rpc_url =
            Url::parse(rpc_url).map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

        Ok(Self {
            rpc_url,
            artifacts: ArtifactStore::new(artifacts_dir),
        })
    }

    /// A read-only provider
    pub fn provider(&self) -> DynProvider<Ethereum> {
        DynProvider::new(ProviderBuilder::new().connect_http(self.rpc_url.clone()))
    }

    /// A provider sending transactions from the given account.
    ///
    /// Transactions from node-managed accounts are signed by the node.
    fn sending_provider(&self, from: &Account) -> DynProvider<Ethereum> {
        match from {
            Account::Unlocked { .. } => self.provider(),
            Account::Local(signer) => DynProvider::new(
                ProviderBuilder::new()
                    .wallet(signer.clone())
                    .connect_http(self.rpc_url.clone()),
            ),
        }
    }
}

impl ChainClient for AlloyClient {
    async fn local_accounts(&self) -> Result<Vec<Address>, ScriptError> {
        self.provider()
            .get_accounts()
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))
    }

    async fn deploy(
        &self,
        contract: MockContract,
        constructor_args: Bytes,
        from: &Account,
    ) -> Result<Address, ScriptError> {
        let code = self.artifacts.load(contract)?.deploy_code(&constructor_args)?;
        let tx = TransactionRequest::default()
            .with_from(from.address())
            .with_deploy_code(code);

        let receipt = self
            .sending_provider(from)
            .send_transaction(tx)
            .await
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?
            .get_receipt()
            .await
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;

        if !receipt.status() {
            return Err(ScriptError::ContractDeployment(format!(
                "deployment of {} reverted in {}",
                contract, receipt.transaction_hash
            )));
        }

        debug!(
            "{} deployment mined in {}",
            contract, receipt.transaction_hash
        );
        receipt.contract_address.ok_or_else(|| {
            ScriptError::ContractDeployment(format!("no contract address for {}", contract))
        })
    }

    async fn transfer(
        &self,
        token: &ContractHandle,
        to: Address,
        amount: U256,
        from: &Account,
        confirmations: u64,
    ) -> Result<TxReceipt, ScriptError> {
        let erc20 = token.erc20(self.sending_provider(from))?;

        let receipt = erc20
            .transfer(to, amount)
            .from(from.address())
            .send()
            .await
            .map_err(|e| ScriptError::Transaction(e.to_string()))?
            .with_required_confirmations(confirmations)
            .get_receipt()
            .await
            .map_err(|e| ScriptError::Transaction(e.to_string()))?;

        if !receipt.status() {
            return Err(ScriptError::Transaction(format!(
                "transfer reverted in {}",
                receipt.transaction_hash
            )));
        }

        Ok(receipt.into())
    }

    async fn balance_of(
        &self,
        token: &ContractHandle,
        holder: Address,
    ) -> Result<U256, ScriptError> {
        token
            .erc20(self.provider())?
            .balanceOf(holder)
            .call()
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))
    }
}
