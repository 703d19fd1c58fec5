//! Selection of the account that signs deployments and transfers

use std::str::FromStr;

use alloy::{primitives::Address, signers::local::PrivateKeySigner};
use tracing::debug;

use crate::{
    chain::ChainClient,
    config::Settings,
    constants::{DEFAULT_ACCOUNT_INDEX, JSON_EXTENSION},
    errors::ScriptError,
};

/// An externally-owned account able to send transactions
#[derive(Debug, Clone)]
pub enum Account {
    /// An account managed and unlocked by the node
    Unlocked {
        /// The index of the account in `eth_accounts`
        index: usize,
        /// The account address
        address: Address,
    },
    /// An account whose key is held locally
    Local(PrivateKeySigner),
}

impl Account {
    /// The address of the account
    pub fn address(&self) -> Address {
        match self {
            Account::Unlocked { address, .. } => *address,
            Account::Local(signer) => signer.address(),
        }
    }
}

/// Select the account to use on the active network.
///
/// In order of precedence: the node account at `index`, the default node account
/// on local networks, the stored account `id`, and the configured wallet key if
/// the active network is configured. Returns `None` if nothing applies.
pub async fn get_account(
    settings: &Settings,
    client: &impl ChainClient,
    index: Option<usize>,
    id: Option<&str>,
) -> Result<Option<Account>, ScriptError> {
    if let Some(index) = index {
        return unlocked_account(client, index).await.map(Some);
    }

    if settings.is_local() {
        return unlocked_account(client, DEFAULT_ACCOUNT_INDEX)
            .await
            .map(Some);
    }

    if let Some(id) = id {
        return load_stored_account(settings, id).map(Some);
    }

    if settings.is_configured() {
        let key = settings.wallet_key()?.ok_or_else(|| {
            ScriptError::Configuration("no wallet key configured".to_string())
        })?;
        return signer_from_key(&key).map(|signer| Some(Account::Local(signer)));
    }

    debug!("no account available on `{}`", settings.network);
    Ok(None)
}

/// Fetch the node-managed account at the given index
async fn unlocked_account(
    client: &impl ChainClient,
    index: usize,
) -> Result<Account, ScriptError> {
    let address = client
        .local_accounts()
        .await?
        .get(index)
        .copied()
        .ok_or_else(|| ScriptError::Configuration(format!("no node account at index {}", index)))?;

    Ok(Account::Unlocked { index, address })
}

/// Decrypt the stored account with the given identifier
fn load_stored_account(settings: &Settings, id: &str) -> Result<Account, ScriptError> {
    let path = settings.keystore_dir.join(format!("{}.{}", id, JSON_EXTENSION));
    if !path.exists() {
        return Err(ScriptError::Configuration(format!(
            "no stored account `{}`",
            id
        )));
    }

    let password = settings.keystore_password.as_deref().ok_or_else(|| {
        ScriptError::Configuration(format!("no password given for stored account `{}`", id))
    })?;

    let signer = PrivateKeySigner::decrypt_keystore(&path, password)
        .map_err(|e| ScriptError::Keystore(e.to_string()))?;

    Ok(Account::Local(signer))
}

/// Parse a hex-encoded private key
fn signer_from_key(key: &str) -> Result<PrivateKeySigner, ScriptError> {
    PrivateKeySigner::from_str(key)
        .map_err(|e| ScriptError::Configuration(format!("invalid wallet key: {}", e)))
}
