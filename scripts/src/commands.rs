//! Implementations of the helper commands

use alloy::primitives::utils::{format_ether, parse_ether, parse_units};
use tracing::{info, warn};

use crate::{
    breeds::{get_breed, opensea_url},
    chain::{AlloyClient, ChainClient},
    cli::{AccountArgs, BreedArgs, DeployMocksArgs, FundArgs, GetContractArgs},
    config::Settings,
    errors::ScriptError,
    provisioner::{FundOptions, Provisioner},
    registry::{ContractHandle, ContractName},
};

pub async fn deploy_mocks(
    args: DeployMocksArgs,
    provisioner: &Provisioner<AlloyClient>,
    settings: &Settings,
) -> Result<(), ScriptError> {
    if !settings.is_local() {
        warn!(
            "Deploying mocks to `{}` - THIS SHOULD ONLY BE DONE FOR TESTING",
            settings.network
        );
    }

    let initial_value = parse_units(&args.initial_value, args.decimals)
        .map_err(|e| ScriptError::Configuration(e.to_string()))?
        .get_absolute();

    let suite = provisioner
        .deploy_mocks(settings, args.decimals, initial_value)
        .await?;
    for (contract, address) in suite.deployments {
        info!("{}: {:#x}", contract, address);
    }

    Ok(())
}

pub async fn get_contract(
    args: GetContractArgs,
    provisioner: &Provisioner<AlloyClient>,
    settings: &Settings,
) -> Result<(), ScriptError> {
    let handle = provisioner.get_contract(settings, &args.name).await?;
    info!("{} ({}) at {:#x}", args.name, handle.contract, handle.address);

    describe(&handle, provisioner.client()).await
}

/// Log what a resolved contract currently reports
async fn describe(handle: &ContractHandle, client: &AlloyClient) -> Result<(), ScriptError> {
    let provider = client.provider();

    if handle.contract.is_erc20() {
        let total_supply = handle
            .erc20(provider)?
            .totalSupply()
            .call()
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;
        info!("Total supply: {}", format_ether(total_supply));
    } else {
        let feed = handle.price_feed(provider)?;
        let decimals = feed
            .decimals()
            .call()
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;
        let answer = feed
            .latestAnswer()
            .call()
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;
        info!("Latest answer: {} ({} decimals)", answer, decimals);
    }

    Ok(())
}

pub async fn fund(
    args: FundArgs,
    provisioner: &Provisioner<AlloyClient>,
    settings: &Settings,
) -> Result<(), ScriptError> {
    let amount =
        parse_ether(&args.amount).map_err(|e| ScriptError::Configuration(e.to_string()))?;

    let account = if args.index.is_some() || args.id.is_some() {
        let account = provisioner
            .get_account(settings, args.index, args.id.as_deref())
            .await?
            .ok_or_else(|| ScriptError::Configuration("no matching account".to_string()))?;
        Some(account)
    } else {
        None
    };

    let receipt = provisioner
        .fund_with_link(
            settings,
            args.target,
            FundOptions {
                account,
                amount,
                ..Default::default()
            },
        )
        .await?;
    info!("Funding transaction: {}", receipt.tx_hash);

    let link_token = provisioner
        .resolve(settings, ContractName::LinkToken)
        .await?;
    let balance = provisioner
        .client()
        .balance_of(&link_token, args.target)
        .await?;
    info!("{:#x} now holds {} LINK", args.target, format_ether(balance));

    Ok(())
}

pub async fn account(
    args: AccountArgs,
    provisioner: &Provisioner<AlloyClient>,
    settings: &Settings,
) -> Result<(), ScriptError> {
    match provisioner
        .get_account(settings, args.index, args.id.as_deref())
        .await?
    {
        Some(account) => info!("Using account {:#x}", account.address()),
        None => warn!("No account available on `{}`", settings.network),
    }

    Ok(())
}

pub fn breed(args: BreedArgs) -> Result<(), ScriptError> {
    let breed = get_breed(args.code)?;
    info!("Breed {}: {}", args.code, breed);

    if let (Some(address), Some(token_id)) = (args.address, args.token_id) {
        info!("View it at {}", opensea_url(address, token_id));
    }

    Ok(())
}
