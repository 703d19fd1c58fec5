//! The registry of contracts the helper scripts know how to resolve.
//!
//! Every logical contract name maps to exactly one mock type, which also fixes
//! the ABI used to talk to the contract on live networks.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use alloy::{primitives::Address, providers::Provider};

use crate::{
    config::{NetworkKind, Settings},
    errors::ScriptError,
    solidity::{AggregatorV3Interface, AggregatorV3InterfaceInstance, IERC20Instance, IERC20},
};

/// The logical contract names that can be resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractName {
    /// The ETH / USD price feed
    EthUsdPriceFeed,
    /// The DAI / USD price feed
    DaiUsdPriceFeed,
    /// The FAU (faucet DAI) token
    FauToken,
    /// The WETH token
    WethToken,
    /// The LINK token
    LinkToken,
}

impl ContractName {
    /// All registered contract names
    pub const ALL: [ContractName; 5] = [
        ContractName::EthUsdPriceFeed,
        ContractName::DaiUsdPriceFeed,
        ContractName::FauToken,
        ContractName::WethToken,
        ContractName::LinkToken,
    ];

    /// The key of this contract in the network configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractName::EthUsdPriceFeed => "eth_usd_price_feed",
            ContractName::DaiUsdPriceFeed => "dai_usd_price_feed",
            ContractName::FauToken => "fau_token",
            ContractName::WethToken => "weth_token",
            ContractName::LinkToken => "link_token",
        }
    }

    /// The mock standing in for this contract on local networks
    pub fn mock(&self) -> MockContract {
        match self {
            ContractName::EthUsdPriceFeed | ContractName::DaiUsdPriceFeed => {
                MockContract::MockV3Aggregator
            }
            // The FAU faucet token is a DAI stand-in
            ContractName::FauToken => MockContract::MockDai,
            ContractName::WethToken => MockContract::MockWeth,
            ContractName::LinkToken => MockContract::LinkToken,
        }
    }
}

impl Display for ContractName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ContractName {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContractName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| ScriptError::Configuration(format!("unknown contract `{}`", s)))
    }
}

/// The mock contracts deployed on local networks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockContract {
    /// The LINK token
    LinkToken,
    /// A Chainlink price feed with a settable answer
    MockV3Aggregator,
    /// A DAI-like ERC20
    MockDai,
    /// A WETH-like ERC20
    MockWeth,
}

impl MockContract {
    /// The mock suite, in deployment order
    pub const SUITE: [MockContract; 4] = [
        MockContract::LinkToken,
        MockContract::MockV3Aggregator,
        MockContract::MockDai,
        MockContract::MockWeth,
    ];

    /// The name of the compiled artifact for this contract
    pub fn artifact_name(&self) -> &'static str {
        match self {
            MockContract::LinkToken => "LinkToken",
            MockContract::MockV3Aggregator => "MockV3Aggregator",
            MockContract::MockDai => "MockDAI",
            MockContract::MockWeth => "MockWETH",
        }
    }

    /// Whether this contract speaks ERC20
    pub fn is_erc20(&self) -> bool {
        !matches!(self, MockContract::MockV3Aggregator)
    }
}

impl Display for MockContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.artifact_name())
    }
}

/// Where a contract comes from on the active network
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractSource {
    /// The latest deployed instance of a mock
    Mock(MockContract),
    /// A configured address, spoken to through the mock's ABI
    Live {
        /// The contract type whose ABI applies
        contract: MockContract,
        /// The configured address
        address: Address,
    },
}

/// Decide where the given contract comes from on the active network
pub fn resolve_source(
    settings: &Settings,
    name: ContractName,
) -> Result<ContractSource, ScriptError> {
    match settings.kind {
        NetworkKind::Local => Ok(ContractSource::Mock(name.mock())),
        NetworkKind::ForkedMainnet | NetworkKind::Live => Ok(ContractSource::Live {
            contract: name.mock(),
            address: settings.contract_address(name)?,
        }),
    }
}

/// A resolved contract: its type, which fixes the ABI, and its address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractHandle {
    /// The contract type
    pub contract: MockContract,
    /// The on-chain address
    pub address: Address,
}

impl ContractHandle {
    /// Bind the handle to a provider as an ERC20
    pub fn erc20<P: Provider>(&self, provider: P) -> Result<IERC20Instance<P>, ScriptError> {
        if !self.contract.is_erc20() {
            return Err(ScriptError::ContractInteraction(format!(
                "{} is not an ERC20",
                self.contract
            )));
        }

        Ok(IERC20::new(self.address, provider))
    }

    /// Bind the handle to a provider as a price feed
    pub fn price_feed<P: Provider>(
        &self,
        provider: P,
    ) -> Result<AggregatorV3InterfaceInstance<P>, ScriptError> {
        if self.contract != MockContract::MockV3Aggregator {
            return Err(ScriptError::ContractInteraction(format!(
                "{} is not a price feed",
                self.contract
            )));
        }

        Ok(AggregatorV3Interface::new(self.address, provider))
    }
}
