//! Definitions of the Solidity interfaces used to talk to deployed contracts

use alloy::sol;

sol! {
    /// The ERC20 surface shared by the LINK, DAI, and WETH mocks
    #[sol(rpc)]
    interface IERC20 {
        function totalSupply() external view returns (uint256);
        function balanceOf(address account) external view returns (uint256);
        function transfer(address to, uint256 value) external returns (bool);
        function decimals() external view returns (uint8);

        #[derive(Debug, PartialEq, Eq)]
        event Transfer(address indexed from, address indexed to, uint256 value);
    }

    /// The Chainlink price feed interface implemented by `MockV3Aggregator`
    #[sol(rpc)]
    interface AggregatorV3Interface {
        function decimals() external view returns (uint8);
        function latestAnswer() external view returns (int256);
    }
}

pub use AggregatorV3Interface::AggregatorV3InterfaceInstance;
pub use IERC20::IERC20Instance;
