#![allow(missing_docs)]

mod erc20 {
    alloy::sol!(
        #[derive(Debug, PartialEq, Eq)]
        interface IERC20 {
            function balanceOf(address account) external view returns (uint256);
            function transfer(address to, uint256 amount) external returns (bool);
            function approve(address spender, uint256 amount) external returns (bool);
        }
    );
}
pub use erc20::IERC20;

mod wallet_helper {
    alloy::sol!(
        #[derive(Debug, PartialEq, Eq)]
        interface IWeirollWalletHelper {
            function nativeBalance(address account) external view returns (uint256);
        }
    );
}
pub use wallet_helper::IWeirollWalletHelper;

mod recipe_market_hub {
    alloy::sol!(
        #[derive(Debug, PartialEq, Eq)]
        interface IRecipeMarketHub {
            function createWeirollWallet() external returns (address);
            function executeWeiroll(bytes32[] commands, bytes[] state)
                external
                payable
                returns (bytes[] memory);
        }
    );
}
pub use recipe_market_hub::IRecipeMarketHub;

mod simulation_report {
    alloy::sol!(
        #[derive(Debug, PartialEq, Eq)]
        interface ISimulationReport {
            event SimulationReportGasUsed(uint256 shortcutIndex, uint256 gasUsed);
            event SimulationReportBase(
                uint256 shortcutIndex,
                address trackedAddress,
                address[] tokens,
                int256[] amountsDiff
            );
            event SimulationReportQuote(
                uint256 shortcutIndex,
                address trackedAddress,
                address[] tokens,
                int256[] amountsDiff
            );
            event SimulationReportDust(
                uint256 shortcutIndex,
                address trackedAddress,
                address[] tokens,
                int256[] amountsDiff
            );
        }
    );
}
pub use simulation_report::ISimulationReport;
