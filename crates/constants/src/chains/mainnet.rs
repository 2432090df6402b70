//! Constants for Ethereum mainnet.

use crate::{
    ChainConstants, ChainRoles, TokenHolder, TokenHolders, BALANCE_PROBE_SENDER,
    NATIVE_TOKEN_ADDRESS,
};
use alloy::primitives::{address, Address};

/// Name of the chain.
pub const NAME: &str = "Mainnet";
/// Chain ID for Ethereum mainnet.
pub const CHAIN_ID: u64 = 1;

/// Account submitting shortcut executions on mainnet.
pub const CALLER: Address = address!("0x93621dca56fe26cdee86e4f6b18e116e9758ff11");
/// `RecipeMarketHub` contract address on mainnet.
pub const RECIPE_MARKET_HUB: Address = address!("0x783251f103555068c1e9d755f69458f39ed937c0");
/// `WeirollWalletHelper` contract address on mainnet.
pub const WALLET_HELPER: Address = address!("0x07899ac8be7462151d6515fcd4773dd9267c9911");
/// `Multicall3` contract address on mainnet.
pub const MULTI_CALL: Address = address!("0xca11bde05977b3631167028862be2a173976ca11");

/// WETH token on mainnet.
pub const WETH: Address = address!("0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2");
/// USDC token on mainnet.
pub const USDC: Address = address!("0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48");
/// USDT token on mainnet.
pub const USDT: Address = address!("0xdac17f958d2ee523a2206206994597c13d831ec7");

/// Funding source for [`WETH`].
pub const WETH_HOLDER: Address = address!("0x2f0b23f53734252bda2277357e97e1517d6b042a");
/// Funding source for [`USDC`].
pub const USDC_HOLDER: Address = address!("0x37305b1cd40574e4c5ce33f8e8306be057fd7341");
/// Funding source for [`USDT`].
pub const USDT_HOLDER: Address = address!("0xf977814e90da44bfa03b6295a0616a897441acec");

/// Registered funding sources on mainnet.
pub const HOLDERS: TokenHolders = TokenHolders::new(&[
    TokenHolder::new(WETH, WETH_HOLDER),
    TokenHolder::new(USDC, USDC_HOLDER),
    TokenHolder::new(USDT, USDT_HOLDER),
]);

/// Simulation roles on mainnet.
pub const ROLES: ChainRoles = ChainRoles::new(
    CALLER,
    RECIPE_MARKET_HUB,
    WALLET_HELPER,
    MULTI_CALL,
    NATIVE_TOKEN_ADDRESS,
    BALANCE_PROBE_SENDER,
);

/// Simulation constants for Ethereum mainnet.
pub const MAINNET: ChainConstants = ChainConstants::new(CHAIN_ID, NAME, ROLES, HOLDERS);
