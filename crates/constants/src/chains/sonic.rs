//! Constants for Sonic.

use crate::{
    ChainConstants, ChainRoles, TokenHolder, TokenHolders, BALANCE_PROBE_SENDER,
    NATIVE_TOKEN_ADDRESS,
};
use alloy::primitives::{address, Address};

/// Name of the chain.
pub const NAME: &str = "Sonic";
/// Chain ID for Sonic.
pub const CHAIN_ID: u64 = 146;

/// Account submitting shortcut executions on Sonic.
pub const CALLER: Address = address!("0x93621dca56fe26cdee86e4f6b18e116e9758ff11");
/// `RecipeMarketHub` contract address on Sonic.
pub const RECIPE_MARKET_HUB: Address = address!("0xfcc593ad3705ebcd72ec961c63eb484be795bdbd");
/// `WeirollWalletHelper` contract address on Sonic.
pub const WALLET_HELPER: Address = address!("0x07899ac8be7462151d6515fcd4773dd9267c9911");
/// `Multicall3` contract address on Sonic.
pub const MULTI_CALL: Address = address!("0xca11bde05977b3631167028862be2a173976ca11");

/// Wrapped Sonic token.
pub const WS: Address = address!("0x039e2fb66102314ce7b64ce5ce3e5183bc94ad38");
/// Bridged USDC.e token.
pub const USDC_E: Address = address!("0x29219dd400f2bf60e5a23d13be72b486d4038894");
/// Wrapped ether token.
pub const WETH: Address = address!("0x50c42deacd8fc9773493ed674b675be577f2634b");

/// Funding source for [`WS`].
pub const WS_HOLDER: Address = address!("0x6c5e14a212c1c3e4baf6f871ac9b1a969918c131");
/// Funding source for [`USDC_E`].
pub const USDC_E_HOLDER: Address = address!("0x578ee1ca3a8e1b54554da1bf7c583506c4cd11c6");
/// Funding source for [`WETH`].
pub const WETH_HOLDER: Address = address!("0x427514a905fa6feed9a36bdf9b3a9b1f1d2b3a0b");

/// Registered funding sources on Sonic.
pub const HOLDERS: TokenHolders = TokenHolders::new(&[
    TokenHolder::new(WS, WS_HOLDER),
    TokenHolder::new(USDC_E, USDC_E_HOLDER),
    TokenHolder::new(WETH, WETH_HOLDER),
]);

/// Simulation roles on Sonic.
pub const ROLES: ChainRoles = ChainRoles::new(
    CALLER,
    RECIPE_MARKET_HUB,
    WALLET_HELPER,
    MULTI_CALL,
    NATIVE_TOKEN_ADDRESS,
    BALANCE_PROBE_SENDER,
);

/// Simulation constants for Sonic.
pub const SONIC: ChainConstants = ChainConstants::new(CHAIN_ID, NAME, ROLES, HOLDERS);
