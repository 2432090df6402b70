//! Constants for local test chains.

use crate::{ChainConstants, ChainRoles, TokenHolder, TokenHolders, NATIVE_TOKEN_ADDRESS};
use alloy::primitives::Address;

/// Name of the chain.
pub const NAME: &str = "Test";
/// Test chain id.
pub const CHAIN_ID: u64 = 31337;

/// Test caller.
pub const CALLER: Address = Address::repeat_byte(0x11);
/// Test recipe market hub.
pub const RECIPE_MARKET_HUB: Address = Address::repeat_byte(0x22);
/// Test wallet helper.
pub const WALLET_HELPER: Address = Address::repeat_byte(0x33);
/// Test multicall.
pub const MULTI_CALL: Address = Address::repeat_byte(0x44);
/// Test probe sender.
pub const PROBE_SENDER: Address = Address::repeat_byte(0x55);

/// Test wrapped native token.
pub const WRAPPED_NATIVE: Address = Address::repeat_byte(0x66);
/// Test vault token.
pub const VAULT: Address = Address::repeat_byte(0x77);
/// Test stablecoin.
pub const USD: Address = Address::repeat_byte(0x88);
/// Token with no registered holder.
pub const UNFUNDED: Address = Address::repeat_byte(0x99);

/// Funding source for [`WRAPPED_NATIVE`].
pub const WRAPPED_NATIVE_HOLDER: Address = Address::repeat_byte(0xa6);
/// Funding source for [`USD`].
pub const USD_HOLDER: Address = Address::repeat_byte(0xa8);

/// Test funding sources.
pub const HOLDERS: TokenHolders = TokenHolders::new(&[
    TokenHolder::new(WRAPPED_NATIVE, WRAPPED_NATIVE_HOLDER),
    TokenHolder::new(USD, USD_HOLDER),
]);

/// Test roles.
pub const ROLES: ChainRoles = ChainRoles::new(
    CALLER,
    RECIPE_MARKET_HUB,
    WALLET_HELPER,
    MULTI_CALL,
    NATIVE_TOKEN_ADDRESS,
    PROBE_SENDER,
);

/// Simulation constants for unit tests.
pub const TEST: ChainConstants = ChainConstants::new(CHAIN_ID, NAME, ROLES, HOLDERS);
