/// Ethereum mainnet simulation constants.
pub mod mainnet;

/// Sonic simulation constants.
pub mod sonic;

/// Test utilities for chains.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
