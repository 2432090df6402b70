//! Shortcut simulation constants.
//!
//! This crate contains the static, per-chain configuration used when
//! simulating shortcuts: the well-known simulation participants (caller,
//! recipe market hub, wallet helper, multicall), the native-token sentinel,
//! and the addresses from which input tokens are funded.
//!

#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    clippy::missing_const_for_fn,
    rustdoc::all
)]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod chains;
pub use chains::mainnet;
pub use chains::sonic;
#[cfg(any(test, feature = "test-utils"))]
pub use chains::test_utils;

mod types;
pub use types::{
    ChainConstants, ChainRoles, KnownChains, ParseChainError, TokenHolder, TokenHolders,
};

/// Placeholder address for the native token of the current chain. By convention this is `0xee...`.
pub const NATIVE_TOKEN_ADDRESS: alloy::primitives::Address =
    alloy::primitives::Address::repeat_byte(0xee);

/// Sender used for balance probes submitted alongside a shortcut execution.
///
/// Probes are submitted as simulated transactions. Sending them from the
/// caller would advance the caller's nonce, so they are sent from this
/// address instead.
pub const BALANCE_PROBE_SENDER: alloy::primitives::Address =
    alloy::primitives::address!("0x000000000000000000000000000000000000dEaD");
