//! Contract bindings and the weiroll script codec used by shortcut
//! simulation.
//!
//! - [`IERC20`], [`IWeirollWalletHelper`] and [`IRecipeMarketHub`] are the
//!   on-chain interfaces the simulation talks to.
//! - [`ISimulationReport`] declares the events emitted by the fork-test
//!   harness, decoded through [`ReportEvent`].
//! - [`WeirollCommand`] parses the fixed-width command words of a weiroll
//!   script.

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
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod bindings;
pub use bindings::{IRecipeMarketHub, ISimulationReport, IWeirollWalletHelper, IERC20};

mod codec;
pub use codec::{
    decode_balance, decode_wallet, encode_balance_of, encode_create_wallet, encode_execute,
    encode_native_balance, encode_transfer, CodecError,
};

mod events;
pub use events::{BalanceReport, ReportEvent, ReportKind};

mod weiroll;
pub use weiroll::{WeirollCommand, WeirollCommands};
