//! Types shared by the shortcut simulation engine and its backends.

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

mod block;
pub use block::BlockContext;

/// Configuration loading.
pub mod config;
pub use config::ConfigError;

mod report;
pub use report::{BalanceDiff, BalanceDiffs, SimulatedShortcutReport, TokenDiffs, DIFF_FAILED};

mod roles;
pub use roles::{RolesError, SimulationRoles};

mod shortcut;
pub use shortcut::{BuiltShortcut, ShortcutMetadata, ShortcutToSimulate, WeirollScript};

mod validate;
pub use validate::{validate_batch, ValidationError};
