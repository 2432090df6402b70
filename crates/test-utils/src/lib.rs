//! Common utilities for testing shortcut simulation components.

pub mod fixtures;
pub mod forge;
pub mod ledger;

pub use shortcut_constants::test_utils as test_constants;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a test subscriber filtered by `RUST_LOG`. Safe to call more than
/// once.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_test_writer())
        .try_init();
}
