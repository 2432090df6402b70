//! The fork-test backend's wire contract.
//!
//! A whole batch is serialized into one [`ForgeInput`] document, handed to
//! the `forge` binary through an environment variable, and the test's JSON
//! log is parsed back into per-shortcut [`ForgeShortcutResult`]s using the
//! simulation-report events the harness emits.

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

mod config;
pub use config::{
    ForgeConfig, DEFAULT_CONTRACT, DEFAULT_ENV_VAR, DEFAULT_FORGE_PATH, DEFAULT_PROJECT_DIR,
    DEFAULT_TEST, FORGE_PATH, RPC_URL, SIMULATION_FORGE_PROJECT,
};

mod error;
pub use error::ForgeError;

mod extract;
pub use extract::{extract_results, ExpectedReports, ForgeShortcutResult};

mod input;
pub use input::{ForgeDocument, ForgeInput, ForgeShortcut};

mod test_log;
pub use test_log::{parse_test_output, RawLog, TestResult, TestStatus};

mod runner;
pub use runner::{ForgeRunner, RunOutput, TestRunner};
