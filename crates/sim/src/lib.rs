//! The shortcut simulation engine.
//!
//! A batch of shortcuts is validated, planned into ordered simulation steps,
//! handed to one [`SimulationBackend`], and the backend's raw results are
//! turned into one [`SimulatedShortcutReport`] per shortcut.
//!
//! Two backends are provided:
//! - [`ForgeBackend`] runs the whole batch in a local fork test.
//! - [`RemoteBackend`] submits the batch as one bundle to a remote
//!   simulation API, reading balances with probe calls around each
//!   execution.
//!
//! [`ShortcutSimulator`] ties them together.
//!
//! [`SimulatedShortcutReport`]: shortcut_types::SimulatedShortcutReport

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

mod backend;
pub use backend::{BackendShortcutResult, Batch, FailureScope, SimulationBackend};

mod dust;
pub use dust::find_dust;

mod error;
pub use error::SimError;

mod forge;
pub use forge::ForgeBackend;

mod options;
pub use options::{SimulationOptions, SIMULATION_INCLUDE_RAW, SIMULATION_LOG_RAW};

mod plan;
pub use plan::{
    transaction_value, BalanceProbe, ExecuteStep, FundingStep, PlanError, Planner, ShortcutPlan,
    SimulationStep,
};

mod reader;
pub use reader::ChainReader;

mod remote;
pub use remote::{
    prepare_bundle, reassemble, CallerAccount, PreparedBundle, RemoteBackend, StepLayout,
};

mod report;
pub use report::ReportBuilder;

mod simulator;
pub use simulator::ShortcutSimulator;
