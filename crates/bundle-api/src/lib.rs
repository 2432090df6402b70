//! Remote bundle simulation: credentials, wire types and an HTTP client.
//!
//! A bundle is an ordered list of simulation requests executed one after the
//! other on the same forked state. Results come back in submission order.

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

/// The [`BundleSimulator`] client.
pub mod client;
pub use client::BundleSimulator;

mod credentials;
pub use credentials::{
    ApiCredentials, DEFAULT_API_URL, TENDERLY_ACCESS_KEY, TENDERLY_API_URL, TENDERLY_PROJECT,
    TENDERLY_USER,
};

mod error;
pub use error::BundleApiError;

mod transport;
pub use transport::BundleTransport;

/// Request and response types of the bundle API.
pub mod types;
pub use types::{
    BlockHeaderOverride, BundleRequest, BundleResponse, CallTrace, SimulationKind,
    SimulationRequest, SimulationResult, StateObject,
};
