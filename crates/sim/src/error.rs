use crate::PlanError;
use shortcut_bindings::CodecError;
use shortcut_bundle_api::BundleApiError;
use shortcut_forge::ForgeError;
use shortcut_types::{config::ConfigError, RolesError, ValidationError};

/// Errors simulating a batch.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The batch is invalid.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// A shortcut could not be planned.
    #[error(transparent)]
    Plan(#[from] PlanError),
    /// The batch's roles could not be bound.
    #[error(transparent)]
    Roles(#[from] RolesError),
    /// A chain read failed.
    #[error("chain read failed: {0}")]
    Reader(#[from] alloy::transports::TransportError),
    /// A chain read returned unexpected data.
    #[error(transparent)]
    Codec(#[from] CodecError),
    /// The fork-test backend failed.
    #[error(transparent)]
    Forge(#[from] ForgeError),
    /// The bundle API backend failed.
    #[error(transparent)]
    BundleApi(#[from] BundleApiError),
    /// A backend returned a different number of results than shortcuts.
    #[error("backend returned {received} results for {expected} shortcuts")]
    ResultCount {
        /// Shortcuts submitted.
        expected: usize,
        /// Results received.
        received: usize,
    },
}
