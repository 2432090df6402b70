use crate::{ChainReader, ShortcutPlan, SimError, SimulationOptions};
use alloy::primitives::{Address, U256};
use core::future::Future;
use shortcut_types::{BalanceDiffs, SimulationRoles};
use std::collections::BTreeMap;

/// How far a backend-reported failure reaches.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FailureScope {
    /// Any failure rejects the whole batch. Shortcuts run in one atomic
    /// test and cannot be reported on individually.
    Batch,
    /// A failure only affects its own shortcut, whose diffs degrade to the
    /// failure sentinel. Later shortcuts still run.
    Shortcut,
}

/// A planned batch, ready for a backend.
#[derive(Debug, Clone, Copy)]
pub struct Batch<'a> {
    /// The chain simulated on.
    pub chain_id: u64,
    /// The batch's roles, with the execution wallet bound.
    pub roles: &'a SimulationRoles,
    /// One plan per shortcut, in order.
    pub plans: &'a [ShortcutPlan],
    /// Address labels for traces.
    pub labels: &'a BTreeMap<Address, String>,
    /// Output options.
    pub options: SimulationOptions,
}

impl Batch<'_> {
    /// The first pinned block number in the batch.
    pub fn first_block(&self) -> Option<u64> {
        self.plans.iter().find_map(|plan| plan.block.number)
    }
}

/// What a backend reports for one shortcut.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BackendShortcutResult {
    /// Whether the execution succeeded.
    pub is_successful: bool,
    /// Gas used by the execution.
    pub gas_used: U256,
    /// Balance diffs by category, tracked address and token.
    pub diffs: BalanceDiffs,
    /// The backend's raw result for the shortcut.
    pub raw: Option<serde_json::Value>,
}

/// A simulation backend.
///
/// Backends receive a whole planned batch and return one result per
/// shortcut, in order. [`Self::failure_scope`] documents how far a failure
/// reaches: [`FailureScope::Batch`] backends return an error for any
/// failure, [`FailureScope::Shortcut`] backends report failed shortcuts with
/// `is_successful == false` and failed diffs.
pub trait SimulationBackend: Sync {
    /// Whether plans must carry balance probes around each execution.
    fn requires_balance_probes(&self) -> bool;

    /// How far a failure reaches.
    fn failure_scope(&self) -> FailureScope;

    /// Check the backend is usable, before the batch touches the chain.
    fn preflight(&self) -> Result<(), SimError> {
        Ok(())
    }

    /// Simulate a batch.
    fn run_batch<R: ChainReader>(
        &self,
        reader: &R,
        batch: Batch<'_>,
    ) -> impl Future<Output = Result<Vec<BackendShortcutResult>, SimError>> + Send;
}
