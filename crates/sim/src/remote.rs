use crate::{
    BackendShortcutResult, Batch, ChainReader, FailureScope, ShortcutPlan, SimError,
    SimulationBackend, SimulationStep,
};
use alloy::primitives::{I256, U256};
use shortcut_bindings::decode_balance;
use shortcut_bundle_api::{
    BundleApiError, BundleRequest, BundleTransport, SimulationRequest, SimulationResult,
    StateObject,
};
use shortcut_types::{BalanceDiff, BalanceDiffs, SimulationRoles};
use std::ops::Range;
use tracing::{debug, instrument, warn};

/// Where one shortcut's steps sit in a bundle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepLayout {
    /// Pre-execution probes.
    pub pre: Range<usize>,
    /// Funding transfers.
    pub funding: Range<usize>,
    /// The execution. Absent for skipped shortcuts.
    pub execute: Option<usize>,
    /// Post-execution probes.
    pub post: Range<usize>,
    /// The caller nonce pinned for the execution.
    pub nonce: Option<u64>,
}

/// The caller's account at the batch's first block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallerAccount {
    /// Transaction count.
    pub nonce: u64,
    /// Native balance.
    pub balance: U256,
}

impl CallerAccount {
    /// Create an account.
    pub const fn new(nonce: u64, balance: U256) -> Self {
        Self { nonce, balance }
    }
}

/// A batch converted into one bundle, with the position of every
/// shortcut's steps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreparedBundle {
    /// The bundle to submit.
    pub request: BundleRequest,
    /// One layout per plan.
    pub layouts: Vec<StepLayout>,
}

fn step_request(
    chain_id: u64,
    roles: &SimulationRoles,
    step: &SimulationStep,
    nonce: u64,
    balance: Option<U256>,
) -> SimulationRequest {
    let block = step.block();
    let request = match step {
        SimulationStep::BalancePre(probe) | SimulationStep::BalancePost(probe) => {
            SimulationRequest::new(
                chain_id,
                roles.probe_sender,
                probe.target(roles),
                probe.calldata(),
            )
        }
        SimulationStep::Funding(funding) => {
            SimulationRequest::new(chain_id, funding.holder, funding.token, funding.calldata())
        }
        SimulationStep::Execute(execute) => {
            let mut caller = StateObject::default().with_nonce(nonce);
            if let Some(balance) = balance {
                caller = caller.with_balance(balance);
            }
            let calldata = execute.calldata.clone();
            SimulationRequest::new(chain_id, execute.caller, execute.callee, calldata)
                .with_value(execute.value)
                .with_state(execute.caller, caller)
        }
    };
    request.at_block(block.number, block.timestamp)
}

/// Convert a planned batch into a single bundle.
///
/// Steps are submitted shortcut by shortcut in plan order. The caller nonce
/// starts at `caller.nonce` and advances by one per execution, so the `i`th
/// executed shortcut runs with nonce `caller.nonce + i`. Skipped shortcuts
/// submit nothing and do not advance the nonce.
///
/// The caller's native balance is tracked from `caller.balance`, less the
/// value of every execution. An execution whose value exceeds what is left
/// pins the caller's balance to exactly its value. Otherwise the balance is
/// left to the chain.
pub fn prepare_bundle(
    chain_id: u64,
    roles: &SimulationRoles,
    plans: &[ShortcutPlan],
    caller: CallerAccount,
) -> PreparedBundle {
    let mut prepared = PreparedBundle::default();
    let CallerAccount { mut nonce, mut balance } = caller;

    for plan in plans {
        let mut layout = StepLayout::default();
        let start = prepared.request.len();
        let (mut pre, mut funding, mut post) = (start..start, start..start, start..start);

        for step in &plan.steps {
            let position = prepared.request.len();
            let pin = match step {
                SimulationStep::Execute(execute) if !execute.value.is_zero() => {
                    let short = balance < execute.value;
                    balance = balance.saturating_sub(execute.value);
                    short.then_some(execute.value)
                }
                _ => None,
            };
            prepared.request.simulations.push(step_request(chain_id, roles, step, nonce, pin));
            match step {
                SimulationStep::BalancePre(_) => pre = pre.start..position + 1,
                SimulationStep::Funding(_) => {
                    if funding.is_empty() {
                        funding = position..position;
                    }
                    funding.end = position + 1;
                }
                SimulationStep::Execute(_) => {
                    layout.execute = Some(position);
                    layout.nonce = Some(nonce);
                    nonce += 1;
                }
                SimulationStep::BalancePost(_) => {
                    if post.is_empty() {
                        post = position..position;
                    }
                    post.end = position + 1;
                }
            }
        }
        layout.pre = pre;
        layout.funding = funding;
        layout.post = post;
        prepared.layouts.push(layout);
    }
    prepared
}

fn probe_balance(result: &SimulationResult) -> Option<I256> {
    if !result.is_success() {
        return None;
    }
    match decode_balance(result.output().map(|output| &output[..]).unwrap_or_default()) {
        Ok(balance) => I256::try_from(balance).ok(),
        Err(e) => {
            warn!(%e, "unparseable balance probe");
            None
        }
    }
}

fn diff(pre: &SimulationResult, post: &SimulationResult) -> BalanceDiff {
    match (probe_balance(pre), probe_balance(post)) {
        (Some(pre), Some(post)) => {
            post.checked_sub(pre).map_or(BalanceDiff::Failed, BalanceDiff::new)
        }
        _ => BalanceDiff::Failed,
    }
}

/// Rebuild per-shortcut results from a bundle's ordered results.
///
/// Results are matched to steps by position only. A diff is the post-probe
/// balance minus the pre-probe balance at the same offset. It is reported
/// as failed when the execution or either probe failed.
pub fn reassemble(
    plans: &[ShortcutPlan],
    layouts: &[StepLayout],
    results: &[SimulationResult],
) -> Vec<BackendShortcutResult> {
    plans
        .iter()
        .zip(layouts)
        .map(|(plan, layout)| {
            let mut diffs = BalanceDiffs::default();

            let Some(execute) = layout.execute.and_then(|i| results.get(i)) else {
                for tracked in &plan.tracked {
                    for (kind, token) in plan.probe_tokens() {
                        diffs.insert(kind, *tracked, token, BalanceDiff::Failed);
                    }
                }
                let reason = plan.skipped.as_ref().map(ToString::to_string);
                return BackendShortcutResult {
                    is_successful: false,
                    gas_used: U256::ZERO,
                    diffs,
                    raw: Some(serde_json::json!({ "skipped": reason })),
                };
            };

            let is_successful = execute.is_success();
            if !is_successful {
                let error = execute.error();
                warn!(index = plan.index, name = %plan.name, error, "shortcut execution failed");
            }

            for (t, tracked) in plan.tracked.iter().enumerate() {
                for (j, (kind, token)) in plan.probe_tokens().enumerate() {
                    let offset = plan.probe_offset(t, j);
                    let probes = (
                        results.get(layout.pre.start + offset),
                        results.get(layout.post.start + offset),
                    );
                    let value = match probes {
                        (Some(pre), Some(post)) if is_successful => diff(pre, post),
                        _ => BalanceDiff::Failed,
                    };
                    diffs.insert(kind, *tracked, token, value);
                }
            }

            let slice = |range: &Range<usize>| results.get(range.clone()).unwrap_or_default();
            BackendShortcutResult {
                is_successful,
                gas_used: U256::from(execute.gas_used()),
                diffs,
                raw: Some(serde_json::json!({
                    "nonce": layout.nonce,
                    "pre": slice(&layout.pre),
                    "funding": slice(&layout.funding),
                    "execute": execute,
                    "post": slice(&layout.post),
                })),
            }
        })
        .collect()
}

/// Simulates batches as a single bundle on a remote API.
#[derive(Debug, Clone)]
pub struct RemoteBackend<T> {
    transport: T,
}

impl<T> RemoteBackend<T> {
    /// Create a backend over a transport.
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Get the transport.
    pub const fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T: BundleTransport> SimulationBackend for RemoteBackend<T> {
    fn requires_balance_probes(&self) -> bool {
        true
    }

    fn failure_scope(&self) -> FailureScope {
        FailureScope::Shortcut
    }

    #[instrument(skip_all, fields(chain_id = batch.chain_id, shortcuts = batch.plans.len()))]
    async fn run_batch<R: ChainReader>(
        &self,
        reader: &R,
        batch: Batch<'_>,
    ) -> Result<Vec<BackendShortcutResult>, SimError> {
        let (caller, block) = (batch.roles.caller, batch.first_block());
        let nonce = reader.transaction_count(caller, block).await?;
        let balance = if batch.plans.iter().any(|plan| !plan.value.is_zero()) {
            reader.balance(caller, block).await?
        } else {
            U256::ZERO
        };
        let account = CallerAccount::new(nonce, balance);
        let prepared = prepare_bundle(batch.chain_id, batch.roles, batch.plans, account);
        debug!(nonce, %balance, steps = prepared.request.len(), "prepared bundle");
        if batch.options.log_raw {
            let bundle = serde_json::to_string(&prepared.request).unwrap_or_default();
            debug!(%bundle, "bundle request");
        }

        let submitted = prepared.request.len();
        let response = self.transport.simulate_bundle(prepared.request).await?;
        let results = response.simulation_results;
        if results.len() != submitted {
            let received = results.len();
            return Err(BundleApiError::LengthMismatch { submitted, received }.into());
        }

        Ok(reassemble(batch.plans, &prepared.layouts, &results))
    }
}
