use crate::{
    transaction_value, Batch, ChainReader, FailureScope, ForgeBackend, PlanError, Planner,
    RemoteBackend, ReportBuilder, ShortcutPlan, SimError, SimulationBackend, SimulationOptions,
};
use shortcut_bindings::{decode_wallet, encode_create_wallet};
use shortcut_bundle_api::{ApiCredentials, BundleSimulator};
use shortcut_constants::ChainConstants;
use shortcut_types::{
    validate_batch, BuiltShortcut, ShortcutToSimulate, SimulatedShortcutReport, SimulationRoles,
};
use tracing::{debug, instrument, warn};

/// Simulates batches of shortcuts on one chain and builds their reports.
#[derive(Debug, Clone)]
pub struct ShortcutSimulator<R, B> {
    constants: ChainConstants,
    reader: R,
    backend: B,
    options: SimulationOptions,
}

impl<R, B> ShortcutSimulator<R, B> {
    /// Create a simulator with default options.
    pub const fn new(constants: ChainConstants, reader: R, backend: B) -> Self {
        let options = SimulationOptions { include_raw: false, log_raw: false };
        Self { constants, reader, backend, options }
    }

    /// Set the output options.
    pub const fn with_options(mut self, options: SimulationOptions) -> Self {
        self.options = options;
        self
    }

    /// Get the chain constants.
    pub const fn constants(&self) -> &ChainConstants {
        &self.constants
    }

    /// Get the chain reader.
    pub const fn reader(&self) -> &R {
        &self.reader
    }

    /// Get the backend.
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Get the output options.
    pub const fn options(&self) -> SimulationOptions {
        self.options
    }
}

impl<R> ShortcutSimulator<R, ForgeBackend> {
    /// Create a fork-test simulator configured from the environment.
    pub fn forge_from_env(constants: ChainConstants, reader: R) -> Result<Self, SimError> {
        let backend = ForgeBackend::from_env(constants.name())?;
        Ok(Self::new(constants, reader, backend).with_options(SimulationOptions::from_env()?))
    }
}

impl<R> ShortcutSimulator<R, RemoteBackend<BundleSimulator>> {
    /// Create a bundle-API simulator configured from the environment.
    pub fn remote_from_env(constants: ChainConstants, reader: R) -> Result<Self, SimError> {
        let backend = RemoteBackend::new(BundleSimulator::new(ApiCredentials::from_env()?));
        Ok(Self::new(constants, reader, backend).with_options(SimulationOptions::from_env()?))
    }
}

impl<R, B> ShortcutSimulator<R, B>
where
    R: ChainReader,
    B: SimulationBackend,
{
    /// Create the batch's execution wallet and bind it into the chain's
    /// roles.
    ///
    /// The wallet address is read by calling the hub's wallet factory from
    /// the caller at `block`.
    #[instrument(skip(self))]
    pub async fn create_wallet(&self, block: Option<u64>) -> Result<SimulationRoles, SimError> {
        let mut roles = SimulationRoles::from(self.constants.roles());
        let data = self
            .reader
            .read(roles.caller, roles.recipe_market_hub, encode_create_wallet(), block)
            .await
            .inspect_err(|e| warn!(%e, "wallet creation call failed"))?;
        let wallet = decode_wallet(&data)?;
        roles.bind(wallet, None)?;
        debug!(%wallet, "created weiroll wallet");
        Ok(roles)
    }

    fn plan(
        &self,
        roles: &SimulationRoles,
        shortcuts: &[ShortcutToSimulate],
        built: &[BuiltShortcut],
    ) -> Result<Vec<ShortcutPlan>, PlanError> {
        let planner =
            Planner::new(roles, self.constants.holders(), self.backend.requires_balance_probes());
        let scope = self.backend.failure_scope();

        shortcuts
            .iter()
            .zip(built)
            .enumerate()
            .map(|(index, (sim, built))| match planner.plan(index, sim, built) {
                Err(e @ PlanError::MissingHolder { .. }) if scope == FailureScope::Shortcut => {
                    warn!(%e, "skipping shortcut");
                    planner.skipped(index, sim, built, e)
                }
                other => other,
            })
            .collect()
    }

    /// Simulate a batch of shortcuts, in order, and report on each.
    ///
    /// `built[i]` is the built script of `shortcuts[i]`. The batch and the
    /// backend are checked before any chain or backend access. Reports are returned in
    /// input order, one per shortcut.
    #[instrument(skip_all, fields(chain = self.constants.name(), shortcuts = shortcuts.len()))]
    pub async fn simulate(
        &self,
        shortcuts: &[ShortcutToSimulate],
        built: &[BuiltShortcut],
    ) -> Result<Vec<SimulatedShortcutReport>, SimError> {
        validate_batch(shortcuts, built)?;
        if shortcuts.is_empty() {
            return Ok(Vec::new());
        }
        self.backend.preflight()?;

        let native = self.constants.native_token();
        for (index, (sim, built)) in shortcuts.iter().zip(built).enumerate() {
            transaction_value(index, sim, built, native)?;
        }

        let first_block = shortcuts.iter().find_map(|sim| sim.block_number);
        let roles = self.create_wallet(first_block).await?;
        let plans = self.plan(&roles, shortcuts, built)?;
        let labels = self.constants.labels();

        let batch = Batch {
            chain_id: self.constants.chain_id(),
            roles: &roles,
            plans: &plans,
            labels: &labels,
            options: self.options,
        };
        let results = self
            .backend
            .run_batch(&self.reader, batch)
            .await
            .inspect_err(|e| warn!(%e, "batch simulation failed"))?;
        if results.len() != plans.len() {
            return Err(SimError::ResultCount { expected: plans.len(), received: results.len() });
        }

        let builder = ReportBuilder::new(
            self.constants.chain_id(),
            roles.caller,
            roles.weiroll_wallet()?,
            self.options,
        );
        let reports: Vec<_> = shortcuts
            .iter()
            .zip(&plans)
            .zip(results)
            .map(|((sim, plan), result)| builder.build(sim, plan, result))
            .collect();

        let failed = reports.iter().filter(|r| !r.is_successful).count();
        debug!(failed, "batch simulated");
        Ok(reports)
    }
}
