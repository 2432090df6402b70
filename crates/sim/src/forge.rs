use crate::{
    BackendShortcutResult, Batch, ChainReader, FailureScope, ShortcutPlan, SimError,
    SimulationBackend,
};
use shortcut_forge::{
    extract_results, parse_test_output, ExpectedReports, ForgeConfig, ForgeInput, ForgeRunner,
    ForgeShortcut, TestRunner,
};
use shortcut_types::config::ConfigError;
use tracing::{debug, instrument};

impl From<&ShortcutPlan> for ForgeShortcut {
    fn from(plan: &ShortcutPlan) -> Self {
        Self {
            name: plan.name.clone(),
            block_number: plan.block.number,
            block_timestamp: plan.block.timestamp,
            tx_data: plan.calldata.clone(),
            tx_value: plan.value,
            tokens_in: plan.tokens_in.clone(),
            tokens_in_holders: plan.holders_or_zero(),
            amounts_in: plan.amounts_in.clone(),
            requires_funding: plan.requires_funding,
            tokens_out: plan.tokens_out.clone(),
            tokens_dust: plan.dust.clone(),
            tracked_addresses: plan.tracked.clone(),
        }
    }
}

/// Simulates batches in a local forge fork test.
///
/// The whole batch runs in one test, so any failure rejects the batch.
#[derive(Debug, Clone)]
pub struct ForgeBackend<R = ForgeRunner> {
    config: ForgeConfig,
    runner: R,
}

impl ForgeBackend {
    /// Create a backend running the `forge` binary.
    pub const fn new(config: ForgeConfig) -> Self {
        Self { config, runner: ForgeRunner }
    }

    /// Load the config for a chain from the environment. Fails if the
    /// binary cannot be found.
    pub fn from_env(chain_name: &str) -> Result<Self, ConfigError> {
        ForgeConfig::from_env(chain_name).map(Self::new)
    }
}

impl<R> ForgeBackend<R> {
    /// Create a backend with a custom runner.
    pub const fn with_runner(config: ForgeConfig, runner: R) -> Self {
        Self { config, runner }
    }

    /// Get the config.
    pub const fn config(&self) -> &ForgeConfig {
        &self.config
    }

    /// Build the harness input for a batch.
    pub fn input(&self, batch: &Batch<'_>) -> ForgeInput {
        let mut input = ForgeInput::new(self.config.rpc_url.clone(), *batch.roles)
            .with_labels(batch.labels.iter().map(|(a, l)| (*a, l.clone())));
        batch.plans.iter().map(ForgeShortcut::from).for_each(|shortcut| input.push(shortcut));
        input
    }
}

impl<R: TestRunner> SimulationBackend for ForgeBackend<R> {
    fn requires_balance_probes(&self) -> bool {
        false
    }

    fn failure_scope(&self) -> FailureScope {
        FailureScope::Batch
    }

    fn preflight(&self) -> Result<(), SimError> {
        self.runner.preflight(&self.config).map_err(Into::into)
    }

    #[instrument(skip_all, fields(chain_id = batch.chain_id, shortcuts = batch.plans.len()))]
    async fn run_batch<Reader: ChainReader>(
        &self,
        _reader: &Reader,
        batch: Batch<'_>,
    ) -> Result<Vec<BackendShortcutResult>, SimError> {
        let wallet = batch.roles.weiroll_wallet()?;
        let input = self.input(&batch);
        let expected: Vec<_> = input
            .shortcuts
            .iter()
            .map(|shortcut| ExpectedReports::for_shortcut(wallet, shortcut))
            .collect();
        let document = input.to_json()?;
        if batch.options.log_raw {
            debug!(%document, "forge input");
        }

        let stdout = self.runner.run(&self.config, document).await?.into_stdout()?;
        let test = parse_test_output(&stdout, &self.config.contract, &self.config.test)?;
        let results = extract_results(&test.logs, &expected)?;
        debug!(logs = test.logs.len(), "forge test passed");

        Ok(results
            .into_iter()
            .enumerate()
            .map(|(index, result)| BackendShortcutResult {
                is_successful: true,
                gas_used: result.gas_used,
                diffs: result.diffs,
                raw: Some(serde_json::json!({
                    "index": index,
                    "gasUsed": result.gas_used,
                    "decodedLogs": &test.decoded_logs,
                })),
            })
            .collect())
    }
}
