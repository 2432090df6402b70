use alloy::{
    primitives::{Address, I256, U256},
    sol_types::SolEvent,
};
use shortcut_bindings::{
    ISimulationReport::{
        SimulationReportBase, SimulationReportDust, SimulationReportGasUsed, SimulationReportQuote,
    },
    ReportKind,
};
use shortcut_forge::{
    ForgeConfig, ForgeDocument, ForgeError, RawLog, RunOutput, TestRunner, DEFAULT_CONTRACT,
    DEFAULT_TEST,
};
use serde_json::{Map, Value};
use std::sync::{Arc, Mutex};

/// Encode an event as a forge test log.
pub fn raw_log<E: SolEvent>(address: Address, event: &E) -> RawLog {
    let data = event.encode_log_data();
    RawLog { address, topics: data.topics().to_vec(), data: data.data }
}

/// A gas report for shortcut `index`.
pub fn gas_log(index: usize, gas: u64) -> RawLog {
    raw_log(
        Address::ZERO,
        &SimulationReportGasUsed { shortcutIndex: U256::from(index), gasUsed: U256::from(gas) },
    )
}

/// A balance report for shortcut `index`.
pub fn balance_log(
    kind: ReportKind,
    index: usize,
    tracked: Address,
    tokens: &[Address],
    diffs: &[I256],
) -> RawLog {
    let shortcut_index = U256::from(index);
    let (tokens, amounts) = (tokens.to_vec(), diffs.to_vec());
    match kind {
        ReportKind::Base => raw_log(
            Address::ZERO,
            &SimulationReportBase {
                shortcutIndex: shortcut_index,
                trackedAddress: tracked,
                tokens,
                amountsDiff: amounts,
            },
        ),
        ReportKind::Quote => raw_log(
            Address::ZERO,
            &SimulationReportQuote {
                shortcutIndex: shortcut_index,
                trackedAddress: tracked,
                tokens,
                amountsDiff: amounts,
            },
        ),
        ReportKind::Dust => raw_log(
            Address::ZERO,
            &SimulationReportDust {
                shortcutIndex: shortcut_index,
                trackedAddress: tracked,
                tokens,
                amountsDiff: amounts,
            },
        ),
    }
}

/// Forge's JSON output for a run of the default harness test.
pub fn test_output(status: &str, reason: Option<&str>, logs: &[RawLog]) -> String {
    let result = serde_json::json!({
        "status": status,
        "reason": reason,
        "logs": logs,
        "decoded_logs": ["shortcut 0 executed"],
        "kind": { "Unit": { "gas": 1_000_000 } }
    });
    let tests: Map<String, Value> = [(format!("{DEFAULT_TEST}()"), result)].into_iter().collect();
    let suite = serde_json::json!({ "duration": "12ms", "test_results": tests, "warnings": [] });
    let suites: Map<String, Value> =
        [(format!("test/Simulation.t.sol:{DEFAULT_CONTRACT}"), suite)].into_iter().collect();
    Value::Object(suites).to_string()
}

/// A [`TestRunner`] returning a fixed output and recording the documents it
/// was given.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRunner {
    output: RunOutput,
    documents: Arc<Mutex<Vec<String>>>,
}

impl ScriptedRunner {
    /// Return `output` for every run.
    pub fn new(output: RunOutput) -> Self {
        Self { output, documents: Default::default() }
    }

    /// A passing run emitting `logs`.
    pub fn passing(logs: &[RawLog]) -> Self {
        Self::new(RunOutput {
            code: Some(0),
            stdout: test_output("Success", None, logs),
            stderr: String::new(),
        })
    }

    /// A failing run.
    pub fn failing(reason: &str) -> Self {
        Self::new(RunOutput {
            code: Some(1),
            stdout: test_output("Failure", Some(reason), &[]),
            stderr: String::new(),
        })
    }

    /// Documents received so far.
    pub fn documents(&self) -> Vec<String> {
        self.documents.lock().unwrap().clone()
    }

    /// The last document received, parsed.
    pub fn last_document(&self) -> Option<ForgeDocument> {
        self.documents().last().map(|doc| serde_json::from_str(doc).unwrap())
    }
}

impl TestRunner for ScriptedRunner {
    async fn run(&self, _config: &ForgeConfig, document: String) -> Result<RunOutput, ForgeError> {
        self.documents.lock().unwrap().push(document);
        Ok(self.output.clone())
    }
}
