use crate::ForgeError;
use alloy::primitives::{Address, Bytes, Log, B256};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome of a forge test.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestStatus {
    /// The test passed.
    Success,
    /// The test failed.
    Failure,
    /// The test was skipped.
    Skipped,
    /// A status this crate does not know about.
    #[serde(other)]
    Unknown,
}

/// A log emitted during a forge test.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLog {
    /// Emitting contract. Older forge versions omit it.
    #[serde(default)]
    pub address: Address,
    /// Log topics.
    pub topics: Vec<B256>,
    /// Log data.
    pub data: Bytes,
}

impl RawLog {
    /// Convert to an alloy [`Log`].
    pub fn to_log(&self) -> Log {
        Log::new_unchecked(self.address, self.topics.clone(), self.data.clone())
    }
}

/// The result of one forge test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResult {
    /// Test status.
    pub status: TestStatus,
    /// Failure reason.
    #[serde(default)]
    pub reason: Option<String>,
    /// Raw logs.
    #[serde(default)]
    pub logs: Vec<RawLog>,
    /// Logs decoded by forge.
    #[serde(default)]
    pub decoded_logs: Vec<String>,
}

impl TestResult {
    /// True if the test passed.
    pub const fn is_success(&self) -> bool {
        matches!(self.status, TestStatus::Success)
    }
}

#[derive(Debug, Deserialize)]
struct SuiteResult {
    #[serde(default)]
    test_results: BTreeMap<String, TestResult>,
}

fn parse_suites(stdout: &str) -> Result<BTreeMap<String, SuiteResult>, serde_json::Error> {
    match serde_json::from_str(stdout.trim()) {
        Ok(suites) => Ok(suites),
        // Forge may print progress lines before the JSON document.
        Err(e) => stdout
            .lines()
            .rev()
            .find(|line| line.trim_start().starts_with('{'))
            .map_or(Err(e), |line| serde_json::from_str(line.trim())),
    }
}

/// Find the harness test in forge's JSON test log.
///
/// Suites are keyed `<path>:<contract>` and tests `<test>()`. A failed test
/// is an error carrying forge's reason and decoded logs.
pub fn parse_test_output(
    stdout: &str,
    contract: &str,
    test: &str,
) -> Result<TestResult, ForgeError> {
    let suites = parse_suites(stdout)
        .map_err(|source| ForgeError::Json { source, stdout: stdout.to_owned() })?;

    let suffix = format!(":{contract}");
    let test_key = format!("{test}()");

    let result = suites
        .into_iter()
        .filter(|(key, _)| key.ends_with(&suffix))
        .find_map(|(_, mut suite)| suite.test_results.remove(&test_key))
        .ok_or_else(|| ForgeError::TestNotFound {
            contract: contract.to_owned(),
            test: test.to_owned(),
        })?;

    if result.status == TestStatus::Failure {
        return Err(ForgeError::TestFailed {
            reason: result.reason,
            decoded_logs: result.decoded_logs,
        });
    }
    Ok(result)
}
