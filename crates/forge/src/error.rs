use alloy::primitives::{Address, U256};
use shortcut_bindings::ReportKind;
use std::path::PathBuf;

/// Errors running the fork-test harness or interpreting its output.
///
/// All of these reject the whole batch: the harness runs every shortcut in
/// one test and cannot report partial success.
#[derive(Debug, thiserror::Error)]
pub enum ForgeError {
    /// The `forge` binary could not be found.
    #[error("forge binary not found at {}", .0.display())]
    BinaryNotFound(PathBuf),

    /// The binary could not be spawned.
    #[error("failed to run forge: {0}")]
    Spawn(#[source] std::io::Error),

    /// The binary exited without writing to stdout.
    #[error("forge produced no output (exit code {code:?}): {stderr}")]
    EmptyOutput {
        /// Exit code, if the process exited normally.
        code: Option<i32>,
        /// Captured stderr.
        stderr: String,
    },

    /// The input document could not be serialized.
    #[error("failed to serialize forge input: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Stdout was not a JSON test log.
    #[error("malformed forge test log: {source}")]
    Json {
        /// The parsing error.
        #[source]
        source: serde_json::Error,
        /// Captured stdout.
        stdout: String,
    },

    /// The test log has no entry for the harness test.
    #[error("test {contract}::{test}() not found in forge output")]
    TestNotFound {
        /// Matched contract.
        contract: String,
        /// Matched test.
        test: String,
    },

    /// The harness test failed.
    #[error("forge test failed: {}", reason.as_deref().unwrap_or("no reason given"))]
    TestFailed {
        /// Failure reason reported by forge.
        reason: Option<String>,
        /// Logs decoded by forge, for context.
        decoded_logs: Vec<String>,
    },

    /// A report event could not be decoded.
    #[error("failed to decode report event: {0}")]
    Decode(#[from] alloy::sol_types::Error),

    /// A report event names a shortcut outside the batch.
    #[error("report event for shortcut {index}, batch has {count}")]
    IndexOutOfRange {
        /// The index in the event.
        index: U256,
        /// Number of shortcuts in the batch.
        count: usize,
    },

    /// A balance report's arrays are not parallel.
    #[error("shortcut {index}: report has {tokens} tokens but {amounts} diffs")]
    LengthMismatch {
        /// Shortcut index.
        index: usize,
        /// Number of tokens.
        tokens: usize,
        /// Number of diffs.
        amounts: usize,
    },

    /// No gas-used event was emitted for a shortcut.
    #[error("no gas report for shortcut {0}")]
    MissingGasReport(usize),

    /// An expected balance report was not emitted for a shortcut.
    #[error("no {kind} report for {tracked} in shortcut {index}")]
    MissingReport {
        /// Shortcut index.
        index: usize,
        /// The missing category.
        kind: ReportKind,
        /// The address the report was expected for.
        tracked: Address,
    },
}
