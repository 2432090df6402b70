use crate::{ForgeError, ForgeShortcut, RawLog};
use alloy::primitives::{Address, U256};
use shortcut_bindings::{ReportEvent, ReportKind};
use shortcut_types::BalanceDiffs;
use tracing::debug;

/// What the harness reported for one shortcut.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForgeShortcutResult {
    /// Gas used by the execution.
    pub gas_used: U256,
    /// Balance diffs by category, tracked address and token.
    pub diffs: BalanceDiffs,
}

/// The balance reports a shortcut must emit for one tracked address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedReports {
    /// The address the reports are for.
    pub tracked: Address,
    /// The categories that must be reported.
    pub kinds: Vec<ReportKind>,
}

impl ExpectedReports {
    /// Expect `kinds` for `tracked`.
    pub const fn new(tracked: Address, kinds: Vec<ReportKind>) -> Self {
        Self { tracked, kinds }
    }

    /// Expect a report for `tracked` in every category with tokens.
    pub fn for_shortcut(tracked: Address, shortcut: &ForgeShortcut) -> Self {
        let kinds = [
            (ReportKind::Base, &shortcut.tokens_in),
            (ReportKind::Quote, &shortcut.tokens_out),
            (ReportKind::Dust, &shortcut.tokens_dust),
        ]
        .into_iter()
        .filter(|(_, tokens)| !tokens.is_empty())
        .map(|(kind, _)| kind)
        .collect();
        Self { tracked, kinds }
    }
}

/// Extract per-shortcut results from the harness's logs.
///
/// Events are attributed by the shortcut index they carry. Logs that are not
/// report events are ignored. There is one shortcut per entry of
/// `expected`. Every shortcut must have a gas report and the balance reports
/// it expects.
pub fn extract_results(
    logs: &[RawLog],
    expected: &[ExpectedReports],
) -> Result<Vec<ForgeShortcutResult>, ForgeError> {
    let count = expected.len();
    let mut results = vec![ForgeShortcutResult::default(); count];
    let mut has_gas = vec![false; count];
    let mut reported = vec![[false; ReportKind::ALL.len()]; count];
    let mut events = 0usize;

    for log in logs {
        let Some(event) = ReportEvent::decode(&log.to_log())? else { continue };
        events += 1;

        let index = event.shortcut_index();
        let i = usize::try_from(index)
            .ok()
            .filter(|i| *i < count)
            .ok_or(ForgeError::IndexOutOfRange { index, count })?;
        let result = &mut results[i];

        match event {
            ReportEvent::GasUsed(gas) => {
                result.gas_used = gas.gasUsed;
                has_gas[i] = true;
            }
            ReportEvent::Balances(report) => {
                if report.tokens.len() != report.amounts_diff.len() {
                    return Err(ForgeError::LengthMismatch {
                        index: i,
                        tokens: report.tokens.len(),
                        amounts: report.amounts_diff.len(),
                    });
                }
                if report.tracked_address == expected[i].tracked {
                    reported[i][report.kind.index()] = true;
                }
                for (token, diff) in report.tokens.iter().zip(&report.amounts_diff) {
                    result.diffs.insert(report.kind, report.tracked_address, *token, *diff);
                }
            }
        }
    }
    debug!(logs = logs.len(), events, "extracted report events");

    for (index, (expected, reported)) in expected.iter().zip(&reported).enumerate() {
        if !has_gas[index] {
            return Err(ForgeError::MissingGasReport(index));
        }
        if let Some(kind) = expected.kinds.iter().find(|kind| !reported[kind.index()]) {
            return Err(ForgeError::MissingReport { index, kind: *kind, tracked: expected.tracked });
        }
    }
    Ok(results)
}
