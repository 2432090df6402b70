use crate::ISimulationReport::{
    ISimulationReportEvents, SimulationReportBase, SimulationReportDust, SimulationReportGasUsed,
    SimulationReportQuote,
};
use alloy::{
    primitives::{Address, Log, I256, U256},
    sol_types::{SolEvent, SolEventInterface},
};

/// The balance category a report event describes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReportKind {
    /// Diffs of the shortcut's input tokens.
    Base,
    /// Diffs of the shortcut's output tokens.
    Quote,
    /// Diffs of the shortcut's dust tokens.
    Dust,
}

impl ReportKind {
    /// All categories, in the order tokens are laid out for a shortcut.
    pub const ALL: [Self; 3] = [Self::Base, Self::Quote, Self::Dust];

    /// Position of the category within [`Self::ALL`].
    pub const fn index(&self) -> usize {
        match self {
            Self::Base => 0,
            Self::Quote => 1,
            Self::Dust => 2,
        }
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Base => f.write_str("base"),
            Self::Quote => f.write_str("quote"),
            Self::Dust => f.write_str("dust"),
        }
    }
}

/// A balance-diff report for one tracked address, as emitted by the
/// fork-test harness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceReport {
    /// The category of the report.
    pub kind: ReportKind,
    /// Index of the shortcut within the batch.
    pub shortcut_index: U256,
    /// The address whose balances were diffed.
    pub tracked_address: Address,
    /// The tokens, parallel to `amounts_diff`.
    pub tokens: Vec<Address>,
    /// The signed balance diffs, parallel to `tokens`.
    pub amounts_diff: Vec<I256>,
}

/// Events emitted by the fork-test harness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEvent {
    /// A [`SimulationReportGasUsed`] event.
    GasUsed(SimulationReportGasUsed),
    /// A [`SimulationReportBase`], [`SimulationReportQuote`] or
    /// [`SimulationReportDust`] event.
    Balances(BalanceReport),
}

impl From<SimulationReportGasUsed> for ReportEvent {
    fn from(e: SimulationReportGasUsed) -> Self {
        Self::GasUsed(e)
    }
}

impl From<SimulationReportBase> for ReportEvent {
    fn from(e: SimulationReportBase) -> Self {
        Self::Balances(BalanceReport {
            kind: ReportKind::Base,
            shortcut_index: e.shortcutIndex,
            tracked_address: e.trackedAddress,
            tokens: e.tokens,
            amounts_diff: e.amountsDiff,
        })
    }
}

impl From<SimulationReportQuote> for ReportEvent {
    fn from(e: SimulationReportQuote) -> Self {
        Self::Balances(BalanceReport {
            kind: ReportKind::Quote,
            shortcut_index: e.shortcutIndex,
            tracked_address: e.trackedAddress,
            tokens: e.tokens,
            amounts_diff: e.amountsDiff,
        })
    }
}

impl From<SimulationReportDust> for ReportEvent {
    fn from(e: SimulationReportDust) -> Self {
        Self::Balances(BalanceReport {
            kind: ReportKind::Dust,
            shortcut_index: e.shortcutIndex,
            tracked_address: e.trackedAddress,
            tokens: e.tokens,
            amounts_diff: e.amountsDiff,
        })
    }
}

impl ReportEvent {
    /// True if the log's first topic is one of the report event signatures.
    pub fn matches(log: &Log) -> bool {
        log.topics().first().is_some_and(|topic| {
            *topic == SimulationReportGasUsed::SIGNATURE_HASH
                || *topic == SimulationReportBase::SIGNATURE_HASH
                || *topic == SimulationReportQuote::SIGNATURE_HASH
                || *topic == SimulationReportDust::SIGNATURE_HASH
        })
    }

    /// Decode a report event from a log.
    ///
    /// Returns `Ok(None)` for logs that are not report events, such as those
    /// emitted during harness setup. A log carrying a report signature but
    /// malformed data is an error.
    pub fn decode(log: &Log) -> Result<Option<Self>, alloy::sol_types::Error> {
        if !Self::matches(log) {
            return Ok(None);
        }

        let event = match ISimulationReportEvents::decode_log(log)?.data {
            ISimulationReportEvents::SimulationReportGasUsed(e) => e.into(),
            ISimulationReportEvents::SimulationReportBase(e) => e.into(),
            ISimulationReportEvents::SimulationReportQuote(e) => e.into(),
            ISimulationReportEvents::SimulationReportDust(e) => e.into(),
        };
        Ok(Some(event))
    }

    /// The index of the shortcut this event reports on.
    pub const fn shortcut_index(&self) -> U256 {
        match self {
            Self::GasUsed(e) => e.shortcutIndex,
            Self::Balances(r) => r.shortcut_index,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use alloy::primitives::{b256, LogData};

    fn to_log<E: SolEvent>(event: &E) -> Log {
        Log { address: Address::ZERO, data: event.encode_log_data() }
    }

    #[test]
    fn decode_gas_used() {
        let event =
            SimulationReportGasUsed { shortcutIndex: U256::from(2), gasUsed: U256::from(21_000) };
        let decoded = ReportEvent::decode(&to_log(&event)).unwrap().unwrap();
        assert_eq!(decoded.shortcut_index(), U256::from(2));
        assert!(matches!(decoded, ReportEvent::GasUsed(e) if e.gasUsed == U256::from(21_000)));
    }

    #[test]
    fn decode_dust() {
        let event = SimulationReportDust {
            shortcutIndex: U256::from(1),
            trackedAddress: Address::repeat_byte(0x11),
            tokens: vec![Address::repeat_byte(0x22)],
            amountsDiff: vec![I256::MINUS_ONE],
        };
        let Some(ReportEvent::Balances(report)) = ReportEvent::decode(&to_log(&event)).unwrap()
        else {
            panic!("not a balance report");
        };
        assert_eq!(report.kind, ReportKind::Dust);
        assert_eq!(report.tracked_address, Address::repeat_byte(0x11));
        assert_eq!(report.amounts_diff, vec![I256::MINUS_ONE]);
    }

    #[test]
    fn foreign_logs_are_skipped() {
        // Transfer(address,address,uint256)
        let topic = b256!("0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef");
        let log = Log {
            address: Address::ZERO,
            data: LogData::new_unchecked(vec![topic], Default::default()),
        };
        assert!(ReportEvent::decode(&log).unwrap().is_none());

        let empty = Log { address: Address::ZERO, data: LogData::default() };
        assert!(ReportEvent::decode(&empty).unwrap().is_none());
    }

    #[test]
    fn malformed_report_is_an_error() {
        let log = Log {
            address: Address::ZERO,
            data: LogData::new_unchecked(
                vec![SimulationReportQuote::SIGNATURE_HASH],
                vec![1u8, 2, 3].into(),
            ),
        };
        assert!(ReportEvent::decode(&log).is_err());
    }
}
