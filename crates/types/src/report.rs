use crate::BlockContext;
use alloy::primitives::{Address, I256};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use shortcut_bindings::ReportKind;
use std::{collections::BTreeMap, fmt, str::FromStr};

/// The value reported in place of a diff that could not be computed.
pub const DIFF_FAILED: I256 = I256::MIN;

/// A signed balance change of one token for one tracked address.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BalanceDiff {
    /// The post-execution balance minus the pre-execution balance.
    Amount(I256),
    /// The execution or one of the probes feeding the diff failed.
    Failed,
}

impl BalanceDiff {
    /// Zero diff.
    pub const ZERO: Self = Self::Amount(I256::ZERO);

    /// Wrap a diff, mapping the sentinel value to [`Self::Failed`].
    pub fn new(amount: I256) -> Self {
        if amount == DIFF_FAILED {
            Self::Failed
        } else {
            Self::Amount(amount)
        }
    }

    /// The diff as reported, with failures mapped to [`DIFF_FAILED`].
    pub const fn value(&self) -> I256 {
        match self {
            Self::Amount(amount) => *amount,
            Self::Failed => DIFF_FAILED,
        }
    }

    /// True if the diff could not be computed.
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }
}

impl From<I256> for BalanceDiff {
    fn from(amount: I256) -> Self {
        Self::new(amount)
    }
}

impl fmt::Display for BalanceDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value(), f)
    }
}

impl FromStr for BalanceDiff {
    type Err = alloy::primitives::ParseSignedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        I256::from_dec_str(s).map(Self::new)
    }
}

impl Serialize for BalanceDiff {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BalanceDiff {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Diffs keyed by token.
pub type TokenDiffs = BTreeMap<Address, BalanceDiff>;

/// Per-category balance diffs of one shortcut, keyed by tracked address,
/// then by token.
///
/// Both backends produce this shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceDiffs {
    /// Diffs of the input tokens.
    pub base: BTreeMap<Address, TokenDiffs>,
    /// Diffs of the output tokens.
    pub quote: BTreeMap<Address, TokenDiffs>,
    /// Diffs of the dust tokens.
    pub dust: BTreeMap<Address, TokenDiffs>,
}

impl BalanceDiffs {
    /// Get the diffs of one category.
    pub const fn category(&self, kind: ReportKind) -> &BTreeMap<Address, TokenDiffs> {
        match kind {
            ReportKind::Base => &self.base,
            ReportKind::Quote => &self.quote,
            ReportKind::Dust => &self.dust,
        }
    }

    /// Get the diffs of one category, mutably.
    pub fn category_mut(&mut self, kind: ReportKind) -> &mut BTreeMap<Address, TokenDiffs> {
        match kind {
            ReportKind::Base => &mut self.base,
            ReportKind::Quote => &mut self.quote,
            ReportKind::Dust => &mut self.dust,
        }
    }

    /// Record a diff.
    pub fn insert(
        &mut self,
        kind: ReportKind,
        tracked: Address,
        token: Address,
        diff: impl Into<BalanceDiff>,
    ) {
        self.category_mut(kind).entry(tracked).or_default().insert(token, diff.into());
    }

    /// Get the diffs of one category for a tracked address.
    pub fn tracked(&self, kind: ReportKind, tracked: Address) -> Option<&TokenDiffs> {
        self.category(kind).get(&tracked)
    }

    /// Get a single diff.
    pub fn get(&self, kind: ReportKind, tracked: Address, token: Address) -> Option<BalanceDiff> {
        self.tracked(kind, tracked)?.get(&token).copied()
    }

    /// Mark every recorded diff as failed.
    pub fn fail_all(&mut self) {
        for kind in ReportKind::ALL {
            self.category_mut(kind)
                .values_mut()
                .flat_map(|tokens| tokens.values_mut())
                .for_each(|diff| *diff = BalanceDiff::Failed);
        }
    }

    /// True if no diff was recorded.
    pub fn is_empty(&self) -> bool {
        self.base.is_empty() && self.quote.is_empty() && self.dust.is_empty()
    }
}

/// The simulation report of one shortcut.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulatedShortcutReport {
    /// Whether the shortcut executed successfully.
    pub is_successful: bool,
    /// The chain simulated on.
    pub chain_id: u64,
    /// The block simulated at, as requested.
    pub block: BlockContext,
    /// Name of the shortcut.
    pub shortcut_name: String,
    /// The account that submitted the execution.
    pub caller: Address,
    /// The execution wallet.
    pub weiroll_wallet: Address,
    /// Input amounts as decimal strings, as supplied.
    pub amounts_in: Vec<String>,
    /// Output-token diffs of the execution wallet.
    pub quote: TokenDiffs,
    /// Input- and dust-token diffs of the execution wallet.
    pub dust: TokenDiffs,
    /// Every diff the backend reported, by category, tracked address and
    /// token.
    pub balances: BalanceDiffs,
    /// Gas used by the execution, as a decimal string.
    pub gas: String,
    /// The backend's raw result. Only present when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_backend_result: Option<serde_json::Value>,
}

impl SimulatedShortcutReport {
    /// Get the quoted diff for an output token.
    pub fn quote_for(&self, token: Address) -> Option<BalanceDiff> {
        self.quote.get(&token).copied()
    }

    /// Get the dust diff for a token.
    pub fn dust_for(&self, token: Address) -> Option<BalanceDiff> {
        self.dust.get(&token).copied()
    }

    /// Get a tracked address's diff for a token in one category.
    pub fn balance_of(
        &self,
        kind: ReportKind,
        tracked: Address,
        token: Address,
    ) -> Option<BalanceDiff> {
        self.balances.get(kind, tracked, token)
    }
}
