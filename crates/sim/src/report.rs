use crate::{BackendShortcutResult, ShortcutPlan, SimulationOptions};
use alloy::primitives::Address;
use shortcut_bindings::ReportKind;
use shortcut_types::{BalanceDiff, ShortcutToSimulate, SimulatedShortcutReport, TokenDiffs};
use tracing::debug;

/// Builds the final per-shortcut reports of a batch.
#[derive(Debug, Clone, Copy)]
pub struct ReportBuilder {
    chain_id: u64,
    caller: Address,
    weiroll_wallet: Address,
    options: SimulationOptions,
}

impl ReportBuilder {
    /// Create a builder for a batch.
    pub const fn new(
        chain_id: u64,
        caller: Address,
        weiroll_wallet: Address,
        options: SimulationOptions,
    ) -> Self {
        Self { chain_id, caller, weiroll_wallet, options }
    }

    /// The wallet's diff for `token`, from the first category that reports it.
    fn wallet_diff(
        &self,
        result: &BackendShortcutResult,
        kinds: &[ReportKind],
        token: Address,
    ) -> BalanceDiff {
        if !result.is_successful {
            return BalanceDiff::Failed;
        }
        kinds
            .iter()
            .find_map(|kind| result.diffs.get(*kind, self.weiroll_wallet, token))
            .unwrap_or(BalanceDiff::Failed)
    }

    /// Build one report.
    ///
    /// `quote` holds the wallet's diff per output token. `dust` holds the
    /// wallet's diff per input and dust token, excluding outputs. A diff the
    /// backend did not report, or any diff of an unsuccessful shortcut, is
    /// reported as failed. `balances` carries every tracked address's diffs.
    pub fn build(
        &self,
        sim: &ShortcutToSimulate,
        plan: &ShortcutPlan,
        mut result: BackendShortcutResult,
    ) -> SimulatedShortcutReport {
        let quote: TokenDiffs = plan
            .tokens_out
            .iter()
            .map(|token| (*token, self.wallet_diff(&result, &[ReportKind::Quote], *token)))
            .collect();

        let dust: TokenDiffs = plan
            .tokens_in
            .iter()
            .chain(&plan.dust)
            .filter(|token| !plan.tokens_out.contains(token))
            .map(|token| {
                (*token, self.wallet_diff(&result, &[ReportKind::Dust, ReportKind::Base], *token))
            })
            .collect();

        if !result.is_successful {
            result.diffs.fail_all();
        }
        let raw = result.raw.take();
        if self.options.log_raw {
            if let Some(raw) = &raw {
                debug!(index = plan.index, name = %plan.name, %raw, "raw backend result");
            }
        }

        SimulatedShortcutReport {
            is_successful: result.is_successful,
            chain_id: self.chain_id,
            block: sim.block(),
            shortcut_name: sim.name.clone(),
            caller: self.caller,
            weiroll_wallet: self.weiroll_wallet,
            amounts_in: sim.amounts_in_strings(),
            quote,
            dust,
            balances: result.diffs,
            gas: result.gas_used.to_string(),
            raw_backend_result: raw.filter(|_| self.options.include_raw),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Planner;
    use alloy::{
        primitives::{B256, I256, U256},
        sol_types::SolCall,
    };
    use shortcut_constants::test_utils;
    use shortcut_types::{BalanceDiffs, BuiltShortcut, SimulationRoles, WeirollScript};

    const WALLET: Address = Address::repeat_byte(0xbb);

    fn approve(token: Address) -> B256 {
        let mut word = [0xffu8; 32];
        word[..4].copy_from_slice(&shortcut_bindings::IERC20::approveCall::SELECTOR);
        word[4] = 0x01;
        word[12..].copy_from_slice(token.as_slice());
        B256::from(word)
    }

    fn setup() -> (ShortcutToSimulate, ShortcutPlan) {
        let roles = SimulationRoles::from(test_utils::ROLES).bound(WALLET).unwrap();
        let built = BuiltShortcut::new(
            WeirollScript::new(
                vec![approve(test_utils::WRAPPED_NATIVE), approve(test_utils::USD)],
                vec![],
            ),
            vec![test_utils::WRAPPED_NATIVE],
            vec![test_utils::VAULT],
        );
        let sim = ShortcutToSimulate::new("deposit", vec![U256::from(10).pow(U256::from(18))])
            .at_block(100, None);
        let plan = Planner::new(&roles, test_utils::HOLDERS, false).plan(0, &sim, &built).unwrap();
        (sim, plan)
    }

    fn int(value: i64) -> I256 {
        I256::try_from(value).unwrap()
    }

    fn result() -> BackendShortcutResult {
        let mut diffs = BalanceDiffs::default();
        diffs.insert(ReportKind::Base, WALLET, test_utils::WRAPPED_NATIVE, int(0));
        diffs.insert(ReportKind::Quote, WALLET, test_utils::VAULT, int(998));
        diffs.insert(ReportKind::Quote, test_utils::CALLER, test_utils::VAULT, int(5));
        BackendShortcutResult {
            is_successful: true,
            gas_used: U256::from(210_000),
            diffs,
            raw: Some(serde_json::json!({ "index": 0 })),
        }
    }

    #[test]
    fn wallet_diffs_and_tracked_balances() {
        let (sim, plan) = setup();
        let builder =
            ReportBuilder::new(146, test_utils::CALLER, WALLET, SimulationOptions::default());
        let report = builder.build(&sim, &plan, result());

        assert!(report.is_successful);
        assert_eq!(report.shortcut_name, "deposit");
        assert_eq!(report.block.number, Some(100));
        assert_eq!(report.amounts_in, vec!["1000000000000000000".to_owned()]);
        assert_eq!(report.gas, "210000");
        assert_eq!(report.quote_for(test_utils::VAULT), Some(BalanceDiff::Amount(int(998))));
        assert_eq!(report.dust_for(test_utils::WRAPPED_NATIVE), Some(BalanceDiff::ZERO));
        // Reported by no backend event.
        assert_eq!(report.dust_for(test_utils::USD), Some(BalanceDiff::Failed));
        assert_eq!(report.dust.len(), 2);
        assert!(report.raw_backend_result.is_none());
        // Other tracked addresses are kept.
        assert_eq!(
            report.balance_of(ReportKind::Quote, test_utils::CALLER, test_utils::VAULT),
            Some(BalanceDiff::Amount(int(5)))
        );
    }

    #[test]
    fn unsuccessful_is_all_failed() {
        let (sim, plan) = setup();
        let options = SimulationOptions::default().with_raw();
        let builder = ReportBuilder::new(146, test_utils::CALLER, WALLET, options);
        let mut failed = result();
        failed.is_successful = false;
        let report = builder.build(&sim, &plan, failed);

        assert!(!report.is_successful);
        assert!(report.quote.values().chain(report.dust.values()).all(BalanceDiff::is_failed));
        assert_eq!(
            report.balance_of(ReportKind::Quote, test_utils::CALLER, test_utils::VAULT),
            Some(BalanceDiff::Failed)
        );
        assert_eq!(report.raw_backend_result, Some(serde_json::json!({ "index": 0 })));
    }
}
