use alloy::{
    primitives::{I256, U256},
    sol_types::SolCall,
};
use shortcut_bindings::{IWeirollWalletHelper, ReportKind};
use shortcut_constants::{ChainConstants, NATIVE_TOKEN_ADDRESS};
use shortcut_sim::{PlanError, RemoteBackend, ShortcutSimulator, SimError, SimulationOptions};
use shortcut_test_utils::{
    fixtures::*,
    init_tracing,
    ledger::{MockChain, PROBE_GAS},
    test_constants::*,
};
use shortcut_types::{BalanceDiff, ShortcutToSimulate, ValidationError};

type Simulator = ShortcutSimulator<MockChain, RemoteBackend<MockChain>>;

fn simulator(chain: &MockChain) -> Simulator {
    init_tracing();
    ShortcutSimulator::new(ChainConstants::test(), chain.clone(), RemoteBackend::new(chain.clone()))
}

fn amount(value: U256) -> BalanceDiff {
    BalanceDiff::Amount(I256::try_from(value).unwrap())
}

#[tokio::test]
async fn deposit_report() {
    let chain = vault_chain();
    let reports = simulator(&chain).simulate(&[deposit()], &[deposit_built()]).await.unwrap();

    assert_eq!(reports.len(), 1);
    let report = &reports[0];
    assert!(report.is_successful);
    assert_eq!(report.chain_id, CHAIN_ID);
    assert_eq!(report.shortcut_name, "deposit");
    assert_eq!(report.caller, CALLER);
    assert_eq!(report.weiroll_wallet, WALLET);
    assert_eq!(report.block.number, Some(FORK_BLOCK));
    assert_eq!(report.block.timestamp, Some(FORK_TIMESTAMP));
    assert_eq!(report.amounts_in, vec![DEPOSIT_AMOUNT.to_string()]);
    assert_eq!(report.gas, DEPOSIT_GAS.to_string());

    assert_eq!(report.quote.len(), 1);
    assert_eq!(report.quote_for(VAULT), Some(amount(DEPOSIT_SHARES)));
    assert_eq!(report.dust.len(), 1);
    assert_eq!(report.dust_for(WRAPPED_NATIVE), Some(BalanceDiff::ZERO));
    assert!(report.raw_backend_result.is_none());

    let json = serde_json::to_value(report).unwrap();
    assert_eq!(json["quote"][VAULT.to_string()], DEPOSIT_SHARES.to_string());
    assert_eq!(json["dust"][WRAPPED_NATIVE.to_string()], "0");
}

#[tokio::test]
async fn chained_redeem_returns_deposit() {
    let chain = vault_chain();
    let reports = simulator(&chain)
        .simulate(&[deposit(), redeem()], &[deposit_built(), redeem_built()])
        .await
        .unwrap();

    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].shortcut_name, "deposit");
    assert_eq!(reports[1].shortcut_name, "redeem");
    assert!(reports.iter().all(|r| r.is_successful));

    let deposited = reports[0].quote_for(VAULT).unwrap().value();
    let redeemed = reports[1].dust_for(VAULT).unwrap().value();
    assert_eq!(redeemed, -deposited);
    assert_eq!(reports[1].quote_for(WRAPPED_NATIVE), Some(amount(DEPOSIT_AMOUNT)));
    assert_eq!(reports[1].gas, REDEEM_GAS.to_string());
}

#[tokio::test]
async fn execution_nonces_follow_the_caller() {
    let chain = vault_chain();
    simulator(&chain)
        .simulate(
            &[deposit(), redeem(), deposit()],
            &[deposit_built(), redeem_built(), deposit_built()],
        )
        .await
        .unwrap();

    let bundles = chain.bundles();
    assert_eq!(bundles.len(), 1);
    let nonces: Vec<_> = bundles[0]
        .simulations
        .iter()
        .filter(|sim| sim.from == CALLER && sim.to == RECIPE_MARKET_HUB)
        .map(|sim| sim.state_objects[&CALLER].nonce)
        .collect();
    assert_eq!(nonces, vec![Some(CALLER_NONCE), Some(CALLER_NONCE + 1), Some(CALLER_NONCE + 2)]);
}

#[tokio::test]
async fn bundle_is_ordered_per_shortcut() {
    let chain = vault_chain();
    simulator(&chain).simulate(&[deposit()], &[deposit_built()]).await.unwrap();

    let bundle = &chain.bundles()[0];
    // caller and wallet, each probing WRAPPED_NATIVE (input), VAULT (output)
    // and WRAPPED_NATIVE (dust).
    assert_eq!(bundle.simulations.len(), 6 + 1 + 1 + 6);

    let probes = &bundle.simulations[..6];
    assert!(probes.iter().all(|p| p.from == PROBE_SENDER));
    let targets: Vec<_> = probes.iter().map(|p| p.to).collect();
    assert_eq!(
        targets,
        vec![WRAPPED_NATIVE, VAULT, WRAPPED_NATIVE, WRAPPED_NATIVE, VAULT, WRAPPED_NATIVE]
    );

    let funding = &bundle.simulations[6];
    assert_eq!(funding.from, WRAPPED_NATIVE_HOLDER);
    assert_eq!(funding.to, WRAPPED_NATIVE);

    let execute = &bundle.simulations[7];
    assert_eq!(execute.from, CALLER);
    assert_eq!(execute.input, deposit_built().script.calldata());
    assert!(bundle.simulations.iter().all(|s| s.block_number == Some(FORK_BLOCK)));
    assert_eq!(&bundle.simulations[8..], probes);
}

#[tokio::test]
async fn native_input_is_sent_as_value() {
    let chain = vault_chain();
    let reports =
        simulator(&chain).simulate(&[wrap(DEPOSIT_AMOUNT)], &[wrap_built()]).await.unwrap();

    let report = &reports[0];
    assert!(report.is_successful);
    assert_eq!(report.quote_for(WRAPPED_NATIVE), Some(amount(DEPOSIT_AMOUNT)));
    assert_eq!(report.dust_for(shortcut_constants::NATIVE_TOKEN_ADDRESS), Some(BalanceDiff::ZERO));

    let bundle = &chain.bundles()[0];
    let native_probes = bundle
        .simulations
        .iter()
        .filter(|s| s.input.starts_with(&IWeirollWalletHelper::nativeBalanceCall::SELECTOR));
    assert!(native_probes.clone().count() > 0);
    assert!(native_probes.into_iter().all(|s| s.to == WALLET_HELPER));

    let execute = bundle.simulations.iter().find(|s| s.from == CALLER).unwrap();
    assert_eq!(execute.value, DEPOSIT_AMOUNT);
    assert_eq!(execute.state_objects[&CALLER].balance, Some(DEPOSIT_AMOUNT));
}

#[tokio::test]
async fn funded_caller_keeps_its_native_balance() {
    let chain = vault_chain().with_balance(NATIVE_TOKEN_ADDRESS, CALLER, HOLDER_BALANCE);
    let reports =
        simulator(&chain).simulate(&[wrap(DEPOSIT_AMOUNT)], &[wrap_built()]).await.unwrap();

    let report = &reports[0];
    assert!(report.is_successful);
    let spent = BalanceDiff::Amount(-I256::try_from(DEPOSIT_AMOUNT).unwrap());
    assert_eq!(report.balance_of(ReportKind::Base, CALLER, NATIVE_TOKEN_ADDRESS), Some(spent));
    assert_eq!(report.quote_for(WRAPPED_NATIVE), Some(amount(DEPOSIT_AMOUNT)));

    let bundle = &chain.bundles()[0];
    let execute = bundle.simulations.iter().find(|s| s.from == CALLER).unwrap();
    assert_eq!(execute.value, DEPOSIT_AMOUNT);
    assert_eq!(execute.state_objects[&CALLER].balance, None);
}

#[tokio::test]
async fn tracked_addresses_are_reported() {
    let chain = vault_chain();
    let shortcut = deposit().tracking(WRAPPED_NATIVE_HOLDER);
    let reports = simulator(&chain).simulate(&[shortcut], &[deposit_built()]).await.unwrap();

    let report = &reports[0];
    let funded = BalanceDiff::Amount(-I256::try_from(DEPOSIT_AMOUNT).unwrap());
    assert_eq!(
        report.balance_of(ReportKind::Base, WRAPPED_NATIVE_HOLDER, WRAPPED_NATIVE),
        Some(funded)
    );
    assert_eq!(report.balance_of(ReportKind::Quote, CALLER, VAULT), Some(BalanceDiff::ZERO));
    assert_eq!(report.balance_of(ReportKind::Quote, WALLET, VAULT), report.quote_for(VAULT));

    let json = serde_json::to_value(report).unwrap();
    let holder = &json["balances"]["base"][WRAPPED_NATIVE_HOLDER.to_string()];
    assert_eq!(holder[WRAPPED_NATIVE.to_string()], funded.to_string());
}

#[tokio::test]
async fn missing_native_amount_fails_before_any_call() {
    let chain = vault_chain();
    let err = simulator(&chain)
        .simulate(&[deposit(), wrap(U256::ZERO)], &[deposit_built(), wrap_built()])
        .await
        .unwrap_err();

    match err {
        SimError::Plan(PlanError::MissingNativeAmount { index, name, .. }) => {
            assert_eq!(index, 1);
            assert_eq!(name, "wrap");
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(chain.reads(), 0);
    assert!(chain.bundles().is_empty());
}

#[tokio::test]
async fn missing_holder_skips_only_that_shortcut() {
    let chain = vault_chain();
    let reports = simulator(&chain)
        .simulate(&[unfunded(), deposit()], &[unfunded_built(), deposit_built()])
        .await
        .unwrap();

    assert_eq!(reports.len(), 2);
    let skipped = &reports[0];
    assert!(!skipped.is_successful);
    assert_eq!(skipped.gas, "0");
    assert_eq!(skipped.quote_for(VAULT), Some(BalanceDiff::Failed));
    assert_eq!(skipped.dust_for(UNFUNDED), Some(BalanceDiff::Failed));

    assert!(reports[1].is_successful);
    assert_eq!(reports[1].quote_for(VAULT), Some(amount(DEPOSIT_SHARES)));

    // The skipped shortcut submits nothing and does not consume a nonce.
    let bundle = &chain.bundles()[0];
    let execute = bundle.simulations.iter().find(|s| s.from == CALLER).unwrap();
    assert_eq!(execute.state_objects[&CALLER].nonce, Some(CALLER_NONCE));
}

#[tokio::test]
async fn reverted_execution_is_local() {
    let chain = vault_chain();
    let reports = simulator(&chain)
        .simulate(&[reverting(), deposit()], &[reverting_built(), deposit_built()])
        .await
        .unwrap();

    assert!(!reports[0].is_successful);
    assert!(reports[0].quote.values().chain(reports[0].dust.values()).all(BalanceDiff::is_failed));

    assert!(reports[1].is_successful);
    assert_eq!(reports[1].quote_for(VAULT), Some(amount(DEPOSIT_SHARES)));

    let bundle = &chain.bundles()[0];
    let nonces: Vec<_> = bundle
        .simulations
        .iter()
        .filter(|s| s.from == CALLER)
        .map(|s| s.state_objects[&CALLER].nonce)
        .collect();
    assert_eq!(nonces, vec![Some(CALLER_NONCE), Some(CALLER_NONCE + 1)]);
}

#[tokio::test]
async fn replay_is_identical() {
    let chain = vault_chain();
    let simulator = simulator(&chain);
    let shortcuts = [deposit(), redeem()];
    let built = [deposit_built(), redeem_built()];

    let first = simulator.simulate(&shortcuts, &built).await.unwrap();
    let second = simulator.simulate(&shortcuts, &built).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(chain.bundles().len(), 2);
    assert_eq!(chain.bundles()[0], chain.bundles()[1]);
}

#[tokio::test]
async fn reports_preserve_inputs() {
    let chain = vault_chain();
    let shortcuts = [deposit(), redeem(), wrap(U256::from(7))];
    let built = [deposit_built(), redeem_built(), wrap_built()];
    let reports = simulator(&chain).simulate(&shortcuts, &built).await.unwrap();

    assert_eq!(reports.len(), shortcuts.len());
    for ((report, sim), built) in reports.iter().zip(&shortcuts).zip(&built) {
        assert_eq!(report.shortcut_name, sim.name);
        assert_eq!(report.amounts_in, sim.amounts_in_strings());
        assert!(built.tokens_out().iter().all(|t| !report.dust.contains_key(t)));
    }
}

#[tokio::test]
async fn decreasing_blocks_are_rejected_before_any_call() {
    let chain = vault_chain();
    let late = deposit();
    let early =
        ShortcutToSimulate::new("early", vec![DEPOSIT_AMOUNT]).at_block(FORK_BLOCK - 1, None);

    let err = simulator(&chain)
        .simulate(&[late, early], &[deposit_built(), deposit_built()])
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SimError::Validation(ValidationError::BlockNumberDecreasing { index: 1, .. })
    ));
    assert_eq!(chain.reads(), 0);
    assert!(chain.bundles().is_empty());
}

#[tokio::test]
async fn mismatched_batch_is_rejected() {
    let chain = vault_chain();
    let err = simulator(&chain)
        .simulate(&[deposit(), redeem()], &[deposit_built()])
        .await
        .unwrap_err();
    assert!(matches!(err, SimError::Validation(ValidationError::BatchLength { .. })));
    assert_eq!(chain.reads(), 0);
}

#[tokio::test]
async fn empty_batch() {
    let chain = vault_chain();
    let reports = simulator(&chain).simulate(&[], &[]).await.unwrap();
    assert!(reports.is_empty());
    assert_eq!(chain.reads(), 0);
}

#[tokio::test]
async fn unreachable_chain() {
    let chain = vault_chain().unreachable();
    let err = simulator(&chain).simulate(&[deposit()], &[deposit_built()]).await.unwrap_err();
    assert!(matches!(err, SimError::Reader(_)));
    assert!(chain.bundles().is_empty());
}

#[tokio::test]
async fn raw_results_on_request() {
    let chain = vault_chain();
    let reports = simulator(&chain)
        .with_options(SimulationOptions::default().with_raw().with_raw_logging())
        .simulate(&[deposit()], &[deposit_built()])
        .await
        .unwrap();

    let raw = reports[0].raw_backend_result.as_ref().unwrap();
    assert_eq!(raw["nonce"], CALLER_NONCE);
    assert_eq!(raw["pre"].as_array().unwrap().len(), 6);
    assert_eq!(raw["post"][0]["transaction"]["gas_used"], PROBE_GAS);
}
