use crate::dust::find_dust;
use alloy::primitives::{Address, Bytes, U256};
use serde::Serialize;
use shortcut_bindings::{encode_balance_of, encode_native_balance, encode_transfer, ReportKind};
use shortcut_constants::TokenHolders;
use shortcut_types::{BlockContext, BuiltShortcut, ShortcutToSimulate, SimulationRoles};
use std::collections::BTreeSet;
use tracing::warn;

/// Errors planning a shortcut.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// The native token is an input but its amount is zero or absent.
    #[error("shortcut {index} ({name}): native token {token} is an input but has no amount")]
    MissingNativeAmount {
        /// Index of the shortcut.
        index: usize,
        /// Name of the shortcut.
        name: String,
        /// The native-token sentinel.
        token: Address,
    },
    /// Funding was requested for a token with no registered holder.
    #[error("shortcut {index} ({name}): no holder registered to fund {token}")]
    MissingHolder {
        /// Index of the shortcut.
        index: usize,
        /// Name of the shortcut.
        name: String,
        /// The unfunded token.
        token: Address,
    },
    /// The execution wallet was not bound before planning.
    #[error(transparent)]
    Roles(#[from] shortcut_types::RolesError),
}

/// A balance read of one token for one tracked address.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceProbe {
    /// The address whose balance is read.
    pub tracked: Address,
    /// The token read.
    pub token: Address,
    /// The category the token belongs to.
    #[serde(skip)]
    pub kind: ReportKind,
    /// Whether the token is the native-token sentinel.
    pub native: bool,
    /// Block context.
    #[serde(skip)]
    pub block: BlockContext,
}

impl BalanceProbe {
    /// The contract the probe calls. Native balances are read through the
    /// wallet helper.
    pub const fn target(&self, roles: &SimulationRoles) -> Address {
        if self.native {
            roles.wallet_helper
        } else {
            self.token
        }
    }

    /// The probe's calldata.
    pub fn calldata(&self) -> Bytes {
        if self.native {
            encode_native_balance(self.tracked)
        } else {
            encode_balance_of(self.tracked)
        }
    }
}

/// A transfer of an input token from its holder to the execution wallet.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingStep {
    /// The token transferred.
    pub token: Address,
    /// The account the token is transferred from.
    pub holder: Address,
    /// The execution wallet.
    pub recipient: Address,
    /// Amount transferred.
    pub amount: U256,
    /// Block context.
    #[serde(skip)]
    pub block: BlockContext,
}

impl FundingStep {
    /// The transfer calldata.
    pub fn calldata(&self) -> Bytes {
        encode_transfer(self.recipient, self.amount)
    }
}

/// The shortcut execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteStep {
    /// The account submitting the execution.
    pub caller: Address,
    /// The contract called.
    pub callee: Address,
    /// The executor calldata.
    pub calldata: Bytes,
    /// Value sent.
    pub value: U256,
    /// Block context.
    #[serde(skip)]
    pub block: BlockContext,
}

/// One step of a shortcut's simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "step", rename_all = "camelCase")]
pub enum SimulationStep {
    /// Balance read before execution.
    BalancePre(BalanceProbe),
    /// Input-token funding.
    Funding(FundingStep),
    /// The execution.
    Execute(ExecuteStep),
    /// Balance read after execution.
    BalancePost(BalanceProbe),
}

impl SimulationStep {
    /// The block context of the step.
    pub const fn block(&self) -> BlockContext {
        match self {
            Self::BalancePre(p) | Self::BalancePost(p) => p.block,
            Self::Funding(f) => f.block,
            Self::Execute(e) => e.block,
        }
    }

    /// True for the execution step.
    pub const fn is_execute(&self) -> bool {
        matches!(self, Self::Execute(_))
    }
}

/// The plan of one shortcut.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutPlan {
    /// Index of the shortcut in the batch.
    pub index: usize,
    /// Name of the shortcut.
    pub name: String,
    /// Block context.
    pub block: BlockContext,
    /// Value sent with the execution.
    pub value: U256,
    /// The executor calldata.
    pub calldata: Bytes,
    /// Input tokens.
    pub tokens_in: Vec<Address>,
    /// Input amounts, parallel to `tokens_in`.
    pub amounts_in: Vec<U256>,
    /// Registered holder per input token.
    pub holders: Vec<Option<Address>>,
    /// Whether input tokens are funded.
    pub requires_funding: bool,
    /// Output tokens.
    pub tokens_out: Vec<Address>,
    /// Dust tokens.
    pub dust: Vec<Address>,
    /// Tracked addresses: the caller, the execution wallet, then any
    /// requested by the shortcut.
    pub tracked: Vec<Address>,
    /// The ordered steps.
    pub steps: Vec<SimulationStep>,
    /// Why the shortcut was skipped, if it was.
    pub skipped: Option<PlanError>,
}

impl ShortcutPlan {
    /// The probed tokens in layout order: inputs, outputs, then dust.
    pub fn probe_tokens(&self) -> impl Iterator<Item = (ReportKind, Address)> + '_ {
        let base = self.tokens_in.iter().map(|t| (ReportKind::Base, *t));
        let quote = self.tokens_out.iter().map(|t| (ReportKind::Quote, *t));
        let dust = self.dust.iter().map(|t| (ReportKind::Dust, *t));
        base.chain(quote).chain(dust)
    }

    /// Number of probed tokens per tracked address.
    pub fn token_count(&self) -> usize {
        self.tokens_in.len() + self.tokens_out.len() + self.dust.len()
    }

    /// Number of probes in each of the pre- and post-execution phases.
    pub fn probe_count(&self) -> usize {
        self.tracked.len() * self.token_count()
    }

    /// Offset of a probe within its phase.
    pub fn probe_offset(&self, tracked_index: usize, token_position: usize) -> usize {
        tracked_index * self.token_count() + token_position
    }

    /// The execution step, if the shortcut was not skipped.
    pub fn execute(&self) -> Option<&ExecuteStep> {
        self.steps.iter().find_map(|step| match step {
            SimulationStep::Execute(e) => Some(e),
            _ => None,
        })
    }

    /// True if the shortcut was skipped.
    pub const fn is_skipped(&self) -> bool {
        self.skipped.is_some()
    }

    /// Holders per input token, zero where none is registered.
    pub fn holders_or_zero(&self) -> Vec<Address> {
        self.holders.iter().map(|h| h.unwrap_or_default()).collect()
    }
}

/// Compute the value sent with a shortcut's execution: the amount paired
/// with the native token, or zero when it is not an input.
pub fn transaction_value(
    index: usize,
    sim: &ShortcutToSimulate,
    built: &BuiltShortcut,
    native_token: Address,
) -> Result<U256, PlanError> {
    let Some(position) = built.tokens_in().iter().position(|t| *t == native_token) else {
        return Ok(U256::ZERO);
    };
    sim.amounts_in.get(position).copied().filter(|amount| !amount.is_zero()).ok_or_else(|| {
        PlanError::MissingNativeAmount { index, name: sim.name.clone(), token: native_token }
    })
}

/// Plans shortcuts into simulation steps.
#[derive(Debug, Clone, Copy)]
pub struct Planner<'a> {
    roles: &'a SimulationRoles,
    holders: TokenHolders,
    probes: bool,
}

impl<'a> Planner<'a> {
    /// Create a planner. `probes` selects whether balance probes are
    /// emitted around each execution.
    pub const fn new(roles: &'a SimulationRoles, holders: TokenHolders, probes: bool) -> Self {
        Self { roles, holders, probes }
    }

    /// Resolve everything but the steps.
    fn skeleton(
        &self,
        index: usize,
        sim: &ShortcutToSimulate,
        built: &BuiltShortcut,
    ) -> Result<ShortcutPlan, PlanError> {
        let value = transaction_value(index, sim, built, self.roles.native_token)?;
        let wallet = self.roles.weiroll_wallet()?;

        let mut tracked = vec![self.roles.caller];
        if !tracked.contains(&wallet) {
            tracked.push(wallet);
        }
        for address in sim.tracked_addresses.iter().flat_map(BTreeSet::iter) {
            if !tracked.contains(address) {
                tracked.push(*address);
            }
        }

        Ok(ShortcutPlan {
            index,
            name: sim.name.clone(),
            block: sim.block(),
            value,
            calldata: built.script.calldata(),
            tokens_in: built.tokens_in().to_vec(),
            amounts_in: sim.amounts_in.clone(),
            holders: built.tokens_in().iter().map(|t| self.holders.holder_for(*t)).collect(),
            requires_funding: sim.requires_funding,
            tokens_out: built.tokens_out().to_vec(),
            dust: find_dust(&built.script, built.tokens_out()),
            tracked,
            steps: Vec::new(),
            skipped: None,
        })
    }

    fn probes(&self, plan: &ShortcutPlan) -> Vec<BalanceProbe> {
        if !self.probes {
            return Vec::new();
        }
        let native = self.roles.native_token;
        plan.tracked
            .iter()
            .flat_map(|tracked| {
                plan.probe_tokens().map(move |(kind, token)| BalanceProbe {
                    tracked: *tracked,
                    token,
                    kind,
                    native: token == native,
                    block: plan.block,
                })
            })
            .collect()
    }

    fn funding(&self, plan: &ShortcutPlan) -> Result<Vec<FundingStep>, PlanError> {
        let wallet = self.roles.weiroll_wallet()?;
        let native = self.roles.native_token;
        let mut steps = Vec::new();

        for ((token, holder), amount) in
            plan.tokens_in.iter().zip(&plan.holders).zip(&plan.amounts_in)
        {
            if *token == native {
                continue;
            }
            match (holder, plan.requires_funding) {
                (Some(holder), true) => steps.push(FundingStep {
                    token: *token,
                    holder: *holder,
                    recipient: wallet,
                    amount: *amount,
                    block: plan.block,
                }),
                (None, true) => {
                    return Err(PlanError::MissingHolder {
                        index: plan.index,
                        name: plan.name.clone(),
                        token: *token,
                    })
                }
                (None, false) => {
                    let (index, name) = (plan.index, &plan.name);
                    warn!(index, %name, %token, "no holder registered for input token");
                }
                (Some(_), false) => {}
            }
        }
        Ok(steps)
    }

    /// Plan one shortcut.
    ///
    /// Steps are, in order: pre-execution probes (tracked address major,
    /// then inputs, outputs and dust), funding transfers, the execution, and
    /// post-execution probes in the same order as the pre-execution ones.
    pub fn plan(
        &self,
        index: usize,
        sim: &ShortcutToSimulate,
        built: &BuiltShortcut,
    ) -> Result<ShortcutPlan, PlanError> {
        let mut plan = self.skeleton(index, sim, built)?;
        let funding = self.funding(&plan)?;
        let probes = self.probes(&plan);

        let mut steps = Vec::with_capacity(probes.len() * 2 + funding.len() + 1);
        steps.extend(probes.iter().copied().map(SimulationStep::BalancePre));
        steps.extend(funding.into_iter().map(SimulationStep::Funding));
        steps.push(SimulationStep::Execute(ExecuteStep {
            caller: self.roles.caller,
            callee: self.roles.callee(),
            calldata: plan.calldata.clone(),
            value: plan.value,
            block: plan.block,
        }));
        steps.extend(probes.into_iter().map(SimulationStep::BalancePost));

        plan.steps = steps;
        Ok(plan)
    }

    /// A plan with no steps, recording why the shortcut was skipped.
    pub fn skipped(
        &self,
        index: usize,
        sim: &ShortcutToSimulate,
        built: &BuiltShortcut,
        reason: PlanError,
    ) -> Result<ShortcutPlan, PlanError> {
        let mut plan = self.skeleton(index, sim, built)?;
        plan.skipped = Some(reason);
        Ok(plan)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use alloy::{primitives::B256, sol_types::SolCall};
    use proptest::prelude::*;
    use shortcut_constants::{test_utils, NATIVE_TOKEN_ADDRESS};
    use shortcut_types::WeirollScript;

    const WALLET: Address = Address::repeat_byte(0xbb);

    fn roles() -> SimulationRoles {
        SimulationRoles::from(test_utils::ROLES).bound(WALLET).unwrap()
    }

    fn approve(token: Address) -> B256 {
        let mut word = [0xffu8; 32];
        word[..4].copy_from_slice(&shortcut_bindings::IERC20::approveCall::SELECTOR);
        word[4] = 0x01;
        word[12..].copy_from_slice(token.as_slice());
        B256::from(word)
    }

    fn deposit() -> BuiltShortcut {
        BuiltShortcut::new(
            WeirollScript::new(vec![approve(test_utils::WRAPPED_NATIVE)], vec![]),
            vec![test_utils::WRAPPED_NATIVE],
            vec![test_utils::VAULT],
        )
    }

    #[test]
    fn step_order_with_probes() {
        let roles = roles();
        let planner = Planner::new(&roles, test_utils::HOLDERS, true);
        let sim = ShortcutToSimulate::new("deposit", vec![U256::from(10)]).with_funding();
        let plan = planner.plan(0, &sim, &deposit()).unwrap();

        assert_eq!(plan.tracked, vec![test_utils::CALLER, WALLET]);
        assert_eq!(plan.dust, vec![test_utils::WRAPPED_NATIVE]);
        assert_eq!(plan.token_count(), 3);
        assert_eq!(plan.probe_count(), 6);
        assert_eq!(plan.steps.len(), 6 + 1 + 1 + 6);

        let kinds: Vec<_> = plan
            .steps
            .iter()
            .map(|s| match s {
                SimulationStep::BalancePre(_) => 0,
                SimulationStep::Funding(_) => 1,
                SimulationStep::Execute(_) => 2,
                SimulationStep::BalancePost(_) => 3,
            })
            .collect();
        assert!(kinds.windows(2).all(|w| w[0] <= w[1]));

        let SimulationStep::BalancePre(first) = plan.steps[0] else { panic!("probe first") };
        assert_eq!(
            (first.tracked, first.token, first.kind),
            (test_utils::CALLER, test_utils::WRAPPED_NATIVE, ReportKind::Base)
        );
        let SimulationStep::BalancePre(fourth) = plan.steps[3] else { panic!("probe") };
        assert_eq!((fourth.tracked, fourth.token), (WALLET, test_utils::WRAPPED_NATIVE));
        assert_eq!(plan.probe_offset(1, 0), 3);

        let SimulationStep::Funding(funding) = plan.steps[6] else { panic!("funding") };
        assert_eq!(funding.holder, test_utils::WRAPPED_NATIVE_HOLDER);
        assert_eq!(funding.recipient, WALLET);
        assert_eq!(funding.amount, U256::from(10));

        let execute = plan.execute().unwrap();
        assert_eq!(execute.callee, test_utils::RECIPE_MARKET_HUB);
        assert_eq!(execute.value, U256::ZERO);
    }

    #[test]
    fn no_probes_for_forge() {
        let roles = roles();
        let planner = Planner::new(&roles, test_utils::HOLDERS, false);
        let sim = ShortcutToSimulate::new("deposit", vec![U256::from(1)]);
        let plan = planner.plan(0, &sim, &deposit()).unwrap();
        assert_eq!(plan.steps.len(), 1);
        assert!(plan.steps[0].is_execute());
    }

    #[test]
    fn native_value_and_probe_routing() {
        let roles = roles();
        let planner = Planner::new(&roles, test_utils::HOLDERS, true);
        let built = BuiltShortcut::new(
            WeirollScript::default(),
            vec![NATIVE_TOKEN_ADDRESS],
            vec![test_utils::WRAPPED_NATIVE],
        );
        let sim = ShortcutToSimulate::new("wrap", vec![U256::from(5)]).with_funding();
        let plan = planner.plan(0, &sim, &built).unwrap();

        assert_eq!(plan.value, U256::from(5));
        assert!(!plan.steps.iter().any(|s| matches!(s, SimulationStep::Funding(_))));

        let SimulationStep::BalancePre(native) = plan.steps[0] else { panic!("probe") };
        assert!(native.native);
        assert_eq!(native.target(&roles), test_utils::WALLET_HELPER);
        let SimulationStep::BalancePre(erc20) = plan.steps[1] else { panic!("probe") };
        assert_eq!(erc20.target(&roles), test_utils::WRAPPED_NATIVE);
        assert_eq!(
            erc20.calldata(),
            Bytes::from(
                shortcut_bindings::IERC20::balanceOfCall { account: test_utils::CALLER }
                    .abi_encode()
            )
        );
    }

    #[test]
    fn missing_native_amount() {
        let roles = roles();
        let planner = Planner::new(&roles, test_utils::HOLDERS, true);
        let built =
            BuiltShortcut::new(WeirollScript::default(), vec![NATIVE_TOKEN_ADDRESS], vec![]);
        let sim = ShortcutToSimulate::new("wrap", vec![U256::ZERO]);
        assert!(matches!(
            planner.plan(3, &sim, &built),
            Err(PlanError::MissingNativeAmount { index: 3, .. })
        ));
    }

    #[test]
    fn missing_holder() {
        let roles = roles();
        let planner = Planner::new(&roles, test_utils::HOLDERS, true);
        let built =
            BuiltShortcut::new(WeirollScript::default(), vec![test_utils::UNFUNDED], vec![]);

        let funded = ShortcutToSimulate::new("x", vec![U256::from(1)]).with_funding();
        let err = planner.plan(0, &funded, &built).unwrap_err();
        assert_eq!(
            err,
            PlanError::MissingHolder { index: 0, name: "x".to_owned(), token: test_utils::UNFUNDED }
        );

        let skipped = planner.skipped(0, &funded, &built, err).unwrap();
        assert!(skipped.is_skipped());
        assert!(skipped.steps.is_empty());
        assert_eq!(skipped.holders_or_zero(), vec![Address::ZERO]);

        // Tolerated when funding is not requested.
        let unfunded = ShortcutToSimulate::new("x", vec![U256::from(1)]);
        assert!(planner.plan(0, &unfunded, &built).is_ok());
    }

    #[test]
    fn unbound_wallet() {
        let roles = SimulationRoles::from(test_utils::ROLES);
        let planner = Planner::new(&roles, test_utils::HOLDERS, true);
        let sim = ShortcutToSimulate::new("deposit", vec![U256::from(1)]);
        assert!(matches!(planner.plan(0, &sim, &deposit()), Err(PlanError::Roles(_))));
    }

    fn token() -> impl Strategy<Value = Address> {
        (0x60u8..0x70).prop_map(Address::repeat_byte)
    }

    fn address() -> impl Strategy<Value = Address> {
        any::<[u8; 20]>().prop_map(Address::from)
    }

    proptest! {
        #[test]
        fn probe_layout(
            tokens_in in proptest::collection::vec(token(), 0..3),
            tokens_out in proptest::collection::vec(token(), 0..3),
            approvals in proptest::collection::vec(token(), 0..4),
            extra in proptest::collection::btree_set(address(), 0..3),
        ) {
            let roles = roles();
            let planner = Planner::new(&roles, test_utils::HOLDERS, true);
            let built = BuiltShortcut::new(
                WeirollScript::new(approvals.iter().copied().map(approve).collect(), vec![]),
                tokens_in.clone(),
                tokens_out.clone(),
            );
            let mut sim = ShortcutToSimulate::new("p", vec![U256::from(1); tokens_in.len()]);
            sim.tracked_addresses = Some(extra);
            let plan = planner.plan(0, &sim, &built).unwrap();

            for dust in &plan.dust {
                prop_assert!(!tokens_out.contains(dust));
            }
            prop_assert_eq!(plan.tracked[0], test_utils::CALLER);
            prop_assert_eq!(plan.tracked[1], WALLET);

            let pre: Vec<_> = plan.steps.iter().filter_map(|s| match s {
                SimulationStep::BalancePre(p) => Some(*p),
                _ => None,
            }).collect();
            let post: Vec<_> = plan.steps.iter().filter_map(|s| match s {
                SimulationStep::BalancePost(p) => Some(*p),
                _ => None,
            }).collect();
            prop_assert_eq!(pre.len(), plan.probe_count());
            prop_assert_eq!(&pre, &post);

            let tokens: Vec<_> = plan.probe_tokens().collect();
            for (t, tracked) in plan.tracked.iter().enumerate() {
                for (j, (kind, token)) in tokens.iter().enumerate() {
                    let probe = pre[plan.probe_offset(t, j)];
                    prop_assert_eq!(probe.tracked, *tracked);
                    prop_assert_eq!(probe.token, *token);
                    prop_assert_eq!(probe.kind, *kind);
                }
            }
        }
    }
}
