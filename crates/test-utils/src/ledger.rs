use crate::test_constants;
use alloy::{
    primitives::{Address, Bytes, U256},
    sol_types::{SolCall, SolValue},
    transports::{TransportErrorKind, TransportResult},
};
use shortcut_bindings::{encode_create_wallet, IERC20, IRecipeMarketHub, IWeirollWalletHelper};
use shortcut_bundle_api::{
    BundleApiError, BundleRequest, BundleResponse, BundleTransport, SimulationRequest,
    SimulationResult,
};
use shortcut_constants::{ChainRoles, NATIVE_TOKEN_ADDRESS};
use shortcut_sim::ChainReader;
use tracing::debug;
use std::{
    collections::{BTreeMap, HashMap},
    sync::{Arc, Mutex, MutexGuard},
};

/// Gas charged for a balance probe.
pub const PROBE_GAS: u64 = 25_000;
/// Gas charged for a funding transfer.
pub const TRANSFER_GAS: u64 = 50_000;

/// A token movement applied by an execution. Moves from the zero address
/// mint, moves to it burn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transfer {
    pub token: Address,
    pub from: Address,
    pub to: Address,
    pub amount: U256,
}

impl Transfer {
    pub const fn new(token: Address, from: Address, to: Address, amount: U256) -> Self {
        Self { token, from, to, amount }
    }
}

/// What executing one shortcut does to the ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Effect {
    pub transfers: Vec<Transfer>,
    pub gas_used: u64,
}

#[derive(Debug, Clone, Default)]
struct Balances(BTreeMap<(Address, Address), U256>);

impl Balances {
    fn of(&self, token: Address, account: Address) -> U256 {
        self.0.get(&(token, account)).copied().unwrap_or_default()
    }

    fn set(&mut self, token: Address, account: Address, amount: U256) {
        self.0.insert((token, account), amount);
    }

    fn apply(&mut self, transfer: &Transfer) -> Result<(), String> {
        let Transfer { token, from, to, amount } = *transfer;
        if !from.is_zero() {
            let balance = self.of(token, from);
            if balance < amount {
                return Err(format!("insufficient balance of {token} for {from}"));
            }
            self.set(token, from, balance - amount);
        }
        if !to.is_zero() {
            let balance = self.of(token, to);
            self.set(token, to, balance + amount);
        }
        Ok(())
    }

    /// Apply all transfers or none.
    fn apply_all(&mut self, transfers: &[Transfer]) -> Result<(), String> {
        let mut next = self.clone();
        for transfer in transfers {
            next.apply(transfer)?;
        }
        *self = next;
        Ok(())
    }
}

#[derive(Debug, Default)]
struct Inner {
    genesis: Balances,
    nonces: BTreeMap<Address, u64>,
    effects: HashMap<Bytes, Effect>,
    bundles: Vec<BundleRequest>,
    reads: usize,
    unreachable: bool,
}

/// An in-memory chain serving both wallet-creation reads and bundle
/// simulations.
///
/// Every bundle starts from the same genesis balances and runs its requests
/// in order against one evolving state. Executions are resolved by calldata
/// against registered [`Effect`]s.
#[derive(Debug, Clone)]
pub struct MockChain {
    inner: Arc<Mutex<Inner>>,
    roles: ChainRoles,
    wallet: Address,
}

impl MockChain {
    /// Create an empty chain using the test roles. `wallet` is the address
    /// the wallet factory returns.
    pub fn new(wallet: Address) -> Self {
        Self { inner: Default::default(), roles: test_constants::ROLES, wallet }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap()
    }

    /// Set a genesis balance.
    pub fn with_balance(self, token: Address, account: Address, amount: U256) -> Self {
        self.lock().genesis.set(token, account, amount);
        self
    }

    /// Set an account's transaction count.
    pub fn with_nonce(self, account: Address, nonce: u64) -> Self {
        self.lock().nonces.insert(account, nonce);
        self
    }

    /// Register what executing `calldata` does.
    pub fn with_effect(self, calldata: Bytes, effect: Effect) -> Self {
        self.lock().effects.insert(calldata, effect);
        self
    }

    /// Make every chain read fail.
    pub fn unreachable(self) -> Self {
        self.lock().unreachable = true;
        self
    }

    /// The wallet the factory returns.
    pub const fn wallet(&self) -> Address {
        self.wallet
    }

    /// Bundles submitted so far.
    pub fn bundles(&self) -> Vec<BundleRequest> {
        self.lock().bundles.clone()
    }

    /// Chain reads served so far.
    pub fn reads(&self) -> usize {
        self.lock().reads
    }

    /// Run a bundle without recording it.
    pub fn simulate(&self, bundle: &BundleRequest) -> BundleResponse {
        debug!(requests = bundle.len(), "simulating bundle on mock chain");
        let inner = self.lock();
        let mut state = inner.genesis.clone();
        let results =
            bundle.simulations.iter().map(|request| inner.step(&self.roles, &mut state, request));
        BundleResponse::new(results.collect())
    }
}

impl Inner {
    fn step(
        &self,
        roles: &ChainRoles,
        state: &mut Balances,
        request: &SimulationRequest,
    ) -> SimulationResult {
        let selector = request.input.get(..4).unwrap_or_default();

        if selector == IERC20::balanceOfCall::SELECTOR {
            return match IERC20::balanceOfCall::abi_decode(&request.input) {
                Ok(call) => SimulationResult::success(
                    state.of(request.to, call.account).abi_encode().into(),
                    PROBE_GAS,
                ),
                Err(e) => SimulationResult::failure(e.to_string(), PROBE_GAS),
            };
        }

        if selector == IWeirollWalletHelper::nativeBalanceCall::SELECTOR
            && request.to == roles.wallet_helper()
        {
            return match IWeirollWalletHelper::nativeBalanceCall::abi_decode(&request.input) {
                Ok(call) => SimulationResult::success(
                    state.of(NATIVE_TOKEN_ADDRESS, call.account).abi_encode().into(),
                    PROBE_GAS,
                ),
                Err(e) => SimulationResult::failure(e.to_string(), PROBE_GAS),
            };
        }

        if selector == IERC20::transferCall::SELECTOR {
            let transfer = IERC20::transferCall::abi_decode(&request.input)
                .map_err(|e| e.to_string())
                .map(|call| Transfer::new(request.to, request.from, call.to, call.amount));
            return match transfer.and_then(|t| state.apply(&t)) {
                Ok(()) => SimulationResult::success(true.abi_encode().into(), TRANSFER_GAS),
                Err(e) => SimulationResult::failure(e, TRANSFER_GAS),
            };
        }

        if selector == IRecipeMarketHub::executeWeirollCall::SELECTOR {
            let Some(effect) = self.effects.get(&request.input) else {
                return SimulationResult::failure("execution reverted", 30_000);
            };
            if let Some(balance) =
                request.state_objects.get(&request.from).and_then(|state| state.balance)
            {
                state.set(NATIVE_TOKEN_ADDRESS, request.from, balance);
            }
            let mut transfers = Vec::with_capacity(effect.transfers.len() + 1);
            if !request.value.is_zero() {
                transfers.push(Transfer::new(
                    NATIVE_TOKEN_ADDRESS,
                    request.from,
                    request.to,
                    request.value,
                ));
            }
            transfers.extend_from_slice(&effect.transfers);
            return match state.apply_all(&transfers) {
                Ok(()) => SimulationResult::success(Bytes::new(), effect.gas_used),
                Err(e) => SimulationResult::failure(e, effect.gas_used),
            };
        }

        SimulationResult::failure("unsupported call", 21_000)
    }
}

impl MockChain {
    /// Count a chain read, failing if the chain is unreachable.
    fn serve_read(&self) -> TransportResult<MutexGuard<'_, Inner>> {
        let mut inner = self.lock();
        inner.reads += 1;
        if inner.unreachable {
            return Err(TransportErrorKind::custom_str("mock chain unreachable"));
        }
        Ok(inner)
    }
}

impl ChainReader for MockChain {
    async fn read(
        &self,
        _from: Address,
        to: Address,
        data: Bytes,
        _block: Option<u64>,
    ) -> TransportResult<Bytes> {
        self.serve_read()?;
        if to == self.roles.recipe_market_hub() && data == encode_create_wallet() {
            return Ok(self.wallet.abi_encode().into());
        }
        Err(TransportErrorKind::custom_str("unsupported read"))
    }

    async fn transaction_count(
        &self,
        address: Address,
        _block: Option<u64>,
    ) -> TransportResult<u64> {
        Ok(self.serve_read()?.nonces.get(&address).copied().unwrap_or_default())
    }

    async fn balance(&self, address: Address, _block: Option<u64>) -> TransportResult<U256> {
        Ok(self.serve_read()?.genesis.of(NATIVE_TOKEN_ADDRESS, address))
    }
}

impl BundleTransport for MockChain {
    async fn simulate_bundle(
        &self,
        bundle: BundleRequest,
    ) -> Result<BundleResponse, BundleApiError> {
        let response = self.simulate(&bundle);
        self.lock().bundles.push(bundle);
        Ok(response)
    }
}
