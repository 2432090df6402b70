use alloy::primitives::Address;
use std::collections::BTreeMap;

/// Well-known participants of a shortcut simulation on one chain.
///
/// These addresses are fixed per chain. The ephemeral execution wallet and
/// the callee are batch-scoped and live on `SimulationRoles` in
/// `shortcut-types`, which is built from this record.
#[derive(Debug, Copy, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainRoles {
    /// The account that submits the shortcut execution.
    caller: Address,
    /// The recipe market hub, which executes weiroll scripts through an
    /// ephemeral wallet.
    recipe_market_hub: Address,
    /// Helper contract used to read native balances.
    wallet_helper: Address,
    /// Multicall contract.
    multi_call: Address,
    /// Native-token sentinel.
    native_token: Address,
    /// Sender for balance probes. Never the caller.
    probe_sender: Address,
}

impl std::fmt::Display for ChainRoles {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ caller: {}, recipeMarketHub: {}, walletHelper: {}, multiCall: {} }}",
            self.caller, self.recipe_market_hub, self.wallet_helper, self.multi_call
        )
    }
}

impl ChainRoles {
    /// Create a new set of roles.
    pub const fn new(
        caller: Address,
        recipe_market_hub: Address,
        wallet_helper: Address,
        multi_call: Address,
        native_token: Address,
        probe_sender: Address,
    ) -> Self {
        Self { caller, recipe_market_hub, wallet_helper, multi_call, native_token, probe_sender }
    }

    /// Get the caller address.
    pub const fn caller(&self) -> Address {
        self.caller
    }

    /// Get the recipe market hub address.
    pub const fn recipe_market_hub(&self) -> Address {
        self.recipe_market_hub
    }

    /// Get the wallet helper address.
    pub const fn wallet_helper(&self) -> Address {
        self.wallet_helper
    }

    /// Get the multicall address.
    pub const fn multi_call(&self) -> Address {
        self.multi_call
    }

    /// Get the native-token sentinel.
    pub const fn native_token(&self) -> Address {
        self.native_token
    }

    /// Get the balance probe sender.
    pub const fn probe_sender(&self) -> Address {
        self.probe_sender
    }

    /// True if the address is one of the fixed roles.
    pub const fn const_is_role(&self, address: Address) -> bool {
        address.const_eq(&self.caller)
            || address.const_eq(&self.recipe_market_hub)
            || address.const_eq(&self.wallet_helper)
            || address.const_eq(&self.multi_call)
    }

    /// Human-readable labels for the roles.
    pub fn labels(&self) -> BTreeMap<Address, String> {
        [
            (self.caller, "Caller"),
            (self.recipe_market_hub, "RecipeMarketHub"),
            (self.wallet_helper, "WalletHelper"),
            (self.multi_call, "MultiCall"),
            (self.native_token, "NativeToken"),
            (self.probe_sender, "ProbeSender"),
        ]
        .into_iter()
        .map(|(address, label)| (address, label.to_owned()))
        .collect()
    }
}
