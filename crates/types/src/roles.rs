use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use shortcut_constants::ChainRoles;
use std::collections::BTreeMap;

/// Errors binding the batch-scoped roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RolesError {
    /// The execution wallet was already bound for this batch.
    #[error("weiroll wallet already bound to {0}")]
    AlreadyBound(Address),
    /// The execution wallet was read before being bound.
    #[error("weiroll wallet not bound")]
    Unbound,
}

/// The participants of one simulated batch.
///
/// Built from a chain's [`ChainRoles`]. The execution wallet and the callee
/// are bound once per batch, after the wallet-creation probe, and are
/// read-only afterwards. Each batch owns its own value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRoles {
    /// The account submitting shortcut executions.
    pub caller: Address,
    /// The recipe market hub.
    pub recipe_market_hub: Address,
    /// Helper contract used to read native balances.
    pub wallet_helper: Address,
    /// Multicall contract.
    pub multi_call: Address,
    /// Native-token sentinel.
    pub native_token: Address,
    /// Sender for balance probes.
    pub probe_sender: Address,
    /// Ephemeral execution wallet.
    weiroll_wallet: Option<Address>,
    /// Target of the execution call.
    callee: Address,
}

impl From<ChainRoles> for SimulationRoles {
    fn from(roles: ChainRoles) -> Self {
        Self {
            caller: roles.caller(),
            recipe_market_hub: roles.recipe_market_hub(),
            wallet_helper: roles.wallet_helper(),
            multi_call: roles.multi_call(),
            native_token: roles.native_token(),
            probe_sender: roles.probe_sender(),
            weiroll_wallet: None,
            callee: roles.recipe_market_hub(),
        }
    }
}

impl SimulationRoles {
    /// Bind the execution wallet and, optionally, a callee other than the
    /// recipe market hub.
    pub fn bind(&mut self, wallet: Address, callee: Option<Address>) -> Result<(), RolesError> {
        if let Some(bound) = self.weiroll_wallet {
            return Err(RolesError::AlreadyBound(bound));
        }
        self.weiroll_wallet = Some(wallet);
        if let Some(callee) = callee {
            self.callee = callee;
        }
        Ok(())
    }

    /// Builder-style [`Self::bind`] for roles that are known to be unbound.
    pub fn bound(mut self, wallet: Address) -> Result<Self, RolesError> {
        self.bind(wallet, None)?;
        Ok(self)
    }

    /// True once the execution wallet is bound.
    pub const fn is_bound(&self) -> bool {
        self.weiroll_wallet.is_some()
    }

    /// Get the execution wallet.
    pub fn weiroll_wallet(&self) -> Result<Address, RolesError> {
        self.weiroll_wallet.ok_or(RolesError::Unbound)
    }

    /// Get the callee of the execution call.
    pub const fn callee(&self) -> Address {
        self.callee
    }

    /// Human-readable labels for the roles.
    pub fn labels(&self) -> BTreeMap<Address, String> {
        let mut labels: BTreeMap<Address, String> = [
            (self.caller, "Caller"),
            (self.recipe_market_hub, "RecipeMarketHub"),
            (self.wallet_helper, "WalletHelper"),
            (self.multi_call, "MultiCall"),
            (self.native_token, "NativeToken"),
            (self.probe_sender, "ProbeSender"),
        ]
        .into_iter()
        .map(|(address, label)| (address, label.to_owned()))
        .collect();

        if let Some(wallet) = self.weiroll_wallet {
            labels.insert(wallet, "WeirollWallet".to_owned());
        }
        labels.entry(self.callee).or_insert_with(|| "Callee".to_owned());
        labels
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use shortcut_constants::test_utils;

    #[test]
    fn callee_defaults_to_hub() {
        let roles = SimulationRoles::from(test_utils::ROLES);
        assert_eq!(roles.callee(), test_utils::RECIPE_MARKET_HUB);
        assert_eq!(roles.weiroll_wallet(), Err(RolesError::Unbound));
    }

    #[test]
    fn bind_once() {
        let wallet = Address::repeat_byte(0xbb);
        let mut roles = SimulationRoles::from(test_utils::ROLES);
        roles.bind(wallet, None).unwrap();
        assert_eq!(roles.weiroll_wallet(), Ok(wallet));
        assert_eq!(roles.bind(Address::ZERO, None), Err(RolesError::AlreadyBound(wallet)));
        assert_eq!(roles.weiroll_wallet(), Ok(wallet));
    }

    #[test]
    fn bind_with_callee() {
        let mut roles = SimulationRoles::from(test_utils::ROLES);
        roles.bind(Address::repeat_byte(0xbb), Some(Address::repeat_byte(0xcc))).unwrap();
        assert_eq!(roles.callee(), Address::repeat_byte(0xcc));
        assert_eq!(
            roles.labels().get(&Address::repeat_byte(0xcc)).map(String::as_str),
            Some("Callee")
        );
        assert_eq!(
            roles.labels().get(&Address::repeat_byte(0xbb)).map(String::as_str),
            Some("WeirollWallet")
        );
    }
}
