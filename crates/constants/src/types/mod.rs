mod chains;
pub use chains::{KnownChains, ParseChainError};

mod holders;
pub use holders::{TokenHolder, TokenHolders};

mod roles;
pub use roles::ChainRoles;

use alloy::primitives::Address;
use std::{collections::BTreeMap, str::FromStr};

/// Simulation constants for a single chain.
///
/// This struct bundles the fixed simulation participants of a chain with the
/// addresses used to fund input tokens before a shortcut executes. It is
/// immutable and shared by every batch simulated on the chain.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ChainConstants {
    /// Chain ID.
    chain_id: u64,
    /// Human-readable chain name.
    name: &'static str,
    /// Well-known simulation participants.
    roles: ChainRoles,
    /// Funding sources for input tokens.
    holders: TokenHolders,
}

impl ChainConstants {
    /// Create a new set of chain constants.
    pub const fn new(
        chain_id: u64,
        name: &'static str,
        roles: ChainRoles,
        holders: TokenHolders,
    ) -> Self {
        Self { chain_id, name, roles, holders }
    }

    /// Get the hard-coded Ethereum mainnet constants.
    pub const fn mainnet() -> Self {
        crate::chains::mainnet::MAINNET
    }

    /// Get the hard-coded Sonic constants.
    pub const fn sonic() -> Self {
        crate::chains::sonic::SONIC
    }

    /// Get the hard-coded local test constants.
    #[cfg(any(test, feature = "test-utils"))]
    pub const fn test() -> Self {
        crate::chains::test_utils::TEST
    }

    /// Look up the constants for a chain ID.
    pub fn for_chain_id(chain_id: u64) -> Option<Self> {
        KnownChains::from_chain_id(chain_id).map(Self::from)
    }

    /// Get the chain ID.
    pub const fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Get the chain name.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Get the simulation roles.
    pub const fn roles(&self) -> ChainRoles {
        self.roles
    }

    /// Get the token holders.
    pub const fn holders(&self) -> TokenHolders {
        self.holders
    }

    /// Get the native-token sentinel for this chain.
    pub const fn native_token(&self) -> Address {
        self.roles.native_token()
    }

    /// Get the funding source for `token`, if one is registered.
    pub fn holder_for(&self, token: Address) -> Option<Address> {
        self.holders.holder_for(token)
    }

    /// Human-readable labels for the chain's fixed addresses.
    pub fn labels(&self) -> BTreeMap<Address, String> {
        let mut labels = self.roles.labels();
        for holder in self.holders.iter() {
            labels.entry(holder.holder()).or_insert_with(|| "TokenHolder".to_owned());
        }
        labels
    }
}

impl From<KnownChains> for ChainConstants {
    fn from(chain: KnownChains) -> Self {
        match chain {
            KnownChains::Mainnet => Self::mainnet(),
            KnownChains::Sonic => Self::sonic(),
            #[cfg(any(test, feature = "test-utils"))]
            KnownChains::Test => Self::test(),
        }
    }
}

impl FromStr for ChainConstants {
    type Err = ParseChainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<KnownChains>().map(Self::from)
    }
}
