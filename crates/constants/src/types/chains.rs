use std::str::FromStr;

/// The list of known chains as a string.
const KNOWN_CHAINS: &str = "mainnet, sonic, test";

/// Error type for parsing struct from a chain name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseChainError {
    /// The chain name is not supported.
    #[error("chain name {0} is not parseable. supported chains: {KNOWN_CHAINS}")]
    ChainNotSupported(String),
}

/// Chains with hard-coded simulation constants.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KnownChains {
    /// Ethereum mainnet.
    Mainnet,
    /// Sonic mainnet.
    Sonic,
    /// Test chain.
    #[cfg(any(test, feature = "test-utils"))]
    Test,
}

impl KnownChains {
    /// Look up a known chain by its chain ID.
    pub const fn from_chain_id(chain_id: u64) -> Option<Self> {
        match chain_id {
            crate::mainnet::CHAIN_ID => Some(Self::Mainnet),
            crate::sonic::CHAIN_ID => Some(Self::Sonic),
            #[cfg(any(test, feature = "test-utils"))]
            crate::test_utils::CHAIN_ID => Some(Self::Test),
            _ => None,
        }
    }

    /// The lowercase name of the chain, as accepted by [`FromStr`].
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Sonic => "sonic",
            #[cfg(any(test, feature = "test-utils"))]
            Self::Test => "test",
        }
    }
}

impl FromStr for KnownChains {
    type Err = ParseChainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "mainnet" | "ethereum" => Ok(Self::Mainnet),
            "sonic" => Ok(Self::Sonic),
            #[cfg(any(test, feature = "test-utils"))]
            "test" => Ok(Self::Test),
            _ => Err(ParseChainError::ChainNotSupported(s)),
        }
    }
}

impl std::fmt::Display for KnownChains {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
