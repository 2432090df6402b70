use alloy::primitives::Address;

/// An address that holds enough of a token to fund a simulation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct TokenHolder {
    /// The token.
    token: Address,
    /// The account transferring the token.
    holder: Address,
}

impl TokenHolder {
    /// Create a new token holder record.
    pub const fn new(token: Address, holder: Address) -> Self {
        Self { token, holder }
    }

    /// Get the token.
    pub const fn token(&self) -> Address {
        self.token
    }

    /// Get the holder.
    pub const fn holder(&self) -> Address {
        self.holder
    }
}

/// The registered funding sources of a chain.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TokenHolders(&'static [TokenHolder]);

impl TokenHolders {
    /// Create a new registry from a static list of holders.
    pub const fn new(holders: &'static [TokenHolder]) -> Self {
        Self(holders)
    }

    /// An empty registry.
    pub const fn empty() -> Self {
        Self(&[])
    }

    /// Get the holder for `token`, if one is registered.
    pub const fn holder_for(&self, token: Address) -> Option<Address> {
        let mut i = 0;
        while i < self.0.len() {
            if self.0[i].token.const_eq(&token) {
                return Some(self.0[i].holder);
            }
            i += 1;
        }
        None
    }

    /// True if a holder is registered for `token`.
    pub const fn has_holder(&self, token: Address) -> bool {
        self.holder_for(token).is_some()
    }

    /// Iterate over the registered holders.
    pub fn iter(&self) -> impl Iterator<Item = &'static TokenHolder> {
        self.0.iter()
    }

    /// Get the number of registered holders.
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// True if no holders are registered.
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
