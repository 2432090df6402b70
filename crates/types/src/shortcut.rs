use crate::BlockContext;
use alloy::primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};
use shortcut_bindings::{encode_execute, WeirollCommands};
use std::collections::BTreeSet;

/// One financial operation to simulate.
///
/// Created by the caller of the engine, one per shortcut, and never modified
/// once submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortcutToSimulate {
    /// Name of the shortcut, echoed in the report.
    pub name: String,
    /// Input amounts, parallel to the built shortcut's `tokensIn`.
    pub amounts_in: Vec<U256>,
    /// Whether non-native input tokens must be transferred to the wallet
    /// before execution.
    #[serde(default)]
    pub requires_funding: bool,
    /// Block to simulate at. Latest when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
    /// Timestamp override for the simulated block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_timestamp: Option<u64>,
    /// Extra addresses whose balances are diffed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracked_addresses: Option<BTreeSet<Address>>,
}

impl ShortcutToSimulate {
    /// Create a new shortcut to simulate with the given input amounts.
    pub fn new(name: impl Into<String>, amounts_in: Vec<U256>) -> Self {
        Self {
            name: name.into(),
            amounts_in,
            requires_funding: false,
            block_number: None,
            block_timestamp: None,
            tracked_addresses: None,
        }
    }

    /// Require funding of the input tokens.
    pub const fn with_funding(mut self) -> Self {
        self.requires_funding = true;
        self
    }

    /// Simulate at a specific block.
    pub const fn at_block(mut self, number: u64, timestamp: Option<u64>) -> Self {
        self.block_number = Some(number);
        self.block_timestamp = timestamp;
        self
    }

    /// Track an additional address.
    pub fn tracking(mut self, address: Address) -> Self {
        self.tracked_addresses.get_or_insert_with(Default::default).insert(address);
        self
    }

    /// The block context of the shortcut.
    pub const fn block(&self) -> BlockContext {
        BlockContext::new(self.block_number, self.block_timestamp)
    }

    /// The input amounts as decimal strings.
    pub fn amounts_in_strings(&self) -> Vec<String> {
        self.amounts_in.iter().map(ToString::to_string).collect()
    }
}

/// A weiroll script: an ordered list of packed commands and the state they
/// operate on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeirollScript {
    /// Packed command words.
    pub commands: Vec<B256>,
    /// State slots.
    pub state: Vec<Bytes>,
}

impl WeirollScript {
    /// Create a new script.
    pub const fn new(commands: Vec<B256>, state: Vec<Bytes>) -> Self {
        Self { commands, state }
    }

    /// Iterate over the script's calls.
    pub fn calls(&self) -> WeirollCommands<'_> {
        WeirollCommands::new(&self.commands)
    }

    /// The calldata used to invoke the executor with this script.
    pub fn calldata(&self) -> Bytes {
        encode_execute(&self.commands, &self.state)
    }
}

/// Token metadata of a built shortcut.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortcutMetadata {
    /// Tokens consumed, parallel to the simulation's `amountsIn`.
    pub tokens_in: Vec<Address>,
    /// Tokens produced.
    pub tokens_out: Vec<Address>,
}

/// A shortcut as produced by the script-building collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuiltShortcut {
    /// The weiroll script.
    pub script: WeirollScript,
    /// Token metadata.
    pub metadata: ShortcutMetadata,
}

impl BuiltShortcut {
    /// Create a new built shortcut.
    pub const fn new(
        script: WeirollScript,
        tokens_in: Vec<Address>,
        tokens_out: Vec<Address>,
    ) -> Self {
        Self { script, metadata: ShortcutMetadata { tokens_in, tokens_out } }
    }

    /// Tokens consumed.
    pub fn tokens_in(&self) -> &[Address] {
        &self.metadata.tokens_in
    }

    /// Tokens produced.
    pub fn tokens_out(&self) -> &[Address] {
        &self.metadata.tokens_out
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn shortcut_builder() {
        let sim = ShortcutToSimulate::new("deposit", vec![U256::from(5)])
            .with_funding()
            .at_block(10, Some(20))
            .tracking(Address::repeat_byte(1))
            .tracking(Address::repeat_byte(1));
        assert!(sim.requires_funding);
        assert_eq!(sim.block(), BlockContext::new(Some(10), Some(20)));
        assert_eq!(sim.tracked_addresses.as_ref().unwrap().len(), 1);
        assert_eq!(sim.amounts_in_strings(), vec!["5".to_owned()]);
    }

    #[test]
    fn shortcut_serde_defaults() {
        let json = r#"{"name":"redeem","amountsIn":["0x64"]}"#;
        let sim: ShortcutToSimulate = serde_json::from_str(json).unwrap();
        assert_eq!(sim.amounts_in, vec![U256::from(100)]);
        assert!(!sim.requires_funding);
        assert!(sim.block_number.is_none());
        assert!(sim.tracked_addresses.is_none());
    }
}
