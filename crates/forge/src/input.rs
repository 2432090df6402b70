use crate::ForgeError;
use alloy::primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};
use shortcut_types::SimulationRoles;
use std::collections::BTreeMap;

/// One shortcut of a fork-test batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForgeShortcut {
    /// Shortcut name.
    pub name: String,
    /// Block to fork at. Latest when absent.
    pub block_number: Option<u64>,
    /// Timestamp to warp to.
    pub block_timestamp: Option<u64>,
    /// Executor calldata.
    pub tx_data: Bytes,
    /// Value sent with the execution.
    pub tx_value: U256,
    /// Input tokens.
    pub tokens_in: Vec<Address>,
    /// Funding source per input token. Zero when none is registered.
    pub tokens_in_holders: Vec<Address>,
    /// Input amounts, parallel to `tokens_in`.
    pub amounts_in: Vec<U256>,
    /// Whether input tokens are transferred to the wallet first.
    pub requires_funding: bool,
    /// Output tokens.
    pub tokens_out: Vec<Address>,
    /// Dust tokens.
    pub tokens_dust: Vec<Address>,
    /// Addresses whose balances are diffed.
    pub tracked_addresses: Vec<Address>,
}

/// A whole fork-test batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForgeInput {
    /// RPC URL the harness forks from.
    pub rpc_url: String,
    /// The batch's roles, with the execution wallet bound.
    pub roles: SimulationRoles,
    /// Extra address labels for traces.
    pub labels: BTreeMap<Address, String>,
    /// The shortcuts, in execution order.
    pub shortcuts: Vec<ForgeShortcut>,
}

/// The document the harness reads, as serialized into its environment
/// variable.
///
/// The harness's JSON cheatcodes cannot decode nested arrays, so every
/// per-shortcut list is itself JSON-encoded into a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgeDocument {
    /// RPC URL the harness forks from.
    pub rpc_url: String,
    /// Shortcut names.
    pub shortcut_names: Vec<String>,
    /// Fork blocks. Zero forks at latest.
    pub block_numbers: Vec<u64>,
    /// Block timestamps. Zero keeps the forked block's timestamp.
    pub block_timestamps: Vec<u64>,
    /// Executor calldata.
    pub tx_data: Vec<Bytes>,
    /// Execution values, as decimal strings.
    pub tx_values: Vec<String>,
    /// Stringified `address[][]`.
    pub tokens_in: String,
    /// Stringified `address[][]`.
    pub tokens_in_holders: String,
    /// Stringified `string[][]` of decimal amounts.
    pub amounts_in: String,
    /// Funding flags.
    pub requires_funding: Vec<bool>,
    /// Stringified `address[][]`.
    pub tokens_out: String,
    /// Stringified `address[][]`.
    pub tokens_dust: String,
    /// Stringified `address[][]`.
    pub tracked_addresses: String,
    /// The batch's roles.
    pub roles: SimulationRoles,
    /// Address labels for traces.
    pub labels: BTreeMap<Address, String>,
}

fn stringify<'a, T: Serialize>(
    shortcuts: &'a [ForgeShortcut],
    f: impl Fn(&'a ForgeShortcut) -> T,
) -> Result<String, serde_json::Error> {
    serde_json::to_string(&shortcuts.iter().map(f).collect::<Vec<_>>())
}

impl ForgeInput {
    /// Create an empty batch.
    pub const fn new(rpc_url: String, roles: SimulationRoles) -> Self {
        Self { rpc_url, roles, labels: BTreeMap::new(), shortcuts: Vec::new() }
    }

    /// Add extra labels.
    pub fn with_labels(mut self, labels: impl IntoIterator<Item = (Address, String)>) -> Self {
        self.labels.extend(labels);
        self
    }

    /// Append a shortcut.
    pub fn push(&mut self, shortcut: ForgeShortcut) {
        self.shortcuts.push(shortcut);
    }

    /// Number of shortcuts.
    pub fn len(&self) -> usize {
        self.shortcuts.len()
    }

    /// True if the batch is empty.
    pub fn is_empty(&self) -> bool {
        self.shortcuts.is_empty()
    }

    /// The combined label map: role labels, then extra labels, then
    /// positional token labels for anything still unlabelled.
    pub fn combined_labels(&self) -> BTreeMap<Address, String> {
        let mut labels = self.roles.labels();
        labels.extend(self.labels.iter().map(|(a, l)| (*a, l.clone())));

        for shortcut in &self.shortcuts {
            let positional = [
                ("tokenIn", &shortcut.tokens_in),
                ("tokenOut", &shortcut.tokens_out),
                ("dust", &shortcut.tokens_dust),
                ("holder", &shortcut.tokens_in_holders),
            ];
            for (prefix, addresses) in positional {
                for (i, address) in addresses.iter().enumerate() {
                    if address.is_zero() {
                        continue;
                    }
                    labels.entry(*address).or_insert_with(|| format!("{prefix}_{i}"));
                }
            }
        }
        labels
    }

    /// Build the wire document.
    pub fn to_document(&self) -> Result<ForgeDocument, ForgeError> {
        let s = &self.shortcuts;
        Ok(ForgeDocument {
            rpc_url: self.rpc_url.clone(),
            shortcut_names: s.iter().map(|sc| sc.name.clone()).collect(),
            block_numbers: s.iter().map(|sc| sc.block_number.unwrap_or_default()).collect(),
            block_timestamps: s.iter().map(|sc| sc.block_timestamp.unwrap_or_default()).collect(),
            tx_data: s.iter().map(|sc| sc.tx_data.clone()).collect(),
            tx_values: s.iter().map(|sc| sc.tx_value.to_string()).collect(),
            tokens_in: stringify(s, |sc| &sc.tokens_in).map_err(ForgeError::Serialize)?,
            tokens_in_holders: stringify(s, |sc| &sc.tokens_in_holders)
                .map_err(ForgeError::Serialize)?,
            amounts_in: stringify(s, |sc| {
                sc.amounts_in.iter().map(ToString::to_string).collect::<Vec<_>>()
            })
            .map_err(ForgeError::Serialize)?,
            requires_funding: s.iter().map(|sc| sc.requires_funding).collect(),
            tokens_out: stringify(s, |sc| &sc.tokens_out).map_err(ForgeError::Serialize)?,
            tokens_dust: stringify(s, |sc| &sc.tokens_dust).map_err(ForgeError::Serialize)?,
            tracked_addresses: stringify(s, |sc| &sc.tracked_addresses)
                .map_err(ForgeError::Serialize)?,
            roles: self.roles,
            labels: self.combined_labels(),
        })
    }

    /// Serialize the wire document.
    pub fn to_json(&self) -> Result<String, ForgeError> {
        serde_json::to_string(&self.to_document()?).map_err(ForgeError::Serialize)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use shortcut_constants::test_utils;

    fn shortcut() -> ForgeShortcut {
        ForgeShortcut {
            name: "deposit".to_owned(),
            block_number: Some(100),
            block_timestamp: None,
            tx_data: Bytes::from_static(&[0xaa]),
            tx_value: U256::ZERO,
            tokens_in: vec![test_utils::WRAPPED_NATIVE],
            tokens_in_holders: vec![test_utils::WRAPPED_NATIVE_HOLDER],
            amounts_in: vec![U256::from(1_000)],
            requires_funding: true,
            tokens_out: vec![test_utils::VAULT],
            tokens_dust: vec![],
            tracked_addresses: vec![test_utils::CALLER],
        }
    }

    #[test]
    fn nested_arrays_are_stringified() {
        let roles =
            SimulationRoles::from(test_utils::ROLES).bound(Address::repeat_byte(0xbb)).unwrap();
        let mut input = ForgeInput::new("http://localhost:8545".to_owned(), roles);
        input.push(shortcut());
        input.push(ForgeShortcut { name: "redeem".to_owned(), ..Default::default() });

        let json: serde_json::Value = serde_json::from_str(&input.to_json().unwrap()).unwrap();
        assert_eq!(json["shortcutNames"], serde_json::json!(["deposit", "redeem"]));
        assert_eq!(json["blockNumbers"], serde_json::json!([100, 0]));
        assert_eq!(json["txData"], serde_json::json!(["0xaa", "0x"]));
        assert_eq!(json["txValues"], serde_json::json!(["0", "0"]));
        assert_eq!(json["requiresFunding"], serde_json::json!([true, false]));
        assert_eq!(json["amountsIn"], r#"[["1000"],[]]"#);
        let tokens_in: Vec<Vec<Address>> =
            serde_json::from_str(json["tokensIn"].as_str().unwrap()).unwrap();
        assert_eq!(tokens_in, vec![vec![test_utils::WRAPPED_NATIVE], vec![]]);
        assert_eq!(json["tokensDust"], "[[],[]]");
        let wallet: Address = json["roles"]["weirollWallet"].as_str().unwrap().parse().unwrap();
        assert_eq!(wallet, Address::repeat_byte(0xbb));
    }

    #[test]
    fn labels_prefer_roles() {
        let roles = SimulationRoles::from(test_utils::ROLES);
        let mut input = ForgeInput::new(String::new(), roles)
            .with_labels([(test_utils::VAULT, "Vault".to_owned())]);
        input.push(shortcut());

        let labels = input.combined_labels();
        assert_eq!(labels[&test_utils::CALLER], "Caller");
        assert_eq!(labels[&test_utils::VAULT], "Vault");
        assert_eq!(labels[&test_utils::WRAPPED_NATIVE], "tokenIn_0");
        assert_eq!(labels[&test_utils::WRAPPED_NATIVE_HOLDER], "holder_0");
    }
}
