use alloy::primitives::{Address, Bytes, U256, U64};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How much detail the API computes for a simulation.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimulationKind {
    /// Full decoded trace.
    Full,
    /// Call trace without decoding.
    #[default]
    Quick,
    /// Access list only.
    Abi,
}

/// Block header fields overridden for a simulation.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeaderOverride {
    /// Block timestamp, hex-encoded on the wire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<U64>,
}

impl BlockHeaderOverride {
    /// Override the block timestamp.
    pub fn timestamp(timestamp: u64) -> Self {
        Self { timestamp: Some(U64::from(timestamp)) }
    }
}

/// Account state overridden for a simulation.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateObject {
    /// Account nonce.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<u64>,
    /// Account balance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<U256>,
}

impl StateObject {
    /// Pin the account nonce.
    pub const fn with_nonce(mut self, nonce: u64) -> Self {
        self.nonce = Some(nonce);
        self
    }

    /// Pin the account balance.
    pub const fn with_balance(mut self, balance: U256) -> Self {
        self.balance = Some(balance);
        self
    }
}

/// A single simulated transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationRequest {
    /// Chain id, as a decimal string.
    pub network_id: String,
    /// Sender.
    pub from: Address,
    /// Recipient.
    pub to: Address,
    /// Calldata.
    pub input: Bytes,
    /// Value sent with the call.
    pub value: U256,
    /// Block to simulate at. Latest when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
    /// Header overrides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_header: Option<BlockHeaderOverride>,
    /// State overrides, keyed by account.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub state_objects: BTreeMap<Address, StateObject>,
    /// Persist the simulation on success.
    #[serde(default)]
    pub save: bool,
    /// Persist the simulation on failure.
    #[serde(default)]
    pub save_if_fails: bool,
    /// Simulation detail.
    #[serde(default)]
    pub simulation_type: SimulationKind,
}

impl SimulationRequest {
    /// Create a zero-value request at the latest block.
    pub fn new(chain_id: u64, from: Address, to: Address, input: Bytes) -> Self {
        Self {
            network_id: chain_id.to_string(),
            from,
            to,
            input,
            value: U256::ZERO,
            block_number: None,
            block_header: None,
            state_objects: BTreeMap::new(),
            save: false,
            save_if_fails: false,
            simulation_type: SimulationKind::default(),
        }
    }

    /// Send value with the call.
    pub const fn with_value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }

    /// Simulate at a block, optionally overriding its timestamp.
    pub fn at_block(mut self, number: Option<u64>, timestamp: Option<u64>) -> Self {
        self.block_number = number;
        self.block_header = timestamp.map(BlockHeaderOverride::timestamp);
        self
    }

    /// Override an account's state.
    pub fn with_state(mut self, account: Address, state: StateObject) -> Self {
        self.state_objects.insert(account, state);
        self
    }
}

/// An ordered bundle of simulations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleRequest {
    /// The simulations, executed in order.
    pub simulations: Vec<SimulationRequest>,
}

impl BundleRequest {
    /// Create a bundle.
    pub const fn new(simulations: Vec<SimulationRequest>) -> Self {
        Self { simulations }
    }

    /// Number of simulations in the bundle.
    pub fn len(&self) -> usize {
        self.simulations.len()
    }

    /// True if the bundle is empty.
    pub fn is_empty(&self) -> bool {
        self.simulations.is_empty()
    }
}

/// The top-level call frame of a simulated transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallTrace {
    /// Return data.
    #[serde(default)]
    pub output: Option<Bytes>,
    /// Revert reason or error message.
    #[serde(default)]
    pub error: Option<String>,
}

/// Execution details of a simulated transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionInfo {
    /// The top-level call frame.
    #[serde(default)]
    pub call_trace: Option<CallTrace>,
}

/// A simulated transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulatedTransaction {
    /// Whether the transaction succeeded.
    #[serde(default)]
    pub status: bool,
    /// Gas used.
    #[serde(default)]
    pub gas_used: u64,
    /// Execution details.
    #[serde(default)]
    pub transaction_info: Option<TransactionInfo>,
}

/// Metadata of a stored simulation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationInfo {
    /// Simulation id.
    #[serde(default)]
    pub id: String,
}

/// The result of one simulation in a bundle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// The simulated transaction.
    #[serde(default)]
    pub transaction: SimulatedTransaction,
    /// Stored simulation metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simulation: Option<SimulationInfo>,
}

impl SimulationResult {
    /// A successful result returning `output`.
    pub fn success(output: Bytes, gas_used: u64) -> Self {
        Self {
            transaction: SimulatedTransaction {
                status: true,
                gas_used,
                transaction_info: Some(TransactionInfo {
                    call_trace: Some(CallTrace { output: Some(output), error: None }),
                }),
            },
            simulation: None,
        }
    }

    /// A reverted result.
    pub fn failure(error: impl Into<String>, gas_used: u64) -> Self {
        Self {
            transaction: SimulatedTransaction {
                status: false,
                gas_used,
                transaction_info: Some(TransactionInfo {
                    call_trace: Some(CallTrace { output: None, error: Some(error.into()) }),
                }),
            },
            simulation: None,
        }
    }

    /// True if the transaction succeeded.
    pub const fn is_success(&self) -> bool {
        self.transaction.status
    }

    /// Gas used by the transaction.
    pub const fn gas_used(&self) -> u64 {
        self.transaction.gas_used
    }

    fn call_trace(&self) -> Option<&CallTrace> {
        self.transaction.transaction_info.as_ref()?.call_trace.as_ref()
    }

    /// Return data of the top-level call.
    pub fn output(&self) -> Option<&Bytes> {
        self.call_trace()?.output.as_ref()
    }

    /// Error of the top-level call.
    pub fn error(&self) -> Option<&str> {
        self.call_trace()?.error.as_deref()
    }
}

/// The results of a bundle, in submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleResponse {
    /// One result per submitted simulation.
    pub simulation_results: Vec<SimulationResult>,
}

impl BundleResponse {
    /// Create a response.
    pub const fn new(simulation_results: Vec<SimulationResult>) -> Self {
        Self { simulation_results }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use alloy::primitives::address;

    #[test]
    fn request_wire_shape() {
        let caller = address!("0x1111111111111111111111111111111111111111");
        let request = SimulationRequest::new(146, caller, Address::repeat_byte(2), Bytes::new())
            .with_value(U256::from(16))
            .at_block(Some(100), Some(255))
            .with_state(caller, StateObject::default().with_nonce(7));

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["network_id"], "146");
        assert_eq!(json["from"], "0x1111111111111111111111111111111111111111");
        assert_eq!(json["value"], "0x10");
        assert_eq!(json["block_number"], 100);
        assert_eq!(json["block_header"]["timestamp"], "0xff");
        assert_eq!(json["state_objects"]["0x1111111111111111111111111111111111111111"]["nonce"], 7);
        assert!(json["state_objects"]["0x1111111111111111111111111111111111111111"]
            .get("balance")
            .is_none());
        assert_eq!(json["simulation_type"], "quick");
    }

    #[test]
    fn latest_block_omits_fields() {
        let request =
            SimulationRequest::new(1, Address::ZERO, Address::ZERO, Bytes::new())
                .at_block(None, None);
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("block_number").is_none());
        assert!(json.get("block_header").is_none());
        assert!(json.get("state_objects").is_none());
    }

    #[test]
    fn parse_response() {
        let json = r#"{
            "simulation_results": [
                {
                    "transaction": {
                        "status": true,
                        "gas_used": 43210,
                        "transaction_info": { "call_trace": { "output": "0x2a", "error": null } }
                    },
                    "simulation": { "id": "abc" }
                },
                {
                    "transaction": {
                        "status": false,
                        "gas_used": 0,
                        "transaction_info": { "call_trace": { "error": "execution reverted" } }
                    }
                }
            ]
        }"#;
        let response: BundleResponse = serde_json::from_str(json).unwrap();
        let [ok, failed] = response.simulation_results.as_slice() else { panic!("two results") };

        assert!(ok.is_success());
        assert_eq!(ok.gas_used(), 43210);
        assert_eq!(ok.output(), Some(&Bytes::from_static(&[0x2a])));
        assert_eq!(ok.simulation.as_ref().unwrap().id, "abc");

        assert!(!failed.is_success());
        assert_eq!(failed.output(), None);
        assert_eq!(failed.error(), Some("execution reverted"));
    }
}
