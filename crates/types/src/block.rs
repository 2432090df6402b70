use serde::{Deserialize, Serialize};

/// The block a shortcut is simulated at. Either field may be absent, in which
/// case the backend's latest block supplies it.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockContext {
    /// Block number.
    pub number: Option<u64>,
    /// Block timestamp.
    pub timestamp: Option<u64>,
}

impl BlockContext {
    /// Create a new block context.
    pub const fn new(number: Option<u64>, timestamp: Option<u64>) -> Self {
        Self { number, timestamp }
    }

    /// The latest block.
    pub const fn latest() -> Self {
        Self { number: None, timestamp: None }
    }

    /// True if neither a number nor a timestamp is pinned.
    pub const fn is_latest(&self) -> bool {
        self.number.is_none() && self.timestamp.is_none()
    }
}
