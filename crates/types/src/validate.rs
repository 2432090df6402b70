use crate::{BuiltShortcut, ShortcutToSimulate};

/// Errors in a batch submitted for simulation. Raised before any backend
/// call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Shortcuts and built scripts are not parallel.
    #[error("batch has {shortcuts} shortcuts but {built} built scripts")]
    BatchLength {
        /// Number of shortcuts to simulate.
        shortcuts: usize,
        /// Number of built scripts.
        built: usize,
    },
    /// A block number is lower than an earlier one in the batch.
    #[error("shortcut {index} ({name}): block number {current} precedes {previous}")]
    BlockNumberDecreasing {
        /// Index of the offending shortcut.
        index: usize,
        /// Name of the offending shortcut.
        name: String,
        /// The latest block number before the shortcut.
        previous: u64,
        /// The shortcut's block number.
        current: u64,
    },
    /// A block timestamp is lower than an earlier one in the batch.
    #[error("shortcut {index} ({name}): block timestamp {current} precedes {previous}")]
    BlockTimestampDecreasing {
        /// Index of the offending shortcut.
        index: usize,
        /// Name of the offending shortcut.
        name: String,
        /// The latest timestamp before the shortcut.
        previous: u64,
        /// The shortcut's timestamp.
        current: u64,
    },
    /// `amountsIn` is not parallel to `tokensIn`.
    #[error("shortcut {index} ({name}): {amounts} amounts for {tokens} input tokens")]
    AmountsLength {
        /// Index of the offending shortcut.
        index: usize,
        /// Name of the offending shortcut.
        name: String,
        /// Number of amounts supplied.
        amounts: usize,
        /// Number of input tokens.
        tokens: usize,
    },
}

fn check_order(
    previous: &mut Option<u64>,
    current: Option<u64>,
    err: impl FnOnce(u64, u64) -> ValidationError,
) -> Result<(), ValidationError> {
    let Some(current) = current else { return Ok(()) };
    match *previous {
        Some(prev) if current < prev => Err(err(prev, current)),
        _ => {
            *previous = Some(current);
            Ok(())
        }
    }
}

/// Validate a batch: shortcuts and built scripts must be parallel, amounts
/// must be parallel to input tokens, and pinned block numbers and
/// timestamps must be non-decreasing. Shortcuts without a pin are skipped
/// by the ordering checks.
pub fn validate_batch(
    shortcuts: &[ShortcutToSimulate],
    built: &[BuiltShortcut],
) -> Result<(), ValidationError> {
    if shortcuts.len() != built.len() {
        return Err(ValidationError::BatchLength { shortcuts: shortcuts.len(), built: built.len() });
    }

    let mut last_number = None;
    let mut last_timestamp = None;

    for (index, (sim, built)) in shortcuts.iter().zip(built).enumerate() {
        if sim.amounts_in.len() != built.tokens_in().len() {
            return Err(ValidationError::AmountsLength {
                index,
                name: sim.name.clone(),
                amounts: sim.amounts_in.len(),
                tokens: built.tokens_in().len(),
            });
        }
        check_order(&mut last_number, sim.block_number, |previous, current| {
            ValidationError::BlockNumberDecreasing {
                index,
                name: sim.name.clone(),
                previous,
                current,
            }
        })?;
        check_order(&mut last_timestamp, sim.block_timestamp, |previous, current| {
            ValidationError::BlockTimestampDecreasing {
                index,
                name: sim.name.clone(),
                previous,
                current,
            }
        })?;
    }
    Ok(())
}
