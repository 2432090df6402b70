use alloy::primitives::{Address, B256};

/// The command's argument indices live in the following command word.
const FLAG_EXTENDED_COMMAND: u8 = 0x40;

/// A single decoded weiroll command.
///
/// Commands are packed into 32-byte words:
///
/// ```text
/// | selector (4) | flags (1) | inputs (6) | output (1) | target (20) |
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct WeirollCommand {
    word: B256,
}

impl WeirollCommand {
    /// Wrap a raw command word.
    pub const fn new(word: B256) -> Self {
        Self { word }
    }

    const fn flags(&self) -> u8 {
        self.word.0[4]
    }

    /// The contract the command calls.
    pub fn target(&self) -> Address {
        Address::from_slice(&self.word[12..])
    }

    /// True if the next word holds this command's argument indices.
    pub const fn is_extended(&self) -> bool {
        self.flags() & FLAG_EXTENDED_COMMAND != 0
    }

    /// True if this command calls `selector` on its target.
    pub fn calls(&self, selector: [u8; 4]) -> bool {
        self.word[..4] == selector
    }
}

/// Iterator over the commands of a weiroll script.
///
/// Argument-index words following an extended command are skipped, so every
/// item yielded is a real call.
#[derive(Debug, Clone)]
pub struct WeirollCommands<'a> {
    words: std::slice::Iter<'a, B256>,
}

impl<'a> WeirollCommands<'a> {
    /// Iterate over the commands in `words`.
    pub fn new(words: &'a [B256]) -> Self {
        Self { words: words.iter() }
    }
}

impl Iterator for WeirollCommands<'_> {
    type Item = WeirollCommand;

    fn next(&mut self) -> Option<Self::Item> {
        let command = WeirollCommand::new(*self.words.next()?);
        if command.is_extended() {
            self.words.next();
        }
        Some(command)
    }
}
