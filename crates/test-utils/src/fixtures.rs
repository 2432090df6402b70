//! Shortcuts against a test vault, and a ledger that knows how to execute
//! them.

use crate::{
    ledger::{Effect, MockChain, Transfer},
    test_constants::*,
};
use alloy::{
    primitives::{Address, B256, U256},
    sol_types::SolCall,
};
use shortcut_bindings::IERC20;
use shortcut_constants::NATIVE_TOKEN_ADDRESS;
use shortcut_types::{BuiltShortcut, ShortcutToSimulate, WeirollScript};

/// The execution wallet the test factory creates.
pub const WALLET: Address = Address::repeat_byte(0xbb);

/// Block the fixtures are pinned to.
pub const FORK_BLOCK: u64 = 1_000;
/// Timestamp of [`FORK_BLOCK`].
pub const FORK_TIMESTAMP: u64 = 1_700_000_000;

/// The caller's transaction count at [`FORK_BLOCK`].
pub const CALLER_NONCE: u64 = 42;

/// Wrapped-native deposited by [`deposit`].
pub const DEPOSIT_AMOUNT: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);
/// Vault shares minted for [`DEPOSIT_AMOUNT`].
pub const DEPOSIT_SHARES: U256 = U256::from_limbs([998_000_000_000_000_000, 0, 0, 0]);
/// Wrapped-native held by its registered holder.
pub const HOLDER_BALANCE: U256 = U256::from_limbs([10_000_000_000_000_000_000, 0, 0, 0]);

/// Gas used by a deposit.
pub const DEPOSIT_GAS: u64 = 180_000;
/// Gas used by a redeem.
pub const REDEEM_GAS: u64 = 150_000;

/// `deposit(uint256,address)`
const DEPOSIT_SELECTOR: [u8; 4] = [0x6e, 0x55, 0x3f, 0x65];
/// `redeem(uint256,address,address)`
const REDEEM_SELECTOR: [u8; 4] = [0xba, 0x08, 0x76, 0x52];
/// `deposit()`
const WRAP_SELECTOR: [u8; 4] = [0xd0, 0xe3, 0x0d, 0xb0];

/// A plain `CALL` command.
pub fn command(selector: [u8; 4], target: Address) -> B256 {
    let mut word = [0xffu8; 32];
    word[..4].copy_from_slice(&selector);
    word[4] = 0x01;
    word[12..].copy_from_slice(target.as_slice());
    B256::from(word)
}

/// An ERC20 `approve` command on `token`.
pub fn approve(token: Address) -> B256 {
    command(IERC20::approveCall::SELECTOR, token)
}

/// Wrapped-native into the vault.
pub fn deposit_built() -> BuiltShortcut {
    BuiltShortcut::new(
        WeirollScript::new(
            vec![approve(WRAPPED_NATIVE), command(DEPOSIT_SELECTOR, VAULT)],
            vec![],
        ),
        vec![WRAPPED_NATIVE],
        vec![VAULT],
    )
}

/// Vault shares back into wrapped-native.
pub fn redeem_built() -> BuiltShortcut {
    BuiltShortcut::new(
        WeirollScript::new(vec![command(REDEEM_SELECTOR, VAULT)], vec![]),
        vec![VAULT],
        vec![WRAPPED_NATIVE],
    )
}

/// Native token into wrapped-native.
pub fn wrap_built() -> BuiltShortcut {
    BuiltShortcut::new(
        WeirollScript::new(vec![command(WRAP_SELECTOR, WRAPPED_NATIVE)], vec![]),
        vec![NATIVE_TOKEN_ADDRESS],
        vec![WRAPPED_NATIVE],
    )
}

/// A token nobody can fund into the vault.
pub fn unfunded_built() -> BuiltShortcut {
    BuiltShortcut::new(
        WeirollScript::new(vec![approve(UNFUNDED), command(DEPOSIT_SELECTOR, VAULT)], vec![]),
        vec![UNFUNDED],
        vec![VAULT],
    )
}

/// A deposit whose execution reverts.
pub fn reverting_built() -> BuiltShortcut {
    BuiltShortcut::new(
        WeirollScript::new(
            vec![approve(WRAPPED_NATIVE), command([0xde, 0xad, 0xbe, 0xef], VAULT)],
            vec![],
        ),
        vec![WRAPPED_NATIVE],
        vec![VAULT],
    )
}

/// Deposit [`DEPOSIT_AMOUNT`], funded from the registered holder.
pub fn deposit() -> ShortcutToSimulate {
    ShortcutToSimulate::new("deposit", vec![DEPOSIT_AMOUNT])
        .with_funding()
        .at_block(FORK_BLOCK, Some(FORK_TIMESTAMP))
}

/// Redeem [`DEPOSIT_SHARES`] already held by the wallet.
pub fn redeem() -> ShortcutToSimulate {
    ShortcutToSimulate::new("redeem", vec![DEPOSIT_SHARES])
        .at_block(FORK_BLOCK, Some(FORK_TIMESTAMP + 12))
}

/// Wrap `amount` of the native token.
pub fn wrap(amount: U256) -> ShortcutToSimulate {
    ShortcutToSimulate::new("wrap", vec![amount]).at_block(FORK_BLOCK, Some(FORK_TIMESTAMP))
}

/// Deposit a token with no registered holder.
pub fn unfunded() -> ShortcutToSimulate {
    ShortcutToSimulate::new("unfunded", vec![U256::from(1_000)])
        .with_funding()
        .at_block(FORK_BLOCK, Some(FORK_TIMESTAMP))
}

/// A funded deposit that reverts.
pub fn reverting() -> ShortcutToSimulate {
    ShortcutToSimulate::new("reverting", vec![DEPOSIT_AMOUNT])
        .with_funding()
        .at_block(FORK_BLOCK, Some(FORK_TIMESTAMP))
}

/// A chain holding the vault fixtures: a funded wrapped-native holder, the
/// caller at [`CALLER_NONCE`], and effects for every fixture that executes.
pub fn vault_chain() -> MockChain {
    let deposit = Effect {
        transfers: vec![
            Transfer::new(WRAPPED_NATIVE, WALLET, VAULT, DEPOSIT_AMOUNT),
            Transfer::new(VAULT, Address::ZERO, WALLET, DEPOSIT_SHARES),
        ],
        gas_used: DEPOSIT_GAS,
    };
    let redeem = Effect {
        transfers: vec![
            Transfer::new(VAULT, WALLET, Address::ZERO, DEPOSIT_SHARES),
            Transfer::new(WRAPPED_NATIVE, VAULT, WALLET, DEPOSIT_AMOUNT),
        ],
        gas_used: REDEEM_GAS,
    };
    let wrap = Effect {
        transfers: vec![Transfer::new(WRAPPED_NATIVE, Address::ZERO, WALLET, DEPOSIT_AMOUNT)],
        gas_used: 60_000,
    };

    MockChain::new(WALLET)
        .with_balance(WRAPPED_NATIVE, WRAPPED_NATIVE_HOLDER, HOLDER_BALANCE)
        .with_nonce(CALLER, CALLER_NONCE)
        .with_effect(deposit_built().script.calldata(), deposit)
        .with_effect(redeem_built().script.calldata(), redeem)
        .with_effect(wrap_built().script.calldata(), wrap)
}
