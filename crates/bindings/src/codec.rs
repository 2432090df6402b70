use crate::{IRecipeMarketHub, IWeirollWalletHelper, IERC20};
use alloy::{
    primitives::{Address, Bytes, B256, U256},
    sol_types::SolCall,
};

/// Errors decoding raw call results.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The call returned no data.
    #[error("empty return data for {0}")]
    Empty(&'static str),
    /// The return data could not be ABI-decoded.
    #[error("failed to decode return data for {call}: {source}")]
    Abi {
        /// The call whose result was being decoded.
        call: &'static str,
        /// The decoding error.
        #[source]
        source: alloy::sol_types::Error,
    },
}

/// Encode a weiroll script into the calldata used to invoke the executor.
pub fn encode_execute(commands: &[B256], state: &[Bytes]) -> Bytes {
    IRecipeMarketHub::executeWeirollCall { commands: commands.to_vec(), state: state.to_vec() }
        .abi_encode()
        .into()
}

/// Encode the executor-hub call that creates an ephemeral weiroll wallet.
pub fn encode_create_wallet() -> Bytes {
    IRecipeMarketHub::createWeirollWalletCall {}.abi_encode().into()
}

/// Encode an ERC20 `balanceOf` call.
pub fn encode_balance_of(account: Address) -> Bytes {
    IERC20::balanceOfCall { account }.abi_encode().into()
}

/// Encode a native balance read through the wallet helper.
pub fn encode_native_balance(account: Address) -> Bytes {
    IWeirollWalletHelper::nativeBalanceCall { account }.abi_encode().into()
}

/// Encode an ERC20 `transfer` call.
pub fn encode_transfer(to: Address, amount: U256) -> Bytes {
    IERC20::transferCall { to, amount }.abi_encode().into()
}

/// Decode the result of a balance read. Both `balanceOf` and the wallet
/// helper's `nativeBalance` return a single `uint256`.
pub fn decode_balance(data: &[u8]) -> Result<U256, CodecError> {
    if data.is_empty() {
        return Err(CodecError::Empty(IERC20::balanceOfCall::SIGNATURE));
    }
    IERC20::balanceOfCall::abi_decode_returns(data)
        .map_err(|source| CodecError::Abi { call: IERC20::balanceOfCall::SIGNATURE, source })
}

/// Decode the wallet address returned by `createWeirollWallet`.
pub fn decode_wallet(data: &[u8]) -> Result<Address, CodecError> {
    let call = IRecipeMarketHub::createWeirollWalletCall::SIGNATURE;
    if data.is_empty() {
        return Err(CodecError::Empty(call));
    }
    IRecipeMarketHub::createWeirollWalletCall::abi_decode_returns(data)
        .map_err(|source| CodecError::Abi { call, source })
}

#[cfg(test)]
mod test {
    use super::*;
    use alloy::{primitives::address, sol_types::SolValue};

    #[test]
    fn execute_calldata_roundtrip() {
        let commands = vec![B256::repeat_byte(1), B256::repeat_byte(2)];
        let state = vec![Bytes::from_static(b"abc"), Bytes::new()];

        let data = encode_execute(&commands, &state);
        assert_eq!(data[..4], IRecipeMarketHub::executeWeirollCall::SELECTOR);

        let decoded = IRecipeMarketHub::executeWeirollCall::abi_decode(&data).unwrap();
        assert_eq!(decoded.commands, commands);
        assert_eq!(decoded.state, state);
    }

    #[test]
    fn balance_reads_use_distinct_selectors() {
        let account = address!("0x00000000000000000000000000000000000000aa");
        assert_eq!(encode_balance_of(account)[..4], IERC20::balanceOfCall::SELECTOR);
        assert_eq!(
            encode_native_balance(account)[..4],
            IWeirollWalletHelper::nativeBalanceCall::SELECTOR
        );
    }

    #[test]
    fn decode_balance_word() {
        let word = U256::from(1_000_000u64).abi_encode();
        assert_eq!(decode_balance(&word).unwrap(), U256::from(1_000_000u64));
        assert!(matches!(decode_balance(&[]), Err(CodecError::Empty(_))));
        assert!(matches!(decode_balance(&[1, 2, 3]), Err(CodecError::Abi { .. })));
    }

    #[test]
    fn decode_wallet_word() {
        let wallet = Address::repeat_byte(0x42);
        assert_eq!(decode_wallet(&wallet.abi_encode()).unwrap(), wallet);
    }
}
