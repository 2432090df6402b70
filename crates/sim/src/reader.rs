use alloy::{
    eips::BlockId,
    network::TransactionBuilder,
    primitives::{Address, Bytes, U256},
    providers::Provider,
    rpc::types::TransactionRequest,
    transports::TransportResult,
};
use core::future::Future;

fn block_id(block: Option<u64>) -> BlockId {
    block.map_or_else(BlockId::latest, BlockId::number)
}

/// Read access to chain state.
///
/// Used to create the batch's execution wallet and to read the caller's
/// nonce and native balance. Any alloy [`Provider`] is a reader.
pub trait ChainReader: Sync {
    /// Execute a read-only call at `block`, or latest.
    fn read(
        &self,
        from: Address,
        to: Address,
        data: Bytes,
        block: Option<u64>,
    ) -> impl Future<Output = TransportResult<Bytes>> + Send;

    /// Get an account's transaction count at `block`, or latest.
    fn transaction_count(
        &self,
        address: Address,
        block: Option<u64>,
    ) -> impl Future<Output = TransportResult<u64>> + Send;

    /// Get an account's native balance at `block`, or latest.
    fn balance(
        &self,
        address: Address,
        block: Option<u64>,
    ) -> impl Future<Output = TransportResult<U256>> + Send;
}

impl<P> ChainReader for P
where
    P: Provider,
{
    async fn read(
        &self,
        from: Address,
        to: Address,
        data: Bytes,
        block: Option<u64>,
    ) -> TransportResult<Bytes> {
        let tx = TransactionRequest::default().with_from(from).with_to(to).with_input(data);
        Provider::call(self, tx).block(block_id(block)).await
    }

    async fn transaction_count(
        &self,
        address: Address,
        block: Option<u64>,
    ) -> TransportResult<u64> {
        Provider::get_transaction_count(self, address).block_id(block_id(block)).await
    }

    async fn balance(&self, address: Address, block: Option<u64>) -> TransportResult<U256> {
        Provider::get_balance(self, address).block_id(block_id(block)).await
    }
}
