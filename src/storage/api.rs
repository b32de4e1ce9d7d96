//! Pending transaction storage api.

use super::StorageError;
use crate::types::PendingTransaction;
use alloy::primitives::{Address, ChainId};
use async_trait::async_trait;
use std::fmt::Debug;

/// Type alias for `Result<T, StorageError>`
pub type Result<T> = core::result::Result<T, StorageError>;

/// Storage API.
#[async_trait]
pub trait StorageApi: Debug + Send + Sync {
    /// Writes a pending transaction to storage.
    ///
    /// The transaction must have been submitted, i.e. carry a hash. Writing the same hash again
    /// replaces the previous record.
    async fn write_pending_transaction(&self, tx: &PendingTransaction) -> Result<()>;

    /// Reads the pending transactions sent by `address` on `chain_id`, ordered by nonce.
    async fn read_pending_transactions(
        &self,
        address: Address,
        chain_id: ChainId,
    ) -> Result<Vec<PendingTransaction>>;
}
