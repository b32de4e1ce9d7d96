//! Pending transaction storage.
//!
//! The engine does not own any persisted state. Transactions it submits are handed to a
//! [`StorageApi`] so the wallet can follow them until they are final.

mod api;
pub use api::StorageApi;
mod error;
pub use error::StorageError;
mod memory;

use crate::types::PendingTransaction;
use alloy::primitives::{Address, ChainId};
use async_trait::async_trait;
use std::sync::Arc;

/// Pending transaction storage interface.
#[derive(Debug, Clone)]
pub struct RapStorage {
    inner: Arc<dyn StorageApi>,
}

impl RapStorage {
    /// Create [`RapStorage`] with a custom backend.
    pub fn new(inner: Arc<dyn StorageApi>) -> Self {
        Self { inner }
    }

    /// Create [`RapStorage`] with a in-memory backend.
    pub fn in_memory() -> Self {
        Self { inner: Arc::new(memory::InMemoryStorage::default()) }
    }
}

#[async_trait]
impl StorageApi for RapStorage {
    async fn write_pending_transaction(&self, tx: &PendingTransaction) -> api::Result<()> {
        self.inner.write_pending_transaction(tx).await
    }

    async fn read_pending_transactions(
        &self,
        address: Address,
        chain_id: ChainId,
    ) -> api::Result<Vec<PendingTransaction>> {
        self.inner.read_pending_transactions(address, chain_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TransactionKind;
    use alloy::primitives::{B256, address, b256};

    #[tokio::test]
    async fn tracks_by_sender_and_chain() {
        let storage = RapStorage::in_memory();
        let from = address!("70997970C51812dc3A010C7d01b50e0d17dc79C8");
        let hash = b256!("0x0c0c0c0c0c0c0c0c0c0c0c0c0c0c0c0c0c0c0c0c0c0c0c0c0c0c0c0c0c0c0c0c");

        let untracked = PendingTransaction::new(from, 1, TransactionKind::Swap);
        assert!(matches!(
            storage.write_pending_transaction(&untracked).await,
            Err(StorageError::MissingHash)
        ));

        let mut tx = untracked.with_nonce(Some(7));
        tx.hash = Some(hash);
        storage.write_pending_transaction(&tx).await.unwrap();

        assert_eq!(storage.read_pending_transactions(from, 1).await.unwrap(), vec![tx.clone()]);
        assert!(storage.read_pending_transactions(from, 10).await.unwrap().is_empty());

        let mut replaced = tx.clone();
        replaced.gas_limit = Some(21_000);
        storage.write_pending_transaction(&replaced).await.unwrap();
        assert_eq!(storage.read_pending_transactions(from, 1).await.unwrap(), vec![replaced]);

        let mut earlier =
            PendingTransaction::new(from, 1, TransactionKind::Bridge).with_nonce(Some(3));
        earlier.hash = Some(B256::repeat_byte(0x0b));
        storage.write_pending_transaction(&earlier).await.unwrap();
        assert_eq!(
            storage
                .read_pending_transactions(from, 1)
                .await
                .unwrap()
                .iter()
                .map(|tx| tx.nonce)
                .collect::<Vec<_>>(),
            vec![Some(3), Some(7)]
        );
    }
}
