//! Pending transaction storage in-memory.

use super::{StorageApi, StorageError, api::Result};
use crate::types::PendingTransaction;
use alloy::primitives::{Address, B256, ChainId};
use async_trait::async_trait;
use dashmap::DashMap;

/// [`StorageApi`] implementation in-memory.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    pending_transactions: DashMap<B256, PendingTransaction>,
}

#[async_trait]
impl StorageApi for InMemoryStorage {
    async fn write_pending_transaction(&self, tx: &PendingTransaction) -> Result<()> {
        let hash = tx.hash.ok_or(StorageError::MissingHash)?;
        self.pending_transactions.insert(hash, tx.clone());
        Ok(())
    }

    async fn read_pending_transactions(
        &self,
        address: Address,
        chain_id: ChainId,
    ) -> Result<Vec<PendingTransaction>> {
        let mut txs = Vec::new();
        for item in self.pending_transactions.iter() {
            let tx = item.value();
            if tx.from == address && tx.chain_id == chain_id {
                txs.push(tx.clone());
            }
        }
        txs.sort_by_key(|tx| tx.nonce);

        Ok(txs)
    }
}
