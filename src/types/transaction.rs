use alloy::primitives::{Address, B256, Bytes, ChainId, U256};
use serde::{Deserialize, Serialize};

/// What a tracked transaction does, as shown in the activity list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransactionKind {
    /// Same-chain swap.
    Swap,
    /// Cross-chain swap or bridge.
    Bridge,
}

/// A transaction handed to the pending-transaction store after submission.
///
/// Preparers build this record before the batch is sent; the engine stamps the
/// submission results onto it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingTransaction {
    /// Sender.
    pub from: Address,
    /// Destination.
    pub to: Option<Address>,
    /// Chain the transaction was sent on.
    pub chain_id: ChainId,
    /// Nonce used.
    pub nonce: Option<u64>,
    /// Transaction hash, set after submission.
    pub hash: Option<B256>,
    /// Calldata.
    #[serde(default)]
    pub data: Bytes,
    /// Native value.
    #[serde(default)]
    pub value: U256,
    /// Gas limit, set once known.
    pub gas_limit: Option<u64>,
    /// What the transaction does.
    pub kind: TransactionKind,
    /// Whether the transaction is a batch of several calls.
    #[serde(default)]
    pub batch: bool,
    /// Whether the batch was executed through an EIP-7702 delegation.
    #[serde(default)]
    pub delegation: bool,
}

impl PendingTransaction {
    /// Creates a new pending record for a not yet submitted transaction.
    pub fn new(from: Address, chain_id: ChainId, kind: TransactionKind) -> Self {
        Self {
            from,
            to: None,
            chain_id,
            nonce: None,
            hash: None,
            data: Bytes::new(),
            value: U256::ZERO,
            gas_limit: None,
            kind,
            batch: false,
            delegation: false,
        }
    }

    /// Sets the destination, calldata and value.
    pub fn with_call(mut self, to: Address, data: Bytes, value: U256) -> Self {
        self.to = Some(to);
        self.data = data;
        self.value = value;
        self
    }

    /// Sets the nonce.
    pub fn with_nonce(mut self, nonce: Option<u64>) -> Self {
        self.nonce = nonce;
        self
    }
}
