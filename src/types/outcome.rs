use alloy::primitives::B256;
use serde::{Deserialize, Serialize};

/// The terminal result of one engine run.
///
/// A non-null `error_message` means the whole rap failed, even when some of its actions did
/// produce a hash.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionOutcome {
    /// The first error encountered, if any.
    pub error_message: Option<String>,
    /// Hash of the last transaction sent.
    pub hash: Option<B256>,
    /// The last nonce used.
    pub nonce: Option<u64>,
}

impl ExecutionOutcome {
    /// A successful run.
    pub fn success(hash: Option<B256>, nonce: Option<u64>) -> Self {
        Self { error_message: None, hash, nonce }
    }

    /// A failed run with no transaction to report.
    pub fn failure(message: impl Into<String>) -> Self {
        Self { error_message: Some(message.into()), hash: None, nonce: None }
    }

    /// Whether the run succeeded.
    pub fn is_success(&self) -> bool {
        self.error_message.is_none()
    }
}
