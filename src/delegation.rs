//! Delegation capability and batched submission.
//!
//! Atomic execution folds every action of a rap into one transaction executed by the account
//! itself, which requires the account to be (or become) delegated to a batching implementation
//! through EIP-7702.

use crate::{
    error::ActionError,
    signers::DynSigner,
    types::{BatchCall, Eip1559Fees},
};
use alloy::{
    eips::eip7702::constants::{EIP7702_CLEARED_DELEGATION, EIP7702_DELEGATION_DESIGNATOR},
    primitives::{Address, B256, ChainId, U256, map::HashMap},
    providers::{DynProvider, Provider},
};
use async_trait::async_trait;
use std::{collections::BTreeSet, fmt::Debug};
use tracing::{debug, instrument};

/// Why an account cannot batch calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UnsupportedReason {
    /// Atomic execution is not enabled on the chain.
    #[error("atomic execution is not enabled on chain {0}")]
    ChainNotEnabled(ChainId),
    /// The account is delegated to an implementation we do not control.
    #[error("account is delegated to foreign implementation {0}")]
    ForeignDelegation(Address),
    /// The account is a smart contract.
    #[error("account is a contract")]
    ContractAccount,
}

/// Result of a [`DelegationProbe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelegationSupport {
    /// Whether the account can batch calls.
    pub supported: bool,
    /// Why it cannot, when known.
    pub reason: Option<UnsupportedReason>,
}

impl DelegationSupport {
    /// Supported.
    pub const fn supported() -> Self {
        Self { supported: true, reason: None }
    }

    /// Unsupported because of `reason`.
    pub const fn unsupported(reason: UnsupportedReason) -> Self {
        Self { supported: false, reason: Some(reason) }
    }
}

/// Checks whether an account supports delegation-based batching.
#[async_trait]
pub trait DelegationProbe: Debug + Send + Sync {
    /// Probes `address` on `chain_id`.
    async fn supports_delegation(
        &self,
        address: Address,
        chain_id: ChainId,
    ) -> Result<DelegationSupport, ActionError>;
}

/// How a batch ended up on-chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchKind {
    /// Executed through an EIP-7702 delegation.
    Eip7702,
    /// Sent as a regular transaction to a batching contract.
    Transaction,
}

/// A batch of calls to submit as one transaction.
#[derive(Debug, Clone)]
pub struct BatchRequest<'a> {
    /// The signing wallet.
    pub signer: &'a DynSigner,
    /// Chain the batch is sent on.
    pub chain_id: ChainId,
    /// The calls, in order.
    pub calls: Vec<BatchCall>,
    /// Total native value of the calls.
    pub value: U256,
    /// Fee parameters of the transaction.
    pub fees: Eip1559Fees,
    /// Nonce of the transaction.
    pub nonce: u64,
}

/// Result of a successful [`BatchSubmitter::submit_batch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchReceipt {
    /// Transaction hash.
    pub hash: B256,
    /// How the batch was executed.
    pub kind: BatchKind,
    /// Gas limit of the sent transaction, if known.
    pub gas_limit: Option<u64>,
}

/// Submits batches of calls as one transaction.
#[async_trait]
pub trait BatchSubmitter: Debug + Send + Sync {
    /// Submits `request`.
    async fn submit_batch(&self, request: BatchRequest<'_>) -> Result<BatchReceipt, ActionError>;
}

/// [`DelegationProbe`] reading the account code over RPC.
///
/// An account supports batching when it has no code, or when it is delegated to the configured
/// batching implementation. Without a configured implementation any delegation is accepted.
#[derive(Debug, Clone)]
pub struct ProviderDelegationProbe {
    providers: HashMap<ChainId, DynProvider>,
    atomic_chains: Option<BTreeSet<ChainId>>,
    delegation_contract: Option<Address>,
}

impl ProviderDelegationProbe {
    /// Creates a new probe over `providers`.
    pub fn new(providers: HashMap<ChainId, DynProvider>) -> Self {
        Self { providers, atomic_chains: None, delegation_contract: None }
    }

    /// Restricts atomic execution to `chains`.
    pub fn with_atomic_chains(mut self, chains: Option<BTreeSet<ChainId>>) -> Self {
        self.atomic_chains = chains;
        self
    }

    /// Sets the batching implementation accounts must be delegated to.
    pub fn with_delegation_contract(mut self, contract: Option<Address>) -> Self {
        self.delegation_contract = contract;
        self
    }

    fn classify(&self, code: &[u8]) -> DelegationSupport {
        if code.is_empty() || code[..] == EIP7702_CLEARED_DELEGATION[..] {
            return DelegationSupport::supported();
        }

        if code.len() == EIP7702_DELEGATION_DESIGNATOR.len() + 20
            && code.starts_with(&EIP7702_DELEGATION_DESIGNATOR)
        {
            let implementation = Address::from_slice(&code[EIP7702_DELEGATION_DESIGNATOR.len()..]);
            return match self.delegation_contract {
                Some(expected) if expected != implementation => {
                    DelegationSupport::unsupported(UnsupportedReason::ForeignDelegation(
                        implementation,
                    ))
                }
                _ => DelegationSupport::supported(),
            };
        }

        DelegationSupport::unsupported(UnsupportedReason::ContractAccount)
    }
}

#[async_trait]
impl DelegationProbe for ProviderDelegationProbe {
    #[instrument(skip(self))]
    async fn supports_delegation(
        &self,
        address: Address,
        chain_id: ChainId,
    ) -> Result<DelegationSupport, ActionError> {
        if self.atomic_chains.as_ref().is_some_and(|chains| !chains.contains(&chain_id)) {
            return Ok(DelegationSupport::unsupported(UnsupportedReason::ChainNotEnabled(
                chain_id,
            )));
        }

        let provider = self.providers.get(&chain_id).ok_or_else(|| {
            ActionError::from(eyre::eyre!("no provider configured for chain {chain_id}"))
        })?;
        let code = provider.get_code_at(address).await?;

        let support = self.classify(&code);
        debug!(?support, "probed delegation");
        Ok(support)
    }
}
