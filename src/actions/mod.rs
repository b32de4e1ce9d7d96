//! Action executors and atomic preparers.
//!
//! Every action kind is executed by an [`ActionExecutor`] that sends exactly one transaction.
//! Unlocks and swaps can additionally be folded into a single batched transaction, for which they
//! expose an [`AtomicPreparer`] turning their parameters into a [`BatchCall`].
//!
//! Both are injected into the engine through [`Executors`] and [`Preparers`], which dispatch on
//! [`ActionParameters`] with an exhaustive match.

mod swap;
pub use swap::QuoteSwapPreparer;

mod unlock;
pub use unlock::Erc20UnlockPreparer;

use crate::{
    error::ActionError,
    signers::DynSigner,
    types::{
        ActionKind, ActionParameters, BatchCall, ClaimBridgeParameters, ClaimClaimableParameters,
        ClaimParameters, CrosschainSwapParameters, GasFeeParamsBySpeed, GasParams,
        PendingTransaction, Rap, SwapParameters, UnlockParameters,
    },
};
use alloy::primitives::{B256, ChainId};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

/// What an executor sees of the rap it is running in.
#[derive(Debug, Clone, Copy)]
pub struct ActionContext<'a> {
    /// The signing wallet.
    pub wallet: &'a DynSigner,
    /// The rap being executed.
    pub rap: &'a Rap,
    /// Position of the action in the rap.
    pub index: usize,
    /// The nonce the sequence is based on.
    ///
    /// The first action receives the caller's nonce. Every later action receives the nonce
    /// returned by the first one, see [`ActionContext::nonce`].
    pub base_nonce: Option<u64>,
    /// Gas parameters selected by the user.
    pub gas_params: &'a GasParams,
    /// Fee parameters for every speed preset.
    pub gas_fee_params_by_speed: &'a GasFeeParamsBySpeed,
}

impl ActionContext<'_> {
    /// The nonce this action's transaction must use, `base_nonce + index`.
    ///
    /// `None` without a base nonce, or if the sum does not fit a `u64`.
    pub fn nonce(&self) -> Option<u64> {
        self.base_nonce.and_then(|nonce| nonce.checked_add(self.index as u64))
    }
}

/// Result of a successful [`ActionExecutor::execute`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionResult {
    /// Nonce the next actions are based on.
    pub nonce: Option<u64>,
    /// Hash of the sent transaction.
    pub hash: Option<B256>,
}

/// Sends the transaction of one action.
#[async_trait]
pub trait ActionExecutor<P: Send + Sync>: Debug + Send + Sync {
    /// Executes the action described by `parameters`.
    async fn execute(
        &self,
        ctx: ActionContext<'_>,
        parameters: &P,
    ) -> Result<ActionResult, ActionError>;
}

/// What a preparer sees of the atomic attempt.
#[derive(Debug, Clone, Copy)]
pub struct PrepareContext<'a> {
    /// The signing wallet.
    pub wallet: &'a DynSigner,
    /// Chain the batch is sent on.
    pub chain_id: ChainId,
    /// Nonce of the batch transaction.
    pub nonce: Option<u64>,
}

/// Output of an [`AtomicPreparer`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreparedCall {
    /// The call to add to the batch, `None` if the action has nothing to contribute.
    pub call: Option<BatchCall>,
    /// Local record to track once the batch is submitted.
    pub transaction: Option<PendingTransaction>,
}

/// Turns the parameters of one action into a call of an atomic batch.
#[async_trait]
pub trait AtomicPreparer<P: Send + Sync>: Debug + Send + Sync {
    /// Prepares the batch call for `parameters`.
    async fn prepare(
        &self,
        ctx: PrepareContext<'_>,
        parameters: &P,
    ) -> Result<PreparedCall, ActionError>;
}

/// One executor per action kind.
#[derive(Debug, Clone)]
pub struct Executors {
    /// Executor of [`ActionKind::Unlock`].
    pub unlock: Arc<dyn ActionExecutor<UnlockParameters>>,
    /// Executor of [`ActionKind::Swap`].
    pub swap: Arc<dyn ActionExecutor<SwapParameters>>,
    /// Executor of [`ActionKind::CrosschainSwap`].
    pub crosschain_swap: Arc<dyn ActionExecutor<CrosschainSwapParameters>>,
    /// Executor of [`ActionKind::Claim`].
    pub claim: Arc<dyn ActionExecutor<ClaimParameters>>,
    /// Executor of [`ActionKind::ClaimBridge`].
    pub claim_bridge: Arc<dyn ActionExecutor<ClaimBridgeParameters>>,
    /// Executor of [`ActionKind::ClaimClaimable`].
    pub claim_claimable: Arc<dyn ActionExecutor<ClaimClaimableParameters>>,
}

impl Executors {
    /// Executes `parameters` with the executor of their kind.
    pub async fn execute(
        &self,
        ctx: ActionContext<'_>,
        parameters: &ActionParameters,
    ) -> Result<ActionResult, ActionError> {
        match parameters {
            ActionParameters::Unlock(p) => self.unlock.execute(ctx, p).await,
            ActionParameters::Swap(p) => self.swap.execute(ctx, p).await,
            ActionParameters::CrosschainSwap(p) => self.crosschain_swap.execute(ctx, p).await,
            ActionParameters::Claim(p) => self.claim.execute(ctx, p).await,
            ActionParameters::ClaimBridge(p) => self.claim_bridge.execute(ctx, p).await,
            ActionParameters::ClaimClaimable(p) => self.claim_claimable.execute(ctx, p).await,
        }
    }
}

/// Atomic preparers, for the action kinds that can be batched.
#[derive(Debug, Clone, Default)]
pub struct Preparers {
    /// Preparer of [`ActionKind::Unlock`].
    pub unlock: Option<Arc<dyn AtomicPreparer<UnlockParameters>>>,
    /// Preparer of [`ActionKind::Swap`].
    pub swap: Option<Arc<dyn AtomicPreparer<SwapParameters>>>,
    /// Preparer of [`ActionKind::CrosschainSwap`].
    pub crosschain_swap: Option<Arc<dyn AtomicPreparer<CrosschainSwapParameters>>>,
}

impl Preparers {
    /// Whether a preparer is registered for `kind`.
    ///
    /// Claim kinds can never be batched.
    pub fn supports(&self, kind: ActionKind) -> bool {
        match kind {
            ActionKind::Unlock => self.unlock.is_some(),
            ActionKind::Swap => self.swap.is_some(),
            ActionKind::CrosschainSwap => self.crosschain_swap.is_some(),
            ActionKind::Claim | ActionKind::ClaimBridge | ActionKind::ClaimClaimable => false,
        }
    }

    /// Prepares `parameters` with the preparer of their kind.
    ///
    /// Callers are expected to check [`Preparers::supports`] first.
    pub async fn prepare(
        &self,
        ctx: PrepareContext<'_>,
        parameters: &ActionParameters,
    ) -> Result<PreparedCall, ActionError> {
        match (parameters, &self.unlock, &self.swap, &self.crosschain_swap) {
            (ActionParameters::Unlock(p), Some(preparer), _, _) => preparer.prepare(ctx, p).await,
            (ActionParameters::Swap(p), _, Some(preparer), _) => preparer.prepare(ctx, p).await,
            (ActionParameters::CrosschainSwap(p), _, _, Some(preparer)) => {
                preparer.prepare(ctx, p).await
            }
            _ => Err(eyre::eyre!("no atomic preparer for {}", parameters.kind()).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Eip1559Fees;

    #[test]
    fn nonce_offsets_by_index() {
        let wallet = &DynSigner::random();
        let rap = &Rap::default();
        let gas_params =
            &GasParams::Eip1559(Eip1559Fees { max_fee_per_gas: 2, max_priority_fee_per_gas: 1 });
        let gas_fee_params_by_speed = &GasFeeParamsBySpeed::default();
        let ctx = move |index, base_nonce| ActionContext {
            wallet,
            rap,
            index,
            base_nonce,
            gas_params,
            gas_fee_params_by_speed,
        };

        assert_eq!(ctx(0, Some(7)).nonce(), Some(7));
        assert_eq!(ctx(2, Some(7)).nonce(), Some(9));
        assert_eq!(ctx(2, None).nonce(), None);
        assert_eq!(ctx(0, Some(u64::MAX)).nonce(), Some(u64::MAX));
        assert_eq!(ctx(1, Some(u64::MAX)).nonce(), None);
    }
}
