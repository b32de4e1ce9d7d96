use super::{RapEngine, is_user_rejection};
use crate::{
    actions::PrepareContext,
    constants::NO_CALLS_MESSAGE,
    delegation::{BatchKind, BatchRequest},
    error::ActionError,
    signers::DynSigner,
    storage::StorageApi,
    types::{BatchCall, ExecutionOutcome, PendingTransaction, Rap, RapParameters},
};
use tracing::{debug, info, warn};

/// How an atomic attempt ended.
#[derive(Debug)]
pub(super) enum AtomicAttempt {
    /// The rap does not qualify, nothing was attempted.
    Skipped,
    /// The attempt failed with a recoverable error.
    Fallback,
    /// The attempt is terminal, either submitted or rejected by the user.
    Done(ExecutionOutcome),
}

impl RapEngine {
    /// Tries to execute `rap` as one batched transaction.
    pub(super) async fn try_atomic(
        &self,
        wallet: &DynSigner,
        parameters: &RapParameters,
        rap: &mut Rap,
    ) -> AtomicAttempt {
        let chain_id = parameters.chain_id();
        let address = wallet.address();

        match self.probe.supports_delegation(address, chain_id).await {
            Ok(support) if support.supported => {}
            Ok(support) => {
                debug!(reason = ?support.reason, "account cannot batch, running sequentially");
                return AtomicAttempt::Skipped;
            }
            Err(err) => {
                warn!(%err, "delegation probe failed, running sequentially");
                return AtomicAttempt::Skipped;
            }
        }

        let (Some(nonce), Some(fees)) = (parameters.nonce, parameters.gas_params.as_eip1559())
        else {
            debug!("atomic execution needs a nonce and EIP-1559 fees, running sequentially");
            return AtomicAttempt::Skipped;
        };

        if let Some(kind) = rap.kinds().find(|kind| !self.preparers.supports(*kind)) {
            debug!(%kind, "no atomic preparer, running sequentially");
            return AtomicAttempt::Skipped;
        }

        self.metrics.atomic_attempts.increment(1);

        let ctx = PrepareContext { wallet, chain_id, nonce: Some(nonce) };
        let mut calls = Vec::with_capacity(rap.len());
        let mut tracked: Option<PendingTransaction> = None;
        for action in &rap.actions {
            match self.preparers.prepare(ctx, &action.parameters).await {
                Ok(prepared) => {
                    calls.extend(prepared.call);
                    if prepared.transaction.is_some() {
                        tracked = prepared.transaction;
                    }
                }
                Err(err) => return self.atomic_failed(err),
            }
        }

        if calls.is_empty() {
            return AtomicAttempt::Done(ExecutionOutcome::failure(NO_CALLS_MESSAGE));
        }

        let request = BatchRequest {
            signer: wallet,
            chain_id,
            value: BatchCall::total_value(&calls),
            calls,
            fees,
            nonce,
        };
        let receipt = match self.submitter.submit_batch(request).await {
            Ok(receipt) => receipt,
            Err(err) => return self.atomic_failed(err),
        };

        self.metrics.atomic_successes.increment(1);
        info!(hash = %receipt.hash, kind = ?receipt.kind, nonce, "submitted atomic batch");

        if let Some(mut tx) = tracked {
            tx.hash = Some(receipt.hash);
            tx.nonce = Some(nonce);
            tx.batch = true;
            tx.delegation = receipt.kind == BatchKind::Eip7702;
            tx.gas_limit = receipt.gas_limit.or(tx.gas_limit);
            if let Err(err) = self.storage.write_pending_transaction(&tx).await {
                warn!(%err, hash = %receipt.hash, "failed to track batch transaction");
            }
        }

        for index in 0..rap.len() {
            rap.record_hash(index, Some(receipt.hash));
        }

        AtomicAttempt::Done(ExecutionOutcome::success(Some(receipt.hash), Some(nonce)))
    }

    /// A user rejection ends the run, anything else falls back to sequential execution.
    fn atomic_failed(&self, err: ActionError) -> AtomicAttempt {
        if is_user_rejection(&err) {
            self.metrics.user_rejections.increment(1);
            info!(%err, "user rejected atomic batch");
            return AtomicAttempt::Done(ExecutionOutcome::failure(err.to_string()));
        }

        warn!(%err, "atomic execution failed, falling back to sequential");
        AtomicAttempt::Fallback
    }
}
