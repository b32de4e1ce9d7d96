//! Rap execution.
//!
//! A rap either runs as one atomic batch, when the account supports delegation-based batching
//! and the caller opted in, or action by action with nonces chained from the first transaction.
//! A failed atomic attempt falls back to sequential execution of the same rap, unless the user
//! rejected it.

mod atomic;
mod rejection;
pub use rejection::is_user_rejection;
mod sequential;

use crate::{
    actions::{Executors, Preparers},
    config::EngineConfig,
    delegation::{BatchSubmitter, DelegationProbe},
    factory::RapFactory,
    metrics::EngineMetrics,
    signers::DynSigner,
    storage::RapStorage,
    types::{ExecutionOutcome, Rap, RapParameters},
};
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Builds and executes raps.
#[derive(Debug, Clone)]
pub struct RapEngine {
    config: EngineConfig,
    factory: RapFactory,
    executors: Executors,
    preparers: Preparers,
    probe: Arc<dyn DelegationProbe>,
    submitter: Arc<dyn BatchSubmitter>,
    storage: RapStorage,
    metrics: Arc<EngineMetrics>,
}

impl RapEngine {
    /// Creates a new engine.
    pub fn new(
        config: EngineConfig,
        factory: RapFactory,
        executors: Executors,
        preparers: Preparers,
        probe: Arc<dyn DelegationProbe>,
        submitter: Arc<dyn BatchSubmitter>,
        storage: RapStorage,
    ) -> Self {
        Self {
            config,
            factory,
            executors,
            preparers,
            probe,
            submitter,
            storage,
            metrics: Arc::new(EngineMetrics::default()),
        }
    }

    /// The factory raps are built with.
    pub fn factory(&self) -> &RapFactory {
        &self.factory
    }

    /// Builds the rap for `parameters` and executes it with `wallet`.
    ///
    /// Never fails: build and execution errors are reported through
    /// [`ExecutionOutcome::error_message`].
    #[instrument(
        skip_all,
        fields(
            intent = %parameters.rap_type(),
            chain_id = parameters.chain_id(),
            wallet = %wallet.address(),
        )
    )]
    pub async fn execute_rap(
        &self,
        wallet: &DynSigner,
        parameters: &RapParameters,
    ) -> ExecutionOutcome {
        let mut rap = match self.factory.create_rap_by_intent_type(parameters).await {
            Ok(rap) => rap,
            Err(err) => {
                error!(%err, "failed to build rap");
                self.metrics.failed.increment(1);
                return ExecutionOutcome::failure(err.to_string());
            }
        };

        self.execute_built_rap(wallet, parameters, &mut rap).await
    }

    /// Executes an already built `rap`.
    ///
    /// The hash of every transaction sent is recorded on the action that sent it.
    pub async fn execute_built_rap(
        &self,
        wallet: &DynSigner,
        parameters: &RapParameters,
        rap: &mut Rap,
    ) -> ExecutionOutcome {
        let name = rap.name();
        info!(rap = %name, actions = rap.len(), nonce = ?parameters.nonce, "executing rap");
        self.metrics.executed.increment(1);

        if self.atomic_allowed(parameters) {
            match self.try_atomic(wallet, parameters, rap).await {
                atomic::AtomicAttempt::Done(outcome) => return self.finish(&name, outcome),
                atomic::AtomicAttempt::Fallback => self.metrics.atomic_fallbacks.increment(1),
                atomic::AtomicAttempt::Skipped => {}
            }
        }

        let outcome = self.run_sequential(wallet, parameters, rap).await;
        self.finish(&name, outcome)
    }

    /// Whether an atomic attempt may be made for `parameters` at all.
    fn atomic_allowed(&self, parameters: &RapParameters) -> bool {
        parameters.rap_type().supports_atomic()
            && parameters.atomic
            && self.config.delegation_enabled
    }

    fn finish(&self, name: &str, outcome: ExecutionOutcome) -> ExecutionOutcome {
        match &outcome.error_message {
            None => {
                info!(rap = %name, hash = ?outcome.hash, nonce = ?outcome.nonce, "rap executed")
            }
            Some(err) => {
                self.metrics.failed.increment(1);
                error!(rap = %name, %err, hash = ?outcome.hash, "rap failed");
            }
        }
        outcome
    }
}
