use super::RapEngine;
use crate::{
    actions::ActionContext,
    constants::MISSING_FIRST_NONCE_MESSAGE,
    error::ActionError,
    signers::DynSigner,
    types::{ExecutionOutcome, Rap, RapParameters},
};
use alloy::primitives::B256;
use tracing::{debug, error, trace};

impl RapEngine {
    /// Executes `rap` one action at a time.
    ///
    /// The first action runs with the caller's nonce and must return the nonce the rest of the
    /// sequence is based on. A failing action does not stop the sequence, the first error is
    /// reported once every action ran.
    pub(super) async fn run_sequential(
        &self,
        wallet: &DynSigner,
        parameters: &RapParameters,
        rap: &mut Rap,
    ) -> ExecutionOutcome {
        if rap.is_empty() {
            return ExecutionOutcome::success(None, parameters.nonce);
        }

        let chain_id = parameters.chain_id();
        let delay = self.config.should_delay_for_node_ack(chain_id);

        self.metrics.sequential_actions.increment(1);
        let first = {
            let ctx = self.context(wallet, parameters, rap, 0, parameters.nonce);
            self.executors.execute(ctx, &rap.actions[0].parameters).await
        };
        let first = match first {
            Ok(result) => result,
            Err(err) => {
                self.metrics.action_failures.increment(1);
                error!(%err, kind = %rap.actions[0].kind(), "first action failed");
                return ExecutionOutcome {
                    error_message: Some(err.to_string()),
                    hash: None,
                    nonce: parameters.nonce,
                };
            }
        };
        rap.record_hash(0, first.hash);

        let Some(base) = first.nonce else {
            error!(kind = %rap.actions[0].kind(), "first action returned no nonce");
            return ExecutionOutcome {
                error_message: Some(MISSING_FIRST_NONCE_MESSAGE.to_string()),
                hash: first.hash,
                nonce: parameters.nonce,
            };
        };

        let Some(last_nonce) = base.checked_add(rap.len() as u64 - 1) else {
            let err: ActionError =
                eyre::eyre!("nonce {base} cannot be chained over {} actions", rap.len()).into();
            error!(%err, "cannot chain nonces");
            return ExecutionOutcome {
                error_message: Some(err.to_string()),
                hash: first.hash,
                nonce: parameters.nonce,
            };
        };

        let mut latest_hash: Option<B256> = first.hash;
        let mut overall_hash: Option<B256> = first.hash;
        let mut first_error: Option<String> = None;

        for index in 1..rap.len() {
            if latest_hash.is_some() && delay {
                let wait = self.config.node_ack_delay(chain_id);
                trace!(?wait, index, "waiting for node acknowledgment");
                tokio::time::sleep(wait).await;
            }

            self.metrics.sequential_actions.increment(1);
            let result = {
                let ctx = self.context(wallet, parameters, rap, index, Some(base));
                self.executors.execute(ctx, &rap.actions[index].parameters).await
            };

            match result {
                Ok(result) => {
                    debug!(index, hash = ?result.hash, "action executed");
                    rap.record_hash(index, result.hash);
                    latest_hash = result.hash;
                    if result.hash.is_some() {
                        overall_hash = result.hash;
                    }
                }
                Err(err) => {
                    self.metrics.action_failures.increment(1);
                    error!(%err, index, kind = %rap.actions[index].kind(), "action failed");
                    first_error.get_or_insert_with(|| err.to_string());
                    latest_hash = None;
                }
            }
        }

        ExecutionOutcome {
            error_message: first_error,
            hash: overall_hash,
            nonce: Some(last_nonce),
        }
    }

    fn context<'a>(
        &self,
        wallet: &'a DynSigner,
        parameters: &'a RapParameters,
        rap: &'a Rap,
        index: usize,
        base_nonce: Option<u64>,
    ) -> ActionContext<'a> {
        ActionContext {
            wallet,
            rap,
            index,
            base_nonce,
            gas_params: &parameters.gas_params,
            gas_fee_params_by_speed: &parameters.gas_fee_params_by_speed,
        }
    }
}
