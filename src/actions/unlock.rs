use super::{AtomicPreparer, PrepareContext, PreparedCall};
use crate::{
    approval::AllowanceReader,
    error::{ActionError, ValidationError},
    types::{BatchCall, IERC20, UnlockParameters},
    validation::require_address,
};
use alloy::{primitives::U256, sol_types::SolCall};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Folds an ERC-20 `approve` into the batch.
///
/// Contributes no call when the current allowance already covers the amount, which happens when
/// another approval landed between building the rap and executing it.
#[derive(Debug, Clone)]
pub struct Erc20UnlockPreparer {
    reader: Arc<dyn AllowanceReader>,
}

impl Erc20UnlockPreparer {
    /// Creates a new preparer reading allowances through `reader`.
    pub fn new(reader: Arc<dyn AllowanceReader>) -> Self {
        Self { reader }
    }
}

#[async_trait]
impl AtomicPreparer<UnlockParameters> for Erc20UnlockPreparer {
    async fn prepare(
        &self,
        ctx: PrepareContext<'_>,
        parameters: &UnlockParameters,
    ) -> Result<PreparedCall, ActionError> {
        if parameters.chain_id != ctx.chain_id {
            return Err(ValidationError::ChainMismatch {
                expected: ctx.chain_id,
                got: parameters.chain_id,
            }
            .into());
        }
        if parameters.asset_to_unlock.is_native() {
            return Ok(PreparedCall::default());
        }

        let token = parameters.asset_to_unlock.address;
        let spender = require_address("unlock spender", Some(parameters.contract_address))?;
        let allowance = self
            .reader
            .allowance(parameters.from_address, token, spender, parameters.chain_id)
            .await?;
        if allowance >= parameters.amount {
            debug!(%token, %spender, %allowance, "allowance already sufficient, skipping approve");
            return Ok(PreparedCall::default());
        }

        let data = IERC20::approveCall { spender, amount: parameters.amount }.abi_encode();
        Ok(PreparedCall {
            call: Some(BatchCall { to: token, value: U256::ZERO, data: data.into() }),
            transaction: None,
        })
    }
}
