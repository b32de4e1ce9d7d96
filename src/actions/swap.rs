use super::{AtomicPreparer, PrepareContext, PreparedCall};
use crate::{
    error::{ActionError, ValidationError},
    types::{
        BatchCall, CrosschainSwapParameters, PendingTransaction, Quote, SwapParameters,
        TransactionKind,
    },
    validation::require_address,
};
use alloy::primitives::ChainId;
use async_trait::async_trait;

/// Takes the swap call straight from the aggregator quote.
///
/// Same-chain swaps are tracked as [`TransactionKind::Swap`], cross-chain ones as
/// [`TransactionKind::Bridge`].
#[derive(Debug, Clone, Copy, Default)]
pub struct QuoteSwapPreparer;

impl QuoteSwapPreparer {
    fn prepare_quote(
        ctx: PrepareContext<'_>,
        chain_id: ChainId,
        quote: &Quote,
        kind: TransactionKind,
    ) -> Result<PreparedCall, ActionError> {
        if chain_id != ctx.chain_id || quote.chain_id != ctx.chain_id {
            return Err(ValidationError::ChainMismatch {
                expected: ctx.chain_id,
                got: if chain_id != ctx.chain_id { chain_id } else { quote.chain_id },
            }
            .into());
        }
        let to = require_address("swap target", Some(quote.to))?;

        let call = BatchCall { to, value: quote.value, data: quote.data.clone() };
        let mut transaction = PendingTransaction::new(ctx.wallet.address(), ctx.chain_id, kind)
            .with_call(to, quote.data.clone(), quote.value)
            .with_nonce(ctx.nonce);
        transaction.gas_limit = quote.default_gas_limit;

        Ok(PreparedCall { call: Some(call), transaction: Some(transaction) })
    }
}

#[async_trait]
impl AtomicPreparer<SwapParameters> for QuoteSwapPreparer {
    async fn prepare(
        &self,
        ctx: PrepareContext<'_>,
        parameters: &SwapParameters,
    ) -> Result<PreparedCall, ActionError> {
        Self::prepare_quote(ctx, parameters.chain_id, &parameters.quote, TransactionKind::Swap)
    }
}

#[async_trait]
impl AtomicPreparer<CrosschainSwapParameters> for QuoteSwapPreparer {
    async fn prepare(
        &self,
        ctx: PrepareContext<'_>,
        parameters: &CrosschainSwapParameters,
    ) -> Result<PreparedCall, ActionError> {
        Self::prepare_quote(ctx, parameters.chain_id, &parameters.quote, TransactionKind::Bridge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        factory::tests::{DAI, ROUTER, USDC, gas, quote},
        signers::DynSigner,
        types::{Asset, SwapMetadata},
    };
    use alloy::primitives::{Address, U256};

    fn swap() -> SwapParameters {
        let amount = U256::from(1_000u64);
        SwapParameters {
            chain_id: 1,
            quote: quote(1, Address::ZERO, DAI, amount),
            asset_to_sell: Asset::native(1),
            asset_to_buy: Asset::erc20(DAI, 1, 18),
            sell_amount: amount,
            requires_approve: false,
            gas_params: gas(),
            nonce: None,
            meta: SwapMetadata::default(),
        }
    }

    #[tokio::test]
    async fn call_and_record_come_from_quote() {
        let signer = DynSigner::random();
        let ctx = PrepareContext { wallet: &signer, chain_id: 1, nonce: Some(12) };

        let prepared = QuoteSwapPreparer.prepare(ctx, &swap()).await.unwrap();

        let call = prepared.call.unwrap();
        assert_eq!(call.to, ROUTER);
        assert_eq!(call.value, U256::from(1_000u64));

        let tx = prepared.transaction.unwrap();
        assert_eq!(tx.from, signer.address());
        assert_eq!(tx.kind, TransactionKind::Swap);
        assert_eq!(tx.nonce, Some(12));
        assert_eq!(tx.gas_limit, Some(300_000));
        assert!(tx.hash.is_none());
    }

    #[tokio::test]
    async fn rejects_mismatched_quote() {
        let signer = DynSigner::random();
        let ctx = PrepareContext { wallet: &signer, chain_id: 1, nonce: None };

        let mut params = swap();
        params.quote = quote(10, USDC, DAI, U256::from(1));
        let err = QuoteSwapPreparer.prepare(ctx, &params).await.unwrap_err();
        assert!(matches!(
            err,
            ActionError::Validation(ValidationError::ChainMismatch { expected: 1, got: 10 })
        ));

        let mut params = swap();
        params.quote.to = Address::ZERO;
        let err = QuoteSwapPreparer.prepare(ctx, &params).await.unwrap_err();
        assert!(matches!(err, ActionError::Validation(ValidationError::ZeroAddress(_))));
    }
}
