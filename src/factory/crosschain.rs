use super::{RapFactory, unlock_action};
use crate::{
    approval::SpenderCandidate,
    error::{RapError, ValidationError},
    types::{
        ActionParameters, CrosschainSwapIntent, CrosschainSwapParameters, Rap, RapAction,
        RapParameters,
    },
};

impl RapFactory {
    /// Builds `[unlock?, crosschainSwap]`.
    ///
    /// The approval is resolved on the source chain, which is where the quote's spender pulls
    /// the sold tokens.
    pub async fn create_unlock_and_crosschain_swap_rap(
        &self,
        intent: &CrosschainSwapIntent,
        parameters: &RapParameters,
    ) -> Result<Rap, RapError> {
        let quote = intent
            .quote
            .as_ref()
            .ok_or(RapError::IncompleteIntent { intent: "crosschainSwap", what: "a quote" })?;
        if quote.chain_id != intent.chain_id {
            return Err(ValidationError::ChainMismatch {
                expected: intent.chain_id,
                got: quote.chain_id,
            }
            .into());
        }

        let approval = self
            .approvals
            .resolve(
                quote.from,
                &intent.asset_to_sell,
                SpenderCandidate::from(&quote.quote),
                intent.sell_amount,
                intent.chain_id,
            )
            .await?;

        let mut actions = Vec::with_capacity(2);
        if approval.requires_approve
            && let Some(spender) = approval.allowance_target_address
        {
            actions.push(unlock_action(
                quote.from,
                &intent.asset_to_sell,
                spender,
                intent.chain_id,
                intent.sell_amount,
            ));
        }

        actions.push(RapAction::new(ActionParameters::CrosschainSwap(CrosschainSwapParameters {
            chain_id: intent.chain_id,
            quote: quote.clone(),
            asset_to_sell: intent.asset_to_sell.clone(),
            asset_to_buy: intent.asset_to_buy.clone(),
            sell_amount: intent.sell_amount,
            requires_approve: approval.requires_approve,
            gas_params: parameters.gas_params,
            nonce: parameters.nonce,
            meta: intent.meta.clone(),
        })));

        Ok(Rap::new(actions))
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::*;
    use crate::types::{
        ActionKind, ActionParameters, Asset, CrosschainQuote, CrosschainSwapIntent, RapIntent,
        RapParameters, SwapMetadata,
    };
    use alloy::primitives::{Address, U256, address};

    const USDC_BASE: Address = address!("833589fCD6eDb6E08f4c7C32D4f71b54bdA02913");

    fn bridge(sell: Asset, amount: U256) -> CrosschainSwapIntent {
        CrosschainSwapIntent {
            chain_id: 1,
            quote: Some(CrosschainQuote {
                quote: quote(1, sell.address, USDC_BASE, amount),
                to_chain_id: 8453,
                bridge: Some("across".into()),
            }),
            asset_to_sell: sell,
            asset_to_buy: Asset::erc20(USDC_BASE, 8453, 6),
            sell_amount: amount,
            meta: SwapMetadata::default(),
        }
    }

    #[tokio::test]
    async fn erc20_bridge_with_missing_allowance() {
        let intent = bridge(Asset::erc20(USDC, 1, 6), U256::from(20_000_000u64));
        let parameters = RapParameters::new(RapIntent::CrosschainSwap(intent.clone()), gas());

        let rap = factory(U256::ZERO)
            .create_unlock_and_crosschain_swap_rap(&intent, &parameters)
            .await
            .unwrap();

        assert_eq!(
            rap.kinds().collect::<Vec<_>>(),
            vec![ActionKind::Unlock, ActionKind::CrosschainSwap]
        );
        let ActionParameters::CrosschainSwap(swap) = &rap.actions[1].parameters else { panic!() };
        assert!(swap.requires_approve);
        assert_eq!(swap.quote.to_chain_id, 8453);
        assert_eq!(rap.name(), "unlock + crosschainSwap");
    }

    #[tokio::test]
    async fn native_bridge_never_unlocks() {
        let intent = bridge(Asset::native(1), U256::from(1));
        let parameters = RapParameters::new(RapIntent::CrosschainSwap(intent.clone()), gas());

        let rap = factory(U256::ZERO)
            .create_unlock_and_crosschain_swap_rap(&intent, &parameters)
            .await
            .unwrap();

        assert_eq!(rap.kinds().collect::<Vec<_>>(), vec![ActionKind::CrosschainSwap]);
    }
}
