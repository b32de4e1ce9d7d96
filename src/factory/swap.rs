use super::{RapFactory, unlock_action};
use crate::{
    approval::SpenderCandidate,
    error::{RapError, ValidationError},
    types::{ActionParameters, Rap, RapAction, RapParameters, SwapIntent, SwapParameters},
};

impl RapFactory {
    /// Builds `[unlock?, swap]`.
    ///
    /// The unlock is only added when the sell asset is an ERC-20 whose current allowance for the
    /// quote's spender does not cover the sell amount.
    pub async fn create_unlock_and_swap_rap(
        &self,
        intent: &SwapIntent,
        parameters: &RapParameters,
    ) -> Result<Rap, RapError> {
        let quote = intent
            .quote
            .as_ref()
            .ok_or(RapError::IncompleteIntent { intent: "swap", what: "a quote" })?;
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
                SpenderCandidate::from(quote),
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

        actions.push(RapAction::new(ActionParameters::Swap(SwapParameters {
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
    use crate::{
        error::{RapError, ValidationError},
        types::{
            ActionKind, ActionParameters, Asset, RapIntent, RapParameters, SwapIntent,
            SwapMetadata,
        },
    };
    use alloy::primitives::{Address, U256};

    fn swap(sell: Asset, amount: U256) -> SwapIntent {
        SwapIntent {
            chain_id: 1,
            quote: Some(quote(1, sell.address, DAI, amount)),
            asset_to_sell: sell,
            asset_to_buy: Asset::erc20(DAI, 1, 18),
            sell_amount: amount,
            meta: SwapMetadata::default(),
        }
    }

    fn parameters(intent: &SwapIntent) -> RapParameters {
        RapParameters::new(RapIntent::Swap(intent.clone()), gas()).with_nonce(Some(9))
    }

    #[tokio::test]
    async fn native_sell_has_no_unlock() {
        let intent = swap(Asset::native(1), U256::from(10).pow(U256::from(18)));

        let rap = factory(U256::ZERO)
            .create_unlock_and_swap_rap(&intent, &parameters(&intent))
            .await
            .unwrap();

        assert_eq!(rap.kinds().collect::<Vec<_>>(), vec![ActionKind::Swap]);
        let ActionParameters::Swap(swap) = &rap.actions[0].parameters else { panic!() };
        assert!(!swap.requires_approve);
        assert_eq!(swap.nonce, Some(9));
    }

    #[tokio::test]
    async fn unlock_precedes_swap() {
        let amount = U256::from(5_000_000u64);
        let intent = swap(Asset::erc20(USDC, 1, 6), amount);

        let rap = factory(U256::from(1))
            .create_unlock_and_swap_rap(&intent, &parameters(&intent))
            .await
            .unwrap();

        let unlock = rap.position(ActionKind::Unlock).unwrap();
        let swap_index = rap.position(ActionKind::Swap).unwrap();
        assert!(unlock < swap_index);

        let ActionParameters::Unlock(params) = &rap.actions[unlock].parameters else { panic!() };
        assert_eq!(params.from_address, OWNER);
        assert_eq!(params.contract_address, ROUTER);
        assert_eq!(params.asset_to_unlock.address, USDC);
        assert_eq!(params.amount, amount);

        let ActionParameters::Swap(swap) = &rap.actions[swap_index].parameters else { panic!() };
        assert!(swap.requires_approve);
    }

    #[tokio::test]
    async fn sufficient_allowance_skips_unlock() {
        let amount = U256::from(5_000_000u64);
        let intent = swap(Asset::erc20(USDC, 1, 6), amount);

        let rap = factory(amount)
            .create_unlock_and_swap_rap(&intent, &parameters(&intent))
            .await
            .unwrap();

        assert_eq!(rap.kinds().collect::<Vec<_>>(), vec![ActionKind::Swap]);
    }

    #[tokio::test]
    async fn rejects_incomplete_quotes() {
        let mut intent = swap(Asset::erc20(USDC, 1, 6), U256::from(1));
        intent.quote.as_mut().unwrap().allowance_target = Some(Address::ZERO);
        let err = factory(U256::ZERO)
            .create_unlock_and_swap_rap(&intent, &parameters(&intent))
            .await
            .unwrap_err();
        assert!(matches!(err, RapError::Validation(ValidationError::ZeroAddress(_))));

        intent.quote = None;
        let err = factory(U256::ZERO)
            .create_unlock_and_swap_rap(&intent, &parameters(&intent))
            .await
            .unwrap_err();
        assert!(matches!(err, RapError::IncompleteIntent { intent: "swap", .. }));

        let mut intent = swap(Asset::erc20(USDC, 1, 6), U256::from(1));
        intent.quote.as_mut().unwrap().chain_id = 10;
        let err = factory(U256::ZERO)
            .create_unlock_and_swap_rap(&intent, &parameters(&intent))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RapError::Validation(ValidationError::ChainMismatch { expected: 1, got: 10 })
        ));
    }
}
