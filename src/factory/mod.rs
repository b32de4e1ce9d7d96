//! Rap assembly.
//!
//! Turns a [`RapIntent`] into an ordered [`Rap`]. Assembly never writes on-chain: the only chain
//! access is the allowance read done through the [`ApprovalResolver`].

mod claim;
mod claimable;
mod crosschain;
mod swap;

use crate::{
    approval::{AllowanceReader, ApprovalResolver},
    error::RapError,
    types::{ActionParameters, Asset, Rap, RapAction, RapIntent, RapParameters, UnlockParameters},
};
use alloy::primitives::{Address, ChainId, U256};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Builds [`Rap`]s from user intents.
#[derive(Debug, Clone)]
pub struct RapFactory {
    approvals: ApprovalResolver,
}

impl RapFactory {
    /// Creates a new factory reading allowances through `reader`.
    pub fn new(reader: Arc<dyn AllowanceReader>) -> Self {
        Self { approvals: ApprovalResolver::new(reader) }
    }

    /// The resolver used to decide whether sell legs need an unlock.
    pub fn approvals(&self) -> &ApprovalResolver {
        &self.approvals
    }

    /// Builds the rap for the intent in `parameters`.
    #[instrument(
        skip_all,
        fields(intent = %parameters.rap_type(), chain_id = parameters.chain_id())
    )]
    pub async fn create_rap_by_intent_type(
        &self,
        parameters: &RapParameters,
    ) -> Result<Rap, RapError> {
        let rap = match &parameters.intent {
            RapIntent::Swap(intent) => self.create_unlock_and_swap_rap(intent, parameters).await?,
            RapIntent::CrosschainSwap(intent) => {
                self.create_unlock_and_crosschain_swap_rap(intent, parameters).await?
            }
            RapIntent::Claim(intent) => Self::create_claim_rap(intent),
            RapIntent::ClaimBridge(intent) => Self::create_claim_and_bridge_rap(intent),
            RapIntent::ClaimClaimable(intent) => {
                self.create_claim_claimable_rap(intent, parameters).await?
            }
        };

        debug!(rap = %rap.name(), actions = rap.len(), "built rap");
        Ok(rap)
    }
}

/// An `unlock` action letting `spender` move `amount` of `asset` on behalf of `owner`.
fn unlock_action(
    owner: Address,
    asset: &Asset,
    spender: Address,
    chain_id: ChainId,
    amount: U256,
) -> RapAction {
    RapAction::new(ActionParameters::Unlock(UnlockParameters {
        from_address: owner,
        asset_to_unlock: asset.clone(),
        contract_address: spender,
        chain_id,
        amount,
    }))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{
        approval::tests::FixedAllowance,
        types::{ActionKind, Eip1559Fees, GasParams, Quote, SwapIntent, SwapMetadata},
    };
    use alloy::primitives::{address, bytes};

    pub(crate) const OWNER: Address = address!("70997970C51812dc3A010C7d01b50e0d17dc79C8");
    pub(crate) const ROUTER: Address = address!("Def1C0ded9bec7F1a1670819833240f027b25EfF");
    pub(crate) const USDC: Address = address!("a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48");
    pub(crate) const DAI: Address = address!("6B175474E89094C44Da98b954EedeAC495271d0F");

    pub(crate) fn gas() -> GasParams {
        GasParams::Eip1559(Eip1559Fees {
            max_fee_per_gas: 30_000_000_000,
            max_priority_fee_per_gas: 1_000_000_000,
        })
    }

    pub(crate) fn quote(chain_id: ChainId, sell: Address, buy: Address, amount: U256) -> Quote {
        Quote {
            chain_id,
            from: OWNER,
            sell_token_address: sell,
            buy_token_address: buy,
            sell_amount: amount,
            buy_amount: amount,
            to: ROUTER,
            data: bytes!("d9627aa4"),
            value: if sell.is_zero() { amount } else { U256::ZERO },
            allowance_target: (!sell.is_zero()).then_some(ROUTER),
            allowance_needed: true,
            default_gas_limit: Some(300_000),
        }
    }

    pub(crate) fn factory(allowance: U256) -> RapFactory {
        RapFactory::new(Arc::new(FixedAllowance::new(allowance)))
    }

    #[tokio::test]
    async fn dispatches_by_intent() {
        let amount = U256::from(1_000_000u64);
        let intent = RapIntent::Swap(SwapIntent {
            chain_id: 1,
            asset_to_sell: Asset::erc20(USDC, 1, 6),
            asset_to_buy: Asset::erc20(DAI, 1, 18),
            sell_amount: amount,
            quote: Some(quote(1, USDC, DAI, amount)),
            meta: SwapMetadata::default(),
        });

        let rap = factory(U256::ZERO)
            .create_rap_by_intent_type(&RapParameters::new(intent, gas()))
            .await
            .unwrap();

        assert_eq!(rap.kinds().collect::<Vec<_>>(), vec![ActionKind::Unlock, ActionKind::Swap]);
        assert_eq!(rap.name(), "unlock + swap");
        assert!(rap.actions.iter().all(|action| action.transaction.hash.is_none()));
    }
}
