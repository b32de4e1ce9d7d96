use super::{RapFactory, unlock_action};
use crate::{
    approval::SpenderCandidate,
    error::{RapError, ValidationError},
    types::{
        ActionParameters, ClaimClaimableIntent, ClaimClaimableParameters, ClaimableClaim,
        ClaimableRequest, ClaimableTransaction, Rap, RapAction, RapParameters, SwapMetadata,
        SwapParameters,
    },
    validation::{parse_address, parse_hex, parse_value, require_address},
};
use alloy::primitives::U256;

impl RapFactory {
    /// Builds `[claimClaimable, unlock?, swap?]`.
    pub async fn create_claim_claimable_rap(
        &self,
        intent: &ClaimClaimableIntent,
        parameters: &RapParameters,
    ) -> Result<Rap, RapError> {
        match &intent.claim {
            ClaimableRequest::Sponsored { claimable_id } => {
                self.create_sponsored_claim_claimable_rap(intent, claimable_id, parameters).await
            }
            ClaimableRequest::Transaction { to, data, value } => {
                let tx = ClaimableTransaction {
                    to: require_address("claim to", Some(parse_address("claim to", to)?))?,
                    data: parse_hex("claim data", data)?,
                    value: value
                        .as_deref()
                        .map(|value| parse_value("claim value", value))
                        .transpose()?
                        .unwrap_or(U256::ZERO),
                };
                self.create_transaction_claim_claimable_rap(intent, tx, parameters).await
            }
        }
    }

    /// Builds a claimable rap whose claim is performed by the backend.
    pub async fn create_sponsored_claim_claimable_rap(
        &self,
        intent: &ClaimClaimableIntent,
        claimable_id: &str,
        parameters: &RapParameters,
    ) -> Result<Rap, RapError> {
        if claimable_id.trim().is_empty() {
            return Err(ValidationError::MissingField("claimable id").into());
        }
        let claim = ClaimableClaim::Sponsored { claimable_id: claimable_id.to_string() };
        self.assemble_claimable_rap(intent, claim, parameters).await
    }

    /// Builds a claimable rap whose claim is a transaction sent by the user.
    pub async fn create_transaction_claim_claimable_rap(
        &self,
        intent: &ClaimClaimableIntent,
        tx: ClaimableTransaction,
        parameters: &RapParameters,
    ) -> Result<Rap, RapError> {
        self.assemble_claimable_rap(intent, ClaimableClaim::Transaction(tx), parameters).await
    }

    async fn assemble_claimable_rap(
        &self,
        intent: &ClaimClaimableIntent,
        claim: ClaimableClaim,
        parameters: &RapParameters,
    ) -> Result<Rap, RapError> {
        let mut actions = vec![RapAction::new(ActionParameters::ClaimClaimable(
            ClaimClaimableParameters {
                address: intent.address,
                chain_id: intent.chain_id,
                asset: intent.asset.clone(),
                claim,
            },
        ))];

        let Some(swap) = &intent.swap else { return Ok(Rap::new(actions)) };
        if swap.quote.chain_id != intent.chain_id {
            return Err(ValidationError::ChainMismatch {
                expected: intent.chain_id,
                got: swap.quote.chain_id,
            }
            .into());
        }

        let approval = self
            .approvals
            .resolve(
                intent.address,
                &intent.asset,
                SpenderCandidate::from(&swap.quote),
                intent.amount,
                intent.chain_id,
            )
            .await?;

        if approval.requires_approve
            && let Some(spender) = approval.allowance_target_address
        {
            actions.push(unlock_action(
                intent.address,
                &intent.asset,
                spender,
                intent.chain_id,
                intent.amount,
            ));
        }

        actions.push(RapAction::new(ActionParameters::Swap(SwapParameters {
            chain_id: intent.chain_id,
            quote: swap.quote.clone(),
            asset_to_sell: intent.asset.clone(),
            asset_to_buy: swap.asset_to_buy.clone(),
            sell_amount: intent.amount,
            requires_approve: approval.requires_approve,
            gas_params: parameters.gas_params,
            nonce: None,
            meta: SwapMetadata::default(),
        })));

        Ok(Rap::new(actions))
    }
}
