//! Approval resolution.
//!
//! Decides whether a sell leg needs an `unlock` action before it, by comparing the owner's
//! current allowance with the amount being sold.

use crate::{
    error::{ActionError, RapError},
    types::{Asset, Quote},
    validation::require_address,
};
use alloy::primitives::{Address, ChainId, U256};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};
use tracing::debug;

/// Reads ERC-20 allowances.
#[async_trait]
pub trait AllowanceReader: Debug + Send + Sync {
    /// Returns the amount of `token` that `spender` may move on behalf of `owner`.
    async fn allowance(
        &self,
        owner: Address,
        token: Address,
        spender: Address,
        chain_id: ChainId,
    ) -> Result<U256, ActionError>;
}

/// The spender a sell leg would need an allowance for, as reported by the route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpenderCandidate {
    /// The spender address, if the route named one.
    pub address: Option<Address>,
    /// Whether the route believes an allowance is needed at all.
    pub allowance_needed: bool,
}

impl SpenderCandidate {
    /// A spender whose allowance must always be checked.
    pub fn new(address: Option<Address>) -> Self {
        Self { address, allowance_needed: true }
    }
}

impl From<&Quote> for SpenderCandidate {
    fn from(quote: &Quote) -> Self {
        Self { address: quote.allowance_target, allowance_needed: quote.allowance_needed }
    }
}

/// Result of [`ApprovalResolver::resolve`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApprovalRequirement {
    /// The spender, `None` for native assets.
    pub allowance_target_address: Option<Address>,
    /// Whether an unlock must run before the sell leg.
    pub requires_approve: bool,
}

/// Resolves [`ApprovalRequirement`]s through an [`AllowanceReader`].
#[derive(Debug, Clone)]
pub struct ApprovalResolver {
    reader: Arc<dyn AllowanceReader>,
}

impl ApprovalResolver {
    /// Creates a new resolver.
    pub fn new(reader: Arc<dyn AllowanceReader>) -> Self {
        Self { reader }
    }

    /// Resolves whether `owner` must approve `spender` before selling `sell_amount` of
    /// `sell_asset` on `chain_id`.
    ///
    /// Native assets never need an allowance and return immediately without validating the
    /// spender.
    pub async fn resolve(
        &self,
        owner: Address,
        sell_asset: &Asset,
        spender: SpenderCandidate,
        sell_amount: U256,
        chain_id: ChainId,
    ) -> Result<ApprovalRequirement, RapError> {
        if sell_asset.is_native() {
            return Ok(ApprovalRequirement::default());
        }

        let spender_address = require_address("allowance target", spender.address)?;
        if !spender.allowance_needed {
            debug!(
                token = %sell_asset.address,
                spender = %spender_address,
                "route reports no allowance needed"
            );
            return Ok(ApprovalRequirement {
                allowance_target_address: Some(spender_address),
                requires_approve: false,
            });
        }

        let allowance = self
            .reader
            .allowance(owner, sell_asset.address, spender_address, chain_id)
            .await
            .map_err(|source| RapError::AllowanceRead {
                token: sell_asset.address,
                spender: spender_address,
                chain_id,
                source,
            })?;

        let requires_approve = allowance < sell_amount;
        debug!(
            token = %sell_asset.address,
            spender = %spender_address,
            %allowance,
            %sell_amount,
            requires_approve,
            "resolved approval"
        );

        Ok(ApprovalRequirement { allowance_target_address: Some(spender_address), requires_approve })
    }
}
