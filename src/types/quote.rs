//! Quote types.

use alloy::primitives::{Address, Bytes, ChainId, U256};
use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// A same-chain swap quote returned by the swap aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Chain the quote executes on.
    pub chain_id: ChainId,
    /// Account the quote was built for.
    pub from: Address,
    /// Token being sold.
    pub sell_token_address: Address,
    /// Token being bought.
    pub buy_token_address: Address,
    /// Amount being sold, in the sell token's smallest unit.
    pub sell_amount: U256,
    /// Minimum amount being bought, in the buy token's smallest unit.
    #[serde(default)]
    pub buy_amount: U256,
    /// Contract the swap transaction is sent to.
    pub to: Address,
    /// Swap calldata.
    #[serde(default)]
    pub data: Bytes,
    /// Native value attached to the swap transaction.
    #[serde(default)]
    pub value: U256,
    /// Contract that needs an allowance on the sell token, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowance_target: Option<Address>,
    /// Whether the aggregator believes an allowance is needed.
    #[serde(default = "default_allowance_needed")]
    pub allowance_needed: bool,
    /// Gas limit suggested by the aggregator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_gas_limit: Option<u64>,
}

const fn default_allowance_needed() -> bool {
    true
}

/// A quote that bridges the bought asset to another chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrosschainQuote {
    /// The source-chain leg.
    #[serde(flatten)]
    pub quote: Quote,
    /// Chain the bought asset is delivered to.
    pub to_chain_id: ChainId,
    /// Bridge protocol used, informational.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bridge: Option<String>,
}

impl Deref for CrosschainQuote {
    type Target = Quote;

    fn deref(&self) -> &Self::Target {
        &self.quote
    }
}
