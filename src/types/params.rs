//! Inbound rap parameters.

use super::{
    Asset, CrosschainQuote, GasFeeParamsBySpeed, GasParams, Quote, RapType, SwapMetadata,
};
use alloy::primitives::{Address, ChainId, U256};
use serde::{Deserialize, Serialize};

/// Sell one asset for another on the same chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapIntent {
    /// Chain the swap executes on.
    pub chain_id: ChainId,
    /// Asset being sold.
    pub asset_to_sell: Asset,
    /// Asset being bought.
    pub asset_to_buy: Asset,
    /// Amount being sold.
    pub sell_amount: U256,
    /// Aggregator quote.
    pub quote: Option<Quote>,
    /// Swap metadata.
    #[serde(default)]
    pub meta: SwapMetadata,
}

/// Sell one asset and receive another one on a different chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrosschainSwapIntent {
    /// Chain the swap starts on.
    pub chain_id: ChainId,
    /// Asset being sold.
    pub asset_to_sell: Asset,
    /// Asset being bought, on the destination chain.
    pub asset_to_buy: Asset,
    /// Amount being sold.
    pub sell_amount: U256,
    /// Aggregator quote.
    pub quote: Option<CrosschainQuote>,
    /// Swap metadata.
    #[serde(default)]
    pub meta: SwapMetadata,
}

/// Claim rewards where they are.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimIntent {
    /// Account claiming.
    pub address: Address,
    /// Chain the rewards sit on.
    pub chain_id: ChainId,
    /// Reward asset.
    pub asset: Asset,
    /// Amount claimed.
    pub amount: U256,
}

/// Claim rewards and bridge them to another chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimBridgeIntent {
    /// Account claiming.
    pub address: Address,
    /// Chain the rewards sit on.
    pub chain_id: ChainId,
    /// Chain the rewards should end up on. Absent means "stay on `chain_id`".
    #[serde(default)]
    pub to_chain_id: Option<ChainId>,
    /// Reward asset.
    pub asset: Asset,
    /// Amount claimed.
    pub amount: U256,
    /// Pre-fetched bridge quote.
    #[serde(default)]
    pub quote: Option<CrosschainQuote>,
}

/// A claim request as received from the backend, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClaimableRequest {
    /// The backend claims on behalf of the user.
    #[serde(rename_all = "camelCase")]
    Sponsored {
        /// Backend identifier of the claimable.
        claimable_id: String,
    },
    /// The user sends the claim transaction.
    Transaction {
        /// Destination address.
        to: String,
        /// Claim calldata.
        data: String,
        /// Native value, decimal or `0x` hex.
        #[serde(default)]
        value: Option<String>,
    },
}

/// Swap the claimed asset right after claiming it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimableSwap {
    /// Asset the claimed asset is swapped into.
    pub asset_to_buy: Asset,
    /// Aggregator quote selling the claimed asset.
    pub quote: Quote,
}

/// Claim a claimable position, optionally swapping the proceeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimClaimableIntent {
    /// Account claiming.
    pub address: Address,
    /// Chain the claimable sits on.
    pub chain_id: ChainId,
    /// Asset received by the claim.
    pub asset: Asset,
    /// Amount received by the claim.
    pub amount: U256,
    /// How the claim is performed.
    pub claim: ClaimableRequest,
    /// Optional swap of the claimed asset.
    #[serde(default)]
    pub swap: Option<ClaimableSwap>,
}

/// A high-level user intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "intent", rename_all = "camelCase")]
pub enum RapIntent {
    /// See [`SwapIntent`].
    Swap(SwapIntent),
    /// See [`CrosschainSwapIntent`].
    CrosschainSwap(CrosschainSwapIntent),
    /// See [`ClaimIntent`].
    Claim(ClaimIntent),
    /// See [`ClaimBridgeIntent`].
    ClaimBridge(ClaimBridgeIntent),
    /// See [`ClaimClaimableIntent`].
    ClaimClaimable(ClaimClaimableIntent),
}

impl RapIntent {
    /// The [`RapType`] this intent builds.
    pub const fn rap_type(&self) -> RapType {
        match self {
            Self::Swap(_) => RapType::Swap,
            Self::CrosschainSwap(_) => RapType::CrosschainSwap,
            Self::Claim(_) => RapType::Claim,
            Self::ClaimBridge(_) => RapType::ClaimBridge,
            Self::ClaimClaimable(_) => RapType::ClaimClaimable,
        }
    }

    /// Chain the first transaction of the intent is sent on.
    pub const fn chain_id(&self) -> ChainId {
        match self {
            Self::Swap(intent) => intent.chain_id,
            Self::CrosschainSwap(intent) => intent.chain_id,
            Self::Claim(intent) => intent.chain_id,
            Self::ClaimBridge(intent) => intent.chain_id,
            Self::ClaimClaimable(intent) => intent.chain_id,
        }
    }
}

/// Everything the engine needs to build and execute a rap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RapParameters {
    /// The user intent.
    pub intent: RapIntent,
    /// Nonce of the first transaction, if the caller manages nonces.
    #[serde(default)]
    pub nonce: Option<u64>,
    /// Whether the caller opts into atomic execution.
    #[serde(default)]
    pub atomic: bool,
    /// Gas parameters selected by the user.
    pub gas_params: GasParams,
    /// Fee parameters for every speed preset.
    #[serde(default)]
    pub gas_fee_params_by_speed: GasFeeParamsBySpeed,
}

impl RapParameters {
    /// Creates parameters for `intent` with no nonce and atomic execution disabled.
    pub fn new(intent: RapIntent, gas_params: GasParams) -> Self {
        Self {
            intent,
            nonce: None,
            atomic: false,
            gas_params,
            gas_fee_params_by_speed: Default::default(),
        }
    }

    /// Sets the starting nonce.
    pub fn with_nonce(mut self, nonce: Option<u64>) -> Self {
        self.nonce = nonce;
        self
    }

    /// Opts into atomic execution.
    pub fn with_atomic(mut self, atomic: bool) -> Self {
        self.atomic = atomic;
        self
    }

    /// Sets the fee parameters for every speed preset.
    pub fn with_gas_fee_params_by_speed(mut self, params: GasFeeParamsBySpeed) -> Self {
        self.gas_fee_params_by_speed = params;
        self
    }

    /// The [`RapType`] of the intent.
    pub fn rap_type(&self) -> RapType {
        self.intent.rap_type()
    }

    /// Chain the first transaction is sent on.
    pub fn chain_id(&self) -> ChainId {
        self.intent.chain_id()
    }
}
