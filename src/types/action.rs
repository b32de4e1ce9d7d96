//! Rap actions.
//!
//! Every step of a [`Rap`](super::Rap) is a [`RapAction`]: a closed set of parameter payloads,
//! one per [`ActionKind`], plus the transaction record the engine fills in while executing.

use super::{Asset, CrosschainQuote, GasParams, Quote};
use alloy::primitives::{Address, B256, Bytes, ChainId, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of a [`RapAction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionKind {
    /// ERC-20 approval.
    Unlock,
    /// Same-chain swap.
    Swap,
    /// Swap that delivers on another chain.
    CrosschainSwap,
    /// Reward claim.
    Claim,
    /// Bridge of claimed rewards to another chain.
    ClaimBridge,
    /// Claim of a claimable position.
    ClaimClaimable,
}

impl ActionKind {
    /// Name of the kind, as used in rap names and logs.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unlock => "unlock",
            Self::Swap => "swap",
            Self::CrosschainSwap => "crosschainSwap",
            Self::Claim => "claim",
            Self::ClaimBridge => "claimBridge",
            Self::ClaimClaimable => "claimClaimable",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque swap metadata carried from the quote screen to the executor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapMetadata {
    /// Route the transaction through a private mempool.
    #[serde(default)]
    pub flashbots: bool,
    /// User opted out of the price-impact safety checks.
    #[serde(default)]
    pub degen_mode: bool,
    /// Slippage tolerance in basis points.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slippage_bips: Option<u32>,
}

/// Parameters of an [`ActionKind::Unlock`] action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockParameters {
    /// Owner granting the allowance.
    pub from_address: Address,
    /// Token being approved.
    pub asset_to_unlock: Asset,
    /// Spender receiving the allowance.
    pub contract_address: Address,
    /// Chain the approval is sent on.
    pub chain_id: ChainId,
    /// Amount approved.
    pub amount: U256,
}

/// Parameters of an [`ActionKind::Swap`] action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapParameters {
    /// Chain the swap is sent on.
    pub chain_id: ChainId,
    /// Aggregator quote being filled.
    pub quote: Quote,
    /// Asset being sold.
    pub asset_to_sell: Asset,
    /// Asset being bought.
    pub asset_to_buy: Asset,
    /// Amount being sold.
    pub sell_amount: U256,
    /// Whether an unlock precedes this swap in the same rap.
    pub requires_approve: bool,
    /// Gas parameters selected by the user.
    pub gas_params: GasParams,
    /// Nonce requested by the caller, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<u64>,
    /// Swap metadata.
    #[serde(default)]
    pub meta: SwapMetadata,
}

/// Parameters of an [`ActionKind::CrosschainSwap`] action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrosschainSwapParameters {
    /// Chain the swap is sent on.
    pub chain_id: ChainId,
    /// Aggregator quote being filled.
    pub quote: CrosschainQuote,
    /// Asset being sold.
    pub asset_to_sell: Asset,
    /// Asset being bought, on the destination chain.
    pub asset_to_buy: Asset,
    /// Amount being sold.
    pub sell_amount: U256,
    /// Whether an unlock precedes this swap in the same rap.
    pub requires_approve: bool,
    /// Gas parameters selected by the user.
    pub gas_params: GasParams,
    /// Nonce requested by the caller, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<u64>,
    /// Swap metadata.
    #[serde(default)]
    pub meta: SwapMetadata,
}

/// Parameters of an [`ActionKind::Claim`] action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimParameters {
    /// Account claiming.
    pub address: Address,
    /// Chain the rewards are claimed on.
    pub chain_id: ChainId,
    /// Asset being claimed.
    pub asset: Asset,
    /// Amount being claimed.
    pub amount: U256,
}

/// Parameters of an [`ActionKind::ClaimBridge`] action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimBridgeParameters {
    /// Account bridging.
    pub address: Address,
    /// Chain the claimed rewards sit on.
    pub chain_id: ChainId,
    /// Chain the rewards are bridged to.
    pub to_chain_id: ChainId,
    /// Asset being bridged.
    pub asset: Asset,
    /// Amount being bridged.
    pub amount: U256,
    /// Pre-fetched bridge quote. The executor requests one when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote: Option<CrosschainQuote>,
}

/// A validated transaction that claims a claimable position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimableTransaction {
    /// Contract the claim is sent to.
    pub to: Address,
    /// Claim calldata.
    pub data: Bytes,
    /// Native value attached to the claim.
    pub value: U256,
}

/// How a claimable position is claimed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClaimableClaim {
    /// The backend claims on behalf of the user and pays the gas.
    #[serde(rename_all = "camelCase")]
    Sponsored {
        /// Backend identifier of the claimable.
        claimable_id: String,
    },
    /// The user signs and sends the claim transaction.
    Transaction(ClaimableTransaction),
}

/// Parameters of an [`ActionKind::ClaimClaimable`] action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimClaimableParameters {
    /// Account claiming.
    pub address: Address,
    /// Chain the claim is sent on.
    pub chain_id: ChainId,
    /// Asset received by the claim.
    pub asset: Asset,
    /// How the claim is performed.
    pub claim: ClaimableClaim,
}

/// Kind-specific parameters of a [`RapAction`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "parameters", rename_all = "camelCase")]
pub enum ActionParameters {
    /// See [`UnlockParameters`].
    Unlock(UnlockParameters),
    /// See [`SwapParameters`].
    Swap(SwapParameters),
    /// See [`CrosschainSwapParameters`].
    CrosschainSwap(CrosschainSwapParameters),
    /// See [`ClaimParameters`].
    Claim(ClaimParameters),
    /// See [`ClaimBridgeParameters`].
    ClaimBridge(ClaimBridgeParameters),
    /// See [`ClaimClaimableParameters`].
    ClaimClaimable(ClaimClaimableParameters),
}

impl ActionParameters {
    /// The kind of these parameters.
    pub const fn kind(&self) -> ActionKind {
        match self {
            Self::Unlock(_) => ActionKind::Unlock,
            Self::Swap(_) => ActionKind::Swap,
            Self::CrosschainSwap(_) => ActionKind::CrosschainSwap,
            Self::Claim(_) => ActionKind::Claim,
            Self::ClaimBridge(_) => ActionKind::ClaimBridge,
            Self::ClaimClaimable(_) => ActionKind::ClaimClaimable,
        }
    }

    /// Chain the action sends its transaction on.
    pub const fn chain_id(&self) -> ChainId {
        match self {
            Self::Unlock(p) => p.chain_id,
            Self::Swap(p) => p.chain_id,
            Self::CrosschainSwap(p) => p.chain_id,
            Self::Claim(p) => p.chain_id,
            Self::ClaimBridge(p) => p.chain_id,
            Self::ClaimClaimable(p) => p.chain_id,
        }
    }
}

/// The on-chain record of an action, filled in as the rap executes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionTransaction {
    /// Hash of the transaction the action sent.
    pub hash: Option<B256>,
}

/// One step of a rap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RapAction {
    /// Kind-specific parameters.
    pub parameters: ActionParameters,
    /// Transaction record.
    #[serde(default)]
    pub transaction: ActionTransaction,
}

impl RapAction {
    /// Creates a new action with an empty transaction record.
    pub fn new(parameters: ActionParameters) -> Self {
        Self { parameters, transaction: ActionTransaction::default() }
    }

    /// The kind of this action.
    pub const fn kind(&self) -> ActionKind {
        self.parameters.kind()
    }
}

impl From<ActionParameters> for RapAction {
    fn from(parameters: ActionParameters) -> Self {
        Self::new(parameters)
    }
}
