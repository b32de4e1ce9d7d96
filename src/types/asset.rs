use crate::constants::NATIVE_ASSET_SENTINEL;
use alloy::primitives::{Address, ChainId};
use serde::{Deserialize, Serialize};

/// An asset on a specific chain, as the wallet describes it to the rap engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    /// Token address, or a native placeholder.
    pub address: Address,
    /// Chain the asset lives on.
    pub chain_id: ChainId,
    /// Token decimals.
    #[serde(default = "default_decimals")]
    pub decimals: u8,
    /// Ticker symbol, informational.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// Explicit native flag for chains whose native asset has a real token address.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub native: bool,
}

const fn default_decimals() -> u8 {
    18
}

impl Asset {
    /// The native asset of `chain_id`.
    pub fn native(chain_id: ChainId) -> Self {
        Self { address: Address::ZERO, chain_id, decimals: 18, symbol: None, native: true }
    }

    /// An ERC-20 token.
    pub fn erc20(address: Address, chain_id: ChainId, decimals: u8) -> Self {
        Self { address, chain_id, decimals, symbol: None, native: false }
    }

    /// Whether this is the chain-native asset.
    ///
    /// The zero address and the `0xEeee…EEeE` placeholder both denote the native asset.
    pub fn is_native(&self) -> bool {
        self.native || self.address.is_zero() || self.address == NATIVE_ASSET_SENTINEL
    }
}
