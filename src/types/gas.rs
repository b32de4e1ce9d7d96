use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fee parameters of an EIP-1559 transaction, in wei.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Eip1559Fees {
    /// Maximum total fee per gas.
    pub max_fee_per_gas: u128,
    /// Maximum priority fee per gas.
    pub max_priority_fee_per_gas: u128,
}

/// Gas parameters selected by the user for a rap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GasParams {
    /// EIP-1559 fee parameters.
    Eip1559(Eip1559Fees),
    /// Legacy gas price, in wei.
    #[serde(rename_all = "camelCase")]
    Legacy {
        /// Gas price.
        gas_price: u128,
    },
}

impl GasParams {
    /// Returns the EIP-1559 fees, if these are not legacy parameters.
    pub fn as_eip1559(&self) -> Option<Eip1559Fees> {
        match self {
            Self::Eip1559(fees) => Some(*fees),
            Self::Legacy { .. } => None,
        }
    }
}

/// Speed presets offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GasSpeed {
    /// Normal inclusion.
    Normal,
    /// Fast inclusion.
    Fast,
    /// Next-block inclusion.
    Urgent,
    /// User-defined fees.
    Custom,
}

/// Fee parameters for every speed preset, used by executors that re-price their transaction.
pub type GasFeeParamsBySpeed = BTreeMap<GasSpeed, Eip1559Fees>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_untagged() {
        let fees: GasParams =
            serde_json::from_str(r#"{"maxFeePerGas":10,"maxPriorityFeePerGas":2}"#).unwrap();
        assert_eq!(
            fees.as_eip1559(),
            Some(Eip1559Fees { max_fee_per_gas: 10, max_priority_fee_per_gas: 2 })
        );

        let legacy: GasParams = serde_json::from_str(r#"{"gasPrice":7}"#).unwrap();
        assert_eq!(legacy, GasParams::Legacy { gas_price: 7 });
        assert!(legacy.as_eip1559().is_none());
    }
}
