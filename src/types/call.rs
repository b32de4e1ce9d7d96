//! Calls folded into a single atomic transaction.

use alloy::{primitives::U256, sol};

sol! {
    /// One call executed by a delegated account as part of a batch.
    #[derive(Debug, PartialEq, Eq)]
    struct BatchCall {
        /// The call target.
        address to;
        /// Amount of native value to send to the target.
        uint256 value;
        /// The calldata bytes.
        bytes data;
    }
}

impl BatchCall {
    /// Sum of the native value of `calls`, saturating at `U256::MAX`.
    pub fn total_value(calls: &[Self]) -> U256 {
        calls.iter().fold(U256::ZERO, |acc, call| acc.saturating_add(call.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{Bytes, address, bytes};

    #[test]
    fn total_value() {
        let calls = vec![
            BatchCall {
                to: address!("1111111111111111111111111111111111111111"),
                value: U256::ZERO,
                data: bytes!("095ea7b3"),
            },
            BatchCall {
                to: address!("2222222222222222222222222222222222222222"),
                value: U256::from(7),
                data: Bytes::new(),
            },
        ];

        assert_eq!(BatchCall::total_value(&calls), U256::from(7));
        assert_eq!(BatchCall::total_value(&[]), U256::ZERO);

        let overflowing = [
            BatchCall { value: U256::MAX, ..calls[1].clone() },
            BatchCall { value: U256::from(1), ..calls[1].clone() },
        ];
        assert_eq!(BatchCall::total_value(&overflowing), U256::MAX);
    }
}
