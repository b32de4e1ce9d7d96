use alloy::primitives::ChainId;
use thiserror::Error;

/// Errors raised by the validation guards.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was absent.
    #[error("missing {0}")]
    MissingField(&'static str),
    /// The value is not a well-formed address.
    #[error("invalid address for {field}: {value:?}")]
    InvalidAddress {
        /// The field being validated.
        field: &'static str,
        /// The offending input.
        value: String,
    },
    /// The address is the zero address where a real account is required.
    #[error("{0} must not be the zero address")]
    ZeroAddress(&'static str),
    /// The value is not a `0x`-prefixed hex string.
    #[error("invalid hex for {field}: {value:?}")]
    InvalidHex {
        /// The field being validated.
        field: &'static str,
        /// The offending input.
        value: String,
    },
    /// The value is not a valid unsigned amount.
    #[error("invalid amount for {field}: {value:?}")]
    InvalidAmount {
        /// The field being validated.
        field: &'static str,
        /// The offending input.
        value: String,
    },
    /// A nonce was provided in an unusable form.
    #[error("invalid nonce: {0:?}")]
    InvalidNonce(String),
    /// Two inputs disagree on the chain they target.
    #[error("chain mismatch, expected {expected}, got {got}")]
    ChainMismatch {
        /// The chain of the intent.
        expected: ChainId,
        /// The chain found on the nested input.
        got: ChainId,
    },
}
