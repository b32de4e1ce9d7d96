//! Guards for untrusted input.
//!
//! Values coming from quote APIs and the claimables backend arrive as loosely typed strings.
//! These helpers turn them into typed values or a [`ValidationError`] naming the offending field.

use crate::error::ValidationError;
use alloy::primitives::{Address, Bytes, U256};
use std::str::FromStr;

/// Parses `value` as a checksummed or lowercase hex address.
pub fn parse_address(field: &'static str, value: &str) -> Result<Address, ValidationError> {
    Address::from_str(value.trim())
        .map_err(|_| ValidationError::InvalidAddress { field, value: value.to_string() })
}

/// Requires `value` to be present and not the zero address.
pub fn require_address(
    field: &'static str,
    value: Option<Address>,
) -> Result<Address, ValidationError> {
    match value {
        None => Err(ValidationError::MissingField(field)),
        Some(address) if address.is_zero() => Err(ValidationError::ZeroAddress(field)),
        Some(address) => Ok(address),
    }
}

/// Parses a `0x`-prefixed hex string into bytes. `0x` alone is valid and empty.
pub fn parse_hex(field: &'static str, value: &str) -> Result<Bytes, ValidationError> {
    let invalid = || ValidationError::InvalidHex { field, value: value.to_string() };
    let trimmed = value.trim();
    if !trimmed.starts_with("0x") && !trimmed.starts_with("0X") {
        return Err(invalid());
    }
    Bytes::from_str(trimmed).map_err(|_| invalid())
}

/// Parses an amount given either in decimal or as `0x`-prefixed hex.
pub fn parse_value(field: &'static str, value: &str) -> Result<U256, ValidationError> {
    let invalid = || ValidationError::InvalidAmount { field, value: value.to_string() };
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(invalid());
    }

    if let Some(hex) = trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
        if hex.is_empty() {
            return Ok(U256::ZERO);
        }
        return U256::from_str_radix(hex, 16).map_err(|_| invalid());
    }

    if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    U256::from_str_radix(trimmed, 10).map_err(|_| invalid())
}

/// Parses a nonce given either in decimal or as `0x`-prefixed hex.
pub fn parse_nonce(value: &str) -> Result<u64, ValidationError> {
    parse_value("nonce", value)
        .ok()
        .and_then(|nonce| u64::try_from(nonce).ok())
        .ok_or_else(|| ValidationError::InvalidNonce(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{address, bytes};

    #[test]
    fn addresses() {
        assert_eq!(
            parse_address("to", "0x5fbdb2315678afecb367f032d93f642f64180aa3").unwrap(),
            address!("5FbDB2315678afecb367f032d93F642f64180aa3")
        );
        assert_eq!(
            parse_address("to", "0x1234"),
            Err(ValidationError::InvalidAddress { field: "to", value: "0x1234".into() })
        );
        assert!(parse_address("to", "not an address").is_err());

        assert_eq!(require_address("spender", None), Err(ValidationError::MissingField("spender")));
        assert_eq!(
            require_address("spender", Some(Address::ZERO)),
            Err(ValidationError::ZeroAddress("spender"))
        );
        let spender = address!("1111111111111111111111111111111111111111");
        assert_eq!(require_address("spender", Some(spender)), Ok(spender));
    }

    #[test]
    fn hex_payloads() {
        assert_eq!(parse_hex("data", "0x").unwrap(), Bytes::new());
        assert_eq!(parse_hex("data", "0x095ea7b3").unwrap(), bytes!("095ea7b3"));
        assert!(parse_hex("data", "095ea7b3").is_err());
        assert!(parse_hex("data", "0xzz").is_err());
        assert!(parse_hex("data", "0x123").is_err());
    }

    #[test]
    fn amounts() {
        assert_eq!(parse_value("value", "0").unwrap(), U256::ZERO);
        assert_eq!(parse_value("value", "1000").unwrap(), U256::from(1000));
        assert_eq!(parse_value("value", "0x3e8").unwrap(), U256::from(1000));
        assert_eq!(parse_value("value", "0x").unwrap(), U256::ZERO);
        assert!(parse_value("value", "").is_err());
        assert!(parse_value("value", "-1").is_err());
        assert!(parse_value("value", "1.5").is_err());
        assert!(parse_value("value", "0xgg").is_err());
    }

    #[test]
    fn nonces() {
        assert_eq!(parse_nonce("0x10"), Ok(16));
        assert_eq!(parse_nonce("42"), Ok(42));
        assert_eq!(
            parse_nonce("0x10000000000000000"),
            Err(ValidationError::InvalidNonce("0x10000000000000000".into()))
        );
    }
}
