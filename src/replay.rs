//! Replay descriptors for speed-up and cancel flows.
//!
//! Submitted transactions come back from wallets and explorers with any subset of their fields
//! populated. The helpers here merge what is known into the minimal description needed to
//! re-send the same call with different fees.

use crate::validation::parse_nonce;
use alloy::primitives::U256;
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, Visitor},
};
use std::fmt;

/// A transaction value as reported by the wallet, either numeric or already stringified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxValue {
    /// Integral numeric value, of any size.
    Number(U256),
    /// Decimal or hex string value, or a fractional number as the wallet reported it.
    Text(String),
}

impl TxValue {
    fn from_f64(value: f64) -> Self {
        if value.is_finite()
            && value >= 0.0
            && value.fract() == 0.0
            && let Ok(number) = format!("{value:.0}").parse::<U256>()
        {
            return Self::Number(number);
        }
        Self::Text(value.to_string())
    }
}

impl fmt::Display for TxValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<u64> for TxValue {
    fn from(value: u64) -> Self {
        Self::Number(U256::from(value))
    }
}

impl From<&str> for TxValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl Serialize for TxValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Number(value) => match u64::try_from(*value) {
                Ok(value) => serializer.serialize_u64(value),
                Err(_) => serializer.collect_str(value),
            },
            Self::Text(value) => serializer.serialize_str(value),
        }
    }
}

impl<'de> Deserialize<'de> for TxValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TxValueVisitor;

        impl Visitor<'_> for TxValueVisitor {
            type Value = TxValue;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a number or a string")
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
                Ok(TxValue::Number(U256::from(value)))
            }

            fn visit_u128<E: de::Error>(self, value: u128) -> Result<Self::Value, E> {
                Ok(TxValue::Number(U256::from(value)))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
                match u64::try_from(value) {
                    Ok(value) => self.visit_u64(value),
                    Err(_) => Ok(TxValue::Text(value.to_string())),
                }
            }

            fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
                Ok(TxValue::from_f64(value))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                Ok(TxValue::Text(value.to_string()))
            }

            fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
                Ok(TxValue::Text(value))
            }
        }

        deserializer.deserialize_any(TxValueVisitor)
    }
}

/// Deserializes an optional nonce given as a number or as a decimal or hex string.
fn deserialize_nonce<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Nonce {
        Number(u64),
        Text(String),
    }

    match Option::<Nonce>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Nonce::Number(nonce)) => Ok(Some(nonce)),
        Some(Nonce::Text(nonce)) => parse_nonce(&nonce).map(Some).map_err(de::Error::custom),
    }
}

/// A submitted transaction with possibly missing fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedTransaction {
    /// Destination.
    #[serde(default)]
    pub to: Option<String>,
    /// Calldata.
    #[serde(default)]
    pub data: Option<String>,
    /// Native value.
    #[serde(default)]
    pub value: Option<TxValue>,
    /// Nonce used, numeric or as a decimal or hex string.
    #[serde(default, deserialize_with = "deserialize_nonce")]
    pub nonce: Option<u64>,
    /// Transaction hash.
    #[serde(default)]
    pub hash: Option<String>,
}

/// The call a transaction made, enough to send it again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayableCall {
    /// Destination.
    pub to: String,
    /// Calldata.
    pub data: String,
    /// Native value, stringified.
    pub value: String,
}

/// A submitted transaction that can be sped up or cancelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayableExecution {
    /// Hash of the transaction being replaced.
    pub hash: String,
    /// Nonce to reuse.
    pub nonce: u64,
    /// The call to repeat, when it could be recovered.
    pub replayable_call: Option<ReplayableCall>,
}

/// Merges `tx` with `fallback` field by field, fields present on `tx` win.
///
/// Returns `None` if the destination, calldata or value is known by neither.
pub fn extract_replayable_call(
    tx: &SubmittedTransaction,
    fallback: Option<&SubmittedTransaction>,
) -> Option<ReplayableCall> {
    let to = tx.to.clone().or_else(|| fallback.and_then(|f| f.to.clone()))?;
    let data = tx.data.clone().or_else(|| fallback.and_then(|f| f.data.clone()))?;
    let value = tx.value.as_ref().or_else(|| fallback.and_then(|f| f.value.as_ref()))?;

    Some(ReplayableCall { to, data, value: value.to_string() })
}

/// Builds the replay descriptor of `tx`.
///
/// Returns `None` unless `tx` carries both its hash and nonce. The call itself is best effort,
/// see [`extract_replayable_call`].
pub fn extract_replayable_execution(
    tx: &SubmittedTransaction,
    fallback: Option<&SubmittedTransaction>,
) -> Option<ReplayableExecution> {
    let hash = tx.hash.clone()?;
    let nonce = tx.nonce?;

    let replayable_call = extract_replayable_call(tx, fallback);

    Some(ReplayableExecution { hash, nonce, replayable_call })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merges_primary_over_fallback() {
        let tx = SubmittedTransaction {
            data: Some("0xabc".into()),
            value: Some(1.into()),
            ..Default::default()
        };
        let fallback = SubmittedTransaction { to: Some("0x1".into()), ..Default::default() };

        assert_eq!(
            extract_replayable_call(&tx, Some(&fallback)),
            Some(ReplayableCall { to: "0x1".into(), data: "0xabc".into(), value: "1".into() })
        );

        let fallback = SubmittedTransaction {
            to: Some("0x2".into()),
            data: Some("0xdef".into()),
            value: Some("0x5".into()),
            ..Default::default()
        };
        let merged = extract_replayable_call(&tx, Some(&fallback)).unwrap();
        assert_eq!(merged.to, "0x2");
        assert_eq!(merged.data, "0xabc");
        assert_eq!(merged.value, "1");
    }

    #[test]
    fn unresolved_fields() {
        assert_eq!(extract_replayable_call(&SubmittedTransaction::default(), None), None);

        let tx = SubmittedTransaction {
            to: Some("0x1".into()),
            data: Some("0x".into()),
            ..Default::default()
        };
        assert_eq!(extract_replayable_call(&tx, None), None);
    }

    #[test]
    fn execution_requires_hash_and_nonce() {
        let tx = SubmittedTransaction {
            to: Some("0x1".into()),
            data: Some("0x".into()),
            value: Some(0.into()),
            nonce: Some(4),
            hash: None,
        };
        assert_eq!(extract_replayable_execution(&tx, None), None);

        let tx = SubmittedTransaction { hash: Some("0xfeed".into()), nonce: None, ..tx };
        assert_eq!(extract_replayable_execution(&tx, None), None);

        let tx = SubmittedTransaction { nonce: Some(4), ..tx };
        let execution = extract_replayable_execution(&tx, None).unwrap();
        assert_eq!(execution.hash, "0xfeed");
        assert_eq!(execution.nonce, 4);
        assert_eq!(
            execution.replayable_call,
            Some(ReplayableCall { to: "0x1".into(), data: "0x".into(), value: "0".into() })
        );

        let bare = SubmittedTransaction {
            hash: Some("0xfeed".into()),
            nonce: Some(4),
            ..Default::default()
        };
        assert_eq!(extract_replayable_execution(&bare, None).unwrap().replayable_call, None);
    }

    #[test]
    fn deserialize_numeric_and_string_values() {
        let tx: SubmittedTransaction =
            serde_json::from_str(r#"{"to":"0x1","data":"0x","value":7,"nonce":1}"#).unwrap();
        assert_eq!(tx.value, Some(TxValue::Number(U256::from(7))));

        let tx: SubmittedTransaction = serde_json::from_str(r#"{"value":"0x10"}"#).unwrap();
        assert_eq!(tx.value, Some(TxValue::Text("0x10".into())));
    }

    #[test]
    fn deserialize_values_above_u64() {
        let tx: SubmittedTransaction = serde_json::from_str(
            r#"{"to":"0x1","data":"0x","value":20000000000000000000,"nonce":2,"hash":"0xfeed"}"#,
        )
        .unwrap();
        assert_eq!(tx.value, Some(TxValue::Number(U256::from(20_000_000_000_000_000_000u128))));

        let execution = extract_replayable_execution(&tx, None).unwrap();
        assert_eq!(execution.replayable_call.unwrap().value, "20000000000000000000");
        assert_eq!(serde_json::to_string(&tx.value).unwrap(), r#""20000000000000000000""#);
    }

    #[test]
    fn deserialize_float_values() {
        let tx: SubmittedTransaction = serde_json::from_str(r#"{"value":1e3}"#).unwrap();
        assert_eq!(tx.value, Some(TxValue::from(1000)));

        let tx: SubmittedTransaction = serde_json::from_str(r#"{"value":1.5}"#).unwrap();
        assert_eq!(tx.value, Some(TxValue::from("1.5")));
    }

    #[test]
    fn deserialize_string_nonces() {
        let tx: SubmittedTransaction =
            serde_json::from_str(r#"{"nonce":"0x10","hash":"0xfeed"}"#).unwrap();
        assert_eq!(tx.nonce, Some(16));
        assert_eq!(extract_replayable_execution(&tx, None).unwrap().nonce, 16);

        let tx: SubmittedTransaction = serde_json::from_str(r#"{"nonce":"42"}"#).unwrap();
        assert_eq!(tx.nonce, Some(42));

        let tx: SubmittedTransaction = serde_json::from_str(r#"{"nonce":null}"#).unwrap();
        assert_eq!(tx.nonce, None);

        let err = serde_json::from_str::<SubmittedTransaction>(r#"{"nonce":"0x10000000000000000"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("invalid nonce"), "{err}");
    }
}
