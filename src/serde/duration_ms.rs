//! (De)serializes [`Duration`] as whole milliseconds.

use serde::{Deserialize, Deserializer, Serializer};
use std::time::Duration;

/// Whole milliseconds of `duration`, saturating at `u64::MAX`.
fn millis(duration: &Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Serializes [`Duration`] as milliseconds.
pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u64(millis(duration))
}

/// Deserializes milliseconds into a [`Duration`].
pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    u64::deserialize(deserializer).map(Duration::from_millis)
}

/// (De)serializes a map of [`Duration`] values as whole milliseconds.
pub mod map {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::{collections::BTreeMap, time::Duration};

    /// Serializes every [`Duration`] of `map` as milliseconds.
    pub fn serialize<K, S>(map: &BTreeMap<K, Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        K: Serialize,
        S: Serializer,
    {
        serializer.collect_map(map.iter().map(|(key, duration)| (key, super::millis(duration))))
    }

    /// Deserializes a map of milliseconds into [`Duration`] values.
    pub fn deserialize<'de, K, D>(deserializer: D) -> Result<BTreeMap<K, Duration>, D::Error>
    where
        K: Deserialize<'de> + Ord,
        D: Deserializer<'de>,
    {
        let millis = BTreeMap::<K, u64>::deserialize(deserializer)?;
        Ok(millis.into_iter().map(|(key, ms)| (key, Duration::from_millis(ms))).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saturates_at_u64_max() {
        assert_eq!(millis(&Duration::from_millis(2_500)), 2_500);
        assert_eq!(millis(&Duration::from_micros(1_999)), 1);
        assert_eq!(millis(&Duration::MAX), u64::MAX);
    }
}
