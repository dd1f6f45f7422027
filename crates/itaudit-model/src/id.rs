use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

/// Row id as sent by clients.
///
/// Detail pages forward the URL segment verbatim, so both `7` and `"7"` are
/// accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordId(pub i32);

impl From<i32> for RecordId {
    fn from(v: i32) -> Self {
        Self(v)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

struct RecordIdVisitor;

impl Visitor<'_> for RecordIdVisitor {
    type Value = RecordId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer id or a string holding one")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<RecordId, E> {
        i32::try_from(v)
            .map(RecordId)
            .map_err(|_| E::custom(format!("id {v} is out of range")))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<RecordId, E> {
        i32::try_from(v)
            .map(RecordId)
            .map_err(|_| E::custom(format!("id {v} is out of range")))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<RecordId, E> {
        v.trim()
            .parse::<i32>()
            .map(RecordId)
            .map_err(|_| E::custom(format!("invalid id {v:?}")))
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RecordIdVisitor)
    }
}

/// Marks a field as supplied even when its value is `null`.
///
/// Used with `#[serde(default, deserialize_with = "present")]` on
/// `Option<Option<T>>` so patches can tell "set to null" from "leave alone".
pub fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_numbers_and_numeric_strings() {
        let a: RecordId = serde_json::from_str("7").unwrap();
        let b: RecordId = serde_json::from_str("\"7\"").unwrap();
        assert_eq!(a, RecordId(7));
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_non_numeric_and_out_of_range() {
        assert!(serde_json::from_str::<RecordId>("\"abc\"").is_err());
        assert!(serde_json::from_str::<RecordId>("4294967296").is_err());
        assert!(serde_json::from_str::<RecordId>("null").is_err());
    }
}
