//! Tag=value message decoding.
//!
//! Splits a raw message into segments on a single-character delimiter and each
//! segment on its first `=`. Parsing is lenient: segments without `=` are dropped
//! and a repeated tag keeps its last value. Only the required-tag check can fail
//! a non-empty message.

use crate::types::tags;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_DELIMITER: char = '|';
pub const SOH: char = '\x01';

/// Decoded tag to value mapping. Built once per message, read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMap(BTreeMap<String, String>);

impl FieldMap {
    pub fn get(&self, tag: &str) -> Option<&str> {
        self.0.get(tag).map(String::as_str)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains_key(tag)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Required tags absent from this map, in `tags::REQUIRED` order.
    pub fn missing_required(&self) -> Vec<&'static str> {
        tags::REQUIRED
            .iter()
            .copied()
            .filter(|tag| !self.contains(tag))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("Empty message")]
    EmptyInput,

    #[error("Missing required fields: {fields:?}")]
    MissingFields { fields: Vec<&'static str> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoder {
    delimiter: char,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITER)
    }
}

impl Decoder {
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    pub fn decode(&self, raw: &str) -> Result<FieldMap, DecodeError> {
        if raw.is_empty() {
            return Err(DecodeError::EmptyInput);
        }

        let mut fields = BTreeMap::new();
        for segment in raw.split(self.delimiter) {
            // no '=' means no field, skip it
            let Some((tag, value)) = segment.split_once('=') else {
                continue;
            };
            fields.insert(tag.to_string(), value.to_string());
        }

        let fields = FieldMap(fields);
        let missing = fields.missing_required();
        if !missing.is_empty() {
            return Err(DecodeError::MissingFields { fields: missing });
        }

        Ok(fields)
    }
}

/// Decode with the default `|` delimiter.
pub fn decode(raw: &str) -> Result<FieldMap, DecodeError> {
    Decoder::default().decode(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_all_fields() {
        let fields = decode("8=FIX.4.2|35=D|55=AAPL|54=1|38=100|40=2").unwrap();

        assert_eq!(fields.get("8"), Some("FIX.4.2"));
        assert_eq!(fields.get("35"), Some("D"));
        assert_eq!(fields.get("55"), Some("AAPL"));
        assert_eq!(fields.get("54"), Some("1"));
        assert_eq!(fields.get("38"), Some("100"));
        assert_eq!(fields.get("40"), Some("2"));
        assert_eq!(fields.len(), 6);
    }

    #[test]
    fn empty_input_fails() {
        assert_eq!(decode(""), Err(DecodeError::EmptyInput));
    }

    #[test]
    fn missing_quantity_is_reported() {
        let err = decode("8=FIX.4.2|35=D|55=AAPL|54=1").unwrap_err();

        assert_eq!(err, DecodeError::MissingFields { fields: vec!["38"] });
        assert!(err.to_string().contains("Missing required fields"));
        assert!(err.to_string().contains("38"));
    }

    #[test]
    fn every_missing_tag_is_listed() {
        let err = decode("8=FIX.4.2|40=2").unwrap_err();
        assert_eq!(
            err,
            DecodeError::MissingFields {
                fields: vec!["35", "55", "54", "38"]
            }
        );
    }

    #[test]
    fn segment_without_equals_is_skipped() {
        let fields = decode("8=X|INVALID|55=AAPL|35=D|54=1|38=50").unwrap();
        assert_eq!(fields.get("55"), Some("AAPL"));
        assert_eq!(fields.get("38"), Some("50"));
        assert!(!fields.contains("INVALID"));
    }

    #[test]
    fn last_duplicate_wins() {
        let fields = decode("35=D|55=AAPL|55=MSFT|54=1|38=10|38=20").unwrap();
        assert_eq!(fields.get("55"), Some("MSFT"));
        assert_eq!(fields.get("38"), Some("20"));
    }

    #[test]
    fn splits_on_first_equals_only() {
        let fields = decode("35=D|55=AAPL|54=1|38=10|58=a=b").unwrap();
        assert_eq!(fields.get("58"), Some("a=b"));
    }

    #[test]
    fn soh_delimited_message() {
        let raw = "8=FIX.4.2\x0135=D\x0155=IBM\x0154=2\x0138=7";
        let fields = Decoder::new(SOH).decode(raw).unwrap();
        assert_eq!(fields.get("55"), Some("IBM"));
        assert_eq!(fields.get("54"), Some("2"));

        // wrong delimiter leaves one segment, so tags after 8 vanish into its value
        assert!(decode(raw).is_err());
    }
}
