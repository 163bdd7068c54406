use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::errors::CodecError;

/// Separator between entries of the `Data` field.
pub const ENTRY_SEPARATOR: char = '|';
/// Separator between a name and its value inside one entry.
pub const VALUE_SEPARATOR: char = '=';

/// Shared secret appended to `Data` before hashing. Never transmitted.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey(String);

impl SecretKey {
    pub fn new(key: impl Into<String>) -> Self { Self(key.into()) }

    pub fn as_bytes(&self) -> &[u8] { self.0.as_bytes() }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

impl From<&str> for SecretKey {
    fn from(key: &str) -> Self { Self::new(key) }
}

impl From<String> for SecretKey {
    fn from(key: String) -> Self { Self(key) }
}

/// Ordered name/value mapping. Names are unique; insertion order is kept and
/// drives the serialization order (and therefore the seal).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields {
    entries: Vec<(String, String)>,
}

impl Fields {
    pub fn new() -> Self { Self::default() }

    /// Insert or overwrite. An overwritten name keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool { self.get(name).is_some() }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Fields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = Fields::new();
        fields.extend(iter);
        fields
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for Fields {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}

impl IntoIterator for Fields {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter { self.entries.into_iter() }
}

/// Wire record exchanged with the gateway: the serialized fields and their seal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SignedPayload {
    #[serde(rename = "Data")]
    pub data: String,
    #[serde(rename = "Seal")]
    pub seal: String,
}

impl SignedPayload {
    pub fn new(data: impl Into<String>, seal: impl Into<String>) -> Self {
        Self { data: data.into(), seal: seal.into() }
    }

    /// Parse a `{"Data": ..., "Seal": ...}` JSON record. Any other field is rejected.
    pub fn from_json(json: &str) -> Result<Self, CodecError> {
        serde_json::from_str(json).map_err(|e| CodecError::InvalidPayload(e.to_string()))
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("two string fields always serialize")
    }
}

/// Canonical `Data` serialization: `name=value` entries joined by `|`.
///
/// Names and values are not escaped; a `|` or `=` inside them survives
/// encoding but will not parse back to the same mapping.
pub fn serialize_fields(fields: &Fields) -> String {
    let mut data = String::new();
    for (i, (name, value)) in fields.iter().enumerate() {
        if i > 0 {
            data.push(ENTRY_SEPARATOR);
        }
        data.push_str(name);
        data.push(VALUE_SEPARATOR);
        data.push_str(value);
    }
    data
}

/// Parse a `Data` string into ordered pairs, splitting each entry on its first `=`.
///
/// The empty string has no entries.
pub fn parse_fields(data: &str) -> Result<Vec<(String, String)>, CodecError> {
    if data.is_empty() {
        return Ok(Vec::new());
    }
    data.split(ENTRY_SEPARATOR)
        .map(|entry| {
            entry
                .split_once(VALUE_SEPARATOR)
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .ok_or_else(|| CodecError::MalformedEntry(entry.to_string()))
        })
        .collect()
}

/// Hex-encoded SHA-256 of `data` immediately followed by the key bytes.
pub fn compute_seal(data: &str, key: &SecretKey) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data.as_bytes());
    hasher.update(key.as_bytes());
    hex::encode(hasher.finalize())
}
