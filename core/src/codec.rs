use tracing::{debug, warn};

use crate::errors::CodecError;
use crate::traits::Sealer;
use crate::types::{Fields, SecretKey, SignedPayload, compute_seal, parse_fields, serialize_fields};

/// Key the gateway publishes for its demo environment. Not for production use.
pub const DEMO_SECRET_KEY: &str = "002001000000001_KEY1";

/// SHA-256 sealer: `hex(SHA-256(data ++ secret_key))`.
#[derive(Clone, Debug)]
pub struct Sha256Sealer {
    key: SecretKey,
}

impl Sha256Sealer {
    pub fn new(key: impl Into<SecretKey>) -> Self { Self { key: key.into() } }
}

impl Default for Sha256Sealer {
    fn default() -> Self { Self::new(DEMO_SECRET_KEY) }
}

impl Sealer for Sha256Sealer {
    fn seal(&self, data: &str) -> String { compute_seal(data, &self.key) }
}

/// Holds the fields of one payload and the sealer bound at construction.
///
/// Not internally synchronized: callers sharing an instance across threads
/// must serialize access to `set` and `decode` themselves.
#[derive(Clone, Debug)]
pub struct PayloadCodec<S: Sealer = Sha256Sealer> {
    sealer: S,
    fields: Fields,
}

impl PayloadCodec<Sha256Sealer> {
    /// Codec bound to `secret_key` with no fields.
    pub fn new(secret_key: impl Into<SecretKey>) -> Self {
        Self::with_fields(secret_key, Fields::new())
    }

    /// Codec bound to `secret_key`, starting from `fields`.
    pub fn with_fields(secret_key: impl Into<SecretKey>, fields: Fields) -> Self {
        Self::with_sealer(Sha256Sealer::new(secret_key), fields)
    }

    /// Codec using [`DEMO_SECRET_KEY`].
    pub fn demo() -> Self { Self::default() }
}

impl Default for PayloadCodec<Sha256Sealer> {
    fn default() -> Self { Self::with_sealer(Sha256Sealer::default(), Fields::new()) }
}

impl<S: Sealer> PayloadCodec<S> {
    pub fn with_sealer(sealer: S, fields: Fields) -> Self { Self { sealer, fields } }

    /// Insert or overwrite a field.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name, value);
    }

    /// Value of `name`, or `KeyNotFound` if it is absent.
    pub fn get(&self, name: &str) -> Result<&str, CodecError> {
        self.fields.get(name).ok_or_else(|| CodecError::KeyNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool { self.fields.contains(name) }

    pub fn len(&self) -> usize { self.fields.len() }

    pub fn is_empty(&self) -> bool { self.fields.is_empty() }

    pub fn fields(&self) -> &Fields { &self.fields }

    pub fn into_fields(self) -> Fields { self.fields }

    /// Serialize the current fields and seal them.
    pub fn encode(&self) -> SignedPayload {
        let data = serialize_fields(&self.fields);
        let seal = self.sealer.seal(&data);
        debug!(fields = self.fields.len(), data_len = data.len(), "encoded payload");
        SignedPayload { data, seal }
    }

    /// Check the seal of `payload` without touching the fields.
    pub fn verify(&self, payload: &SignedPayload) -> Result<(), CodecError> {
        if self.sealer.verify(&payload.data, &payload.seal) {
            Ok(())
        } else {
            warn!(data_len = payload.data.len(), "rejecting payload: seal mismatch");
            Err(CodecError::SealMismatch)
        }
    }

    /// Verify `payload` and merge its fields into this codec.
    ///
    /// Fields absent from `payload.data` are kept. Nothing is applied unless
    /// the seal matches and every entry parses. Returns the number of entries
    /// applied.
    pub fn decode(&mut self, payload: &SignedPayload) -> Result<usize, CodecError> {
        self.verify(payload)?;
        let entries = parse_fields(&payload.data).inspect_err(|e| {
            warn!(error = %e, "rejecting sealed payload with malformed data");
        })?;
        let applied = entries.len();
        self.fields.extend(entries);
        debug!(applied, fields = self.fields.len(), "decoded payload");
        Ok(applied)
    }

    /// Parse a JSON wire record and [`decode`](Self::decode) it.
    pub fn decode_json(&mut self, json: &str) -> Result<usize, CodecError> {
        let payload = SignedPayload::from_json(json)?;
        self.decode(&payload)
    }
}
