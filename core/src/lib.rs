//! payseal core library: sealed key-value payloads for payment gateway exchanges.
//!
//! Wire format:
//! - `Data`: ordered `name=value` entries joined by `|`, no escaping
//! - `Seal`: lowercase hex SHA-256 of `Data` immediately followed by the shared secret key
//! - Decoding checks the seal before any field is applied, then merges the fields
//!
//! Rendering the record into a form and moving it over HTTP are left to callers;
//! [`SignedPayload`] serializes as `{"Data": ..., "Seal": ...}` for them.

pub mod codec;
pub mod errors;
pub mod traits;
pub mod types;

pub use codec::{DEMO_SECRET_KEY, PayloadCodec, Sha256Sealer};
pub use errors::CodecError;
pub use traits::Sealer;
pub use types::{Fields, SecretKey, SignedPayload, compute_seal, parse_fields, serialize_fields};

/// Library version string.
pub fn version() -> &'static str { concat!("payseal-core ", env!("CARGO_PKG_VERSION")) }
