//! Property tests for the signed payload codec.

use payseal_core::{CodecError, Fields, PayloadCodec, SignedPayload};
use proptest::prelude::*;

/// Names and values free of the `|` and `=` delimiters; names non-empty.
fn field_list() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(("[a-zA-Z0-9_.]{1,12}", "[^|=]{0,16}"), 0..8)
}

fn key() -> impl Strategy<Value = String> {
    "[ -~]{0,32}"
}

proptest! {
    #[test]
    fn decode_of_encode_restores_mapping(pairs in field_list(), k in key()) {
        let fields: Fields = pairs.into_iter().collect();
        let payload = PayloadCodec::with_fields(k.clone(), fields.clone()).encode();

        let mut decoder = PayloadCodec::new(k);
        prop_assert_eq!(decoder.decode(&payload), Ok(fields.len()));
        for (name, value) in fields.iter() {
            prop_assert_eq!(decoder.get(name), Ok(value));
        }
        prop_assert_eq!(decoder.len(), fields.len());
    }

    #[test]
    fn encode_is_deterministic(pairs in field_list(), k in key()) {
        let fields: Fields = pairs.into_iter().collect();
        let a = PayloadCodec::with_fields(k.clone(), fields.clone()).encode();
        let b = PayloadCodec::with_fields(k, fields).encode();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn different_keys_give_different_seals(pairs in field_list(), k1 in key(), k2 in key()) {
        prop_assume!(k1 != k2);
        let fields: Fields = pairs.into_iter().collect();
        let a = PayloadCodec::with_fields(k1, fields.clone()).encode();
        let b = PayloadCodec::with_fields(k2, fields).encode();
        prop_assert_eq!(&a.data, &b.data);
        prop_assert_ne!(a.seal, b.seal);
    }

    #[test]
    fn single_char_tamper_is_detected(
        pairs in field_list(),
        k in key(),
        idx in any::<prop::sample::Index>(),
        in_seal in any::<bool>(),
    ) {
        let fields: Fields = pairs.into_iter().collect();
        let payload = PayloadCodec::with_fields(k.clone(), fields).encode();
        prop_assume!(in_seal || !payload.data.is_empty());

        let target = if in_seal { &payload.seal } else { &payload.data };
        let mut chars: Vec<char> = target.chars().collect();
        let i = idx.index(chars.len());
        chars[i] = if chars[i] == 'x' { 'y' } else { 'x' };
        let mutated: String = chars.into_iter().collect();

        let tampered = if in_seal {
            SignedPayload::new(payload.data.clone(), mutated)
        } else {
            SignedPayload::new(mutated, payload.seal.clone())
        };
        let mut decoder = PayloadCodec::new(k);
        prop_assert_eq!(decoder.decode(&tampered), Err(CodecError::SealMismatch));
        prop_assert!(decoder.is_empty());
    }

    #[test]
    fn seal_is_64_lowercase_hex(pairs in field_list(), k in key()) {
        let fields: Fields = pairs.into_iter().collect();
        let seal = PayloadCodec::with_fields(k, fields).encode().seal;
        prop_assert_eq!(seal.len(), 64);
        prop_assert!(seal.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
    }
}
