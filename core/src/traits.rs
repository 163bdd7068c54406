//! Abstraction over seal computation. The codec only needs to produce a seal for
//! a `Data` string and to check an inbound one.

use subtle::ConstantTimeEq;

pub trait Sealer {
    /// Produce the lowercase hex seal for `data`.
    fn seal(&self, data: &str) -> String;

    /// Check `seal` against the one computed for `data`. Case-sensitive.
    fn verify(&self, data: &str, seal: &str) -> bool {
        let expected = self.seal(data);
        expected.as_bytes().ct_eq(seal.as_bytes()).into()
    }
}
