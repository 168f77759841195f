//! Hex codec for keys and diversification data.

extern crate alloc;
use alloc::string::String;
use alloc::vec::Vec;

use zeroize::Zeroizing;

use crate::error::{DiversifyError, InputField};

/// Decode a hex string. Case-insensitive; no whitespace or prefix allowed.
pub fn decode(field: InputField, s: &str) -> Result<Vec<u8>, DiversifyError> {
    hex::decode(s).map_err(|_| DiversifyError::encoding(field))
}

/// Decode a hex string that carries secret material.
pub fn decode_secret(field: InputField, s: &str) -> Result<Zeroizing<Vec<u8>>, DiversifyError> {
    decode(field, s).map(Zeroizing::new)
}

/// Uppercase hex, the output convention for derived keys.
pub fn encode_upper(bytes: &[u8]) -> String {
    hex::encode_upper(bytes)
}
