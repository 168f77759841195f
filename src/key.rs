//! Master and diversified key types.

extern crate alloc;
use alloc::string::String;

use core::fmt;

use subtle::{Choice, ConstantTimeEq};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::encoding;
use crate::error::{DiversifyError, InputField};

/// AES-128 key size in bytes.
pub const KEY_BYTES: usize = 16;

// ---------------------------------------------------------------------------
// Master key
// ---------------------------------------------------------------------------

/// AES-128 master key (EMK) the per-card keys are diversified from.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct MasterKey {
    bytes: [u8; KEY_BYTES],
}

impl MasterKey {
    /// Parse a 32-character hex string.
    pub fn from_hex(s: &str) -> Result<Self, DiversifyError> {
        let raw = encoding::decode_secret(InputField::MasterKey, s)?;
        Self::from_slice(&raw)
    }

    /// Build from raw bytes. Rejects any length other than 16 and the
    /// all-zero key.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DiversifyError> {
        if bytes.len() != KEY_BYTES {
            return Err(DiversifyError::InvalidKeyLength {
                actual: bytes.len(),
            });
        }
        let mut key = Self {
            bytes: [0u8; KEY_BYTES],
        };
        key.bytes.copy_from_slice(bytes);
        if bool::from(key.is_zero()) {
            return Err(DiversifyError::WeakKey);
        }
        Ok(key)
    }

    pub(crate) fn as_bytes(&self) -> &[u8; KEY_BYTES] {
        &self.bytes
    }

    fn is_zero(&self) -> Choice {
        self.bytes[..].ct_eq(&[0u8; KEY_BYTES][..])
    }
}

impl TryFrom<&[u8]> for MasterKey {
    type Error = DiversifyError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_slice(bytes)
    }
}

impl fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MasterKey([REDACTED])")
    }
}

// ---------------------------------------------------------------------------
// Diversified key
// ---------------------------------------------------------------------------

/// Per-card key produced by the diversification.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DiversifiedKey {
    bytes: [u8; KEY_BYTES],
}

impl DiversifiedKey {
    pub(crate) const fn new(bytes: [u8; KEY_BYTES]) -> Self {
        Self { bytes }
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_BYTES] {
        &self.bytes
    }

    /// 32 uppercase hex characters.
    pub fn to_hex(&self) -> String {
        encoding::encode_upper(&self.bytes)
    }
}

impl ConstantTimeEq for DiversifiedKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.bytes[..].ct_eq(&other.bytes[..])
    }
}

impl PartialEq for DiversifiedKey {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for DiversifiedKey {}

impl fmt::Display for DiversifiedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.bytes {
            write!(f, "{:02X}", b)?;
        }
        Ok(())
    }
}

impl fmt::Debug for DiversifiedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DiversifiedKey([REDACTED])")
    }
}
