//! Error types for key diversification.

use core::fmt;

use thiserror::Error;

/// Which caller-supplied value an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputField {
    /// The master key (EMK).
    MasterKey,
    /// The pre-concatenated diversification input.
    DiversificationInput,
    /// Card UID component.
    Uid,
    /// Dynamic application identifier component.
    AppId,
    /// Fixed/constant component.
    Fixed,
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MasterKey => "master key",
            Self::DiversificationInput => "diversification input",
            Self::Uid => "UID",
            Self::AppId => "APPID",
            Self::Fixed => "FIX",
        };
        f.write_str(name)
    }
}

/// Every way a derivation can be rejected.
///
/// Malformed hex and a wrong key length are the two input errors. The
/// all-zero master key is well formed but is still refused with
/// [`WeakKey`](Self::WeakKey): it is the factory default key of new cards, and
/// a key derived from it looks valid while protecting nothing. Exhaustive matches must handle all three variants.
///
/// All variants are permanent input errors; retrying with the same input
/// yields the same error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DiversifyError {
    /// Input is not valid hexadecimal (odd length or non-hex character).
    #[error("{field} is not a valid hex string")]
    InvalidEncoding {
        /// The offending input.
        field: InputField,
    },

    /// Decoded master key is not 16 bytes.
    #[error("master key must be 16 bytes (32 hex characters), got {actual} bytes")]
    InvalidKeyLength {
        /// Decoded length in bytes.
        actual: usize,
    },

    /// Master key is all zeros (32 `0` characters). Checked after the
    /// length, in constant time.
    #[error("master key must not be all zeros")]
    WeakKey,
}

impl DiversifyError {
    pub(crate) const fn encoding(field: InputField) -> Self {
        Self::InvalidEncoding { field }
    }
}
