//! Diversification input assembly.

extern crate alloc;
use alloc::vec::Vec;

use crate::encoding;
use crate::error::{DiversifyError, InputField};

/// Opaque diversification bytes, typically `UID || APPID || FIX`.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct DiversificationInput {
    inner: Vec<u8>,
}

impl DiversificationInput {
    /// Raw bytes, already concatenated.
    pub fn raw(bytes: &[u8]) -> Self {
        Self {
            inner: bytes.to_vec(),
        }
    }

    /// Decode a pre-concatenated hex string. Empty is allowed.
    pub fn from_hex(s: &str) -> Result<Self, DiversifyError> {
        Ok(Self {
            inner: encoding::decode(InputField::DiversificationInput, s)?,
        })
    }

    /// Decode and concatenate the three profile components in order
    /// UID, APPID, FIX. Each must be whole bytes on its own; errors name the
    /// component that failed to decode. [`crate::derive_components`] is the
    /// lenient form that joins the hex text first.
    pub fn from_components(
        uid: &str,
        app_id: &str,
        fixed: &str,
    ) -> Result<Self, DiversifyError> {
        let mut inner = encoding::decode(InputField::Uid, uid)?;
        inner.extend(encoding::decode(InputField::AppId, app_id)?);
        inner.extend(encoding::decode(InputField::Fixed, fixed)?);
        Ok(Self { inner })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.inner
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
