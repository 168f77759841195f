//! # keydiv
//!
//! AES-CMAC key diversification for contactless smartcard keys, following
//! the NXP AN10922 AES-128 profile.
//!
//! ## Quick Start
//!
//! ```rust
//! let key = keydiv::derive(
//!     "2B7E151628AED2A6ABF7158809CF4F3C",
//!     "04112233445566010203",
//! ).unwrap();
//!
//! assert_eq!(key, "A67F0B95FC94F113BC9F1EDBCE65F5F3");
//! ```
//!
//! ## Derivation
//!
//! - **Input**: `0x01 || UID || APPID || FIX`
//! - **Padding**: `0x80` then zeros up to 31 bytes, only when the input is
//!   shorter than 32 bytes
//! - **MAC**: AES-128 CMAC keyed with the master key
//! - **Output**: the 16-byte tag, as uppercase hex
//!
//! ## What's NOT Provided
//!
//! - Key storage
//! - Card communication
//! - Session keys or other AN10922 profiles (AES-192, 2K3DES, 3K3DES)

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

use alloc::format;
use alloc::string::String;

// ---------------------------------------------------------------------------
// Modules
// ---------------------------------------------------------------------------

mod error;
mod input;
mod kdf;
mod key;

pub mod encoding;
pub mod message;

#[cfg(feature = "std")]
pub mod audit;
#[cfg(feature = "std")]
pub mod collect;

// ---------------------------------------------------------------------------
// Public interface
// ---------------------------------------------------------------------------

pub use error::{DiversifyError, InputField};
pub use input::DiversificationInput;
pub use kdf::{cmac_aes128, diversify};
pub use key::{DiversifiedKey, MasterKey, KEY_BYTES};

/// Derive a diversified key from hex inputs.
///
/// `master_key_hex` must decode to 16 bytes; `diversification_input_hex` is
/// the already-concatenated `UID || APPID || FIX` and may be empty. Returns
/// 32 uppercase hex characters.
pub fn derive(
    master_key_hex: &str,
    diversification_input_hex: &str,
) -> Result<String, DiversifyError> {
    let raw_key = encoding::decode_secret(InputField::MasterKey, master_key_hex)?;
    let input = DiversificationInput::from_hex(diversification_input_hex)?;
    let master = MasterKey::from_slice(&raw_key)?;
    Ok(diversify(&master, &input).to_hex())
}

/// Like [`derive`], taking the three profile components separately.
///
/// The components are joined as hex text before decoding, so a field may
/// end on a half byte as long as the joined string is valid hex. Use
/// [`DiversificationInput::from_components`] to require whole bytes per
/// field.
pub fn derive_components(
    master_key_hex: &str,
    uid_hex: &str,
    app_id_hex: &str,
    fixed_hex: &str,
) -> Result<String, DiversifyError> {
    let joined = format!("{}{}{}", uid_hex, app_id_hex, fixed_hex);
    derive(master_key_hex, &joined)
}
