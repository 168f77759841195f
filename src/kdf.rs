//! KDF (AN10922 AES-128 profile)
//!
//! msg = frame(diversification_input)
//! key = AES-CMAC(master_key, msg)

use aes::Aes128;
use cmac::{Cmac, Mac};

use crate::error::DiversifyError;
use crate::input::DiversificationInput;
use crate::key::{DiversifiedKey, MasterKey, KEY_BYTES};
use crate::message;

/// AES-CMAC over `msg`. Key sizes other than 16 bytes are reported as
/// `InvalidKeyLength`.
pub fn cmac_aes128(key: &[u8], msg: &[u8]) -> Result<[u8; KEY_BYTES], DiversifyError> {
    let mac = <Cmac<Aes128> as Mac>::new_from_slice(key)
        .map_err(|_| DiversifyError::InvalidKeyLength { actual: key.len() })?;
    Ok(tag(mac, msg))
}

/// Derive the per-card key from already-validated inputs.
pub fn diversify(master: &MasterKey, input: &DiversificationInput) -> DiversifiedKey {
    let msg = message::frame(input.as_bytes());

    let mac = <Cmac<Aes128> as Mac>::new(master.as_bytes().into());
    DiversifiedKey::new(tag(mac, &msg))
}

fn tag(mut mac: Cmac<Aes128>, msg: &[u8]) -> [u8; KEY_BYTES] {
    mac.update(msg);
    let t = mac.finalize().into_bytes();

    let mut out = [0u8; KEY_BYTES];
    out.copy_from_slice(&t);
    out
}
